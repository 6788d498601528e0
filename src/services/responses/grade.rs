use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ResponseService;
use crate::grading;
use crate::middlewares::RequireJWT;
use crate::models::responses::requests::GradeResponseRequest;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

/// 教师批改问答与论述题，批改可重复进行
pub async fn grade_response(
    service: &ResponseService,
    request: &HttpRequest,
    response_id: i64,
    grade_data: GradeResponseRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let uid = match RequireJWT::extract_user_id(request) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized: missing user id",
            )));
        }
    };
    let role = RequireJWT::extract_user_role(request);

    let response = match storage.get_response_by_id(response_id).await {
        Ok(Some(response)) => response,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ResponseNotFound,
                "Response not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get response: {e}"),
                )),
            );
        }
    };

    // 批改权限跟着房间归属走
    let room = match storage.get_room_by_id(response.room_id).await {
        Ok(Some(room)) => room,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::RoomNotFound,
                "Room not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get room: {e}"),
                )),
            );
        }
    };
    if room.teacher_id != uid && role != Some(UserRole::Admin) {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::RoomPermissionDenied,
            "You do not have permission to grade responses in this room",
        )));
    }

    if !response.status.is_final() {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::ResponseInvalid,
            "Cannot grade a response that has not been submitted",
        )));
    }

    let mut answers = response.answers.clone();
    grading::apply_manual_grades(&mut answers, &grade_data.answers);
    let totals = grading::compute_totals(&answers, response.max_score);

    match storage
        .save_response_grades(response_id, answers, totals.total_score, totals.percentage)
        .await
    {
        Ok(Some(graded)) => {
            info!(
                "Response {} graded by teacher {} with score {}/{}",
                response_id, uid, totals.total_score, response.max_score
            );

            // 均值按全部已交卷答卷重算，不增加提交计数
            super::submit::refresh_room_average(&storage, room.id, false).await;

            Ok(HttpResponse::Ok().json(ApiResponse::success(
                graded,
                "Response graded successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ResponseNotFound,
            "Response not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to grade response: {e}"),
            )),
        ),
    }
}
