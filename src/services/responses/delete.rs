use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ResponseService;
use crate::middlewares::RequireJWT;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_response(
    service: &ResponseService,
    request: &HttpRequest,
    response_id: i64,
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

    // 删除权限跟着房间归属走，房间已删时放行清理孤儿答卷
    match storage.get_room_by_id(response.room_id).await {
        Ok(Some(room)) => {
            if room.teacher_id != uid && role != Some(UserRole::Admin) {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::RoomPermissionDenied,
                    "You do not have permission to delete responses in this room",
                )));
            }
        }
        Ok(None) => {}
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get room: {e}"),
                )),
            );
        }
    }

    match storage.delete_response(response_id).await {
        Ok(true) => {
            info!("Response {} deleted by teacher {}", response_id, uid);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Response deleted successfully")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ResponseNotFound,
            "Response not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to delete response: {e}"),
            )),
        ),
    }
}
