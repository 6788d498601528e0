use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{RoomService, invalidate_room_caches};
use crate::middlewares::RequireJWT;
use crate::models::rooms::requests::AddQuestionsRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn add_questions_to_room(
    service: &RoomService,
    request: &HttpRequest,
    room_id: i64,
    batch: AddQuestionsRequest,
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

    let room = match super::get::fetch_owned_room(&storage, room_id, uid, role).await {
        Ok(room) => room,
        Err(resp) => return Ok(resp),
    };

    if batch.question_ids.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::QuestionBatchInvalid,
            "题目列表不能为空",
        )));
    }

    if let Err(resp) =
        super::create::check_question_batch(&storage, room.teacher_id, &batch.question_ids).await
    {
        return Ok(resp);
    }

    match storage
        .add_questions_to_room(room_id, &batch.question_ids)
        .await
    {
        Ok(Some(updated)) => {
            info!(
                "{} questions added to room {} by teacher {}",
                batch.question_ids.len(),
                room_id,
                uid
            );

            let cache = service.get_cache(request);
            invalidate_room_caches(&cache, room.teacher_id, &room.room_code).await;

            Ok(HttpResponse::Ok().json(ApiResponse::success(
                updated,
                "Questions added to room successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::RoomNotFound,
            "Room not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to add questions to room: {e}"),
            )),
        ),
    }
}
