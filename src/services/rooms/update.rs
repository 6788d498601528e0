use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{RoomService, invalidate_room_caches};
use crate::middlewares::RequireJWT;
use crate::models::rooms::requests::UpdateRoomRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn update_room(
    service: &RoomService,
    request: &HttpRequest,
    room_id: i64,
    update_data: UpdateRoomRequest,
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

    if let Some(title) = &update_data.title
        && title.trim().is_empty()
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "房间标题不能为空",
        )));
    }

    // 替换题目列表时同样整批校验归属
    if let Some(question_ids) = &update_data.question_ids
        && !question_ids.is_empty()
        && let Err(resp) =
            super::create::check_question_batch(&storage, room.teacher_id, question_ids).await
    {
        return Ok(resp);
    }

    match storage.update_room(room_id, update_data).await {
        Ok(Some(updated)) => {
            info!("Room {} updated by teacher {}", room_id, uid);

            let cache = service.get_cache(request);
            invalidate_room_caches(&cache, room.teacher_id, &room.room_code).await;

            Ok(HttpResponse::Ok().json(ApiResponse::success(updated, "Room updated successfully")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::RoomNotFound,
            "Room not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to update room: {e}"),
            )),
        ),
    }
}
