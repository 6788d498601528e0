use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{RoomService, invalidate_room_caches};
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_room(
    service: &RoomService,
    request: &HttpRequest,
    room_id: i64,
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

    match storage.delete_room(room_id).await {
        Ok(true) => {
            info!("Room {} deleted by teacher {}", room_id, uid);

            let cache = service.get_cache(request);
            invalidate_room_caches(&cache, room.teacher_id, &room.room_code).await;

            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Room deleted successfully")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::RoomNotFound,
            "Room not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to delete room: {e}"),
            )),
        ),
    }
}
