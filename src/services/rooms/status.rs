use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{RoomService, invalidate_room_caches};
use crate::middlewares::RequireJWT;
use crate::models::rooms::requests::UpdateRoomStatusRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn update_room_status(
    service: &RoomService,
    request: &HttpRequest,
    room_id: i64,
    status_data: UpdateRoomStatusRequest,
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

    if !room.status.can_transition_to(status_data.status) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::RoomInvalidStatusTransition,
            format!(
                "Cannot transition room from {} to {}",
                room.status, status_data.status
            ),
        )));
    }

    match storage.update_room_status(room_id, status_data.status).await {
        Ok(Some(updated)) => {
            info!(
                "Room {} status changed to {} by teacher {}",
                room_id, updated.status, uid
            );

            let cache = service.get_cache(request);
            invalidate_room_caches(&cache, room.teacher_id, &room.room_code).await;

            Ok(HttpResponse::Ok().json(ApiResponse::success(
                updated,
                "Room status updated successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::RoomNotFound,
            "Room not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to update room status: {e}"),
            )),
        ),
    }
}
