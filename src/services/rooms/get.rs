use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::RoomService;
use crate::middlewares::RequireJWT;
use crate::models::rooms::entities::Room;
use crate::models::rooms::responses::RoomDetailResponse;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub async fn get_room(
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

    let room = match fetch_owned_room(&storage, room_id, uid, role).await {
        Ok(room) => room,
        Err(resp) => return Ok(resp),
    };

    let questions = match storage.get_questions_by_ids(&room.question_ids).await {
        Ok(questions) => questions,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to load room questions: {e}"),
                )),
            );
        }
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        RoomDetailResponse { room, questions },
        "Room retrieved successfully",
    )))
}

/// 取房间并做归属校验，过期房间对任何人都按不存在处理
pub(crate) async fn fetch_owned_room(
    storage: &std::sync::Arc<dyn Storage>,
    room_id: i64,
    uid: i64,
    role: Option<UserRole>,
) -> Result<Room, HttpResponse> {
    let room = match storage.get_room_by_id(room_id).await {
        Ok(Some(room)) => room,
        Ok(None) => {
            return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::RoomNotFound,
                "Room not found",
            )));
        }
        Err(e) => {
            return Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get room: {e}"),
                )),
            );
        }
    };

    if room.is_expired(chrono::Utc::now()) {
        return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::RoomNotFound,
            "Room not found",
        )));
    }

    if room.teacher_id != uid && role != Some(UserRole::Admin) {
        return Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::RoomPermissionDenied,
            "You do not have permission to access this room",
        )));
    }

    Ok(room)
}
