use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ResponseService;
use crate::middlewares::RequireJWT;
use crate::models::responses::entities::ResponseStatus;
use crate::models::responses::requests::RoomResponsesQuery;
use crate::models::responses::responses::{ResponseAggregateStats, RoomResponsesResponse};
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_room_responses(
    service: &ResponseService,
    request: &HttpRequest,
    room_id: i64,
    query: RoomResponsesQuery,
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

    // 房间归属校验复用教师端房间读取逻辑，过期房间一并挡掉
    if let Err(resp) =
        crate::services::rooms::get::fetch_owned_room(&storage, room_id, uid, role).await
    {
        return Ok(resp);
    }

    let status = match query.status.as_deref() {
        Some(value) if !value.trim().is_empty() => match value.parse::<ResponseStatus>() {
            Ok(status) => Some(status),
            Err(e) => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::BadRequest,
                    format!("无效的 status 参数: {e}"),
                )));
            }
        },
        _ => None,
    };

    match storage.list_responses_by_room(room_id, status).await {
        Ok(items) => {
            let stats = ResponseAggregateStats::from_responses(&items);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                RoomResponsesResponse {
                    count: items.len() as i64,
                    stats,
                    items,
                },
                "Room responses retrieved successfully",
            )))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve room responses: {e}"),
            )),
        ),
    }
}
