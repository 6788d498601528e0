use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ROOM_LIST_CACHE_TTL, RoomService};
use crate::cache::get_or_load;
use crate::middlewares::RequireJWT;
use crate::models::rooms::entities::RoomStatus;
use crate::models::rooms::requests::{RoomListQuery, RoomQueryParams};
use crate::models::rooms::responses::RoomListResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_rooms(
    service: &RoomService,
    request: &HttpRequest,
    query: RoomQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let cache = service.get_cache(request);

    let uid = match RequireJWT::extract_user_id(request) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized: missing user id",
            )));
        }
    };

    let status = match query.status.as_deref() {
        Some(value) if !value.trim().is_empty() => match value.parse::<RoomStatus>() {
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

    let list_query = RoomListQuery {
        teacher_id: uid,
        page: query.pagination.page,
        size: query.pagination.size,
        status,
    };

    let cache_key = list_cache_key(&list_query);
    let result = get_or_load::<RoomListResponse, _, _>(
        &cache,
        &cache_key,
        ROOM_LIST_CACHE_TTL,
        || async move {
            storage
                .list_rooms_with_pagination(list_query)
                .await
                .map(Some)
        },
    )
    .await;

    match result {
        Ok(Some(response)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Room list retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            RoomListResponse::empty(query.pagination.page, query.pagination.size),
            "Room list retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve room list: {e}"),
            )),
        ),
    }
}

fn list_cache_key(query: &RoomListQuery) -> String {
    format!(
        "rooms:teacher:{}:list:{}:{}:{}",
        query.teacher_id,
        query.page,
        query.size,
        query
            .status
            .map(|s| s.to_string())
            .unwrap_or_default(),
    )
}
