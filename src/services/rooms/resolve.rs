use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::warn;

use super::{ROOM_CACHE_TTL_RESOLVE, RoomService};
use crate::cache::CacheResult;
use crate::models::rooms::entities::{Room, RoomStatus};
use crate::models::rooms::responses::PublicRoomView;
use crate::models::{ApiResponse, ErrorCode};

/// 学生凭房间码换取房间视图，无需登录
pub async fn resolve_room_by_code(
    service: &RoomService,
    request: &HttpRequest,
    room_code: String,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let cache = service.get_cache(request);

    let cache_key = format!("room:{room_code}");
    let room = match cache.get_raw(&cache_key).await {
        CacheResult::Found(room_json) => match serde_json::from_str::<Room>(&room_json) {
            Ok(room) => Some(room),
            Err(e) => {
                // 缓存里的坏条目直接清掉，回源重查
                warn!("Corrupted room cache entry for {}: {}", cache_key, e);
                cache.remove(&cache_key).await;
                None
            }
        },
        _ => None,
    };

    let room = match room {
        Some(room) => room,
        None => match storage.get_room_by_code(&room_code).await {
            Ok(Some(room)) => {
                if let Ok(room_json) = serde_json::to_string(&room) {
                    cache
                        .insert_raw(cache_key.clone(), room_json, ROOM_CACHE_TTL_RESOLVE)
                        .await;
                }
                room
            }
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::RoomNotFound,
                    "Room not found or has expired",
                )));
            }
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Failed to resolve room: {e}"),
                    )),
                );
            }
        },
    };

    if room.is_expired(chrono::Utc::now()) {
        // 缓存可能还留着过期前写入的条目
        cache.remove(&cache_key).await;
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::RoomNotFound,
            "Room not found or has expired",
        )));
    }

    if room.status != RoomStatus::Active {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::RoomNotActive,
            "Room is not active",
        )));
    }

    // 容量以存储层实时计数为准，不信任缓存副本里的统计
    let participant_count = match storage.count_responses_by_room(room.id).await {
        Ok(count) => count,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to count room participants: {e}"),
                )),
            );
        }
    };
    if !room.has_capacity(participant_count as i64) {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::RoomFull,
            "Room is full",
        )));
    }

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
        PublicRoomView::from_room(&room, &questions),
        "Room retrieved successfully",
    )))
}
