use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::{ROOM_CACHE_TTL_CREATE, RoomService};
use crate::middlewares::RequireJWT;
use crate::models::rooms::requests::CreateRoomRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use crate::utils::random_code::generate_room_code;

pub async fn create_room(
    service: &RoomService,
    request: &HttpRequest,
    room_data: CreateRoomRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = service.get_config();

    let uid = match RequireJWT::extract_user_id(request) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized: missing user id",
            )));
        }
    };

    if room_data.title.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "房间标题不能为空",
        )));
    }

    // 题目整批校验，任何一个缺失或不属于当前教师都拒绝
    if !room_data.question_ids.is_empty()
        && let Err(resp) = check_question_batch(&storage, uid, &room_data.question_ids).await
    {
        return Ok(resp);
    }

    // 生成唯一房间码，撞码时重试
    let room_code = match generate_unique_room_code(&storage, config.room.code_length, config.room.code_max_attempts).await {
        Ok(code) => code,
        Err(resp) => return Ok(resp),
    };

    let expires_at = chrono::Utc::now() + chrono::Duration::hours(config.room.expiry_hours);

    match storage
        .create_room(uid, room_code, room_data, expires_at.timestamp())
        .await
    {
        Ok(room) => {
            info!(
                "Room {} ({}) created by teacher {}",
                room.id, room.room_code, uid
            );

            let cache = service.get_cache(request);
            // 新房间直接进缓存，学生端解析大概率紧随其后
            if let Ok(room_json) = serde_json::to_string(&room) {
                cache
                    .insert_raw(
                        format!("room:{}", room.room_code),
                        room_json,
                        ROOM_CACHE_TTL_CREATE,
                    )
                    .await;
            }
            cache
                .remove_by_pattern(&format!("rooms:teacher:{uid}:*"))
                .await;

            Ok(HttpResponse::Created().json(ApiResponse::success(room, "Room created successfully")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to create room: {e}"),
            )),
        ),
    }
}

/// 校验一批题目全部存在且归当前教师所有
pub(crate) async fn check_question_batch(
    storage: &std::sync::Arc<dyn Storage>,
    uid: i64,
    question_ids: &[i64],
) -> Result<(), HttpResponse> {
    let questions = match storage.get_questions_by_ids(question_ids).await {
        Ok(questions) => questions,
        Err(e) => {
            return Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to verify questions: {e}"),
                )),
            );
        }
    };

    let mut unique_ids: Vec<i64> = question_ids.to_vec();
    unique_ids.sort_unstable();
    unique_ids.dedup();

    if questions.len() != unique_ids.len() {
        return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::QuestionBatchInvalid,
            "部分题目不存在",
        )));
    }

    if questions.iter().any(|q| q.teacher_id != uid) {
        return Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::QuestionPermissionDenied,
            "不能使用其他教师的题目",
        )));
    }

    Ok(())
}

async fn generate_unique_room_code(
    storage: &std::sync::Arc<dyn Storage>,
    code_length: usize,
    max_attempts: u32,
) -> Result<String, HttpResponse> {
    for attempt in 0..max_attempts {
        let code = generate_room_code(code_length);
        match storage.get_room_by_code(&code).await {
            Ok(None) => return Ok(code),
            Ok(Some(_)) => {
                warn!("Room code collision on attempt {}: {}", attempt + 1, code);
            }
            Err(e) => {
                return Err(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Failed to check room code: {e}"),
                    )),
                );
            }
        }
    }

    Err(
        HttpResponse::InternalServerError().json(ApiResponse::error_empty(
            ErrorCode::RoomCodeGenerationFailed,
            "无法生成唯一房间码，请重试",
        )),
    )
}
