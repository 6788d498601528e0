use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::{info, warn};

use super::ResponseService;
use crate::grading;
use crate::models::responses::entities::ResponseAnswer;
use crate::models::responses::requests::SubmitResponseRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

/// 交卷只允许发生一次，靠存储层条件更新兜底并发重复提交
pub async fn submit_response(
    service: &ResponseService,
    request: &HttpRequest,
    response_id: i64,
    submit_data: SubmitResponseRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

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

    if response.status.is_final() {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::ResponseAlreadySubmitted,
            "Response already submitted",
        )));
    }

    // 房间被删或过期后不再收卷；closed 状态仍然收，学生可能正在限时内补交
    let room = match storage.get_room_by_id(response.room_id).await {
        Ok(Some(room)) if !room.is_expired(chrono::Utc::now()) => room,
        Ok(_) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::RoomNotFound,
                "Room not found or has expired",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get room: {e}"),
                )),
            );
        }
    };

    // 请求携带的作答优先，缺省时按已保存的进度判分
    let slots: Vec<ResponseAnswer> = match &submit_data.answers {
        Some(inputs) => inputs
            .iter()
            .map(|input| ResponseAnswer {
                question_id: input.question_id,
                answer: input.answer.clone(),
                is_correct: false,
                points_earned: 0.0,
                time_spent: input.time_spent,
            })
            .collect(),
        None => response.answers.clone(),
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

    let graded = grading::grade_response_answers(&questions, &slots);
    // 满分用建卷时的快照，房间中途换题不影响已开始的答卷
    let totals = grading::compute_totals(&graded, response.max_score);
    let total_time_spent = submit_data
        .total_time_spent
        .unwrap_or(response.total_time_spent);

    let submitted = match storage
        .submit_response(
            response_id,
            graded,
            totals.total_score,
            totals.percentage,
            total_time_spent,
        )
        .await
    {
        Ok(submitted) => submitted,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to submit response: {e}"),
                )),
            );
        }
    };

    if !submitted {
        // 条件更新没生效，说明并发方先交了卷或答卷已不存在
        return match storage.get_response_by_id(response_id).await {
            Ok(Some(_)) => Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::ResponseAlreadySubmitted,
                "Response already submitted",
            ))),
            _ => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ResponseNotFound,
                "Response not found",
            ))),
        };
    }

    info!(
        "Response {} submitted in room {} with score {}/{}",
        response_id, room.id, totals.total_score, response.max_score
    );

    refresh_room_average(&storage, room.id, true).await;

    match storage.get_response_by_id(response_id).await {
        Ok(Some(submitted_response)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            submitted_response,
            "Response submitted successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ResponseNotFound,
            "Response not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to get response: {e}"),
            )),
        ),
    }
}

/// 提交或批改后整体重算房间平均分
///
/// count_submission 为 true 时提交计数加一，人工批改只刷新均值。
/// 统计失败只记日志，不影响已落库的答卷。
pub(crate) async fn refresh_room_average(
    storage: &Arc<dyn Storage>,
    room_id: i64,
    count_submission: bool,
) {
    let average = match storage.list_responses_by_room(room_id, None).await {
        Ok(responses) => {
            let finals: Vec<f64> = responses
                .iter()
                .filter(|r| r.status.is_final())
                .map(|r| r.percentage)
                .collect();
            if finals.is_empty() {
                0.0
            } else {
                finals.iter().sum::<f64>() / finals.len() as f64
            }
        }
        Err(e) => {
            warn!("Failed to recompute average for room {}: {}", room_id, e);
            return;
        }
    };

    let result = if count_submission {
        storage.record_room_submission(room_id, average).await
    } else {
        storage.update_room_average(room_id, average).await
    };
    if let Err(e) = result {
        warn!("Failed to update stats for room {}: {}", room_id, e);
    }
}
