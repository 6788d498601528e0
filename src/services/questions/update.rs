use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::QuestionService;
use crate::middlewares::RequireJWT;
use crate::models::questions::entities::{Question, QuestionType};
use crate::models::questions::requests::UpdateQuestionRequest;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

pub async fn update_question(
    service: &QuestionService,
    request: &HttpRequest,
    question_id: i64,
    update_data: UpdateQuestionRequest,
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

    // 改数据走权威存储，不读缓存
    let question = match storage.get_question_by_id(question_id).await {
        Ok(Some(question)) => question,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::QuestionNotFound,
                "Question not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get question: {e}"),
                )),
            );
        }
    };

    if question.teacher_id != uid && role != Some(UserRole::Admin) {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::QuestionPermissionDenied,
            "You do not have permission to update this question",
        )));
    }

    if let Err(msg) = validate_update_payload(&question, &update_data) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::QuestionInvalid, msg)));
    }

    match storage.update_question(question_id, update_data).await {
        Ok(Some(updated)) => {
            info!("Question {} updated by teacher {}", question_id, uid);

            let cache = service.get_cache(request);
            super::invalidate_question_caches(&cache, question.teacher_id, Some(question_id)).await;

            Ok(HttpResponse::Ok()
                .json(ApiResponse::success(updated, "Question updated successfully")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::QuestionNotFound,
            "Question not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to update question: {e}"),
            )),
        ),
    }
}

/// 更新后的题目必须仍然可判分，按更新后的题型校验关键答案字段
fn validate_update_payload(
    current: &Question,
    update: &UpdateQuestionRequest,
) -> Result<(), String> {
    if let Some(ref text) = update.question_text
        && text.trim().is_empty()
    {
        return Err("题干不能为空".to_string());
    }

    if let Some(points) = update.points
        && points <= 0.0
    {
        return Err("分值必须大于 0".to_string());
    }

    let target_type = update.question_type.unwrap_or(current.question_type);
    match target_type {
        QuestionType::MultipleChoice => {
            if let Some(ref choices) = update.choices {
                if choices.len() < 2 {
                    return Err("选择题至少需要两个选项".to_string());
                }
                if !choices.iter().any(|c| c.is_correct) {
                    return Err("选择题至少需要一个正确选项".to_string());
                }
            } else if update.question_type.is_some() && current.choices.len() < 2 {
                return Err("切换为选择题时必须提供选项".to_string());
            }
        }
        QuestionType::TrueFalse => {
            if update.correct_answer.is_none()
                && update.question_type.is_some()
                && current.correct_answer.is_none()
            {
                return Err("判断题必须提供正确答案".to_string());
            }
        }
        QuestionType::Matching => {
            if let Some(ref pairs) = update.pairs {
                if pairs.is_empty() {
                    return Err("配对题至少需要一组配对".to_string());
                }
            } else if update.question_type.is_some() && current.pairs.is_empty() {
                return Err("切换为配对题时必须提供配对".to_string());
            }
        }
        QuestionType::FillInTheBlank => {
            if let Some(ref answers) = update.correct_answers {
                if answers.is_empty() || answers.iter().any(|a| a.trim().is_empty()) {
                    return Err("填空题的每个空都需要非空答案".to_string());
                }
            } else if update.question_type.is_some() && current.correct_answers.is_empty() {
                return Err("切换为填空题时必须提供答案".to_string());
            }
        }
        QuestionType::ShortAnswer | QuestionType::Essay => {}
    }

    Ok(())
}
