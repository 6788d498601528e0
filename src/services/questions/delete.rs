use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::QuestionService;
use crate::middlewares::RequireJWT;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_question(
    service: &QuestionService,
    request: &HttpRequest,
    question_id: i64,
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
            "You do not have permission to delete this question",
        )));
    }

    match storage.delete_question(question_id).await {
        Ok(true) => {
            info!("Question {} deleted by teacher {}", question_id, uid);

            let cache = service.get_cache(request);
            super::invalidate_question_caches(&cache, question.teacher_id, Some(question_id)).await;

            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Question deleted successfully")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::QuestionNotFound,
            "Question not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to delete question: {e}"),
            )),
        ),
    }
}
