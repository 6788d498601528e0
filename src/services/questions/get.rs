use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{QUESTION_CACHE_TTL, QuestionService};
use crate::cache::get_or_load;
use crate::middlewares::RequireJWT;
use crate::models::questions::entities::Question;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_question(
    service: &QuestionService,
    request: &HttpRequest,
    question_id: i64,
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
    let role = RequireJWT::extract_user_role(request);

    let result = get_or_load::<Question, _, _>(
        &cache,
        &format!("question:{question_id}"),
        QUESTION_CACHE_TTL,
        || async move { storage.get_question_by_id(question_id).await },
    )
    .await;

    match result {
        Ok(Some(question)) => {
            // 归属校验不走缓存豁免，缓存命中同样要比对
            if question.teacher_id != uid && role != Some(UserRole::Admin) {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::QuestionPermissionDenied,
                    "You do not have permission to view this question",
                )));
            }

            Ok(HttpResponse::Ok().json(ApiResponse::success(
                question,
                "Question retrieved successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::QuestionNotFound,
            "Question not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to get question: {e}"),
            )),
        ),
    }
}
