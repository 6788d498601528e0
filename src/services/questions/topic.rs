use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{QUESTION_TOPIC_CACHE_TTL, QuestionService};
use crate::cache::get_or_load;
use crate::middlewares::RequireJWT;
use crate::models::questions::entities::{Question, QuestionTopic};
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_questions_by_topic(
    service: &QuestionService,
    request: &HttpRequest,
    topic: String,
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

    let topic = match topic.parse::<QuestionTopic>() {
        Ok(topic) => topic,
        Err(e) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::BadRequest, e)));
        }
    };

    let cache_key = format!("questions:teacher:{uid}:topic:{topic}");
    let result = get_or_load::<Vec<Question>, _, _>(
        &cache,
        &cache_key,
        QUESTION_TOPIC_CACHE_TTL,
        || async move {
            storage
                .list_questions_by_topic(uid, topic)
                .await
                .map(Some)
        },
    )
    .await;

    match result {
        Ok(Some(questions)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            questions,
            "Questions retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            Vec::<Question>::new(),
            "Questions retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve questions: {e}"),
            )),
        ),
    }
}
