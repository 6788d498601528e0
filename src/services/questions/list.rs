use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{QUESTION_LIST_CACHE_TTL, QuestionService};
use crate::cache::get_or_load;
use crate::models::questions::entities::{Difficulty, QuestionTopic, QuestionType};
use crate::models::questions::requests::{QuestionListQuery, QuestionQueryParams};
use crate::models::questions::responses::QuestionListResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_questions(
    service: &QuestionService,
    request: &HttpRequest,
    query: QuestionQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let cache = service.get_cache(request);

    let uid = match crate::middlewares::RequireJWT::extract_user_id(request) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized: missing user id",
            )));
        }
    };

    // 过滤参数统一先解析，非法值直接 400
    let topic = match parse_filter::<QuestionTopic>(query.topic.as_deref(), "topic") {
        Ok(v) => v,
        Err(msg) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
        }
    };
    let difficulty = match parse_filter::<Difficulty>(query.difficulty.as_deref(), "difficulty") {
        Ok(v) => v,
        Err(msg) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
        }
    };
    let question_type =
        match parse_filter::<QuestionType>(query.question_type.as_deref(), "question_type") {
            Ok(v) => v,
            Err(msg) => {
                return Ok(HttpResponse::BadRequest()
                    .json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
            }
        };

    let list_query = QuestionListQuery {
        teacher_id: uid,
        page: query.pagination.page,
        size: query.pagination.size,
        topic,
        difficulty,
        question_type,
        search: query.search,
    };

    let cache_key = list_cache_key(&list_query);
    let result = get_or_load::<QuestionListResponse, _, _>(
        &cache,
        &cache_key,
        QUESTION_LIST_CACHE_TTL,
        || async move {
            storage
                .list_questions_with_pagination(list_query)
                .await
                .map(Some)
        },
    )
    .await;

    match result {
        Ok(Some(response)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Question list retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            QuestionListResponse::empty(query.pagination.page, query.pagination.size),
            "Question list retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve question list: {e}"),
            )),
        ),
    }
}

fn parse_filter<T: std::str::FromStr<Err = String>>(
    raw: Option<&str>,
    field: &str,
) -> Result<Option<T>, String> {
    match raw {
        Some(value) if !value.trim().is_empty() => value
            .parse::<T>()
            .map(Some)
            .map_err(|e| format!("无效的 {field} 参数: {e}")),
        _ => Ok(None),
    }
}

/// 列表缓存键携带全部过滤条件，任一条件不同就是不同的缓存行
fn list_cache_key(query: &QuestionListQuery) -> String {
    format!(
        "questions:teacher:{}:list:{}:{}:{}:{}:{}:{}",
        query.teacher_id,
        query.page,
        query.size,
        query
            .topic
            .as_ref()
            .map(|t| t.to_string())
            .unwrap_or_default(),
        query
            .difficulty
            .as_ref()
            .map(|d| d.to_string())
            .unwrap_or_default(),
        query
            .question_type
            .as_ref()
            .map(|t| t.to_string())
            .unwrap_or_default(),
        query.search.as_deref().unwrap_or_default(),
    )
}
