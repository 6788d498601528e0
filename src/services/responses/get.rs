use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ResponseService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_response(
    service: &ResponseService,
    request: &HttpRequest,
    response_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_response_by_id(response_id).await {
        Ok(Some(response)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Response retrieved successfully",
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
