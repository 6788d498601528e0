use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ResponseService;
use crate::models::responses::entities::ResponseStatus;
use crate::models::responses::requests::UpdateResponseRequest;
use crate::models::{ApiResponse, ErrorCode};

/// 保存作答进度，只有未交卷的答卷可以更新
pub async fn update_response(
    service: &ResponseService,
    request: &HttpRequest,
    response_id: i64,
    update_data: UpdateResponseRequest,
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

    if response.status != ResponseStatus::InProgress {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::ResponseLocked,
            "Cannot update submitted response",
        )));
    }

    match storage
        .update_response_progress(response_id, update_data)
        .await
    {
        Ok(Some(updated)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            updated,
            "Response updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ResponseNotFound,
            "Response not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to update response: {e}"),
            )),
        ),
    }
}
