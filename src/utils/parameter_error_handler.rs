use crate::models::{ApiResponse, ErrorCode};
use actix_web::{
    HttpRequest, HttpResponse,
    error::{Error, InternalError, JsonPayloadError, QueryPayloadError},
};

// JSON 请求体解析失败时返回统一响应格式
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> Error {
    let message = match &err {
        JsonPayloadError::ContentType => "请求 Content-Type 必须为 application/json".to_string(),
        JsonPayloadError::Deserialize(e) => format!("JSON 参数错误: {e}"),
        other => format!("JSON 请求体解析失败: {other}"),
    };

    let response =
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, message));
    InternalError::from_response(err, response).into()
}

// 查询字符串解析失败时返回统一响应格式
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> Error {
    let message = match &err {
        QueryPayloadError::Deserialize(e) => format!("查询参数错误: {e}"),
        other => format!("查询参数解析失败: {other}"),
    };

    let response =
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, message));
    InternalError::from_response(err, response).into()
}
