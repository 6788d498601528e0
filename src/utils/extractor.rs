use crate::config::AppConfig;
use crate::models::{ApiResponse, ErrorCode};
use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError};
use std::future::{Ready, ready};

// 从路径安全提取 i64 参数的提取器宏
//
// 解析失败或取值不为正数时直接返回 400 响应，
// 处理函数拿到的永远是合法 id。
#[macro_export]
macro_rules! define_safe_i64_extractor {
    ($name:ident, $param:literal) => {
        pub struct $name(pub i64);

        impl actix_web::FromRequest for $name {
            type Error = actix_web::Error;
            type Future = std::future::Ready<Result<Self, Self::Error>>;

            fn from_request(
                req: &actix_web::HttpRequest,
                _payload: &mut actix_web::dev::Payload,
            ) -> Self::Future {
                let raw = req.match_info().get($param).unwrap_or_default();
                match raw.parse::<i64>() {
                    Ok(value) if value > 0 => std::future::ready(Ok($name(value))),
                    _ => {
                        let message = format!("无效的 {} 参数: '{}'", $param, raw);
                        let response = actix_web::HttpResponse::BadRequest().json(
                            $crate::models::ApiResponse::error_empty(
                                $crate::models::ErrorCode::BadRequest,
                                message.clone(),
                            ),
                        );
                        std::future::ready(Err(actix_web::error::InternalError::from_response(
                            message, response,
                        )
                        .into()))
                    }
                }
            }
        }
    };
}

define_safe_i64_extractor!(SafeIDI64, "id");
define_safe_i64_extractor!(SafeRoomIdI64, "room_id");

// 从路径提取房间码
//
// 学生手输的码先归一化为大写再校验，长度随配置走。
pub struct SafeRoomCode(pub String);

impl FromRequest for SafeRoomCode {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let raw = req.match_info().get("room_code").unwrap_or_default();
        let normalized = raw.trim().to_ascii_uppercase();

        let expected_length = AppConfig::get().room.code_length;
        match crate::utils::validate::validate_room_code(&normalized, expected_length) {
            Ok(()) => ready(Ok(SafeRoomCode(normalized))),
            Err(reason) => {
                let message = format!("无效的房间码 '{raw}': {reason}");
                let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::BadRequest,
                    message.clone(),
                ));
                ready(Err(InternalError::from_response(message, response).into()))
            }
        }
    }
}
