use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::auth::requests::{ChangePasswordRequest, UpdateProfileRequest};
use crate::models::users::responses::UserResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::password::{hash_password, verify_password};
use crate::utils::validate::{validate_email, validate_password_simple};

use super::AuthService;

pub async fn handle_update_profile(
    service: &AuthService,
    update_data: UpdateProfileRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 获取当前用户信息
    let current_user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    // 验证邮箱唯一性（如果提供了新邮箱）
    if let Some(ref email) = update_data.email {
        if let Err(msg) = validate_email(email) {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
        }

        // 检查邮箱是否已被其他用户使用
        if let Ok(Some(existing_user)) = storage.get_user_by_email(email).await
            && existing_user.id != current_user.id
        {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::UserAlreadyExists,
                "该邮箱已被使用",
            )));
        }
    }

    match storage
        .update_user_profile(current_user.id, update_data)
        .await
    {
        Ok(Some(user)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UserResponse { user },
            "用户信息更新成功",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "用户不存在",
        ))),
        Err(e) => Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            format!("更新用户信息失败: {e}"),
        ))),
    }
}

pub async fn handle_change_password(
    service: &AuthService,
    change_data: ChangePasswordRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let current_user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    // 中间件注入的用户可能来自缓存，密码哈希被序列化策略剥掉了，必须回表取
    let user = match storage.get_user_by_id(current_user.id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::UserNotFound,
                "用户不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("获取用户信息失败: {e}"),
                )),
            );
        }
    };

    // 校验当前密码
    if !verify_password(&change_data.current_password, &user.password_hash) {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::AuthFailed,
            "当前密码不正确",
        )));
    }

    // 校验新密码策略
    if let Err(msg) = validate_password_simple(&change_data.new_password) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserPasswordInvalid, msg)));
    }

    let password_hash = match hash_password(&change_data.new_password) {
        Ok(hash) => hash,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("密码哈希失败: {e}"),
                )),
            );
        }
    };

    match storage.update_user_password(user.id, password_hash).await {
        Ok(true) => {
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("密码修改成功")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "用户不存在",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("密码修改失败: {e}"),
            )),
        ),
    }
}
