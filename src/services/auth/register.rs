use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::auth::requests::RegisterRequest;
use crate::models::users::entities::{UserProfile, UserRole};
use crate::models::users::requests::CreateUserRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password_simple, validate_username};

use super::AuthService;

pub async fn handle_register(
    service: &AuthService,
    register_request: RegisterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 1. 检查用户名是否已存在
    if let Err(response) = check_username_exists(&storage, &register_request.username).await {
        return Ok(response);
    }

    // 2. 检查邮箱是否已存在
    if let Err(response) = check_email_exists(&storage, &register_request.email).await {
        return Ok(response);
    }

    // 验证用户名合法性
    if let Err(msg) = validate_username(&register_request.username) {
        return Ok(
            HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, msg))
        );
    }

    // 验证邮箱
    if let Err(msg) = validate_email(&register_request.email) {
        return Ok(
            HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, msg))
        );
    }

    // 验证密码策略
    if let Err(msg) = validate_password_simple(&register_request.password) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserPasswordInvalid, msg)));
    }

    // 3. 哈希密码
    match hash_password(&register_request.password) {
        Ok(password_hash) => {
            // 注册入口只开放教师账号，管理员由启动播种或后台创建
            let create_request = CreateUserRequest {
                username: register_request.username,
                email: register_request.email,
                password: password_hash,
                role: UserRole::Teacher,
                profile: UserProfile {
                    profile_name: register_request.profile_name,
                    avatar_url: None,
                    school: register_request.school,
                    department: register_request.department,
                },
            };

            // 4. 创建用户
            match storage.create_user(create_request).await {
                Ok(user) => {
                    Ok(HttpResponse::Created().json(ApiResponse::success(user, "注册成功")))
                }
                Err(e) => Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::RegisterFailed,
                        format!("注册失败: {e}"),
                    )),
                ),
            }
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::RegisterFailed,
                format!("密码哈希失败: {e}"),
            )),
        ),
    }
}

async fn check_username_exists(
    storage: &std::sync::Arc<dyn crate::storage::Storage>,
    username: &str,
) -> Result<(), HttpResponse> {
    match storage.get_user_by_username(username).await {
        Ok(Some(_)) => Err(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::UserAlreadyExists,
            "Username already exists",
        ))),
        Ok(None) => Ok(()),
        Err(e) => Err(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::RegisterFailed,
                format!("Register failed: {e}"),
            )),
        ),
    }
}

async fn check_email_exists(
    storage: &std::sync::Arc<dyn crate::storage::Storage>,
    email: &str,
) -> Result<(), HttpResponse> {
    match storage.get_user_by_email(email).await {
        Ok(Some(_)) => Err(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::UserAlreadyExists,
            "Email already exists",
        ))),
        Ok(None) => Ok(()),
        Err(e) => Err(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::RegisterFailed,
                format!("Register failed: {e}"),
            )),
        ),
    }
}
