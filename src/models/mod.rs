//! 业务模型定义
//!
//! 按领域拆分为 entities / requests / responses 三类，
//! 所有对外暴露的类型都带 ts-rs 导出，供前端生成类型定义。

pub mod auth;
pub mod common;
pub mod questions;
pub mod responses;
pub mod rooms;
pub mod system;
pub mod users;

pub use common::pagination::{PaginatedResponse, PaginationInfo, PaginationQuery};
pub use common::response::ApiResponse;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 应用级错误码，与 HTTP 状态码独立
///
/// 分段约定：0 成功；1xxx 通用；2xxx 认证；3xxx 用户；
/// 4xxx 题目；5xxx 房间；6xxx 答卷。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1009,
    InternalServerError = 1500,

    // 认证相关
    AuthFailed = 2001,
    RegisterFailed = 2002,
    TokenExpired = 2003,
    InvalidToken = 2004,
    AccountDisabled = 2005,

    // 用户相关
    UserNotFound = 3001,
    UserAlreadyExists = 3002,
    UserPasswordInvalid = 3003,
    UserCreationFailed = 3004,
    CanNotDeleteCurrentUser = 3005,

    // 题目相关
    QuestionNotFound = 4001,
    QuestionInvalid = 4002,
    QuestionPermissionDenied = 4003,
    QuestionBatchInvalid = 4004,

    // 房间相关
    RoomNotFound = 5001,
    RoomNotActive = 5002,
    RoomFull = 5003,
    RoomInvalidStatusTransition = 5004,
    RoomCodeGenerationFailed = 5005,
    RoomPermissionDenied = 5006,

    // 答卷相关
    ResponseNotFound = 6001,
    ResponseAlreadySubmitted = 6002,
    ResponseLocked = 6003,
    ResponseInvalid = 6004,
}

/// 应用启动时间，挂在 app_data 上供健康检查计算运行时长
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
