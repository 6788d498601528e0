use super::entities::{RoomSettings, RoomStatus};
use crate::models::common::PaginationQuery;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 创建房间请求，房间码由服务端生成
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/room.ts")]
pub struct CreateRoomRequest {
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub question_ids: Vec<i64>,
    #[serde(default)]
    pub settings: RoomSettings,
}

// 更新房间请求，未提供的字段保持不变
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/room.ts")]
pub struct UpdateRoomRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub question_ids: Option<Vec<i64>>,
    pub settings: Option<RoomSettings>,
}

// 房间状态流转请求
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/room.ts")]
pub struct UpdateRoomStatusRequest {
    pub status: RoomStatus,
}

// 向房间追加题目请求，重复的题目 id 会被忽略
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/room.ts")]
pub struct AddQuestionsRequest {
    pub question_ids: Vec<i64>,
}

// 房间列表查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/room.ts")]
pub struct RoomQueryParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub status: Option<String>,
}

// 存储层查询条件
#[derive(Debug, Clone)]
pub struct RoomListQuery {
    pub teacher_id: i64,
    pub page: i64,
    pub size: i64,
    pub status: Option<RoomStatus>,
}
