use super::entities::Question;
use crate::models::common::PaginationInfo;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 题目列表响应，会整页进缓存，所以两个方向都要可序列化
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/question.ts")]
pub struct QuestionListResponse {
    pub items: Vec<Question>,
    pub pagination: PaginationInfo,
}

impl QuestionListResponse {
    pub fn empty(page: i64, page_size: i64) -> Self {
        QuestionListResponse {
            items: vec![],
            pagination: PaginationInfo {
                page,
                page_size,
                total: 0,
                total_pages: 0,
            },
        }
    }
}
