pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod topic;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::models::questions::requests::{
    CreateQuestionRequest, QuestionQueryParams, UpdateQuestionRequest,
};
use crate::storage::Storage;

/// 单题缓存 TTL（秒）
pub(crate) const QUESTION_CACHE_TTL: u64 = 600;
/// 题目列表缓存 TTL（秒）
pub(crate) const QUESTION_LIST_CACHE_TTL: u64 = 300;
/// 主题列表缓存 TTL（秒）
pub(crate) const QUESTION_TOPIC_CACHE_TTL: u64 = 600;

pub struct QuestionService {
    storage: Option<Arc<dyn Storage>>,
}

impl QuestionService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub(crate) fn get_cache(&self, request: &HttpRequest) -> Arc<dyn ObjectCache> {
        request
            .app_data::<actix_web::web::Data<Arc<dyn ObjectCache>>>()
            .expect("Cache not found in app data")
            .get_ref()
            .clone()
    }

    // 创建题目
    pub async fn create_question(
        &self,
        request: &HttpRequest,
        question_data: CreateQuestionRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_question(self, request, question_data).await
    }

    // 获取题目列表
    pub async fn list_questions(
        &self,
        request: &HttpRequest,
        query: QuestionQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_questions(self, request, query).await
    }

    // 按主题获取题目
    pub async fn list_questions_by_topic(
        &self,
        request: &HttpRequest,
        topic: String,
    ) -> ActixResult<HttpResponse> {
        topic::list_questions_by_topic(self, request, topic).await
    }

    // 根据题目 ID 获取题目
    pub async fn get_question(
        &self,
        request: &HttpRequest,
        question_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_question(self, request, question_id).await
    }

    // 更新题目
    pub async fn update_question(
        &self,
        request: &HttpRequest,
        question_id: i64,
        update_data: UpdateQuestionRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_question(self, request, question_id, update_data).await
    }

    // 删除题目
    pub async fn delete_question(
        &self,
        request: &HttpRequest,
        question_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_question(self, request, question_id).await
    }
}

/// 题目变更后的缓存失效，单题键与教师名下所有列表键一并清掉
pub(crate) async fn invalidate_question_caches(
    cache: &Arc<dyn ObjectCache>,
    teacher_id: i64,
    question_id: Option<i64>,
) {
    if let Some(id) = question_id {
        cache.remove(&format!("question:{id}")).await;
    }
    cache
        .remove_by_pattern(&format!("questions:teacher:{teacher_id}:*"))
        .await;
}
