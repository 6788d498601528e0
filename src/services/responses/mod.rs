pub mod create;
pub mod delete;
pub mod get;
pub mod grade;
pub mod list;
pub mod submit;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::responses::requests::{
    CreateResponseRequest, GradeResponseRequest, RoomResponsesQuery, SubmitResponseRequest,
    UpdateResponseRequest,
};
use crate::storage::Storage;

pub struct ResponseService {
    storage: Option<Arc<dyn Storage>>,
}

impl ResponseService {
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

    // 学生加入房间，创建空白答卷
    pub async fn create_response(
        &self,
        request: &HttpRequest,
        response_data: CreateResponseRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_response(self, request, response_data).await
    }

    // 查看答卷
    pub async fn get_response(
        &self,
        request: &HttpRequest,
        response_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_response(self, request, response_id).await
    }

    // 保存作答进度
    pub async fn update_response(
        &self,
        request: &HttpRequest,
        response_id: i64,
        update_data: UpdateResponseRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_response(self, request, response_id, update_data).await
    }

    // 交卷并自动判分
    pub async fn submit_response(
        &self,
        request: &HttpRequest,
        response_id: i64,
        submit_data: SubmitResponseRequest,
    ) -> ActixResult<HttpResponse> {
        submit::submit_response(self, request, response_id, submit_data).await
    }

    // 教师人工批改
    pub async fn grade_response(
        &self,
        request: &HttpRequest,
        response_id: i64,
        grade_data: GradeResponseRequest,
    ) -> ActixResult<HttpResponse> {
        grade::grade_response(self, request, response_id, grade_data).await
    }

    // 教师查看房间答卷列表
    pub async fn list_room_responses(
        &self,
        request: &HttpRequest,
        room_id: i64,
        query: RoomResponsesQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_room_responses(self, request, room_id, query).await
    }

    // 教师删除答卷
    pub async fn delete_response(
        &self,
        request: &HttpRequest,
        response_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_response(self, request, response_id).await
    }
}
