pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod questions;
pub mod resolve;
pub mod status;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::config::AppConfig;
use crate::models::rooms::requests::{
    AddQuestionsRequest, CreateRoomRequest, RoomQueryParams, UpdateRoomRequest,
    UpdateRoomStatusRequest,
};
use crate::storage::Storage;

/// 创建房间时的房间码缓存 TTL（秒），覆盖房间整个生命周期
pub(crate) const ROOM_CACHE_TTL_CREATE: u64 = 86400;
/// 学生解析房间码时回填的缓存 TTL（秒）
pub(crate) const ROOM_CACHE_TTL_RESOLVE: u64 = 3600;
/// 房间列表缓存 TTL（秒）
pub(crate) const ROOM_LIST_CACHE_TTL: u64 = 300;

pub struct RoomService {
    storage: Option<Arc<dyn Storage>>,
}

impl RoomService {
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

    pub(crate) fn get_config(&self) -> &AppConfig {
        AppConfig::get()
    }

    // 创建房间
    pub async fn create_room(
        &self,
        request: &HttpRequest,
        room_data: CreateRoomRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_room(self, request, room_data).await
    }

    // 获取房间列表
    pub async fn list_rooms(
        &self,
        request: &HttpRequest,
        query: RoomQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_rooms(self, request, query).await
    }

    // 教师端房间详情
    pub async fn get_room(&self, request: &HttpRequest, room_id: i64) -> ActixResult<HttpResponse> {
        get::get_room(self, request, room_id).await
    }

    // 学生按房间码解析房间（公开视图）
    pub async fn resolve_room_by_code(
        &self,
        request: &HttpRequest,
        room_code: String,
    ) -> ActixResult<HttpResponse> {
        resolve::resolve_room_by_code(self, request, room_code).await
    }

    // 更新房间
    pub async fn update_room(
        &self,
        request: &HttpRequest,
        room_id: i64,
        update_data: UpdateRoomRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_room(self, request, room_id, update_data).await
    }

    // 流转房间状态
    pub async fn update_room_status(
        &self,
        request: &HttpRequest,
        room_id: i64,
        status_data: UpdateRoomStatusRequest,
    ) -> ActixResult<HttpResponse> {
        status::update_room_status(self, request, room_id, status_data).await
    }

    // 向房间追加题目
    pub async fn add_questions_to_room(
        &self,
        request: &HttpRequest,
        room_id: i64,
        questions_data: AddQuestionsRequest,
    ) -> ActixResult<HttpResponse> {
        questions::add_questions_to_room(self, request, room_id, questions_data).await
    }

    // 删除房间
    pub async fn delete_room(
        &self,
        request: &HttpRequest,
        room_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_room(self, request, room_id).await
    }
}

/// 房间变更后的缓存失效，房间码键与教师名下的列表键一并清掉
pub(crate) async fn invalidate_room_caches(
    cache: &Arc<dyn ObjectCache>,
    teacher_id: i64,
    room_code: &str,
) {
    cache.remove(&format!("room:{room_code}")).await;
    cache
        .remove_by_pattern(&format!("rooms:teacher:{teacher_id}:*"))
        .await;
}
