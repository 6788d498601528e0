use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::rooms::requests::{
    AddQuestionsRequest, CreateRoomRequest, RoomQueryParams, UpdateRoomRequest,
    UpdateRoomStatusRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::RoomService;
use crate::utils::{SafeIDI64, SafeRoomCode};

// 懒加载的全局 RoomService 实例
static ROOM_SERVICE: Lazy<RoomService> = Lazy::new(RoomService::new_lazy);

pub async fn create_room(
    req: HttpRequest,
    room_data: web::Json<CreateRoomRequest>,
) -> ActixResult<HttpResponse> {
    ROOM_SERVICE.create_room(&req, room_data.into_inner()).await
}

pub async fn list_rooms(
    req: HttpRequest,
    query: web::Query<RoomQueryParams>,
) -> ActixResult<HttpResponse> {
    ROOM_SERVICE.list_rooms(&req, query.into_inner()).await
}

pub async fn get_room(req: HttpRequest, room_id: SafeIDI64) -> ActixResult<HttpResponse> {
    ROOM_SERVICE.get_room(&req, room_id.0).await
}

pub async fn resolve_room_by_code(
    req: HttpRequest,
    room_code: SafeRoomCode,
) -> ActixResult<HttpResponse> {
    ROOM_SERVICE.resolve_room_by_code(&req, room_code.0).await
}

pub async fn update_room(
    req: HttpRequest,
    room_id: SafeIDI64,
    update_data: web::Json<UpdateRoomRequest>,
) -> ActixResult<HttpResponse> {
    ROOM_SERVICE
        .update_room(&req, room_id.0, update_data.into_inner())
        .await
}

pub async fn update_room_status(
    req: HttpRequest,
    room_id: SafeIDI64,
    status_data: web::Json<UpdateRoomStatusRequest>,
) -> ActixResult<HttpResponse> {
    ROOM_SERVICE
        .update_room_status(&req, room_id.0, status_data.into_inner())
        .await
}

pub async fn add_questions_to_room(
    req: HttpRequest,
    room_id: SafeIDI64,
    questions_data: web::Json<AddQuestionsRequest>,
) -> ActixResult<HttpResponse> {
    ROOM_SERVICE
        .add_questions_to_room(&req, room_id.0, questions_data.into_inner())
        .await
}

pub async fn delete_room(req: HttpRequest, room_id: SafeIDI64) -> ActixResult<HttpResponse> {
    ROOM_SERVICE.delete_room(&req, room_id.0).await
}

// 配置路由，join 入口对学生公开，其余仅教师与管理员可用
pub fn configure_room_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/rooms")
            .route("/join/{room_code}", web::get().to(resolve_room_by_code))
            .service(
                web::scope("")
                    .wrap(middlewares::RequireJWT)
                    .service(
                        web::scope("")
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
                            .route("", web::get().to(list_rooms))
                            .route("", web::post().to(create_room))
                            .route("/{id}", web::get().to(get_room))
                            .route("/{id}", web::put().to(update_room))
                            .route("/{id}", web::delete().to(delete_room))
                            .route("/{id}/status", web::patch().to(update_room_status))
                            .route("/{id}/questions", web::post().to(add_questions_to_room)),
                    ),
            ),
    );
}
