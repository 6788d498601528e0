use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::responses::requests::{
    CreateResponseRequest, GradeResponseRequest, RoomResponsesQuery, SubmitResponseRequest,
    UpdateResponseRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::ResponseService;
use crate::utils::{SafeIDI64, SafeRoomIdI64};

// 懒加载的全局 ResponseService 实例
static RESPONSE_SERVICE: Lazy<ResponseService> = Lazy::new(ResponseService::new_lazy);

pub async fn create_response(
    req: HttpRequest,
    response_data: web::Json<CreateResponseRequest>,
) -> ActixResult<HttpResponse> {
    RESPONSE_SERVICE
        .create_response(&req, response_data.into_inner())
        .await
}

pub async fn get_response(req: HttpRequest, response_id: SafeIDI64) -> ActixResult<HttpResponse> {
    RESPONSE_SERVICE.get_response(&req, response_id.0).await
}

pub async fn update_response(
    req: HttpRequest,
    response_id: SafeIDI64,
    update_data: web::Json<UpdateResponseRequest>,
) -> ActixResult<HttpResponse> {
    RESPONSE_SERVICE
        .update_response(&req, response_id.0, update_data.into_inner())
        .await
}

pub async fn submit_response(
    req: HttpRequest,
    response_id: SafeIDI64,
    submit_data: web::Json<SubmitResponseRequest>,
) -> ActixResult<HttpResponse> {
    RESPONSE_SERVICE
        .submit_response(&req, response_id.0, submit_data.into_inner())
        .await
}

pub async fn grade_response(
    req: HttpRequest,
    response_id: SafeIDI64,
    grade_data: web::Json<GradeResponseRequest>,
) -> ActixResult<HttpResponse> {
    RESPONSE_SERVICE
        .grade_response(&req, response_id.0, grade_data.into_inner())
        .await
}

pub async fn list_room_responses(
    req: HttpRequest,
    room_id: SafeRoomIdI64,
    query: web::Query<RoomResponsesQuery>,
) -> ActixResult<HttpResponse> {
    RESPONSE_SERVICE
        .list_room_responses(&req, room_id.0, query.into_inner())
        .await
}

pub async fn delete_response(
    req: HttpRequest,
    response_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    RESPONSE_SERVICE.delete_response(&req, response_id.0).await
}

// 配置路由，学生作答入口匿名开放，批改与管理入口仅教师与管理员可用
pub fn configure_response_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/responses")
            .route("", web::post().to(create_response))
            .route("/{id}", web::get().to(get_response))
            .route("/{id}", web::put().to(update_response))
            .route("/{id}/submit", web::post().to(submit_response))
            .service(
                web::scope("")
                    .wrap(middlewares::RequireJWT)
                    .service(
                        web::scope("")
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
                            .route("/room/{room_id}", web::get().to(list_room_responses))
                            .route("/{id}/grade", web::put().to(grade_response))
                            .route("/{id}", web::delete().to(delete_response)),
                    ),
            ),
    );
}
