use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::questions::requests::{
    CreateQuestionRequest, QuestionQueryParams, UpdateQuestionRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::QuestionService;
use crate::utils::SafeIDI64;

// 懒加载的全局 QuestionService 实例
static QUESTION_SERVICE: Lazy<QuestionService> = Lazy::new(QuestionService::new_lazy);

pub async fn create_question(
    req: HttpRequest,
    question_data: web::Json<CreateQuestionRequest>,
) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE
        .create_question(&req, question_data.into_inner())
        .await
}

pub async fn list_questions(
    req: HttpRequest,
    query: web::Query<QuestionQueryParams>,
) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE
        .list_questions(&req, query.into_inner())
        .await
}

pub async fn list_questions_by_topic(
    req: HttpRequest,
    topic: web::Path<String>,
) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE
        .list_questions_by_topic(&req, topic.into_inner())
        .await
}

pub async fn get_question(req: HttpRequest, question_id: SafeIDI64) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE.get_question(&req, question_id.0).await
}

pub async fn update_question(
    req: HttpRequest,
    question_id: SafeIDI64,
    update_data: web::Json<UpdateQuestionRequest>,
) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE
        .update_question(&req, question_id.0, update_data.into_inner())
        .await
}

pub async fn delete_question(
    req: HttpRequest,
    question_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE.delete_question(&req, question_id.0).await
}

// 配置路由，题库只对教师与管理员开放
pub fn configure_question_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/questions")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
                    .route("", web::get().to(list_questions))
                    .route("", web::post().to(create_question))
                    .route("/topic/{topic}", web::get().to(list_questions_by_topic))
                    .route("/{id}", web::get().to(get_question))
                    .route("/{id}", web::put().to(update_question))
                    .route("/{id}", web::delete().to(delete_question)),
            ),
    );
}
