use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use super::SystemService;
use crate::models::system::responses::HealthResponse;
use crate::models::{ApiResponse, AppStartTime};

/// 健康检查，无需认证，供负载均衡与容器探针轮询
pub async fn health(service: &SystemService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let config = service.get_config();
    let now = chrono::Utc::now();

    // 启动时间挂在 app_data 上，拿不到按刚启动处理
    let uptime_seconds = request
        .app_data::<web::Data<AppStartTime>>()
        .map(|start| now.signed_duration_since(start.start_datetime).num_seconds())
        .unwrap_or(0);

    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: config.app.environment.clone(),
        uptime_seconds,
        timestamp: now,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Service is healthy")))
}
