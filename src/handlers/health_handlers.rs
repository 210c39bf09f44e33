// 健康检查和系统状态API处理器
// 提供服务状态、版本信息以及后台连通性查询接口

use actix_web::{web, HttpResponse, Result as ActixResult};
use serde::Serialize;

use crate::models::ApiResponse;
use crate::state::AppState;

/// 系统健康检查响应
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// 服务状态
    pub status: String,
    /// 版本信息
    pub version: String,
    /// 后台地址
    pub backend_url: String,
    /// 后台连接状态
    pub backend: String,
    /// 统计轮询是否在运行
    pub stats_polling: bool,
    /// 当前时间戳
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// 基础健康检查
///
/// GET /health
///
/// 后台不可达时状态为 degraded，面板本身仍可用
pub async fn health_check(data: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let mut health = HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        backend_url: data.api.base_url().to_string(),
        backend: "connected".to_string(),
        stats_polling: data.stats.is_running(),
        timestamp: chrono::Utc::now(),
    };

    // 检查后台连接，顺带刷新侧边栏数量
    if let Err(e) = data.stats.refresh().await {
        log::error!("Backend health check failed: {}", e);
        health.backend = "disconnected".to_string();
        health.status = "degraded".to_string();
    }

    Ok(HttpResponse::Ok().json(health))
}

/// 系统版本信息
///
/// GET /api/panel/version
pub async fn version_info() -> ActixResult<HttpResponse> {
    let version_info = serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    });

    Ok(HttpResponse::Ok().json(ApiResponse::success(version_info)))
}
