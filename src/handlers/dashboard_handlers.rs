// 仪表盘API处理器
// 侧边栏数量、最近的待审核请求以及操作提示

use actix_web::{web, HttpResponse, Result as ActixResult};
use serde::Serialize;

use super::bad_gateway;
use crate::models::{ApiResponse, PaymentRequest, SidebarCounts};
use crate::services::{Notice, RECENT_PENDING_LIMIT};
use crate::state::AppState;

/// 仪表盘响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse<'a> {
    pub sidebar: SidebarCounts,
    pub recent_requests: Vec<&'a PaymentRequest>,
}

/// 仪表盘数据
///
/// GET /api/panel/dashboard
pub async fn dashboard(data: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let sidebar = data.stats.counts().await;

    let mut store = data.stores.dashboard().lock().await;
    if !store.load(&data.requests, &data.notices).await {
        return Ok(bad_gateway("Failed to load payment requests"));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(DashboardResponse {
        sidebar,
        recent_requests: store.recent_pending(RECENT_PENDING_LIMIT),
    })))
}

/// 侧边栏数量 (最近一次轮询结果)
///
/// GET /api/panel/sidebar
pub async fn sidebar_counts(data: web::Data<AppState>) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(data.stats.counts().await)))
}

/// 取出待显示的操作提示
///
/// GET /api/panel/notifications
pub async fn notifications(data: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let notices: Vec<Notice> = data.notices.drain();
    Ok(HttpResponse::Ok().json(ApiResponse::success(notices)))
}
