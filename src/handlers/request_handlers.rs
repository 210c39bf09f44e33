// 付款请求API处理器
// 处理付款请求列表、过滤、分页以及通过/拒绝操作

use actix_web::{web, HttpResponse, Result as ActixResult};
use serde::Deserialize;

use super::{bad_gateway, bad_request, not_found};
use crate::models::{ApiResponse, RequestStatus, RequestType};
use crate::state::AppState;
use crate::utils::validate_record_id;

/// 列表查询参数
#[derive(Debug, Deserialize)]
pub struct RequestListQuery {
    /// pending、accepted、rejected 或 all
    pub status: Option<String>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// 审核操作所在页面
#[derive(Debug, Deserialize)]
pub struct ScreenQuery {
    /// 类别页面，缺省为仪表盘
    #[serde(rename = "type")]
    pub request_type: Option<String>,
}

/// 拒绝请求体
#[derive(Debug, Deserialize, Default)]
pub struct RejectRequestBody {
    #[serde(default)]
    pub reason: Option<String>,
}

/// 解析状态过滤参数，`all` 表示不过滤
fn parse_status_filter(value: &str) -> Result<Option<RequestStatus>, String> {
    if value.eq_ignore_ascii_case("all") {
        return Ok(None);
    }

    RequestStatus::parse(value)
        .map(Some)
        .ok_or_else(|| format!("Invalid status filter: {}", value))
}

/// 解析页面类别，None 为仪表盘
fn parse_screen(value: Option<&str>) -> Result<Option<RequestType>, HttpResponse> {
    match value {
        None => Ok(None),
        Some(name) => RequestType::parse(name)
            .map(Some)
            .ok_or_else(|| not_found(&format!("Unknown request type: {}", name))),
    }
}

/// 应用过滤条件、加载并返回页面视图
async fn load_screen(
    data: &AppState,
    scope: Option<RequestType>,
    query: RequestListQuery,
) -> HttpResponse {
    let status = match query.status.as_deref().map(parse_status_filter) {
        Some(Ok(status)) => Some(status),
        Some(Err(message)) => return bad_request(&message),
        None => None,
    };

    let mut store = data.stores.get(scope).lock().await;

    // 先跳页再改过滤条件: 过滤条件变化时回到第一页
    if let Some(page) = query.page {
        store.set_page(page);
    }
    if let Some(limit) = query.limit {
        store.set_limit(limit.clamp(1, 100));
    }
    if let Some(status) = status {
        store.set_status_filter(status);
    }
    if let Some(search) = query.search.as_deref() {
        store.set_search(search.trim());
    }

    if !store.load(&data.requests, &data.notices).await {
        return bad_gateway("Failed to load payment requests");
    }

    HttpResponse::Ok().json(ApiResponse::success(store.view()))
}

/// 获取全部类别的付款请求
///
/// GET /api/panel/requests?status=&search=&page=
pub async fn list_requests(
    data: web::Data<AppState>,
    query: web::Query<RequestListQuery>,
) -> ActixResult<HttpResponse> {
    Ok(load_screen(&data, None, query.into_inner()).await)
}

/// 获取某一类别的付款请求
///
/// GET /api/panel/requests/{type}?status=&search=&page=
pub async fn list_requests_by_type(
    data: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<RequestListQuery>,
) -> ActixResult<HttpResponse> {
    let scope = match parse_screen(Some(path.as_str())) {
        Ok(scope) => scope,
        Err(response) => return Ok(response),
    };

    Ok(load_screen(&data, scope, query.into_inner()).await)
}

/// 通过付款请求
///
/// POST /api/panel/requests/{id}/accept?type=
pub async fn accept_request(
    data: web::Data<AppState>,
    path: web::Path<String>,
    screen: web::Query<ScreenQuery>,
) -> ActixResult<HttpResponse> {
    let id = path.into_inner();
    if let Err(e) = validate_record_id(&id) {
        return Ok(bad_request(&e.to_string()));
    }

    let scope = match parse_screen(screen.request_type.as_deref()) {
        Ok(scope) => scope,
        Err(response) => return Ok(response),
    };

    let mut store = data.stores.get(scope).lock().await;
    if !store.accept(&data.requests, &data.notices, &id).await {
        return Ok(bad_gateway("Failed to verify request"));
    }

    let updated = store.requests().iter().find(|r| r.id == id).cloned();
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(updated, "Request verified")))
}

/// 拒绝付款请求
///
/// POST /api/panel/requests/{id}/reject?type=
///
/// 请求体: { "reason": "..." } (可选)
pub async fn reject_request(
    data: web::Data<AppState>,
    path: web::Path<String>,
    screen: web::Query<ScreenQuery>,
    body: Option<web::Json<RejectRequestBody>>,
) -> ActixResult<HttpResponse> {
    let id = path.into_inner();
    if let Err(e) = validate_record_id(&id) {
        return Ok(bad_request(&e.to_string()));
    }

    let scope = match parse_screen(screen.request_type.as_deref()) {
        Ok(scope) => scope,
        Err(response) => return Ok(response),
    };

    let reason = body.and_then(|b| b.into_inner().reason);

    let mut store = data.stores.get(scope).lock().await;
    if !store
        .reject(&data.requests, &data.notices, &id, reason.as_deref())
        .await
    {
        return Ok(bad_gateway("Failed to reject request"));
    }

    let updated = store.requests().iter().find(|r| r.id == id).cloned();
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(updated, "Request rejected")))
}
