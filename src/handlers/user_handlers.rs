// 用户管理API处理器
// 用户列表在后台分页和搜索，冻结/解冻/删除与其他实体相同

use actix_web::{web, HttpResponse, Result as ActixResult};
use serde::Deserialize;

use super::bad_gateway;
use super::entity_handlers::run_command;
use crate::models::{ApiResponse, EntityCommand, EntityKind};
use crate::state::AppState;

/// 用户列表查询参数
#[derive(Debug, Deserialize)]
pub struct UserListQuery {
    pub search: Option<String>,
    pub page: Option<u32>,
}

/// 获取用户列表
///
/// GET /api/panel/users?search=&page=
pub async fn list_users(
    data: web::Data<AppState>,
    query: web::Query<UserListQuery>,
) -> ActixResult<HttpResponse> {
    let page = query.page.unwrap_or(1);
    let limit = data.config.panel.page_limit;

    match data.entities.list_users(query.search.as_deref(), page, limit).await {
        Ok(users) => Ok(HttpResponse::Ok().json(ApiResponse::success(users))),
        Err(_) => Ok(bad_gateway("Failed to load users")),
    }
}

/// 冻结用户
///
/// PUT /api/panel/users/{id}/freeze
pub async fn freeze_user(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    Ok(run_command(&data, EntityKind::User, &path, EntityCommand::Freeze).await)
}

/// 解冻用户
///
/// PUT /api/panel/users/{id}/unfreeze
pub async fn unfreeze_user(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    Ok(run_command(&data, EntityKind::User, &path, EntityCommand::Unfreeze).await)
}

/// 删除用户
///
/// DELETE /api/panel/users/{id}
pub async fn delete_user(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    Ok(run_command(&data, EntityKind::User, &path, EntityCommand::Delete).await)
}
