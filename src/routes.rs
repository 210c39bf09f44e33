// API路由配置
// 定义所有HTTP接口的路由规则

use actix_web::{web, Scope};

use crate::handlers::*;

/// 面板路由配置
pub fn panel_routes() -> Scope {
    web::scope("/api/panel")
        // 仪表盘和侧边栏
        .route("/dashboard", web::get().to(dashboard))
        .route("/sidebar", web::get().to(sidebar_counts))
        .route("/notifications", web::get().to(notifications))
        .route("/version", web::get().to(version_info))
        // 付款请求路由
        .service(request_routes())
        // 平台实体路由
        .service(entity_routes())
        // 用户路由
        .service(user_routes())
        // 收款设置路由
        .route("/payment-settings", web::get().to(get_payment_settings))
        .route("/payment-settings", web::put().to(save_payment_settings))
}

/// 付款请求路由
fn request_routes() -> Scope {
    web::scope("/requests")
        .route("", web::get().to(list_requests))
        .route("/{type}", web::get().to(list_requests_by_type))
        .route("/{id}/accept", web::post().to(accept_request))
        .route("/{id}/reject", web::post().to(reject_request))
}

/// 平台实体路由
fn entity_routes() -> Scope {
    web::scope("/entities")
        .route("/{kind}", web::get().to(list_entities))
        .route("/{kind}/{id}/freeze", web::put().to(freeze_entity))
        .route("/{kind}/{id}/unfreeze", web::put().to(unfreeze_entity))
        .route("/{kind}/{id}", web::delete().to(delete_entity))
}

/// 用户路由
fn user_routes() -> Scope {
    web::scope("/users")
        .route("", web::get().to(list_users))
        .route("/{id}/freeze", web::put().to(freeze_user))
        .route("/{id}/unfreeze", web::put().to(unfreeze_user))
        .route("/{id}", web::delete().to(delete_user))
}

/// 公共路由
pub fn public_routes() -> Scope {
    web::scope("").route("/health", web::get().to(health_check))
}
