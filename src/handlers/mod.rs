// API处理器模块
// 包含所有HTTP请求处理逻辑

pub mod dashboard_handlers;
pub mod entity_handlers;
pub mod health_handlers;
pub mod request_handlers;
pub mod settings_handlers;
pub mod user_handlers;

// 重新导出处理器
pub use dashboard_handlers::*;
pub use entity_handlers::*;
pub use health_handlers::*;
pub use request_handlers::*;
pub use settings_handlers::*;
pub use user_handlers::*;

use actix_web::HttpResponse;

use crate::models::ApiResponse;

/// 后台调用失败 (502)
pub(crate) fn bad_gateway(message: &str) -> HttpResponse {
    HttpResponse::BadGateway().json(ApiResponse::<()>::error(502, message))
}

/// 请求参数错误 (400)
pub(crate) fn bad_request(message: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::<()>::error(400, message))
}

/// 未知的类别或实体种类 (404)
pub(crate) fn not_found(message: &str) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::<()>::error(404, message))
}
