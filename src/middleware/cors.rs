// CORS中间件配置
// 允许面板前端跨域访问JSON接口

use actix_cors::Cors;
use actix_web::http::header;

/// 本地开发时允许的来源前缀
const LOCAL_ORIGINS: [&str; 4] = [
    "http://localhost",
    "https://localhost",
    "http://127.0.0.1",
    "https://127.0.0.1",
];

/// 判断来源是否为本地开发地址
pub fn is_local_origin(origin: &[u8]) -> bool {
    LOCAL_ORIGINS
        .iter()
        .any(|prefix| origin.starts_with(prefix.as_bytes()))
}

/// 创建CORS中间件
///
/// # Arguments
/// * `allowed_origins` - 允许的来源列表，为空时只允许本地开发地址
///
/// # Returns
/// * 配置好的CORS中间件
pub fn create_cors(allowed_origins: &[String]) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
        .max_age(3600);

    if allowed_origins.is_empty() {
        cors = cors.allowed_origin_fn(|origin, _req_head| is_local_origin(origin.as_bytes()));
    } else {
        for origin in allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    cors
}
