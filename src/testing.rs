// 测试辅助工具
// 在随机端口上启动进程内的模拟后台，供客户端和服务层测试使用

use actix_web::{web, App, HttpServer};

/// 启动模拟后台并返回其基础地址
///
/// # Arguments
/// * `configure` - 路由配置函数
///
/// # Returns
/// * 形如 http://127.0.0.1:PORT 的地址
pub async fn spawn_backend<F>(configure: F) -> String
where
    F: Fn(&mut web::ServiceConfig) + Send + Clone + 'static,
{
    let server = HttpServer::new(move || App::new().configure(configure.clone()))
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("Failed to bind mock backend");

    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());

    format!("http://{}", addr)
}
