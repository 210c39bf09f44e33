// 请求日志中间件
// 记录面板请求的方法、路径、状态码和耗时

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error,
};
use futures_util::future::{ok, LocalBoxFuture, Ready};
use std::rc::Rc;
use std::time::Instant;

/// 请求日志中间件
///
/// 静默路径 (如健康检查) 只在debug级别记录成功请求
#[derive(Debug, Clone, Default)]
pub struct RequestLogging {
    quiet_paths: Rc<Vec<String>>,
}

impl RequestLogging {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加静默路径
    pub fn quiet_path(mut self, path: &str) -> Self {
        Rc::make_mut(&mut self.quiet_paths).push(path.to_string());
        self
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequestLogging
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = RequestLoggingMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(RequestLoggingMiddleware {
            service,
            quiet_paths: self.quiet_paths.clone(),
        })
    }
}

pub struct RequestLoggingMiddleware<S> {
    service: S,
    quiet_paths: Rc<Vec<String>>,
}

impl<S, B> Service<ServiceRequest> for RequestLoggingMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start_time = Instant::now();
        let method = req.method().to_string();
        let path = match req.query_string() {
            "" => req.path().to_string(),
            query => format!("{}?{}", req.path(), query),
        };
        let quiet = self.quiet_paths.iter().any(|p| p == req.path());

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;
            let elapsed = start_time.elapsed().as_millis();

            match &result {
                Ok(response) => {
                    let status = response.status().as_u16();
                    if status >= 400 {
                        log::warn!("{} {} {} ({}ms)", method, path, status, elapsed);
                    } else if quiet {
                        log::debug!("{} {} {} ({}ms)", method, path, status, elapsed);
                    } else {
                        log::info!("{} {} {} ({}ms)", method, path, status, elapsed);
                    }
                }
                Err(e) => {
                    log::error!("{} {} failed after {}ms: {}", method, path, elapsed, e);
                }
            }

            result
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App, HttpResponse};

    #[actix_web::test]
    async fn test_logging_passes_responses_through() {
        let app = test::init_service(
            App::new()
                .wrap(RequestLogging::new().quiet_path("/health"))
                .route("/health", web::get().to(|| async { HttpResponse::Ok().body("ok") }))
                .route("/missing", web::get().to(|| async { HttpResponse::NotFound().finish() })),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let req = test::TestRequest::get().uri("/missing?page=2").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);
    }

    #[::core::prelude::v1::test]
    fn test_quiet_paths() {
        let logging = RequestLogging::new().quiet_path("/health").quiet_path("/api/panel/sidebar");
        assert_eq!(logging.quiet_paths.len(), 2);
    }
}
