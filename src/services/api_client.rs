// 后台REST接口客户端
// 负责所有对市场后台的HTTP调用，统一处理URL拼接、状态码检查和JSON解析

use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT},
    multipart::Form,
    Client, Method, RequestBuilder, Response,
};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use thiserror::Error;

/// 后台调用错误
///
/// 显示格式与前端保持一致: `GET {url} failed: {status}`
#[derive(Debug, Error)]
pub enum ApiError {
    /// 后台返回非2xx状态码
    #[error("{method} {url} failed: {status}{}", .message.as_deref().map(|m| format!(" ({})", m)).unwrap_or_default())]
    Status {
        method: Method,
        url: String,
        status: u16,
        /// 响应体中的 `error` 字段 (尽力解析)
        message: Option<String>,
    },
    /// 网络层错误 (连接失败、超时等)
    #[error("{method} {url} failed: {source}")]
    Transport {
        method: Method,
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// 响应体无法解析
    #[error("{method} {url} returned an unreadable body: {source}")]
    Decode {
        method: Method,
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// 后台给出的错误说明
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

/// 后台API客户端
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// 创建新的API客户端
    ///
    /// # Arguments
    /// * `base_url` - 后台基础地址 (如 http://localhost:3000)
    /// * `timeout_secs` - 单次请求超时时间 (秒)
    ///
    /// # Returns
    /// * API客户端实例
    pub fn new(base_url: &str, timeout_secs: u64) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("ControlPanel/", env!("CARGO_PKG_VERSION"))),
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// 后台基础地址 (不含结尾斜杠)
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 将相对路径解析为完整URL，绝对地址原样返回
    pub fn resolve(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// GET请求，值为None的查询参数会被忽略
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, Option<String>)],
    ) -> Result<T, ApiError> {
        let query: Vec<(&str, &str)> = params
            .iter()
            .filter_map(|(key, value)| value.as_deref().map(|v| (*key, v)))
            .collect();

        let url = self.resolve(path);
        let request = self.client.get(&url).query(&query);
        self.execute(Method::GET, url, request).await
    }

    /// PUT请求，可选JSON请求体
    pub async fn put<T, B>(&self, path: &str, body: Option<&B>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.resolve(path);
        let mut request = self.client.put(&url);
        if let Some(body) = body {
            request = request.json(body);
        }
        self.execute(Method::PUT, url, request).await
    }

    /// POST请求，可选JSON请求体
    pub async fn post<T, B>(&self, path: &str, body: Option<&B>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.resolve(path);
        let mut request = self.client.post(&url);
        if let Some(body) = body {
            request = request.json(body);
        }
        self.execute(Method::POST, url, request).await
    }

    /// POST multipart表单 (用于文件上传)
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<T, ApiError> {
        let url = self.resolve(path);
        let request = self.client.post(&url).multipart(form);
        self.execute(Method::POST, url, request).await
    }

    /// DELETE请求
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.resolve(path);
        let request = self.client.delete(&url);
        self.execute(Method::DELETE, url, request).await
    }

    /// 发送请求并解析响应
    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        url: String,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        log::debug!("{} {}", method, url);

        let response = match request.send().await {
            Ok(response) => response,
            Err(source) => return Err(ApiError::Transport { method, url, source }),
        };

        if !response.status().is_success() {
            return Err(Self::error_from_response(method, url, response).await);
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(source) => return Err(ApiError::Transport { method, url, source }),
        };

        // 部分写接口返回空响应体，按JSON null处理
        let body = if body.trim().is_empty() { "null" } else { body.as_str() };

        serde_json::from_str(body).map_err(|source| ApiError::Decode { method, url, source })
    }

    /// 从错误响应中提取状态码和 `error` 字段
    async fn error_from_response(method: Method, url: String, response: Response) -> ApiError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();

        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string));

        if status >= 500 {
            log::warn!("Backend error {} for {} {}: {}", status, method, url, body);
        }

        ApiError::Status {
            method,
            url,
            status,
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::spawn_backend;
    use actix_web::{web, HttpResponse};
    use serde_json::{json, Value};

    #[test]
    fn test_resolve_paths() {
        let client = ApiClient::new("http://backend.local/", 5).unwrap();

        assert_eq!(client.base_url(), "http://backend.local");
        assert_eq!(client.resolve("/api/admin/stats"), "http://backend.local/api/admin/stats");
        assert_eq!(client.resolve("api/admin/stats"), "http://backend.local/api/admin/stats");
        assert_eq!(client.resolve("https://cdn.example.com/x.png"), "https://cdn.example.com/x.png");
    }

    #[actix_web::test]
    async fn test_get_skips_empty_params() {
        let base = spawn_backend(|cfg| {
            cfg.route(
                "/echo",
                web::get().to(|req: actix_web::HttpRequest| async move {
                    HttpResponse::Ok().json(json!({ "query": req.query_string() }))
                }),
            );
        })
        .await;
        let client = ApiClient::new(&base, 5).unwrap();

        let value: Value = client
            .get("/echo", &[("page", Some("2".to_string())), ("status", None)])
            .await
            .unwrap();

        assert_eq!(value["query"], "page=2");
    }

    #[actix_web::test]
    async fn test_error_status_carries_backend_message() {
        let base = spawn_backend(|cfg| {
            cfg.route(
                "/broken",
                web::delete().to(|| async {
                    HttpResponse::NotFound().json(json!({ "error": "Shop not found" }))
                }),
            );
        })
        .await;
        let client = ApiClient::new(&base, 5).unwrap();

        let err = client.delete::<Value>("/broken").await.unwrap_err();

        assert!(matches!(err, ApiError::Status { status: 404, .. }));
        assert_eq!(err.backend_message(), Some("Shop not found"));
        assert!(err.to_string().starts_with("DELETE "));
        assert!(err.to_string().contains("failed: 404"));
    }

    #[actix_web::test]
    async fn test_empty_body_is_null() {
        let base = spawn_backend(|cfg| {
            cfg.route("/freeze", web::put().to(|| async { HttpResponse::Ok().finish() }));
        })
        .await;
        let client = ApiClient::new(&base, 5).unwrap();

        let value: Value = client.put::<Value, Value>("/freeze", None).await.unwrap();
        assert!(value.is_null());
    }
}
