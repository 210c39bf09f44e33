// 付款请求服务
// 封装付款请求列表和状态更新两个后台接口

use serde_json::Value;
use std::sync::Arc;

use super::api_client::{ApiClient, ApiError};
use super::normalizer::Normalizer;
use crate::models::{RawPaymentRequestPage, RequestPage, RequestQuery, StatusUpdate};

/// 付款请求列表接口
const PAYMENT_REQUESTS_PATH: &str = "/api/admin/payment-requests";

/// 付款请求服务
#[derive(Debug, Clone)]
pub struct PaymentRequestService {
    api: Arc<ApiClient>,
    normalizer: Normalizer,
}

impl PaymentRequestService {
    /// 创建新的付款请求服务
    pub fn new(api: Arc<ApiClient>, normalizer: Normalizer) -> Self {
        Self { api, normalizer }
    }

    /// 获取一页付款请求并规范化
    ///
    /// # Arguments
    /// * `query` - 类别、状态、页码、每页数量
    ///
    /// # Returns
    /// * 规范化后的请求页
    pub async fn list(&self, query: &RequestQuery) -> Result<RequestPage, ApiError> {
        let raw: RawPaymentRequestPage = self
            .api
            .get(PAYMENT_REQUESTS_PATH, &query.to_params())
            .await?;

        let requests = raw
            .payment_requests
            .into_iter()
            .filter_map(|value| self.normalizer.normalize_value(value))
            .collect();

        Ok(RequestPage {
            requests,
            total_pages: raw.total_pages.unwrap_or(1),
            current_page: raw.current_page,
        })
    }

    /// 更新付款请求状态
    ///
    /// 成功只以HTTP状态码为准，响应体内容被忽略
    pub async fn update_status(&self, id: &str, update: &StatusUpdate) -> Result<(), ApiError> {
        let path = format!("/api/admin/payment-request/{}/status", id);
        let _: Value = self.api.put(&path, Some(update)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RequestStatus, RequestType};
    use crate::testing::spawn_backend;
    use actix_web::{web, HttpRequest, HttpResponse};
    use serde_json::json;

    fn service(base: &str) -> PaymentRequestService {
        let api = Arc::new(ApiClient::new(base, 5).unwrap());
        let normalizer = Normalizer::new(base, "PKR", "https://api.dicebear.com/7.x/initials/svg");
        PaymentRequestService::new(api, normalizer)
    }

    #[actix_web::test]
    async fn test_list_sends_query_and_normalizes() {
        let base = spawn_backend(|cfg| {
            cfg.route(
                "/api/admin/payment-requests",
                web::get().to(|req: HttpRequest| async move {
                    assert_eq!(
                        req.query_string(),
                        "entityType=institute&status=verified&page=2&limit=20"
                    );
                    HttpResponse::Ok().json(json!({
                        "paymentRequests": [
                            { "_id": "r1", "entityType": "institute", "status": "verified",
                              "transactionId": "TX9", "amount": 500, "user": { "fullName": "Ana" } },
                            42,
                            { "_id": "r2", "entityType": "institute", "status": "completed" }
                        ],
                        "totalPages": 4,
                        "currentPage": 2
                    }))
                }),
            );
        })
        .await;

        let query = RequestQuery {
            request_type: Some(RequestType::Education),
            status: Some(RequestStatus::Accepted),
            page: 2,
            limit: 20,
        };
        let page = service(&base).list(&query).await.unwrap();

        assert_eq!(page.requests.len(), 2);
        assert_eq!(page.requests[0].resource_name, "Payment TX9");
        assert_eq!(page.requests[1].status, RequestStatus::Accepted);
        assert_eq!(page.total_pages, 4);
        assert_eq!(page.current_page, Some(2));
    }

    #[actix_web::test]
    async fn test_list_defaults_page_count() {
        let base = spawn_backend(|cfg| {
            cfg.route(
                "/api/admin/payment-requests",
                web::get().to(|| async { HttpResponse::Ok().json(json!({})) }),
            );
        })
        .await;

        let query = RequestQuery { page: 1, limit: 20, ..Default::default() };
        let page = service(&base).list(&query).await.unwrap();

        assert!(page.requests.is_empty());
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.current_page, None);
    }

    #[actix_web::test]
    async fn test_list_tolerates_null_fields() {
        let base = spawn_backend(|cfg| {
            cfg.route(
                "/api/admin/payment-requests",
                web::get().to(|| async {
                    HttpResponse::Ok().json(json!({ "paymentRequests": null, "totalPages": null }))
                }),
            );
        })
        .await;

        let query = RequestQuery { page: 1, limit: 20, ..Default::default() };
        let page = service(&base).list(&query).await.unwrap();

        assert!(page.requests.is_empty());
        assert_eq!(page.total_pages, 1);
    }

    #[actix_web::test]
    async fn test_update_status_body() {
        let base = spawn_backend(|cfg| {
            cfg.route(
                "/api/admin/payment-request/{id}/status",
                web::put().to(|path: web::Path<String>, body: web::Json<Value>| async move {
                    assert_eq!(path.into_inner(), "r1");
                    assert_eq!(body["status"], "rejected");
                    assert_eq!(body["verificationNotes"], "blurry receipt");
                    HttpResponse::Ok().json(json!({ "message": "updated" }))
                }),
            );
        })
        .await;

        let update = StatusUpdate::reject(Some("blurry receipt".into()));
        assert!(service(&base).update_status("r1", &update).await.is_ok());
    }
}
