// 收款设置API处理器
// 读取设置，校验并保存新的设置和收款二维码

use actix_web::{web, HttpResponse, Result as ActixResult};

use super::{bad_gateway, bad_request};
use crate::models::{ApiResponse, SaveSettingsRequest};
use crate::services::SaveSettingsError;
use crate::state::AppState;
use crate::utils::decode_qr_upload;

/// 获取收款设置
///
/// GET /api/panel/payment-settings
pub async fn get_payment_settings(data: web::Data<AppState>) -> ActixResult<HttpResponse> {
    match data.settings.fetch().await {
        Ok(settings) => Ok(HttpResponse::Ok().json(ApiResponse::success(settings))),
        Err(_) => Ok(bad_gateway("Failed to load payment settings")),
    }
}

/// 保存收款设置
///
/// PUT /api/panel/payment-settings
///
/// 请求体: PaymentSettings 字段，可选 qrCodeUpload (Base64) 和 qrCodeFileName
/// 响应: 保存后的设置
pub async fn save_payment_settings(
    data: web::Data<AppState>,
    request: web::Json<SaveSettingsRequest>,
) -> ActixResult<HttpResponse> {
    let request = request.into_inner();

    let qr_code = match request.qr_code_upload.as_deref() {
        Some(encoded) if !encoded.trim().is_empty() => {
            match decode_qr_upload(encoded, request.qr_code_file_name.as_deref()) {
                Ok(upload) => Some(upload),
                Err(e) => {
                    let message = format!("{:#}", e);
                    log::warn!("Rejected QR code upload: {}", message);
                    data.notices.error(message.clone());
                    return Ok(bad_request(&message));
                }
            }
        }
        _ => None,
    };

    match data.settings.save(&request.settings, qr_code).await {
        Ok(()) => {
            // 重新读取以获得后台保存的二维码地址，读取失败不影响保存结果
            let saved = match data.settings.load().await {
                Ok(saved) => saved,
                Err(e) => {
                    log::warn!("Saved payment settings but could not reload them: {}", e);
                    request.settings
                }
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
                saved,
                "Payment settings saved successfully",
            )))
        }
        Err(e @ SaveSettingsError::Invalid(_)) => Ok(bad_request(&e.user_message())),
        Err(e @ SaveSettingsError::Backend(_)) => Ok(bad_gateway(&e.user_message())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::spawn_backend;
    use actix_web::{test, App};
    use serde_json::{json, Value};

    const PNG_PIXEL: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

    fn settings_body() -> Value {
        json!({
            "bankName": "Meezan Bank",
            "accountTitle": "Marketplace Ltd",
            "accountNumber": "0123456789",
            "iban": "PK36MEZN0000000123456789",
            "paymentAmounts": { "shop": 5000, "institute": 10000, "hospital": 15000, "marketplace": 2000 }
        })
    }

    async fn app_state() -> web::Data<AppState> {
        let base = spawn_backend(|cfg| {
            cfg.route(
                "/api/admin/payment-settings",
                web::get().to(|| async {
                    HttpResponse::Ok().json(json!({
                        "settings": {
                            "bankName": "Meezan Bank",
                            "qrCodeImage": "https://cdn.example.com/qr.png"
                        }
                    }))
                }),
            )
            .route(
                "/api/admin/payment-settings",
                web::post().to(|| async { HttpResponse::Ok().json(json!({ "message": "saved" })) }),
            );
        })
        .await;
        web::Data::new(AppState::new_for_test(&base))
    }

    macro_rules! panel_app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data($state.clone())
                    .route("/api/panel/payment-settings", web::get().to(get_payment_settings))
                    .route("/api/panel/payment-settings", web::put().to(save_payment_settings)),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_get_settings() {
        let state = app_state().await;
        let app = panel_app!(state);

        let req = test::TestRequest::get().uri("/api/panel/payment-settings").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["data"]["bankName"], "Meezan Bank");
        assert_eq!(body["data"]["qrCodeImage"], "https://cdn.example.com/qr.png");
    }

    #[actix_web::test]
    async fn test_save_with_qr_code() {
        let state = app_state().await;
        let app = panel_app!(state);

        let mut body = settings_body();
        body["qrCodeUpload"] = json!(format!("data:image/png;base64,{}", PNG_PIXEL));
        let req = test::TestRequest::put()
            .uri("/api/panel/payment-settings")
            .set_json(body)
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["message"], "Payment settings saved successfully");
        assert_eq!(body["data"]["qrCodeImage"], "https://cdn.example.com/qr.png");
    }

    #[actix_web::test]
    async fn test_save_rejects_invalid_input() {
        let state = app_state().await;
        let app = panel_app!(state);

        let mut missing_iban = settings_body();
        missing_iban["iban"] = json!("");
        let req = test::TestRequest::put()
            .uri("/api/panel/payment-settings")
            .set_json(missing_iban)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 400);

        let mut not_image = settings_body();
        not_image["qrCodeUpload"] = json!("aGVsbG8gd29ybGQ=");
        let req = test::TestRequest::put()
            .uri("/api/panel/payment-settings")
            .set_json(not_image)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 400);

        let mut negative = settings_body();
        negative["paymentAmounts"]["shop"] = json!(-10);
        let req = test::TestRequest::put()
            .uri("/api/panel/payment-settings")
            .set_json(negative)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 400);

        assert_eq!(state.notices.drain().len(), 3);
    }

    #[actix_web::test]
    async fn test_save_succeeds_when_reload_fails() {
        let base = spawn_backend(|cfg| {
            cfg.route(
                "/api/admin/payment-settings",
                web::get().to(|| async { HttpResponse::ServiceUnavailable().finish() }),
            )
            .route(
                "/api/admin/payment-settings",
                web::post().to(|| async { HttpResponse::Ok().json(json!({ "message": "saved" })) }),
            );
        })
        .await;
        let state = web::Data::new(AppState::new_for_test(&base));
        let app = panel_app!(state);

        let req = test::TestRequest::put()
            .uri("/api/panel/payment-settings")
            .set_json(settings_body())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["bankName"], "Meezan Bank");
        assert_eq!(body["data"]["paymentAmounts"]["hospital"], 15000);

        let notices = state.notices.drain();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].message, "Payment settings saved successfully");
    }
}
