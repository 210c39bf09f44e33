// 收款设置服务
// 读取和保存银行账户信息、入驻费用以及收款二维码

use reqwest::multipart::{Form, Part};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

use super::api_client::{ApiClient, ApiError};
use super::notices::NoticeBoard;
use crate::models::{PaymentSettings, PaymentSettingsEnvelope, QrCodeUpload};
use crate::utils::{validate_payment_settings, validate_qr_image};

/// 收款设置接口
const PAYMENT_SETTINGS_PATH: &str = "/api/admin/payment-settings";

/// 保存失败时的默认提示
const SAVE_FAILED: &str = "Failed to save payment settings";

/// 保存收款设置的错误
#[derive(Debug, Error)]
pub enum SaveSettingsError {
    /// 提交前的校验未通过
    #[error("{0}")]
    Invalid(String),
    /// 后台拒绝或无法访问
    #[error(transparent)]
    Backend(#[from] ApiError),
}

impl SaveSettingsError {
    /// 面向操作员的提示文字
    pub fn user_message(&self) -> String {
        match self {
            SaveSettingsError::Invalid(message) => message.clone(),
            SaveSettingsError::Backend(e) => e.backend_message().unwrap_or(SAVE_FAILED).to_string(),
        }
    }
}

/// 收款设置服务
#[derive(Debug, Clone)]
pub struct SettingsService {
    api: Arc<ApiClient>,
    notices: NoticeBoard,
}

impl SettingsService {
    /// 创建新的收款设置服务
    pub fn new(api: Arc<ApiClient>, notices: NoticeBoard) -> Self {
        Self { api, notices }
    }

    /// 读取当前收款设置，缺失的金额使用默认值
    pub async fn fetch(&self) -> Result<PaymentSettings, ApiError> {
        match self.load().await {
            Ok(settings) => Ok(settings),
            Err(e) => {
                log::error!("Error fetching payment settings: {}", e);
                self.notices.error("Failed to load payment settings");
                Err(e)
            }
        }
    }

    /// 读取收款设置，不发布提示
    pub async fn load(&self) -> Result<PaymentSettings, ApiError> {
        self.api
            .get::<PaymentSettingsEnvelope>(PAYMENT_SETTINGS_PATH, &[])
            .await
            .map(|envelope| envelope.settings)
    }

    /// 校验并保存收款设置
    ///
    /// # Arguments
    /// * `settings` - 新的收款设置
    /// * `qr_code` - 新的二维码图片 (可选)
    pub async fn save(
        &self,
        settings: &PaymentSettings,
        qr_code: Option<QrCodeUpload>,
    ) -> Result<(), SaveSettingsError> {
        let result = match self.build_form(settings, qr_code) {
            Ok(form) => self
                .api
                .post_multipart::<Value>(PAYMENT_SETTINGS_PATH, form)
                .await
                .map(|_| ())
                .map_err(SaveSettingsError::from),
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => {
                self.notices.success("Payment settings saved successfully");
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to save payment settings: {}", e);
                self.notices.error(e.user_message());
                Err(e)
            }
        }
    }

    /// 组装multipart表单: 文本字段、JSON格式的金额、可选的二维码文件
    fn build_form(
        &self,
        settings: &PaymentSettings,
        qr_code: Option<QrCodeUpload>,
    ) -> Result<Form, SaveSettingsError> {
        validate_payment_settings(settings).map_err(|e| SaveSettingsError::Invalid(e.to_string()))?;

        let amounts = serde_json::to_string(&settings.payment_amounts)
            .map_err(|e| SaveSettingsError::Invalid(e.to_string()))?;

        let mut form = Form::new()
            .text("bankName", settings.bank_name.clone())
            .text("accountTitle", settings.account_title.clone())
            .text("accountNumber", settings.account_number.clone())
            .text("iban", settings.iban.clone())
            .text("branchCode", settings.branch_code.clone())
            .text("swiftCode", settings.swift_code.clone())
            .text("paymentAmounts", amounts);

        if let Some(upload) = qr_code {
            let mime = validate_qr_image(&upload.bytes)
                .map_err(|e| SaveSettingsError::Invalid(e.to_string()))?;
            let part = Part::bytes(upload.bytes)
                .file_name(upload.file_name)
                .mime_str(mime)
                .map_err(|e| SaveSettingsError::Invalid(e.to_string()))?;
            form = form.part("qrCodeImage", part);
        }

        Ok(form)
    }
}
