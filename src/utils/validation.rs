// 数据验证工具函数
// 提供输入数据验证和格式检查功能

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine};
use image::ImageFormat;
use regex::Regex;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::models::{PaymentSettings, QrCodeUpload};

/// 二维码图片大小上限 (5MB)
pub const MAX_QR_CODE_BYTES: usize = 5 * 1024 * 1024;

/// 验证URL格式
///
/// # Arguments
/// * `url` - URL字符串
///
/// # Returns
/// * URL是否有效
pub fn validate_url(url: &str) -> bool {
    match Regex::new(r"^https?://[^\s/$.?#].[^\s]*$") {
        Ok(url_regex) => url_regex.is_match(url),
        Err(_) => false,
    }
}

/// 验证后台记录ID
///
/// ID会被拼接进后台路径，只允许字母、数字、下划线、连字符
pub fn validate_record_id(id: &str) -> Result<()> {
    if id.is_empty() {
        anyhow::bail!("Record ID cannot be empty");
    }

    if id.len() > 64 {
        anyhow::bail!("Record ID too long (max 64 characters)");
    }

    if !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
        anyhow::bail!("Record ID contains invalid characters");
    }

    Ok(())
}

/// 识别图片格式并返回MIME类型
///
/// # Arguments
/// * `bytes` - 图片数据
///
/// # Returns
/// * 图片的MIME类型
pub fn validate_qr_image(bytes: &[u8]) -> Result<&'static str> {
    if bytes.is_empty() {
        anyhow::bail!("QR code image is empty");
    }

    if bytes.len() > MAX_QR_CODE_BYTES {
        anyhow::bail!("QR code image too large (max 5MB)");
    }

    let format = image::guess_format(bytes).context("QR code upload is not an image")?;
    let mime = match format {
        ImageFormat::Png => "image/png",
        ImageFormat::Jpeg => "image/jpeg",
        ImageFormat::Gif => "image/gif",
        ImageFormat::WebP => "image/webp",
        ImageFormat::Bmp => "image/bmp",
        ImageFormat::Tiff => "image/tiff",
        ImageFormat::Ico => "image/x-icon",
        _ => anyhow::bail!("Unsupported QR code image format"),
    };

    Ok(mime)
}

/// 解码Base64编码的二维码上传
///
/// 支持 `data:image/png;base64,...` 形式
pub fn decode_qr_upload(encoded: &str, file_name: Option<&str>) -> Result<QrCodeUpload> {
    let payload = match encoded.split_once(";base64,") {
        Some((prefix, data)) if prefix.starts_with("data:") => data,
        _ => encoded,
    };

    let bytes = STANDARD
        .decode(payload.trim())
        .context("QR code upload is not valid base64")?;

    let mime = validate_qr_image(&bytes)?;
    let file_name = match file_name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => name.to_string(),
        None => format!("qr-code.{}", mime.trim_start_matches("image/")),
    };

    Ok(QrCodeUpload { file_name, bytes })
}

/// 验证收款设置
pub fn validate_payment_settings(settings: &PaymentSettings) -> Result<()> {
    let mut validator = InputValidator::new();

    validator.validate_required("bankName", &settings.bank_name);
    validator.validate_required("accountTitle", &settings.account_title);
    validator.validate_required("accountNumber", &settings.account_number);
    validator.validate_required("iban", &settings.iban);

    for (entity_type, amount) in settings.payment_amounts.entries() {
        validator.validate_non_negative(&format!("paymentAmounts.{}", entity_type), amount);
    }

    validator.into_result()
}

/// 通用输入验证器
pub struct InputValidator {
    errors: BTreeMap<String, Vec<String>>,
}

impl InputValidator {
    /// 创建新的验证器
    pub fn new() -> Self {
        Self {
            errors: BTreeMap::new(),
        }
    }

    /// 添加字段验证错误
    pub fn add_error(&mut self, field: &str, message: &str) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.to_string());
    }

    /// 验证必填字段
    pub fn validate_required(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.add_error(field, "This field is required");
        }
    }

    /// 验证金额不为负数
    pub fn validate_non_negative(&mut self, field: &str, value: Decimal) {
        if value.is_sign_negative() && !value.is_zero() {
            self.add_error(field, "Must not be negative");
        }
    }

    /// 检查是否有验证错误
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// 转换为错误结果
    pub fn into_result(self) -> Result<()> {
        if self.has_errors() {
            let error_msg = self
                .errors
                .iter()
                .map(|(field, messages)| format!("{}: {}", field, messages.join(", ")))
                .collect::<Vec<_>>()
                .join("; ");

            anyhow::bail!("Validation failed: {}", error_msg);
        }

        Ok(())
    }
}

impl Default for InputValidator {
    fn default() -> Self {
        Self::new()
    }
}
