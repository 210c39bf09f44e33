// 收款设置数据模型
// 银行账户信息、各类实体的入驻费用以及收款二维码

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 各类实体的入驻付款金额
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PaymentAmounts {
    #[serde(serialize_with = "super::wire::amount_as_number")]
    pub shop: Decimal,
    #[serde(serialize_with = "super::wire::amount_as_number")]
    pub institute: Decimal,
    #[serde(serialize_with = "super::wire::amount_as_number")]
    pub hospital: Decimal,
    #[serde(serialize_with = "super::wire::amount_as_number")]
    pub marketplace: Decimal,
}

impl Default for PaymentAmounts {
    fn default() -> Self {
        Self {
            shop: Decimal::new(5000, 0),
            institute: Decimal::new(10000, 0),
            hospital: Decimal::new(15000, 0),
            marketplace: Decimal::new(2000, 0),
        }
    }
}

impl PaymentAmounts {
    /// 按字段名列出所有金额
    pub fn entries(&self) -> [(&'static str, Decimal); 4] {
        [
            ("shop", self.shop),
            ("institute", self.institute),
            ("hospital", self.hospital),
            ("marketplace", self.marketplace),
        ]
    }
}

/// 收款设置
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentSettings {
    pub bank_name: String,
    pub account_title: String,
    pub account_number: String,
    pub iban: String,
    pub branch_code: String,
    pub swift_code: String,
    /// 当前二维码图片地址 (只读，由后台维护)
    pub qr_code_image: String,
    pub payment_amounts: PaymentAmounts,
}

/// 后台收款设置响应
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct PaymentSettingsEnvelope {
    pub settings: PaymentSettings,
}

/// 待上传的二维码图片
#[derive(Debug, Clone)]
pub struct QrCodeUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// 面板保存收款设置的请求体
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveSettingsRequest {
    #[serde(flatten)]
    pub settings: PaymentSettings,
    /// Base64编码的二维码图片 (可选，允许带 data: 前缀)
    pub qr_code_upload: Option<String>,
    /// 上传文件名 (可选)
    pub qr_code_file_name: Option<String>,
}
