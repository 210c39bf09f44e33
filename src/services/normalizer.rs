// 付款请求规范化
// 将后台的原始付款记录转换为面板使用的规范记录，转换过程不会失败

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::Value;

use crate::models::{
    AdminAction, AdminActionKind, Owner, PaymentRequest, RawPaymentRequest, RequestStatus,
    RequestType,
};
use crate::utils::{avatar_url, capitalize, non_blank, screenshot_url};

/// 缺少提交人名字时使用的默认名
const DEFAULT_OWNER_NAME: &str = "User";

/// 付款请求规范化器
#[derive(Debug, Clone)]
pub struct Normalizer {
    /// 后台基础地址，用于拼接上传文件地址
    base_url: String,
    /// 平台固定币种
    currency: String,
    /// 头像服务地址
    avatar_base: String,
}

impl Normalizer {
    /// 创建新的规范化器
    pub fn new(base_url: &str, currency: &str, avatar_base: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            currency: currency.to_string(),
            avatar_base: avatar_base.to_string(),
        }
    }

    /// 将一条JSON记录转换为规范记录
    ///
    /// 与原始结构完全不符的记录返回None
    pub fn normalize_value(&self, value: Value) -> Option<PaymentRequest> {
        match serde_json::from_value::<RawPaymentRequest>(value) {
            Ok(raw) => Some(self.normalize(&raw)),
            Err(e) => {
                log::warn!("Skipping malformed payment request record: {}", e);
                None
            }
        }
    }

    /// 将一条原始记录转换为规范记录
    ///
    /// # Arguments
    /// * `raw` - 后台原始记录
    ///
    /// # Returns
    /// * 规范化后的付款请求，缺失字段使用默认值
    pub fn normalize(&self, raw: &RawPaymentRequest) -> PaymentRequest {
        let backend_status = non_blank(raw.status.as_deref()).unwrap_or("pending");
        let status = RequestStatus::from_backend(backend_status);

        let entity_type = non_blank(raw.entity_type.as_deref());
        let request_type = entity_type
            .map(RequestType::from_entity_type)
            .unwrap_or(RequestType::Shop);

        let resource_name = match non_blank(raw.transaction_id.as_deref()) {
            Some(transaction_id) => format!("Payment {}", transaction_id),
            None => format!("{} payment", capitalize(entity_type.unwrap_or("payment"))),
        };

        let user = raw.user.as_ref();
        let owner_name = user
            .and_then(|u| non_blank(u.full_name.as_deref()).or(non_blank(u.username.as_deref())))
            .unwrap_or(DEFAULT_OWNER_NAME)
            .to_string();
        let owner_id = user.and_then(|u| u.id.clone()).unwrap_or_default();

        let images: Vec<String> = raw
            .screenshot_file
            .as_deref()
            .and_then(|file| screenshot_url(&self.base_url, file))
            .into_iter()
            .collect();

        let created_at = parse_timestamp(raw.created_at.as_deref());
        let updated_at = parse_timestamp(raw.updated_at.as_deref());

        let notes = non_blank(raw.verification_notes.as_deref())
            .or(non_blank(raw.notes.as_deref()))
            .unwrap_or_default()
            .to_string();

        // 待审核记录不带审核信息，其余状态总是带审核信息
        let admin_action = match status {
            RequestStatus::Pending => None,
            RequestStatus::Accepted | RequestStatus::Rejected => Some(AdminAction {
                admin_id: raw
                    .verified_by
                    .as_ref()
                    .and_then(record_id)
                    .unwrap_or_else(|| "admin".to_string()),
                action: if status == RequestStatus::Rejected {
                    AdminActionKind::Rejected
                } else {
                    AdminActionKind::Accepted
                },
                reason: non_blank(raw.verification_notes.as_deref()).map(str::to_string),
                at: parse_timestamp(raw.verified_at.as_deref()).or(updated_at),
            }),
        };

        PaymentRequest {
            id: raw.id.clone().unwrap_or_default(),
            request_type,
            resource_id: raw.entity_id.as_ref().and_then(record_id).unwrap_or_default(),
            resource_name,
            owner: Owner {
                id: owner_id.clone(),
                name: owner_name.clone(),
                avatar: avatar_url(&self.avatar_base, &owner_name),
            },
            owner_name,
            owner_id,
            amount: raw.amount.or(raw.total_amount).unwrap_or(Decimal::ZERO),
            currency: self.currency.clone(),
            status,
            images,
            agent_id: non_blank(raw.agent_id.as_deref()).map(str::to_string),
            notes,
            created_at,
            updated_at,
            admin_action,
        }
    }
}

/// 从字符串ID或已展开的对象中取出ID
fn record_id(value: &Value) -> Option<String> {
    match value {
        Value::String(id) if !id.is_empty() => Some(id.clone()),
        Value::Object(object) => object.get("_id").and_then(record_id),
        _ => None,
    }
}

/// 解析RFC3339时间，无法解析时返回None
fn parse_timestamp(value: Option<&str>) -> Option<DateTime<Utc>> {
    value
        .and_then(|v| DateTime::parse_from_rfc3339(v).ok())
        .map(|dt| dt.with_timezone(&Utc))
}
