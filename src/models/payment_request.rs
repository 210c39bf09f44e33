// 付款核验请求数据模型
// 定义后台原始记录、面板规范化记录以及两套状态词汇之间的映射

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 付款所属的实体类别 (面板词汇)
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RequestType {
    /// 店铺
    Shop,
    /// 医院
    Hospital,
    /// 教育机构
    Education,
    /// 市场商品
    Marketplace,
}

impl RequestType {
    /// 所有类别，按侧边栏顺序
    pub const ALL: [RequestType; 4] = [
        RequestType::Shop,
        RequestType::Hospital,
        RequestType::Education,
        RequestType::Marketplace,
    ];

    /// 后台 `entityType` 转换为面板类别，未知值归为店铺
    pub fn from_entity_type(entity_type: &str) -> Self {
        match entity_type {
            "shop" => RequestType::Shop,
            "hospital" => RequestType::Hospital,
            "institute" => RequestType::Education,
            "marketplace" | "product" => RequestType::Marketplace,
            _ => RequestType::Shop,
        }
    }

    /// 面板类别对应的后台 `entityType` 查询值
    pub fn entity_type(&self) -> &'static str {
        match self {
            RequestType::Shop => "shop",
            RequestType::Hospital => "hospital",
            RequestType::Education => "institute",
            RequestType::Marketplace => "marketplace",
        }
    }

    /// 解析URL路径中的类别名
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "shop" => Some(RequestType::Shop),
            "hospital" => Some(RequestType::Hospital),
            "education" => Some(RequestType::Education),
            "marketplace" => Some(RequestType::Marketplace),
            _ => None,
        }
    }
}

/// 面板状态 (后台四种状态的简化)
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// 待审核
    Pending,
    /// 已通过
    Accepted,
    /// 已拒绝
    Rejected,
}

impl Default for RequestStatus {
    fn default() -> Self {
        RequestStatus::Pending
    }
}

impl RequestStatus {
    /// 后台状态转换为面板状态
    ///
    /// `verified` 和 `completed` 都视为已通过，未知值视为待审核
    pub fn from_backend(status: &str) -> Self {
        match status {
            "verified" | "completed" => RequestStatus::Accepted,
            "rejected" => RequestStatus::Rejected,
            _ => RequestStatus::Pending,
        }
    }

    /// 作为后台列表过滤条件时使用的状态值
    pub fn backend_filter(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Accepted => "verified",
            RequestStatus::Rejected => "rejected",
        }
    }

    /// 解析查询参数中的状态，`all` 或无法识别时返回None
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "pending" => Some(RequestStatus::Pending),
            "accepted" => Some(RequestStatus::Accepted),
            "rejected" => Some(RequestStatus::Rejected),
            _ => None,
        }
    }
}

/// 管理员操作类型
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AdminActionKind {
    Accepted,
    Rejected,
}

/// 管理员审核记录，仅在请求离开待审核状态后存在
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdminAction {
    /// 操作人
    pub admin_id: String,
    /// 操作类型
    pub action: AdminActionKind,
    /// 拒绝原因或审核备注
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// 操作时间
    pub at: Option<DateTime<Utc>>,
}

/// 提交人信息
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Owner {
    pub id: String,
    pub name: String,
    /// 根据名字生成的头像地址
    pub avatar: String,
}

/// 规范化后的付款核验请求
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    /// 后台分配的唯一标识
    pub id: String,
    /// 实体类别
    #[serde(rename = "type")]
    pub request_type: RequestType,
    /// 目标实体ID
    pub resource_id: String,
    /// 展示名称
    pub resource_name: String,
    pub owner_name: String,
    pub owner_id: String,
    pub owner: Owner,
    /// 付款金额
    #[serde(serialize_with = "super::wire::amount_as_number")]
    pub amount: Decimal,
    /// 币种 (平台固定币种)
    pub currency: String,
    pub status: RequestStatus,
    /// 付款截图的绝对地址
    pub images: Vec<String>,
    pub agent_id: Option<String>,
    /// 审核备注或用户备注
    pub notes: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub admin_action: Option<AdminAction>,
}

impl PaymentRequest {
    /// 检查请求是否仍待审核
    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }

    /// 记录一次审核结果，同时更新状态
    pub fn record_decision(&mut self, action: AdminActionKind, reason: Option<String>) {
        self.status = match action {
            AdminActionKind::Accepted => RequestStatus::Accepted,
            AdminActionKind::Rejected => RequestStatus::Rejected,
        };
        self.admin_action = Some(AdminAction {
            admin_id: "admin".to_string(),
            action,
            reason,
            at: Some(Utc::now()),
        });
    }

    /// 资源名或提交人名是否包含搜索词 (不区分大小写)
    pub fn matches_search(&self, query: &str) -> bool {
        crate::utils::contains_ignore_case(&self.resource_name, query)
            || crate::utils::contains_ignore_case(&self.owner_name, query)
    }
}

/// 后台原始提交人
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RawUser {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub full_name: Option<String>,
    pub username: Option<String>,
}

/// 后台原始付款记录，所有字段均可缺失
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RawPaymentRequest {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub entity_type: Option<String>,
    /// 字符串ID或已展开的实体对象
    pub entity_id: Option<Value>,
    pub status: Option<String>,
    pub transaction_id: Option<String>,
    pub amount: Option<Decimal>,
    pub total_amount: Option<Decimal>,
    pub screenshot_file: Option<String>,
    pub user: Option<RawUser>,
    pub agent_id: Option<String>,
    pub verification_notes: Option<String>,
    pub notes: Option<String>,
    /// 字符串ID或已展开的管理员对象
    pub verified_by: Option<Value>,
    pub verified_at: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// 后台付款请求列表响应
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RawPaymentRequestPage {
    #[serde(deserialize_with = "super::wire::null_as_default")]
    pub payment_requests: Vec<Value>,
    pub total_pages: Option<u32>,
    pub current_page: Option<u32>,
}

/// 付款请求列表查询条件
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestQuery {
    pub request_type: Option<RequestType>,
    pub status: Option<RequestStatus>,
    pub page: u32,
    pub limit: u32,
}

impl RequestQuery {
    /// 转换为后台查询参数
    pub fn to_params(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("entityType", self.request_type.map(|t| t.entity_type().to_string())),
            ("status", self.status.map(|s| s.backend_filter().to_string())),
            ("page", Some(self.page.to_string())),
            ("limit", Some(self.limit.to_string())),
        ]
    }
}

/// 一页规范化后的请求
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestPage {
    pub requests: Vec<PaymentRequest>,
    pub total_pages: u32,
    pub current_page: Option<u32>,
}

/// 状态更新命令
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    /// 后台目标状态: verified 或 rejected
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_notes: Option<String>,
}

impl StatusUpdate {
    pub fn accept() -> Self {
        Self {
            status: "verified",
            verification_notes: None,
        }
    }

    pub fn reject(reason: Option<String>) -> Self {
        Self {
            status: "rejected",
            verification_notes: reason,
        }
    }
}
