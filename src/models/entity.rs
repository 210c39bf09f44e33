// 平台实体数据模型
// 店铺、医院、教育机构、市场商品和用户的后台记录，以及冻结/删除等管理操作的路径

use serde::{Deserialize, Serialize};

use crate::utils::contains_ignore_case;

/// 实体自身的审批状态 (与付款请求状态无关)
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

impl Default for ApprovalStatus {
    fn default() -> Self {
        ApprovalStatus::Pending
    }
}

/// 可管理的实体种类
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Shop,
    Hospital,
    Institute,
    Product,
    User,
}

impl EntityKind {
    /// 解析URL中的实体种类 (复数形式)
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "shops" => Some(EntityKind::Shop),
            "hospitals" => Some(EntityKind::Hospital),
            "institutes" => Some(EntityKind::Institute),
            "products" => Some(EntityKind::Product),
            "users" => Some(EntityKind::User),
            _ => None,
        }
    }

    /// 单数名称，用于单个实体的后台路径
    pub fn singular(&self) -> &'static str {
        match self {
            EntityKind::Shop => "shop",
            EntityKind::Hospital => "hospital",
            EntityKind::Institute => "institute",
            EntityKind::Product => "product",
            EntityKind::User => "user",
        }
    }

    /// 复数名称，同时也是列表响应中的字段名
    pub fn plural(&self) -> &'static str {
        match self {
            EntityKind::Shop => "shops",
            EntityKind::Hospital => "hospitals",
            EntityKind::Institute => "institutes",
            EntityKind::Product => "products",
            EntityKind::User => "users",
        }
    }

    /// 列表接口路径
    pub fn collection_path(&self) -> String {
        match self {
            EntityKind::User => "/api/admin/public/users".to_string(),
            _ => format!("/api/admin/{}", self.plural()),
        }
    }

    /// 单个实体路径
    pub fn item_path(&self, id: &str) -> String {
        format!("/api/admin/{}/{}", self.singular(), id)
    }

    /// 冻结/解冻路径
    pub fn command_path(&self, id: &str, command: EntityCommand) -> String {
        format!("{}/{}", self.item_path(id), command.as_str())
    }
}

/// 实体管理命令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityCommand {
    Freeze,
    Unfreeze,
    Delete,
}

impl EntityCommand {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityCommand::Freeze => "freeze",
            EntityCommand::Unfreeze => "unfreeze",
            EntityCommand::Delete => "delete",
        }
    }

    /// 成功提示中使用的过去式
    pub fn past_tense(&self) -> &'static str {
        match self {
            EntityCommand::Freeze => "frozen",
            EntityCommand::Unfreeze => "unfrozen",
            EntityCommand::Delete => "deleted",
        }
    }
}

/// 实体所有者
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct EntityOwner {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: Option<String>,
    pub email: Option<String>,
    pub full_name: Option<String>,
}

/// 面板管理的实体
pub trait ManagedEntity {
    /// 实体种类
    const KIND: EntityKind;

    /// 客户端搜索时参与匹配的字段
    fn search_fields(&self) -> Vec<&str>;

    /// 任意搜索字段包含搜索词即匹配，空白搜索词匹配全部
    fn matches(&self, query: &str) -> bool {
        let query = query.trim();
        query.is_empty()
            || self
                .search_fields()
                .into_iter()
                .any(|field| contains_ignore_case(field, query))
    }
}

/// 店铺
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Shop {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub shop_name: String,
    pub country: Option<String>,
    #[serde(default)]
    pub city: String,
    /// Product Seller 或 Service Provider
    #[serde(default)]
    pub shop_type: String,
    pub shop_description: Option<String>,
    pub categories: Option<Vec<String>>,
    pub shop_logo: Option<String>,
    pub shop_banner: Option<String>,
    #[serde(default)]
    pub approval_status: ApprovalStatus,
    pub is_frozen: Option<bool>,
    pub owner: Option<EntityOwner>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl ManagedEntity for Shop {
    const KIND: EntityKind = EntityKind::Shop;

    fn search_fields(&self) -> Vec<&str> {
        vec![self.shop_name.as_str(), self.city.as_str(), self.shop_type.as_str()]
    }
}

/// 医院
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Hospital {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub hospital_type: String,
    pub country: Option<String>,
    #[serde(default)]
    pub city: String,
    pub province: Option<String>,
    pub specialization: Option<String>,
    #[serde(default)]
    pub approval_status: ApprovalStatus,
    pub is_frozen: Option<bool>,
    pub owner: Option<EntityOwner>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl ManagedEntity for Hospital {
    const KIND: EntityKind = EntityKind::Hospital;

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.city.as_str(), self.hospital_type.as_str()];
        fields.extend(self.specialization.as_deref());
        fields
    }
}

/// 教育机构
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Institute {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub institute_type: String,
    /// education 或 healthcare
    pub domain: Option<String>,
    #[serde(default)]
    pub city: String,
    pub province: Option<String>,
    pub specialization: Option<String>,
    #[serde(default)]
    pub approval_status: ApprovalStatus,
    pub is_frozen: Option<bool>,
    pub owner: Option<EntityOwner>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl ManagedEntity for Institute {
    const KIND: EntityKind = EntityKind::Institute;

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.city.as_str(), self.institute_type.as_str()];
        fields.extend(self.specialization.as_deref());
        fields
    }
}

/// 市场商品
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, serialize_with = "super::wire::amount_as_number")]
    pub price: rust_decimal::Decimal,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub condition: String,
    pub country: Option<String>,
    #[serde(default)]
    pub city: String,
    /// active、sold 或 expired
    pub status: Option<String>,
    #[serde(default)]
    pub approval_status: ApprovalStatus,
    pub is_frozen: Option<bool>,
    pub owner: Option<EntityOwner>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl ManagedEntity for Product {
    const KIND: EntityKind = EntityKind::Product;

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.title.as_str(),
            self.city.as_str(),
            self.category.as_str(),
            self.condition.as_str(),
        ]
    }
}

/// 平台用户
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    pub full_name: Option<String>,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub is_frozen: bool,
    pub created_at: Option<String>,
}

/// 用户列表响应 (服务端分页)
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserPage {
    #[serde(default, deserialize_with = "super::wire::null_as_default")]
    pub users: Vec<User>,
    #[serde(default = "default_page")]
    pub total_pages: u32,
    #[serde(default = "default_page")]
    pub current_page: u32,
    #[serde(default, deserialize_with = "super::wire::null_as_default")]
    pub total: u64,
}

fn default_page() -> u32 {
    1
}
