// 侧边栏统计数据模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 后台汇总统计
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct AdminStats {
    #[serde(deserialize_with = "super::wire::null_as_default")]
    pub total_shops: u64,
    #[serde(deserialize_with = "super::wire::null_as_default")]
    pub total_hospitals: u64,
    #[serde(deserialize_with = "super::wire::null_as_default")]
    pub total_institutes: u64,
    #[serde(deserialize_with = "super::wire::null_as_default")]
    pub total_marketplace_products: u64,
    #[serde(deserialize_with = "super::wire::null_as_default")]
    pub pending_requests: u64,
}

/// 侧边栏徽标数量
#[derive(Debug, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SidebarCounts {
    pub shops: u64,
    pub hospitals: u64,
    pub education: u64,
    pub marketplace: u64,
    pub pending: u64,
    /// 最近一次成功刷新的时间
    pub refreshed_at: Option<DateTime<Utc>>,
}

impl SidebarCounts {
    /// 根据后台统计生成侧边栏数量
    pub fn from_stats(stats: &AdminStats, refreshed_at: DateTime<Utc>) -> Self {
        Self {
            shops: stats.total_shops,
            hospitals: stats.total_hospitals,
            education: stats.total_institutes,
            marketplace: stats.total_marketplace_products,
            pending: stats.pending_requests,
            refreshed_at: Some(refreshed_at),
        }
    }
}
