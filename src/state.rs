// 应用状态管理
// 包含配置、后台客户端、各页面的列表状态、提示通道和统计轮询器

use anyhow::Result;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::config::Config;
use crate::models::RequestType;
use crate::services::{
    ApiClient, EntityService, Normalizer, NoticeBoard, PaymentRequestService, RequestStore,
    SettingsService, StatsPoller,
};

/// 各页面的付款请求列表状态
///
/// 每个页面一个状态，同一页面的加载和审核操作依次执行。
/// 仪表盘单独持有一个状态，不受全部请求列表上的过滤条件影响
pub struct RequestStores {
    dashboard: Mutex<RequestStore>,
    all: Mutex<RequestStore>,
    shop: Mutex<RequestStore>,
    hospital: Mutex<RequestStore>,
    education: Mutex<RequestStore>,
    marketplace: Mutex<RequestStore>,
}

impl RequestStores {
    /// 为仪表盘、全部请求列表和每个类别各创建一个空状态
    pub fn new(limit: u32) -> Self {
        Self {
            dashboard: Mutex::new(RequestStore::new(None, limit)),
            all: Mutex::new(RequestStore::new(None, limit)),
            shop: Mutex::new(RequestStore::new(Some(RequestType::Shop), limit)),
            hospital: Mutex::new(RequestStore::new(Some(RequestType::Hospital), limit)),
            education: Mutex::new(RequestStore::new(Some(RequestType::Education), limit)),
            marketplace: Mutex::new(RequestStore::new(Some(RequestType::Marketplace), limit)),
        }
    }

    /// 仪表盘的列表状态 (只按类别范围加载，没有状态过滤)
    pub fn dashboard(&self) -> &Mutex<RequestStore> {
        &self.dashboard
    }

    /// 获取页面对应的列表状态，None 为全部请求列表
    pub fn get(&self, scope: Option<RequestType>) -> &Mutex<RequestStore> {
        match scope {
            None => &self.all,
            Some(RequestType::Shop) => &self.shop,
            Some(RequestType::Hospital) => &self.hospital,
            Some(RequestType::Education) => &self.education,
            Some(RequestType::Marketplace) => &self.marketplace,
        }
    }
}

/// 应用全局状态
pub struct AppState {
    /// 应用配置
    pub config: Config,
    /// 后台API客户端
    pub api: Arc<ApiClient>,
    /// 操作提示
    pub notices: NoticeBoard,
    /// 付款请求服务
    pub requests: PaymentRequestService,
    /// 各页面列表状态
    pub stores: RequestStores,
    /// 实体管理服务
    pub entities: EntityService,
    /// 收款设置服务
    pub settings: SettingsService,
    /// 侧边栏统计轮询
    pub stats: StatsPoller,
}

impl AppState {
    /// 创建新的应用状态实例
    ///
    /// # Arguments
    /// * `config` - 应用配置
    ///
    /// # Returns
    /// * 应用状态实例 (统计轮询尚未启动)
    pub fn new(config: Config) -> Result<Self> {
        let api = Arc::new(ApiClient::new(&config.backend.url, config.backend.timeout)?);
        let notices = NoticeBoard::new(config.panel.notice_capacity);
        let normalizer = Normalizer::new(
            &config.backend.url,
            &config.panel.currency,
            &config.panel.avatar_url,
        );

        Ok(Self {
            requests: PaymentRequestService::new(api.clone(), normalizer),
            stores: RequestStores::new(config.panel.page_limit),
            entities: EntityService::new(api.clone(), notices.clone()),
            settings: SettingsService::new(api.clone(), notices.clone()),
            stats: StatsPoller::new(api.clone(), config.panel.stats_interval),
            notices,
            api,
            config,
        })
    }

    /// 创建指向指定后台的测试状态
    #[cfg(test)]
    pub fn new_for_test(backend_url: &str) -> Self {
        let config = Config {
            backend: crate::config::BackendConfig {
                url: backend_url.to_string(),
                timeout: 5,
            },
            ..Config::default()
        };

        Self::new(config).expect("Failed to create test state")
    }
}
