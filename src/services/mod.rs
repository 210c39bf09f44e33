// 服务层模块
// 包含后台接口调用、数据规范化、列表状态、提示通道和统计轮询

pub mod api_client;
pub mod entity_service;
pub mod normalizer;
pub mod notices;
pub mod payment_request_service;
pub mod request_store;
pub mod settings_service;
pub mod stats_poller;

// 重新导出服务
pub use api_client::{ApiClient, ApiError};
pub use entity_service::EntityService;
pub use normalizer::Normalizer;
pub use notices::{Notice, NoticeBoard, NoticeLevel};
pub use payment_request_service::PaymentRequestService;
pub use request_store::{RequestStore, RequestView, RECENT_PENDING_LIMIT};
pub use settings_service::{SaveSettingsError, SettingsService};
pub use stats_poller::StatsPoller;
