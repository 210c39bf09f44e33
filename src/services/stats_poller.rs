// 侧边栏统计轮询
// 定时拉取后台汇总统计，失败时只记录警告并保留上一次的数量

use chrono::Utc;
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};

use super::api_client::{ApiClient, ApiError};
use crate::models::{AdminStats, SidebarCounts};

/// 后台统计接口
const STATS_PATH: &str = "/api/admin/stats";

/// 侧边栏统计轮询器
pub struct StatsPoller {
    api: Arc<ApiClient>,
    counts: Arc<RwLock<SidebarCounts>>,
    poll_interval: Duration,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl StatsPoller {
    /// 创建轮询器 (不会自动启动)
    ///
    /// # Arguments
    /// * `api` - 后台API客户端
    /// * `interval_secs` - 轮询间隔 (秒)
    pub fn new(api: Arc<ApiClient>, interval_secs: u64) -> Self {
        Self {
            api,
            counts: Arc::new(RwLock::new(SidebarCounts::default())),
            poll_interval: Duration::from_secs(interval_secs.max(1)),
            handle: Mutex::new(None),
        }
    }

    /// 启动后台轮询任务，立即执行第一次刷新
    ///
    /// 已在运行时不会重复启动
    pub fn start(&self) {
        let mut handle = match self.handle.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if handle.is_some() {
            return;
        }

        log::info!(
            "Starting sidebar stats polling every {}s",
            self.poll_interval.as_secs()
        );

        let api = self.api.clone();
        let counts = self.counts.clone();
        let poll_interval = self.poll_interval;

        *handle = Some(tokio::spawn(async move {
            let mut ticker = interval(poll_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                if let Err(e) = refresh_counts(&api, &counts).await {
                    log::warn!("Failed to refresh sidebar stats: {}", e);
                }
            }
        }));
    }

    /// 立即刷新一次
    pub async fn refresh(&self) -> Result<SidebarCounts, ApiError> {
        refresh_counts(&self.api, &self.counts).await
    }

    /// 最近一次成功获取的数量
    pub async fn counts(&self) -> SidebarCounts {
        self.counts.read().await.clone()
    }

    /// 后台任务是否在运行
    pub fn is_running(&self) -> bool {
        match self.handle.lock() {
            Ok(guard) => guard.as_ref().map_or(false, |h| !h.is_finished()),
            Err(poisoned) => poisoned.into_inner().as_ref().map_or(false, |h| !h.is_finished()),
        }
    }

    /// 停止轮询
    pub fn shutdown(&self) {
        let handle = match self.handle.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };

        if let Some(handle) = handle {
            handle.abort();
            log::info!("Sidebar stats polling stopped");
        }
    }
}

impl Drop for StatsPoller {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// 拉取统计并更新侧边栏数量，失败时保持原值
async fn refresh_counts(
    api: &ApiClient,
    counts: &RwLock<SidebarCounts>,
) -> Result<SidebarCounts, ApiError> {
    let stats: AdminStats = api.get(STATS_PATH, &[]).await?;
    let fresh = SidebarCounts::from_stats(&stats, Utc::now());

    *counts.write().await = fresh.clone();
    log::debug!("Sidebar stats refreshed: {} pending", fresh.pending);

    Ok(fresh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::spawn_backend;
    use actix_web::{web, HttpResponse};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[actix_web::test]
    async fn test_failed_refresh_keeps_previous_counts() {
        let calls = web::Data::new(AtomicUsize::new(0));
        let base = spawn_backend(move |cfg| {
            cfg.app_data(calls.clone()).route(
                "/api/admin/stats",
                web::get().to(|calls: web::Data<AtomicUsize>| async move {
                    if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                        HttpResponse::Ok().json(json!({
                            "totalShops": 12,
                            "totalHospitals": 3,
                            "totalInstitutes": 7,
                            "totalMarketplaceProducts": 40,
                            "pendingRequests": 5
                        }))
                    } else {
                        HttpResponse::BadGateway().finish()
                    }
                }),
            );
        })
        .await;

        let poller = StatsPoller::new(Arc::new(ApiClient::new(&base, 5).unwrap()), 30);
        let first = poller.refresh().await.unwrap();
        assert_eq!(first.education, 7);
        assert_eq!(first.pending, 5);

        assert!(poller.refresh().await.is_err());
        assert_eq!(poller.counts().await, first);
    }

    #[actix_web::test]
    async fn test_missing_fields_default_to_zero() {
        let base = spawn_backend(|cfg| {
            cfg.route(
                "/api/admin/stats",
                web::get().to(|| async { HttpResponse::Ok().json(json!({ "totalShops": 2 })) }),
            );
        })
        .await;

        let poller = StatsPoller::new(Arc::new(ApiClient::new(&base, 5).unwrap()), 30);
        let counts = poller.refresh().await.unwrap();
        assert_eq!(counts.shops, 2);
        assert_eq!(counts.marketplace, 0);
        assert!(counts.refreshed_at.is_some());
    }

    #[actix_web::test]
    async fn test_start_polls_immediately_and_shutdown_stops() {
        let base = spawn_backend(|cfg| {
            cfg.route(
                "/api/admin/stats",
                web::get().to(|| async { HttpResponse::Ok().json(json!({ "pendingRequests": 9 })) }),
            );
        })
        .await;

        let poller = StatsPoller::new(Arc::new(ApiClient::new(&base, 5).unwrap()), 3600);
        poller.start();
        poller.start();
        assert!(poller.is_running());

        let mut pending = 0;
        for _ in 0..50 {
            pending = poller.counts().await.pending;
            if pending == 9 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        assert_eq!(pending, 9);

        poller.shutdown();
        assert!(!poller.is_running());
    }
}
