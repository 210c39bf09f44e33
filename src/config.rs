// 配置管理模块
// 负责加载和管理应用程序配置

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;

use crate::utils::validate_url;

/// 未配置后台地址时使用的默认值
const DEFAULT_BACKEND_URL: &str = "http://localhost:3000";

/// 应用程序配置结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// 服务器配置
    pub server: ServerConfig,
    /// 后台配置
    pub backend: BackendConfig,
    /// 面板配置
    pub panel: PanelConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 服务器监听地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
    /// 工作线程数
    pub workers: Option<usize>,
    /// 允许跨域访问的来源，为空时只允许本地开发地址
    pub allowed_origins: Vec<String>,
}

/// 市场后台配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// 后台基础地址
    pub url: String,
    /// 请求超时时间 (秒)
    pub timeout: u64,
}

/// 面板行为配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelConfig {
    /// 每页请求数量 (1..=100)
    pub page_limit: u32,
    /// 侧边栏统计刷新间隔 (秒)
    pub stats_interval: u64,
    /// 平台币种
    pub currency: String,
    /// 首字母头像服务地址
    pub avatar_url: String,
    /// 提示队列容量
    pub notice_capacity: usize,
}

impl Config {
    /// 从环境变量加载配置
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok(); // 加载.env文件，忽略错误

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 通过键值查找函数加载配置
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let backend_url = match lookup("BACKEND_URL") {
            Some(url) => url,
            None => {
                log::warn!("BACKEND_URL not set, using {}", DEFAULT_BACKEND_URL);
                DEFAULT_BACKEND_URL.to_string()
            }
        };

        let page_limit: u32 = var("PANEL_PAGE_LIMIT", "20")
            .parse()
            .context("Invalid PANEL_PAGE_LIMIT")?;

        Ok(Config {
            server: ServerConfig {
                host: var("SERVER_HOST", "127.0.0.1"),
                port: var("SERVER_PORT", "8080")
                    .parse()
                    .context("Invalid SERVER_PORT")?,
                workers: lookup("SERVER_WORKERS").and_then(|s| s.parse().ok()),
                allowed_origins: var("PANEL_ALLOWED_ORIGINS", "")
                    .split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(str::to_string)
                    .collect(),
            },
            backend: BackendConfig {
                url: backend_url.trim_end_matches('/').to_string(),
                timeout: var("BACKEND_TIMEOUT", "30")
                    .parse()
                    .context("Invalid BACKEND_TIMEOUT")?,
            },
            panel: PanelConfig {
                page_limit: page_limit.clamp(1, 100),
                stats_interval: var("PANEL_STATS_INTERVAL", "30")
                    .parse()
                    .context("Invalid PANEL_STATS_INTERVAL")?,
                currency: var("PANEL_CURRENCY", "PKR"),
                avatar_url: var("PANEL_AVATAR_URL", "https://api.dicebear.com/7.x/initials/svg"),
                notice_capacity: var("PANEL_NOTICE_CAPACITY", "50")
                    .parse()
                    .context("Invalid PANEL_NOTICE_CAPACITY")?,
            },
        })
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        // 验证服务器配置
        if self.server.port == 0 {
            anyhow::bail!("Server port cannot be 0");
        }

        // 验证后台配置
        if !validate_url(&self.backend.url) {
            anyhow::bail!("Invalid BACKEND_URL: {}", self.backend.url);
        }

        if self.backend.timeout == 0 {
            anyhow::bail!("Backend timeout cannot be 0");
        }

        // 验证面板配置
        if self.panel.stats_interval == 0 {
            anyhow::bail!("Stats interval cannot be 0");
        }

        if self.panel.currency.trim().is_empty() {
            anyhow::bail!("Currency cannot be empty");
        }

        if !validate_url(&self.panel.avatar_url) {
            anyhow::bail!("Invalid PANEL_AVATAR_URL: {}", self.panel.avatar_url);
        }

        Ok(())
    }

    /// 获取服务器绑定地址
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                workers: None,
                allowed_origins: Vec::new(),
            },
            backend: BackendConfig {
                url: DEFAULT_BACKEND_URL.to_string(),
                timeout: 30,
            },
            panel: PanelConfig {
                page_limit: 20,
                stats_interval: 30,
                currency: "PKR".to_string(),
                avatar_url: "https://api.dicebear.com/7.x/initials/svg".to_string(),
                notice_capacity: 50,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.backend.url, "http://localhost:3000");
        assert_eq!(config.backend.timeout, 30);
        assert_eq!(config.panel.page_limit, 20);
        assert_eq!(config.panel.stats_interval, 30);
        assert_eq!(config.panel.currency, "PKR");
        assert_eq!(config.panel.notice_capacity, 50);
        assert!(config.server.allowed_origins.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("SERVER_PORT", "9090"),
            ("SERVER_WORKERS", "4"),
            ("BACKEND_URL", "https://api.marketplace.pk/"),
            ("PANEL_PAGE_LIMIT", "500"),
            ("PANEL_ALLOWED_ORIGINS", "https://admin.marketplace.pk, http://localhost:5173 ,"),
        ])
        .unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.workers, Some(4));
        assert_eq!(config.backend.url, "https://api.marketplace.pk");
        assert_eq!(config.panel.page_limit, 100);
        assert_eq!(
            config.server.allowed_origins,
            vec!["https://admin.marketplace.pk".to_string(), "http://localhost:5173".to_string()]
        );
    }

    #[test]
    fn test_invalid_values() {
        assert!(load(&[("SERVER_PORT", "eighty")]).is_err());
        assert!(load(&[("PANEL_PAGE_LIMIT", "-1")]).is_err());

        let config = load(&[("BACKEND_URL", "localhost:3000")]).unwrap();
        assert!(config.validate().is_err());

        let config = load(&[("SERVER_PORT", "0")]).unwrap();
        assert!(config.validate().is_err());

        let config = load(&[("PANEL_STATS_INTERVAL", "0")]).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_page_limit_floor() {
        let config = load(&[("PANEL_PAGE_LIMIT", "0")]).unwrap();
        assert_eq!(config.panel.page_limit, 1);
    }
}
