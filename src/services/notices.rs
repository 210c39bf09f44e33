// 操作提示通道
// 保存面板上待显示的成功/错误提示，容量有限，满时丢弃最旧的提示

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// 提示级别
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// 一条提示
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub at: DateTime<Utc>,
}

/// 提示队列，克隆后共享同一队列
#[derive(Debug, Clone)]
pub struct NoticeBoard {
    notices: Arc<Mutex<VecDeque<Notice>>>,
    capacity: usize,
}

impl NoticeBoard {
    /// 创建指定容量的提示队列 (容量至少为1)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            notices: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    /// 发布成功提示
    pub fn success(&self, message: impl Into<String>) {
        let message = message.into();
        log::info!("{}", message);
        self.push(NoticeLevel::Success, message);
    }

    /// 发布错误提示
    pub fn error(&self, message: impl Into<String>) {
        self.push(NoticeLevel::Error, message.into());
    }

    fn push(&self, level: NoticeLevel, message: String) {
        let mut notices = match self.notices.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if notices.len() >= self.capacity {
            notices.pop_front();
        }
        notices.push_back(Notice {
            level,
            message,
            at: Utc::now(),
        });
    }

    /// 取出全部待显示提示
    pub fn drain(&self) -> Vec<Notice> {
        match self.notices.lock() {
            Ok(mut guard) => guard.drain(..).collect(),
            Err(poisoned) => poisoned.into_inner().drain(..).collect(),
        }
    }

    /// 查看待显示提示 (不取出)
    pub fn snapshot(&self) -> Vec<Notice> {
        match self.notices.lock() {
            Ok(guard) => guard.iter().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().iter().cloned().collect(),
        }
    }
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::new(50)
    }
}
