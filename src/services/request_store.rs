// 付款请求列表状态
// 每个页面持有一个列表状态: 当前页的规范化请求、过滤条件、分页信息

use serde::Serialize;

use super::notices::NoticeBoard;
use super::payment_request_service::PaymentRequestService;
use crate::models::{
    AdminActionKind, PaymentRequest, RequestQuery, RequestStatus, RequestType, StatusUpdate,
};

/// 仪表盘显示的待审核请求数量
pub const RECENT_PENDING_LIMIT: usize = 5;

/// 单个页面的付款请求列表状态
#[derive(Debug, Clone)]
pub struct RequestStore {
    /// 页面范围: 单一类别，None 表示全部类别 (仪表盘)
    scope: Option<RequestType>,
    /// 最近一次成功加载的请求
    requests: Vec<PaymentRequest>,
    /// 状态过滤，None 表示全部
    status_filter: Option<RequestStatus>,
    search: String,
    page: u32,
    pages: u32,
    limit: u32,
}

/// 列表状态的只读视图
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestView<'a> {
    #[serde(rename = "type")]
    pub scope: Option<RequestType>,
    /// `pending`、`accepted`、`rejected` 或 `all`
    pub status_filter: &'static str,
    pub search: &'a str,
    pub page: u32,
    pub pages: u32,
    pub limit: u32,
    pub requests: Vec<&'a PaymentRequest>,
}

impl RequestStore {
    /// 创建空的列表状态
    ///
    /// # Arguments
    /// * `scope` - 页面所属类别，None 为仪表盘
    /// * `limit` - 每页数量
    pub fn new(scope: Option<RequestType>, limit: u32) -> Self {
        Self {
            scope,
            requests: Vec::new(),
            status_filter: None,
            search: String::new(),
            page: 1,
            pages: 1,
            limit: limit.max(1),
        }
    }

    pub fn scope(&self) -> Option<RequestType> {
        self.scope
    }

    pub fn requests(&self) -> &[PaymentRequest] {
        &self.requests
    }

    pub fn status_filter(&self) -> Option<RequestStatus> {
        self.status_filter
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn pages(&self) -> u32 {
        self.pages
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// 根据当前状态生成后台查询条件
    pub fn query(&self) -> RequestQuery {
        RequestQuery {
            request_type: self.scope,
            status: self.status_filter,
            page: self.page,
            limit: self.limit,
        }
    }

    /// 从后台加载当前页
    ///
    /// 失败时保留原有数据，只发布一条错误提示
    ///
    /// # Returns
    /// * 是否加载成功
    pub async fn load(&mut self, service: &PaymentRequestService, notices: &NoticeBoard) -> bool {
        match service.list(&self.query()).await {
            Ok(page) => {
                self.requests = page.requests;
                self.pages = page.total_pages.max(1);
                if let Some(current) = page.current_page {
                    self.page = current.max(1);
                }
                true
            }
            Err(e) => {
                log::error!("Failed to load payment requests: {}", e);
                notices.error("Failed to load payment requests");
                false
            }
        }
    }

    /// 当前页中符合类别、状态和搜索条件的请求
    pub fn filtered(&self) -> Vec<&PaymentRequest> {
        self.requests
            .iter()
            .filter(|r| self.scope.map_or(true, |t| r.request_type == t))
            .filter(|r| self.status_filter.map_or(true, |s| r.status == s))
            .filter(|r| r.matches_search(&self.search))
            .collect()
    }

    /// 过滤结果中最前面的待审核请求
    pub fn recent_pending(&self, limit: usize) -> Vec<&PaymentRequest> {
        self.filtered()
            .into_iter()
            .filter(|r| r.is_pending())
            .take(limit)
            .collect()
    }

    /// 设置搜索词，内容变化时回到第一页
    pub fn set_search(&mut self, search: &str) {
        if self.search != search {
            self.search = search.to_string();
            self.page = 1;
        }
    }

    /// 设置状态过滤，变化时回到第一页
    pub fn set_status_filter(&mut self, status: Option<RequestStatus>) {
        if self.status_filter != status {
            self.status_filter = status;
            self.page = 1;
        }
    }

    /// 设置每页数量，变化时回到第一页
    pub fn set_limit(&mut self, limit: u32) {
        let limit = limit.max(1);
        if self.limit != limit {
            self.limit = limit;
            self.page = 1;
        }
    }

    /// 跳转页码 (最小为1)
    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    /// 通过付款请求
    ///
    /// 后台确认后才修改本地记录；失败时本地状态不变
    pub async fn accept(
        &mut self,
        service: &PaymentRequestService,
        notices: &NoticeBoard,
        id: &str,
    ) -> bool {
        match service.update_status(id, &StatusUpdate::accept()).await {
            Ok(()) => {
                self.apply_decision(id, AdminActionKind::Accepted, None);
                notices.success("Request verified");
                true
            }
            Err(e) => {
                log::error!("Failed to verify request {}: {}", id, e);
                notices.error("Failed to verify request");
                false
            }
        }
    }

    /// 拒绝付款请求，可附带原因
    pub async fn reject(
        &mut self,
        service: &PaymentRequestService,
        notices: &NoticeBoard,
        id: &str,
        reason: Option<&str>,
    ) -> bool {
        let reason = reason
            .filter(|r| !r.trim().is_empty())
            .map(str::to_string);

        match service.update_status(id, &StatusUpdate::reject(reason.clone())).await {
            Ok(()) => {
                self.apply_decision(id, AdminActionKind::Rejected, reason);
                notices.success("Request rejected");
                true
            }
            Err(e) => {
                log::error!("Failed to reject request {}: {}", id, e);
                notices.error("Failed to reject request");
                false
            }
        }
    }

    fn apply_decision(&mut self, id: &str, action: AdminActionKind, reason: Option<String>) {
        if let Some(request) = self.requests.iter_mut().find(|r| r.id == id) {
            request.record_decision(action, reason);
        }
    }

    /// 生成只读视图
    pub fn view(&self) -> RequestView<'_> {
        RequestView {
            scope: self.scope,
            status_filter: match self.status_filter {
                Some(RequestStatus::Pending) => "pending",
                Some(RequestStatus::Accepted) => "accepted",
                Some(RequestStatus::Rejected) => "rejected",
                None => "all",
            },
            search: &self.search,
            page: self.page,
            pages: self.pages,
            limit: self.limit,
            requests: self.filtered(),
        }
    }
}
