// 平台实体管理服务
// 店铺、医院、教育机构、市场商品和用户的列表、冻结、解冻、删除

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

use super::api_client::{ApiClient, ApiError};
use super::notices::NoticeBoard;
use crate::models::{EntityCommand, EntityKind, ManagedEntity, UserPage};
use crate::utils::{capitalize, non_blank};

/// 实体管理服务
#[derive(Debug, Clone)]
pub struct EntityService {
    api: Arc<ApiClient>,
    notices: NoticeBoard,
}

impl EntityService {
    /// 创建新的实体管理服务
    pub fn new(api: Arc<ApiClient>, notices: NoticeBoard) -> Self {
        Self { api, notices }
    }

    /// 获取某类实体的全部记录
    ///
    /// 响应中缺少列表字段时返回空列表，无法解析的单条记录被跳过
    pub async fn list<T>(&self) -> Result<Vec<T>, ApiError>
    where
        T: ManagedEntity + DeserializeOwned,
    {
        let kind = T::KIND;
        let response: Value = match self.api.get(&kind.collection_path(), &[]).await {
            Ok(response) => response,
            Err(e) => {
                log::error!("Failed to fetch {}: {}", kind.plural(), e);
                self.notices.error(format!("Failed to fetch {}", kind.plural()));
                return Err(e);
            }
        };

        let items = match response {
            Value::Object(mut body) => match body.remove(kind.plural()) {
                Some(Value::Array(items)) => items,
                _ => Vec::new(),
            },
            _ => Vec::new(),
        };

        Ok(items
            .into_iter()
            .filter_map(|item| match serde_json::from_value::<T>(item) {
                Ok(entity) => Some(entity),
                Err(e) => {
                    log::warn!("Skipping malformed {} record: {}", kind.singular(), e);
                    None
                }
            })
            .collect())
    }

    /// 获取并按搜索词过滤 (不区分大小写)
    pub async fn search<T>(&self, query: &str) -> Result<Vec<T>, ApiError>
    where
        T: ManagedEntity + DeserializeOwned,
    {
        let entities = self.list::<T>().await?;
        Ok(entities.into_iter().filter(|e| e.matches(query)).collect())
    }

    /// 分页获取用户，搜索在后台完成
    ///
    /// # Arguments
    /// * `search` - 搜索词 (可选)
    /// * `page` - 页码
    /// * `limit` - 每页数量
    pub async fn list_users(
        &self,
        search: Option<&str>,
        page: u32,
        limit: u32,
    ) -> Result<UserPage, ApiError> {
        let params = [
            ("page", Some(page.max(1).to_string())),
            ("limit", Some(limit.to_string())),
            ("search", non_blank(search).map(str::to_string)),
        ];

        match self.api.get(&EntityKind::User.collection_path(), &params).await {
            Ok(page) => Ok(page),
            Err(e) => {
                log::error!("Failed to load users: {}", e);
                self.notices.error("Failed to load users");
                Err(e)
            }
        }
    }

    /// 执行冻结、解冻或删除
    ///
    /// 成功和失败都会发布一条提示
    pub async fn execute(
        &self,
        kind: EntityKind,
        id: &str,
        command: EntityCommand,
    ) -> Result<(), ApiError> {
        let result: Result<Value, ApiError> = match command {
            EntityCommand::Freeze | EntityCommand::Unfreeze => {
                self.api.put::<Value, Value>(&kind.command_path(id, command), None).await
            }
            EntityCommand::Delete => self.api.delete(&kind.item_path(id)).await,
        };

        match result {
            Ok(_) => {
                self.notices.success(format!(
                    "{} {} successfully",
                    capitalize(kind.singular()),
                    command.past_tense()
                ));
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to {} {} {}: {}", command.as_str(), kind.singular(), id, e);
                self.notices
                    .error(format!("Failed to {} {}", command.as_str(), kind.singular()));
                Err(e)
            }
        }
    }
}
