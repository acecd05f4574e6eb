// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::category::Category;
use crate::domain::models::tool::{ClickAnalytics, Tool, ToolOverrides, ToolPatch, UsageSummary};
use crate::domain::repositories::click_event_repository::ClickEventRepository;
use crate::domain::repositories::tool_repository::{RepositoryError, ToolRepository};
use crate::domain::services::ingestion_service::IngestionService;
use crate::engines::traits::Fetcher;
use crate::queue::handlers::{CLEANUP_OLD_EVENTS, LOG_CLICK_EVENT};
use crate::queue::retry_queue::RetryQueue;
use chrono::{Duration, Utc};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

/// 工具服务错误
#[derive(Error, Debug)]
pub enum ToolServiceError {
    /// URL 已存在
    #[error("Tool with this URL already exists")]
    AlreadyExists,
    /// URL 不可达
    #[error("URL is not reachable: {0}")]
    Unreachable(String),
    /// 工具不存在
    #[error("Tool with ID {0} not found")]
    NotFound(Uuid),
    /// 仓库错误
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// 工具服务
///
/// 组合持久化协作者、抓取器、摄取服务与重试队列。
pub struct ToolService {
    tools: Arc<dyn ToolRepository>,
    clicks: Arc<dyn ClickEventRepository>,
    fetcher: Arc<dyn Fetcher>,
    ingestion: IngestionService,
    queue: RetryQueue,
}

impl ToolService {
    pub fn new(
        tools: Arc<dyn ToolRepository>,
        clicks: Arc<dyn ClickEventRepository>,
        fetcher: Arc<dyn Fetcher>,
        ingestion: IngestionService,
        queue: RetryQueue,
    ) -> Self {
        Self {
            tools,
            clicks,
            fetcher,
            ingestion,
            queue,
        }
    }

    /// 创建工具
    ///
    /// 先查重，再检查可达性，最后摄取并持久化。
    /// 只有 URL 不可达会导致拒绝，元数据问题不会。
    pub async fn create(&self, url: &str, overrides: ToolOverrides) -> Result<Tool, ToolServiceError> {
        if self.tools.find_by_url(url).await?.is_some() {
            return Err(ToolServiceError::AlreadyExists);
        }

        if !self.fetcher.validate(url).await {
            return Err(ToolServiceError::Unreachable(url.to_string()));
        }

        let candidate = self.ingestion.ingest(url, overrides).await;
        let tool = match self.tools.create(&Tool::from_candidate(candidate)).await {
            Ok(tool) => tool,
            // a concurrent ingestion of the same URL won the race
            Err(RepositoryError::AlreadyExists(_)) => return Err(ToolServiceError::AlreadyExists),
            Err(e) => {
                error!("Failed to create tool: {}", e);
                return Err(e.into());
            }
        };

        info!("Tool created: {} ({})", tool.name, tool.url);
        Ok(tool)
    }

    /// 部分更新工具
    pub async fn update(&self, id: Uuid, patch: ToolPatch) -> Result<Tool, ToolServiceError> {
        let tool = self
            .tools
            .update(id, &patch)
            .await
            .map_err(|e| not_found_or(id, e))?;
        info!("Tool updated: {}", tool.name);
        Ok(tool)
    }

    /// 记录一次使用
    ///
    /// 计数同步递增；点击日志交给后台队列，不等待其结果。
    pub async fn increment_usage(&self, id: Uuid) -> Result<UsageSummary, ToolServiceError> {
        let tool = self.tools.increment_counter(id).await.map_err(|e| {
            error!("Failed to increment usage for tool {}: {}", id, e);
            not_found_or(id, e)
        })?;

        self.queue.enqueue(LOG_CLICK_EVENT, json!({ "toolId": id }));

        Ok(UsageSummary {
            id: tool.id,
            name: tool.name,
            usage_count: tool.usage_count,
        })
    }

    /// 全部分类，按声明顺序
    pub fn categories(&self) -> &'static [Category] {
        &Category::ALL
    }

    /// 点击统计，可按工具过滤
    pub async fn click_analytics(
        &self,
        tool_id: Option<Uuid>,
    ) -> Result<ClickAnalytics, ToolServiceError> {
        let now = Utc::now();
        Ok(ClickAnalytics {
            total_clicks: self.clicks.count_since(tool_id, None).await?,
            last_24_hours: self
                .clicks
                .count_since(tool_id, Some(now - Duration::hours(24)))
                .await?,
            last_7_days: self
                .clicks
                .count_since(tool_id, Some(now - Duration::days(7)))
                .await?,
            last_30_days: self
                .clicks
                .count_since(tool_id, Some(now - Duration::days(30)))
                .await?,
        })
    }

    /// 安排一次过期点击清理，返回队列任务ID
    pub fn schedule_click_cleanup(&self, retention_days: Option<i64>) -> Uuid {
        let payload = match retention_days {
            Some(days) => json!({ "retentionDays": days }),
            None => serde_json::Value::Null,
        };
        self.queue.enqueue(CLEANUP_OLD_EVENTS, payload)
    }

    pub fn queue(&self) -> &RetryQueue {
        &self.queue
    }
}

fn not_found_or(id: Uuid, e: RepositoryError) -> ToolServiceError {
    match e {
        RepositoryError::NotFound => ToolServiceError::NotFound(id),
        other => ToolServiceError::Repository(other),
    }
}

#[cfg(test)]
#[path = "tool_service_test.rs"]
mod tests;
