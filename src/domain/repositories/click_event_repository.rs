// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::tool::ClickEvent;
use crate::domain::repositories::tool_repository::RepositoryError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// 点击事件仓库特质
#[async_trait]
pub trait ClickEventRepository: Send + Sync {
    /// 记录一次点击
    async fn record(&self, event: &ClickEvent) -> Result<(), RepositoryError>;
    /// 统计某时间点之后的点击数，`since` 为空时统计全部
    async fn count_since(
        &self,
        tool_id: Option<Uuid>,
        since: Option<DateTime<Utc>>,
    ) -> Result<u64, RepositoryError>;
    /// 删除早于截止时间的点击，返回删除数量
    async fn delete_before(&self, cutoff: DateTime<Utc>) -> Result<u64, RepositoryError>;
}
