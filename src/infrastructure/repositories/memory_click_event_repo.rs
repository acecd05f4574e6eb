// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::tool::ClickEvent;
use crate::domain::repositories::click_event_repository::ClickEventRepository;
use crate::domain::repositories::tool_repository::RepositoryError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

/// 基于内存的点击事件仓库实现
#[derive(Default)]
pub struct InMemoryClickEventRepository {
    events: DashMap<Uuid, ClickEvent>,
}

impl InMemoryClickEventRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClickEventRepository for InMemoryClickEventRepository {
    async fn record(&self, event: &ClickEvent) -> Result<(), RepositoryError> {
        self.events.insert(event.id, event.clone());
        Ok(())
    }

    async fn count_since(
        &self,
        tool_id: Option<Uuid>,
        since: Option<DateTime<Utc>>,
    ) -> Result<u64, RepositoryError> {
        let count = self
            .events
            .iter()
            .filter(|e| tool_id.is_none_or(|id| e.tool_id == id))
            .filter(|e| since.is_none_or(|s| e.timestamp >= s))
            .count();
        Ok(count as u64)
    }

    async fn delete_before(&self, cutoff: DateTime<Utc>) -> Result<u64, RepositoryError> {
        let before = self.events.len();
        self.events.retain(|_, e| e.timestamp >= cutoff);
        Ok((before - self.events.len()) as u64)
    }
}
