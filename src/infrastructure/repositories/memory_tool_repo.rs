// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::tool::{Tool, ToolPatch};
use crate::domain::repositories::tool_repository::{RepositoryError, ToolRepository};
use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use uuid::Uuid;

/// 基于内存的工具仓库实现
///
/// URL 唯一性通过 `url_index` 的 entry 原子占位保证。
#[derive(Default)]
pub struct InMemoryToolRepository {
    tools: DashMap<Uuid, Tool>,
    url_index: DashMap<String, Uuid>,
}

impl InMemoryToolRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[async_trait]
impl ToolRepository for InMemoryToolRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Tool>, RepositoryError> {
        Ok(self.tools.get(&id).map(|t| t.clone()))
    }

    async fn find_by_url(&self, url: &str) -> Result<Option<Tool>, RepositoryError> {
        Ok(self
            .url_index
            .get(url)
            .and_then(|id| self.tools.get(&*id).map(|t| t.clone())))
    }

    async fn create(&self, tool: &Tool) -> Result<Tool, RepositoryError> {
        match self.url_index.entry(tool.url.clone()) {
            Entry::Occupied(_) => Err(RepositoryError::AlreadyExists(tool.url.clone())),
            Entry::Vacant(slot) => {
                slot.insert(tool.id);
                self.tools.insert(tool.id, tool.clone());
                Ok(tool.clone())
            }
        }
    }

    async fn update(&self, id: Uuid, patch: &ToolPatch) -> Result<Tool, RepositoryError> {
        let mut tool = self.tools.get_mut(&id).ok_or(RepositoryError::NotFound)?;
        if let Some(name) = &patch.name {
            tool.name = name.clone();
        }
        if let Some(description) = &patch.description {
            tool.description = description.clone();
        }
        if let Some(category) = patch.category {
            tool.category = category;
        }
        if let Some(tags) = &patch.tags {
            tool.tags = tags.clone();
        }
        if let Some(favicon) = &patch.favicon {
            tool.favicon = favicon.clone();
        }
        tool.updated_at = Utc::now();
        Ok(tool.clone())
    }

    async fn increment_counter(&self, id: Uuid) -> Result<Tool, RepositoryError> {
        let mut tool = self.tools.get_mut(&id).ok_or(RepositoryError::NotFound)?;
        tool.usage_count += 1;
        Ok(tool.clone())
    }
}
