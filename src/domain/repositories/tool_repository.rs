// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::tool::{Tool, ToolPatch};
use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

/// 仓库错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// 记录未找到
    #[error("Record not found")]
    NotFound,
    /// URL 已被占用
    #[error("Record already exists: {0}")]
    AlreadyExists(String),
    /// 存储内部错误
    #[error("Storage error: {0}")]
    Internal(String),
}

/// 工具仓库特质
///
/// 单条记录级别的操作必须是原子的；`create` 负责在并发摄取同一 URL 时
/// 拒绝后到者。
#[async_trait]
pub trait ToolRepository: Send + Sync {
    /// 根据ID查找工具
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Tool>, RepositoryError>;
    /// 根据URL查找工具
    async fn find_by_url(&self, url: &str) -> Result<Option<Tool>, RepositoryError>;
    /// 创建工具
    async fn create(&self, tool: &Tool) -> Result<Tool, RepositoryError>;
    /// 部分更新工具
    async fn update(&self, id: Uuid, patch: &ToolPatch) -> Result<Tool, RepositoryError>;
    /// 使用次数加一
    async fn increment_counter(&self, id: Uuid) -> Result<Tool, RepositoryError>;
}
