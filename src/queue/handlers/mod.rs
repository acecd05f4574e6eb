// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::retry_task::RetryTask;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

pub mod click_events;

/// 记录点击事件
pub const LOG_CLICK_EVENT: &str = "log_click_event";
/// 清理过期点击事件
pub const CLEANUP_OLD_EVENTS: &str = "cleanup_old_events";

/// 任务处理错误
///
/// 所有变体都按普通失败处理，进入同一套重试/丢弃流程。
#[derive(Error, Debug)]
pub enum HandlerError {
    /// 没有为该类型注册处理器
    #[error("Unknown task type: {0}")]
    UnknownTaskType(String),
    /// 负载无法解析
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
    /// 处理过程失败
    #[error("Handler failed: {0}")]
    Failed(String),
}

/// 任务处理器特质
///
/// 处理器只读取负载，不得触碰队列状态。
#[async_trait]
pub trait TaskHandler: Send + Sync {
    async fn handle(&self, payload: &serde_json::Value) -> Result<(), HandlerError>;
}

/// 任务类型到处理器的注册表
///
/// 在队列启动前构建完毕，之后只读。
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Arc<dyn TaskHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册处理器，同一类型重复注册时以后者为准
    pub fn register(mut self, task_type: impl Into<String>, handler: Arc<dyn TaskHandler>) -> Self {
        self.handlers.insert(task_type.into(), handler);
        self
    }

    pub fn contains(&self, task_type: &str) -> bool {
        self.handlers.contains_key(task_type)
    }

    /// 将任务分派给对应处理器
    pub async fn dispatch(&self, task: &RetryTask) -> Result<(), HandlerError> {
        let handler = self
            .handlers
            .get(&task.task_type)
            .ok_or_else(|| HandlerError::UnknownTaskType(task.task_type.clone()))?;
        handler.handle(&task.payload).await
    }
}
