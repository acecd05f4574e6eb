// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// 默认最大尝试次数
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// 后台重试任务
///
/// 从入队到成功或永久失败期间由重试队列独占持有，
/// 任务处理器只能读取其负载。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryTask {
    /// 每次入队唯一的标识符
    pub id: Uuid,
    /// 任务类型标签，用于查找处理器
    pub task_type: String,
    /// 不透明的任务负载
    pub payload: serde_json::Value,
    /// 已尝试次数，从 0 开始
    pub attempts: u32,
    /// 最大尝试次数
    pub max_attempts: u32,
    /// 创建时间
    pub created_at: DateTime<Utc>,
}

impl RetryTask {
    /// 创建新任务
    pub fn new(task_type: impl Into<String>, payload: serde_json::Value) -> Self {
        Self::with_max_attempts(task_type, payload, DEFAULT_MAX_ATTEMPTS)
    }

    pub fn with_max_attempts(
        task_type: impl Into<String>,
        payload: serde_json::Value,
        max_attempts: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            task_type: task_type.into(),
            payload,
            attempts: 0,
            max_attempts,
            created_at: Utc::now(),
        }
    }

    /// 开始一次新的尝试，返回当前尝试序号
    pub fn begin_attempt(&mut self) -> u32 {
        self.attempts += 1;
        self.attempts
    }

    /// 失败后是否还能再次尝试
    pub fn can_retry(&self) -> bool {
        self.attempts < self.max_attempts
    }
}

impl fmt::Display for RetryTask {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} ({}, attempt {}/{})",
            self.task_type, self.id, self.attempts, self.max_attempts
        )
    }
}
