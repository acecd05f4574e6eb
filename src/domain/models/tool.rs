// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::category::Category;

/// 未指定添加者时使用的默认值
pub const ANONYMOUS_USER: &str = "Anonymous";

/// 从页面或回退表中提取的元数据
///
/// 空字符串表示“缺失”，调用方以字符串是否为空判断。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolMetadata {
    pub name: String,
    pub description: String,
    pub favicon: String,
    pub tags: Vec<String>,
}

/// 调用方显式提供的字段覆盖
///
/// 每个字段独立生效：只提供 `category` 时，其余字段仍由提取结果推导。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolOverrides {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub tags: Option<Vec<String>>,
    pub favicon: Option<String>,
    pub added_by: Option<String>,
}

/// 摄取过程中产生的临时工具记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCandidate {
    pub url: String,
    pub name: String,
    pub description: String,
    pub category: Category,
    pub tags: Vec<String>,
    pub favicon: String,
    pub added_by: String,
}

/// 已持久化的工具
///
/// `url` 在持久化后不可变。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub id: Uuid,
    pub url: String,
    pub name: String,
    pub description: String,
    pub category: Category,
    pub tags: Vec<String>,
    pub favicon: String,
    pub added_by: String,
    pub usage_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Tool {
    /// 由候选记录创建新工具
    pub fn from_candidate(candidate: ToolCandidate) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            url: candidate.url,
            name: candidate.name,
            description: candidate.description,
            category: candidate.category,
            tags: candidate.tags,
            favicon: candidate.favicon,
            added_by: candidate.added_by,
            usage_count: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

/// 工具字段的部分更新，`url` 不在其中
#[derive(Debug, Clone, Default)]
pub struct ToolPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub tags: Option<Vec<String>>,
    pub favicon: Option<String>,
}

/// 使用次数递增后的摘要
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageSummary {
    pub id: Uuid,
    pub name: String,
    pub usage_count: u64,
}

/// 点击事件，由后台队列异步记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickEvent {
    pub id: Uuid,
    pub tool_id: Uuid,
    pub timestamp: DateTime<Utc>,
}

impl ClickEvent {
    pub fn new(tool_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            tool_id,
            timestamp: Utc::now(),
        }
    }
}

/// 点击统计
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickAnalytics {
    pub total_clicks: u64,
    pub last_24_hours: u64,
    pub last_7_days: u64,
    pub last_30_days: u64,
}
