// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::tool::ClickEvent;
use crate::domain::repositories::click_event_repository::ClickEventRepository;
use crate::queue::handlers::{HandlerError, TaskHandler};
use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LogClickPayload {
    tool_id: Uuid,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CleanupPayload {
    retention_days: Option<i64>,
}

/// 记录工具点击事件
pub struct LogClickEventHandler {
    repository: Arc<dyn ClickEventRepository>,
}

impl LogClickEventHandler {
    pub fn new(repository: Arc<dyn ClickEventRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl TaskHandler for LogClickEventHandler {
    async fn handle(&self, payload: &serde_json::Value) -> Result<(), HandlerError> {
        let payload: LogClickPayload = serde_json::from_value(payload.clone())
            .map_err(|e| HandlerError::InvalidPayload(e.to_string()))?;

        self.repository
            .record(&ClickEvent::new(payload.tool_id))
            .await
            .map_err(|e| HandlerError::Failed(e.to_string()))
    }
}

/// 删除超过保留期的点击事件
pub struct CleanupClickEventsHandler {
    repository: Arc<dyn ClickEventRepository>,
    default_retention_days: i64,
}

impl CleanupClickEventsHandler {
    pub fn new(repository: Arc<dyn ClickEventRepository>, default_retention_days: i64) -> Self {
        Self {
            repository,
            default_retention_days,
        }
    }
}

#[async_trait]
impl TaskHandler for CleanupClickEventsHandler {
    async fn handle(&self, payload: &serde_json::Value) -> Result<(), HandlerError> {
        let payload: CleanupPayload = if payload.is_null() {
            CleanupPayload::default()
        } else {
            serde_json::from_value(payload.clone())
                .map_err(|e| HandlerError::InvalidPayload(e.to_string()))?
        };
        let retention_days = payload.retention_days.unwrap_or(self.default_retention_days);
        let cutoff = retention_cutoff(retention_days)?;

        let deleted = self
            .repository
            .delete_before(cutoff)
            .await
            .map_err(|e| HandlerError::Failed(e.to_string()))?;

        info!(
            "Cleaned up {} old click events older than {} days",
            deleted, retention_days
        );
        Ok(())
    }
}

/// 保留天数的允许范围
pub const RETENTION_DAYS_RANGE: std::ops::RangeInclusive<i64> = 1..=365;

/// 由保留天数计算删除截止时间，超出允许范围的值视为无效负载
fn retention_cutoff(retention_days: i64) -> Result<DateTime<Utc>, HandlerError> {
    if !RETENTION_DAYS_RANGE.contains(&retention_days) {
        return Err(HandlerError::InvalidPayload(format!(
            "retentionDays must be between {} and {}, got {}",
            RETENTION_DAYS_RANGE.start(),
            RETENTION_DAYS_RANGE.end(),
            retention_days
        )));
    }

    TimeDelta::try_days(retention_days)
        .and_then(|delta| Utc::now().checked_sub_signed(delta))
        .ok_or_else(|| {
            HandlerError::InvalidPayload(format!("retentionDays out of range: {}", retention_days))
        })
}
