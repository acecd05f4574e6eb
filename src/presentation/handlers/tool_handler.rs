// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Extension, Json, Path, Query},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::application::dto::create_tool_request::CreateToolRequestDto;
use crate::domain::services::tool_service::ToolService;
use crate::presentation::errors::AppError;

/// 创建工具
///
/// 校验请求后执行摄取；只有 URL 不可达或已存在时才拒绝。
pub async fn create_tool(
    Extension(service): Extension<Arc<ToolService>>,
    Json(payload): Json<CreateToolRequestDto>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let (url, overrides) = payload.into_overrides();
    let tool = service.create(&url, overrides).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "data": tool,
        })),
    ))
}

/// 记录一次访问
pub async fn visit_tool(
    Extension(service): Extension<Arc<ToolService>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let summary = service.increment_usage(id).await?;
    Ok(Json(json!({
        "success": true,
        "data": summary,
    })))
}

pub async fn list_categories(
    Extension(service): Extension<Arc<ToolService>>,
) -> impl IntoResponse {
    Json(json!({
        "success": true,
        "data": service.categories(),
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickAnalyticsQuery {
    pub tool_id: Option<Uuid>,
}

/// 点击统计，可通过 `toolId` 过滤
pub async fn click_analytics(
    Extension(service): Extension<Arc<ToolService>>,
    Query(query): Query<ClickAnalyticsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let analytics = service.click_analytics(query.tool_id).await?;
    Ok(Json(json!({
        "success": true,
        "data": analytics,
    })))
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CleanupRequest {
    /// 保留天数，1 到 365
    #[validate(range(min = 1, max = 365))]
    pub retention_days: Option<i64>,
}

/// 安排过期点击清理，立即返回
pub async fn cleanup_click_events(
    Extension(service): Extension<Arc<ToolService>>,
    payload: Option<Json<CleanupRequest>>,
) -> Result<impl IntoResponse, AppError> {
    let request = payload.map(|Json(r)| r).unwrap_or_default();
    request.validate()?;

    let task_id = service.schedule_click_cleanup(request.retention_days);

    Ok((
        StatusCode::ACCEPTED,
        Json(json!({
            "success": true,
            "taskId": task_id,
        })),
    ))
}

pub async fn queue_stats(Extension(service): Extension<Arc<ToolService>>) -> impl IntoResponse {
    Json(json!({
        "success": true,
        "data": service.queue().stats(),
    }))
}
