// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::tool_service::ToolService;
use crate::presentation::handlers::tool_handler;
use axum::{
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;

/// 创建应用路由
///
/// # 参数
///
/// * `service` - 工具服务
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes(service: Arc<ToolService>) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/v1/version", get(version));

    let tool_routes = Router::new()
        .route("/v1/tools", post(tool_handler::create_tool))
        .route("/v1/tools/{id}/visit", post(tool_handler::visit_tool))
        .route("/v1/tools/categories", get(tool_handler::list_categories))
        .route(
            "/v1/tools/analytics/clicks",
            get(tool_handler::click_analytics),
        )
        .route(
            "/v1/tools/cleanup/click-events",
            post(tool_handler::cleanup_click_events),
        )
        .route("/v1/queue/stats", get(tool_handler::queue_stats))
        .layer(Extension(service));

    Router::new().merge(public_routes).merge(tool_routes)
}

/// 健康检查端点
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
