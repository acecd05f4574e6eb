// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{create_test_app, StubFetcher};
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use toolmark::presentation::routes;
use tower::util::ServiceExt;

/// 健康检查测试
///
/// 验证健康检查端点是否正常工作
#[tokio::test]
async fn health_check_works() {
    let app = create_test_app(StubFetcher::default());
    let router = routes::routes(app.service.clone());

    let response = router
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn version_reports_package_version() {
    let app = create_test_app(StubFetcher::default());

    let response = app.server.get("/v1/version").await;
    response.assert_status_ok();
    response.assert_text(env!("CARGO_PKG_VERSION"));
}
