// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{create_test_app, StubFetcher};
use axum::http::StatusCode;
use serde_json::{json, Value};
use toolmark::domain::models::tool::ToolOverrides;
use toolmark::domain::services::tool_service::ToolServiceError;

const PAGE: &str = r#"
    <html><head>
        <title>Pixel Forge</title>
        <meta name="description" content="Photo and image design studio">
        <link rel="icon" href="/favicon.ico">
    </head></html>
"#;

#[tokio::test]
async fn create_tool_from_live_page() {
    let app = create_test_app(StubFetcher::default().with_page("https://pixelforge.test/", PAGE));

    let response = app
        .server
        .post("/v1/tools")
        .json(&json!({ "url": "https://pixelforge.test/" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    let data = &body["data"];
    assert_eq!(data["name"], "Pixel Forge");
    assert_eq!(data["description"], "Photo and image design studio");
    assert_eq!(data["category"], "Creative & Media");
    assert_eq!(data["favicon"], "https://pixelforge.test/favicon.ico");
    assert_eq!(data["addedBy"], "Anonymous");
    assert_eq!(data["usageCount"], 0);
    assert_eq!(app.tools.len(), 1);
}

#[tokio::test]
async fn create_tool_offline_uses_fallback() {
    let app = create_test_app(StubFetcher::default());

    let response = app
        .server
        .post("/v1/tools")
        .json(&json!({
            "url": "https://spotify.com/",
            "tags": "music, playlists",
            "addedBy": "bob",
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    let data = &body["data"];
    assert_eq!(data["name"], "Spotify");
    assert_eq!(data["category"], "Entertainment");
    assert_eq!(data["tags"], json!(["music", "playlists"]));
    assert_eq!(data["addedBy"], "bob");
}

#[tokio::test]
async fn create_tool_rejects_duplicate() {
    let app = create_test_app(StubFetcher::default());
    let request = json!({ "url": "https://github.com/" });

    app.server
        .post("/v1/tools")
        .json(&request)
        .await
        .assert_status(StatusCode::CREATED);

    let response = app.server.post("/v1/tools").json(&request).await;
    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["error"], "Tool with this URL already exists");
}

#[tokio::test]
async fn create_tool_rejects_unreachable_url() {
    let app = create_test_app(StubFetcher::default().with_unreachable("https://down.test/"));

    let response = app
        .server
        .post("/v1/tools")
        .json(&json!({ "url": "https://down.test/" }))
        .await;

    response.assert_status_bad_request();
    assert!(app.tools.is_empty());
}

#[tokio::test]
async fn create_tool_rejects_invalid_request() {
    let app = create_test_app(StubFetcher::default());

    app.server
        .post("/v1/tools")
        .json(&json!({ "url": "nope" }))
        .await
        .assert_status_bad_request();

    app.server
        .post("/v1/tools")
        .json(&json!({ "url": "https://a.test/", "category": "Gardening" }))
        .await
        .assert_status_bad_request();

    assert!(app.tools.is_empty());
}

#[tokio::test]
async fn concurrent_creates_of_same_url_store_one_tool() {
    let app = create_test_app(StubFetcher::default());

    let (first, second) = futures::future::join(
        app.service
            .create("https://notion.so/", ToolOverrides::default()),
        app.service
            .create("https://notion.so/", ToolOverrides::default()),
    )
    .await;

    let outcomes = [first, second];
    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(outcomes
        .iter()
        .any(|r| matches!(r, Err(ToolServiceError::AlreadyExists))));
    assert_eq!(app.tools.len(), 1);
}

#[tokio::test]
async fn categories_are_listed_in_declared_order() {
    let app = create_test_app(StubFetcher::default());

    let response = app.server.get("/v1/tools/categories").await;
    response.assert_status_ok();
    let body: Value = response.json();
    let categories = body["data"].as_array().unwrap();

    assert_eq!(categories.len(), 9);
    assert_eq!(categories[0], "Development & Technical");
    assert_eq!(categories[8], "AI Tools");
}

#[tokio::test]
async fn visit_unknown_tool_is_not_found() {
    let app = create_test_app(StubFetcher::default());

    let response = app
        .server
        .post("/v1/tools/6f1c1c1e-6a39-4a2b-9d4e-8f2c0b1a2d3e/visit")
        .await;

    response.assert_status_not_found();
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("not found"));
}
