// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{create_test_app, StubFetcher};
use axum::http::StatusCode;
use serde_json::{json, Value};
use toolmark::domain::models::tool::ClickEvent;
use toolmark::domain::repositories::click_event_repository::ClickEventRepository;
use toolmark::queue::retry_queue::TaskOutcome;

#[tokio::test]
async fn visit_increments_count_and_logs_click_in_background() {
    let mut app = create_test_app(StubFetcher::default());

    let created: Value = app
        .server
        .post("/v1/tools")
        .json(&json!({ "url": "https://figma.com/" }))
        .await
        .json();
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let response = app.server.post(&format!("/v1/tools/{id}/visit")).await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["usageCount"], 1);
    assert_eq!(body["data"]["name"], "Figma");

    // the click is only queued so far
    let stats: Value = app.server.get("/v1/queue/stats").await.json();
    assert_eq!(stats["data"], json!({ "pending": 1, "processing": false }));

    let analytics: Value = app
        .server
        .get("/v1/tools/analytics/clicks")
        .add_query_param("toolId", &id)
        .await
        .json();
    assert_eq!(analytics["data"]["totalClicks"], 0);

    assert_eq!(app.worker.drain_once().await, Some(TaskOutcome::Completed));

    let analytics: Value = app
        .server
        .get("/v1/tools/analytics/clicks")
        .add_query_param("toolId", &id)
        .await
        .json();
    assert_eq!(
        analytics["data"],
        json!({
            "totalClicks": 1,
            "last24Hours": 1,
            "last7Days": 1,
            "last30Days": 1,
        })
    );
}

#[tokio::test]
async fn cleanup_endpoint_schedules_retention_task() {
    let mut app = create_test_app(StubFetcher::default());

    let mut stale = ClickEvent::new(uuid::Uuid::new_v4());
    stale.timestamp = chrono::Utc::now() - chrono::Duration::days(45);
    app.clicks.record(&stale).await.unwrap();
    app.clicks
        .record(&ClickEvent::new(uuid::Uuid::new_v4()))
        .await
        .unwrap();

    let response = app
        .server
        .post("/v1/tools/cleanup/click-events")
        .json(&json!({ "retentionDays": 30 }))
        .await;
    response.assert_status(StatusCode::ACCEPTED);
    let body: Value = response.json();
    assert!(body["taskId"].is_string());

    assert_eq!(app.worker.drain_once().await, Some(TaskOutcome::Completed));
    assert_eq!(app.clicks.count_since(None, None).await.unwrap(), 1);
}

#[tokio::test]
async fn cleanup_without_body_uses_default_retention() {
    let mut app = create_test_app(StubFetcher::default());

    let mut stale = ClickEvent::new(uuid::Uuid::new_v4());
    stale.timestamp = chrono::Utc::now() - chrono::Duration::days(45);
    app.clicks.record(&stale).await.unwrap();

    app.server
        .post("/v1/tools/cleanup/click-events")
        .await
        .assert_status(StatusCode::ACCEPTED);

    assert_eq!(app.worker.drain_once().await, Some(TaskOutcome::Completed));
    // 45 days is inside the 90 day default
    assert_eq!(app.clicks.count_since(None, None).await.unwrap(), 1);
}

#[tokio::test]
async fn cleanup_rejects_out_of_range_retention() {
    let app = create_test_app(StubFetcher::default());
    app.clicks
        .record(&ClickEvent::new(uuid::Uuid::new_v4()))
        .await
        .unwrap();

    for days in [json!(0), json!(-1), json!(366), json!(100_000_000)] {
        app.server
            .post("/v1/tools/cleanup/click-events")
            .json(&json!({ "retentionDays": days }))
            .await
            .assert_status_bad_request();
    }

    let stats: Value = app.server.get("/v1/queue/stats").await.json();
    assert_eq!(stats["data"]["pending"], 0);
    assert_eq!(app.clicks.count_since(None, None).await.unwrap(), 1);
}

#[tokio::test(start_paused = true)]
async fn worker_keeps_draining_after_invalid_cleanup_task() {
    let app = create_test_app(StubFetcher::default());
    app.clicks
        .record(&ClickEvent::new(uuid::Uuid::new_v4()))
        .await
        .unwrap();

    // bypasses the HTTP validation
    app.service.schedule_click_cleanup(Some(100_000_000));
    app.service.schedule_click_cleanup(Some(30));
    let handle = app.worker.spawn(std::time::Duration::from_millis(10));

    tokio::time::sleep(std::time::Duration::from_secs(30)).await;

    assert!(!handle.is_finished());
    let stats = app.service.queue().stats();
    assert_eq!(stats.pending, 0);
    assert!(!stats.processing);
    assert_eq!(app.clicks.count_since(None, None).await.unwrap(), 1);
    handle.abort();
}
