// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::FetcherSettings;
use crate::engines::reqwest_fetcher::ReqwestFetcher;
use crate::engines::traits::Fetcher;
use axum::{
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::time::Duration;
use tokio::net::TcpListener;

async fn start_test_server() -> String {
    let app = Router::new()
        .route(
            "/page",
            get(|| async {
                Response::builder()
                    .header("content-type", "text/html")
                    .body("<html><head><title>Test Page</title></head></html>".to_string())
                    .unwrap()
            }),
        )
        .route("/forbidden", get(|| async { StatusCode::FORBIDDEN }))
        .route("/limited", get(|| async { StatusCode::TOO_MANY_REQUESTS }))
        .route("/missing", get(|| async { StatusCode::NOT_FOUND }))
        .route(
            "/error",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR.into_response() }),
        )
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                "late"
            }),
        )
        .route(
            "/echo",
            get(|headers: HeaderMap| async move {
                let ua = headers
                    .get("user-agent")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                let accept = headers
                    .get("accept")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                format!("{}\n{}", ua, accept)
            }),
        );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

fn fast_settings() -> FetcherSettings {
    FetcherSettings {
        validate_timeout_secs: 1,
        fetch_timeout_secs: 1,
        ..FetcherSettings::default()
    }
}

#[tokio::test]
async fn test_validate_accepts_success_and_bot_defense_statuses() {
    let server_url = start_test_server().await;
    let fetcher = ReqwestFetcher::new(&fast_settings()).unwrap();

    assert!(fetcher.validate(&format!("{}/page", server_url)).await);
    assert!(fetcher.validate(&format!("{}/forbidden", server_url)).await);
    assert!(fetcher.validate(&format!("{}/limited", server_url)).await);
}

#[tokio::test]
async fn test_validate_rejects_missing_and_server_errors() {
    let server_url = start_test_server().await;
    let fetcher = ReqwestFetcher::new(&fast_settings()).unwrap();

    assert!(!fetcher.validate(&format!("{}/missing", server_url)).await);
    assert!(!fetcher.validate(&format!("{}/error", server_url)).await);
}

#[tokio::test]
async fn test_validate_times_out_as_unreachable() {
    let server_url = start_test_server().await;
    let fetcher = ReqwestFetcher::new(&fast_settings()).unwrap();

    assert!(!fetcher.validate(&format!("{}/slow", server_url)).await);
}

#[tokio::test]
async fn test_validate_connection_refused_is_unreachable() {
    let fetcher = ReqwestFetcher::new(&fast_settings()).unwrap();
    assert!(!fetcher.validate("http://127.0.0.1:1/").await);
}

#[tokio::test]
async fn test_fetch_content_success() {
    let server_url = start_test_server().await;
    let fetcher = ReqwestFetcher::new(&fast_settings()).unwrap();

    let outcome = fetcher.fetch_content(&format!("{}/page", server_url)).await;
    assert!(outcome.ok);
    assert!(outcome.html.contains("<title>Test Page</title>"));
}

#[tokio::test]
async fn test_fetch_content_non_success_is_absorbed() {
    let server_url = start_test_server().await;
    let fetcher = ReqwestFetcher::new(&fast_settings()).unwrap();

    for path in ["/forbidden", "/missing", "/error"] {
        let outcome = fetcher.fetch_content(&format!("{}{}", server_url, path)).await;
        assert!(!outcome.ok, "{} should fail", path);
        assert!(outcome.html.is_empty());
    }
}

#[tokio::test]
async fn test_fetch_content_timeout_is_absorbed() {
    let server_url = start_test_server().await;
    let fetcher = ReqwestFetcher::new(&fast_settings()).unwrap();

    let outcome = fetcher.fetch_content(&format!("{}/slow", server_url)).await;
    assert!(!outcome.ok);
    assert!(outcome.html.is_empty());
}

#[tokio::test]
async fn test_fetch_content_sends_browser_headers() {
    let server_url = start_test_server().await;
    let settings = fast_settings();
    let fetcher = ReqwestFetcher::new(&settings).unwrap();

    let outcome = fetcher.fetch_content(&format!("{}/echo", server_url)).await;
    assert!(outcome.ok);
    let mut lines = outcome.html.lines();
    assert_eq!(lines.next(), Some(settings.browser_user_agent.as_str()));
    assert!(lines.next().unwrap_or_default().starts_with("text/html"));
}
