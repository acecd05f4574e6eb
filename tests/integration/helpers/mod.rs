// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use axum_test::TestServer;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use toolmark::domain::services::categorizer::Categorizer;
use toolmark::domain::services::ingestion_service::IngestionService;
use toolmark::domain::services::tool_service::ToolService;
use toolmark::engines::traits::{FetchOutcome, Fetcher};
use toolmark::infrastructure::repositories::memory_click_event_repo::InMemoryClickEventRepository;
use toolmark::infrastructure::repositories::memory_tool_repo::InMemoryToolRepository;
use toolmark::presentation::routes;
use toolmark::queue::handlers::click_events::{CleanupClickEventsHandler, LogClickEventHandler};
use toolmark::queue::handlers::{HandlerRegistry, CLEANUP_OLD_EVENTS, LOG_CLICK_EVENT};
use toolmark::queue::retry_policy::RetryPolicy;
use toolmark::queue::retry_queue::{QueueWorker, RetryQueue};

/// 不访问网络的抓取器
///
/// 未登记页面的 URL 抓取失败；登记为不可达的 URL 校验失败。
#[derive(Default)]
pub struct StubFetcher {
    pages: HashMap<String, String>,
    unreachable: HashSet<String>,
}

impl StubFetcher {
    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    pub fn with_unreachable(mut self, url: &str) -> Self {
        self.unreachable.insert(url.to_string());
        self
    }
}

#[async_trait]
impl Fetcher for StubFetcher {
    async fn validate(&self, url: &str) -> bool {
        !self.unreachable.contains(url)
    }

    async fn fetch_content(&self, url: &str) -> FetchOutcome {
        match self.pages.get(url) {
            Some(html) => FetchOutcome::success(html.clone()),
            None => FetchOutcome::failed(),
        }
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub server: TestServer,
    pub service: Arc<ToolService>,
    pub tools: Arc<InMemoryToolRepository>,
    pub clicks: Arc<InMemoryClickEventRepository>,
    pub worker: QueueWorker,
}

pub fn create_test_app(fetcher: StubFetcher) -> TestApp {
    let fetcher = Arc::new(fetcher);
    let tools = Arc::new(InMemoryToolRepository::new());
    let clicks = Arc::new(InMemoryClickEventRepository::new());

    let registry = HandlerRegistry::new()
        .register(
            LOG_CLICK_EVENT,
            Arc::new(LogClickEventHandler::new(clicks.clone())),
        )
        .register(
            CLEANUP_OLD_EVENTS,
            Arc::new(CleanupClickEventsHandler::new(clicks.clone(), 90)),
        );
    let (queue, worker) = RetryQueue::new(registry, RetryPolicy::default());

    let service = Arc::new(ToolService::new(
        tools.clone(),
        clicks.clone(),
        fetcher.clone(),
        IngestionService::new(fetcher, Categorizer::default()),
        queue,
    ));

    let server = TestServer::new(routes::routes(service.clone())).expect("test server");

    TestApp {
        server,
        service,
        tools,
        clicks,
        worker,
    }
}
