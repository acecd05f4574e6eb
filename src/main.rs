// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::info;

use toolmark::config::settings::Settings;
use toolmark::domain::repositories::click_event_repository::ClickEventRepository;
use toolmark::domain::services::categorizer::Categorizer;
use toolmark::domain::services::ingestion_service::IngestionService;
use toolmark::domain::services::tool_service::ToolService;
use toolmark::engines::reqwest_fetcher::ReqwestFetcher;
use toolmark::engines::traits::Fetcher;
use toolmark::infrastructure::repositories::memory_click_event_repo::InMemoryClickEventRepository;
use toolmark::infrastructure::repositories::memory_tool_repo::InMemoryToolRepository;
use toolmark::presentation::routes;
use toolmark::queue::handlers::click_events::{CleanupClickEventsHandler, LogClickEventHandler};
use toolmark::queue::handlers::{HandlerRegistry, CLEANUP_OLD_EVENTS, LOG_CLICK_EVENT};
use toolmark::queue::retry_policy::RetryPolicy;
use toolmark::queue::retry_queue::RetryQueue;
use toolmark::utils::telemetry;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting toolmark...");

    // 2. Load configuration
    let settings = Settings::new()?;
    info!("Configuration loaded");

    if settings.metrics.enabled {
        toolmark::infrastructure::metrics::init_metrics(&settings.metrics.listen_addr);
    }

    // 3. Persistence
    let tool_repo = Arc::new(InMemoryToolRepository::new());
    let click_repo: Arc<dyn ClickEventRepository> = Arc::new(InMemoryClickEventRepository::new());

    // 4. Retry queue with its handlers
    let registry = HandlerRegistry::new()
        .register(
            LOG_CLICK_EVENT,
            Arc::new(LogClickEventHandler::new(click_repo.clone())),
        )
        .register(
            CLEANUP_OLD_EVENTS,
            Arc::new(CleanupClickEventsHandler::new(
                click_repo.clone(),
                settings.analytics.click_retention_days,
            )),
        );
    let (queue, worker) = RetryQueue::new(registry, RetryPolicy::from(&settings.queue));
    let _worker_handle = worker.spawn(settings.queue.process_interval());
    info!("Retry queue started");

    // 5. Ingestion pipeline
    let fetcher: Arc<dyn Fetcher> = Arc::new(ReqwestFetcher::new(&settings.fetcher)?);
    let ingestion = IngestionService::new(fetcher.clone(), Categorizer::default());
    let service = Arc::new(ToolService::new(
        tool_repo,
        click_repo,
        fetcher,
        ingestion,
        queue,
    ));

    let app = routes::routes(service).layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
