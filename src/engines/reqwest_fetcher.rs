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

use crate::config::settings::FetcherSettings;
use crate::engines::traits::{is_reachable_status, FetchOutcome, Fetcher, FetcherError};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, UPGRADE_INSECURE_REQUESTS};
use std::time::Instant;
use tracing::{debug, warn};

/// 基于 reqwest 的抓取器
///
/// 可达性检查用 HEAD，内容抓取用带浏览器请求头的 GET。
/// 超时由客户端自身强制，到期后请求被取消并给出确定的失败结果。
pub struct ReqwestFetcher {
    validate_client: reqwest::Client,
    content_client: reqwest::Client,
}

impl ReqwestFetcher {
    /// 创建新的抓取器
    ///
    /// # 参数
    ///
    /// * `settings` - 抓取器配置（超时与 User-Agent）
    ///
    /// # 返回值
    ///
    /// * `Ok(ReqwestFetcher)` - 抓取器实例
    /// * `Err(FetcherError)` - 客户端构建失败
    pub fn new(settings: &FetcherSettings) -> Result<Self, FetcherError> {
        let validate_client = reqwest::Client::builder()
            .user_agent(settings.validate_user_agent.as_str())
            .timeout(settings.validate_timeout())
            .build()?;

        let content_client = reqwest::Client::builder()
            .user_agent(settings.browser_user_agent.as_str())
            .default_headers(browser_headers())
            .timeout(settings.fetch_timeout())
            .cookie_store(true)
            .build()?;

        Ok(Self {
            validate_client,
            content_client,
        })
    }
}

/// 降低被反爬虫拦截概率的请求头
fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
    headers.insert("dnt", HeaderValue::from_static("1"));
    headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
    headers
}

#[async_trait]
impl Fetcher for ReqwestFetcher {
    async fn validate(&self, url: &str) -> bool {
        match self.validate_client.head(url).send().await {
            Ok(response) => {
                let status = response.status().as_u16();
                let reachable = is_reachable_status(status);
                if !reachable {
                    metrics::counter!("fetcher_failures_total", "op" => "validate").increment(1);
                    warn!("URL validation failed for {}: status {}", url, status);
                }
                reachable
            }
            Err(e) => {
                metrics::counter!("fetcher_failures_total", "op" => "validate").increment(1);
                warn!("URL validation failed for {}: {}", url, e);
                false
            }
        }
    }

    async fn fetch_content(&self, url: &str) -> FetchOutcome {
        let start = Instant::now();
        let response = match self.content_client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                metrics::counter!("fetcher_failures_total", "op" => "fetch").increment(1);
                warn!("Failed to fetch {}: {}", url, e);
                return FetchOutcome::failed();
            }
        };

        let status = response.status();
        debug!("Fetched {}: {}", url, status);

        if !status.is_success() {
            metrics::counter!("fetcher_failures_total", "op" => "fetch").increment(1);
            warn!("Failed to fetch {}: {}", url, status);
            return FetchOutcome::failed();
        }

        match response.text().await {
            Ok(html) => {
                debug!(
                    "Read {} bytes from {} in {}ms",
                    html.len(),
                    url,
                    start.elapsed().as_millis()
                );
                FetchOutcome::success(html)
            }
            Err(e) => {
                metrics::counter!("fetcher_failures_total", "op" => "fetch").increment(1);
                warn!("Failed to read body from {}: {}", url, e);
                FetchOutcome::failed()
            }
        }
    }
}

#[cfg(test)]
#[path = "reqwest_fetcher_test.rs"]
mod tests;
