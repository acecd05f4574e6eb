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

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// 抓取器构建错误
///
/// 只会在构造阶段出现，请求阶段的错误全部在抓取器内部吸收。
#[derive(Error, Debug)]
pub enum FetcherError {
    /// HTTP 客户端构建失败
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[from] reqwest::Error),
}

/// 内容抓取结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchOutcome {
    /// 页面 HTML，失败时为空
    pub html: String,
    /// 是否成功获取（2xx 且无传输错误）
    pub ok: bool,
}

impl FetchOutcome {
    pub fn success(html: String) -> Self {
        Self { html, ok: true }
    }

    pub fn failed() -> Self {
        Self::default()
    }
}

/// 判断状态码是否视为“可达”
///
/// 403 与 429 通常来自反爬虫防护而非页面不存在。
pub fn is_reachable_status(status: u16) -> bool {
    (200..300).contains(&status) || status == 403 || status == 429
}

/// 抓取器特质
///
/// 两个操作都不会跨越边界抛出错误：超时、DNS、TLS 以及非预期状态码
/// 都被折叠成 `false` 或空结果。抓取器内部不做重试。
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// 轻量的存在性检查
    async fn validate(&self, url: &str) -> bool;

    /// 获取页面内容
    async fn fetch_content(&self, url: &str) -> FetchOutcome;
}

#[async_trait]
impl<T: Fetcher + ?Sized> Fetcher for Arc<T> {
    async fn validate(&self, url: &str) -> bool {
        (**self).validate(url).await
    }

    async fn fetch_content(&self, url: &str) -> FetchOutcome {
        (**self).fetch_content(url).await
    }
}
