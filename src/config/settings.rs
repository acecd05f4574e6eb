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

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// 应用程序配置设置
///
/// 包含服务器、抓取器、重试队列、点击统计和指标导出等配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 抓取器配置
    pub fetcher: FetcherSettings,
    /// 重试队列配置
    pub queue: QueueSettings,
    /// 点击统计配置
    pub analytics: AnalyticsSettings,
    /// 指标导出配置
    pub metrics: MetricsSettings,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 抓取器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct FetcherSettings {
    /// 可达性检查超时时间（秒）
    pub validate_timeout_secs: u64,
    /// 内容抓取超时时间（秒）
    pub fetch_timeout_secs: u64,
    /// 可达性检查使用的 User-Agent
    pub validate_user_agent: String,
    /// 内容抓取使用的类浏览器 User-Agent
    pub browser_user_agent: String,
}

impl FetcherSettings {
    pub fn validate_timeout(&self) -> Duration {
        Duration::from_secs(self.validate_timeout_secs)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

impl Default for FetcherSettings {
    fn default() -> Self {
        Self {
            validate_timeout_secs: 10,
            fetch_timeout_secs: 15,
            validate_user_agent: "Toolmark/1.0 (+https://toolmark.dev)".to_string(),
            browser_user_agent: "Mozilla/5.0 (compatible; Toolmark/1.0; +https://toolmark.dev)"
                .to_string(),
        }
    }
}

/// 重试队列配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct QueueSettings {
    /// 消费周期（毫秒）
    pub process_interval_ms: u64,
    /// 默认最大尝试次数
    pub max_attempts: u32,
    /// 首次重试退避（毫秒）
    pub initial_backoff_ms: u64,
    /// 退避乘数
    pub backoff_multiplier: f64,
    /// 最大退避（毫秒）
    pub max_backoff_ms: u64,
    /// 是否启用抖动
    pub enable_jitter: bool,
}

impl QueueSettings {
    pub fn process_interval(&self) -> Duration {
        Duration::from_millis(self.process_interval_ms)
    }
}

impl Default for QueueSettings {
    fn default() -> Self {
        Self {
            process_interval_ms: 1000,
            max_attempts: 3,
            initial_backoff_ms: 2000,
            backoff_multiplier: 2.0,
            max_backoff_ms: 60_000,
            enable_jitter: false,
        }
    }
}

/// 点击统计配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsSettings {
    /// 点击事件保留天数
    pub click_retention_days: i64,
}

/// 指标导出配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsSettings {
    /// 是否启用 Prometheus 导出
    pub enabled: bool,
    /// 导出监听地址
    pub listen_addr: String,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次叠加默认值、配置文件和 `TOOLMARK__` 前缀的环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            // Start with default settings
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            // Fetcher budgets
            .set_default("fetcher.validate_timeout_secs", 10)?
            .set_default("fetcher.fetch_timeout_secs", 15)?
            .set_default(
                "fetcher.validate_user_agent",
                FetcherSettings::default().validate_user_agent,
            )?
            .set_default(
                "fetcher.browser_user_agent",
                FetcherSettings::default().browser_user_agent,
            )?
            // Retry queue
            .set_default("queue.process_interval_ms", 1000)?
            .set_default("queue.max_attempts", 3)?
            .set_default("queue.initial_backoff_ms", 2000)?
            .set_default("queue.backoff_multiplier", 2.0)?
            .set_default("queue.max_backoff_ms", 60_000)?
            .set_default("queue.enable_jitter", false)?
            // Click analytics
            .set_default("analytics.click_retention_days", 90)?
            // Metrics exporter
            .set_default("metrics.enabled", true)?
            .set_default("metrics.listen_addr", "0.0.0.0:9000")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("TOOLMARK").separator("__"));

        builder.build()?.try_deserialize()
    }
}
