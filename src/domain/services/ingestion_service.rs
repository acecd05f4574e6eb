// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::tool::{ToolCandidate, ToolMetadata, ToolOverrides, ANONYMOUS_USER};
use crate::domain::services::categorizer::Categorizer;
use crate::domain::services::metadata_extractor::MetadataExtractor;
use crate::engines::traits::Fetcher;
use crate::utils::url_utils::domain_display_name;
use std::sync::Arc;
use tracing::info;

/// 摄取服务
///
/// 抓取 → 提取 → 分类，由一个裸 URL 构建完整的候选记录。
/// 元数据或分类问题不会导致失败，总是返回尽力而为的结果。
pub struct IngestionService {
    fetcher: Arc<dyn Fetcher>,
    categorizer: Categorizer,
}

impl IngestionService {
    pub fn new(fetcher: Arc<dyn Fetcher>, categorizer: Categorizer) -> Self {
        Self {
            fetcher,
            categorizer,
        }
    }

    /// 摄取一个 URL
    ///
    /// 每个字段独立按“调用方覆盖 → 提取值 → 计算默认值”解析。
    /// 空字符串覆盖视为未提供；`tags` 覆盖即使为空也生效。
    ///
    /// # 参数
    ///
    /// * `url` - 已校验格式的绝对 URL
    /// * `overrides` - 调用方提供的字段
    pub async fn ingest(&self, url: &str, overrides: ToolOverrides) -> ToolCandidate {
        let outcome = self.fetcher.fetch_content(url).await;
        let extracted = MetadataExtractor::from_fetch(&outcome, url);

        let name = first_non_empty([overrides.name, Some(extracted.name)])
            .unwrap_or_else(|| domain_display_name(url));
        let description =
            first_non_empty([overrides.description, Some(extracted.description)]).unwrap_or_default();
        let favicon =
            first_non_empty([overrides.favicon, Some(extracted.favicon)]).unwrap_or_default();
        let tags = overrides.tags.unwrap_or(extracted.tags);

        let category = match overrides.category {
            Some(category) => category,
            None => self.categorizer.categorize(
                url,
                &ToolMetadata {
                    name: name.clone(),
                    description: description.clone(),
                    ..ToolMetadata::default()
                },
            ),
        };

        let added_by =
            first_non_empty([overrides.added_by]).unwrap_or_else(|| ANONYMOUS_USER.to_string());

        info!("Ingested {}: name=\"{}\", category={}", url, name, category);

        ToolCandidate {
            url: url.to_string(),
            name,
            description,
            category,
            tags,
            favicon,
            added_by,
        }
    }
}

fn first_non_empty<const N: usize>(candidates: [Option<String>; N]) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .find(|value| !value.is_empty())
}

#[cfg(test)]
#[path = "ingestion_service_test.rs"]
mod tests;
