// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::tool::ToolMetadata;
use crate::engines::traits::FetchOutcome;
use crate::utils::url_utils::{domain_display_name, extract_hostname, resolve_url};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use std::collections::HashMap;
use tracing::{debug, warn};

static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("title").expect("valid selector"));
static OG_TITLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[property="og:title" i]"#).expect("valid selector"));
static DESCRIPTION: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[name="description" i]"#).expect("valid selector"));
static OG_DESCRIPTION: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[property="og:description" i]"#).expect("valid selector"));
static LINK_REL: Lazy<Selector> =
    Lazy::new(|| Selector::parse("link[rel][href]").expect("valid selector"));

const ICON_RELS: [&str; 3] = ["icon", "shortcut icon", "apple-touch-icon"];

struct KnownDomain {
    name: &'static str,
    description: &'static str,
    tags: &'static [&'static str],
}

/// 已知域名的回退元数据，按主机名精确匹配
static KNOWN_DOMAINS: Lazy<HashMap<&'static str, KnownDomain>> = Lazy::new(|| {
    HashMap::from([
        (
            "github.com",
            KnownDomain {
                name: "GitHub",
                description: "Platform for software development and version control",
                tags: &["development", "git", "code"],
            },
        ),
        (
            "openai.com",
            KnownDomain {
                name: "OpenAI",
                description: "AI research company creating safe and beneficial AI",
                tags: &["ai", "gpt", "research"],
            },
        ),
        (
            "figma.com",
            KnownDomain {
                name: "Figma",
                description: "Collaborative design tool for teams",
                tags: &["design", "ui", "collaboration"],
            },
        ),
        (
            "notion.so",
            KnownDomain {
                name: "Notion",
                description: "All-in-one workspace for notes, docs, and collaboration",
                tags: &["productivity", "workspace", "docs"],
            },
        ),
        (
            "canva.com",
            KnownDomain {
                name: "Canva",
                description: "Graphic design platform for creating visual content",
                tags: &["design", "graphics", "templates"],
            },
        ),
        (
            "youtube.com",
            KnownDomain {
                name: "YouTube",
                description: "Video sharing and streaming platform",
                tags: &["video", "streaming", "entertainment"],
            },
        ),
        (
            "spotify.com",
            KnownDomain {
                name: "Spotify",
                description: "Music streaming service",
                tags: &["music", "streaming", "entertainment"],
            },
        ),
        (
            "namecheap.com",
            KnownDomain {
                name: "Namecheap",
                description: "Domain registration and web hosting services",
                tags: &["domains", "hosting", "web"],
            },
        ),
    ])
});

/// 元数据提取器
///
/// 标题依次尝试 `<title>`、`og:title`；描述依次尝试 `name="description"`、
/// `og:description`；图标取第一个 icon 类 `<link>` 并解析为绝对地址。
/// 未找到的字段保持空字符串。
pub struct MetadataExtractor;

impl MetadataExtractor {
    /// 根据抓取结果提取元数据，抓取失败时走回退路径
    pub fn from_fetch(outcome: &FetchOutcome, page_url: &str) -> ToolMetadata {
        if outcome.ok {
            Self::extract(&outcome.html, page_url)
        } else {
            Self::fallback(page_url)
        }
    }

    /// 从 HTML 中提取元数据
    pub fn extract(html: &str, page_url: &str) -> ToolMetadata {
        let document = Html::parse_document(html);

        let name = first_text(&document, &TITLE)
            .or_else(|| first_content(&document, &OG_TITLE))
            .unwrap_or_default();

        let description = first_content(&document, &DESCRIPTION)
            .or_else(|| first_content(&document, &OG_DESCRIPTION))
            .unwrap_or_default();

        let favicon = document
            .select(&LINK_REL)
            .find(|el| {
                el.value()
                    .attr("rel")
                    .map(|rel| rel.trim().to_ascii_lowercase())
                    .is_some_and(|rel| ICON_RELS.contains(&rel.as_str()))
            })
            .and_then(|el| el.value().attr("href"))
            .map(str::trim)
            .filter(|href| !href.is_empty())
            .map(|href| resolve_url(href, page_url))
            .unwrap_or_default();

        debug!("Extracted metadata for {}: name=\"{}\"", page_url, name);

        ToolMetadata {
            name,
            description,
            favicon,
            tags: Vec::new(),
        }
    }

    /// 回退元数据
    ///
    /// 先查已知域名表，未命中则由域名合成；名称总是非空。
    pub fn fallback(url: &str) -> ToolMetadata {
        metrics::counter!("metadata_fallback_total").increment(1);
        let domain = extract_hostname(url);

        if let Some(known) = KNOWN_DOMAINS.get(domain.as_str()) {
            warn!("Using known-domain fallback metadata for {}", url);
            return ToolMetadata {
                name: known.name.to_string(),
                description: known.description.to_string(),
                favicon: String::new(),
                tags: known.tags.iter().map(|t| t.to_string()).collect(),
            };
        }

        warn!("Using synthesized fallback metadata for {}", url);
        let mut name = domain_display_name(url);
        if name.is_empty() {
            name = fallback_name(url);
        }

        ToolMetadata {
            name,
            description: format!("A tool from {}", domain),
            favicon: format!("https://www.google.com/s2/favicons?domain={}&sz=32", domain),
            tags: Vec::new(),
        }
    }
}

/// 主机名无法解析时的最后手段
fn fallback_name(url: &str) -> String {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        "Untitled".to_string()
    } else {
        trimmed.to_string()
    }
}

fn first_text(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

fn first_content(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .filter_map(|el| el.value().attr("content"))
        .map(|s| s.trim().to_string())
        .find(|s| !s.is_empty())
}
