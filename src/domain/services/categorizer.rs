// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::category::Category;
use crate::domain::models::tool::ToolMetadata;
use crate::utils::url_utils::extract_hostname;
use once_cell::sync::Lazy;
use std::sync::Arc;
use tracing::debug;

/// 单个分类的匹配规则
#[derive(Debug, Clone)]
pub struct CategoryRule {
    pub category: Category,
    /// 主机名子串
    pub domains: Vec<String>,
    /// 小写关键词
    pub keywords: Vec<String>,
}

impl CategoryRule {
    fn new(category: Category, domains: &[&str], keywords: &[&str]) -> Self {
        Self {
            category,
            domains: domains.iter().map(|d| d.to_string()).collect(),
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }
}

/// 分类规则表
///
/// 启动时加载一次，之后只读。规则总是按分类声明顺序排列。
#[derive(Debug, Clone)]
pub struct CategoryRules {
    rules: Vec<CategoryRule>,
}

impl CategoryRules {
    pub fn new(mut rules: Vec<CategoryRule>) -> Self {
        rules.sort_by_key(|r| Category::ALL.iter().position(|c| *c == r.category));
        Self { rules }
    }

    /// 内置规则表
    pub fn builtin() -> Arc<CategoryRules> {
        BUILTIN_RULES.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryRule> {
        self.rules.iter()
    }
}

static BUILTIN_RULES: Lazy<Arc<CategoryRules>> = Lazy::new(|| {
    Arc::new(CategoryRules::new(vec![
        CategoryRule::new(
            Category::DevelopmentTechnical,
            &[
                "github.com",
                "stackoverflow.com",
                "codepen.io",
                "replit.com",
                "vercel.com",
                "netlify.com",
                "heroku.com",
                "docker.com",
            ],
            &[
                "code",
                "programming",
                "developer",
                "api",
                "github",
                "deployment",
                "hosting",
                "database",
                "framework",
                "library",
                "tools",
                "ide",
            ],
        ),
        CategoryRule::new(
            Category::DataAnalytics,
            &[
                "tableau.com",
                "powerbi.microsoft.com",
                "analytics.google.com",
                "mixpanel.com",
                "amplitude.com",
                "segment.com",
            ],
            &[
                "analytics",
                "data",
                "dashboard",
                "visualization",
                "metrics",
                "tracking",
                "insights",
                "reporting",
                "statistics",
            ],
        ),
        CategoryRule::new(
            Category::BusinessProductivity,
            &[
                "notion.so",
                "airtable.com",
                "monday.com",
                "asana.com",
                "trello.com",
                "slack.com",
                "zoom.us",
                "calendly.com",
            ],
            &[
                "productivity",
                "project",
                "management",
                "collaboration",
                "workspace",
                "organization",
                "planning",
                "calendar",
                "meeting",
                "task",
            ],
        ),
        CategoryRule::new(
            Category::CommunicationChat,
            &[
                "discord.com",
                "telegram.org",
                "whatsapp.com",
                "messenger.com",
                "teams.microsoft.com",
                "meet.google.com",
            ],
            &[
                "chat",
                "messaging",
                "communication",
                "video",
                "call",
                "meeting",
                "conference",
                "social",
                "community",
            ],
        ),
        CategoryRule::new(
            Category::CreativeMedia,
            &[
                "figma.com",
                "canva.com",
                "adobe.com",
                "unsplash.com",
                "pexels.com",
                "dribbble.com",
                "behance.net",
            ],
            &[
                "design",
                "creative",
                "art",
                "photo",
                "image",
                "video",
                "graphics",
                "ui",
                "ux",
                "illustration",
                "animation",
            ],
        ),
        CategoryRule::new(
            Category::ContentWriting,
            &[
                "grammarly.com",
                "hemingwayapp.com",
                "medium.com",
                "substack.com",
                "wordpress.com",
                "ghost.org",
            ],
            &[
                "writing",
                "content",
                "blog",
                "editor",
                "grammar",
                "text",
                "document",
                "publishing",
                "cms",
            ],
        ),
        CategoryRule::new(
            Category::SeoMarketing,
            &[
                "semrush.com",
                "ahrefs.com",
                "moz.com",
                "mailchimp.com",
                "hubspot.com",
                "hootsuite.com",
                "buffer.com",
            ],
            &[
                "seo",
                "marketing",
                "email",
                "social media",
                "advertising",
                "analytics",
                "campaign",
                "automation",
                "growth",
            ],
        ),
        CategoryRule::new(
            Category::Entertainment,
            &[
                "spotify.com",
                "netflix.com",
                "youtube.com",
                "twitch.tv",
                "steam.com",
                "epic.games.com",
                "itch.io",
            ],
            &[
                "game",
                "music",
                "movie",
                "entertainment",
                "streaming",
                "media",
                "fun",
                "leisure",
                "hobby",
            ],
        ),
        CategoryRule::new(
            Category::AiTools,
            &[
                "openai.com",
                "anthropic.com",
                "huggingface.co",
                "stability.ai",
                "midjourney.com",
                "replicate.com",
                "runwayml.com",
            ],
            &[
                "ai",
                "artificial intelligence",
                "machine learning",
                "ml",
                "gpt",
                "neural",
                "automation",
                "generate",
                "predict",
            ],
        ),
    ]))
});

/// 分类器
///
/// 全函数：总是返回固定分类集合中的一个成员。
/// 先做域名匹配，命中即返回；否则按关键词命中数打分，平局取声明顺序靠前者，
/// 全零时返回 [`Category::DEFAULT`]。
#[derive(Debug, Clone)]
pub struct Categorizer {
    rules: Arc<CategoryRules>,
}

impl Default for Categorizer {
    fn default() -> Self {
        Self::new(CategoryRules::builtin())
    }
}

impl Categorizer {
    pub fn new(rules: Arc<CategoryRules>) -> Self {
        Self { rules }
    }

    pub fn categorize(&self, url: &str, metadata: &ToolMetadata) -> Category {
        let hostname = extract_hostname(url);

        if let Some(category) = self.match_domain(&hostname) {
            debug!("Categorized {} as {} by domain", url, category);
            return category;
        }

        let haystack = format!("{} {} {}", metadata.name, metadata.description, url).to_lowercase();
        let (category, score) = self.score_keywords(&haystack);
        debug!("Categorized {} as {} by keywords (score {})", url, category, score);
        category
    }

    fn match_domain(&self, hostname: &str) -> Option<Category> {
        if hostname.is_empty() {
            return None;
        }
        self.rules
            .iter()
            .find(|rule| rule.domains.iter().any(|d| hostname.contains(d.as_str())))
            .map(|rule| rule.category)
    }

    fn score_keywords(&self, haystack: &str) -> (Category, usize) {
        let mut best = (Category::DEFAULT, 0);

        for rule in self.rules.iter() {
            let score = rule
                .keywords
                .iter()
                .filter(|k| haystack.contains(k.as_str()))
                .count();

            // strictly greater keeps the earlier category on ties
            if score > best.1 {
                best = (rule.category, score);
            }
        }

        best
    }
}
