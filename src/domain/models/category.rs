// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// 工具分类
///
/// 封闭的九个分类标签。声明顺序即优先级顺序：
/// 域名匹配和关键词打分平局时都以靠前者为准。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Development & Technical")]
    DevelopmentTechnical,
    #[serde(rename = "Data & Analytics")]
    DataAnalytics,
    #[serde(rename = "Business & Productivity")]
    BusinessProductivity,
    #[serde(rename = "Communication & Chat")]
    CommunicationChat,
    #[serde(rename = "Creative & Media")]
    CreativeMedia,
    #[serde(rename = "Content & Writing")]
    ContentWriting,
    #[serde(rename = "SEO & Marketing")]
    SeoMarketing,
    #[serde(rename = "Entertainment")]
    Entertainment,
    #[serde(rename = "AI Tools")]
    AiTools,
}

/// 无法识别的分类标签
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl Category {
    /// 按声明顺序排列的全部分类
    pub const ALL: [Category; 9] = [
        Category::DevelopmentTechnical,
        Category::DataAnalytics,
        Category::BusinessProductivity,
        Category::CommunicationChat,
        Category::CreativeMedia,
        Category::ContentWriting,
        Category::SeoMarketing,
        Category::Entertainment,
        Category::AiTools,
    ];

    /// 关键词打分全部为零时使用的默认分类
    pub const DEFAULT: Category = Category::AiTools;

    /// 分类的展示标签
    pub fn label(&self) -> &'static str {
        match self {
            Category::DevelopmentTechnical => "Development & Technical",
            Category::DataAnalytics => "Data & Analytics",
            Category::BusinessProductivity => "Business & Productivity",
            Category::CommunicationChat => "Communication & Chat",
            Category::CreativeMedia => "Creative & Media",
            Category::ContentWriting => "Content & Writing",
            Category::SeoMarketing => "SEO & Marketing",
            Category::Entertainment => "Entertainment",
            Category::AiTools => "AI Tools",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.label() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
