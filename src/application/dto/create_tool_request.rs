// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::category::Category;
use crate::domain::models::tool::ToolOverrides;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// 标签输入，既接受数组也接受逗号分隔字符串
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum TagsInput {
    List(Vec<String>),
    Csv(String),
}

impl TagsInput {
    pub fn into_tags(self) -> Vec<String> {
        match self {
            TagsInput::List(tags) => tags,
            TagsInput::Csv(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

/// 创建工具请求数据传输对象
#[derive(Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateToolRequestDto {
    /// 工具地址
    #[validate(url, length(max = 2048))]
    pub url: String,
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    /// 分类标签，必须是固定集合中的一个
    #[validate(custom(function = "validate_category"))]
    pub category: Option<String>,
    pub tags: Option<TagsInput>,
    #[validate(url, length(max = 2048))]
    pub favicon: Option<String>,
    #[validate(length(max = 100))]
    pub added_by: Option<String>,
}

impl CreateToolRequestDto {
    /// 转换为摄取覆盖字段
    ///
    /// 调用前应已通过 `validate()`；无法识别的分类按未提供处理。
    pub fn into_overrides(self) -> (String, ToolOverrides) {
        let overrides = ToolOverrides {
            name: self.name,
            description: self.description,
            category: self.category.and_then(|c| c.parse::<Category>().ok()),
            tags: self.tags.map(TagsInput::into_tags),
            favicon: self.favicon,
            added_by: self.added_by,
        };
        (self.url, overrides)
    }
}

fn validate_category(category: &str) -> Result<(), ValidationError> {
    category
        .parse::<Category>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("unknown_category"))
}
