// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use url::Url;

/// 提取小写主机名，解析失败返回空字符串
pub fn extract_hostname(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_lowercase()))
        .unwrap_or_default()
}

/// 由主机名的二级标签合成首字母大写的名称
///
/// `https://example.org/path` 得到 `Example`；单标签主机直接使用主机名。
pub fn domain_display_name(url: &str) -> String {
    let host = extract_hostname(url);
    let labels: Vec<&str> = host.split('.').collect();
    let label = if labels.len() > 1 {
        labels[labels.len() - 2]
    } else {
        host.as_str()
    };
    capitalize(label)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// 将可能为相对路径的链接解析为绝对URL
///
/// 无法解析时原样保留链接。
pub fn resolve_url(href: &str, base_url: &str) -> String {
    Url::parse(base_url)
        .and_then(|base| base.join(href))
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}
