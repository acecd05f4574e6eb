// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 抓取器模块
///
/// 有时间上限的网络请求：可达性检查与页面内容获取
pub mod reqwest_fetcher;
pub mod traits;
