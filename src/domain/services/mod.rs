// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含的服务：
/// - 分类器（categorizer）：按域名与关键词将工具归入固定分类
/// - 元数据提取器（metadata_extractor）：从 HTML 或回退表中得到名称、描述和图标
/// - 摄取服务（ingestion_service）：抓取、提取、分类的编排
/// - 工具服务（tool_service）：创建、使用计数与点击统计
pub mod categorizer;
pub mod ingestion_service;
pub mod metadata_extractor;
pub mod tool_service;
