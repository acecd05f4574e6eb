// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 提供领域层接口的具体实现与运行时集成：
/// - 指标（metrics）：安装 Prometheus 导出器
/// - 仓库实现（repositories）：基于内存的工具与点击事件仓库
pub mod metrics;
pub mod repositories;
