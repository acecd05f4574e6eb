// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型
///
/// 工具、分类、点击事件以及后台重试任务
pub mod category;
pub mod retry_task;
pub mod tool;
