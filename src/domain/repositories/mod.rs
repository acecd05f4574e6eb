// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口
///
/// 持久化由外部协作者提供，这里只定义契约
pub mod click_event_repository;
pub mod tool_repository;
