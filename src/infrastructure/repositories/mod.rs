// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod memory_click_event_repo;
pub mod memory_tool_repo;
