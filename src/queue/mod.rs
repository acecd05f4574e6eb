// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 队列模块
///
/// 进程内的后台重试队列：非阻塞入队，单消费者按固定周期执行，
/// 失败任务按指数退避重试
pub mod handlers;
pub mod retry_policy;
pub mod retry_queue;
