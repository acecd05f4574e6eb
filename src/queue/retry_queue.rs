// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::retry_task::RetryTask;
use crate::queue::handlers::{HandlerError, HandlerRegistry};
use crate::queue::retry_policy::RetryPolicy;
use futures::FutureExt;
use parking_lot::Mutex;
use serde::Serialize;
use std::any::Any;
use std::collections::VecDeque;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// 队列统计
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QueueStats {
    /// 等待执行的任务数
    pub pending: usize,
    /// 是否有任务正在执行
    pub processing: bool,
}

/// 单次消费的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    /// 执行成功，任务被丢弃
    Completed,
    /// 执行失败，延迟后重新插入队首
    Retrying { attempt: u32, delay: Duration },
    /// 重试次数耗尽，任务被永久丢弃
    PermanentlyFailed,
}

/// 进程级队列状态
///
/// 只由队列组件读写：生产者追加到队尾，重试定时器插回队首，
/// 唯一的消费者从队首弹出。
#[derive(Default)]
struct QueueState {
    pending: Mutex<VecDeque<RetryTask>>,
    processing: AtomicBool,
}

impl QueueState {
    fn report_depth(&self, depth: usize) {
        metrics::gauge!("queue_pending_tasks").set(depth as f64);
    }

    fn push_back(&self, task: RetryTask) {
        let mut pending = self.pending.lock();
        pending.push_back(task);
        self.report_depth(pending.len());
    }

    fn push_front(&self, task: RetryTask) {
        let mut pending = self.pending.lock();
        pending.push_front(task);
        self.report_depth(pending.len());
    }

    fn pop_front(&self) -> Option<RetryTask> {
        let mut pending = self.pending.lock();
        let task = pending.pop_front();
        self.report_depth(pending.len());
        task
    }
}

/// 重试队列生产者句柄
///
/// 可廉价克隆。入队立即返回，调用方不等待任务结果。
#[derive(Clone)]
pub struct RetryQueue {
    state: Arc<QueueState>,
    default_max_attempts: u32,
}

impl RetryQueue {
    /// 创建队列及其唯一的消费者
    ///
    /// # 参数
    ///
    /// * `registry` - 任务处理器注册表
    /// * `policy` - 重试策略
    ///
    /// # 返回值
    ///
    /// 生产者句柄与消费者。消费者不可克隆，保证同一时刻最多一个任务在执行。
    pub fn new(registry: HandlerRegistry, policy: RetryPolicy) -> (Self, QueueWorker) {
        let state = Arc::new(QueueState::default());
        let queue = Self {
            state: state.clone(),
            default_max_attempts: policy.max_attempts,
        };
        let worker = QueueWorker {
            state,
            registry: Arc::new(registry),
            policy,
        };
        (queue, worker)
    }

    /// 入队任务，使用默认最大尝试次数
    ///
    /// # 返回值
    ///
    /// 新任务的ID
    pub fn enqueue(&self, task_type: &str, payload: serde_json::Value) -> Uuid {
        self.enqueue_task(RetryTask::with_max_attempts(
            task_type,
            payload,
            self.default_max_attempts,
        ))
    }

    /// 入队一个已构建的任务
    pub fn enqueue_task(&self, task: RetryTask) -> Uuid {
        let id = task.id;
        debug!("Task added to queue: {}", task.task_type);
        metrics::counter!("queue_tasks_enqueued_total").increment(1);
        self.state.push_back(task);
        id
    }

    /// 获取队列统计
    pub fn stats(&self) -> QueueStats {
        QueueStats {
            pending: self.state.pending.lock().len(),
            processing: self.state.processing.load(Ordering::SeqCst),
        }
    }
}

/// 重试队列消费者
///
/// 每个队列只有一个实例；`drain_once` 需要 `&mut self`，执行期间不会有第二个任务开始。
pub struct QueueWorker {
    state: Arc<QueueState>,
    registry: Arc<HandlerRegistry>,
    policy: RetryPolicy,
}

impl QueueWorker {
    /// 在后台按固定周期运行消费循环
    ///
    /// # 参数
    ///
    /// * `period` - 消费周期
    ///
    /// # 返回值
    ///
    /// 返回后台任务的句柄
    pub fn spawn(self, period: Duration) -> JoinHandle<()> {
        tokio::spawn(self.run(period))
    }

    /// 消费循环，每个周期最多执行一个任务
    pub async fn run(mut self, period: Duration) {
        info!("Retry queue consumer started, interval {:?}", period);
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            self.drain_once().await;
        }
    }

    /// 执行一次消费
    ///
    /// # 返回值
    ///
    /// * `Some(TaskOutcome)` - 本次执行的任务结果
    /// * `None` - 队列为空，本周期不做任何事
    pub async fn drain_once(&mut self) -> Option<TaskOutcome> {
        let mut task = self.state.pop_front()?;

        self.state.processing.store(true, Ordering::SeqCst);
        let attempt = task.begin_attempt();
        // a panicking handler counts as a failed attempt
        let result = AssertUnwindSafe(self.registry.dispatch(&task))
            .catch_unwind()
            .await
            .unwrap_or_else(|panic| Err(HandlerError::Failed(panic_message(panic.as_ref()))));
        self.state.processing.store(false, Ordering::SeqCst);

        match result {
            Ok(()) => {
                debug!("Task completed: {}", task);
                metrics::counter!("queue_tasks_completed_total").increment(1);
                Some(TaskOutcome::Completed)
            }
            Err(e) => {
                error!(
                    "Task failed: {} (attempt {}/{}): {}",
                    task.task_type, attempt, task.max_attempts, e
                );

                if task.can_retry() {
                    let delay = self.policy.calculate_backoff(attempt);
                    metrics::counter!("queue_tasks_retried_total").increment(1);
                    self.schedule_retry(task, delay);
                    Some(TaskOutcome::Retrying { attempt, delay })
                } else {
                    metrics::counter!("queue_tasks_failed_total").increment(1);
                    error!("Task permanently failed: {}", task);
                    Some(TaskOutcome::PermanentlyFailed)
                }
            }
        }
    }

    /// 延迟后将任务插回队首
    ///
    /// 重试任务会越过在它之后入队的任务。
    fn schedule_retry(&self, task: RetryTask, delay: Duration) {
        warn!("Retrying {} in {:?}", task, delay);
        let state = self.state.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            state.push_front(task);
        });
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    let message = panic
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());
    format!("handler panicked: {}", message)
}

#[cfg(test)]
#[path = "retry_queue_test.rs"]
mod tests;
