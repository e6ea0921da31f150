//! 可取消的周期计时器
//!
//! 每个句柄持有一个 `crossbeam_channel::tick` 接收端，丢弃接收端即停止计时。
//! 事件循环通过 `SessionController::drain_ticks` 取出到期的 tick，
//! 真正修改会话状态的永远是事件循环本身。

use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use log::debug;

/// 一个活动计时器的句柄，drop 时自动停止
#[derive(Debug)]
pub struct TimerHandle {
    id: u64,
    ticks: Option<Receiver<Instant>>,
}

impl TimerHandle {
    pub fn new(id: u64, ticks: Receiver<Instant>) -> Self {
        Self {
            id,
            ticks: Some(ticks),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// 幂等取消
    pub fn cancel(&mut self) {
        if self.ticks.take().is_some() {
            debug!("timer {} cancelled", self.id);
        }
    }

    #[cfg(test)]
    pub fn is_cancelled(&self) -> bool {
        self.ticks.is_none()
    }

    /// 取出所有已到期的 tick，返回数量
    pub fn pending(&self) -> usize {
        self.ticks.as_ref().map_or(0, |rx| rx.try_iter().count())
    }
}

/// 周期任务调度器
pub trait Scheduler {
    fn schedule_repeating(&mut self, period: Duration) -> TimerHandle;
}

/// 基于 `crossbeam_channel::tick` 的调度器
pub struct TickScheduler {
    next_id: u64,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self { next_id: 1 }
    }
}

impl Default for TickScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for TickScheduler {
    fn schedule_repeating(&mut self, period: Duration) -> TimerHandle {
        let handle = TimerHandle::new(self.next_id, crossbeam_channel::tick(period));
        self.next_id += 1;
        debug!("timer {} armed every {:?}", handle.id(), period);
        handle
    }
}
