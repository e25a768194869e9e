//! # AutoMove 模块
//!
//! 周期性请求单步前进的计时器。
//!
//! ## 设计说明
//!
//! - 任意时刻最多只有一个待触发的计时器，`start()` 总是先清除旧的
//! - 计时器只触发一次；下一次由过渡的 `end` 重新启动
//! - 任何过渡的 `before` 都会立即停止计时器（包括用户发起的步进）
//! - 悬停暂停开启时，悬停期间 `end` 不会重新启动计时器
//!
//! 计时器不读取真实时钟，截止时间以宿主报告的累计毫秒计算。

use tracing::trace;

use crate::config::AutoMoveConfig;

/// 待触发的计时器
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoTimer {
    /// 计时器编号，每次启动递增
    pub id: u64,
    /// 触发时刻（毫秒）
    pub deadline_ms: u64,
}

/// 自动轮播器
#[derive(Debug)]
pub struct AutoMover {
    config: AutoMoveConfig,
    timer: Option<AutoTimer>,
    hovering: bool,
    next_timer_id: u64,
}

impl AutoMover {
    pub fn new(config: AutoMoveConfig) -> Self {
        Self {
            config,
            timer: None,
            hovering: false,
            next_timer_id: 1,
        }
    }

    pub fn config(&self) -> &AutoMoveConfig {
        &self.config
    }

    pub fn timer(&self) -> Option<&AutoTimer> {
        self.timer.as_ref()
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    /// 启动计时器
    ///
    /// 未配置间隔或过渡进行中时不做任何事。否则清除旧计时器后启动新的。
    pub fn start(&mut self, now_ms: u64, moving: bool) -> bool {
        let Some(interval) = self.config.interval_ms else {
            return false;
        };
        if moving {
            return false;
        }

        self.stop();
        let timer = AutoTimer {
            id: self.next_timer_id,
            deadline_ms: now_ms.saturating_add(interval),
        };
        self.next_timer_id += 1;
        trace!(id = timer.id, deadline_ms = timer.deadline_ms, "auto timer armed");
        self.timer = Some(timer);
        true
    }

    /// 停止计时器（幂等）
    pub fn stop(&mut self) -> bool {
        match self.timer.take() {
            Some(timer) => {
                trace!(id = timer.id, "auto timer cleared");
                true
            }
            None => false,
        }
    }

    /// 检查计时器是否到期
    ///
    /// 到期时消耗计时器并返回 `true`。
    pub fn poll(&mut self, now_ms: u64) -> bool {
        match self.timer {
            Some(timer) if timer.deadline_ms <= now_ms => {
                self.timer = None;
                true
            }
            _ => false,
        }
    }

    /// 任意过渡开始
    pub fn on_before(&mut self) {
        self.stop();
    }

    /// 任意过渡结束
    pub fn on_end(&mut self, now_ms: u64) -> bool {
        if self.hovering && self.config.pause_on_hover {
            return false;
        }
        self.start(now_ms, false)
    }

    /// 指针进入
    pub fn pointer_enter(&mut self) {
        self.hovering = true;
        if self.config.pause_on_hover {
            self.stop();
        }
    }

    /// 指针离开
    pub fn pointer_leave(&mut self, now_ms: u64, moving: bool) -> bool {
        self.hovering = false;
        if !self.config.pause_on_hover {
            return false;
        }
        self.start(now_ms, moving)
    }
}
