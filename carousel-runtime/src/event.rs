//! # Event 模块
//!
//! 轮播向外部（渲染方、控制按钮、检查器）发出的生命周期事件。
//!
//! ## 事件顺序
//!
//! ```text
//! before ──► (索引变更) ──► start ──► … ──► end
//! ```
//!
//! - `before`：`moving` 已置位、索引尚未变更
//! - `start`：索引已变更，渲染方据此开始动画
//! - `end`：渲染方报告动画完成后发出
//! - `change`：任意过渡参数变化
//! - `drag`：拖拽预览的实时位移变化
//!
//! 每个事件都携带完整的参数快照 [`EventData`]。

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::easing::TimingFunction;
use crate::input::CarouselInput;
use crate::state::{CarouselState, Direction};
use crate::transition::TransitionParams;

/// 事件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Before,
    Start,
    End,
    Change,
    Drag,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Before => "before",
            Self::Start => "start",
            Self::End => "end",
            Self::Change => "change",
            Self::Drag => "drag",
        };
        f.pad(name)
    }
}

/// 事件携带的状态快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventData {
    pub prev: usize,
    pub cur: usize,
    pub next: usize,
    pub dir: Direction,
    pub duration_ms: u32,
    pub timing_function: TimingFunction,
    pub transition_enabled: bool,
    /// 拖拽预览位移（像素）
    pub offset_px: f32,
}

impl EventData {
    /// 从当前状态与过渡参数生成快照
    pub fn capture(state: &CarouselState, params: &TransitionParams) -> Self {
        Self {
            prev: state.prev,
            cur: state.cur,
            next: state.next,
            dir: state.dir,
            duration_ms: params.duration_ms,
            timing_function: params.timing_function,
            transition_enabled: params.transition_enabled,
            offset_px: state.offset_px,
        }
    }
}

/// 生命周期事件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarouselEvent {
    pub kind: EventKind,
    #[serde(flatten)]
    pub data: EventData,
}

impl fmt::Display for CarouselEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = &self.data;
        write!(
            f,
            "{:<6} prev={} cur={} next={} dir={} {}ms {} enabled={}",
            self.kind,
            d.prev,
            d.cur,
            d.next,
            d.dir,
            d.duration_ms,
            d.timing_function,
            d.transition_enabled
        )?;
        if self.kind == EventKind::Drag {
            write!(f, " offset={}px", d.offset_px)?;
        }
        Ok(())
    }
}

/// 事件监听器
///
/// 监听器在事件发出时同步收到通知。监听器不能直接回调轮播，
/// 需要发起操作时把输入写入 `requests`，轮播在当前处理完成后依次分发。
/// 因此在 `before` 中发起的步进请求必然观察到 `moving == true` 而被忽略。
pub trait CarouselListener {
    fn on_event(&mut self, event: &CarouselEvent, requests: &mut Vec<CarouselInput>);
}

impl<F> CarouselListener for F
where
    F: FnMut(&CarouselEvent, &mut Vec<CarouselInput>),
{
    fn on_event(&mut self, event: &CarouselEvent, requests: &mut Vec<CarouselInput>) {
        self(event, requests)
    }
}

/// 事件总线
///
/// 同时维护本次处理的事件队列与已注册的监听器。队列在每次公开调用结束时清空。
#[derive(Default)]
pub(crate) struct EventBus {
    outbox: Vec<CarouselEvent>,
    listeners: Vec<Box<dyn CarouselListener>>,
    requests: VecDeque<CarouselInput>,
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("outbox", &self.outbox.len())
            .field("listeners", &self.listeners.len())
            .field("requests", &self.requests.len())
            .finish()
    }
}

impl EventBus {
    pub(crate) fn subscribe(&mut self, listener: Box<dyn CarouselListener>) {
        self.listeners.push(listener);
    }

    pub(crate) fn emit(&mut self, event: CarouselEvent) {
        trace!(kind = %event.kind, cur = event.data.cur, "emit");
        let mut requests = Vec::new();
        for listener in &mut self.listeners {
            listener.on_event(&event, &mut requests);
        }
        self.requests.extend(requests);
        self.outbox.push(event);
    }

    pub(crate) fn take_events(&mut self) -> Vec<CarouselEvent> {
        std::mem::take(&mut self.outbox)
    }

    pub(crate) fn next_request(&mut self) -> Option<CarouselInput> {
        self.requests.pop_front()
    }

    pub(crate) fn clear_requests(&mut self) {
        self.requests.clear();
    }
}
