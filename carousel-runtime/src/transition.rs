//! # Transition 模块
//!
//! 过渡参数与生命周期事件的唯一来源。
//!
//! ## 状态转换
//!
//! ```text
//! idle ──begin_move()──► moving ──end_move()──► idle
//!        emit before              恢复默认参数
//!        (调用方变更索引)          emit end
//!        emit_start()
//! ```
//!
//! `moving` 期间再次调用 `begin_move()` 会被拒绝，不产生任何事件。

use crate::easing::TimingFunction;
use crate::event::{CarouselEvent, CarouselListener, EventBus, EventData, EventKind};
use crate::input::CarouselInput;
use crate::state::CarouselState;

/// 过渡参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionParams {
    /// 当前生效的过渡时长（毫秒）
    pub duration_ms: u32,
    /// 当前生效的缓动函数
    pub timing_function: TimingFunction,
    /// 为 false 时位置变化必须立即生效，不播放动画
    pub transition_enabled: bool,
}

impl TransitionParams {
    pub fn new(duration_ms: u32, timing_function: TimingFunction) -> Self {
        Self {
            duration_ms,
            timing_function,
            transition_enabled: true,
        }
    }
}

/// 过渡状态
#[derive(Debug)]
pub struct TransitionState {
    params: TransitionParams,
    default_duration_ms: u32,
    default_timing: TimingFunction,
    moving: bool,
    bus: EventBus,
}

impl TransitionState {
    /// 以组件级默认值创建
    pub fn new(duration_ms: u32, timing_function: TimingFunction) -> Self {
        Self {
            params: TransitionParams::new(duration_ms, timing_function),
            default_duration_ms: duration_ms,
            default_timing: timing_function,
            moving: false,
            bus: EventBus::default(),
        }
    }

    pub fn params(&self) -> &TransitionParams {
        &self.params
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn default_duration_ms(&self) -> u32 {
        self.default_duration_ms
    }

    pub fn default_timing(&self) -> TimingFunction {
        self.default_timing
    }

    // ========== 参数设置 ==========

    /// 设置过渡时长并发出 `change`
    pub fn set_duration(&mut self, duration_ms: u32, at: &CarouselState) {
        self.params.duration_ms = duration_ms;
        self.emit(EventKind::Change, at);
    }

    /// 设置缓动函数并发出 `change`
    pub fn set_timing_function(&mut self, timing: TimingFunction, at: &CarouselState) {
        self.params.timing_function = timing;
        self.emit(EventKind::Change, at);
    }

    /// 启用/禁用过渡并发出 `change`
    pub fn set_transition_enabled(&mut self, enabled: bool, at: &CarouselState) {
        self.params.transition_enabled = enabled;
        self.emit(EventKind::Change, at);
    }

    /// 同时修改组件级默认时长与当前时长
    pub fn configure_duration(&mut self, duration_ms: u32, at: &CarouselState) {
        self.default_duration_ms = duration_ms;
        self.set_duration(duration_ms, at);
    }

    /// 同时修改组件级默认缓动与当前缓动
    pub fn configure_timing_function(&mut self, timing: TimingFunction, at: &CarouselState) {
        self.default_timing = timing;
        self.set_timing_function(timing, at);
    }

    // ========== 生命周期 ==========

    /// 开始一次过渡
    ///
    /// 已在过渡中时返回 `false`，不产生事件。
    /// 成功时发出 `before`，此时索引尚未变更。
    pub fn begin_move(&mut self, at: &CarouselState) -> bool {
        if self.moving {
            return false;
        }
        self.moving = true;
        self.emit(EventKind::Before, at);
        true
    }

    /// 索引变更后发出 `start`
    pub fn emit_start(&mut self, at: &CarouselState) {
        debug_assert!(self.moving, "start emitted outside of a move");
        self.emit(EventKind::Start, at);
    }

    /// 结束当前过渡
    ///
    /// 不在过渡中时返回 `false`。成功时恢复默认时长与缓动，
    /// 仅当参数确实变化时发出 `change`，最后发出 `end`。
    pub fn end_move(&mut self, at: &CarouselState) -> bool {
        if !self.moving {
            return false;
        }
        self.moving = false;

        let restored = self.params.duration_ms != self.default_duration_ms
            || self.params.timing_function != self.default_timing;
        if restored {
            self.params.duration_ms = self.default_duration_ms;
            self.params.timing_function = self.default_timing;
            self.emit(EventKind::Change, at);
        }

        self.emit(EventKind::End, at);
        true
    }

    // ========== 事件 ==========

    pub(crate) fn emit(&mut self, kind: EventKind, at: &CarouselState) {
        let event = CarouselEvent {
            kind,
            data: EventData::capture(at, &self.params),
        };
        self.bus.emit(event);
    }

    pub(crate) fn subscribe(&mut self, listener: Box<dyn CarouselListener>) {
        self.bus.subscribe(listener);
    }

    pub(crate) fn take_events(&mut self) -> Vec<CarouselEvent> {
        self.bus.take_events()
    }

    pub(crate) fn next_request(&mut self) -> Option<CarouselInput> {
        self.bus.next_request()
    }

    pub(crate) fn clear_requests(&mut self) {
        self.bus.clear_requests();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ring::Ring;

    fn setup() -> (TransitionState, CarouselState) {
        let ring = Ring::new(4, 1).unwrap();
        (
            TransitionState::new(400, TimingFunction::Ease),
            CarouselState::new(&ring, 0),
        )
    }

    fn kinds(events: &[CarouselEvent]) -> Vec<EventKind> {
        events.iter().map(|e| e.kind).collect()
    }

    #[test]
    fn test_setters_emit_change_with_snapshot() {
        let (mut transition, state) = setup();

        transition.set_duration(120, &state);
        transition.set_timing_function(TimingFunction::Linear, &state);
        transition.set_transition_enabled(false, &state);

        let events = transition.take_events();
        assert_eq!(kinds(&events), vec![EventKind::Change; 3]);
        assert_eq!(events[0].data.duration_ms, 120);
        assert_eq!(events[1].data.timing_function, TimingFunction::Linear);
        assert!(!events[2].data.transition_enabled);
        // 快照包含之前的修改
        assert_eq!(events[2].data.duration_ms, 120);
    }

    #[test]
    fn test_second_begin_is_rejected() {
        let (mut transition, state) = setup();

        assert!(transition.begin_move(&state));
        transition.emit_start(&state);
        assert!(!transition.begin_move(&state));
        assert!(transition.is_moving());

        let events = transition.take_events();
        assert_eq!(kinds(&events), vec![EventKind::Before, EventKind::Start]);
    }

    #[test]
    fn test_end_without_move_is_rejected() {
        let (mut transition, state) = setup();
        assert!(!transition.end_move(&state));
        assert!(transition.take_events().is_empty());
    }

    #[test]
    fn test_end_restores_defaults() {
        let (mut transition, state) = setup();

        transition.begin_move(&state);
        transition.set_duration(100, &state);
        transition.set_timing_function(TimingFunction::Linear, &state);
        transition.emit_start(&state);
        transition.take_events();

        assert!(transition.end_move(&state));
        assert!(!transition.is_moving());
        assert_eq!(transition.params().duration_ms, 400);
        assert_eq!(transition.params().timing_function, TimingFunction::Ease);

        let events = transition.take_events();
        assert_eq!(kinds(&events), vec![EventKind::Change, EventKind::End]);
    }

    #[test]
    fn test_end_without_overrides_emits_only_end() {
        let (mut transition, state) = setup();
        transition.begin_move(&state);
        transition.emit_start(&state);
        transition.take_events();

        transition.end_move(&state);
        assert_eq!(kinds(&transition.take_events()), vec![EventKind::End]);
    }

    #[test]
    fn test_configure_changes_defaults() {
        let (mut transition, state) = setup();
        transition.configure_duration(250, &state);
        transition.configure_timing_function(TimingFunction::EaseInOut, &state);

        transition.begin_move(&state);
        transition.set_duration(50, &state);
        transition.end_move(&state);

        assert_eq!(transition.params().duration_ms, 250);
        assert_eq!(transition.params().timing_function, TimingFunction::EaseInOut);
        assert_eq!(transition.default_duration_ms(), 250);
    }
}
