//! # Engine 模块
//!
//! 轮播编排器，索引状态的唯一拥有者。
//!
//! ## 执行模型
//!
//! ```text
//! handle(input) -> Vec<CarouselEvent>
//! ```
//!
//! 1. 把输入分发给对应的处理函数，处理函数运行到底
//! 2. 依次分发监听器在此期间写入的请求（同样运行到底）
//! 3. 返回执行过程中发出的所有事件
//!
//! `fwd()`、`transition_end()` 等直接调用走同样的流程，但事件只交给
//! `subscribe` 注册的监听器，调用结束后不保留。
//!
//! ## 一次步进
//!
//! ```text
//! commit_step(dir) ── before ──► 变更索引 ──► start ──► … ──► transition_end ──► end
//! ```
//!
//! `moving` 是唯一的互斥标志。手势、跳转、自动轮播都只产生计划，
//! 由编排器决定是否提交。需要"下一帧"再做的事放进帧任务队列，
//! 由宿主的 `Frame` 输入驱动。

use std::collections::VecDeque;
use std::time::Duration;

use tracing::{debug, trace, warn};

use super::layout::{self, SlidePlacement};
use crate::auto_move::{AutoMover, AutoTimer};
use crate::config::{CarouselConfig, GotoConfig};
use crate::easing::TimingFunction;
use crate::error::{CarouselError, CarouselResult};
use crate::event::{CarouselEvent, CarouselListener, EventKind};
use crate::gesture::{GestureController, GestureOutcome};
use crate::goto::{ChainStatus, GotoStepper, PendingGoto};
use crate::input::{AttributeChange, CarouselInput};
use crate::ring::Ring;
use crate::state::{CarouselState, Direction};
use crate::transition::{TransitionParams, TransitionState};

/// 单次处理中最多分发的监听器请求数
///
/// 监听器可能在 `end` 中无条件请求下一步，形成不会停止的请求链。
const MAX_LISTENER_REQUESTS: usize = 64;

/// 等待下一帧执行的任务
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameTask {
    /// 重新启用过渡（两张幻灯片的环绕复位之后）
    RestoreTransition,
    /// 执行跳转链的下一步
    GotoStep,
}

/// 轮播编排器
///
/// # 使用示例
///
/// ```ignore
/// let mut carousel = Carousel::new(5, CarouselConfig::default())?;
///
/// for event in carousel.handle(CarouselInput::Fwd) {
///     // 渲染方根据 event 开始动画...
/// }
///
/// // 动画完成后
/// carousel.handle(CarouselInput::transition_end(None));
/// ```
#[derive(Debug)]
pub struct Carousel {
    ring: Ring,
    state: CarouselState,
    transition: TransitionState,
    gesture: GestureController,
    goto: GotoStepper,
    goto_config: GotoConfig,
    auto: AutoMover,
    frame_tasks: VecDeque<FrameTask>,
    /// 宿主报告的累计时间（毫秒）
    now_ms: u64,
}

impl Carousel {
    /// 创建轮播
    ///
    /// 幻灯片数量为 0、可见数量为 0 或起始索引越界时返回错误。
    /// 配置了自动轮播时立即启动计时器。
    pub fn new(slide_count: usize, config: CarouselConfig) -> CarouselResult<Self> {
        let ring = Ring::new(slide_count, config.visible_count)?;
        config.validate()?;
        if config.start_index > ring.max() {
            return Err(CarouselError::StartIndexOutOfRange {
                index: config.start_index,
                max: ring.max(),
            });
        }

        let state = CarouselState::new(&ring, config.start_index);
        let mut carousel = Self {
            ring,
            state,
            transition: TransitionState::new(config.duration_ms, config.timing_function),
            gesture: GestureController::new(),
            goto: GotoStepper::new(),
            goto_config: config.goto,
            auto: AutoMover::new(config.auto),
            frame_tasks: VecDeque::new(),
            now_ms: 0,
        };

        if !carousel.ring.is_static() {
            carousel.auto.start(carousel.now_ms, false);
        }

        debug!(
            slides = slide_count,
            visible = carousel.ring.visible_count(),
            cur = carousel.state.cur,
            "carousel created"
        );
        Ok(carousel)
    }

    // ========== 查询 ==========

    pub fn ring(&self) -> &Ring {
        &self.ring
    }

    /// 当前索引状态（可序列化，供检查器展示）
    pub fn state(&self) -> &CarouselState {
        &self.state
    }

    pub fn params(&self) -> &TransitionParams {
        self.transition.params()
    }

    pub fn is_moving(&self) -> bool {
        self.transition.is_moving()
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_active()
    }

    pub fn pending_goto(&self) -> Option<&PendingGoto> {
        self.goto.pending()
    }

    pub fn auto_timer(&self) -> Option<&AutoTimer> {
        self.auto.timer()
    }

    /// 累计时间（毫秒）
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// 是否有等待下一帧执行的任务
    pub fn has_frame_tasks(&self) -> bool {
        !self.frame_tasks.is_empty()
    }

    /// 当前摆放
    pub fn layout(&self) -> Vec<SlidePlacement> {
        layout::compute(&self.ring, &self.state, self.transition.is_moving())
    }

    // ========== 事件 ==========

    /// 注册监听器
    pub fn subscribe(&mut self, listener: impl CarouselListener + 'static) {
        self.transition.subscribe(Box::new(listener));
    }

    /// 处理一个输入并返回期间发出的事件
    pub fn handle(&mut self, input: CarouselInput) -> Vec<CarouselEvent> {
        self.dispatch(input);
        self.drain_requests();
        self.transition.take_events()
    }

    // ========== 公开操作 ==========
    //
    // 直接调用的操作不返回事件，事件只交给监听器。

    /// 后退一张，返回是否提交了步进
    pub fn back(&mut self) -> bool {
        let committed = self.request_step(Direction::Back);
        self.finish_direct();
        committed
    }

    /// 前进一张，返回是否提交了步进
    pub fn fwd(&mut self) -> bool {
        let committed = self.request_step(Direction::Fwd);
        self.finish_direct();
        committed
    }

    /// 跳转到指定索引，返回是否开始了跳转
    ///
    /// 目标越界、等于当前索引或过渡进行中时不做任何事。
    pub fn goto_index(&mut self, index: usize) -> bool {
        let started = self.request_goto(index);
        self.finish_direct();
        started
    }

    pub fn drag_start(&mut self, x: f32) {
        self.on_drag_start(x);
        self.finish_direct();
    }

    pub fn drag_move(&mut self, x: f32) {
        self.on_drag_move(x);
        self.finish_direct();
    }

    pub fn drag_end(&mut self, x: f32) {
        self.on_drag_end(x);
        self.finish_direct();
    }

    pub fn drag_cancel(&mut self) {
        self.on_drag_cancel();
        self.finish_direct();
    }

    pub fn pointer_enter(&mut self) {
        self.on_pointer_enter();
        self.finish_direct();
    }

    pub fn pointer_leave(&mut self) {
        self.on_pointer_leave();
        self.finish_direct();
    }

    /// 渲染方报告过渡完成
    ///
    /// `slide` 为报告完成的幻灯片，只有锚点幻灯片的报告会结束过渡。
    pub fn transition_end(&mut self, slide: Option<usize>) {
        self.on_transition_end(slide);
        self.finish_direct();
    }

    /// 下一帧回调
    pub fn frame(&mut self) {
        self.on_frame();
        self.finish_direct();
    }

    /// 报告时间流逝
    pub fn advance(&mut self, elapsed: Duration) {
        self.on_tick(u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX));
        self.finish_direct();
    }

    /// 声明式属性变化
    pub fn set_attribute(&mut self, change: AttributeChange) {
        self.on_attribute(change);
        self.finish_direct();
    }

    // ========== 分发 ==========

    fn dispatch(&mut self, input: CarouselInput) {
        trace!(?input, "dispatch");
        match input {
            CarouselInput::Back => {
                self.request_step(Direction::Back);
            }
            CarouselInput::Fwd => {
                self.request_step(Direction::Fwd);
            }
            CarouselInput::Goto { index } => {
                self.request_goto(index);
            }
            CarouselInput::DragStart { x } => self.on_drag_start(x),
            CarouselInput::DragMove { x } => self.on_drag_move(x),
            CarouselInput::DragEnd { x } => self.on_drag_end(x),
            CarouselInput::DragCancel => self.on_drag_cancel(),
            CarouselInput::PointerEnter => self.on_pointer_enter(),
            CarouselInput::PointerLeave => self.on_pointer_leave(),
            CarouselInput::TransitionEnd { slide } => self.on_transition_end(slide),
            CarouselInput::Frame => self.on_frame(),
            CarouselInput::Tick { elapsed_ms } => self.on_tick(elapsed_ms),
            CarouselInput::Attribute { change } => self.on_attribute(change),
        }
    }

    /// 直接调用结束：分发请求后丢弃发件箱
    fn finish_direct(&mut self) {
        self.drain_requests();
        self.transition.take_events();
    }

    /// 依次分发监听器写入的请求
    fn drain_requests(&mut self) {
        let mut dispatched = 0;
        while let Some(request) = self.transition.next_request() {
            if dispatched == MAX_LISTENER_REQUESTS {
                warn!(limit = MAX_LISTENER_REQUESTS, "监听器请求过多，丢弃剩余请求");
                self.transition.clear_requests();
                break;
            }
            dispatched += 1;
            self.dispatch(request);
        }
    }

    // ========== 步进 ==========

    /// 用户发起的单步：放弃跳转链后提交
    fn request_step(&mut self, dir: Direction) -> bool {
        self.abandon_goto();
        self.commit_step(dir)
    }

    /// 提交一次步进
    ///
    /// 所有步进（按钮、手势、跳转链、自动轮播）都经过这里。
    fn commit_step(&mut self, dir: Direction) -> bool {
        if self.ring.is_static() {
            trace!(%dir, "只有一张幻灯片，忽略步进");
            return false;
        }
        if self.transition.is_moving() {
            trace!(%dir, "过渡进行中，忽略步进");
            return false;
        }

        self.flush_transition_restore();
        self.interrupt_gesture();

        self.state.dir = dir;
        if !self.transition.begin_move(&self.state) {
            return false;
        }
        self.auto.on_before();

        self.state.advance(&self.ring);
        debug!(
            %dir,
            prev = self.state.prev,
            cur = self.state.cur,
            next = self.state.next,
            "step committed"
        );
        self.transition.emit_start(&self.state);
        true
    }

    fn on_transition_end(&mut self, slide: Option<usize>) {
        if !self.transition.is_moving() {
            trace!(?slide, "不在过渡中，忽略完成通知");
            return;
        }
        if let Some(slide) = slide
            && slide != self.state.cur
        {
            trace!(slide, cur = self.state.cur, "非锚点幻灯片的完成通知，忽略");
            return;
        }

        // 两张幻灯片时 prev == next，共享的那张需要无动画地换到另一侧
        let wrap_reset = self.ring.max() == 1;
        if wrap_reset {
            self.transition.set_transition_enabled(false, &self.state);
        }
        self.transition.end_move(&self.state);
        debug!(cur = self.state.cur, "transition finished");
        if wrap_reset {
            self.frame_tasks.push_back(FrameTask::RestoreTransition);
        }

        self.auto.on_end(self.now_ms);

        match self.goto.on_end(self.state.cur) {
            ChainStatus::Continue => self.frame_tasks.push_back(FrameTask::GotoStep),
            ChainStatus::Arrived => debug!(cur = self.state.cur, "goto arrived"),
            ChainStatus::Idle => {}
        }
    }

    fn on_frame(&mut self) {
        let tasks: Vec<FrameTask> = self.frame_tasks.drain(..).collect();
        for task in tasks {
            match task {
                FrameTask::RestoreTransition => self.restore_transition(),
                FrameTask::GotoStep => {
                    self.goto_step();
                }
            }
        }
    }

    /// 提前执行尚未到帧的过渡恢复
    fn flush_transition_restore(&mut self) {
        let pending = self.frame_tasks.len();
        self.frame_tasks
            .retain(|task| *task != FrameTask::RestoreTransition);
        if self.frame_tasks.len() != pending {
            self.restore_transition();
        }
    }

    fn restore_transition(&mut self) {
        if !self.transition.params().transition_enabled {
            self.transition.set_transition_enabled(true, &self.state);
        }
    }

    // ========== 跳转 ==========

    fn request_goto(&mut self, index: usize) -> bool {
        self.abandon_goto();

        if index > self.ring.max() {
            debug!(index, max = self.ring.max(), "跳转目标越界，忽略");
            return false;
        }
        if self.transition.is_moving() {
            trace!(index, "过渡进行中，忽略跳转");
            return false;
        }
        if index == self.state.cur {
            return false;
        }

        let dir = self.goto.begin(self.state.cur, index);
        debug!(from = self.state.cur, target = index, %dir, "goto started");
        self.goto_step()
    }

    /// 执行跳转链的一步
    ///
    /// 中间步骤使用固定的快速线性过渡；最后一步使用缓出曲线与默认时长。
    fn goto_step(&mut self) -> bool {
        let Some(hop) = self.goto.next_hop(&self.ring, self.state.cur) else {
            self.goto.abandon();
            return false;
        };
        if self.transition.is_moving() {
            return false;
        }

        if hop.is_final {
            let duration_ms = self.transition.default_duration_ms();
            self.transition.set_duration(duration_ms, &self.state);
            self.transition
                .set_timing_function(self.goto_config.final_timing, &self.state);
        } else {
            self.transition
                .set_duration(self.goto_config.step_duration_ms, &self.state);
            self.transition
                .set_timing_function(self.goto_config.step_timing, &self.state);
        }

        let committed = self.commit_step(hop.dir);
        if !committed {
            self.goto.abandon();
        }
        committed
    }

    fn abandon_goto(&mut self) {
        if let Some(pending) = self.goto.abandon() {
            debug!(target = pending.target, "跳转链被新的请求取代");
            self.frame_tasks.retain(|task| *task != FrameTask::GotoStep);
        }
    }

    // ========== 手势 ==========

    fn on_drag_start(&mut self, x: f32) {
        if self.ring.is_static() {
            return;
        }
        if self.transition.is_moving() {
            trace!(x, "过渡进行中，忽略拖拽");
            return;
        }

        self.abandon_goto();
        self.flush_transition_restore();
        self.interrupt_gesture();

        if self.gesture.begin(x, false) {
            self.transition.set_transition_enabled(false, &self.state);
        }
    }

    fn on_drag_move(&mut self, x: f32) {
        if let GestureOutcome::Preview { delta, dir } = self.gesture.update(x) {
            self.state.dir = dir;
            self.state.offset_px = delta;
            self.transition.emit(EventKind::Drag, &self.state);
        }
    }

    fn on_drag_end(&mut self, x: f32) {
        if let GestureOutcome::Finished {
            reset_offset,
            commit,
        } = self.gesture.end(x)
        {
            self.finish_gesture(reset_offset);
            if let Some(dir) = commit {
                debug!(%dir, "gesture committed");
                self.request_step(dir);
            }
        }
    }

    fn on_drag_cancel(&mut self) {
        if let GestureOutcome::Finished { reset_offset, .. } = self.gesture.cancel() {
            self.finish_gesture(reset_offset);
        }
    }

    /// 步进打断进行中的拖拽
    fn interrupt_gesture(&mut self) {
        if let GestureOutcome::Finished { reset_offset, .. } = self.gesture.cancel() {
            debug!("拖拽被步进打断");
            self.finish_gesture(reset_offset);
        }
    }

    /// 会话结束：重新启用过渡，必要时把预览位移归零
    fn finish_gesture(&mut self, reset_offset: bool) {
        self.transition.set_transition_enabled(true, &self.state);
        if reset_offset {
            self.state.offset_px = 0.0;
            self.transition.emit(EventKind::Drag, &self.state);
        }
    }

    // ========== 自动轮播 ==========

    fn on_pointer_enter(&mut self) {
        self.auto.pointer_enter();
    }

    fn on_pointer_leave(&mut self) {
        let blocked = self.transition.is_moving() || self.ring.is_static();
        self.auto.pointer_leave(self.now_ms, blocked);
    }

    fn on_tick(&mut self, elapsed_ms: u64) {
        self.now_ms = self.now_ms.saturating_add(elapsed_ms);
        if !self.auto.poll(self.now_ms) {
            return;
        }
        // 过渡结束时会重新启动计时器
        if self.transition.is_moving() || self.ring.is_static() {
            return;
        }
        if self.gesture.is_active() || self.goto.is_pending() {
            trace!("用户交互进行中，自动步进顺延");
            self.auto.start(self.now_ms, false);
            return;
        }

        let auto = self.auto.config().clone();
        if let Some(duration_ms) = auto.duration_ms {
            self.transition.set_duration(duration_ms, &self.state);
        }
        if let Some(timing) = auto.timing_function {
            self.transition.set_timing_function(timing, &self.state);
        }
        debug!(dir = %auto.direction, now_ms = self.now_ms, "auto step");
        self.commit_step(auto.direction);
    }

    // ========== 属性 ==========

    fn on_attribute(&mut self, change: AttributeChange) {
        match change {
            AttributeChange::Index(index) => {
                self.request_goto(index);
            }
            AttributeChange::Duration(duration_ms) => {
                self.transition.configure_duration(duration_ms, &self.state);
            }
            AttributeChange::TimingFunction(name) => match name.parse::<TimingFunction>() {
                Ok(timing) => self.transition.configure_timing_function(timing, &self.state),
                Err(e) => warn!(error = %e, "忽略无效的缓动函数属性"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::config::AutoMoveConfig;

    fn carousel(slides: usize) -> Carousel {
        Carousel::new(slides, CarouselConfig::default()).unwrap()
    }

    fn starting_at(slides: usize, start_index: usize) -> Carousel {
        Carousel::new(
            slides,
            CarouselConfig {
                start_index,
                ..CarouselConfig::default()
            },
        )
        .unwrap()
    }

    fn kinds(events: &[CarouselEvent]) -> Vec<EventKind> {
        events.iter().map(|e| e.kind).collect()
    }

    /// 一直推进到没有过渡、没有帧任务为止
    fn settle(carousel: &mut Carousel) -> Vec<CarouselEvent> {
        let mut events = Vec::new();
        for _ in 0..100 {
            if carousel.is_moving() {
                events.extend(carousel.handle(CarouselInput::transition_end(None)));
            } else if carousel.has_frame_tasks() {
                events.extend(carousel.handle(CarouselInput::Frame));
            } else {
                break;
            }
        }
        events
    }

    #[test]
    fn test_construction_errors() {
        assert_eq!(
            Carousel::new(0, CarouselConfig::default()).unwrap_err(),
            CarouselError::EmptyRing
        );
        assert_eq!(
            Carousel::new(
                3,
                CarouselConfig {
                    start_index: 3,
                    ..CarouselConfig::default()
                }
            )
            .unwrap_err(),
            CarouselError::StartIndexOutOfRange { index: 3, max: 2 }
        );
        assert!(matches!(
            Carousel::new(
                3,
                CarouselConfig {
                    visible_count: 0,
                    ..CarouselConfig::default()
                }
            ),
            Err(CarouselError::InvalidVisibleCount { visible_count: 0 })
        ));
    }

    #[test]
    fn test_step_forward_event_order() {
        let mut carousel = starting_at(5, 2);
        assert_eq!(carousel.ring().len(), 5);

        let events = carousel.handle(CarouselInput::Fwd);
        assert_eq!(kinds(&events), vec![EventKind::Before, EventKind::Start]);
        // before 时索引尚未变更
        assert_eq!(events[0].data.cur, 2);
        assert_eq!(
            (events[1].data.prev, events[1].data.cur, events[1].data.next),
            (2, 3, 4)
        );

        let events = carousel.handle(CarouselInput::transition_end(None));
        assert_eq!(kinds(&events), vec![EventKind::End]);
        assert!(!carousel.is_moving());
    }

    #[test]
    fn test_step_back_wraps() {
        let mut carousel = carousel(5);
        carousel.back();
        let state = carousel.state();
        assert_eq!((state.prev, state.cur, state.next), (3, 4, 0));
        assert_eq!(state.dir, Direction::Back);
    }

    #[test]
    fn test_step_rejected_while_moving() {
        let mut carousel = carousel(5);
        assert!(carousel.fwd());

        assert!(!carousel.fwd());
        assert!(!carousel.back());
        assert!(!carousel.goto_index(3));
        for input in [CarouselInput::Fwd, CarouselInput::Back, CarouselInput::goto(3)] {
            assert!(carousel.handle(input).is_empty());
        }
        assert_eq!(carousel.state().cur, 1);
    }

    #[test]
    fn test_static_ring_never_moves() {
        let mut carousel = carousel(1);
        assert!(!carousel.fwd());
        assert!(!carousel.back());
        assert!(!carousel.goto_index(1));
        carousel.drag_start(0.0);
        let events = carousel.handle(CarouselInput::DragEnd { x: 50.0 });

        assert!(events.is_empty());
        assert!(!carousel.is_moving());
        assert_eq!(carousel.state().cur, 0);
    }

    #[test]
    fn test_foreign_transition_end_is_ignored() {
        let mut carousel = carousel(5);
        carousel.fwd();
        carousel.transition_end(Some(0));
        assert!(carousel.is_moving());

        carousel.transition_end(Some(1));
        assert!(!carousel.is_moving());

        // 不在过渡中的通知没有效果
        assert!(carousel.handle(CarouselInput::transition_end(None)).is_empty());
    }

    #[test]
    fn test_goto_chain_timing() {
        let mut carousel = starting_at(6, 1);
        let mut events = carousel.handle(CarouselInput::goto(4));
        assert!(carousel.is_moving());
        events.extend(settle(&mut carousel));

        let starts: Vec<_> = events
            .iter()
            .filter(|e| e.kind == EventKind::Start)
            .map(|e| (e.data.cur, e.data.duration_ms, e.data.timing_function))
            .collect();
        assert_eq!(
            starts,
            vec![
                (2, 120, TimingFunction::Linear),
                (3, 120, TimingFunction::Linear),
                (4, 500, TimingFunction::EaseOut),
            ]
        );
        let ends = events.iter().filter(|e| e.kind == EventKind::End).count();
        assert_eq!(ends, 3);

        assert_eq!(carousel.state().cur, 4);
        assert!(carousel.pending_goto().is_none());
        // 结束后恢复默认参数
        assert_eq!(carousel.params().duration_ms, 500);
        assert_eq!(carousel.params().timing_function, TimingFunction::Ease);
    }

    #[test]
    fn test_goto_invalid_targets() {
        let mut carousel = starting_at(4, 2);
        assert!(!carousel.goto_index(2));
        assert!(!carousel.goto_index(4));
        assert!(carousel.handle(CarouselInput::goto(4)).is_empty());
        assert!(carousel.pending_goto().is_none());
    }

    #[test]
    fn test_goto_superseded_by_step() {
        let mut carousel = carousel(6);
        carousel.goto_index(4);
        carousel.transition_end(None);
        assert!(carousel.has_frame_tasks());

        // 新的请求放弃跳转链，之后的帧不再继续
        assert!(carousel.back());
        assert!(carousel.pending_goto().is_none());
        carousel.transition_end(None);
        carousel.frame();

        assert!(!carousel.is_moving());
        assert_eq!(carousel.state().cur, 0);
    }

    #[test]
    fn test_goto_abandoned_by_rejected_request() {
        let mut carousel = carousel(6);
        carousel.goto_index(3);
        // 过渡中的请求被拒绝，但仍然放弃跳转链；进行中的一步照常完成
        assert!(!carousel.fwd());
        let events = settle(&mut carousel);

        assert_eq!(carousel.state().cur, 1);
        assert_eq!(kinds(&events).last(), Some(&EventKind::End));
    }

    #[test]
    fn test_drag_commits_back() {
        let mut carousel = starting_at(5, 2);
        let mut events = carousel.handle(CarouselInput::DragStart { x: 100.0 });
        events.extend(carousel.handle(CarouselInput::DragMove { x: 140.0 }));
        assert_eq!(carousel.state().offset_px, 40.0);
        assert!(!carousel.params().transition_enabled);

        events.extend(carousel.handle(CarouselInput::DragEnd { x: 140.0 }));
        assert!(carousel.is_moving());
        assert_eq!(carousel.state().cur, 1);
        assert_eq!(carousel.state().offset_px, 0.0);
        assert!(carousel.params().transition_enabled);

        assert_eq!(
            kinds(&events),
            vec![
                EventKind::Change,
                EventKind::Drag,
                EventKind::Change,
                EventKind::Drag,
                EventKind::Before,
                EventKind::Start,
            ]
        );
    }

    #[test]
    fn test_drag_without_displacement_commits_nothing() {
        let mut carousel = carousel(5);
        carousel.drag_start(100.0);
        carousel.drag_end(100.0);

        assert!(!carousel.is_moving());
        assert_eq!(carousel.state().cur, 0);
        assert!(carousel.params().transition_enabled);
    }

    #[test]
    fn test_drag_ignored_while_moving() {
        let mut carousel = carousel(5);
        carousel.fwd();
        carousel.drag_start(0.0);
        assert!(!carousel.is_dragging());
        carousel.drag_move(-80.0);
        assert_eq!(carousel.state().offset_px, 0.0);
    }

    #[test]
    fn test_drag_cancel_restores_resting_state() {
        let mut carousel = carousel(5);
        carousel.drag_start(0.0);
        carousel.drag_move(-30.0);
        carousel.drag_cancel();

        assert!(!carousel.is_dragging());
        assert!(!carousel.is_moving());
        assert_eq!(carousel.state().offset_px, 0.0);
        assert!(carousel.params().transition_enabled);
    }

    #[test]
    fn test_two_slide_wrap_reset() {
        let mut carousel = carousel(2);
        carousel.fwd();

        let events = carousel.handle(CarouselInput::transition_end(None));
        assert_eq!(kinds(&events), vec![EventKind::Change, EventKind::End]);
        assert!(!events[0].data.transition_enabled);
        assert!(!carousel.params().transition_enabled);

        let events = carousel.handle(CarouselInput::Frame);
        assert_eq!(kinds(&events), vec![EventKind::Change]);
        assert!(carousel.params().transition_enabled);
    }

    #[test]
    fn test_step_before_frame_flushes_restore() {
        let mut carousel = carousel(2);
        carousel.fwd();
        carousel.transition_end(None);

        let events = carousel.handle(CarouselInput::Fwd);
        assert_eq!(carousel.state().cur, 0);
        assert_eq!(
            kinds(&events),
            vec![EventKind::Change, EventKind::Before, EventKind::Start]
        );
        assert!(events[2].data.transition_enabled);
        assert!(!carousel.has_frame_tasks());
    }

    #[test]
    fn test_auto_step_fires_once() {
        let mut carousel = Carousel::new(
            4,
            CarouselConfig {
                auto: AutoMoveConfig::every(1000),
                ..CarouselConfig::default()
            },
        )
        .unwrap();

        carousel.advance(Duration::from_millis(999));
        assert!(!carousel.is_moving());

        carousel.advance(Duration::from_millis(1));
        assert!(carousel.is_moving());
        assert_eq!(carousel.state().cur, 1);
        assert!(carousel.auto_timer().is_none());

        // end 重新启动计时器
        carousel.transition_end(None);
        assert_eq!(carousel.auto_timer().unwrap().deadline_ms, 2000);
    }

    #[test]
    fn test_manual_step_cancels_auto_timer() {
        let mut carousel = Carousel::new(
            4,
            CarouselConfig {
                auto: AutoMoveConfig::every(1000),
                ..CarouselConfig::default()
            },
        )
        .unwrap();

        carousel.advance(Duration::from_millis(400));
        carousel.fwd();
        assert!(carousel.auto_timer().is_none());

        // 原截止时间不会触发
        carousel.advance(Duration::from_millis(600));
        assert_eq!(carousel.state().cur, 1);

        carousel.transition_end(None);
        assert_eq!(carousel.auto_timer().unwrap().deadline_ms, 2000);
    }

    #[test]
    fn test_auto_overrides_and_direction() {
        let mut carousel = Carousel::new(
            4,
            CarouselConfig {
                auto: AutoMoveConfig {
                    duration_ms: Some(900),
                    timing_function: Some(TimingFunction::Linear),
                    direction: Direction::Back,
                    ..AutoMoveConfig::every(100)
                },
                ..CarouselConfig::default()
            },
        )
        .unwrap();

        let events = carousel.handle(CarouselInput::tick(100));
        let start = events.iter().find(|e| e.kind == EventKind::Start).unwrap();
        assert_eq!(start.data.cur, 3);
        assert_eq!(start.data.duration_ms, 900);
        assert_eq!(start.data.timing_function, TimingFunction::Linear);
    }

    #[test]
    fn test_hover_pauses_auto() {
        let mut carousel = Carousel::new(
            4,
            CarouselConfig {
                auto: AutoMoveConfig::every(100),
                ..CarouselConfig::default()
            },
        )
        .unwrap();

        carousel.pointer_enter();
        carousel.advance(Duration::from_millis(500));
        assert!(!carousel.is_moving());

        carousel.pointer_leave();
        carousel.advance(Duration::from_millis(100));
        assert!(carousel.is_moving());
    }

    #[test]
    fn test_listener_request_in_before_is_rejected() {
        let mut carousel = carousel(5);
        carousel.subscribe(|event: &CarouselEvent, requests: &mut Vec<CarouselInput>| {
            if event.kind == EventKind::Before {
                requests.push(CarouselInput::goto(3));
            }
        });

        let events = carousel.handle(CarouselInput::Fwd);
        assert_eq!(carousel.state().cur, 1);
        assert!(carousel.pending_goto().is_none());
        assert_eq!(kinds(&events), vec![EventKind::Before, EventKind::Start]);
    }

    #[test]
    fn test_listener_request_after_end_runs() {
        let mut carousel = carousel(5);
        let seen = Rc::new(RefCell::new(0));
        let counter = seen.clone();
        carousel.subscribe(move |event: &CarouselEvent, requests: &mut Vec<CarouselInput>| {
            if event.kind == EventKind::End && *counter.borrow() == 0 {
                *counter.borrow_mut() += 1;
                requests.push(CarouselInput::Fwd);
            }
        });

        carousel.fwd();
        carousel.transition_end(None);
        assert_eq!(*seen.borrow(), 1);
        assert!(carousel.is_moving());
        assert_eq!(carousel.state().cur, 2);
    }

    #[test]
    fn test_runaway_listener_requests_are_capped() {
        let mut carousel = carousel(5);
        carousel.subscribe(|event: &CarouselEvent, requests: &mut Vec<CarouselInput>| {
            if event.kind == EventKind::Change {
                requests.push(CarouselInput::attribute(AttributeChange::Duration(300)));
            }
        });

        let changes = carousel
            .handle(CarouselInput::attribute(AttributeChange::Duration(300)))
            .len();
        assert_eq!(changes, MAX_LISTENER_REQUESTS + 1);
    }

    #[test]
    fn test_attribute_changes() {
        let mut carousel = carousel(5);

        let mut events = Vec::new();
        for change in [
            AttributeChange::Duration(250),
            AttributeChange::TimingFunction("ease-in".to_string()),
            AttributeChange::TimingFunction("bouncy".to_string()),
        ] {
            events.extend(carousel.handle(CarouselInput::attribute(change)));
        }
        assert_eq!(carousel.params().duration_ms, 250);
        assert_eq!(carousel.params().timing_function, TimingFunction::EaseIn);
        assert_eq!(events.len(), 2);

        carousel.set_attribute(AttributeChange::Index(1));
        assert!(carousel.is_moving());
        settle(&mut carousel);
        assert_eq!(carousel.state().cur, 1);
        // 新的默认值在跳转后依然生效
        assert_eq!(carousel.params().duration_ms, 250);
    }

    #[test]
    fn test_layout_follows_state() {
        let mut carousel = carousel(5);
        carousel.drag_start(0.0);
        carousel.drag_move(-20.0);

        let layout = carousel.layout();
        assert_eq!(layout.len(), 3);
        assert!(layout.iter().all(|p| p.offset_px == -20.0));
    }

    #[test]
    fn test_direct_calls_do_not_retain_events() {
        let mut carousel = carousel(5);
        let seen = Rc::new(RefCell::new(0usize));
        let counter = seen.clone();
        carousel.subscribe(move |_: &CarouselEvent, _: &mut Vec<CarouselInput>| {
            *counter.borrow_mut() += 1;
        });

        for _ in 0..10_000 {
            carousel.fwd();
            carousel.transition_end(None);
        }

        // 每一轮 before、start、end 都送到了监听器
        assert_eq!(*seen.borrow(), 30_000);
        assert!(carousel.transition.take_events().is_empty());
        assert!(carousel.handle(CarouselInput::Frame).is_empty());
    }

    #[test]
    fn test_huge_auto_interval_saturates_deadline() {
        let mut carousel = Carousel::new(
            4,
            CarouselConfig {
                auto: AutoMoveConfig::every(u64::MAX),
                ..CarouselConfig::default()
            },
        )
        .unwrap();

        carousel.advance(Duration::from_millis(1));
        carousel.fwd();
        carousel.transition_end(None);

        assert_eq!(carousel.auto_timer().unwrap().deadline_ms, u64::MAX);
        carousel.advance(Duration::from_millis(1000));
        assert!(!carousel.is_moving());
        assert_eq!(carousel.state().cur, 1);
    }

    #[test]
    fn test_saturated_clock_restarts_timer() {
        let mut carousel = Carousel::new(
            4,
            CarouselConfig {
                auto: AutoMoveConfig::every(1000),
                ..CarouselConfig::default()
            },
        )
        .unwrap();

        // 时钟饱和时计时器到期，自动步进一次
        let events = carousel.handle(CarouselInput::tick(u64::MAX));
        assert!(events.iter().any(|e| e.kind == EventKind::Start));
        assert_eq!(carousel.now_ms(), u64::MAX);

        carousel.handle(CarouselInput::transition_end(None));
        assert_eq!(carousel.auto_timer().unwrap().deadline_ms, u64::MAX);
        carousel.handle(CarouselInput::tick(u64::MAX));
        assert_eq!(carousel.now_ms(), u64::MAX);
    }
}
