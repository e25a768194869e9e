//! # Gesture 模块
//!
//! 把一次线性拖拽转换为实时预览位移，并在松开时提交一次步进或取消。
//!
//! 控制器只计算结果，不修改轮播状态；由编排器根据 [`GestureOutcome`]
//! 切换过渡开关、更新位移并提交步进。

use crate::state::Direction;

/// 一次拖拽会话
///
/// 只存在于按下与抬起/取消之间。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSession {
    /// 按下时的横坐标
    pub start_x: f32,
    /// 是否显示过非零预览位移
    pub moved: bool,
}

/// 拖拽处理结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureOutcome {
    /// 没有会话或位移为 0，不做任何事
    Ignored,
    /// 更新实时预览
    Preview { delta: f32, dir: Direction },
    /// 会话结束
    ///
    /// `reset_offset` 表示需要把预览位移归零；`commit` 为要提交的步进方向。
    Finished {
        reset_offset: bool,
        commit: Option<Direction>,
    },
}

/// 拖拽控制器
#[derive(Debug, Default)]
pub struct GestureController {
    session: Option<GestureSession>,
}

impl GestureController {
    pub fn new() -> Self {
        Self::default()
    }

    /// 是否有进行中的拖拽
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    /// 开始拖拽
    ///
    /// 过渡进行中不开始会话，返回 `false`。
    /// 已有会话时以新的起点重新开始。
    pub fn begin(&mut self, x: f32, moving: bool) -> bool {
        if moving {
            return false;
        }
        self.session = Some(GestureSession {
            start_x: x,
            moved: false,
        });
        true
    }

    /// 拖拽移动
    pub fn update(&mut self, x: f32) -> GestureOutcome {
        let Some(session) = self.session.as_mut() else {
            return GestureOutcome::Ignored;
        };
        let delta = x - session.start_x;
        match Direction::from_drag_delta(delta) {
            Some(dir) => {
                session.moved = true;
                GestureOutcome::Preview { delta, dir }
            }
            None => GestureOutcome::Ignored,
        }
    }

    /// 松开指针
    ///
    /// 只要松开时位移不为 0 就提交一次步进，不设距离或速度阈值。
    pub fn end(&mut self, x: f32) -> GestureOutcome {
        let Some(session) = self.session.take() else {
            return GestureOutcome::Ignored;
        };
        GestureOutcome::Finished {
            reset_offset: session.moved,
            commit: Direction::from_drag_delta(x - session.start_x),
        }
    }

    /// 取消拖拽，不提交步进
    pub fn cancel(&mut self) -> GestureOutcome {
        match self.session.take() {
            Some(session) => GestureOutcome::Finished {
                reset_offset: session.moved,
                commit: None,
            },
            None => GestureOutcome::Ignored,
        }
    }
}
