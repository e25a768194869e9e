//! # State 模块
//!
//! 定义轮播的索引状态与方向。
//!
//! ## 设计原则
//!
//! - 索引状态只由编排器（[`Carousel`](crate::Carousel)）修改
//! - 手势、跳转、自动轮播只读取状态，通过编排器的公开操作发起步进
//! - 所有状态可序列化，便于外部检查器展示

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ring::{Anchors, Ring};

/// 步进方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// 后退（-1）
    Back,
    /// 前进（+1）
    #[default]
    Fwd,
}

impl Direction {
    /// 方向对应的符号（-1 或 1）
    pub fn sign(self) -> i64 {
        match self {
            Self::Back => -1,
            Self::Fwd => 1,
        }
    }

    /// 反向
    pub fn reverse(self) -> Self {
        match self {
            Self::Back => Self::Fwd,
            Self::Fwd => Self::Back,
        }
    }

    /// 由拖拽位移推导方向
    ///
    /// 向右拖（正位移）预览上一张，即 `Back`；向左拖为 `Fwd`。
    /// 位移为 0 时没有方向。
    pub fn from_drag_delta(delta: f32) -> Option<Self> {
        if delta > 0.0 {
            Some(Self::Back)
        } else if delta < 0.0 {
            Some(Self::Fwd)
        } else {
            None
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Back => f.write_str("back"),
            Self::Fwd => f.write_str("fwd"),
        }
    }
}

/// 轮播索引状态
///
/// `prev` / `next` 每次步进后由 `cur` 与可见数量重新推导，
/// 当 `max > 0` 时二者都不等于 `cur`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarouselState {
    /// 最大索引（幻灯片数量 - 1）
    pub max: usize,
    /// 同时可见的幻灯片数量
    pub visible_count: usize,
    /// 当前窗口之前的一张
    pub prev: usize,
    /// 锚点幻灯片
    pub cur: usize,
    /// 当前窗口之后的第一张
    pub next: usize,
    /// 最近一次发起（或进行中）的步进方向
    pub dir: Direction,
    /// 拖拽预览的实时位移（像素），静止时为 0
    pub offset_px: f32,
}

impl CarouselState {
    /// 以 `cur` 为锚点创建状态
    pub fn new(ring: &Ring, cur: usize) -> Self {
        let anchors = ring.anchors(cur);
        Self {
            max: ring.max(),
            visible_count: ring.visible_count(),
            prev: anchors.prev,
            cur: anchors.cur,
            next: anchors.next,
            dir: Direction::default(),
            offset_px: 0.0,
        }
    }

    /// 当前锚点
    pub fn anchors(&self) -> Anchors {
        Anchors {
            prev: self.prev,
            cur: self.cur,
            next: self.next,
        }
    }

    /// 沿 `dir` 前进一步并重新推导 `prev` / `next`
    pub(crate) fn advance(&mut self, ring: &Ring) {
        let anchors = ring.advance(self.cur, self.dir);
        self.prev = anchors.prev;
        self.cur = anchors.cur;
        self.next = anchors.next;
    }
}
