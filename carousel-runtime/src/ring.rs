//! # Ring 模块
//!
//! 固定长度环形序列上的纯索引运算。
//!
//! ```text
//!  prev   cur ... cur+visible-1   next
//!   │      └──── 可见窗口 ────┘     │
//!  cur-1                       cur+visible
//! ```
//!
//! 所有运算都对 `len` 取模，`-1 → max`，`max + 1 → 0`。
//! `prev` / `next` 与方向无关，只有负责摆放画面的一方需要知道方向。

use serde::{Deserialize, Serialize};

use crate::error::{CarouselError, CarouselResult};
use crate::state::Direction;

/// 锚点索引
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anchors {
    pub prev: usize,
    pub cur: usize,
    pub next: usize,
}

/// 可见窗口中的一张幻灯片
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibleSlide {
    /// 幻灯片索引
    pub index: usize,
    /// 相对 `cur` 的偏移（0 为 `cur` 本身）
    pub offset: usize,
}

/// 环形索引器
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ring {
    len: usize,
    visible_count: usize,
}

impl Ring {
    /// 创建环形索引器
    ///
    /// 幻灯片数量为 0 时没有任何索引运算有意义，直接返回错误。
    pub fn new(slide_count: usize, visible_count: usize) -> CarouselResult<Self> {
        if slide_count == 0 {
            return Err(CarouselError::EmptyRing);
        }
        if visible_count == 0 {
            return Err(CarouselError::InvalidVisibleCount { visible_count });
        }
        Ok(Self {
            len: slide_count,
            visible_count,
        })
    }

    /// 幻灯片数量
    pub fn len(&self) -> usize {
        self.len
    }

    /// 最大索引
    pub fn max(&self) -> usize {
        self.len - 1
    }

    /// 同时可见数量
    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    /// 只有一张幻灯片时无法步进
    pub fn is_static(&self) -> bool {
        self.len == 1
    }

    /// 将任意有符号索引映射回 `[0, max]`
    pub fn wrap(&self, index: i64) -> usize {
        index.rem_euclid(self.len as i64) as usize
    }

    /// 单步前进后的 `cur`
    pub fn step(&self, cur: usize, dir: Direction) -> usize {
        self.wrap(cur as i64 + dir.sign())
    }

    /// 以 `cur` 为锚点推导 `prev` / `next`
    pub fn anchors(&self, cur: usize) -> Anchors {
        let cur = self.wrap(cur as i64);
        Anchors {
            prev: self.wrap(cur as i64 - 1),
            cur,
            next: self.wrap((cur + self.visible_count) as i64),
        }
    }

    /// 单步前进并返回新的锚点
    pub fn advance(&self, cur: usize, dir: Direction) -> Anchors {
        self.anchors(self.step(cur, dir))
    }

    /// 当前可见窗口
    ///
    /// 幻灯片数量小于可见数量时窗口会出现重复索引，由调用方决定如何退化。
    pub fn visible(&self, cur: usize) -> Vec<VisibleSlide> {
        (0..self.visible_count)
            .map(|offset| VisibleSlide {
                index: self.wrap((cur + offset) as i64),
                offset,
            })
            .collect()
    }
}
