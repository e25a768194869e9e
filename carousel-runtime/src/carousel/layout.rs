//! # Layout 模块
//!
//! 把索引状态投影为与渲染后端无关的摆放位置。
//!
//! 每张幻灯片占据一个槽位，槽位 `i` 对应 `i × 100%` 的偏移：
//!
//! ```text
//!   slot:   -1      0      1    …   visible-1   visible
//!          prev    cur   cur+1  …               next
//! ```
//!
//! 拖拽期间所有槽位整体平移 `offset_px` 像素。

use serde::{Deserialize, Serialize};

use crate::ring::Ring;
use crate::state::{CarouselState, Direction};

/// 幻灯片在窗口中的角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideRole {
    Prev,
    Visible,
    Next,
}

/// 一张幻灯片的摆放
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlidePlacement {
    pub index: usize,
    pub role: SlideRole,
    /// 槽位，相对 `cur`
    pub slot: i32,
    /// 拖拽预览位移（像素）
    pub offset_px: f32,
}

impl SlidePlacement {
    /// 以百分比表示的静止偏移
    pub fn offset_percent(&self) -> i32 {
        self.slot * 100
    }
}

/// 计算当前摆放
///
/// 幻灯片数量不足以填满窗口时，重复出现的索引只保留第一次。
/// 只有两张幻灯片时 `prev == next`，这张共享的幻灯片在过渡中位于
/// 离开的一侧，静止时位于 `dir` 指向的一侧。
pub(crate) fn compute(ring: &Ring, state: &CarouselState, moving: bool) -> Vec<SlidePlacement> {
    let offset_px = state.offset_px;
    let window_end = ring.visible_count() as i32;

    let mut placements: Vec<SlidePlacement> = Vec::with_capacity(ring.visible_count() + 2);
    for slide in ring.visible(state.cur) {
        if placements.iter().any(|p| p.index == slide.index) {
            continue;
        }
        placements.push(SlidePlacement {
            index: slide.index,
            role: SlideRole::Visible,
            slot: slide.offset as i32,
            offset_px,
        });
    }

    let mut place = |index: usize, role: SlideRole, slot: i32| {
        if !placements.iter().any(|p| p.index == index) {
            placements.push(SlidePlacement {
                index,
                role,
                slot,
                offset_px,
            });
        }
    };

    if state.prev == state.next {
        let side = if moving { state.dir.reverse() } else { state.dir };
        match side {
            Direction::Back => place(state.prev, SlideRole::Prev, -1),
            Direction::Fwd => place(state.next, SlideRole::Next, window_end),
        }
    } else {
        place(state.prev, SlideRole::Prev, -1);
        place(state.next, SlideRole::Next, window_end);
    }

    placements
}
