//! # Goto 模块
//!
//! 把"跳转到索引 N"分解为一串单步过渡。
//!
//! ## 执行模型
//!
//! ```text
//! goto_index(n) ──► begin() ──► next_hop() ──► 提交一步
//!                                  ▲               │
//!                                  │             end
//!                                  │               ▼
//!                             下一帧回调 ◄── on_end() == Continue
//! ```
//!
//! 跳转链是显式的状态机：`PendingGoto` 在每次 `end` 后存活，
//! 由下一帧回调驱动下一步，不使用递归。
//!
//! 方向规则是简单的线性比较：`target > cur` 前进，否则后退，
//! 不走环上的最短路径。

use crate::ring::Ring;
use crate::state::Direction;

/// 进行中的跳转
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingGoto {
    /// 目标索引
    pub target: usize,
    /// 整条链使用的方向
    pub dir: Direction,
}

/// 跳转链中的一步
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hop {
    pub dir: Direction,
    /// 是否为最后一步（最后一步使用缓出曲线与默认时长）
    pub is_final: bool,
}

/// 一步结束后的去向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainStatus {
    /// 没有进行中的跳转
    Idle,
    /// 已到达目标，跳转结束
    Arrived,
    /// 尚未到达，下一帧继续
    Continue,
}

/// 跳转分解器
#[derive(Debug, Default)]
pub struct GotoStepper {
    pending: Option<PendingGoto>,
}

impl GotoStepper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> Option<&PendingGoto> {
        self.pending.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// 开始一次跳转，返回整条链的方向
    pub fn begin(&mut self, cur: usize, target: usize) -> Direction {
        let dir = if target > cur {
            Direction::Fwd
        } else {
            Direction::Back
        };
        self.pending = Some(PendingGoto { target, dir });
        dir
    }

    /// 放弃跳转链
    ///
    /// 进行中的那一步不受影响，只是不再安排后续步骤。
    pub fn abandon(&mut self) -> Option<PendingGoto> {
        self.pending.take()
    }

    /// 计算下一步
    ///
    /// 在变更索引之前判断 `step(cur, dir)` 是否就是目标。
    pub fn next_hop(&self, ring: &Ring, cur: usize) -> Option<Hop> {
        let pending = self.pending.as_ref()?;
        if cur == pending.target {
            return None;
        }
        let would_be_next = ring.step(cur, pending.dir);
        Some(Hop {
            dir: pending.dir,
            is_final: would_be_next == pending.target,
        })
    }

    /// 一步结束后调用
    pub fn on_end(&mut self, cur: usize) -> ChainStatus {
        match self.pending {
            None => ChainStatus::Idle,
            Some(pending) if pending.target == cur => {
                self.pending = None;
                ChainStatus::Arrived
            }
            Some(_) => ChainStatus::Continue,
        }
    }
}
