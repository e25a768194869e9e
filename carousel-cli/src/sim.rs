//! # Sim 模块
//!
//! 无头模拟：用虚拟时钟与虚拟渲染方驱动轮播。
//!
//! ## 每一帧
//!
//! ```text
//! Tick(frame_ms) ──► 到期的脚本输入 ──► 到期的 TransitionEnd ──► Frame
//! ```
//!
//! 虚拟渲染方在收到 `start` 后 `duration_ms` 毫秒报告过渡完成；
//! 过渡被禁用时在下一帧立即报告。

use std::collections::VecDeque;
use std::fs;
use std::path::Path;

use anyhow::Context;
use carousel_runtime::{Carousel, CarouselEvent, CarouselInput, EventKind};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// 脚本中的一条输入
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptedInput {
    /// 投递时刻（毫秒）
    pub at_ms: u64,
    pub input: CarouselInput,
}

/// 带时间戳的事件
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimedEvent {
    pub at_ms: u64,
    #[serde(flatten)]
    pub event: CarouselEvent,
}

/// 读取脚本文件
///
/// 脚本按 `at_ms` 稳定排序，同一时刻的输入保持文件中的顺序。
pub fn load_script(path: &Path) -> anyhow::Result<Vec<ScriptedInput>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("无法读取脚本文件: {}", path.display()))?;
    let mut script: Vec<ScriptedInput> = serde_json::from_str(&content)
        .with_context(|| format!("脚本格式错误: {}", path.display()))?;
    script.sort_by_key(|entry| entry.at_ms);
    Ok(script)
}

/// 模拟器
pub struct Simulation {
    carousel: Carousel,
    script: VecDeque<ScriptedInput>,
    frame_ms: u64,
    now_ms: u64,
    /// 虚拟渲染方报告完成的时刻
    transition_deadline: Option<u64>,
    log: Vec<TimedEvent>,
}

impl Simulation {
    pub fn new(carousel: Carousel, mut script: Vec<ScriptedInput>, frame_ms: u64) -> Self {
        script.sort_by_key(|entry| entry.at_ms);
        Self {
            carousel,
            script: script.into(),
            frame_ms: frame_ms.max(1),
            now_ms: 0,
            transition_deadline: None,
            log: Vec::new(),
        }
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn events(&self) -> &[TimedEvent] {
        &self.log
    }

    /// 运行到 `until_ms`
    pub fn run(&mut self, until_ms: u64) -> &[TimedEvent] {
        while self.now_ms < until_ms {
            self.step_frame();
        }
        &self.log
    }

    /// 推进一帧
    pub fn step_frame(&mut self) {
        self.now_ms += self.frame_ms;
        self.deliver(CarouselInput::tick(self.frame_ms));

        while self
            .script
            .front()
            .is_some_and(|entry| entry.at_ms <= self.now_ms)
        {
            if let Some(entry) = self.script.pop_front() {
                debug!(at_ms = entry.at_ms, input = ?entry.input, "scripted input");
                self.deliver(entry.input);
            }
        }

        if self
            .transition_deadline
            .is_some_and(|deadline| deadline <= self.now_ms)
        {
            self.transition_deadline = None;
            self.deliver(CarouselInput::transition_end(None));
        }

        self.deliver(CarouselInput::Frame);
    }

    fn deliver(&mut self, input: CarouselInput) {
        let events = self.carousel.handle(input);
        for event in events {
            if event.kind == EventKind::Start {
                let duration_ms = if event.data.transition_enabled {
                    u64::from(event.data.duration_ms)
                } else {
                    0
                };
                self.transition_deadline = Some(self.now_ms + duration_ms);
            }
            self.log.push(TimedEvent {
                at_ms: self.now_ms,
                event,
            });
        }
    }
}
