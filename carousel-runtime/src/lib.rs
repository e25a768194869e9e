//! # Carousel Runtime
//!
//! 环形轮播组件的核心状态机。
//!
//! ## 架构概述
//!
//! `carousel-runtime` 是纯逻辑核心，不依赖任何 IO、计时器或渲染引擎。
//! 它通过 **事件驱动模式** 与宿主层（Host）通信：
//!
//! ```text
//! Host                           Runtime
//!   │                               │
//!   │──── CarouselInput ──────────►│
//!   │                               │ handle()
//!   │◄─── Vec<CarouselEvent> ──────│
//!   │                               │
//! ```
//!
//! 宿主负责三件事：报告时间流逝（`Tick`）、在每个动画帧调用 `Frame`、
//! 在每次过渡动画完成后恰好报告一次 `TransitionEnd`。
//!
//! ## 核心类型
//!
//! - [`Carousel`]：编排器，索引状态的唯一拥有者
//! - [`CarouselInput`]：Host 向 Runtime 传递的输入
//! - [`CarouselEvent`]：Runtime 发出的生命周期事件
//! - [`CarouselState`]：可序列化的索引状态
//! - [`CarouselConfig`]：可调参数
//!
//! ## 使用示例
//!
//! ```ignore
//! use carousel_runtime::{Carousel, CarouselConfig, CarouselInput};
//!
//! let mut carousel = Carousel::new(5, CarouselConfig::default())?;
//!
//! loop {
//!     for event in carousel.handle(next_input()) {
//!         renderer.apply(&event, &carousel.layout());
//!     }
//! }
//! ```
//!
//! ## 模块结构
//!
//! - [`ring`]：环形索引运算
//! - [`state`]：索引状态与方向
//! - [`transition`]：过渡参数与生命周期
//! - [`event`]：事件与监听器
//! - [`gesture`]：拖拽手势
//! - [`goto`]：跳转链
//! - [`auto_move`]：自动轮播
//! - [`easing`]：缓动函数
//! - [`config`]：配置
//! - [`carousel`]：编排器与布局

pub mod auto_move;
pub mod carousel;
pub mod config;
pub mod easing;
pub mod error;
pub mod event;
pub mod gesture;
pub mod goto;
pub mod input;
pub mod ring;
pub mod state;
pub mod transition;

// 重导出核心类型
pub use auto_move::{AutoMover, AutoTimer};
pub use carousel::{Carousel, SlidePlacement, SlideRole};
pub use config::{AutoMoveConfig, CarouselConfig, GotoConfig};
pub use easing::TimingFunction;
pub use error::{CarouselError, CarouselResult, ConfigError, TimingParseError};
pub use event::{CarouselEvent, CarouselListener, EventData, EventKind};
pub use gesture::{GestureController, GestureOutcome, GestureSession};
pub use goto::{ChainStatus, GotoStepper, Hop, PendingGoto};
pub use input::{AttributeChange, CarouselInput};
pub use ring::{Anchors, Ring, VisibleSlide};
pub use state::{CarouselState, Direction};
pub use transition::{TransitionParams, TransitionState};
