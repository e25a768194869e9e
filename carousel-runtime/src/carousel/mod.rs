//! # Carousel 模块
//!
//! 编排器与布局投影。

mod engine;
mod layout;

pub use engine::Carousel;
pub use layout::{SlidePlacement, SlideRole};
