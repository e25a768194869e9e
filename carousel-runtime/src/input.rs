//! # Input 模块
//!
//! 定义宿主向轮播传递的输入。
//!
//! ## 设计说明
//!
//! - 轮播不直接处理指针/键盘/DOM 事件，只处理语义化的输入
//! - 时间流逝由宿主通过 `Tick` 报告，轮播自身不读取真实时钟
//! - `Frame` 对应"下一帧"回调，用于需要等待布局稳定的操作
//! - `TransitionEnd` 是渲染方报告动画完成的唯一途径，每次步进必须恰好报告一次

use serde::{Deserialize, Serialize};

/// 声明式属性变化
///
/// 外部观察者（例如属性监听）在"当前索引""时长""缓动函数"属性被修改时发出。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "attribute", content = "value", rename_all = "snake_case")]
pub enum AttributeChange {
    /// 当前索引，触发跳转
    Index(usize),
    /// 过渡时长（毫秒）
    Duration(u32),
    /// 缓动函数名称，无法识别时忽略
    TimingFunction(String),
}

/// 宿主向轮播传递的输入
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CarouselInput {
    /// 后退一张
    Back,
    /// 前进一张
    Fwd,
    /// 跳转到指定索引
    Goto { index: usize },
    /// 指针按下
    DragStart { x: f32 },
    /// 指针移动
    DragMove { x: f32 },
    /// 指针抬起
    DragEnd { x: f32 },
    /// 指针取消
    DragCancel,
    /// 指针进入组件
    PointerEnter,
    /// 指针离开组件
    PointerLeave,
    /// 渲染方报告过渡完成
    ///
    /// `slide` 为报告完成的幻灯片；为 `None` 时视为锚点幻灯片。
    TransitionEnd {
        #[serde(default)]
        slide: Option<usize>,
    },
    /// 下一帧回调
    Frame,
    /// 时间流逝
    Tick { elapsed_ms: u64 },
    /// 声明式属性变化
    Attribute { change: AttributeChange },
}

impl CarouselInput {
    /// 创建跳转输入
    pub fn goto(index: usize) -> Self {
        Self::Goto { index }
    }

    /// 创建过渡完成输入
    pub fn transition_end(slide: impl Into<Option<usize>>) -> Self {
        Self::TransitionEnd {
            slide: slide.into(),
        }
    }

    /// 创建时间流逝输入
    pub fn tick(elapsed_ms: u64) -> Self {
        Self::Tick { elapsed_ms }
    }

    /// 创建属性变化输入
    pub fn attribute(change: AttributeChange) -> Self {
        Self::Attribute { change }
    }
}
