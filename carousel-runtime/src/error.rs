//! # Error 模块
//!
//! 定义 carousel-runtime 中使用的错误类型。
//!
//! 运行期的误用（无效的跳转目标、过渡中重复请求、重复启动/停止计时器）
//! 一律静默忽略，不会产生错误。只有结构性问题（例如空的幻灯片集合）
//! 才会在构造阶段返回错误。

use thiserror::Error;

/// 缓动函数解析错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimingParseError {
    /// 未知的缓动函数名称
    #[error("未知的缓动函数 '{name}'")]
    UnknownName { name: String },

    /// cubic-bezier 参数无效
    #[error("无效的 cubic-bezier 参数 '{args}' - {message}")]
    InvalidBezier { args: String, message: String },
}

/// 配置错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// 读取配置文件失败
    #[error("配置 IO 错误: {0}")]
    Io(String),

    /// 配置内容解析失败
    #[error("配置解析失败: {0}")]
    Parse(String),

    /// 配置验证失败
    #[error("配置验证失败: {0}")]
    Validation(String),
}

/// 轮播构造错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CarouselError {
    /// 幻灯片数量为 0
    #[error("轮播至少需要一张幻灯片")]
    EmptyRing,

    /// 同时可见数量为 0
    #[error("同时可见的幻灯片数量必须大于 0，实际为 {visible_count}")]
    InvalidVisibleCount { visible_count: usize },

    /// 起始索引越界
    #[error("起始索引 {index} 超出范围，有效范围是 0..={max}")]
    StartIndexOutOfRange { index: usize, max: usize },

    /// 配置错误
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result 类型别名
pub type CarouselResult<T> = Result<T, CarouselError>;
