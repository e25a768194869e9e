//! # Config 模块
//!
//! 轮播配置，集中管理所有可调参数。
//!
//! ## 配置优先级
//!
//! 1. 运行期属性变化（[`AttributeChange`](crate::AttributeChange)）
//! 2. 配置文件（JSON）
//! 3. 默认值

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::easing::TimingFunction;
use crate::error::ConfigError;
use crate::state::Direction;

/// 轮播配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarouselConfig {
    /// 同时可见的幻灯片数量
    #[serde(default = "default_visible_count")]
    pub visible_count: usize,

    /// 初始锚点索引
    #[serde(default)]
    pub start_index: usize,

    /// 组件级默认过渡时长（毫秒）
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u32,

    /// 组件级默认缓动函数
    #[serde(default)]
    pub timing_function: TimingFunction,

    /// 跳转链配置
    #[serde(default)]
    pub goto: GotoConfig,

    /// 自动轮播配置
    #[serde(default)]
    pub auto: AutoMoveConfig,
}

/// 跳转链配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GotoConfig {
    /// 中间步骤的固定时长（毫秒）
    #[serde(default = "default_goto_step_duration_ms")]
    pub step_duration_ms: u32,

    /// 中间步骤的缓动函数
    #[serde(default = "default_goto_step_timing")]
    pub step_timing: TimingFunction,

    /// 最后一步的缓动函数
    #[serde(default = "default_goto_final_timing")]
    pub final_timing: TimingFunction,
}

/// 自动轮播配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoMoveConfig {
    /// 自动步进间隔（毫秒），为空时不自动轮播
    #[serde(default)]
    pub interval_ms: Option<u64>,

    /// 自动步进使用的过渡时长，为空时沿用默认值
    #[serde(default)]
    pub duration_ms: Option<u32>,

    /// 自动步进使用的缓动函数，为空时沿用默认值
    #[serde(default)]
    pub timing_function: Option<TimingFunction>,

    /// 自动步进方向
    #[serde(default)]
    pub direction: Direction,

    /// 指针悬停时是否暂停
    #[serde(default = "default_pause_on_hover")]
    pub pause_on_hover: bool,
}

// 默认值函数
fn default_visible_count() -> usize {
    1
}

fn default_duration_ms() -> u32 {
    500
}

fn default_goto_step_duration_ms() -> u32 {
    120
}

fn default_goto_step_timing() -> TimingFunction {
    TimingFunction::Linear
}

fn default_goto_final_timing() -> TimingFunction {
    TimingFunction::EaseOut
}

fn default_pause_on_hover() -> bool {
    true
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            visible_count: default_visible_count(),
            start_index: 0,
            duration_ms: default_duration_ms(),
            timing_function: TimingFunction::default(),
            goto: GotoConfig::default(),
            auto: AutoMoveConfig::default(),
        }
    }
}

impl Default for GotoConfig {
    fn default() -> Self {
        Self {
            step_duration_ms: default_goto_step_duration_ms(),
            step_timing: default_goto_step_timing(),
            final_timing: default_goto_final_timing(),
        }
    }
}

impl Default for AutoMoveConfig {
    fn default() -> Self {
        Self {
            interval_ms: None,
            duration_ms: None,
            timing_function: None,
            direction: Direction::default(),
            pause_on_hover: default_pause_on_hover(),
        }
    }
}

impl AutoMoveConfig {
    /// 以指定间隔启用自动轮播
    pub fn every(interval_ms: u64) -> Self {
        Self {
            interval_ms: Some(interval_ms),
            ..Self::default()
        }
    }
}

impl CarouselConfig {
    /// 从 JSON 文本解析
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// 从文件读取并验证
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_json(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// 加载配置文件
    ///
    /// 如果文件不存在、解析或验证失败，返回默认配置并记录警告。
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            warn!(path = %path.display(), "配置文件不存在，使用默认配置");
            return Self::default();
        }

        match Self::from_file(path) {
            Ok(config) => {
                debug!(path = %path.display(), "配置文件加载成功");
                config
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "配置文件无效，使用默认配置");
                Self::default()
            }
        }
    }

    /// 保存配置到文件
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json =
            serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))?;
        fs::write(path, json).map_err(|e| ConfigError::Io(e.to_string()))
    }

    /// 验证配置有效性
    ///
    /// 起始索引是否越界取决于幻灯片数量，在构造轮播时检查。
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.visible_count == 0 {
            return Err(ConfigError::Validation(
                "visible_count 必须大于 0".to_string(),
            ));
        }

        if self.auto.interval_ms == Some(0) {
            return Err(ConfigError::Validation(
                "auto.interval_ms 必须大于 0（不需要自动轮播时省略该字段）".to_string(),
            ));
        }

        Ok(())
    }
}
