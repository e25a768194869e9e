//! # Easing 模块
//!
//! 过渡使用的缓动函数（timing function）。
//!
//! 运行时只决定使用哪条曲线，以名称的形式交给渲染方；
//! [`TimingFunction::apply`] 供渲染方或模拟器按进度求值。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TimingParseError;

/// 缓动函数
///
/// 序列化为 CSS 风格的名称，例如 `"ease-out"`、`"cubic-bezier(0.4, 0, 0.2, 1)"`。
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TimingFunction {
    /// 线性（匀速）
    Linear,
    /// 默认曲线
    #[default]
    Ease,
    /// 缓入（先慢后快）
    EaseIn,
    /// 缓出（先快后慢）
    EaseOut,
    /// 缓入缓出（两头慢中间快）
    EaseInOut,
    /// 自定义三次贝塞尔曲线
    CubicBezier { x1: f32, y1: f32, x2: f32, y2: f32 },
}

impl TimingFunction {
    /// 计算缓动值
    ///
    /// # 参数
    /// - `t`: 时间进度 (0.0 - 1.0)
    ///
    /// # 返回
    /// - 缓动后的进度值
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        let (x1, y1, x2, y2) = match *self {
            Self::Linear => return t,
            Self::Ease => (0.25, 0.1, 0.25, 1.0),
            Self::EaseIn => (0.42, 0.0, 1.0, 1.0),
            Self::EaseOut => (0.0, 0.0, 0.58, 1.0),
            Self::EaseInOut => (0.42, 0.0, 0.58, 1.0),
            Self::CubicBezier { x1, y1, x2, y2 } => (x1, y1, x2, y2),
        };
        cubic_bezier(x1, y1, x2, y2, t)
    }
}

impl fmt::Display for TimingFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => f.write_str("linear"),
            Self::Ease => f.write_str("ease"),
            Self::EaseIn => f.write_str("ease-in"),
            Self::EaseOut => f.write_str("ease-out"),
            Self::EaseInOut => f.write_str("ease-in-out"),
            Self::CubicBezier { x1, y1, x2, y2 } => {
                write!(f, "cubic-bezier({x1}, {y1}, {x2}, {y2})")
            }
        }
    }
}

impl FromStr for TimingFunction {
    type Err = TimingParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        match name.as_str() {
            "linear" => return Ok(Self::Linear),
            "ease" => return Ok(Self::Ease),
            "ease-in" => return Ok(Self::EaseIn),
            "ease-out" => return Ok(Self::EaseOut),
            "ease-in-out" => return Ok(Self::EaseInOut),
            _ => {}
        }

        let args = name
            .strip_prefix("cubic-bezier(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| TimingParseError::UnknownName {
                name: s.trim().to_string(),
            })?;
        parse_bezier_args(args)
    }
}

impl TryFrom<String> for TimingFunction {
    type Error = TimingParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimingFunction> for String {
    fn from(value: TimingFunction) -> Self {
        value.to_string()
    }
}

fn parse_bezier_args(args: &str) -> Result<TimingFunction, TimingParseError> {
    let invalid = |message: &str| TimingParseError::InvalidBezier {
        args: args.to_string(),
        message: message.to_string(),
    };

    let values = args
        .split(',')
        .map(|part| part.trim().parse::<f32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| invalid("参数必须是数字"))?;

    let [x1, y1, x2, y2] = values[..] else {
        return Err(invalid("需要 4 个参数"));
    };
    if !(0.0..=1.0).contains(&x1) || !(0.0..=1.0).contains(&x2) {
        return Err(invalid("x1 / x2 必须在 0 - 1 之间"));
    }

    Ok(TimingFunction::CubicBezier { x1, y1, x2, y2 })
}

/// 求三次贝塞尔曲线在横坐标 `t` 处的纵坐标
///
/// 先用牛顿迭代求参数 `s`，不收敛时退回二分法。
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, t: f32) -> f32 {
    const EPSILON: f32 = 1e-6;

    let cx = 3.0 * x1;
    let bx = 3.0 * (x2 - x1) - cx;
    let ax = 1.0 - cx - bx;
    let cy = 3.0 * y1;
    let by = 3.0 * (y2 - y1) - cy;
    let ay = 1.0 - cy - by;

    let sample_x = |s: f32| ((ax * s + bx) * s + cx) * s;
    let sample_y = |s: f32| ((ay * s + by) * s + cy) * s;
    let slope_x = |s: f32| (3.0 * ax * s + 2.0 * bx) * s + cx;

    let mut s = t;
    for _ in 0..8 {
        let error = sample_x(s) - t;
        if error.abs() < EPSILON {
            return sample_y(s);
        }
        let slope = slope_x(s);
        if slope.abs() < EPSILON {
            break;
        }
        s -= error / slope;
    }

    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    s = t;
    for _ in 0..32 {
        let x = sample_x(s);
        if (x - t).abs() < EPSILON {
            break;
        }
        if t > x {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) / 2.0;
    }
    sample_y(s)
}
