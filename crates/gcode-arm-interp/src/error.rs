//! 解释器错误类型
//!
//! 所有行级错误都只影响当前行：解释器保持可用，下一行照常处理。

use gcode_arm_geometry::GeometryError;
use gcode_arm_robot::{ActuationError, MotionError, MotionMode};
use thiserror::Error;

/// 解释器错误
#[derive(Debug, Error)]
pub enum InterpreterError {
    // ==================== 解析错误（整行拒绝，状态不变） ====================
    /// 数值词无法解析（如 `X12abc`），该行任何值都不会被应用
    #[error("Parse error in '{line}': word '{word}' {reason}")]
    Parse {
        /// 出错的行（去掉注释后）
        line: String,
        /// 出错的词
        word: String,
        /// 原因
        reason: String,
    },

    /// 严格模式下遇到不支持的词
    #[error("Unsupported word '{word}' in '{line}'")]
    UnsupportedWord {
        /// 出错的行（去掉注释后）
        line: String,
        /// 不支持的词
        word: String,
    },

    // ==================== 运动错误（轴状态已应用，不回滚） ====================
    /// 运动派发失败
    #[error("{mode} motion failed for '{line}': {source}")]
    Motion {
        /// 出错的行（去掉注释后）
        line: String,
        /// 本行选定的运动模式
        mode: MotionMode,
        /// 底层错误
        #[source]
        source: MotionError,
    },

    // ==================== 配置错误 ====================
    /// 配置无效或无法加载
    #[error("Configuration error: {0}")]
    Config(String),

    /// 读取程序失败
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl InterpreterError {
    /// 是否为解析类错误（包括严格模式的不支持词）
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::Parse { .. } | Self::UnsupportedWord { .. })
    }

    /// 是否可恢复：解释器仍可继续处理下一行
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Config(_) | Self::Io(_))
    }

    /// 是否可重试（机器人通信类故障）
    pub fn is_retryable(&self) -> bool {
        self.actuation_error()
            .is_some_and(ActuationError::is_retryable)
    }

    /// 出错的行
    pub fn line(&self) -> Option<&str> {
        match self {
            Self::Parse { line, .. }
            | Self::UnsupportedWord { line, .. }
            | Self::Motion { line, .. } => Some(line),
            Self::Config(_) | Self::Io(_) => None,
        }
    }

    /// 几何错误（圆弧半径过小、退化弦）
    pub fn geometry_error(&self) -> Option<&GeometryError> {
        match self {
            Self::Motion {
                source: MotionError::Geometry(err),
                ..
            } => Some(err),
            _ => None,
        }
    }

    /// 机器人执行错误
    pub fn actuation_error(&self) -> Option<&ActuationError> {
        match self {
            Self::Motion {
                source: MotionError::Actuation(err),
                ..
            } => Some(err),
            _ => None,
        }
    }

    /// 创建配置错误
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config(reason.into())
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, InterpreterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = InterpreterError::Parse {
            line: "G1 X12abc".into(),
            word: "X12abc".into(),
            reason: "is not a valid number".into(),
        };
        assert!(err.is_parse_error());
        assert!(err.is_recoverable());
        assert_eq!(err.line(), Some("G1 X12abc"));
        assert_eq!(
            err.to_string(),
            "Parse error in 'G1 X12abc': word 'X12abc' is not a valid number"
        );
    }

    #[test]
    fn test_motion_error_accessors() {
        let err = InterpreterError::Motion {
            line: "G2 X10 R1".into(),
            mode: MotionMode::ClockwiseArc,
            source: GeometryError::InvalidArcRadius {
                radius: 1.0,
                half_chord: 5.0,
            }
            .into(),
        };
        assert!(!err.is_parse_error());
        assert!(err.geometry_error().is_some());
        assert!(err.actuation_error().is_none());
        assert!(!err.is_retryable());
        assert!(err.to_string().starts_with("ClockwiseArc motion failed"));

        let err = InterpreterError::Motion {
            line: "G0".into(),
            mode: MotionMode::Rapid,
            source: ActuationError::Communication("link down".into()).into(),
        };
        assert!(err.is_retryable());
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_config_error() {
        let err = InterpreterError::config("default_feed_rate must be > 0");
        assert!(!err.is_recoverable());
        assert_eq!(err.line(), None);
    }
}
