//! 执行层错误类型
//!
//! - [`ActuationError`]: 机器人协作者拒绝或执行失败，原样向上传递
//! - [`MotionError`]: 一次运动派发的失败（几何计算或执行）

use gcode_arm_geometry::GeometryError;
use thiserror::Error;

/// 机器人执行错误
///
/// 由 [`Robot`](crate::Robot) 实现返回。核心层不重试，也不回滚解释器状态。
#[derive(Debug, Error)]
pub enum ActuationError {
    /// 控制器拒绝了命令（如未使能、处于错误状态）
    #[error("Robot rejected the command: {0}")]
    Rejected(String),

    /// 与控制器通信失败
    #[error("Robot communication failed: {0}")]
    Communication(String),

    /// 目标位姿不可达
    #[error("Target unreachable: {0}")]
    Unreachable(String),

    /// 协作者自定义错误
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl ActuationError {
    /// 是否可重试（通信类故障）
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Communication(_))
    }

    /// 是否为目标本身的问题（换一个目标可能成功）
    pub fn is_target_error(&self) -> bool {
        matches!(self, Self::Unreachable(_))
    }

    /// 包装任意错误
    pub fn other<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Other(Box::new(err))
    }
}

/// 运动派发错误
#[derive(Debug, Error)]
pub enum MotionError {
    /// 目标几何无效（圆弧半径过小、退化弦等），未发出任何执行命令
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// 机器人执行失败
    #[error(transparent)]
    Actuation(#[from] ActuationError),
}

impl MotionError {
    /// 是否在发出执行命令之前失败
    pub fn is_geometry(&self) -> bool {
        matches!(self, Self::Geometry(_))
    }

    /// 是否为执行失败
    pub fn is_actuation(&self) -> bool {
        matches!(self, Self::Actuation(_))
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, MotionError>;
