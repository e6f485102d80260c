//! 几何层错误类型定义

use thiserror::Error;

/// 几何计算错误
///
/// 所有错误只影响当次调用，不会破坏调用方的任何状态。
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// 输入矩阵不是 4×4
    #[error("Invalid pose: expected a 4x4 homogeneous matrix, got {rows}x{cols}")]
    InvalidPose {
        /// 行数
        rows: usize,
        /// 列数
        cols: usize,
    },

    /// 4×4 矩阵不是合法的齐次位姿（旋转块非正交、行列式非 +1、末行错误或含 NaN）
    #[error("Malformed pose: {0}")]
    MalformedPose(String),

    /// 圆弧半径小于半弦长
    #[error("Invalid arc radius {radius:.6}: must be at least half the chord length ({half_chord:.6})")]
    InvalidArcRadius {
        /// 请求的半径
        radius: f64,
        /// 半弦长
        half_chord: f64,
    },

    /// 退化几何（如零长度弦，法向量无定义）
    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),
}

impl GeometryError {
    /// 是否为位姿格式错误（InvalidPose / MalformedPose）
    pub fn is_pose_error(&self) -> bool {
        matches!(self, Self::InvalidPose { .. } | Self::MalformedPose(_))
    }

    /// 是否为圆弧参数错误
    pub fn is_arc_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidArcRadius { .. } | Self::DegenerateGeometry(_)
        )
    }

    /// 创建位姿格式错误
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedPose(reason.into())
    }

    /// 创建退化几何错误
    pub fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegenerateGeometry(reason.into())
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, GeometryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let shape = GeometryError::InvalidPose { rows: 3, cols: 3 };
        assert!(shape.is_pose_error());
        assert!(!shape.is_arc_error());

        let radius = GeometryError::InvalidArcRadius {
            radius: 2.0,
            half_chord: 5.0,
        };
        assert!(radius.is_arc_error());
        assert!(!radius.is_pose_error());

        assert!(GeometryError::degenerate("zero chord").is_arc_error());
        assert!(GeometryError::malformed("det = -1").is_pose_error());
    }

    #[test]
    fn test_error_display() {
        let msg = GeometryError::InvalidPose { rows: 3, cols: 4 }.to_string();
        assert!(msg.contains("3x4"));

        let msg = GeometryError::InvalidArcRadius {
            radius: 2.0,
            half_chord: 5.0,
        }
        .to_string();
        assert!(msg.contains("2.000000"));
        assert!(msg.contains("5.000000"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GeometryError>();
    }
}
