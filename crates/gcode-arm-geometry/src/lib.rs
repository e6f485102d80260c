//! # gcode-arm Geometry
//!
//! 机械臂 G-code 前端的几何层（无硬件依赖、无 I/O）
//!
//! ## 模块
//!
//! - `constants`: 数值容差常量
//! - `error`: 几何错误类型
//! - `point`: 三维点/向量 [`Point3D`]
//! - `quaternion`: 四元数与旋转矩阵互转（180° 附近数值稳定）
//! - `pose`: 4×4 齐次位姿 [`Pose`] 及欧拉角/旋转向量转换
//! - `arc`: 三点圆弧的中间点计算
//!
//! ## 坐标约定
//!
//! 平移单位为毫米，欧拉角单位为度。
//! [`Pose::from_euler`] 的组合顺序为 `Translate ∘ RotX ∘ RotY ∘ RotZ`，
//! 所有调用者都依赖此顺序，不要修改。
//!
//! ```rust
//! use gcode_arm_geometry::{EulerPose, Pose};
//!
//! let pose = Pose::from_euler(EulerPose::new(10.0, 20.0, 30.0, 15.0, -20.0, 45.0));
//! let back = pose.to_euler();
//! assert!((back.ry - (-20.0)).abs() < 1e-9);
//! ```

pub mod arc;
pub mod constants;
pub mod error;
pub mod point;
pub mod pose;
pub mod quaternion;

// 重新导出常用类型
pub use nalgebra;
pub use arc::{RotationSense, arc_center, secondary_point};
pub use constants::*;
pub use error::{GeometryError, Result};
pub use point::Point3D;
pub use pose::{EulerPose, Pose, euler_from_matrix, invert_matrix};
pub use quaternion::Quaternion;
