//! 数值容差常量
//!
//! 所有边界分类（单位旋转、180° 旋转、万向节锁、退化弦）都使用绝对容差。

/// 单位旋转判定容差（提取出的四元数虚部模长 sin(θ/2) < ε 时视为无旋转）
pub const IDENTITY_TOLERANCE: f64 = 1e-9;

/// 180° 旋转判定容差（cos(θ) < -1 + ε 时使用最大对角元方法）
pub const HALF_TURN_TOLERANCE: f64 = 1e-7;

/// 万向节锁判定容差（|sin(ry)| ≥ 1 - ε 视为锁定）
pub const GIMBAL_LOCK_TOLERANCE: f64 = 1e-9;

/// `xyzrpw` 约定下的万向节锁容差
pub const XYZRPW_GIMBAL_TOLERANCE: f64 = 1e-6;

/// 旋转块正交性容差（|RᵀR - I| 的最大元素）
pub const ORTHONORMAL_TOLERANCE: f64 = 1e-6;

/// 弦在 XY 平面内的最小长度，低于此值法向量无定义
pub const DEGENERATE_CHORD_TOLERANCE: f64 = 1e-9;

/// 旋转向量长度低于此值时，sin(θ/2)/θ 改用泰勒展开
pub const ROTATION_VECTOR_TOLERANCE: f64 = 1e-6;
