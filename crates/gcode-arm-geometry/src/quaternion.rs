//! 四元数与旋转矩阵互转
//!
//! 直接用三角函数从旋转矩阵提取角度时，在 180° 旋转附近会除以接近零的量。
//! 这里用四元数作为数值稳定的中间表示：
//!
//! - cos(θ) < -1 + [`HALF_TURN_TOLERANCE`]：先用最大对角元提取旋转轴，再重建四元数
//! - 其他情况：按对角元开方并由反对称部分确定符号，小角度同样精确
//!
//! 其中 cos(θ) = (trace(R) - 1) / 2。提取结果的虚部模长低于 [`IDENTITY_TOLERANCE`]
//! 时才视为无旋转，不按 cos(θ) 判定（1 - cos(θ) 约为 θ²/2，会吞掉 1e-5 rad 量级的旋转）。

use crate::constants::{HALF_TURN_TOLERANCE, IDENTITY_TOLERANCE, ROTATION_VECTOR_TOLERANCE};
use nalgebra::{Matrix3, Vector3};
use std::fmt;

/// 四元数归一化阈值（避免除零）
const QUATERNION_NORM_THRESHOLD: f64 = 1e-10;

/// 四元数（用于表示3D旋转）
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quaternion {
    /// 实部
    pub w: f64,
    /// 虚部 i
    pub x: f64,
    /// 虚部 j
    pub y: f64,
    /// 虚部 k
    pub z: f64,
}

impl Quaternion {
    /// 单位四元数（无旋转）
    pub const IDENTITY: Self = Quaternion {
        w: 1.0,
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// 创建新的四元数（不归一化）
    pub const fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Quaternion { w, x, y, z }
    }

    /// 模长
    pub fn norm(&self) -> f64 {
        (self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// 归一化（确保单位四元数）
    ///
    /// 如果四元数的模接近 0（模平方 < 1e-10），返回单位四元数 (1, 0, 0, 0)
    /// 以避免除零错误和 NaN 扩散。
    pub fn normalize(&self) -> Self {
        let norm_sq = self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z;

        if norm_sq < QUATERNION_NORM_THRESHOLD {
            tracing::warn!(
                "Normalizing near-zero quaternion (norm²={:.2e} < {:.2e}): {}, returning identity",
                norm_sq,
                QUATERNION_NORM_THRESHOLD,
                self
            );
            return Quaternion::IDENTITY;
        }

        let norm = norm_sq.sqrt();
        Quaternion {
            w: self.w / norm,
            x: self.x / norm,
            y: self.y / norm,
            z: self.z / norm,
        }
    }

    /// 从 3×3 旋转矩阵提取四元数
    ///
    /// 结果满足 `w >= 0`（q 与 -q 表示同一旋转，这里取规范形式）。
    pub fn from_rotation(r: &Matrix3<f64>) -> Self {
        let cos_angle = ((r.trace() - 1.0) * 0.5).clamp(-1.0, 1.0);

        let q = if cos_angle < -1.0 + HALF_TURN_TOLERANCE {
            Self::from_half_turn(r)
        } else {
            let (a, b, c) = (r[(0, 0)], r[(1, 1)], r[(2, 2)]);
            let sign = |v: f64| if v < 0.0 { -1.0 } else { 1.0 };
            Quaternion {
                w: (a + b + c + 1.0).max(0.0).sqrt() / 2.0,
                x: sign(r[(2, 1)] - r[(1, 2)]) * (a - b - c + 1.0).max(0.0).sqrt() / 2.0,
                y: sign(r[(0, 2)] - r[(2, 0)]) * (-a + b - c + 1.0).max(0.0).sqrt() / 2.0,
                z: sign(r[(1, 0)] - r[(0, 1)]) * (-a - b + c + 1.0).max(0.0).sqrt() / 2.0,
            }
        };

        if q.x.hypot(q.y).hypot(q.z) < IDENTITY_TOLERANCE {
            return Quaternion::IDENTITY;
        }
        q.canonical()
    }

    /// 180° 附近：以最大对角元所在列确定旋转轴
    ///
    /// 最大对角元保证开方的参数远离 0，轴向分量不会被放大误差。
    fn from_half_turn(r: &Matrix3<f64>) -> Self {
        let diag = [r[(0, 0)], r[(1, 1)], r[(2, 2)]];
        let k = if diag[0] >= diag[1] && diag[0] >= diag[2] {
            0
        } else if diag[1] >= diag[2] {
            1
        } else {
            2
        };

        let (i, j) = ((k + 1) % 3, (k + 2) % 3);
        let s = (1.0 + diag[k] - diag[i] - diag[j]).max(0.0).sqrt() * 2.0;
        if s < QUATERNION_NORM_THRESHOLD {
            return Quaternion::IDENTITY;
        }

        let mut v = [0.0; 3];
        v[k] = 0.25 * s;
        v[i] = (r[(i, k)] + r[(k, i)]) / s;
        v[j] = (r[(j, k)] + r[(k, j)]) / s;
        let w = (r[(j, i)] - r[(i, j)]) / s;

        Quaternion::new(w, v[0], v[1], v[2]).normalize()
    }

    /// 转换为 3×3 旋转矩阵（先归一化）
    pub fn to_rotation(&self) -> Matrix3<f64> {
        let q = self.normalize();
        let (w, x, y, z) = (q.w, q.x, q.y, q.z);
        Matrix3::new(
            1.0 - 2.0 * y * y - 2.0 * z * z,
            2.0 * x * y - 2.0 * z * w,
            2.0 * x * z + 2.0 * y * w,
            2.0 * x * y + 2.0 * z * w,
            1.0 - 2.0 * x * x - 2.0 * z * z,
            2.0 * y * z - 2.0 * x * w,
            2.0 * x * z - 2.0 * y * w,
            2.0 * y * z + 2.0 * x * w,
            1.0 - 2.0 * x * x - 2.0 * y * y,
        )
    }

    /// 从旋转向量（轴 × 角度，弧度）创建
    pub fn from_rotation_vector(v: Vector3<f64>) -> Self {
        let angle = v.norm();
        // sin(θ/2)/θ ≈ 1/2 - θ²/48
        let ratio = if angle < ROTATION_VECTOR_TOLERANCE {
            0.5 - angle * angle / 48.0
        } else {
            (0.5 * angle).sin() / angle
        };
        Quaternion::new((0.5 * angle).cos(), v.x * ratio, v.y * ratio, v.z * ratio)
    }

    /// 转换为旋转向量（轴 × 角度，弧度，角度范围 [0, π]）
    pub fn to_rotation_vector(&self) -> Vector3<f64> {
        let q = self.normalize().canonical();
        let v = Vector3::new(q.x, q.y, q.z);
        let sin_half = v.norm();
        if sin_half == 0.0 {
            return Vector3::zeros();
        }
        v * (q.angle() / sin_half)
    }

    /// 旋转角度（弧度，范围 [0, π]）
    pub fn angle(&self) -> f64 {
        let q = self.normalize().canonical();
        2.0 * (q.x * q.x + q.y * q.y + q.z * q.z).sqrt().atan2(q.w)
    }

    /// 规范形式：保证 `w >= 0`
    fn canonical(self) -> Self {
        if self.w < 0.0 {
            Quaternion::new(-self.w, -self.x, -self.y, -self.z)
        } else {
            self
        }
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Quaternion::IDENTITY
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Q({:.6}, {:.6}, {:.6}, {:.6})",
            self.w, self.x, self.y, self.z
        )
    }
}
