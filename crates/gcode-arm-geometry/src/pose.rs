//! 齐次位姿（4×4 变换矩阵）
//!
//! [`Pose`] 内部存储一个 `nalgebra::Matrix4<f64>`，构造时保证：
//!
//! - 末行为 `[0, 0, 0, 1]`
//! - 左上 3×3 旋转块正交，且行列式为 +1
//! - 所有元素为有限值
//!
//! 外部传入的矩阵（[`Pose::from_matrix`]、[`TryFrom<DMatrix<f64>>`]）不满足上述条件时
//! 直接拒绝，不做任何"修正"或正交化。
//!
//! # 欧拉角约定
//!
//! | 方法 | 组合顺序 | 单位 |
//! |------|---------|------|
//! | [`Pose::from_euler`] / [`Pose::to_euler`] | `T(x,y,z) ∘ Rx(rx) ∘ Ry(ry) ∘ Rz(rz)` | mm / 度 |
//! | [`Pose::from_xyzrpw`] / [`Pose::to_xyzrpw`] | `T(x,y,z) ∘ Rz(w) ∘ Ry(p) ∘ Rx(r)` | mm / 度 |
//! | [`Pose::from_rotation_vector`] / [`Pose::to_rotation_vector`] | `T(x,y,z) ∘ Rot(axis·angle)` | mm / 弧度 |

use crate::constants::{GIMBAL_LOCK_TOLERANCE, ORTHONORMAL_TOLERANCE, XYZRPW_GIMBAL_TOLERANCE};
use crate::error::{GeometryError, Result};
use crate::point::Point3D;
use crate::quaternion::Quaternion;
use nalgebra::{DMatrix, Matrix3, Matrix4, Vector3};
use std::fmt;
use std::ops::Mul;

/// 位置 + 欧拉角表示（毫米 / 度）
///
/// 字段语义取决于使用的转换函数，见模块文档中的约定表。
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EulerPose {
    /// X 平移（mm）
    pub x: f64,
    /// Y 平移（mm）
    pub y: f64,
    /// Z 平移（mm）
    pub z: f64,
    /// 绕 X 轴旋转（度）
    pub rx: f64,
    /// 绕 Y 轴旋转（度）
    pub ry: f64,
    /// 绕 Z 轴旋转（度）
    pub rz: f64,
}

impl EulerPose {
    /// 创建新的欧拉位姿
    pub const fn new(x: f64, y: f64, z: f64, rx: f64, ry: f64, rz: f64) -> Self {
        EulerPose {
            x,
            y,
            z,
            rx,
            ry,
            rz,
        }
    }

    /// 从 `[x, y, z, rx, ry, rz]` 创建
    pub const fn from_array(a: [f64; 6]) -> Self {
        EulerPose::new(a[0], a[1], a[2], a[3], a[4], a[5])
    }

    /// 转为 `[x, y, z, rx, ry, rz]`
    pub const fn to_array(self) -> [f64; 6] {
        [self.x, self.y, self.z, self.rx, self.ry, self.rz]
    }

    /// 平移部分
    pub const fn position(&self) -> Point3D {
        Point3D::new(self.x, self.y, self.z)
    }
}

impl fmt::Display for EulerPose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.3}, {:.3}, {:.3}, {:.3}°, {:.3}°, {:.3}°]",
            self.x, self.y, self.z, self.rx, self.ry, self.rz
        )
    }
}

/// 4×4 齐次位姿
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    matrix: Matrix4<f64>,
}

impl Pose {
    /// 单位位姿（原点，无旋转）
    pub fn identity() -> Self {
        Pose {
            matrix: Matrix4::identity(),
        }
    }

    /// 纯平移
    pub fn translation(x: f64, y: f64, z: f64) -> Self {
        let mut pose = Pose::identity();
        pose.set_position(Point3D::new(x, y, z));
        pose
    }

    /// 绕 X 轴旋转（弧度）
    pub fn rot_x(rx: f64) -> Self {
        let (s, c) = rx.sin_cos();
        Pose::from_parts(
            Matrix3::new(1.0, 0.0, 0.0, 0.0, c, -s, 0.0, s, c),
            Vector3::zeros(),
        )
    }

    /// 绕 Y 轴旋转（弧度）
    pub fn rot_y(ry: f64) -> Self {
        let (s, c) = ry.sin_cos();
        Pose::from_parts(
            Matrix3::new(c, 0.0, s, 0.0, 1.0, 0.0, -s, 0.0, c),
            Vector3::zeros(),
        )
    }

    /// 绕 Z 轴旋转（弧度）
    pub fn rot_z(rz: f64) -> Self {
        let (s, c) = rz.sin_cos();
        Pose::from_parts(
            Matrix3::new(c, -s, 0.0, s, c, 0.0, 0.0, 0.0, 1.0),
            Vector3::zeros(),
        )
    }

    /// 由旋转块和平移向量构造（内部使用，调用方保证旋转块合法）
    fn from_parts(rotation: Matrix3<f64>, translation: Vector3<f64>) -> Self {
        let mut matrix = Matrix4::identity();
        matrix.fixed_view_mut::<3, 3>(0, 0).copy_from(&rotation);
        matrix.fixed_view_mut::<3, 1>(0, 3).copy_from(&translation);
        Pose { matrix }
    }

    /// 从 4×4 矩阵构造，校验齐次位姿的全部约束
    ///
    /// # 错误
    ///
    /// - `GeometryError::MalformedPose`: 含非有限值、末行不是 `[0,0,0,1]`、
    ///   旋转块非正交或行列式不为 +1
    pub fn from_matrix(matrix: Matrix4<f64>) -> Result<Self> {
        if matrix.iter().any(|v| !v.is_finite()) {
            return Err(GeometryError::malformed("matrix contains non-finite entries"));
        }

        let bottom = [matrix[(3, 0)], matrix[(3, 1)], matrix[(3, 2)], matrix[(3, 3)]];
        let expected = [0.0, 0.0, 0.0, 1.0];
        if bottom
            .iter()
            .zip(expected.iter())
            .any(|(a, b)| (a - b).abs() > ORTHONORMAL_TOLERANCE)
        {
            return Err(GeometryError::malformed(format!(
                "bottom row must be [0, 0, 0, 1], got {:?}",
                bottom
            )));
        }

        let rotation: Matrix3<f64> = matrix.fixed_view::<3, 3>(0, 0).into_owned();
        let deviation = (rotation.transpose() * rotation - Matrix3::identity()).amax();
        if deviation > ORTHONORMAL_TOLERANCE {
            return Err(GeometryError::malformed(format!(
                "rotation block is not orthonormal (max |RᵀR - I| = {:.3e})",
                deviation
            )));
        }

        let det = rotation.determinant();
        if det <= 0.0 {
            return Err(GeometryError::malformed(format!(
                "rotation block is a reflection (det = {:.6})",
                det
            )));
        }

        Ok(Pose { matrix })
    }

    /// 从按行排列的数据构造（`rows × cols` 必须为 4×4）
    pub fn from_row_slice(rows: usize, cols: usize, data: &[f64]) -> Result<Self> {
        if rows != 4 || cols != 4 || data.len() != 16 {
            return Err(GeometryError::InvalidPose { rows, cols });
        }
        Pose::from_matrix(Matrix4::from_row_slice(data))
    }

    /// 从位置 + 欧拉角（度）构造
    ///
    /// 结果等于 `T(x,y,z) ∘ Rx(rx) ∘ Ry(ry) ∘ Rz(rz)`，此组合顺序不可更改。
    pub fn from_euler(e: EulerPose) -> Self {
        let (srx, crx) = e.rx.to_radians().sin_cos();
        let (sry, cry) = e.ry.to_radians().sin_cos();
        let (srz, crz) = e.rz.to_radians().sin_cos();

        let rotation = Matrix3::new(
            cry * crz,
            -cry * srz,
            sry,
            crx * srz + crz * srx * sry,
            crx * crz - srx * sry * srz,
            -cry * srx,
            srx * srz - crx * crz * sry,
            crz * srx + crx * sry * srz,
            crx * cry,
        );
        Pose::from_parts(rotation, Vector3::new(e.x, e.y, e.z))
    }

    /// 提取位置 + 欧拉角（度），约定同 [`Pose::from_euler`]
    ///
    /// 平移直接取自最后一列。当 |sin(ry)| 在 [`GIMBAL_LOCK_TOLERANCE`] 内达到 1 时
    /// （万向节锁），令 `rx = 0`，`rz` 由剩余元素的 `atan2` 求得，绝不除以接近零的余弦。
    ///
    /// 返回的 `ry` 范围为 [-90°, 90°]。
    pub fn to_euler(&self) -> EulerPose {
        let m = &self.matrix;
        let sy = m[(0, 2)];

        let (rx, ry, rz) = if sy >= 1.0 - GIMBAL_LOCK_TOLERANCE {
            (0.0, std::f64::consts::FRAC_PI_2, m[(1, 0)].atan2(m[(1, 1)]))
        } else if sy <= -1.0 + GIMBAL_LOCK_TOLERANCE {
            (0.0, -std::f64::consts::FRAC_PI_2, m[(1, 0)].atan2(m[(1, 1)]))
        } else {
            // atan2 对同一正因子 cos(ry) 不敏感，因此无需相除
            let cy = m[(0, 0)].hypot(m[(0, 1)]);
            (
                (-m[(1, 2)]).atan2(m[(2, 2)]),
                sy.atan2(cy),
                (-m[(0, 1)]).atan2(m[(0, 0)]),
            )
        };

        EulerPose::new(
            m[(0, 3)],
            m[(1, 3)],
            m[(2, 3)],
            rx.to_degrees(),
            ry.to_degrees(),
            rz.to_degrees(),
        )
    }

    /// 从 `[x, y, z, r, p, w]`（度）构造
    ///
    /// 结果等于 `T(x,y,z) ∘ Rz(w) ∘ Ry(p) ∘ Rx(r)`。
    pub fn from_xyzrpw(e: EulerPose) -> Self {
        let (sa, ca) = e.rx.to_radians().sin_cos();
        let (sb, cb) = e.ry.to_radians().sin_cos();
        let (sc, cc) = e.rz.to_radians().sin_cos();

        let rotation = Matrix3::new(
            cb * cc,
            cc * sa * sb - ca * sc,
            sa * sc + ca * cc * sb,
            cb * sc,
            ca * cc + sa * sb * sc,
            ca * sb * sc - cc * sa,
            -sb,
            cb * sa,
            ca * cb,
        );
        Pose::from_parts(rotation, Vector3::new(e.x, e.y, e.z))
    }

    /// 提取 `[x, y, z, r, p, w]`（度），约定同 [`Pose::from_xyzrpw`]
    pub fn to_xyzrpw(&self) -> EulerPose {
        let m = &self.matrix;
        let (r, p, w) = if m[(2, 0)] > 1.0 - XYZRPW_GIMBAL_TOLERANCE {
            (
                0.0,
                -std::f64::consts::FRAC_PI_2,
                (-m[(1, 2)]).atan2(m[(1, 1)]),
            )
        } else if m[(2, 0)] < -1.0 + XYZRPW_GIMBAL_TOLERANCE {
            (0.0, std::f64::consts::FRAC_PI_2, m[(1, 2)].atan2(m[(1, 1)]))
        } else {
            (
                m[(2, 1)].atan2(m[(2, 2)]),
                (-m[(2, 0)]).atan2(m[(0, 0)].hypot(m[(1, 0)])),
                m[(1, 0)].atan2(m[(0, 0)]),
            )
        };

        EulerPose::new(
            m[(0, 3)],
            m[(1, 3)],
            m[(2, 3)],
            r.to_degrees(),
            p.to_degrees(),
            w.to_degrees(),
        )
    }

    /// 从位置 + 四元数构造
    pub fn from_quaternion(position: Point3D, q: Quaternion) -> Self {
        Pose::from_parts(q.to_rotation(), position.into())
    }

    /// 旋转部分的四元数（180° 附近数值稳定）
    pub fn to_quaternion(&self) -> Quaternion {
        Quaternion::from_rotation(&self.rotation())
    }

    /// 位置 + 四元数 `[x, y, z, qw, qx, qy, qz]`
    pub fn to_xyz_quaternion(&self) -> [f64; 7] {
        let p = self.position();
        let q = self.to_quaternion();
        [p.x, p.y, p.z, q.w, q.x, q.y, q.z]
    }

    /// 从位置 + 旋转向量 `[x, y, z, u, v, w]`（旋转向量单位为弧度）构造
    pub fn from_rotation_vector(xyzuvw: [f64; 6]) -> Self {
        let [x, y, z, u, v, w] = xyzuvw;
        let q = Quaternion::from_rotation_vector(Vector3::new(u, v, w));
        Pose::from_quaternion(Point3D::new(x, y, z), q)
    }

    /// 提取位置 + 旋转向量 `[x, y, z, u, v, w]`
    ///
    /// 经由四元数求解，180° 旋转时也能得到稳定的旋转轴。
    pub fn to_rotation_vector(&self) -> [f64; 6] {
        let p = self.position();
        let v = self.to_quaternion().to_rotation_vector();
        [p.x, p.y, p.z, v.x, v.y, v.z]
    }

    /// 位姿组合（标准矩阵乘法）：`self ∘ other`
    pub fn compose(&self, other: &Pose) -> Pose {
        Pose {
            matrix: self.matrix * other.matrix,
        }
    }

    /// 齐次位姿求逆
    ///
    /// 旋转块取转置，平移为 `-Rᵀ·t`。不做一般矩阵求逆。
    pub fn inverse(&self) -> Pose {
        let rt = self.rotation().transpose();
        let t: Vector3<f64> = self.position().into();
        Pose::from_parts(rt, -(rt * t))
    }

    /// 相对工具坐标系的偏移：`self ∘ T(x,y,z) ∘ Rx ∘ Ry ∘ Rz`（角度为度）
    pub fn rel_tool(&self, offset: EulerPose) -> Pose {
        self.compose(&Pose::from_euler(offset))
    }

    /// 相对参考坐标系的偏移：`T(x,y,z) ∘ Rx ∘ Ry ∘ Rz ∘ self`（角度为度）
    pub fn offset(&self, offset: EulerPose) -> Pose {
        Pose::from_euler(offset).compose(self)
    }

    /// 对点做齐次变换
    pub fn transform_point(&self, p: Point3D) -> Point3D {
        let v: Vector3<f64> = p.into();
        let t: Vector3<f64> = self.position().into();
        (self.rotation() * v + t).into()
    }

    /// 平移部分（最后一列）
    pub fn position(&self) -> Point3D {
        Point3D::new(
            self.matrix[(0, 3)],
            self.matrix[(1, 3)],
            self.matrix[(2, 3)],
        )
    }

    /// 覆盖平移部分，保持旋转不变
    ///
    /// `p` 必须是有限值（调试构建中断言）。
    pub fn set_position(&mut self, p: Point3D) {
        debug_assert!(p.is_finite(), "pose position must be finite, got {}", p);
        self.matrix[(0, 3)] = p.x;
        self.matrix[(1, 3)] = p.y;
        self.matrix[(2, 3)] = p.z;
    }

    /// 返回平移被替换的副本
    pub fn with_position(&self, p: Point3D) -> Pose {
        let mut pose = *self;
        pose.set_position(p);
        pose
    }

    /// 3×3 旋转块
    pub fn rotation(&self) -> Matrix3<f64> {
        self.matrix.fixed_view::<3, 3>(0, 0).into_owned()
    }

    /// 只保留平移的位姿
    pub fn translation_part(&self) -> Pose {
        let p = self.position();
        Pose::translation(p.x, p.y, p.z)
    }

    /// 只保留旋转的位姿
    pub fn rotation_part(&self) -> Pose {
        self.with_position(Point3D::ZERO)
    }

    /// 工具 X 轴方向（旋转块第一列）
    pub fn x_axis(&self) -> Point3D {
        self.column(0)
    }

    /// 工具 Y 轴方向（旋转块第二列）
    pub fn y_axis(&self) -> Point3D {
        self.column(1)
    }

    /// 工具 Z 轴方向（旋转块第三列）
    pub fn z_axis(&self) -> Point3D {
        self.column(2)
    }

    fn column(&self, k: usize) -> Point3D {
        Point3D::new(self.matrix[(0, k)], self.matrix[(1, k)], self.matrix[(2, k)])
    }

    /// 精确等于单位位姿
    pub fn is_identity(&self) -> bool {
        self.matrix == Matrix4::identity()
    }

    /// 所有元素差的绝对值均不超过 `tolerance`
    pub fn approx_eq(&self, other: &Pose, tolerance: f64) -> bool {
        (self.matrix - other.matrix).amax() <= tolerance
    }

    /// 底层 4×4 矩阵
    pub fn matrix(&self) -> &Matrix4<f64> {
        &self.matrix
    }

    /// 按行展开的 16 个元素
    pub fn to_row_array(&self) -> [f64; 16] {
        let mut out = [0.0; 16];
        for r in 0..4 {
            for c in 0..4 {
                out[r * 4 + c] = self.matrix[(r, c)];
            }
        }
        out
    }
}

impl Default for Pose {
    fn default() -> Self {
        Pose::identity()
    }
}

impl Mul for Pose {
    type Output = Pose;
    fn mul(self, rhs: Pose) -> Pose {
        self.compose(&rhs)
    }
}

impl TryFrom<Matrix4<f64>> for Pose {
    type Error = GeometryError;
    fn try_from(m: Matrix4<f64>) -> Result<Self> {
        Pose::from_matrix(m)
    }
}

impl TryFrom<&DMatrix<f64>> for Pose {
    type Error = GeometryError;
    fn try_from(m: &DMatrix<f64>) -> Result<Self> {
        if m.nrows() != 4 || m.ncols() != 4 {
            return Err(GeometryError::InvalidPose {
                rows: m.nrows(),
                cols: m.ncols(),
            });
        }
        Pose::from_matrix(m.fixed_view::<4, 4>(0, 0).into_owned())
    }
}

impl TryFrom<DMatrix<f64>> for Pose {
    type Error = GeometryError;
    fn try_from(m: DMatrix<f64>) -> Result<Self> {
        Pose::try_from(&m)
    }
}

impl From<EulerPose> for Pose {
    fn from(e: EulerPose) -> Self {
        Pose::from_euler(e)
    }
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_euler())
    }
}

/// 对任意尺寸矩阵求齐次逆
///
/// # 错误
///
/// - `GeometryError::InvalidPose`: 矩阵不是 4×4
/// - `GeometryError::MalformedPose`: 不是合法的齐次位姿
pub fn invert_matrix(m: &DMatrix<f64>) -> Result<Pose> {
    Pose::try_from(m).map(|pose| pose.inverse())
}

/// 从任意尺寸矩阵提取位置 + 欧拉角（度）
///
/// 错误同 [`invert_matrix`]。
pub fn euler_from_matrix(m: &DMatrix<f64>) -> Result<EulerPose> {
    Pose::try_from(m).map(|pose| pose.to_euler())
}
