//! 三维点/向量
//!
//! 只作为圆弧计算的中间量使用，不持久化。

use nalgebra::Vector3;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// 三维点（毫米）
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point3D {
    /// X 坐标
    pub x: f64,
    /// Y 坐标
    pub y: f64,
    /// Z 坐标
    pub z: f64,
}

impl Point3D {
    /// 创建新的三维点
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Point3D { x, y, z }
    }

    /// 原点
    pub const ZERO: Self = Point3D::new(0.0, 0.0, 0.0);

    /// 计算向量长度（范数）
    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// XY 平面内的长度
    pub fn norm_xy(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// 点积
    pub fn dot(&self, other: &Point3D) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// 叉积
    pub fn cross(&self, other: &Point3D) -> Point3D {
        Point3D {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// 两点间距离
    pub fn distance(&self, other: &Point3D) -> f64 {
        (*self - *other).norm()
    }

    /// 所有分量都是有限值
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// 转为数组 `[x, y, z]`
    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl Add for Point3D {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Point3D::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point3D {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Point3D::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Point3D {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Point3D::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Div<f64> for Point3D {
    type Output = Self;
    #[inline]
    fn div(self, rhs: f64) -> Self {
        Point3D::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl Neg for Point3D {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Point3D::new(-self.x, -self.y, -self.z)
    }
}

impl From<Vector3<f64>> for Point3D {
    fn from(v: Vector3<f64>) -> Self {
        Point3D::new(v.x, v.y, v.z)
    }
}

impl From<Point3D> for Vector3<f64> {
    fn from(p: Point3D) -> Self {
        Vector3::new(p.x, p.y, p.z)
    }
}

impl From<[f64; 3]> for Point3D {
    fn from(a: [f64; 3]) -> Self {
        Point3D::new(a[0], a[1], a[2])
    }
}

impl fmt::Display for Point3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}
