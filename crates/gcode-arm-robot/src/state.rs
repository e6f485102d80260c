//! 轴状态
//!
//! 每个解释器独占一个 [`AxisState`]：在解释器创建时初始化，逐词原地修改，
//! 跨行保留，只有 G28 会把 X/Y/Z 归零。

use gcode_arm_geometry::Point3D;
use std::fmt;

/// 轴标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// X 平移
    X,
    /// Y 平移
    Y,
    /// Z 平移
    Z,
    /// 圆弧半径
    R,
}

impl Axis {
    /// 全部轴
    pub const ALL: [Axis; 4] = [Axis::X, Axis::Y, Axis::Z, Axis::R];

    /// 由代码字母解析（大小写不敏感）
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'X' => Some(Axis::X),
            'Y' => Some(Axis::Y),
            'Z' => Some(Axis::Z),
            'R' => Some(Axis::R),
            _ => None,
        }
    }

    /// 代码字母
    pub fn letter(self) -> char {
        match self {
            Axis::X => 'X',
            Axis::Y => 'Y',
            Axis::Z => 'Z',
            Axis::R => 'R',
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// 轴目标值（X/Y/Z 毫米，R 为圆弧半径）
///
/// 默认全部为 0。
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisState {
    /// X 目标
    pub x: f64,
    /// Y 目标
    pub y: f64,
    /// Z 目标
    pub z: f64,
    /// 圆弧半径
    pub r: f64,
}

impl AxisState {
    /// 创建轴状态
    pub const fn new(x: f64, y: f64, z: f64, r: f64) -> Self {
        AxisState { x, y, z, r }
    }

    /// 读取单轴
    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
            Axis::R => self.r,
        }
    }

    /// 写入单轴
    pub fn set(&mut self, axis: Axis, value: f64) {
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
            Axis::Z => self.z = value,
            Axis::R => self.r = value,
        }
    }

    /// 回零：X/Y/Z 归零，R 保持不变
    pub fn home(&mut self) {
        self.x = 0.0;
        self.y = 0.0;
        self.z = 0.0;
    }

    /// 目标平移 `(x, y, z)`
    pub fn target(&self) -> Point3D {
        Point3D::new(self.x, self.y, self.z)
    }

    /// 圆弧半径（R 轴）
    pub fn radius(&self) -> f64 {
        self.r
    }
}

impl fmt::Display for AxisState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "X={:.3} Y={:.3} Z={:.3} R={:.3}",
            self.x, self.y, self.z, self.r
        )
    }
}
