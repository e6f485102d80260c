//! 三点圆弧的中间点计算
//!
//! 机器人圆弧指令（MoveC）需要三个点：起点、中间点、终点。G-code 只给出起点、终点和
//! 半径 `R`，这里求出位于圆弧上的中间点：
//!
//! ```text
//!                 secondary
//!               .-- ● --.
//!            .´     ↑     `.
//!   start ●        n·h       ● target
//!                   M
//! ```
//!
//! 1. 弦中点 `M = (start + target) / 2`，弦向量 `D = target - start`
//! 2. XY 平面内的法向量：顺时针 `(-Dy, Dx, 0)`，逆时针 `(Dy, -Dx, 0)`，归一化
//! 3. 中点到中间点的距离 `h = R - sqrt(R² - (|D|/2)²)`，按等价形式
//!    `h = c² / (R + sqrt(R² - c²))`（`c = |D|/2`）计算，大半径时不会相消为 0，
//!    `R²` 也不会溢出
//! 4. 中间点 `M + n·h`，结果必须是有限值
//!
//! **平面假设**：法向量只在 XY 平面内构造，起点与终点应处于同一 Z 平面。
//! 这是圆弧模式的已知范围限制，不做推广。
//!
//! **负半径**：按 G-code 惯例选取大于 180° 的圆弧，旋转方向不变，
//! 此时 `h = |R| + sqrt(R² - (|D|/2)²)`。

use crate::constants::DEGENERATE_CHORD_TOLERANCE;
use crate::error::{GeometryError, Result};
use crate::point::Point3D;
use std::fmt;

/// 圆弧旋转方向（俯视 XY 平面）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RotationSense {
    /// 顺时针（G2）
    Clockwise,
    /// 逆时针（G3）
    CounterClockwise,
}

impl fmt::Display for RotationSense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RotationSense::Clockwise => write!(f, "CW"),
            RotationSense::CounterClockwise => write!(f, "CCW"),
        }
    }
}

/// 圆弧的公共中间量
struct ArcFrame {
    midpoint: Point3D,
    normal: Point3D,
    /// 半弦长 |D|/2
    half_chord: f64,
    /// 中点到圆心的距离 sqrt(R² - (|D|/2)²)
    apothem: f64,
}

fn arc_frame(
    start: Point3D,
    target: Point3D,
    radius: f64,
    sense: RotationSense,
) -> Result<ArcFrame> {
    if !start.is_finite() || !target.is_finite() {
        return Err(GeometryError::degenerate("arc endpoints must be finite"));
    }

    let midpoint = (start + target) / 2.0;
    let chord = target - start;

    let normal = match sense {
        RotationSense::Clockwise => Point3D::new(-chord.y, chord.x, 0.0),
        RotationSense::CounterClockwise => Point3D::new(chord.y, -chord.x, 0.0),
    };
    let length = normal.norm();
    if !(length >= DEGENERATE_CHORD_TOLERANCE) {
        return Err(GeometryError::degenerate(format!(
            "chord from {} to {} has no length in the XY plane; arc normal is undefined",
            start, target
        )));
    }
    let normal = normal / length;

    let half_chord = chord.norm() / 2.0;
    if !radius.is_finite() || radius.abs() < half_chord {
        return Err(GeometryError::InvalidArcRadius { radius, half_chord });
    }
    // sqrt(R² - c²) = |R|·sqrt((1 - k)(1 + k))，k = c/|R| ∈ [0, 1]
    let r = radius.abs();
    let k = half_chord / r;
    let apothem = r * ((1.0 - k) * (1.0 + k)).max(0.0).sqrt();

    Ok(ArcFrame {
        midpoint,
        normal,
        half_chord,
        apothem,
    })
}

/// 结果点必须是有限值（极大的坐标或半径会溢出）
fn finite_point(point: Point3D, what: &str) -> Result<Point3D> {
    if point.is_finite() {
        Ok(point)
    } else {
        Err(GeometryError::degenerate(format!(
            "arc {} is not finite: {}",
            what, point
        )))
    }
}

/// 计算圆弧中间点
///
/// # 参数
///
/// - `start`: 起点
/// - `target`: 终点
/// - `radius`: 圆弧半径（负值选取大圆弧）
/// - `sense`: 旋转方向
///
/// # 错误
///
/// - `GeometryError::DegenerateGeometry`: 弦在 XY 平面内长度为零，法向量无定义
/// - `GeometryError::InvalidArcRadius`: `|radius|` 小于半弦长，或半径不是有限值
///
/// # 示例
///
/// ```rust
/// use gcode_arm_geometry::{Point3D, RotationSense, secondary_point};
///
/// let p = secondary_point(
///     Point3D::new(0.0, 0.0, 0.0),
///     Point3D::new(10.0, 0.0, 0.0),
///     10.0,
///     RotationSense::Clockwise,
/// )?;
/// assert!((p.x - 5.0).abs() < 1e-12);
/// assert!(p.y > 0.0);
/// # Ok::<(), gcode_arm_geometry::GeometryError>(())
/// ```
pub fn secondary_point(
    start: Point3D,
    target: Point3D,
    radius: f64,
    sense: RotationSense,
) -> Result<Point3D> {
    let frame = arc_frame(start, target, radius, sense)?;
    let r = radius.abs();
    let offset = if radius >= 0.0 {
        frame.half_chord * (frame.half_chord / (r + frame.apothem))
    } else {
        r + frame.apothem
    };
    finite_point(frame.midpoint + frame.normal * offset, "secondary point")
}

/// 计算 [`secondary_point`] 所隐含的圆心
///
/// 圆心到起点、终点和中间点的距离都等于 `|radius|`。
pub fn arc_center(
    start: Point3D,
    target: Point3D,
    radius: f64,
    sense: RotationSense,
) -> Result<Point3D> {
    let frame = arc_frame(start, target, radius, sense)?;
    let side = if radius >= 0.0 { -1.0 } else { 1.0 };
    finite_point(frame.midpoint + frame.normal * (side * frame.apothem), "center")
}
