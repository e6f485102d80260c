//! arc 命令
//!
//! 圆弧诊断：打印 G2/G3 会发出的中间点和隐含的圆心

use anyhow::{Context, Result};
use clap::Args;
use gcode_arm::{Point3D, RotationSense, arc_center, secondary_point};

/// 圆弧命令参数
#[derive(Args, Debug)]
pub struct ArcCommand {
    #[arg(allow_negative_numbers = true)]
    pub x0: f64,
    #[arg(allow_negative_numbers = true)]
    pub y0: f64,
    #[arg(allow_negative_numbers = true)]
    pub z0: f64,
    #[arg(allow_negative_numbers = true)]
    pub x1: f64,
    #[arg(allow_negative_numbers = true)]
    pub y1: f64,
    #[arg(allow_negative_numbers = true)]
    pub z1: f64,

    /// 半径（负值表示大于 180° 的长弧）
    #[arg(allow_negative_numbers = true)]
    pub radius: f64,

    /// 逆时针（G3），默认顺时针（G2）
    #[arg(long)]
    pub ccw: bool,
}

impl ArcCommand {
    fn sense(&self) -> RotationSense {
        if self.ccw {
            RotationSense::CounterClockwise
        } else {
            RotationSense::Clockwise
        }
    }

    /// 计算中间点与圆心
    pub fn solve(&self) -> Result<(Point3D, Point3D)> {
        let start = Point3D::new(self.x0, self.y0, self.z0);
        let target = Point3D::new(self.x1, self.y1, self.z1);
        let sense = self.sense();

        let via = secondary_point(start, target, self.radius, sense).context("无法计算圆弧中间点")?;
        let center = arc_center(start, target, self.radius, sense).context("无法计算圆心")?;
        Ok((via, center))
    }

    pub fn execute(&self) -> Result<()> {
        let (via, center) = self.solve()?;

        println!("⭕ {} 圆弧, 半径 {}", self.sense(), self.radius);
        println!("  起点:   ({:.3}, {:.3}, {:.3})", self.x0, self.y0, self.z0);
        println!("  中间点: {}", via);
        println!("  终点:   ({:.3}, {:.3}, {:.3})", self.x1, self.y1, self.z1);
        println!("  圆心:   {}", center);
        Ok(())
    }
}
