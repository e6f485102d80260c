//! 运动策略
//!
//! 四种运动模式共用同一契约：输入当前位姿和轴状态，输出恰好一次执行调用。
//!
//! | 模式 | G 代码 | 执行调用 |
//! |------|--------|---------|
//! | [`MotionMode::Rapid`] | G0 / G28 | `move_rapid` |
//! | [`MotionMode::Linear`] | G1 | `move_linear` |
//! | [`MotionMode::ClockwiseArc`] | G2 | `move_circular` |
//! | [`MotionMode::CounterClockwiseArc`] | G3 | `move_circular` |
//!
//! 目标位姿 = 当前位姿替换平移为 `(X, Y, Z)`，旋转保持不变。轴词只驱动平移，
//! 任何模式都不改变姿态。
//!
//! 规划（[`MotionMode::plan`]）是纯函数，不需要机器人句柄；
//! 派发（[`MotionMode::dispatch`]）读取当前位姿、规划、发出执行命令。

use crate::error::{ActuationError, Result};
use crate::robot::{Robot, WaitPolicy};
use crate::state::AxisState;
use gcode_arm_geometry::{GeometryError, Pose, RotationSense, secondary_point};
use std::fmt;
use tracing::debug;

/// 运动模式（每行临时选取，不跨行保留）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MotionMode {
    /// 快速定位
    Rapid,
    /// 直线插补
    Linear,
    /// 顺时针圆弧
    ClockwiseArc,
    /// 逆时针圆弧
    CounterClockwiseArc,
}

impl MotionMode {
    /// 由 G 代码编号映射运动模式
    ///
    /// G28 映射为 `Rapid`（回零的轴状态重置由解释器负责）。
    pub fn from_g_code(code: u32) -> Option<Self> {
        match code {
            0 | 28 => Some(MotionMode::Rapid),
            1 => Some(MotionMode::Linear),
            2 => Some(MotionMode::ClockwiseArc),
            3 => Some(MotionMode::CounterClockwiseArc),
            _ => None,
        }
    }

    /// 圆弧模式的旋转方向
    pub fn rotation_sense(self) -> Option<RotationSense> {
        match self {
            MotionMode::ClockwiseArc => Some(RotationSense::Clockwise),
            MotionMode::CounterClockwiseArc => Some(RotationSense::CounterClockwise),
            MotionMode::Rapid | MotionMode::Linear => None,
        }
    }

    /// 是否为圆弧模式
    pub fn is_arc(self) -> bool {
        self.rotation_sense().is_some()
    }

    /// 规划执行命令（纯函数）
    ///
    /// # 错误
    ///
    /// 圆弧模式下，几何无效时返回 `GeometryError::InvalidArcRadius` 或
    /// `GeometryError::DegenerateGeometry`。
    pub fn plan(
        self,
        current: &Pose,
        axes: &AxisState,
    ) -> std::result::Result<MotionCommand, GeometryError> {
        let target = current.with_position(axes.target());

        let sense = match self {
            MotionMode::Rapid => return Ok(MotionCommand::Rapid { target }),
            MotionMode::Linear => return Ok(MotionCommand::Linear { target }),
            MotionMode::ClockwiseArc => RotationSense::Clockwise,
            MotionMode::CounterClockwiseArc => RotationSense::CounterClockwise,
        };

        let via_point = secondary_point(current.position(), axes.target(), axes.radius(), sense)?;
        Ok(MotionCommand::Circular {
            via: current.with_position(via_point),
            target,
        })
    }

    /// 读取机器人当前位姿，规划并发出一次执行命令
    ///
    /// 返回已发出的命令。几何失败时不发出任何命令。
    pub fn dispatch<R: Robot + ?Sized>(
        self,
        robot: &mut R,
        axes: &AxisState,
        wait: WaitPolicy,
    ) -> Result<MotionCommand> {
        let current = robot.current_pose()?;
        let command = self.plan(&current, axes)?;
        debug!(
            "Dispatching {} motion to {} ({:?})",
            self,
            command.target().position(),
            wait
        );
        command.issue(robot, wait)?;
        Ok(command)
    }
}

impl fmt::Display for MotionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionMode::Rapid => write!(f, "Rapid"),
            MotionMode::Linear => write!(f, "Linear"),
            MotionMode::ClockwiseArc => write!(f, "ClockwiseArc"),
            MotionMode::CounterClockwiseArc => write!(f, "CounterClockwiseArc"),
        }
    }
}

/// 规划好的执行命令
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionCommand {
    /// 快速运动到目标位姿
    Rapid {
        /// 目标位姿
        target: Pose,
    },
    /// 直线运动到目标位姿
    Linear {
        /// 目标位姿
        target: Pose,
    },
    /// 经中间位姿圆弧运动到目标位姿
    Circular {
        /// 圆弧中间位姿
        via: Pose,
        /// 目标位姿
        target: Pose,
    },
}

impl MotionCommand {
    /// 目标位姿
    pub fn target(&self) -> &Pose {
        match self {
            MotionCommand::Rapid { target }
            | MotionCommand::Linear { target }
            | MotionCommand::Circular { target, .. } => target,
        }
    }

    /// 圆弧中间位姿（非圆弧命令为 `None`）
    pub fn via(&self) -> Option<&Pose> {
        match self {
            MotionCommand::Circular { via, .. } => Some(via),
            _ => None,
        }
    }

    /// 向机器人发出对应的执行调用
    pub fn issue<R: Robot + ?Sized>(
        &self,
        robot: &mut R,
        wait: WaitPolicy,
    ) -> std::result::Result<(), ActuationError> {
        match self {
            MotionCommand::Rapid { target } => robot.move_rapid(target, wait),
            MotionCommand::Linear { target } => robot.move_linear(target, wait),
            MotionCommand::Circular { via, target } => robot.move_circular(via, target, wait),
        }
    }
}

impl fmt::Display for MotionCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionCommand::Rapid { target } => write!(f, "MoveRapid {}", target),
            MotionCommand::Linear { target } => write!(f, "MoveLinear {}", target),
            MotionCommand::Circular { via, target } => {
                write!(f, "MoveCircular via {} to {}", via, target)
            },
        }
    }
}
