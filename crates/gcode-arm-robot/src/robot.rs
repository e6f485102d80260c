//! 机器人协作者接口
//!
//! 解释器只通过 [`Robot`] trait 读取当前位姿/关节，并在每行最多发出一次执行命令。
//! 它从不直接修改机器人内部状态，也不实现超时或取消：这些策略属于协作者。

use crate::error::ActuationError;
use gcode_arm_geometry::Pose;
use nalgebra::DVector;
use std::fmt;

/// 执行命令的等待策略
///
/// 进程级配置：解释器对每一次执行调用使用同一策略。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum WaitPolicy {
    /// 阻塞直到协作者确认运动完成
    #[default]
    Blocking,
    /// 只保证命令已提交，不等待完成
    FireAndForget,
}

impl WaitPolicy {
    /// 是否阻塞
    pub fn is_blocking(self) -> bool {
        matches!(self, WaitPolicy::Blocking)
    }
}

impl From<bool> for WaitPolicy {
    fn from(blocking: bool) -> Self {
        if blocking {
            WaitPolicy::Blocking
        } else {
            WaitPolicy::FireAndForget
        }
    }
}

/// 机器人运行模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RunMode {
    /// 仅仿真
    #[default]
    Simulate,
    /// 驱动真实机器人
    RunRobot,
    /// 生成离线机器人程序
    MakeRobotProgram,
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::Simulate => write!(f, "simulate"),
            RunMode::RunRobot => write!(f, "run_robot"),
            RunMode::MakeRobotProgram => write!(f, "make_robot_program"),
        }
    }
}

/// 机器人协作者
///
/// 所有执行调用都可能以 [`ActuationError`] 失败，核心层不重试。
///
/// # 示例
///
/// ```rust
/// use gcode_arm_geometry::Pose;
/// use gcode_arm_robot::{Robot, SimulatedRobot, WaitPolicy};
///
/// let mut robot = SimulatedRobot::new();
/// let target = Pose::translation(10.0, 0.0, 0.0);
/// robot.move_linear(&target, WaitPolicy::Blocking)?;
/// assert_eq!(robot.current_pose()?, target);
/// # Ok::<(), gcode_arm_robot::ActuationError>(())
/// ```
pub trait Robot {
    /// 当前末端位姿
    fn current_pose(&self) -> Result<Pose, ActuationError>;

    /// 当前关节向量
    fn current_joints(&self) -> Result<DVector<f64>, ActuationError>;

    /// 关节空间快速运动（MoveJ）
    fn move_rapid(&mut self, target: &Pose, wait: WaitPolicy) -> Result<(), ActuationError>;

    /// 直线运动（MoveL）
    fn move_linear(&mut self, target: &Pose, wait: WaitPolicy) -> Result<(), ActuationError>;

    /// 三点圆弧运动（MoveC）：从当前位姿经 `via` 到 `target`
    fn move_circular(
        &mut self,
        via: &Pose,
        target: &Pose,
        wait: WaitPolicy,
    ) -> Result<(), ActuationError>;

    /// 切换运行模式
    fn set_run_mode(&mut self, mode: RunMode) -> Result<(), ActuationError>;
}

impl<R: Robot + ?Sized> Robot for &mut R {
    fn current_pose(&self) -> Result<Pose, ActuationError> {
        (**self).current_pose()
    }

    fn current_joints(&self) -> Result<DVector<f64>, ActuationError> {
        (**self).current_joints()
    }

    fn move_rapid(&mut self, target: &Pose, wait: WaitPolicy) -> Result<(), ActuationError> {
        (**self).move_rapid(target, wait)
    }

    fn move_linear(&mut self, target: &Pose, wait: WaitPolicy) -> Result<(), ActuationError> {
        (**self).move_linear(target, wait)
    }

    fn move_circular(
        &mut self,
        via: &Pose,
        target: &Pose,
        wait: WaitPolicy,
    ) -> Result<(), ActuationError> {
        (**self).move_circular(via, target, wait)
    }

    fn set_run_mode(&mut self, mode: RunMode) -> Result<(), ActuationError> {
        (**self).set_run_mode(mode)
    }
}

impl<R: Robot + ?Sized> Robot for Box<R> {
    fn current_pose(&self) -> Result<Pose, ActuationError> {
        (**self).current_pose()
    }

    fn current_joints(&self) -> Result<DVector<f64>, ActuationError> {
        (**self).current_joints()
    }

    fn move_rapid(&mut self, target: &Pose, wait: WaitPolicy) -> Result<(), ActuationError> {
        (**self).move_rapid(target, wait)
    }

    fn move_linear(&mut self, target: &Pose, wait: WaitPolicy) -> Result<(), ActuationError> {
        (**self).move_linear(target, wait)
    }

    fn move_circular(
        &mut self,
        via: &Pose,
        target: &Pose,
        wait: WaitPolicy,
    ) -> Result<(), ActuationError> {
        (**self).move_circular(via, target, wait)
    }

    fn set_run_mode(&mut self, mode: RunMode) -> Result<(), ActuationError> {
        (**self).set_run_mode(mode)
    }
}
