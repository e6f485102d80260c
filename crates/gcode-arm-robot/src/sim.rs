//! 仿真机器人
//!
//! 内存中的 [`Robot`] 实现：记录每一次执行调用，并把位姿移动到目标。
//! 用于测试和 CLI 的离线运行。
//!
//! - `fail_next`: 注入一次性故障，下一次执行调用返回该错误
//! - `with_reach_limit`: 超出工作半径的目标返回 `ActuationError::Unreachable`

use crate::error::ActuationError;
use crate::motion::MotionCommand;
use crate::robot::{Robot, RunMode, WaitPolicy};
use gcode_arm_geometry::Pose;
use nalgebra::DVector;
use tracing::{debug, trace, warn};

/// 默认关节数
const DEFAULT_JOINT_COUNT: usize = 6;

/// 一次执行调用的记录
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActuationRecord {
    /// 发出的命令
    pub command: MotionCommand,
    /// 等待策略
    pub wait: WaitPolicy,
}

/// 仿真机器人
#[derive(Debug)]
pub struct SimulatedRobot {
    pose: Pose,
    joints: DVector<f64>,
    run_mode: RunMode,
    reach_limit: Option<f64>,
    pending_fault: Option<ActuationError>,
    records: Vec<ActuationRecord>,
}

impl SimulatedRobot {
    /// 位于原点、无旋转的仿真机器人
    pub fn new() -> Self {
        Self::with_pose(Pose::identity())
    }

    /// 指定初始位姿
    pub fn with_pose(pose: Pose) -> Self {
        SimulatedRobot {
            pose,
            joints: DVector::zeros(DEFAULT_JOINT_COUNT),
            run_mode: RunMode::Simulate,
            reach_limit: None,
            pending_fault: None,
            records: Vec::new(),
        }
    }

    /// 设置工作半径（目标平移到原点的距离上限，毫米）
    pub fn with_reach_limit(mut self, radius: f64) -> Self {
        self.reach_limit = Some(radius);
        self
    }

    /// 设置关节向量
    pub fn with_joints(mut self, joints: DVector<f64>) -> Self {
        self.joints = joints;
        self
    }

    /// 下一次执行调用返回 `err`（只生效一次）
    pub fn fail_next(&mut self, err: ActuationError) {
        self.pending_fault = Some(err);
    }

    /// 已记录的执行调用（按发出顺序）
    pub fn records(&self) -> &[ActuationRecord] {
        &self.records
    }

    /// 取出并清空记录
    pub fn take_records(&mut self) -> Vec<ActuationRecord> {
        std::mem::take(&mut self.records)
    }

    /// 当前运行模式
    pub fn run_mode(&self) -> RunMode {
        self.run_mode
    }

    /// 直接设置位姿（不记录）
    pub fn set_pose(&mut self, pose: Pose) {
        self.pose = pose;
    }

    fn execute(&mut self, command: MotionCommand, wait: WaitPolicy) -> Result<(), ActuationError> {
        if let Some(err) = self.pending_fault.take() {
            warn!("Simulated fault injected: {}", err);
            return Err(err);
        }

        if let Some(limit) = self.reach_limit {
            let points = [Some(command.target()), command.via()];
            for pose in points.into_iter().flatten() {
                let distance = pose.position().norm();
                if distance > limit {
                    return Err(ActuationError::Unreachable(format!(
                        "{} is {:.3} mm from the base (reach {:.3} mm)",
                        pose.position(),
                        distance,
                        limit
                    )));
                }
            }
        }

        trace!("Simulated actuation: {} ({:?})", command, wait);
        self.records.push(ActuationRecord { command, wait });
        self.pose = *command.target();
        Ok(())
    }
}

impl Default for SimulatedRobot {
    fn default() -> Self {
        Self::new()
    }
}

impl Robot for SimulatedRobot {
    fn current_pose(&self) -> Result<Pose, ActuationError> {
        Ok(self.pose)
    }

    fn current_joints(&self) -> Result<DVector<f64>, ActuationError> {
        Ok(self.joints.clone())
    }

    fn move_rapid(&mut self, target: &Pose, wait: WaitPolicy) -> Result<(), ActuationError> {
        self.execute(MotionCommand::Rapid { target: *target }, wait)
    }

    fn move_linear(&mut self, target: &Pose, wait: WaitPolicy) -> Result<(), ActuationError> {
        self.execute(MotionCommand::Linear { target: *target }, wait)
    }

    fn move_circular(
        &mut self,
        via: &Pose,
        target: &Pose,
        wait: WaitPolicy,
    ) -> Result<(), ActuationError> {
        self.execute(
            MotionCommand::Circular {
                via: *via,
                target: *target,
            },
            wait,
        )
    }

    fn set_run_mode(&mut self, mode: RunMode) -> Result<(), ActuationError> {
        debug!("Simulated robot run mode set to: {}", mode);
        self.run_mode = mode;
        Ok(())
    }
}
