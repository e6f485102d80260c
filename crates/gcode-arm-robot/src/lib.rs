//! # gcode-arm Robot
//!
//! 机器人协作者边界与运动策略层
//!
//! ## 模块
//!
//! - `error`: 执行错误 [`ActuationError`] 与派发错误 [`MotionError`]
//! - `robot`: 协作者 trait [`Robot`]、[`WaitPolicy`]、[`RunMode`]
//! - `state`: 轴状态 [`AxisState`]
//! - `motion`: 运动模式 [`MotionMode`] 与规划结果 [`MotionCommand`]
//! - `sim`: 记录式仿真机器人 [`SimulatedRobot`]
//!
//! ```rust
//! use gcode_arm_robot::{AxisState, MotionMode, Robot, SimulatedRobot, WaitPolicy};
//!
//! let mut robot = SimulatedRobot::new();
//! let axes = AxisState::new(10.0, 20.0, 5.0, 0.0);
//! MotionMode::Linear.dispatch(&mut robot, &axes, WaitPolicy::Blocking)?;
//! assert_eq!(robot.current_pose()?.position().x, 10.0);
//! # Ok::<(), gcode_arm_robot::MotionError>(())
//! ```

pub mod error;
pub mod motion;
pub mod robot;
pub mod sim;
pub mod state;

pub use error::{ActuationError, MotionError, Result};
pub use motion::{MotionCommand, MotionMode};
pub use robot::{Robot, RunMode, WaitPolicy};
pub use sim::{ActuationRecord, SimulatedRobot};
pub use state::{Axis, AxisState};
