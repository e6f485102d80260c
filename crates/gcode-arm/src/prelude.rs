//! Prelude - 常用类型的便捷导入
//!
//! ```rust
//! use gcode_arm::prelude::*;
//! ```

// 几何
pub use crate::geometry::{EulerPose, Point3D, Pose, RotationSense};

// 机器人
pub use crate::robot::{
    AxisState, MotionCommand, MotionMode, Robot, RunMode, SimulatedRobot, WaitPolicy,
};

// 解释器
pub use crate::interp::{Interpreter, InterpreterConfig, LineOutcome};

// 错误类型
pub use crate::geometry::GeometryError;
pub use crate::interp::InterpreterError;
pub use crate::robot::{ActuationError, MotionError};
