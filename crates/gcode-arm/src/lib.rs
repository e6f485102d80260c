//! gcode-arm - 机械臂 G-code 运动前端
//!
//! 把文本 G-code 行翻译为机器人位姿命令：解析一行、更新轴状态、选择运动模式、
//! 构造目标位姿并向机器人协作者发出一次执行调用。
//!
//! # 架构设计
//!
//! 从底层到高层：
//!
//! - **几何层** (`geometry`): 4×4 齐次位姿、欧拉角/四元数转换、三点圆弧中间点
//! - **机器人层** (`robot`): 协作者 trait、运动策略、仿真机器人
//! - **解释器层** (`interp`): 行解析与状态机、配置
//!
//! # 快速开始
//!
//! ```rust
//! use gcode_arm::prelude::*;
//!
//! let mut interp = Interpreter::new(SimulatedRobot::new());
//! for result in interp.run_program("G0 X0 Y0\nG1 X10 F200\nG2 X20 R5\n") {
//!     result?;
//! }
//! assert_eq!(interp.robot().records().len(), 3);
//! # Ok::<(), InterpreterError>(())
//! ```

pub mod logging;
pub mod prelude;

// 各层完整模块
pub use gcode_arm_geometry as geometry;
pub use gcode_arm_interp as interp;
pub use gcode_arm_robot as robot;

// 几何层常用类型
pub use gcode_arm_geometry::{
    EulerPose, GeometryError, Point3D, Pose, Quaternion, RotationSense, arc_center,
    euler_from_matrix, invert_matrix, secondary_point,
};

// 机器人层
pub use gcode_arm_robot::{
    ActuationError, ActuationRecord, Axis, AxisState, MotionCommand, MotionError, MotionMode,
    Robot, RunMode, SimulatedRobot, WaitPolicy,
};

// 解释器层
pub use gcode_arm_interp::{
    Interpreter, InterpreterConfig, InterpreterError, LineOutcome, LineReport, parse_line,
};
