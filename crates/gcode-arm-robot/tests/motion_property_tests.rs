//! 运动策略的属性测试

use gcode_arm_geometry::{EulerPose, Point3D, Pose};
use gcode_arm_robot::{AxisState, MotionCommand, MotionMode, SimulatedRobot, WaitPolicy};
use proptest::prelude::*;

fn start_pose() -> impl Strategy<Value = Pose> {
    (
        -100.0..100.0f64,
        -100.0..100.0f64,
        -100.0..100.0f64,
        -180.0..180.0f64,
        -89.0..89.0f64,
        -180.0..180.0f64,
    )
        .prop_map(|(x, y, z, rx, ry, rz)| Pose::from_euler(EulerPose::new(x, y, z, rx, ry, rz)))
}

fn straight_mode() -> impl Strategy<Value = MotionMode> {
    prop_oneof![Just(MotionMode::Rapid), Just(MotionMode::Linear)]
}

proptest! {
    /// 直线/快速模式：目标平移等于轴状态，旋转与当前位姿完全一致
    #[test]
    fn straight_moves_keep_rotation(
        current in start_pose(),
        mode in straight_mode(),
        x in -500.0..500.0f64,
        y in -500.0..500.0f64,
        z in -500.0..500.0f64,
    ) {
        let command = mode.plan(&current, &AxisState::new(x, y, z, 0.0)).unwrap();
        prop_assert_eq!(command.target().position(), Point3D::new(x, y, z));
        prop_assert_eq!(command.target().rotation(), current.rotation());
    }

    /// 圆弧模式：中间点与目标共享当前旋转
    #[test]
    fn arc_moves_keep_rotation(
        current in start_pose(),
        dx in 1.0..200.0f64,
        extra in 0.0..100.0f64,
        clockwise in any::<bool>(),
    ) {
        let start = current.position();
        let axes = AxisState::new(start.x + dx, start.y, start.z, dx / 2.0 + extra);
        let mode = if clockwise { MotionMode::ClockwiseArc } else { MotionMode::CounterClockwiseArc };
        let command = mode.plan(&current, &axes).unwrap();
        let via = command.via().copied();
        prop_assert!(via.is_some());
        if let Some(via) = via {
            prop_assert_eq!(via.rotation(), current.rotation());
        }
        prop_assert_eq!(command.target().rotation(), current.rotation());
    }

    /// 相同输入派发两次得到两次相同的执行调用
    #[test]
    fn dispatch_is_idempotent(
        mode in straight_mode(),
        x in -500.0..500.0f64,
        y in -500.0..500.0f64,
    ) {
        let mut robot = SimulatedRobot::new();
        let axes = AxisState::new(x, y, 0.0, 0.0);
        let first = mode.dispatch(&mut robot, &axes, WaitPolicy::Blocking).unwrap();
        let second = mode.dispatch(&mut robot, &axes, WaitPolicy::Blocking).unwrap();
        prop_assert_eq!(first, second);
        prop_assert_eq!(robot.records().len(), 2);
        prop_assert_eq!(robot.records()[0], robot.records()[1]);
    }
}

#[test]
fn circular_dispatch_moves_to_target() {
    let mut robot = SimulatedRobot::new();
    let axes = AxisState::new(10.0, 0.0, 0.0, 10.0);
    let command = MotionMode::CounterClockwiseArc
        .dispatch(&mut robot, &axes, WaitPolicy::FireAndForget)
        .unwrap();
    assert!(matches!(command, MotionCommand::Circular { .. }));
    let via = command.via().map(|p| p.position()).unwrap();
    assert!(via.y < 0.0);
    assert_eq!(robot.records()[0].wait, WaitPolicy::FireAndForget);
}
