//! 解释器的属性测试

use gcode_arm_geometry::Point3D;
use gcode_arm_interp::{Interpreter, LineOutcome};
use gcode_arm_robot::SimulatedRobot;
use proptest::prelude::*;

proptest! {
    /// 轴词与 G 词顺序无关：目标平移总是本行应用后的轴状态
    #[test]
    fn motion_is_resolved_last(
        x in -1000.0..1000.0f64,
        y in -1000.0..1000.0f64,
        z in -1000.0..1000.0f64,
        g_first in any::<bool>(),
    ) {
        let axes = format!("X{} Y{} Z{}", x, y, z);
        let line = if g_first { format!("G1 {}", axes) } else { format!("{} G1", axes) };

        let mut interp = Interpreter::new(SimulatedRobot::new());
        let report = interp.interpret_line(&line).unwrap();
        let command = report.outcome.command().copied();
        prop_assert!(command.is_some());
        if let Some(command) = command {
            prop_assert_eq!(command.target().position(), Point3D::new(x, y, z));
        }
    }

    /// 没有 G 词的行从不发出执行调用
    #[test]
    fn lines_without_g_words_never_move(
        x in -1000.0..1000.0f64,
        feed in 0.1..10000.0f64,
        spindle in any::<bool>(),
    ) {
        let m = if spindle { "M3" } else { "M5" };
        let line = format!("X{} F{} {} ; no motion", x, feed, m);

        let mut interp = Interpreter::new(SimulatedRobot::new());
        let report = interp.interpret_line(&line).unwrap();
        prop_assert_eq!(report.outcome, LineOutcome::StateUpdated);
        prop_assert!(interp.robot().records().is_empty());
        prop_assert_eq!(interp.axis_state().x, x);
        prop_assert_eq!(interp.feed_rate(), feed);
        prop_assert_eq!(interp.spindle_on(), spindle);
    }

    /// 任意输入都不会 panic；被拒绝的行不改变状态
    #[test]
    fn arbitrary_text_never_panics(line in "[ -~\t]{0,40}") {
        let mut interp = Interpreter::new(SimulatedRobot::new());
        let before = *interp.axis_state();
        if let Err(err) = interp.interpret_line(&line)
            && err.is_parse_error()
        {
            prop_assert_eq!(*interp.axis_state(), before);
            prop_assert!(interp.robot().records().is_empty());
        }
    }
}
