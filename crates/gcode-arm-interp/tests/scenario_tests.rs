//! 解释器端到端场景测试
//!
//! 使用记录式仿真机器人，检查每行发出的执行调用。

use approx::assert_relative_eq;
use gcode_arm_geometry::{EulerPose, Point3D, Pose};
use gcode_arm_interp::{Interpreter, InterpreterError, LineOutcome};
use gcode_arm_robot::{AxisState, MotionCommand, Robot, SimulatedRobot};

fn tilted_robot() -> SimulatedRobot {
    SimulatedRobot::with_pose(Pose::from_euler(EulerPose::new(
        100.0, 50.0, 200.0, 180.0, 0.0, 45.0,
    )))
}

#[test]
fn linear_move_with_comment() {
    let robot = tilted_robot();
    let start_rotation = robot.current_pose().unwrap().rotation();
    let mut interp = Interpreter::new(robot);

    interp.interpret_line("G1 X10 Y20 Z5 ; move").unwrap();

    let records = interp.robot().records();
    assert_eq!(records.len(), 1);
    match records[0].command {
        MotionCommand::Linear { target } => {
            assert_eq!(target.position(), Point3D::new(10.0, 20.0, 5.0));
            assert_eq!(target.rotation(), start_rotation);
        },
        other => panic!("expected MoveLinear, got {other}"),
    }
}

#[test]
fn home_moves_to_pre_reset_position() {
    let mut interp = Interpreter::new(SimulatedRobot::new());
    interp.interpret_line("X7 Y8 Z9 R3").unwrap();
    interp.interpret_line("G28").unwrap();

    let records = interp.robot().records();
    assert_eq!(records.len(), 1);
    assert!(matches!(records[0].command, MotionCommand::Rapid { .. }));
    assert_eq!(
        records[0].command.target().position(),
        Point3D::new(7.0, 8.0, 9.0)
    );
    assert_eq!(*interp.axis_state(), AxisState::new(0.0, 0.0, 0.0, 3.0));
}

#[test]
fn axis_words_persist_until_motion() {
    let mut interp = Interpreter::new(SimulatedRobot::new());
    interp.interpret_line("Y2 Z3").unwrap();

    let report = interp.interpret_line("X5").unwrap();
    assert_eq!(report.outcome, LineOutcome::StateUpdated);
    assert!(interp.robot().records().is_empty());

    interp.interpret_line("G1").unwrap();
    let records = interp.robot().records();
    assert_eq!(records.len(), 1);
    assert!(matches!(records[0].command, MotionCommand::Linear { .. }));
    assert_eq!(
        records[0].command.target().position(),
        Point3D::new(5.0, 2.0, 3.0)
    );
}

#[test]
fn same_line_twice_gives_identical_calls() {
    let mut interp = Interpreter::new(tilted_robot());
    interp.interpret_line("G1 X10 Y20 Z5").unwrap();
    interp.interpret_line("G1 X10 Y20 Z5").unwrap();

    let records = interp.robot().records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0], records[1]);
}

#[test]
fn clockwise_arc_program() {
    let mut interp = Interpreter::new(SimulatedRobot::new());
    let results = interp.run_program(
        "; half-circle-ish arc in the XY plane\n\
         G0 X0 Y0 Z0\n\
         G2 X10 R10\n",
    );
    assert!(results.iter().all(|r| r.is_ok()));

    let records = interp.robot().records();
    assert_eq!(records.len(), 2);
    let MotionCommand::Circular { via, target } = records[1].command else {
        panic!("expected MoveCircular");
    };
    assert_relative_eq!(via.position().x, 5.0, epsilon = 1e-12);
    assert_relative_eq!(via.position().y, 10.0 - 75f64.sqrt(), epsilon = 1e-12);
    assert_eq!(target.position(), Point3D::new(10.0, 0.0, 0.0));
}

#[test]
fn counter_clockwise_arc_mirrors() {
    let mut interp = Interpreter::new(SimulatedRobot::new());
    interp.interpret_line("G3 X10 R10").unwrap();
    let via = interp.robot().records()[0].command.via().copied().unwrap();
    assert_relative_eq!(via.position().y, -(10.0 - 75f64.sqrt()), epsilon = 1e-12);
}

#[test]
fn arc_radius_too_small_is_rejected_without_rollback() {
    let mut interp = Interpreter::new(SimulatedRobot::new());
    let err = interp.interpret_line("G2 X10 R4.9").unwrap_err();
    assert!(matches!(err, InterpreterError::Motion { .. }));
    assert!(interp.robot().records().is_empty());
    assert_eq!(interp.axis_state().x, 10.0);

    // 下一行照常处理
    interp.interpret_line("G2 R5").unwrap();
    assert_eq!(interp.robot().records().len(), 1);
}

#[test]
fn huge_arc_radius_dispatches_finite_via_point() {
    let mut interp = Interpreter::new(SimulatedRobot::new());
    interp.interpret_line("G2 X10 R1e200").unwrap();
    interp.interpret_line("G0 X0").unwrap();
    interp.interpret_line("G2 X10 R1e9").unwrap();

    let records = interp.robot().records();
    assert_eq!(records.len(), 3);
    for record in [&records[0], &records[2]] {
        let via = record.command.via().copied().unwrap().position();
        assert!(via.is_finite(), "via {via} must be finite");
        assert_eq!(via.x, 5.0);
        // 中间点偏离弦，三点不共线
        assert!(via.y > 0.0);
    }
}

#[test]
fn arc_overflowing_major_radius_is_rejected() {
    let mut interp = Interpreter::new(SimulatedRobot::new());
    let err = interp.interpret_line("G2 X10 R-1e308").unwrap_err();
    assert!(err.geometry_error().is_some_and(|e| e.is_arc_error()));
    assert!(interp.robot().records().is_empty());
}

#[test]
fn arc_with_zero_chord_is_degenerate() {
    let mut interp = Interpreter::new(SimulatedRobot::new());
    let err = interp.interpret_line("G3 X0 Y0 R5").unwrap_err();
    assert!(err.geometry_error().is_some_and(|e| e.is_arc_error()));
}

#[test]
fn malformed_numeric_word_applies_nothing() {
    let mut interp = Interpreter::new(SimulatedRobot::new());
    let err = interp.interpret_line("G1 X10 Y12abc F300").unwrap_err();
    assert!(err.is_parse_error());
    assert_eq!(err.line(), Some("G1 X10 Y12abc F300"));
    assert_eq!(*interp.axis_state(), AxisState::default());
    assert_eq!(interp.feed_rate(), 100.0);
    assert!(interp.robot().records().is_empty());
}

#[test]
fn run_reader_reads_file() {
    use std::io::{BufReader, Write};

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "M3 F1200").unwrap();
    writeln!(file, "G0 X1 Y1 Z1").unwrap();
    writeln!(file, "G1 X2").unwrap();
    writeln!(file, "M5").unwrap();

    let mut interp = Interpreter::new(SimulatedRobot::new());
    let reader = BufReader::new(std::fs::File::open(file.path()).unwrap());
    let results = interp.run_reader(reader).unwrap();

    assert_eq!(results.len(), 4);
    assert!(results.iter().all(|r| r.is_ok()));
    assert_eq!(interp.feed_rate(), 1200.0);
    assert!(!interp.spindle_on());
    assert_eq!(interp.robot().records().len(), 2);
}
