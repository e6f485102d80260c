//! G-code 解释器状态机
//!
//! 每行的处理顺序：
//!
//! 1. 完整解析并校验（[`parse_line`]），失败则整行拒绝、状态不变
//! 2. 按出现顺序应用轴词、进给、主轴
//! 3. 若本行出现 G 词，以最后一个 G 词的模式派发一次运动（轴词与 G 词的相对顺序无关）
//! 4. 若本行含 G28，在派发之后把 X/Y/Z 归零（R 不变），派发失败时同样归零
//!
//! 运动失败不回滚已应用的轴状态，解释器保持可用。

use crate::config::InterpreterConfig;
use crate::error::{InterpreterError, Result};
use crate::parse::{ParsedLine, Word, parse_line};
use gcode_arm_robot::{AxisState, MotionCommand, Robot};
use std::io::BufRead;
use tracing::{debug, info, warn};

/// 一行的执行结果
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    /// 空行或纯注释
    Blank,
    /// 只更新了状态，没有运动
    StateUpdated,
    /// 发出了一次执行调用
    Moved(MotionCommand),
}

impl LineOutcome {
    /// 本行发出的命令
    pub fn command(&self) -> Option<&MotionCommand> {
        match self {
            LineOutcome::Moved(command) => Some(command),
            _ => None,
        }
    }
}

/// 一行的执行报告
#[derive(Debug, Clone, PartialEq)]
pub struct LineReport {
    /// 执行结果
    pub outcome: LineOutcome,
    /// 宽松模式下跳过的词
    pub skipped: Vec<String>,
}

/// G-code 解释器
///
/// 独占一个机器人句柄和一份轴状态。需要驱动两条独立轴流时，创建两个解释器。
///
/// # 示例
///
/// ```rust
/// use gcode_arm_interp::Interpreter;
/// use gcode_arm_robot::SimulatedRobot;
///
/// let mut interp = Interpreter::new(SimulatedRobot::new());
/// interp.interpret_line("X5")?;
/// let report = interp.interpret_line("G1 ; go")?;
/// assert_eq!(report.outcome.command().map(|c| c.target().position().x), Some(5.0));
/// assert_eq!(interp.robot().records().len(), 1);
/// # Ok::<(), gcode_arm_interp::InterpreterError>(())
/// ```
#[derive(Debug)]
pub struct Interpreter<R: Robot> {
    robot: R,
    config: InterpreterConfig,
    axes: AxisState,
    feed_rate: f64,
    spindle_on: bool,
}

impl<R: Robot> Interpreter<R> {
    /// 使用默认配置创建解释器
    pub fn new(robot: R) -> Self {
        let config = InterpreterConfig::default();
        Interpreter {
            robot,
            feed_rate: config.default_feed_rate,
            config,
            axes: AxisState::default(),
            spindle_on: false,
        }
    }

    /// 使用指定配置创建解释器
    ///
    /// 配置了 `run_mode` 时立即设置机器人运行模式。
    ///
    /// # 错误
    ///
    /// - `InterpreterError::Config`: 配置无效，或机器人拒绝运行模式
    pub fn with_config(mut robot: R, config: InterpreterConfig) -> Result<Self> {
        config.validate()?;
        if let Some(mode) = config.run_mode {
            robot.set_run_mode(mode).map_err(|e| {
                InterpreterError::config(format!("failed to set run mode {}: {}", mode, e))
            })?;
            info!("Robot run mode set to: {}", mode);
        }

        Ok(Interpreter {
            robot,
            feed_rate: config.default_feed_rate,
            config,
            axes: AxisState::default(),
            spindle_on: false,
        })
    }

    /// 解释并执行一行
    ///
    /// # 错误
    ///
    /// - `InterpreterError::Parse` / `UnsupportedWord`: 整行被拒绝，状态不变
    /// - `InterpreterError::Motion`: 轴状态已应用，运动失败
    pub fn interpret_line(&mut self, line: &str) -> Result<LineReport> {
        let parsed = parse_line(line, self.config.strict).inspect_err(|e| {
            warn!("Rejected line: {}", e);
        })?;

        if parsed.is_blank() {
            return Ok(LineReport {
                outcome: LineOutcome::Blank,
                skipped: Vec::new(),
            });
        }

        self.apply_words(&parsed);
        let skipped: Vec<String> = parsed.unsupported().map(str::to_string).collect();

        let Some(mode) = parsed.motion() else {
            return Ok(LineReport {
                outcome: LineOutcome::StateUpdated,
                skipped,
            });
        };

        let result = mode.dispatch(&mut self.robot, &self.axes, self.config.wait);

        if parsed.homes() {
            info!("Homing all axes (G28)");
            self.axes.home();
        }

        match result {
            Ok(command) => Ok(LineReport {
                outcome: LineOutcome::Moved(command),
                skipped,
            }),
            Err(source) => {
                warn!("{} motion failed for '{}': {}", mode, parsed.text, source);
                Err(InterpreterError::Motion {
                    line: parsed.text,
                    mode,
                    source,
                })
            },
        }
    }

    fn apply_words(&mut self, parsed: &ParsedLine) {
        for word in &parsed.words {
            match word {
                Word::Axis(axis, value) => self.axes.set(*axis, *value),
                Word::Feed(feed) => {
                    info!("Setting feed rate to {}", feed);
                    self.feed_rate = *feed;
                },
                Word::Spindle(true) => {
                    info!("Spindle turned ON (M3)");
                    self.spindle_on = true;
                },
                Word::Spindle(false) => {
                    info!("Spindle turned OFF (M5)");
                    self.spindle_on = false;
                },
                Word::Unsupported(w) => debug!("Skipping unsupported word '{}'", w),
                Word::Motion { .. } => {},
            }
        }
    }

    /// 逐行执行程序文本，收集每一行的结果
    ///
    /// 某行出错不影响后续行。
    pub fn run_program(&mut self, program: &str) -> Vec<Result<LineReport>> {
        program.lines().map(|line| self.interpret_line(line)).collect()
    }

    /// 从 reader 逐行执行
    ///
    /// # 错误
    ///
    /// 读取失败时返回 `InterpreterError::Io`，已执行的行不回滚。
    pub fn run_reader<B: BufRead>(&mut self, reader: B) -> Result<Vec<Result<LineReport>>> {
        let mut results = Vec::new();
        for line in reader.lines() {
            let line = line?;
            results.push(self.interpret_line(&line));
        }
        Ok(results)
    }

    /// 当前轴状态
    pub fn axis_state(&self) -> &AxisState {
        &self.axes
    }

    /// 当前进给速度
    pub fn feed_rate(&self) -> f64 {
        self.feed_rate
    }

    /// 主轴是否开启
    pub fn spindle_on(&self) -> bool {
        self.spindle_on
    }

    /// 当前配置
    pub fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    /// 机器人句柄
    pub fn robot(&self) -> &R {
        &self.robot
    }

    /// 可变机器人句柄
    pub fn robot_mut(&mut self) -> &mut R {
        &mut self.robot
    }

    /// 取回机器人句柄
    pub fn into_robot(self) -> R {
        self.robot
    }
}
