//! REPL 模式（交互式 Shell）
//!
//! 每行输入要么是 G-code 行，要么是以 `:` 开头的 Shell 命令。
//! 解释器在整个会话中保持，轴状态跨行累积。

use anyhow::Result;
use gcode_arm::{Interpreter, LineOutcome, Robot, SimulatedRobot};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::commands::config::CliConfig;

/// 历史记录文件
const HISTORY_FILE: &str = ".gcode_arm_history";

/// 一次输入之后 REPL 的动作
#[derive(Debug, PartialEq, Eq)]
pub enum ReplAction {
    /// 继续读取
    Continue,
    /// 退出
    Quit,
}

/// REPL 会话（保持解释器）
pub struct ReplSession {
    interp: Interpreter<SimulatedRobot>,
}

impl ReplSession {
    /// 创建新会话
    pub fn new(interp: Interpreter<SimulatedRobot>) -> Self {
        Self { interp }
    }

    /// 处理一行输入
    pub fn handle_line(&mut self, line: &str) -> Result<ReplAction> {
        let line = line.trim();

        let Some(command) = line.strip_prefix(':') else {
            self.interpret(line)?;
            return Ok(ReplAction::Continue);
        };

        match command.trim() {
            "quit" | "exit" | "q" => return Ok(ReplAction::Quit),

            "state" => self.print_state(),

            "pose" => self.print_pose()?,

            "help" => print_help(),

            other => anyhow::bail!("未知命令: :{}", other),
        }

        Ok(ReplAction::Continue)
    }

    fn interpret(&mut self, line: &str) -> Result<()> {
        let report = self.interp.interpret_line(line)?;

        if !report.skipped.is_empty() {
            println!("⚠️  跳过: {}", report.skipped.join(" "));
        }
        match report.outcome {
            LineOutcome::Moved(command) => println!("➡️  {}", command),
            LineOutcome::StateUpdated => println!("✅ {}", self.interp.axis_state()),
            LineOutcome::Blank => {},
        }
        Ok(())
    }

    fn print_state(&self) {
        println!("📊 解释器状态:");
        println!("  轴: {}", self.interp.axis_state());
        println!("  进给速度: {}", self.interp.feed_rate());
        println!(
            "  主轴: {}",
            if self.interp.spindle_on() { "开" } else { "关" }
        );
        println!("  严格模式: {}", self.interp.config().strict);
        println!("  已执行运动: {}", self.interp.robot().records().len());
    }

    fn print_pose(&self) -> Result<()> {
        let robot = self.interp.robot();
        let pose = robot.current_pose()?;

        println!("📍 当前位姿: {}", pose);
        println!("🧭 四元数: {}", pose.to_quaternion());
        let joints = robot.current_joints()?;
        let joints: Vec<String> = joints.iter().map(|j| format!("{:.3}", j)).collect();
        println!("🦾 关节: [{}]", joints.join(", "));
        Ok(())
    }
}

/// 运行 REPL 模式
pub fn run_repl(config: &CliConfig, strict: bool) -> Result<()> {
    let mut session = ReplSession::new(config.build_interpreter(strict)?);

    let mut rl = DefaultEditor::new()
        .map_err(|e| anyhow::anyhow!("Failed to initialize readline: {}", e))?;
    rl.load_history(HISTORY_FILE).ok(); // 首次运行时不存在

    println!("gcode-arm CLI v{} - 交互式 Shell", env!("CARGO_PKG_VERSION"));
    println!("输入 G-code 行执行，':help' 查看帮助，':quit' 退出");
    println!();

    loop {
        match rl.readline("gcode> ") {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line.as_str());

                match session.handle_line(&line) {
                    Ok(ReplAction::Quit) => break,
                    Ok(ReplAction::Continue) => {},
                    Err(err) => {
                        eprintln!("❌ Error: {}", err);
                        print_help_hint(&line);
                    },
                }
            },

            // Ctrl+C：放弃当前输入
            Err(ReadlineError::Interrupted) => println!("^C"),

            // Ctrl+D：退出
            Err(ReadlineError::Eof) => break,

            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            },
        }
    }

    rl.save_history(HISTORY_FILE).ok();
    println!("👋 再见！");
    Ok(())
}

/// 打印帮助信息
fn print_help() {
    println!("G-code:");
    println!("  G0/G1 X.. Y.. Z..             快速/直线运动");
    println!("  G2/G3 X.. Y.. R..             顺时针/逆时针圆弧");
    println!("  G28                           回零");
    println!("  M3 / M5                       主轴开/关");
    println!("  F..                           进给速度");
    println!();
    println!("Shell 命令:");
    println!("  :state                        显示轴状态、进给、主轴");
    println!("  :pose                         显示机器人当前位姿");
    println!("  :help                         显示帮助");
    println!("  :quit                         退出");
    println!();
    println!("快捷键:");
    println!("  Ctrl+C                        放弃当前输入");
    println!("  Ctrl+D                        退出");
    println!();
}

/// 提供基于错误的帮助提示
fn print_help_hint(line: &str) {
    let line = line.trim_start().to_ascii_uppercase();
    if line.starts_with("G2") || line.starts_with("G3") {
        eprintln!("💡 提示: 圆弧半径必须不小于弦长的一半，例如 'G2 X10 R5'");
    } else if line.starts_with(':') {
        eprintln!("💡 提示: 输入 ':help' 查看所有命令");
    } else {
        eprintln!("💡 提示: 每个词由字母和数值组成，例如 'G1 X10 Y-2.5'");
    }
}
