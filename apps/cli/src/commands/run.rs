//! run 命令
//!
//! 针对仿真机器人运行 G-code 程序文件

use anyhow::{Context, Result};
use clap::Args;
use gcode_arm::{Interpreter, LineOutcome, Robot};
use std::fs;
use std::path::PathBuf;

use crate::commands::config::CliConfig;

/// 程序执行命令参数
#[derive(Args, Debug)]
pub struct RunCommand {
    /// G-code 文件路径
    pub file: PathBuf,

    /// 严格模式：不支持的词使整行失败
    #[arg(long)]
    pub strict: bool,

    /// 失败时继续执行
    #[arg(long)]
    pub continue_on_error: bool,
}

/// 执行结果汇总
#[derive(Debug, Default)]
pub struct ProgramSummary {
    /// 已处理的行数
    pub lines: usize,
    /// 发出的执行调用数
    pub moves: usize,
    /// 失败的行（行号从 1 开始，错误信息）
    pub failed: Vec<(usize, String)>,
}

impl ProgramSummary {
    /// 打印汇总
    pub fn print(&self) {
        println!();
        println!("📊 执行结果:");
        println!("  处理行数: {}", self.lines);
        println!("  运动命令: {}", self.moves);
        println!("  失败: {}", self.failed.len());

        if !self.failed.is_empty() {
            println!();
            println!("❌ 失败的行:");
            for (line_no, err) in &self.failed {
                println!("  第 {} 行: {}", line_no, err);
            }
        }
    }

    /// 有失败行时转为错误（进程以非零状态退出）
    pub fn into_result(self) -> Result<()> {
        if self.failed.is_empty() {
            Ok(())
        } else {
            anyhow::bail!("{} 行执行失败", self.failed.len())
        }
    }
}

/// 逐行解释，打印每一次执行调用
///
/// `continue_on_error` 为 false 时在第一个失败行停止。
pub fn run_lines<'a, R, I>(
    interp: &mut Interpreter<R>,
    lines: I,
    continue_on_error: bool,
) -> ProgramSummary
where
    R: Robot,
    I: IntoIterator<Item = &'a str>,
{
    let mut summary = ProgramSummary::default();

    for (idx, line) in lines.into_iter().enumerate() {
        let line_no = idx + 1;
        summary.lines += 1;

        match interp.interpret_line(line) {
            Ok(report) => {
                if !report.skipped.is_empty() {
                    println!("  {:>4} ⚠️  跳过: {}", line_no, report.skipped.join(" "));
                }
                if let LineOutcome::Moved(command) = report.outcome {
                    summary.moves += 1;
                    println!("  {:>4} ➡️  {}", line_no, command);
                }
            },
            Err(err) => {
                eprintln!("  {:>4} ❌ {}", line_no, err);
                summary.failed.push((line_no, err.to_string()));
                if !continue_on_error {
                    break;
                }
            },
        }
    }

    summary
}

impl RunCommand {
    /// 执行程序
    pub fn execute(&self, config: &CliConfig) -> Result<()> {
        println!("📜 加载程序: {}", self.file.display());

        let program = fs::read_to_string(&self.file)
            .with_context(|| format!("读取程序文件失败: {}", self.file.display()))?;
        let mut interp = config.build_interpreter(self.strict)?;

        tracing::debug!("Running {} with {:?}", self.file.display(), interp.config());

        let summary = run_lines(&mut interp, program.lines(), self.continue_on_error);
        summary.print();
        println!("  终点轴状态: {}", interp.axis_state());

        summary.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gcode_arm::{MotionCommand, SimulatedRobot};
    use std::io::Write;

    const PROGRAM: &str = "; test program\n\
                           G0 X0 Y0 Z10\n\
                           G1 X12abc\n\
                           G1 X5\n";

    #[test]
    fn test_stops_at_first_error() {
        let mut interp = Interpreter::new(SimulatedRobot::new());
        let summary = run_lines(&mut interp, PROGRAM.lines(), false);

        assert_eq!(summary.lines, 3);
        assert_eq!(summary.moves, 1);
        assert_eq!(summary.failed.len(), 1);
        assert_eq!(summary.failed[0].0, 3);
        assert!(summary.into_result().is_err());
    }

    #[test]
    fn test_continue_on_error() {
        let mut interp = Interpreter::new(SimulatedRobot::new());
        let summary = run_lines(&mut interp, PROGRAM.lines(), true);

        assert_eq!(summary.lines, 4);
        assert_eq!(summary.moves, 2);
        assert_eq!(summary.failed.len(), 1);

        let last = interp.robot().records().last().map(|r| r.command);
        assert!(matches!(last, Some(MotionCommand::Linear { .. })));
    }

    #[test]
    fn test_execute_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "G0 X1 Y2 Z3").unwrap();
        writeln!(file, "G2 X11 Y2 R10").unwrap();

        let cmd = RunCommand {
            file: file.path().to_path_buf(),
            strict: false,
            continue_on_error: false,
        };
        cmd.execute(&CliConfig::default()).unwrap();
    }

    #[test]
    fn test_execute_missing_file() {
        let cmd = RunCommand {
            file: PathBuf::from("/nonexistent/program.gcode"),
            strict: false,
            continue_on_error: true,
        };
        assert!(cmd.execute(&CliConfig::default()).is_err());
    }

    #[test]
    fn test_strict_flag_overrides_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "G1 X1 S1000").unwrap();

        let permissive = RunCommand {
            file: file.path().to_path_buf(),
            strict: false,
            continue_on_error: false,
        };
        permissive.execute(&CliConfig::default()).unwrap();

        let strict = RunCommand {
            strict: true,
            ..permissive
        };
        assert!(strict.execute(&CliConfig::default()).is_err());
    }
}
