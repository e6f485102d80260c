//! exec 命令
//!
//! 执行命令行给出的 G-code 行

use anyhow::Result;
use clap::Args;

use crate::commands::config::CliConfig;
use crate::commands::run::run_lines;

/// 行执行命令参数
#[derive(Args, Debug)]
pub struct ExecCommand {
    /// G-code 行（每个参数一行，如 "G1 X10 Y20"）
    #[arg(required = true)]
    pub lines: Vec<String>,

    /// 严格模式：不支持的词使整行失败
    #[arg(long)]
    pub strict: bool,

    /// 失败时继续执行
    #[arg(long)]
    pub continue_on_error: bool,
}

impl ExecCommand {
    /// 执行
    pub fn execute(&self, config: &CliConfig) -> Result<()> {
        let mut interp = config.build_interpreter(self.strict)?;

        let summary = run_lines(
            &mut interp,
            self.lines.iter().map(String::as_str),
            self.continue_on_error,
        );
        summary.print();
        println!("  终点轴状态: {}", interp.axis_state());
        println!("  进给速度: {}", interp.feed_rate());

        summary.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exec(lines: &[&str], strict: bool) -> ExecCommand {
        ExecCommand {
            lines: lines.iter().map(|s| s.to_string()).collect(),
            strict,
            continue_on_error: false,
        }
    }

    #[test]
    fn test_exec_lines() {
        let cmd = exec(&["G0 X0 Y0 Z0", "G2 X10 R10", "G28"], false);
        cmd.execute(&CliConfig::default()).unwrap();
    }

    #[test]
    fn test_exec_reports_failure() {
        let cmd = exec(&["G2 X10 R4"], false);
        assert!(cmd.execute(&CliConfig::default()).is_err());
    }

    #[test]
    fn test_exec_reach_limit() {
        let mut config = CliConfig::default();
        config.simulator.reach_limit = Some(100.0);
        assert!(exec(&["G0 X50"], false).execute(&config).is_ok());
        assert!(exec(&["G0 X500"], false).execute(&config).is_err());
    }
}
