//! # gcode-arm CLI
//!
//! 针对仿真机器人运行 G-code 的命令行工具。
//!
//! ## One-shot 模式（推荐用于 CI/脚本）
//!
//! ```bash
//! # 生成默认配置
//! gcode-arm-cli config init
//!
//! # 运行程序文件，打印每一次执行调用
//! gcode-arm-cli run part.gcode --strict
//!
//! # 直接执行若干行
//! gcode-arm-cli exec "G0 X0 Y0 Z0" "G2 X10 R10"
//!
//! # 几何诊断
//! gcode-arm-cli pose to-matrix 100 50 200 180 0 45
//! gcode-arm-cli arc 0 0 0 10 0 0 10 --ccw
//! ```
//!
//! ## REPL 模式（推荐用于调试）
//!
//! ```bash
//! $ gcode-arm-cli shell
//! gcode> G1 X10 Y20 F300
//! gcode> :state
//! gcode> :quit
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod modes;

use commands::config::CliConfig;
use commands::{ArcCommand, ConfigCommand, ExecCommand, PoseCommand, RunCommand};
use modes::repl::run_repl;

/// gcode-arm CLI - 机械臂 G-code 命令行工具
#[derive(Parser, Debug)]
#[command(name = "gcode-arm-cli")]
#[command(about = "Command-line front end for the gcode-arm G-code interpreter", long_about = None)]
#[command(version)]
struct Cli {
    /// 配置文件路径（默认使用平台配置目录）
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// 输出调试日志
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 配置管理
    #[command(subcommand)]
    Config(ConfigCommand),

    /// 运行 G-code 程序文件
    Run {
        #[command(flatten)]
        args: RunCommand,
    },

    /// 执行命令行给出的 G-code 行
    Exec {
        #[command(flatten)]
        args: ExecCommand,
    },

    /// 启动交互式 Shell（REPL 模式）
    Shell {
        /// 严格模式：不支持的词使整行失败
        #[arg(long)]
        strict: bool,
    },

    /// 位姿转换诊断
    #[command(subcommand)]
    Pose(PoseCommand),

    /// 圆弧中间点诊断
    Arc {
        #[command(flatten)]
        args: ArcCommand,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // 初始化日志（RUST_LOG 优先）
    let filter = if cli.verbose {
        "gcode_arm=debug"
    } else {
        gcode_arm::logging::DEFAULT_FILTER
    };
    gcode_arm::logging::init_with_filter(filter);

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Config(cmd) => cmd.execute(config_path),

        Commands::Run { args } => {
            let config = CliConfig::resolve(config_path)?;
            args.execute(&config)
        },

        Commands::Exec { args } => {
            let config = CliConfig::resolve(config_path)?;
            args.execute(&config)
        },

        Commands::Shell { strict } => {
            let config = CliConfig::resolve(config_path)?;
            run_repl(&config, strict)
        },

        Commands::Pose(cmd) => cmd.execute(),

        Commands::Arc { args } => args.execute(),
    }
}
