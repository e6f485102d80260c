//! 配置管理命令
//!
//! CLI 配置文件位于 `<config_dir>/gcode-arm/config.toml`：
//!
//! ```toml
//! [interpreter]
//! strict = false
//! wait = "blocking"
//! default_feed_rate = 100.0
//!
//! [simulator]
//! reach_limit = 900.0
//! initial_pose = [0.0, 0.0, 0.0, 0.0, 0.0, 0.0]
//! ```

use anyhow::{Context, Result};
use clap::Subcommand;
use gcode_arm::{EulerPose, Interpreter, InterpreterConfig, Pose, SimulatedRobot};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// 配置目录
fn config_dir() -> Result<PathBuf> {
    let mut path = dirs::config_dir().ok_or_else(|| anyhow::anyhow!("无法确定配置目录"))?;

    path.push("gcode-arm");
    Ok(path)
}

/// 默认配置文件路径
pub fn default_config_file() -> Result<PathBuf> {
    let mut path = config_dir()?;
    path.push("config.toml");
    Ok(path)
}

/// 仿真机器人配置
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// 工作半径（mm），超出时执行调用失败
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reach_limit: Option<f64>,

    /// 初始位姿 `[x, y, z, rx, ry, rz]`（mm / 度）
    pub initial_pose: [f64; 6],
}

/// CLI 配置
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// 解释器配置
    pub interpreter: InterpreterConfig,

    /// 仿真机器人配置
    pub simulator: SimulatorConfig,
}

impl CliConfig {
    /// 加载配置：指定路径必须存在；默认路径不存在时使用默认配置
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let path = default_config_file()?;
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    Ok(Self::default())
                }
            },
        }
    }

    /// 从文件加载并校验
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("读取配置文件失败: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("解析配置文件失败: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// 保存到文件（自动创建父目录）
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("创建配置目录失败")?;
        }

        let content = format!(
            "# gcode-arm CLI Configuration\n\n{}",
            toml::to_string_pretty(self).context("序列化配置失败")?
        );
        fs::write(path, content).context("写入配置文件失败")?;

        Ok(())
    }

    /// 校验配置
    pub fn validate(&self) -> Result<()> {
        self.interpreter.validate()?;

        if let Some(limit) = self.simulator.reach_limit
            && !(limit.is_finite() && limit > 0.0)
        {
            anyhow::bail!("simulator.reach_limit 必须为正数，得到 {}", limit);
        }
        if self.simulator.initial_pose.iter().any(|v| !v.is_finite()) {
            anyhow::bail!("simulator.initial_pose 含有非有限值");
        }

        Ok(())
    }

    /// 按配置创建仿真机器人上的解释器
    ///
    /// `strict` 为 true 时覆盖配置文件中的 `interpreter.strict`。
    pub fn build_interpreter(&self, strict: bool) -> Result<Interpreter<SimulatedRobot>> {
        let pose = Pose::from_euler(EulerPose::from_array(self.simulator.initial_pose));
        let mut robot = SimulatedRobot::with_pose(pose);
        if let Some(limit) = self.simulator.reach_limit {
            robot = robot.with_reach_limit(limit);
        }

        let mut interpreter = self.interpreter.clone();
        interpreter.strict |= strict;

        Interpreter::with_config(robot, interpreter).context("创建解释器失败")
    }
}

/// 配置命令
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// 显示当前生效的配置
    Show,

    /// 写入默认配置文件
    Init {
        /// 覆盖已存在的配置文件
        #[arg(short, long)]
        force: bool,
    },

    /// 显示配置文件路径
    Path,
}

impl ConfigCommand {
    pub fn execute(self, path: Option<&Path>) -> Result<()> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => default_config_file()?,
        };

        match self {
            ConfigCommand::Show => Self::show_(&path),

            ConfigCommand::Init { force } => Self::init_(&path, force),

            ConfigCommand::Path => {
                println!("{}", path.display());
                Ok(())
            },
        }
    }

    fn show_(path: &Path) -> Result<()> {
        let config = if path.exists() {
            println!("# 配置文件: {}", path.display());
            CliConfig::load_from(path)?
        } else {
            println!("# 配置文件不存在，使用默认配置: {}", path.display());
            CliConfig::default()
        };

        print!("{}", toml::to_string_pretty(&config).context("序列化配置失败")?);
        Ok(())
    }

    fn init_(path: &Path, force: bool) -> Result<()> {
        if path.exists() && !force {
            anyhow::bail!("配置文件已存在: {}（使用 --force 覆盖）", path.display());
        }

        CliConfig::default().save_to(path)?;
        println!("✅ 已写入默认配置: {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gcode_arm::{Robot, RunMode, WaitPolicy};

    #[test]
    fn test_parse_full_config() {
        let config: CliConfig = toml::from_str(
            r#"
            [interpreter]
            strict = true
            wait = "fire_and_forget"
            default_feed_rate = 250.0
            run_mode = "run_robot"

            [simulator]
            reach_limit = 500.0
            initial_pose = [10.0, 0.0, 300.0, 180.0, 0.0, 0.0]
            "#,
        )
        .unwrap();

        assert!(config.interpreter.strict);
        assert_eq!(config.interpreter.wait, WaitPolicy::FireAndForget);
        assert_eq!(config.interpreter.run_mode, Some(RunMode::RunRobot));
        assert_eq!(config.simulator.reach_limit, Some(500.0));
        config.validate().unwrap();
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: CliConfig = toml::from_str("").unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.interpreter.default_feed_rate, 100.0);
    }

    #[test]
    fn test_invalid_reach_limit_rejected() {
        let mut config = CliConfig::default();
        config.simulator.reach_limit = Some(-1.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = CliConfig::default();
        config.simulator.reach_limit = Some(800.0);
        config.save_to(&path).unwrap();

        assert_eq!(CliConfig::load_from(&path).unwrap(), config);
        assert_eq!(CliConfig::resolve(Some(&path)).unwrap(), config);
    }

    #[test]
    fn test_explicit_missing_path_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(CliConfig::resolve(Some(&dir.path().join("absent.toml"))).is_err());
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        ConfigCommand::Init { force: false }.execute(Some(&path)).unwrap();
        assert!(ConfigCommand::Init { force: false }.execute(Some(&path)).is_err());
        ConfigCommand::Init { force: true }.execute(Some(&path)).unwrap();
    }

    #[test]
    fn test_build_interpreter_applies_simulator() {
        let mut config = CliConfig::default();
        config.simulator.initial_pose = [1.0, 2.0, 3.0, 0.0, 0.0, 90.0];
        config.interpreter.run_mode = Some(RunMode::MakeRobotProgram);

        let interp = config.build_interpreter(true).unwrap();
        assert!(interp.config().strict);
        assert_eq!(interp.robot().run_mode(), RunMode::MakeRobotProgram);
        let position = interp.robot().current_pose().unwrap().position();
        assert_eq!(position.to_array(), [1.0, 2.0, 3.0]);
    }
}
