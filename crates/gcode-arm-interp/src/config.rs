//! 解释器配置
//!
//! TOML 示例：
//!
//! ```toml
//! strict = false
//! wait = "blocking"          # 或 "fire_and_forget"
//! default_feed_rate = 100.0
//! run_mode = "simulate"      # 可选：simulate | run_robot | make_robot_program
//! ```
//!
//! 缺省字段取默认值。

use crate::error::{InterpreterError, Result};
use gcode_arm_robot::{RunMode, WaitPolicy};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 默认进给速度
pub const DEFAULT_FEED_RATE: f64 = 100.0;

/// 解释器配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterpreterConfig {
    /// 严格模式：不支持的词使整行失败（默认 false，静默跳过）
    pub strict: bool,
    /// 执行调用的等待策略
    pub wait: WaitPolicy,
    /// 初始进给速度（必须 > 0）
    pub default_feed_rate: f64,
    /// 创建解释器时设置的运行模式（`None` 表示不设置）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_mode: Option<RunMode>,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            strict: false,
            wait: WaitPolicy::Blocking,
            default_feed_rate: DEFAULT_FEED_RATE,
            run_mode: None,
        }
    }
}

impl InterpreterConfig {
    /// 从 TOML 字符串解析并校验
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)
            .map_err(|e| InterpreterError::config(format!("invalid TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// 从文件加载并校验
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            InterpreterError::config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// 序列化为 TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| InterpreterError::config(format!("cannot serialize: {}", e)))
    }

    /// 校验配置
    pub fn validate(&self) -> Result<()> {
        if !self.default_feed_rate.is_finite() || self.default_feed_rate <= 0.0 {
            return Err(InterpreterError::config(format!(
                "default_feed_rate must be a positive number, got {}",
                self.default_feed_rate
            )));
        }
        Ok(())
    }

    /// 设置严格模式
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// 设置等待策略
    pub fn with_wait(mut self, wait: WaitPolicy) -> Self {
        self.wait = wait;
        self
    }

    /// 设置运行模式
    pub fn with_run_mode(mut self, mode: RunMode) -> Self {
        self.run_mode = Some(mode);
        self
    }
}
