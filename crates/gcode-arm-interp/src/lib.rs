//! # gcode-arm Interpreter
//!
//! 逐行 G-code 解释器
//!
//! 支持的词：`G0 G1 G2 G3 G28`、`M3 M5`、`X Y Z R F`。`;` 之后为注释。
//! 其他词默认跳过，严格模式下使整行失败。
//!
//! ## 模块
//!
//! - `config`: [`InterpreterConfig`]（TOML）
//! - `error`: [`InterpreterError`]
//! - `parse`: 行解析 [`parse_line`]
//! - `interpreter`: 状态机 [`Interpreter`]

pub mod config;
pub mod error;
pub mod interpreter;
pub mod parse;

pub use config::{DEFAULT_FEED_RATE, InterpreterConfig};
pub use error::{InterpreterError, Result};
pub use interpreter::{Interpreter, LineOutcome, LineReport};
pub use parse::{ParsedLine, Word, parse_line, strip_comment};
