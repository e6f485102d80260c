//! 运行模式
//!
//! - One-shot 模式：`run` / `exec` 每次创建新的解释器（见 `commands`）
//! - REPL 模式：交互式 Shell，解释器状态跨行保持

pub mod repl;
