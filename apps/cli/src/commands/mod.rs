//! 命令定义和实现

pub mod arc;
pub mod config;
pub mod exec;
pub mod pose;
pub mod run;

pub use arc::ArcCommand;
pub use config::ConfigCommand;
pub use exec::ExecCommand;
pub use pose::PoseCommand;
pub use run::RunCommand;
