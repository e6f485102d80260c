//! 日志初始化
//!
//! 库内部只用 `tracing` 宏记录日志，不安装订阅者。应用程序启动时调用一次 [`init`]：
//!
//! - 安装 `tracing_subscriber::fmt` 订阅者，过滤规则取自 `RUST_LOG`，
//!   未设置时使用 [`DEFAULT_FILTER`]
//! - 通过 `tracing-log` 把 `log` 记录转发到同一订阅者
//!
//! 重复调用是无害的：第二次起直接返回 `false`。
//!
//! ```rust
//! gcode_arm::logging::init();
//! tracing::info!("interpreter ready");
//! ```

use tracing_subscriber::EnvFilter;

/// 默认过滤规则
pub const DEFAULT_FILTER: &str = "gcode_arm=info";

/// 使用默认过滤规则初始化日志
///
/// 返回本次调用是否安装了订阅者。
pub fn init() -> bool {
    init_with_filter(DEFAULT_FILTER)
}

/// 使用指定的默认过滤规则初始化日志（`RUST_LOG` 优先）
///
/// 返回本次调用是否安装了订阅者。
pub fn init_with_filter(default_directives: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directives))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        return false;
    }

    // log → tracing 桥接；已有 logger 时保留原 logger
    if let Err(e) = tracing_log::LogTracer::builder()
        .with_max_level(log::LevelFilter::Trace)
        .init()
    {
        tracing::debug!("log bridge not installed: {}", e);
    }
    true
}
