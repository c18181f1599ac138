//! # 日志初始化
//!
//! 库内部通过 `tracing` 记录诊断事件，二进制程序在启动时安装订阅者，
//! 输出到 stderr，避免与命令的正常输出混在一起。

use clap::ValueEnum;
use tracing::level_filters::LevelFilter;

/// `--log-level` 可选的日志级别。
#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_filter(self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

/// 安装全局 fmt 订阅者。重复调用时静默忽略。
pub fn init_logging(level: LogLevel) {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level.as_filter())
        .with_target(false)
        .try_init();
}
