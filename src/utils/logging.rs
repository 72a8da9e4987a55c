use std::io::Write;

use chrono::Local;
use env_logger::{Builder, Env};

/// Initialize the logging system.
///
/// Format: timestamp level [file:line] [module] message
pub fn init() {
    let default_level = if cfg!(debug_assertions) { "debug" } else { "info" };

    let _ = Builder::from_env(Env::default().default_filter_or(default_level))
        .format(|buf, record| {
            let level_color = match record.level() {
                log::Level::Error => "\x1b[31;1m",
                log::Level::Warn => "\x1b[33m",
                log::Level::Info => "\x1b[32m",
                log::Level::Debug => "\x1b[34m",
                log::Level::Trace => "\x1b[36m",
            };
            let reset = "\x1b[0m";

            writeln!(
                buf,
                "{} {}{} [{}:{}] [{}] {}{}",
                Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                level_color,
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.target(),
                record.args(),
                reset
            )
        })
        .try_init();
}
