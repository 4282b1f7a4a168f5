use std::sync::atomic::{AtomicU8, Ordering};

use crate::bindings::LogLevel;

static MAX_LOG_LEVEL: AtomicU8 = AtomicU8::new(LoggerLevel::Info as u8);

#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub enum LoggerLevel {
    None = 0,
    Error = 1,
    Warn = 2,
    Info = 3,
    Debug = 4,
}

impl From<u8> for LoggerLevel {
    fn from(val: u8) -> Self {
        match val {
            0 => LoggerLevel::None,
            1 => LoggerLevel::Error,
            2 => LoggerLevel::Warn,
            3 => LoggerLevel::Info,
            _ => LoggerLevel::Debug,
        }
    }
}

/// Level-gated logger.
///
/// On the web, logs are forwarded to the JavaScript console through `jsLog`.
/// Everywhere else they go through `tracing`, so a native host (or a test) can install whatever
/// subscriber it wants.
pub struct Logger {}

impl Logger {
    pub fn set_logger_level(new_level: LoggerLevel) {
        MAX_LOG_LEVEL.store(new_level as u8, Ordering::Relaxed);
    }

    pub fn info(text: &str) {
        if is_enabled(LoggerLevel::Info) {
            emit(LogLevel::Info, text);
        }
    }

    pub fn error(text: &str) {
        if is_enabled(LoggerLevel::Error) {
            emit(LogLevel::Error, text);
        }
    }

    pub fn warn(text: &str) {
        if is_enabled(LoggerLevel::Warn) {
            emit(LogLevel::Warn, text);
        }
    }

    pub fn debug(text: &str) {
        if is_enabled(LoggerLevel::Debug) {
            emit(LogLevel::Debug, text);
        }
    }

    pub fn lazy_debug(func: &dyn Fn() -> String) {
        if is_enabled(LoggerLevel::Debug) {
            emit(LogLevel::Debug, &func());
        }
    }
}

#[inline(always)]
fn is_enabled(level: LoggerLevel) -> bool {
    MAX_LOG_LEVEL.load(Ordering::Relaxed) >= level as u8
}

#[cfg(target_arch = "wasm32")]
fn emit(level: LogLevel, text: &str) {
    crate::bindings::jsLog(level, text);
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(level: LogLevel, text: &str) {
    match level {
        LogLevel::Error => tracing::error!(target: "wasp_buffer", "{text}"),
        LogLevel::Warn => tracing::warn!(target: "wasp_buffer", "{text}"),
        LogLevel::Info => tracing::info!(target: "wasp_buffer", "{text}"),
        LogLevel::Debug => tracing::debug!(target: "wasp_buffer", "{text}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_conversion() {
        assert_eq!(LoggerLevel::from(0), LoggerLevel::None);
        assert_eq!(LoggerLevel::from(2), LoggerLevel::Warn);
        assert_eq!(LoggerLevel::from(4), LoggerLevel::Debug);
        assert_eq!(LoggerLevel::from(200), LoggerLevel::Debug);
        assert!(LoggerLevel::Error < LoggerLevel::Info);
    }
}
