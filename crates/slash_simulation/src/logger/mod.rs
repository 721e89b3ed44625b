//! Глобальный logger симуляции
//!
//! Симуляция не знает кто печатает логи: headless binary ставит ConsoleLogger
//! через `init_logger`, движковый слой может подменить sink через `set_logger`.

use once_cell::sync::Lazy;
use std::sync::Mutex;

// Sink + порог фильтрации (static: Arc не нужен)
static SINK: Lazy<Mutex<Option<Box<dyn LogPrinter>>>> = Lazy::new(|| Mutex::new(None));
static THRESHOLD: Lazy<Mutex<LogLevel>> = Lazy::new(|| Mutex::new(LogLevel::Debug));

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }
}

pub trait LogPrinter: Send + Sync {
    fn log(&self, level: LogLevel, message: &str);
}

/// Подменить sink (движковый слой). Lock poisoned → sink остаётся прежним
pub fn set_logger(logger: Box<dyn LogPrinter>) {
    if let Ok(mut sink) = SINK.lock() {
        *sink = Some(logger);
    }
}

pub fn set_log_level(level: LogLevel) {
    if let Ok(mut threshold) = THRESHOLD.lock() {
        *threshold = level;
    }
}

/// ConsoleLogger, если sink ещё не поставлен
pub fn init_logger() {
    if let Ok(mut sink) = SINK.lock() {
        if sink.is_none() {
            *sink = Some(Box::new(ConsoleLogger));
        }
    }
}

pub fn log(message: &str) {
    log_with_level(LogLevel::Debug, message);
}

pub fn log_info(message: &str) {
    log_with_level(LogLevel::Info, message);
}

pub fn log_warning(message: &str) {
    log_with_level(LogLevel::Warning, message);
}

pub fn log_error(message: &str) {
    log_with_level(LogLevel::Error, message);
}

pub fn log_with_level(level: LogLevel, message: &str) {
    let threshold = THRESHOLD.lock().map(|t| *t).unwrap_or(LogLevel::Debug);
    let Some(line) = stamp(level, threshold, message) else {
        return;
    };

    if let Ok(sink) = SINK.lock() {
        if let Some(logger) = sink.as_ref() {
            logger.log(level, &line);
        }
    }
}

/// Строка с chrono timestamp; None если уровень ниже порога
fn stamp(level: LogLevel, threshold: LogLevel, message: &str) -> Option<String> {
    if level < threshold {
        return None;
    }

    let timestamp = chrono::Local::now().format("%H:%M:%S%.3f");
    Some(format!("[{}] {}", timestamp, message))
}

/// stdout sink headless binary
pub struct ConsoleLogger;

impl LogPrinter for ConsoleLogger {
    fn log(&self, level: LogLevel, message: &str) {
        println!("[{}] {}", level.as_str(), message);
    }
}
