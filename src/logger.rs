// src/logger.rs
//! `log` クレートのマクロ (info! とか error!) をブラウザのコンソールに流すロガー。

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use web_sys::console;

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!("[{}] {}", record.level(), record.args());
        match record.level() {
            Level::Error => console::error_1(&line.into()),
            Level::Warn => console::warn_1(&line.into()),
            _ => crate::log(&line),
        }
    }

    fn flush(&self) {}
}

/// ロガーを登録する。2回目以降はエラーが返るけど、害はないので呼ぶ側で無視してOK。
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}
