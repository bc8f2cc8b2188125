//! 浏览器控制台日志
//!
//! `log` 门面的实现，按级别写入 `console.*`。

use log::{Level, Log, Metadata, Record};
use wasm_bindgen::JsValue;
use web_sys::console;

pub struct ConsoleLogger {
    level: Level,
}

static LOGGER: ConsoleLogger = ConsoleLogger {
    level: if cfg!(debug_assertions) {
        Level::Debug
    } else {
        Level::Info
    },
};

impl ConsoleLogger {
    /// 注册为全局 logger；重复调用时保持第一次的注册
    pub fn init() {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(LOGGER.level.to_level_filter());
        }
    }
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            Level::Error => console::error_1(&line),
            Level::Warn => console::warn_1(&line),
            Level::Info => console::info_1(&line),
            Level::Debug | Level::Trace => console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}
