//! User Notifications and Console Logging
//!
//! Blocking alerts for outcomes the user must see, and the console sink
//! for the rolling logger.

use std::sync::OnceLock;

use rolling_logger::{LogHandle, LogSink};
use tracing::Level;

pub const SAVE_SUCCEEDED: &str = "Changes were saved.";
pub const SAVE_FAILED: &str = "Changes could not be saved.";
pub const LOAD_FAILED: &str = "Process could not be loaded.";
pub const INPUT_DISCARDED: &str = "Non quantitative metrics have been automatically discarded.";

/// Show a blocking alert
pub fn alert(message: &str) {
    if let Some(win) = web_sys::window() {
        let _ = win.alert_with_message(message);
    }
}

/// Alert text for a finished save
pub fn save_message(saved: bool, discarded_inputs: bool) -> String {
    let mut message = if saved { SAVE_SUCCEEDED } else { SAVE_FAILED }.to_string();
    if discarded_inputs {
        message.push('\n');
        message.push_str(INPUT_DISCARDED);
    }
    message
}

/// Forwards log lines to the browser console
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl LogSink for ConsoleSink {
    fn write_line(&self, level: Level, line: &str) {
        let line = wasm_bindgen::JsValue::from_str(line);
        match level {
            Level::ERROR => web_sys::console::error_1(&line),
            Level::WARN => web_sys::console::warn_1(&line),
            Level::INFO => web_sys::console::info_1(&line),
            _ => web_sys::console::debug_1(&line),
        }
    }
}

/// Lines of history printed next to a failure
pub const FAILURE_CONTEXT_LINES: usize = 20;

static RECENT_LOGS: OnceLock<LogHandle> = OnceLock::new();

/// Install the rolling logger with the console sink
pub fn init_logging() {
    let level = if cfg!(debug_assertions) { Level::DEBUG } else { Level::INFO };
    match rolling_logger::init(level, rolling_logger::DEFAULT_CAPACITY, ConsoleSink) {
        Ok(handle) => {
            let _ = RECENT_LOGS.set(handle);
        }
        Err(e) => web_sys::console::warn_1(&format!("[APP] logger already installed: {}", e).into()),
    }
}

/// Print the latest buffered log lines as one console entry
pub fn dump_recent_logs(reason: &str) {
    let Some(handle) = RECENT_LOGS.get() else {
        return;
    };
    if let Some(report) = failure_report(reason, handle.tail(FAILURE_CONTEXT_LINES)) {
        web_sys::console::log_1(&report.into());
    }
}

fn failure_report(reason: &str, lines: Vec<String>) -> Option<String> {
    if lines.is_empty() {
        return None;
    }
    Some(format!("[APP] {}, last {} log lines:\n{}", reason, lines.len(), lines.join("\n")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_message() {
        assert_eq!(save_message(true, false), "Changes were saved.");
        assert_eq!(
            save_message(false, true),
            "Changes could not be saved.\nNon quantitative metrics have been automatically discarded."
        );
    }

    #[test]
    fn test_failure_report_lists_recent_lines() {
        assert_eq!(failure_report("save failed", Vec::new()), None);

        let lines = vec!["12:00:00.000 INFO  a: one".to_string(), "12:00:00.001 ERROR a: two".to_string()];
        assert_eq!(
            failure_report("save failed", lines).as_deref(),
            Some("[APP] save failed, last 2 log lines:\n12:00:00.000 INFO  a: one\n12:00:00.001 ERROR a: two")
        );
    }
}
