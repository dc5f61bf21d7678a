//! Structured console logging with visual formatting.
//!
//! Output uses box drawing characters to group related lines, in the same
//! shape as the rest of daylightr's terminal output. Two global switches
//! control it: one enables debug lines, the other moves all output to stderr
//! so stdout can carry machine readable data.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::constants::DEBUG_ENV_VAR;

static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);
static STDERR_ONLY: AtomicBool = AtomicBool::new(false);

/// Log level enumeration for categorizing message importance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Log,  // Debug and operational detail
    Warn, // Something was corrected or ignored
    Err,  // An operation failed
    Crit, // The process cannot continue
    Info, // Status updates
}

impl LogLevel {
    pub fn prefix(&self) -> &'static str {
        match self {
            LogLevel::Log => "[LOG]",
            LogLevel::Warn => "[WARN]",
            LogLevel::Err => "[ERR]",
            LogLevel::Crit => "[CRIT]",
            LogLevel::Info => "[INFO]",
        }
    }

    fn to_stderr(self) -> bool {
        matches!(self, LogLevel::Err | LogLevel::Crit)
    }
}

/// Main logging interface providing structured output formatting.
pub struct Log;

impl Log {
    /// Enable or disable `log_debug` output.
    pub fn set_debug(enabled: bool) {
        DEBUG_ENABLED.store(enabled, Ordering::SeqCst);
    }

    /// Send every line to stderr, keeping stdout free for data output.
    pub fn set_stderr_only(enabled: bool) {
        STDERR_ONLY.store(enabled, Ordering::SeqCst);
    }

    pub fn is_stderr_only() -> bool {
        STDERR_ONLY.load(Ordering::SeqCst)
    }

    fn emit(line: &str, to_stderr: bool) {
        if to_stderr || Self::is_stderr_only() {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }

    /// Debug output is on when requested explicitly or through the
    /// `DAYLIGHTR_DEBUG` environment variable.
    pub fn is_debug() -> bool {
        DEBUG_ENABLED.load(Ordering::SeqCst) || std::env::var_os(DEBUG_ENV_VAR).is_some()
    }

    /// Render a log line without printing it.
    pub fn format(level: LogLevel, message: &str) -> String {
        format!("{} {}", level.prefix(), message)
    }

    /// Print a message with its level prefix. Errors go to stderr.
    pub fn log(level: LogLevel, message: &str) {
        Self::emit(&Self::format(level, message), level.to_stderr());
    }

    // ═══ Convenience Methods for Common Log Levels ═══

    pub fn log_error(message: &str) {
        Self::log(LogLevel::Err, message);
    }

    pub fn log_warning(message: &str) {
        Self::log(LogLevel::Warn, message);
    }

    /// Only printed when debug output is enabled.
    pub fn log_debug(message: &str) {
        if Self::is_debug() {
            Self::log(LogLevel::Log, message);
        }
    }

    // ═══ Visual Formatting Functions ═══

    /// Main status line with a branch marker.
    pub fn log_decorated(message: &str) {
        Self::emit(&format!("┣ {}", message), false);
    }

    /// Detail line nested under the previous status line.
    pub fn log_indented(message: &str) {
        Self::emit(&format!("┃   {}", message), false);
    }

    pub fn log_pipe() {
        Self::emit("┃", false);
    }

    /// Start a new block of related output.
    pub fn log_block_start(message: &str) {
        Self::emit("┃", false);
        Self::emit(&format!("┣ {}", message), false);
    }

    /// Header printed once when the binary starts.
    pub fn log_version() {
        Self::emit(&format!("┏ daylightr v{} ━━╸", env!("CARGO_PKG_VERSION")), false);
        Self::emit("┃", false);
    }

    /// Closes the structure opened by `log_version`.
    pub fn log_end() {
        Self::emit("╹", false);
    }
}
