//! Game logger with verbosity levels and in-memory capture
//!
//! The logger travels inside `GameState`. Because every transition clones the
//! state, clones share one capture buffer: a caller holding any later state
//! sees every line logged along the way.

use crate::core::Side;
use crate::game::VerbosityLevel;
use bumpalo::Bump;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt::{self, Write as FmtWrite};
use std::ops::Deref;
use std::sync::{Arc, Mutex, MutexGuard};

/// Output destination for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputMode {
    /// Output only to stdout (default)
    #[default]
    Stdout,
    /// Capture only to in-memory buffer (no stdout)
    Memory,
    /// Both stdout and in-memory buffer
    Both,
}

/// A captured log line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: VerbosityLevel,
    pub message: String,
    /// Optional category (e.g. "controller_choice", "game_end")
    pub category: Option<&'static str>,
}

/// Read access to captured entries, derefs to a slice
pub struct LogGuard<'a> {
    guard: MutexGuard<'a, Vec<LogEntry>>,
}

impl<'a> Deref for LogGuard<'a> {
    type Target = [LogEntry];

    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

type SharedBuffer = Arc<Mutex<Vec<LogEntry>>>;

pub struct GameLogger {
    verbosity: VerbosityLevel,
    output_mode: OutputMode,

    /// Scratch space for formatting verbose lines, reset after each use
    format_bump: RefCell<Bump>,

    log_buffer: SharedBuffer,
}

impl GameLogger {
    /// Create a new logger with default verbosity (Normal)
    pub fn new() -> Self {
        Self::with_verbosity(VerbosityLevel::default())
    }

    pub fn with_verbosity(verbosity: VerbosityLevel) -> Self {
        GameLogger {
            verbosity,
            output_mode: OutputMode::default(),
            format_bump: RefCell::new(Bump::new()),
            log_buffer: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn set_output_mode(&mut self, mode: OutputMode) {
        self.output_mode = mode;
    }

    pub fn output_mode(&self) -> OutputMode {
        self.output_mode
    }

    /// Capture to memory only (suppresses stdout)
    pub fn enable_capture(&mut self) {
        self.output_mode = OutputMode::Memory;
    }

    pub fn disable_capture(&mut self) {
        self.output_mode = OutputMode::Stdout;
    }

    pub fn is_capturing(&self) -> bool {
        matches!(self.output_mode, OutputMode::Memory | OutputMode::Both)
    }

    pub fn verbosity(&self) -> VerbosityLevel {
        self.verbosity
    }

    pub fn set_verbosity(&mut self, verbosity: VerbosityLevel) {
        self.verbosity = verbosity;
    }

    fn buffer(&self) -> MutexGuard<'_, Vec<LogEntry>> {
        self.log_buffer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn logs(&self) -> LogGuard<'_> {
        LogGuard {
            guard: self.buffer(),
        }
    }

    /// Owned copy of the captured entries
    pub fn get_logs(&self) -> Vec<LogEntry> {
        self.buffer().clone()
    }

    pub fn clear_logs(&self) {
        self.buffer().clear();
    }

    /// Print captured entries allowed by the verbosity, then clear them
    pub fn flush_buffer(&self) {
        let entries = std::mem::take(&mut *self.buffer());
        for entry in entries.iter().filter(|e| e.level <= self.verbosity) {
            Self::log_to_stdout(entry.level, &entry.message);
        }
    }

    /// Print only the last `tail_lines` captured entries, then clear
    pub fn flush_tail(&self, tail_lines: usize) {
        let entries = std::mem::take(&mut *self.buffer());
        let elided = entries.len().saturating_sub(tail_lines);
        if elided > 0 {
            println!(">>> {elided} LOG LINES ELIDED. PRINTING LAST {tail_lines} LINES <<<");
        }
        for entry in entries.iter().skip(elided).filter(|e| e.level <= self.verbosity) {
            Self::log_to_stdout(entry.level, &entry.message);
        }
    }

    #[inline]
    fn log_to_stdout(level: VerbosityLevel, message: &str) {
        if level == VerbosityLevel::Minimal {
            println!("{message}");
        } else {
            println!("  {message}");
        }
    }

    /// Would a line at `level` be printed or captured?
    #[inline]
    pub fn enabled(&self, level: VerbosityLevel) -> bool {
        level != VerbosityLevel::Silent && (level <= self.verbosity || self.is_capturing())
    }

    fn log_at(&self, level: VerbosityLevel, category: Option<&'static str>, message: &str) {
        if !self.enabled(level) {
            return;
        }

        if self.is_capturing() {
            self.buffer().push(LogEntry {
                level,
                message: message.to_string(),
                category,
            });
        }

        let should_output = matches!(self.output_mode, OutputMode::Stdout | OutputMode::Both);
        if should_output && level <= self.verbosity {
            Self::log_to_stdout(level, message);
        }
    }

    #[inline]
    pub fn minimal(&self, message: &str) {
        self.log_at(VerbosityLevel::Minimal, None, message);
    }

    #[inline]
    pub fn normal(&self, message: &str) {
        self.log_at(VerbosityLevel::Normal, None, message);
    }

    #[inline]
    pub fn verbose(&self, message: &str) {
        self.log_at(VerbosityLevel::Verbose, None, message);
    }

    /// Log a formatted message, formatting into the bump arena
    ///
    /// Skips formatting entirely when nothing would consume the line.
    pub fn log_fmt(&self, level: VerbosityLevel, args: fmt::Arguments<'_>) {
        if !self.enabled(level) {
            return;
        }
        let mut bump = self.format_bump.borrow_mut();
        {
            let mut text = bumpalo::collections::String::new_in(&*bump);
            if text.write_fmt(args).is_ok() {
                self.log_at(level, None, text.as_str());
            }
        }
        bump.reset();
    }

    /// Log a controller decision at Normal level
    ///
    /// The line does not name the controller type so that logs from
    /// different controllers making the same choices are identical.
    pub fn controller_choice(&self, side: Side, message: &str) {
        if !self.enabled(VerbosityLevel::Normal) {
            return;
        }
        let line = format!("{side} {message}");
        self.log_at(VerbosityLevel::Normal, Some("controller_choice"), &line);
    }

    /// Log the end of the game at Minimal level
    pub fn game_end(&self, message: &str) {
        self.log_at(VerbosityLevel::Minimal, Some("game_end"), message);
    }
}

impl Default for GameLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GameLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameLogger")
            .field("verbosity", &self.verbosity)
            .field("output_mode", &self.output_mode)
            .field("log_count", &self.buffer().len())
            .finish()
    }
}

impl Clone for GameLogger {
    fn clone(&self) -> Self {
        GameLogger {
            verbosity: self.verbosity,
            output_mode: self.output_mode,
            format_bump: RefCell::new(Bump::new()),
            log_buffer: Arc::clone(&self.log_buffer),
        }
    }
}

impl Serialize for GameLogger {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("GameLogger", 2)?;
        state.serialize_field("verbosity", &self.verbosity)?;
        state.serialize_field("output_mode", &self.output_mode)?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for GameLogger {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct GameLoggerData {
            verbosity: VerbosityLevel,
            #[serde(default)]
            output_mode: OutputMode,
        }

        let data = GameLoggerData::deserialize(deserializer)?;
        let mut logger = GameLogger::with_verbosity(data.verbosity);
        logger.output_mode = data.output_mode;
        Ok(logger)
    }
}

/// Log a formatted line at Verbose level
///
/// Compiles to nothing when the `verbose-logging` feature is disabled, so
/// benchmarks pay no formatting cost.
#[macro_export]
macro_rules! log_verbose {
    ($logger:expr, $($arg:tt)*) => {
        #[cfg(feature = "verbose-logging")]
        {
            $logger.log_fmt($crate::game::VerbosityLevel::Verbose, format_args!($($arg)*));
        }
        #[cfg(not(feature = "verbose-logging"))]
        {
            let _ = &$logger;
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_creation() {
        let logger = GameLogger::new();
        assert_eq!(logger.verbosity(), VerbosityLevel::Normal);
        assert!(!logger.is_capturing());
    }

    #[test]
    fn test_log_capture() {
        let mut logger = GameLogger::with_verbosity(VerbosityLevel::Silent);
        logger.enable_capture();

        logger.normal("test message");
        logger.minimal("minimal message");

        let logs = logger.logs();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].message, "test message");
        assert_eq!(logs[1].level, VerbosityLevel::Minimal);
    }

    #[test]
    fn test_clones_share_buffer() {
        let mut logger = GameLogger::new();
        logger.enable_capture();

        let copy = logger.clone();
        copy.normal("from the copy");
        logger.normal("from the original");

        assert_eq!(logger.logs().len(), 2);
        assert_eq!(copy.logs()[0].message, "from the copy");
    }

    #[test]
    fn test_log_fmt() {
        let mut logger = GameLogger::with_verbosity(VerbosityLevel::Verbose);
        logger.enable_capture();

        for i in 0..3 {
            logger.log_fmt(VerbosityLevel::Verbose, format_args!("line {}", i));
        }

        let messages: Vec<String> = logger.get_logs().into_iter().map(|e| e.message).collect();
        assert_eq!(messages, vec!["line 0", "line 1", "line 2"]);
    }

    #[test]
    fn test_controller_choice_category() {
        let mut logger = GameLogger::new();
        logger.enable_capture();

        logger.controller_choice(Side::Cpu, "buys VP_VILLAGE");

        let logs = logger.logs();
        assert_eq!(logs[0].message, "cpu buys VP_VILLAGE");
        assert_eq!(logs[0].category, Some("controller_choice"));
    }

    #[test]
    fn test_flush_buffer_clears() {
        let mut logger = GameLogger::new();
        logger.enable_capture();

        logger.normal("message 1");
        logger.normal("message 2");
        assert_eq!(logger.logs().len(), 2);

        logger.flush_buffer();
        assert_eq!(logger.logs().len(), 0);
    }

    #[test]
    fn test_silent_not_captured_to_stdout() {
        let logger = GameLogger::with_verbosity(VerbosityLevel::Silent);
        assert!(!logger.enabled(VerbosityLevel::Minimal));
        assert!(!logger.enabled(VerbosityLevel::Silent));
    }
}
