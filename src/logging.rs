//! Structured logging for the weather monitoring core
//!
//! Provides context-rich logging with station identifiers, timestamps,
//! and severity levels. Supports both console output and file-based
//! logging for long-running hosts. Nothing is emitted until
//! `init_logger` has been called, so library callers that never
//! initialize it get silent, side-effect-free parsing.

use chrono::Utc;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::sync::Mutex;

use crate::model::OperationalStatus;

// ---------------------------------------------------------------------------
// Log Levels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warning => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

// ---------------------------------------------------------------------------
// Report Source Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportSource {
    Metar,
    Pirep,
    Sigmet,
    Config,
    System,
}

impl fmt::Display for ReportSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportSource::Metar => write!(f, "METAR"),
            ReportSource::Pirep => write!(f, "PIREP"),
            ReportSource::Sigmet => write!(f, "SIGMET"),
            ReportSource::Config => write!(f, "CFG"),
            ReportSource::System => write!(f, "SYS"),
        }
    }
}

// ---------------------------------------------------------------------------
// Logger Configuration
// ---------------------------------------------------------------------------

/// Global logger instance
static LOGGER: Mutex<Option<Logger>> = Mutex::new(None);

pub struct Logger {
    /// Minimum log level to display
    min_level: LogLevel,
    /// Optional file path for logging
    log_file: Option<String>,
    /// Whether to include timestamps in console output
    console_timestamps: bool,
}

impl Logger {
    /// Initialize the global logger
    pub fn init(min_level: LogLevel, log_file: Option<String>, console_timestamps: bool) {
        let logger = Logger {
            min_level,
            log_file,
            console_timestamps,
        };

        if let Ok(mut slot) = LOGGER.lock() {
            *slot = Some(logger);
        }
    }

    fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    fn log(&self, level: LogLevel, source: ReportSource, icao: Option<&str>, message: &str) {
        if !self.enabled(level) {
            return;
        }

        let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
        let log_entry = format_entry(&timestamp.to_string(), level, source, icao, message);
        let station_part = icao.map(|s| format!(" [{}]", s)).unwrap_or_default();

        if self.console_timestamps {
            match level {
                LogLevel::Error => eprintln!("{}", log_entry),
                LogLevel::Warning => eprintln!("   {}", log_entry),
                LogLevel::Info => println!("   {}", message),
                LogLevel::Debug => println!("   [DEBUG] {}", message),
            }
        } else {
            match level {
                LogLevel::Error => eprintln!("   ✗ {}{}: {}", source, station_part, message),
                LogLevel::Warning => eprintln!("   ⚠ {}{}: {}", source, station_part, message),
                LogLevel::Info => println!("   {}", message),
                LogLevel::Debug => {} // Skip debug in non-timestamp mode
            }
        }

        if let Some(ref path) = self.log_file {
            if let Err(e) = Self::append_to_file(path, &log_entry) {
                eprintln!("Failed to write to log file {}: {}", path, e);
            }
        }
    }

    fn append_to_file(path: &str, entry: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{}", entry)?;
        Ok(())
    }
}

/// Single-line file format: `<timestamp> <LEVEL> <SOURCE>[ [ICAO]]: <message>`
fn format_entry(
    timestamp: &str,
    level: LogLevel,
    source: ReportSource,
    icao: Option<&str>,
    message: &str,
) -> String {
    let station_part = icao.map(|s| format!(" [{}]", s)).unwrap_or_default();
    format!("{} {} {}{}: {}", timestamp, level, source, station_part, message)
}

// ---------------------------------------------------------------------------
// Public Logging Functions
// ---------------------------------------------------------------------------

/// Initialize the global logger
pub fn init_logger(min_level: LogLevel, log_file: Option<&str>, console_timestamps: bool) {
    Logger::init(min_level, log_file.map(String::from), console_timestamps);
}

fn dispatch(level: LogLevel, source: ReportSource, icao: Option<&str>, message: &str) {
    if let Ok(guard) = LOGGER.lock() {
        if let Some(logger) = guard.as_ref() {
            logger.log(level, source, icao, message);
        }
    }
}

/// Log a general informational message
pub fn info(source: ReportSource, icao: Option<&str>, message: &str) {
    dispatch(LogLevel::Info, source, icao, message);
}

/// Log a warning message
pub fn warn(source: ReportSource, icao: Option<&str>, message: &str) {
    dispatch(LogLevel::Warning, source, icao, message);
}

/// Log an error message
pub fn error(source: ReportSource, icao: Option<&str>, message: &str) {
    dispatch(LogLevel::Error, source, icao, message);
}

/// Log a debug message
pub fn debug(source: ReportSource, icao: Option<&str>, message: &str) {
    dispatch(LogLevel::Debug, source, icao, message);
}

// ---------------------------------------------------------------------------
// Structured Helpers
// ---------------------------------------------------------------------------

/// Record that an extracted field fell back to its default value.
///
/// Missing or malformed upstream fields are routine, so this logs at
/// debug level only.
pub fn log_extraction_fallback(source: ReportSource, record_id: &str, field: &str, fallback: &str) {
    let message = format!(
        "{} {}: field '{}' missing or unparsable, using {}",
        source, record_id, field, fallback
    );
    debug(source, None, &message);
}

/// Log the outcome of a station evaluation, at a level matching its status.
pub fn log_evaluation_summary(
    icao: &str,
    status: OperationalStatus,
    active_pireps: usize,
    active_sigmets: usize,
) {
    let message = format!(
        "Status {}: {} current PIREP(s), {} active advisory(ies)",
        status, active_pireps, active_sigmets
    );

    match status {
        OperationalStatus::Normal => info(ReportSource::System, Some(icao), &message),
        OperationalStatus::Caution => warn(ReportSource::System, Some(icao), &message),
        OperationalStatus::Critical => error(ReportSource::System, Some(icao), &message),
    }
}
