//! Logging setup for the lander executables
//!
//! Records are written to stderr and to the session log file. stdout is never used since it may
//! carry protocol traffic.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use colored::{ColoredString, Colorize};
use log::{info, Level};
use std::fmt;
use thiserror::Error;

use crate::session::{self, Session};

pub use log::LevelFilter;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors associated with initialising the logger.
#[derive(Debug, Error)]
pub enum LoggerInitError {
    #[error("Logging must at least include `INFO` records, got `{0}`")]
    LevelTooLow(LevelFilter),

    #[error("Cannot open the log file: {0}")]
    LogFileError(std::io::Error),

    #[error("A logger is already set: {0}")]
    AlreadySet(log::SetLoggerError)
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Install the global logger for this execution.
///
/// `min_level` must let `INFO` records through. Can only succeed once per process.
pub fn logger_init(min_level: LevelFilter, session: &Session) -> Result<(), LoggerInitError> {
    if min_level < Level::Info {
        return Err(LoggerInitError::LevelTooLow(min_level))
    }

    let log_file = fern::log_file(&session.log_file_path)
        .map_err(LoggerInitError::LogFileError)?;

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}",
                format_line(
                    session::get_elapsed_seconds(),
                    record.level(),
                    record.target(),
                    message
                )
            ))
        })
        .level(min_level)
        .chain(std::io::stderr())
        .chain(log_file)
        .apply()
        .map_err(LoggerInitError::AlreadySet)?;

    info!("Logging to {:?} at level {:?}", session.log_file_path, min_level);
    info!("Session epoch: {}", session::get_epoch());

    Ok(())
}

/// Map a verbosity count (number of `-v` flags) to a minimum log level.
pub fn verbosity_to_level(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Format one record. The emitting module is only shown for debug and trace records.
fn format_line(
    elapsed_s: f64,
    level: Level,
    target: &str,
    message: &fmt::Arguments
) -> String {
    match level {
        Level::Debug | Level::Trace => format!(
            "[{:10.6} {}] {}: {}", elapsed_s, level_tag(level), target, message
        ),
        _ => format!("[{:10.6} {}] {}", elapsed_s, level_tag(level), message)
    }
}

fn level_tag(level: Level) -> ColoredString {
    match level {
        Level::Trace => "TRC".dimmed().italic(),
        Level::Debug => "DBG".dimmed(),
        Level::Info => "INF".normal(),
        Level::Warn => "WRN".yellow(),
        Level::Error => "ERR".red().bold()
    }
}
