use crate::error::GameError;
use chrono::Local;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

// Conditional logging macros - only active in debug builds

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{}};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{}};
}

/// Where log records go.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogTarget {
    /// Plain mode: the terminal is free, so stderr is fine.
    Stderr,
    /// TUI mode owns the terminal; write to a file instead.
    File(PathBuf),
}

impl LogTarget {
    fn default_filter(&self) -> &'static str {
        match self {
            Self::Stderr => "warn",
            Self::File(_) => "info",
        }
    }
}

/// `<cache dir>/hintword/hintword.log`, if the platform has a cache dir.
#[must_use]
pub fn default_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("hintword").join("hintword.log"))
}

/// Install env_logger for the process. `RUST_LOG` overrides the default
/// filter.
///
/// # Errors
///
/// `Logging` if the log file cannot be opened or a logger is already set.
pub fn init_logging(target: &LogTarget) -> Result<(), GameError> {
    let env = env_logger::Env::default().default_filter_or(target.default_filter());
    let mut builder = env_logger::Builder::from_env(env);
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} {:5} {}: {}",
            Local::now().format("%H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        )
    });

    if let LogTarget::File(path) = target {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| GameError::Logging(format!("{}: {e}", parent.display())))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| GameError::Logging(format!("{}: {e}", path.display())))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder
        .try_init()
        .map_err(|e| GameError::Logging(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filters() {
        assert_eq!(LogTarget::Stderr.default_filter(), "warn");
        assert_eq!(LogTarget::File(PathBuf::from("x.log")).default_filter(), "info");
    }

    #[test]
    fn test_default_log_path_shape() {
        if let Some(path) = default_log_path() {
            assert!(path.ends_with("hintword/hintword.log"));
        }
    }
}
