//! Logging configuration for recordbook.
//!
//! Store load/save failures reach the user through the subscriber installed
//! here, by way of [`crate::storage::TracingObserver`]. Log lines go to
//! stderr so that record listings on stdout stay machine-readable.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Verbosity level for logging output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Only errors, such as a collection that failed to load or save.
    Quiet,
    /// Warnings and errors.
    #[default]
    Normal,
    /// Store lifecycle: opens, per-collection loads and saves.
    Verbose,
    /// Everything.
    Trace,
}

impl Verbosity {
    /// Derive verbosity from `-q` and a count of `-v` flags.
    ///
    /// `quiet` wins over any number of `-v`.
    #[must_use]
    pub fn from_flags(quiet: bool, verbose: u8) -> Self {
        match (quiet, verbose) {
            (true, _) => Self::Quiet,
            (false, 0) => Self::Normal,
            (false, 1) => Self::Verbose,
            (false, _) => Self::Trace,
        }
    }

    /// Convert verbosity to tracing level filter.
    #[must_use]
    pub fn to_level_filter(&self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::WARN,
            Self::Verbose => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    /// Default filter directive for this verbosity.
    #[must_use]
    pub fn directive(&self) -> String {
        format!("recordbook={}", self.to_level_filter())
    }
}

/// Initialize the logging system.
///
/// `RUST_LOG` takes precedence over `verbosity`. Calling this more than
/// once is harmless; only the first call installs a subscriber.
///
/// # Examples
///
/// ```no_run
/// use recordbook::{init_logging, logging::Verbosity};
///
/// init_logging(Verbosity::from_flags(false, 1));
/// ```
pub fn init_logging(verbosity: Verbosity) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.directive()));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

/// Initialize logging for tests.
///
/// Only warnings and errors are shown, through the test writer.
#[cfg(test)]
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_test_writer()
        .try_init();
}
