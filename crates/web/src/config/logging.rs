//! Logging Config

use clap::{Args, ValueEnum};

/// Log line layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// One human-readable line per event.
    #[default]
    Compact,

    /// One JSON object per event, with the request span attached.
    Json,
}

/// Logging and request logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` holds no valid filter
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t)]
    pub log_format: LogFormat,

    /// Requests slower than this many milliseconds are logged at `warn`
    #[arg(long, env = "SLOW_REQUEST_THRESHOLD_MS", default_value_t = 1_000)]
    pub slow_request_threshold_ms: u64,
}
