//! Logging setup for parse and generate pipelines
//!
//! The library only emits `tracing` events; it never installs a subscriber
//! by itself. Applications and test harnesses call [`init_logging`] once.
//!
//! # Usage
//!
//! ```no_run
//! use diagram_ast::core::logging::init_logging;
//!
//! init_logging(Some("debug"), Some("pretty")).expect("logging");
//! ```
//!
//! # Environment Variables
//!
//! - `DIAGRAM_AST_LOG_LEVEL`: level filter (trace|debug|info|warn|error|off)
//! - `RUST_LOG`: standard `tracing-subscriber` filter, used when the above is unset
//! - `DIAGRAM_AST_LOG_FORMAT`: compact|pretty|json
//!
//! # Filtering
//!
//! Grammars log skipped lines at `warn`, per-statement progress at `debug`
//! and each consumed line at `trace`:
//!
//! ```bash
//! RUST_LOG="info,diagram_ast::plugins::sequence=trace" cargo test
//! ```

use std::str::FromStr;

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

/// Environment variable holding the log level
pub const LOG_LEVEL_ENV: &str = "DIAGRAM_AST_LOG_LEVEL";

/// Environment variable holding the log format
pub const LOG_FORMAT_ENV: &str = "DIAGRAM_AST_LOG_FORMAT";

/// Log format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Single-line output
    #[default]
    Compact,
    /// Multi-line output with source locations
    Pretty,
    /// One JSON object per event
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

impl LogFormat {
    /// Get all valid format names
    pub fn variants() -> &'static [&'static str] {
        &["compact", "pretty", "json"]
    }
}

/// Resolve the level filter string from an explicit value or the environment
fn resolve_level(level: Option<&str>) -> String {
    level
        .map(str::to_string)
        .or_else(|| std::env::var(LOG_LEVEL_ENV).ok())
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| "info".to_string())
}

fn resolve_format(format: Option<&str>) -> Result<LogFormat, String> {
    match format
        .map(str::to_string)
        .or_else(|| std::env::var(LOG_FORMAT_ENV).ok())
    {
        Some(name) => LogFormat::from_str(&name),
        None => Ok(LogFormat::default()),
    }
}

/// Install a global tracing subscriber
///
/// `level` and `format` fall back to the environment, then to `info` and
/// `compact`. Fails when the format name is unknown or a global subscriber
/// is already installed.
pub fn init_logging(
    level: Option<&str>,
    format: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = resolve_level(level);
    let filter = EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let format = resolve_format(format).map_err(|e| format!("Invalid log format: {}", e))?;

    match format {
        LogFormat::Compact => {
            Registry::default()
                .with(filter)
                .with(
                    fmt::Layer::default()
                        .with_target(false)
                        .with_level(true)
                        .with_span_events(FmtSpan::NONE),
                )
                .try_init()?;
        }
        LogFormat::Pretty => {
            Registry::default()
                .with(filter)
                .with(
                    fmt::Layer::default()
                        .with_target(true)
                        .with_file(true)
                        .with_line_number(true)
                        .with_span_events(FmtSpan::ACTIVE)
                        .pretty(),
                )
                .try_init()?;
        }
        LogFormat::Json => {
            Registry::default()
                .with(filter)
                .with(
                    fmt::Layer::default()
                        .with_target(true)
                        .with_span_events(FmtSpan::CLOSE)
                        .json(),
                )
                .try_init()?;
        }
    }

    Ok(())
}

/// Initialize logging with default settings (info level, compact format)
pub fn init_default_logging() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(None, None)
}
