//! Structured logging setup for samplecheck
//!
//! Log events go to standard error through `tracing-subscriber`, so standard
//! output carries only the live progress lines and the run summary. Sample
//! extraction diagnostics (missing sample files, samples without a block for
//! the requested language) are `warn` events and show at the default level.
//!
//! # Example
//!
//! ```no_run
//! use samplecheck::util::{init_logging, LoggingConfig};
//! use tracing::Level;
//!
//! init_logging(LoggingConfig::with_level(Level::DEBUG));
//! tracing::debug!(service = "storage", "Assembling program");
//! ```

use std::env;
use std::io::{self, IsTerminal};
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// Configuration for logging initialization
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum level for samplecheck's own events
    pub level: Level,

    /// Emit one JSON object per event (for CI log collectors)
    pub use_json: bool,

    /// Include the module target (e.g., samplecheck::executor) in logs
    pub include_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            use_json: false,
            include_target: false,
        }
    }
}

impl LoggingConfig {
    pub fn with_level(level: Level) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }

    /// Resolves the level from command-line switches, then the environment
    ///
    /// Precedence: explicit level, `verbose` (debug), `quiet` (error),
    /// `SAMPLECHECK_LOG_LEVEL`, info. `SAMPLECHECK_LOG_JSON=true` selects JSON
    /// output.
    pub fn from_args(log_level: Option<&str>, verbose: bool, quiet: bool) -> Self {
        let level = if let Some(level_str) = log_level {
            parse_level(level_str)
        } else if verbose {
            Level::DEBUG
        } else if quiet {
            Level::ERROR
        } else {
            env::var("SAMPLECHECK_LOG_LEVEL")
                .map(|s| parse_level(&s))
                .unwrap_or(Level::INFO)
        };

        let use_json = env::var("SAMPLECHECK_LOG_JSON")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(false);

        Self {
            level,
            use_json,
            include_target: verbose,
        }
    }
}

/// Level names accepted by `--log-level` and `SAMPLECHECK_LOG_LEVEL`
pub const VALID_LEVELS: &str = "trace, debug, info, warn (or warning), error";

/// Looks up a log level by name, case-insensitively
///
/// This is the single source of truth for which names are valid; run
/// configuration validation uses it too.
pub fn level_from_name(level_str: &str) -> Option<Level> {
    match level_str.to_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" | "warning" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

/// Parses a log level, falling back to `INFO` with a notice on stderr
pub fn parse_level(level_str: &str) -> Level {
    level_from_name(level_str).unwrap_or_else(|| {
        eprintln!(
            "Invalid log level '{}', defaulting to INFO. Valid levels: {}",
            level_str, VALID_LEVELS
        );
        Level::INFO
    })
}

/// Installs the global subscriber; later calls are ignored
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut filter = EnvFilter::from_default_env();

        // RUST_LOG wins over the configured level
        if env::var("RUST_LOG").is_err() {
            filter = filter
                .add_directive(format!("samplecheck={}", config.level).parse().unwrap())
                .add_directive("minijinja=warn".parse().unwrap());
        }

        let layer = fmt::layer()
            .with_writer(io::stderr)
            .with_ansi(io::stderr().is_terminal())
            .with_target(config.include_target);

        if config.use_json {
            tracing_subscriber::registry()
                .with(filter)
                .with(layer.json())
                .init();
        } else {
            tracing_subscriber::registry().with(filter).with(layer).init();
        }
    });
}
