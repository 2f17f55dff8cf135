//! Utility modules for samplecheck

pub mod logging;

pub use logging::{init_logging, level_from_name, parse_level, LoggingConfig};
