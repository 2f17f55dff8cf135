//! Configuration management for samplecheck
//!
//! Settings are loaded from environment variables with defaults relative to the
//! working directory. Command-line flags override them (see [`crate::cli`]).
//!
//! # Environment Variables
//!
//! - `SAMPLECHECK_DOCS_ROOT`: documentation root - default: "docs"
//! - `SAMPLECHECK_TEMPLATES_ROOT`: template root - default: "templates"
//! - `SAMPLECHECK_STAGING_DIR`: where assembled programs are written - default: "assembled"
//! - `SAMPLECHECK_CREDENTIALS`: credential file - default: "config/credentials.json"
//! - `SAMPLECHECK_SAMPLE_EXT`: sample file extension - default: "md"
//! - `SAMPLECHECK_TEMPLATE_EXT`: template file extension - default: "j2"
//! - `SAMPLECHECK_BUILD`: run build commands before running (true|false) - default: "false"
//! - `SAMPLECHECK_LOG_LEVEL`: logging level - default: "info"
//!
//! # Example
//!
//! ```no_run
//! use samplecheck::HarnessConfig;
//!
//! let config = HarnessConfig::default();
//! config.validate().expect("Invalid configuration");
//! println!("{}", config);
//! ```

use crate::assembler::DEFAULT_TEMPLATE_EXTENSION;
use crate::samples::DEFAULT_SAMPLE_EXTENSION;
use crate::util::logging::{level_from_name, VALID_LEVELS};
use std::env;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_DOCS_ROOT: &str = "docs";
const DEFAULT_TEMPLATES_ROOT: &str = "templates";
const DEFAULT_STAGING_DIR: &str = "assembled";
const DEFAULT_CREDENTIALS_PATH: &str = "config/credentials.json";
const DEFAULT_BUILD_STEP: bool = false;
const DEFAULT_LOG_LEVEL: &str = "info";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Everything the harness needs to locate its inputs and outputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Directory whose subdirectories are the documented services
    pub docs_root: PathBuf,

    /// Directory holding `<service>.<ext>.<template_ext>` templates
    pub templates_root: PathBuf,

    /// Directory assembled programs are written to
    pub staging_dir: PathBuf,

    /// JSON file of credential values
    pub credentials_path: PathBuf,

    /// Extension of sample files under `<service>/samples/`
    pub sample_extension: String,

    /// Extension appended to template file names
    pub template_extension: String,

    /// Run each language's build command before its run executable
    pub build_step: bool,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for HarnessConfig {
    /// Loads configuration from `SAMPLECHECK_*` variables, falling back to defaults
    fn default() -> Self {
        let path_var = |key: &str, default: &str| {
            env::var(key)
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(default))
        };
        let string_var =
            |key: &str, default: &str| env::var(key).unwrap_or_else(|_| default.to_string());

        let build_step = env::var("SAMPLECHECK_BUILD")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(DEFAULT_BUILD_STEP);

        Self {
            docs_root: path_var("SAMPLECHECK_DOCS_ROOT", DEFAULT_DOCS_ROOT),
            templates_root: path_var("SAMPLECHECK_TEMPLATES_ROOT", DEFAULT_TEMPLATES_ROOT),
            staging_dir: path_var("SAMPLECHECK_STAGING_DIR", DEFAULT_STAGING_DIR),
            credentials_path: path_var("SAMPLECHECK_CREDENTIALS", DEFAULT_CREDENTIALS_PATH),
            sample_extension: string_var("SAMPLECHECK_SAMPLE_EXT", DEFAULT_SAMPLE_EXTENSION),
            template_extension: string_var("SAMPLECHECK_TEMPLATE_EXT", DEFAULT_TEMPLATE_EXTENSION),
            build_step,
            log_level: string_var("SAMPLECHECK_LOG_LEVEL", DEFAULT_LOG_LEVEL).to_lowercase(),
        }
    }
}

impl HarnessConfig {
    /// Configuration rooted at `root`, ignoring the environment
    pub fn rooted_at(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            docs_root: root.join(DEFAULT_DOCS_ROOT),
            templates_root: root.join(DEFAULT_TEMPLATES_ROOT),
            staging_dir: root.join(DEFAULT_STAGING_DIR),
            credentials_path: root.join(DEFAULT_CREDENTIALS_PATH),
            sample_extension: DEFAULT_SAMPLE_EXTENSION.to_string(),
            template_extension: DEFAULT_TEMPLATE_EXTENSION.to_string(),
            build_step: DEFAULT_BUILD_STEP,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }

    /// Validates the configuration
    ///
    /// Checks that the documentation root is a directory, that file extensions
    /// are bare (no dot, no separator) and that the log level is known.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.docs_root.is_dir() {
            return Err(ConfigError::ValidationFailed(format!(
                "Documentation root {} is not a directory",
                self.docs_root.display()
            )));
        }

        for (field, ext) in [
            ("sample extension", &self.sample_extension),
            ("template extension", &self.template_extension),
        ] {
            if ext.is_empty() || ext.starts_with('.') || ext.contains(['/', '\\']) {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid {}: '{}'. Use a bare extension such as 'md'",
                    field, ext
                )));
            }
        }

        if level_from_name(&self.log_level).is_none() {
            return Err(ConfigError::ValidationFailed(format!(
                "Invalid log level: {}. Valid options: {}",
                self.log_level, VALID_LEVELS
            )));
        }

        Ok(())
    }
}

impl fmt::Display for HarnessConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Samplecheck Configuration:")?;
        writeln!(f, "  Docs Root: {}", self.docs_root.display())?;
        writeln!(f, "  Templates Root: {}", self.templates_root.display())?;
        writeln!(f, "  Staging Dir: {}", self.staging_dir.display())?;
        writeln!(f, "  Credentials: {}", self.credentials_path.display())?;
        writeln!(f, "  Sample Extension: {}", self.sample_extension)?;
        writeln!(f, "  Template Extension: {}", self.template_extension)?;
        writeln!(f, "  Build Step: {}", self.build_step)?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        Ok(())
    }
}
