//! samplecheck - keeps documentation code samples from rotting
//!
//! For every documented service and every supported language, samplecheck
//! pulls the language's code samples out of the service documentation,
//! assembles them into a runnable program from a per-(service, language)
//! template, runs the program with the language's interpreter and records
//! whether it succeeded, failed, or had no template.
//!
//! # Core Concepts
//!
//! - **Service**: a subdirectory of the documentation root
//! - **Sample**: a fenced, language-tagged code block in
//!   `<docs>/<service>/samples/<name>.md`
//! - **Template**: `<templates>/<service>.<ext>.j2`, a [`minijinja`] template
//!   that composes samples into a program via `{{ sample("name") }}`
//! - **Outcome**: success, failure or missing, one per (service, language)
//!
//! # Example Usage
//!
//! ```no_run
//! use samplecheck::{Harness, HarnessConfig};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = HarnessConfig::rooted_at("/srv/docs-harness");
//! let summary = Harness::new(&config).run()?;
//!
//! for record in summary.failures() {
//!     println!("{} / {} failed:\n{}", record.service, record.language, record.output);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Project Structure
//!
//! - [`samples`]: fenced block extraction from sample files
//! - [`credentials`]: credential file loading and `{key}` injection
//! - [`assembler`]: template rendering into staged programs
//! - [`executor`]: running staged programs and classifying exit status
//! - [`harness`]: the service x language run loop
//! - [`report`]: run summaries

pub mod assembler;
pub mod cli;
pub mod config;
pub mod credentials;
pub mod executor;
pub mod harness;
pub mod languages;
pub mod outcome;
pub mod progress;
pub mod report;
pub mod samples;
pub mod util;

pub use assembler::{AssembleError, Assembler, Assembly};
pub use config::{ConfigError, HarnessConfig};
pub use credentials::{CredentialError, CredentialStore, Credentials};
pub use executor::{ExecuteError, Executor};
pub use harness::{discover_services, Harness, HarnessError};
pub use languages::{Language, LanguageCatalog};
pub use outcome::{Outcome, OutcomeKind, Tally};
pub use report::{OutcomeRecord, ReportError, RunSummary};
pub use samples::SampleExtractor;
pub use util::{init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
