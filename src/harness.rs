//! The run loop: every service crossed with every catalog language
//!
//! For each pair the harness assembles the pair's program, runs it, and
//! records exactly one [`Outcome`]. Pairs are processed one at a time, in
//! service order then catalog order; a hung sample program therefore stalls
//! the whole run, since subprocesses have no timeout.
//!
//! # Example
//!
//! ```no_run
//! use samplecheck::{Harness, HarnessConfig};
//! use samplecheck::progress::ConsoleHandler;
//! use std::sync::Arc;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = HarnessConfig::default();
//! let harness = Harness::new(&config).with_progress(Arc::new(ConsoleHandler::stdout()));
//!
//! let summary = harness.run()?;
//! println!("{} failures", summary.totals.failure);
//! # Ok(())
//! # }
//! ```

use crate::assembler::{AssembleError, Assembler, Assembly};
use crate::config::HarnessConfig;
use crate::credentials::{CredentialError, CredentialStore, Credentials};
use crate::executor::{ExecuteError, Executor};
use crate::languages::{Language, LanguageCatalog};
use crate::outcome::Outcome;
use crate::progress::{NoOpHandler, ProgressEvent, ProgressHandler};
use crate::report::RunSummary;
use crate::samples::SampleExtractor;
use chrono::Utc;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that abort a whole run
///
/// Per-pair problems (missing templates, failing programs, missing samples)
/// are outcomes, not errors.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error(transparent)]
    Credentials(#[from] CredentialError),

    #[error("Failed to list services in {}: {source}", .path.display())]
    DocsRoot {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Assemble(#[from] AssembleError),

    #[error(transparent)]
    Execute(#[from] ExecuteError),
}

/// Lists service names: directories under `docs_root` not starting with `_` or `.`
///
/// Names are sorted so the run order does not depend on the filesystem.
pub fn discover_services(docs_root: &Path) -> Result<Vec<String>, HarnessError> {
    let docs_err = |source: io::Error| HarnessError::DocsRoot {
        path: docs_root.to_path_buf(),
        source,
    };

    let mut services = Vec::new();
    for entry in fs::read_dir(docs_root).map_err(docs_err)? {
        let entry = entry.map_err(docs_err)?;
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            warn!(path = %entry.path().display(), "Skipping non UTF-8 directory name");
            continue;
        };
        if name.starts_with('_') || name.starts_with('.') {
            continue;
        }
        if entry.path().is_dir() {
            services.push(name);
        }
    }

    services.sort();
    debug!(count = services.len(), root = %docs_root.display(), "Discovered services");
    Ok(services)
}

/// Drives assembly and execution over the service x language grid
pub struct Harness {
    docs_root: PathBuf,
    catalog: LanguageCatalog,
    credentials: CredentialStore,
    assembler: Assembler,
    executor: Executor,
    progress: Arc<dyn ProgressHandler>,
}

impl Harness {
    pub fn new(config: &HarnessConfig) -> Self {
        let extractor = SampleExtractor::new(&config.docs_root)
            .with_extension(config.sample_extension.clone());
        let assembler = Assembler::new(&config.templates_root, &config.staging_dir, extractor)
            .with_template_extension(config.template_extension.clone());

        Self {
            docs_root: config.docs_root.clone(),
            catalog: LanguageCatalog::with_defaults(),
            credentials: CredentialStore::new(&config.credentials_path),
            assembler,
            executor: Executor::new().with_build_step(config.build_step),
            progress: Arc::new(NoOpHandler),
        }
    }

    /// Replaces the built-in language catalog
    pub fn with_catalog(mut self, catalog: LanguageCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressHandler>) -> Self {
        self.progress = progress;
        self
    }

    pub fn catalog(&self) -> &LanguageCatalog {
        &self.catalog
    }

    /// Runs every pair and returns the summary
    ///
    /// Credentials are loaded before anything else; a missing credential file
    /// aborts the run before any program is assembled.
    pub fn run(&self) -> Result<RunSummary, HarnessError> {
        let credentials = self.credentials.load()?;
        let services = discover_services(&self.docs_root)?;

        self.progress.on_progress(&ProgressEvent::RunStarted {
            services: services.len(),
            languages: self.catalog.len(),
        });

        let started_at = Utc::now();
        let start = Instant::now();
        let total = services.len() * self.catalog.len();
        let mut outcomes: Vec<Outcome> = Vec::with_capacity(total);

        for service in &services {
            for language in self.catalog.iter() {
                let pair_start = Instant::now();
                let outcome = self.run_pair(&credentials, service, language)?;

                self.progress.on_progress(&ProgressEvent::PairFinished {
                    index: outcomes.len() + 1,
                    total,
                    service: service.clone(),
                    language: language.name,
                    kind: outcome.kind,
                    duration: pair_start.elapsed(),
                });
                outcomes.push(outcome);
            }
        }

        let summary = RunSummary::new(
            started_at,
            Utc::now(),
            &services,
            self.catalog.as_slice(),
            &outcomes,
        );

        self.progress.on_progress(&ProgressEvent::RunFinished {
            tally: summary.totals,
            total_time: start.elapsed(),
        });

        Ok(summary)
    }

    /// Assembles and runs one pair
    pub fn run_pair(
        &self,
        credentials: &Arc<Credentials>,
        service: &str,
        language: &Language,
    ) -> Result<Outcome, HarnessError> {
        match self.assembler.assemble(credentials, service, language)? {
            Assembly::TemplateMissing(_) => Ok(Outcome::missing(service, *language)),
            Assembly::Assembled(program) => {
                Ok(self.executor.execute(service, language, &program)?)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_discover_services_filters_and_sorts() {
        let dir = TempDir::new().unwrap();
        for name in ["storage", "_shared", ".git", "billing", "compute"] {
            fs::create_dir_all(dir.path().join(name)).unwrap();
        }
        fs::write(dir.path().join("README.md"), "docs").unwrap();

        let services = discover_services(dir.path()).unwrap();
        assert_eq!(services, vec!["billing", "compute", "storage"]);
    }

    #[test]
    fn test_discover_services_missing_root() {
        let dir = TempDir::new().unwrap();
        let err = discover_services(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, HarnessError::DocsRoot { .. }));
    }

    #[test]
    fn test_run_without_credentials_aborts() {
        let dir = TempDir::new().unwrap();
        let config = HarnessConfig::rooted_at(dir.path());
        fs::create_dir_all(config.docs_root.join("storage")).unwrap();

        let err = Harness::new(&config).run().unwrap_err();
        assert!(matches!(
            err,
            HarnessError::Credentials(CredentialError::Missing { .. })
        ));
        assert!(!config.staging_dir.exists());
    }

    #[test]
    fn test_run_all_missing() {
        let dir = TempDir::new().unwrap();
        let config = HarnessConfig::rooted_at(dir.path());
        fs::create_dir_all(config.docs_root.join("storage")).unwrap();
        fs::create_dir_all(config.docs_root.join("billing")).unwrap();
        fs::create_dir_all(config.credentials_path.parent().unwrap()).unwrap();
        fs::write(&config.credentials_path, "{}").unwrap();

        let summary = Harness::new(&config).run().unwrap();

        assert_eq!(summary.outcomes.len(), 12);
        assert_eq!(summary.totals.missing, 12);
        assert_eq!(summary.services, vec!["billing", "storage"]);
        assert_eq!(summary.outcomes[0].service, "billing");
        assert_eq!(summary.outcomes[0].language, "C#");
        assert_eq!(summary.outcomes[11].language, "Ruby");
        assert!(summary.check().is_ok());
    }
}
