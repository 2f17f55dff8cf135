//! Program assembly from per-service, per-language templates
//!
//! A template lives at `<templates-root>/<service>.<language-ext>.j2` and is
//! rendered with [`minijinja`]. The render context exposes:
//!
//! - `service`: the service name
//! - `language`: the language descriptor (`name`, `syntax`, `extension`, `build`, `run`)
//! - `sample(name)`: the sample `name` for this service and language, with
//!   credential placeholders filled in
//!
//! ```text
//! # {{ language.name }} client for {{ service }}
//! import client
//!
//! {{ sample("create_client") }}
//! {{ sample("list_items") }}
//! ```
//!
//! The rendered text is written to `<staging-dir>/<service>.<language-ext>`.

use crate::credentials::Credentials;
use crate::languages::Language;
use crate::samples::SampleExtractor;
use minijinja::value::Value;
use minijinja::{context, AutoEscape, Environment};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Default extension of template files
pub const DEFAULT_TEMPLATE_EXTENSION: &str = "j2";

/// Errors that abort assembly
///
/// A missing template is not an error; see [`Assembly::TemplateMissing`].
#[derive(Debug, Error)]
pub enum AssembleError {
    #[error("Failed to create staging directory {}: {source}", .path.display())]
    StagingDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read template {}: {source}", .path.display())]
    ReadTemplate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to render template {}: {source}", .path.display())]
    Render {
        path: PathBuf,
        #[source]
        source: minijinja::Error,
    },

    #[error("Failed to write assembled program {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result of an assembly attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assembly {
    /// Program text was written to this staging path
    Assembled(PathBuf),

    /// No template exists for the pair
    TemplateMissing(PathBuf),
}

/// Resolves samples for one (service, language) pair during a render
#[derive(Debug, Clone)]
struct SampleLookup {
    extractor: SampleExtractor,
    credentials: Arc<Credentials>,
    service: String,
    syntax: &'static str,
}

impl SampleLookup {
    fn sample(&self, name: &str) -> String {
        let text = self.extractor.extract(&self.service, name, self.syntax);
        self.credentials.inject(&text)
    }
}

/// Renders templates into runnable programs in the staging directory
pub struct Assembler {
    templates_root: PathBuf,
    staging_dir: PathBuf,
    template_extension: String,
    extractor: SampleExtractor,
    env: Environment<'static>,
}

impl Assembler {
    pub fn new(
        templates_root: impl Into<PathBuf>,
        staging_dir: impl Into<PathBuf>,
        extractor: SampleExtractor,
    ) -> Self {
        let mut env = Environment::new();
        // Program text is emitted verbatim, whatever the target language
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_keep_trailing_newline(true);

        Self {
            templates_root: templates_root.into(),
            staging_dir: staging_dir.into(),
            template_extension: DEFAULT_TEMPLATE_EXTENSION.to_string(),
            extractor,
            env,
        }
    }

    pub fn with_template_extension(mut self, extension: impl Into<String>) -> Self {
        self.template_extension = extension.into();
        self
    }

    pub fn staging_dir(&self) -> &Path {
        &self.staging_dir
    }

    pub fn template_path(&self, service: &str, language: &Language) -> PathBuf {
        self.templates_root.join(format!(
            "{}.{}.{}",
            service, language.extension, self.template_extension
        ))
    }

    pub fn staging_path(&self, service: &str, language: &Language) -> PathBuf {
        self.staging_dir
            .join(format!("{}.{}", service, language.extension))
    }

    /// Renders the pair's template and writes the program to the staging directory
    pub fn assemble(
        &self,
        credentials: &Arc<Credentials>,
        service: &str,
        language: &Language,
    ) -> Result<Assembly, AssembleError> {
        fs::create_dir_all(&self.staging_dir).map_err(|source| AssembleError::StagingDir {
            path: self.staging_dir.clone(),
            source,
        })?;

        let template_path = self.template_path(service, language);
        let source = match fs::read_to_string(&template_path) {
            Ok(source) => source,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(
                    service,
                    language = language.name,
                    template = %template_path.display(),
                    "No template"
                );
                return Ok(Assembly::TemplateMissing(template_path));
            }
            Err(source) => {
                return Err(AssembleError::ReadTemplate {
                    path: template_path,
                    source,
                })
            }
        };

        let program = self.render(&template_path, &source, credentials, service, language)?;

        let staging_path = self.staging_path(service, language);
        fs::write(&staging_path, program).map_err(|source| AssembleError::Write {
            path: staging_path.clone(),
            source,
        })?;
        debug!(
            service,
            language = language.name,
            path = %staging_path.display(),
            "Assembled program"
        );

        Ok(Assembly::Assembled(staging_path))
    }

    fn render(
        &self,
        template_path: &Path,
        source: &str,
        credentials: &Arc<Credentials>,
        service: &str,
        language: &Language,
    ) -> Result<String, AssembleError> {
        let lookup = SampleLookup {
            extractor: self.extractor.clone(),
            credentials: Arc::clone(credentials),
            service: service.to_string(),
            syntax: language.syntax,
        };

        let ctx = context! {
            service => service,
            language => Value::from_serialize(language),
            sample => Value::from_function(move |name: String| lookup.sample(&name)),
        };

        let name = template_path.to_string_lossy();
        self.env
            .render_named_str(&name, source, ctx)
            .map_err(|source| AssembleError::Render {
                path: template_path.to_path_buf(),
                source,
            })
    }
}
