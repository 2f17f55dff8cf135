//! Sample extraction from service documentation
//!
//! Each service directory under the documentation root holds a `samples/`
//! directory of Markdown files. A sample file carries one fenced code block per
//! language, tagged with the language's syntax name:
//!
//! ````text
//! ```python
//!     client = Client("{api_key}")
//!     print(client.status())
//! ```
//! ```ruby
//!     client = Client.new("{api_key}")
//! ```
//! ````
//!
//! Extraction captures the lines of the first block tagged with the requested
//! syntax, up to the next fence line of any kind, and strips the indentation of
//! the first captured line from every line.

mod fence;

pub use fence::{dedent, extract_block, Fence};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Default extension of documentation sample files
pub const DEFAULT_SAMPLE_EXTENSION: &str = "md";

/// Reads tagged code blocks out of `<docs-root>/<service>/samples/<id>.<ext>`
#[derive(Debug, Clone)]
pub struct SampleExtractor {
    docs_root: PathBuf,
    extension: String,
}

impl SampleExtractor {
    pub fn new(docs_root: impl Into<PathBuf>) -> Self {
        Self {
            docs_root: docs_root.into(),
            extension: DEFAULT_SAMPLE_EXTENSION.to_string(),
        }
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn docs_root(&self) -> &Path {
        &self.docs_root
    }

    pub fn sample_path(&self, service: &str, identifier: &str) -> PathBuf {
        self.docs_root
            .join(service)
            .join("samples")
            .join(format!("{}.{}", identifier, self.extension))
    }

    /// Returns the de-indented sample text, or an empty string when the sample
    /// file is missing, unreadable or has no block tagged `syntax`
    pub fn extract(&self, service: &str, identifier: &str, syntax: &str) -> String {
        let path = self.sample_path(service, identifier);

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                warn!(
                    service,
                    sample = identifier,
                    path = %path.display(),
                    error = %e,
                    "{}",
                    read_failure(&e)
                );
                return String::new();
            }
        };

        let text = extract_block(&content, syntax);
        if text.is_empty() {
            warn!(
                service,
                sample = identifier,
                syntax,
                path = %path.display(),
                "No matching code block in sample"
            );
        } else {
            debug!(
                service,
                sample = identifier,
                syntax,
                bytes = text.len(),
                "Extracted sample"
            );
        }
        text
    }
}

fn read_failure(error: &io::Error) -> &'static str {
    match error.kind() {
        io::ErrorKind::NotFound => "Sample file not found",
        _ => "Failed to read sample file",
    }
}
