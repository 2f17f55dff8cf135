//! Credential loading and placeholder injection
//!
//! Samples in the documentation reference secrets through `{key}` placeholders.
//! The values live in a flat JSON object on disk (by default
//! `config/credentials.json`), next to a checked-in `credentials.json.example`
//! that lists the expected keys.
//!
//! # Example
//!
//! ```no_run
//! use samplecheck::credentials::CredentialStore;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = CredentialStore::new("config/credentials.json");
//! let credentials = store.load()?;
//!
//! let text = credentials.inject("client = Client(api_key=\"{api_key}\")");
//! println!("{}", text);
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use thiserror::Error;
use tracing::debug;

/// Suffix appended to the credential path to name the shipped example file
pub const EXAMPLE_SUFFIX: &str = ".example";

/// Errors raised while loading credentials
#[derive(Debug, Error)]
pub enum CredentialError {
    /// The credential file does not exist
    #[error(
        "Credentials file not found at {}. Copy {} to {} and fill in your values.",
        .path.display(),
        .example.display(),
        .path.display()
    )]
    Missing { path: PathBuf, example: PathBuf },

    /// The credential file exists but could not be read
    #[error("Failed to read credentials file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The credential file is not a flat JSON object of strings
    #[error("Invalid credentials file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Flat, read-only mapping of secret name to value
///
/// Keys iterate in sorted order, which keeps placeholder substitution
/// reproducible from run to run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    values: BTreeMap<String, String>,
}

impl Credentials {
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        let values: BTreeMap<String, String> = serde_json::from_str(content)?;
        Ok(Self { values })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Replaces every literal `{key}` in `text` with the matching value
    ///
    /// Braces that do not spell a known key are left alone.
    pub fn inject(&self, text: &str) -> String {
        let mut injected = text.to_string();
        for (key, value) in &self.values {
            let placeholder = format!("{{{}}}", key);
            if injected.contains(&placeholder) {
                injected = injected.replace(&placeholder, value);
            }
        }
        injected
    }
}

impl<K, V> FromIterator<(K, V)> for Credentials
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Lazily loads the credential file once and hands out the cached mapping
#[derive(Debug)]
pub struct CredentialStore {
    path: PathBuf,
    cached: OnceLock<Arc<Credentials>>,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cached: OnceLock::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the example file users copy to create the real one
    pub fn example_path(&self) -> PathBuf {
        let mut example = self.path.clone().into_os_string();
        example.push(EXAMPLE_SUFFIX);
        PathBuf::from(example)
    }

    /// Returns the credential mapping, reading the file on first call only
    pub fn load(&self) -> Result<Arc<Credentials>, CredentialError> {
        if let Some(credentials) = self.cached.get() {
            return Ok(Arc::clone(credentials));
        }

        let credentials = self.read()?;
        debug!(
            path = %self.path.display(),
            keys = credentials.len(),
            "Loaded credentials"
        );
        Ok(Arc::clone(self.cached.get_or_init(|| Arc::new(credentials))))
    }

    fn read(&self) -> Result<Credentials, CredentialError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(CredentialError::Missing {
                    path: self.path.clone(),
                    example: self.example_path(),
                })
            }
            Err(source) => {
                return Err(CredentialError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        Credentials::from_json(&content).map_err(|source| CredentialError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}
