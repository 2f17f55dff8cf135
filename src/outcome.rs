//! Outcome records for (service, language) pairs

use crate::languages::Language;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of one (service, language) attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeKind {
    /// Program ran and exited successfully
    Success,
    /// Program was built or run and did not exit successfully
    Failure,
    /// No template exists for the pair
    Missing,
}

impl OutcomeKind {
    pub const ALL: [OutcomeKind; 3] = [Self::Success, Self::Failure, Self::Missing];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
            Self::Missing => "missing",
        }
    }

    /// Grid marker used by the human summary
    pub fn marker(&self) -> char {
        match self {
            Self::Success => '\u{2713}',
            Self::Failure => '\u{2717}',
            Self::Missing => '\u{00B7}',
        }
    }
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recorded result of one (service, language) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub service: String,
    pub language: Language,
    pub output: String,
    pub kind: OutcomeKind,
}

impl Outcome {
    pub fn success(service: impl Into<String>, language: Language, output: String) -> Self {
        Self::new(service, language, output, OutcomeKind::Success)
    }

    pub fn failure(service: impl Into<String>, language: Language, output: String) -> Self {
        Self::new(service, language, output, OutcomeKind::Failure)
    }

    pub fn missing(service: impl Into<String>, language: Language) -> Self {
        Self::new(service, language, String::new(), OutcomeKind::Missing)
    }

    pub fn new(
        service: impl Into<String>,
        language: Language,
        output: String,
        kind: OutcomeKind,
    ) -> Self {
        Self {
            service: service.into(),
            language,
            output,
            kind,
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == OutcomeKind::Success
    }
}

/// Per-kind counts across a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub success: usize,
    pub failure: usize,
    pub missing: usize,
}

impl Tally {
    pub fn record(&mut self, kind: OutcomeKind) {
        match kind {
            OutcomeKind::Success => self.success += 1,
            OutcomeKind::Failure => self.failure += 1,
            OutcomeKind::Missing => self.missing += 1,
        }
    }

    pub fn count(&self, kind: OutcomeKind) -> usize {
        match kind {
            OutcomeKind::Success => self.success,
            OutcomeKind::Failure => self.failure,
            OutcomeKind::Missing => self.missing,
        }
    }

    pub fn total(&self) -> usize {
        self.success + self.failure + self.missing
    }
}

impl<'a> FromIterator<&'a OutcomeKind> for Tally {
    fn from_iter<I: IntoIterator<Item = &'a OutcomeKind>>(iter: I) -> Self {
        let mut tally = Tally::default();
        for kind in iter {
            tally.record(*kind);
        }
        tally
    }
}
