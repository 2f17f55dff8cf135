//! Run summaries: the ordered outcome sequence plus totals
//!
//! A summary is built at the end of a run, serialized by `run --format json`
//! and read back by the `report` command. Reading back re-checks the
//! invariants a run guarantees: every outcome kind is known, each
//! (service, language) cell of the grid has exactly one outcome, and the
//! totals agree with the outcomes.

use crate::languages::Language;
use crate::outcome::{Outcome, OutcomeKind, Tally};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to read report {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid report {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Inconsistent report: {0}")]
    Inconsistent(String),
}

/// One outcome as stored in a summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    pub service: String,
    pub language: String,
    pub kind: OutcomeKind,
    #[serde(default)]
    pub output: String,
}

impl From<&Outcome> for OutcomeRecord {
    fn from(outcome: &Outcome) -> Self {
        Self {
            service: outcome.service.clone(),
            language: outcome.language.name.to_string(),
            kind: outcome.kind,
            output: outcome.output.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Service rows, in run order
    pub services: Vec<String>,
    /// Language columns, in catalog order
    pub languages: Vec<String>,
    pub outcomes: Vec<OutcomeRecord>,
    pub totals: Tally,
}

impl RunSummary {
    pub fn new(
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
        services: &[String],
        languages: &[Language],
        outcomes: &[Outcome],
    ) -> Self {
        Self {
            started_at,
            finished_at,
            services: services.to_vec(),
            languages: languages.iter().map(|l| l.name.to_string()).collect(),
            outcomes: outcomes.iter().map(OutcomeRecord::from).collect(),
            totals: outcomes.iter().map(|o| &o.kind).collect(),
        }
    }

    /// Reads and checks a JSON summary written by a previous run
    pub fn load(path: &Path) -> Result<Self, ReportError> {
        let content = fs::read_to_string(path).map_err(|source| ReportError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let summary: Self = serde_json::from_str(&content).map_err(|source| ReportError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        summary.check()?;
        Ok(summary)
    }

    /// Verifies the grid is complete and the totals match the outcomes
    pub fn check(&self) -> Result<(), ReportError> {
        let expected = self.services.len() * self.languages.len();
        if self.outcomes.len() != expected {
            return Err(ReportError::Inconsistent(format!(
                "{} outcomes for {} services x {} languages",
                self.outcomes.len(),
                self.services.len(),
                self.languages.len()
            )));
        }

        let mut seen: HashMap<(&str, &str), usize> = HashMap::new();
        for record in &self.outcomes {
            if !self.services.contains(&record.service) {
                return Err(ReportError::Inconsistent(format!(
                    "outcome for unknown service '{}'",
                    record.service
                )));
            }
            if !self.languages.contains(&record.language) {
                return Err(ReportError::Inconsistent(format!(
                    "outcome for unknown language '{}'",
                    record.language
                )));
            }
            let count = seen
                .entry((record.service.as_str(), record.language.as_str()))
                .or_insert(0);
            *count += 1;
            if *count > 1 {
                return Err(ReportError::Inconsistent(format!(
                    "duplicate outcome for {} / {}",
                    record.service, record.language
                )));
            }
        }

        let recomputed: Tally = self.outcomes.iter().map(|o| &o.kind).collect();
        if recomputed != self.totals {
            return Err(ReportError::Inconsistent(format!(
                "totals {:?} do not match outcomes {:?}",
                self.totals, recomputed
            )));
        }

        Ok(())
    }

    /// Grid rows: one per service, one kind per language column
    ///
    /// A cell with no outcome is `None`; this only happens for summaries that
    /// failed [`RunSummary::check`].
    pub fn rows(&self) -> Vec<(&str, Vec<Option<OutcomeKind>>)> {
        let mut cells: HashMap<(&str, &str), OutcomeKind> = HashMap::new();
        for record in &self.outcomes {
            cells.insert((record.service.as_str(), record.language.as_str()), record.kind);
        }

        self.services
            .iter()
            .map(|service| {
                let row = self
                    .languages
                    .iter()
                    .map(|language| cells.get(&(service.as_str(), language.as_str())).copied())
                    .collect();
                (service.as_str(), row)
            })
            .collect()
    }

    pub fn failures(&self) -> impl Iterator<Item = &OutcomeRecord> {
        self.outcomes
            .iter()
            .filter(|o| o.kind == OutcomeKind::Failure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::languages::{PYTHON, RUBY};
    use tempfile::TempDir;

    fn summary() -> RunSummary {
        let now = Utc::now();
        let services = vec!["billing".to_string(), "storage".to_string()];
        let outcomes = vec![
            Outcome::success("billing", PYTHON, "ok\n".to_string()),
            Outcome::missing("billing", RUBY),
            Outcome::failure("storage", PYTHON, "Traceback\n".to_string()),
            Outcome::success("storage", RUBY, String::new()),
        ];
        RunSummary::new(now, now, &services, &[PYTHON, RUBY], &outcomes)
    }

    #[test]
    fn test_new_counts_totals() {
        let summary = summary();
        assert_eq!(
            summary.totals,
            Tally {
                success: 2,
                failure: 1,
                missing: 1
            }
        );
        assert_eq!(summary.languages, vec!["Python", "Ruby"]);
        assert!(summary.check().is_ok());
    }

    #[test]
    fn test_rows_follow_column_order() {
        let summary = summary();
        let rows = summary.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].0, "billing");
        assert_eq!(
            rows[0].1,
            vec![Some(OutcomeKind::Success), Some(OutcomeKind::Missing)]
        );
        assert_eq!(
            rows[1].1,
            vec![Some(OutcomeKind::Failure), Some(OutcomeKind::Success)]
        );
    }

    #[test]
    fn test_failures() {
        let summary = summary();
        let failures: Vec<&str> = summary.failures().map(|f| f.service.as_str()).collect();
        assert_eq!(failures, vec!["storage"]);
    }

    #[test]
    fn test_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("summary.json");
        let summary = summary();
        fs::write(&path, serde_json::to_string_pretty(&summary).unwrap()).unwrap();

        assert_eq!(RunSummary::load(&path).unwrap(), summary);
    }

    #[test]
    fn test_load_rejects_unknown_kind() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("summary.json");
        let json = serde_json::to_string(&summary())
            .unwrap()
            .replace("\"missing\"", "\"skipped\"");
        fs::write(&path, json).unwrap();

        let err = RunSummary::load(&path).unwrap_err();
        assert!(matches!(err, ReportError::Parse { .. }));
        assert!(err.to_string().contains("skipped"));
    }

    #[test]
    fn test_check_rejects_duplicates() {
        let mut summary = summary();
        summary.outcomes[1] = summary.outcomes[0].clone();
        summary.totals = summary.outcomes.iter().map(|o| &o.kind).collect();

        let err = summary.check().unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_check_rejects_wrong_totals() {
        let mut summary = summary();
        summary.totals.failure = 5;
        assert!(matches!(summary.check(), Err(ReportError::Inconsistent(_))));
    }

    #[test]
    fn test_check_rejects_missing_cells() {
        let mut summary = summary();
        summary.outcomes.pop();
        assert!(summary.check().is_err());
    }
}
