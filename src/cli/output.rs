//! Output formatting for run summaries and the language catalog
//!
//! Summaries render as a human-readable grid (one row per service, one marker
//! per language), or as JSON/YAML for tooling. A JSON summary can be read back
//! with `samplecheck report`.
//!
//! # Example
//!
//! ```ignore
//! use samplecheck::cli::output::{OutputFormat, OutputFormatter};
//!
//! let summary = harness.run()?;
//! let formatter = OutputFormatter::new(OutputFormat::Human);
//! println!("{}", formatter.format_summary(&summary, false)?);
//! ```

use anyhow::{Context, Result};

use crate::languages::LanguageCatalog;
use crate::outcome::OutcomeKind;
use crate::report::RunSummary;

const RULE_WIDTH: usize = 42;

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable, accepted by `samplecheck report`)
    Json,
    /// YAML format
    Yaml,
    /// Human-readable grid
    Human,
}

/// Formatter for run summaries and the language catalog
pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a run summary; `show_output` adds failed programs' output to the human format
    pub fn format_summary(&self, summary: &RunSummary, show_output: bool) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(summary)
                .context("Failed to serialize summary to JSON"),
            OutputFormat::Yaml => {
                serde_yaml::to_string(summary).context("Failed to serialize summary to YAML")
            }
            OutputFormat::Human => Ok(self.format_summary_human(summary, show_output)),
        }
    }

    pub fn format_languages(&self, catalog: &LanguageCatalog) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(catalog.as_slice())
                .context("Failed to serialize languages to JSON"),
            OutputFormat::Yaml => serde_yaml::to_string(catalog.as_slice())
                .context("Failed to serialize languages to YAML"),
            OutputFormat::Human => Ok(self.format_languages_human(catalog)),
        }
    }

    fn format_summary_human(&self, summary: &RunSummary, show_output: bool) -> String {
        let mut output = String::new();

        output.push_str("Sample Run Summary\n");
        output.push_str(&"\u{2501}".repeat(RULE_WIDTH));
        output.push_str("\n\n");

        let service_width = summary
            .services
            .iter()
            .map(|s| s.chars().count())
            .chain(std::iter::once("Service".len()))
            .max()
            .unwrap_or(0);

        let mut header = format!("{:<width$}", "Service", width = service_width);
        for language in &summary.languages {
            header.push_str("  ");
            header.push_str(language);
        }
        output.push_str(header.trim_end());
        output.push('\n');

        for (service, cells) in summary.rows() {
            let mut line = format!("{:<width$}", service, width = service_width);
            for (language, cell) in summary.languages.iter().zip(cells) {
                let marker = cell.map_or('?', |kind| kind.marker());
                line.push_str("  ");
                line.push_str(&format!(
                    "{:<width$}",
                    marker,
                    width = language.chars().count()
                ));
            }
            output.push_str(line.trim_end());
            output.push('\n');
        }

        output.push('\n');
        output.push_str(&format!(
            "Success: {}  Failure: {}  Missing: {}\n",
            summary.totals.success, summary.totals.failure, summary.totals.missing
        ));
        output.push_str(&format!(
            "Legend:  {} success  {} failure  {} missing\n",
            OutcomeKind::Success.marker(),
            OutcomeKind::Failure.marker(),
            OutcomeKind::Missing.marker()
        ));

        if show_output {
            for failure in summary.failures() {
                output.push('\n');
                output.push_str(&format!(
                    "\u{2500}\u{2500} {} / {} \u{2500}\u{2500}\n",
                    failure.service, failure.language
                ));
                if failure.output.is_empty() {
                    output.push_str("(no output)\n");
                } else {
                    output.push_str(&failure.output);
                    if !failure.output.ends_with('\n') {
                        output.push('\n');
                    }
                }
            }
        }

        output
    }

    fn format_languages_human(&self, catalog: &LanguageCatalog) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "{:<12}{:<12}{:<6}{:<8}{}\n",
            "Language", "Syntax", "Ext", "Build", "Run"
        ));
        for language in catalog.iter() {
            output.push_str(&format!(
                "{:<12}{:<12}{:<6}{:<8}{}\n",
                language.name,
                language.syntax,
                language.extension,
                language.build.unwrap_or("-"),
                language.run
            ));
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::languages::{PYTHON, RUBY};
    use crate::outcome::Outcome;
    use chrono::Utc;

    fn summary() -> RunSummary {
        let now = Utc::now();
        let services = vec!["billing".to_string(), "storage-v2".to_string()];
        let outcomes = vec![
            Outcome::success("billing", PYTHON, "ok\n".to_string()),
            Outcome::missing("billing", RUBY),
            Outcome::failure("storage-v2", PYTHON, "NameError: x".to_string()),
            Outcome::success("storage-v2", RUBY, String::new()),
        ];
        RunSummary::new(now, now, &services, &[PYTHON, RUBY], &outcomes)
    }

    #[test]
    fn test_human_grid() {
        let formatter = OutputFormatter::new(OutputFormat::Human);
        let output = formatter.format_summary(&summary(), false).unwrap();

        assert!(output.contains("Service     Python  Ruby\n"));
        assert!(output.contains("billing     \u{2713}       \u{00B7}\n"));
        assert!(output.contains("storage-v2  \u{2717}       \u{2713}\n"));
        assert!(output.contains("Success: 2  Failure: 1  Missing: 1\n"));
        assert!(!output.contains("NameError"));
    }

    #[test]
    fn test_human_show_output() {
        let formatter = OutputFormatter::new(OutputFormat::Human);
        let output = formatter.format_summary(&summary(), true).unwrap();

        assert!(output.contains("storage-v2 / Python"));
        assert!(output.contains("NameError: x\n"));
        assert!(!output.contains("ok\n"));
    }

    #[test]
    fn test_json_summary() {
        let formatter = OutputFormatter::new(OutputFormat::Json);
        let output = formatter.format_summary(&summary(), false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["totals"]["failure"], 1);
        assert_eq!(value["outcomes"][2]["kind"], "failure");
        assert_eq!(value["outcomes"][2]["language"], "Python");
        assert_eq!(value["languages"][1], "Ruby");
    }

    #[test]
    fn test_yaml_summary() {
        let formatter = OutputFormatter::new(OutputFormat::Yaml);
        let output = formatter.format_summary(&summary(), false).unwrap();
        assert!(output.contains("kind: missing"));
    }

    #[test]
    fn test_languages_human() {
        let formatter = OutputFormatter::new(OutputFormat::Human);
        let output = formatter
            .format_languages(&LanguageCatalog::with_defaults())
            .unwrap();

        assert!(output.starts_with("Language"));
        assert!(output.contains("Java        java        java  javac   java\n"));
        assert!(output.contains("Python      python      py    -       python\n"));
    }

    #[test]
    fn test_languages_json() {
        let formatter = OutputFormatter::new(OutputFormat::Json);
        let output = formatter
            .format_languages(&LanguageCatalog::with_defaults())
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value.as_array().unwrap().len(), 6);
        assert_eq!(value[0]["name"], "C#");
        assert_eq!(value[0]["build"], "gcs");
    }
}
