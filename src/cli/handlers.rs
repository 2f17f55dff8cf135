//! Command handlers; each returns the process exit code

use super::commands::{LanguagesArgs, OutputFormatArg, ReportArgs, RunArgs};
use super::output::OutputFormatter;
use crate::config::HarnessConfig;
use crate::harness::Harness;
use crate::languages::LanguageCatalog;
use crate::progress::{ConsoleHandler, LoggingHandler, ProgressHandler};
use crate::report::RunSummary;
use anyhow::{Context, Result};
use std::fs;
use std::sync::Arc;
use tracing::{debug, error, info};

/// No program failed
pub const EXIT_OK: i32 = 0;
/// At least one program failed (or, in strict mode, a template was missing)
pub const EXIT_FAILURES: i32 = 1;
/// The run could not complete
pub const EXIT_FATAL: i32 = 2;

pub fn handle_run(args: &RunArgs, log_level: Option<&str>) -> i32 {
    match run(args, log_level) {
        Ok(summary) => exit_code(&summary, args.strict),
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            EXIT_FATAL
        }
    }
}

fn run(args: &RunArgs, log_level: Option<&str>) -> Result<RunSummary> {
    let config = build_config(args, log_level);
    config.validate()?;
    debug!("{}", config);

    let on_stdout = progress_on_stdout(args);
    let console = if on_stdout {
        ConsoleHandler::stdout()
    } else {
        ConsoleHandler::stderr()
    };
    let handlers: Vec<Box<dyn ProgressHandler>> = vec![Box::new(LoggingHandler), Box::new(console)];
    let harness = Harness::new(&config).with_progress(Arc::new(handlers));

    let summary = harness.run().context("Sample run aborted")?;

    let formatter = OutputFormatter::new(args.format.into());
    let rendered = formatter.format_summary(&summary, args.show_output)?;
    match &args.output {
        Some(path) => {
            fs::write(path, &rendered)
                .with_context(|| format!("Failed to write summary to {}", path.display()))?;
            info!(path = %path.display(), "Summary written");
        }
        None => {
            if on_stdout {
                println!();
            }
            print!("{}", rendered);
        }
    }

    Ok(summary)
}

/// Whether live progress lines share stdout with the summary
///
/// A JSON or YAML summary printed to stdout must stay parseable, so its
/// progress lines go to stderr instead.
pub fn progress_on_stdout(args: &RunArgs) -> bool {
    args.output.is_some() || args.format == OutputFormatArg::Human
}

/// Environment configuration with command-line overrides applied
pub fn build_config(args: &RunArgs, log_level: Option<&str>) -> HarnessConfig {
    let mut config = HarnessConfig::default();
    if let Some(docs) = &args.docs {
        config.docs_root = docs.clone();
    }
    if let Some(templates) = &args.templates {
        config.templates_root = templates.clone();
    }
    if let Some(staging) = &args.staging {
        config.staging_dir = staging.clone();
    }
    if let Some(credentials) = &args.credentials {
        config.credentials_path = credentials.clone();
    }
    if args.build {
        config.build_step = true;
    }
    if let Some(level) = log_level {
        config.log_level = level.to_lowercase();
    }
    config
}

pub fn exit_code(summary: &RunSummary, strict: bool) -> i32 {
    if summary.totals.failure > 0 || (strict && summary.totals.missing > 0) {
        EXIT_FAILURES
    } else {
        EXIT_OK
    }
}

pub fn handle_languages(args: &LanguagesArgs) -> i32 {
    let formatter = OutputFormatter::new(args.format.into());
    match formatter.format_languages(&LanguageCatalog::with_defaults()) {
        Ok(rendered) => {
            print!("{}", rendered);
            EXIT_OK
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            EXIT_FATAL
        }
    }
}

pub fn handle_report(args: &ReportArgs) -> i32 {
    let rendered = RunSummary::load(&args.file)
        .map_err(anyhow::Error::from)
        .and_then(|summary| {
            OutputFormatter::new(args.format.into()).format_summary(&summary, args.show_output)
        });

    match rendered {
        Ok(rendered) => {
            print!("{}", rendered);
            EXIT_OK
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            EXIT_FATAL
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::languages::PYTHON;
    use crate::outcome::Outcome;
    use chrono::Utc;
    use serial_test::serial;
    use std::path::PathBuf;

    fn run_args() -> RunArgs {
        RunArgs {
            docs: None,
            templates: None,
            staging: None,
            credentials: None,
            build: false,
            strict: false,
            show_output: false,
            format: OutputFormatArg::Human,
            output: None,
        }
    }

    fn summary(outcomes: &[Outcome]) -> RunSummary {
        let now = Utc::now();
        RunSummary::new(now, now, &["svc".to_string()], &[PYTHON], outcomes)
    }

    #[test]
    fn test_exit_code() {
        let ok = summary(&[Outcome::success("svc", PYTHON, String::new())]);
        let failed = summary(&[Outcome::failure("svc", PYTHON, String::new())]);
        let missing = summary(&[Outcome::missing("svc", PYTHON)]);

        assert_eq!(exit_code(&ok, true), EXIT_OK);
        assert_eq!(exit_code(&failed, false), EXIT_FAILURES);
        assert_eq!(exit_code(&missing, false), EXIT_OK);
        assert_eq!(exit_code(&missing, true), EXIT_FAILURES);
    }

    #[test]
    fn test_progress_stream_selection() {
        let mut args = run_args();
        assert!(progress_on_stdout(&args));

        args.format = OutputFormatArg::Json;
        assert!(!progress_on_stdout(&args));
        args.format = OutputFormatArg::Yaml;
        assert!(!progress_on_stdout(&args));

        args.output = Some(PathBuf::from("summary.yaml"));
        assert!(progress_on_stdout(&args));
    }

    #[test]
    #[serial]
    fn test_build_config_overrides() {
        let mut args = run_args();
        args.docs = Some(PathBuf::from("d"));
        args.templates = Some(PathBuf::from("t"));
        args.staging = Some(PathBuf::from("s"));
        args.credentials = Some(PathBuf::from("c.json"));
        args.build = true;

        let config = build_config(&args, Some("DEBUG"));

        assert_eq!(config.docs_root, PathBuf::from("d"));
        assert_eq!(config.templates_root, PathBuf::from("t"));
        assert_eq!(config.staging_dir, PathBuf::from("s"));
        assert_eq!(config.credentials_path, PathBuf::from("c.json"));
        assert!(config.build_step);
        assert_eq!(config.log_level, "debug");
    }
}
