use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Runs the code samples embedded in service documentation
#[derive(Parser, Debug)]
#[command(
    name = "samplecheck",
    about = "Runs the code samples embedded in service documentation",
    version,
    long_about = "samplecheck extracts the code samples embedded in each service's \
                  documentation, assembles them into runnable programs using per-service, \
                  per-language templates, runs them, and reports which ones still work."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - only log errors"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Assemble and run every service sample in every language",
        long_about = "Walks every service under the documentation root and every supported \
                      language, assembles the language's program from its template, runs it \
                      and prints a summary grid.\n\n\
                      Exit status: 0 when no program failed, 1 when at least one failed \
                      (or, with --strict, when a template is missing), 2 on fatal errors.\n\n\
                      Examples:\n  \
                      samplecheck run\n  \
                      samplecheck run --docs site/docs --templates harness/templates\n  \
                      samplecheck run --format json --output results.json"
    )]
    Run(RunArgs),

    #[command(about = "List the supported languages")]
    Languages(LanguagesArgs),

    #[command(
        about = "Re-render a saved JSON summary",
        long_about = "Reads a summary written by `samplecheck run --format json` and prints it \
                      again in the requested format.\n\n\
                      Examples:\n  \
                      samplecheck report results.json\n  \
                      samplecheck report results.json --show-output"
    )]
    Report(ReportArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    #[arg(long, value_name = "DIR", help = "Documentation root [default: docs]")]
    pub docs: Option<PathBuf>,

    #[arg(long, value_name = "DIR", help = "Template root [default: templates]")]
    pub templates: Option<PathBuf>,

    #[arg(
        long,
        value_name = "DIR",
        help = "Directory for assembled programs [default: assembled]"
    )]
    pub staging: Option<PathBuf>,

    #[arg(
        long,
        value_name = "FILE",
        help = "Credentials JSON file [default: config/credentials.json]"
    )]
    pub credentials: Option<PathBuf>,

    #[arg(long, help = "Run each language's build command before running")]
    pub build: bool,

    #[arg(long, help = "Also exit non-zero when templates are missing")]
    pub strict: bool,

    #[arg(long, help = "Include the output of failed programs in the summary")]
    pub show_output: bool,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Summary format"
    )]
    pub format: OutputFormatArg,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write the summary to a file instead of stdout"
    )]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct LanguagesArgs {
    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct ReportArgs {
    #[arg(value_name = "FILE", help = "Summary written by `run --format json`")]
    pub file: PathBuf,

    #[arg(long, help = "Include the output of failed programs")]
    pub show_output: bool,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_args_verify() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_default_run_args() {
        let args = CliArgs::parse_from(["samplecheck", "run"]);
        match args.command {
            Commands::Run(run_args) => {
                assert_eq!(run_args.format, OutputFormatArg::Human);
                assert!(run_args.docs.is_none());
                assert!(run_args.credentials.is_none());
                assert!(!run_args.build);
                assert!(!run_args.strict);
                assert!(!run_args.show_output);
                assert!(run_args.output.is_none());
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_run_with_paths() {
        let args = CliArgs::parse_from([
            "samplecheck",
            "run",
            "--docs",
            "site/docs",
            "--templates",
            "tpl",
            "--staging",
            "out",
            "--credentials",
            "secrets.json",
            "--format",
            "json",
            "--strict",
        ]);
        match args.command {
            Commands::Run(run_args) => {
                assert_eq!(run_args.docs, Some(PathBuf::from("site/docs")));
                assert_eq!(run_args.templates, Some(PathBuf::from("tpl")));
                assert_eq!(run_args.staging, Some(PathBuf::from("out")));
                assert_eq!(run_args.credentials, Some(PathBuf::from("secrets.json")));
                assert_eq!(run_args.format, OutputFormatArg::Json);
                assert!(run_args.strict);
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_report_requires_file() {
        assert!(CliArgs::try_parse_from(["samplecheck", "report"]).is_err());

        let args = CliArgs::parse_from(["samplecheck", "report", "results.json", "-f", "yaml"]);
        match args.command {
            Commands::Report(report_args) => {
                assert_eq!(report_args.file, PathBuf::from("results.json"));
                assert_eq!(report_args.format, OutputFormatArg::Yaml);
            }
            _ => panic!("Expected Report command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let args = CliArgs::parse_from(["samplecheck", "languages", "-v"]);
        assert!(args.verbose);
        assert!(CliArgs::try_parse_from(["samplecheck", "-v", "-q", "languages"]).is_err());
    }
}
