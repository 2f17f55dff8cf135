use samplecheck::cli::commands::{CliArgs, Commands};
use samplecheck::cli::handlers::{handle_languages, handle_report, handle_run};
use samplecheck::util::{init_logging, LoggingConfig};
use samplecheck::VERSION;

use clap::Parser;
use tracing::debug;

fn main() {
    let args = CliArgs::parse();
    init_logging(LoggingConfig::from_args(
        args.log_level.as_deref(),
        args.verbose,
        args.quiet,
    ));

    debug!("samplecheck v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Run(run_args) => handle_run(run_args, args.log_level.as_deref()),
        Commands::Languages(languages_args) => handle_languages(languages_args),
        Commands::Report(report_args) => handle_report(report_args),
    };

    std::process::exit(exit_code);
}
