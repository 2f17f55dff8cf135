//! Runs assembled programs and classifies the result by exit status

use crate::languages::Language;
use crate::outcome::Outcome;
use std::io::{self, Read};
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExecuteError {
    /// Capturing a child's output failed; the harness cannot tell what happened
    #[error("I/O error while running `{program}`: {source}")]
    Io {
        program: String,
        #[source]
        source: io::Error,
    },
}

/// Combined output and status of one subprocess
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutput {
    pub output: String,
    pub success: bool,
}

/// Runs a staged program through its language's executables
#[derive(Debug, Clone, Copy, Default)]
pub struct Executor {
    build_step: bool,
}

impl Executor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the language's build command before the run executable when it has one
    pub fn with_build_step(mut self, enabled: bool) -> Self {
        self.build_step = enabled;
        self
    }

    /// Executes `program` and records a success or failure outcome
    ///
    /// A non-zero exit, a crash or an executable that cannot be started are
    /// all recorded as failures. Only errors capturing the output escape.
    pub fn execute(
        &self,
        service: &str,
        language: &Language,
        program: &Path,
    ) -> Result<Outcome, ExecuteError> {
        let mut output = String::new();

        if self.build_step {
            if let Some(build) = language.build {
                let built = run_merged(build, program)?;
                if !built.success {
                    return Ok(Outcome::failure(service, *language, built.output));
                }
                output.push_str(&built.output);
            }
        }

        let ran = run_merged(language.run, program)?;
        output.push_str(&ran.output);

        Ok(if ran.success {
            Outcome::success(service, *language, output)
        } else {
            Outcome::failure(service, *language, output)
        })
    }
}

/// Runs `executable <arg>` with stderr merged into stdout, waiting for exit
pub fn run_merged(executable: &str, arg: &Path) -> Result<RunOutput, ExecuteError> {
    let io_err = |source: io::Error| ExecuteError::Io {
        program: executable.to_string(),
        source,
    };

    let (mut reader, writer) = io::pipe().map_err(io_err)?;
    let writer_err = writer.try_clone().map_err(io_err)?;

    // The Command temporary holds the parent's write ends and is dropped at the
    // end of this statement, so the read below sees EOF once the child exits.
    let spawned = Command::new(executable)
        .arg(arg)
        .stdin(Stdio::null())
        .stdout(writer)
        .stderr(writer_err)
        .spawn();

    let mut child = match spawned {
        Ok(child) => child,
        Err(e) => {
            debug!(executable, error = %e, "Failed to start");
            return Ok(RunOutput {
                output: format!("Failed to start `{}`: {}\n", executable, e),
                success: false,
            });
        }
    };

    let mut bytes = Vec::new();
    let read = reader.read_to_end(&mut bytes);
    let status = child.wait().map_err(io_err)?;
    read.map_err(io_err)?;

    debug!(
        executable,
        arg = %arg.display(),
        status = %describe(status),
        bytes = bytes.len(),
        "Process finished"
    );

    Ok(RunOutput {
        output: String::from_utf8_lossy(&bytes).into_owned(),
        success: status.success(),
    })
}

fn describe(status: ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("exit {}", code),
        None => "terminated by signal".to_string(),
    }
}
