//! Where the report text comes from: a Helix run or a saved file.
//!
//! All functions are blocking; the report is loaded once before the viewer
//! starts.

use std::fmt;
use std::fs;
use std::io::{self, Read};
use std::process::{Command, ExitStatus};

use tracing::{debug, info, warn};

use crate::cli::Opts;

/// Executables tried, in order, when no command was given.
const DEFAULT_COMMANDS: [&str; 2] = ["hx", "helix"];

/// Errors from loading the report.
#[derive(Debug)]
pub enum SourceError {
    /// The executable does not exist.
    NotFound { program: String },
    /// The executable exists but could not be started.
    Spawn { program: String, source: io::Error },
    /// The executable ran and exited unsuccessfully.
    Failed {
        program: String,
        status: ExitStatus,
        output: String,
    },
    /// The saved report could not be read.
    Input { path: String, source: io::Error },
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { program } => write!(
                f,
                "running `{program} --health`: program not found (is Helix installed and on PATH?)"
            ),
            Self::Spawn { program, source } => {
                write!(f, "running `{program} --health`: {source}")
            }
            Self::Failed {
                program,
                status,
                output,
            } => {
                write!(f, "`{program} --health` failed ({status})")?;
                let output = output.trim();
                if !output.is_empty() {
                    write!(f, ":\n{output}")?;
                }
                Ok(())
            }
            Self::Input { path, source } => write!(f, "reading {path}: {source}"),
        }
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Spawn { source, .. } | Self::Input { source, .. } => Some(source),
            Self::NotFound { .. } | Self::Failed { .. } => None,
        }
    }
}

pub type SourceResult<T> = Result<T, SourceError>;

/// Load the raw report text selected by `opts`.
///
/// A saved report (`--input`) wins over running Helix. Without an explicit
/// command, `hx` is tried first and `helix` when `hx` does not exist.
pub fn load_report(opts: &Opts) -> SourceResult<String> {
    if let Some(path) = &opts.input {
        return read_input(path);
    }
    if let Some(program) = &opts.command {
        return run_health(program);
    }

    load_first(&DEFAULT_COMMANDS)
}

/// Run the first of `candidates` that exists.
///
/// Only [`SourceError::NotFound`] moves on to the next candidate; when none
/// exists the error names the last one tried.
pub fn load_first(candidates: &[&str]) -> SourceResult<String> {
    let mut last = None;
    for &program in candidates {
        match run_health(program) {
            Err(err @ SourceError::NotFound { .. }) => {
                debug!(program, "not found, trying next");
                last = Some(err);
            }
            result => return result,
        }
    }
    Err(last.unwrap_or_else(|| SourceError::NotFound {
        program: candidates.first().copied().unwrap_or_default().to_string(),
    }))
}

/// Run `program --health` and return stdout followed by stderr.
pub fn run_health(program: &str) -> SourceResult<String> {
    let output = Command::new(program)
        .arg("--health")
        .output()
        .map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => SourceError::NotFound {
                program: program.to_string(),
            },
            _ => SourceError::Spawn {
                program: program.to_string(),
                source,
            },
        })?;

    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));

    if !output.status.success() {
        warn!(program, status = %output.status, "health check failed");
        return Err(SourceError::Failed {
            program: program.to_string(),
            status: output.status,
            output: text,
        });
    }
    info!(program, bytes = text.len(), "loaded health report");
    Ok(text)
}

/// Read a saved report; `-` reads standard input.
pub fn read_input(path: &str) -> SourceResult<String> {
    let input_error = |source: io::Error| SourceError::Input {
        path: path.to_string(),
        source,
    };
    let text = if path == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text).map_err(input_error)?;
        text
    } else {
        let bytes = fs::read(path).map_err(input_error)?;
        String::from_utf8_lossy(&bytes).into_owned()
    };
    info!(path, bytes = text.len(), "read saved report");
    Ok(text)
}
