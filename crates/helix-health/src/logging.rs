//! File logging.
//!
//! The viewer owns the terminal, so logs never go to stdout or stderr. They
//! are written to `HELIX_HEALTH_LOG` when it is set and dropped otherwise.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::cli::{DEFAULT_LOG_LEVEL, Opts};

/// Install the file subscriber. Returns whether logging is active.
///
/// Problems opening the log file or with the filter are reported on stderr;
/// the program then runs without logging.
pub fn init(opts: &Opts) -> bool {
    let Some(path) = &opts.log_file else {
        return false;
    };

    let file = match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("helix-health: cannot open log file {path}: {err}");
            return false;
        }
    };
    let filter = EnvFilter::try_new(&opts.log_level).unwrap_or_else(|err| {
        eprintln!(
            "helix-health: invalid log level {:?} ({err}), using {DEFAULT_LOG_LEVEL}",
            opts.log_level
        );
        EnvFilter::new(DEFAULT_LOG_LEVEL)
    });

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .is_ok();
    if installed {
        tracing::info!(version = env!("CARGO_PKG_VERSION"), "logging started");
    }
    installed
}
