#![forbid(unsafe_code)]

//! `helix-health`: search the output of `hx --health`.
//!
//! With search terms the matching rows are printed; without, an
//! interactive viewer filters as you type.

mod app;
mod cli;
mod layout;
mod logging;
mod msg;
mod plain;
mod source;
mod state;
mod theme;

use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;

use ftui_runtime::{Program, ProgramConfig, ScreenMode};
use tracing::{error, info};

use crate::cli::Opts;
use crate::plain::{PrintStyle, terminal_width, write_json, write_report};

fn main() -> ExitCode {
    let opts = Opts::parse();
    logging::init(&opts);

    let text = match source::load_report(&opts) {
        Ok(text) => text,
        Err(err) => {
            error!(%err, "loading the health report failed");
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };
    let report = health_report::parse(&text);
    info!(
        preamble = report.preamble_lines.len(),
        rows = report.rows.len(),
        "report parsed"
    );

    let result = if opts.json {
        print_json(&report, &opts)
    } else if opts.interactive() {
        run_viewer(report, &opts)
    } else {
        print_matches(&report, &opts)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        // Closed pipe, e.g. `helix-health rust | head`.
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "output failed");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn print_json(report: &health_report::Report, opts: &Opts) -> io::Result<()> {
    let mut out = io::stdout().lock();
    write_json(&mut out, report, &opts.terms)?;
    out.flush()
}

fn print_matches(report: &health_report::Report, opts: &Opts) -> io::Result<()> {
    let stdout = io::stdout();
    let style = PrintStyle {
        color: opts.color.enabled(stdout.is_terminal()),
        width: opts
            .width
            .map(usize::from)
            .unwrap_or_else(terminal_width),
    };
    let mut out = stdout.lock();
    write_report(&mut out, report, &opts.terms, style)?;
    out.flush()
}

fn run_viewer(report: health_report::Report, opts: &Opts) -> io::Result<()> {
    let config = ProgramConfig {
        screen_mode: ScreenMode::AltScreen,
        ..Default::default()
    }
    .with_mouse_enabled(opts.mouse);
    let mut program = Program::with_config(app::Viewer::new(report), config)?;
    program.run()
}
