#![forbid(unsafe_code)]

//! Command-line argument parsing.
//!
//! Parses args manually, like the rest of the FrankenTUI binaries.
//! Supports environment variable overrides via the `HELIX_HEALTH_*` prefix.

use std::env;
use std::process;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
helix-health: search the Helix health report

USAGE:
    helix-health [OPTIONS] [TERM]...

With no TERM an interactive viewer is started. With one or more TERMs the
rows matching any of them are printed and the program exits.

OPTIONS:
    --command=PROGRAM    Helix executable to run (default: hx, then helix)
    --input=PATH         Read a saved report instead of running Helix ('-' = stdin)
    --color=WHEN         Colour output: 'auto', 'always' or 'never' (default: auto)
    --json               Print the (filtered) report as JSON
    --width=N            Separator width for printed output (default: terminal width)
    --no-mouse           Disable mouse capture in the viewer
    --help, -h           Show this help message
    --version, -V        Show version
    --                   Treat every following argument as a TERM

KEYBINDINGS:
    type                 Filter rows
    Up/Down, Ctrl+P/N    Scroll one line
    PgUp/PgDn            Scroll one page
    Home/End             Jump to top/bottom
    q                    Quit (when the search is empty)
    Esc / Ctrl+C         Quit

ENVIRONMENT VARIABLES:
    HELIX_HEALTH_COMMAND    Override --command
    HELIX_HEALTH_INPUT      Override --input
    HELIX_HEALTH_COLOR      Override --color
    HELIX_HEALTH_LOG        Write logs to this file
    HELIX_HEALTH_LOG_LEVEL  Log filter directives (default: info)
    NO_COLOR                Disable colour output";

/// Default log filter when `HELIX_HEALTH_LOG_LEVEL` is unset.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// When printed output is coloured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Colour when stdout is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn from_arg(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "always" => Some(Self::Always),
            "never" => Some(Self::Never),
            _ => None,
        }
    }

    /// Resolve `Auto` against whether the output is a terminal.
    pub fn enabled(self, is_terminal: bool) -> bool {
        match self {
            Self::Auto => is_terminal,
            Self::Always => true,
            Self::Never => false,
        }
    }
}

/// Parsed command-line options.
#[derive(Debug, Clone, Default)]
pub struct Opts {
    /// Filter terms. Non-empty selects printed output.
    pub terms: Vec<String>,
    /// Helix executable given by flag or environment.
    pub command: Option<String>,
    /// Saved report to read instead of running Helix.
    pub input: Option<String>,
    pub color: ColorMode,
    /// Print JSON instead of text.
    pub json: bool,
    /// Separator width override for printed output.
    pub width: Option<u16>,
    /// Mouse capture in the viewer.
    pub mouse: bool,
    /// Log file path.
    pub log_file: Option<String>,
    /// Log filter directives.
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ParseError {
    Help,
    Version,
    InvalidValue { flag: &'static str, value: String },
    UnknownArg(String),
}

impl Opts {
    /// Parse command-line arguments and environment variables.
    ///
    /// Environment variables take precedence over defaults but are overridden
    /// by explicit command-line flags.
    pub fn parse() -> Self {
        match Self::parse_from_env_and_args(env::args().skip(1), |key| env::var(key).ok()) {
            Ok(opts) => opts,
            Err(ParseError::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Err(ParseError::Version) => {
                println!("helix-health {VERSION}");
                process::exit(0);
            }
            Err(ParseError::InvalidValue { flag, value }) => {
                eprintln!("Invalid {flag} value: {value}");
                process::exit(1);
            }
            Err(ParseError::UnknownArg(arg)) => {
                eprintln!("Unknown argument: {arg}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }

    /// Interactive viewer unless filter terms or JSON output were requested.
    pub fn interactive(&self) -> bool {
        self.terms.is_empty() && !self.json
    }

    fn parse_from_env_and_args<I, S, F>(args: I, get_env: F) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        F: Fn(&str) -> Option<String>,
    {
        let mut opts = Self {
            mouse: true,
            log_level: DEFAULT_LOG_LEVEL.into(),
            ..Self::default()
        };

        // Apply environment variable defaults first
        if let Some(val) = get_env("HELIX_HEALTH_COMMAND")
            && !val.trim().is_empty()
        {
            opts.command = Some(val);
        }
        if let Some(val) = get_env("HELIX_HEALTH_INPUT")
            && !val.trim().is_empty()
        {
            opts.input = Some(val);
        }
        if let Some(val) = get_env("HELIX_HEALTH_COLOR")
            && let Some(mode) = ColorMode::from_arg(&val)
        {
            opts.color = mode;
        }
        if let Some(val) = get_env("HELIX_HEALTH_LOG")
            && !val.trim().is_empty()
        {
            opts.log_file = Some(val);
        }
        if let Some(val) = get_env("HELIX_HEALTH_LOG_LEVEL")
            && !val.trim().is_empty()
        {
            opts.log_level = val;
        }

        // Parse command-line args (override env vars)
        let mut only_terms = false;
        for arg in args {
            let arg = arg.as_ref();
            if only_terms || !arg.starts_with('-') || arg == "-" {
                opts.terms.push(arg.to_string());
                continue;
            }
            match arg {
                "--" => only_terms = true,
                "--help" | "-h" => return Err(ParseError::Help),
                "--version" | "-V" => return Err(ParseError::Version),
                "--json" => opts.json = true,
                "--no-mouse" => opts.mouse = false,
                other => {
                    if let Some(val) = other.strip_prefix("--command=") {
                        if val.trim().is_empty() {
                            return Err(ParseError::InvalidValue {
                                flag: "--command",
                                value: val.to_string(),
                            });
                        }
                        opts.command = Some(val.to_string());
                    } else if let Some(val) = other.strip_prefix("--input=") {
                        if val.is_empty() {
                            return Err(ParseError::InvalidValue {
                                flag: "--input",
                                value: val.to_string(),
                            });
                        }
                        opts.input = Some(val.to_string());
                    } else if let Some(val) = other.strip_prefix("--color=") {
                        match ColorMode::from_arg(val) {
                            Some(mode) => opts.color = mode,
                            None => {
                                return Err(ParseError::InvalidValue {
                                    flag: "--color",
                                    value: val.to_string(),
                                });
                            }
                        }
                    } else if let Some(val) = other.strip_prefix("--width=") {
                        match val.parse() {
                            Ok(n) if n > 0 => opts.width = Some(n),
                            _ => {
                                return Err(ParseError::InvalidValue {
                                    flag: "--width",
                                    value: val.to_string(),
                                });
                            }
                        }
                    } else {
                        return Err(ParseError::UnknownArg(other.to_string()));
                    }
                }
            }
        }

        // NO_COLOR wins over everything, including --color=always.
        if get_env("NO_COLOR").is_some_and(|val| !val.is_empty()) {
            opts.color = ColorMode::Never;
        }

        Ok(opts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_with_env<I, S>(
        args: I,
        env_pairs: &[(&'static str, &'static str)],
    ) -> Result<Opts, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = std::collections::HashMap::new();
        for (key, value) in env_pairs {
            map.insert(*key, *value);
        }
        Opts::parse_from_env_and_args(args, |key| map.get(key).map(|value| (*value).to_string()))
    }

    fn parse(args: &[&str]) -> Result<Opts, ParseError> {
        parse_with_env(args.iter().copied(), &[])
    }

    #[test]
    fn defaults() {
        let opts = parse(&[]).unwrap();
        assert!(opts.terms.is_empty());
        assert!(opts.command.is_none());
        assert!(opts.input.is_none());
        assert_eq!(opts.color, ColorMode::Auto);
        assert!(!opts.json);
        assert!(opts.width.is_none());
        assert!(opts.mouse);
        assert!(opts.log_file.is_none());
        assert_eq!(opts.log_level, DEFAULT_LOG_LEVEL);
        assert!(opts.interactive());
    }

    #[test]
    fn version_string_nonempty() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn help_text_mentions_every_flag() {
        for flag in [
            "--command=", "--input=", "--color=", "--json", "--width=", "--no-mouse", "--help",
            "--version",
        ] {
            assert!(HELP_TEXT.contains(flag), "missing {flag}");
        }
    }

    #[test]
    fn positional_terms() {
        let opts = parse(&["python", "go"]).unwrap();
        assert_eq!(opts.terms, ["python", "go"]);
        assert!(!opts.interactive());
    }

    #[test]
    fn flags_and_terms_mix() {
        let opts = parse(&["rust", "--color=never", "zig"]).unwrap();
        assert_eq!(opts.terms, ["rust", "zig"]);
        assert_eq!(opts.color, ColorMode::Never);
    }

    #[test]
    fn double_dash_ends_flags() {
        let opts = parse(&["--", "--json", "-x"]).unwrap();
        assert_eq!(opts.terms, ["--json", "-x"]);
        assert!(!opts.json);
    }

    #[test]
    fn lone_dash_is_a_term() {
        let opts = parse(&["-"]).unwrap();
        assert_eq!(opts.terms, ["-"]);
    }

    #[test]
    fn help_and_version() {
        assert_eq!(parse(&["--help"]).unwrap_err(), ParseError::Help);
        assert_eq!(parse(&["-h"]).unwrap_err(), ParseError::Help);
        assert_eq!(parse(&["--version"]).unwrap_err(), ParseError::Version);
        assert_eq!(parse(&["-V"]).unwrap_err(), ParseError::Version);
    }

    #[test]
    fn unknown_flag() {
        assert_eq!(
            parse(&["--bogus"]).unwrap_err(),
            ParseError::UnknownArg("--bogus".into())
        );
    }

    #[test]
    fn command_and_input() {
        let opts = parse(&["--command=helix", "--input=/tmp/report.txt"]).unwrap();
        assert_eq!(opts.command.as_deref(), Some("helix"));
        assert_eq!(opts.input.as_deref(), Some("/tmp/report.txt"));
    }

    #[test]
    fn empty_command_is_invalid() {
        assert_eq!(
            parse(&["--command="]).unwrap_err(),
            ParseError::InvalidValue {
                flag: "--command",
                value: String::new()
            }
        );
    }

    #[test]
    fn color_values() {
        assert_eq!(parse(&["--color=always"]).unwrap().color, ColorMode::Always);
        assert_eq!(parse(&["--color=NEVER"]).unwrap().color, ColorMode::Never);
        assert_eq!(parse(&["--color=auto"]).unwrap().color, ColorMode::Auto);
        assert_eq!(
            parse(&["--color=sometimes"]).unwrap_err(),
            ParseError::InvalidValue {
                flag: "--color",
                value: "sometimes".into()
            }
        );
    }

    #[test]
    fn width_must_be_positive() {
        assert_eq!(parse(&["--width=120"]).unwrap().width, Some(120));
        assert!(parse(&["--width=0"]).is_err());
        assert!(parse(&["--width=wide"]).is_err());
    }

    #[test]
    fn json_and_no_mouse() {
        let opts = parse(&["--json", "--no-mouse"]).unwrap();
        assert!(opts.json);
        assert!(!opts.mouse);
        assert!(!opts.interactive());
    }

    #[test]
    fn env_defaults() {
        let opts = parse_with_env(
            Vec::<String>::new(),
            &[
                ("HELIX_HEALTH_COMMAND", "helix"),
                ("HELIX_HEALTH_INPUT", "-"),
                ("HELIX_HEALTH_COLOR", "always"),
                ("HELIX_HEALTH_LOG", "/tmp/hh.log"),
                ("HELIX_HEALTH_LOG_LEVEL", "debug"),
            ],
        )
        .unwrap();
        assert_eq!(opts.command.as_deref(), Some("helix"));
        assert_eq!(opts.input.as_deref(), Some("-"));
        assert_eq!(opts.color, ColorMode::Always);
        assert_eq!(opts.log_file.as_deref(), Some("/tmp/hh.log"));
        assert_eq!(opts.log_level, "debug");
    }

    #[test]
    fn flags_override_env() {
        let opts = parse_with_env(
            ["--command=hx", "--color=never"],
            &[("HELIX_HEALTH_COMMAND", "helix"), ("HELIX_HEALTH_COLOR", "always")],
        )
        .unwrap();
        assert_eq!(opts.command.as_deref(), Some("hx"));
        assert_eq!(opts.color, ColorMode::Never);
    }

    #[test]
    fn invalid_env_values_are_ignored() {
        let opts = parse_with_env(
            Vec::<String>::new(),
            &[("HELIX_HEALTH_COLOR", "purple"), ("HELIX_HEALTH_COMMAND", "  ")],
        )
        .unwrap();
        assert_eq!(opts.color, ColorMode::Auto);
        assert!(opts.command.is_none());
    }

    #[test]
    fn no_color_forces_never() {
        let opts = parse_with_env(["--color=always"], &[("NO_COLOR", "1")]).unwrap();
        assert_eq!(opts.color, ColorMode::Never);

        let opts = parse_with_env(["--color=always"], &[("NO_COLOR", "")]).unwrap();
        assert_eq!(opts.color, ColorMode::Always);
    }

    #[test]
    fn color_mode_resolution() {
        assert!(ColorMode::Auto.enabled(true));
        assert!(!ColorMode::Auto.enabled(false));
        assert!(ColorMode::Always.enabled(false));
        assert!(!ColorMode::Never.enabled(true));
    }
}
