#![forbid(unsafe_code)]

//! Command-line argument parsing for the kiosk demo.
//!
//! Parses args manually to keep the binary lean. Supports environment
//! variable overrides via the `KIOSK_DEMO_*` prefix.

use std::env;
use std::process;

use kiosk::Page;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
Boarding-house kiosk demo: on-screen keyboard and registration forms

USAGE:
    kiosk-demo [OPTIONS]

OPTIONS:
    --page=NAME          Page to open (default: owner)
    --add-ons=N          Add-on rows on the bill page (default: 1)
    --exit-after-ms=N    Quit after N milliseconds (0 = never)
    --help, -h           Show this help message
    --version, -V        Show version

PAGES:
    owner           Owner registration
    boarding-house  Boarding-house registration
    boarder         Boarder registration
    guardian        Guardian registration
    bill            Room bill with add-ons
    login           Four-digit passcode

KEYBINDINGS:
    letters, digits, . ,   Tap the matching key
    Space / Backspace      Tap Space / Backspace
    Enter                  Next field, or submit on the last one
    Tab                    Focus the next field
    Esc                    Close the keyboard
    Ctrl+C                 Quit

ENVIRONMENT VARIABLES:
    KIOSK_DEMO_PAGE            Override --page
    KIOSK_DEMO_ADD_ONS         Override --add-ons
    KIOSK_DEMO_EXIT_AFTER_MS   Override --exit-after-ms
    KIOSK_BACKSPACE_REPEAT_MS  Backspace repeat interval (default: 100)
    KIOSK_REJECT_FEEDBACK      silent | signal
    KIOSK_LOG_FORMAT           pretty | json
    RUST_LOG                   Log filter (default: info)";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    /// Page to open.
    pub page: Page,
    /// Auto-exit after this many milliseconds (0 = disabled).
    pub exit_after_ms: u64,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            page: Page::OwnerRegistration,
            exit_after_ms: 0,
        }
    }
}

/// Why an argument could not be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgError {
    Invalid { flag: &'static str, value: String },
    Unknown(String),
}

impl std::fmt::Display for ArgError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid { flag, value } => write!(f, "Invalid {flag} value: {value}"),
            Self::Unknown(arg) => write!(f, "Unknown argument: {arg}"),
        }
    }
}

impl std::error::Error for ArgError {}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(Opts),
    Help,
    Version,
}

impl Opts {
    /// Parse the process arguments and environment, exiting on `--help`,
    /// `--version` or bad input.
    pub fn parse() -> Self {
        let args: Vec<String> = env::args().skip(1).collect();
        match Self::parse_from(args, |key| env::var(key).ok()) {
            Ok(Command::Run(opts)) => opts,
            Ok(Command::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Ok(Command::Version) => {
                println!("kiosk-demo {VERSION}");
                process::exit(0);
            }
            Err(err) => {
                eprintln!("{err}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }

    /// Parse `args` with `get` as the environment.
    ///
    /// Environment variables take precedence over defaults but are
    /// overridden by explicit command-line flags.
    pub fn parse_from<I, F>(args: I, get: F) -> Result<Command, ArgError>
    where
        I: IntoIterator<Item = String>,
        F: Fn(&str) -> Option<String>,
    {
        let mut page = Page::OwnerRegistration;
        let mut add_ons: Option<usize> = None;
        let mut opts = Self::default();

        if let Some(val) = get("KIOSK_DEMO_PAGE")
            && let Some(p) = Page::parse(&val)
        {
            page = p;
        }
        if let Some(val) = get("KIOSK_DEMO_ADD_ONS")
            && let Ok(n) = val.trim().parse()
        {
            add_ons = Some(n);
        }
        if let Some(val) = get("KIOSK_DEMO_EXIT_AFTER_MS")
            && let Ok(n) = val.trim().parse()
        {
            opts.exit_after_ms = n;
        }

        for arg in args {
            match arg.as_str() {
                "--help" | "-h" => return Ok(Command::Help),
                "--version" | "-V" => return Ok(Command::Version),
                other => {
                    if let Some(val) = other.strip_prefix("--page=") {
                        page = Page::parse(val).ok_or_else(|| ArgError::Invalid {
                            flag: "--page",
                            value: val.to_string(),
                        })?;
                    } else if let Some(val) = other.strip_prefix("--add-ons=") {
                        add_ons = Some(val.parse().map_err(|_| ArgError::Invalid {
                            flag: "--add-ons",
                            value: val.to_string(),
                        })?);
                    } else if let Some(val) = other.strip_prefix("--exit-after-ms=") {
                        opts.exit_after_ms = val.parse().map_err(|_| ArgError::Invalid {
                            flag: "--exit-after-ms",
                            value: val.to_string(),
                        })?;
                    } else {
                        return Err(ArgError::Unknown(other.to_string()));
                    }
                }
            }
        }

        opts.page = match page {
            Page::BillRegistration { .. } => Page::BillRegistration {
                add_ons: add_ons.unwrap_or(1),
            },
            other => other,
        };
        Ok(Command::Run(opts))
    }
}
