#![forbid(unsafe_code)]

//! Kiosk demo binary entry point.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event};
use crossterm::style::Print;
use crossterm::terminal::{
    Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
    enable_raw_mode,
};
use crossterm::{execute, queue};
use kiosk::KioskConfig;
use kiosk_demo::app::{DemoApp, Flow};
use kiosk_demo::cli;

/// Longest the loop blocks when no repeat is pending.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Raw mode and the alternate screen, restored on drop.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, Hide)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

fn draw(out: &mut impl Write, lines: &[String]) -> io::Result<()> {
    queue!(out, Clear(ClearType::All))?;
    for (row, line) in lines.iter().enumerate() {
        let row = u16::try_from(row).unwrap_or(u16::MAX);
        queue!(out, MoveTo(0, row), Print(line))?;
    }
    out.flush()
}

fn run(app: &mut DemoApp, exit_after: Option<Duration>) -> io::Result<()> {
    let _guard = TerminalGuard::enter()?;
    let mut out = io::stdout();
    let started = Instant::now();
    loop {
        draw(&mut out, &app.view())?;
        let now = Instant::now();
        if exit_after.is_some_and(|limit| now.duration_since(started) >= limit) {
            tracing::info!("exit timer elapsed");
            return Ok(());
        }
        if event::poll(app.poll_timeout(now, IDLE_POLL))?
            && let Event::Key(key) = event::read()?
            && app.handle_key(key, Instant::now()) == Flow::Quit
        {
            return Ok(());
        }
        app.tick(Instant::now());
    }
}

fn main() {
    let opts = cli::Opts::parse();
    let config = KioskConfig::from_env();
    if let Err(err) = kiosk::logging::init(config.log_format) {
        eprintln!("{err}");
    }

    let mut app = match DemoApp::new(opts.page, &config) {
        Ok(app) => app,
        Err(err) => {
            eprintln!("Failed to open page: {err}");
            std::process::exit(1);
        }
    };
    let exit_after = (opts.exit_after_ms > 0).then(|| Duration::from_millis(opts.exit_after_ms));
    if let Err(err) = run(&mut app, exit_after) {
        eprintln!("Runtime error: {err}");
        std::process::exit(1);
    }
}
