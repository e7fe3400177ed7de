#![forbid(unsafe_code)]

//! Demo state: one kiosk screen driven by terminal key presses.
//!
//! A terminal has no touch surface, so each key press is replayed as a tap
//! (pointer down, then up) on the matching on-screen key. Upper-case letters
//! are tapped with shift first, the way a kiosk user would.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent as TermKey, KeyEventKind as TermKind, KeyModifiers};
use kiosk::{
    BillTotals, KeyCap, KioskConfig, Page, PointerEvent, Screen, ScreenEvent, Submission,
};
use kiosk_keyboard::layout;

/// What the event loop should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// The demo's model.
#[derive(Debug)]
pub struct DemoApp {
    page: Page,
    screen: Screen,
    last_submission: Option<Submission>,
    status: String,
}

impl DemoApp {
    /// Open `page` and focus its first field.
    pub fn new(page: Page, config: &KioskConfig) -> kiosk::Result<Self> {
        let mut screen = Screen::for_page(page, config)?;
        let first = screen.session().fields().first().name().to_string();
        screen.focus(&first)?;
        Ok(Self {
            page,
            screen,
            last_submission: None,
            status: String::new(),
        })
    }

    /// Handle one terminal key event.
    pub fn handle_key(&mut self, key: TermKey, now: Instant) -> Flow {
        if key.kind == TermKind::Release {
            return Flow::Continue;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Flow::Quit;
        }
        match key.code {
            KeyCode::Esc => {
                if let Some(field) = self.screen.close_keyboard() {
                    self.status = format!("keyboard closed on {field}");
                }
            }
            KeyCode::Tab => self.focus_next(),
            KeyCode::Enter => self.tap(KeyCap::Enter, now),
            KeyCode::Backspace => self.tap(KeyCap::Backspace, now),
            KeyCode::Char(' ') => self.tap(KeyCap::Space, now),
            KeyCode::Char(c) => match layout::cap_for_char(c) {
                Some(cap) => {
                    if c.is_ascii_uppercase() && !self.screen.keyboard().shift_active() {
                        self.tap(KeyCap::Shift, now);
                    }
                    self.tap(cap, now);
                }
                None => self.status = format!("no key for {c:?} on the kiosk keyboard"),
            },
            _ => {}
        }
        Flow::Continue
    }

    /// Deliver due backspace repeats.
    pub fn tick(&mut self, now: Instant) {
        for event in self.screen.tick(now) {
            self.apply(event);
        }
    }

    /// How long the event loop may block.
    pub fn poll_timeout(&self, now: Instant, idle: Duration) -> Duration {
        self.screen.next_deadline(now).map_or(idle, |d| d.min(idle))
    }

    fn tap(&mut self, cap: KeyCap, now: Instant) {
        if let Some(event) = self.screen.pointer(PointerEvent::Down(cap), now) {
            self.apply(event);
        }
        self.screen.pointer(PointerEvent::Up, now);
    }

    fn focus_next(&mut self) {
        let order = self.screen.session().fields().order();
        let next = match self.screen.active_field() {
            Some(active) => order
                .iter()
                .position(|name| *name == active)
                .map_or(0, |i| (i + 1) % order.len()),
            None => 0,
        };
        let name = order[next].to_string();
        if let Err(err) = self.screen.focus(&name) {
            self.status = err.to_string();
        }
    }

    fn apply(&mut self, event: ScreenEvent) {
        match event {
            ScreenEvent::Focus(intent) => self.status = format!("editing {}", intent.field),
            ScreenEvent::Changed { .. } => self.status.clear(),
            ScreenEvent::Rejected { field, key } => {
                self.status = format!("{field} does not accept {}", key.name());
            }
            ScreenEvent::Submitted(submission) => {
                self.status = if submission.is_ready() {
                    "submitted".into()
                } else {
                    format!("{} field(s) need attention", submission.problems().len())
                };
                self.last_submission = Some(submission);
            }
        }
    }

    /// Lines to draw, top to bottom.
    pub fn view(&self) -> Vec<String> {
        let mut lines = vec![format!("kiosk demo: {} page", self.page), String::new()];
        let active = self.screen.active_field();
        for (name, value) in self.screen.session().values().iter() {
            let marker = if Some(name) == active { '>' } else { ' ' };
            lines.push(format!("{marker} {name:<26} [{value}]"));
        }
        if let Page::BillRegistration { add_ons } = self.page {
            let totals = BillTotals::compute(self.screen.session().values(), add_ons);
            lines.push(format!(
                "  total monthly due {}   initial payment {}",
                totals.monthly_due, totals.initial_payment
            ));
        }
        lines.push(String::new());
        if let Some(rows) = self.screen.keyboard_rows() {
            lines.extend(rows.into_iter().map(|row| format!("  {row}")));
            lines.push(String::new());
        }
        if let Some(submission) = &self.last_submission {
            for problem in submission.problems() {
                lines.push(format!("! {problem}"));
            }
            if submission.is_ready() {
                match submission.to_json() {
                    Ok(json) => lines.push(format!("payload {json}")),
                    Err(err) => lines.push(format!("payload error: {err}")),
                }
            }
        }
        if !self.status.is_empty() {
            lines.push(self.status.clone());
        }
        lines
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }
}
