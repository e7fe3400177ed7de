//! End-to-end page flows driven through pointer events.
//!
//! Each test taps keys on the virtual keyboard exactly as the touch screen
//! would report them and checks what the page ends up holding.

use std::time::{Duration, Instant};

use kiosk_keyboard::layout::cap_for_char as cap;
use kiosk::prelude::*;
use kiosk::{EditState, RejectFeedback};

const MS: Duration = Duration::from_millis(1);

/// Tap out `text` on the keyboard, using shift for upper-case letters.
fn type_text(screen: &mut Screen, text: &str, now: Instant) -> Vec<ScreenEvent> {
    let mut events = Vec::new();
    for c in text.chars() {
        if c.is_ascii_uppercase() {
            tap(screen, KeyCap::Shift, now, &mut events);
        }
        let key = if c == ' ' {
            KeyCap::Space
        } else {
            cap(c).unwrap_or_else(|| panic!("no key for {c:?}"))
        };
        tap(screen, key, now, &mut events);
    }
    events
}

fn tap(screen: &mut Screen, key: KeyCap, now: Instant, events: &mut Vec<ScreenEvent>) {
    events.extend(screen.pointer(PointerEvent::Down(key), now));
    events.extend(screen.pointer(PointerEvent::Up, now));
}

fn enter(screen: &mut Screen, now: Instant) -> Option<ScreenEvent> {
    let event = screen.pointer(PointerEvent::Down(KeyCap::Enter), now);
    screen.pointer(PointerEvent::Up, now);
    event
}

#[test]
fn guardian_page_fills_and_submits() {
    let mut screen = Screen::for_page(Page::GuardianRegistration, &KioskConfig::default()).unwrap();
    let now = Instant::now();

    let intent = screen.focus("guardianfirstname").unwrap();
    assert!(intent.show_keyboard && intent.scroll_into_view);

    let answers = [
        ("guardianfirstname", "rosa", "Rosa"),
        ("guardianmiddlename", "m.", "M."),
        ("guardianlastname", "dela cruz jr.", "Dela Cruz Jr."),
        ("guardianaddress", "purok 5, brgy. 12", "Purok 5, Brgy. 12"),
        ("guardiancontactnumber", "09171234567", "09171234567"),
        ("relationship", "mother", "Mother"),
    ];
    for (i, (field, typed, expected)) in answers.iter().enumerate() {
        assert_eq!(screen.active_field(), Some(*field));
        type_text(&mut screen, typed, now);
        assert_eq!(screen.value(field), Some(*expected));
        let event = enter(&mut screen, now);
        if i + 1 < answers.len() {
            let Some(ScreenEvent::Focus(intent)) = event else {
                panic!("expected focus after {field}, got {event:?}");
            };
            assert_eq!(intent.field, answers[i + 1].0);
        } else {
            let Some(ScreenEvent::Submitted(submission)) = event else {
                panic!("expected submission, got {event:?}");
            };
            assert!(submission.is_ready(), "{:?}", submission.problems());
        }
    }
    assert_eq!(screen.session().state(), &EditState::Idle);
    assert!(!screen.keyboard_visible());
}

#[test]
fn shift_upper_cases_one_letter() {
    let mut screen = Screen::for_page(Page::BoardingHouseRegistration, &KioskConfig::default()).unwrap();
    let now = Instant::now();
    screen.focus("bhname").unwrap();
    type_text(&mut screen, "Casa", now);
    // Title case applies on every insert regardless of shift.
    assert_eq!(screen.value("bhname"), Some("Casa"));
    assert!(!screen.keyboard().shift_active());
}

#[test]
fn held_backspace_repeats_until_release() {
    let mut screen = Screen::for_page(Page::OwnerRegistration, &KioskConfig::default()).unwrap();
    let t0 = Instant::now();
    screen.focus("ownerfirstname").unwrap();
    type_text(&mut screen, "maria", t0);

    screen.pointer(PointerEvent::Down(KeyCap::Backspace), t0);
    assert_eq!(screen.value("ownerfirstname"), Some("Mari"));
    let repeats = screen.tick(t0 + 250 * MS);
    assert_eq!(repeats.len(), 2);
    assert_eq!(screen.value("ownerfirstname"), Some("Ma"));

    screen.pointer(PointerEvent::Leave, t0 + 260 * MS);
    assert!(screen.tick(t0 + 2000 * MS).is_empty());
    assert_eq!(screen.value("ownerfirstname"), Some("Ma"));
}

#[test]
fn repeat_on_empty_field_is_harmless() {
    let config = KioskConfig::default().with_backspace_repeat(50 * MS);
    let mut screen = Screen::for_page(Page::Login, &config).unwrap();
    let t0 = Instant::now();
    screen.focus("passcode").unwrap();
    screen.pointer(PointerEvent::Down(KeyCap::Backspace), t0);
    let events = screen.tick(t0 + 500 * MS);
    assert_eq!(events.len(), 10);
    assert_eq!(screen.value("passcode"), Some(""));
}

#[test]
fn login_rejects_short_passcode_on_submit() {
    let config = KioskConfig::default().with_reject_feedback(RejectFeedback::Signal);
    let mut screen = Screen::for_page(Page::Login, &config).unwrap();
    let now = Instant::now();
    screen.focus("passcode").unwrap();
    let events = type_text(&mut screen, "12a", now);
    assert!(events.contains(&ScreenEvent::Rejected {
        field: "passcode".into(),
        key: Key::Char('a'),
    }));
    let Some(ScreenEvent::Submitted(submission)) = enter(&mut screen, now) else {
        panic!("expected submission");
    };
    assert!(!submission.is_ready());
    assert_eq!(submission.problems()[0].field, "passcode");
}

#[test]
fn unknown_field_is_an_error() {
    let mut screen = Screen::for_page(Page::Login, &KioskConfig::default()).unwrap();
    let err: kiosk::Error = screen.focus("username").unwrap_err().into();
    assert_eq!(err.to_string(), "no field named 'username' on this page");
}
