//! Property-based invariant tests for a screen driven by arbitrary pointer
//! input.
//!
//! Each case replays a random mix of taps, holds, releases, waits, focus
//! changes and keyboard closes against the owner page and checks, after
//! every step:
//!
//! 1. At most one backspace repeat timer exists.
//! 2. No repeat runs while the keyboard is hidden.
//! 3. After a release or pointer-leave, later ticks deliver nothing.
//! 4. Field values only ever hold what their rules admit.

use std::time::{Duration, Instant};

use kiosk::{KeyCap, KioskConfig, Page, PointerEvent, Screen};
use proptest::prelude::*;

const FIELDS: [&str; 4] = ["ownerfirstname", "ownerlastname", "owneraddress", "ownercontact"];

#[derive(Debug, Clone)]
enum Step {
    Pointer(PointerEvent),
    Wait(u64),
    Focus(usize),
    Close,
}

// ── Helpers ─────────────────────────────────────────────────────────────

fn cap_strategy() -> impl Strategy<Value = KeyCap> {
    prop_oneof![
        6 => prop::sample::select("1234567890qwertyuiopasdfghjklzxcvbnm.,".chars().collect::<Vec<_>>())
            .prop_map(KeyCap::Char),
        1 => Just(KeyCap::Space),
        2 => Just(KeyCap::Backspace),
        1 => Just(KeyCap::Enter),
        1 => Just(KeyCap::Shift),
    ]
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        5 => cap_strategy().prop_map(|cap| Step::Pointer(PointerEvent::Down(cap))),
        3 => Just(Step::Pointer(PointerEvent::Up)),
        1 => Just(Step::Pointer(PointerEvent::Leave)),
        2 => (1u64..400).prop_map(Step::Wait),
        1 => (0..FIELDS.len()).prop_map(Step::Focus),
        1 => Just(Step::Close),
    ]
}

fn check_values(screen: &Screen) -> Result<(), TestCaseError> {
    let first = screen.value("ownerfirstname").unwrap_or_default();
    prop_assert!(
        first.chars().all(|c| c.is_ascii_alphabetic() || c == ' '),
        "first name: {:?}",
        first
    );
    let contact = screen.value("ownercontact").unwrap_or_default();
    prop_assert!(contact.len() <= 11, "contact: {:?}", contact);
    prop_assert!(
        contact.starts_with("09") || "09".starts_with(contact),
        "contact: {:?}",
        contact
    );
    Ok(())
}

// ═════════════════════════════════════════════════════════════════════════
// Pointer sequences
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn screen_invariants_hold(steps in prop::collection::vec(step_strategy(), 0..60)) {
        let config = KioskConfig::default().with_backspace_repeat(Duration::from_millis(50));
        let mut screen = Screen::for_page(Page::OwnerRegistration, &config).unwrap();
        let t0 = Instant::now();
        let mut elapsed = 0u64;
        screen.focus(FIELDS[0]).unwrap();

        for step in steps {
            let now = t0 + Duration::from_millis(elapsed);
            match step {
                Step::Pointer(event) => {
                    screen.pointer(event, now);
                    if matches!(event, PointerEvent::Up | PointerEvent::Leave) {
                        prop_assert!(!screen.keyboard().is_repeating());
                        prop_assert!(screen.tick(now + Duration::from_secs(5)).is_empty());
                    }
                }
                Step::Wait(ms) => {
                    elapsed += ms;
                    screen.tick(t0 + Duration::from_millis(elapsed));
                }
                Step::Focus(i) => {
                    screen.focus(FIELDS[i]).unwrap();
                    prop_assert!(!screen.keyboard().is_repeating());
                }
                Step::Close => {
                    screen.close_keyboard();
                }
            }
            prop_assert!(screen.keyboard().active_timers() <= 1);
            if !screen.keyboard_visible() {
                prop_assert!(!screen.keyboard().is_repeating());
                prop_assert_eq!(screen.keyboard_rows(), None);
            }
            check_values(&screen)?;
        }
    }
}
