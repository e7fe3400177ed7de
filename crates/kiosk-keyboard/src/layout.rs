#![forbid(unsafe_code)]

//! Key layout of the on-screen keyboard.

use kiosk_core::event::KeyCap;
use unicode_width::UnicodeWidthStr;

use KeyCap::{Backspace, Char, Enter, Shift, Space};

/// The keyboard's rows, top to bottom.
pub const ROWS: [&[KeyCap]; 5] = [
    &[
        Char('1'),
        Char('2'),
        Char('3'),
        Char('4'),
        Char('5'),
        Char('6'),
        Char('7'),
        Char('8'),
        Char('9'),
        Char('0'),
    ],
    &[
        Char('q'),
        Char('w'),
        Char('e'),
        Char('r'),
        Char('t'),
        Char('y'),
        Char('u'),
        Char('i'),
        Char('o'),
        Char('p'),
    ],
    &[
        Char('a'),
        Char('s'),
        Char('d'),
        Char('f'),
        Char('g'),
        Char('h'),
        Char('j'),
        Char('k'),
        Char('l'),
    ],
    &[
        Char('z'),
        Char('x'),
        Char('c'),
        Char('v'),
        Char('b'),
        Char('n'),
        Char('m'),
        Backspace,
    ],
    &[Char('.'), Char(','), Enter, Space, Shift],
];

/// Minimum display width of a key label.
const MIN_LABEL_WIDTH: usize = 3;

/// Iterate every key in reading order.
pub fn keys() -> impl Iterator<Item = KeyCap> {
    ROWS.iter().flat_map(|row| row.iter().copied())
}

/// The key that types `c`, matching letters case-insensitively.
pub fn cap_for_char(c: char) -> Option<KeyCap> {
    let lower = c.to_ascii_lowercase();
    keys().find(|cap| *cap == Char(lower))
}

/// `(row, column)` of a key.
pub fn position(cap: KeyCap) -> Option<(usize, usize)> {
    ROWS.iter().enumerate().find_map(|(row, caps)| {
        caps.iter()
            .position(|c| *c == cap)
            .map(|col| (row, col))
    })
}

/// Render each row as a line of bracketed labels.
///
/// Short labels are centred in a cell of at least three columns so the
/// rows stay aligned whether or not shift is active.
pub fn render_rows(shift: bool) -> Vec<String> {
    ROWS.iter()
        .map(|row| {
            row.iter()
                .map(|cap| render_cap(*cap, shift))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

fn render_cap(cap: KeyCap, shift: bool) -> String {
    let label = cap.label(shift);
    let width = label.width();
    let pad = MIN_LABEL_WIDTH.saturating_sub(width);
    let left = pad / 2;
    format!(
        "[{}{}{}]",
        " ".repeat(left),
        label,
        " ".repeat(pad - left)
    )
}
