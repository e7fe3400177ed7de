#![forbid(unsafe_code)]

//! On-screen keyboard for the kiosk.
//!
//! The keyboard emits logical keys and nothing else. What a key does to a
//! field is decided by `kiosk-input`.

pub mod keyboard;
pub mod layout;
pub mod repeat;

pub use keyboard::VirtualKeyboard;
pub use repeat::BackspaceRepeat;
