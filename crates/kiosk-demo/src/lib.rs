#![forbid(unsafe_code)]

//! Terminal demo of the kiosk input core.

pub mod app;
pub mod cli;
