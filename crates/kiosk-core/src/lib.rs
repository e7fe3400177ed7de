#![forbid(unsafe_code)]

//! Core: canonical key/pointer events and runtime configuration.

pub mod config;
pub mod event;
