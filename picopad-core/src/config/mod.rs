//! Board configuration
//!
//! Board-agnostic description of the wiring and timing, parsed from
//! `board.toml` by the firmware build script and validated before any
//! code is generated from it.

pub mod board;

pub use board::*;
