//! Embassy async tasks

pub mod gamepad;

pub use gamepad::{gamepad_task, Lcd, Pad};
