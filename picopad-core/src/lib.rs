//! Board-agnostic core logic for the Picopad gamepad firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Switch matrix scanning over the HAL pin traits
//! - Input state tracking and edge detection
//! - HID report profiles, encoding and report descriptors
//! - Status panel layout for the character display
//! - The poll-loop controller tying them together
//! - Board configuration types

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod controller;
pub mod hid;
pub mod input;
pub mod matrix;
pub mod panel;
pub mod traits;

pub use controller::{Gamepad, PollReport};
pub use input::{DpadButton, FaceButton, InputChanges, InputState};
pub use matrix::MatrixScanner;
pub use panel::StatusPanel;
pub use traits::{CharacterDisplay, HidTransport};
