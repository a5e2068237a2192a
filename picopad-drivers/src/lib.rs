//! Peripheral drivers
//!
//! Concrete implementations of the collaborator traits defined in
//! picopad-core, written against the picopad-hal bus traits:
//!
//! - HD44780 character LCD behind a PCF8574 I2C expander

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod lcd;

pub use lcd::{Hd44780, LcdError, LcdState};
