//! Character LCD drivers

pub mod hd44780;
pub mod pcf8574;

pub use hd44780::{Hd44780, LcdState, ROW_OFFSETS};

use picopad_core::traits::DisplayError;

/// LCD driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LcdError<E> {
    /// The I2C write failed
    Bus(E),
    /// Called before `init` completed
    NotInitialized,
    /// CGRAM slot outside 0-7
    InvalidLocation,
}

impl<E> From<LcdError<E>> for DisplayError {
    fn from(err: LcdError<E>) -> Self {
        match err {
            LcdError::NotInitialized => DisplayError::NotInitialized,
            LcdError::Bus(_) | LcdError::InvalidLocation => DisplayError::Communication,
        }
    }
}
