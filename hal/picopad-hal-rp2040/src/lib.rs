//! RP2040-specific HAL for the gamepad firmware
//!
//! Implements the `picopad-hal` traits on top of embassy-rp:
//! - Matrix row outputs and column inputs
//! - Blocking I2C master for the LCD backpack
//! - Busy-wait delays for protocol timing

#![no_std]

pub mod delay;
pub mod gpio;
pub mod i2c;

pub use delay::BlockingDelay;
pub use gpio::{MatrixCol, MatrixRow};
pub use i2c::I2cMaster;
