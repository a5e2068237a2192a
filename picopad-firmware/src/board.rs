//! Board wiring
//!
//! The constants, the LCD controller alias and the `board_pins!` macro are
//! generated by build.rs from board.toml.

use embassy_rp::i2c::{Blocking, I2c};
use embassy_rp::peripherals::USB;
use embassy_rp::Peri;
use picopad_core::config::MatrixPins;
use picopad_core::hid::ProfileKind;
use picopad_hal_rp2040::{MatrixCol, MatrixRow};

include!(concat!(env!("OUT_DIR"), "/board.rs"));

/// Peripherals claimed by the gamepad
pub struct BoardPins {
    pub face_rows: [MatrixRow<'static>; 2],
    pub face_cols: [MatrixCol<'static>; 2],
    pub dpad_rows: [MatrixRow<'static>; 2],
    pub dpad_cols: [MatrixCol<'static>; 2],
    pub i2c: I2c<'static, LcdI2c, Blocking>,
    pub usb: Peri<'static, USB>,
}
