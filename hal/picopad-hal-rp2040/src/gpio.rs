//! Matrix pins
//!
//! Rows are push-pull outputs that idle high; columns are inputs with the
//! internal pull-up enabled so an open switch reads high.

use embassy_rp::gpio::{Input, Level, Output, Pin, Pull};
use embassy_rp::Peri;
use picopad_hal::{InputPin, OutputPin};

/// Row output, created high
pub struct MatrixRow<'d> {
    pin: Output<'d>,
}

impl<'d> MatrixRow<'d> {
    pub fn new(pin: Peri<'d, impl Pin>) -> Self {
        Self {
            pin: Output::new(pin, Level::High),
        }
    }
}

impl OutputPin for MatrixRow<'_> {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }
}

/// Column input with pull-up
pub struct MatrixCol<'d> {
    pin: Input<'d>,
}

impl<'d> MatrixCol<'d> {
    pub fn new(pin: Peri<'d, impl Pin>) -> Self {
        Self {
            pin: Input::new(pin, Pull::Up),
        }
    }
}

impl InputPin for MatrixCol<'_> {
    fn is_high(&self) -> bool {
        self.pin.is_high()
    }
}
