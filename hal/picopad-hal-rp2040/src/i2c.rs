//! Blocking I2C master
//!
//! Adapts any `embedded_hal::i2c::I2c` bus (in practice
//! `embassy_rp::i2c::I2c<'_, _, Blocking>`) to the write-only `I2cBus`
//! trait used by the LCD driver.

use embassy_rp::i2c;
use picopad_hal::{I2cBus, I2cConfig};

/// I2C master wrapper
pub struct I2cMaster<B> {
    bus: B,
}

impl<B: embedded_hal::i2c::I2c> I2cMaster<B> {
    pub fn new(bus: B) -> Self {
        Self { bus }
    }
}

impl<B: embedded_hal::i2c::I2c> I2cBus for I2cMaster<B> {
    type Error = B::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.bus.write(address, data)
    }
}

/// embassy-rp bus configuration for `config`
pub fn rp_config(config: I2cConfig) -> i2c::Config {
    let mut rp = i2c::Config::default();
    rp.frequency = config.frequency;
    rp
}
