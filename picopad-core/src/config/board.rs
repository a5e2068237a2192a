//! Board wiring and timing types

#[cfg(feature = "serde")]
use serde::Deserialize;

use crate::hid::ProfileKind;
use crate::matrix::{DEFAULT_SETTLE_US, MATRIX_COLS, MATRIX_ROWS};

/// Number of GPIOs on the RP2040 user bank
pub const GPIO_COUNT: u8 = 30;

/// Highest usable 7-bit I2C address
pub const MAX_I2C_ADDRESS: u8 = 0x77;

/// Pins of one 2x2 switch matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct MatrixPins {
    /// Row outputs, driven low one at a time
    pub rows: [u8; MATRIX_ROWS],
    /// Column inputs with pull-ups
    pub cols: [u8; MATRIX_COLS],
}

impl MatrixPins {
    pub const fn new(rows: [u8; MATRIX_ROWS], cols: [u8; MATRIX_COLS]) -> Self {
        Self { rows, cols }
    }

    fn pins(&self) -> impl Iterator<Item = u8> + '_ {
        self.rows.iter().chain(self.cols.iter()).copied()
    }
}

/// Character LCD on an I2C backpack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct DisplayConfig {
    /// I2C data pin
    pub sda: u8,
    /// I2C clock pin
    pub scl: u8,
    /// 7-bit expander address (0x27 or 0x3F on common backpacks)
    pub address: u8,
    /// Bus frequency in Hz
    #[cfg_attr(feature = "serde", serde(default = "default_frequency"))]
    pub frequency: u32,
    pub columns: u8,
    pub rows: u8,
}

/// RP2040 I2C controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cBlock {
    I2c0,
    I2c1,
}

impl DisplayConfig {
    /// Controller that can drive `sda` and `scl`, if any
    ///
    /// GPIO `n` carries SDA when `n % 4` is 0 (I2C0) or 2 (I2C1) and SCL
    /// when it is 1 (I2C0) or 3 (I2C1).
    pub fn i2c_block(&self) -> Option<I2cBlock> {
        let sda = match self.sda % 4 {
            0 => I2cBlock::I2c0,
            2 => I2cBlock::I2c1,
            _ => return None,
        };
        let scl = match self.scl % 4 {
            1 => I2cBlock::I2c0,
            3 => I2cBlock::I2c1,
            _ => return None,
        };
        (sda == scl).then_some(sda)
    }
}

#[cfg(feature = "serde")]
fn default_frequency() -> u32 {
    100_000
}

/// USB HID settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct HidConfig {
    /// Report layout and USB identity
    #[cfg_attr(feature = "serde", serde(default))]
    pub profile: ProfileKind,
}

/// Loop timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct TimingConfig {
    /// Delay between polls in milliseconds
    pub poll_interval_ms: u32,
    /// Row settle time in microseconds
    pub settle_us: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1,
            settle_us: DEFAULT_SETTLE_US,
        }
    }
}

/// Complete board description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct BoardConfig {
    pub face: MatrixPins,
    pub dpad: MatrixPins,
    pub display: DisplayConfig,
    #[cfg_attr(feature = "serde", serde(default))]
    pub hid: HidConfig,
    #[cfg_attr(feature = "serde", serde(default))]
    pub timing: TimingConfig,
}

/// Board configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// GPIO number outside 0..30
    PinOutOfRange(u8),
    /// Same GPIO assigned twice
    DuplicatePin(u8),
    /// SDA/SCL pair not served by a single I2C controller
    InvalidI2cPins { sda: u8, scl: u8 },
    /// I2C address not a valid 7-bit address
    InvalidAddress(u8),
    /// LCD geometry outside 1..=40 columns, 1..=4 rows
    InvalidGeometry { columns: u8, rows: u8 },
    /// Poll interval outside 1..=100 ms
    InvalidPollInterval(u32),
    /// Settle time outside 1..=1000 us
    InvalidSettleTime(u32),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::PinOutOfRange(pin) => write!(f, "GPIO {} out of range (0-29)", pin),
            ConfigError::DuplicatePin(pin) => write!(f, "GPIO {} assigned more than once", pin),
            ConfigError::InvalidI2cPins { sda, scl } => {
                write!(f, "GPIO {}/{} cannot be used as I2C SDA/SCL", sda, scl)
            }
            ConfigError::InvalidAddress(addr) => {
                write!(f, "I2C address {:#04x} is not a 7-bit address", addr)
            }
            ConfigError::InvalidGeometry { columns, rows } => {
                write!(f, "unsupported LCD geometry {}x{}", columns, rows)
            }
            ConfigError::InvalidPollInterval(ms) => {
                write!(f, "poll interval {} ms out of range (1-100)", ms)
            }
            ConfigError::InvalidSettleTime(us) => {
                write!(f, "settle time {} us out of range (1-1000)", us)
            }
        }
    }
}

impl BoardConfig {
    /// Reference board: Pico with a 20x4 LCD on a PCF8574 at 0x27
    pub const DEFAULT: Self = Self {
        face: MatrixPins::new([14, 15], [16, 17]),
        dpad: MatrixPins::new([18, 19], [20, 21]),
        display: DisplayConfig {
            sda: 4,
            scl: 5,
            address: 0x27,
            frequency: 100_000,
            columns: 20,
            rows: 4,
        },
        hid: HidConfig {
            profile: ProfileKind::Rich,
        },
        timing: TimingConfig {
            poll_interval_ms: 1,
            settle_us: DEFAULT_SETTLE_US,
        },
    };

    /// Every GPIO the board claims, matrices first
    pub fn pins(&self) -> impl Iterator<Item = u8> + '_ {
        self.face
            .pins()
            .chain(self.dpad.pins())
            .chain([self.display.sda, self.display.scl])
    }

    /// Check ranges and pin conflicts
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = 0u32;
        for pin in self.pins() {
            if pin >= GPIO_COUNT {
                return Err(ConfigError::PinOutOfRange(pin));
            }
            if seen & (1 << pin) != 0 {
                return Err(ConfigError::DuplicatePin(pin));
            }
            seen |= 1 << pin;
        }

        if self.display.i2c_block().is_none() {
            return Err(ConfigError::InvalidI2cPins {
                sda: self.display.sda,
                scl: self.display.scl,
            });
        }

        if self.display.address > MAX_I2C_ADDRESS {
            return Err(ConfigError::InvalidAddress(self.display.address));
        }

        let display = &self.display;
        if !(1..=40).contains(&display.columns) || !(1..=4).contains(&display.rows) {
            return Err(ConfigError::InvalidGeometry {
                columns: display.columns,
                rows: display.rows,
            });
        }

        if !(1..=100).contains(&self.timing.poll_interval_ms) {
            return Err(ConfigError::InvalidPollInterval(self.timing.poll_interval_ms));
        }
        if !(1..=1000).contains(&self.timing.settle_us) {
            return Err(ConfigError::InvalidSettleTime(self.timing.settle_us));
        }

        Ok(())
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
