//! PCF8574 backpack wiring
//!
//! The expander's eight outputs drive the LCD directly:
//!
//! ```text
//! bit  7  6  5  4  3   2  1  0
//!     D7 D6 D5 D4 BL  EN RW RS
//! ```
//!
//! Only the upper data nibble is wired, so the LCD runs in 4-bit mode and
//! every byte goes out as two nibbles, high first.

/// Register select: set for data, clear for commands
pub const RS: u8 = 0x01;

/// Read/write select, always write on this backpack
pub const RW: u8 = 0x02;

/// Enable strobe, latched on the falling edge
pub const EN: u8 = 0x04;

/// Backlight transistor
pub const BACKLIGHT: u8 = 0x08;

/// Data nibble mask
pub const DATA_MASK: u8 = 0xF0;

/// Enable pulse width in microseconds
pub const ENABLE_PULSE_US: u32 = 1;

/// Command settle time after the falling edge in microseconds
pub const COMMAND_SETTLE_US: u32 = 50;

/// Register select for one transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    Command,
    Data,
}

impl Mode {
    pub const fn bits(self) -> u8 {
        match self {
            Mode::Command => 0,
            Mode::Data => RS,
        }
    }
}

/// Expander byte for the given nibble (already in bits 4-7)
pub const fn frame(nibble: u8, mode: Mode, enable: bool, backlight: bool) -> u8 {
    let mut byte = (nibble & DATA_MASK) | mode.bits();
    if enable {
        byte |= EN;
    }
    if backlight {
        byte |= BACKLIGHT;
    }
    byte
}

/// Split a byte into its high and low nibble, both placed in bits 4-7
pub const fn nibbles(byte: u8) -> [u8; 2] {
    [byte & DATA_MASK, (byte << 4) & DATA_MASK]
}
