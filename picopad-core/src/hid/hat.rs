//! Hat switch resolution
//!
//! The hat reports one of eight compass directions, clockwise from north,
//! or a null value when nothing is held. Diagonals are checked before the
//! cardinal directions so that two adjacent directions held together
//! resolve to the diagonal between them.

/// North
pub const HAT_N: u8 = 0;
/// North-east
pub const HAT_NE: u8 = 1;
/// East
pub const HAT_E: u8 = 2;
/// South-east
pub const HAT_SE: u8 = 3;
/// South
pub const HAT_S: u8 = 4;
/// South-west
pub const HAT_SW: u8 = 5;
/// West
pub const HAT_W: u8 = 6;
/// North-west
pub const HAT_NW: u8 = 7;

/// D-pad direction flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Dpad {
    pub up: bool,
    pub right: bool,
    pub down: bool,
    pub left: bool,
}

impl Dpad {
    const UP: u8 = 0b0001;
    const RIGHT: u8 = 0b0010;
    const DOWN: u8 = 0b0100;
    const LEFT: u8 = 0b1000;

    /// Create from individual direction flags
    pub const fn new(up: bool, right: bool, down: bool, left: bool) -> Self {
        Self {
            up,
            right,
            down,
            left,
        }
    }

    fn bits(&self) -> u8 {
        let mut bits = 0;
        if self.up {
            bits |= Self::UP;
        }
        if self.right {
            bits |= Self::RIGHT;
        }
        if self.down {
            bits |= Self::DOWN;
        }
        if self.left {
            bits |= Self::LEFT;
        }
        bits
    }
}

/// Resolution order: (required directions, hat value)
///
/// The first entry whose directions are all held wins.
const HAT_RULES: [(u8, u8); 8] = [
    (Dpad::UP | Dpad::RIGHT, HAT_NE),
    (Dpad::RIGHT | Dpad::DOWN, HAT_SE),
    (Dpad::DOWN | Dpad::LEFT, HAT_SW),
    (Dpad::LEFT | Dpad::UP, HAT_NW),
    (Dpad::UP, HAT_N),
    (Dpad::RIGHT, HAT_E),
    (Dpad::DOWN, HAT_S),
    (Dpad::LEFT, HAT_W),
];

/// Resolve D-pad flags to a hat value
///
/// Returns `null` when no direction is held. The null value is profile
/// specific and always outside 0..=7.
pub fn hat_from_dpad(dpad: Dpad, null: u8) -> u8 {
    let held = dpad.bits();
    HAT_RULES
        .iter()
        .find(|&&(required, _)| held & required == required)
        .map(|&(_, value)| value)
        .unwrap_or(null)
}
