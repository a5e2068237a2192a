//! Input state tracking
//!
//! Each matrix keeps the vector from the current poll and the one before
//! it. Comparing the two yields the press/release edges used to decide
//! whether the display needs redrawing and what to log. Nothing is
//! debounced: every change between two consecutive polls is an edge.

use crate::matrix::{MatrixScan, MATRIX_KEYS};

/// Face buttons in physical scan order
///
/// Row 0 carries Y and B, row 1 carries X and A.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaceButton {
    Y = 0,
    B = 1,
    X = 2,
    A = 3,
}

impl FaceButton {
    /// All face buttons in scan order
    pub const ALL: [FaceButton; MATRIX_KEYS] =
        [FaceButton::Y, FaceButton::B, FaceButton::X, FaceButton::A];

    /// Scan index of this button
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Display label
    pub const fn label(self) -> &'static str {
        match self {
            FaceButton::Y => "Y",
            FaceButton::B => "B",
            FaceButton::X => "X",
            FaceButton::A => "A",
        }
    }
}

/// D-pad directions in physical scan order
///
/// Row 0 carries Up and Right, row 1 carries Left and Down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DpadButton {
    Up = 0,
    Right = 1,
    Left = 2,
    Down = 3,
}

impl DpadButton {
    /// All directions in scan order
    pub const ALL: [DpadButton; MATRIX_KEYS] = [
        DpadButton::Up,
        DpadButton::Right,
        DpadButton::Left,
        DpadButton::Down,
    ];

    /// Scan index of this direction
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Display label
    pub const fn label(self) -> &'static str {
        match self {
            DpadButton::Up => "UP",
            DpadButton::Right => "RIGHT",
            DpadButton::Left => "LEFT",
            DpadButton::Down => "DOWN",
        }
    }
}

/// A single press or release edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    /// Scan index that changed
    pub index: usize,
    /// New state (true = pressed)
    pub pressed: bool,
}

/// Set of indices that changed in one update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Changes {
    /// Bit `i` set = index `i` changed
    mask: u8,
    /// State after the update
    current: MatrixScan,
}

impl Changes {
    /// No change
    pub const NONE: Self = Self {
        mask: 0,
        current: [false; MATRIX_KEYS],
    };

    /// Whether anything changed
    pub fn any(&self) -> bool {
        self.mask != 0
    }

    /// Number of changed indices
    pub fn count(&self) -> u32 {
        self.mask.count_ones()
    }

    /// Whether `index` changed
    pub fn contains(&self, index: usize) -> bool {
        index < MATRIX_KEYS && self.mask & (1 << index) != 0
    }

    /// Raw change mask
    pub fn mask(&self) -> u8 {
        self.mask
    }

    /// Iterate over the edges in index order
    pub fn transitions(&self) -> impl Iterator<Item = Transition> + '_ {
        (0..MATRIX_KEYS)
            .filter(move |&index| self.contains(index))
            .map(move |index| Transition {
                index,
                pressed: self.current[index],
            })
    }
}

/// Current and previous state of one matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonState {
    current: MatrixScan,
    previous: MatrixScan,
}

impl ButtonState {
    /// All released
    pub const fn new() -> Self {
        Self {
            current: [false; MATRIX_KEYS],
            previous: [false; MATRIX_KEYS],
        }
    }

    /// Apply a new scan and return the indices that changed
    ///
    /// The old current vector becomes the previous one.
    pub fn update(&mut self, scan: MatrixScan) -> Changes {
        let mut mask = 0u8;
        for (index, (&new, &old)) in scan.iter().zip(self.current.iter()).enumerate() {
            if new != old {
                mask |= 1 << index;
            }
        }

        self.previous = self.current;
        self.current = scan;

        Changes {
            mask,
            current: scan,
        }
    }

    /// State from the latest scan
    pub fn current(&self) -> &MatrixScan {
        &self.current
    }

    /// State from the scan before the latest
    pub fn previous(&self) -> &MatrixScan {
        &self.previous
    }

    /// Whether `index` is currently held
    pub fn is_pressed(&self, index: usize) -> bool {
        self.current.get(index).copied().unwrap_or(false)
    }

    /// Whether nothing is held
    pub fn is_idle(&self) -> bool {
        self.current.iter().all(|&pressed| !pressed)
    }
}

/// Changes of both matrices from one poll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputChanges {
    pub face: Changes,
    pub dpad: Changes,
}

impl InputChanges {
    /// Whether either matrix changed
    pub fn any(&self) -> bool {
        self.face.any() || self.dpad.any()
    }
}

/// Tracked state of both matrices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputState {
    pub face: ButtonState,
    pub dpad: ButtonState,
}

impl InputState {
    /// Everything released
    pub const fn new() -> Self {
        Self {
            face: ButtonState::new(),
            dpad: ButtonState::new(),
        }
    }

    /// Apply one scan of each matrix
    pub fn update(&mut self, face: MatrixScan, dpad: MatrixScan) -> InputChanges {
        InputChanges {
            face: self.face.update(face),
            dpad: self.dpad.update(dpad),
        }
    }

    /// Whether a face button is held
    pub fn face_pressed(&self, button: FaceButton) -> bool {
        self.face.is_pressed(button.index())
    }

    /// Whether a D-pad direction is held
    pub fn dpad_pressed(&self, direction: DpadButton) -> bool {
        self.dpad.is_pressed(direction.index())
    }
}
