//! Status panel layout
//!
//! ```text
//! col  0    5
//!     +--------------------+
//! row0|USB HID Gamepad     |
//! row1|ABXY + D-pad        |
//! row2|ABXY:Y A            |
//! row3|DPAD:-              |
//!     +--------------------+
//! ```
//!
//! The banner and labels are drawn once. Value fields are only rewritten
//! when the matching matrix changed, which keeps I2C traffic off the hot
//! path while nothing is pressed.

use crate::input::{DpadButton, FaceButton, InputChanges, InputState};
use crate::traits::{CharacterDisplay, DisplayError};

/// Banner lines
pub const TITLE: &str = "USB HID Gamepad";
pub const SUBTITLE: &str = "ABXY + D-pad";

/// Row labels
pub const FACE_LABEL: &str = "ABXY:";
pub const DPAD_LABEL: &str = "DPAD:";

pub const FACE_ROW: u8 = 2;
pub const DPAD_ROW: u8 = 3;

/// Column where the value field starts
pub const VALUE_COL: u8 = 5;

/// Width of the value field
pub const VALUE_WIDTH: usize = 15;

/// Shown when nothing in a row is pressed
pub const NONE_PRESSED: &str = "-";

const BLANK: &str = "               ";

/// Panel errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelError {
    /// The display rejected a write
    Display(DisplayError),
}

impl From<DisplayError> for PanelError {
    fn from(err: DisplayError) -> Self {
        PanelError::Display(err)
    }
}

/// Draws the gamepad status screen
#[derive(Debug, Default)]
pub struct StatusPanel;

impl StatusPanel {
    pub const fn new() -> Self {
        Self
    }

    /// Clear the screen and draw the banner, labels and idle values
    pub fn draw_static<D: CharacterDisplay>(&self, display: &mut D) -> Result<(), PanelError> {
        display.clear()?;
        display.print_at(0, 0, TITLE)?;
        display.print_at(0, 1, SUBTITLE)?;
        display.print_at(0, FACE_ROW, FACE_LABEL)?;
        display.print_at(0, DPAD_ROW, DPAD_LABEL)?;

        let idle = InputState::new();
        self.render_face(display, &idle)?;
        self.render_dpad(display, &idle)
    }

    /// Redraw the value rows whose matrix changed
    ///
    /// Returns `Ok(false)` when nothing needed redrawing.
    pub fn render<D: CharacterDisplay>(
        &self,
        display: &mut D,
        input: &InputState,
        changes: &InputChanges,
    ) -> Result<bool, PanelError> {
        if changes.face.any() {
            self.render_face(display, input)?;
        }
        if changes.dpad.any() {
            self.render_dpad(display, input)?;
        }
        Ok(changes.any())
    }

    fn render_face<D: CharacterDisplay>(
        &self,
        display: &mut D,
        input: &InputState,
    ) -> Result<(), PanelError> {
        let labels = FaceButton::ALL
            .iter()
            .filter(|button| input.face_pressed(**button))
            .map(|button| button.label());
        write_value(display, FACE_ROW, labels)
    }

    fn render_dpad<D: CharacterDisplay>(
        &self,
        display: &mut D,
        input: &InputState,
    ) -> Result<(), PanelError> {
        let labels = DpadButton::ALL
            .iter()
            .filter(|direction| input.dpad_pressed(**direction))
            .map(|direction| direction.label());
        write_value(display, DPAD_ROW, labels)
    }
}

fn write_value<'a, D, I>(display: &mut D, row: u8, labels: I) -> Result<(), PanelError>
where
    D: CharacterDisplay,
    I: Iterator<Item = &'a str>,
{
    display.print_at(VALUE_COL, row, BLANK)?;
    display.set_cursor(VALUE_COL, row)?;

    let mut any = false;
    for label in labels {
        display.print(label)?;
        display.print(" ")?;
        any = true;
    }
    if !any {
        display.print(NONE_PRESSED)?;
    }
    Ok(())
}
