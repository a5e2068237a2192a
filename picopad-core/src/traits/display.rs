//! Character display trait

/// Errors that can occur when writing to the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus write failed
    Communication,
    /// Display has not been initialized
    NotInitialized,
}

/// Text-mode display addressed by character cell
///
/// The status panel only needs cursor placement and text output; the LCD
/// driver implements this on top of its full command set.
pub trait CharacterDisplay {
    /// Clear the screen and return the cursor to the origin
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Move the cursor to `col`, `row`
    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DisplayError>;

    /// Write text at the cursor, advancing it
    fn print(&mut self, text: &str) -> Result<(), DisplayError>;

    /// Display size in characters as (columns, rows)
    fn dimensions(&self) -> (u8, u8);

    /// Write text at a position
    fn print_at(&mut self, col: u8, row: u8, text: &str) -> Result<(), DisplayError> {
        self.set_cursor(col, row)?;
        self.print(text)
    }
}
