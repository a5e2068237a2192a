//! Switch matrix scanner
//!
//! Each input matrix is 2 rows x 2 columns. Rows are outputs idling high,
//! columns are inputs with pull-ups, and a closed switch shorts its column
//! to the row that is currently driven low. Scanning drives exactly one row
//! low at a time, waits for the line to settle, samples both columns and
//! finally parks every row high again so that another matrix sharing the
//! rail never sees a stray low row.
//!
//! There are no anti-ghosting diodes: three switches held on a rectangle
//! will report the fourth as well. This is a known limitation of the
//! hardware, not something the scanner tries to correct.

use picopad_hal::{DelayUs, InputPin, OutputPin};

/// Rows per matrix
pub const MATRIX_ROWS: usize = 2;

/// Columns per matrix
pub const MATRIX_COLS: usize = 2;

/// Switches per matrix
pub const MATRIX_KEYS: usize = MATRIX_ROWS * MATRIX_COLS;

/// Default row settle time before sampling columns
pub const DEFAULT_SETTLE_US: u32 = 10;

/// One scan result in row-major order (`row * MATRIX_COLS + col`)
pub type MatrixScan = [bool; MATRIX_KEYS];

/// 2x2 active-low switch matrix scanner
pub struct MatrixScanner<R, C> {
    rows: [R; MATRIX_ROWS],
    cols: [C; MATRIX_COLS],
    settle_us: u32,
}

impl<R: OutputPin, C: InputPin> MatrixScanner<R, C> {
    /// Create a scanner and drive every row to its idle (high) level
    pub fn new(rows: [R; MATRIX_ROWS], cols: [C; MATRIX_COLS], settle_us: u32) -> Self {
        let mut scanner = Self {
            rows,
            cols,
            settle_us,
        };
        scanner.release_rows();
        scanner
    }

    /// Create a scanner with the default settle time
    pub fn with_default_settle(rows: [R; MATRIX_ROWS], cols: [C; MATRIX_COLS]) -> Self {
        Self::new(rows, cols, DEFAULT_SETTLE_US)
    }

    /// Scan the matrix once
    ///
    /// Returns `true` for every pressed switch. All rows are high again when
    /// this returns.
    pub fn scan<D: DelayUs>(&mut self, delay: &mut D) -> MatrixScan {
        let mut pressed = [false; MATRIX_KEYS];

        for active in 0..MATRIX_ROWS {
            self.select_row(active);
            delay.delay_us(self.settle_us);

            for (col, pin) in self.cols.iter().enumerate() {
                pressed[active * MATRIX_COLS + col] = pin.is_low();
            }
        }

        self.release_rows();
        pressed
    }

    /// Drive `active` low and every other row high
    fn select_row(&mut self, active: usize) {
        // Deassert the others first so two rows are never low together
        for (index, row) in self.rows.iter_mut().enumerate() {
            if index != active {
                row.set_high();
            }
        }
        self.rows[active].set_low();
    }

    fn release_rows(&mut self) {
        for row in self.rows.iter_mut() {
            row.set_high();
        }
    }
}
