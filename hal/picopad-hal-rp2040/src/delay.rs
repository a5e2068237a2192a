//! Blocking delays
//!
//! Spins on the embassy time driver. Used for the LCD strobe and command
//! waits and the matrix row settle time; these are far shorter than a
//! task switch and must not yield.

use embassy_time::{block_for, Duration};
use picopad_hal::DelayUs;

#[derive(Debug, Default, Clone, Copy)]
pub struct BlockingDelay;

impl DelayUs for BlockingDelay {
    fn delay_us(&mut self, us: u32) {
        block_for(Duration::from_micros(us as u64));
    }

    fn delay_ms(&mut self, ms: u32) {
        block_for(Duration::from_millis(ms as u64));
    }
}
