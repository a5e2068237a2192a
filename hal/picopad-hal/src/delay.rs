//! Blocking delay provider
//!
//! The LCD protocol and the matrix scanner need short fixed waits (enable
//! pulse widths, command settle times, row settle). They are true blocking
//! waits, not yields, and are injected so that timing can be asserted in
//! tests without sleeping.

/// Blocking delay in microseconds and milliseconds
pub trait DelayUs {
    /// Block for at least `us` microseconds
    fn delay_us(&mut self, us: u32);

    /// Block for at least `ms` milliseconds
    fn delay_ms(&mut self, ms: u32) {
        self.delay_us(ms.saturating_mul(1000));
    }
}

impl<T: DelayUs + ?Sized> DelayUs for &mut T {
    fn delay_us(&mut self, us: u32) {
        (**self).delay_us(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        (**self).delay_ms(ms);
    }
}

/// Delay provider that returns immediately
///
/// Useful on the host and for code paths whose timing is irrelevant.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDelay;

impl DelayUs for NoDelay {
    fn delay_us(&mut self, _us: u32) {}
}
