//! HID transport trait

/// Sink for encoded gamepad reports
///
/// Implemented by the USB stack glue in the firmware. A transport that is
/// not ready simply misses the report; the encoder tries again on the next
/// poll.
pub trait HidTransport {
    /// Error returned by a failed transmission
    type Error;

    /// Whether a report can be accepted right now
    fn is_ready(&self) -> bool;

    /// Queue one encoded report for the host
    fn send_report(&mut self, report: &[u8]) -> Result<(), Self::Error>;
}

impl<T: HidTransport + ?Sized> HidTransport for &mut T {
    type Error = T::Error;

    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }

    fn send_report(&mut self, report: &[u8]) -> Result<(), Self::Error> {
        (**self).send_report(report)
    }
}
