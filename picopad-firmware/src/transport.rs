//! HID transport backed by the report channel

use portable_atomic::Ordering;

use picopad_core::traits::HidTransport;

use crate::channels::{ReportBytes, REPORT_CHANNEL, USB_CONFIGURED};

#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum TransportError {
    /// Report longer than the channel slot
    Oversized,
    /// Previous report still pending
    Full,
}

/// Queues reports for the USB writer task
pub struct ChannelTransport;

impl HidTransport for ChannelTransport {
    type Error = TransportError;

    fn is_ready(&self) -> bool {
        USB_CONFIGURED.load(Ordering::Acquire) && !REPORT_CHANNEL.is_full()
    }

    fn send_report(&mut self, report: &[u8]) -> Result<(), Self::Error> {
        let bytes = ReportBytes::from_slice(report).map_err(|_| TransportError::Oversized)?;
        REPORT_CHANNEL
            .try_send(bytes)
            .map_err(|_| TransportError::Full)
    }
}
