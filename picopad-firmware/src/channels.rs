//! Inter-task communication
//!
//! The gamepad task hands encoded reports to the USB writer task through a
//! single-slot channel. A full slot means the previous report has not been
//! written yet, which the transport reports as "not ready".

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use heapless::Vec;
use portable_atomic::AtomicBool;

use picopad_core::hid::MAX_REPORT_LEN;

/// One encoded report
pub type ReportBytes = Vec<u8, MAX_REPORT_LEN>;

/// Reports waiting for the HID IN endpoint
pub static REPORT_CHANNEL: Channel<CriticalSectionRawMutex, ReportBytes, 1> = Channel::new();

/// Set while the host has the device configured
pub static USB_CONFIGURED: AtomicBool = AtomicBool::new(false);
