//! HID gamepad reports
//!
//! - [`hat`]: D-pad to hat switch resolution
//! - [`profile`]: Report layouts and button permutation tables
//! - [`report`]: The report value and its wire encoding
//! - [`encoder`]: Report building with change suppression
//! - [`descriptor`]: HID report descriptors matching each profile

pub mod descriptor;
pub mod encoder;
pub mod hat;
pub mod profile;
pub mod report;

pub use encoder::{ReportEncoder, SubmitOutcome};
pub use hat::{hat_from_dpad, Dpad, HAT_E, HAT_N, HAT_NE, HAT_NW, HAT_S, HAT_SE, HAT_SW, HAT_W};
pub use profile::{ProfileKind, ReportProfile};
pub use report::{HidReport, ReportError, AXIS_CENTER, MAX_REPORT_LEN};
