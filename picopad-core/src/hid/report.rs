//! Gamepad report value and wire encoding
//!
//! Rich layout (6 bytes):
//! ```text
//! ┌────┬────────────┬────────────┬──────────┬───┬───┐
//! │ ID │ BUTTONS LO │ BUTTONS HI │ HAT │PAD │ X │ Y │
//! │ 1B │ 1B         │ 1B (14b)   │ 4b  │4b  │1B │1B │
//! └────┴────────────┴────────────┴──────────┴───┴───┘
//! ```
//!
//! Minimal layout (4 bytes, no report id):
//! ```text
//! ┌──────────┬──────────┬───┬───┐
//! │ BUTTONS  │ HAT │PAD │ X │ Y │
//! │ 1B (4b)  │ 4b  │4b  │1B │1B │
//! └──────────┴──────────┴───┴───┘
//! ```

use heapless::Vec;

use super::profile::ReportProfile;

/// Axis value reported while no analog input exists
pub const AXIS_CENTER: u8 = 128;

/// Longest encoded report across all profiles
pub const MAX_REPORT_LEN: usize = 6;

/// Errors that can occur while encoding a report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReportError {
    /// Output buffer shorter than the profile's report length
    BufferTooSmall,
}

/// One gamepad report
///
/// Equality is field-exact and is what the encoder uses to decide whether
/// a new report must be sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HidReport {
    pub report_id: Option<u8>,
    /// Logical button bits
    pub buttons: u16,
    /// Hat direction 0-7 or the profile's null value
    pub hat: u8,
    pub x: u8,
    pub y: u8,
}

impl HidReport {
    /// Nothing pressed, hat null, axes centered
    pub const fn neutral(profile: &ReportProfile) -> Self {
        Self {
            report_id: profile.report_id,
            buttons: 0,
            hat: profile.hat_null,
            x: AXIS_CENTER,
            y: AXIS_CENTER,
        }
    }

    /// Encode into `buf` using the layout of `profile`
    ///
    /// Returns the number of bytes written. The report id prefix comes from
    /// the profile, not from `self.report_id`. Button bits beyond the
    /// profile's declared count and hat bits beyond the low nibble are
    /// dropped, so padding is always zero.
    pub fn encode(&self, profile: &ReportProfile, buf: &mut [u8]) -> Result<usize, ReportError> {
        let len = profile.report_len();
        if buf.len() < len {
            return Err(ReportError::BufferTooSmall);
        }

        let mut pos = 0;
        if let Some(id) = profile.report_id {
            buf[pos] = id;
            pos += 1;
        }

        let mask = if profile.button_count >= 16 {
            u16::MAX
        } else {
            (1u16 << profile.button_count) - 1
        };
        let buttons = (self.buttons & mask).to_le_bytes();
        buf[pos..pos + profile.button_bytes].copy_from_slice(&buttons[..profile.button_bytes]);
        pos += profile.button_bytes;

        buf[pos] = self.hat & 0x0F;
        buf[pos + 1] = self.x;
        buf[pos + 2] = self.y;
        pos += 3;

        Ok(pos)
    }

    /// Encode into a fixed-capacity vector
    pub fn to_bytes(&self, profile: &ReportProfile) -> Vec<u8, MAX_REPORT_LEN> {
        let mut buf = [0u8; MAX_REPORT_LEN];
        let mut out = Vec::new();
        if let Ok(len) = self.encode(profile, &mut buf) {
            // Cannot overflow: every profile fits MAX_REPORT_LEN
            let _ = out.extend_from_slice(&buf[..len]);
        }
        out
    }
}
