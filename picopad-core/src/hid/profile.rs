//! Report profiles
//!
//! A profile fixes everything the host sees: the report layout, which
//! logical button each physical face button lands on, the hat null value,
//! the report descriptor and the USB identity. Profiles are plain data;
//! the encoder has a single code path for all of them.

use crate::hid::descriptor::{MINIMAL_REPORT_DESCRIPTOR, RICH_REPORT_DESCRIPTOR};
use crate::input::FaceButton;
use crate::matrix::{MatrixScan, MATRIX_KEYS};

#[cfg(feature = "serde")]
use serde::Deserialize;

/// Selects one of the built-in profiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ProfileKind {
    /// DualShock 4 compatible: report id, 14 buttons, 6 bytes
    #[default]
    Rich,
    /// Bare gamepad: 4 buttons, no report id, 4 bytes
    Minimal,
}

/// USB device identity advertised with a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UsbIdentity {
    pub vendor_id: u16,
    pub product_id: u16,
    pub manufacturer: &'static str,
    pub product: &'static str,
    pub serial: &'static str,
}

/// Fixed report layout and mapping tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReportProfile {
    pub kind: ProfileKind,
    /// Report id prefix byte, if the descriptor declares one
    pub report_id: Option<u8>,
    /// Width of the button field in bytes (1 or 2)
    pub button_bytes: usize,
    /// Buttons declared in the descriptor; higher bits are padding
    pub button_count: u8,
    /// Logical bit for each physical face button, indexed in scan order
    pub button_map: [u8; MATRIX_KEYS],
    /// Hat value sent when no direction is held
    pub hat_null: u8,
    /// HID report descriptor describing this layout
    pub descriptor: &'static [u8],
    pub usb: UsbIdentity,
}

impl ReportProfile {
    /// DualShock 4 compatible layout
    ///
    /// Face buttons follow the PlayStation order: Square (X) = bit 0,
    /// Cross (A) = bit 1, Circle (B) = bit 2, Triangle (Y) = bit 3. Bits 4-13
    /// (L1, R1, L2, R2, Share, Options, L3, R3, PS, Touchpad) are declared
    /// but never set.
    pub const RICH: Self = Self {
        kind: ProfileKind::Rich,
        report_id: Some(1),
        button_bytes: 2,
        button_count: 14,
        // Y, B, X, A
        button_map: [3, 2, 0, 1],
        hat_null: 8,
        descriptor: RICH_REPORT_DESCRIPTOR,
        usb: UsbIdentity {
            vendor_id: 0x054C,
            product_id: 0x05C4,
            manufacturer: "Sony Interactive Entertainment",
            product: "Wireless Controller",
            serial: "000001",
        },
    };

    /// Four-button layout in A, B, X, Y order
    pub const MINIMAL: Self = Self {
        kind: ProfileKind::Minimal,
        report_id: None,
        button_bytes: 1,
        button_count: 4,
        // Y, B, X, A
        button_map: [3, 1, 2, 0],
        hat_null: 0x0F,
        descriptor: MINIMAL_REPORT_DESCRIPTOR,
        usb: UsbIdentity {
            vendor_id: 0x1209,
            product_id: 0x0001,
            manufacturer: "Picopad",
            product: "Picopad Gamepad",
            serial: "000001",
        },
    };

    /// Built-in profile for `kind`
    pub const fn for_kind(kind: ProfileKind) -> &'static Self {
        match kind {
            ProfileKind::Rich => &Self::RICH,
            ProfileKind::Minimal => &Self::MINIMAL,
        }
    }

    /// Encoded report length in bytes, including the report id
    pub const fn report_len(&self) -> usize {
        let id = if self.report_id.is_some() { 1 } else { 0 };
        // buttons + hat + x + y
        id + self.button_bytes + 3
    }

    /// Logical bit of a face button
    pub fn button_bit(&self, button: FaceButton) -> u8 {
        self.button_map[button.index()]
    }

    /// Build the button bitfield from a face matrix scan
    pub fn buttons_from(&self, face: &MatrixScan) -> u16 {
        face.iter()
            .zip(self.button_map.iter())
            .filter(|(pressed, _)| **pressed)
            .fold(0u16, |bits, (_, &bit)| bits | (1 << bit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bit_for(profile: &ReportProfile, index: usize) -> u16 {
        let mut face = [false; MATRIX_KEYS];
        face[index] = true;
        profile.buttons_from(&face)
    }

    #[test]
    fn test_rich_permutation() {
        let p = &ReportProfile::RICH;
        assert_eq!(bit_for(p, FaceButton::Y.index()), 1 << 3);
        assert_eq!(bit_for(p, FaceButton::B.index()), 1 << 2);
        assert_eq!(bit_for(p, FaceButton::X.index()), 1 << 0);
        assert_eq!(bit_for(p, FaceButton::A.index()), 1 << 1);
    }

    #[test]
    fn test_minimal_permutation() {
        let p = &ReportProfile::MINIMAL;
        assert_eq!(bit_for(p, FaceButton::Y.index()), 1 << 3);
        assert_eq!(bit_for(p, FaceButton::B.index()), 1 << 1);
        assert_eq!(bit_for(p, FaceButton::X.index()), 1 << 2);
        assert_eq!(bit_for(p, FaceButton::A.index()), 1 << 0);
    }

    #[test]
    fn test_permutations_are_not_identity() {
        for profile in [&ReportProfile::RICH, &ReportProfile::MINIMAL] {
            assert_ne!(profile.button_map, [0, 1, 2, 3]);
        }
    }

    #[test]
    fn test_permutations_are_bijective() {
        for profile in [&ReportProfile::RICH, &ReportProfile::MINIMAL] {
            let all = profile.buttons_from(&[true; MATRIX_KEYS]);
            assert_eq!(all, 0b1111);
            for &bit in profile.button_map.iter() {
                assert!(bit < profile.button_count);
            }
        }
    }

    #[test]
    fn test_report_lengths() {
        assert_eq!(ReportProfile::RICH.report_len(), 6);
        assert_eq!(ReportProfile::MINIMAL.report_len(), 4);
    }

    #[test]
    fn test_hat_null_outside_direction_range() {
        assert_eq!(ReportProfile::RICH.hat_null, 8);
        assert_eq!(ReportProfile::MINIMAL.hat_null, 0x0F);
    }

    #[test]
    fn test_for_kind() {
        assert_eq!(ReportProfile::for_kind(ProfileKind::Rich).kind, ProfileKind::Rich);
        assert_eq!(
            ReportProfile::for_kind(ProfileKind::Minimal).kind,
            ProfileKind::Minimal
        );
    }
}
