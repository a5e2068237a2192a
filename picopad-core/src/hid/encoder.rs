//! Report building with change suppression
//!
//! The encoder keeps the last report that actually reached the transport.
//! A new report is transmitted only if it differs from that baseline and
//! the transport is ready. When the transport is busy the report is
//! dropped and the baseline left alone, so the same difference is seen
//! again on the next poll and no state change is lost.

use super::hat::{hat_from_dpad, Dpad};
use super::profile::ReportProfile;
use super::report::{HidReport, AXIS_CENTER, MAX_REPORT_LEN};
use crate::input::{DpadButton, InputState};
use crate::traits::HidTransport;

/// Result of one submission attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SubmitOutcome {
    /// Same as the last transmitted report; nothing sent
    Unchanged,
    /// Report differs but the transport was busy; retried next poll
    NotReady,
    /// Report transmitted and recorded as the new baseline
    Sent,
    /// Transport rejected the report; retried next poll
    Failed,
}

/// Builds reports for one profile and suppresses duplicates
#[derive(Debug, Clone)]
pub struct ReportEncoder {
    profile: &'static ReportProfile,
    last_sent: HidReport,
}

impl ReportEncoder {
    /// Create an encoder whose baseline is the neutral report
    ///
    /// An idle pad therefore sends nothing until the first press.
    pub fn new(profile: &'static ReportProfile) -> Self {
        Self {
            profile,
            last_sent: HidReport::neutral(profile),
        }
    }

    /// Active profile
    pub fn profile(&self) -> &'static ReportProfile {
        self.profile
    }

    /// Last report that reached the transport
    pub fn last_sent(&self) -> &HidReport {
        &self.last_sent
    }

    /// Build the report for the current input state
    pub fn build(&self, input: &InputState) -> HidReport {
        let dpad = Dpad::new(
            input.dpad_pressed(DpadButton::Up),
            input.dpad_pressed(DpadButton::Right),
            input.dpad_pressed(DpadButton::Down),
            input.dpad_pressed(DpadButton::Left),
        );

        HidReport {
            report_id: self.profile.report_id,
            buttons: self.profile.buttons_from(input.face.current()),
            hat: hat_from_dpad(dpad, self.profile.hat_null),
            x: AXIS_CENTER,
            y: AXIS_CENTER,
        }
    }

    /// Send `report` if it differs from the last transmitted one
    pub fn submit<T: HidTransport>(&mut self, report: HidReport, transport: &mut T) -> SubmitOutcome {
        if report == self.last_sent {
            return SubmitOutcome::Unchanged;
        }
        if !transport.is_ready() {
            return SubmitOutcome::NotReady;
        }

        let mut buf = [0u8; MAX_REPORT_LEN];
        let len = match report.encode(self.profile, &mut buf) {
            Ok(len) => len,
            Err(_) => return SubmitOutcome::Failed,
        };

        match transport.send_report(&buf[..len]) {
            Ok(()) => {
                self.last_sent = report;
                SubmitOutcome::Sent
            }
            Err(_) => SubmitOutcome::Failed,
        }
    }

    /// Build from `input` and submit
    pub fn update<T: HidTransport>(
        &mut self,
        input: &InputState,
        transport: &mut T,
    ) -> (HidReport, SubmitOutcome) {
        let report = self.build(input);
        let outcome = self.submit(report, transport);
        (report, outcome)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::hid::hat::{HAT_E, HAT_N, HAT_NE};
    use crate::input::FaceButton;
    use heapless::Vec;
    use proptest::prelude::*;

    /// Transport that records every report it accepts
    pub(crate) struct RecordingTransport {
        pub(crate) ready: bool,
        pub(crate) fail: bool,
        pub(crate) sent: Vec<Vec<u8, MAX_REPORT_LEN>, 32>,
    }

    impl RecordingTransport {
        pub(crate) fn new() -> Self {
            Self {
                ready: true,
                fail: false,
                sent: Vec::new(),
            }
        }
    }

    impl HidTransport for RecordingTransport {
        type Error = ();

        fn is_ready(&self) -> bool {
            self.ready
        }

        fn send_report(&mut self, report: &[u8]) -> Result<(), ()> {
            if self.fail {
                return Err(());
            }
            let mut copy = Vec::new();
            copy.extend_from_slice(report).map_err(|_| ())?;
            self.sent.push(copy).map_err(|_| ())
        }
    }

    fn rich_encoder() -> ReportEncoder {
        ReportEncoder::new(&ReportProfile::RICH)
    }

    #[test]
    fn test_idle_sends_nothing() {
        let mut encoder = rich_encoder();
        let mut transport = RecordingTransport::new();
        let input = InputState::new();

        for _ in 0..10 {
            let (_, outcome) = encoder.update(&input, &mut transport);
            assert_eq!(outcome, SubmitOutcome::Unchanged);
        }
        assert!(transport.sent.is_empty());
    }

    #[test]
    fn test_single_press_sends_once() {
        let mut encoder = rich_encoder();
        let mut transport = RecordingTransport::new();
        let mut input = InputState::new();
        input.update([false, false, false, true], [false; 4]); // A

        assert_eq!(encoder.update(&input, &mut transport).1, SubmitOutcome::Sent);
        for _ in 0..5 {
            assert_eq!(
                encoder.update(&input, &mut transport).1,
                SubmitOutcome::Unchanged
            );
        }

        assert_eq!(transport.sent.len(), 1);
        // A is Cross, bit 1
        assert_eq!(transport.sent[0].as_slice(), &[0x01, 0x02, 0x00, 0x08, 128, 128]);
    }

    #[test]
    fn test_not_ready_keeps_baseline() {
        let mut encoder = rich_encoder();
        let mut transport = RecordingTransport::new();
        let mut input = InputState::new();
        input.update([true, false, false, false], [false; 4]);

        transport.ready = false;
        assert_eq!(encoder.update(&input, &mut transport).1, SubmitOutcome::NotReady);
        assert_eq!(encoder.update(&input, &mut transport).1, SubmitOutcome::NotReady);
        assert_eq!(encoder.last_sent(), &HidReport::neutral(&ReportProfile::RICH));

        transport.ready = true;
        assert_eq!(encoder.update(&input, &mut transport).1, SubmitOutcome::Sent);
        assert_eq!(transport.sent.len(), 1);
        assert_eq!(encoder.last_sent().buttons, 1 << encoder.profile().button_bit(FaceButton::Y));
    }

    #[test]
    fn test_failed_send_retried() {
        let mut encoder = rich_encoder();
        let mut transport = RecordingTransport::new();
        let mut input = InputState::new();
        input.update([false; 4], [true, false, false, false]);

        transport.fail = true;
        assert_eq!(encoder.update(&input, &mut transport).1, SubmitOutcome::Failed);

        transport.fail = false;
        assert_eq!(encoder.update(&input, &mut transport).1, SubmitOutcome::Sent);
        assert_eq!(transport.sent[0][3], HAT_N);
    }

    #[test]
    fn test_each_field_change_sends_exactly_once() {
        let profile = &ReportProfile::RICH;
        let base = HidReport::neutral(profile);
        let variants = [
            HidReport { buttons: 0x0004, ..base },
            HidReport { hat: HAT_E, ..base },
            HidReport { x: 0, ..base },
            HidReport { y: 255, ..base },
        ];

        for changed in variants {
            let mut encoder = ReportEncoder::new(profile);
            let mut transport = RecordingTransport::new();

            assert_eq!(encoder.submit(changed, &mut transport), SubmitOutcome::Sent);
            assert_eq!(encoder.submit(changed, &mut transport), SubmitOutcome::Unchanged);
            assert_eq!(transport.sent.len(), 1);

            let expected = changed.to_bytes(profile);
            assert_eq!(transport.sent[0], expected);
            assert_eq!(encoder.last_sent(), &changed);
        }
    }

    #[test]
    fn test_release_sends_neutral() {
        let mut encoder = rich_encoder();
        let mut transport = RecordingTransport::new();
        let mut input = InputState::new();

        input.update([false; 4], [true, true, false, false]);
        encoder.update(&input, &mut transport);
        input.update([false; 4], [false; 4]);
        encoder.update(&input, &mut transport);

        assert_eq!(transport.sent.len(), 2);
        assert_eq!(transport.sent[0][3], HAT_NE);
        assert_eq!(transport.sent[1].as_slice(), &[0x01, 0x00, 0x00, 0x08, 128, 128]);
    }

    #[test]
    fn test_minimal_profile_layout() {
        let mut encoder = ReportEncoder::new(&ReportProfile::MINIMAL);
        let mut transport = RecordingTransport::new();
        let mut input = InputState::new();
        input.update([false, true, false, false], [false; 4]); // B

        encoder.update(&input, &mut transport);
        assert_eq!(transport.sent[0].as_slice(), &[0x02, 0x0F, 128, 128]);
    }

    fn any_scan() -> impl Strategy<Value = [bool; 4]> {
        prop::array::uniform4(any::<bool>())
    }

    proptest! {
        #[test]
        fn prop_repeated_input_sends_at_most_once(face in any_scan(), dpad in any_scan(), repeats in 1usize..8) {
            let mut encoder = rich_encoder();
            let mut transport = RecordingTransport::new();
            let mut input = InputState::new();
            input.update(face, dpad);

            for _ in 0..repeats {
                encoder.update(&input, &mut transport);
            }
            prop_assert!(transport.sent.len() <= 1);
        }

        #[test]
        fn prop_axes_always_centered(face in any_scan(), dpad in any_scan()) {
            let encoder = rich_encoder();
            let mut input = InputState::new();
            input.update(face, dpad);

            let report = encoder.build(&input);
            prop_assert_eq!(report.x, AXIS_CENTER);
            prop_assert_eq!(report.y, AXIS_CENTER);
            prop_assert_eq!(report.buttons.count_ones() as usize, face.iter().filter(|&&p| p).count());
        }
    }
}
