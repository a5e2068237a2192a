//! Gamepad poll loop
//!
//! One `poll` is one pass of the main loop: scan both matrices, track the
//! edges, hand the report to the transport if it changed and refresh the
//! panel rows that changed. Display failures never stop the loop; they are
//! returned in the [`PollReport`] for the caller to log.

use picopad_hal::{DelayUs, InputPin, OutputPin};

use crate::hid::{HidReport, ReportEncoder, ReportProfile, SubmitOutcome};
use crate::input::{InputChanges, InputState};
use crate::matrix::MatrixScanner;
use crate::panel::{PanelError, StatusPanel};
use crate::traits::{CharacterDisplay, HidTransport};

/// What happened during one poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PollReport {
    /// Edges seen on each matrix
    pub changes: InputChanges,
    /// Report built from the new state
    pub report: HidReport,
    /// Whether the report went out
    pub outcome: SubmitOutcome,
    /// Panel refresh result (`Ok(true)` if a row was redrawn)
    pub panel: Result<bool, PanelError>,
}

/// Owns all gamepad state
pub struct Gamepad<FR, FC, DR, DC> {
    face: MatrixScanner<FR, FC>,
    dpad: MatrixScanner<DR, DC>,
    input: InputState,
    encoder: ReportEncoder,
    panel: StatusPanel,
}

impl<FR, FC, DR, DC> Gamepad<FR, FC, DR, DC>
where
    FR: OutputPin,
    FC: InputPin,
    DR: OutputPin,
    DC: InputPin,
{
    pub fn new(
        face: MatrixScanner<FR, FC>,
        dpad: MatrixScanner<DR, DC>,
        profile: &'static ReportProfile,
    ) -> Self {
        Self {
            face,
            dpad,
            input: InputState::new(),
            encoder: ReportEncoder::new(profile),
            panel: StatusPanel::new(),
        }
    }

    /// Draw the static panel layout
    pub fn start<D: CharacterDisplay>(&self, display: &mut D) -> Result<(), PanelError> {
        self.panel.draw_static(display)
    }

    /// Run one loop iteration
    pub fn poll<Dl, T, D>(&mut self, delay: &mut Dl, transport: &mut T, display: &mut D) -> PollReport
    where
        Dl: DelayUs,
        T: HidTransport,
        D: CharacterDisplay,
    {
        let face = self.face.scan(delay);
        let dpad = self.dpad.scan(delay);
        let changes = self.input.update(face, dpad);

        let (report, outcome) = self.encoder.update(&self.input, transport);
        let panel = self.panel.render(display, &self.input, &changes);

        PollReport {
            changes,
            report,
            outcome,
            panel,
        }
    }

    /// Tracked input state
    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Active report profile
    pub fn profile(&self) -> &'static ReportProfile {
        self.encoder.profile()
    }

    /// Last report that reached the host
    pub fn last_sent(&self) -> &HidReport {
        self.encoder.last_sent()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hid::encoder::tests::RecordingTransport;
    use crate::hid::HAT_N;
    use crate::input::{DpadButton, FaceButton};
    use crate::matrix::tests::{CountingDelay, SimMatrix};
    use crate::panel::tests::GridDisplay;
    use crate::traits::DisplayError;

    #[test]
    fn test_idle_poll_does_nothing() {
        let face = SimMatrix::new();
        let dpad = SimMatrix::new();
        let mut pad = Gamepad::new(
            MatrixScanner::with_default_settle(face.rows(), face.cols()),
            MatrixScanner::with_default_settle(dpad.rows(), dpad.cols()),
            &ReportProfile::RICH,
        );
        let mut delay = CountingDelay::default();
        let mut transport = RecordingTransport::new();
        let mut display = GridDisplay::new();
        pad.start(&mut display).unwrap();
        let writes = display.writes;

        for _ in 0..3 {
            let poll = pad.poll(&mut delay, &mut transport, &mut display);
            assert!(!poll.changes.any());
            assert_eq!(poll.outcome, SubmitOutcome::Unchanged);
            assert_eq!(poll.panel, Ok(false));
        }
        assert!(transport.sent.is_empty());
        assert_eq!(display.writes, writes);
        // two rows per matrix, two matrices, three polls
        assert_eq!(delay.calls, 12);
    }

    #[test]
    fn test_press_and_release_cycle() {
        let face = SimMatrix::new();
        let dpad = SimMatrix::new();
        let mut pad = Gamepad::new(
            MatrixScanner::with_default_settle(face.rows(), face.cols()),
            MatrixScanner::with_default_settle(dpad.rows(), dpad.cols()),
            &ReportProfile::RICH,
        );
        let mut delay = CountingDelay::default();
        let mut transport = RecordingTransport::new();
        let mut display = GridDisplay::new();
        pad.start(&mut display).unwrap();

        face.press(FaceButton::X.index(), true);
        dpad.press(DpadButton::Up.index(), true);
        let poll = pad.poll(&mut delay, &mut transport, &mut display);

        assert!(poll.changes.face.contains(FaceButton::X.index()));
        assert!(poll.changes.dpad.contains(DpadButton::Up.index()));
        assert_eq!(poll.outcome, SubmitOutcome::Sent);
        assert_eq!(poll.report.hat, HAT_N);
        assert_eq!(display.line(2), "ABXY:X");
        assert_eq!(display.line(3), "DPAD:UP");

        face.press(FaceButton::X.index(), false);
        dpad.press(DpadButton::Up.index(), false);
        let poll = pad.poll(&mut delay, &mut transport, &mut display);

        assert_eq!(poll.outcome, SubmitOutcome::Sent);
        assert_eq!(pad.last_sent(), &HidReport::neutral(pad.profile()));
        assert_eq!(transport.sent.len(), 2);
        assert_eq!(display.line(2), "ABXY:-");
    }

    #[test]
    fn test_display_failure_does_not_block_report() {
        let face = SimMatrix::new();
        let dpad = SimMatrix::new();
        let mut pad = Gamepad::new(
            MatrixScanner::with_default_settle(face.rows(), face.cols()),
            MatrixScanner::with_default_settle(dpad.rows(), dpad.cols()),
            &ReportProfile::MINIMAL,
        );
        let mut delay = CountingDelay::default();
        let mut transport = RecordingTransport::new();
        let mut display = GridDisplay::new();
        display.fail = true;

        face.press(FaceButton::A.index(), true);
        let poll = pad.poll(&mut delay, &mut transport, &mut display);

        assert_eq!(poll.outcome, SubmitOutcome::Sent);
        assert_eq!(poll.panel, Err(PanelError::Display(DisplayError::Communication)));
        assert!(pad.input().face_pressed(FaceButton::A));
    }
}
