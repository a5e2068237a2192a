//! Gamepad poll loop task
//!
//! Scans, reports and redraws once per poll interval. The matrix and LCD
//! waits inside a poll are blocking; the sleep between polls is where the
//! USB tasks get to run.

use defmt::*;
use embassy_rp::i2c::{Blocking, I2c};
use embassy_time::Timer;

use picopad_core::hid::SubmitOutcome;
use picopad_core::input::Changes;
use picopad_core::{DpadButton, FaceButton, Gamepad};
use picopad_drivers::Hd44780;
use picopad_hal_rp2040::{BlockingDelay, I2cMaster, MatrixCol, MatrixRow};

use crate::board::{self, LcdI2c};
use crate::transport::ChannelTransport;

pub type Pad = Gamepad<MatrixRow<'static>, MatrixCol<'static>, MatrixRow<'static>, MatrixCol<'static>>;
pub type Lcd = Hd44780<I2cMaster<I2c<'static, LcdI2c, Blocking>>, BlockingDelay>;

#[embassy_executor::task]
pub async fn gamepad_task(mut pad: Pad, mut lcd: Lcd) {
    info!("Gamepad task started");

    let mut delay = BlockingDelay;
    let mut transport = ChannelTransport;

    loop {
        let poll = pad.poll(&mut delay, &mut transport, &mut lcd);

        log_transitions(&poll.changes.face, |index| FaceButton::ALL[index].label());
        log_transitions(&poll.changes.dpad, |index| DpadButton::ALL[index].label());

        match poll.outcome {
            SubmitOutcome::Unchanged => {}
            SubmitOutcome::Sent => debug!("Report sent: {}", poll.report),
            SubmitOutcome::NotReady => trace!("Transport busy, report deferred"),
            SubmitOutcome::Failed => warn!("Report rejected by transport"),
        }

        if let Err(e) = poll.panel {
            warn!("Display update failed: {}", e);
        }

        Timer::after_millis(board::POLL_INTERVAL_MS).await;
    }
}

fn log_transitions(changes: &Changes, label: impl Fn(usize) -> &'static str) {
    for transition in changes.transitions() {
        if transition.pressed {
            info!("{} pressed", label(transition.index));
        } else {
            info!("{} released", label(transition.index));
        }
    }
}
