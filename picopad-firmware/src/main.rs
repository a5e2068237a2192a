//! Picopad - USB HID Gamepad Firmware
//!
//! Firmware for a Raspberry Pi Pico with two 2x2 switch matrices (ABXY
//! face buttons and a D-pad) and a 20x4 character LCD on a PCF8574 I2C
//! backpack. Button state is sent to the host as a HID gamepad and
//! mirrored on the display.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::usb::Driver;
use {defmt_rtt as _, panic_probe as _};

use picopad_core::hid::ReportProfile;
use picopad_core::{Gamepad, MatrixScanner};
use picopad_drivers::Hd44780;
use picopad_hal::I2cConfig;
use picopad_hal_rp2040::i2c::rp_config;
use picopad_hal_rp2040::{BlockingDelay, I2cMaster};

#[macro_use]
mod board;
mod channels;
mod tasks;
mod transport;
mod usb;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Picopad firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let profile = ReportProfile::for_kind(board::PROFILE);
    info!(
        "Profile {}: VID {=u16:#06x} PID {=u16:#06x}, {} byte reports",
        profile.kind,
        profile.usb.vendor_id,
        profile.usb.product_id,
        profile.report_len()
    );
    info!("Face matrix {}, D-pad matrix {}", board::FACE_PINS, board::DPAD_PINS);

    let i2c_config = rp_config(I2cConfig {
        frequency: board::I2C_FREQUENCY,
    });
    let pins = board_pins!(p, i2c_config);

    let face = MatrixScanner::new(pins.face_rows, pins.face_cols, board::SETTLE_US);
    let dpad = MatrixScanner::new(pins.dpad_rows, pins.dpad_cols, board::SETTLE_US);
    let pad = Gamepad::new(face, dpad, profile);

    let mut lcd = Hd44780::new(
        I2cMaster::new(pins.i2c),
        BlockingDelay,
        board::LCD_ADDRESS,
        board::LCD_COLUMNS,
        board::LCD_ROWS,
    );
    match lcd.init() {
        Ok(()) => info!("LCD ready at {=u8:#04x}", board::LCD_ADDRESS),
        Err(e) => warn!("LCD init failed: {}", e),
    }
    if let Err(e) = pad.start(&mut lcd) {
        warn!("Status panel draw failed: {}", e);
    }

    let driver = Driver::new(pins.usb, usb::Irqs);
    let (device, writer) = usb::build(driver, profile);

    spawner.spawn(usb::usb_task(device)).unwrap();
    spawner.spawn(usb::hid_writer_task(writer)).unwrap();
    spawner.spawn(tasks::gamepad_task(pad, lcd)).unwrap();

    info!("Picopad running");
}
