//! USB device and HID interface
//!
//! The device identity and report descriptor come from the active
//! `ReportProfile`. One interrupt IN endpoint carries the gamepad reports;
//! nothing is read back from the host.

use defmt::*;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::USB;
use embassy_rp::usb::{Driver, InterruptHandler};
use embassy_usb::class::hid::{
    Config as HidConfig, HidBootProtocol, HidSubclass, HidWriter, State,
};
use embassy_usb::{Builder, Config, Handler, UsbDevice};
use portable_atomic::Ordering;
use static_cell::StaticCell;

use picopad_core::hid::{ReportProfile, MAX_REPORT_LEN};

use crate::channels::{REPORT_CHANNEL, USB_CONFIGURED};

bind_interrupts!(pub struct Irqs {
    USBCTRL_IRQ => InterruptHandler<USB>;
});

/// HID interrupt endpoint polling interval
const HID_POLL_MS: u8 = 5;

/// Current drawn from the bus
const MAX_POWER_MA: u16 = 100;

pub type UsbDriver = Driver<'static, USB>;
pub type GamepadWriter = HidWriter<'static, UsbDriver, MAX_REPORT_LEN>;

static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static MSOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static HID_STATE: StaticCell<State<'static>> = StaticCell::new();
static DEVICE_HANDLER: StaticCell<DeviceHandler> = StaticCell::new();

/// Tracks whether the host has configured us
struct DeviceHandler;

impl Handler for DeviceHandler {
    fn reset(&mut self) {
        USB_CONFIGURED.store(false, Ordering::Release);
    }

    fn configured(&mut self, configured: bool) {
        USB_CONFIGURED.store(configured, Ordering::Release);
        if configured {
            info!("USB configured");
        } else {
            info!("USB deconfigured");
        }
    }
}

/// Build the USB device and the gamepad report writer
pub fn build(
    driver: UsbDriver,
    profile: &'static ReportProfile,
) -> (UsbDevice<'static, UsbDriver>, GamepadWriter) {
    let identity = &profile.usb;

    let mut config = Config::new(identity.vendor_id, identity.product_id);
    config.manufacturer = Some(identity.manufacturer);
    config.product = Some(identity.product);
    config.serial_number = Some(identity.serial);
    config.max_power = MAX_POWER_MA;
    config.max_packet_size_0 = 64;

    let mut builder = Builder::new(
        driver,
        config,
        CONFIG_DESCRIPTOR.init([0; 256]),
        BOS_DESCRIPTOR.init([0; 256]),
        MSOS_DESCRIPTOR.init([0; 256]),
        CONTROL_BUF.init([0; 64]),
    );
    builder.handler(DEVICE_HANDLER.init(DeviceHandler));

    let hid_config = HidConfig {
        report_descriptor: profile.descriptor,
        request_handler: None,
        poll_ms: HID_POLL_MS,
        max_packet_size: MAX_REPORT_LEN as u16,
        hid_subclass: HidSubclass::No,
        hid_boot_protocol: HidBootProtocol::None,
    };
    let writer = HidWriter::new(&mut builder, HID_STATE.init(State::new()), hid_config);

    (builder.build(), writer)
}

/// Run the USB stack
#[embassy_executor::task]
pub async fn usb_task(mut device: UsbDevice<'static, UsbDriver>) -> ! {
    device.run().await
}

/// Move queued reports onto the interrupt endpoint
#[embassy_executor::task]
pub async fn hid_writer_task(mut writer: GamepadWriter) {
    info!("HID writer task started");

    loop {
        writer.ready().await;
        let report = REPORT_CHANNEL.receive().await;
        if let Err(e) = writer.write(&report).await {
            warn!("HID write failed: {}", e);
        }
    }
}
