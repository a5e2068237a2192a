//! Build script for picopad-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates board.toml and compiles it into `board.rs` in OUT_DIR

use std::env;
use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use picopad_core::config::{BoardConfig, I2cBlock, MatrixPins};
use picopad_core::hid::ProfileKind;

fn main() {
    setup_linker();
    let config = load_config();
    generate_board(&config);
}

/// Set up linker search paths and scripts
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Read, parse and validate board.toml
fn load_config() -> BoardConfig {
    println!("cargo:rerun-if-changed=board.toml");

    let config_path = Path::new("board.toml");
    if !config_path.exists() {
        fail("board.toml not found", "Create one next to Cargo.toml");
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read board.toml", &e.to_string()),
    };

    let config: BoardConfig = match toml::from_str(&content) {
        Ok(config) => config,
        Err(e) => fail("Invalid board.toml", &e.to_string()),
    };

    if let Err(e) = config.validate() {
        fail("Invalid board configuration", &e.to_string());
    }

    println!("cargo:warning=board.toml validated successfully");
    config
}

fn fail(title: &str, detail: &str) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<57}║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        format_error_lines(detail)
    );
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Emit constants and the `board_pins!` macro
fn generate_board(config: &BoardConfig) {
    let display = &config.display;
    let i2c = match display.i2c_block() {
        Some(I2cBlock::I2c0) => "I2C0",
        Some(I2cBlock::I2c1) => "I2C1",
        None => unreachable!("validated above"),
    };
    let profile = match config.hid.profile {
        ProfileKind::Rich => "Rich",
        ProfileKind::Minimal => "Minimal",
    };

    let mut out = String::new();
    writeln!(out, "// Generated from board.toml by build.rs").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "pub const FACE_PINS: MatrixPins = {};", matrix_literal(&config.face)).unwrap();
    writeln!(out, "pub const DPAD_PINS: MatrixPins = {};", matrix_literal(&config.dpad)).unwrap();
    writeln!(out, "pub const LCD_ADDRESS: u8 = {:#04x};", display.address).unwrap();
    writeln!(out, "pub const LCD_COLUMNS: u8 = {};", display.columns).unwrap();
    writeln!(out, "pub const LCD_ROWS: u8 = {};", display.rows).unwrap();
    writeln!(out, "pub const I2C_FREQUENCY: u32 = {};", display.frequency).unwrap();
    writeln!(out, "pub const PROFILE: ProfileKind = ProfileKind::{};", profile).unwrap();
    writeln!(out, "pub const POLL_INTERVAL_MS: u64 = {};", config.timing.poll_interval_ms).unwrap();
    writeln!(out, "pub const SETTLE_US: u32 = {};", config.timing.settle_us).unwrap();
    writeln!(out).unwrap();
    writeln!(out, "/// I2C controller wired to the LCD backpack").unwrap();
    writeln!(out, "pub type LcdI2c = embassy_rp::peripherals::{};", i2c).unwrap();
    writeln!(out).unwrap();
    writeln!(out, "/// Take the board's pins out of `Peripherals`").unwrap();
    writeln!(out, "macro_rules! board_pins {{").unwrap();
    writeln!(out, "    ($p:ident, $i2c_config:expr) => {{").unwrap();
    writeln!(out, "        $crate::board::BoardPins {{").unwrap();
    writeln!(out, "            face_rows: [{}],", pin_list("MatrixRow", &config.face.rows)).unwrap();
    writeln!(out, "            face_cols: [{}],", pin_list("MatrixCol", &config.face.cols)).unwrap();
    writeln!(out, "            dpad_rows: [{}],", pin_list("MatrixRow", &config.dpad.rows)).unwrap();
    writeln!(out, "            dpad_cols: [{}],", pin_list("MatrixCol", &config.dpad.cols)).unwrap();
    writeln!(
        out,
        "            i2c: embassy_rp::i2c::I2c::new_blocking($p.{}, $p.PIN_{}, $p.PIN_{}, $i2c_config),",
        i2c, display.scl, display.sda
    )
    .unwrap();
    writeln!(out, "            usb: $p.USB,").unwrap();
    writeln!(out, "        }}").unwrap();
    writeln!(out, "    }};").unwrap();
    writeln!(out, "}}").unwrap();

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    fs::write(out_dir.join("board.rs"), out).unwrap();
}

fn matrix_literal(pins: &MatrixPins) -> String {
    format!(
        "MatrixPins::new([{}, {}], [{}, {}])",
        pins.rows[0], pins.rows[1], pins.cols[0], pins.cols[1]
    )
}

fn pin_list(kind: &str, pins: &[u8]) -> String {
    pins.iter()
        .map(|pin| format!("picopad_hal_rp2040::{}::new($p.PIN_{})", kind, pin))
        .collect::<Vec<_>>()
        .join(", ")
}
