//! Picopad Hardware Abstraction Layer
//!
//! This crate defines the hardware abstraction traits that the matrix
//! scanner and the LCD driver are written against. Chip-specific crates
//! implement them for real peripherals; tests implement them with mocks
//! that record every pin change, bus write and requested delay.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  picopad-core / picopad-drivers         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  picopad-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ picopad-hal-  │       │  test mocks   │
//! │    rp2040     │       │               │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`i2c::I2cBus`] - I2C bus writes
//! - [`delay::DelayUs`] - Blocking protocol delays

#![no_std]
#![deny(unsafe_code)]

pub mod delay;
pub mod gpio;
pub mod i2c;

// Re-export key traits at crate root for convenience
pub use delay::{DelayUs, NoDelay};
pub use gpio::{InputPin, OutputPin};
pub use i2c::{I2cBus, I2cConfig};
