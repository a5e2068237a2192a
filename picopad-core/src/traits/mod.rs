//! Collaborator traits
//!
//! These traits define the interface between the poll loop logic and the
//! pieces that talk to the outside world.

pub mod display;
pub mod hid;

pub use display::{CharacterDisplay, DisplayError};
pub use hid::HidTransport;
