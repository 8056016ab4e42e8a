//! Board-agnostic power-output control
//!
//! This crate turns a raw GPIO pin into a named power switch with a stable
//! ON/OFF meaning, whatever the polarity of the circuit behind it:
//!
//! - [`PowerController`] - lifecycle (init/deinit) and control
//!   (on/off/toggle/drive strength) over any [`GpioHal`]
//! - [`PowerSwitch`] - the capability trait application code is written against
//! - [`config`] - output configuration and pin-string parsing
//!
//! Every operation runs to completion on the caller's thread. The controller
//! does no locking; share an instance across tasks only behind external
//! synchronization.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[cfg(feature = "toml")]
extern crate alloc;

pub mod config;
pub mod controller;
pub mod error;
pub mod traits;

pub use config::{parse_pin_string, PowerConfig};
pub use controller::PowerController;
pub use error::PowerError;
pub use traits::PowerSwitch;

pub use powerctl_hal::{DriveCapability, GpioHal, PinNumber};
