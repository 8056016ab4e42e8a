//! GPIO HAL implementations
//!
//! This crate provides concrete implementations of
//! [`powerctl_hal::GpioHal`] that run without chip-specific support:
//!
//! - [`SimGpio`] - simulated register bank with fault injection, for
//!   host-side testing and demos
//! - [`EmbeddedHalGpio`] - adapter over a single `embedded-hal` output pin

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod gpio;

pub use gpio::{EmbeddedHalGpio, GpioCall, GpioOp, PinRegisters, SimGpio};
