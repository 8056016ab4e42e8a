//! RP2040-specific HAL for powerctl
//!
//! This crate provides the RP2040 implementation of
//! [`powerctl_hal::GpioHal`], plus RP2040-specific helpers:
//!
//! - [`Rp2040Gpio`] - register-level GPIO over embassy-rp flexible pins
//! - [`GpioAllocator`] - tracks which GPIOs are claimed
//! - [`take_pin!`] - take a pin from the peripherals by number

#![no_std]

pub mod gpio;
pub mod pins;

pub use gpio::{drive_strength, GpioAllocator, Rp2040Gpio, GPIO_COUNT};
pub use pins::PinError;

// Re-export the shared HAL trait for convenience
pub use powerctl_hal::{GpioHal, HalError, PinNumber};
