//! Powerctl Hardware Abstraction Layer
//!
//! This crate defines the GPIO capability that the power controller drives.
//! Chip-specific crates (and host-side simulators) implement [`GpioHal`];
//! `powerctl-core` only ever talks to the trait.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (powerctl-firmware, etc.)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  powerctl-core (PowerController)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  powerctl-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  powerctl-    │       │  powerctl-    │
//! │  hal-rp2040   │       │  drivers      │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Operations
//!
//! [`GpioHal`] exposes exactly four register-level operations:
//! pin reset, pin configuration, level set and drive-strength set.

#![no_std]
#![deny(unsafe_code)]

pub mod error;
pub mod gpio;

// Re-export key types at crate root for convenience
pub use error::HalError;
pub use gpio::{DriveCapability, GpioHal, InterruptType, OutputConfig, PinMode, PinNumber};
