//! GPIO HAL implementations

pub mod embedded;
pub mod sim;

pub use embedded::EmbeddedHalGpio;
pub use sim::{GpioCall, GpioOp, PinRegisters, SimGpio};
