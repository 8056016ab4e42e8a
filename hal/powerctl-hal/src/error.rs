//! Generic HAL failure kinds

use core::fmt;

/// Failure reported by a [`GpioHal`](crate::GpioHal) operation
///
/// Implementations are free to use their own error type; this one covers
/// the failure kinds a register-level GPIO driver typically reports and is
/// what the bundled implementations use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HalError {
    /// Pin number or argument out of range for this chip
    InvalidArg,
    /// Operation not valid in the pin's current mode
    InvalidState,
    /// Pin or chip does not support the operation
    NotSupported,
    /// Peripheral busy (e.g. pin claimed by another function)
    Busy,
    /// Generic hardware failure
    Fail,
    /// Raw vendor error code
    Code(i32),
}

impl fmt::Display for HalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HalError::InvalidArg => f.write_str("invalid argument"),
            HalError::InvalidState => f.write_str("invalid state"),
            HalError::NotSupported => f.write_str("operation not supported"),
            HalError::Busy => f.write_str("hardware busy"),
            HalError::Fail => f.write_str("hardware failure"),
            HalError::Code(code) => write!(f, "hal error code {}", code),
        }
    }
}
