//! Controller error type

use core::fmt;

/// Errors reported by a power controller
///
/// HAL failures are forwarded untouched in [`PowerError::Hal`], so the
/// caller always sees the code the hardware produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerError<E> {
    /// Operation requires a prior successful `init`
    NotInitialized,
    /// The underlying HAL operation failed
    Hal(E),
}

impl<E> PowerError<E> {
    /// Check if this is the not-initialized rejection
    pub fn is_not_initialized(&self) -> bool {
        matches!(self, PowerError::NotInitialized)
    }

    /// The HAL error, if the hardware reported one
    pub fn hal_error(&self) -> Option<&E> {
        match self {
            PowerError::Hal(e) => Some(e),
            PowerError::NotInitialized => None,
        }
    }
}

impl<E: fmt::Display> fmt::Display for PowerError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PowerError::NotInitialized => f.write_str("power control not initialized"),
            PowerError::Hal(e) => write!(f, "gpio hal failure: {}", e),
        }
    }
}
