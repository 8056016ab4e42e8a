//! Power output configuration types

use core::fmt;

use powerctl_hal::PinNumber;

/// Highest GPIO count of any supported chip
pub const GPIO_COUNT: u8 = 49;

/// Maximum outputs in one configuration file
pub const MAX_OUTPUTS: usize = 8;

/// Maximum output name length
pub const MAX_NAME_LEN: usize = 16;

/// Configuration error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Pin string not in `gpioN` / `!gpioN` form, or out of range
    InvalidPin,
    /// Drive strength index out of range (0-3 valid)
    InvalidDrive,
    /// Malformed TOML or missing key
    Syntax,
    /// More than [`MAX_OUTPUTS`] outputs
    TooManyOutputs,
    /// Output name longer than [`MAX_NAME_LEN`]
    NameTooLong,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPin => f.write_str("invalid pin string"),
            ConfigError::InvalidDrive => f.write_str("drive strength must be 0-3"),
            ConfigError::Syntax => f.write_str("malformed output configuration"),
            ConfigError::TooManyOutputs => f.write_str("too many outputs"),
            ConfigError::NameTooLong => f.write_str("output name too long"),
        }
    }
}

/// Power output configuration
///
/// Fixed at construction; a controller never changes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PowerConfig {
    /// Controlled pin
    pub pin: PinNumber,
    /// Physical LOW means logical ON
    pub inverted: bool,
    /// Logical state applied by `init`
    pub initial_on: bool,
}

impl PowerConfig {
    /// Active-high output that starts OFF
    pub const fn new(pin: PinNumber) -> Self {
        Self {
            pin,
            inverted: false,
            initial_on: false,
        }
    }

    /// Active-low output that starts OFF
    pub const fn active_low(pin: PinNumber) -> Self {
        Self {
            pin,
            inverted: true,
            initial_on: false,
        }
    }

    /// Set the logical state applied by `init`
    pub const fn with_initial_on(mut self, initial_on: bool) -> Self {
        self.initial_on = initial_on;
        self
    }

    /// Build a config from a pin string such as `"!gpio4"`
    pub fn from_pin_str(s: &str) -> Result<Self, ConfigError> {
        let (pin, inverted) = parse_pin_string(s).ok_or(ConfigError::InvalidPin)?;
        Ok(Self {
            pin,
            inverted,
            initial_on: false,
        })
    }

    /// Physical level that represents the given logical state
    pub const fn physical_level(&self, on: bool) -> bool {
        on != self.inverted
    }
}

/// Parse a pin string from config
///
/// Supports formats:
/// - "gpio4" -> (4, false)
/// - "!gpio4" -> (4, true) (inverted/active-low)
pub fn parse_pin_string(s: &str) -> Option<(PinNumber, bool)> {
    let s = s.trim();

    let (s, inverted) = match s.strip_prefix('!') {
        Some(rest) => (rest, true),
        None => (s, false),
    };

    let num_str = s.strip_prefix("gpio")?;
    if num_str.is_empty() || !num_str.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let pin: u8 = num_str.parse().ok()?;

    if pin >= GPIO_COUNT {
        return None;
    }

    Some((PinNumber(pin), inverted))
}
