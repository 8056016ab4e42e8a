//! GPIO capability
//!
//! The four register-level operations an output controller needs, plus
//! the small value types they exchange.

use core::fmt;

/// GPIO pin identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinNumber(pub u8);

impl PinNumber {
    /// Create a pin identifier
    pub const fn new(pin: u8) -> Self {
        Self(pin)
    }

    /// Raw pin index
    pub const fn index(self) -> u8 {
        self.0
    }
}

impl From<u8> for PinNumber {
    fn from(pin: u8) -> Self {
        Self(pin)
    }
}

impl fmt::Display for PinNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gpio{}", self.0)
    }
}

/// Pin direction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    /// Input and output disabled
    #[default]
    Disabled,
    /// Input only
    Input,
    /// Push-pull output only
    Output,
    /// Open-drain output only
    OutputOpenDrain,
    /// Push-pull output with the input buffer enabled
    InputOutput,
    /// Open-drain output with the input buffer enabled
    InputOutputOpenDrain,
}

impl PinMode {
    /// Check if the mode drives the pin
    pub const fn is_output(self) -> bool {
        matches!(
            self,
            PinMode::Output
                | PinMode::OutputOpenDrain
                | PinMode::InputOutput
                | PinMode::InputOutputOpenDrain
        )
    }
}

/// Pin interrupt trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterruptType {
    /// No interrupt
    #[default]
    Disabled,
    /// Rising edge
    PosEdge,
    /// Falling edge
    NegEdge,
    /// Both edges
    AnyEdge,
    /// Input held low
    LowLevel,
    /// Input held high
    HighLevel,
}

/// Configuration bundle applied by [`GpioHal::configure`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutputConfig {
    /// Pin to configure
    pub pin: PinNumber,
    /// Direction mode
    pub mode: PinMode,
    /// Enable internal pull-up
    pub pull_up: bool,
    /// Enable internal pull-down
    pub pull_down: bool,
    /// Interrupt trigger
    pub interrupt: InterruptType,
}

impl OutputConfig {
    /// Push-pull output with no pulls and no interrupt
    ///
    /// The input buffer stays enabled so the driven level can be read
    /// back from the pad.
    pub const fn push_pull(pin: PinNumber) -> Self {
        Self {
            pin,
            mode: PinMode::InputOutput,
            pull_up: false,
            pull_down: false,
            interrupt: InterruptType::Disabled,
        }
    }
}

/// Output drive strength
///
/// Four ordered levels from weakest to strongest. Each chip HAL maps them
/// onto its own pad settings; the currents and the reset level are
/// chip-specific.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriveCapability {
    /// Weakest drive
    Weakest,
    /// Weak drive
    Weak,
    /// Medium drive
    #[default]
    Medium,
    /// Strongest drive
    Strongest,
}

impl DriveCapability {
    /// Look up a drive level by index (0 = weakest, 3 = strongest)
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(DriveCapability::Weakest),
            1 => Some(DriveCapability::Weak),
            2 => Some(DriveCapability::Medium),
            3 => Some(DriveCapability::Strongest),
            _ => None,
        }
    }

    /// Index of this drive level (0 = weakest, 3 = strongest)
    pub const fn index(self) -> u8 {
        self as u8
    }
}

/// Register-level GPIO access
///
/// Every operation is a short, blocking register write that either succeeds
/// or reports why it failed. Methods take `&self`: the GPIO block is a shared
/// peripheral, so one implementation serves every controller on the chip.
/// Implementations that keep bookkeeping use interior mutability.
pub trait GpioHal {
    /// Failure reported by the hardware
    type Error;

    /// Return the pin to its default, non-driving (high-impedance) state
    fn reset_pin(&self, pin: PinNumber) -> Result<(), Self::Error>;

    /// Apply a direction/pull/interrupt configuration
    fn configure(&self, config: &OutputConfig) -> Result<(), Self::Error>;

    /// Drive the physical level of the pin (`true` = high)
    fn set_level(&self, pin: PinNumber, level: bool) -> Result<(), Self::Error>;

    /// Set the output drive strength of the pin
    fn set_drive_capability(
        &self,
        pin: PinNumber,
        strength: DriveCapability,
    ) -> Result<(), Self::Error>;
}

impl<T: GpioHal + ?Sized> GpioHal for &T {
    type Error = T::Error;

    fn reset_pin(&self, pin: PinNumber) -> Result<(), Self::Error> {
        (**self).reset_pin(pin)
    }

    fn configure(&self, config: &OutputConfig) -> Result<(), Self::Error> {
        (**self).configure(config)
    }

    fn set_level(&self, pin: PinNumber, level: bool) -> Result<(), Self::Error> {
        (**self).set_level(pin, level)
    }

    fn set_drive_capability(
        &self,
        pin: PinNumber,
        strength: DriveCapability,
    ) -> Result<(), Self::Error> {
        (**self).set_drive_capability(pin, strength)
    }
}
