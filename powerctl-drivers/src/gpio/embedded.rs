//! `embedded-hal` adapter
//!
//! Lets a controller drive any `embedded_hal::digital::OutputPin`, for
//! example a Linux GPIO line or a pin from a chip HAL that has no
//! register-level access. The pin is already an output when handed over,
//! so reset and configure only track whether driving is allowed.
//!
//! Limitations:
//! - only the wrapped pin number is accepted ([`HalError::InvalidArg`] otherwise)
//! - pulls and interrupts are not available ([`HalError::NotSupported`])
//! - drive strength is not available ([`HalError::NotSupported`])

use core::cell::{Cell, RefCell};

use embedded_hal::digital::{OutputPin, PinState};
use powerctl_hal::{DriveCapability, GpioHal, HalError, InterruptType, OutputConfig, PinNumber};

/// Single-pin [`GpioHal`] over an `embedded-hal` output pin
pub struct EmbeddedHalGpio<P> {
    pin: RefCell<P>,
    number: PinNumber,
    /// Set by `configure`, cleared by `reset_pin`
    enabled: Cell<bool>,
}

impl<P: OutputPin> EmbeddedHalGpio<P> {
    /// Wrap an output pin, addressed as `number`
    pub fn new(pin: P, number: PinNumber) -> Self {
        Self {
            pin: RefCell::new(pin),
            number,
            enabled: Cell::new(false),
        }
    }

    /// Pin number this adapter answers to
    pub fn number(&self) -> PinNumber {
        self.number
    }

    /// Check if the pin is currently allowed to drive
    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    /// Release the wrapped pin
    pub fn into_inner(self) -> P {
        self.pin.into_inner()
    }

    fn check_pin(&self, pin: PinNumber) -> Result<(), HalError> {
        if pin == self.number {
            Ok(())
        } else {
            Err(HalError::InvalidArg)
        }
    }
}

impl<P: OutputPin> GpioHal for EmbeddedHalGpio<P> {
    type Error = HalError;

    fn reset_pin(&self, pin: PinNumber) -> Result<(), HalError> {
        self.check_pin(pin)?;
        self.enabled.set(false);
        Ok(())
    }

    fn configure(&self, config: &OutputConfig) -> Result<(), HalError> {
        self.check_pin(config.pin)?;
        if !config.mode.is_output()
            || config.pull_up
            || config.pull_down
            || config.interrupt != InterruptType::Disabled
        {
            return Err(HalError::NotSupported);
        }
        self.enabled.set(true);
        Ok(())
    }

    fn set_level(&self, pin: PinNumber, level: bool) -> Result<(), HalError> {
        self.check_pin(pin)?;
        if !self.enabled.get() {
            return Err(HalError::InvalidState);
        }
        self.pin
            .borrow_mut()
            .set_state(PinState::from(level))
            .map_err(|_| HalError::Fail)
    }

    fn set_drive_capability(
        &self,
        pin: PinNumber,
        _strength: DriveCapability,
    ) -> Result<(), HalError> {
        self.check_pin(pin)?;
        Err(HalError::NotSupported)
    }
}
