//! RP2040 GPIO capability
//!
//! Registers embassy-rp [`Flex`] pins under their GPIO numbers and exposes
//! them through [`GpioHal`], so controllers address pins by number exactly
//! as configured.

use core::cell::RefCell;

use embassy_rp::gpio::{AnyPin, Drive, Flex, Level, Pull};
use embassy_rp::Peri;
use heapless::{FnvIndexSet, Vec};
use powerctl_hal::{
    DriveCapability, GpioHal, HalError, InterruptType, OutputConfig, PinMode, PinNumber,
};

use crate::pins::PinError;

/// Maximum number of GPIO pins on RP2040
pub const GPIO_COUNT: usize = 30;

/// GPIO allocator to track pin usage
pub struct GpioAllocator {
    /// Set of allocated GPIO pins
    allocated: FnvIndexSet<u8, 32>,
}

impl Default for GpioAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl GpioAllocator {
    /// Create a new GPIO allocator
    pub fn new() -> Self {
        Self {
            allocated: FnvIndexSet::new(),
        }
    }

    /// Allocate a GPIO pin
    pub fn allocate(&mut self, pin: PinNumber) -> Result<(), PinError> {
        if pin.0 as usize >= GPIO_COUNT {
            return Err(PinError::InvalidPin);
        }
        if self.allocated.contains(&pin.0) {
            return Err(PinError::AlreadyTaken);
        }
        self.allocated
            .insert(pin.0)
            .map_err(|_| PinError::TableFull)?;
        Ok(())
    }

    /// Release a GPIO pin
    pub fn release(&mut self, pin: PinNumber) {
        self.allocated.remove(&pin.0);
    }

    /// Check if a pin is allocated
    pub fn is_allocated(&self, pin: PinNumber) -> bool {
        self.allocated.contains(&pin.0)
    }

    /// Get the number of allocated pins
    pub fn allocated_count(&self) -> usize {
        self.allocated.len()
    }
}

/// Map a drive level onto the RP2040 pad drive settings
///
/// The RP2040 resets pads to 4 mA, which is [`DriveCapability::Weak`] here.
pub const fn drive_strength(strength: DriveCapability) -> Drive {
    match strength {
        DriveCapability::Weakest => Drive::_2mA,
        DriveCapability::Weak => Drive::_4mA,
        DriveCapability::Medium => Drive::_8mA,
        DriveCapability::Strongest => Drive::_12mA,
    }
}

/// RP2040 GPIO bank holding up to `N` registered pins
pub struct Rp2040Gpio<'d, const N: usize> {
    allocator: GpioAllocator,
    pins: RefCell<Vec<(PinNumber, Flex<'d>), N>>,
}

impl<'d, const N: usize> Default for Rp2040Gpio<'d, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'d, const N: usize> Rp2040Gpio<'d, N> {
    /// Create an empty bank
    pub fn new() -> Self {
        Self {
            allocator: GpioAllocator::new(),
            pins: RefCell::new(Vec::new()),
        }
    }

    /// Register a pin under its GPIO number
    ///
    /// The pin is left untouched until a controller resets and configures it.
    pub fn register(&mut self, number: PinNumber, pin: Peri<'d, AnyPin>) -> Result<(), PinError> {
        self.allocator.allocate(number)?;
        if self.pins.get_mut().push((number, Flex::new(pin))).is_err() {
            self.allocator.release(number);
            return Err(PinError::TableFull);
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("Registered {}", number);

        Ok(())
    }

    /// Check if a pin is registered
    pub fn is_registered(&self, number: PinNumber) -> bool {
        self.allocator.is_allocated(number)
    }

    fn with_pin<R>(
        &self,
        number: PinNumber,
        f: impl FnOnce(&mut Flex<'d>) -> Result<R, HalError>,
    ) -> Result<R, HalError> {
        let mut pins = self.pins.borrow_mut();
        let (_, flex) = pins
            .iter_mut()
            .find(|(n, _)| *n == number)
            .ok_or(HalError::InvalidArg)?;
        f(flex)
    }
}

impl<const N: usize> GpioHal for Rp2040Gpio<'_, N> {
    type Error = HalError;

    fn reset_pin(&self, pin: PinNumber) -> Result<(), HalError> {
        self.with_pin(pin, |flex| {
            flex.set_as_input();
            flex.set_pull(Pull::None);
            flex.set_low();
            flex.set_drive_strength(Drive::_4mA);
            Ok(())
        })
    }

    fn configure(&self, config: &OutputConfig) -> Result<(), HalError> {
        let pull = match (config.pull_up, config.pull_down) {
            (false, false) => Pull::None,
            (true, false) => Pull::Up,
            (false, true) => Pull::Down,
            // The pad has a single pull select
            (true, true) => return Err(HalError::InvalidArg),
        };
        if config.interrupt != InterruptType::Disabled {
            // Edge and level waits go through embassy's async input API
            return Err(HalError::NotSupported);
        }

        self.with_pin(config.pin, |flex| {
            match config.mode {
                PinMode::Disabled | PinMode::Input => flex.set_as_input(),
                PinMode::Output | PinMode::InputOutput => flex.set_as_output(),
                PinMode::OutputOpenDrain | PinMode::InputOutputOpenDrain => {
                    return Err(HalError::NotSupported)
                }
            }
            flex.set_pull(pull);
            Ok(())
        })
    }

    fn set_level(&self, pin: PinNumber, level: bool) -> Result<(), HalError> {
        self.with_pin(pin, |flex| {
            flex.set_level(Level::from(level));
            Ok(())
        })
    }

    fn set_drive_capability(
        &self,
        pin: PinNumber,
        strength: DriveCapability,
    ) -> Result<(), HalError> {
        self.with_pin(pin, |flex| {
            flex.set_drive_strength(drive_strength(strength));
            Ok(())
        })
    }
}
