//! Logical power switch trait

use powerctl_hal::{DriveCapability, PinNumber};

/// A GPIO-driven power output with a logical ON/OFF state
///
/// The physical level behind ON depends on the polarity the implementation
/// was configured with; callers only ever deal with the logical state.
pub trait PowerSwitch {
    /// Failure reported by the switch
    type Error;

    /// Acquire the pin and drive it to the configured initial state
    ///
    /// Calling this on an initialized switch is a no-op.
    fn init(&mut self) -> Result<(), Self::Error>;

    /// Drive the pin low and release it
    ///
    /// Always leaves the switch deinitialized, even when the hardware
    /// reports a failure. Calling this on a deinitialized switch is a no-op.
    fn deinit(&mut self) -> Result<(), Self::Error>;

    /// Switch the output logically ON
    fn turn_on(&mut self) -> Result<(), Self::Error>;

    /// Switch the output logically OFF
    fn turn_off(&mut self) -> Result<(), Self::Error>;

    /// Flip the logical state
    fn toggle(&mut self) -> Result<(), Self::Error>;

    /// Set the output drive strength
    fn set_drive_capability(&mut self, strength: DriveCapability) -> Result<(), Self::Error>;

    /// Last successfully applied logical state
    fn is_on(&self) -> bool;

    /// Check if the switch is initialized
    fn is_initialized(&self) -> bool;

    /// Pin this switch drives
    fn pin(&self) -> PinNumber;

    /// Switch to a specific logical state
    fn set_on(&mut self, on: bool) -> Result<(), Self::Error> {
        if on {
            self.turn_on()
        } else {
            self.turn_off()
        }
    }

    /// Check if the switch is logically OFF
    fn is_off(&self) -> bool {
        !self.is_on()
    }
}
