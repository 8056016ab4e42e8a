//! Simulated GPIO bank
//!
//! Models the register state of `N` pins in software: mode, pulls, driven
//! level and drive strength. Every call is logged, and any operation can be
//! made to fail once with [`SimGpio::fail_next`].
//!
//! Rules enforced, matching real GPIO drivers:
//! - pin index `>= N` → [`HalError::InvalidArg`]
//! - `set_level` on a pin not configured as an output → [`HalError::InvalidState`]
//! - `reset_pin` returns the pin to disabled, low, no pulls, medium drive

use core::cell::{Cell, RefCell};

use heapless::Vec;
use powerctl_hal::{DriveCapability, GpioHal, HalError, OutputConfig, PinMode, PinNumber};

/// Number of calls kept in the log (oldest dropped first)
pub const CALL_LOG_LEN: usize = 32;

/// HAL operation selector for fault injection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GpioOp {
    /// `reset_pin`
    Reset,
    /// `configure`
    Configure,
    /// `set_level`
    SetLevel,
    /// `set_drive_capability`
    SetDrive,
}

impl GpioOp {
    const fn slot(self) -> usize {
        self as usize
    }
}

/// Logged HAL call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GpioCall {
    /// `reset_pin(pin)`
    Reset(PinNumber),
    /// `configure(config)`
    Configure(OutputConfig),
    /// `set_level(pin, level)`
    SetLevel(PinNumber, bool),
    /// `set_drive_capability(pin, strength)`
    SetDrive(PinNumber, DriveCapability),
}

/// Register state of one simulated pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinRegisters {
    /// Direction mode
    pub mode: PinMode,
    /// Driven level (meaningful only in an output mode)
    pub level: bool,
    /// Internal pull-up enabled
    pub pull_up: bool,
    /// Internal pull-down enabled
    pub pull_down: bool,
    /// Output drive strength
    pub drive: DriveCapability,
}

/// Simulated bank of `N` GPIO pins
pub struct SimGpio<const N: usize> {
    pins: RefCell<[PinRegisters; N]>,
    calls: RefCell<Vec<GpioCall, CALL_LOG_LEN>>,
    faults: [Cell<Option<HalError>>; 4],
}

impl<const N: usize> Default for SimGpio<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> SimGpio<N> {
    /// Create a bank with every pin in its reset state
    pub fn new() -> Self {
        Self {
            pins: RefCell::new([PinRegisters::default(); N]),
            calls: RefCell::new(Vec::new()),
            faults: [Cell::new(None), Cell::new(None), Cell::new(None), Cell::new(None)],
        }
    }

    /// Make the next call of `op` fail with `error`
    ///
    /// The fault is consumed by that call; the pin state is left untouched.
    pub fn fail_next(&self, op: GpioOp, error: HalError) {
        self.faults[op.slot()].set(Some(error));
    }

    /// Register state of a pin
    pub fn pin_state(&self, pin: PinNumber) -> Option<PinRegisters> {
        self.pins.borrow().get(pin.0 as usize).copied()
    }

    /// Current direction mode of a pin
    pub fn mode(&self, pin: PinNumber) -> Option<PinMode> {
        self.pin_state(pin).map(|s| s.mode)
    }

    /// Level the pin is actively driving, `None` when not an output
    pub fn driven_level(&self, pin: PinNumber) -> Option<bool> {
        self.pin_state(pin)
            .filter(|s| s.mode.is_output())
            .map(|s| s.level)
    }

    /// Logged calls, oldest first
    pub fn calls(&self) -> Vec<GpioCall, CALL_LOG_LEN> {
        self.calls.borrow().clone()
    }

    /// Clear the call log
    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    fn record(&self, call: GpioCall) {
        let mut calls = self.calls.borrow_mut();
        if calls.is_full() {
            calls.remove(0);
        }
        // Room was made above
        let _ = calls.push(call);
    }

    fn check(&self, op: GpioOp, pin: PinNumber) -> Result<(), HalError> {
        if let Some(error) = self.faults[op.slot()].take() {
            return Err(error);
        }
        if pin.0 as usize >= N {
            return Err(HalError::InvalidArg);
        }
        Ok(())
    }
}

impl<const N: usize> GpioHal for SimGpio<N> {
    type Error = HalError;

    fn reset_pin(&self, pin: PinNumber) -> Result<(), HalError> {
        self.record(GpioCall::Reset(pin));
        self.check(GpioOp::Reset, pin)?;
        self.pins.borrow_mut()[pin.0 as usize] = PinRegisters::default();
        Ok(())
    }

    fn configure(&self, config: &OutputConfig) -> Result<(), HalError> {
        self.record(GpioCall::Configure(*config));
        self.check(GpioOp::Configure, config.pin)?;
        let mut pins = self.pins.borrow_mut();
        let state = &mut pins[config.pin.0 as usize];
        state.mode = config.mode;
        state.pull_up = config.pull_up;
        state.pull_down = config.pull_down;
        Ok(())
    }

    fn set_level(&self, pin: PinNumber, level: bool) -> Result<(), HalError> {
        self.record(GpioCall::SetLevel(pin, level));
        self.check(GpioOp::SetLevel, pin)?;
        let mut pins = self.pins.borrow_mut();
        let state = &mut pins[pin.0 as usize];
        if !state.mode.is_output() {
            return Err(HalError::InvalidState);
        }
        state.level = level;
        Ok(())
    }

    fn set_drive_capability(
        &self,
        pin: PinNumber,
        strength: DriveCapability,
    ) -> Result<(), HalError> {
        self.record(GpioCall::SetDrive(pin, strength));
        self.check(GpioOp::SetDrive, pin)?;
        self.pins.borrow_mut()[pin.0 as usize].drive = strength;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use powerctl_core::{PowerController, PowerError};

    const PIN: PinNumber = PinNumber(4);

    #[test]
    fn test_reset_state() {
        let gpio = SimGpio::<8>::new();
        assert_eq!(gpio.mode(PIN), Some(PinMode::Disabled));
        assert_eq!(gpio.driven_level(PIN), None);
        assert_eq!(gpio.pin_state(PinNumber(8)), None);
    }

    #[test]
    fn test_invalid_pin() {
        let gpio = SimGpio::<8>::new();
        assert_eq!(gpio.reset_pin(PinNumber(8)), Err(HalError::InvalidArg));
        assert_eq!(
            gpio.configure(&OutputConfig::push_pull(PinNumber(9))),
            Err(HalError::InvalidArg)
        );
    }

    #[test]
    fn test_set_level_requires_output() {
        let gpio = SimGpio::<8>::new();
        assert_eq!(gpio.set_level(PIN, true), Err(HalError::InvalidState));

        gpio.configure(&OutputConfig::push_pull(PIN)).unwrap();
        assert_eq!(gpio.set_level(PIN, true), Ok(()));
        assert_eq!(gpio.driven_level(PIN), Some(true));

        gpio.reset_pin(PIN).unwrap();
        assert_eq!(gpio.driven_level(PIN), None);
    }

    #[test]
    fn test_fail_next_is_consumed() {
        let gpio = SimGpio::<8>::new();
        gpio.fail_next(GpioOp::Reset, HalError::Busy);
        assert_eq!(gpio.reset_pin(PIN), Err(HalError::Busy));
        assert_eq!(gpio.reset_pin(PIN), Ok(()));
    }

    #[test]
    fn test_call_log_keeps_latest() {
        let gpio = SimGpio::<8>::new();
        for _ in 0..CALL_LOG_LEN + 3 {
            gpio.reset_pin(PIN).unwrap();
        }
        gpio.set_drive_capability(PIN, DriveCapability::Weak).unwrap();

        let calls = gpio.calls();
        assert_eq!(calls.len(), CALL_LOG_LEN);
        assert_eq!(
            calls.last(),
            Some(&GpioCall::SetDrive(PIN, DriveCapability::Weak))
        );
    }

    #[test]
    fn test_controller_normal_init_sequence() {
        let gpio = SimGpio::<8>::new();
        let mut power = PowerController::new(&gpio, PIN, false, false);

        power.init().unwrap();
        assert_eq!(
            gpio.calls().as_slice(),
            &[
                GpioCall::Reset(PIN),
                GpioCall::Configure(OutputConfig::push_pull(PIN)),
                GpioCall::SetLevel(PIN, false),
            ]
        );
        assert_eq!(gpio.driven_level(PIN), Some(false));
        assert!(power.is_initialized());
        assert!(!power.is_on());
    }

    #[test]
    fn test_controller_inverted_pin_levels() {
        let gpio = SimGpio::<8>::new();
        let mut power = PowerController::new(&gpio, PIN, true, true);

        power.init().unwrap();
        assert_eq!(gpio.driven_level(PIN), Some(false));
        assert!(power.is_on());

        power.turn_off().unwrap();
        assert_eq!(gpio.driven_level(PIN), Some(true));

        power.deinit().unwrap();
        assert_eq!(gpio.mode(PIN), Some(PinMode::Disabled));
    }

    #[test]
    fn test_controller_deinit_partial_failure() {
        let gpio = SimGpio::<8>::new();
        let mut power = PowerController::new(&gpio, PIN, false, true);
        power.init().unwrap();

        gpio.fail_next(GpioOp::SetLevel, HalError::Fail);
        assert_eq!(power.deinit(), Err(PowerError::Hal(HalError::Fail)));
        assert!(!power.is_initialized());
        // Reset still ran
        assert_eq!(gpio.mode(PIN), Some(PinMode::Disabled));
    }

    #[test]
    fn test_controller_init_level_failure_releases_pin() {
        let gpio = SimGpio::<8>::new();
        let mut power = PowerController::new(&gpio, PIN, true, true);

        gpio.fail_next(GpioOp::SetLevel, HalError::Fail);
        assert_eq!(power.init(), Err(PowerError::Hal(HalError::Fail)));
        assert!(!power.is_initialized());
        assert_eq!(gpio.mode(PIN), Some(PinMode::Disabled));

        // Fault was one-shot, so the retry goes all the way through
        assert_eq!(power.init(), Ok(()));
        assert!(power.is_on());
        assert_eq!(gpio.driven_level(PIN), Some(false));
    }

    #[test]
    fn test_controller_invalid_pin() {
        let gpio = SimGpio::<8>::new();
        let mut power = PowerController::new(&gpio, PinNumber(20), false, false);
        assert_eq!(power.init(), Err(PowerError::Hal(HalError::InvalidArg)));
        assert!(!power.is_initialized());
    }

    #[test]
    fn test_controllers_share_bank() {
        let gpio = SimGpio::<8>::new();
        let mut a = PowerController::new(&gpio, PinNumber(1), false, false);
        let mut b = PowerController::new(&gpio, PinNumber(2), false, true);
        a.init().unwrap();
        b.init().unwrap();

        a.toggle().unwrap();
        assert_eq!(gpio.driven_level(PinNumber(1)), Some(true));
        assert_eq!(gpio.driven_level(PinNumber(2)), Some(true));

        b.set_drive_capability(DriveCapability::Strongest).unwrap();
        assert_eq!(
            gpio.pin_state(PinNumber(2)).map(|s| s.drive),
            Some(DriveCapability::Strongest)
        );
        assert_eq!(
            gpio.pin_state(PinNumber(1)).map(|s| s.drive),
            Some(DriveCapability::Medium)
        );
    }
}
