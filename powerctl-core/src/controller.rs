//! GPIO power controller
//!
//! Translates logical ON/OFF intent into physical pin levels and owns the
//! init/deinit protocol for one output pin.
//!
//! # Lifecycle
//!
//! ```text
//!            init()                     deinit()
//!   new ──► [uninitialized] ─────► [initialized] ─────► [uninitialized]
//!                 ▲                  │  on/off/toggle       │
//!                 └──────────────────┼──────────────────────┘
//!                                    ▼
//!                          reset → configure → level
//! ```
//!
//! Construction touches no hardware. Dropping a controller does not release
//! the pin either; call [`PowerController::deinit`] for that.
//!
//! # Usage
//!
//! ```ignore
//! let hal = SimGpio::<8>::new();
//! let mut power = PowerController::new(&hal, PinNumber(4), true, false);
//! power.init()?;
//! power.turn_on()?;    // active-low: pin driven LOW
//! power.deinit()?;     // pin driven LOW, then reset to high-impedance
//! ```

use powerctl_hal::{DriveCapability, GpioHal, OutputConfig, PinNumber};

use crate::config::PowerConfig;
use crate::error::PowerError;
use crate::traits::PowerSwitch;

/// Logical power switch on a single GPIO pin
///
/// Holds a borrowed HAL; the HAL must outlive every controller using it,
/// which the borrow enforces. Any number of controllers may share one HAL
/// as long as they drive different pins.
pub struct PowerController<'a, H: GpioHal> {
    hal: &'a H,
    config: PowerConfig,
    /// True between a successful `init` and the next `deinit`
    initialized: bool,
    /// Last logical state the HAL accepted
    is_on: bool,
}

impl<'a, H: GpioHal> PowerController<'a, H> {
    /// Create a new power controller
    ///
    /// # Arguments
    /// - `hal`: GPIO implementation used for every hardware access
    /// - `pin`: Pin to control
    /// - `inverted`: If true, the output is ON when the pin is LOW
    /// - `initial_on`: Logical state applied by `init`
    pub fn new(hal: &'a H, pin: PinNumber, inverted: bool, initial_on: bool) -> Self {
        Self::from_config(
            hal,
            PowerConfig {
                pin,
                inverted,
                initial_on,
            },
        )
    }

    /// Create a power controller from a prepared configuration
    pub fn from_config(hal: &'a H, config: PowerConfig) -> Self {
        Self {
            hal,
            config,
            initialized: false,
            is_on: false,
        }
    }

    /// Initialize the output
    ///
    /// Resets the pin, configures it as a push-pull output with pulls and
    /// interrupts disabled, then drives the configured initial state.
    /// Returns immediately if already initialized.
    ///
    /// On any failure the error is returned and the controller stays
    /// uninitialized, so a later `init` redoes the whole sequence. If only
    /// the initial level fails, the pin is reset again (best effort) before
    /// the level error is returned.
    pub fn init(&mut self) -> Result<(), PowerError<H::Error>> {
        if self.initialized {
            return Ok(());
        }

        let pin = self.config.pin;

        #[cfg(feature = "defmt")]
        defmt::info!(
            "Initializing power control on {} (inverted={}, initial_on={})",
            pin,
            self.config.inverted,
            self.config.initial_on
        );

        if let Err(e) = self.hal.reset_pin(pin) {
            #[cfg(feature = "defmt")]
            defmt::error!("Failed to reset {}", pin);
            return Err(PowerError::Hal(e));
        }

        if let Err(e) = self.hal.configure(&OutputConfig::push_pull(pin)) {
            #[cfg(feature = "defmt")]
            defmt::error!("Failed to configure {} as output", pin);
            return Err(PowerError::Hal(e));
        }

        self.initialized = true;
        if let Err(e) = self.apply(self.config.initial_on) {
            // Release the pin so the next init starts over from reset
            self.initialized = false;
            let _ = self.hal.reset_pin(pin);
            return Err(e);
        }

        #[cfg(feature = "defmt")]
        defmt::info!("Power control initialized on {}", pin);

        Ok(())
    }

    /// Deinitialize the output
    ///
    /// Forces the pin LOW (a physical level, whatever the polarity), then
    /// resets it to high-impedance. Both steps are always attempted and the
    /// controller always ends up uninitialized and OFF. If a step fails, the
    /// first failure is returned. Returns immediately if not initialized.
    pub fn deinit(&mut self) -> Result<(), PowerError<H::Error>> {
        if !self.initialized {
            return Ok(());
        }

        let pin = self.config.pin;
        let low = self.hal.set_level(pin, false);
        let reset = self.hal.reset_pin(pin);

        self.initialized = false;
        self.is_on = false;

        #[cfg(feature = "defmt")]
        {
            if low.is_err() {
                defmt::error!("Failed to drive {} low during deinit", pin);
            }
            if reset.is_err() {
                defmt::error!("Failed to reset {} during deinit", pin);
            }
            defmt::info!("Power control deinitialized on {}", pin);
        }

        low.and(reset).map_err(PowerError::Hal)
    }

    /// Switch the output logically ON
    pub fn turn_on(&mut self) -> Result<(), PowerError<H::Error>> {
        self.apply(true)
    }

    /// Switch the output logically OFF
    pub fn turn_off(&mut self) -> Result<(), PowerError<H::Error>> {
        self.apply(false)
    }

    /// Flip the logical state
    pub fn toggle(&mut self) -> Result<(), PowerError<H::Error>> {
        self.apply(!self.is_on)
    }

    /// Set the pin's output drive strength
    ///
    /// Passes straight through to the HAL; controller state is unaffected.
    pub fn set_drive_capability(
        &mut self,
        strength: DriveCapability,
    ) -> Result<(), PowerError<H::Error>> {
        if !self.initialized {
            return Err(PowerError::NotInitialized);
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("{} drive capability set to {}", self.config.pin, strength);

        self.hal
            .set_drive_capability(self.config.pin, strength)
            .map_err(PowerError::Hal)
    }

    /// Last logical state the hardware accepted
    pub fn is_on(&self) -> bool {
        self.is_on
    }

    /// Check if the controller is initialized
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Controlled pin (valid before `init`)
    pub fn pin(&self) -> PinNumber {
        self.config.pin
    }

    /// Check if the output is active-low
    pub fn is_inverted(&self) -> bool {
        self.config.inverted
    }

    /// Get the configuration
    pub fn config(&self) -> &PowerConfig {
        &self.config
    }

    /// Drive the pin to the level representing `enable`
    ///
    /// `is_on` only changes when the HAL accepts the write.
    fn apply(&mut self, enable: bool) -> Result<(), PowerError<H::Error>> {
        if !self.initialized {
            #[cfg(feature = "defmt")]
            defmt::error!("Power control on {} not initialized", self.config.pin);
            return Err(PowerError::NotInitialized);
        }

        let pin = self.config.pin;
        let level = self.config.physical_level(enable);

        match self.hal.set_level(pin, level) {
            Ok(()) => {
                self.is_on = enable;
                #[cfg(feature = "defmt")]
                defmt::debug!("{} enabled={} (physical_level={})", pin, enable, level);
                Ok(())
            }
            Err(e) => {
                #[cfg(feature = "defmt")]
                defmt::error!(
                    "Failed to set {} to enable={} (physical_level={})",
                    pin,
                    enable,
                    level
                );
                Err(PowerError::Hal(e))
            }
        }
    }
}

impl<H: GpioHal> PowerSwitch for PowerController<'_, H> {
    type Error = PowerError<H::Error>;

    fn init(&mut self) -> Result<(), Self::Error> {
        PowerController::init(self)
    }

    fn deinit(&mut self) -> Result<(), Self::Error> {
        PowerController::deinit(self)
    }

    fn turn_on(&mut self) -> Result<(), Self::Error> {
        PowerController::turn_on(self)
    }

    fn turn_off(&mut self) -> Result<(), Self::Error> {
        PowerController::turn_off(self)
    }

    fn toggle(&mut self) -> Result<(), Self::Error> {
        PowerController::toggle(self)
    }

    fn set_drive_capability(&mut self, strength: DriveCapability) -> Result<(), Self::Error> {
        PowerController::set_drive_capability(self, strength)
    }

    fn is_on(&self) -> bool {
        self.is_on
    }

    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn pin(&self) -> PinNumber {
        self.config.pin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::{Cell, RefCell};
    use powerctl_hal::HalError;
    use proptest::prelude::*;

    const TEST_PIN: PinNumber = PinNumber(4);

    /// HAL call as seen by the mock
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Call {
        Reset(PinNumber),
        Configure(OutputConfig),
        SetLevel(PinNumber, bool),
        Drive(PinNumber, DriveCapability),
    }

    /// Mock GPIO HAL recording every call
    ///
    /// Each `fail_*` cell makes that operation fail until cleared.
    #[derive(Default)]
    struct MockHal {
        calls: RefCell<Vec<Call>>,
        fail_reset: Cell<Option<HalError>>,
        fail_configure: Cell<Option<HalError>>,
        fail_set_level: Cell<Option<HalError>>,
        fail_drive: Cell<Option<HalError>>,
    }

    impl MockHal {
        fn new() -> Self {
            Self::default()
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }

        fn clear(&self) {
            self.calls.borrow_mut().clear();
        }

        fn call_count(&self) -> usize {
            self.calls.borrow().len()
        }

        fn record(&self, call: Call, fail: &Cell<Option<HalError>>) -> Result<(), HalError> {
            self.calls.borrow_mut().push(call);
            match fail.get() {
                Some(e) => Err(e),
                None => Ok(()),
            }
        }
    }

    impl GpioHal for MockHal {
        type Error = HalError;

        fn reset_pin(&self, pin: PinNumber) -> Result<(), HalError> {
            self.record(Call::Reset(pin), &self.fail_reset)
        }

        fn configure(&self, config: &OutputConfig) -> Result<(), HalError> {
            self.record(Call::Configure(*config), &self.fail_configure)
        }

        fn set_level(&self, pin: PinNumber, level: bool) -> Result<(), HalError> {
            self.record(Call::SetLevel(pin, level), &self.fail_set_level)
        }

        fn set_drive_capability(
            &self,
            pin: PinNumber,
            strength: DriveCapability,
        ) -> Result<(), HalError> {
            self.record(Call::Drive(pin, strength), &self.fail_drive)
        }
    }

    fn init_calls(pin: PinNumber, level: bool) -> Vec<Call> {
        vec![
            Call::Reset(pin),
            Call::Configure(OutputConfig::push_pull(pin)),
            Call::SetLevel(pin, level),
        ]
    }

    #[test]
    fn test_new_touches_no_hardware() {
        let hal = MockHal::new();
        let pc = PowerController::new(&hal, TEST_PIN, true, true);

        assert!(!pc.is_initialized());
        assert!(!pc.is_on());
        assert_eq!(pc.pin(), TEST_PIN);
        assert!(pc.is_inverted());
        assert_eq!(hal.call_count(), 0);
    }

    #[test]
    fn test_normal_logic_init_off() {
        let hal = MockHal::new();
        let mut pc = PowerController::new(&hal, TEST_PIN, false, false);

        assert_eq!(pc.init(), Ok(()));
        assert_eq!(hal.calls(), init_calls(TEST_PIN, false));
        assert!(pc.is_initialized());
        assert!(!pc.is_on());
    }

    #[test]
    fn test_inverted_logic_init_on() {
        let hal = MockHal::new();
        let mut pc = PowerController::new(&hal, TEST_PIN, true, true);

        assert_eq!(pc.init(), Ok(()));
        // Inverted ON = physical LOW
        assert_eq!(hal.calls(), init_calls(TEST_PIN, false));
        assert!(pc.is_on());
    }

    #[test]
    fn test_init_with_initial_on() {
        let hal = MockHal::new();
        let mut pc = PowerController::new(&hal, TEST_PIN, false, true);

        assert_eq!(pc.init(), Ok(()));
        assert_eq!(hal.calls(), init_calls(TEST_PIN, true));
        assert!(pc.is_on());
    }

    #[test]
    fn test_init_is_idempotent() {
        let hal = MockHal::new();
        let mut pc = PowerController::new(&hal, TEST_PIN, false, false);

        assert_eq!(pc.init(), Ok(()));
        hal.clear();

        assert_eq!(pc.init(), Ok(()));
        assert_eq!(hal.call_count(), 0);
        assert!(pc.is_initialized());
    }

    #[test]
    fn test_init_fails_when_reset_fails() {
        let hal = MockHal::new();
        hal.fail_reset.set(Some(HalError::InvalidArg));
        let mut pc = PowerController::new(&hal, TEST_PIN, false, false);

        assert_eq!(pc.init(), Err(PowerError::Hal(HalError::InvalidArg)));
        // No configure, no level
        assert_eq!(hal.calls(), vec![Call::Reset(TEST_PIN)]);
        assert!(!pc.is_initialized());
    }

    #[test]
    fn test_init_fails_when_configure_fails() {
        let hal = MockHal::new();
        hal.fail_configure.set(Some(HalError::InvalidArg));
        let mut pc = PowerController::new(&hal, TEST_PIN, false, false);

        assert_eq!(pc.init(), Err(PowerError::Hal(HalError::InvalidArg)));
        assert_eq!(
            hal.calls(),
            vec![
                Call::Reset(TEST_PIN),
                Call::Configure(OutputConfig::push_pull(TEST_PIN)),
            ]
        );
        assert!(!pc.is_initialized());
    }

    #[test]
    fn test_init_fails_when_initial_level_fails() {
        let hal = MockHal::new();
        hal.fail_set_level.set(Some(HalError::Fail));
        let mut pc = PowerController::new(&hal, TEST_PIN, false, true);

        assert_eq!(pc.init(), Err(PowerError::Hal(HalError::Fail)));
        assert!(!pc.is_initialized());
        assert!(!pc.is_on());
        // Pin released again after the failed level write
        assert_eq!(
            hal.calls(),
            vec![
                Call::Reset(TEST_PIN),
                Call::Configure(OutputConfig::push_pull(TEST_PIN)),
                Call::SetLevel(TEST_PIN, true),
                Call::Reset(TEST_PIN),
            ]
        );
        assert_eq!(pc.turn_on(), Err(PowerError::NotInitialized));
    }

    #[test]
    fn test_init_retry_after_level_failure_applies_initial_level() {
        let hal = MockHal::new();
        hal.fail_set_level.set(Some(HalError::Fail));
        let mut pc = PowerController::new(&hal, TEST_PIN, false, true);
        assert!(pc.init().is_err());

        hal.fail_set_level.set(None);
        hal.clear();
        assert_eq!(pc.init(), Ok(()));
        assert_eq!(hal.calls(), init_calls(TEST_PIN, true));
        assert!(pc.is_initialized());
        assert!(pc.is_on());
    }

    #[test]
    fn test_init_after_failed_init_retries_hardware() {
        let hal = MockHal::new();
        hal.fail_configure.set(Some(HalError::Busy));
        let mut pc = PowerController::new(&hal, TEST_PIN, false, false);
        assert!(pc.init().is_err());

        hal.fail_configure.set(None);
        hal.clear();
        assert_eq!(pc.init(), Ok(()));
        assert_eq!(hal.calls(), init_calls(TEST_PIN, false));
    }

    #[test]
    fn test_normal_logic_turn_on_off() {
        let hal = MockHal::new();
        let mut pc = PowerController::new(&hal, TEST_PIN, false, false);
        pc.init().unwrap();
        hal.clear();

        assert_eq!(pc.turn_on(), Ok(()));
        assert!(pc.is_on());
        assert_eq!(pc.turn_off(), Ok(()));
        assert!(!pc.is_on());

        assert_eq!(
            hal.calls(),
            vec![
                Call::SetLevel(TEST_PIN, true),
                Call::SetLevel(TEST_PIN, false),
            ]
        );
    }

    #[test]
    fn test_inverted_logic_turn_on_off() {
        let hal = MockHal::new();
        let mut pc = PowerController::new(&hal, TEST_PIN, true, false);
        pc.init().unwrap();
        // Inverted OFF = physical HIGH
        assert_eq!(hal.calls(), init_calls(TEST_PIN, true));
        hal.clear();

        assert_eq!(pc.turn_on(), Ok(()));
        assert!(pc.is_on());
        assert_eq!(pc.turn_off(), Ok(()));
        assert!(!pc.is_on());

        assert_eq!(
            hal.calls(),
            vec![
                Call::SetLevel(TEST_PIN, false),
                Call::SetLevel(TEST_PIN, true),
            ]
        );
    }

    #[test]
    fn test_toggle() {
        let hal = MockHal::new();
        let mut pc = PowerController::new(&hal, TEST_PIN, false, false);
        pc.init().unwrap();
        hal.clear();

        assert_eq!(pc.toggle(), Ok(()));
        assert!(pc.is_on());
        assert_eq!(pc.toggle(), Ok(()));
        assert!(!pc.is_on());

        assert_eq!(
            hal.calls(),
            vec![
                Call::SetLevel(TEST_PIN, true),
                Call::SetLevel(TEST_PIN, false),
            ]
        );
    }

    #[test]
    fn test_control_fails_when_not_initialized() {
        let hal = MockHal::new();
        let mut pc = PowerController::new(&hal, TEST_PIN, false, false);

        assert_eq!(pc.turn_on(), Err(PowerError::NotInitialized));
        assert_eq!(pc.turn_off(), Err(PowerError::NotInitialized));
        assert_eq!(pc.toggle(), Err(PowerError::NotInitialized));
        assert_eq!(
            pc.set_drive_capability(DriveCapability::Strongest),
            Err(PowerError::NotInitialized)
        );
        assert_eq!(hal.call_count(), 0);
        assert!(!pc.is_on());
    }

    #[test]
    fn test_set_level_failure_keeps_state() {
        let hal = MockHal::new();
        let mut pc = PowerController::new(&hal, TEST_PIN, false, false);
        pc.init().unwrap();

        hal.fail_set_level.set(Some(HalError::InvalidArg));
        assert_eq!(pc.turn_on(), Err(PowerError::Hal(HalError::InvalidArg)));
        assert!(!pc.is_on());
        assert_eq!(pc.toggle(), Err(PowerError::Hal(HalError::InvalidArg)));
        assert!(!pc.is_on());
        assert!(pc.is_initialized());
    }

    #[test]
    fn test_set_drive_capability() {
        let hal = MockHal::new();
        let mut pc = PowerController::new(&hal, TEST_PIN, false, false);
        pc.init().unwrap();
        hal.clear();

        assert_eq!(pc.set_drive_capability(DriveCapability::Strongest), Ok(()));
        assert_eq!(
            hal.calls(),
            vec![Call::Drive(TEST_PIN, DriveCapability::Strongest)]
        );

        hal.fail_drive.set(Some(HalError::InvalidArg));
        assert_eq!(
            pc.set_drive_capability(DriveCapability::Weak),
            Err(PowerError::Hal(HalError::InvalidArg))
        );
        // State untouched by drive failures
        assert!(pc.is_initialized());
        assert!(!pc.is_on());
    }

    #[test]
    fn test_set_drive_capability_after_deinit() {
        let hal = MockHal::new();
        let mut pc = PowerController::new(&hal, TEST_PIN, false, false);
        pc.init().unwrap();
        pc.deinit().unwrap();
        hal.clear();

        assert_eq!(
            pc.set_drive_capability(DriveCapability::Medium),
            Err(PowerError::NotInitialized)
        );
        assert_eq!(hal.call_count(), 0);
    }

    #[test]
    fn test_deinit_forces_low_then_resets() {
        let hal = MockHal::new();
        // Inverted and ON: logical deinit would be HIGH, but deinit drives LOW
        let mut pc = PowerController::new(&hal, TEST_PIN, true, true);
        pc.init().unwrap();
        pc.turn_off().unwrap();
        hal.clear();

        assert_eq!(pc.deinit(), Ok(()));
        assert_eq!(
            hal.calls(),
            vec![Call::SetLevel(TEST_PIN, false), Call::Reset(TEST_PIN)]
        );
        assert!(!pc.is_initialized());
        assert!(!pc.is_on());
    }

    #[test]
    fn test_deinit_is_idempotent() {
        let hal = MockHal::new();
        let mut pc = PowerController::new(&hal, TEST_PIN, false, false);

        // Never initialized
        assert_eq!(pc.deinit(), Ok(()));
        assert_eq!(hal.call_count(), 0);

        pc.init().unwrap();
        assert_eq!(pc.deinit(), Ok(()));
        hal.clear();
        assert_eq!(pc.deinit(), Ok(()));
        assert_eq!(hal.call_count(), 0);
        assert!(!pc.is_initialized());
    }

    #[test]
    fn test_deinit_set_level_fails_reset_succeeds() {
        let hal = MockHal::new();
        let mut pc = PowerController::new(&hal, TEST_PIN, false, false);
        pc.init().unwrap();
        pc.turn_on().unwrap();
        hal.clear();

        hal.fail_set_level.set(Some(HalError::Fail));
        assert_eq!(pc.deinit(), Err(PowerError::Hal(HalError::Fail)));
        // Reset still attempted
        assert_eq!(
            hal.calls(),
            vec![Call::SetLevel(TEST_PIN, false), Call::Reset(TEST_PIN)]
        );
        assert!(!pc.is_initialized());
        assert!(!pc.is_on());
    }

    #[test]
    fn test_deinit_set_level_succeeds_reset_fails() {
        let hal = MockHal::new();
        let mut pc = PowerController::new(&hal, TEST_PIN, false, true);
        pc.init().unwrap();

        hal.fail_reset.set(Some(HalError::InvalidState));
        assert_eq!(pc.deinit(), Err(PowerError::Hal(HalError::InvalidState)));
        assert!(!pc.is_initialized());
        assert!(!pc.is_on());
    }

    #[test]
    fn test_deinit_complete_failure_returns_first_error() {
        let hal = MockHal::new();
        let mut pc = PowerController::new(&hal, TEST_PIN, false, false);
        pc.init().unwrap();

        hal.fail_set_level.set(Some(HalError::Fail));
        hal.fail_reset.set(Some(HalError::InvalidState));
        assert_eq!(pc.deinit(), Err(PowerError::Hal(HalError::Fail)));
        assert!(!pc.is_initialized());

        // Still a no-op afterwards
        hal.clear();
        assert_eq!(pc.deinit(), Ok(()));
        assert_eq!(hal.call_count(), 0);
    }

    #[test]
    fn test_reinit_after_deinit() {
        let hal = MockHal::new();
        let mut pc = PowerController::new(&hal, TEST_PIN, false, true);
        pc.init().unwrap();
        pc.deinit().unwrap();
        hal.clear();

        assert_eq!(pc.init(), Ok(()));
        assert_eq!(hal.calls(), init_calls(TEST_PIN, true));
        assert!(pc.is_on());
    }

    #[test]
    fn test_pin_is_stable() {
        let hal = MockHal::new();
        for (inverted, initial_on) in [(false, false), (false, true), (true, false), (true, true)] {
            let mut pc = PowerController::new(&hal, PinNumber(13), inverted, initial_on);
            assert_eq!(pc.pin(), PinNumber(13));
            pc.init().unwrap();
            assert_eq!(pc.pin(), PinNumber(13));
            pc.deinit().unwrap();
            assert_eq!(pc.pin(), PinNumber(13));
        }
    }

    #[test]
    fn test_multiple_instances_work_independently() {
        let hal = MockHal::new();
        let mut pc1 = PowerController::new(&hal, PinNumber(4), false, false);
        let mut pc2 = PowerController::new(&hal, PinNumber(5), true, true);

        pc1.init().unwrap();
        pc2.init().unwrap();
        assert!(!pc1.is_on());
        assert!(pc2.is_on());

        pc1.turn_on().unwrap();
        pc2.turn_off().unwrap();
        assert!(pc1.is_on());
        assert!(!pc2.is_on());

        pc1.deinit().unwrap();
        assert!(!pc1.is_initialized());
        assert!(pc2.is_initialized());
        assert!(!pc2.is_on());

        assert!(hal.calls().contains(&Call::SetLevel(PinNumber(5), true)));
    }

    #[test]
    fn test_power_switch_trait() {
        let hal = MockHal::new();
        let mut pc = PowerController::new(&hal, TEST_PIN, false, false);

        // Use trait methods through a generic function
        fn cycle<S: PowerSwitch>(s: &mut S) -> Result<(), S::Error> {
            s.init()?;
            s.set_on(true)?;
            assert!(s.is_on());
            s.set_on(false)?;
            assert!(s.is_off());
            s.deinit()
        }

        assert_eq!(cycle(&mut pc), Ok(()));
        assert!(!PowerSwitch::is_initialized(&pc));
    }

    proptest! {
        #[test]
        fn prop_level_follows_polarity(inverted in any::<bool>(), ops in prop::collection::vec(any::<bool>(), 1..32)) {
            let hal = MockHal::new();
            let mut pc = PowerController::new(&hal, TEST_PIN, inverted, false);
            pc.init().unwrap();

            for on in ops {
                hal.clear();
                if on { pc.turn_on().unwrap() } else { pc.turn_off().unwrap() }
                prop_assert_eq!(hal.calls(), vec![Call::SetLevel(TEST_PIN, on != inverted)]);
                prop_assert_eq!(pc.is_on(), on);
            }
        }

        #[test]
        fn prop_toggle_alternates(inverted in any::<bool>(), initial_on in any::<bool>(), count in 1usize..64) {
            let hal = MockHal::new();
            let mut pc = PowerController::new(&hal, TEST_PIN, inverted, initial_on);
            pc.init().unwrap();

            let mut expected = initial_on;
            for _ in 0..count {
                pc.toggle().unwrap();
                expected = !expected;
                prop_assert_eq!(pc.is_on(), expected);
            }
        }

        #[test]
        fn prop_deinit_always_uninitializes(
            inverted in any::<bool>(),
            initial_on in any::<bool>(),
            fail_level in any::<bool>(),
            fail_reset in any::<bool>(),
        ) {
            let hal = MockHal::new();
            let mut pc = PowerController::new(&hal, TEST_PIN, inverted, initial_on);
            pc.init().unwrap();

            hal.fail_set_level.set(fail_level.then_some(HalError::Fail));
            hal.fail_reset.set(fail_reset.then_some(HalError::Busy));
            let result = pc.deinit();

            prop_assert!(!pc.is_initialized());
            prop_assert!(!pc.is_on());
            let expected = if fail_level {
                Err(PowerError::Hal(HalError::Fail))
            } else if fail_reset {
                Err(PowerError::Hal(HalError::Busy))
            } else {
                Ok(())
            };
            prop_assert_eq!(result, expected);
        }
    }
}
