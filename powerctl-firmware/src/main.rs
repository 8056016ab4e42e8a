//! Powerctl demo firmware
//!
//! Drives the output declared in `power.toml` through a repeating cycle:
//! init, ON for two seconds, OFF, deinit, pause. On a Pico with the default
//! config this blinks the on-board LED (GPIO 25).
//!
//! Deinitializing between cycles leaves the pin high-impedance, which is
//! what a low-power application wants while the load is unused.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_time::Timer;
use {defmt_rtt as _, panic_probe as _};

use powerctl_core::{DriveCapability, PinNumber, PowerConfig, PowerController, PowerSwitch};
use powerctl_hal_rp2040::Rp2040Gpio;

// OUTPUT_NAME, OUTPUT, OUTPUT_DRIVE and take_output_pin!
include!(concat!(env!("OUT_DIR"), "/power_output.rs"));

/// Time the output stays ON per cycle
const ON_TIME_MS: u64 = 2000;

/// Time the output stays OFF before deinit
const OFF_TIME_MS: u64 = 1000;

/// Pause between cycles (pin released)
const CYCLE_PAUSE_MS: u64 = 3000;

/// Back-off after a failed init
const RETRY_DELAY_MS: u64 = 5000;

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Powerctl firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let mut gpio: Rp2040Gpio<'static, 1> = Rp2040Gpio::new();
    if let Err(e) = gpio.register(OUTPUT.pin, take_output_pin!(p)) {
        error!("Cannot register {} for output '{}': {}", OUTPUT.pin, OUTPUT_NAME, e);
        loop {
            Timer::after_secs(60).await;
        }
    }

    let mut power = PowerController::from_config(&gpio, OUTPUT);
    info!(
        "Output '{}' on {} (inverted={}, initial_on={})",
        OUTPUT_NAME, OUTPUT.pin, OUTPUT.inverted, OUTPUT.initial_on
    );

    loop {
        info!("--- New cycle ---");
        match run_cycle(&mut power, OUTPUT_DRIVE).await {
            Ok(()) => {
                info!("Cycle completed, waiting {} ms", CYCLE_PAUSE_MS);
                Timer::after_millis(CYCLE_PAUSE_MS).await;
            }
            Err(e) => {
                error!("Cycle failed: {}", e);
                // Leave the pin released before retrying
                if let Err(e) = power.deinit() {
                    warn!("Deinit after failure reported: {}", e);
                }
                Timer::after_millis(RETRY_DELAY_MS).await;
            }
        }
    }
}

/// One init → ON → OFF → deinit pass
async fn run_cycle<S>(power: &mut S, drive: Option<DriveCapability>) -> Result<(), S::Error>
where
    S: PowerSwitch,
    S::Error: Format,
{
    power.init()?;

    if let Some(strength) = drive {
        power.set_drive_capability(strength)?;
    }

    info!("Turning ON...");
    power.turn_on()?;
    Timer::after_millis(ON_TIME_MS).await;

    info!("Turning OFF...");
    power.turn_off()?;
    Timer::after_millis(OFF_TIME_MS).await;

    info!("Deinitializing...");
    power.deinit()
}
