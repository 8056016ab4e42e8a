//! TOML output tables
//!
//! ```toml
//! [output.sensor_power]
//! pin = "!gpio4"
//! initial_on = true
//! drive = 3
//! ```
//!
//! `initial_on` defaults to `false`; `drive` is an optional drive strength
//! index (0 = weakest, 3 = strongest). Outputs come back sorted by name.

use alloc::collections::BTreeMap;
use alloc::string::String;

use heapless::{String as HString, Vec};
use powerctl_hal::DriveCapability;
use serde::Deserialize;

use super::output::{ConfigError, PowerConfig, MAX_NAME_LEN, MAX_OUTPUTS};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawOutput {
    pin: String,
    #[serde(default)]
    initial_on: bool,
    #[serde(default)]
    drive: Option<u8>,
}

#[derive(Debug, Deserialize)]
struct RawFile {
    #[serde(default)]
    output: BTreeMap<String, RawOutput>,
}

/// A named output entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedOutput {
    /// Output name (the `[output.<name>]` key)
    pub name: HString<MAX_NAME_LEN>,
    /// Pin, polarity and initial state
    pub config: PowerConfig,
    /// Drive strength to apply after init, if any
    pub drive: Option<DriveCapability>,
}

/// All outputs declared in a configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputsConfig {
    /// Declared outputs, sorted by name
    pub outputs: Vec<NamedOutput, MAX_OUTPUTS>,
}

impl OutputsConfig {
    /// Look up an output by name
    pub fn find(&self, name: &str) -> Option<&NamedOutput> {
        self.outputs.iter().find(|o| o.name.as_str() == name)
    }

    /// Number of declared outputs
    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    /// Check if no outputs are declared
    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }
}

impl RawOutput {
    fn into_parts(self) -> Result<(PowerConfig, Option<DriveCapability>), ConfigError> {
        let config = PowerConfig::from_pin_str(&self.pin)?.with_initial_on(self.initial_on);
        let drive = match self.drive {
            Some(index) => Some(DriveCapability::from_index(index).ok_or(ConfigError::InvalidDrive)?),
            None => None,
        };
        Ok((config, drive))
    }
}

impl PowerConfig {
    /// Parse a single output table (`pin`, optional `initial_on`)
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        let raw: RawOutput = ::toml::from_str(input).map_err(|_| ConfigError::Syntax)?;
        raw.into_parts().map(|(config, _)| config)
    }
}

/// Parse every `[output.<name>]` table in a configuration file
pub fn parse_outputs(input: &str) -> Result<OutputsConfig, ConfigError> {
    let raw: RawFile = ::toml::from_str(input).map_err(|_| ConfigError::Syntax)?;

    let mut config = OutputsConfig::default();
    for (name, output) in raw.output {
        let name = HString::try_from(name.as_str()).map_err(|_| ConfigError::NameTooLong)?;
        let (power, drive) = output.into_parts()?;
        config
            .outputs
            .push(NamedOutput {
                name,
                config: power,
                drive,
            })
            .map_err(|_| ConfigError::TooManyOutputs)?;
    }

    Ok(config)
}
