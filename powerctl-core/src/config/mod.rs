//! Output configuration
//!
//! A power output is configured by three immutable values: the pin, its
//! polarity and the logical state to apply on `init`. Pins are written in
//! Klipper-style notation, `gpio4` for active-high and `!gpio4` for
//! active-low.

pub mod output;
#[cfg(feature = "toml")]
pub mod toml;

pub use output::*;
#[cfg(feature = "toml")]
pub use self::toml::{parse_outputs, NamedOutput, OutputsConfig};
