//! Power output traits
//!
//! These traits define the interface between application logic and
//! whatever drives the output underneath.

pub mod switch;

pub use switch::PowerSwitch;
