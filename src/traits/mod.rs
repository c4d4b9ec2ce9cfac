//! Trait definitions for hardware abstraction.
//!
//! This module defines the core abstractions that allow rs-feedz to run on
//! different hardware (ESP32, desktop mock):
//!
//! - [`CoilDriver`]: the four stepper coil outputs, written as one pattern
//! - [`ButtonInput`]: momentary jog buttons
//! - [`LimitSwitch`]: the reverse-travel boundary switch
//! - [`WallClock`]: externally synchronized UTC civil time
//! - [`DelayNs`]: the blocking sleep primitive (re-exported from
//!   `embedded-hal`)

pub mod hardware;

pub use hardware::*;
