//! ESP32 hardware abstraction layer for the pet feeder.
//!
//! This module provides hardware implementations for an ESP32 dev board
//! driving a 28BYJ-48 stepper through a ULN2003 driver.
//!
//! # Hardware Configuration
//!
//! - **MCU**: ESP32 (WROOM-class dev board)
//! - **Motor**: 28BYJ-48 geared stepper + ULN2003 driver board
//! - **Inputs**: two momentary buttons (forward/reverse jog) and a
//!   lever-arm limit switch, all active-low with internal pull-ups
//!
//! The blocking sleep seam is `esp_idf_hal::delay::Delay`, which already
//! implements `embedded_hal::delay::DelayNs`; no wrapper is needed.
//!
//! # Pin Assignments
//!
//! See the [`pins`] module for GPIO assignments matching the feeder's
//! wiring.

mod buttons;
mod clock;
mod coils;

pub use buttons::{Esp32Button, Esp32LimitSwitch};
pub use clock::Esp32WallClock;
pub use coils::Esp32Coils;

#[cfg(feature = "wifi")]
mod wifi;
#[cfg(feature = "wifi")]
pub use wifi::Esp32Wifi;

/// Pin assignments for the feeder board.
///
/// These constants match the deployed wiring:
/// - ULN2003 inputs on GPIO33/25/27/14
/// - Jog buttons on GPIO22/23
/// - Limit switch on GPIO26
pub mod pins {
    // =========================================================================
    // Motor Control (ULN2003)
    // =========================================================================

    /// Coil 1 driver input (IN1 on ULN2003)
    pub const MOTOR_IN1: i32 = 33;

    /// Coil 2 driver input (IN2 on ULN2003)
    pub const MOTOR_IN2: i32 = 25;

    /// Coil 3 driver input (IN3 on ULN2003)
    pub const MOTOR_IN3: i32 = 27;

    /// Coil 4 driver input (IN4 on ULN2003)
    pub const MOTOR_IN4: i32 = 14;

    // =========================================================================
    // Buttons and Limit Switch
    // =========================================================================

    /// Forward jog button (active low)
    pub const BUTTON_FORWARD: i32 = 22;

    /// Reverse jog button (active low)
    pub const BUTTON_REVERSE: i32 = 23;

    /// Reverse-travel limit switch (active low)
    pub const LIMIT_SWITCH: i32 = 26;
}
