//! Hardware abstraction traits for coil output, button input, the limit
//! switch, and the wall clock.
//!
//! This module defines the hardware interfaces that allow rs-feedz to work
//! across platforms (ESP32, desktop mocks, etc.).
//!
//! # Key Traits
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`CoilDriver`] | 4-output stepper coil bank |
//! | [`ButtonInput`] | Momentary jog button |
//! | [`LimitSwitch`] | Reverse-travel boundary switch |
//! | [`WallClock`] | UTC civil time, `None` until synchronized |
//! | [`DelayNs`] | Blocking millisecond sleep (from `embedded-hal`) |
//!
//! # Implementation
//!
//! For testing and desktop development, use the mock implementations from
//! [`crate::hal::mock`]. For ESP32 hardware, use the implementations from
//! `hal::esp32` (requires `esp32` feature).
//!
//! # Example
//!
//! ```rust
//! use rs_feedz::traits::CoilDriver;
//! use rs_feedz::hal::MockCoils;
//!
//! let mut coils = MockCoils::new();
//! coils.energize([true, false, false, false]).unwrap();
//! coils.release().unwrap();
//! assert_eq!(coils.level, [false; 4]);
//! ```

use crate::civil::CivilDateTime;

pub use embedded_hal::delay::DelayNs;

/// Stepper coil bank - abstracts the four digital coil driver outputs.
///
/// Implement this trait for your driver board (a ULN2003 for the 28BYJ-48,
/// or similar). One call writes all four outputs, so a phase pattern is
/// always applied as a unit.
///
/// # Implementation Notes
///
/// - `pattern[i] == true` energizes coil `i`
/// - [`release`](Self::release) must leave no coil energized; the
///   sequencer calls it after every move so the motor never draws holding
///   current
///
/// # Example Implementation
///
/// ```rust,ignore
/// use rs_feedz::traits::CoilDriver;
///
/// struct MyCoils { /* pin handles */ }
///
/// impl CoilDriver for MyCoils {
///     type Error = ();
///
///     fn energize(&mut self, pattern: [bool; 4]) -> Result<(), ()> {
///         // Write each output pin...
///         Ok(())
///     }
/// }
/// ```
pub trait CoilDriver {
    /// Error type for pin writes.
    type Error;

    /// Drive the four coil outputs to the given pattern.
    fn energize(&mut self, pattern: [bool; 4]) -> Result<(), Self::Error>;

    /// De-energize all coils.
    ///
    /// Default implementation writes the all-off pattern.
    fn release(&mut self) -> Result<(), Self::Error> {
        self.energize([false; 4])
    }
}

/// Momentary button input.
///
/// The physical buttons are active-low with pull-ups; platform
/// implementations normalize polarity so `true` always means "held down".
/// There is no debounce layer - the read granularity of the polling loop is
/// the only filtering.
pub trait ButtonInput {
    /// Returns true if the button is currently pressed.
    fn is_pressed(&mut self) -> bool;
}

/// Travel-boundary limit switch.
///
/// Sampled live during each reverse step; an engaged switch aborts the
/// remainder of the move. The switch state is never stored.
pub trait LimitSwitch {
    /// Returns true if the mechanism is pressing the switch.
    fn is_engaged(&mut self) -> bool;
}

/// Wall-clock source providing UTC civil time.
///
/// Returns `None` until the clock has been synchronized externally (SNTP on
/// ESP32). The controller treats an unsynchronized clock as "not feeding
/// time yet" rather than an error, so the loop keeps serving the manual
/// buttons while waiting for sync.
///
/// # Example
///
/// ```rust
/// use rs_feedz::traits::WallClock;
/// use rs_feedz::civil::CivilDateTime;
/// use rs_feedz::hal::MockWallClock;
///
/// let mut clock = MockWallClock::new();
/// assert!(clock.now_utc().is_none());
///
/// clock.set_fixed(CivilDateTime::new(2024, 6, 15, 12, 0, 0));
/// assert!(clock.now_utc().is_some());
/// ```
pub trait WallClock {
    /// Returns the current UTC civil time, or `None` if not yet synced.
    fn now_utc(&mut self) -> Option<CivilDateTime>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // CoilDriver Default Methods Tests
    // =========================================================================

    struct TestCoils {
        level: [bool; 4],
        energize_calls: usize,
    }

    impl TestCoils {
        fn new() -> Self {
            Self {
                level: [false; 4],
                energize_calls: 0,
            }
        }
    }

    impl CoilDriver for TestCoils {
        type Error = ();

        fn energize(&mut self, pattern: [bool; 4]) -> Result<(), ()> {
            self.level = pattern;
            self.energize_calls += 1;
            Ok(())
        }
    }

    #[test]
    fn coil_driver_release_default_impl() {
        let mut coils = TestCoils::new();
        coils.energize([true, true, false, false]).unwrap();
        assert_eq!(coils.level, [true, true, false, false]);

        coils.release().unwrap();

        assert_eq!(coils.level, [false; 4]);
        assert_eq!(coils.energize_calls, 2);
    }
}
