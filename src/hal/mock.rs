//! Mock implementations for testing without hardware.
//!
//! This module provides test doubles for all hardware traits, enabling
//! development and testing on desktop without physical hardware.
//!
//! # Available Mocks
//!
//! | Mock | Trait | Purpose |
//! |------|-------|---------|
//! | [`MockCoils`] | [`CoilDriver`] | Records every pattern write |
//! | [`MockButton`] | [`ButtonInput`] | Scripted press sequence |
//! | [`MockLimitSwitch`] | [`LimitSwitch`] | Scripted engage sequence |
//! | [`MockWallClock`] | [`WallClock`] | Scripted or fixed UTC readings |
//! | [`MockDelay`] | [`DelayNs`] | Accumulates requested sleep time |
//!
//! The scripted mocks return their queued readings in order, then fall
//! back to a held value, so a test can describe an entire tick sequence up
//! front before handing the mock to the controller.
//!
//! # Example
//!
//! ```rust
//! use rs_feedz::stepper::{StepCommand, StepSequencer};
//! use rs_feedz::hal::{MockCoils, MockDelay, MockLimitSwitch};
//!
//! let mut sequencer = StepSequencer::new(MockCoils::new());
//! let mut delay = MockDelay::new();
//! let mut limit = MockLimitSwitch::new();
//!
//! sequencer
//!     .run(StepCommand::forward(4), &mut delay, &mut limit)
//!     .unwrap();
//!
//! assert_eq!(sequencer.coils().writes.len(), 4);
//! assert_eq!(delay.total_ms(), 80);
//! ```
//!
//! [`CoilDriver`]: crate::traits::CoilDriver
//! [`ButtonInput`]: crate::traits::ButtonInput
//! [`LimitSwitch`]: crate::traits::LimitSwitch
//! [`WallClock`]: crate::traits::WallClock
//! [`DelayNs`]: crate::traits::DelayNs

use crate::civil::CivilDateTime;
use crate::traits::{ButtonInput, CoilDriver, DelayNs, LimitSwitch, WallClock};

extern crate alloc;
use alloc::vec::Vec;

/// Mock coil bank for testing.
///
/// Records every energize call for verification. Use the public fields to
/// inspect state after test operations.
///
/// # Example
///
/// ```rust
/// use rs_feedz::hal::MockCoils;
/// use rs_feedz::traits::CoilDriver;
///
/// let mut coils = MockCoils::new();
/// coils.energize([false, true, false, false]).unwrap();
///
/// assert_eq!(coils.level, [false, true, false, false]);
/// assert_eq!(coils.writes.len(), 1);
///
/// coils.release().unwrap();
/// assert_eq!(coils.level, [false; 4]);
/// assert_eq!(coils.releases, 1);
/// // release() is not counted as a pattern write
/// assert_eq!(coils.writes.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MockCoils {
    /// Current output level of the four coils.
    pub level: [bool; 4],
    /// Every pattern passed to `energize`, in order.
    pub writes: Vec<[bool; 4]>,
    /// Number of `release` calls.
    pub releases: usize,
}

impl MockCoils {
    /// Creates a new mock coil bank, all outputs low.
    pub fn new() -> Self {
        Self::default()
    }
}

impl CoilDriver for MockCoils {
    type Error = ();

    fn energize(&mut self, pattern: [bool; 4]) -> Result<(), ()> {
        self.level = pattern;
        self.writes.push(pattern);
        Ok(())
    }

    fn release(&mut self) -> Result<(), ()> {
        self.level = [false; 4];
        self.releases += 1;
        Ok(())
    }
}

/// Mock button for testing.
///
/// Returns scripted readings in order, then a held fallback value.
///
/// # Example
///
/// ```rust
/// use rs_feedz::hal::MockButton;
/// use rs_feedz::traits::ButtonInput;
///
/// let mut button = MockButton::new();
/// button.press_once();
///
/// assert!(button.is_pressed());
/// assert!(!button.is_pressed()); // released again
/// ```
#[derive(Debug, Default)]
pub struct MockButton {
    script: Vec<bool>,
    pos: usize,
    held: bool,
    /// Number of times the button has been polled.
    pub polls: usize,
}

impl MockButton {
    /// Creates a new mock button, not pressed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue readings to be returned in order.
    pub fn script(&mut self, readings: impl IntoIterator<Item = bool>) {
        self.script.extend(readings);
    }

    /// Queue a single pressed reading.
    pub fn press_once(&mut self) {
        self.script.push(true);
    }

    /// Set the fallback state used once the script is exhausted.
    pub fn hold(&mut self, pressed: bool) {
        self.held = pressed;
    }
}

impl ButtonInput for MockButton {
    fn is_pressed(&mut self) -> bool {
        self.polls += 1;
        match self.script.get(self.pos) {
            Some(&reading) => {
                self.pos += 1;
                reading
            }
            None => self.held,
        }
    }
}

/// Mock limit switch for testing.
///
/// Returns scripted readings in order, then a held fallback value. The
/// sample counter shows how often a move actually checked the switch.
///
/// # Example
///
/// ```rust
/// use rs_feedz::hal::MockLimitSwitch;
/// use rs_feedz::traits::LimitSwitch;
///
/// let mut limit = MockLimitSwitch::new();
/// limit.script([false, true]);
///
/// assert!(!limit.is_engaged());
/// assert!(limit.is_engaged());
/// assert!(!limit.is_engaged()); // script exhausted, falls back to clear
/// assert_eq!(limit.samples, 3);
/// ```
#[derive(Debug, Default)]
pub struct MockLimitSwitch {
    script: Vec<bool>,
    pos: usize,
    held: bool,
    /// Number of times the switch has been sampled.
    pub samples: usize,
}

impl MockLimitSwitch {
    /// Creates a new mock limit switch, disengaged.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue readings to be returned in order.
    pub fn script(&mut self, readings: impl IntoIterator<Item = bool>) {
        self.script.extend(readings);
    }

    /// Set the fallback state used once the script is exhausted.
    pub fn hold(&mut self, engaged: bool) {
        self.held = engaged;
    }
}

impl LimitSwitch for MockLimitSwitch {
    fn is_engaged(&mut self) -> bool {
        self.samples += 1;
        match self.script.get(self.pos) {
            Some(&reading) => {
                self.pos += 1;
                reading
            }
            None => self.held,
        }
    }
}

/// Mock wall clock for testing.
///
/// Returns queued readings in order, then a fixed fallback. A fresh clock
/// reads as unsynchronized (`None`).
///
/// # Example
///
/// ```rust
/// use rs_feedz::hal::MockWallClock;
/// use rs_feedz::traits::WallClock;
/// use rs_feedz::civil::CivilDateTime;
///
/// let mut clock = MockWallClock::new();
/// assert!(clock.now_utc().is_none());
///
/// clock.queue(CivilDateTime::new(2024, 6, 15, 12, 0, 0));
/// clock.set_fixed(CivilDateTime::new(2024, 6, 15, 12, 1, 0));
///
/// assert_eq!(clock.now_utc().unwrap().minute, 0); // queued reading first
/// assert_eq!(clock.now_utc().unwrap().minute, 1); // then the fixed one
/// ```
#[derive(Debug, Default)]
pub struct MockWallClock {
    readings: Vec<Option<CivilDateTime>>,
    pos: usize,
    fixed: Option<CivilDateTime>,
}

impl MockWallClock {
    /// Creates a new mock clock, unsynchronized.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a synchronized reading.
    pub fn queue(&mut self, t: CivilDateTime) {
        self.readings.push(Some(t));
    }

    /// Queue an unsynchronized reading.
    pub fn queue_unsynced(&mut self) {
        self.readings.push(None);
    }

    /// Set the fallback reading used once the queue is exhausted.
    pub fn set_fixed(&mut self, t: CivilDateTime) {
        self.fixed = Some(t);
    }
}

impl WallClock for MockWallClock {
    fn now_utc(&mut self) -> Option<CivilDateTime> {
        match self.readings.get(self.pos) {
            Some(&reading) => {
                self.pos += 1;
                reading
            }
            None => self.fixed,
        }
    }
}

/// Mock delay source for testing.
///
/// Accumulates requested sleep time instead of sleeping, so tests that
/// drive thousands of 20 ms steps finish instantly.
#[derive(Debug, Default)]
pub struct MockDelay {
    total_ns: u64,
}

impl MockDelay {
    /// Creates a new mock delay with no time accumulated.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total sleep requested so far, in milliseconds.
    pub fn total_ms(&self) -> u64 {
        self.total_ns / 1_000_000
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}

// ============================================================================
// Tests
// ============================================================================
