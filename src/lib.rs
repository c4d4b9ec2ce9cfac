//! # rs-feedz
//!
//! A stepper-driven pet feeder controller with a time-zone-aware daily
//! schedule and manual jog buttons.
//!
//! ## Features
//!
//! - **Hardware abstraction**: Traits for the coil bank, buttons, limit
//!   switch, and wall clock
//! - **Daily schedule**: Feeds once per calendar day at a configured local
//!   time, guarded against duplicates
//! - **Manual override**: Forward and reverse jog buttons, with a
//!   limit-switch cutoff bounding reverse travel
//! - **Open-loop stepping**: 4-phase coil sequencing with the coils always
//!   released after a move (no holding current)
//!
//! ## Architecture
//!
//! The crate is structured to allow testing on desktop without hardware:
//!
//! - `traits` - Hardware abstractions
//! - `stepper` - 4-phase step sequencing with limit-switch abort
//! - `civil` - Civil date/time fields and UTC-to-local conversion
//! - `schedule` - Once-per-day feed decision and ledger
//! - `feeder` - Main controller that ties everything together
//! - `hal` - Concrete implementations (mock for testing, esp32 for hardware)
//!
//! ## Example
//!
//! ```rust
//! use rs_feedz::{
//!     FeederController, FeedDecision, StepSequencer,
//!     civil::CivilDateTime,
//!     config::Config,
//!     hal::{MockButton, MockCoils, MockDelay, MockLimitSwitch, MockWallClock},
//! };
//!
//! // Feed schedule defaults to 22:47 local, US Central zone rule
//! let config = Config::default();
//!
//! let mut clock = MockWallClock::new();
//! // 2024-06-15 22:47 local is 2024-06-16 03:47 UTC under the daylight offset
//! clock.set_fixed(CivilDateTime::new(2024, 6, 16, 3, 47, 0));
//!
//! let sequencer = StepSequencer::new(MockCoils::new());
//! let mut controller = FeederController::new(
//!     sequencer,
//!     MockDelay::new(),
//!     MockButton::new(),
//!     MockButton::new(),
//!     MockLimitSwitch::new(),
//!     clock,
//!     &config,
//! );
//!
//! // One polling tick: buttons, then the scheduled-feed check
//! let outcome = controller.tick().unwrap();
//! assert_eq!(outcome.decision, FeedDecision::Fed);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

/// Civil date/time fields, epoch conversion, and the zone rule.
pub mod civil;
/// Shared configuration system for desktop and ESP32.
pub mod config;
/// Main feeder controller that coordinates buttons, schedule, and motor.
pub mod feeder;
/// Hardware abstraction layer with mock implementations for testing.
pub mod hal;
/// Once-per-day feed decision logic and the feeding ledger.
pub mod schedule;
/// 4-phase stepper sequencing with limit-switch early abort.
pub mod stepper;
/// Core traits for hardware abstraction.
pub mod traits;

// Re-exports for convenience
pub use civil::{CivilDate, CivilDateTime, ZoneRule};
pub use config::{Config, DeviceConfig, MotionConfig, ScheduleConfig, WifiConfig};
pub use feeder::{FeederController, TickOutcome};
pub use schedule::{FeedDecision, FeedSchedule, FeedingLedger, ScheduleGuard};
pub use stepper::{MoveOutcome, StepCommand, StepSequencer, PHASE_PATTERNS};
pub use traits::{ButtonInput, CoilDriver, DelayNs, LimitSwitch, WallClock};
