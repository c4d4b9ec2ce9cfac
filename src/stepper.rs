//! 4-phase stepper sequencing with limit-switch early abort.
//!
//! This module provides [`StepSequencer`], the leaf component that turns a
//! [`StepCommand`] into a timed sequence of coil energization patterns.
//!
//! # Overview
//!
//! The 28BYJ-48-class motor is driven wave-mode: one coil at a time, four
//! patterns per electrical cycle. Each step writes the current pattern,
//! advances the phase cursor (+1 forward, -1 reverse, mod 4), and sleeps
//! the inter-step interval. During reverse moves only, the limit switch is
//! sampled after each step; an engaged switch abandons the remaining steps.
//!
//! Stepping is open-loop: there is no feedback confirming motor position,
//! and a move never fails except for a hardware pin-write error. The limit
//! abort is an expected outcome, reported in [`MoveOutcome`], not an error.
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
//! let outcome = sequencer
//!     .run(StepCommand::forward(8), &mut delay, &mut limit)
//!     .unwrap();
//!
//! assert_eq!(outcome.steps_taken, 8);
//! assert!(!outcome.hit_limit);
//! // Coils are always released after a move
//! assert_eq!(sequencer.coils().level, [false; 4]);
//! ```

use crate::traits::{CoilDriver, DelayNs, LimitSwitch};

/// Wave-drive coil energization table: one coil active per step.
pub const PHASE_PATTERNS: [[bool; 4]; 4] = [
    [true, false, false, false],
    [false, true, false, false],
    [false, false, true, false],
    [false, false, false, true],
];

/// Default inter-step interval in milliseconds.
pub const DEFAULT_STEP_PERIOD_MS: u32 = 20;

/// A single motor move request.
///
/// Transient: produced by a button press or a feed decision and consumed
/// immediately by [`StepSequencer::run`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepCommand {
    /// Number of steps to issue.
    pub steps: u32,
    /// Direction: `true` steps the phase cursor backwards.
    pub reverse: bool,
}

impl StepCommand {
    /// A forward move of `steps` steps.
    pub const fn forward(steps: u32) -> Self {
        Self {
            steps,
            reverse: false,
        }
    }

    /// A reverse move of `steps` steps (limit switch armed).
    pub const fn reverse(steps: u32) -> Self {
        Self {
            steps,
            reverse: true,
        }
    }
}

/// What actually happened during a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Steps issued before the move ended.
    pub steps_taken: u32,
    /// Whether the limit switch cut the move short.
    pub hit_limit: bool,
}

/// 4-phase step sequencer.
///
/// Owns the coil bank and the step timing; the delay source and limit
/// switch are borrowed per move so the controller can share them across
/// components.
///
/// # Type Parameter
///
/// - `C`: The coil bank implementation ([`CoilDriver`] trait)
pub struct StepSequencer<C: CoilDriver> {
    coils: C,
    step_period_ms: u32,
}

impl<C: CoilDriver> StepSequencer<C> {
    /// Creates a sequencer with the default 20 ms step period.
    pub fn new(coils: C) -> Self {
        Self {
            coils,
            step_period_ms: DEFAULT_STEP_PERIOD_MS,
        }
    }

    /// Overrides the inter-step interval.
    pub fn with_step_period_ms(mut self, ms: u32) -> Self {
        self.step_period_ms = ms;
        self
    }

    /// Borrow the coil bank (state inspection in tests).
    pub fn coils(&self) -> &C {
        &self.coils
    }

    /// Execute a move command.
    ///
    /// Blocks for roughly `steps x step_period_ms`. The limit switch is
    /// sampled only while `cmd.reverse` is true; when it engages, the
    /// remaining steps are abandoned (not queued or retried).
    ///
    /// Whatever happens - completion, limit abort, or a pin-write error -
    /// the coil bank is released before this returns, so the motor never
    /// holds current.
    ///
    /// # Errors
    ///
    /// Only a coil pin write can fail; the error is the platform's
    /// ([`CoilDriver::Error`]).
    pub fn run(
        &mut self,
        cmd: StepCommand,
        delay: &mut impl DelayNs,
        limit: &mut impl LimitSwitch,
    ) -> Result<MoveOutcome, C::Error> {
        let driven = self.drive(cmd, delay, limit);
        let released = self.coils.release();
        let outcome = driven?;
        released?;
        Ok(outcome)
    }

    fn drive(
        &mut self,
        cmd: StepCommand,
        delay: &mut impl DelayNs,
        limit: &mut impl LimitSwitch,
    ) -> Result<MoveOutcome, C::Error> {
        let mut phase = 0usize;
        let mut taken = 0u32;
        let mut hit_limit = false;

        for _ in 0..cmd.steps {
            self.coils.energize(PHASE_PATTERNS[phase])?;
            phase = if cmd.reverse {
                (phase + PHASE_PATTERNS.len() - 1) % PHASE_PATTERNS.len()
            } else {
                (phase + 1) % PHASE_PATTERNS.len()
            };
            taken += 1;
            delay.delay_ms(self.step_period_ms);

            if cmd.reverse && limit.is_engaged() {
                log::info!("limit switch engaged during reverse, stopping motor");
                hit_limit = true;
                break;
            }
        }

        Ok(MoveOutcome {
            steps_taken: taken,
            hit_limit,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
