//! Main feeder controller that ties everything together.
//!
//! This module provides [`FeederController`], the component that runs the
//! polling loop: manual-button checks, time observability, and the
//! scheduled-feed decision, delegating motor moves to
//! [`StepSequencer`](crate::stepper::StepSequencer) and schedule decisions
//! to [`ScheduleGuard`](crate::schedule::ScheduleGuard).
//!
//! # Overview
//!
//! Each tick, in strict order:
//!
//! 1. Poll the forward and reverse buttons; a press issues the
//!    corresponding jog immediately. After a reverse jog, an
//!    engaged limit switch triggers a small forward disengage move.
//! 2. Read the wall clock and log the UTC and zone-converted local time.
//! 3. Run the scheduled-feed check once; a `Fed` decision issues the
//!    dispense move.
//!
//! The loop is single-threaded and fully synchronous: a motor move blocks
//! everything else for its duration, and the limit switch is the only
//! mechanism that can shorten one. Button checks always precede the
//! schedule check within a tick, so a manual and a scheduled feed can never
//! interleave their step sequences.
//!
//! # Example
//!
//! ```rust
//! use rs_feedz::{Config, FeedDecision, FeederController, StepSequencer};
//! use rs_feedz::civil::CivilDateTime;
//! use rs_feedz::hal::{MockButton, MockCoils, MockDelay, MockLimitSwitch, MockWallClock};
//!
//! let mut clock = MockWallClock::new();
//! // 12:00 UTC in June is 07:00 local under the default US Central rule
//! clock.set_fixed(CivilDateTime::new(2024, 6, 15, 12, 0, 0));
//!
//! let mut controller = FeederController::new(
//!     StepSequencer::new(MockCoils::new()),
//!     MockDelay::new(),
//!     MockButton::new(),
//!     MockButton::new(),
//!     MockLimitSwitch::new(),
//!     clock,
//!     &Config::default(),
//! );
//!
//! let outcome = controller.tick().unwrap();
//! assert_eq!(outcome.decision, FeedDecision::NotYet);
//! assert!(outcome.scheduled_feed.is_none());
//! ```

use crate::civil::ZoneRule;
use crate::config::Config;
use crate::schedule::{FeedDecision, FeedSchedule, ScheduleGuard};
use crate::stepper::{MoveOutcome, StepCommand, StepSequencer};
use crate::traits::{ButtonInput, CoilDriver, DelayNs, LimitSwitch, WallClock};

/// Everything that happened during one polling tick.
///
/// Mostly useful for tests and observability; `run_forever` only looks at
/// [`decision`](Self::decision) to choose whether to idle-sleep.
#[derive(Clone, Copy, Debug)]
pub struct TickOutcome {
    /// Manual forward jog, if the forward button was pressed.
    pub manual_forward: Option<MoveOutcome>,
    /// Manual reverse jog, if the reverse button was pressed.
    pub manual_reverse: Option<MoveOutcome>,
    /// Disengage move issued after a reverse jog left the limit switch
    /// engaged.
    pub disengage: Option<MoveOutcome>,
    /// Scheduled dispense move, present exactly when `decision` is
    /// [`FeedDecision::Fed`].
    pub scheduled_feed: Option<MoveOutcome>,
    /// The schedule decision for this tick.
    pub decision: FeedDecision,
}

impl Default for TickOutcome {
    fn default() -> Self {
        Self {
            manual_forward: None,
            manual_reverse: None,
            disengage: None,
            scheduled_feed: None,
            decision: FeedDecision::NotYet,
        }
    }
}

/// Main feeder controller.
///
/// Owns the hardware handles and the schedule guard, and runs the
/// unbounded polling loop. This is the primary interface for running the
/// feeder.
///
/// # Type Parameters
///
/// - `C`: coil bank ([`CoilDriver`])
/// - `D`: sleep source ([`DelayNs`])
/// - `BF`/`BR`: forward/reverse buttons ([`ButtonInput`])
/// - `L`: limit switch ([`LimitSwitch`])
/// - `K`: wall clock ([`WallClock`])
pub struct FeederController<C, D, BF, BR, L, K>
where
    C: CoilDriver,
    D: DelayNs,
    BF: ButtonInput,
    BR: ButtonInput,
    L: LimitSwitch,
    K: WallClock,
{
    sequencer: StepSequencer<C>,
    delay: D,
    forward_button: BF,
    reverse_button: BR,
    limit: L,
    clock: K,
    guard: ScheduleGuard,
    zone: ZoneRule,
    feed_steps: u32,
    reverse_jog_steps: u32,
    disengage_steps: u32,
    idle_poll_ms: u32,
}

impl<C, D, BF, BR, L, K> FeederController<C, D, BF, BR, L, K>
where
    C: CoilDriver,
    D: DelayNs,
    BF: ButtonInput,
    BR: ButtonInput,
    L: LimitSwitch,
    K: WallClock,
{
    /// Creates a controller from its hardware handles and configuration.
    pub fn new(
        sequencer: StepSequencer<C>,
        delay: D,
        forward_button: BF,
        reverse_button: BR,
        limit: L,
        clock: K,
        config: &Config,
    ) -> Self {
        let schedule = FeedSchedule::new(config.schedule.feed_hour, config.schedule.feed_minute);
        Self {
            sequencer,
            delay,
            forward_button,
            reverse_button,
            limit,
            clock,
            guard: ScheduleGuard::new(schedule, config.schedule.daily_feed_cap),
            zone: config.schedule.zone,
            feed_steps: config.motion.feed_steps,
            reverse_jog_steps: config.motion.reverse_jog_steps,
            disengage_steps: config.motion.disengage_steps,
            idle_poll_ms: config.schedule.idle_poll_secs.saturating_mul(1_000),
        }
    }

    /// Run one polling tick: buttons, time log, scheduled-feed check.
    ///
    /// Does not idle-sleep; that is [`run_forever`](Self::run_forever)'s
    /// job, so tests can drive ticks back to back.
    ///
    /// # Errors
    ///
    /// Propagates a coil pin-write error from any motor move.
    pub fn tick(&mut self) -> Result<TickOutcome, C::Error> {
        let mut outcome = TickOutcome::default();

        // Buttons first, so a manual jog is never delayed by the schedule
        // check.
        if self.forward_button.is_pressed() {
            log::info!("forward button pressed, moving motor forward");
            outcome.manual_forward = Some(self.sequencer.run(
                StepCommand::forward(self.feed_steps),
                &mut self.delay,
                &mut self.limit,
            )?);
        }

        if self.reverse_button.is_pressed() {
            log::info!("reverse button pressed, moving motor in reverse");
            let jog = self.sequencer.run(
                StepCommand::reverse(self.reverse_jog_steps),
                &mut self.delay,
                &mut self.limit,
            )?;
            outcome.manual_reverse = Some(jog);

            // Back off an engaged switch so the next reverse jog can run.
            if self.limit.is_engaged() {
                log::info!("limit switch still engaged, moving forward to disengage");
                outcome.disengage = Some(self.sequencer.run(
                    StepCommand::forward(self.disengage_steps),
                    &mut self.delay,
                    &mut self.limit,
                )?);
            }
        }

        match self.clock.now_utc() {
            None => {
                log::warn!("wall clock not synchronized, skipping scheduled-feed check");
            }
            Some(utc) => {
                let local = self.zone.to_local(utc);
                log::info!("time: {} UTC / {} local", utc, local);

                outcome.decision = self.guard.check(local);
                match outcome.decision {
                    FeedDecision::Fed => {
                        let ledger = self.guard.ledger();
                        log::info!(
                            "feeding time reached at {}, dispensing (count {}/{})",
                            local,
                            ledger.feeding_count,
                            ledger.daily_cap
                        );
                        outcome.scheduled_feed = Some(self.sequencer.run(
                            StepCommand::forward(self.feed_steps),
                            &mut self.delay,
                            &mut self.limit,
                        )?);
                    }
                    FeedDecision::AlreadyFedToday => {
                        log::debug!("feeding already performed today");
                    }
                    FeedDecision::NotYet => {}
                }
            }
        }

        Ok(outcome)
    }

    /// Run the polling loop until process termination.
    ///
    /// Sleeps the configured idle interval after a tick whose decision was
    /// [`FeedDecision::NotYet`]; otherwise loops again immediately. Never
    /// returns except on a hardware pin error.
    pub fn run_forever(&mut self) -> Result<core::convert::Infallible, C::Error> {
        loop {
            let outcome = self.tick()?;
            if outcome.decision == FeedDecision::NotYet {
                self.delay.delay_ms(self.idle_poll_ms);
            }
        }
    }

    /// Borrow the step sequencer (state inspection in tests).
    pub fn sequencer(&self) -> &StepSequencer<C> {
        &self.sequencer
    }

    /// Borrow the schedule guard.
    pub fn guard(&self) -> &ScheduleGuard {
        &self.guard
    }
}
