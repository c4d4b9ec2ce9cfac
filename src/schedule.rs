//! Once-per-day feed decision logic.
//!
//! This module provides [`ScheduleGuard`], which decides on every polling
//! tick whether the current local time calls for a scheduled feed, and
//! [`FeedingLedger`], the record that prevents a second feed on the same
//! calendar date.
//!
//! The guard is a pure decision: it mutates the ledger and returns a
//! [`FeedDecision`], and the controller issues the actual motor move when
//! the decision is [`FeedDecision::Fed`]. Nothing here is persisted - a
//! restart clears the ledger, which is accepted behavior for this device.
//!
//! # Example
//!
//! ```rust
//! use rs_feedz::schedule::{FeedDecision, FeedSchedule, ScheduleGuard};
//! use rs_feedz::civil::CivilDateTime;
//!
//! let mut guard = ScheduleGuard::new(FeedSchedule::new(22, 47), 10);
//!
//! let now = CivilDateTime::new(2024, 6, 15, 22, 47, 12);
//! assert_eq!(guard.check(now), FeedDecision::Fed);
//!
//! // A second poll in the same minute is caught by the per-day guard
//! assert_eq!(guard.check(now), FeedDecision::AlreadyFedToday);
//! ```

use crate::civil::{CivilDate, CivilDateTime};

/// The configured daily feed time, in local civil time.
///
/// Matching is exact to the minute: a feed fires only when a polling tick
/// samples the schedule's literal minute. With the 10-second idle poll this
/// is reliable, but a long manual jog spanning the target minute can miss
/// it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeedSchedule {
    /// Hour in 24-hour local time (0-23).
    pub hour: u8,
    /// Minute (0-59).
    pub minute: u8,
}

impl FeedSchedule {
    /// Creates a schedule for the given local hour and minute.
    pub const fn new(hour: u8, minute: u8) -> Self {
        Self { hour, minute }
    }

    /// Whether the given local time falls in the scheduled minute.
    #[inline]
    pub fn matches(&self, now_local: &CivilDateTime) -> bool {
        now_local.hour == self.hour && now_local.minute == self.minute
    }
}

/// Outcome of one scheduled-feed check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeedDecision {
    /// The schedule matched and a feed was recorded; the caller should move
    /// the motor now.
    Fed,
    /// A feed was already recorded for this calendar date.
    AlreadyFedToday,
    /// Not feeding time (or the clock is not synchronized yet).
    NotYet,
}

/// Record of scheduled feeds.
///
/// `daily_cap` is carried for observability only: the count is logged
/// against it but nothing enforces it.
#[derive(Clone, Copy, Debug)]
pub struct FeedingLedger {
    /// Date of the last scheduled feed, if any since boot.
    pub last_feed_date: Option<CivilDate>,
    /// Scheduled feeds since boot.
    pub feeding_count: u32,
    /// Informational daily cap (unenforced).
    pub daily_cap: u32,
}

impl FeedingLedger {
    /// An empty ledger with the given informational cap.
    pub const fn new(daily_cap: u32) -> Self {
        Self {
            last_feed_date: None,
            feeding_count: 0,
            daily_cap,
        }
    }
}

/// Daily-schedule gatekeeper.
///
/// Owns the schedule and the ledger; [`check`](Self::check) is called once
/// per polling tick with the zone-converted local time.
pub struct ScheduleGuard {
    schedule: FeedSchedule,
    ledger: FeedingLedger,
}

impl ScheduleGuard {
    /// Creates a guard with an empty ledger.
    pub const fn new(schedule: FeedSchedule, daily_cap: u32) -> Self {
        Self {
            schedule,
            ledger: FeedingLedger::new(daily_cap),
        }
    }

    /// Decide whether a scheduled feed is due at `now_local`.
    ///
    /// The per-day guard takes precedence: once a feed is recorded for a
    /// calendar date, every later check on that date returns
    /// [`FeedDecision::AlreadyFedToday`], even inside the scheduled minute.
    /// The date rolling over re-arms the guard, allowing exactly one
    /// scheduled feed per distinct calendar date.
    pub fn check(&mut self, now_local: CivilDateTime) -> FeedDecision {
        if self.ledger.last_feed_date == Some(now_local.date()) {
            return FeedDecision::AlreadyFedToday;
        }

        if self.schedule.matches(&now_local) {
            self.ledger.feeding_count += 1;
            self.ledger.last_feed_date = Some(now_local.date());
            return FeedDecision::Fed;
        }

        FeedDecision::NotYet
    }

    /// The configured feed time.
    pub fn schedule(&self) -> &FeedSchedule {
        &self.schedule
    }

    /// The feeding record.
    pub fn ledger(&self) -> &FeedingLedger {
        &self.ledger
    }
}

// ============================================================================
// Tests
// ============================================================================
