//! Edge-case tests for scheduling and motion

use rs_feedz::{
    civil::{CivilDateTime, ZoneRule},
    hal::{MockButton, MockCoils, MockDelay, MockLimitSwitch, MockWallClock},
    Config, FeedDecision, FeederController, MotionConfig, ScheduleConfig, StepSequencer,
};

fn quiet_buttons() -> (MockButton, MockButton) {
    (MockButton::new(), MockButton::new())
}

#[test]
fn clock_syncing_mid_run_arms_the_schedule() {
    // First two ticks the clock is still unsynced; then SNTP lands exactly
    // in the scheduled minute.
    let mut clock = MockWallClock::new();
    clock.queue_unsynced();
    clock.queue_unsynced();
    clock.queue(CivilDateTime::new(2024, 6, 16, 3, 47, 0)); // local 22:47

    let (fwd, rev) = quiet_buttons();
    let mut c = FeederController::new(
        StepSequencer::new(MockCoils::new()),
        MockDelay::new(),
        fwd,
        rev,
        MockLimitSwitch::new(),
        clock,
        &Config::default(),
    );

    assert_eq!(c.tick().unwrap().decision, FeedDecision::NotYet);
    assert_eq!(c.tick().unwrap().decision, FeedDecision::NotYet);
    assert_eq!(c.tick().unwrap().decision, FeedDecision::Fed);
    assert_eq!(c.guard().ledger().feeding_count, 1);
}

#[test]
fn winter_and_summer_offsets_hit_the_same_local_time() {
    // Schedule 06:00 local. In January that is 12:00 UTC (-6), in July
    // 11:00 UTC (-5).
    let config =
        Config::default().with_schedule(ScheduleConfig::default().with_feed_time(6, 0));

    let mut clock = MockWallClock::new();
    clock.queue(CivilDateTime::new(2024, 1, 15, 12, 0, 0));
    clock.queue(CivilDateTime::new(2024, 7, 15, 11, 0, 0));

    let (fwd, rev) = quiet_buttons();
    let mut c = FeederController::new(
        StepSequencer::new(MockCoils::new()),
        MockDelay::new(),
        fwd,
        rev,
        MockLimitSwitch::new(),
        clock,
        &config,
    );

    assert_eq!(c.tick().unwrap().decision, FeedDecision::Fed);
    assert_eq!(c.tick().unwrap().decision, FeedDecision::Fed);
    assert_eq!(c.guard().ledger().feeding_count, 2);
}

#[test]
fn offset_rolling_local_date_back_still_guards_per_local_day() {
    // 03:00 UTC on Jan 2 is 21:00 local on Jan 1. A feed recorded for
    // local Jan 1 must guard against this tick even though the UTC date
    // already rolled over.
    let config =
        Config::default().with_schedule(ScheduleConfig::default().with_feed_time(21, 0));

    let mut clock = MockWallClock::new();
    clock.queue(CivilDateTime::new(2024, 1, 2, 3, 0, 0)); // local Jan 1 21:00
    clock.queue(CivilDateTime::new(2024, 1, 2, 3, 0, 9)); // still local Jan 1

    let (fwd, rev) = quiet_buttons();
    let mut c = FeederController::new(
        StepSequencer::new(MockCoils::new()),
        MockDelay::new(),
        fwd,
        rev,
        MockLimitSwitch::new(),
        clock,
        &config,
    );

    assert_eq!(c.tick().unwrap().decision, FeedDecision::Fed);
    assert_eq!(
        c.guard().ledger().last_feed_date,
        Some(CivilDateTime::new(2024, 1, 1, 0, 0, 0).date())
    );
    assert_eq!(c.tick().unwrap().decision, FeedDecision::AlreadyFedToday);
}

#[test]
fn fixed_zone_schedules_against_utc() {
    // A UTC-pinned feeder: fixed zero offset, so local time is UTC
    let config = Config::default().with_schedule(
        ScheduleConfig::default()
            .with_feed_time(12, 0)
            .with_zone(ZoneRule::fixed(0)),
    );

    let mut clock = MockWallClock::new();
    clock.queue(CivilDateTime::new(2024, 6, 15, 12, 0, 30));

    let (fwd, rev) = quiet_buttons();
    let mut c = FeederController::new(
        StepSequencer::new(MockCoils::new()),
        MockDelay::new(),
        fwd,
        rev,
        MockLimitSwitch::new(),
        clock,
        &config,
    );

    assert_eq!(c.tick().unwrap().decision, FeedDecision::Fed);
}

#[test]
fn zero_feed_steps_still_releases_coils() {
    let config = Config::default().with_motion(MotionConfig::default().with_feed_steps(0));

    let mut clock = MockWallClock::new();
    clock.queue(CivilDateTime::new(2024, 6, 16, 3, 47, 0));

    let (fwd, rev) = quiet_buttons();
    let mut c = FeederController::new(
        StepSequencer::new(MockCoils::new()),
        MockDelay::new(),
        fwd,
        rev,
        MockLimitSwitch::new(),
        clock,
        &config,
    );

    let outcome = c.tick().unwrap();
    assert_eq!(outcome.decision, FeedDecision::Fed);
    assert_eq!(outcome.scheduled_feed.unwrap().steps_taken, 0);
    assert!(c.sequencer().coils().writes.is_empty());
    assert_eq!(c.sequencer().coils().releases, 1);
}

#[test]
fn both_buttons_pressed_runs_forward_then_reverse() {
    let mut fwd = MockButton::new();
    fwd.press_once();
    let mut rev = MockButton::new();
    rev.press_once();

    let mut clock = MockWallClock::new();
    clock.set_fixed(CivilDateTime::new(2024, 6, 15, 20, 0, 0));

    let mut c = FeederController::new(
        StepSequencer::new(MockCoils::new()),
        MockDelay::new(),
        fwd,
        rev,
        MockLimitSwitch::new(),
        clock,
        &Config::default(),
    );

    let outcome = c.tick().unwrap();
    assert_eq!(outcome.manual_forward.unwrap().steps_taken, 350);
    assert_eq!(outcome.manual_reverse.unwrap().steps_taken, 3200);

    // Forward jog writes come first: its first four patterns step the
    // cursor upward (coil 0, 1, 2, 3).
    let writes = &c.sequencer().coils().writes;
    assert_eq!(writes[0], [true, false, false, false]);
    assert_eq!(writes[1], [false, true, false, false]);
    // The reverse jog then starts over at coil 0 and walks downward.
    assert_eq!(writes[350], [true, false, false, false]);
    assert_eq!(writes[351], [false, false, false, true]);
}
