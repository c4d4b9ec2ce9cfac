//! Integration tests for the feeder controller

use rs_feedz::{
    civil::CivilDateTime,
    hal::{MockButton, MockCoils, MockDelay, MockLimitSwitch, MockWallClock},
    Config, FeedDecision, FeederController, StepSequencer,
};

type MockController =
    FeederController<MockCoils, MockDelay, MockButton, MockButton, MockLimitSwitch, MockWallClock>;

fn controller(
    forward: MockButton,
    reverse: MockButton,
    limit: MockLimitSwitch,
    clock: MockWallClock,
) -> MockController {
    FeederController::new(
        StepSequencer::new(MockCoils::new()),
        MockDelay::new(),
        forward,
        reverse,
        limit,
        clock,
        &Config::default(),
    )
}

#[test]
fn scheduled_feed_end_to_end() {
    // Default schedule is 22:47 local, US Central. Local 22:47 on
    // 2024-06-15 is 03:47 UTC on 2024-06-16 under the daylight offset.
    let mut clock = MockWallClock::new();
    clock.queue(CivilDateTime::new(2024, 6, 16, 3, 47, 0));
    clock.queue(CivilDateTime::new(2024, 6, 16, 3, 48, 0)); // local 22:48, same day
    clock.queue(CivilDateTime::new(2024, 6, 17, 3, 47, 0)); // local 22:47, next day

    let mut c = controller(
        MockButton::new(),
        MockButton::new(),
        MockLimitSwitch::new(),
        clock,
    );

    // Tick 1: feeding time reached, one 350-step forward move
    let outcome = c.tick().unwrap();
    assert_eq!(outcome.decision, FeedDecision::Fed);
    let feed = outcome.scheduled_feed.unwrap();
    assert_eq!(feed.steps_taken, 350);
    assert!(!feed.hit_limit);
    assert_eq!(c.sequencer().coils().writes.len(), 350);
    assert_eq!(
        c.guard().ledger().last_feed_date,
        Some(CivilDateTime::new(2024, 6, 15, 0, 0, 0).date())
    );
    assert_eq!(c.guard().ledger().feeding_count, 1);

    // Tick 2: same local date, already fed, no move
    let outcome = c.tick().unwrap();
    assert_eq!(outcome.decision, FeedDecision::AlreadyFedToday);
    assert!(outcome.scheduled_feed.is_none());
    assert_eq!(c.sequencer().coils().writes.len(), 350);

    // Tick 3: next local date, feeds again
    let outcome = c.tick().unwrap();
    assert_eq!(outcome.decision, FeedDecision::Fed);
    assert_eq!(c.sequencer().coils().writes.len(), 700);
    assert_eq!(c.guard().ledger().feeding_count, 2);
    assert_eq!(
        c.guard().ledger().last_feed_date,
        Some(CivilDateTime::new(2024, 6, 16, 0, 0, 0).date())
    );
}

#[test]
fn forward_button_issues_one_feed_move() {
    let mut forward = MockButton::new();
    forward.press_once();

    // Mid-afternoon, nowhere near the schedule
    let mut clock = MockWallClock::new();
    clock.set_fixed(CivilDateTime::new(2024, 6, 15, 20, 0, 0));

    let mut c = controller(forward, MockButton::new(), MockLimitSwitch::new(), clock);

    let outcome = c.tick().unwrap();
    let jog = outcome.manual_forward.unwrap();
    assert_eq!(jog.steps_taken, 350);
    assert!(!jog.hit_limit);
    assert_eq!(outcome.decision, FeedDecision::NotYet);

    // A manual feed never touches the schedule ledger
    assert_eq!(c.guard().ledger().last_feed_date, None);
    assert_eq!(c.guard().ledger().feeding_count, 0);

    // Next tick: button released, nothing moves
    let outcome = c.tick().unwrap();
    assert!(outcome.manual_forward.is_none());
    assert_eq!(c.sequencer().coils().writes.len(), 350);
}

#[test]
fn reverse_button_runs_full_jog_when_limit_clear() {
    let mut reverse = MockButton::new();
    reverse.press_once();

    let mut clock = MockWallClock::new();
    clock.set_fixed(CivilDateTime::new(2024, 6, 15, 20, 0, 0));

    let mut c = controller(MockButton::new(), reverse, MockLimitSwitch::new(), clock);

    let outcome = c.tick().unwrap();
    let jog = outcome.manual_reverse.unwrap();
    assert_eq!(jog.steps_taken, 3200);
    assert!(!jog.hit_limit);
    assert!(outcome.disengage.is_none());
}

#[test]
fn reverse_jog_aborts_and_disengages() {
    let mut reverse = MockButton::new();
    reverse.press_once();

    // Limit engages on the 5th reverse step and stays pressed, so the
    // post-jog check sees it too.
    let mut limit = MockLimitSwitch::new();
    limit.script([false, false, false, false, true]);
    limit.hold(true);

    let mut clock = MockWallClock::new();
    clock.set_fixed(CivilDateTime::new(2024, 6, 15, 20, 0, 0));

    let mut c = controller(MockButton::new(), reverse, limit, clock);

    let outcome = c.tick().unwrap();
    let jog = outcome.manual_reverse.unwrap();
    assert_eq!(jog.steps_taken, 5);
    assert!(jog.hit_limit);

    // Forward disengage move follows, not bounded by the switch
    let disengage = outcome.disengage.unwrap();
    assert_eq!(disengage.steps_taken, 100);
    assert!(!disengage.hit_limit);

    // 5 reverse writes + 100 forward writes, coils left released
    assert_eq!(c.sequencer().coils().writes.len(), 105);
    assert_eq!(c.sequencer().coils().level, [false; 4]);
}

#[test]
fn manual_and_scheduled_feed_in_one_tick_stay_ordered() {
    let mut forward = MockButton::new();
    forward.press_once();

    let mut clock = MockWallClock::new();
    clock.queue(CivilDateTime::new(2024, 6, 16, 3, 47, 0)); // local 22:47

    let mut c = controller(forward, MockButton::new(), MockLimitSwitch::new(), clock);

    let outcome = c.tick().unwrap();
    // Button jog runs first, then the scheduled dispense; both complete
    assert_eq!(outcome.manual_forward.unwrap().steps_taken, 350);
    assert_eq!(outcome.decision, FeedDecision::Fed);
    assert_eq!(outcome.scheduled_feed.unwrap().steps_taken, 350);
    assert_eq!(c.sequencer().coils().writes.len(), 700);
}

#[test]
fn unsynced_clock_skips_schedule_check() {
    // Fresh clock reads None until SNTP would sync it
    let mut c = controller(
        MockButton::new(),
        MockButton::new(),
        MockLimitSwitch::new(),
        MockWallClock::new(),
    );

    let outcome = c.tick().unwrap();
    assert_eq!(outcome.decision, FeedDecision::NotYet);
    assert!(outcome.scheduled_feed.is_none());
    assert!(c.sequencer().coils().writes.is_empty());
    assert_eq!(c.guard().ledger().feeding_count, 0);
}

#[test]
fn double_poll_within_scheduled_minute_feeds_once() {
    let mut clock = MockWallClock::new();
    clock.queue(CivilDateTime::new(2024, 6, 16, 3, 47, 5));
    clock.queue(CivilDateTime::new(2024, 6, 16, 3, 47, 55));

    let mut c = controller(
        MockButton::new(),
        MockButton::new(),
        MockLimitSwitch::new(),
        clock,
    );

    assert_eq!(c.tick().unwrap().decision, FeedDecision::Fed);
    assert_eq!(c.tick().unwrap().decision, FeedDecision::AlreadyFedToday);
    assert_eq!(c.sequencer().coils().writes.len(), 350);
    assert_eq!(c.guard().ledger().feeding_count, 1);
}
