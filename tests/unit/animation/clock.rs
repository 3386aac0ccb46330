use super::*;

fn params(duration: &str, milestones: &[f64], start_at: &str) -> ClockParams {
    ClockParams::new(duration, milestones, milestones.len() + 1, start_at).unwrap()
}

fn fire(clock: &mut AnimationClock, sched: &mut ManualScheduler, ts: f64) -> Option<f64> {
    let handle = sched.take_next()?;
    clock.tick(handle, ts, sched)
}

#[test]
fn params_reject_bad_duration() {
    assert!(matches!(
        ClockParams::new("ten seconds", &[50.0], 2, ""),
        Err(FadeError::Animation(_))
    ));
    assert!(ClockParams::new("0s", &[100.0], 2, "").is_err());
}

#[test]
fn params_reject_degenerate_milestones() {
    assert!(ClockParams::new("10s", &[50.0], 3, "").is_err());
    assert!(ClockParams::new("10s", &[60.0, 30.0], 3, "").is_err());
    assert!(ClockParams::new("10s", &[0.0, 30.0], 3, "").is_err());
    assert!(ClockParams::new("10s", &[f64::NAN], 2, "").is_err());
}

#[test]
fn params_resolve_start_offset() {
    assert_eq!(params("10s", &[50.0], "").initial_offset_ms, 0.0);
    assert_eq!(params("10s", &[50.0], "25%").initial_offset_ms, 2_500.0);
    assert_eq!(params("10s", &[50.0], "4s").initial_offset_ms, 4_000.0);
    assert_eq!(params("10s", &[50.0], "later").initial_offset_ms, 0.0);
}

#[test]
fn position_wraps_every_cycle() {
    let p = params("10s", &[50.0, 100.0], "");
    assert_eq!(p.position_at(0.0), 0.0);
    assert_eq!(p.position_at(2_500.0), 25.0);
    assert_eq!(p.position_at(5_000.0), 50.0);
    assert_eq!(p.position_at(7_500.0), 75.0);
    assert_eq!(p.position_at(10_000.0), 0.0);
    assert_eq!(p.position_at(12_500.0), 25.0);
}

#[test]
fn hold_after_last_milestone() {
    let p = params("10s", &[40.0], "");
    assert_eq!(p.position_at(2_000.0), 50.0);
    assert_eq!(p.position_at(4_000.0), 100.0);
    assert_eq!(p.position_at(9_000.0), 100.0);
}

#[test]
fn first_tick_reflects_start_offset() {
    let mut sched = ManualScheduler::new();
    let mut clock = AnimationClock::new();
    clock.arm(params("10s", &[100.0], "50%"), &mut sched);

    assert_eq!(fire(&mut clock, &mut sched, 1_000.0), Some(50.0));
    assert_eq!(fire(&mut clock, &mut sched, 2_000.0), Some(60.0));
}

#[test]
fn at_most_one_tick_pending() {
    let mut sched = ManualScheduler::new();
    let mut clock = AnimationClock::new();
    clock.arm(params("1s", &[100.0], ""), &mut sched);
    assert_eq!(sched.pending().len(), 1);

    for i in 0..5 {
        fire(&mut clock, &mut sched, 16.0 * i as f64).unwrap();
        assert_eq!(sched.pending().len(), 1);
        assert_eq!(clock.pending(), sched.pending().first().copied());
    }
}

#[test]
fn disarm_cancels_pending_tick_and_ignores_stale_handles() {
    let mut sched = ManualScheduler::new();
    let mut clock = AnimationClock::new();
    clock.arm(params("1s", &[100.0], ""), &mut sched);
    let stale = sched.pending()[0];

    clock.disarm(&mut sched);
    assert!(!clock.is_armed());
    assert!(sched.pending().is_empty());
    assert_eq!(clock.tick(stale, 100.0, &mut sched), None);
    assert!(sched.pending().is_empty());
}

#[test]
fn rearm_restarts_from_offset() {
    let mut sched = ManualScheduler::new();
    let mut clock = AnimationClock::new();
    let p = params("10s", &[100.0], "");

    clock.arm(p.clone(), &mut sched);
    fire(&mut clock, &mut sched, 0.0);
    assert_eq!(fire(&mut clock, &mut sched, 3_000.0), Some(30.0));

    clock.disarm(&mut sched);
    clock.arm(p, &mut sched);
    assert_eq!(fire(&mut clock, &mut sched, 50_000.0), Some(0.0));
}

#[test]
fn identical_inputs_give_identical_sequences() {
    let run = || {
        let mut sched = ManualScheduler::new();
        let mut clock = AnimationClock::new();
        clock.arm(params("2.5s", &[20.0, 45.5, 80.0], "10%"), &mut sched);
        (0..200)
            .map(|i| fire(&mut clock, &mut sched, 1_000.0 + i as f64 * 16.667).unwrap())
            .collect::<Vec<_>>()
    };
    let a = run();
    let b = run();
    assert_eq!(a, b);

    let p = params("2.5s", &[20.0, 45.5, 80.0], "10%");
    for (i, pos) in a.iter().enumerate() {
        let elapsed = i as f64 * 16.667 + p.initial_offset_ms;
        assert!((pos - p.position_at(elapsed)).abs() <= 1e-9);
    }
}
