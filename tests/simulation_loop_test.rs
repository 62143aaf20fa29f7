//! Integration test: the engine driven by elapsed time
//!
//! Verifies scheduling, floor progression and seed determinism through the
//! public `Simulation` surface only.

use ascent::core::constants::COMBAT_LOG_CAPACITY;
use ascent::core::{LogKind, ManualClock, Simulation, TickEvent};
use rand_chacha::ChaCha8Rng;

fn new_sim(seed: u64) -> (Simulation<ChaCha8Rng>, ManualClock) {
    let clock = ManualClock::new(1_700_000_000_000);
    (Simulation::seeded(seed, Box::new(clock.clone())), clock)
}

/// Advances in one-second steps, like a host polling once per frame.
fn run_seconds(
    sim: &mut Simulation<ChaCha8Rng>,
    clock: &ManualClock,
    seconds: u64,
) -> Vec<TickEvent> {
    let mut events = Vec::new();
    for _ in 0..seconds {
        clock.advance(1_000);
        events.extend(sim.advance(1_000));
    }
    events
}

#[test]
fn test_fresh_session_starts_on_floor_one() {
    let (sim, _) = new_sim(1);
    let state = sim.state();
    assert!(!sim.is_running());
    assert_eq!(state.player.level, 1);
    assert_eq!(state.player.current_floor, 1);
    assert_eq!(state.player.highest_floor, 1);
    assert!(state.monster.is_none());
    assert!(state.combat_log.is_empty());
}

#[test]
fn test_time_before_start_is_discarded() {
    let (mut sim, clock) = new_sim(2);
    assert!(run_seconds(&mut sim, &clock, 30).is_empty());
    assert_eq!(sim.state().player.total_kills, 0);

    sim.start().unwrap();
    let events = run_seconds(&mut sim, &clock, 1);
    let hits = events
        .iter()
        .filter(|e| matches!(e, TickEvent::PlayerAttack { .. }))
        .count();
    assert_eq!(hits, 10);
}

#[test]
fn test_climbs_past_first_boss() {
    let (mut sim, clock) = new_sim(3);
    sim.start().unwrap();
    let events = run_seconds(&mut sim, &clock, 120);

    assert!(events.iter().any(|e| matches!(e, TickEvent::BossReady { floor: 1, .. })
        || matches!(e, TickEvent::BossBattleStarted { floor: 1, .. })));
    assert!(events
        .iter()
        .any(|e| matches!(e, TickEvent::BossDefeated { floor: 1, advanced: true, .. })));
    assert!(sim.state().player.highest_floor >= 2);
    assert!(sim.state().player.level > 1);
}

#[test]
fn test_stopping_freezes_progress() {
    let (mut sim, clock) = new_sim(4);
    sim.start().unwrap();
    run_seconds(&mut sim, &clock, 10);
    sim.stop().unwrap();
    assert!(sim.stop().is_err());

    let frozen = sim.state().player.clone();
    run_seconds(&mut sim, &clock, 60);
    assert_eq!(sim.state().player, frozen);
}

#[test]
fn test_same_seed_same_session() {
    let play = |seed| {
        let (mut sim, clock) = new_sim(seed);
        sim.start().unwrap();
        run_seconds(&mut sim, &clock, 300);
        sim.into_state()
    };
    let a = play(11);
    let b = play(11);
    assert_eq!(a, b);

    let c = play(12);
    assert_ne!(a.session_id, c.session_id);
}

#[test]
fn test_step_size_does_not_change_outcome() {
    let (mut coarse, coarse_clock) = new_sim(21);
    let (mut fine, fine_clock) = new_sim(21);
    coarse.start().unwrap();
    fine.start().unwrap();

    coarse_clock.advance(60_000);
    coarse.advance(60_000);
    for _ in 0..600 {
        fine_clock.advance(100);
        fine.advance(100);
    }

    assert_eq!(coarse.state().player, fine.state().player);
    assert_eq!(coarse.state().wallet, fine.state().wallet);
}

#[test]
fn test_combat_log_stays_bounded() {
    let (mut sim, clock) = new_sim(5);
    sim.start().unwrap();
    run_seconds(&mut sim, &clock, 600);

    let log = &sim.state().combat_log;
    assert!(log.len() <= COMBAT_LOG_CAPACITY);
    assert!(log.entries().any(|e| e.kind == LogKind::Combat));
    assert!(log.entries().all(|e| !e.message.is_empty()));
}
