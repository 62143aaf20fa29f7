//! Integration test: meta progression through relics and the collection

use ascent::collection::{CollectionKey, CollectionKind, LedgerEntry};
use ascent::combat::CombatBonuses;
use ascent::core::{CommandError, GameState, ManualClock, Simulation};
use ascent::relics::RelicId;
use ascent::wallet::Currency;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn sim_with(state: GameState) -> Simulation<ChaCha8Rng> {
    Simulation::new(state, ChaCha8Rng::seed_from_u64(12), Box::new(ManualClock::new(0)))
}

fn captured(band: u32, index: u32) -> (CollectionKey, LedgerEntry) {
    (
        CollectionKey::new(band, CollectionKind::Rare, index),
        LedgerEntry {
            encounters: 3,
            unlocked: true,
            released: 0,
        },
    )
}

#[test]
fn test_gacha_spends_fragments_and_grants_new_relic() {
    let mut state = GameState::default();
    state.wallet.add(Currency::RelicFragment, 10);
    let mut sim = sim_with(state);

    let relic = sim.gacha().unwrap().value;
    let state = sim.state();
    assert_eq!(state.relics.level(relic), 1);
    assert_eq!(state.relics.owned_count(), 1);
    assert_eq!(state.relics.gacha_count, 1);
    assert_eq!(state.wallet.balance(Currency::RelicFragment), 0);

    let before = sim.state().clone();
    assert!(matches!(
        sim.gacha(),
        Err(CommandError::InsufficientResource { .. })
    ));
    assert_eq!(sim.state(), &before);
}

#[test]
fn test_relic_upgrade_requires_ownership() {
    let mut state = GameState::default();
    state.wallet.add(Currency::RelicFragment, 1_000);
    let mut sim = sim_with(state);

    assert!(matches!(
        sim.upgrade_relic(RelicId::BloodBlade),
        Err(CommandError::NotFound(_))
    ));

    let mut state = sim.state().clone();
    state.relics.levels.insert(RelicId::BloodBlade, 1);
    sim.replace_state(state);
    assert_eq!(sim.upgrade_relic(RelicId::BloodBlade).unwrap().value, 2);
    assert!(sim.state().wallet.balance(Currency::RelicFragment) < 1_000);
}

#[test]
fn test_release_all_pays_band_bonus_and_milestone() {
    let mut state = GameState::default();
    for index in 0..5 {
        let (key, entry) = captured(0, index);
        state.ledger.entries.insert(key, entry);
    }
    let mut sim = sim_with(state);

    let released = sim.release_all().unwrap();
    assert_eq!(released.value, 5);
    assert!(!released.notes.is_empty());

    let state = sim.state();
    assert_eq!(state.ledger.band_release_count(0), 5);
    assert_eq!(state.ledger.lifetime_releases, 5);
    assert_eq!(state.ledger.milestones_claimed, 1);
    assert!(state.wallet.balance(Currency::RelicFragment) > 0);

    let bonuses = CombatBonuses::collect(state);
    assert!(bonuses.collection.release_damage_percent(0) > 0.0);
    assert_eq!(bonuses.collection.release_damage_percent(1), 0.0);

    // Nothing left to release, and a second release of the same identity is refused
    assert!(sim.release_all().is_err());
    assert!(matches!(
        sim.release(CollectionKey::new(0, CollectionKind::Rare, 0)),
        Err(CommandError::AlreadyAtLimit(_))
    ));
}

#[test]
fn test_capture_ticket_unlocks_encountered_monster() {
    let key = CollectionKey::new(2, CollectionKind::Legendary, 1);
    let mut state = GameState::default();
    state.ledger.entries.insert(
        key,
        LedgerEntry {
            encounters: 1,
            unlocked: false,
            released: 0,
        },
    );
    let mut sim = sim_with(state);

    assert!(matches!(
        sim.unlock_with_ticket(key),
        Err(CommandError::InsufficientResource { .. })
    ));

    let mut state = sim.state().clone();
    state.wallet.add(Currency::CaptureTicket, 1);
    sim.replace_state(state);
    sim.unlock_with_ticket(key).unwrap();

    let state = sim.state();
    assert_eq!(state.ledger.unlocked_count(CollectionKind::Legendary), 1);
    assert_eq!(state.wallet.balance(Currency::CaptureTicket), 0);
    assert!(CombatBonuses::collect(state).collection.flat_attack > 0.0);

    let unknown = CollectionKey::new(9, CollectionKind::Boss, 0);
    assert!(matches!(
        sim.unlock_with_ticket(unknown),
        Err(CommandError::NotFound(_))
    ));
}
