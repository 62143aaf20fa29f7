//! Integration test: drops → inventory → equipment → forge
//!
//! Items move between the inventory and the equipment slots without ever
//! being duplicated or lost.

use ascent::core::constants::INVENTORY_CAPACITY;
use ascent::core::{CommandError, GameState, ItemLocation, ManualClock, Simulation};
use ascent::items::{generate_item, EquipmentSlot, Grade, Item};
use ascent::wallet::Currency;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeSet;
use uuid::Uuid;

fn item(slot: EquipmentSlot, grade: Grade, seed: u64) -> Item {
    generate_item(slot, grade, 10, None, &mut ChaCha8Rng::seed_from_u64(seed))
}

fn sim_with(state: GameState) -> Simulation<ChaCha8Rng> {
    Simulation::new(state, ChaCha8Rng::seed_from_u64(4), Box::new(ManualClock::new(0)))
}

fn all_ids(state: &GameState) -> BTreeSet<Uuid> {
    state
        .inventory
        .items
        .iter()
        .chain(state.equipment.iter_equipped())
        .map(|item| item.id)
        .collect()
}

#[test]
fn test_equip_swap_keeps_every_item() {
    let mut state = GameState::default();
    let first = item(EquipmentSlot::Weapon, Grade::Common, 1);
    let second = item(EquipmentSlot::Weapon, Grade::Epic, 2);
    let ring = item(EquipmentSlot::Ring, Grade::Rare, 3);
    for it in [first.clone(), second.clone(), ring.clone()] {
        state.inventory.insert(it).unwrap();
    }
    let mut sim = sim_with(state);
    let ids = all_ids(sim.state());

    sim.equip(first.id).unwrap();
    sim.equip(ring.id).unwrap();
    sim.equip(second.id).unwrap();

    let state = sim.state();
    assert_eq!(all_ids(state), ids);
    assert_eq!(state.equipment.slot_of(second.id), Some(EquipmentSlot::Weapon));
    assert_eq!(state.equipment.slot_of(ring.id), Some(EquipmentSlot::Ring));
    assert!(state.inventory.get(first.id).is_some());

    sim.unequip(EquipmentSlot::Ring).unwrap();
    assert_eq!(all_ids(sim.state()), ids);
    assert!(matches!(
        sim.unequip(EquipmentSlot::Ring),
        Err(CommandError::NotFound(_))
    ));
}

#[test]
fn test_unequip_declined_when_inventory_full() {
    let mut state = GameState::default();
    state.equipment.equip(item(EquipmentSlot::Helmet, Grade::Rare, 9));
    for seed in 0..INVENTORY_CAPACITY as u64 {
        state
            .inventory
            .insert(item(EquipmentSlot::Boots, Grade::Common, 100 + seed))
            .unwrap();
    }
    let mut sim = sim_with(state);
    let before = sim.state().clone();

    assert!(matches!(
        sim.unequip(EquipmentSlot::Helmet),
        Err(CommandError::InvalidState(_))
    ));
    assert_eq!(sim.state(), &before);
}

#[test]
fn test_unknown_item_declined() {
    let mut sim = sim_with(GameState::default());
    assert!(matches!(sim.equip(Uuid::from_u128(5)), Err(CommandError::NotFound(_))));
    assert!(matches!(
        sim.disassemble(Uuid::from_u128(5)),
        Err(CommandError::NotFound(_))
    ));
}

#[test]
fn test_locked_items_survive_bulk_disassembly() {
    let mut state = GameState::default();
    let keep = item(EquipmentSlot::Gloves, Grade::Common, 1);
    let scrap = item(EquipmentSlot::Gloves, Grade::Common, 2);
    let too_good = item(EquipmentSlot::Gloves, Grade::Legendary, 3);
    for it in [keep.clone(), scrap.clone(), too_good.clone()] {
        state.inventory.insert(it).unwrap();
    }
    let mut sim = sim_with(state);

    assert!(sim.toggle_item_lock(ItemLocation::Inventory(keep.id)).unwrap().value);
    let summary = sim.disassemble_all(Grade::Epic).unwrap().value;

    assert_eq!(summary.items, 1);
    assert!(summary.essence > 0);
    let state = sim.state();
    assert_eq!(state.wallet.balance(Currency::Essence), summary.essence);
    assert_eq!(state.forge.items_disassembled, 1);
    assert!(state.inventory.get(keep.id).is_some());
    assert!(state.inventory.get(scrap.id).is_none());
    assert!(state.inventory.get(too_good.id).is_some());
}

#[test]
fn test_forge_on_equipped_item() {
    let mut state = GameState::default();
    let sword = item(EquipmentSlot::Weapon, Grade::Epic, 11);
    state.equipment.equip(sword.clone());
    state.wallet.add(Currency::Gold, 1_000_000);
    state.wallet.add(Currency::PotentialOrb, 1);
    let mut sim = sim_with(state);
    let slot = ItemLocation::Equipped(EquipmentSlot::Weapon);

    sim.enhance(slot, false).unwrap();
    assert_eq!(sim.state().forge.enhance_attempts, 1);

    sim.reroll(slot).unwrap();
    assert_eq!(sim.state().wallet.balance(Currency::PotentialOrb), 0);
    assert!(matches!(sim.reroll(slot), Err(CommandError::InsufficientResource { .. })));

    let equipped = sim.state().equipment.get(EquipmentSlot::Weapon).as_ref().unwrap();
    assert_eq!(equipped.id, sword.id);
    assert_eq!(equipped.grade, sword.grade);
}
