//! The simulation engine: owns the state, the RNG and the clock, drives ticks
//! from elapsed time, and exposes every player command.
//!
//! All commands take `&mut self`, so two commands (or a command and a tick)
//! can never interleave. Successful commands are written to the combat log;
//! declined commands leave the state untouched.

use super::balance::monsters_required;
use super::clock::Clock;
use super::combat_log::LogKind;
use super::command::{CommandError, CommandResult, Outcome};
use super::constants::TICK_INTERVAL_MS;
use super::game_state::GameState;
use super::scheduler::Scheduler;
use super::tick::{advance_boss_timer, enter_boss, game_tick, TickEvent, TickResult};
use crate::character::prestige::{perform_prestige, PrestigeReward};
use crate::character::skills::{upgrade_prestige_skill, upgrade_skill, PrestigeSkillId, SkillId};
use crate::collection::{release, release_all, unlock_with_ticket, CollectionKey};
use crate::combat::CombatBonuses;
use crate::companions::{level_up_companion, set_active_companion, CompanionId};
use crate::enhancement::{self, DisassembleSummary, EnhanceResult};
use crate::floors::{can_enter_boss, go_down_floor, go_to_floor, toggle_floor_lock};
use crate::items::{equip_item, unequip_item, Equipment, EquipmentSlot, Grade, Inventory, Item};
use crate::relics::{gacha, upgrade_relic, RelicId};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

/// Addresses an item for the forge commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemLocation {
    Equipped(EquipmentSlot),
    Inventory(Uuid),
}

fn locate<'a>(
    equipment: &'a mut Equipment,
    inventory: &'a mut Inventory,
    location: ItemLocation,
) -> Result<&'a mut Item, CommandError> {
    match location {
        ItemLocation::Equipped(slot) => equipment
            .get_mut(slot)
            .as_mut()
            .ok_or_else(|| CommandError::not_found(format!("Nothing equipped in {}", slot.name()))),
        ItemLocation::Inventory(id) => inventory
            .get_mut(id)
            .ok_or_else(|| CommandError::not_found("Item not in inventory")),
    }
}

pub struct Simulation<R: Rng> {
    state: GameState,
    rng: R,
    clock: Box<dyn Clock>,
    running: bool,
    scheduler: Scheduler,
}

impl Simulation<ChaCha8Rng> {
    /// A fresh session whose id and every roll derive from `seed`.
    pub fn seeded(seed: u64, clock: Box<dyn Clock>) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let session_id = uuid::Builder::from_random_bytes(rng.gen()).into_uuid();
        Self::new(GameState::new(session_id), rng, clock)
    }
}

impl<R: Rng> Simulation<R> {
    pub fn new(state: GameState, rng: R, clock: Box<dyn Clock>) -> Self {
        Self {
            state,
            rng,
            clock,
            running: false,
            scheduler: Scheduler::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn into_state(self) -> GameState {
        self.state
    }

    /// Swaps in a loaded state. The simulation is stopped first.
    pub fn replace_state(&mut self, state: GameState) {
        self.running = false;
        self.scheduler.reset();
        self.state = state;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    fn now(&self) -> i64 {
        self.clock.now_millis()
    }

    fn log<T>(&mut self, result: CommandResult<T>) -> CommandResult<T> {
        if let Ok(outcome) = &result {
            self.state.combat_log.push(LogKind::System, outcome.message.clone());
            for note in &outcome.notes {
                self.state.combat_log.push(LogKind::System, note.clone());
            }
        }
        result
    }

    // ── Driver ──────────────────────────────────────────────────

    pub fn start(&mut self) -> CommandResult {
        if self.running {
            return Err(CommandError::invalid("Simulation already running"));
        }
        self.running = true;
        self.scheduler.reset();
        let result = Ok(Outcome::done("Simulation started"));
        self.log(result)
    }

    pub fn stop(&mut self) -> CommandResult {
        if !self.running {
            return Err(CommandError::invalid("Simulation not running"));
        }
        self.running = false;
        self.scheduler.reset();
        let result = Ok(Outcome::done("Simulation stopped"));
        self.log(result)
    }

    /// Feeds `elapsed_ms` of wall time to the scheduler and runs the work it
    /// releases. Within each 100ms slot, due ticks run before due timer
    /// steps, so a lethal hit wins over a simultaneous timeout.
    ///
    /// While stopped the elapsed time is discarded.
    pub fn advance(&mut self, elapsed_ms: u64) -> Vec<TickEvent> {
        let mut events = Vec::new();
        if !self.running {
            return events;
        }
        let end = self.now();
        let mut remaining = elapsed_ms;
        while remaining > 0 {
            let step = remaining.min(TICK_INTERVAL_MS);
            remaining -= step;
            let slot_time = end - remaining as i64;
            let due = self.scheduler.advance(step);
            for _ in 0..due.ticks {
                events.extend(game_tick(&mut self.state, slot_time, &mut self.rng).events);
            }
            for _ in 0..due.timer_steps {
                events.extend(advance_boss_timer(&mut self.state, slot_time, &mut self.rng).events);
            }
        }
        events
    }

    /// Runs one tick immediately, regardless of the running flag.
    pub fn tick(&mut self) -> TickResult {
        let now = self.now();
        game_tick(&mut self.state, now, &mut self.rng)
    }

    /// One boss-timer second. Exposed for drivers that keep their own cadence.
    pub fn advance_boss_timer(&mut self) -> TickResult {
        let now = self.now();
        advance_boss_timer(&mut self.state, now, &mut self.rng)
    }

    // ── Equipment ───────────────────────────────────────────────

    pub fn equip(&mut self, id: Uuid) -> CommandResult {
        let result = equip_item(&mut self.state.equipment, &mut self.state.inventory, id);
        self.log(result)
    }

    pub fn unequip(&mut self, slot: EquipmentSlot) -> CommandResult {
        let result = unequip_item(&mut self.state.equipment, &mut self.state.inventory, slot);
        self.log(result)
    }

    pub fn disassemble(&mut self, id: Uuid) -> CommandResult<u64> {
        let result =
            enhancement::disassemble(&mut self.state.inventory, id, &mut self.state.wallet);
        if result.is_ok() {
            self.state.forge.items_disassembled += 1;
        }
        self.log(result)
    }

    pub fn disassemble_all(&mut self, max_grade: Grade) -> CommandResult<DisassembleSummary> {
        let result = enhancement::disassemble_all(
            &mut self.state.inventory,
            max_grade,
            &mut self.state.wallet,
        );
        if let Ok(outcome) = &result {
            self.state.forge.items_disassembled += outcome.value.items as u32;
        }
        self.log(result)
    }

    pub fn toggle_item_lock(&mut self, location: ItemLocation) -> CommandResult<bool> {
        let item = locate(&mut self.state.equipment, &mut self.state.inventory, location)?;
        let locked = enhancement::toggle_item_lock(item);
        let message = format!(
            "{} {}",
            item.display_name(),
            if locked { "locked" } else { "unlocked" }
        );
        let result = Ok(Outcome::new(locked, message));
        self.log(result)
    }

    pub fn upgrade_level(&mut self, location: ItemLocation) -> CommandResult<bool> {
        let item = locate(&mut self.state.equipment, &mut self.state.inventory, location)?;
        let result = enhancement::upgrade_level(item, &mut self.state.wallet, &mut self.rng);
        if let Ok(outcome) = &result {
            self.state.forge.record_upgrade(outcome.value);
        }
        self.log(result)
    }

    pub fn awaken(&mut self, location: ItemLocation) -> CommandResult {
        let item = locate(&mut self.state.equipment, &mut self.state.inventory, location)?;
        let result = enhancement::awaken(item, &mut self.state.wallet);
        self.log(result)
    }

    pub fn enhance(
        &mut self,
        location: ItemLocation,
        use_protection: bool,
    ) -> CommandResult<EnhanceResult> {
        let item = locate(&mut self.state.equipment, &mut self.state.inventory, location)?;
        let result =
            enhancement::enhance(item, &mut self.state.wallet, use_protection, &mut self.rng);
        let level_after = item.enhance_level;
        if let Ok(outcome) = &result {
            self.state.forge.record_enhance(outcome.value, level_after);
        }
        self.log(result)
    }

    pub fn reroll(&mut self, location: ItemLocation) -> CommandResult {
        let item = locate(&mut self.state.equipment, &mut self.state.inventory, location)?;
        let result = enhancement::reroll_potentials(item, &mut self.state.wallet, &mut self.rng);
        self.log(result)
    }

    pub fn perfect(&mut self, location: ItemLocation, index: usize) -> CommandResult {
        let item = locate(&mut self.state.equipment, &mut self.state.inventory, location)?;
        let result = enhancement::perfect_stat(item, index, &mut self.state.wallet);
        self.log(result)
    }

    pub fn toggle_potential_lock(
        &mut self,
        location: ItemLocation,
        index: usize,
    ) -> CommandResult<bool> {
        let item = locate(&mut self.state.equipment, &mut self.state.inventory, location)?;
        let result = enhancement::toggle_potential_lock(item, index);
        self.log(result)
    }

    pub fn set_auto_disassemble(&mut self, max_grade: Option<Grade>) -> CommandResult {
        self.state.settings.auto_disassemble_grade = max_grade;
        let message = match max_grade {
            Some(grade) => format!("Auto-disassembling {} and below", grade.name()),
            None => "Auto-disassemble off".to_string(),
        };
        let result = Ok(Outcome::done(message));
        self.log(result)
    }

    // ── Floors ──────────────────────────────────────────────────

    /// Enters the boss by hand once the kill threshold is met.
    pub fn enter_boss_battle(&mut self) -> CommandResult {
        let bonuses = CombatBonuses::collect(&self.state);
        let required =
            monsters_required(self.state.player.current_floor, bonuses.monster_reduction());
        can_enter_boss(&self.state.player, required)?;

        let now = self.now();
        let mut result = TickResult::default();
        enter_boss(&mut self.state, &bonuses, now, &mut self.rng, &mut result);
        let floor = self.state.player.current_floor;
        let notes = result.events.iter().map(|e| e.message().to_string());
        let outcome =
            Ok(Outcome::done(format!("Entered the floor {} boss", floor)).with_notes(notes));
        self.log(outcome)
    }

    pub fn set_auto_boss(&mut self, enabled: bool) -> CommandResult {
        self.state.settings.auto_boss = enabled;
        let result = Ok(Outcome::done(if enabled { "Auto-boss on" } else { "Auto-boss off" }));
        self.log(result)
    }

    pub fn toggle_floor_lock(&mut self) -> CommandResult<bool> {
        let result = toggle_floor_lock(&mut self.state.player);
        self.log(result)
    }

    pub fn go_down_floor(&mut self) -> CommandResult<u32> {
        let result = go_down_floor(&mut self.state.player);
        if result.is_ok() {
            self.state.monster = None;
        }
        self.log(result)
    }

    pub fn go_to_floor(&mut self, floor: u32) -> CommandResult<u32> {
        let result = go_to_floor(&mut self.state.player, floor);
        if result.is_ok() {
            self.state.monster = None;
        }
        self.log(result)
    }

    pub fn prestige(&mut self) -> CommandResult<PrestigeReward> {
        let result = perform_prestige(&mut self.state);
        self.log(result)
    }

    // ── Collection ──────────────────────────────────────────────

    pub fn release(&mut self, key: CollectionKey) -> CommandResult {
        let result = release(&mut self.state.ledger, key, &mut self.state.wallet);
        self.log(result)
    }

    pub fn release_all(&mut self) -> CommandResult<usize> {
        let result = release_all(&mut self.state.ledger, &mut self.state.wallet);
        self.log(result)
    }

    pub fn unlock_with_ticket(&mut self, key: CollectionKey) -> CommandResult {
        let result = unlock_with_ticket(&mut self.state.ledger, key, &mut self.state.wallet);
        self.log(result)
    }

    // ── Relics ──────────────────────────────────────────────────

    pub fn gacha(&mut self) -> CommandResult<RelicId> {
        let result = gacha(&mut self.state.relics, &mut self.state.wallet, &mut self.rng);
        self.log(result)
    }

    pub fn upgrade_relic(&mut self, id: RelicId) -> CommandResult<u32> {
        let result = upgrade_relic(&mut self.state.relics, id, &mut self.state.wallet);
        self.log(result)
    }

    // ── Skills and companions ───────────────────────────────────

    pub fn upgrade_skill(&mut self, id: SkillId) -> CommandResult<u32> {
        let result = upgrade_skill(&mut self.state.skills, &mut self.state.player, id);
        self.log(result)
    }

    pub fn upgrade_prestige_skill(&mut self, id: PrestigeSkillId) -> CommandResult<u32> {
        let result = upgrade_prestige_skill(&mut self.state.skills, &mut self.state.player, id);
        self.log(result)
    }

    pub fn set_active_companion(&mut self, id: Option<CompanionId>) -> CommandResult {
        let result = set_active_companion(&mut self.state.companions, id);
        self.log(result)
    }

    pub fn level_companion(&mut self, id: CompanionId) -> CommandResult<u32> {
        let result = level_up_companion(&mut self.state.companions, id);
        self.log(result)
    }
}
