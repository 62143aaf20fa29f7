//! The per-tick orchestration function.
//!
//! `game_tick()` applies one hit to the current monster and, on a kill,
//! runs rewards, drops, the collection ledger and the floor state machine.
//! It returns a [`TickResult`] describing what happened; every event except
//! individual hits is also written to the state's combat log.

use super::balance::monsters_required;
use super::combat_log::LogKind;
use super::game_state::GameState;
use crate::collection::{record_kill, CollectionKey};
use crate::combat::{
    calculate_attack, gold_reward, roll_drops, spawn_boss, spawn_monster, xp_reward, CombatBonuses,
    Monster, MonsterKind,
};
use crate::companions::{add_card, CompanionId};
use crate::enhancement::essence_value;
use crate::floors::{
    complete_boss, record_farming_kill, roll_boss_skip, start_boss_battle, tick_boss_timer,
    FarmingOutcome,
};
use crate::items::{Grade, Item};
use crate::wallet::Currency;
use rand::Rng;

/// A single event produced by a game tick.
#[derive(Debug, Clone, PartialEq)]
pub enum TickEvent {
    // ── Combat ──────────────────────────────────────────────────
    PlayerAttack {
        damage: u64,
        was_crit: bool,
        message: String,
    },
    MonsterSpawned {
        kind: MonsterKind,
        name: String,
        message: String,
    },
    /// A rare or legendary monster escaped. Not an error; farming resumes.
    MonsterFled { name: String, message: String },
    MonsterDefeated {
        kind: MonsterKind,
        name: String,
        gold: u64,
        xp: u64,
        jackpot: bool,
        message: String,
    },

    // ── Loot ────────────────────────────────────────────────────
    ItemDropped {
        item_name: String,
        grade: Grade,
        message: String,
    },
    /// A drop was turned into essence on pickup, either because of the
    /// auto-disassemble setting or because the inventory was full.
    ItemAutoDisassembled {
        item_name: String,
        essence: u64,
        inventory_full: bool,
        message: String,
    },
    CurrencyDropped {
        currency: Currency,
        amount: u64,
        message: String,
    },
    CompanionCardFound {
        companion: CompanionId,
        unlocked: bool,
        message: String,
    },

    // ── Collection ──────────────────────────────────────────────
    MonsterCaptured { key: CollectionKey, message: String },

    // ── Progression ─────────────────────────────────────────────
    LeveledUp { new_level: u32, message: String },
    BossReady { floor: u32, message: String },
    BossBattleStarted {
        floor: u32,
        seconds: u32,
        message: String,
    },
    /// The boss-skip relic paid out the boss without a fight.
    BossSkipped { floor: u32, message: String },
    BossDefeated {
        floor: u32,
        advanced: bool,
        message: String,
    },
    BossTimedOut { floor: u32, message: String },
}

impl TickEvent {
    pub fn message(&self) -> &str {
        match self {
            TickEvent::PlayerAttack { message, .. }
            | TickEvent::MonsterSpawned { message, .. }
            | TickEvent::MonsterFled { message, .. }
            | TickEvent::MonsterDefeated { message, .. }
            | TickEvent::ItemDropped { message, .. }
            | TickEvent::ItemAutoDisassembled { message, .. }
            | TickEvent::CurrencyDropped { message, .. }
            | TickEvent::CompanionCardFound { message, .. }
            | TickEvent::MonsterCaptured { message, .. }
            | TickEvent::LeveledUp { message, .. }
            | TickEvent::BossReady { message, .. }
            | TickEvent::BossBattleStarted { message, .. }
            | TickEvent::BossSkipped { message, .. }
            | TickEvent::BossDefeated { message, .. }
            | TickEvent::BossTimedOut { message, .. } => message,
        }
    }

    /// Log category, or `None` for events too frequent to log.
    pub fn log_kind(&self) -> Option<LogKind> {
        match self {
            TickEvent::PlayerAttack { .. } => None,
            TickEvent::MonsterSpawned { kind, .. } => match kind {
                MonsterKind::Normal => None,
                _ => Some(LogKind::Combat),
            },
            TickEvent::MonsterFled { .. } | TickEvent::MonsterDefeated { .. } => {
                Some(LogKind::Combat)
            }
            TickEvent::ItemDropped { .. }
            | TickEvent::ItemAutoDisassembled { .. }
            | TickEvent::CurrencyDropped { .. }
            | TickEvent::CompanionCardFound { .. } => Some(LogKind::Loot),
            TickEvent::MonsterCaptured { .. } => Some(LogKind::Collection),
            TickEvent::LeveledUp { .. }
            | TickEvent::BossReady { .. }
            | TickEvent::BossBattleStarted { .. }
            | TickEvent::BossSkipped { .. }
            | TickEvent::BossDefeated { .. }
            | TickEvent::BossTimedOut { .. } => Some(LogKind::Progress),
        }
    }
}

/// Result of processing a single game tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickResult {
    /// Events produced during this tick, in chronological order.
    pub events: Vec<TickEvent>,
}

impl TickResult {
    pub fn killed(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, TickEvent::MonsterDefeated { .. }))
    }

    fn push(&mut self, state: &mut GameState, event: TickEvent) {
        if let Some(kind) = event.log_kind() {
            state.combat_log.push(kind, event.message());
        }
        self.events.push(event);
    }
}

fn spawn_farming_monster<R: Rng>(
    state: &mut GameState,
    bonuses: &CombatBonuses,
    now_ms: i64,
    rng: &mut R,
    result: &mut TickResult,
) {
    let monster = spawn_monster(
        state.player.current_floor,
        bonuses.rare_spawn_chance(),
        bonuses.legendary_spawn_chance(),
        bonuses.hp_reduction_percent(),
        now_ms,
        rng,
    );
    let message = match monster.kind {
        MonsterKind::Normal => format!("A {} appears", monster.name),
        kind => format!("A {} {} appears!", kind.name().to_lowercase(), monster.name),
    };
    result.push(
        state,
        TickEvent::MonsterSpawned {
            kind: monster.kind,
            name: monster.name.clone(),
            message,
        },
    );
    state.monster = Some(monster);
}

/// Puts a dropped item into the inventory, or turns it into essence.
fn receive_item(state: &mut GameState, item: Item, result: &mut TickResult) {
    let name = item.display_name();
    let grade = item.grade;
    let below_threshold = state
        .settings
        .auto_disassemble_grade
        .is_some_and(|max| item.grade <= max);

    let rejected = if below_threshold {
        Some((item, false))
    } else {
        state.inventory.insert(item).err().map(|item| (item, true))
    };

    match rejected {
        None => {
            let message = format!("Found {}", name);
            result.push(
                state,
                TickEvent::ItemDropped {
                    item_name: name,
                    grade,
                    message,
                },
            );
        }
        Some((item, inventory_full)) => {
            let essence = essence_value(&item);
            state.wallet.add(Currency::Essence, essence);
            state.forge.items_disassembled += 1;
            let reason = if inventory_full {
                "inventory full"
            } else {
                "auto-disassemble"
            };
            let message = format!("{} disassembled for {} essence ({})", name, essence, reason);
            result.push(
                state,
                TickEvent::ItemAutoDisassembled {
                    item_name: name,
                    essence,
                    inventory_full,
                    message,
                },
            );
        }
    }
}

/// Pays gold, experience and drops for `monster`.
fn grant_rewards<R: Rng>(
    state: &mut GameState,
    bonuses: &CombatBonuses,
    monster: &Monster,
    rng: &mut R,
    result: &mut TickResult,
) {
    let gold = gold_reward(bonuses, monster, rng);
    let xp = xp_reward(bonuses, monster.kind);
    state.wallet.add(Currency::Gold, gold.amount);
    state.player.total_kills += 1;

    let message = if gold.jackpot {
        format!("{} defeated! JACKPOT +{} gold, +{} XP", monster.name, gold.amount, xp)
    } else {
        format!("{} defeated: +{} gold, +{} XP", monster.name, gold.amount, xp)
    };
    result.push(
        state,
        TickEvent::MonsterDefeated {
            kind: monster.kind,
            name: monster.name.clone(),
            gold: gold.amount,
            xp,
            jackpot: gold.jackpot,
            message,
        },
    );

    let drops = roll_drops(bonuses, monster, rng);
    if let Some(item) = drops.item {
        receive_item(state, item, result);
    }
    if let Some(companion) = drops.companion_card {
        let unlocked = add_card(&mut state.companions, companion);
        let message = if unlocked {
            format!("New companion: {}!", companion.name())
        } else {
            format!("{} card found", companion.name())
        };
        result.push(
            state,
            TickEvent::CompanionCardFound {
                companion,
                unlocked,
                message,
            },
        );
    }
    for (currency, amount) in drops.currencies {
        state.wallet.add(currency, amount);
        result.push(
            state,
            TickEvent::CurrencyDropped {
                currency,
                amount,
                message: format!("+{} {}", amount, currency.name()),
            },
        );
    }

    let before = state.player.level;
    if state.player.apply_xp(xp) > 0 {
        let new_level = state.player.level;
        result.push(
            state,
            TickEvent::LeveledUp {
                new_level,
                message: format!("Level up! {} -> {}", before, new_level),
            },
        );
    }
}

/// Enters the boss on the current floor. The boss-skip relic may pay out the
/// boss immediately instead; otherwise the boss spawns and its timer starts.
pub fn enter_boss<R: Rng>(
    state: &mut GameState,
    bonuses: &CombatBonuses,
    now_ms: i64,
    rng: &mut R,
    result: &mut TickResult,
) {
    let floor = state.player.current_floor;
    if roll_boss_skip(bonuses.boss_skip_percent(), rng) {
        let boss = spawn_boss(floor, bonuses.hp_reduction_percent(), now_ms);
        result.push(
            state,
            TickEvent::BossSkipped {
                floor,
                message: format!("{} yields without a fight!", boss.name),
            },
        );
        grant_rewards(state, bonuses, &boss, rng, result);
        finish_boss(state, floor, result);
        spawn_farming_monster(state, bonuses, now_ms, rng, result);
        return;
    }

    let seconds = start_boss_battle(&mut state.player, bonuses.boss_time_bonus());
    let boss = spawn_boss(floor, bonuses.hp_reduction_percent(), now_ms);
    let message = format!("Boss {} challenges you! {}s on the clock", boss.name, seconds);
    state.monster = Some(boss);
    result.push(
        state,
        TickEvent::BossBattleStarted {
            floor,
            seconds,
            message,
        },
    );
}

fn finish_boss(state: &mut GameState, floor: u32, result: &mut TickResult) {
    let advanced = complete_boss(&mut state.player);
    let message = if advanced {
        format!("Floor {} cleared! Now on floor {}", floor, state.player.current_floor)
    } else {
        format!("Floor {} boss defeated (floor locked)", floor)
    };
    result.push(
        state,
        TickEvent::BossDefeated {
            floor,
            advanced,
            message,
        },
    );
}

fn on_kill<R: Rng>(
    state: &mut GameState,
    bonuses: &CombatBonuses,
    monster: Monster,
    now_ms: i64,
    rng: &mut R,
    result: &mut TickResult,
) {
    grant_rewards(state, bonuses, &monster, rng, result);

    if let Some(key) = monster.collection_key() {
        if record_kill(&mut state.ledger, key, rng) {
            result.push(
                state,
                TickEvent::MonsterCaptured {
                    key,
                    message: format!("{} captured for the collection!", monster.name),
                },
            );
        }
    }

    if monster.is_boss() {
        finish_boss(state, monster.floor, result);
        spawn_farming_monster(state, bonuses, now_ms, rng, result);
        return;
    }

    let floor = state.player.current_floor;
    let required = monsters_required(floor, bonuses.monster_reduction());
    let outcome = record_farming_kill(
        &mut state.player,
        required,
        bonuses.stage_skip_percent(),
        state.settings.auto_boss,
        rng,
    );
    match outcome {
        FarmingOutcome::Counting => spawn_farming_monster(state, bonuses, now_ms, rng, result),
        FarmingOutcome::BossReady => {
            result.push(
                state,
                TickEvent::BossReady {
                    floor,
                    message: format!("The floor {} boss awaits", floor),
                },
            );
            spawn_farming_monster(state, bonuses, now_ms, rng, result);
        }
        FarmingOutcome::EnterBoss => enter_boss(state, bonuses, now_ms, rng, result),
    }
}

/// Processes a single 100ms game tick.
///
/// RNG draws happen in a fixed order (spawn, hit, rewards, drops, capture,
/// stage skip, boss skip), so a seeded RNG reproduces a run exactly.
pub fn game_tick<R: Rng>(state: &mut GameState, now_ms: i64, rng: &mut R) -> TickResult {
    let mut result = TickResult::default();
    let bonuses = CombatBonuses::collect(state);

    let fled_name = state
        .monster
        .as_ref()
        .filter(|monster| monster.has_fled(now_ms))
        .map(|monster| monster.name.clone());
    let fled = fled_name.is_some() || state.monster.is_none();
    if let Some(name) = fled_name {
        let message = format!("The {} fled!", name);
        result.push(state, TickEvent::MonsterFled { name, message });
    }
    if fled {
        if state.player.in_boss_battle() {
            let boss = spawn_boss(
                state.player.current_floor,
                bonuses.hp_reduction_percent(),
                now_ms,
            );
            state.monster = Some(boss);
        } else {
            spawn_farming_monster(state, &bonuses, now_ms, rng, &mut result);
        }
    }

    let Some(monster) = state.monster.as_mut() else {
        return result;
    };
    let attack = calculate_attack(&bonuses, monster, rng);
    let killed = monster.take_damage(attack.damage);
    let message = if attack.was_crit {
        format!("CRIT {} on {}", attack.damage, monster.name)
    } else {
        format!("{} damage to {}", attack.damage, monster.name)
    };
    result.push(
        state,
        TickEvent::PlayerAttack {
            damage: attack.damage,
            was_crit: attack.was_crit,
            message,
        },
    );

    if killed {
        if let Some(monster) = state.monster.take() {
            on_kill(state, &bonuses, monster, now_ms, rng, &mut result);
        }
    }
    result
}

/// One second of the boss timer. On timeout the boss is abandoned, the
/// failed flag is set and a normal monster takes its place.
pub fn advance_boss_timer<R: Rng>(state: &mut GameState, now_ms: i64, rng: &mut R) -> TickResult {
    let mut result = TickResult::default();
    if !tick_boss_timer(&mut state.player) {
        return result;
    }
    let floor = state.player.current_floor;
    result.push(
        state,
        TickEvent::BossTimedOut {
            floor,
            message: format!("Time's up! The floor {} boss drove you back", floor),
        },
    );
    let bonuses = CombatBonuses::collect(state);
    spawn_farming_monster(state, &bonuses, now_ms, rng, &mut result);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::player::FloorState;
    use crate::core::balance::monster_hp;
    use crate::core::constants::*;
    use crate::relics::RelicId;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn strong_state() -> GameState {
        let mut state = GameState::default();
        state.player.base.attack = 1e12;
        state
    }

    #[test]
    fn test_first_tick_spawns_and_hits() {
        let mut state = GameState::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let result = game_tick(&mut state, 0, &mut rng);
        assert!(matches!(result.events[0], TickEvent::MonsterSpawned { .. }));
        assert!(result
            .events
            .iter()
            .any(|e| matches!(e, TickEvent::PlayerAttack { .. })));
        let monster = state.monster.as_ref().unwrap();
        assert!(monster.current_hp < monster.max_hp);
    }

    #[test]
    fn test_kill_pays_gold_and_counts() {
        let mut state = strong_state();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let result = game_tick(&mut state, 0, &mut rng);
        assert!(result.killed());
        assert!(state.wallet.balance(Currency::Gold) >= monster_hp(1));
        assert_eq!(state.player.total_kills, 1);
        assert_eq!(state.player.kills_on_floor, 1);
        assert!(state.monster.is_some());
    }

    #[test]
    fn test_one_hit_kill_pays_exact_rewards() {
        let mut state = GameState::default();
        state.player.base.attack = 100.0;
        state.player.base.crit_chance = 0.0;
        state.player.base.gold_bonus = 25.0;
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let monster = spawn_monster(1, 0.0, 0.0, 0.0, 0, &mut rng);
        assert_eq!(monster.kind, MonsterKind::Normal);
        assert_eq!(monster.max_hp, 100);
        state.monster = Some(monster);

        let result = game_tick(&mut state, 0, &mut rng);

        assert!(matches!(
            result.events[0],
            TickEvent::PlayerAttack {
                damage: 100,
                was_crit: false,
                ..
            }
        ));
        let defeated: Vec<(u64, u64)> = result
            .events
            .iter()
            .filter_map(|e| match e {
                TickEvent::MonsterDefeated { gold, xp, .. } => Some((*gold, *xp)),
                _ => None,
            })
            .collect();
        // 100 x (1 + 25/100)
        assert_eq!(defeated, vec![(125, XP_NORMAL_KILL as u64)]);
        assert_eq!(state.wallet.balance(Currency::Gold), 125);
        assert_eq!(state.player.kills_on_floor, 1);
        assert_eq!(state.player.total_kills, 1);
        assert_eq!(state.player.experience, XP_NORMAL_KILL as u64);
        assert_eq!(state.player.level, 1);
    }

    #[test]
    fn test_boss_entered_at_threshold() {
        let mut state = strong_state();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut now = 0;
        while !state.player.in_boss_battle() {
            game_tick(&mut state, now, &mut rng);
            now += TICK_INTERVAL_MS as i64;
            assert!(now < 10_000, "boss never started");
        }
        assert_eq!(state.player.kills_on_floor, 10);
        assert_eq!(state.player.boss_timer_seconds, BOSS_TIME_LIMIT_SECONDS);
        assert!(state.monster.as_ref().unwrap().is_boss());

        let result = game_tick(&mut state, now, &mut rng);
        assert!(result
            .events
            .iter()
            .any(|e| matches!(e, TickEvent::BossDefeated { advanced: true, .. })));
        assert_eq!(state.player.current_floor, 2);
        assert_eq!(state.player.highest_floor, 2);
        assert_eq!(state.player.kills_on_floor, 0);
        assert_eq!(state.player.floor_state, FloorState::Farming);
    }

    #[test]
    fn test_manual_boss_waits_when_auto_off() {
        let mut state = strong_state();
        state.settings.auto_boss = false;
        state.player.kills_on_floor = 9;
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let result = game_tick(&mut state, 0, &mut rng);
        assert!(result
            .events
            .iter()
            .any(|e| matches!(e, TickEvent::BossReady { .. })));
        assert_eq!(state.player.floor_state, FloorState::BossReady);
        assert!(!state.monster.as_ref().unwrap().is_boss());
    }

    #[test]
    fn test_boss_timeout_keeps_floor_and_kills() {
        let mut state = GameState::default();
        state.player.kills_on_floor = 10;
        state.player.current_floor = 3;
        state.player.highest_floor = 3;
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut result = TickResult::default();
        let bonuses = CombatBonuses::collect(&state);
        enter_boss(&mut state, &bonuses, 0, &mut rng, &mut result);
        assert!(state.player.in_boss_battle());

        for second in 1..BOSS_TIME_LIMIT_SECONDS {
            let result = advance_boss_timer(&mut state, second as i64 * 1000, &mut rng);
            assert!(result.events.is_empty());
        }
        let result = advance_boss_timer(&mut state, 30_000, &mut rng);
        assert!(matches!(result.events[0], TickEvent::BossTimedOut { floor: 3, .. }));
        assert_eq!(state.player.current_floor, 3);
        assert_eq!(state.player.kills_on_floor, 10);
        assert!(state.player.failed_boss_on_floor);
        assert!(!state.monster.as_ref().unwrap().is_boss());
    }

    #[test]
    fn test_boss_skip_pays_and_advances() {
        let mut state = GameState::default();
        state.relics.levels.insert(RelicId::PhantomKey, 30);
        let bonuses = CombatBonuses::collect(&state);
        let mut result = TickResult::default();
        let mut rng = rand::rngs::mock::StepRng::new(0, 0);
        enter_boss(&mut state, &bonuses, 0, &mut rng, &mut result);

        assert!(matches!(result.events[0], TickEvent::BossSkipped { floor: 1, .. }));
        assert_eq!(state.player.current_floor, 2);
        assert_eq!(state.player.bosses_defeated, 1);
        assert!(state.wallet.balance(Currency::Gold) > 0);
        assert!(!state.player.in_boss_battle());
    }

    #[test]
    fn test_rare_flees_after_window() {
        let mut state = GameState::default();
        state.player.base.attack = 1.0;
        state.player.base.crit_chance = 0.0;
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        game_tick(&mut state, 0, &mut rng);
        if let Some(monster) = state.monster.as_mut() {
            monster.kind = MonsterKind::Rare;
            monster.spawned_at_ms = 0;
        }
        let result = game_tick(&mut state, RARE_FLEE_WINDOW_MS, &mut rng);
        assert!(matches!(result.events[0], TickEvent::MonsterFled { .. }));
        assert_eq!(state.player.total_kills, 0);
        assert_eq!(state.monster.as_ref().unwrap().spawned_at_ms, RARE_FLEE_WINDOW_MS);
    }

    #[test]
    fn test_full_inventory_disassembles_drop() {
        let mut state = GameState::default();
        state.inventory.capacity = 0;
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let item = crate::items::generate_drop(1, false, &mut rng);
        let mut result = TickResult::default();
        receive_item(&mut state, item, &mut result);

        assert!(matches!(
            result.events[0],
            TickEvent::ItemAutoDisassembled { inventory_full: true, .. }
        ));
        assert!(state.inventory.is_empty());
        assert!(state.wallet.balance(Currency::Essence) > 0);
        assert!(state.combat_log.latest().unwrap().message.contains("inventory full"));
    }

    #[test]
    fn test_auto_disassemble_setting() {
        let mut state = GameState::default();
        state.settings.auto_disassemble_grade = Some(Grade::Mythic);
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let item = crate::items::generate_drop(1, false, &mut rng);
        let mut result = TickResult::default();
        receive_item(&mut state, item, &mut result);
        assert!(matches!(
            result.events[0],
            TickEvent::ItemAutoDisassembled { inventory_full: false, .. }
        ));
        assert_eq!(state.forge.items_disassembled, 1);
    }

    #[test]
    fn test_same_seed_same_run() {
        let run = |seed| {
            let mut state = GameState::default();
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            for i in 0..500 {
                game_tick(&mut state, i * TICK_INTERVAL_MS as i64, &mut rng);
            }
            state
        };
        assert_eq!(run(11), run(11));
    }
}
