//! Main simulation runner.
//!
//! Each run drives a real [`Simulation`] with a manual clock, one simulated
//! second at a time. Statistics are tracked externally from the tick events,
//! and a simple player policy (equip, spend, prestige) acts between seconds.

use super::config::SimConfig;
use super::report::SimReport;
use crate::character::skills::{PrestigeSkillId, SkillId};
use crate::combat::MonsterKind;
use crate::core::{ManualClock, Simulation, TickEvent};
use crate::items::{EquipmentSlot, Grade, Item};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::collections::BTreeMap;
use uuid::Uuid;

const STEP_MS: u64 = 1_000;

const SKILL_PRIORITY: [SkillId; 7] = [
    SkillId::Power,
    SkillId::Ferocity,
    SkillId::Precision,
    SkillId::Greed,
    SkillId::Wisdom,
    SkillId::Fortune,
    SkillId::Kinship,
];

const PRESTIGE_SKILL_PRIORITY: [PrestigeSkillId; 3] = [
    PrestigeSkillId::Might,
    PrestigeSkillId::Midas,
    PrestigeSkillId::Insight,
];

/// Statistics for one simulated session.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunStats {
    pub seed: u64,
    pub final_floor: u32,
    pub highest_floor: u32,
    pub final_level: u32,
    pub prestiges: u32,
    pub total_kills: u64,
    pub rare_kills: u64,
    pub legendary_kills: u64,
    pub monsters_fled: u64,
    pub bosses_defeated: u64,
    pub bosses_skipped: u64,
    pub boss_timeouts: u64,
    pub jackpots: u64,
    pub gold_earned: u64,
    pub items_dropped: u64,
    pub items_auto_disassembled: u64,
    pub items_equipped: u64,
    pub cards_found: u64,
    pub captures: u64,
    pub relic_fragments_earned: u64,
    /// First simulated second at which each floor was reached.
    pub floor_first_reached: BTreeMap<u32, u64>,
}

impl RunStats {
    fn new(seed: u64) -> Self {
        let mut stats = Self {
            seed,
            ..Default::default()
        };
        stats.floor_first_reached.insert(1, 0);
        stats
    }

    /// Fold one tick event into the counters.
    fn process_event(&mut self, event: &TickEvent, second: u64) {
        match event {
            TickEvent::MonsterDefeated {
                kind, gold, jackpot, ..
            } => {
                self.total_kills += 1;
                self.gold_earned += gold;
                if *jackpot {
                    self.jackpots += 1;
                }
                match kind {
                    MonsterKind::Rare => self.rare_kills += 1,
                    MonsterKind::Legendary => self.legendary_kills += 1,
                    MonsterKind::Normal | MonsterKind::Boss => {}
                }
            }
            TickEvent::MonsterFled { .. } => self.monsters_fled += 1,
            TickEvent::ItemDropped { .. } => self.items_dropped += 1,
            TickEvent::ItemAutoDisassembled { .. } => self.items_auto_disassembled += 1,
            TickEvent::CompanionCardFound { .. } => self.cards_found += 1,
            TickEvent::MonsterCaptured { .. } => self.captures += 1,
            TickEvent::BossSkipped { .. } => self.bosses_skipped += 1,
            TickEvent::BossTimedOut { .. } => self.boss_timeouts += 1,
            TickEvent::BossDefeated { floor, advanced, .. } => {
                self.bosses_defeated += 1;
                if *advanced {
                    self.floor_first_reached.entry(floor + 1).or_insert(second);
                }
            }
            _ => {}
        }
    }
}

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);
    let base_seed = config.seed.unwrap_or_else(rand::random);

    for run_idx in 0..config.num_runs {
        let seed = base_seed.wrapping_add(run_idx as u64);
        let run = simulate_single_run(config, seed);

        if config.verbosity >= 2 {
            println!(
                "Run {}/{} - Floor {} (best {}), Level {}, Kills {}, Bosses {}, Prestiges {}",
                run_idx + 1,
                config.num_runs,
                run.final_floor,
                run.highest_floor,
                run.final_level,
                run.total_kills,
                run.bosses_defeated,
                run.prestiges
            );
        }
        all_runs.push(run);
    }

    SimReport::from_runs(all_runs, config.sim_seconds)
}

/// Simulate one session for `config.sim_seconds` of game time.
pub fn simulate_single_run(config: &SimConfig, seed: u64) -> RunStats {
    let clock = ManualClock::new(0);
    let mut sim = Simulation::seeded(seed, Box::new(clock.clone()));
    let mut stats = RunStats::new(seed);
    let mut best_floor = 1;

    // A fresh simulation is never running, so this cannot fail.
    let _ = sim.start();

    for second in 1..=config.sim_seconds {
        clock.advance(STEP_MS as i64);
        for event in sim.advance(STEP_MS) {
            stats.process_event(&event, second);
        }
        best_floor = best_floor.max(sim.state().player.highest_floor);

        if config.auto_equip {
            stats.items_equipped += equip_upgrades(&mut sim);
        }
        if config.spend_points {
            spend_points(&mut sim);
        }
        if config.auto_prestige
            && sim.state().player.current_floor >= config.effective_prestige_floor()
        {
            if let Ok(outcome) = sim.prestige() {
                stats.prestiges += 1;
                stats.relic_fragments_earned += outcome.value.fragments;
            }
        }
    }

    let player = &sim.state().player;
    stats.final_floor = player.current_floor;
    stats.highest_floor = best_floor.max(player.highest_floor);
    stats.final_level = player.level;
    stats
}

/// Ranking used by the auto-equip policy: grade first, then item level.
fn item_score(item: &Item) -> (Grade, u32, u32) {
    (item.grade, item.item_level, item.enhance_level)
}

/// Equips every inventory item that beats its slot, then scraps the rest.
fn equip_upgrades(sim: &mut Simulation<ChaCha8Rng>) -> u64 {
    let state = sim.state();
    if state.inventory.is_empty() {
        return 0;
    }

    let mut best: BTreeMap<EquipmentSlot, (Uuid, (Grade, u32, u32))> = BTreeMap::new();
    for item in &state.inventory.items {
        let score = item_score(item);
        let beats_equipped = match state.equipment.get(item.slot) {
            Some(current) => score > item_score(current),
            None => true,
        };
        let beats_candidate = best.get(&item.slot).map_or(true, |(_, s)| score > *s);
        if beats_equipped && beats_candidate {
            best.insert(item.slot, (item.id, score));
        }
    }

    let mut equipped = 0;
    for (id, _) in best.into_values() {
        if sim.equip(id).is_ok() {
            equipped += 1;
        }
    }
    let _ = sim.disassemble_all(Grade::Mythic);
    equipped
}

/// Pours skill points, prestige points and relic fragments into a fixed
/// priority order.
fn spend_points(sim: &mut Simulation<ChaCha8Rng>) {
    if sim.state().player.skill_points > 0 {
        for id in SKILL_PRIORITY {
            while sim.upgrade_skill(id).is_ok() {}
        }
    }
    if sim.state().player.prestige_points > 0 {
        for id in PRESTIGE_SKILL_PRIORITY {
            while sim.upgrade_prestige_skill(id).is_ok() {}
        }
    }
    while sim.gacha().is_ok() {}
}
