use super::types::{CompanionId, CompanionProgress, CompanionSpecial, Companions};
use crate::core::command::{CommandError, CommandResult, Outcome, Resource};
use crate::core::constants::{COMPANION_ATTACK_PER_LEVEL, MAX_COMPANION_LEVEL};
use crate::items::drops::roll_companion_grade;
use crate::items::Grade;
use rand::Rng;

/// What the active companion adds to combat and rewards.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CompanionBonuses {
    pub attack: f64,
    pub crit_chance: f64,
    pub gold_percent: f64,
    pub xp_percent: f64,
    pub stage_skip: f64,
    pub special: Option<CompanionSpecial>,
}

impl CompanionBonuses {
    pub fn from_companions(companions: &Companions) -> Self {
        let Some(id) = companions.active else {
            return Self::default();
        };
        let Some(progress) = companions.owned.get(&id) else {
            return Self::default();
        };
        let def = id.def();
        Self {
            attack: companion_attack(def.attack, progress.level),
            crit_chance: def.crit_chance,
            gold_percent: def.gold_percent,
            xp_percent: def.xp_percent,
            stage_skip: def.stage_skip,
            special: def.special,
        }
    }
}

pub fn companion_attack(base: f64, level: u32) -> f64 {
    base * (1.0 + COMPANION_ATTACK_PER_LEVEL * level.saturating_sub(1) as f64)
}

/// Picks which companion a dropped card belongs to.
pub fn roll_card<R: Rng>(rng: &mut R) -> CompanionId {
    let grade = roll_companion_grade(rng);
    let mut pool = CompanionId::of_grade(grade);
    if pool.is_empty() {
        pool = CompanionId::of_grade(Grade::Common);
    }
    pool[rng.gen_range(0..pool.len())]
}

/// Adds a card. The first card of a companion unlocks it at level 1.
/// Returns true if this card unlocked a new companion.
pub fn add_card(companions: &mut Companions, id: CompanionId) -> bool {
    match companions.owned.get_mut(&id) {
        Some(progress) => {
            progress.cards += 1;
            false
        }
        None => {
            companions
                .owned
                .insert(id, CompanionProgress { level: 1, cards: 0 });
            true
        }
    }
}

pub fn level_up_companion(companions: &mut Companions, id: CompanionId) -> CommandResult<u32> {
    let progress = companions
        .owned
        .get_mut(&id)
        .ok_or_else(|| CommandError::not_found(format!("{} not unlocked", id.name())))?;
    if progress.level >= MAX_COMPANION_LEVEL {
        return Err(CommandError::at_limit(format!(
            "{} is at max level {}",
            id.name(),
            MAX_COMPANION_LEVEL
        )));
    }
    let cost = progress.level + 1;
    if progress.cards < cost {
        return Err(CommandError::short(
            Resource::CompanionCards(id),
            cost as u64,
            progress.cards as u64,
        ));
    }
    progress.cards -= cost;
    progress.level += 1;
    Ok(Outcome::new(
        progress.level,
        format!("{} reached level {}", id.name(), progress.level),
    ))
}

/// Sets or clears the active companion.
pub fn set_active_companion(companions: &mut Companions, id: Option<CompanionId>) -> CommandResult {
    match id {
        Some(id) if !companions.owned.contains_key(&id) => {
            Err(CommandError::not_found(format!("{} not unlocked", id.name())))
        }
        Some(id) => {
            companions.active = Some(id);
            Ok(Outcome::done(format!("{} is now active", id.name())))
        }
        None => {
            companions.active = None;
            Ok(Outcome::done("No active companion"))
        }
    }
}
