//! Forge operations on a single item.
//!
//! Every operation validates all of its costs before deducting any, so a
//! declined command never leaves a partial payment behind.

use super::types::{DisassembleSummary, EnhanceResult};
use crate::core::balance::{
    awaken_cost, enhance_gold_cost, enhance_success_rate, upgrade_essence_cost,
    upgrade_success_rate,
};
use crate::core::command::{CommandError, CommandResult, Outcome};
use crate::core::constants::*;
use crate::items::generation::{refresh_main_stat, roll_potential};
use crate::items::{Grade, Inventory, Item, PotentialTier};
use crate::wallet::{Currency, Wallet};
use rand::Rng;
use uuid::Uuid;

/// Attempts one item-level upgrade. Returns whether it succeeded.
/// Every attempt, successful or not, uses one upgrade charge.
pub fn upgrade_level<R: Rng>(
    item: &mut Item,
    wallet: &mut Wallet,
    rng: &mut R,
) -> CommandResult<bool> {
    if item.upgrade_charges == 0 {
        return Err(CommandError::invalid("No upgrade charges left: awaken required"));
    }
    let cost = upgrade_essence_cost(item.item_level);
    wallet.spend(Currency::Essence, cost)?;
    item.upgrade_charges -= 1;

    if rng.gen::<f64>() < upgrade_success_rate(item.item_level) {
        item.item_level += 1;
        refresh_main_stat(item);
        Ok(Outcome::new(
            true,
            format!("{} upgraded to Lv {}", item.slot.name(), item.item_level),
        ))
    } else {
        Ok(Outcome::new(
            false,
            format!(
                "{} upgrade failed ({} charges left)",
                item.slot.name(),
                item.upgrade_charges
            ),
        ))
    }
}

/// Awakens an item: boosts its main stat and refills its upgrade charges.
pub fn awaken(item: &mut Item, wallet: &mut Wallet) -> CommandResult {
    if item.awakenings >= MAX_AWAKENINGS {
        return Err(CommandError::at_limit(format!(
            "{} is already fully awakened",
            item.slot.name()
        )));
    }
    wallet.spend(Currency::AwakenStone, awaken_cost(item.awakenings))?;
    item.awakenings += 1;
    item.upgrade_charges = UPGRADE_CHARGES;
    refresh_main_stat(item);
    Ok(Outcome::done(format!(
        "{} awakened ({}/{})",
        item.slot.name(),
        item.awakenings,
        MAX_AWAKENINGS
    )))
}

/// Attempts one enhancement. Protection only matters at or above the
/// downgrade threshold, and is charged on every protected attempt.
pub fn enhance<R: Rng>(
    item: &mut Item,
    wallet: &mut Wallet,
    use_protection: bool,
    rng: &mut R,
) -> CommandResult<EnhanceResult> {
    let level = item.enhance_level;
    if level >= MAX_ENHANCE_LEVEL {
        return Err(CommandError::at_limit(format!(
            "{} is already +{}",
            item.slot.name(),
            MAX_ENHANCE_LEVEL
        )));
    }

    let gold = enhance_gold_cost(level);
    let protected = use_protection && level >= ENHANCE_DOWNGRADE_THRESHOLD;
    wallet.require(Currency::Gold, gold)?;
    if protected {
        wallet.require(Currency::ProtectionScroll, 1)?;
    }
    wallet.spend(Currency::Gold, gold)?;
    if protected {
        wallet.spend(Currency::ProtectionScroll, 1)?;
    }

    let result = if rng.gen::<f64>() < enhance_success_rate(level) {
        item.enhance_level += 1;
        EnhanceResult::Success
    } else if level < ENHANCE_DOWNGRADE_THRESHOLD {
        EnhanceResult::Failed
    } else if protected {
        EnhanceResult::Protected
    } else if rng.gen_bool(ENHANCE_DOWNGRADE_CHANCE) {
        item.enhance_level -= 1;
        EnhanceResult::Downgraded
    } else {
        EnhanceResult::Failed
    };

    let message = match result {
        EnhanceResult::Success => {
            format!("{} enhanced to +{}", item.slot.name(), item.enhance_level)
        }
        EnhanceResult::Failed => format!("{} enhancement failed", item.slot.name()),
        EnhanceResult::Protected => format!(
            "{} enhancement failed, protection scroll kept +{}",
            item.slot.name(),
            item.enhance_level
        ),
        EnhanceResult::Downgraded => format!(
            "{} enhancement failed and dropped to +{}",
            item.slot.name(),
            item.enhance_level
        ),
    };
    Ok(Outcome::new(result, message))
}

/// Re-rolls every unlocked potential. Costs one orb plus a lock key per
/// locked potential.
pub fn reroll_potentials<R: Rng>(
    item: &mut Item,
    wallet: &mut Wallet,
    rng: &mut R,
) -> CommandResult {
    let unlocked = item.potentials().filter(|s| !s.locked).count();
    if unlocked == 0 {
        return Err(CommandError::invalid("Every potential is locked"));
    }
    let keys = LOCK_KEY_PER_LOCKED_STAT * item.locked_potential_count() as u64;
    wallet.require(Currency::PotentialOrb, REROLL_ORB_COST)?;
    wallet.require(Currency::LockKey, keys)?;
    wallet.spend(Currency::PotentialOrb, REROLL_ORB_COST)?;
    wallet.spend(Currency::LockKey, keys)?;

    let grade = item.grade;
    for roll in item.stats.iter_mut().filter(|s| !s.is_main && !s.locked) {
        *roll = roll_potential(grade, rng);
    }
    Ok(Outcome::done(format!(
        "Rerolled {} potentials on {}",
        unlocked,
        item.slot.name()
    )))
}

/// Flips the lock on a potential line. Returns the new lock state.
pub fn toggle_potential_lock(item: &mut Item, index: usize) -> CommandResult<bool> {
    let roll = item
        .stats
        .get_mut(index)
        .ok_or_else(|| CommandError::not_found(format!("No stat at index {index}")))?;
    if roll.is_main {
        return Err(CommandError::invalid("The main stat cannot be locked"));
    }
    roll.locked = !roll.locked;
    let state = if roll.locked { "locked" } else { "unlocked" };
    let message = format!("{} {}", roll.stat.name(), state);
    Ok(Outcome::new(roll.locked, message))
}

/// Raises one potential to the top tier value.
pub fn perfect_stat(item: &mut Item, index: usize, wallet: &mut Wallet) -> CommandResult {
    let roll = item
        .stats
        .get(index)
        .ok_or_else(|| CommandError::not_found(format!("No stat at index {index}")))?;
    if roll.is_main {
        return Err(CommandError::invalid("The main stat cannot be perfected"));
    }
    if roll.stat.is_utility() {
        return Err(CommandError::invalid(format!(
            "{} cannot be perfected",
            roll.stat.name()
        )));
    }
    if roll.tier == PotentialTier::TOP {
        return Err(CommandError::at_limit(format!(
            "{} is already at the top tier",
            roll.stat.name()
        )));
    }
    wallet.spend(Currency::PerfectCube, PERFECT_CUBE_COST)?;

    let roll = &mut item.stats[index];
    roll.tier = PotentialTier::TOP;
    roll.value = roll.stat.potential_value(PotentialTier::TOP);
    Ok(Outcome::done(format!(
        "{} perfected to {:.1}",
        roll.stat.name(),
        roll.value
    )))
}

/// Essence returned by disassembling `item`.
pub fn essence_value(item: &Item) -> u64 {
    let base = ESSENCE_BY_GRADE[item.grade.index()] as f64;
    let level_factor = 1.0 + item.item_level as f64 / 20.0;
    let ancient = if item.ancient { 2.0 } else { 1.0 };
    (base * level_factor * ancient).floor() as u64
}

/// Disassembles one inventory item into essence. Locked items are refused.
pub fn disassemble(inventory: &mut Inventory, id: Uuid, wallet: &mut Wallet) -> CommandResult<u64> {
    let item = inventory
        .get(id)
        .ok_or_else(|| CommandError::not_found("Item not in inventory"))?;
    if item.locked {
        return Err(CommandError::invalid(format!("{} is locked", item.display_name())));
    }
    let essence = essence_value(item);
    let name = item.display_name();
    inventory.remove(id);
    wallet.add(Currency::Essence, essence);
    Ok(Outcome::new(essence, format!("Disassembled {name} for {essence} essence")))
}

/// Disassembles every unlocked inventory item at or below `max_grade`.
pub fn disassemble_all(
    inventory: &mut Inventory,
    max_grade: Grade,
    wallet: &mut Wallet,
) -> CommandResult<DisassembleSummary> {
    let mut summary = DisassembleSummary::default();
    inventory.items.retain(|item| {
        if item.locked || item.grade > max_grade {
            return true;
        }
        summary.items += 1;
        summary.essence += essence_value(item);
        false
    });
    wallet.add(Currency::Essence, summary.essence);
    let message = format!(
        "Disassembled {} items for {} essence",
        summary.items, summary.essence
    );
    Ok(Outcome::new(summary, message))
}

/// Flips the item-level lock. Returns the new lock state.
pub fn toggle_item_lock(item: &mut Item) -> bool {
    item.locked = !item.locked;
    item.locked
}
