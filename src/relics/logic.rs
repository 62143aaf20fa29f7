use super::types::{RelicEffect, RelicId, Relics};
use crate::core::balance::{gacha_cost, relic_upgrade_cost};
use crate::core::command::{CommandError, CommandResult, Outcome};
use crate::wallet::{Currency, Wallet};
use rand::Rng;
use std::collections::BTreeMap;

/// Summed relic effects. Built in catalog order; reading never mutates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelicBonuses {
    values: BTreeMap<RelicEffect, f64>,
    owned: usize,
}

impl RelicBonuses {
    pub fn from_relics(relics: &Relics) -> Self {
        let mut values = BTreeMap::new();
        for (id, level) in &relics.levels {
            let def = id.def();
            *values.entry(def.effect).or_insert(0.0) += def.per_level * *level as f64;
        }
        Self {
            values,
            owned: relics.owned_count(),
        }
    }

    pub fn get(&self, effect: RelicEffect) -> f64 {
        self.values.get(&effect).copied().unwrap_or(0.0)
    }

    pub fn relic_count(&self) -> usize {
        self.owned
    }
}

/// Draws a random relic the player does not own yet.
pub fn gacha<R: Rng>(
    relics: &mut Relics,
    wallet: &mut Wallet,
    rng: &mut R,
) -> CommandResult<RelicId> {
    let pool = relics.unowned();
    if pool.is_empty() {
        return Err(CommandError::at_limit("All relics owned"));
    }
    wallet.spend(Currency::RelicFragment, gacha_cost(relics.gacha_count))?;
    relics.gacha_count += 1;

    let id = pool[rng.gen_range(0..pool.len())];
    relics.levels.insert(id, 1);
    Ok(Outcome::new(id, format!("Obtained relic: {}", id.name())))
}

/// Raises an owned relic by one level.
pub fn upgrade_relic(relics: &mut Relics, id: RelicId, wallet: &mut Wallet) -> CommandResult<u32> {
    let def = id.def();
    let level = relics
        .levels
        .get(&id)
        .copied()
        .ok_or_else(|| CommandError::not_found(format!("{} is not owned", def.name)))?;
    if level >= def.max_level {
        return Err(CommandError::at_limit(format!(
            "{} is at max level {}",
            def.name, def.max_level
        )));
    }

    let reduction = RelicBonuses::from_relics(relics).get(RelicEffect::UpgradeCostReduction);
    wallet.spend(Currency::RelicFragment, relic_upgrade_cost(level, reduction))?;
    let new_level = level + 1;
    relics.levels.insert(id, new_level);
    Ok(Outcome::new(
        new_level,
        format!("{} upgraded to Lv {}", def.name, new_level),
    ))
}
