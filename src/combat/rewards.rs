//! Kill rewards: gold, experience and drops.

use super::bonuses::CombatBonuses;
use super::types::{Monster, MonsterKind};
use crate::companions::{roll_card, CompanionId};
use crate::core::constants::*;
use crate::items::drops::{scaled_chance, CURRENCY_DROPS};
use crate::items::{generate_drop, Item, StatId};
use crate::relics::RelicEffect;
use crate::wallet::Currency;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoldReward {
    pub amount: u64,
    pub jackpot: bool,
}

/// Everything a kill dropped besides gold and experience.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Drops {
    pub item: Option<Item>,
    pub companion_card: Option<CompanionId>,
    pub currencies: Vec<(Currency, u64)>,
}

impl Drops {
    pub fn is_empty(&self) -> bool {
        self.item.is_none() && self.companion_card.is_none() && self.currencies.is_empty()
    }
}

/// Relic gold percent specific to the monster's category.
fn category_gold_percent(bonuses: &CombatBonuses, kind: MonsterKind) -> f64 {
    match kind {
        MonsterKind::Rare | MonsterKind::Legendary => {
            bonuses.relics.get(RelicEffect::GoldRarePercent)
        }
        MonsterKind::Boss => bonuses.relics.get(RelicEffect::GoldBossPercent),
        MonsterKind::Normal => 0.0,
    }
}

/// Gold before the jackpot roll. Paid on the original, unreduced max HP.
pub fn base_gold(bonuses: &CombatBonuses, monster: &Monster) -> f64 {
    let personal = bonuses.base.gold_bonus
        + bonuses.equipment.get(StatId::GoldPercent)
        + bonuses.skills.gold_percent
        + bonuses.companion.gold_percent
        + bonuses.skills.prestige_gold_percent;
    let relic = bonuses.relics.get(RelicEffect::GoldPercent)
        + category_gold_percent(bonuses, monster.kind);

    monster.original_max_hp as f64
        * (1.0 + personal / 100.0)
        * (1.0 + relic / 100.0)
        * (1.0 + bonuses.collection.release_gold_percent(monster.band) / 100.0)
        * (1.0 + bonuses.collection.gold_percent / 100.0)
}

/// Gold for a kill. The jackpot roll is drawn on every kill.
pub fn gold_reward<R: Rng>(bonuses: &CombatBonuses, monster: &Monster, rng: &mut R) -> GoldReward {
    let mut gold = base_gold(bonuses, monster);
    let jackpot = rng.gen::<f64>() * 100.0 < bonuses.relics.get(RelicEffect::GoldJackpot);
    if jackpot {
        gold *= GOLD_JACKPOT_MULTIPLIER;
    }
    GoldReward {
        amount: gold.floor() as u64,
        jackpot,
    }
}

pub fn xp_reward(bonuses: &CombatBonuses, kind: MonsterKind) -> u64 {
    (kind.kill_xp() * (1.0 + bonuses.xp_percent() / 100.0)).floor() as u64
}

/// Rolls every drop category independently, in a fixed order: equipment,
/// companion card, then each consumable.
pub fn roll_drops<R: Rng>(bonuses: &CombatBonuses, monster: &Monster, rng: &mut R) -> Drops {
    let is_boss = monster.is_boss();
    let drop_rate = bonuses.drop_rate_percent(monster.band);
    let mut drops = Drops::default();

    let equipment_chance = if is_boss {
        BOSS_EQUIPMENT_DROP_CHANCE
    } else {
        EQUIPMENT_DROP_CHANCE
    };
    if rng.gen::<f64>() < scaled_chance(equipment_chance, drop_rate) {
        drops.item = Some(generate_drop(monster.floor, is_boss, rng));
    }

    let card_chance = if is_boss {
        BOSS_COMPANION_CARD_CHANCE
    } else {
        COMPANION_CARD_CHANCE
    };
    if rng.gen::<f64>() < scaled_chance(card_chance, drop_rate) {
        drops.companion_card = Some(roll_card(rng));
    }

    for drop in CURRENCY_DROPS {
        let (chance, amount) = if is_boss {
            (drop.boss_chance, drop.boss_amount)
        } else {
            (drop.chance, drop.amount)
        };
        if rng.gen::<f64>() < chance && amount > 0 {
            drops.currencies.push((drop.currency, amount));
        }
    }

    drops
}
