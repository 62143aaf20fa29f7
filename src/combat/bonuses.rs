//! One snapshot of every bonus source, taken before each hit.
//!
//! Building the snapshot is a pure read of the state: it never rolls and
//! gives the same result every time for the same state.

use crate::character::player::BaseStats;
use crate::character::skills::{PrestigeSkillId, SkillId, Skills};
use crate::collection::CollectionBonuses;
use crate::companions::CompanionBonuses;
use crate::core::constants::*;
use crate::core::game_state::GameState;
use crate::items::{EquipmentBonuses, StatId};
use crate::relics::{RelicBonuses, RelicEffect};

/// Skill contributions in percent points.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SkillBonuses {
    pub attack_percent: f64,
    pub crit_chance: f64,
    pub crit_damage: f64,
    pub gold_percent: f64,
    pub xp_percent: f64,
    pub companion_boost_percent: f64,
    pub drop_rate: f64,
    pub prestige_attack_percent: f64,
    pub prestige_gold_percent: f64,
    pub prestige_xp_percent: f64,
}

impl SkillBonuses {
    pub fn from_skills(skills: &Skills) -> Self {
        Self {
            attack_percent: skills.bonus(SkillId::Power),
            crit_chance: skills.bonus(SkillId::Precision),
            crit_damage: skills.bonus(SkillId::Ferocity),
            gold_percent: skills.bonus(SkillId::Greed),
            xp_percent: skills.bonus(SkillId::Wisdom),
            companion_boost_percent: skills.bonus(SkillId::Kinship),
            drop_rate: skills.bonus(SkillId::Fortune),
            prestige_attack_percent: skills.prestige_bonus(PrestigeSkillId::Might),
            prestige_gold_percent: skills.prestige_bonus(PrestigeSkillId::Midas),
            prestige_xp_percent: skills.prestige_bonus(PrestigeSkillId::Insight),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CombatBonuses {
    pub base: BaseStats,
    pub equipment: EquipmentBonuses,
    pub skills: SkillBonuses,
    pub companion: CompanionBonuses,
    pub relics: RelicBonuses,
    pub collection: CollectionBonuses,
}

impl CombatBonuses {
    pub fn collect(state: &GameState) -> Self {
        Self {
            base: state.player.base.clone(),
            equipment: EquipmentBonuses::from_equipment(&state.equipment),
            skills: SkillBonuses::from_skills(&state.skills),
            companion: CompanionBonuses::from_companions(&state.companions),
            relics: RelicBonuses::from_relics(&state.relics),
            collection: CollectionBonuses::from_ledger(&state.ledger),
        }
    }

    /// Uncapped crit chance, before overflow conversion.
    pub fn raw_crit_chance(&self) -> f64 {
        self.base.crit_chance
            + self.equipment.get(StatId::CritChance)
            + self.skills.crit_chance
            + self.companion.crit_chance
            + self.relics.get(RelicEffect::CritChance)
    }

    /// Crit damage percent before overflow conversion.
    pub fn base_crit_damage(&self) -> f64 {
        self.base.crit_damage
            + self.equipment.get(StatId::CritDamage)
            + self.skills.crit_damage
            + self.relics.get(RelicEffect::CritDamage)
    }

    pub fn xp_percent(&self) -> f64 {
        self.skills.xp_percent
            + self.equipment.get(StatId::XpPercent)
            + self.companion.xp_percent
            + self.skills.prestige_xp_percent
            + self.relics.get(RelicEffect::XpPercent)
    }

    /// Drop-rate percent against a monster of `band`.
    pub fn drop_rate_percent(&self, band: u32) -> f64 {
        self.base.drop_rate
            + self.equipment.get(StatId::DropRate)
            + self.skills.drop_rate
            + self.relics.get(RelicEffect::DropRate)
            + self.collection.release_drop_percent(band)
    }

    /// Monsters per floor removed by equipment, collection and relics.
    pub fn monster_reduction(&self) -> u32 {
        self.equipment.monster_reduction()
            + self.collection.monster_reduction
            + self.relics.get(RelicEffect::MonsterReduction).floor().max(0.0) as u32
    }

    pub fn stage_skip_percent(&self) -> f64 {
        self.equipment.get(StatId::StageSkip) + self.companion.stage_skip
    }

    pub fn boss_time_bonus(&self) -> u32 {
        self.relics.get(RelicEffect::BossTimeBonus).floor().max(0.0) as u32
    }

    pub fn boss_skip_percent(&self) -> f64 {
        self.relics.get(RelicEffect::BossSkipChance)
    }

    pub fn hp_reduction_percent(&self) -> f64 {
        self.relics
            .get(RelicEffect::MonsterHpReduction)
            .clamp(0.0, MAX_MONSTER_HP_REDUCTION_PERCENT)
    }

    pub fn rare_spawn_chance(&self) -> f64 {
        BASE_RARE_SPAWN_CHANCE
            + self.relics.get(RelicEffect::RareSpawnChance) / 100.0
            + self.collection.rare_spawn_bonus
    }

    pub fn legendary_spawn_chance(&self) -> f64 {
        BASE_LEGENDARY_SPAWN_CHANCE + self.collection.legendary_spawn_bonus
    }

    pub fn fragment_bonus_percent(&self) -> f64 {
        self.relics.get(RelicEffect::FragmentBonus)
    }
}
