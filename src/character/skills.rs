//! Skill trees: run skills bought with skill points, prestige skills bought
//! with prestige points.

use super::player::PlayerState;
use crate::core::command::{CommandError, CommandResult, Outcome, Resource};
use crate::core::constants::{MAX_PRESTIGE_SKILL_LEVEL, MAX_SKILL_LEVEL};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SkillId {
    Power,
    Precision,
    Ferocity,
    Greed,
    Wisdom,
    Kinship,
    Fortune,
}

impl SkillId {
    pub const ALL: [SkillId; 7] = [
        SkillId::Power,
        SkillId::Precision,
        SkillId::Ferocity,
        SkillId::Greed,
        SkillId::Wisdom,
        SkillId::Kinship,
        SkillId::Fortune,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SkillId::Power => "Power",
            SkillId::Precision => "Precision",
            SkillId::Ferocity => "Ferocity",
            SkillId::Greed => "Greed",
            SkillId::Wisdom => "Wisdom",
            SkillId::Kinship => "Kinship",
            SkillId::Fortune => "Fortune",
        }
    }

    /// Percent points per level.
    pub fn per_level(&self) -> f64 {
        match self {
            SkillId::Power => 2.0,
            SkillId::Precision => 0.5,
            SkillId::Ferocity => 5.0,
            SkillId::Greed => 2.0,
            SkillId::Wisdom => 2.0,
            SkillId::Kinship => 5.0,
            SkillId::Fortune => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PrestigeSkillId {
    Might,
    Midas,
    Insight,
}

impl PrestigeSkillId {
    pub const ALL: [PrestigeSkillId; 3] = [
        PrestigeSkillId::Might,
        PrestigeSkillId::Midas,
        PrestigeSkillId::Insight,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PrestigeSkillId::Might => "Might",
            PrestigeSkillId::Midas => "Midas",
            PrestigeSkillId::Insight => "Insight",
        }
    }

    pub fn per_level(&self) -> f64 {
        10.0
    }

    /// Prestige points for the next level.
    pub fn cost(level: u32) -> u32 {
        level + 1
    }
}

/// Skill levels. `levels` resets on prestige, `prestige_levels` does not.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skills {
    pub levels: BTreeMap<SkillId, u32>,
    pub prestige_levels: BTreeMap<PrestigeSkillId, u32>,
}

impl Skills {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self, id: SkillId) -> u32 {
        self.levels.get(&id).copied().unwrap_or(0)
    }

    pub fn prestige_level(&self, id: PrestigeSkillId) -> u32 {
        self.prestige_levels.get(&id).copied().unwrap_or(0)
    }

    pub fn bonus(&self, id: SkillId) -> f64 {
        self.level(id) as f64 * id.per_level()
    }

    pub fn prestige_bonus(&self, id: PrestigeSkillId) -> f64 {
        self.prestige_level(id) as f64 * id.per_level()
    }
}

pub fn upgrade_skill(
    skills: &mut Skills,
    player: &mut PlayerState,
    id: SkillId,
) -> CommandResult<u32> {
    let level = skills.level(id);
    if level >= MAX_SKILL_LEVEL {
        return Err(CommandError::at_limit(format!("{} is maxed", id.name())));
    }
    if player.skill_points == 0 {
        return Err(CommandError::short(Resource::SkillPoints, 1, 0));
    }
    player.skill_points -= 1;
    skills.levels.insert(id, level + 1);
    Ok(Outcome::new(
        level + 1,
        format!("{} raised to {}", id.name(), level + 1),
    ))
}

pub fn upgrade_prestige_skill(
    skills: &mut Skills,
    player: &mut PlayerState,
    id: PrestigeSkillId,
) -> CommandResult<u32> {
    let level = skills.prestige_level(id);
    if level >= MAX_PRESTIGE_SKILL_LEVEL {
        return Err(CommandError::at_limit(format!("{} is maxed", id.name())));
    }
    let cost = PrestigeSkillId::cost(level);
    if player.prestige_points < cost {
        return Err(CommandError::short(
            Resource::PrestigePoints,
            cost as u64,
            player.prestige_points as u64,
        ));
    }
    player.prestige_points -= cost;
    skills.prestige_levels.insert(id, level + 1);
    Ok(Outcome::new(
        level + 1,
        format!("{} raised to {}", id.name(), level + 1),
    ))
}
