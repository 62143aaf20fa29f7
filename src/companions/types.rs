use crate::items::Grade;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CompanionId {
    Sparrow,
    Hound,
    Owl,
    Fox,
    Golem,
    Wyvern,
    Phoenix,
    Dragon,
}

/// Extra damage a companion adds to every hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CompanionSpecial {
    /// With probability `chance`, add `percent`% of the target's max HP.
    MaxHpProc { chance: f64, percent: f64 },
    /// Add `percent`% of the companion's attack.
    DamageOverTime { percent: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompanionDef {
    pub id: CompanionId,
    pub name: &'static str,
    pub grade: Grade,
    /// Attack at level 1.
    pub attack: f64,
    pub crit_chance: f64,
    pub gold_percent: f64,
    pub xp_percent: f64,
    pub stage_skip: f64,
    pub special: Option<CompanionSpecial>,
}

impl CompanionId {
    pub const ALL: [CompanionId; 8] = [
        CompanionId::Sparrow,
        CompanionId::Hound,
        CompanionId::Owl,
        CompanionId::Fox,
        CompanionId::Golem,
        CompanionId::Wyvern,
        CompanionId::Phoenix,
        CompanionId::Dragon,
    ];

    pub fn def(&self) -> CompanionDef {
        let base = CompanionDef {
            id: *self,
            name: "",
            grade: Grade::Common,
            attack: 0.0,
            crit_chance: 0.0,
            gold_percent: 0.0,
            xp_percent: 0.0,
            stage_skip: 0.0,
            special: None,
        };
        match self {
            CompanionId::Sparrow => CompanionDef {
                name: "Sparrow",
                attack: 5.0,
                gold_percent: 2.0,
                ..base
            },
            CompanionId::Hound => CompanionDef {
                name: "Hound",
                attack: 8.0,
                crit_chance: 1.0,
                ..base
            },
            CompanionId::Owl => CompanionDef {
                name: "Owl",
                grade: Grade::Rare,
                attack: 10.0,
                xp_percent: 5.0,
                ..base
            },
            CompanionId::Fox => CompanionDef {
                name: "Fox",
                grade: Grade::Rare,
                attack: 12.0,
                gold_percent: 5.0,
                stage_skip: 2.0,
                ..base
            },
            CompanionId::Golem => CompanionDef {
                name: "Golem",
                grade: Grade::Epic,
                attack: 25.0,
                special: Some(CompanionSpecial::MaxHpProc {
                    chance: 0.05,
                    percent: 2.0,
                }),
                ..base
            },
            CompanionId::Wyvern => CompanionDef {
                name: "Wyvern",
                grade: Grade::Epic,
                attack: 20.0,
                crit_chance: 3.0,
                special: Some(CompanionSpecial::DamageOverTime { percent: 20.0 }),
                ..base
            },
            CompanionId::Phoenix => CompanionDef {
                name: "Phoenix",
                grade: Grade::Unique,
                attack: 40.0,
                xp_percent: 10.0,
                special: Some(CompanionSpecial::DamageOverTime { percent: 30.0 }),
                ..base
            },
            CompanionId::Dragon => CompanionDef {
                name: "Dragon",
                grade: Grade::Legendary,
                attack: 80.0,
                crit_chance: 5.0,
                gold_percent: 10.0,
                special: Some(CompanionSpecial::MaxHpProc {
                    chance: 0.10,
                    percent: 3.0,
                }),
                ..base
            },
        }
    }

    pub fn name(&self) -> &'static str {
        self.def().name
    }

    /// Companions of `grade`, in catalog order.
    pub fn of_grade(grade: Grade) -> Vec<CompanionId> {
        Self::ALL
            .into_iter()
            .filter(|id| id.def().grade == grade)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanionProgress {
    pub level: u32,
    /// Spare cards, spent on levels.
    pub cards: u32,
}

impl Default for CompanionProgress {
    fn default() -> Self {
        Self { level: 1, cards: 0 }
    }
}

/// Owned companions. Survives prestige.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Companions {
    pub owned: BTreeMap<CompanionId, CompanionProgress>,
    pub active: Option<CompanionId>,
}

impl Companions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self, id: CompanionId) -> u32 {
        self.owned.get(&id).map(|p| p.level).unwrap_or(0)
    }
}
