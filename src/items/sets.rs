//! Equipment set catalog.

use super::types::StatId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SetId {
    Warlord,
    Fortune,
    Tempest,
}

/// A bonus that activates once `pieces` items of the set are equipped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SetBonus {
    pub pieces: usize,
    pub stat: StatId,
    pub value: f64,
}

impl SetId {
    pub const ALL: [SetId; 3] = [SetId::Warlord, SetId::Fortune, SetId::Tempest];

    pub fn name(&self) -> &'static str {
        match self {
            SetId::Warlord => "Warlord",
            SetId::Fortune => "Fortune",
            SetId::Tempest => "Tempest",
        }
    }

    pub fn bonuses(&self) -> &'static [SetBonus] {
        match self {
            SetId::Warlord => &[
                SetBonus {
                    pieces: 2,
                    stat: StatId::AttackPercent,
                    value: 10.0,
                },
                SetBonus {
                    pieces: 4,
                    stat: StatId::BossDamage,
                    value: 20.0,
                },
            ],
            SetId::Fortune => &[
                SetBonus {
                    pieces: 2,
                    stat: StatId::GoldPercent,
                    value: 15.0,
                },
                SetBonus {
                    pieces: 4,
                    stat: StatId::DropRate,
                    value: 10.0,
                },
            ],
            SetId::Tempest => &[
                SetBonus {
                    pieces: 2,
                    stat: StatId::CritChance,
                    value: 5.0,
                },
                SetBonus {
                    pieces: 4,
                    stat: StatId::CritDamage,
                    value: 30.0,
                },
            ],
        }
    }

    /// Bonuses active with `equipped` pieces of this set.
    pub fn active_bonuses(&self, equipped: usize) -> impl Iterator<Item = &'static SetBonus> {
        self.bonuses().iter().filter(move |b| equipped >= b.pieces)
    }
}
