use crate::collection::{CollectionKey, CollectionKind};
use crate::core::balance::monster_hp;
use crate::core::constants::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MonsterKind {
    #[default]
    Normal,
    Rare,
    Legendary,
    Boss,
}

impl MonsterKind {
    pub fn name(&self) -> &'static str {
        match self {
            MonsterKind::Normal => "Normal",
            MonsterKind::Rare => "Rare",
            MonsterKind::Legendary => "Legendary",
            MonsterKind::Boss => "Boss",
        }
    }

    pub fn hp_multiplier(&self) -> f64 {
        match self {
            MonsterKind::Normal => 1.0,
            MonsterKind::Rare => RARE_HP_MULTIPLIER,
            MonsterKind::Legendary => LEGENDARY_HP_MULTIPLIER,
            MonsterKind::Boss => BOSS_HP_MULTIPLIER,
        }
    }

    pub fn kill_xp(&self) -> f64 {
        match self {
            MonsterKind::Normal => XP_NORMAL_KILL,
            MonsterKind::Rare => XP_RARE_KILL,
            MonsterKind::Legendary => XP_LEGENDARY_KILL,
            MonsterKind::Boss => XP_BOSS_KILL,
        }
    }

    /// Rare and legendary monsters run away if left alive too long.
    pub fn flees(&self) -> bool {
        matches!(self, MonsterKind::Rare | MonsterKind::Legendary)
    }

    pub fn collection_kind(&self) -> Option<CollectionKind> {
        match self {
            MonsterKind::Normal => None,
            MonsterKind::Rare => Some(CollectionKind::Rare),
            MonsterKind::Legendary => Some(CollectionKind::Legendary),
            MonsterKind::Boss => Some(CollectionKind::Boss),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Monster {
    pub name: String,
    pub floor: u32,
    pub band: u32,
    /// Position in the band's catalog list for this kind.
    pub index: u32,
    pub kind: MonsterKind,
    pub current_hp: u64,
    pub max_hp: u64,
    /// HP before any reduction; gold is paid on this.
    pub original_max_hp: u64,
    pub spawned_at_ms: i64,
}

/// A full-health floor 1 monster, filling whatever an older save left out.
impl Default for Monster {
    fn default() -> Self {
        let hp = monster_hp(1);
        Self {
            name: String::new(),
            floor: 1,
            band: 0,
            index: 0,
            kind: MonsterKind::Normal,
            current_hp: hp,
            max_hp: hp,
            original_max_hp: hp,
            spawned_at_ms: 0,
        }
    }
}

impl Monster {
    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    pub fn is_boss(&self) -> bool {
        self.kind == MonsterKind::Boss
    }

    /// Applies damage. Returns true if this hit killed the monster.
    pub fn take_damage(&mut self, amount: u64) -> bool {
        let was_alive = self.is_alive();
        self.current_hp = self.current_hp.saturating_sub(amount);
        was_alive && !self.is_alive()
    }

    pub fn has_fled(&self, now_ms: i64) -> bool {
        self.kind.flees() && now_ms - self.spawned_at_ms >= RARE_FLEE_WINDOW_MS
    }

    pub fn collection_key(&self) -> Option<CollectionKey> {
        self.kind
            .collection_kind()
            .map(|kind| CollectionKey::new(self.band, kind, self.index))
    }
}
