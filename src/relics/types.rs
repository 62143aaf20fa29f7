use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Every kind of effect a relic can carry. Values are per relic level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RelicEffect {
    /// Damage % per relic owned.
    DamagePerRelic,
    DamagePercent,
    /// Amplifies `DamagePercent` by this percent.
    Amplifier,
    BossDamage,
    CritChance,
    CritDamage,
    GoldPercent,
    /// Extra gold % from rare and legendary monsters.
    GoldRarePercent,
    /// Extra gold % from bosses.
    GoldBossPercent,
    /// Chance (percent) for a kill to pay out ten times the gold.
    GoldJackpot,
    MonsterReduction,
    /// Extra boss timer seconds.
    BossTimeBonus,
    BossSkipChance,
    MonsterHpReduction,
    UpgradeCostReduction,
    FragmentBonus,
    DropRate,
    /// Added to the rare spawn chance, in percent points.
    RareSpawnChance,
    XpPercent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RelicId {
    WarBanner,
    BloodBlade,
    ResonanceCore,
    TitanSlayer,
    HawkEye,
    ExecutionerMask,
    MidasTouch,
    TreasureMap,
    RoyalTithe,
    LuckyCoin,
    ShortcutCompass,
    Hourglass,
    PhantomKey,
    WitheringTouch,
    ArtisanHammer,
    StarShard,
    ScavengerPouch,
    Beacon,
    SageTome,
}

/// Static catalog data for one relic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelicDef {
    pub id: RelicId,
    pub name: &'static str,
    pub effect: RelicEffect,
    pub per_level: f64,
    pub max_level: u32,
}

impl RelicId {
    pub const ALL: [RelicId; 19] = [
        RelicId::WarBanner,
        RelicId::BloodBlade,
        RelicId::ResonanceCore,
        RelicId::TitanSlayer,
        RelicId::HawkEye,
        RelicId::ExecutionerMask,
        RelicId::MidasTouch,
        RelicId::TreasureMap,
        RelicId::RoyalTithe,
        RelicId::LuckyCoin,
        RelicId::ShortcutCompass,
        RelicId::Hourglass,
        RelicId::PhantomKey,
        RelicId::WitheringTouch,
        RelicId::ArtisanHammer,
        RelicId::StarShard,
        RelicId::ScavengerPouch,
        RelicId::Beacon,
        RelicId::SageTome,
    ];

    pub fn def(&self) -> RelicDef {
        let (name, effect, per_level, max_level) = match self {
            RelicId::WarBanner => ("War Banner", RelicEffect::DamagePerRelic, 1.0, 20),
            RelicId::BloodBlade => ("Blood Blade", RelicEffect::DamagePercent, 5.0, 50),
            RelicId::ResonanceCore => ("Resonance Core", RelicEffect::Amplifier, 2.0, 25),
            RelicId::TitanSlayer => ("Titan Slayer", RelicEffect::BossDamage, 5.0, 40),
            RelicId::HawkEye => ("Hawk Eye", RelicEffect::CritChance, 1.0, 30),
            RelicId::ExecutionerMask => ("Executioner's Mask", RelicEffect::CritDamage, 5.0, 40),
            RelicId::MidasTouch => ("Midas Touch", RelicEffect::GoldPercent, 5.0, 50),
            RelicId::TreasureMap => ("Treasure Map", RelicEffect::GoldRarePercent, 10.0, 20),
            RelicId::RoyalTithe => ("Royal Tithe", RelicEffect::GoldBossPercent, 10.0, 20),
            RelicId::LuckyCoin => ("Lucky Coin", RelicEffect::GoldJackpot, 0.5, 20),
            RelicId::ShortcutCompass => {
                ("Shortcut Compass", RelicEffect::MonsterReduction, 0.2, 25)
            }
            RelicId::Hourglass => ("Hourglass", RelicEffect::BossTimeBonus, 1.0, 30),
            RelicId::PhantomKey => ("Phantom Key", RelicEffect::BossSkipChance, 1.0, 30),
            RelicId::WitheringTouch => {
                ("Withering Touch", RelicEffect::MonsterHpReduction, 1.0, 50)
            }
            RelicId::ArtisanHammer => {
                ("Artisan's Hammer", RelicEffect::UpgradeCostReduction, 2.0, 25)
            }
            RelicId::StarShard => ("Star Shard", RelicEffect::FragmentBonus, 5.0, 20),
            RelicId::ScavengerPouch => ("Scavenger's Pouch", RelicEffect::DropRate, 3.0, 30),
            RelicId::Beacon => ("Beacon of Rarity", RelicEffect::RareSpawnChance, 0.1, 20),
            RelicId::SageTome => ("Sage's Tome", RelicEffect::XpPercent, 5.0, 40),
        };
        RelicDef {
            id: *self,
            name,
            effect,
            per_level,
            max_level,
        }
    }

    pub fn name(&self) -> &'static str {
        self.def().name
    }
}

/// Owned relics and their levels. Relics are never removed once drawn.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Relics {
    pub levels: BTreeMap<RelicId, u32>,
    pub gacha_count: u32,
}

impl Relics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self, id: RelicId) -> u32 {
        self.levels.get(&id).copied().unwrap_or(0)
    }

    pub fn owns(&self, id: RelicId) -> bool {
        self.levels.contains_key(&id)
    }

    pub fn owned_count(&self) -> usize {
        self.levels.len()
    }

    /// Relics not yet drawn, in catalog order.
    pub fn unowned(&self) -> Vec<RelicId> {
        RelicId::ALL.into_iter().filter(|id| !self.owns(*id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_catalog_effects_are_unique() {
        let effects: BTreeSet<RelicEffect> =
            RelicId::ALL.iter().map(|id| id.def().effect).collect();
        assert_eq!(effects.len(), RelicId::ALL.len());
    }

    #[test]
    fn test_catalog_values_positive() {
        for id in RelicId::ALL {
            let def = id.def();
            assert!(def.per_level > 0.0, "{:?}", id);
            assert!(def.max_level > 0, "{:?}", id);
            assert_eq!(def.id, id);
        }
    }

    #[test]
    fn test_unowned_shrinks() {
        let mut relics = Relics::new();
        assert_eq!(relics.unowned().len(), RelicId::ALL.len());
        relics.levels.insert(RelicId::HawkEye, 1);
        assert_eq!(relics.unowned().len(), RelicId::ALL.len() - 1);
        assert!(!relics.unowned().contains(&RelicId::HawkEye));
    }
}
