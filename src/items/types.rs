use super::sets::SetId;
use crate::core::constants::UPGRADE_CHARGES;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EquipmentSlot {
    Weapon,
    Helmet,
    Armor,
    Gloves,
    Boots,
    Necklace,
    Ring,
}

impl EquipmentSlot {
    pub const ALL: [EquipmentSlot; 7] = [
        EquipmentSlot::Weapon,
        EquipmentSlot::Helmet,
        EquipmentSlot::Armor,
        EquipmentSlot::Gloves,
        EquipmentSlot::Boots,
        EquipmentSlot::Necklace,
        EquipmentSlot::Ring,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EquipmentSlot::Weapon => "Weapon",
            EquipmentSlot::Helmet => "Helmet",
            EquipmentSlot::Armor => "Armor",
            EquipmentSlot::Gloves => "Gloves",
            EquipmentSlot::Boots => "Boots",
            EquipmentSlot::Necklace => "Necklace",
            EquipmentSlot::Ring => "Ring",
        }
    }

    /// Share of the main attack stat this slot carries.
    pub fn attack_factor(&self) -> f64 {
        match self {
            EquipmentSlot::Weapon => 1.0,
            EquipmentSlot::Gloves | EquipmentSlot::Ring => 0.6,
            _ => 0.4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    Common = 0,
    Rare = 1,
    Epic = 2,
    Unique = 3,
    Legendary = 4,
    Mythic = 5,
}

impl Grade {
    /// Lowest first. Rarity tables are written against this order.
    pub const ALL: [Grade; 6] = [
        Grade::Common,
        Grade::Rare,
        Grade::Epic,
        Grade::Unique,
        Grade::Legendary,
        Grade::Mythic,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Grade::Common => "Common",
            Grade::Rare => "Rare",
            Grade::Epic => "Epic",
            Grade::Unique => "Unique",
            Grade::Legendary => "Legendary",
            Grade::Mythic => "Mythic",
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Main-stat multiplier.
    pub fn power(&self) -> f64 {
        match self {
            Grade::Common => 1.0,
            Grade::Rare => 1.5,
            Grade::Epic => 2.2,
            Grade::Unique => 3.2,
            Grade::Legendary => 4.5,
            Grade::Mythic => 6.5,
        }
    }
}

/// Quality tier of a single potential roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PotentialTier {
    Normal = 0,
    Rare = 1,
    Epic = 2,
    Unique = 3,
    Legendary = 4,
}

impl PotentialTier {
    pub const ALL: [PotentialTier; 5] = [
        PotentialTier::Normal,
        PotentialTier::Rare,
        PotentialTier::Epic,
        PotentialTier::Unique,
        PotentialTier::Legendary,
    ];

    pub const TOP: PotentialTier = PotentialTier::Legendary;

    pub fn name(&self) -> &'static str {
        match self {
            PotentialTier::Normal => "Normal",
            PotentialTier::Rare => "Rare",
            PotentialTier::Epic => "Epic",
            PotentialTier::Unique => "Unique",
            PotentialTier::Legendary => "Legendary",
        }
    }

    pub fn multiplier(&self) -> f64 {
        match self {
            PotentialTier::Normal => 1.0,
            PotentialTier::Rare => 2.0,
            PotentialTier::Epic => 3.0,
            PotentialTier::Unique => 5.0,
            PotentialTier::Legendary => 8.0,
        }
    }
}

/// Every stat an item can carry. Percent stats are stored as percent points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StatId {
    /// Flat attack. Always the main stat.
    Attack,
    AttackPercent,
    CritChance,
    CritDamage,
    GoldPercent,
    XpPercent,
    DropRate,
    BossDamage,
    /// Flat reduction of the monsters required per floor.
    MonsterReduction,
    /// Chance (percent) for a kill to count extra toward the boss.
    StageSkip,
}

impl StatId {
    /// Stats that can appear as potentials.
    pub const POTENTIALS: [StatId; 9] = [
        StatId::AttackPercent,
        StatId::CritChance,
        StatId::CritDamage,
        StatId::GoldPercent,
        StatId::XpPercent,
        StatId::DropRate,
        StatId::BossDamage,
        StatId::MonsterReduction,
        StatId::StageSkip,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StatId::Attack => "Attack",
            StatId::AttackPercent => "Attack %",
            StatId::CritChance => "Crit Chance",
            StatId::CritDamage => "Crit Damage",
            StatId::GoldPercent => "Gold %",
            StatId::XpPercent => "XP %",
            StatId::DropRate => "Drop Rate",
            StatId::BossDamage => "Boss Damage",
            StatId::MonsterReduction => "Monster Reduction",
            StatId::StageSkip => "Stage Skip",
        }
    }

    /// Enhancement does not scale these.
    pub fn enhancement_excluded(&self) -> bool {
        matches!(
            self,
            StatId::CritChance | StatId::MonsterReduction | StatId::StageSkip
        )
    }

    /// Utility stats cannot be perfected.
    pub fn is_utility(&self) -> bool {
        matches!(self, StatId::MonsterReduction | StatId::StageSkip)
    }

    /// Potential value at the Normal tier.
    pub fn base_potential_value(&self) -> f64 {
        match self {
            StatId::Attack => 0.0,
            StatId::AttackPercent => 1.0,
            StatId::CritChance => 0.5,
            StatId::CritDamage => 2.0,
            StatId::GoldPercent => 1.5,
            StatId::XpPercent => 1.5,
            StatId::DropRate => 1.0,
            StatId::BossDamage => 2.0,
            StatId::MonsterReduction => 0.25,
            StatId::StageSkip => 0.5,
        }
    }

    pub fn potential_value(&self, tier: PotentialTier) -> f64 {
        self.base_potential_value() * tier.multiplier()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatRoll {
    pub stat: StatId,
    pub value: f64,
    #[serde(default)]
    pub is_main: bool,
    pub tier: PotentialTier,
    #[serde(default)]
    pub locked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: Uuid,
    pub slot: EquipmentSlot,
    pub grade: Grade,
    pub item_level: u32,
    /// Index 0 is the main stat; the rest are potentials.
    pub stats: Vec<StatRoll>,
    #[serde(default)]
    pub enhance_level: u32,
    #[serde(default)]
    pub awakenings: u32,
    #[serde(default = "default_upgrade_charges")]
    pub upgrade_charges: u32,
    #[serde(default)]
    pub ancient: bool,
    #[serde(default)]
    pub set_id: Option<SetId>,
    /// Locked items are protected from disassembly.
    #[serde(default)]
    pub locked: bool,
}

fn default_upgrade_charges() -> u32 {
    UPGRADE_CHARGES
}

impl Item {
    pub fn display_name(&self) -> String {
        let mut name = String::new();
        if self.enhance_level > 0 {
            name.push_str(&format!("+{} ", self.enhance_level));
        }
        if self.ancient {
            name.push_str("Ancient ");
        }
        if let Some(set) = self.set_id {
            name.push_str(set.name());
            name.push(' ');
        }
        name.push_str(&format!(
            "{} {} (Lv {})",
            self.grade.name(),
            self.slot.name(),
            self.item_level
        ));
        name
    }

    pub fn main_stat(&self) -> Option<&StatRoll> {
        self.stats.iter().find(|s| s.is_main)
    }

    pub fn potentials(&self) -> impl Iterator<Item = &StatRoll> {
        self.stats.iter().filter(|s| !s.is_main)
    }

    pub fn locked_potential_count(&self) -> usize {
        self.potentials().filter(|s| s.locked).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_ordering() {
        assert!(Grade::Common < Grade::Rare);
        assert!(Grade::Legendary < Grade::Mythic);
        assert_eq!(Grade::Mythic.index(), 5);
    }

    #[test]
    fn test_potential_values_scale_with_tier() {
        let normal = StatId::CritDamage.potential_value(PotentialTier::Normal);
        let top = StatId::CritDamage.potential_value(PotentialTier::TOP);
        assert_eq!(normal, 2.0);
        assert_eq!(top, 16.0);
    }

    #[test]
    fn test_enhancement_exclusions() {
        assert!(StatId::CritChance.enhancement_excluded());
        assert!(StatId::StageSkip.enhancement_excluded());
        assert!(!StatId::Attack.enhancement_excluded());
        assert!(!StatId::GoldPercent.enhancement_excluded());
    }

    #[test]
    fn test_old_item_without_charges_gets_full_charges() {
        let json = r#"{
            "id": "00000000-0000-0000-0000-000000000007",
            "slot": "Ring",
            "grade": "Epic",
            "item_level": 12,
            "stats": [{"stat": "Attack", "value": 30.0, "is_main": true, "tier": "Normal"}]
        }"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.upgrade_charges, UPGRADE_CHARGES);
        assert_eq!(item.enhance_level, 0);
        assert!(!item.locked);
    }

    #[test]
    fn test_potential_pool_has_no_main_stat() {
        assert!(!StatId::POTENTIALS.contains(&StatId::Attack));
    }
}
