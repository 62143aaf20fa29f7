use super::equipment::Equipment;
use super::sets::SetId;
use super::types::{Item, StatId};
use crate::core::balance::enhancement_multiplier;
use std::collections::BTreeMap;

/// Summed stats of everything equipped, set bonuses included.
///
/// Values are percent points except `Attack` (flat) and `MonsterReduction`
/// (monsters per floor). Getters never roll or mutate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EquipmentBonuses {
    values: BTreeMap<StatId, f64>,
}

impl EquipmentBonuses {
    pub fn from_equipment(equipment: &Equipment) -> Self {
        let mut bonuses = Self::default();
        let mut set_pieces: BTreeMap<SetId, usize> = BTreeMap::new();

        for item in equipment.iter_equipped() {
            bonuses.add_item(item);
            if let Some(set) = item.set_id {
                *set_pieces.entry(set).or_insert(0) += 1;
            }
        }

        for (set, pieces) in set_pieces {
            for bonus in set.active_bonuses(pieces) {
                bonuses.add(bonus.stat, bonus.value);
            }
        }
        bonuses
    }

    fn add_item(&mut self, item: &Item) {
        let multiplier = enhancement_multiplier(item.enhance_level);
        for roll in &item.stats {
            let value = if roll.stat.enhancement_excluded() {
                roll.value
            } else {
                roll.value * multiplier
            };
            self.add(roll.stat, value);
        }
    }

    fn add(&mut self, stat: StatId, value: f64) {
        *self.values.entry(stat).or_insert(0.0) += value;
    }

    pub fn get(&self, stat: StatId) -> f64 {
        self.values.get(&stat).copied().unwrap_or(0.0)
    }

    pub fn flat_attack(&self) -> f64 {
        self.get(StatId::Attack)
    }

    pub fn monster_reduction(&self) -> u32 {
        self.get(StatId::MonsterReduction).floor().max(0.0) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::types::{EquipmentSlot, Grade, PotentialTier, StatRoll};
    use uuid::Uuid;

    fn roll(stat: StatId, value: f64, is_main: bool) -> StatRoll {
        StatRoll {
            stat,
            value,
            is_main,
            tier: PotentialTier::Normal,
            locked: false,
        }
    }

    fn item(slot: EquipmentSlot, stats: Vec<StatRoll>, set_id: Option<SetId>) -> Item {
        Item {
            id: Uuid::from_u128(slot as u128 + 1),
            slot,
            grade: Grade::Common,
            item_level: 1,
            stats,
            enhance_level: 0,
            awakenings: 0,
            upgrade_charges: 10,
            ancient: false,
            set_id,
            locked: false,
        }
    }

    #[test]
    fn test_empty_equipment_has_no_bonuses() {
        let bonuses = EquipmentBonuses::from_equipment(&Equipment::new());
        assert_eq!(bonuses.flat_attack(), 0.0);
        assert_eq!(bonuses.monster_reduction(), 0);
    }

    #[test]
    fn test_enhancement_scales_attack_but_not_crit_chance() {
        let mut weapon = item(
            EquipmentSlot::Weapon,
            vec![
                roll(StatId::Attack, 100.0, true),
                roll(StatId::CritChance, 4.0, false),
                roll(StatId::GoldPercent, 10.0, false),
            ],
            None,
        );
        weapon.enhance_level = 10;
        let mut eq = Equipment::new();
        eq.equip(weapon);

        let bonuses = EquipmentBonuses::from_equipment(&eq);
        assert!((bonuses.flat_attack() - 150.0).abs() < 1e-9);
        assert!((bonuses.get(StatId::CritChance) - 4.0).abs() < 1e-9);
        assert!((bonuses.get(StatId::GoldPercent) - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_set_bonus_needs_two_pieces() {
        let mut eq = Equipment::new();
        eq.equip(item(
            EquipmentSlot::Weapon,
            vec![roll(StatId::Attack, 1.0, true)],
            Some(SetId::Fortune),
        ));
        assert_eq!(EquipmentBonuses::from_equipment(&eq).get(StatId::GoldPercent), 0.0);

        eq.equip(item(
            EquipmentSlot::Ring,
            vec![roll(StatId::Attack, 1.0, true)],
            Some(SetId::Fortune),
        ));
        assert_eq!(EquipmentBonuses::from_equipment(&eq).get(StatId::GoldPercent), 15.0);
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let mut eq = Equipment::new();
        eq.equip(item(
            EquipmentSlot::Helmet,
            vec![
                roll(StatId::Attack, 12.0, true),
                roll(StatId::MonsterReduction, 1.5, false),
            ],
            None,
        ));
        let first = EquipmentBonuses::from_equipment(&eq);
        let second = EquipmentBonuses::from_equipment(&eq);
        assert_eq!(first, second);
        assert_eq!(first.monster_reduction(), 1);
    }
}
