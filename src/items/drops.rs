//! Probability tables for drops and grade rolls.
//!
//! Tables are listed lowest grade first. A roll walks them from the top grade
//! down, accumulating probability; if floating error leaves the roll above
//! the cumulative total, the lowest grade is returned.

use super::types::{EquipmentSlot, Grade, PotentialTier};
use crate::wallet::Currency;
use rand::Rng;

pub const EQUIPMENT_GRADES: [(Grade, f64); 6] = [
    (Grade::Common, 0.60),
    (Grade::Rare, 0.25),
    (Grade::Epic, 0.10),
    (Grade::Unique, 0.04),
    (Grade::Legendary, 0.009),
    (Grade::Mythic, 0.001),
];

pub const BOSS_EQUIPMENT_GRADES: [(Grade, f64); 6] = [
    (Grade::Common, 0.30),
    (Grade::Rare, 0.35),
    (Grade::Epic, 0.20),
    (Grade::Unique, 0.10),
    (Grade::Legendary, 0.04),
    (Grade::Mythic, 0.01),
];

pub const COMPANION_GRADES: [(Grade, f64); 5] = [
    (Grade::Common, 0.60),
    (Grade::Rare, 0.25),
    (Grade::Epic, 0.10),
    (Grade::Unique, 0.04),
    (Grade::Legendary, 0.01),
];

/// One consumable drop category: chance and amount for normal and boss kills.
#[derive(Debug, Clone, Copy)]
pub struct CurrencyDrop {
    pub currency: Currency,
    pub chance: f64,
    pub amount: u64,
    pub boss_chance: f64,
    pub boss_amount: u64,
}

pub const CURRENCY_DROPS: [CurrencyDrop; 7] = [
    CurrencyDrop {
        currency: Currency::Essence,
        chance: 0.10,
        amount: 1,
        boss_chance: 1.0,
        boss_amount: 10,
    },
    CurrencyDrop {
        currency: Currency::PotentialOrb,
        chance: 0.02,
        amount: 1,
        boss_chance: 0.5,
        boss_amount: 2,
    },
    CurrencyDrop {
        currency: Currency::AwakenStone,
        chance: 0.002,
        amount: 1,
        boss_chance: 0.2,
        boss_amount: 1,
    },
    CurrencyDrop {
        currency: Currency::ProtectionScroll,
        chance: 0.005,
        amount: 1,
        boss_chance: 0.2,
        boss_amount: 1,
    },
    CurrencyDrop {
        currency: Currency::LockKey,
        chance: 0.01,
        amount: 1,
        boss_chance: 0.25,
        boss_amount: 1,
    },
    CurrencyDrop {
        currency: Currency::PerfectCube,
        chance: 0.001,
        amount: 1,
        boss_chance: 0.05,
        boss_amount: 1,
    },
    CurrencyDrop {
        currency: Currency::CaptureTicket,
        chance: 0.0,
        amount: 0,
        boss_chance: 0.05,
        boss_amount: 1,
    },
];

/// Cumulative-probability roll over a lowest-first table. Always returns a grade.
pub fn roll_grade<T: Copy>(table: &[(T, f64)], lowest: T, rng: &mut impl Rng) -> T {
    let roll = rng.gen::<f64>();
    let mut cumulative = 0.0;
    for &(grade, probability) in table.iter().rev() {
        cumulative += probability;
        if roll < cumulative {
            return grade;
        }
    }
    lowest
}

pub fn roll_equipment_grade(is_boss: bool, rng: &mut impl Rng) -> Grade {
    if is_boss {
        roll_grade(&BOSS_EQUIPMENT_GRADES, Grade::Common, rng)
    } else {
        roll_grade(&EQUIPMENT_GRADES, Grade::Common, rng)
    }
}

pub fn roll_companion_grade(rng: &mut impl Rng) -> Grade {
    roll_grade(&COMPANION_GRADES, Grade::Common, rng)
}

/// Potential tier weights; better item grades shift weight upward.
pub fn potential_tier_table(grade: Grade) -> [(PotentialTier, f64); 5] {
    let weights = match grade {
        Grade::Common => [0.70, 0.22, 0.07, 0.01, 0.0],
        Grade::Rare => [0.55, 0.30, 0.11, 0.035, 0.005],
        Grade::Epic => [0.40, 0.35, 0.17, 0.06, 0.02],
        Grade::Unique => [0.25, 0.35, 0.25, 0.11, 0.04],
        Grade::Legendary => [0.10, 0.30, 0.33, 0.19, 0.08],
        Grade::Mythic => [0.0, 0.20, 0.35, 0.30, 0.15],
    };
    let mut table = [(PotentialTier::Normal, 0.0); 5];
    for (entry, (tier, weight)) in table
        .iter_mut()
        .zip(PotentialTier::ALL.into_iter().zip(weights))
    {
        *entry = (tier, weight);
    }
    table
}

pub fn roll_potential_tier(grade: Grade, rng: &mut impl Rng) -> PotentialTier {
    roll_grade(&potential_tier_table(grade), PotentialTier::Normal, rng)
}

pub fn roll_random_slot(rng: &mut impl Rng) -> EquipmentSlot {
    EquipmentSlot::ALL[rng.gen_range(0..EquipmentSlot::ALL.len())]
}

/// Scales a base drop chance by a drop-rate percentage, capped at certainty.
pub fn scaled_chance(base: f64, drop_rate_percent: f64) -> f64 {
    (base * (1.0 + drop_rate_percent / 100.0)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_tables_sum_to_one() {
        let sum: f64 = EQUIPMENT_GRADES.iter().map(|(_, p)| p).sum();
        assert!((sum - 1.0).abs() < 1e-9);
        let sum: f64 = BOSS_EQUIPMENT_GRADES.iter().map(|(_, p)| p).sum();
        assert!((sum - 1.0).abs() < 1e-9);
        for grade in Grade::ALL {
            let sum: f64 = potential_tier_table(grade).iter().map(|(_, p)| p).sum();
            assert!((sum - 1.0).abs() < 1e-9, "{grade:?} sums to {sum}");
        }
    }

    #[test]
    fn test_roll_falls_back_to_lowest_when_table_short() {
        // Sums to 0.3: most rolls miss every threshold.
        let table = [(Grade::Common, 0.1), (Grade::Rare, 0.1), (Grade::Epic, 0.1)];
        // StepRng at u64::MAX produces a float just below 1.0.
        let mut rng = StepRng::new(u64::MAX, 0);
        assert_eq!(roll_grade(&table, Grade::Common, &mut rng), Grade::Common);
    }

    #[test]
    fn test_roll_zero_hits_top_grade() {
        let mut rng = StepRng::new(0, 0);
        assert_eq!(roll_equipment_grade(false, &mut rng), Grade::Mythic);
    }

    #[test]
    fn test_equipment_distribution() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut common = 0;
        let mut above_epic = 0;
        for _ in 0..10_000 {
            let grade = roll_equipment_grade(false, &mut rng);
            if grade == Grade::Common {
                common += 1;
            }
            if grade > Grade::Epic {
                above_epic += 1;
            }
        }
        assert!(common > 5500 && common < 6500, "common {common}");
        assert!(above_epic > 300 && above_epic < 800, "above epic {above_epic}");
    }

    #[test]
    fn test_boss_table_is_better() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let normal: usize = (0..5000)
            .map(|_| roll_equipment_grade(false, &mut rng).index())
            .sum();
        let boss: usize = (0..5000)
            .map(|_| roll_equipment_grade(true, &mut rng).index())
            .sum();
        assert!(boss > normal);
    }

    #[test]
    fn test_scaled_chance_caps_at_one() {
        assert_eq!(scaled_chance(0.5, 300.0), 1.0);
        assert!((scaled_chance(0.05, 100.0) - 0.10).abs() < 1e-12);
    }
}
