use crate::core::balance::xp_to_next_level;
use crate::core::constants::*;
use serde::{Deserialize, Serialize};

/// Where the player is in the floor/boss cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FloorState {
    #[default]
    Farming,
    /// Threshold reached but the boss must be entered by hand.
    BossReady,
    BossBattle,
}

/// Intrinsic stats before any bonus source. Percent values are percent points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseStats {
    pub attack: f64,
    pub crit_chance: f64,
    pub crit_damage: f64,
    pub gold_bonus: f64,
    pub drop_rate: f64,
}

impl Default for BaseStats {
    fn default() -> Self {
        Self {
            attack: BASE_ATTACK,
            crit_chance: BASE_CRIT_CHANCE,
            crit_damage: BASE_CRIT_DAMAGE,
            gold_bonus: 0.0,
            drop_rate: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerState {
    pub level: u32,
    pub experience: u64,
    pub experience_to_next: u64,
    pub skill_points: u32,
    pub prestige_points: u32,
    pub prestige_count: u32,
    pub current_floor: u32,
    pub highest_floor: u32,
    pub kills_on_floor: u32,
    /// When set, boss kills do not advance the floor.
    pub floor_locked: bool,
    pub floor_state: FloorState,
    pub boss_timer_seconds: u32,
    pub failed_boss_on_floor: bool,
    pub base: BaseStats,
    pub total_kills: u64,
    pub bosses_defeated: u64,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerState {
    pub fn new() -> Self {
        Self {
            level: 1,
            experience: 0,
            experience_to_next: xp_to_next_level(1),
            skill_points: 0,
            prestige_points: 0,
            prestige_count: 0,
            current_floor: 1,
            highest_floor: 1,
            kills_on_floor: 0,
            floor_locked: false,
            floor_state: FloorState::Farming,
            boss_timer_seconds: 0,
            failed_boss_on_floor: false,
            base: BaseStats::default(),
            total_kills: 0,
            bosses_defeated: 0,
        }
    }

    pub fn in_boss_battle(&self) -> bool {
        self.floor_state == FloorState::BossBattle
    }

    /// Adds experience and processes any level-ups. Returns levels gained.
    pub fn apply_xp(&mut self, xp: u64) -> u32 {
        self.experience = self.experience.saturating_add(xp);
        if self.experience_to_next == 0 {
            self.experience_to_next = xp_to_next_level(self.level);
        }
        let mut gained = 0;
        while self.experience >= self.experience_to_next {
            self.experience -= self.experience_to_next;
            self.level += 1;
            self.skill_points += SKILL_POINTS_PER_LEVEL;
            self.base.attack += ATTACK_PER_LEVEL;
            self.experience_to_next = xp_to_next_level(self.level);
            gained += 1;
        }
        gained
    }

    /// Clears the per-run fields on prestige. Prestige points, prestige count
    /// and lifetime kill counters stay.
    pub fn reset_for_prestige(&mut self) {
        *self = Self {
            prestige_points: self.prestige_points,
            prestige_count: self.prestige_count,
            total_kills: self.total_kills,
            bosses_defeated: self.bosses_defeated,
            ..Self::new()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_player_defaults() {
        let player = PlayerState::new();
        assert_eq!(player.level, 1);
        assert_eq!(player.current_floor, 1);
        assert_eq!(player.floor_state, FloorState::Farming);
        assert_eq!(player.base.attack, BASE_ATTACK);
        assert_eq!(player.experience_to_next, 100);
    }

    #[test]
    fn test_apply_xp_levels_up() {
        let mut player = PlayerState::new();
        assert_eq!(player.apply_xp(99), 0);
        assert_eq!(player.apply_xp(1), 1);
        assert_eq!(player.level, 2);
        assert_eq!(player.experience, 0);
        assert_eq!(player.skill_points, 1);
        assert_eq!(player.base.attack, BASE_ATTACK + ATTACK_PER_LEVEL);
    }

    #[test]
    fn test_apply_xp_multiple_levels() {
        let mut player = PlayerState::new();
        let gained = player.apply_xp(100_000);
        assert!(gained > 5);
        assert_eq!(player.skill_points, gained);
        assert!(player.experience < player.experience_to_next);
    }

    #[test]
    fn test_reset_keeps_meta() {
        let mut player = PlayerState::new();
        player.apply_xp(10_000);
        player.current_floor = 60;
        player.prestige_points = 3;
        player.prestige_count = 2;
        player.reset_for_prestige();
        assert_eq!(player.level, 1);
        assert_eq!(player.current_floor, 1);
        assert_eq!(player.prestige_points, 3);
        assert_eq!(player.prestige_count, 2);
    }

    #[test]
    fn test_missing_fields_default() {
        let player: PlayerState = serde_json::from_str(r#"{"level": 7}"#).unwrap();
        assert_eq!(player.level, 7);
        assert_eq!(player.current_floor, 1);
        assert_eq!(player.base.crit_damage, BASE_CRIT_DAMAGE);
    }
}
