//! Floor and boss state machine.
//!
//! `Farming -> BossReady -> BossBattle -> Farming`, with the boss entered
//! automatically unless it was failed on this floor. These functions only move
//! `PlayerState` between states; spawning and rewards belong to the tick.

use crate::character::player::{FloorState, PlayerState};
use crate::core::command::{CommandError, CommandResult, Outcome};
use crate::core::constants::*;
use rand::Rng;

/// What a farming kill did to the floor state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FarmingOutcome {
    /// Still counting toward the boss.
    Counting,
    /// Threshold reached; waiting for the player to enter the boss.
    BossReady,
    /// Threshold reached; the boss should be entered now.
    EnterBoss,
}

/// Counts a farming kill. The stage-skip chance may add up to
/// `MAX_STAGE_SKIP_ROLLS` extra kills, but never carries the counter past
/// `required - 1`: only a real kill reaches the threshold.
pub fn record_farming_kill<R: Rng>(
    player: &mut PlayerState,
    required: u32,
    stage_skip_percent: f64,
    auto_boss: bool,
    rng: &mut R,
) -> FarmingOutcome {
    player.kills_on_floor += 1;

    let chance = (stage_skip_percent / 100.0).clamp(0.0, 1.0);
    if chance > 0.0 {
        for _ in 0..MAX_STAGE_SKIP_ROLLS {
            if player.kills_on_floor + 1 >= required || !rng.gen_bool(chance) {
                break;
            }
            player.kills_on_floor += 1;
        }
    }

    if player.kills_on_floor < required {
        return FarmingOutcome::Counting;
    }
    if player.failed_boss_on_floor || !auto_boss {
        player.floor_state = FloorState::BossReady;
        FarmingOutcome::BossReady
    } else {
        FarmingOutcome::EnterBoss
    }
}

/// Checks that the boss can be entered by hand.
pub fn can_enter_boss(player: &PlayerState, required: u32) -> Result<(), CommandError> {
    match player.floor_state {
        FloorState::BossBattle => Err(CommandError::invalid("Boss battle already in progress")),
        FloorState::BossReady => Ok(()),
        FloorState::Farming if player.kills_on_floor >= required => Ok(()),
        FloorState::Farming => Err(CommandError::invalid(format!(
            "Defeat {} more monsters first",
            required - player.kills_on_floor
        ))),
    }
}

/// Rolls the relic boss-skip chance, capped at `MAX_BOSS_SKIP_CHANCE_PERCENT`.
pub fn roll_boss_skip<R: Rng>(skip_percent: f64, rng: &mut R) -> bool {
    let chance = skip_percent.clamp(0.0, MAX_BOSS_SKIP_CHANCE_PERCENT) / 100.0;
    chance > 0.0 && rng.gen_bool(chance)
}

/// Starts the boss timer. Returns the timer length in seconds.
pub fn start_boss_battle(player: &mut PlayerState, bonus_seconds: u32) -> u32 {
    player.floor_state = FloorState::BossBattle;
    player.boss_timer_seconds = BOSS_TIME_LIMIT_SECONDS + bonus_seconds;
    player.boss_timer_seconds
}

/// Boss defeated (or skipped). Returns true if the floor advanced.
pub fn complete_boss(player: &mut PlayerState) -> bool {
    player.floor_state = FloorState::Farming;
    player.kills_on_floor = 0;
    player.boss_timer_seconds = 0;
    player.failed_boss_on_floor = false;
    player.bosses_defeated += 1;

    if player.floor_locked {
        return false;
    }
    player.current_floor += 1;
    player.highest_floor = player.highest_floor.max(player.current_floor);
    true
}

/// Timer ran out. Progress is kept; only the automatic entry is lost.
pub fn fail_boss(player: &mut PlayerState) {
    player.floor_state = FloorState::Farming;
    player.boss_timer_seconds = 0;
    player.failed_boss_on_floor = true;
}

/// One second of boss timer. Returns true if this step timed the boss out.
pub fn tick_boss_timer(player: &mut PlayerState) -> bool {
    if !player.in_boss_battle() {
        return false;
    }
    player.boss_timer_seconds = player.boss_timer_seconds.saturating_sub(1);
    if player.boss_timer_seconds == 0 {
        fail_boss(player);
        return true;
    }
    false
}

fn move_to_floor(player: &mut PlayerState, floor: u32) {
    player.current_floor = floor;
    player.kills_on_floor = 0;
    player.failed_boss_on_floor = false;
    player.floor_state = FloorState::Farming;
}

/// Steps down one floor. Only while farming; a waiting boss must be fought first.
pub fn go_down_floor(player: &mut PlayerState) -> CommandResult<u32> {
    match player.floor_state {
        FloorState::Farming => {}
        FloorState::BossReady => {
            return Err(CommandError::invalid("The floor boss is waiting"));
        }
        FloorState::BossBattle => {
            return Err(CommandError::invalid("Cannot leave during a boss battle"));
        }
    }
    if player.current_floor <= 1 {
        return Err(CommandError::invalid("Already on the first floor"));
    }
    let floor = player.current_floor - 1;
    move_to_floor(player, floor);
    Ok(Outcome::new(floor, format!("Moved down to floor {floor}")))
}

/// Jumps to any floor already reached.
pub fn go_to_floor(player: &mut PlayerState, floor: u32) -> CommandResult<u32> {
    if player.in_boss_battle() {
        return Err(CommandError::invalid("Cannot leave during a boss battle"));
    }
    if floor == 0 || floor > player.highest_floor {
        return Err(CommandError::invalid(format!(
            "Floor {floor} not reached (highest is {})",
            player.highest_floor
        )));
    }
    move_to_floor(player, floor);
    Ok(Outcome::new(floor, format!("Moved to floor {floor}")))
}

pub fn toggle_floor_lock(player: &mut PlayerState) -> CommandResult<bool> {
    player.floor_locked = !player.floor_locked;
    let message = if player.floor_locked {
        format!("Floor {} locked", player.current_floor)
    } else {
        "Floor unlocked".to_string()
    };
    Ok(Outcome::new(player.floor_locked, message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(0)
    }

    #[test]
    fn test_counting_until_threshold_enters_boss() {
        let mut player = PlayerState::new();
        for _ in 0..9 {
            assert_eq!(
                record_farming_kill(&mut player, 10, 0.0, true, &mut rng()),
                FarmingOutcome::Counting
            );
        }
        assert_eq!(
            record_farming_kill(&mut player, 10, 0.0, true, &mut rng()),
            FarmingOutcome::EnterBoss
        );
        assert_eq!(player.kills_on_floor, 10);
    }

    #[test]
    fn test_failed_boss_goes_to_ready() {
        let mut player = PlayerState::new();
        player.kills_on_floor = 9;
        player.failed_boss_on_floor = true;
        assert_eq!(
            record_farming_kill(&mut player, 10, 0.0, true, &mut rng()),
            FarmingOutcome::BossReady
        );
        assert_eq!(player.floor_state, FloorState::BossReady);
    }

    #[test]
    fn test_auto_boss_off_goes_to_ready() {
        let mut player = PlayerState::new();
        player.kills_on_floor = 9;
        assert_eq!(
            record_farming_kill(&mut player, 10, 0.0, false, &mut rng()),
            FarmingOutcome::BossReady
        );
    }

    #[test]
    fn test_stage_skip_stops_one_short() {
        // StepRng(0) makes every gen_bool succeed.
        let mut always = StepRng::new(0, 0);
        let mut player = PlayerState::new();
        assert_eq!(
            record_farming_kill(&mut player, 10, 100.0, true, &mut always),
            FarmingOutcome::Counting
        );
        assert_eq!(player.kills_on_floor, 1 + MAX_STAGE_SKIP_ROLLS);

        player.kills_on_floor = 6;
        record_farming_kill(&mut player, 10, 100.0, true, &mut always);
        assert_eq!(player.kills_on_floor, 9);

        // The next real kill is the one that reaches the threshold.
        assert_eq!(
            record_farming_kill(&mut player, 10, 100.0, true, &mut always),
            FarmingOutcome::EnterBoss
        );
        assert_eq!(player.kills_on_floor, 10);
    }

    #[test]
    fn test_stage_skip_from_zero_lands_one_short() {
        for required in [3, MIN_MONSTERS_PER_FLOOR] {
            let mut player = PlayerState::new();
            assert_eq!(
                record_farming_kill(&mut player, required, 100.0, true, &mut rng()),
                FarmingOutcome::Counting
            );
            assert_eq!(player.kills_on_floor, required - 1);
            assert_eq!(player.floor_state, FloorState::Farming);
        }
    }

    #[test]
    fn test_complete_boss_advances_floor() {
        let mut player = PlayerState::new();
        player.kills_on_floor = 10;
        start_boss_battle(&mut player, 5);
        assert_eq!(player.boss_timer_seconds, BOSS_TIME_LIMIT_SECONDS + 5);
        assert!(complete_boss(&mut player));
        assert_eq!(player.current_floor, 2);
        assert_eq!(player.highest_floor, 2);
        assert_eq!(player.kills_on_floor, 0);
        assert_eq!(player.floor_state, FloorState::Farming);
    }

    #[test]
    fn test_locked_floor_does_not_advance() {
        let mut player = PlayerState::new();
        player.floor_locked = true;
        start_boss_battle(&mut player, 0);
        assert!(!complete_boss(&mut player));
        assert_eq!(player.current_floor, 1);
        assert_eq!(player.kills_on_floor, 0);
    }

    #[test]
    fn test_timer_runs_out() {
        let mut player = PlayerState::new();
        player.current_floor = 4;
        player.kills_on_floor = 12;
        start_boss_battle(&mut player, 0);
        for _ in 0..BOSS_TIME_LIMIT_SECONDS - 1 {
            assert!(!tick_boss_timer(&mut player));
        }
        assert!(tick_boss_timer(&mut player));
        assert_eq!(player.floor_state, FloorState::Farming);
        assert!(player.failed_boss_on_floor);
        assert_eq!(player.current_floor, 4);
        assert_eq!(player.kills_on_floor, 12);
    }

    #[test]
    fn test_timer_ignored_outside_battle() {
        let mut player = PlayerState::new();
        assert!(!tick_boss_timer(&mut player));
    }

    #[test]
    fn test_enter_boss_rules() {
        let mut player = PlayerState::new();
        assert!(can_enter_boss(&player, 10).is_err());
        player.kills_on_floor = 10;
        assert!(can_enter_boss(&player, 10).is_ok());
        player.floor_state = FloorState::BossReady;
        assert!(can_enter_boss(&player, 10).is_ok());
        player.floor_state = FloorState::BossBattle;
        assert!(can_enter_boss(&player, 10).is_err());
    }

    #[test]
    fn test_boss_skip_is_capped() {
        let mut never = StepRng::new(u64::MAX, 0);
        assert!(!roll_boss_skip(1000.0, &mut never));
        assert!(!roll_boss_skip(0.0, &mut StepRng::new(0, 0)));
        assert!(roll_boss_skip(10.0, &mut StepRng::new(0, 0)));
    }

    #[test]
    fn test_go_down_floor() {
        let mut player = PlayerState::new();
        assert!(go_down_floor(&mut player).is_err());

        player.current_floor = 5;
        player.highest_floor = 5;
        player.kills_on_floor = 3;
        player.failed_boss_on_floor = true;
        assert_eq!(go_down_floor(&mut player).unwrap().value, 4);
        assert_eq!(player.kills_on_floor, 0);
        assert!(!player.failed_boss_on_floor);
        assert_eq!(player.highest_floor, 5);

        player.floor_state = FloorState::BossReady;
        assert!(matches!(go_down_floor(&mut player), Err(CommandError::InvalidState(_))));
        assert_eq!(player.current_floor, 4);

        start_boss_battle(&mut player, 0);
        assert!(go_down_floor(&mut player).is_err());
        assert_eq!(player.current_floor, 4);
    }

    #[test]
    fn test_go_to_floor_bounds() {
        let mut player = PlayerState::new();
        player.highest_floor = 20;
        assert!(go_to_floor(&mut player, 21).is_err());
        assert!(go_to_floor(&mut player, 0).is_err());
        assert_eq!(go_to_floor(&mut player, 15).unwrap().value, 15);
        assert_eq!(player.current_floor, 15);
    }
}
