use crate::core::balance::{prestige_fragments, prestige_points};
use crate::core::command::{CommandError, CommandResult, Outcome};
use crate::core::constants::PRESTIGE_MIN_FLOOR;
use crate::core::game_state::GameState;
use crate::items::{Equipment, Inventory};
use crate::relics::{RelicBonuses, RelicEffect};
use crate::wallet::Currency;

/// What a prestige paid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrestigeReward {
    pub fragments: u64,
    pub prestige_points: u32,
}

/// Checks if the player can prestige from the current floor.
pub fn can_prestige(state: &GameState) -> Result<(), CommandError> {
    let floor = state.player.current_floor;
    if floor < PRESTIGE_MIN_FLOOR {
        return Err(CommandError::invalid(format!(
            "Prestige requires floor {}, currently on {}",
            PRESTIGE_MIN_FLOOR, floor
        )));
    }
    Ok(())
}

/// Rewards for prestiging right now, including the relic fragment bonus.
pub fn preview_prestige(state: &GameState) -> PrestigeReward {
    let floor = state.player.current_floor;
    let bonus = RelicBonuses::from_relics(&state.relics).get(RelicEffect::FragmentBonus);
    PrestigeReward {
        fragments: (prestige_fragments(floor) as f64 * (1.0 + bonus / 100.0)).floor() as u64,
        prestige_points: prestige_points(floor),
    }
}

/// Performs a prestige, resetting the run and paying out meta rewards.
///
/// Relics, the collection ledger, companions, prestige skills, meta
/// currencies and settings survive; everything else starts over.
pub fn perform_prestige(state: &mut GameState) -> CommandResult<PrestigeReward> {
    can_prestige(state)?;
    let reward = preview_prestige(state);
    let floor = state.player.current_floor;

    state.player.prestige_points += reward.prestige_points;
    state.player.prestige_count += 1;
    state.player.reset_for_prestige();

    state.skills.levels.clear();
    state.equipment = Equipment::new();
    state.inventory = Inventory::new();
    state.wallet.reset_non_meta();
    state.wallet.add(Currency::RelicFragment, reward.fragments);
    state.monster = None;

    Ok(Outcome::new(
        reward,
        format!(
            "Prestiged from floor {}: +{} relic fragments, +{} prestige points",
            floor, reward.fragments, reward.prestige_points
        ),
    ))
}
