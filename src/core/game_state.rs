use super::combat_log::CombatLog;
use crate::character::player::PlayerState;
use crate::character::skills::Skills;
use crate::collection::CollectionLedger;
use crate::combat::types::Monster;
use crate::companions::Companions;
use crate::enhancement::ForgeStats;
use crate::items::{Equipment, Grade, Inventory};
use crate::relics::Relics;
use crate::wallet::Wallet;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Player-chosen automation toggles. Kept through prestige.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Enter the boss as soon as the kill threshold is reached.
    pub auto_boss: bool,
    /// Drops at or below this grade are disassembled on pickup.
    pub auto_disassemble_grade: Option<Grade>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_boss: true,
            auto_disassemble_grade: None,
        }
    }
}

/// The whole persisted simulation aggregate.
///
/// IMPORTANT: every field defaults, so a blob from an older version with
/// missing fields still loads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameState {
    pub session_id: Uuid,
    pub player: PlayerState,
    pub monster: Option<Monster>,
    pub equipment: Equipment,
    pub inventory: Inventory,
    pub wallet: Wallet,
    pub ledger: CollectionLedger,
    pub relics: Relics,
    pub skills: Skills,
    pub companions: Companions,
    pub settings: Settings,
    pub forge: ForgeStats,
    pub combat_log: CombatLog,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Uuid::nil())
    }
}

impl GameState {
    pub fn new(session_id: Uuid) -> Self {
        Self {
            session_id,
            player: PlayerState::new(),
            monster: None,
            equipment: Equipment::new(),
            inventory: Inventory::new(),
            wallet: Wallet::new(),
            ledger: CollectionLedger::new(),
            relics: Relics::new(),
            skills: Skills::new(),
            companions: Companions::new(),
            settings: Settings::default(),
            forge: ForgeStats::default(),
            combat_log: CombatLog::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_blob_loads_defaults() {
        let state: GameState = serde_json::from_str("{}").unwrap();
        assert_eq!(state, GameState::default());
        assert!(state.settings.auto_boss);
    }

    #[test]
    fn test_partial_blob_keeps_present_fields() {
        let json = r#"{"player": {"current_floor": 12, "highest_floor": 15}}"#;
        let state: GameState = serde_json::from_str(json).unwrap();
        assert_eq!(state.player.current_floor, 12);
        assert_eq!(state.player.highest_floor, 15);
        assert_eq!(state.player.level, 1);
        assert!(state.monster.is_none());
    }

    #[test]
    fn test_json_round_trip() {
        let mut state = GameState::new(Uuid::from_u128(5));
        state.player.current_floor = 8;
        state.wallet.add(crate::wallet::Currency::Gold, 1234);
        let json = serde_json::to_string(&state).unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
