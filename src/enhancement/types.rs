use serde::{Deserialize, Serialize};

/// Lifetime forge counters, kept in the snapshot for reporting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForgeStats {
    pub enhance_attempts: u32,
    pub enhance_successes: u32,
    pub enhance_downgrades: u32,
    pub upgrade_attempts: u32,
    pub upgrade_successes: u32,
    pub highest_enhance_level: u32,
    pub items_disassembled: u32,
}

impl ForgeStats {
    pub fn record_enhance(&mut self, result: EnhanceResult, level_after: u32) {
        self.enhance_attempts += 1;
        match result {
            EnhanceResult::Success => self.enhance_successes += 1,
            EnhanceResult::Downgraded => self.enhance_downgrades += 1,
            EnhanceResult::Failed | EnhanceResult::Protected => {}
        }
        self.highest_enhance_level = self.highest_enhance_level.max(level_after);
    }

    pub fn record_upgrade(&mut self, succeeded: bool) {
        self.upgrade_attempts += 1;
        if succeeded {
            self.upgrade_successes += 1;
        }
    }
}

/// How an enhancement attempt resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnhanceResult {
    Success,
    /// Failed without losing a level.
    Failed,
    /// Failed and lost one level.
    Downgraded,
    /// Failed; a protection scroll prevented the downgrade roll.
    Protected,
}

impl EnhanceResult {
    pub fn is_success(&self) -> bool {
        matches!(self, EnhanceResult::Success)
    }
}

/// Items consumed and essence produced by a disassembly pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisassembleSummary {
    pub items: usize,
    pub essence: u64,
}
