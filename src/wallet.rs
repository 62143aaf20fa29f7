//! Currency and consumable balances.
//!
//! Every balance goes through `Wallet`, so "never negative" is enforced in
//! exactly one place: `spend` refuses instead of underflowing.

use crate::core::command::CommandError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Currency {
    Gold,
    /// Item-level upgrade currency, also produced by disassembly.
    Essence,
    AwakenStone,
    ProtectionScroll,
    PotentialOrb,
    LockKey,
    PerfectCube,
    /// Meta currency: relic gacha and relic levels. Survives prestige.
    RelicFragment,
    /// Meta currency: unlock an encountered collection entry. Survives prestige.
    CaptureTicket,
}

impl Currency {
    pub const ALL: [Currency; 9] = [
        Currency::Gold,
        Currency::Essence,
        Currency::AwakenStone,
        Currency::ProtectionScroll,
        Currency::PotentialOrb,
        Currency::LockKey,
        Currency::PerfectCube,
        Currency::RelicFragment,
        Currency::CaptureTicket,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Currency::Gold => "Gold",
            Currency::Essence => "Essence",
            Currency::AwakenStone => "Awaken Stone",
            Currency::ProtectionScroll => "Protection Scroll",
            Currency::PotentialOrb => "Potential Orb",
            Currency::LockKey => "Lock Key",
            Currency::PerfectCube => "Perfect Cube",
            Currency::RelicFragment => "Relic Fragment",
            Currency::CaptureTicket => "Capture Ticket",
        }
    }

    /// Meta currencies are kept through a prestige reset.
    pub fn is_meta(&self) -> bool {
        matches!(self, Currency::RelicFragment | Currency::CaptureTicket)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Wallet {
    balances: BTreeMap<Currency, u64>,
}

impl Wallet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance(&self, currency: Currency) -> u64 {
        self.balances.get(&currency).copied().unwrap_or(0)
    }

    pub fn has(&self, currency: Currency, amount: u64) -> bool {
        self.balance(currency) >= amount
    }

    pub fn add(&mut self, currency: Currency, amount: u64) {
        if amount == 0 {
            return;
        }
        let entry = self.balances.entry(currency).or_insert(0);
        *entry = entry.saturating_add(amount);
    }

    /// Checks the balance without spending; used to validate multi-currency costs
    /// before any of them is deducted.
    pub fn require(&self, currency: Currency, amount: u64) -> Result<(), CommandError> {
        let available = self.balance(currency);
        if available < amount {
            return Err(CommandError::short(currency, amount, available));
        }
        Ok(())
    }

    /// Deducts `amount`, or leaves the wallet untouched and reports the shortfall.
    pub fn spend(&mut self, currency: Currency, amount: u64) -> Result<(), CommandError> {
        self.require(currency, amount)?;
        if amount > 0 {
            if let Some(balance) = self.balances.get_mut(&currency) {
                *balance -= amount;
            }
        }
        Ok(())
    }

    /// Drops every non-meta balance (prestige reset).
    pub fn reset_non_meta(&mut self) {
        self.balances.retain(|currency, _| currency.is_meta());
    }
}
