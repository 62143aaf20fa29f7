use super::types::{CollectionKey, CollectionKind, CollectionLedger};
use crate::core::command::{CommandError, CommandResult, Outcome};
use crate::core::constants::*;
use crate::wallet::{Currency, Wallet};
use rand::Rng;
use std::collections::BTreeMap;

pub fn capture_chance(kind: CollectionKind) -> f64 {
    match kind {
        CollectionKind::Rare => RARE_CAPTURE_CHANCE,
        CollectionKind::Legendary => LEGENDARY_CAPTURE_CHANCE,
        CollectionKind::Boss => BOSS_CAPTURE_CHANCE,
    }
}

/// Records a kill of a collectible monster and rolls its capture.
/// Returns true if this kill captured it.
pub fn record_kill<R: Rng>(ledger: &mut CollectionLedger, key: CollectionKey, rng: &mut R) -> bool {
    let entry = ledger.entries.entry(key).or_default();
    entry.encounters += 1;
    if entry.unlocked {
        return false;
    }
    if rng.gen_bool(capture_chance(key.kind)) {
        entry.unlocked = true;
        return true;
    }
    false
}

/// Pays out every milestone the lifetime release count has crossed.
fn claim_milestones(ledger: &mut CollectionLedger, wallet: &mut Wallet) -> Vec<String> {
    let mut notes = Vec::new();
    for &(threshold, fragments) in RELEASE_MILESTONES
        .iter()
        .skip(ledger.milestones_claimed as usize)
    {
        if ledger.lifetime_releases < threshold {
            break;
        }
        wallet.add(Currency::RelicFragment, fragments);
        ledger.milestones_claimed += 1;
        notes.push(format!(
            "Release milestone {threshold} reached: +{fragments} relic fragments"
        ));
    }
    notes
}

fn release_entry(ledger: &mut CollectionLedger, key: CollectionKey) {
    if let Some(entry) = ledger.entries.get_mut(&key) {
        entry.unlocked = false;
        entry.released = 1;
    }
    *ledger.band_releases.entry(key.band).or_insert(0) += 1;
    ledger.lifetime_releases += 1;
}

/// Releases a captured monster for a permanent band bonus. Once per identity.
pub fn release(
    ledger: &mut CollectionLedger,
    key: CollectionKey,
    wallet: &mut Wallet,
) -> CommandResult {
    let entry = ledger
        .entry(&key)
        .ok_or_else(|| CommandError::not_found("Monster not in collection"))?;
    if entry.released >= 1 {
        return Err(CommandError::at_limit("Monster already released"));
    }
    if !entry.unlocked {
        return Err(CommandError::invalid("Monster not captured"));
    }

    release_entry(ledger, key);
    let notes = claim_milestones(ledger, wallet);
    Ok(Outcome::done(format!(
        "Released {} monster of band {}",
        key.kind.name(),
        key.band + 1
    ))
    .with_notes(notes))
}

/// Releases every releasable entry in key order. Returns how many.
pub fn release_all(ledger: &mut CollectionLedger, wallet: &mut Wallet) -> CommandResult<usize> {
    let keys: Vec<CollectionKey> = ledger
        .entries
        .iter()
        .filter(|(_, entry)| entry.can_release())
        .map(|(key, _)| *key)
        .collect();
    if keys.is_empty() {
        return Err(CommandError::invalid("No captured monsters to release"));
    }
    for key in &keys {
        release_entry(ledger, *key);
    }
    let notes = claim_milestones(ledger, wallet);
    Ok(Outcome::new(keys.len(), format!("Released {} monsters", keys.len())).with_notes(notes))
}

/// Unlocks an encountered monster with a capture ticket.
pub fn unlock_with_ticket(
    ledger: &mut CollectionLedger,
    key: CollectionKey,
    wallet: &mut Wallet,
) -> CommandResult {
    let entry = ledger
        .entries
        .get_mut(&key)
        .ok_or_else(|| CommandError::not_found("Monster never encountered"))?;
    if entry.unlocked {
        return Err(CommandError::at_limit("Monster already captured"));
    }
    wallet.spend(Currency::CaptureTicket, 1)?;
    entry.unlocked = true;
    Ok(Outcome::done(format!(
        "Captured {} monster of band {} with a ticket",
        key.kind.name(),
        key.band + 1
    )))
}

/// Permanent bonuses derived from the ledger.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionBonuses {
    pub flat_attack: f64,
    pub gold_percent: f64,
    pub boss_damage_percent: f64,
    pub monster_reduction: u32,
    /// Added to spawn probabilities (fractions, not percent).
    pub rare_spawn_bonus: f64,
    pub legendary_spawn_bonus: f64,
    band_releases: BTreeMap<u32, u32>,
}

impl CollectionBonuses {
    pub fn from_ledger(ledger: &CollectionLedger) -> Self {
        let mut flat_attack = 0.0;
        let mut gold_percent = 0.0;
        let mut boss_damage_percent = 0.0;
        for (key, _) in ledger.entries.iter().filter(|(_, e)| e.unlocked) {
            match key.kind {
                CollectionKind::Rare => {
                    flat_attack += RARE_COLLECTION_ATTACK;
                    gold_percent += COLLECTION_GOLD_PER_ENTRY;
                }
                CollectionKind::Legendary => {
                    flat_attack += LEGENDARY_COLLECTION_ATTACK;
                    gold_percent += COLLECTION_GOLD_PER_ENTRY;
                }
                CollectionKind::Boss => boss_damage_percent += BOSS_COLLECTION_DAMAGE_PERCENT,
            }
        }
        let milestones = ledger.milestones_claimed as f64;
        Self {
            flat_attack,
            gold_percent,
            boss_damage_percent,
            monster_reduction: (ledger.unlocked_count(CollectionKind::Legendary) / 2)
                .min(MAX_COLLECTION_MONSTER_REDUCTION),
            rare_spawn_bonus: milestones * MILESTONE_RARE_SPAWN_BONUS,
            legendary_spawn_bonus: milestones * MILESTONE_LEGENDARY_SPAWN_BONUS,
            band_releases: ledger.band_releases.clone(),
        }
    }

    fn releases(&self, band: u32) -> f64 {
        self.band_releases.get(&band).copied().unwrap_or(0) as f64
    }

    pub fn release_damage_percent(&self, band: u32) -> f64 {
        self.releases(band) * RELEASE_DAMAGE_PERCENT
    }

    pub fn release_gold_percent(&self, band: u32) -> f64 {
        self.releases(band) * RELEASE_GOLD_PERCENT
    }

    pub fn release_drop_percent(&self, band: u32) -> f64 {
        self.releases(band) * RELEASE_DROP_PERCENT
    }
}

/// Marks an entry captured without a roll.
#[cfg(test)]
pub(crate) fn force_unlock(ledger: &mut CollectionLedger, key: CollectionKey) {
    ledger.entries.entry(key).or_default().unlocked = true;
}
