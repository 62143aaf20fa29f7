use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CollectionKind {
    Rare,
    Legendary,
    Boss,
}

impl CollectionKind {
    pub fn name(&self) -> &'static str {
        match self {
            CollectionKind::Rare => "Rare",
            CollectionKind::Legendary => "Legendary",
            CollectionKind::Boss => "Boss",
        }
    }
}

/// Identity of a collectible monster: its floor band, kind, and index within
/// the band's catalog. Bosses are one per band, so their index is always 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CollectionKey {
    pub band: u32,
    pub kind: CollectionKind,
    pub index: u32,
}

impl CollectionKey {
    pub fn new(band: u32, kind: CollectionKind, index: u32) -> Self {
        let index = if kind == CollectionKind::Boss { 0 } else { index };
        Self { band, kind, index }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerEntry {
    pub encounters: u32,
    pub unlocked: bool,
    /// Capped at 1.
    pub released: u32,
}

impl LedgerEntry {
    pub fn can_release(&self) -> bool {
        self.unlocked && self.released == 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionLedger {
    #[serde(with = "entry_list")]
    pub entries: BTreeMap<CollectionKey, LedgerEntry>,
    /// Releases per floor band.
    pub band_releases: BTreeMap<u32, u32>,
    pub lifetime_releases: u32,
    /// How many of `RELEASE_MILESTONES` have been paid out.
    pub milestones_claimed: u32,
}

impl CollectionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry(&self, key: &CollectionKey) -> Option<&LedgerEntry> {
        self.entries.get(key)
    }

    pub fn band_release_count(&self, band: u32) -> u32 {
        self.band_releases.get(&band).copied().unwrap_or(0)
    }

    pub fn unlocked_count(&self, kind: CollectionKind) -> u32 {
        self.entries
            .iter()
            .filter(|(key, entry)| key.kind == kind && entry.unlocked)
            .count() as u32
    }
}

/// JSON objects only take string keys, so the entry map is stored as a list
/// of `[key, entry]` pairs.
mod entry_list {
    use super::{CollectionKey, LedgerEntry};
    use serde::{Deserialize, Deserializer, Serializer};
    use std::collections::BTreeMap;

    pub fn serialize<S: Serializer>(
        entries: &BTreeMap<CollectionKey, LedgerEntry>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(entries.iter())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<CollectionKey, LedgerEntry>, D::Error> {
        let pairs: Vec<(CollectionKey, LedgerEntry)> = Vec::deserialize(deserializer)?;
        Ok(pairs.into_iter().collect())
    }
}
