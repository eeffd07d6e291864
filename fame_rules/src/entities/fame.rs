//! Fame records and the per-player record set.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{PlayerId, ZoneCategory};

/// Progress of one player in one zone category.
///
/// `level` is signed: weekly demotion may push it below 1 unless the
/// settings clamp it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FameRecord {
    pub id: ZoneCategory,
    pub level: i32,
    /// Progress within the current level.
    pub exp: i64,
    /// Experience lost on death that can still be recovered.
    pub exp_loss: i64,
    /// Number of stored updates this copy has seen. Storage rejects an
    /// update whose revision lags the stored one.
    #[serde(default)]
    pub revision: u64,
    owner_id: PlayerId,
}

impl FameRecord {
    /// A fresh record at level 1 with no progress.
    pub fn new(id: ZoneCategory, owner_id: PlayerId) -> Self {
        Self {
            id,
            level: 1,
            exp: 0,
            exp_loss: 0,
            revision: 0,
            owner_id,
        }
    }

    /// Rebuild a record from stored values.
    pub fn restore(id: ZoneCategory, level: i32, exp: i64, exp_loss: i64, owner_id: PlayerId) -> Self {
        Self {
            id,
            level,
            exp,
            exp_loss,
            revision: 0,
            owner_id,
        }
    }

    /// Set the stored revision.
    pub fn with_revision(mut self, revision: u64) -> Self {
        self.revision = revision;
        self
    }

    pub fn owner_id(&self) -> PlayerId {
        self.owner_id
    }
}

/// All fame records owned by one player, at most one per zone category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerFameSet {
    owner_id: PlayerId,
    records: BTreeMap<ZoneCategory, FameRecord>,
}

impl PlayerFameSet {
    /// Create an empty set for a player.
    pub fn new(owner_id: PlayerId) -> Self {
        Self {
            owner_id,
            records: BTreeMap::new(),
        }
    }

    pub fn owner_id(&self) -> PlayerId {
        self.owner_id
    }

    /// Insert a record if its category is vacant and the owner matches.
    ///
    /// Returns `false` and leaves the set untouched otherwise.
    pub fn insert(&mut self, record: FameRecord) -> bool {
        if record.owner_id != self.owner_id || self.records.contains_key(&record.id) {
            return false;
        }
        self.records.insert(record.id, record);
        true
    }

    pub fn contains(&self, category: ZoneCategory) -> bool {
        self.records.contains_key(&category)
    }

    pub fn get(&self, category: ZoneCategory) -> Option<&FameRecord> {
        self.records.get(&category)
    }

    pub fn get_mut(&mut self, category: ZoneCategory) -> Option<&mut FameRecord> {
        self.records.get_mut(&category)
    }

    /// Records in ascending category order.
    pub fn records(&self) -> impl Iterator<Item = &FameRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
