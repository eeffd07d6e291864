//! In-memory fame repository.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use fame_rules::{FameRecord, PlayerFameSet, PlayerId, ZoneCategory};

use crate::ports::{FameRepository, PersistenceError};

#[derive(Debug, Default)]
struct StoreState {
    records: BTreeMap<(PlayerId, ZoneCategory), FameRecord>,
    writes: usize,
}

/// Thread-safe `FameRepository` holding records in memory.
///
/// Writes are applied under a single lock. An update built from a stale
/// copy of a record is rejected, so a write never replaces a newer one.
#[derive(Debug, Default)]
pub struct InMemoryFameStore {
    state: Mutex<StoreState>,
}

impl InMemoryFameStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store without counting a write.
    pub fn seed(&self, record: FameRecord) -> Result<(), PersistenceError> {
        let mut state = self.lock()?;
        state
            .records
            .insert((record.owner_id(), record.id), record);
        Ok(())
    }

    /// Stored copy of one record.
    pub fn record(&self, player_id: PlayerId, category: ZoneCategory) -> Option<FameRecord> {
        self.lock()
            .ok()
            .and_then(|state| state.records.get(&(player_id, category)).cloned())
    }

    /// Number of create and update calls accepted so far.
    pub fn writes(&self) -> usize {
        self.lock().map(|state| state.writes).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.lock().map(|state| state.records.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreState>, PersistenceError> {
        self.state
            .lock()
            .map_err(|_| PersistenceError::Unavailable("fame store lock poisoned".to_string()))
    }
}

impl FameRepository for InMemoryFameStore {
    fn load_fame_set(&self, player_id: PlayerId) -> Result<PlayerFameSet, PersistenceError> {
        let state = self.lock()?;
        let mut set = PlayerFameSet::new(player_id);
        for ((owner, _), record) in &state.records {
            if *owner == player_id {
                set.insert(record.clone());
            }
        }
        Ok(set)
    }

    fn create_record(&self, player_id: PlayerId, record: &FameRecord) -> Result<(), PersistenceError> {
        check_owner(player_id, record)?;
        let mut state = self.lock()?;
        let key = (player_id, record.id);
        if state.records.contains_key(&key) {
            return Err(PersistenceError::Conflict {
                player: player_id,
                category: record.id,
            });
        }
        state.records.insert(key, record.clone());
        state.writes += 1;
        Ok(())
    }

    fn update_record(&self, player_id: PlayerId, record: &FameRecord) -> Result<(), PersistenceError> {
        check_owner(player_id, record)?;
        let mut state = self.lock()?;
        let stored = state
            .records
            .get_mut(&(player_id, record.id))
            .ok_or(PersistenceError::NotFound {
                player: player_id,
                category: record.id,
            })?;
        if stored.revision != record.revision {
            return Err(PersistenceError::Conflict {
                player: player_id,
                category: record.id,
            });
        }
        *stored = record.clone();
        stored.revision += 1;
        state.writes += 1;
        Ok(())
    }

    fn bulk_load_all_for_decay(&self) -> Result<Vec<FameRecord>, PersistenceError> {
        let state = self.lock()?;
        Ok(state.records.values().cloned().collect())
    }
}

fn check_owner(player_id: PlayerId, record: &FameRecord) -> Result<(), PersistenceError> {
    if record.owner_id() == player_id {
        Ok(())
    } else {
        Err(PersistenceError::OwnerMismatch {
            player: player_id,
            owner: record.owner_id(),
            category: record.id,
        })
    }
}
