//! Collaborator ports consumed by the engine.

use fame_rules::{DescriptionRef, FameRecord, PlayerFameSet, PlayerId, ZoneCategory};
use thiserror::Error;

/// Errors reported by a `FameRepository`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    #[error("fame storage unavailable: {0}")]
    Unavailable(String),

    #[error("no stored fame record for player {player} in zone category {category}")]
    NotFound {
        player: PlayerId,
        category: ZoneCategory,
    },

    /// The record already exists, or the update carries a stale revision.
    #[error("fame record for player {player} in zone category {category} already exists or is stale")]
    Conflict {
        player: PlayerId,
        category: ZoneCategory,
    },

    #[error("fame record in zone category {category} is owned by {owner}, not player {player}")]
    OwnerMismatch {
        player: PlayerId,
        owner: PlayerId,
        category: ZoneCategory,
    },
}

/// Storage of fame records.
#[cfg_attr(test, mockall::automock)]
pub trait FameRepository: Send + Sync {
    fn load_fame_set(&self, player_id: PlayerId) -> Result<PlayerFameSet, PersistenceError>;
    fn create_record(&self, player_id: PlayerId, record: &FameRecord) -> Result<(), PersistenceError>;
    /// Replace a stored record. Fails with `Conflict` unless
    /// `record.revision` equals the stored revision; on success the stored
    /// revision advances by one.
    fn update_record(&self, player_id: PlayerId, record: &FameRecord) -> Result<(), PersistenceError>;
    /// Every stored record, across all players.
    fn bulk_load_all_for_decay(&self) -> Result<Vec<FameRecord>, PersistenceError>;
}

/// Outbound player notifications. Delivery is fire-and-forget.
#[cfg_attr(test, mockall::automock)]
pub trait FameNotifier: Send + Sync {
    fn send_snapshot(&self, player_id: PlayerId, fame: &PlayerFameSet);
    fn send_level_up(&self, player_id: PlayerId, description: DescriptionRef, new_level: i32);
    fn send_exp_gained(&self, player_id: PlayerId, level: i32);
}

/// Resolves which zone category a player currently stands in.
#[cfg_attr(test, mockall::automock)]
pub trait ZoneContext: Send + Sync {
    /// `None` when the player's world has no tracked fame.
    fn current_zone_category(&self, player_id: PlayerId) -> Option<ZoneCategory>;
}
