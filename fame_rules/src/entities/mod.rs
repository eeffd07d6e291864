//! Identifiers and records for per-zone fame.

mod fame;

pub use fame::*;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::RulesError;

/// Unique identifier for a player owning fame records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub Uuid);

impl PlayerId {
    /// Create a new random player ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a player ID from a specific UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A world region whose fame is tracked separately, numbered 1..=6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ZoneCategory(u8);

impl ZoneCategory {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 6;

    /// Validate and wrap a raw category id.
    pub fn new(id: u8) -> Result<Self, RulesError> {
        if (Self::MIN..=Self::MAX).contains(&id) {
            Ok(Self(id))
        } else {
            Err(RulesError::InvalidZoneCategory(id))
        }
    }

    /// Every category, in ascending order.
    pub fn all() -> impl Iterator<Item = ZoneCategory> {
        (Self::MIN..=Self::MAX).map(ZoneCategory)
    }

    pub fn id(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for ZoneCategory {
    type Error = RulesError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl From<ZoneCategory> for u8 {
    fn from(category: ZoneCategory) -> Self {
        category.0
    }
}

impl std::fmt::Display for ZoneCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Localized description reference sent with level-up messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DescriptionRef(pub u32);
