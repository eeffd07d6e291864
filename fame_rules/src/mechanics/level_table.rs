//! Level to experience threshold lookup.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::MAX_LEVEL;
use crate::error::RulesError;

/// One configured threshold: the experience needed to complete `level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelThreshold {
    pub level: i32,
    pub exp: i64,
}

/// Read-only mapping from fame level to the experience completing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelTable {
    thresholds: BTreeMap<i32, i64>,
}

impl LevelTable {
    /// Build a table, requiring a positive threshold for every level
    /// in `1..=MAX_LEVEL`.
    pub fn new(entries: impl IntoIterator<Item = LevelThreshold>) -> Result<Self, RulesError> {
        let mut thresholds = BTreeMap::new();
        for entry in entries {
            if entry.exp <= 0 {
                return Err(RulesError::InvalidSettings(format!(
                    "threshold for level {} must be positive, got {}",
                    entry.level, entry.exp
                )));
            }
            if thresholds.insert(entry.level, entry.exp).is_some() {
                return Err(RulesError::InvalidSettings(format!(
                    "level {} is configured twice",
                    entry.level
                )));
            }
        }

        if let Some(missing) = (1..=MAX_LEVEL).find(|level| !thresholds.contains_key(level)) {
            return Err(RulesError::InvalidSettings(format!(
                "no threshold configured for level {missing}"
            )));
        }

        Ok(Self { thresholds })
    }

    /// Experience required to complete `level`.
    pub fn threshold_for(&self, level: i32) -> Result<i64, RulesError> {
        self.thresholds
            .get(&level)
            .copied()
            .ok_or(RulesError::UnknownLevel(level))
    }

    /// Configured entries in ascending level order.
    pub fn entries(&self) -> impl Iterator<Item = LevelThreshold> + '_ {
        self.thresholds
            .iter()
            .map(|(&level, &exp)| LevelThreshold { level, exp })
    }
}

impl Default for LevelTable {
    fn default() -> Self {
        const DEFAULT_THRESHOLDS: [i64; MAX_LEVEL as usize] =
            [1_000, 2_500, 5_000, 9_000, 15_000, 24_000, 36_000, 52_000, 75_000];

        Self {
            thresholds: (1..=MAX_LEVEL).zip(DEFAULT_THRESHOLDS).collect(),
        }
    }
}
