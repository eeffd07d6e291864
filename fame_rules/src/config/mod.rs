//! Tunable fame settings loaded from TOML.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::entities::{DescriptionRef, ZoneCategory};
use crate::error::RulesError;
use crate::mechanics::{LevelTable, LevelThreshold};

/// Fractions and switches driving loss and decay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FameRules {
    /// Share of current exp lost on death.
    pub death_loss_fraction: f64,

    /// Share of a death loss that is forfeited instead of recoverable.
    pub unrecoverable_fraction: f64,

    /// Share of exp removed by the weekly reset.
    pub weekly_decay_fraction: f64,

    /// Penalty taken from pre-demotion exp when a record is demoted.
    pub demotion_penalty_fraction: f64,

    /// Stop weekly demotion at level 1.
    pub clamp_demotion_at_min_level: bool,
}

impl Default for FameRules {
    fn default() -> Self {
        Self {
            death_loss_fraction: 0.0,
            unrecoverable_fraction: 0.22222222,
            weekly_decay_fraction: 0.0,
            demotion_penalty_fraction: 0.015,
            clamp_demotion_at_min_level: false,
        }
    }
}

impl FameRules {
    fn validate(&self) -> Result<(), RulesError> {
        let fractions = [
            ("death_loss_fraction", self.death_loss_fraction),
            ("unrecoverable_fraction", self.unrecoverable_fraction),
            ("weekly_decay_fraction", self.weekly_decay_fraction),
            ("demotion_penalty_fraction", self.demotion_penalty_fraction),
        ];
        for (name, value) in fractions {
            if !(0.0..=1.0).contains(&value) {
                return Err(RulesError::InvalidSettings(format!(
                    "{name} must be within 0.0..=1.0, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Description reference for one zone category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneDescription {
    pub category: ZoneCategory,
    pub description_id: u32,
}

#[derive(Debug, Deserialize)]
struct RawSettings {
    #[serde(default)]
    rules: FameRules,
    #[serde(default)]
    levels: Vec<LevelThreshold>,
    #[serde(default)]
    zones: Vec<ZoneDescription>,
}

/// Validated settings: rules, level table and zone descriptions.
#[derive(Debug, Clone)]
pub struct FameSettings {
    pub rules: FameRules,
    levels: LevelTable,
    descriptions: BTreeMap<ZoneCategory, DescriptionRef>,
}

impl Default for FameSettings {
    fn default() -> Self {
        Self {
            rules: FameRules::default(),
            levels: LevelTable::default(),
            descriptions: BTreeMap::new(),
        }
    }
}

impl FameSettings {
    pub fn new(rules: FameRules, levels: LevelTable) -> Result<Self, RulesError> {
        rules.validate()?;
        Ok(Self {
            rules,
            levels,
            descriptions: BTreeMap::new(),
        })
    }

    /// Parse settings from TOML. An empty `levels` list keeps the
    /// built-in table.
    pub fn from_toml_str(source: &str) -> Result<Self, RulesError> {
        let raw: RawSettings = toml::from_str(source)?;
        raw.rules.validate()?;

        let levels = if raw.levels.is_empty() {
            LevelTable::default()
        } else {
            LevelTable::new(raw.levels)?
        };

        let mut descriptions = BTreeMap::new();
        for zone in raw.zones {
            if descriptions
                .insert(zone.category, DescriptionRef(zone.description_id))
                .is_some()
            {
                return Err(RulesError::InvalidSettings(format!(
                    "zone category {} is described twice",
                    zone.category
                )));
            }
        }

        Ok(Self {
            rules: raw.rules,
            levels,
            descriptions,
        })
    }

    /// Read and parse a settings file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RulesError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| RulesError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    pub fn levels(&self) -> &LevelTable {
        &self.levels
    }

    /// Description reference for a category, falling back to its id.
    pub fn description_for(&self, category: ZoneCategory) -> DescriptionRef {
        self.descriptions
            .get(&category)
            .copied()
            .unwrap_or(DescriptionRef(category.id() as u32))
    }
}
