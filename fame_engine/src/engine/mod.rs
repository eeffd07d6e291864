//! Fame engine - applies progression rules to a player's zone records.
//!
//! Every single-player operation selects the record for the zone category
//! the player currently stands in. When the player is outside any tracked
//! zone, or has no record for it, the operation does nothing and reports
//! `MissingRecord`.

mod decay;
#[cfg(test)]
mod test_support;

pub use decay::*;

use std::sync::Arc;

use fame_rules::{
    scaled_round, scaled_truncate, FameRecord, FameSettings, PlayerFameSet, PlayerId,
    ZoneCategory, MAX_LEVEL,
};

use crate::error::FameError;
use crate::ports::{FameNotifier, FameRepository, ZoneContext};

/// Result of an experience gain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GainOutcome {
    MissingRecord,
    /// Progress stayed within the current level.
    Accumulated { exp: i64 },
    /// Crossed the threshold; overflow carried into the new level.
    LevelUp { new_level: i32, exp: i64 },
    /// At max level; overflow discarded.
    Clamped { exp: i64 },
}

/// Result of a death penalty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathOutcome {
    MissingRecord,
    /// The record had no progress to lose.
    NoProgress,
    Applied {
        loss: i64,
        recoverable: i64,
        unrecoverable: i64,
    },
}

/// Result of recovering experience lost on death.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoverOutcome {
    MissingRecord,
    NothingToRecover,
    Recovered { points: i64, gain: GainOutcome },
}

/// Rules engine for per-zone fame.
///
/// Built once at startup and shared by handle; it keeps no per-player state
/// between calls.
pub struct FameEngine {
    settings: FameSettings,
    repository: Arc<dyn FameRepository>,
    notifier: Arc<dyn FameNotifier>,
    zones: Arc<dyn ZoneContext>,
}

impl FameEngine {
    pub fn new(
        settings: FameSettings,
        repository: Arc<dyn FameRepository>,
        notifier: Arc<dyn FameNotifier>,
        zones: Arc<dyn ZoneContext>,
    ) -> Self {
        tracing::info!(
            death_loss_fraction = settings.rules.death_loss_fraction,
            weekly_decay_fraction = settings.rules.weekly_decay_fraction,
            "Fame engine loaded"
        );
        Self {
            settings,
            repository,
            notifier,
            zones,
        }
    }

    pub fn settings(&self) -> &FameSettings {
        &self.settings
    }

    /// Load a player's fame from storage and create any missing records.
    pub fn login(&self, player_id: PlayerId) -> Result<PlayerFameSet, FameError> {
        let mut fame = self.repository.load_fame_set(player_id)?;
        self.initialize_on_login(&mut fame)?;
        Ok(fame)
    }

    /// Replace a player's in-memory fame with the stored records.
    ///
    /// Used after an update is rejected as stale, for example when the
    /// weekly decay has rewritten a record since the set was loaded.
    pub fn refresh(&self, fame: &mut PlayerFameSet) -> Result<(), FameError> {
        *fame = self.repository.load_fame_set(fame.owner_id())?;
        Ok(())
    }

    /// Create a level 1 record for every category the set lacks, then send
    /// a snapshot. Returns the categories that were created.
    pub fn initialize_on_login(
        &self,
        fame: &mut PlayerFameSet,
    ) -> Result<Vec<ZoneCategory>, FameError> {
        let player_id = fame.owner_id();
        let mut created = Vec::new();

        for category in ZoneCategory::all() {
            if fame.contains(category) {
                continue;
            }
            let record = FameRecord::new(category, player_id);
            self.repository.create_record(player_id, &record)?;
            fame.insert(record);
            created.push(category);
        }

        if !created.is_empty() {
            tracing::debug!(player = %player_id, created = created.len(), "Created fame records");
        }
        self.notifier.send_snapshot(player_id, fame);
        Ok(created)
    }

    /// Add experience to the record for the player's current zone.
    pub fn gain_experience(
        &self,
        fame: &mut PlayerFameSet,
        points: i64,
    ) -> Result<GainOutcome, FameError> {
        let player_id = fame.owner_id();
        let Some(record) = self.current_record(fame) else {
            return Ok(GainOutcome::MissingRecord);
        };

        let outcome = self.apply_gain(player_id, record, points)?;
        self.notifier.send_snapshot(player_id, fame);
        Ok(outcome)
    }

    /// Apply the death penalty to the record for the player's current zone.
    pub fn on_death(&self, fame: &mut PlayerFameSet) -> Result<DeathOutcome, FameError> {
        let player_id = fame.owner_id();
        let rules = &self.settings.rules;
        let Some(record) = self.current_record(fame) else {
            return Ok(DeathOutcome::MissingRecord);
        };

        self.settings.levels().threshold_for(record.level)?;

        if record.exp <= 0 {
            self.notifier.send_snapshot(player_id, fame);
            return Ok(DeathOutcome::NoProgress);
        }

        let loss = scaled_round(record.exp, rules.death_loss_fraction);
        let unrecoverable = scaled_truncate(loss, rules.unrecoverable_fraction);
        let recoverable = loss - unrecoverable;

        // Compares the level number, not exp, against the loss. Kept as
        // shipped: any loss above the level wipes all progress.
        if i64::from(record.level) < loss {
            record.exp = 0;
        } else {
            record.exp -= loss;
        }
        record.exp_loss = record.exp_loss.saturating_add(recoverable);

        tracing::debug!(
            player = %player_id,
            category = %record.id,
            loss,
            recoverable,
            "Applied fame death penalty"
        );
        self.save(player_id, record)?;
        self.notifier.send_snapshot(player_id, fame);

        Ok(DeathOutcome::Applied {
            loss,
            recoverable,
            unrecoverable,
        })
    }

    /// Give back experience lost on death in the player's current zone.
    ///
    /// The recovered points go through the normal gain rules, so recovery
    /// can level the record up.
    pub fn recover_exp(&self, fame: &mut PlayerFameSet) -> Result<RecoverOutcome, FameError> {
        let player_id = fame.owner_id();
        let Some(record) = self.current_record(fame) else {
            return Ok(RecoverOutcome::MissingRecord);
        };

        let points = record.exp_loss;
        if points == 0 {
            return Ok(RecoverOutcome::NothingToRecover);
        }

        let gain = self.apply_gain(player_id, record, points)?;
        record.exp_loss = 0;
        self.save(player_id, record)?;
        self.notifier.send_snapshot(player_id, fame);

        Ok(RecoverOutcome::Recovered { points, gain })
    }

    fn current_record<'a>(&self, fame: &'a mut PlayerFameSet) -> Option<&'a mut FameRecord> {
        let player_id = fame.owner_id();
        let Some(category) = self.zones.current_zone_category(player_id) else {
            tracing::debug!(player = %player_id, "Player is outside any fame zone");
            return None;
        };

        let record = fame.get_mut(category);
        if record.is_none() {
            tracing::debug!(player = %player_id, %category, "No fame record for zone");
        }
        record
    }

    /// Single-step leveling: at most one level is gained per call.
    fn apply_gain(
        &self,
        player_id: PlayerId,
        record: &mut FameRecord,
        points: i64,
    ) -> Result<GainOutcome, FameError> {
        let threshold = self.settings.levels().threshold_for(record.level)?;
        let exp = record.exp.saturating_add(points);

        let outcome = if record.level >= MAX_LEVEL {
            record.exp = exp.min(threshold);
            if exp > threshold {
                self.notifier.send_exp_gained(player_id, record.level);
                GainOutcome::Clamped { exp: record.exp }
            } else {
                GainOutcome::Accumulated { exp: record.exp }
            }
        } else if exp >= threshold {
            record.level += 1;
            record.exp = exp - threshold;
            self.notifier.send_level_up(
                player_id,
                self.settings.description_for(record.id),
                record.level,
            );
            GainOutcome::LevelUp {
                new_level: record.level,
                exp: record.exp,
            }
        } else {
            record.exp = exp;
            GainOutcome::Accumulated { exp }
        };

        tracing::debug!(player = %player_id, category = %record.id, ?outcome, "Applied fame gain");
        self.save(player_id, record)?;
        Ok(outcome)
    }

    /// Persist a record and advance its revision to match storage.
    fn save(&self, player_id: PlayerId, record: &mut FameRecord) -> Result<(), FameError> {
        self.repository.update_record(player_id, record)?;
        record.revision += 1;
        Ok(())
    }
}
