//! Weekly fame decay over every stored record.

use fame_rules::{scaled_round, FameRecord, RulesError};

use super::FameEngine;
use crate::error::FameError;

/// What the weekly decay did to one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecayStep {
    Reduced { exp: i64 },
    Demoted { level: i32, exp: i64 },
}

/// Tally of a weekly decay run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecayReport {
    pub processed: usize,
    pub reduced: usize,
    pub demoted: usize,
    /// Records left untouched because their level has no threshold.
    pub skipped: usize,
    /// Records whose update was rejected by storage, including records a
    /// live session changed after the bulk load.
    pub failed: usize,
}

impl FameEngine {
    /// Decay every stored record.
    ///
    /// Runs on copies loaded from storage, independent of live sessions.
    /// Each write carries the revision it was loaded at, so storage rejects
    /// it if a session saved the record in between, and a session holding a
    /// pre-decay copy gets a conflict instead of overwriting the decay.
    /// A record that cannot be decayed or saved is logged and counted; only
    /// a failed bulk load aborts the run.
    pub fn run_weekly_decay(&self) -> Result<DecayReport, FameError> {
        let records = self.repository.bulk_load_all_for_decay()?;
        let mut report = DecayReport::default();

        for mut record in records {
            report.processed += 1;

            let step = match self.decay_record(&mut record) {
                Ok(step) => step,
                Err(err) => {
                    tracing::error!(
                        player = %record.owner_id(),
                        category = %record.id,
                        level = record.level,
                        error = %err,
                        "Skipping fame decay"
                    );
                    report.skipped += 1;
                    continue;
                }
            };

            if let Err(err) = self.repository.update_record(record.owner_id(), &record) {
                tracing::warn!(
                    player = %record.owner_id(),
                    category = %record.id,
                    error = %err,
                    "Failed to save decayed fame record"
                );
                report.failed += 1;
                continue;
            }

            match step {
                DecayStep::Reduced { .. } => report.reduced += 1,
                DecayStep::Demoted { .. } => report.demoted += 1,
            }
        }

        tracing::info!(
            processed = report.processed,
            demoted = report.demoted,
            skipped = report.skipped,
            failed = report.failed,
            "Weekly fame decay finished"
        );
        Ok(report)
    }

    /// Apply one week of decay to a record.
    ///
    /// When nothing would remain after the reduction the record drops a
    /// level and restarts at that level's threshold minus a penalty taken
    /// from its pre-demotion exp. The record is left unchanged on error.
    pub fn decay_record(&self, record: &mut FameRecord) -> Result<DecayStep, RulesError> {
        let rules = &self.settings.rules;
        self.settings.levels().threshold_for(record.level)?;
        let reduce = scaled_round(record.exp, rules.weekly_decay_fraction);

        if record.exp - reduce > 0 {
            record.exp -= reduce;
            return Ok(DecayStep::Reduced { exp: record.exp });
        }

        let level = if rules.clamp_demotion_at_min_level {
            (record.level - 1).max(1)
        } else {
            record.level - 1
        };
        let threshold = self.settings.levels().threshold_for(level)?;
        let penalty = scaled_round(record.exp, rules.demotion_penalty_fraction);

        record.level = level;
        record.exp = threshold - penalty;
        Ok(DecayStep::Demoted {
            level,
            exp: record.exp,
        })
    }
}
