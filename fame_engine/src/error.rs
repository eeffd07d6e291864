//! Engine error type.

use fame_rules::RulesError;
use thiserror::Error;

use crate::ports::PersistenceError;

/// Failure of a fame engine operation.
///
/// Mutations made before a persistence failure stay applied in memory.
#[derive(Debug, Error)]
pub enum FameError {
    #[error(transparent)]
    Rules(#[from] RulesError),

    #[error("fame persistence failed: {0}")]
    Persistence(#[from] PersistenceError),
}
