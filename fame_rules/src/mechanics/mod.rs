//! Progression mechanics: level thresholds and the arithmetic shared by
//! loss, decay and demotion.

mod level_table;

pub use level_table::*;

/// Highest reachable fame level.
pub const MAX_LEVEL: i32 = 9;

/// Scale `exp` by `fraction` and round half-up to the nearest integer.
pub fn scaled_round(exp: i64, fraction: f64) -> i64 {
    (exp as f64 * fraction + 0.5).floor() as i64
}

/// Scale `amount` by `fraction`, truncating toward zero.
pub fn scaled_truncate(amount: i64, fraction: f64) -> i64 {
    (amount as f64 * fraction).trunc() as i64
}
