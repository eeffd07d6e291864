//! # Fame Rules
//!
//! Pure domain crate for zone fame progression: identifiers, fame records,
//! the per-player record set, level thresholds and tunable settings.
//! This crate holds no engine logic and performs no persistence.

pub mod config;
pub mod entities;
pub mod error;
pub mod mechanics;

pub use config::*;
pub use entities::*;
pub use error::*;
pub use mechanics::*;
