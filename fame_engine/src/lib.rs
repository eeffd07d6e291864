//! # Fame Engine
//!
//! Applies fame progression rules to a player's per-zone records: login
//! initialization, experience gain, loss on death, recovery of lost
//! experience, and the weekly decay batch.
//!
//! ## Core Components
//!
//! - **engine**: `FameEngine`, the rules engine driven by game events
//! - **ports**: collaborator traits for persistence, notifications and zone lookup
//! - **store**: an in-memory `FameRepository`
//!
//! The engine is constructed once at startup and shared by handle. Single
//! player operations borrow the player's `PlayerFameSet` mutably, so callers
//! serialize access per player.

pub mod engine;
pub mod error;
pub mod ports;
pub mod store;

pub use engine::*;
pub use error::*;
pub use ports::*;
pub use store::*;
