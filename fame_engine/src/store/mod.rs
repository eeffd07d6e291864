//! Repository adapters.

mod memory;

pub use memory::*;
