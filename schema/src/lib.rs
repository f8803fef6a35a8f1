// Creature Arena Schema - Shared type definitions
// This crate holds the closed elemental type set and the serializable record
// shapes used by static roster data, save files and the encounter ledger.

pub use creature_data::*;
pub use element_types::*;

pub mod creature_data;
pub mod element_types;
