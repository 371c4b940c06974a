//! Per-tick systems driven by `CompanionEngine`.
//!
//! Systems are plain functions over the engine's state and an `Executor`.
//! They hold no state of their own beyond the small timer structs they
//! define.

pub mod executor;
pub mod guard;
pub mod reflex;
pub mod self_defense;
pub mod upkeep;
