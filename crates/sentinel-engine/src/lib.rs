//! Companion engine for sentinel.
//!
//! Owns the decision state, runs the per-tick systems in a fixed order and
//! drives the world through the collaborator ports in `ports`.

pub mod engagement;
pub mod engine;
pub mod outbox;
pub mod ports;
pub mod protected;
pub mod report;
pub mod systems;
pub mod ttl;

pub use engine::CompanionEngine;
pub use sentinel_ai as ai;
pub use sentinel_core as core;

#[cfg(test)]
mod testing;
