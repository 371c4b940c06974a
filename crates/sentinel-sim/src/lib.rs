//! Simulated world for sentinel.
//!
//! A headless hecs world that implements the engine's collaborator ports,
//! with seeded creature behavior and scenario presets. Used by tests and by
//! the app's game loop.

pub mod components;
pub mod driver;
pub mod scenario;
pub mod systems;
pub mod world;
pub mod world_setup;

pub use sentinel_core as core;
pub use world::{SimConfig, SimWorld};

#[cfg(test)]
mod tests;
