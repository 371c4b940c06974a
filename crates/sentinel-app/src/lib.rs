//! Sentinel application: runs the companion engine against the simulated
//! world on a game loop thread.

pub mod game_loop;
pub mod state;

pub use sentinel_core as core;
