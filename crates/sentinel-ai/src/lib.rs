//! Decision logic for the sentinel companion.
//!
//! Pure functions over plain data: entity classification and creature
//! profiles, the hostility ledger, the self-defense rule table, ally guard
//! scenarios, reflex direction buckets and equipment selection.

pub mod classify;
pub mod equipment;
pub mod guard;
pub mod hostility;
pub mod profiles;
pub mod reflex;
pub mod rules;

pub use sentinel_core as core;
