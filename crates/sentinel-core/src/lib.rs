//! Core types and definitions for the sentinel companion engine.
//!
//! This crate defines the vocabulary shared across all other crates:
//! entity records, item tables, enums, constants, tunables, notifications
//! and error types. It has no dependency on any runtime or world backend.

pub mod config;
pub mod constants;
pub mod entity;
pub mod enums;
pub mod error;
pub mod events;
pub mod items;
pub mod types;

#[cfg(test)]
mod tests;
