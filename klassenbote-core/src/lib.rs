//! Core types and logic for the klassenbote class notifier.
//!
//! This crate provides the schedule aggregation engine consumed by the
//! klassenbote CLI:
//! - `event` and `normalize` turn raw feed rows into canonical events
//! - `relevance` decides which events belong in the outgoing schedule
//! - `schedule` merges both feeds into the persisted weekly snapshot
//! - `render` produces the daily/weekly message text
//! - `messenger`/`protocol` define the external send capability

pub mod config;
pub mod dates;
pub mod error;
pub mod event;
pub mod feed;
pub mod messenger;
pub mod normalize;
pub mod protocol;
pub mod relevance;
pub mod render;
pub mod schedule;

// Re-export the event types at crate root for convenience
pub use event::*;
