//! Domain types for the nudge backend.
//!
//! Everything HTTP- and storage-agnostic lives here: the [`Nudge`]
//! entity, its wire representation, schedule parsing, and the shared
//! error taxonomy.

pub mod error;
pub mod nudge;
pub mod schedule;
pub mod types;
