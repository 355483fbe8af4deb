//! Shared type definitions for the Timebank progression engine.
//!
//! This crate is the single source of truth for the types used across
//! the workspace. Types defined here flow downstream to `TypeScript`
//! via `ts-rs` for the marketplace front end.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for entity identifiers
//! - [`enums`] -- Enumeration types (perk kinds)
//! - [`structs`] -- Level catalog entries and the derived progress view
//! - [`events`] -- Service-completion events and reward breakdowns

pub mod enums;
pub mod events;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::PerkKind;
pub use events::{CompletionContext, RewardBreakdown, ServiceCompletion};
pub use ids::{BookingId, ServiceId, UserId};
pub use structs::{LevelDefinition, Perk, UserProgressSnapshot};
