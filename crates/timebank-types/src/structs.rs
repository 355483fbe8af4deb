//! Core entity structs for the progression engine.
//!
//! Covers the static level catalog entries ([`LevelDefinition`], [`Perk`])
//! and the derived per-user view ([`UserProgressSnapshot`]).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::PerkKind;

// ---------------------------------------------------------------------------
// Perk
// ---------------------------------------------------------------------------

/// A named benefit unlocked at a given level.
///
/// Display fields (`name`, `description`, `icon`) are opaque to the engine;
/// only `kind` and `value` participate in credit math. `value` is a whole
/// percentage and is present for [`PerkKind::Credits`] and
/// [`PerkKind::Discount`] perks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Perk {
    /// Globally unique perk identifier (stable across catalog edits).
    pub id: String,
    /// Short display name.
    pub name: String,
    /// One-line description shown in the perks panel.
    pub description: String,
    /// Icon hint for the front end (emoji or icon name).
    pub icon: String,
    /// The category of benefit this perk grants.
    pub kind: PerkKind,
    /// Percentage magnitude for credit and discount perks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<u32>,
}

// ---------------------------------------------------------------------------
// LevelDefinition
// ---------------------------------------------------------------------------

/// One row of the static level catalog.
///
/// Levels are identified by `level` number, not by position; lookups are
/// by value, so gaps in the numbering are legal. `min_experience` floors
/// must be strictly increasing across the catalog and the first level's
/// floor must be zero -- the catalog constructor enforces both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LevelDefinition {
    /// Level number, unique and strictly increasing across the catalog.
    pub level: u32,
    /// Display title (e.g. "Helper", "Expert").
    pub title: String,
    /// Badge symbol shown next to the title.
    pub badge: String,
    /// Color hint for the front end (opaque string).
    pub color: String,
    /// Inclusive experience floor for this level.
    pub min_experience: u64,
    /// Exclusive experience ceiling; `None` for the unbounded final level.
    ///
    /// Informational only: level selection uses `min_experience` floors
    /// exclusively.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_experience: Option<u64>,
    /// Completed-services count associated with reaching this level.
    ///
    /// Display metadata only; level derivation is driven by experience
    /// alone. See the repository design notes before changing that.
    pub services_required: u32,
    /// Perks unlocked at this level, in display order.
    pub perks: Vec<Perk>,
}

// ---------------------------------------------------------------------------
// UserProgressSnapshot
// ---------------------------------------------------------------------------

/// Derived view of a user's standing in the level system.
///
/// Ephemeral: recomputed from the persisted counters on every call and
/// never stored, so there is no staleness to manage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct UserProgressSnapshot {
    /// The highest level whose floor is at or below the user's experience.
    pub current_level: u32,
    /// The user's cumulative experience points.
    pub current_experience: u64,
    /// Experience still needed to reach the next level; 0 at max level.
    pub experience_to_next_level: u64,
    /// Position within the current level's experience band, 0 to 100.
    ///
    /// Always 100 at the max level.
    #[ts(as = "String")]
    pub progress_percentage: Decimal,
    /// Cumulative completed services, passed through from the caller.
    pub services_completed: u32,
    /// The next level's definition; `None` at the max level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_level: Option<LevelDefinition>,
    /// Every perk from level 1 through the current level, in level order
    /// then perk order.
    ///
    /// Superseded perks are not filtered out; consumers wanting the
    /// current effective bonus must use the reward calculator's lookup
    /// functions instead of scanning this list.
    pub unlocked_perks: Vec<Perk>,
}
