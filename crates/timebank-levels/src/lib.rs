//! Level catalog and progress calculator for the Timebank marketplace.
//!
//! Users accumulate experience points (XP) by completing services; this
//! crate maps those counters to a discrete level, a position within the
//! level's experience band, and the set of unlocked perks.
//!
//! # Architecture
//!
//! - [`catalog`] -- The [`LevelCatalog`]: immutable validated level table,
//!   built-in data, and YAML loading.
//! - [`progress`] -- Derivation of the [`UserProgressSnapshot`] from the
//!   persisted counters.
//!
//! # Level selection
//!
//! A user's level is the highest catalog entry whose `min_experience`
//! floor is at or below their XP. Service counts never influence the
//! derivation; `services_required` on a level is display metadata.
//!
//! # Usage
//!
//! ```
//! use timebank_levels::LevelCatalog;
//!
//! let catalog = LevelCatalog::builtin();
//! assert_eq!(catalog.level_for_experience(150), 2);
//!
//! let snapshot = catalog.progress(150, 8);
//! assert!(snapshot.is_ok());
//! ```
//!
//! [`UserProgressSnapshot`]: timebank_types::UserProgressSnapshot

pub mod catalog;
pub mod progress;

// Re-export primary types at crate root.
pub use catalog::LevelCatalog;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors produced when building or querying a level catalog.
///
/// Every variant except [`CatalogError::MissingLevel`] is a construction
/// failure: the offered table violates a catalog invariant and is
/// rejected wholesale. `MissingLevel` is the one runtime error -- the
/// level derived from a user's experience has no definition, which a
/// validated catalog makes impossible and therefore signals a malformed
/// table rather than bad input.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Failed to read a catalog file from disk.
    #[error("failed to read catalog file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse catalog YAML.
    #[error("failed to parse catalog YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        #[from]
        source: serde_yml::Error,
    },

    /// The catalog has no levels.
    #[error("level catalog must define at least one level")]
    Empty,

    /// The first level's experience floor is not zero.
    #[error("first level must have an experience floor of 0, got {found}")]
    FirstLevelFloor {
        /// The floor found on the first level.
        found: u64,
    },

    /// Level numbers are not strictly increasing.
    #[error("level {level} is not greater than its predecessor")]
    UnorderedLevel {
        /// The offending level number.
        level: u32,
    },

    /// Experience floors are not strictly increasing.
    #[error("level {level} does not raise the experience floor")]
    NonIncreasingFloor {
        /// The offending level number.
        level: u32,
    },

    /// Two perks share an id.
    #[error("duplicate perk id: {id}")]
    DuplicatePerkId {
        /// The duplicated perk id.
        id: String,
    },

    /// A credit or discount perk has no percentage value.
    #[error("perk {id} needs a percentage value for its kind")]
    MissingPerkValue {
        /// The offending perk id.
        id: String,
    },

    /// A derived level has no definition in the catalog.
    #[error("no definition for level {level}; the catalog is malformed")]
    MissingLevel {
        /// The level that failed to resolve.
        level: u32,
    },
}
