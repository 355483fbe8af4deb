//! Experience and credit rewards for the Timebank marketplace.
//!
//! When a service completes, the provider earns experience points
//! (driving level progression) and time credits (the marketplace
//! currency). This crate computes both sides of that reward:
//!
//! - [`experience`] -- Base and bonus XP for a completion event, and the
//!   combined per-event evaluation producing a
//!   [`RewardBreakdown`].
//! - [`credits`] -- Level-derived credit bonus and discount percentages,
//!   and their application to credit amounts.
//!
//! Everything here is pure, total computation: no state, no I/O, no
//! panics. The persistence layer applies the returned deltas; see the
//! `timebank-progression` crate for the orchestration.
//!
//! # Usage
//!
//! ```
//! use timebank_levels::LevelCatalog;
//! use timebank_rewards::{credit_bonus, service_experience};
//!
//! let catalog = LevelCatalog::builtin();
//! assert_eq!(service_experience(5, true, 3), 120);
//! assert_eq!(credit_bonus(&catalog, 5), 20);
//! ```
//!
//! [`RewardBreakdown`]: timebank_types::RewardBreakdown

pub mod credits;
pub mod experience;

// Re-export the calculator surface at crate root.
pub use credits::{
    apply_level_bonus, apply_level_discount, bonus_credits, credit_bonus, discount_percentage,
};
pub use experience::{
    CONSECUTIVE_DAY_XP, FIRST_SERVICE_XP, HIGH_RATING_XP, PERFECT_WEEK_MIN_SERVICES,
    PERFECT_WEEK_XP, SERVICE_COMPLETED_XP, TOP_RATING, evaluate_completion, service_experience,
};
