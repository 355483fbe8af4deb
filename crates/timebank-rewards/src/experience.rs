//! Experience rewards for service completions.
//!
//! The constants below are product-tuned payout rates. They are kept as
//! named constants so operators can find and adjust them in one place;
//! every historical XP balance was accumulated at these rates.

use timebank_levels::LevelCatalog;
use timebank_types::{CompletionContext, RewardBreakdown, ServiceCompletion};

use crate::credits::{apply_level_bonus, bonus_credits};

// ---------------------------------------------------------------------------
// Payout constants
// ---------------------------------------------------------------------------

/// Base experience for any completed service.
pub const SERVICE_COMPLETED_XP: u64 = 50;

/// Bonus for a five-star rating. Four stars earn nothing extra.
pub const HIGH_RATING_XP: u64 = 20;

/// One-time bonus for a user's first completed service.
pub const FIRST_SERVICE_XP: u64 = 30;

/// Per-day streak bonus, for each consecutive day beyond the first.
pub const CONSECUTIVE_DAY_XP: u64 = 10;

/// Bonus for a perfect week (see [`PERFECT_WEEK_MIN_SERVICES`]).
pub const PERFECT_WEEK_XP: u64 = 100;

/// Weekly completion count gating the perfect-week bonus.
///
/// The perk copy advertises "5+ services"; the live gate has always been
/// 4 and payouts were accumulated against it, so the constant stays at 4
/// until product rules on the discrepancy.
pub const PERFECT_WEEK_MIN_SERVICES: u32 = 4;

/// The rating that counts as a high rating. Exact equality, no partial
/// credit below it.
pub const TOP_RATING: u8 = 5;

// ---------------------------------------------------------------------------
// Experience calculation
// ---------------------------------------------------------------------------

/// Experience earned for one completed service.
///
/// The sum of the base reward, the five-star bonus (exact equality with
/// [`TOP_RATING`]), the first-service bonus, and a linear streak bonus of
/// [`CONSECUTIVE_DAY_XP`] per consecutive day beyond the first. A streak
/// of one day earns no streak bonus. No upper cap is applied here;
/// callers own any capping policy.
///
/// The result is always at least [`SERVICE_COMPLETED_XP`]. Ratings
/// outside 1 to 5 are not validated; sanitize before calling.
pub fn service_experience(rating: u8, first_service: bool, consecutive_days: u32) -> u64 {
    let mut experience = SERVICE_COMPLETED_XP;
    if rating == TOP_RATING {
        experience = experience.saturating_add(HIGH_RATING_XP);
    }
    if first_service {
        experience = experience.saturating_add(FIRST_SERVICE_XP);
    }
    experience.saturating_add(streak_bonus(consecutive_days))
}

/// Linear streak bonus: nothing for day one, [`CONSECUTIVE_DAY_XP`] per
/// day after that.
fn streak_bonus(consecutive_days: u32) -> u64 {
    CONSECUTIVE_DAY_XP.saturating_mul(u64::from(consecutive_days.saturating_sub(1)))
}

/// Evaluate a completion event into an itemized reward.
///
/// `level` is the provider's level at the time of completion and drives
/// the credit bonus. The experience total stacks the five-star and
/// streak bonuses on top of a base figure that already includes them,
/// so both pay out twice per event. That is the rate every persisted
/// balance was accumulated at; do not collapse the duplication without
/// a product decision and a data migration.
pub fn evaluate_completion(
    catalog: &LevelCatalog,
    level: u32,
    completion: &ServiceCompletion,
    context: &CompletionContext,
) -> RewardBreakdown {
    let base_experience =
        service_experience(completion.rating, context.first_service, context.consecutive_days);
    let high_rating_experience = if completion.rating == TOP_RATING {
        HIGH_RATING_XP
    } else {
        0
    };
    let streak_experience = streak_bonus(context.consecutive_days);
    let perfect_week_experience = if context.services_this_week >= PERFECT_WEEK_MIN_SERVICES
        && context.week_rating >= TOP_RATING
    {
        PERFECT_WEEK_XP
    } else {
        0
    };

    let total_experience = base_experience
        .saturating_add(high_rating_experience)
        .saturating_add(streak_experience)
        .saturating_add(perfect_week_experience);

    RewardBreakdown {
        base_experience,
        high_rating_experience,
        streak_experience,
        perfect_week_experience,
        total_experience,
        base_credits: completion.base_credits,
        bonus_credits: bonus_credits(catalog, completion.base_credits, level),
        total_credits: apply_level_bonus(catalog, completion.base_credits, level),
    }
}
