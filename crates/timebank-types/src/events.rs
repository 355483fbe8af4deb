//! Service-completion event types exchanged with the reward calculator.
//!
//! A completion event arrives from the booking flow; the progression
//! service enriches it with streak and weekly context derived from the
//! user's history, and the reward calculator turns the pair into a
//! [`RewardBreakdown`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::{BookingId, ServiceId};

// ---------------------------------------------------------------------------
// ServiceCompletion
// ---------------------------------------------------------------------------

/// A "service completed with rating R" event from the booking flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ServiceCompletion {
    /// The service listing that was fulfilled.
    pub service_id: ServiceId,
    /// The booking this completion settles.
    pub booking_id: BookingId,
    /// Rating given by the requester, 1 to 5.
    ///
    /// Not validated here: the booking flow sanitizes input before the
    /// event reaches the engine.
    pub rating: u8,
    /// Credits earned for the service before level bonuses.
    pub base_credits: u64,
    /// When the service was completed.
    pub completed_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// CompletionContext
// ---------------------------------------------------------------------------

/// Streak and weekly context for a completion, derived from the user's
/// history by the progression service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CompletionContext {
    /// Whether this is the user's first completed service ever.
    pub first_service: bool,
    /// Successive calendar days with at least one completion, counting
    /// the day of this completion. Minimum 1.
    pub consecutive_days: u32,
    /// Completions in the trailing seven days, counting this one.
    pub services_this_week: u32,
    /// The lowest rating across the trailing seven days, counting this
    /// completion's rating. A perfect week means every rating was 5.
    pub week_rating: u8,
}

impl CompletionContext {
    /// Context for a user's very first completion: no streak, no weekly
    /// history beyond the completion itself.
    pub const fn first(rating: u8) -> Self {
        Self {
            first_service: true,
            consecutive_days: 1,
            services_this_week: 1,
            week_rating: rating,
        }
    }
}

// ---------------------------------------------------------------------------
// RewardBreakdown
// ---------------------------------------------------------------------------

/// Itemized experience and credit rewards for one completion event.
///
/// The experience side lists each bonus separately so the front end can
/// show "+50 base, +20 five-star, ..." toasts; `total_experience` is the
/// delta the persistence layer adds to `experience_points`. The credit
/// side reports the bonus-only portion (`bonus_credits`) separately from
/// the full payout (`total_credits`) for the same reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RewardBreakdown {
    /// Experience from the base completion reward, including the
    /// calculator's own high-rating, first-service, and streak additions.
    pub base_experience: u64,
    /// Event-level five-star bonus.
    pub high_rating_experience: u64,
    /// Event-level consecutive-days bonus.
    pub streak_experience: u64,
    /// Perfect-week bonus.
    pub perfect_week_experience: u64,
    /// Total experience delta to persist.
    pub total_experience: u64,
    /// Credits earned before the level bonus.
    pub base_credits: u64,
    /// The level-bonus portion of the payout, reported for display.
    pub bonus_credits: u64,
    /// Total credit delta to persist.
    pub total_credits: u64,
}
