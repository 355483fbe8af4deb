//! Completion orchestration: event in, persisted deltas and snapshot out.
//!
//! [`ProgressionService`] is the seam between the pure calculators and
//! the persistence port. It owns no state beyond the catalog and the
//! store handle; every call re-derives context from the loaded record.

use tracing::{debug, info};

use timebank_levels::LevelCatalog;
use timebank_rewards::evaluate_completion;
use timebank_types::{
    CompletionContext, RewardBreakdown, ServiceCompletion, UserId, UserProgressSnapshot,
};

use crate::error::ProgressionError;
use crate::history;
use crate::store::{CompletionRecord, ProgressDelta, ProgressionStore};

/// The result of settling one completion event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionOutcome {
    /// The itemized reward that was applied.
    pub breakdown: RewardBreakdown,
    /// The user's progress after the deltas were persisted.
    pub snapshot: UserProgressSnapshot,
    /// Whether the applied experience crossed a level floor.
    pub leveled_up: bool,
}

/// Orchestrates completion events against a [`ProgressionStore`].
#[derive(Debug)]
pub struct ProgressionService<S> {
    catalog: LevelCatalog,
    store: S,
}

impl<S: ProgressionStore> ProgressionService<S> {
    /// Create a service over a catalog and a store.
    pub const fn new(catalog: LevelCatalog, store: S) -> Self {
        Self { catalog, store }
    }

    /// The catalog this service derives levels from.
    pub const fn catalog(&self) -> &LevelCatalog {
        &self.catalog
    }

    /// Settle a completion event for `user`.
    ///
    /// Loads the user's counters, derives streak and weekly context from
    /// the retained history, evaluates the reward at the user's current
    /// level, applies the deltas atomically through the store, and
    /// returns the itemized outcome with a fresh snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ProgressionError::Store`] if the store fails, or
    /// [`ProgressionError::Catalog`] if the catalog is malformed.
    pub async fn complete_service(
        &self,
        user: UserId,
        completion: &ServiceCompletion,
    ) -> Result<CompletionOutcome, ProgressionError> {
        let record = self.store.load(user).await?;

        let week = history::week_window(
            &record.recent_completions,
            completion.completed_at,
            completion.rating,
        );
        let context = CompletionContext {
            first_service: record.services_completed == 0,
            consecutive_days: history::consecutive_days_through(
                &record.recent_completions,
                completion.completed_at.date_naive(),
            ),
            services_this_week: week.services_this_week,
            week_rating: week.week_rating,
        };

        // The reward is computed at the level the user held before this
        // completion; the crossing is only visible afterwards.
        let level_before = self.catalog.level_for_experience(record.experience_points);
        let breakdown = evaluate_completion(&self.catalog, level_before, completion, &context);
        let level_after = self.catalog.level_for_experience(
            record
                .experience_points
                .saturating_add(breakdown.total_experience),
        );

        let updated = self
            .store
            .apply(
                user,
                ProgressDelta {
                    experience: breakdown.total_experience,
                    credits: breakdown.total_credits,
                    level: level_after,
                    completion: CompletionRecord {
                        completed_at: completion.completed_at,
                        rating: completion.rating,
                    },
                },
            )
            .await?;

        let snapshot = self
            .catalog
            .progress(updated.experience_points, updated.services_completed)?;

        let leveled_up = level_after > level_before;
        if leveled_up {
            info!(
                %user,
                from = level_before,
                to = level_after,
                experience = breakdown.total_experience,
                "user leveled up"
            );
        } else {
            debug!(
                %user,
                experience = breakdown.total_experience,
                credits = breakdown.total_credits,
                "completion settled"
            );
        }

        Ok(CompletionOutcome {
            breakdown,
            snapshot,
            leveled_up,
        })
    }

    /// The user's current progress snapshot, derived from persisted
    /// counters.
    ///
    /// # Errors
    ///
    /// Returns [`ProgressionError::Store`] if the store fails, or
    /// [`ProgressionError::Catalog`] if the catalog is malformed.
    pub async fn progress(&self, user: UserId) -> Result<UserProgressSnapshot, ProgressionError> {
        let record = self.store.load(user).await?;
        Ok(self
            .catalog
            .progress(record.experience_points, record.services_completed)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{Duration, TimeZone, Utc};

    use timebank_types::{BookingId, ServiceId};

    use crate::store::{MemoryStore, ProgressRecord};

    fn service() -> ProgressionService<MemoryStore> {
        ProgressionService::new(LevelCatalog::builtin(), MemoryStore::new())
    }

    fn completion_at(days_ago: i64, rating: u8, base_credits: u64) -> ServiceCompletion {
        let base = Utc.with_ymd_and_hms(2026, 8, 20, 12, 0, 0).single();
        let completed_at = base
            .and_then(|dt| dt.checked_sub_signed(Duration::days(days_ago)))
            .unwrap_or_default();
        ServiceCompletion {
            service_id: ServiceId::new(),
            booking_id: BookingId::new(),
            rating,
            base_credits,
            completed_at,
        }
    }

    #[tokio::test]
    async fn first_completion_earns_first_service_bonus() {
        let service = service();
        let user = UserId::new();

        let outcome = service
            .complete_service(user, &completion_at(0, 4, 60))
            .await;
        let Ok(outcome) = outcome else {
            assert!(outcome.is_ok());
            return;
        };
        // 50 base + 30 first service; no rating or streak bonuses.
        assert_eq!(outcome.breakdown.base_experience, 80);
        assert_eq!(outcome.breakdown.total_experience, 80);
        // Level 1 has no credit bonus.
        assert_eq!(outcome.breakdown.total_credits, 60);
        assert_eq!(outcome.snapshot.current_level, 1);
        assert!(!outcome.leveled_up);
    }

    #[tokio::test]
    async fn second_completion_is_not_first_service() {
        let service = service();
        let user = UserId::new();

        let _ = service
            .complete_service(user, &completion_at(1, 3, 60))
            .await;
        let outcome = service
            .complete_service(user, &completion_at(0, 3, 60))
            .await;
        let Ok(outcome) = outcome else {
            assert!(outcome.is_ok());
            return;
        };
        // 50 base + 10 streak (two-day run), stacked once more by the
        // event-level streak bonus.
        assert_eq!(outcome.breakdown.base_experience, 60);
        assert_eq!(outcome.breakdown.streak_experience, 10);
        assert_eq!(outcome.breakdown.total_experience, 70);
    }

    #[tokio::test]
    async fn crossing_a_floor_reports_level_up() {
        let service = service();
        let user = UserId::new();
        service
            .store
            .insert(ProgressRecord {
                experience_points: 95,
                services_completed: 3,
                credit_balance: 40,
                level: 1,
                recent_completions: Vec::new(),
                user_id: user,
            })
            .await;

        let outcome = service
            .complete_service(user, &completion_at(0, 3, 60))
            .await;
        let Ok(outcome) = outcome else {
            assert!(outcome.is_ok());
            return;
        };
        assert!(outcome.leveled_up);
        assert_eq!(outcome.snapshot.current_level, 2);
        assert_eq!(outcome.snapshot.current_experience, 145);
    }

    #[tokio::test]
    async fn reward_level_is_the_level_held_before_the_event() {
        let service = service();
        let user = UserId::new();
        // 995 XP: level 4, one completion away from level 5's floor.
        service
            .store
            .insert(ProgressRecord {
                experience_points: 995,
                services_completed: 50,
                credit_balance: 0,
                level: 4,
                recent_completions: Vec::new(),
                user_id: user,
            })
            .await;

        let outcome = service
            .complete_service(user, &completion_at(0, 3, 100))
            .await;
        let Ok(outcome) = outcome else {
            assert!(outcome.is_ok());
            return;
        };
        // Level 4 has no credit-bonus perk, so the payout is flat even
        // though the event lands the user on level 5.
        assert_eq!(outcome.breakdown.total_credits, 100);
        assert!(outcome.leveled_up);
        assert_eq!(outcome.snapshot.current_level, 5);
    }

    #[tokio::test]
    async fn expert_payout_carries_the_credit_bonus() {
        let service = service();
        let user = UserId::new();
        service
            .store
            .insert(ProgressRecord {
                experience_points: 1500,
                services_completed: 70,
                credit_balance: 0,
                level: 5,
                recent_completions: Vec::new(),
                user_id: user,
            })
            .await;

        let outcome = service
            .complete_service(user, &completion_at(0, 4, 100))
            .await;
        let Ok(outcome) = outcome else {
            assert!(outcome.is_ok());
            return;
        };
        assert_eq!(outcome.breakdown.bonus_credits, 20);
        assert_eq!(outcome.breakdown.total_credits, 120);
    }

    #[tokio::test]
    async fn progress_reads_persisted_counters() {
        let service = service();
        let user = UserId::new();

        let _ = service
            .complete_service(user, &completion_at(0, 5, 60))
            .await;
        let snapshot = service.progress(user).await;
        let Ok(snapshot) = snapshot else {
            assert!(snapshot.is_ok());
            return;
        };
        // First completion with five stars: 50 + 30 + 20, plus the
        // event-level five-star bonus again.
        assert_eq!(snapshot.current_experience, 120);
        assert_eq!(snapshot.services_completed, 1);
        assert_eq!(snapshot.current_level, 2);
    }

    #[tokio::test]
    async fn fresh_user_progress_is_level_one() {
        let service = service();
        let snapshot = service.progress(UserId::new()).await;
        let Ok(snapshot) = snapshot else {
            assert!(snapshot.is_ok());
            return;
        };
        assert_eq!(snapshot.current_level, 1);
        assert_eq!(snapshot.current_experience, 0);
        assert_eq!(snapshot.unlocked_perks.len(), 2);
    }
}
