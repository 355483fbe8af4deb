//! Streak and weekly-window derivation from retained completion history.
//!
//! The reward calculator consumes a [`CompletionContext`]; this module
//! derives its streak and weekly fields from the completions the store
//! retains. Both derivations treat the completion being recorded as
//! already having happened -- a user's first completion of the day still
//! counts toward today's streak.
//!
//! [`CompletionContext`]: timebank_types::CompletionContext

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::store::CompletionRecord;

/// Completions and rating floor over the trailing seven days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekWindow {
    /// Completions in the window, counting the one being recorded.
    pub services_this_week: u32,
    /// The lowest rating in the window, counting the one being recorded.
    pub week_rating: u8,
}

/// Count successive calendar days with at least one completion, ending
/// on `day`.
///
/// Assumes a completion on `day` itself (the one being recorded), so the
/// result is at least 1. Multiple completions on one day count once; a
/// single missed day breaks the run.
pub fn consecutive_days_through(completions: &[CompletionRecord], day: NaiveDate) -> u32 {
    let days: BTreeSet<NaiveDate> = completions
        .iter()
        .map(|record| record.completed_at.date_naive())
        .collect();

    let mut streak: u32 = 1;
    let mut cursor = day;
    while let Some(previous) = cursor.pred_opt() {
        if !days.contains(&previous) {
            break;
        }
        streak = streak.saturating_add(1);
        cursor = previous;
    }
    streak
}

/// Derive the trailing seven-day window ending at `now`, folding in the
/// rating of the completion being recorded.
pub fn week_window(completions: &[CompletionRecord], now: DateTime<Utc>, rating: u8) -> WeekWindow {
    let Some(cutoff) = now.checked_sub_signed(Duration::days(7)) else {
        // Degenerate clock near the epoch floor; only the current
        // completion is in the window.
        return WeekWindow {
            services_this_week: 1,
            week_rating: rating,
        };
    };

    let mut services: u32 = 1;
    let mut lowest = rating;
    for record in completions {
        if record.completed_at > cutoff && record.completed_at <= now {
            services = services.saturating_add(1);
            lowest = lowest.min(record.rating);
        }
    }

    WeekWindow {
        services_this_week: services,
        week_rating: lowest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::TimeZone;

    fn at(days_ago: i64, rating: u8) -> CompletionRecord {
        let base = Utc.with_ymd_and_hms(2026, 8, 20, 12, 0, 0).single();
        let completed_at = base
            .and_then(|dt| dt.checked_sub_signed(Duration::days(days_ago)))
            .unwrap_or_default();
        CompletionRecord {
            completed_at,
            rating,
        }
    }

    fn today() -> NaiveDate {
        at(0, 5).completed_at.date_naive()
    }

    #[test]
    fn no_history_is_a_one_day_streak() {
        assert_eq!(consecutive_days_through(&[], today()), 1);
    }

    #[test]
    fn unbroken_run_counts_every_day() {
        let history = vec![at(1, 5), at(2, 4), at(3, 5)];
        assert_eq!(consecutive_days_through(&history, today()), 4);
    }

    #[test]
    fn a_gap_day_breaks_the_run() {
        let history = vec![at(1, 5), at(3, 5), at(4, 5)];
        assert_eq!(consecutive_days_through(&history, today()), 2);
    }

    #[test]
    fn several_completions_on_one_day_count_once() {
        let history = vec![at(1, 5), at(1, 3), at(1, 4)];
        assert_eq!(consecutive_days_through(&history, today()), 2);
    }

    #[test]
    fn completions_today_do_not_double_count_today() {
        let history = vec![at(0, 5), at(1, 5)];
        assert_eq!(consecutive_days_through(&history, today()), 2);
    }

    #[test]
    fn week_window_counts_trailing_seven_days() {
        let now = at(0, 5).completed_at;
        let history = vec![at(1, 5), at(3, 5), at(6, 5), at(8, 2)];
        let window = week_window(&history, now, 5);
        // Three historical completions inside the window plus this one;
        // the 8-day-old two-star rating is outside and ignored.
        assert_eq!(window.services_this_week, 4);
        assert_eq!(window.week_rating, 5);
    }

    #[test]
    fn week_rating_is_the_lowest_in_window() {
        let now = at(0, 5).completed_at;
        let history = vec![at(1, 5), at(2, 3)];
        let window = week_window(&history, now, 5);
        assert_eq!(window.week_rating, 3);
    }

    #[test]
    fn empty_history_window_is_just_this_completion() {
        let now = at(0, 4).completed_at;
        let window = week_window(&[], now, 4);
        assert_eq!(window.services_this_week, 1);
        assert_eq!(window.week_rating, 4);
    }
}
