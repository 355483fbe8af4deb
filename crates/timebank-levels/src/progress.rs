//! Progress derivation: raw counters to level, percentage, and perks.
//!
//! Everything here is pure computation over the catalog and the two
//! persisted counters (`experience_points`, `services_completed`). The
//! snapshot is recomputed from scratch on every call and never cached,
//! so it is always consistent with the counters the caller holds.

use rust_decimal::Decimal;

use timebank_types::UserProgressSnapshot;

use crate::{CatalogError, LevelCatalog};

impl LevelCatalog {
    /// The highest level whose experience floor is at or below
    /// `experience`.
    ///
    /// Scans the catalog from the top down and returns the first level
    /// whose floor qualifies. Floors at the lowest defined level if no
    /// floor qualifies -- cannot happen for a validated catalog, whose
    /// first floor is 0, but the fallback keeps the function total.
    pub fn level_for_experience(&self, experience: u64) -> u32 {
        self.levels()
            .iter()
            .rev()
            .find(|def| def.min_experience <= experience)
            .map_or_else(
                || self.levels().first().map_or(1, |def| def.level),
                |def| def.level,
            )
    }

    /// Derive the full progress snapshot for a user's counters.
    ///
    /// `services_completed` is passed through to the snapshot untouched;
    /// level derivation uses experience alone.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::MissingLevel`] if the level produced by
    /// [`level_for_experience`] has no definition in the catalog. That
    /// indicates a malformed table, not bad user input, and is not
    /// recoverable here.
    ///
    /// [`level_for_experience`]: LevelCatalog::level_for_experience
    pub fn progress(
        &self,
        experience: u64,
        services_completed: u32,
    ) -> Result<UserProgressSnapshot, CatalogError> {
        let current = self.level_for_experience(experience);
        let definition = self
            .level(current)
            .ok_or(CatalogError::MissingLevel { level: current })?;

        // First defined level above the current one; `None` at max level.
        let next = self.levels().iter().find(|def| def.level > current);

        let experience_to_next_level =
            next.map_or(0, |def| def.min_experience.saturating_sub(experience));

        let progress_percentage = next.map_or(Decimal::ONE_HUNDRED, |def| {
            let gained = Decimal::from(experience.saturating_sub(definition.min_experience));
            let span = Decimal::from(def.min_experience.saturating_sub(definition.min_experience));
            gained
                .checked_div(span)
                .unwrap_or(Decimal::ZERO)
                .saturating_mul(Decimal::ONE_HUNDRED)
                .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
        });

        let unlocked_perks = self
            .levels()
            .iter()
            .take_while(|def| def.level <= current)
            .flat_map(|def| def.perks.iter().cloned())
            .collect();

        Ok(UserProgressSnapshot {
            current_level: current,
            current_experience: experience,
            experience_to_next_level,
            progress_percentage,
            services_completed,
            next_level: next.cloned(),
            unlocked_perks,
        })
    }
}
