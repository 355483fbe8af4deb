//! Level-derived credit multipliers: bonus and discount percentages.
//!
//! A user's level grants a percentage uplift on credits earned
//! (credit-bonus perks) and a percentage reduction on credits spent
//! (discount perks). Both lookups use find-first semantics over the
//! level's perk list; multiple matching perks are never aggregated.
//!
//! All percentage math runs on [`Decimal`] and rounds once, at the end,
//! half away from zero. No floating point, no intermediate rounding.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use timebank_levels::LevelCatalog;
use timebank_types::PerkKind;

/// The effective credit-bonus percentage for a level.
///
/// The bonus is the value of the first [`PerkKind::Credits`] perk whose
/// name contains "Bonus". Returns 0 for a level absent from the catalog
/// (a brand-new record carries level 0, and a table migration can leave
/// records above the top level) and for levels with no such perk.
pub fn credit_bonus(catalog: &LevelCatalog, level: u32) -> u32 {
    catalog.level(level).map_or(0, |def| {
        def.perks
            .iter()
            .find(|perk| perk.kind == PerkKind::Credits && perk.name.contains("Bonus"))
            .and_then(|perk| perk.value)
            .unwrap_or(0)
    })
}

/// The effective discount percentage for a level.
///
/// The discount is the value of the first [`PerkKind::Discount`] perk on
/// the level. Absent levels and levels without a discount perk yield 0.
pub fn discount_percentage(catalog: &LevelCatalog, level: u32) -> u32 {
    catalog.level(level).map_or(0, |def| {
        def.perks
            .iter()
            .find(|perk| perk.kind == PerkKind::Discount)
            .and_then(|perk| perk.value)
            .unwrap_or(0)
    })
}

/// Credits earned for a service after the level bonus:
/// `round(base * (1 + bonus / 100))`.
pub fn apply_level_bonus(catalog: &LevelCatalog, base_credits: u64, level: u32) -> u64 {
    let bonus = percentage_ratio(credit_bonus(catalog, level));
    round_whole(Decimal::from(base_credits).saturating_mul(Decimal::ONE.saturating_add(bonus)))
}

/// Credits charged for a request after the level discount:
/// `round(base * (1 - discount / 100))`.
pub fn apply_level_discount(catalog: &LevelCatalog, base_credits: u64, level: u32) -> u64 {
    let discount = percentage_ratio(discount_percentage(catalog, level));
    round_whole(Decimal::from(base_credits).saturating_mul(Decimal::ONE.saturating_sub(discount)))
}

/// The bonus-only portion of a payout: `round(base * bonus / 100)`.
///
/// Reported separately from the total so the front end can show the
/// uplift on its own.
pub fn bonus_credits(catalog: &LevelCatalog, base_credits: u64, level: u32) -> u64 {
    let bonus = percentage_ratio(credit_bonus(catalog, level));
    round_whole(Decimal::from(base_credits).saturating_mul(bonus))
}

/// A whole percentage as an exact decimal ratio (20 -> 0.2).
fn percentage_ratio(percent: u32) -> Decimal {
    Decimal::from(percent)
        .checked_div(Decimal::ONE_HUNDRED)
        .unwrap_or(Decimal::ZERO)
}

/// Round to a whole credit amount, half away from zero.
///
/// Negative inputs cannot arise (percentages are capped well below 100
/// by the catalog data), but a discount over 100% would floor at 0
/// rather than produce a negative payout.
fn round_whole(value: Decimal) -> u64 {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    use timebank_types::{LevelDefinition, Perk};

    fn credit_perk(id: &str, name: &str, value: u32) -> Perk {
        Perk {
            id: String::from(id),
            name: String::from(name),
            description: String::new(),
            icon: String::new(),
            kind: PerkKind::Credits,
            value: Some(value),
        }
    }

    fn discount_perk(id: &str, value: u32) -> Perk {
        Perk {
            id: String::from(id),
            name: String::from("Discount"),
            description: String::new(),
            icon: String::new(),
            kind: PerkKind::Discount,
            value: Some(value),
        }
    }

    fn single_level(perks: Vec<Perk>) -> LevelCatalog {
        let result = LevelCatalog::new(vec![LevelDefinition {
            level: 1,
            title: String::from("Only"),
            badge: String::new(),
            color: String::new(),
            min_experience: 0,
            max_experience: None,
            services_required: 0,
            perks,
        }]);
        result.unwrap_or_else(|_| LevelCatalog::builtin())
    }

    #[test]
    fn expert_level_bonus_is_twenty_percent() {
        let catalog = LevelCatalog::builtin();
        assert_eq!(credit_bonus(&catalog, 5), 20);
        assert_eq!(apply_level_bonus(&catalog, 100, 5), 120);
    }

    #[test]
    fn absent_level_yields_zero_not_error() {
        let catalog = LevelCatalog::builtin();
        assert_eq!(credit_bonus(&catalog, 999), 0);
        assert_eq!(discount_percentage(&catalog, 999), 0);
        assert_eq!(credit_bonus(&catalog, 0), 0);
        assert_eq!(apply_level_bonus(&catalog, 100, 999), 100);
    }

    #[test]
    fn level_without_matching_perk_yields_zero() {
        let catalog = LevelCatalog::builtin();
        // Level 1 has no credit or discount perks.
        assert_eq!(credit_bonus(&catalog, 1), 0);
        assert_eq!(discount_percentage(&catalog, 1), 0);
    }

    #[test]
    fn bonus_requires_bonus_in_the_perk_name() {
        let catalog = single_level(vec![
            credit_perk("welcome_credits", "Welcome Credits", 50),
            credit_perk("real_bonus", "Loyalty Bonus", 5),
        ]);
        // The first credits perk is skipped: its name lacks "Bonus".
        assert_eq!(credit_bonus(&catalog, 1), 5);
    }

    #[test]
    fn first_matching_perk_wins_no_aggregation() {
        let catalog = single_level(vec![
            credit_perk("bonus_a", "Early Bonus", 5),
            credit_perk("bonus_b", "Late Bonus", 25),
            discount_perk("disc_a", 10),
            discount_perk("disc_b", 30),
        ]);
        assert_eq!(credit_bonus(&catalog, 1), 5);
        assert_eq!(discount_percentage(&catalog, 1), 10);
    }

    #[test]
    fn discount_reduces_the_charge() {
        let catalog = LevelCatalog::builtin();
        assert_eq!(discount_percentage(&catalog, 5), 10);
        assert_eq!(apply_level_discount(&catalog, 100, 5), 90);
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        let catalog = single_level(vec![credit_perk("bonus", "Five Bonus", 5)]);
        // 10 * 1.05 = 10.5 -> 11, not banker's 10.
        assert_eq!(apply_level_bonus(&catalog, 10, 1), 11);
        // 99 * 1.05 = 103.95 -> 104.
        assert_eq!(apply_level_bonus(&catalog, 99, 1), 104);
    }

    #[test]
    fn bonus_and_discount_are_independent_not_inverse() {
        let catalog = single_level(vec![
            credit_perk("bonus", "Flat Bonus", 20),
            discount_perk("discount", 20),
        ]);
        let boosted = apply_level_bonus(&catalog, 100, 1);
        assert_eq!(boosted, 120);
        // Discounting the boosted amount by the same percentage does not
        // return to the base: the two apply to different bases.
        assert_eq!(apply_level_discount(&catalog, boosted, 1), 96);
    }

    #[test]
    fn bonus_portion_reported_separately() {
        let catalog = LevelCatalog::builtin();
        assert_eq!(bonus_credits(&catalog, 100, 5), 20);
        assert_eq!(bonus_credits(&catalog, 60, 2), 3);
        assert_eq!(bonus_credits(&catalog, 100, 999), 0);
    }
}
