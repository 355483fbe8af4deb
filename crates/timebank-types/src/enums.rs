//! Enumeration types for the Timebank progression engine.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Perk kinds
// ---------------------------------------------------------------------------

/// The category of benefit a perk grants.
///
/// This is a closed set: the bonus and discount lookups match on it
/// exhaustively, so adding a variant forces every lookup site to decide
/// how the new kind participates in credit math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum PerkKind {
    /// Percentage uplift on credits earned for a completed service.
    Credits,
    /// Improved placement in search and browse surfaces.
    Visibility,
    /// A cosmetic badge shown on the user's profile.
    Badge,
    /// Priority treatment in matching and support queues.
    Priority,
    /// Percentage reduction on the credit cost of requesting a service.
    Discount,
    /// Permission to set non-standard hourly rates.
    CustomPricing,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perk_kind_serializes_snake_case() {
        let json = serde_json::to_string(&PerkKind::CustomPricing).unwrap_or_default();
        assert_eq!(json, "\"custom_pricing\"");
    }

    #[test]
    fn perk_kind_deserializes_snake_case() {
        let kind: Result<PerkKind, _> = serde_json::from_str("\"credits\"");
        assert_eq!(kind.ok(), Some(PerkKind::Credits));
    }
}
