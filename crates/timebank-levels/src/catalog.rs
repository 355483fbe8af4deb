//! The level catalog: an immutable, validated table of level definitions.
//!
//! The catalog is process-wide static configuration: built once at
//! startup (either the built-in table or a YAML file) and read-only for
//! the process lifetime. Lookups are by level number, not by position,
//! so gaps in the numbering are legal.

use std::collections::BTreeSet;
use std::path::Path;

use serde::Deserialize;

use timebank_types::{LevelDefinition, Perk, PerkKind};

use crate::CatalogError;

/// On-disk shape of a catalog file.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    /// Level definitions in ascending order.
    levels: Vec<LevelDefinition>,
}

/// The ordered, validated table of level definitions.
///
/// Construction enforces the catalog invariants:
/// - at least one level,
/// - level numbers strictly increasing,
/// - experience floors strictly increasing, with the first floor at 0,
/// - perk ids globally unique,
/// - credit and discount perks carry a percentage value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelCatalog {
    levels: Vec<LevelDefinition>,
}

impl LevelCatalog {
    /// Build a catalog from the given definitions, validating the
    /// catalog invariants.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] naming the first violated invariant.
    pub fn new(levels: Vec<LevelDefinition>) -> Result<Self, CatalogError> {
        if levels.is_empty() {
            return Err(CatalogError::Empty);
        }

        if let Some(first) = levels.first()
            && first.min_experience != 0
        {
            return Err(CatalogError::FirstLevelFloor {
                found: first.min_experience,
            });
        }

        for pair in levels.windows(2) {
            let [lower, upper] = pair else { continue };
            if upper.level <= lower.level {
                return Err(CatalogError::UnorderedLevel { level: upper.level });
            }
            if upper.min_experience <= lower.min_experience {
                return Err(CatalogError::NonIncreasingFloor { level: upper.level });
            }
        }

        let mut seen_ids = BTreeSet::new();
        for def in &levels {
            for perk in &def.perks {
                if !seen_ids.insert(perk.id.clone()) {
                    return Err(CatalogError::DuplicatePerkId {
                        id: perk.id.clone(),
                    });
                }
                if matches!(perk.kind, PerkKind::Credits | PerkKind::Discount)
                    && perk.value.is_none()
                {
                    return Err(CatalogError::MissingPerkValue {
                        id: perk.id.clone(),
                    });
                }
            }
        }

        Ok(Self { levels })
    }

    /// The canonical six-level marketplace catalog.
    ///
    /// Bypasses validation; a test asserts the built-in table satisfies
    /// the catalog invariants.
    pub fn builtin() -> Self {
        Self {
            levels: builtin_levels(),
        }
    }

    /// Parse and validate a catalog from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Yaml`] on malformed input, or the
    /// validation error from [`LevelCatalog::new`].
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_yml::from_str(yaml)?;
        Self::new(file.levels)
    }

    /// Load and validate a catalog from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] if the file cannot be read, plus the
    /// errors of [`LevelCatalog::from_yaml`].
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Look up a level definition by exact level number.
    ///
    /// Returns `None` for any number not in the catalog -- 0, a gap, or
    /// beyond the maximum defined level. Absence is not an error: callers
    /// that reach this with user-supplied numbers treat `None` as "no
    /// perks at that level".
    pub fn level(&self, level: u32) -> Option<&LevelDefinition> {
        self.levels.iter().find(|def| def.level == level)
    }

    /// The highest defined level.
    pub fn max_level(&self) -> Option<&LevelDefinition> {
        self.levels.last()
    }

    /// All level definitions in ascending order.
    pub fn levels(&self) -> &[LevelDefinition] {
        &self.levels
    }
}

impl Default for LevelCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

// ---------------------------------------------------------------------------
// Built-in catalog data
// ---------------------------------------------------------------------------

/// Shorthand constructor for catalog perks.
fn perk(
    id: &str,
    name: &str,
    description: &str,
    icon: &str,
    kind: PerkKind,
    value: Option<u32>,
) -> Perk {
    Perk {
        id: String::from(id),
        name: String::from(name),
        description: String::from(description),
        icon: String::from(icon),
        kind,
        value,
    }
}

/// The canonical level table for the marketplace.
///
/// Thresholds and perk percentages are product constants; the front end
/// renders titles, badges, and colors verbatim.
fn builtin_levels() -> Vec<LevelDefinition> {
    vec![
        LevelDefinition {
            level: 1,
            title: String::from("Newcomer"),
            badge: String::from("🌱"),
            color: String::from("#8bc34a"),
            min_experience: 0,
            max_experience: Some(100),
            services_required: 0,
            perks: vec![
                perk(
                    "community_profile",
                    "Community Profile",
                    "Your profile is listed in the community directory",
                    "👤",
                    PerkKind::Visibility,
                    None,
                ),
                perk(
                    "starter_badge",
                    "Starter Badge",
                    "A badge welcoming you to the community",
                    "🌱",
                    PerkKind::Badge,
                    None,
                ),
            ],
        },
        LevelDefinition {
            level: 2,
            title: String::from("Helper"),
            badge: String::from("🤝"),
            color: String::from("#4caf50"),
            min_experience: 100,
            max_experience: Some(250),
            services_required: 5,
            perks: vec![
                perk(
                    "helper_bonus",
                    "Helper Bonus",
                    "Earn 5% more credits on every completed service",
                    "💰",
                    PerkKind::Credits,
                    Some(5),
                ),
                perk(
                    "helper_badge",
                    "Helper Badge",
                    "Shown next to your name in search results",
                    "🤝",
                    PerkKind::Badge,
                    None,
                ),
            ],
        },
        LevelDefinition {
            level: 3,
            title: String::from("Contributor"),
            badge: String::from("⭐"),
            color: String::from("#2196f3"),
            min_experience: 250,
            max_experience: Some(500),
            services_required: 15,
            perks: vec![
                perk(
                    "search_boost",
                    "Search Boost",
                    "Your services rank higher in search",
                    "🔍",
                    PerkKind::Visibility,
                    None,
                ),
                perk(
                    "contributor_bonus",
                    "Contributor Bonus",
                    "Earn 10% more credits on every completed service",
                    "💰",
                    PerkKind::Credits,
                    Some(10),
                ),
            ],
        },
        LevelDefinition {
            level: 4,
            title: String::from("Specialist"),
            badge: String::from("🏅"),
            color: String::from("#9c27b0"),
            min_experience: 500,
            max_experience: Some(1000),
            services_required: 30,
            perks: vec![
                perk(
                    "priority_matching",
                    "Priority Matching",
                    "Matched first when requesters browse your category",
                    "⚡",
                    PerkKind::Priority,
                    None,
                ),
                perk(
                    "specialist_discount",
                    "Specialist Discount",
                    "Pay 5% fewer credits when requesting services",
                    "🏷️",
                    PerkKind::Discount,
                    Some(5),
                ),
            ],
        },
        LevelDefinition {
            level: 5,
            title: String::from("Expert"),
            badge: String::from("💎"),
            color: String::from("#ff9800"),
            min_experience: 1000,
            max_experience: Some(2000),
            services_required: 60,
            perks: vec![
                perk(
                    "expert_bonus",
                    "Expert Bonus",
                    "Earn 20% more credits on every completed service",
                    "💰",
                    PerkKind::Credits,
                    Some(20),
                ),
                perk(
                    "expert_discount",
                    "Expert Discount",
                    "Pay 10% fewer credits when requesting services",
                    "🏷️",
                    PerkKind::Discount,
                    Some(10),
                ),
                perk(
                    "featured_provider",
                    "Featured Provider",
                    "Featured on the marketplace home page",
                    "✨",
                    PerkKind::Visibility,
                    None,
                ),
            ],
        },
        LevelDefinition {
            level: 6,
            title: String::from("Master"),
            badge: String::from("👑"),
            color: String::from("#f44336"),
            min_experience: 2000,
            max_experience: None,
            services_required: 100,
            perks: vec![
                perk(
                    "master_bonus",
                    "Master Bonus",
                    "Earn 25% more credits on every completed service",
                    "💰",
                    PerkKind::Credits,
                    Some(25),
                ),
                perk(
                    "master_discount",
                    "Master Discount",
                    "Pay 15% fewer credits when requesting services",
                    "🏷️",
                    PerkKind::Discount,
                    Some(15),
                ),
                perk(
                    "custom_rates",
                    "Custom Rates",
                    "Set non-standard hourly rates for your services",
                    "💼",
                    PerkKind::CustomPricing,
                    None,
                ),
                perk(
                    "master_badge",
                    "Master Badge",
                    "The highest badge the community awards",
                    "👑",
                    PerkKind::Badge,
                    None,
                ),
            ],
        },
    ]
}
