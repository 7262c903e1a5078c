//! Achievement categories and their unlock tiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::DomainError;

/// The kind of decision a player made, as far as achievements care.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AchievementCategory {
    SmartChoices,
    RiskyChoices,
    EthicalChoices,
    SavingsImprovementChoices,
    NegotiationChoices,
}

impl AchievementCategory {
    pub const ALL: [AchievementCategory; 5] = [
        AchievementCategory::SmartChoices,
        AchievementCategory::RiskyChoices,
        AchievementCategory::EthicalChoices,
        AchievementCategory::SavingsImprovementChoices,
        AchievementCategory::NegotiationChoices,
    ];

    /// Wire name, e.g. `"smartChoices"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            AchievementCategory::SmartChoices => "smartChoices",
            AchievementCategory::RiskyChoices => "riskyChoices",
            AchievementCategory::EthicalChoices => "ethicalChoices",
            AchievementCategory::SavingsImprovementChoices => "savingsImprovementChoices",
            AchievementCategory::NegotiationChoices => "negotiationChoices",
        }
    }
}

impl fmt::Display for AchievementCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AchievementCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| DomainError::parse(format!("Unknown achievement category: {}", s)))
    }
}

/// A (threshold, name) pair. Fires once, when a counter reaches `threshold`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementTier {
    pub threshold: u32,
    pub name: String,
}

impl AchievementTier {
    pub fn new(threshold: u32, name: impl Into<String>) -> Self {
        Self {
            threshold,
            name: name.into(),
        }
    }
}

/// Per-category tier lists, each sorted ascending by threshold.
///
/// Categories without tiers never unlock anything but still count.
///
/// # Examples
///
/// ```
/// use fincoach_domain::{AchievementCategory, AchievementTable, AchievementTier};
///
/// let table = AchievementTable::empty().with_tiers(
///     AchievementCategory::SmartChoices,
///     vec![AchievementTier::new(3, "B"), AchievementTier::new(1, "A")],
/// );
///
/// let names: Vec<&str> = table
///     .tiers(AchievementCategory::SmartChoices)
///     .iter()
///     .map(|t| t.name.as_str())
///     .collect();
/// assert_eq!(names, vec!["A", "B"]);
/// assert!(table.tiers(AchievementCategory::RiskyChoices).is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AchievementTable {
    // Indexed by position in `AchievementCategory::ALL`.
    tiers: [Vec<AchievementTier>; 5],
}

impl AchievementTable {
    /// A table with no tiers at all.
    pub fn empty() -> Self {
        Self {
            tiers: Default::default(),
        }
    }

    /// Replace the tiers for one category.
    pub fn with_tiers(mut self, category: AchievementCategory, mut tiers: Vec<AchievementTier>) -> Self {
        tiers.sort_by_key(|t| t.threshold);
        self.tiers[slot(category)] = tiers;
        self
    }

    pub fn tiers(&self, category: AchievementCategory) -> &[AchievementTier] {
        &self.tiers[slot(category)]
    }
}

impl Default for AchievementTable {
    /// The tiers the decisions game ships with.
    fn default() -> Self {
        use AchievementCategory::*;

        Self::empty()
            .with_tiers(
                SmartChoices,
                vec![
                    AchievementTier::new(1, "THOUGHTFUL DECISION MAKER"),
                    AchievementTier::new(3, "FINANCIAL STRATEGIST"),
                ],
            )
            .with_tiers(
                RiskyChoices,
                vec![
                    AchievementTier::new(1, "RISK TAKER"),
                    AchievementTier::new(3, "HIGH ROLLER"),
                ],
            )
            .with_tiers(
                EthicalChoices,
                vec![
                    AchievementTier::new(1, "ETHICAL DECIDER"),
                    AchievementTier::new(3, "COMMUNITY CHAMPION"),
                ],
            )
            .with_tiers(
                NegotiationChoices,
                vec![
                    AchievementTier::new(1, "CLEVER NEGOTIATOR"),
                    AchievementTier::new(3, "MASTER DEALMAKER"),
                ],
            )
            .with_tiers(
                SavingsImprovementChoices,
                vec![
                    AchievementTier::new(1, "BUDGET APPRENTICE"),
                    AchievementTier::new(7, "SAVINGS MASTER"),
                ],
            )
    }
}

fn slot(category: AchievementCategory) -> usize {
    match category {
        AchievementCategory::SmartChoices => 0,
        AchievementCategory::RiskyChoices => 1,
        AchievementCategory::EthicalChoices => 2,
        AchievementCategory::SavingsImprovementChoices => 3,
        AchievementCategory::NegotiationChoices => 4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_round_trips_through_wire_name() {
        for category in AchievementCategory::ALL {
            assert_eq!(category.as_str().parse::<AchievementCategory>(), Ok(category));
            assert_eq!(
                serde_json::to_value(category).unwrap(),
                serde_json::Value::String(category.as_str().to_string())
            );
        }
    }

    #[test]
    fn unknown_category_fails_to_parse() {
        assert!("luckyChoices".parse::<AchievementCategory>().is_err());
    }

    #[test]
    fn default_table_is_ascending_for_every_category() {
        let table = AchievementTable::default();
        for category in AchievementCategory::ALL {
            let tiers = table.tiers(category);
            assert!(!tiers.is_empty(), "{category} has no tiers");
            assert!(tiers.windows(2).all(|w| w[0].threshold < w[1].threshold));
        }
    }

    #[test]
    fn savings_master_needs_seven() {
        let table = AchievementTable::default();
        let last = table
            .tiers(AchievementCategory::SavingsImprovementChoices)
            .last()
            .unwrap();
        assert_eq!(last, &AchievementTier::new(7, "SAVINGS MASTER"));
    }
}
