//! Achievement progress tracking.
//!
//! The tracker owns one counter per [`AchievementCategory`]. Recording a
//! choice bumps a counter and reports the tiers whose threshold the counter
//! has just reached. Counters only ever go up; there is no reset.

use serde::{Deserialize, Serialize};

use crate::value_objects::{AchievementCategory, AchievementTable};

/// Snapshot of every category counter.
///
/// Serializes as `{"smartChoices": n, "riskyChoices": n, ...}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementProgress {
    pub smart_choices: u32,
    pub risky_choices: u32,
    pub ethical_choices: u32,
    pub savings_improvement_choices: u32,
    pub negotiation_choices: u32,
}

impl AchievementProgress {
    pub fn get(&self, category: AchievementCategory) -> u32 {
        match category {
            AchievementCategory::SmartChoices => self.smart_choices,
            AchievementCategory::RiskyChoices => self.risky_choices,
            AchievementCategory::EthicalChoices => self.ethical_choices,
            AchievementCategory::SavingsImprovementChoices => self.savings_improvement_choices,
            AchievementCategory::NegotiationChoices => self.negotiation_choices,
        }
    }

    fn counter_mut(&mut self, category: AchievementCategory) -> &mut u32 {
        match category {
            AchievementCategory::SmartChoices => &mut self.smart_choices,
            AchievementCategory::RiskyChoices => &mut self.risky_choices,
            AchievementCategory::EthicalChoices => &mut self.ethical_choices,
            AchievementCategory::SavingsImprovementChoices => {
                &mut self.savings_improvement_choices
            }
            AchievementCategory::NegotiationChoices => &mut self.negotiation_choices,
        }
    }

    /// Sum of all counters.
    pub fn total(&self) -> u32 {
        AchievementCategory::ALL
            .iter()
            .map(|c| self.get(*c))
            .fold(0u32, u32::saturating_add)
    }
}

/// Counters plus the tier table they are checked against.
#[derive(Debug, Clone)]
pub struct AchievementTracker {
    table: AchievementTable,
    progress: AchievementProgress,
}

impl AchievementTracker {
    /// All counters start at zero.
    pub fn new(table: AchievementTable) -> Self {
        Self {
            table,
            progress: AchievementProgress::default(),
        }
    }

    /// Count one choice in `category` and return the names of the tiers
    /// unlocked by this call, in ascending threshold order.
    ///
    /// A tier fires only when the counter lands exactly on its threshold, so
    /// tiers unlocked by earlier calls are never reported again.
    pub fn record_choice(&mut self, category: AchievementCategory) -> Vec<String> {
        let counter = self.progress.counter_mut(category);
        *counter = counter.saturating_add(1);
        let reached = *counter;

        self.table
            .tiers(category)
            .iter()
            .filter(|tier| tier.threshold == reached)
            .map(|tier| tier.name.clone())
            .collect()
    }

    pub fn progress(&self) -> AchievementProgress {
        self.progress
    }
}

impl Default for AchievementTracker {
    fn default() -> Self {
        Self::new(AchievementTable::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::AchievementTier;

    #[test]
    fn tiers_fire_exactly_once_at_their_threshold() {
        let table = AchievementTable::empty().with_tiers(
            AchievementCategory::SmartChoices,
            vec![AchievementTier::new(1, "A"), AchievementTier::new(3, "B")],
        );
        let mut tracker = AchievementTracker::new(table);

        assert_eq!(tracker.record_choice(AchievementCategory::SmartChoices), vec!["A"]);
        assert!(tracker.record_choice(AchievementCategory::SmartChoices).is_empty());
        assert_eq!(tracker.record_choice(AchievementCategory::SmartChoices), vec!["B"]);
        assert!(tracker.record_choice(AchievementCategory::SmartChoices).is_empty());

        assert_eq!(tracker.progress().smart_choices, 4);
    }

    #[test]
    fn categories_count_independently() {
        let mut tracker = AchievementTracker::default();

        assert_eq!(
            tracker.record_choice(AchievementCategory::RiskyChoices),
            vec!["RISK TAKER"]
        );
        assert_eq!(
            tracker.record_choice(AchievementCategory::NegotiationChoices),
            vec!["CLEVER NEGOTIATOR"]
        );

        let progress = tracker.progress();
        assert_eq!(progress.risky_choices, 1);
        assert_eq!(progress.negotiation_choices, 1);
        assert_eq!(progress.smart_choices, 0);
        assert_eq!(progress.total(), 2);
    }

    #[test]
    fn category_without_tiers_still_counts() {
        let mut tracker = AchievementTracker::new(AchievementTable::empty());

        assert!(tracker.record_choice(AchievementCategory::EthicalChoices).is_empty());
        assert_eq!(tracker.progress().get(AchievementCategory::EthicalChoices), 1);
    }

    #[test]
    fn tiers_sharing_a_threshold_both_fire() {
        let table = AchievementTable::empty().with_tiers(
            AchievementCategory::RiskyChoices,
            vec![AchievementTier::new(2, "X"), AchievementTier::new(2, "Y")],
        );
        let mut tracker = AchievementTracker::new(table);

        tracker.record_choice(AchievementCategory::RiskyChoices);
        assert_eq!(
            tracker.record_choice(AchievementCategory::RiskyChoices),
            vec!["X", "Y"]
        );
    }

    #[test]
    fn progress_serializes_with_category_keys() {
        let mut tracker = AchievementTracker::default();
        tracker.record_choice(AchievementCategory::SavingsImprovementChoices);

        let json = serde_json::to_value(tracker.progress()).unwrap();
        assert_eq!(json["savingsImprovementChoices"], 1);
        assert_eq!(json["smartChoices"], 0);
        assert_eq!(json.as_object().unwrap().len(), 5);
    }
}
