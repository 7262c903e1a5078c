//! Keyword classification of player choices into achievement categories.
//!
//! Rules are checked in order and the first rule with a keyword contained in
//! the lower-cased `option + " " + consequence` text wins. When nothing
//! matches the classifier answers with its fallback category, so every
//! choice advances some counter.
//!
//! ```
//! use fincoach_domain::{AchievementCategory, ChoiceClassifier};
//!
//! let classifier = ChoiceClassifier::default();
//! assert_eq!(
//!     classifier.classify("I want to negotiate a deal", ""),
//!     AchievementCategory::NegotiationChoices
//! );
//! assert_eq!(
//!     classifier.classify("do nothing in particular", ""),
//!     AchievementCategory::SmartChoices
//! );
//! ```

use crate::value_objects::AchievementCategory;

/// One row of the classification table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationRule {
    pub category: AchievementCategory,
    /// Lower-case substrings.
    pub keywords: Vec<&'static str>,
}

impl ClassificationRule {
    pub fn new(category: AchievementCategory, keywords: &[&'static str]) -> Self {
        Self {
            category,
            keywords: keywords.to_vec(),
        }
    }

    fn matches(&self, text: &str) -> bool {
        self.keywords.iter().any(|k| text.contains(k))
    }
}

/// Ordered rule list with a guaranteed fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceClassifier {
    rules: Vec<ClassificationRule>,
    fallback: AchievementCategory,
}

impl ChoiceClassifier {
    pub fn new(rules: Vec<ClassificationRule>, fallback: AchievementCategory) -> Self {
        Self { rules, fallback }
    }

    pub fn classify(&self, option_text: &str, consequence_text: &str) -> AchievementCategory {
        let text = format!("{} {}", option_text, consequence_text).to_lowercase();

        self.rules
            .iter()
            .find(|rule| rule.matches(&text))
            .map(|rule| rule.category)
            .unwrap_or(self.fallback)
    }

    pub fn rules(&self) -> &[ClassificationRule] {
        &self.rules
    }

    pub fn fallback(&self) -> AchievementCategory {
        self.fallback
    }
}

impl Default for ChoiceClassifier {
    fn default() -> Self {
        use AchievementCategory::*;

        Self::new(
            vec![
                ClassificationRule::new(
                    NegotiationChoices,
                    &["negotiate", "deal", "bargain", "arrange", "discussion"],
                ),
                ClassificationRule::new(
                    SmartChoices,
                    &["save", "careful", "conservative", "low risk", "frugal", "cautious"],
                ),
                ClassificationRule::new(
                    RiskyChoices,
                    &["risk", "invest", "gamble", "speculate", "high-risk"],
                ),
                ClassificationRule::new(
                    EthicalChoices,
                    &["ethical", "responsible", "donate", "charity", "community"],
                ),
                ClassificationRule::new(
                    SavingsImprovementChoices,
                    &["budget", "cut", "reduce", "lower spending", "tighten"],
                ),
            ],
            SmartChoices,
        )
    }
}

/// Classify with the default table.
pub fn classify_choice(option_text: &str, consequence_text: &str) -> AchievementCategory {
    ChoiceClassifier::default().classify(option_text, consequence_text)
}
