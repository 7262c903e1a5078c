//! Resolve a player's answer to a scenario.

use std::sync::Arc;

use fincoach_domain::{
    AchievementCategory, AchievementProgress, ChoiceClassifier, ChoiceIndex, Consequence,
    Scenario,
};

use crate::stores::GameSession;

/// Everything the choice screen shows after an answer.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceOutcome {
    pub consequence: Consequence,
    pub learning_tip: String,
    pub category: AchievementCategory,
    pub unlocked: Vec<String>,
    pub progress: AchievementProgress,
}

/// Classifies the chosen option and counts it toward achievements.
///
/// Never fails once it has a well-formed scenario and index.
pub struct ResolveChoice {
    classifier: ChoiceClassifier,
    session: Arc<GameSession>,
}

impl ResolveChoice {
    pub fn new(classifier: ChoiceClassifier, session: Arc<GameSession>) -> Self {
        Self { classifier, session }
    }

    pub async fn execute(&self, scenario: &Scenario, choice: ChoiceIndex) -> ChoiceOutcome {
        let option = scenario.option(choice);
        let consequence = scenario.consequence(choice).clone();

        let category = self.classifier.classify(option, consequence.text());
        let (unlocked, progress) = self.session.record_choice(category).await;

        tracing::info!(
            title = %scenario.title,
            choice = %choice,
            option = %option,
            category = %category,
            unlocked = ?unlocked,
            progress = ?progress,
            "Choice recorded"
        );

        ChoiceOutcome {
            consequence,
            learning_tip: scenario.learning_tip.clone(),
            category,
            unlocked,
            progress,
        }
    }

    pub async fn progress(&self) -> AchievementProgress {
        self.session.progress().await
    }
}
