//! Fincoach domain - scenarios, achievements and transaction analysis.
//!
//! Pure types and rules with no I/O. The engine crate wires these to the
//! LLM and the HTTP surface.

extern crate self as fincoach_domain;

pub mod aggregates;
pub mod analysis;
pub mod classification;
pub mod entities;
pub mod error;
pub mod value_objects;

pub use aggregates::{AchievementProgress, AchievementTracker};
pub use analysis::{
    analyze, fallback_insights, CategoryTotal, Insight, InsightType, StatusCounts,
    TransactionAnalysis,
};
pub use classification::{classify_choice, ChoiceClassifier, ClassificationRule};
pub use entities::{
    ChoiceIndex, Consequence, Scenario, Transaction, TransactionStatus, CONSEQUENCE_KEYS,
    OPTION_COUNT,
};
pub use error::DomainError;
pub use value_objects::{AchievementCategory, AchievementTable, AchievementTier, RecencyMemory};
