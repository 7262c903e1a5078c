//! Value objects - Immutable objects defined by their attributes

mod achievement;
mod recency;

pub use achievement::{AchievementCategory, AchievementTable, AchievementTier};
pub use recency::RecencyMemory;
