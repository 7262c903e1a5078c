//! Aggregate roots - domain objects that own their related data
//!
//! Each aggregate owns its state and exposes behavior through methods.
//! Mutations return what changed instead of making callers diff snapshots.

pub mod achievement_tracker;

pub use achievement_tracker::{AchievementProgress, AchievementTracker};
