//! In-memory state storage modules.
//!
//! Stores manage runtime state that doesn't belong in a database:
//! - `GameSession` - scenario queue, recency memory and achievement progress

pub mod game_session;

pub use game_session::{GameSession, ScenarioQueue};
