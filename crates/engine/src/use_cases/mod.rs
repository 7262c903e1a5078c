//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific feature area.

pub mod chat;
pub mod game;
pub mod insights;

pub use chat::ChatUseCases;
pub use game::GameUseCases;
pub use insights::InsightsUseCases;
