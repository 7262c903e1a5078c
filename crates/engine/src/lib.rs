//! Fincoach Engine library.
//!
//! Server side of the personal-finance coach: the decisions game,
//! transaction insights and the chat relay.
//!
//! ## Structure
//!
//! - `use_cases/` - Feature orchestration (game, insights, chat)
//! - `stores/` - In-memory runtime state
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `api/` - HTTP and WebSocket entry points
//! - `config` - Environment configuration
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod config;
pub mod infrastructure;
pub mod stores;
pub mod use_cases;

pub use app::App;
pub use config::EngineConfig;
