//! API layer - HTTP and WebSocket entry points.

pub mod http;
pub mod websocket;

pub use http::ApiError;
