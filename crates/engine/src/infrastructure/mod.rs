//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod llm_client;
pub mod mockbank;
pub mod ports;
pub mod timeout_llm;
