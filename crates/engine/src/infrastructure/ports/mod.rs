//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - LLM calls (could swap the hosted chat-completions API for a local model)
//! - Transaction lookups (could swap the mock bank for a real bank API)

mod error;
mod external;

pub use error::{LlmError, TransactionStoreError};
pub use external::{
    DateRange, FinishReason, LlmPort, LlmRequest, LlmResponse, TokenUsage,
    TransactionStorePort,
};

#[cfg(test)]
pub use external::{MockLlmPort, MockTransactionStorePort};
