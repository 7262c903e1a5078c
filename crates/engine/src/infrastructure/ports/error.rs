//! Error types for port operations.

#[derive(Debug, Clone, thiserror::Error)]
pub enum LlmError {
    #[error("LLM request failed: {0}")]
    RequestFailed(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    /// The provider did not answer before the configured deadline.
    #[error("LLM request timed out after {0} seconds")]
    Timeout(u64),
}

/// Errors from the transaction store.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransactionStoreError {
    /// The store does not know the user.
    #[error("User not found: {0}")]
    NotFound(String),
    #[error("Transaction store request failed: {0}")]
    RequestFailed(String),
    #[error("Invalid transaction store response: {0}")]
    InvalidResponse(String),
}
