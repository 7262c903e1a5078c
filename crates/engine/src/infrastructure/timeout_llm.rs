//! Deadline-bounded LLM client wrapper
//!
//! Wraps any LlmPort implementation so that a provider which never answers
//! fails the call with `LlmError::Timeout` instead of leaving the request
//! pending forever. Failures are not retried: a failed call fails fast.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::infrastructure::ports::{LlmError, LlmPort, LlmRequest, LlmResponse};

/// Default per-call deadline in seconds.
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 60;

/// Wrapper that races every call against a timer
pub struct TimeoutLlmClient {
    inner: Arc<dyn LlmPort>,
    timeout: Duration,
}

impl TimeoutLlmClient {
    pub fn new(inner: Arc<dyn LlmPort>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }
}

#[async_trait]
impl LlmPort for TimeoutLlmClient {
    async fn generate(&self, request: LlmRequest) -> Result<LlmResponse, LlmError> {
        match tokio::time::timeout(self.timeout, self.inner.generate(request)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::error!(
                    timeout_secs = self.timeout.as_secs(),
                    "LLM request exceeded deadline"
                );
                Err(LlmError::Timeout(self.timeout.as_secs()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// LLM that sleeps before answering
    struct SlowMockLlm {
        delay: Duration,
        calls: AtomicU32,
    }

    impl SlowMockLlm {
        fn new(delay: Duration) -> Self {
            Self {
                delay,
                calls: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl LlmPort for SlowMockLlm {
        async fn generate(&self, _request: LlmRequest) -> Result<LlmResponse, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            Ok(LlmResponse::text("done"))
        }
    }

    #[tokio::test]
    async fn test_passes_through_fast_response() {
        let mock = Arc::new(SlowMockLlm::new(Duration::from_millis(1)));
        let client = TimeoutLlmClient::new(mock, Duration::from_secs(5));

        let result = client.generate(LlmRequest::prompt("hi")).await;

        assert_eq!(result.unwrap().content, "done");
    }

    #[tokio::test(start_paused = true)]
    async fn test_times_out_slow_response() {
        let mock = Arc::new(SlowMockLlm::new(Duration::from_secs(600)));
        let client = TimeoutLlmClient::new(mock.clone(), Duration::from_secs(30));

        let result = client.generate(LlmRequest::prompt("hi")).await;

        assert!(matches!(result, Err(LlmError::Timeout(30))));
        assert_eq!(mock.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_does_not_retry_errors() {
        struct FailingMockLlm {
            calls: AtomicU32,
        }

        #[async_trait]
        impl LlmPort for FailingMockLlm {
            async fn generate(&self, _request: LlmRequest) -> Result<LlmResponse, LlmError> {
                self.calls.fetch_add(1, Ordering::SeqCst);
                Err(LlmError::RequestFailed("connection refused".into()))
            }
        }

        let mock = Arc::new(FailingMockLlm {
            calls: AtomicU32::new(0),
        });
        let client = TimeoutLlmClient::new(mock.clone(), Duration::from_secs(5));

        let result = client.generate(LlmRequest::prompt("hi")).await;

        assert!(matches!(result, Err(LlmError::RequestFailed(_))));
        assert_eq!(mock.calls.load(Ordering::SeqCst), 1);
    }
}
