//! Serve the next scenario, refilling the queue when it runs dry.

use std::sync::Arc;

use serde_json::Value;

use fincoach_domain::Scenario;

use super::generate_batch::GenerateScenarioBatch;
use super::GameError;
use crate::stores::GameSession;

pub struct DispenseScenario {
    generate: Arc<GenerateScenarioBatch>,
    session: Arc<GameSession>,
}

impl DispenseScenario {
    pub fn new(generate: Arc<GenerateScenarioBatch>, session: Arc<GameSession>) -> Self {
        Self { generate, session }
    }

    /// Pop the queue head, generating a batch first if the queue is empty.
    ///
    /// Refills are single-flight: callers that find the queue empty while a
    /// refill is running wait for it and are served from its batch.
    pub async fn execute(&self, user_profile: &Value) -> Result<Scenario, GameError> {
        let queue = self.session.queue();

        if let Some(scenario) = queue.pop().await {
            return Ok(scenario);
        }

        let _refill = self.session.lock_refill().await;

        // Another caller may have refilled while we waited.
        if let Some(scenario) = queue.pop().await {
            tracing::debug!("Served scenario from a concurrent refill");
            return Ok(scenario);
        }

        tracing::info!(batch_size = self.generate.batch_size(), "Scenario queue empty, refilling");
        let scenario = self.generate.execute(user_profile).await?;
        let remaining = queue.len().await;
        tracing::debug!(remaining, "Refill served its first scenario");
        Ok(scenario)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{LlmError, LlmResponse, MockLlmPort};
    use crate::use_cases::game::test_support::batch_output;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn dispenser(llm: MockLlmPort, batch_size: usize) -> (DispenseScenario, Arc<GameSession>) {
        let session = Arc::new(GameSession::default());
        let generate = Arc::new(GenerateScenarioBatch::new(
            Arc::new(llm),
            session.clone(),
            batch_size,
        ));
        (DispenseScenario::new(generate, session.clone()), session)
    }

    #[tokio::test]
    async fn empty_queue_triggers_one_batch_and_returns_its_first_scenario() {
        let mut llm = MockLlmPort::new();
        llm.expect_generate()
            .times(1)
            .returning(|_| Ok(LlmResponse::text(batch_output(&["First", "Second", "Third"]))));
        let (dispenser, session) = dispenser(llm, 3);

        let scenario = dispenser.execute(&json!({})).await.unwrap();

        assert_eq!(scenario.title, "First");
        assert_eq!(session.queue().len().await, 2);
    }

    #[tokio::test]
    async fn serves_from_queue_without_generating() {
        let mut llm = MockLlmPort::new();
        llm.expect_generate()
            .times(1)
            .returning(|_| Ok(LlmResponse::text(batch_output(&["A", "B"]))));
        let (dispenser, _session) = dispenser(llm, 2);

        let a = dispenser.execute(&json!({})).await.unwrap();
        let b = dispenser.execute(&json!({})).await.unwrap();

        assert_eq!((a.title.as_str(), b.title.as_str()), ("A", "B"));
    }

    #[tokio::test]
    async fn concurrent_dispensers_share_a_single_refill() {
        let mut llm = MockLlmPort::new();
        llm.expect_generate()
            .times(1)
            .returning(|_| Ok(LlmResponse::text(batch_output(&["A", "B"]))));
        let (dispenser, session) = dispenser(llm, 2);
        let profile = json!({});

        let (a, b) = tokio::join!(dispenser.execute(&profile), dispenser.execute(&profile));

        let mut titles = vec![a.unwrap().title, b.unwrap().title];
        titles.sort();
        assert_eq!(titles, vec!["A", "B"]);
        assert!(session.queue().is_empty().await);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn refilling_caller_is_never_left_with_an_empty_queue() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let mut llm = MockLlmPort::new();
        llm.expect_generate().returning(move |_| {
            let title = format!("Scenario {}", counter.fetch_add(1, Ordering::SeqCst));
            Ok(LlmResponse::text(batch_output(&[title.as_str()])))
        });
        let (dispenser, session) = dispenser(llm, 1);
        let dispenser = Arc::new(dispenser);

        for _ in 0..50 {
            let handles: Vec<_> = (0..64)
                .map(|_| {
                    let dispenser = dispenser.clone();
                    tokio::spawn(async move { dispenser.execute(&json!({})).await })
                })
                .collect();

            for handle in handles {
                assert!(handle.await.unwrap().is_ok());
            }
        }

        // Every generated scenario was handed out and nothing is left behind.
        assert_eq!(calls.load(Ordering::SeqCst), 50 * 64);
        assert!(session.queue().is_empty().await);
    }

    #[tokio::test]
    async fn refill_failure_propagates() {
        let mut llm = MockLlmPort::new();
        llm.expect_generate()
            .returning(|_| Err(LlmError::InvalidResponse("no choices".into())));
        let (dispenser, session) = dispenser(llm, 5);

        let err = dispenser.execute(&json!({})).await.unwrap_err();

        assert!(matches!(err, GameError::Generation(_)));
        assert!(session.queue().is_empty().await);
    }
}
