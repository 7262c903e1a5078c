//! Application state and composition.

use std::sync::Arc;

use fincoach_domain::{AchievementTable, ChoiceClassifier};

use crate::config::{EngineConfig, GameConfig};
use crate::infrastructure::{
    llm_client::ChatCompletionsClient,
    mockbank::MockBankClient,
    ports::{LlmPort, TransactionStorePort},
    timeout_llm::TimeoutLlmClient,
};
use crate::stores::GameSession;
use crate::use_cases;

/// Main application state.
///
/// Holds all use cases; the game session is shared between the game use
/// cases. Passed to HTTP/WebSocket handlers via Axum state.
pub struct App {
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub game: use_cases::GameUseCases,
    pub insights: use_cases::InsightsUseCases,
    pub chat: use_cases::ChatUseCases,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(
        chat_llm: Arc<dyn LlmPort>,
        scenario_llm: Arc<dyn LlmPort>,
        store: Arc<dyn TransactionStorePort>,
        game: GameConfig,
    ) -> Self {
        let session = Arc::new(GameSession::new(
            game.recency_capacity,
            AchievementTable::default(),
        ));

        let generate = Arc::new(use_cases::game::GenerateScenarioBatch::new(
            scenario_llm.clone(),
            session.clone(),
            game.batch_size,
        ));
        let game_use_cases = use_cases::GameUseCases::new(
            Arc::new(use_cases::game::DispenseScenario::new(generate, session.clone())),
            Arc::new(use_cases::game::ResolveChoice::new(
                ChoiceClassifier::default(),
                session,
            )),
        );

        let insights = use_cases::InsightsUseCases::new(Arc::new(
            use_cases::insights::InsightsOps::new(chat_llm.clone(), store),
        ));

        let chat = use_cases::ChatUseCases::new(Arc::new(use_cases::chat::ChatOps::new(
            chat_llm,
            scenario_llm,
        )));

        Self {
            use_cases: UseCases {
                game: game_use_cases,
                insights,
                chat,
            },
        }
    }

    /// Wire the production adapters described by `config`.
    ///
    /// Every LLM client is wrapped in a deadline so no request hangs forever.
    pub fn from_config(config: &EngineConfig) -> Self {
        let llm = &config.llm;

        let chat_llm: Arc<dyn LlmPort> = Arc::new(TimeoutLlmClient::new(
            Arc::new(ChatCompletionsClient::new(
                &llm.base_url,
                &llm.chat_model,
                llm.api_key.clone(),
            )),
            llm.timeout(),
        ));
        let scenario_llm: Arc<dyn LlmPort> = Arc::new(TimeoutLlmClient::new(
            Arc::new(ChatCompletionsClient::new(
                &llm.base_url,
                &llm.scenario_model,
                llm.api_key.clone(),
            )),
            llm.timeout(),
        ));
        let store: Arc<dyn TransactionStorePort> =
            Arc::new(MockBankClient::new(&config.mockbank_url));

        Self::new(chat_llm, scenario_llm, store, config.game)
    }
}
