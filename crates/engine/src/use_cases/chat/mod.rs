//! Free-text chat relay.
//!
//! Used by the single-prompt endpoint and by the chat WebSocket. Messages
//! starting with `scenario:` go to the scenario model, everything else to
//! the chat model.

use std::sync::Arc;

use crate::infrastructure::ports::{LlmError, LlmPort, LlmRequest};

/// Prefix that routes a socket message to the scenario model.
pub const SCENARIO_PREFIX: &str = "scenario:";

const NO_RESPONSE: &str = "No response";

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("Prompt is empty")]
    EmptyPrompt,
    #[error(transparent)]
    Llm(#[from] LlmError),
}

/// Which model a relayed message went to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRoute {
    Chat,
    Scenario,
}

impl ChatRoute {
    pub fn tag(&self) -> &'static str {
        match self {
            ChatRoute::Chat => "[Chat] ",
            ChatRoute::Scenario => "[Scenario] ",
        }
    }
}

/// Split a raw socket message into its route and prompt text.
pub fn route_message(message: &str) -> (ChatRoute, &str) {
    match message.strip_prefix(SCENARIO_PREFIX) {
        Some(rest) => (ChatRoute::Scenario, rest.trim()),
        None => (ChatRoute::Chat, message.trim()),
    }
}

/// Container for chat use cases.
pub struct ChatUseCases {
    pub ops: Arc<ChatOps>,
}

impl ChatUseCases {
    pub fn new(ops: Arc<ChatOps>) -> Self {
        Self { ops }
    }
}

pub struct ChatOps {
    chat_llm: Arc<dyn LlmPort>,
    scenario_llm: Arc<dyn LlmPort>,
}

impl ChatOps {
    pub fn new(chat_llm: Arc<dyn LlmPort>, scenario_llm: Arc<dyn LlmPort>) -> Self {
        Self {
            chat_llm,
            scenario_llm,
        }
    }

    /// Answer a single prompt with the chat model.
    pub async fn prompt(&self, prompt: &str) -> Result<String, ChatError> {
        self.complete(ChatRoute::Chat, prompt).await
    }

    /// Answer one socket message. The reply is tagged with its route; a
    /// failure becomes an `Error: ...` line instead of an error.
    pub async fn relay(&self, message: &str) -> String {
        let (route, prompt) = route_message(message);
        match self.complete(route, prompt).await {
            Ok(reply) => format!("{}{}", route.tag(), reply),
            Err(e) => {
                tracing::warn!(route = ?route, error = %e, "Chat relay failed");
                format!("Error: {}", e)
            }
        }
    }

    async fn complete(&self, route: ChatRoute, prompt: &str) -> Result<String, ChatError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(ChatError::EmptyPrompt);
        }

        let llm = match route {
            ChatRoute::Chat => &self.chat_llm,
            ChatRoute::Scenario => &self.scenario_llm,
        };
        let response = llm.generate(LlmRequest::prompt(prompt)).await?;

        if response.content.trim().is_empty() {
            Ok(NO_RESPONSE.to_string())
        } else {
            Ok(response.content)
        }
    }
}
