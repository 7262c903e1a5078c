//! Chat-completions LLM client (OpenAI-compatible API)
//!
//! Works against any provider exposing `POST {base}/chat/completions`:
//! hosted gateways authenticated with a bearer key, or a local Ollama
//! instance at `http://localhost:11434/v1` without one.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::infrastructure::ports::{
    FinishReason, LlmError, LlmPort, LlmRequest, LlmResponse, TokenUsage,
};

/// Default OpenAI-compatible base URL.
pub const DEFAULT_LLM_BASE_URL: &str = "https://api.featherless.ai/v1";

/// Default model.
pub const DEFAULT_LLM_MODEL: &str = "meta-llama/Meta-Llama-3.1-8B-Instruct";

/// Client for an OpenAI-compatible chat-completions endpoint
#[derive(Clone)]
pub struct ChatCompletionsClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl ChatCompletionsClient {
    /// The HTTP client itself carries no timeout; callers bound calls with
    /// `TimeoutLlmClient` so a slow provider surfaces as `LlmError::Timeout`.
    pub fn new(base_url: &str, model: &str, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl LlmPort for ChatCompletionsClient {
    async fn generate(&self, request: LlmRequest) -> Result<LlmResponse, LlmError> {
        let api_request = ChatRequest {
            model: self.model.clone(),
            messages: build_messages(&request),
            temperature: request.temperature,
        };

        let mut builder = self.client.post(self.endpoint()).json(&api_request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| LlmError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .map_err(|e| LlmError::RequestFailed(e.to_string()))?;
            return Err(LlmError::RequestFailed(format!("{}: {}", status, error_text)));
        }

        let api_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        convert_response(api_response)
    }
}

fn build_messages(request: &LlmRequest) -> Vec<ChatMessageBody> {
    let mut messages = Vec::with_capacity(2);

    if let Some(system) = &request.system_prompt {
        messages.push(ChatMessageBody {
            role: "system".to_string(),
            content: Some(system.clone()),
        });
    }

    messages.push(ChatMessageBody {
        role: "user".to_string(),
        content: Some(request.prompt.clone()),
    });

    messages
}

fn convert_response(response: ChatResponse) -> Result<LlmResponse, LlmError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::InvalidResponse("No choices in LLM response".to_string()))?;

    let finish_reason = match choice.finish_reason.as_deref() {
        Some("stop") | None => FinishReason::Stop,
        Some("length") => FinishReason::Length,
        Some("content_filter") => FinishReason::ContentFilter,
        Some(_) => FinishReason::Unknown,
    };

    Ok(LlmResponse {
        content: choice.message.content.unwrap_or_default(),
        finish_reason,
        usage: response.usage.map(|u| TokenUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        }),
    })
}

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessageBody>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ChatMessageBody {
    role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize, Default)]
struct ChatChoice {
    message: ChatMessageBody,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}
