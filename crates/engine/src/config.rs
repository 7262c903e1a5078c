//! Engine configuration

use std::env;
use std::str::FromStr;
use std::time::Duration;

use fincoach_domain::RecencyMemory;

use crate::infrastructure::llm_client::{DEFAULT_LLM_BASE_URL, DEFAULT_LLM_MODEL};
use crate::infrastructure::mockbank::DEFAULT_MOCKBANK_URL;
use crate::infrastructure::timeout_llm::DEFAULT_LLM_TIMEOUT_SECS;
use crate::use_cases::game::DEFAULT_BATCH_SIZE;

/// Configuration loaded from environment
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub server_host: String,
    pub server_port: u16,

    pub llm: LlmConfig,

    pub game: GameConfig,

    /// Transaction store base URL
    pub mockbank_url: String,

    /// CORS allowed origins; `None` disables the CORS layer
    pub cors_allowed_origins: Option<Vec<String>>,
}

/// Hosted chat-completions settings
#[derive(Debug, Clone, PartialEq)]
pub struct LlmConfig {
    /// OpenAI-compatible base URL, without `/chat/completions`
    pub base_url: String,
    pub api_key: Option<String>,
    /// Model for chat and insights
    pub chat_model: String,
    /// Model for scenario generation
    pub scenario_model: String,
    pub timeout_secs: u64,
}

impl LlmConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Decision game tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub batch_size: usize,
    pub recency_capacity: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            recency_capacity: RecencyMemory::DEFAULT_CAPACITY,
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup. Missing keys take defaults;
    /// unparseable numbers warn and take defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let chat_model = var("LLM_MODEL").unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string());
        let scenario_model = var("SCENARIO_MODEL").unwrap_or_else(|| chat_model.clone());

        let port_key = if var("SERVER_PORT").is_some() { "SERVER_PORT" } else { "PORT" };

        Self {
            server_host: var("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            server_port: parse_or(port_key, var(port_key), 3000),

            llm: LlmConfig {
                base_url: var("LLM_BASE_URL").unwrap_or_else(|| DEFAULT_LLM_BASE_URL.to_string()),
                api_key: var("LLM_API_KEY").or_else(|| var("API_KEY")),
                chat_model,
                scenario_model,
                timeout_secs: at_least_one(
                    "LLM_TIMEOUT_SECS",
                    parse_or("LLM_TIMEOUT_SECS", var("LLM_TIMEOUT_SECS"), DEFAULT_LLM_TIMEOUT_SECS),
                ),
            },

            game: GameConfig {
                batch_size: at_least_one(
                    "SCENARIO_BATCH_SIZE",
                    parse_or("SCENARIO_BATCH_SIZE", var("SCENARIO_BATCH_SIZE"), DEFAULT_BATCH_SIZE),
                ),
                recency_capacity: at_least_one(
                    "RECENCY_CAPACITY",
                    parse_or(
                        "RECENCY_CAPACITY",
                        var("RECENCY_CAPACITY"),
                        RecencyMemory::DEFAULT_CAPACITY,
                    ),
                ),
            },

            mockbank_url: var("MOCKBANK_URL").unwrap_or_else(|| DEFAULT_MOCKBANK_URL.to_string()),

            cors_allowed_origins: var("CORS_ALLOWED_ORIGINS").map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            }),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: FromStr + std::fmt::Display,
{
    match raw {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, default = %default, "Invalid config value, using default");
            default
        }),
    }
}

fn at_least_one<T>(key: &str, value: T) -> T
where
    T: PartialOrd + From<u8> + Copy,
{
    if value < T::from(1) {
        tracing::warn!(key, "Config value must be at least 1, using 1");
        T::from(1)
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> EngineConfig {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EngineConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = config(&[]);

        assert_eq!(cfg.bind_address(), "0.0.0.0:3000");
        assert_eq!(cfg.llm.base_url, DEFAULT_LLM_BASE_URL);
        assert_eq!(cfg.llm.api_key, None);
        assert_eq!(cfg.llm.scenario_model, cfg.llm.chat_model);
        assert_eq!(cfg.llm.timeout(), Duration::from_secs(60));
        assert_eq!(cfg.game, GameConfig { batch_size: 5, recency_capacity: 15 });
        assert_eq!(cfg.mockbank_url, "http://localhost:3001");
        assert_eq!(cfg.cors_allowed_origins, None);
    }

    #[test]
    fn scenario_model_overrides_independently() {
        let cfg = config(&[("LLM_MODEL", "chat-m"), ("SCENARIO_MODEL", "scen-m")]);
        assert_eq!(cfg.llm.chat_model, "chat-m");
        assert_eq!(cfg.llm.scenario_model, "scen-m");
    }

    #[test]
    fn legacy_names_are_accepted() {
        let cfg = config(&[("PORT", "8080"), ("API_KEY", "sk-legacy")]);
        assert_eq!(cfg.server_port, 8080);
        assert_eq!(cfg.llm.api_key.as_deref(), Some("sk-legacy"));
    }

    #[test]
    fn invalid_and_zero_numbers_fall_back() {
        let cfg = config(&[
            ("SERVER_PORT", "not-a-port"),
            ("SCENARIO_BATCH_SIZE", "0"),
            ("RECENCY_CAPACITY", "-3"),
            ("LLM_TIMEOUT_SECS", "0"),
        ]);

        assert_eq!(cfg.server_port, 3000);
        assert_eq!(cfg.game.batch_size, 1);
        assert_eq!(cfg.game.recency_capacity, 15);
        assert_eq!(cfg.llm.timeout_secs, 1);
    }

    #[test]
    fn cors_origins_are_split_and_trimmed() {
        let cfg = config(&[("CORS_ALLOWED_ORIGINS", "http://a.test, http://b.test,")]);
        assert_eq!(
            cfg.cors_allowed_origins,
            Some(vec!["http://a.test".to_string(), "http://b.test".to_string()])
        );
    }
}
