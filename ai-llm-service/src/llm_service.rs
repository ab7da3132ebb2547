//! Provider facade (enum dispatch, no trait objects).

use tracing::debug;

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::Result,
    services::{ollama_service::OllamaService, open_ai_service::OpenAiService},
};

/// A ready-to-use chat backend for whichever provider the config names.
#[derive(Debug, Clone)]
pub enum LlmService {
    OpenAI(OpenAiService),
    Ollama(OllamaService),
}

impl LlmService {
    /// Builds the concrete service for `cfg.provider`.
    pub fn from_config(cfg: LlmModelConfig) -> Result<Self> {
        debug!(provider = %cfg.provider, model = %cfg.model, "init llm service");
        Ok(match cfg.provider {
            LlmProvider::OpenAI => Self::OpenAI(OpenAiService::new(cfg)?),
            LlmProvider::Ollama => Self::Ollama(OllamaService::new(cfg)?),
        })
    }

    /// Sends `system` + `user` and returns the model's raw (JSON-constrained) text.
    pub async fn complete_json(&self, system: &str, user: &str) -> Result<String> {
        match self {
            Self::OpenAI(s) => s.complete_json(system, user).await,
            Self::Ollama(s) => s.complete_json(system, user).await,
        }
    }

    /// Config the active backend was built from.
    pub fn config(&self) -> &LlmModelConfig {
        match self {
            Self::OpenAI(s) => s.config(),
            Self::Ollama(s) => s.config(),
        }
    }
}
