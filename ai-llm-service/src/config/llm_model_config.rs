use crate::config::llm_provider::LlmProvider;

/// Configuration for one chat-completion model.
///
/// # Fields
///
/// - `provider`: which backend to call.
/// - `model`: model identifier (e.g. `"gpt-4.1-nano"`, `"qwen3:14b"`).
/// - `endpoint`: API base URL, without the route (`https://api.openai.com`).
/// - `api_key`: required by OpenAI, ignored by Ollama.
/// - `max_tokens`: optional completion cap.
/// - `temperature`: sampling temperature; classification runs use `0.0`.
/// - `timeout_secs`: request timeout, 60 s when unset.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmModelConfig {
    pub provider: LlmProvider,
    pub model: String,
    pub endpoint: String,
    pub api_key: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub timeout_secs: Option<u64>,
}

impl LlmModelConfig {
    /// Default timeout applied when `timeout_secs` is `None`.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

    /// Effective request timeout.
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs.unwrap_or(Self::DEFAULT_TIMEOUT_SECS))
    }
}
