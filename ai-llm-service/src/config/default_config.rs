//! Classifier model config loaded from environment variables.
//!
//! # Environment variables
//!
//! Common:
//! - `LLM_KIND`         = `openai` (default) or `ollama`
//! - `LLM_TIMEOUT_SECS` = optional request timeout (u64)
//!
//! OpenAI:
//! - `OPENAI_API_KEY` (mandatory)
//! - `OPENAI_URL`     (default `https://api.openai.com`)
//! - `OPENAI_MODEL`   (default `gpt-4.1-nano`)
//!
//! Ollama:
//! - `OLLAMA_URL`   (default `http://127.0.0.1:11434`)
//! - `OLLAMA_MODEL` (mandatory)

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{
        ConfigError, Result, env_opt_u64, env_or, must_env, validate_http_endpoint,
    },
};

pub const DEFAULT_OPENAI_URL: &str = "https://api.openai.com";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4.1-nano";
pub const DEFAULT_OLLAMA_URL: &str = "http://127.0.0.1:11434";

/// Builds the classifier config for whichever provider `LLM_KIND` names.
///
/// # Errors
/// - [`ConfigError::UnsupportedProvider`] for an unknown `LLM_KIND`
/// - errors of [`config_openai_classifier`] / [`config_ollama_classifier`]
pub fn config_classifier_from_env() -> Result<LlmModelConfig> {
    let kind = env_or("LLM_KIND", "openai");
    match LlmProvider::from_kind(&kind) {
        Some(LlmProvider::OpenAI) => config_openai_classifier(),
        Some(LlmProvider::Ollama) => config_ollama_classifier(),
        None => Err(ConfigError::UnsupportedProvider(kind).into()),
    }
}

/// OpenAI config tuned for deterministic classification.
///
/// # Defaults
/// - `temperature = Some(0.0)`
/// - `timeout_secs = LLM_TIMEOUT_SECS or 60`
pub fn config_openai_classifier() -> Result<LlmModelConfig> {
    let endpoint = env_or("OPENAI_URL", DEFAULT_OPENAI_URL);
    validate_http_endpoint("OPENAI_URL", &endpoint)?;
    let api_key = must_env("OPENAI_API_KEY")?;

    Ok(LlmModelConfig {
        provider: LlmProvider::OpenAI,
        model: env_or("OPENAI_MODEL", DEFAULT_OPENAI_MODEL),
        endpoint,
        api_key: Some(api_key),
        max_tokens: None,
        temperature: Some(0.0),
        timeout_secs: env_opt_u64("LLM_TIMEOUT_SECS")?,
    })
}

/// Ollama config tuned for deterministic classification.
pub fn config_ollama_classifier() -> Result<LlmModelConfig> {
    let endpoint = env_or("OLLAMA_URL", DEFAULT_OLLAMA_URL);
    validate_http_endpoint("OLLAMA_URL", &endpoint)?;

    Ok(LlmModelConfig {
        provider: LlmProvider::Ollama,
        model: must_env("OLLAMA_MODEL")?,
        endpoint,
        api_key: None,
        max_tokens: None,
        temperature: Some(0.0),
        timeout_secs: env_opt_u64("LLM_TIMEOUT_SECS")?,
    })
}
