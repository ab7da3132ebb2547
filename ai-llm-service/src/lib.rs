//! Chat-completion backends used to classify comment prompts.
//!
//! The only operation the rest of the workspace needs is
//! [`LlmService::complete_json`]: a system + user message in, the model's raw
//! JSON text out. Parsing and validating that JSON is the caller's business.

pub mod config;
pub mod error_handler;
pub mod llm_service;
pub mod services;

pub use config::llm_model_config::LlmModelConfig;
pub use config::llm_provider::LlmProvider;
pub use error_handler::{AiLlmError, ProviderError, ProviderErrorKind};
pub use llm_service::LlmService;
