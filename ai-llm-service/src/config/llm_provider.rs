/// Backend used for chat-completion inference.
///
/// Both variants speak a "system + user message in, text out" protocol; the
/// classifier only needs that much. Adding a provider means adding a variant
/// here and a service under [`crate::services`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LlmProvider {
    /// Hosted OpenAI chat completions API.
    OpenAI,
    /// Local Ollama runtime.
    Ollama,
}

impl LlmProvider {
    /// Parses the `LLM_KIND` spelling (`openai`, `chatgpt`, `ollama`).
    pub fn from_kind(kind: &str) -> Option<Self> {
        match kind.trim().to_ascii_lowercase().as_str() {
            "openai" | "chatgpt" => Some(Self::OpenAI),
            "ollama" => Some(Self::Ollama),
            _ => None,
        }
    }
}

impl std::fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OpenAI => f.write_str("OpenAI"),
            Self::Ollama => f.write_str("Ollama"),
        }
    }
}
