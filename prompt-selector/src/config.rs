//! Runtime configuration for the selection pipeline.
//!
//! Every knob has a default; [`SelectionConfig::from_env`] overrides them from
//! `SELECT_*` / `FALLBACK_*` variables. The config is passed into
//! [`crate::SelectionPolicy::new`] and never read from global state afterwards.

use tracing::warn;

/// Prompt used when no comment survives the pipeline.
pub const DEFAULT_FALLBACK_PROMPT: &str = "A dog with a funny hat that looks at us.";
/// Author credited for the fallback prompt.
pub const DEFAULT_FALLBACK_USERNAME: &str = "me";

/// Bounds of the structural prompt check.
#[derive(Debug, Clone, PartialEq)]
pub struct HeuristicConfig {
    /// Normalized length must be strictly greater than this (characters).
    pub min_len: usize,
    /// Normalized length must be strictly lower than this (characters).
    pub max_len: usize,
    /// Alphabetic share of non-whitespace characters, in percent, that must be exceeded.
    pub min_alpha_ratio: f64,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            min_len: 10,
            max_len: 230,
            min_alpha_ratio: 70.0,
        }
    }
}

/// How far the safety gate goes through the candidate list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SafetyMode {
    /// Translate and check every candidate.
    #[default]
    Eager,
    /// Stop at the first safe candidate.
    FirstSafe,
}

impl SafetyMode {
    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "eager" => Some(Self::Eager),
            "first_safe" | "first-safe" => Some(Self::FirstSafe),
            _ => None,
        }
    }
}

/// `{prompt_text, username}` pair returned when any stage empties the pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackPrompt {
    pub prompt_text: String,
    pub username: String,
}

impl Default for FallbackPrompt {
    fn default() -> Self {
        Self {
            prompt_text: DEFAULT_FALLBACK_PROMPT.to_string(),
            username: DEFAULT_FALLBACK_USERNAME.to_string(),
        }
    }
}

/// Config bag for one selection run.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionConfig {
    /// DeepL-style target language code.
    pub target_lang: String,
    /// A top label `nsfw` flags a candidate only when its score is strictly above this.
    pub nsfw_threshold: f32,
    /// Number of most-liked comments kept after ranking.
    pub top_k: usize,
    pub heuristic: HeuristicConfig,
    pub safety_mode: SafetyMode,
    pub fallback: FallbackPrompt,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            target_lang: "EN-US".to_string(),
            nsfw_threshold: 0.6,
            top_k: 10,
            heuristic: HeuristicConfig::default(),
            safety_mode: SafetyMode::Eager,
            fallback: FallbackPrompt::default(),
        }
    }
}

impl SelectionConfig {
    /// Build from environment variables, keeping defaults for unset or invalid values.
    pub fn from_env() -> Self {
        let d = Self::default();
        let safety_mode = match std::env::var("SELECT_SAFETY_MODE") {
            Ok(v) => SafetyMode::parse(&v).unwrap_or_else(|| {
                warn!(value = %v, "SELECT_SAFETY_MODE: unknown mode, using eager");
                SafetyMode::Eager
            }),
            Err(_) => d.safety_mode,
        };

        Self {
            target_lang: env("SELECT_TARGET_LANG", &d.target_lang),
            nsfw_threshold: parse("SELECT_NSFW_THRESHOLD", d.nsfw_threshold),
            top_k: parse("SELECT_TOP_K", d.top_k),
            heuristic: HeuristicConfig {
                min_len: parse("SELECT_MIN_LEN", d.heuristic.min_len),
                max_len: parse("SELECT_MAX_LEN", d.heuristic.max_len),
                min_alpha_ratio: parse("SELECT_ALPHA_RATIO", d.heuristic.min_alpha_ratio),
            },
            safety_mode,
            fallback: FallbackPrompt {
                prompt_text: env("FALLBACK_PROMPT", &d.fallback.prompt_text),
                username: env("FALLBACK_USERNAME", &d.fallback.username),
            },
        }
    }
}

fn env(k: &str, dflt: &str) -> String {
    match std::env::var(k) {
        Ok(v) if !v.trim().is_empty() => v,
        _ => dflt.to_string(),
    }
}

fn parse<T: std::str::FromStr + Copy>(k: &str, dflt: T) -> T {
    match std::env::var(k) {
        Ok(v) => v.trim().parse().unwrap_or_else(|_| {
            warn!(var = k, value = %v, "invalid value, keeping default");
            dflt
        }),
        Err(_) => dflt,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let c = SelectionConfig::default();
        assert_eq!(c.target_lang, "EN-US");
        assert_eq!(c.nsfw_threshold, 0.6);
        assert_eq!(c.top_k, 10);
        assert_eq!(c.heuristic.min_len, 10);
        assert_eq!(c.heuristic.max_len, 230);
        assert_eq!(c.heuristic.min_alpha_ratio, 70.0);
        assert_eq!(c.safety_mode, SafetyMode::Eager);
        assert_eq!(c.fallback.username, DEFAULT_FALLBACK_USERNAME);
    }

    #[test]
    fn safety_mode_spellings() {
        assert_eq!(SafetyMode::parse("EAGER"), Some(SafetyMode::Eager));
        assert_eq!(SafetyMode::parse("first-safe"), Some(SafetyMode::FirstSafe));
        assert_eq!(SafetyMode::parse("lazy"), None);
    }
}
