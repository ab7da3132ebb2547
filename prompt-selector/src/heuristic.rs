//! Structural "does this look like a prompt" check.
//!
//! Pure functions over the raw comment text, evaluated in order:
//! 1. contains `prompt` (any case);
//! 2. no lower-case `www` / `http` (crude link filter);
//! 3. normalized length strictly inside `(min_len, max_len)`;
//! 4. alphabetic share of the normalized non-space characters above
//!    `min_alpha_ratio` percent (drops emoji/symbol-heavy comments).

use std::sync::OnceLock;

use regex::Regex;

use crate::config::HeuristicConfig;

fn strip_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[@#]\w+|prompt:").expect("static regex"))
}

/// Lower-cases, removes every `prompt:` marker, `@mention` and `#hashtag`, then trims.
pub fn normalize(text: &str) -> String {
    let lower = text.to_lowercase().replace("prompt:", "");
    strip_re().replace_all(&lower, "").trim().to_string()
}

/// [`is_eligible_with`] using the default bounds.
pub fn is_eligible(text: &str) -> bool {
    is_eligible_with(&HeuristicConfig::default(), text)
}

/// Whether the raw `text` passes all four structural checks.
pub fn is_eligible_with(cfg: &HeuristicConfig, text: &str) -> bool {
    if !text.to_lowercase().contains("prompt") {
        return false;
    }
    if text.contains("www") || text.contains("http") {
        return false;
    }

    let cleaned = normalize(text);
    let len = cleaned.chars().count();
    if len <= cfg.min_len || len >= cfg.max_len {
        return false;
    }

    alpha_ratio(&cleaned).is_some_and(|ratio| ratio > cfg.min_alpha_ratio)
}

/// Percentage of alphabetic characters among non-space ones; `None` if there are none.
fn alpha_ratio(text: &str) -> Option<f64> {
    let (alpha, total) = text
        .chars()
        .filter(|&c| c != ' ')
        .fold((0usize, 0usize), |(a, t), c| {
            (a + usize::from(c.is_alphabetic()), t + 1)
        });
    if total == 0 {
        return None;
    }
    Some(alpha as f64 * 100.0 / total as f64)
}
