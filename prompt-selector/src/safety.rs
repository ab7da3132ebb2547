//! Translation and NSFW screening of eligible candidates.

use tracing::{debug, info};

use crate::comment::Candidate;
use crate::config::SafetyMode;
use crate::errors::{SelectionError, SelectionResult, ServiceKind};
use crate::services::{LabelScore, NsfwClassifierService, TranslationService};

/// Label that marks unsafe text. Compared case-insensitively.
pub const NSFW_LABEL: &str = "nsfw";

pub struct SafetyGate<T, N> {
    translator: T,
    nsfw: N,
    target_lang: String,
    threshold: f32,
    mode: SafetyMode,
}

impl<T, N> SafetyGate<T, N>
where
    T: TranslationService,
    N: NsfwClassifierService,
{
    pub fn new(translator: T, nsfw: N, target_lang: impl Into<String>, threshold: f32, mode: SafetyMode) -> Self {
        Self {
            translator,
            nsfw,
            target_lang: target_lang.into(),
            threshold,
            mode,
        }
    }

    /// Translate each candidate, classify the translation and drop flagged ones.
    ///
    /// Survivors carry the translation as their working text and keep their
    /// input order. In [`SafetyMode::FirstSafe`] processing stops at the first
    /// survivor, so only that one is returned.
    pub async fn filter_safe(&self, candidates: Vec<Candidate>) -> SelectionResult<Vec<Candidate>> {
        let total = candidates.len();
        let mut safe = Vec::new();

        for mut c in candidates {
            let translated = self.translator.translate(&c.text, &self.target_lang).await?;
            let labels = self.nsfw.classify(&translated).await?;
            if labels.is_empty() {
                return Err(SelectionError::external(
                    ServiceKind::NsfwClassifier,
                    "classifier returned no label",
                ));
            }
            let flagged = is_flagged(&labels, self.threshold);
            debug!(comment_id = c.id(), flagged, "safety check");

            c.translated_text = Some(translated.clone());
            c.is_nsfw = Some(flagged);
            if flagged {
                continue;
            }
            c.text = translated;
            safe.push(c);
            if self.mode == SafetyMode::FirstSafe {
                break;
            }
        }

        info!(total, safe = safe.len(), mode = ?self.mode, "safety gate done");
        Ok(safe)
    }
}

/// Highest-scoring label; on ties the first one listed wins.
pub fn top_label(labels: &[LabelScore]) -> Option<&LabelScore> {
    labels
        .iter()
        .fold(None, |best: Option<&LabelScore>, l| match best {
            Some(b) if b.score >= l.score => Some(b),
            _ => Some(l),
        })
}

/// Flagged when the top label is `nsfw` with a score strictly above `threshold`.
pub fn is_flagged(labels: &[LabelScore], threshold: f32) -> bool {
    top_label(labels).is_some_and(|top| top.label.eq_ignore_ascii_case(NSFW_LABEL) && top.score > threshold)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ls(label: &str, score: f32) -> LabelScore {
        LabelScore::new(label, score)
    }

    #[test]
    fn top_label_picks_max_and_keeps_first_on_tie() {
        let labels = [ls("safe", 0.3), ls("nsfw", 0.7)];
        assert_eq!(top_label(&labels).map(|l| l.label.as_str()), Some("nsfw"));

        let tie = [ls("safe", 0.5), ls("nsfw", 0.5)];
        assert_eq!(top_label(&tie).map(|l| l.label.as_str()), Some("safe"));

        assert!(top_label(&[]).is_none());
    }

    #[test]
    fn flagging_is_strictly_above_threshold() {
        assert!(is_flagged(&[ls("nsfw", 0.61), ls("safe", 0.39)], 0.6));
        assert!(!is_flagged(&[ls("nsfw", 0.6), ls("safe", 0.4)], 0.6));
        assert!(!is_flagged(&[ls("safe", 0.9), ls("nsfw", 0.1)], 0.6));
    }

    #[test]
    fn label_match_ignores_case() {
        assert!(is_flagged(&[ls("NSFW", 0.95)], 0.6));
    }
}
