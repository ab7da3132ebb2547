//! Ordered selection pipeline with a total fallback.

use tracing::info;

use crate::classifier::SemanticClassifier;
use crate::comment::{Candidate, Comment, FallbackReason, Origin, SelectionOutcome};
use crate::config::{FallbackPrompt, SelectionConfig};
use crate::errors::SelectionResult;
use crate::heuristic;
use crate::ranker;
use crate::safety::SafetyGate;
use crate::services::{ClassifierBackend, NsfwClassifierService, SocialMediaClient, TranslationService};

/// Runs rank, heuristic gate, semantic classification and safety gate, in that order.
///
/// Candidate sets emptied by any stage end in the configured fallback. Collaborator
/// and schema failures are returned as errors instead.
pub struct SelectionPolicy<B, T, N> {
    cfg: SelectionConfig,
    classifier: SemanticClassifier<B>,
    safety: SafetyGate<T, N>,
}

impl<B, T, N> SelectionPolicy<B, T, N>
where
    B: ClassifierBackend,
    T: TranslationService,
    N: NsfwClassifierService,
{
    pub fn new(cfg: SelectionConfig, backend: B, translator: T, nsfw: N) -> Self {
        let safety = SafetyGate::new(
            translator,
            nsfw,
            cfg.target_lang.clone(),
            cfg.nsfw_threshold,
            cfg.safety_mode,
        );
        Self {
            classifier: SemanticClassifier::new(backend),
            safety,
            cfg,
        }
    }

    /// Pick one prompt out of `raw_comments`.
    ///
    /// `media_available == false` or `raw_comments == None` means there is
    /// nothing to read from and goes straight to the fallback.
    pub async fn select(
        &self,
        media_available: bool,
        raw_comments: Option<Vec<Comment>>,
    ) -> SelectionResult<SelectionOutcome> {
        if !media_available {
            return Ok(self.fallback(FallbackReason::NoMedia));
        }
        let Some(raw) = raw_comments.filter(|c| !c.is_empty()) else {
            return Ok(self.fallback(FallbackReason::NoComments));
        };
        let fetched = raw.len();

        let ranked = ranker::rank(raw, self.cfg.top_k);
        let prompt_like = self.prompt_like(ranked);
        info!(stage = "heuristic", fetched, kept = prompt_like.len(), "stage done");
        if prompt_like.is_empty() {
            return Ok(self.fallback(FallbackReason::NoPromptLike));
        }

        let eligible = self.classifier.filter_eligible(prompt_like).await?;
        info!(stage = "classifier", kept = eligible.len(), "stage done");
        if eligible.is_empty() {
            return Ok(self.fallback(FallbackReason::NoEligible));
        }

        let safe = self.safety.filter_safe(eligible).await?;
        info!(stage = "safety", kept = safe.len(), "stage done");
        let Some(winner) = safe.into_iter().next() else {
            return Ok(self.fallback(FallbackReason::NoSafe));
        };

        info!(comment_id = winner.id(), username = winner.username(), "prompt selected");
        Ok(SelectionOutcome {
            prompt_text: winner.translated_text.clone().unwrap_or_else(|| winner.text.clone()),
            username: winner.username().to_string(),
            origin: Origin::Comment {
                comment_id: winner.id().to_string(),
            },
        })
    }

    /// Fetch the latest post's comments from `client` and [`select`](Self::select) on them.
    ///
    /// Comments are not requested when the account has no post.
    pub async fn select_latest<S: SocialMediaClient>(&self, client: &S) -> SelectionResult<SelectionOutcome> {
        let Some(media_id) = client.latest_media_id().await? else {
            return self.select(false, None).await;
        };
        let comments = client.comments(&media_id).await?;
        info!(media_id = %media_id, count = comments.len(), "comments fetched");
        self.select(true, Some(comments)).await
    }

    fn prompt_like(&self, ranked: Vec<Comment>) -> Vec<Candidate> {
        ranked
            .into_iter()
            .filter(|c| heuristic::is_eligible_with(&self.cfg.heuristic, &c.text))
            .map(|c| {
                let mut cand = Candidate::new(c);
                let cleaned = heuristic::normalize(&cand.text);
                cand.cleaned_text = Some(cleaned.clone());
                cand.text = cleaned;
                cand
            })
            .collect()
    }

    fn fallback(&self, reason: FallbackReason) -> SelectionOutcome {
        info!(?reason, "no usable comment, using fallback prompt");
        let FallbackPrompt { prompt_text, username } = self.cfg.fallback.clone();
        SelectionOutcome {
            prompt_text,
            username,
            origin: Origin::Fallback { reason },
        }
    }
}
