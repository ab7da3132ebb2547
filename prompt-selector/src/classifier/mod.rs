//! Batch semantic classification of prompt candidates.
//!
//! One backend call per batch. The answer must carry exactly one verdict per
//! input, in input order; anything else is a [`SchemaError`](crate::errors::SchemaError)
//! and no verdict of the batch is applied.

mod parse;
mod prompt;

pub use parse::{ClassificationResult, parse_results};
pub use prompt::{SYSTEM_MESSAGE, build_user_message};

use tracing::{debug, info};

use crate::comment::Candidate;
use crate::errors::SelectionResult;
use crate::services::ClassifierBackend;

pub struct SemanticClassifier<B> {
    backend: B,
}

impl<B: ClassifierBackend> SemanticClassifier<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Classify `texts` in a single request. An empty batch never reaches the backend.
    pub async fn classify(&self, texts: &[String]) -> SelectionResult<Vec<ClassificationResult>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let user = build_user_message(texts);
        let raw = self.backend.complete_json(SYSTEM_MESSAGE, &user).await?;
        debug!(bytes = raw.len(), "classifier answered");
        Ok(parse_results(&raw, texts.len())?)
    }

    /// Record verdicts on `candidates` and keep the eligible ones, order preserved.
    pub async fn filter_eligible(&self, candidates: Vec<Candidate>) -> SelectionResult<Vec<Candidate>> {
        let texts: Vec<String> = candidates.iter().map(|c| c.text.clone()).collect();
        let results = self.classify(&texts).await?;

        let total = candidates.len();
        let kept: Vec<Candidate> = candidates
            .into_iter()
            .zip(results)
            .filter_map(|(mut c, r)| {
                c.eligible = Some(r.eligible);
                c.reason = Some(r.reason);
                if r.eligible {
                    Some(c)
                } else {
                    debug!(comment_id = c.id(), reason = c.reason.as_deref().unwrap_or(""), "not eligible");
                    None
                }
            })
            .collect();

        info!(total, eligible = kept.len(), "semantic classification done");
        Ok(kept)
    }
}
