//! Seams to the outside world.
//!
//! The pipeline only talks to collaborators through these traits; the
//! concrete HTTP clients are wired in [`crate::adapters`], tests plug in
//! in-memory doubles.

use std::future::Future;

use crate::comment::Comment;
use crate::errors::SelectionResult;

/// One `(label, score)` pair returned by an NSFW text classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelScore {
    pub label: String,
    pub score: f32,
}

impl LabelScore {
    pub fn new(label: impl Into<String>, score: f32) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// Model endpoint that answers a system/user message pair with raw JSON text.
pub trait ClassifierBackend {
    fn complete_json(
        &self,
        system: &str,
        user: &str,
    ) -> impl Future<Output = SelectionResult<String>> + Send;
}

pub trait TranslationService {
    fn translate(
        &self,
        text: &str,
        target_lang: &str,
    ) -> impl Future<Output = SelectionResult<String>> + Send;
}

pub trait NsfwClassifierService {
    /// Label scores for `text`, in any order.
    fn classify(&self, text: &str) -> impl Future<Output = SelectionResult<Vec<LabelScore>>> + Send;
}

/// Read side of the social platform.
pub trait SocialMediaClient {
    /// Id of the most recent post, `None` when the account has none.
    fn latest_media_id(&self) -> impl Future<Output = SelectionResult<Option<String>>> + Send;

    fn comments(&self, media_id: &str) -> impl Future<Output = SelectionResult<Vec<Comment>>> + Send;
}
