//! Data model of one selection run.

use chrono::{DateTime, Utc};

/// A platform comment as fetched. Never mutated by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: String,
    pub text: String,
    pub username: String,
    pub like_count: u64,
    pub timestamp: DateTime<Utc>,
}

/// A comment alive in the pipeline, plus everything the stages learned about it.
///
/// `text` is the working text: the normalized text after the heuristic gate,
/// the translation after the safety gate. The fetched comment stays intact.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    comment: Comment,
    pub text: String,
    pub cleaned_text: Option<String>,
    pub eligible: Option<bool>,
    pub reason: Option<String>,
    pub translated_text: Option<String>,
    pub is_nsfw: Option<bool>,
}

impl Candidate {
    pub fn new(comment: Comment) -> Self {
        Self {
            text: comment.text.clone(),
            comment,
            cleaned_text: None,
            eligible: None,
            reason: None,
            translated_text: None,
            is_nsfw: None,
        }
    }

    /// The comment exactly as fetched.
    pub fn comment(&self) -> &Comment {
        &self.comment
    }

    pub fn id(&self) -> &str {
        &self.comment.id
    }

    pub fn username(&self) -> &str {
        &self.comment.username
    }
}

/// Stage that left the pipeline without candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// The account has no post to read comments from.
    NoMedia,
    /// The post has no comment.
    NoComments,
    /// No ranked comment passed the heuristic gate.
    NoPromptLike,
    /// The classifier judged every candidate ineligible.
    NoEligible,
    /// Every eligible candidate was flagged NSFW.
    NoSafe,
}

/// Where the selected prompt comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    Comment { comment_id: String },
    Fallback { reason: FallbackReason },
}

/// Terminal value of a selection run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionOutcome {
    pub prompt_text: String,
    pub username: String,
    pub origin: Origin,
}

impl SelectionOutcome {
    pub fn is_fallback(&self) -> bool {
        matches!(self.origin, Origin::Fallback { .. })
    }
}
