//! Error taxonomy of the selection pipeline.
//!
//! Rejecting a candidate (heuristics, ineligible, NSFW) is not an error and
//! never shows up here. What does:
//! - [`SchemaError`]: the classifier answered, but not in the agreed shape;
//! - [`ExternalServiceError`]: a collaborator could not be reached or failed.
//!
//! Both abort the run and propagate to the caller; the pipeline never retries.

use thiserror::Error;

/// Convenient alias for pipeline results.
pub type SelectionResult<T> = Result<T, SelectionError>;

/// Root error type of the selection pipeline.
#[derive(Debug, Error)]
pub enum SelectionError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    External(#[from] ExternalServiceError),
}

/// The classifier response cannot be trusted for the whole batch.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("classifier response does not match the result schema: {0}")]
    Unparseable(String),

    #[error("classifier returned {got} results for {expected} inputs")]
    CountMismatch { expected: usize, got: usize },

    #[error("classifier result at position {position} has index {found}, expected {expected}")]
    IndexMismatch {
        position: usize,
        expected: usize,
        found: usize,
    },
}

/// Collaborator the pipeline was calling when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    SocialMedia,
    Translation,
    SemanticClassifier,
    NsfwClassifier,
}

impl std::fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ServiceKind::SocialMedia => "social media client",
            ServiceKind::Translation => "translation service",
            ServiceKind::SemanticClassifier => "semantic classifier",
            ServiceKind::NsfwClassifier => "nsfw classifier",
        })
    }
}

/// Transport, HTTP or contract failure of a collaborator.
#[derive(Debug, Error)]
#[error("{service} failed: {source}")]
pub struct ExternalServiceError {
    pub service: ServiceKind,
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync>,
}

impl ExternalServiceError {
    pub fn new(
        service: ServiceKind,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            service,
            source: source.into(),
        }
    }
}

impl SelectionError {
    /// Shorthand used by adapters: wrap any error as an [`ExternalServiceError`].
    pub fn external(
        service: ServiceKind,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        SelectionError::External(ExternalServiceError::new(service, source))
    }

    pub fn is_schema(&self) -> bool {
        matches!(self, SelectionError::Schema(_))
    }
}
