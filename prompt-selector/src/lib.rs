//! Picks the image prompt of the day out of a post's comments.
//!
//! The pipeline is linear and short-circuits on empty sets:
//!
//! 1. [`ranker::rank`] keeps the most-liked comments, ties in fetch order;
//! 2. [`heuristic`] drops comments that do not look like a prompt and normalizes the rest;
//! 3. [`SemanticClassifier`] asks a model, in one batch, which ones describe a drawable scene;
//! 4. [`SafetyGate`] translates the survivors and drops NSFW ones;
//! 5. [`SelectionPolicy`] returns the first survivor, or a fixed fallback prompt.
//!
//! Collaborators are reached through the traits in [`services`]; [`adapters`]
//! implements them for the workspace HTTP clients.

pub mod adapters;
pub mod classifier;
pub mod comment;
pub mod config;
pub mod errors;
pub mod heuristic;
pub mod policy;
pub mod ranker;
pub mod safety;
pub mod services;

pub use classifier::{ClassificationResult, SemanticClassifier};
pub use comment::{Candidate, Comment, FallbackReason, Origin, SelectionOutcome};
pub use config::{FallbackPrompt, HeuristicConfig, SafetyMode, SelectionConfig};
pub use errors::{ExternalServiceError, SchemaError, SelectionError, SelectionResult, ServiceKind};
pub use policy::SelectionPolicy;
pub use safety::SafetyGate;
pub use services::{
    ClassifierBackend, LabelScore, NsfwClassifierService, SocialMediaClient, TranslationService,
};
