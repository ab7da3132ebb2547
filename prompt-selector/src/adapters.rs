//! Bindings of the pipeline seams to the workspace HTTP clients.

use ai_llm_service::LlmService;
use content_services::{DeepLService, HuggingFaceService};
use social_client::{GraphComment, InstagramClient};

use crate::comment::Comment;
use crate::errors::{SelectionError, SelectionResult, ServiceKind};
use crate::services::{
    ClassifierBackend, LabelScore, NsfwClassifierService, SocialMediaClient, TranslationService,
};

impl ClassifierBackend for LlmService {
    async fn complete_json(&self, system: &str, user: &str) -> SelectionResult<String> {
        LlmService::complete_json(self, system, user)
            .await
            .map_err(|e| SelectionError::external(ServiceKind::SemanticClassifier, e))
    }
}

impl TranslationService for DeepLService {
    async fn translate(&self, text: &str, target_lang: &str) -> SelectionResult<String> {
        DeepLService::translate(self, text, target_lang)
            .await
            .map_err(|e| SelectionError::external(ServiceKind::Translation, e))
    }
}

impl NsfwClassifierService for HuggingFaceService {
    async fn classify(&self, text: &str) -> SelectionResult<Vec<LabelScore>> {
        let labels = self
            .classify_text(text)
            .await
            .map_err(|e| SelectionError::external(ServiceKind::NsfwClassifier, e))?;
        Ok(labels
            .into_iter()
            .map(|l| LabelScore::new(l.label, l.score))
            .collect())
    }
}

impl SocialMediaClient for InstagramClient {
    async fn latest_media_id(&self) -> SelectionResult<Option<String>> {
        InstagramClient::latest_media_id(self)
            .await
            .map_err(|e| SelectionError::external(ServiceKind::SocialMedia, e))
    }

    async fn comments(&self, media_id: &str) -> SelectionResult<Vec<Comment>> {
        let raw = self
            .get_comments(media_id)
            .await
            .map_err(|e| SelectionError::external(ServiceKind::SocialMedia, e))?;
        Ok(raw.into_iter().map(Comment::from).collect())
    }
}

impl From<GraphComment> for Comment {
    fn from(c: GraphComment) -> Self {
        Self {
            id: c.id,
            text: c.text,
            username: c.username,
            like_count: c.like_count,
            timestamp: c.timestamp,
        }
    }
}
