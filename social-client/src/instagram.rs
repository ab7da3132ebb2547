//! Instagram Graph API client (page media, comments, carousel publishing).
//!
//! Endpoints used:
//! - GET  /{page_id}/media
//! - GET  /{media_id}/comments?fields=id,text,username,like_count,timestamp
//! - POST /{page_id}/media           (container creation)
//! - POST /{page_id}/media_publish   (publish a container)

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info, warn};

use crate::errors::{ConfigError, ProviderError, SocialResult, env_or, must_env};
use crate::types::{ContainerPayload, DataEnvelope, GraphComment, IdResponse, Media};

pub const DEFAULT_GRAPH_URL: &str = "https://graph.facebook.com";
const COMMENT_FIELDS: &str = "id,text,username,like_count,timestamp";

#[derive(Debug, Clone)]
pub struct InstagramConfig {
    /// API base, e.g. "https://graph.facebook.com".
    pub base_api: String,
    /// Instagram business account id owning the posts.
    pub page_id: String,
    pub access_token: String,
    /// Pause between container creations; the Graph API needs time to ingest images.
    pub container_pause: Duration,
}

impl InstagramConfig {
    /// `INSTA_ACCESS_TOKEN`, `INSTA_PAGE_ID` (required), `INSTA_GRAPH_URL`,
    /// `INSTA_CONTAINER_PAUSE_SECS` (default 3).
    pub fn from_env() -> Result<Self, ConfigError> {
        let pause = env_or("INSTA_CONTAINER_PAUSE_SECS", "3");
        let pause_secs = pause.trim().parse::<u64>().map_err(|_| ConfigError::InvalidValue {
            var: "INSTA_CONTAINER_PAUSE_SECS",
            value: pause.clone(),
        })?;
        Ok(Self {
            base_api: env_or("INSTA_GRAPH_URL", DEFAULT_GRAPH_URL),
            page_id: must_env("INSTA_PAGE_ID")?,
            access_token: must_env("INSTA_ACCESS_TOKEN")?,
            container_pause: Duration::from_secs(pause_secs),
        })
    }
}

#[derive(Debug, Clone)]
pub struct InstagramClient {
    http: Client,
    cfg: InstagramConfig,
}

impl InstagramClient {
    /// Constructs a client with a shared reqwest instance.
    pub fn new(http: Client, cfg: InstagramConfig) -> Self {
        Self { http, cfg }
    }

    fn base(&self) -> &str {
        self.cfg.base_api.trim_end_matches('/')
    }

    fn media_url(&self) -> String {
        format!("{}/{}/media", self.base(), self.cfg.page_id)
    }

    /// Lists the page medias, most recent first.
    pub async fn get_medias(&self) -> SocialResult<Vec<Media>> {
        debug!("getting all medias from page");
        let resp: DataEnvelope<Media> = self
            .http
            .get(self.media_url())
            .bearer_auth(&self.cfg.access_token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        info!(count = resp.data.len(), "medias retrieved");
        Ok(resp.data)
    }

    /// Id of the most recent media, `None` when the page has no post yet.
    pub async fn latest_media_id(&self) -> SocialResult<Option<String>> {
        let medias = self.get_medias().await?;
        match medias.into_iter().next() {
            Some(m) => {
                info!(media_id = %m.id, "last media id");
                Ok(Some(m.id))
            }
            None => {
                warn!("no media found");
                Ok(None)
            }
        }
    }

    /// Comments of a media (first page only).
    pub async fn get_comments(&self, media_id: &str) -> SocialResult<Vec<GraphComment>> {
        let url = format!(
            "{}/{}/comments?fields={}",
            self.base(),
            urlencoding::encode(media_id),
            COMMENT_FIELDS
        );
        debug!(media_id, "getting comments");
        let resp: DataEnvelope<GraphComment> = self
            .http
            .get(url)
            .bearer_auth(&self.cfg.access_token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        info!(media_id, count = resp.data.len(), "comments retrieved");
        Ok(resp.data)
    }

    /// Creates a media container and returns its id.
    pub async fn create_container(&self, payload: &ContainerPayload) -> SocialResult<String> {
        let resp: IdResponse = self
            .http
            .post(self.media_url())
            .bearer_auth(&self.cfg.access_token)
            .form(&payload.form_fields())
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        if resp.id.is_empty() {
            return Err(ProviderError::InvalidResponse("empty container id".into()).into());
        }
        info!(container_id = %resp.id, "container created");
        Ok(resp.id)
    }

    /// Publishes a previously created container; returns the published media id.
    pub async fn publish_container(&self, container_id: &str) -> SocialResult<String> {
        let url = format!("{}/{}/media_publish", self.base(), self.cfg.page_id);
        let resp: IdResponse = self
            .http
            .post(url)
            .bearer_auth(&self.cfg.access_token)
            .form(&[("creation_id", container_id)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        info!(media_id = %resp.id, "container published");
        Ok(resp.id)
    }

    /// Creates one child container per image, then the carousel, then publishes it.
    pub async fn publish_carousel(&self, image_urls: &[String], caption: &str) -> SocialResult<String> {
        let mut children = Vec::with_capacity(image_urls.len());
        for url in image_urls {
            let id = self
                .create_container(&ContainerPayload::CarouselItem {
                    image_url: url.clone(),
                })
                .await?;
            children.push(id);
            tokio::time::sleep(self.cfg.container_pause).await;
        }

        let carousel_id = self
            .create_container(&ContainerPayload::Carousel {
                children,
                caption: caption.to_string(),
            })
            .await?;
        tokio::time::sleep(self.cfg.container_pause).await;

        self.publish_container(&carousel_id).await
    }
}
