//! imgbb temporary image hosting.
//!
//! `POST {base}/upload` (multipart: `key`, `image`, `expiration`).

use std::path::Path;

use reqwest::{Client, multipart};
use serde::Deserialize;
use tracing::{debug, info};

use crate::errors::{ConfigError, ProviderError, SocialResult, env_or, must_env};

pub const DEFAULT_IMGBB_URL: &str = "https://api.imgbb.com/1";

#[derive(Debug, Clone)]
pub struct ImgbbConfig {
    pub base_api: String,
    pub api_key: String,
    /// Seconds before imgbb deletes the image.
    pub expiration_secs: u64,
}

impl ImgbbConfig {
    /// `IMGBB_API_KEY` (required), `IMGBB_URL`, `IMGBB_EXPIRATION` (default 500).
    pub fn from_env() -> Result<Self, ConfigError> {
        let expiration = env_or("IMGBB_EXPIRATION", "500");
        let expiration_secs =
            expiration
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidValue {
                    var: "IMGBB_EXPIRATION",
                    value: expiration.clone(),
                })?;
        Ok(Self {
            base_api: env_or("IMGBB_URL", DEFAULT_IMGBB_URL),
            api_key: must_env("IMGBB_API_KEY")?,
            expiration_secs,
        })
    }
}

/// Public links of an uploaded image.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadedImage {
    pub url: String,
    #[serde(default)]
    pub display_url: Option<String>,
    #[serde(default)]
    pub delete_url: Option<String>,
}

#[derive(Deserialize)]
struct UploadResponse {
    data: UploadedImage,
}

#[derive(Debug, Clone)]
pub struct ImgbbClient {
    http: Client,
    cfg: ImgbbConfig,
}

impl ImgbbClient {
    pub fn new(http: Client, cfg: ImgbbConfig) -> Self {
        Self { http, cfg }
    }

    /// Uploads the file at `path` and returns its public links.
    pub async fn upload_image(&self, path: &Path) -> SocialResult<UploadedImage> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image.jpeg".to_string());
        debug!(path = %path.display(), bytes = bytes.len(), "uploading image to imgbb");

        let form = multipart::Form::new()
            .text("key", self.cfg.api_key.clone())
            .text("expiration", self.cfg.expiration_secs.to_string())
            .part("image", multipart::Part::bytes(bytes).file_name(file_name));

        let resp: UploadResponse = self
            .http
            .post(format!("{}/upload", self.cfg.base_api.trim_end_matches('/')))
            .multipart(form)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if resp.data.url.is_empty() {
            return Err(ProviderError::InvalidResponse("imgbb returned an empty url".into()).into());
        }
        info!(url = %resp.data.url, "image uploaded to imgbb");
        Ok(resp.data)
    }
}
