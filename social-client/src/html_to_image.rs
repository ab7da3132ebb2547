//! hcti.io HTML/CSS → image rendering.

use reqwest::Client;
use serde::Deserialize;
use tracing::info;

use crate::errors::{ConfigError, ProviderError, SocialResult, env_or, must_env};

pub const DEFAULT_HCTI_URL: &str = "https://hcti.io/v1";

#[derive(Debug, Clone)]
pub struct HctiConfig {
    pub base_api: String,
    pub user_id: String,
    pub api_key: String,
}

impl HctiConfig {
    /// `HCTI_API_USER_ID`, `HCTI_API_KEY` (required), `HCTI_URL`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            base_api: env_or("HCTI_URL", DEFAULT_HCTI_URL),
            user_id: must_env("HCTI_API_USER_ID")?,
            api_key: must_env("HCTI_API_KEY")?,
        })
    }
}

#[derive(Deserialize)]
struct ImageResponse {
    url: String,
}

#[derive(Debug, Clone)]
pub struct HctiClient {
    http: Client,
    cfg: HctiConfig,
}

impl HctiClient {
    pub fn new(http: Client, cfg: HctiConfig) -> Self {
        Self { http, cfg }
    }

    /// Renders `html` styled by `css` and returns the hosted image URL.
    pub async fn render(&self, html: &str, css: &str) -> SocialResult<String> {
        let resp: ImageResponse = self
            .http
            .post(format!("{}/image", self.cfg.base_api.trim_end_matches('/')))
            .basic_auth(&self.cfg.user_id, Some(&self.cfg.api_key))
            .form(&[("html", html), ("css", css)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        if resp.url.is_empty() {
            return Err(ProviderError::InvalidResponse("hcti returned an empty url".into()).into());
        }
        info!(url = %resp.url, "html converted to image");
        Ok(resp.url)
    }
}
