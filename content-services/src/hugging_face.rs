//! Hugging Face inference client.
//!
//! Two tasks on `POST {endpoint}/models/{model}`:
//! - text classification (`[{label, score}]`, sometimes nested one level);
//! - text-to-image (raw image bytes written to disk).

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::{ContentError, ContentResult, Service, env_or, env_parse, must_env, status_error};

pub const DEFAULT_HF_URL: &str = "https://router.huggingface.co/hf-inference";
pub const DEFAULT_NSFW_MODEL: &str = "eliasalbouzidi/distilbert-nsfw-text-classifier";
pub const DEFAULT_IMAGE_MODEL: &str = "black-forest-labs/FLUX.1-dev";

#[derive(Debug, Clone)]
pub struct HuggingFaceConfig {
    pub api_key: String,
    pub endpoint: String,
    pub nsfw_model: String,
    pub image_model: String,
    pub image_width: u32,
    pub image_height: u32,
    pub timeout_secs: u64,
}

impl HuggingFaceConfig {
    /// Reads `HF_API_KEY` (required) plus optional `HF_URL`, `HF_NSFW_MODEL`,
    /// `HF_IMAGE_MODEL`, `HF_IMAGE_WIDTH`, `HF_IMAGE_HEIGHT`, `HF_TIMEOUT_SECS`.
    pub fn from_env() -> ContentResult<Self> {
        Ok(Self {
            api_key: must_env("HF_API_KEY")?,
            endpoint: env_or("HF_URL", DEFAULT_HF_URL),
            nsfw_model: env_or("HF_NSFW_MODEL", DEFAULT_NSFW_MODEL),
            image_model: env_or("HF_IMAGE_MODEL", DEFAULT_IMAGE_MODEL),
            image_width: env_parse("HF_IMAGE_WIDTH", 1024)?,
            image_height: env_parse("HF_IMAGE_HEIGHT", 1024)?,
            timeout_secs: env_parse("HF_TIMEOUT_SECS", 120)?,
        })
    }
}

/// One label of a text-classification answer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f32,
}

/// Where a generated image landed.
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    pub path: PathBuf,
    pub bytes: usize,
}

#[derive(Debug, Clone)]
pub struct HuggingFaceService {
    http: reqwest::Client,
    cfg: HuggingFaceConfig,
    timeout: Duration,
}

impl HuggingFaceService {
    pub fn new(cfg: HuggingFaceConfig) -> ContentResult<Self> {
        let timeout = Duration::from_secs(cfg.timeout_secs);
        let mut headers = header::HeaderMap::new();
        let auth = header::HeaderValue::from_str(&format!("Bearer {}", cfg.api_key)).map_err(|e| {
            ContentError::decode(Service::HuggingFace, format!("invalid API key header: {e}"))
        })?;
        headers.insert(header::AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(ContentError::ClientInit)?;

        Ok(Self { http, cfg, timeout })
    }

    fn model_url(&self, model: &str) -> String {
        format!("{}/models/{}", self.cfg.endpoint.trim_end_matches('/'), model)
    }

    /// Classifies `text` with the configured NSFW model.
    ///
    /// Labels come back sorted by score, highest first.
    pub async fn classify_text(&self, text: &str) -> ContentResult<Vec<LabelScore>> {
        let started = Instant::now();
        let url = self.model_url(&self.cfg.nsfw_model);

        let resp = self
            .http
            .post(&url)
            .json(&InferenceRequest::<()> {
                inputs: text,
                parameters: None,
            })
            .send()
            .await
            .map_err(|e| ContentError::transport(Service::HuggingFace, e, self.timeout))?;

        if !resp.status().is_success() {
            return Err(status_error(Service::HuggingFace, resp).await);
        }

        let payload: ClassificationPayload = resp
            .json()
            .await
            .map_err(|e| ContentError::decode(Service::HuggingFace, e.to_string()))?;
        let labels = payload.into_sorted();

        debug!(
            text,
            top_label = labels.first().map(|l| l.label.as_str()).unwrap_or("-"),
            top_score = labels.first().map(|l| l.score).unwrap_or(0.0),
            latency_ms = started.elapsed().as_millis(),
            "text classified"
        );
        Ok(labels)
    }

    /// Generates an image for `prompt` and writes it to `output_path`.
    pub async fn generate_image(
        &self,
        prompt: &str,
        output_path: &Path,
    ) -> ContentResult<GeneratedImage> {
        let started = Instant::now();
        let url = self.model_url(&self.cfg.image_model);
        info!(model = %self.cfg.image_model, "generating image");

        let resp = self
            .http
            .post(&url)
            .header(header::ACCEPT, "image/jpeg")
            .json(&InferenceRequest {
                inputs: prompt,
                parameters: Some(ImageParameters {
                    width: self.cfg.image_width,
                    height: self.cfg.image_height,
                }),
            })
            .send()
            .await
            .map_err(|e| ContentError::transport(Service::HuggingFace, e, self.timeout))?;

        if !resp.status().is_success() {
            return Err(status_error(Service::HuggingFace, resp).await);
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| ContentError::transport(Service::HuggingFace, e, self.timeout))?;
        if bytes.is_empty() {
            return Err(ContentError::decode(Service::HuggingFace, "empty image body"));
        }
        tokio::fs::write(output_path, &bytes).await?;

        info!(
            path = %output_path.display(),
            bytes = bytes.len(),
            width = self.cfg.image_width,
            height = self.cfg.image_height,
            latency_ms = started.elapsed().as_millis(),
            "image generated"
        );
        Ok(GeneratedImage {
            path: output_path.to_path_buf(),
            bytes: bytes.len(),
        })
    }
}

#[derive(Serialize)]
struct InferenceRequest<'a, P: Serialize> {
    inputs: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parameters: Option<P>,
}

#[derive(Serialize)]
struct ImageParameters {
    width: u32,
    height: u32,
}

/// Text classification answers come either flat or wrapped in one more array.
#[derive(Deserialize)]
#[serde(untagged)]
enum ClassificationPayload {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

impl ClassificationPayload {
    fn into_sorted(self) -> Vec<LabelScore> {
        let mut labels = match self {
            ClassificationPayload::Nested(outer) => outer.into_iter().next().unwrap_or_default(),
            ClassificationPayload::Flat(flat) => flat,
        };
        labels.sort_by(|a, b| b.score.total_cmp(&a.score));
        labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_payload_is_flattened_and_sorted() {
        let p: ClassificationPayload = serde_json::from_str(
            r#"[[{"label":"safe","score":0.2},{"label":"nsfw","score":0.8}]]"#,
        )
        .expect("decode");
        let labels = p.into_sorted();
        assert_eq!(labels[0].label, "nsfw");
        assert_eq!(labels[1].label, "safe");
    }

    #[test]
    fn flat_payload_is_accepted() {
        let p: ClassificationPayload =
            serde_json::from_str(r#"[{"label":"safe","score":0.97},{"label":"nsfw","score":0.03}]"#)
                .expect("decode");
        assert_eq!(p.into_sorted()[0].label, "safe");
    }

    #[test]
    fn image_request_carries_dimensions() {
        let v = serde_json::to_value(InferenceRequest {
            inputs: "a fox",
            parameters: Some(ImageParameters {
                width: 1024,
                height: 768,
            }),
        })
        .expect("serialize");
        assert_eq!(v["parameters"]["height"], 768);
        let v = serde_json::to_value(InferenceRequest::<()> {
            inputs: "a fox",
            parameters: None,
        })
        .expect("serialize");
        assert!(v.get("parameters").is_none());
    }
}
