//! DeepL translation client.
//!
//! `POST {endpoint}/v2/translate` with `Authorization: DeepL-Auth-Key <key>`.
//! Keys ending in `:fx` belong to the free plan and are routed to
//! `api-free.deepl.com` unless `DEEPL_URL` overrides the endpoint.

use std::time::{Duration, Instant};

use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::{ContentError, ContentResult, Service, env_or, env_parse, must_env, status_error};

pub const DEEPL_FREE_URL: &str = "https://api-free.deepl.com";
pub const DEEPL_PRO_URL: &str = "https://api.deepl.com";

#[derive(Debug, Clone)]
pub struct DeepLConfig {
    pub api_key: String,
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl DeepLConfig {
    /// `DEEPL_API_KEY` (required), `DEEPL_URL`, `DEEPL_TIMEOUT_SECS` (default 60).
    pub fn from_env() -> ContentResult<Self> {
        let api_key = must_env("DEEPL_API_KEY")?;
        let endpoint = env_or("DEEPL_URL", default_endpoint(&api_key));
        Ok(Self {
            api_key,
            endpoint,
            timeout_secs: env_parse("DEEPL_TIMEOUT_SECS", 60)?,
        })
    }
}

fn default_endpoint(api_key: &str) -> &'static str {
    if api_key.trim_end().ends_with(":fx") {
        DEEPL_FREE_URL
    } else {
        DEEPL_PRO_URL
    }
}

#[derive(Debug, Clone)]
pub struct DeepLService {
    http: reqwest::Client,
    url_translate: String,
    timeout: Duration,
}

impl DeepLService {
    pub fn new(cfg: DeepLConfig) -> ContentResult<Self> {
        let timeout = Duration::from_secs(cfg.timeout_secs);
        let mut headers = header::HeaderMap::new();
        let auth = header::HeaderValue::from_str(&format!("DeepL-Auth-Key {}", cfg.api_key))
            .map_err(|e| ContentError::decode(Service::DeepL, format!("invalid API key header: {e}")))?;
        headers.insert(header::AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(ContentError::ClientInit)?;

        Ok(Self {
            http,
            url_translate: format!("{}/v2/translate", cfg.endpoint.trim_end_matches('/')),
            timeout,
        })
    }

    /// Translates `text` into `target_lang` (e.g. `EN-US`), source language auto-detected.
    pub async fn translate(&self, text: &str, target_lang: &str) -> ContentResult<String> {
        let started = Instant::now();
        debug!(target_lang, text, "translate with DeepL");

        let resp = self
            .http
            .post(&self.url_translate)
            .json(&TranslateRequest {
                text: [text],
                target_lang,
            })
            .send()
            .await
            .map_err(|e| ContentError::transport(Service::DeepL, e, self.timeout))?;

        if !resp.status().is_success() {
            return Err(status_error(Service::DeepL, resp).await);
        }

        let body: TranslateResponse = resp
            .json()
            .await
            .map_err(|e| ContentError::decode(Service::DeepL, e.to_string()))?;
        let translated = first_translation(body)?;

        info!(
            translated = %translated,
            latency_ms = started.elapsed().as_millis(),
            "translation succeeded"
        );
        Ok(translated)
    }
}

fn first_translation(body: TranslateResponse) -> ContentResult<String> {
    body.translations
        .into_iter()
        .next()
        .map(|t| t.text)
        .ok_or_else(|| ContentError::decode(Service::DeepL, "empty `translations` array"))
}

#[derive(Serialize)]
struct TranslateRequest<'a> {
    text: [&'a str; 1],
    target_lang: &'a str,
}

#[derive(Deserialize)]
struct TranslateResponse {
    translations: Vec<Translation>,
}

#[derive(Deserialize)]
struct Translation {
    text: String,
}
