//! One community-art cycle: select a prompt, paint it, publish it.

use std::path::PathBuf;
use std::time::Duration;

use ai_llm_service::LlmService;
use ai_llm_service::config::default_config::config_classifier_from_env;
use content_services::{DeepLConfig, DeepLService, HuggingFaceConfig, HuggingFaceService};
use prompt_selector::{SelectionConfig, SelectionOutcome, SelectionPolicy};
use social_client::{
    HctiClient, HctiConfig, ImgbbClient, ImgbbConfig, InstagramClient, InstagramConfig,
    build_http_client,
};
use thiserror::Error;
use tracing::{info, warn};

use crate::card;

/// Pause after upload so the hosted image is reachable before Instagram fetches it.
const UPLOAD_SETTLE: Duration = Duration::from_secs(5);

pub type BotResult<T> = Result<T, BotError>;

#[derive(Debug, Error)]
pub enum BotError {
    #[error("invalid value in {var}: {value}")]
    InvalidVar { var: &'static str, value: String },

    #[error(transparent)]
    Selection(#[from] prompt_selector::SelectionError),

    #[error(transparent)]
    Llm(#[from] ai_llm_service::AiLlmError),

    #[error(transparent)]
    Content(#[from] content_services::ContentError),

    #[error(transparent)]
    Social(#[from] social_client::Error),

    #[error(transparent)]
    SocialConfig(#[from] social_client::ConfigError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Voting window announced in the caption and on the card.
    pub days: u32,
    pub output_dir: PathBuf,
    /// Stop once the prompt is chosen; nothing is generated or published.
    pub select_only: bool,
}

impl BotConfig {
    pub fn from_env() -> BotResult<Self> {
        let days = match std::env::var("DAYS") {
            Ok(v) => v.trim().parse().map_err(|_| BotError::InvalidVar {
                var: "DAYS",
                value: v.clone(),
            })?,
            Err(_) => 7,
        };
        let output_dir = std::env::var("BOT_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));
        let select_only = match std::env::var("BOT_SELECT_ONLY") {
            Ok(v) => parse_bool(&v).ok_or(BotError::InvalidVar {
                var: "BOT_SELECT_ONLY",
                value: v.clone(),
            })?,
            Err(_) => false,
        };
        Ok(Self {
            days,
            output_dir,
            select_only,
        })
    }
}

fn parse_bool(v: &str) -> Option<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

/// Runs the whole cycle once. Any error means nothing was published.
pub async fn run(cfg: &BotConfig) -> BotResult<SelectionOutcome> {
    let http = build_http_client()?;
    let insta = InstagramClient::new(http.clone(), InstagramConfig::from_env()?);

    let llm = LlmService::from_config(config_classifier_from_env()?)?;
    info!(
        provider = %llm.config().provider,
        model = %llm.config().model,
        "classifier backend ready"
    );
    let deepl = DeepLService::new(DeepLConfig::from_env()?)?;
    let hf = HuggingFaceService::new(HuggingFaceConfig::from_env()?)?;

    let policy = SelectionPolicy::new(SelectionConfig::from_env(), llm, deepl, hf.clone());
    let outcome = policy.select_latest(&insta).await?;
    info!(
        username = %outcome.username,
        fallback = outcome.is_fallback(),
        prompt = %outcome.prompt_text,
        "prompt chosen"
    );

    if cfg.select_only {
        warn!("BOT_SELECT_ONLY set, skipping generation and publication");
        return Ok(outcome);
    }

    tokio::fs::create_dir_all(&cfg.output_dir).await?;
    let image_path = cfg.output_dir.join(format!("{}.jpeg", file_stem(&outcome.username)));
    let image = hf.generate_image(&outcome.prompt_text, &image_path).await?;
    info!(path = %image.path.display(), bytes = image.bytes, "image generated");

    let imgbb = ImgbbClient::new(http.clone(), ImgbbConfig::from_env()?);
    let uploaded = imgbb.upload_image(&image.path).await?;
    tokio::time::sleep(UPLOAD_SETTLE).await;

    let hcti = HctiClient::new(http, HctiConfig::from_env()?);
    let user_card = card::render_card(&outcome.prompt_text, &outcome.username, &uploaded.url, cfg.days);
    let card_url = hcti.render(&user_card.html, &user_card.css).await?;

    let caption = card::caption(&outcome.username, cfg.days);
    let post_id = insta
        .publish_carousel(&[uploaded.url.clone(), card_url], &caption)
        .await?;
    info!(post_id = %post_id, "carousel published");

    Ok(outcome)
}

/// Username reduced to characters that are safe in a file name.
fn file_stem(username: &str) -> String {
    let stem: String = username
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        .collect();
    let stem = stem.trim_matches('.');
    if stem.is_empty() {
        "prompt".to_string()
    } else {
        stem.to_string()
    }
}
