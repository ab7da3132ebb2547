#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use chrono::{TimeZone, Utc};
use prompt_selector::{
    ClassifierBackend, Comment, LabelScore, NsfwClassifierService, SelectionError, SelectionResult,
    ServiceKind, SocialMediaClient, TranslationService,
};

pub fn comment(id: &str, text: &str, username: &str, likes: u64) -> Comment {
    Comment {
        id: id.to_string(),
        text: text.to_string(),
        username: username.to_string(),
        like_count: likes,
        timestamp: Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
    }
}

/// Shared call log; every double pushes `"<service>:<argument>"`.
#[derive(Clone, Default)]
pub struct Calls(Arc<Mutex<Vec<String>>>);

impl Calls {
    pub fn push(&self, entry: String) {
        self.0.lock().unwrap().push(entry);
    }

    pub fn all(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn with_prefix(&self, prefix: &str) -> Vec<String> {
        self.all()
            .into_iter()
            .filter_map(|c| c.strip_prefix(prefix).map(str::to_string))
            .collect()
    }
}

/// Parses the numbered lines of the user message back into texts.
pub fn numbered_texts(user: &str) -> Vec<String> {
    user.lines()
        .filter_map(|l| {
            let (num, rest) = l.split_once(". ")?;
            num.parse::<usize>().ok()?;
            serde_json::from_str::<String>(rest).ok()
        })
        .collect()
}

/// Marks a text eligible unless it contains one of `reject`.
pub struct FakeBackend {
    pub calls: Calls,
    pub reject: Vec<String>,
    /// When set, returned verbatim instead of a generated answer.
    pub canned: Option<String>,
}

impl FakeBackend {
    pub fn new(calls: Calls) -> Self {
        Self {
            calls,
            reject: Vec::new(),
            canned: None,
        }
    }

    pub fn rejecting(calls: Calls, words: &[&str]) -> Self {
        Self {
            reject: words.iter().map(|w| w.to_string()).collect(),
            ..Self::new(calls)
        }
    }

    pub fn canned(calls: Calls, raw: &str) -> Self {
        Self {
            canned: Some(raw.to_string()),
            ..Self::new(calls)
        }
    }
}

impl ClassifierBackend for FakeBackend {
    async fn complete_json(&self, _system: &str, user: &str) -> SelectionResult<String> {
        let texts = numbered_texts(user);
        for t in &texts {
            self.calls.push(format!("classify:{t}"));
        }
        if let Some(raw) = &self.canned {
            return Ok(raw.clone());
        }
        let results: Vec<serde_json::Value> = texts
            .iter()
            .enumerate()
            .map(|(i, t)| {
                let eligible = !self.reject.iter().any(|w| t.contains(w.as_str()));
                serde_json::json!({"index": i + 1, "eligible": eligible, "reason": "fake"})
            })
            .collect();
        Ok(serde_json::json!({ "results": results }).to_string())
    }
}

/// Upper-cases the text, or uses a fixed mapping when one is registered.
#[derive(Default)]
pub struct FakeTranslator {
    pub calls: Calls,
    pub map: HashMap<String, String>,
    pub fail: bool,
}

impl FakeTranslator {
    pub fn new(calls: Calls) -> Self {
        Self {
            calls,
            ..Default::default()
        }
    }
}

impl TranslationService for FakeTranslator {
    async fn translate(&self, text: &str, target_lang: &str) -> SelectionResult<String> {
        self.calls.push(format!("translate:{text}"));
        if self.fail {
            return Err(SelectionError::external(ServiceKind::Translation, "connection reset"));
        }
        assert_eq!(target_lang, "EN-US");
        Ok(self
            .map
            .get(text)
            .cloned()
            .unwrap_or_else(|| text.to_uppercase()))
    }
}

/// Scores texts listed in `nsfw` with a configurable score, everything else safe.
#[derive(Default)]
pub struct FakeNsfw {
    pub calls: Calls,
    pub nsfw: HashSet<String>,
    pub score: f32,
    pub empty: bool,
}

impl FakeNsfw {
    pub fn new(calls: Calls) -> Self {
        Self {
            calls,
            score: 0.9,
            ..Default::default()
        }
    }

    pub fn flagging(calls: Calls, texts: &[&str], score: f32) -> Self {
        Self {
            nsfw: texts.iter().map(|t| t.to_string()).collect(),
            score,
            ..Self::new(calls)
        }
    }
}

impl NsfwClassifierService for FakeNsfw {
    async fn classify(&self, text: &str) -> SelectionResult<Vec<LabelScore>> {
        self.calls.push(format!("nsfw:{text}"));
        if self.empty {
            return Ok(Vec::new());
        }
        if self.nsfw.contains(text) {
            Ok(vec![
                LabelScore::new("nsfw", self.score),
                LabelScore::new("safe", 1.0 - self.score),
            ])
        } else {
            Ok(vec![LabelScore::new("safe", 0.97), LabelScore::new("nsfw", 0.03)])
        }
    }
}

pub struct FakeSocial {
    pub calls: Calls,
    pub media_id: Option<String>,
    pub comments: Vec<Comment>,
}

impl SocialMediaClient for FakeSocial {
    async fn latest_media_id(&self) -> SelectionResult<Option<String>> {
        self.calls.push("latest_media_id:".to_string());
        Ok(self.media_id.clone())
    }

    async fn comments(&self, media_id: &str) -> SelectionResult<Vec<Comment>> {
        self.calls.push(format!("comments:{media_id}"));
        Ok(self.comments.clone())
    }
}
