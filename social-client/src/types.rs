//! Graph API payloads normalized for the rest of the workspace.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Deserializer};

/// `{ "data": [...] }` envelope used by Graph API list endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct DataEnvelope<T> {
    pub data: Vec<T>,
}

/// `{ "id": "..." }` answer of container creation and publish.
#[derive(Debug, Deserialize)]
pub(crate) struct IdResponse {
    pub id: String,
}

/// A media (post) of the page, most recent first.
#[derive(Debug, Clone, Deserialize)]
pub struct Media {
    pub id: String,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// One comment as returned by `GET /{media_id}/comments`.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphComment {
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub username: String,
    /// Absent when the comment has no likes or the field was not granted.
    #[serde(default)]
    pub like_count: u64,
    #[serde(deserialize_with = "graph_timestamp")]
    pub timestamp: DateTime<Utc>,
}

/// Graph API timestamps look like `2025-01-31T18:04:05+0000`, which is not RFC 3339.
fn graph_timestamp<'de, D>(de: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(de)?;
    parse_graph_timestamp(&raw).map_err(serde::de::Error::custom)
}

pub(crate) fn parse_graph_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::<FixedOffset>::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%z")
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("invalid timestamp `{raw}`: {e}"))
}

/// Form payload for `POST /{page_id}/media`.
#[derive(Debug, Clone, PartialEq)]
pub enum ContainerPayload {
    /// A single image destined to be a carousel child.
    CarouselItem { image_url: String },
    /// The carousel itself, referencing previously created children.
    Carousel {
        children: Vec<String>,
        caption: String,
    },
}

impl ContainerPayload {
    pub(crate) fn form_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            ContainerPayload::CarouselItem { image_url } => vec![
                ("image_url", image_url.clone()),
                ("is_carousel_item", "true".to_string()),
            ],
            ContainerPayload::Carousel { children, caption } => vec![
                ("children", children.join(",")),
                ("caption", caption.clone()),
                ("media_type", "CAROUSEL".to_string()),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn comment_without_like_count_defaults_to_zero() {
        let c: GraphComment = serde_json::from_str(
            r#"{"id":"1","text":"Prompt: a fox","username":"ana","timestamp":"2025-01-31T18:04:05+0000"}"#,
        )
        .expect("decode");
        assert_eq!(c.like_count, 0);
        assert_eq!(c.timestamp.year(), 2025);
        assert_eq!(c.timestamp.hour(), 18);
    }

    #[test]
    fn offsets_are_normalized_to_utc() {
        let t = parse_graph_timestamp("2025-01-31T20:04:05+0200").expect("parse");
        assert_eq!(t.hour(), 18);
        let t = parse_graph_timestamp("2025-01-31T18:04:05Z").expect("rfc3339");
        assert_eq!(t.minute(), 4);
        assert!(parse_graph_timestamp("yesterday").is_err());
    }

    #[test]
    fn carousel_children_are_comma_joined() {
        let p = ContainerPayload::Carousel {
            children: vec!["11".into(), "22".into()],
            caption: "hi".into(),
        };
        let fields = p.form_fields();
        assert!(fields.contains(&("children", "11,22".to_string())));
        assert!(fields.contains(&("media_type", "CAROUSEL".to_string())));
    }
}
