use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const BODY_PREVIEW_MAX_LEN: usize = 500;

static HTML_TAG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid html tag regex"));
static WHITESPACE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// The slice of an email record the classification engine consumes.
/// String fields are never absent; records missing a field deserialize
/// it as the empty string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassificationInput {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub sender_name: String,
    #[serde(default)]
    pub sender_email: String,
    #[serde(default)]
    pub body_preview: String,
    #[serde(default)]
    pub received_at: Option<DateTime<Utc>>,
}

impl ClassificationInput {
    pub fn new(
        subject: impl Into<String>,
        sender_name: impl Into<String>,
        sender_email: impl Into<String>,
        body: &str,
        received_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            subject: subject.into(),
            sender_name: sender_name.into(),
            sender_email: sender_email.into(),
            body_preview: extract_preview(body, BODY_PREVIEW_MAX_LEN),
            received_at,
        }
    }
}

/// Reduces a raw (possibly HTML) email body to a bounded plain-text
/// excerpt: tags stripped, whitespace collapsed, truncated with `...`.
pub fn extract_preview(body: &str, max_length: usize) -> String {
    if body.is_empty() {
        return String::new();
    }

    let without_tags = HTML_TAG_REGEX.replace_all(body, "");
    let collapsed = WHITESPACE_REGEX
        .replace_all(without_tags.trim(), " ")
        .into_owned();

    if collapsed.chars().count() > max_length {
        let cut: String = collapsed.chars().take(max_length.saturating_sub(3)).collect();
        format!("{}...", cut)
    } else {
        collapsed
    }
}
