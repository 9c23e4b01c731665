use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::Response;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{
    ClassificationResult, ClassificationSource, EmailType, SenderType, UrgencyCategory,
};

pub const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

const SYSTEM_PROMPT: &str = "Eres un experto en clasificación de correos académicos. \
Responde siempre con un único objeto JSON válido.";

/// Failures of the primary classification path. Every variant is
/// recovered by the engine via the rule-based fallback; none of them
/// reaches the engine's callers.
#[derive(Debug, Error)]
pub enum ClassificationError {
    #[error("classification request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("model response contained no choices")]
    EmptyResponse,
    #[error("model response missing message content")]
    MissingContent,
    #[error("model returned a malformed verdict: {0}")]
    MalformedVerdict(#[from] serde_json::Error),
}

pub fn build_request(
    model: String,
    prompt: &str,
    max_tokens: u32,
    temperature: f32,
) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model,
        messages: vec![
            ChatMessage {
                role: "system".into(),
                content: SYSTEM_PROMPT.into(),
            },
            ChatMessage {
                role: "user".into(),
                content: prompt.to_string(),
            },
        ],
        temperature,
        max_tokens,
        response_format: ResponseFormat {
            r#type: "json_object".into(),
        },
    }
}

pub async fn parse_response(response: Response) -> Result<ClassificationResult, ClassificationError> {
    let completion: ChatCompletionResponse = response.json().await?;
    let choice = completion
        .choices
        .into_iter()
        .next()
        .ok_or(ClassificationError::EmptyResponse)?;

    let content = choice
        .message
        .and_then(|msg| msg.content)
        .ok_or(ClassificationError::MissingContent)?;

    parse_verdict(&content)
}

/// Parses one model completion into a normalized verdict. Fails only
/// on invalid JSON or an absent required field; every recognized value
/// is coerced into the closed enums.
pub fn parse_verdict(content: &str) -> Result<ClassificationResult, ClassificationError> {
    let raw: RawVerdict = serde_json::from_str(strip_code_fences(content))?;

    let urgency_category = UrgencyCategory::from_label(&raw.urgency_category);
    let sender_type = raw
        .sender_type
        .as_deref()
        .map(SenderType::from_label)
        .unwrap_or(SenderType::External);
    let email_type = raw
        .email_type
        .as_deref()
        .map(EmailType::from_label)
        .unwrap_or(EmailType::Academic);

    Ok(ClassificationResult {
        urgency_category,
        confidence_score: raw.confidence_score.clamp(0.0, 1.0),
        reasoning: raw.reasoning,
        sender_type,
        email_type,
        requires_immediate_action: urgency_category.requires_immediate_action(),
        suggested_deadline: raw.suggested_deadline.as_deref().and_then(parse_deadline),
        classification_source: ClassificationSource::Primary,
    })
}

/// Removes a markdown code-fence wrapper if the model added one.
fn strip_code_fences(content: &str) -> &str {
    let mut cleaned = content.trim();
    if let Some(rest) = cleaned.strip_prefix("```json") {
        cleaned = rest;
    } else if let Some(rest) = cleaned.strip_prefix("```") {
        cleaned = rest;
    }
    if let Some(rest) = cleaned.strip_suffix("```") {
        cleaned = rest;
    }
    cleaned.trim()
}

fn parse_deadline(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

#[derive(Debug, Deserialize)]
struct RawVerdict {
    urgency_category: String,
    confidence_score: f64,
    reasoning: String,
    #[serde(default)]
    sender_type: Option<String>,
    #[serde(default)]
    email_type: Option<String>,
    #[serde(default)]
    suggested_deadline: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub r#type: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: Option<ChatCompletionMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionMessage {
    pub content: Option<String>,
}
