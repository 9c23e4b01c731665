use chrono::Utc;
use reqwest::Client;

use crate::{config::OpenAiConfig, domain::{ClassificationInput, ClassificationResult}};

use super::{
    inference::{build_request, parse_response, ClassificationError},
    prompt::build_prompt,
};

/// Thin wrapper over the chat-completions endpoint. Construction
/// requires a configured API key; the engine decides whether a client
/// exists at all.
#[derive(Clone)]
pub struct OpenAiClient {
    http: Client,
    api_key: String,
    config: OpenAiConfig,
}

impl OpenAiClient {
    pub fn from_config(http: Client, config: OpenAiConfig) -> Option<Self> {
        let api_key = config.api_key.clone()?;
        Some(Self {
            http,
            api_key,
            config,
        })
    }

    /// One bounded request, no retries. Any transport, status, or
    /// parse failure surfaces as a `ClassificationError` for the
    /// engine to recover from.
    pub async fn classify(
        &self,
        input: &ClassificationInput,
    ) -> Result<ClassificationResult, ClassificationError> {
        let prompt = build_prompt(input, Utc::now().date_naive());
        let request = build_request(
            self.config.model.clone(),
            &prompt,
            self.config.max_tokens,
            self.config.temperature,
        );

        let response = self
            .http
            .post(&self.config.endpoint)
            .bearer_auth(&self.api_key)
            .timeout(self.config.request_timeout)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        parse_response(response).await
    }
}
