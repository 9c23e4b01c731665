use reqwest::Client;

use crate::{
    ai::OpenAiClient,
    config::OpenAiConfig,
    domain::{ClassificationInput, ClassificationResult},
};

use super::{fallback, rules::Lexicon};

/// The urgency classification engine. Holds an optional model-backed
/// client; without one (no API key configured) every request goes
/// straight to the rule-based path, which is a supported mode rather
/// than an error.
pub struct UrgencyClassifier {
    client: Option<OpenAiClient>,
    lexicon: Lexicon,
}

impl UrgencyClassifier {
    pub fn new(http: Client, config: OpenAiConfig, lexicon: Lexicon) -> Self {
        let client = OpenAiClient::from_config(http, config);
        if client.is_none() {
            tracing::info!(
                target: "triage",
                "no OpenAI API key configured; using rule-based classification only"
            );
        }
        Self { client, lexicon }
    }

    pub fn rule_based(lexicon: Lexicon) -> Self {
        Self {
            client: None,
            lexicon,
        }
    }

    pub fn has_primary(&self) -> bool {
        self.client.is_some()
    }

    /// Always yields a verdict. The primary path's failure modes are
    /// absorbed here: any transport or parse error downgrades to the
    /// fallback classifier instead of propagating.
    pub async fn classify(&self, input: &ClassificationInput) -> ClassificationResult {
        let Some(client) = &self.client else {
            return fallback::classify(&self.lexicon, input);
        };

        match client.classify(input).await {
            Ok(verdict) => {
                tracing::debug!(
                    target: "triage",
                    subject = %input.subject,
                    category = verdict.urgency_category.as_str(),
                    confidence = verdict.confidence_score,
                    "primary classification succeeded"
                );
                verdict
            }
            Err(err) => {
                tracing::warn!(
                    target: "triage",
                    subject = %input.subject,
                    error = %err,
                    "primary classification failed; using rule-based fallback"
                );
                fallback::classify(&self.lexicon, input)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::domain::{ClassificationSource, UrgencyCategory};

    fn unreachable_config() -> OpenAiConfig {
        OpenAiConfig {
            api_key: Some("sk-test".to_string()),
            // Nothing listens on port 1; the request fails immediately.
            endpoint: "http://127.0.0.1:1".to_string(),
            model: "gpt-4o-mini".to_string(),
            max_tokens: 800,
            temperature: 0.3,
            request_timeout: Duration::from_secs(2),
        }
    }

    #[tokio::test]
    async fn failing_primary_degrades_to_fallback() {
        let classifier =
            UrgencyClassifier::new(Client::new(), unreachable_config(), Lexicon::default());
        assert!(classifier.has_primary());

        let input = ClassificationInput {
            subject: "accidente en laboratorio".to_string(),
            body_preview: "estudiante herido, necesita ambulancia".to_string(),
            ..Default::default()
        };
        let verdict = classifier.classify(&input).await;
        assert_eq!(verdict.classification_source, ClassificationSource::Fallback);
        assert_eq!(verdict.urgency_category, UrgencyCategory::Urgent);
        assert!((0.0..=1.0).contains(&verdict.confidence_score));
    }

    #[tokio::test]
    async fn missing_credential_routes_to_fallback() {
        let classifier = UrgencyClassifier::rule_based(Lexicon::default());
        assert!(!classifier.has_primary());

        let input = ClassificationInput {
            subject: "accidente en laboratorio".to_string(),
            body_preview: "estudiante herido, necesita ambulancia".to_string(),
            ..Default::default()
        };
        let verdict = classifier.classify(&input).await;
        assert_eq!(verdict.classification_source, ClassificationSource::Fallback);
        assert_eq!(verdict.urgency_category, UrgencyCategory::Urgent);
    }

    #[tokio::test]
    async fn classify_always_stays_inside_the_taxonomy() {
        let classifier = UrgencyClassifier::rule_based(Lexicon::default());
        let inputs = [
            ClassificationInput::default(),
            ClassificationInput {
                subject: "���".to_string(),
                body_preview: "{\"not\": \"an email\"}".to_string(),
                ..Default::default()
            },
        ];
        for input in &inputs {
            let verdict = classifier.classify(input).await;
            assert!((0.0..=1.0).contains(&verdict.confidence_score));
            assert!(matches!(
                verdict.urgency_category,
                UrgencyCategory::Urgent
                    | UrgencyCategory::High
                    | UrgencyCategory::Medium
                    | UrgencyCategory::Low
            ));
        }
    }
}
