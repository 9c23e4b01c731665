use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    config::AppConfig,
    domain::{ClassificationInput, ClassificationResult, QueueState},
    triage::{self, classify_batch, suggest_priority, BatchPacing, Lexicon, UrgencyClassifier},
};

/// One raw email record from an inbox snapshot. Records may carry a
/// pre-computed preview or a full (possibly HTML) body; the latter is
/// reduced to a bounded excerpt before classification.
#[derive(Debug, Deserialize)]
struct InboxRecord {
    #[serde(default)]
    subject: String,
    #[serde(default)]
    sender_name: String,
    #[serde(default)]
    sender_email: String,
    #[serde(default)]
    body: String,
    #[serde(default)]
    body_preview: String,
    #[serde(default)]
    received_at: Option<DateTime<Utc>>,
}

impl From<InboxRecord> for ClassificationInput {
    fn from(record: InboxRecord) -> Self {
        if record.body_preview.is_empty() {
            ClassificationInput::new(
                record.subject,
                record.sender_name,
                record.sender_email,
                &record.body,
                record.received_at,
            )
        } else {
            ClassificationInput {
                subject: record.subject,
                sender_name: record.sender_name,
                sender_email: record.sender_email,
                body_preview: record.body_preview,
                received_at: record.received_at,
            }
        }
    }
}

/// One triage run: load an inbox snapshot, classify every email, and
/// print a priority-ordered report plus aggregate stats.
pub struct TriageApp {
    config: Arc<AppConfig>,
    classifier: UrgencyClassifier,
}

impl TriageApp {
    pub fn initialize(config: AppConfig) -> Result<Self> {
        let config = Arc::new(config);

        let http_client = Client::builder()
            .user_agent(format!("inbox-triage/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        let lexicon = Lexicon::with_institution_domains(config.institution_domains.clone());
        let classifier = UrgencyClassifier::new(http_client, config.openai.clone(), lexicon);

        Ok(Self { config, classifier })
    }

    pub async fn run(&self, inbox_path: &str) -> Result<()> {
        let raw = tokio::fs::read_to_string(inbox_path)
            .await
            .with_context(|| format!("failed to read inbox snapshot {}", inbox_path))?;
        let records: Vec<InboxRecord> = serde_json::from_str(&raw)
            .with_context(|| format!("invalid inbox snapshot {}", inbox_path))?;
        let inputs: Vec<ClassificationInput> =
            records.into_iter().map(ClassificationInput::from).collect();

        tracing::info!(
            target: "triage",
            emails = inputs.len(),
            primary = self.classifier.has_primary(),
            "starting triage run"
        );

        let pacing = BatchPacing::from(&self.config.batch);
        let results = classify_batch(
            &self.classifier,
            &inputs,
            self.config.batch.chunk_size,
            &pacing,
        )
        .await;

        self.print_report(&inputs, &results);
        Ok(())
    }

    fn print_report(&self, inputs: &[ClassificationInput], results: &[ClassificationResult]) {
        let tz: Tz = self
            .config
            .timezone
            .parse()
            .unwrap_or(chrono_tz::America::Santiago);

        let mut ordered: Vec<(usize, &ClassificationInput, &ClassificationResult)> = inputs
            .iter()
            .zip(results.iter())
            .enumerate()
            .map(|(index, (input, result))| (index, input, result))
            .collect();
        ordered.sort_by_key(|(index, _, result)| {
            (
                QueueState::Classified(result.urgency_category).priority_level(),
                *index,
            )
        });

        println!("== Cola de triage ({} correos) ==", ordered.len());
        for (_, input, result) in &ordered {
            let priority = suggest_priority(result);
            println!(
                "[{category:>6}] {confidence:.2} {received} {sender_type:<14} {sender} | {subject}",
                category = result.urgency_category.as_str(),
                confidence = result.confidence_score,
                received = format_received(input.received_at, tz),
                sender_type = result.sender_type.as_str(),
                sender = if input.sender_email.is_empty() {
                    "(sin remitente)"
                } else {
                    input.sender_email.as_str()
                },
                subject = input.subject,
            );
            println!(
                "         responder en {} - {} [{}, {}]",
                priority.response_window,
                priority.suggested_action,
                result.email_type.as_str(),
                result.classification_source.as_str(),
            );
        }

        let stats = triage::aggregate(results);
        println!("\n== Estadísticas ==");
        match serde_json::to_string_pretty(&stats) {
            Ok(rendered) => println!("{}", rendered),
            Err(err) => tracing::error!(target: "triage", error = %err, "failed to render stats"),
        }
    }
}

fn format_received(received_at: Option<DateTime<Utc>>, tz: Tz) -> String {
    received_at
        .map(|ts| ts.with_timezone(&tz).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "----------------".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inbox_record_builds_preview_from_raw_body() {
        let record: InboxRecord = serde_json::from_str(
            r#"{"subject": "consulta", "sender_email": "a@uss.cl", "body": "<p>hola  mundo</p>"}"#,
        )
        .unwrap();
        let input = ClassificationInput::from(record);
        assert_eq!(input.body_preview, "hola mundo");
    }

    #[test]
    fn inbox_record_prefers_an_existing_preview() {
        let record: InboxRecord = serde_json::from_str(
            r#"{"subject": "x", "body": "<b>ignorado</b>", "body_preview": "ya recortado"}"#,
        )
        .unwrap();
        let input = ClassificationInput::from(record);
        assert_eq!(input.body_preview, "ya recortado");
    }
}
