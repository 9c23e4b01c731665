use std::time::Duration;

use tokio::time::sleep;

use crate::{
    config::BatchConfig,
    domain::{ClassificationInput, ClassificationResult},
};

use super::engine::UrgencyClassifier;

/// Inter-call and inter-chunk delays. Calls are serialized by design;
/// the external service is rate-limited, so correctness means staying
/// under its ceiling rather than minimizing latency.
#[derive(Debug, Clone)]
pub struct BatchPacing {
    pub between_calls: Duration,
    pub between_chunks: Duration,
}

impl BatchPacing {
    pub fn none() -> Self {
        Self {
            between_calls: Duration::ZERO,
            between_chunks: Duration::ZERO,
        }
    }
}

impl From<&BatchConfig> for BatchPacing {
    fn from(config: &BatchConfig) -> Self {
        Self {
            between_calls: config.pause_between_calls,
            between_chunks: config.pause_between_chunks,
        }
    }
}

/// Classifies every input in order. The result vector has the same
/// length and positional correspondence as `inputs`; individual
/// failures are absorbed by the engine, so nothing aborts the batch.
pub async fn classify_batch(
    classifier: &UrgencyClassifier,
    inputs: &[ClassificationInput],
    chunk_size: usize,
    pacing: &BatchPacing,
) -> Vec<ClassificationResult> {
    let chunk_size = chunk_size.max(1);
    let mut results = Vec::with_capacity(inputs.len());
    let chunk_count = inputs.len().div_ceil(chunk_size);

    for (chunk_index, chunk) in inputs.chunks(chunk_size).enumerate() {
        tracing::info!(
            target: "triage",
            chunk = chunk_index + 1,
            chunks = chunk_count,
            size = chunk.len(),
            "classifying chunk"
        );

        for (item_index, input) in chunk.iter().enumerate() {
            if item_index > 0 && !pacing.between_calls.is_zero() {
                sleep(pacing.between_calls).await;
            }
            results.push(classifier.classify(input).await);
        }

        if chunk_index + 1 < chunk_count && !pacing.between_chunks.is_zero() {
            sleep(pacing.between_chunks).await;
        }
    }

    tracing::info!(
        target: "triage",
        total = results.len(),
        "batch classification complete"
    );
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::OpenAiConfig,
        domain::{ClassificationSource, UrgencyCategory},
        triage::rules::Lexicon,
    };

    fn input(subject: &str, body: &str) -> ClassificationInput {
        ClassificationInput {
            subject: subject.to_string(),
            body_preview: body.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn batch_preserves_length_and_order() {
        let classifier = UrgencyClassifier::rule_based(Lexicon::default());
        let inputs = vec![
            input("accidente", "estudiante herido, ambulancia en camino"),
            input("consulta", "solo quería saber el horario, no es urgente"),
            input("", "\u{0000}garbage\u{FFFD}"),
            input("reunión", "plazo de entrega del examen"),
            input("pregunta", "ayuda con el horario de clase"),
        ];

        let results = classify_batch(&classifier, &inputs, 2, &BatchPacing::none()).await;
        assert_eq!(results.len(), inputs.len());
        assert_eq!(results[0].urgency_category, UrgencyCategory::Urgent);
        assert_eq!(results[1].urgency_category, UrgencyCategory::Low);
        assert_eq!(results[3].urgency_category, UrgencyCategory::High);
        assert_eq!(results[4].urgency_category, UrgencyCategory::Medium);
    }

    #[tokio::test]
    async fn failing_service_never_aborts_the_batch() {
        let config = OpenAiConfig {
            api_key: Some("sk-test".to_string()),
            endpoint: "http://127.0.0.1:1".to_string(),
            model: "gpt-4o-mini".to_string(),
            max_tokens: 800,
            temperature: 0.3,
            request_timeout: Duration::from_secs(2),
        };
        let classifier =
            UrgencyClassifier::new(reqwest::Client::new(), config, Lexicon::default());

        let inputs = vec![
            input("accidente", "estudiante herido, ambulancia en camino"),
            input("consulta", "solo quería saber el horario, no es urgente"),
            input("reunión", "plazo de entrega del examen"),
        ];
        let results = classify_batch(&classifier, &inputs, 2, &BatchPacing::none()).await;

        assert_eq!(results.len(), inputs.len());
        assert!(results
            .iter()
            .all(|result| result.classification_source == ClassificationSource::Fallback));
        assert_eq!(results[0].urgency_category, UrgencyCategory::Urgent);
        assert_eq!(results[1].urgency_category, UrgencyCategory::Low);
        assert_eq!(results[2].urgency_category, UrgencyCategory::High);
    }

    #[tokio::test]
    async fn empty_batch_yields_empty_results() {
        let classifier = UrgencyClassifier::rule_based(Lexicon::default());
        let results = classify_batch(&classifier, &[], 5, &BatchPacing::none()).await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn zero_chunk_size_is_treated_as_one() {
        let classifier = UrgencyClassifier::rule_based(Lexicon::default());
        let inputs = vec![input("a", "b"), input("c", "d")];
        let results = classify_batch(&classifier, &inputs, 0, &BatchPacing::none()).await;
        assert_eq!(results.len(), 2);
    }
}
