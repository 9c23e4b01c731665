use serde::Serialize;

use crate::domain::{ClassificationResult, EmailType, SenderType, UrgencyCategory};

pub const HIGH_CONFIDENCE_THRESHOLD: f64 = 0.8;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct UrgencyCounts {
    pub urgent: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct SenderTypeCounts {
    pub student: usize,
    pub faculty: usize,
    pub administration: usize,
    pub external: usize,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct EmailTypeCounts {
    pub academic: usize,
    pub administrative: usize,
    pub personal: usize,
    pub emergency: usize,
}

/// Dashboard summary of a classification run. Every counter key is
/// always present, zero-filled when unused.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct ClassificationStats {
    pub total_classified: usize,
    pub by_urgency: UrgencyCounts,
    pub by_sender_type: SenderTypeCounts,
    pub by_email_type: EmailTypeCounts,
    pub avg_confidence: f64,
    pub high_confidence_count: usize,
    pub high_confidence_percentage: f64,
    pub requires_immediate_action: usize,
}

pub fn aggregate(results: &[ClassificationResult]) -> ClassificationStats {
    let mut stats = ClassificationStats {
        total_classified: results.len(),
        ..Default::default()
    };
    if results.is_empty() {
        return stats;
    }

    let mut total_confidence = 0.0;
    for result in results {
        match result.urgency_category {
            UrgencyCategory::Urgent => stats.by_urgency.urgent += 1,
            UrgencyCategory::High => stats.by_urgency.high += 1,
            UrgencyCategory::Medium => stats.by_urgency.medium += 1,
            UrgencyCategory::Low => stats.by_urgency.low += 1,
        }
        match result.sender_type {
            SenderType::Student => stats.by_sender_type.student += 1,
            SenderType::Faculty => stats.by_sender_type.faculty += 1,
            SenderType::Administration => stats.by_sender_type.administration += 1,
            SenderType::External => stats.by_sender_type.external += 1,
        }
        match result.email_type {
            EmailType::Academic => stats.by_email_type.academic += 1,
            EmailType::Administrative => stats.by_email_type.administrative += 1,
            EmailType::Personal => stats.by_email_type.personal += 1,
            EmailType::Emergency => stats.by_email_type.emergency += 1,
        }

        total_confidence += result.confidence_score;
        if result.confidence_score >= HIGH_CONFIDENCE_THRESHOLD {
            stats.high_confidence_count += 1;
        }
        if result.requires_immediate_action {
            stats.requires_immediate_action += 1;
        }
    }

    let total = results.len() as f64;
    stats.avg_confidence = round_to(total_confidence / total, 3);
    stats.high_confidence_percentage =
        round_to(stats.high_confidence_count as f64 / total * 100.0, 1);
    stats
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ClassificationSource;

    fn result(
        category: UrgencyCategory,
        confidence: f64,
        sender: SenderType,
    ) -> ClassificationResult {
        ClassificationResult {
            urgency_category: category,
            confidence_score: confidence,
            reasoning: String::new(),
            sender_type: sender,
            email_type: EmailType::Academic,
            requires_immediate_action: category.requires_immediate_action(),
            suggested_deadline: None,
            classification_source: ClassificationSource::Fallback,
        }
    }

    #[test]
    fn empty_input_yields_zeroed_stats() {
        let stats = aggregate(&[]);
        assert_eq!(stats.total_classified, 0);
        assert_eq!(stats.by_urgency, UrgencyCounts::default());
        assert_eq!(stats.avg_confidence, 0.0);
        assert_eq!(stats.high_confidence_percentage, 0.0);
    }

    #[test]
    fn urgency_counts_sum_to_total() {
        let results = vec![
            result(UrgencyCategory::Urgent, 0.9, SenderType::Student),
            result(UrgencyCategory::High, 0.8, SenderType::Faculty),
            result(UrgencyCategory::Medium, 0.7, SenderType::Student),
            result(UrgencyCategory::Low, 0.5, SenderType::External),
            result(UrgencyCategory::Low, 0.6, SenderType::Administration),
        ];
        let stats = aggregate(&results);
        let sum = stats.by_urgency.urgent
            + stats.by_urgency.high
            + stats.by_urgency.medium
            + stats.by_urgency.low;
        assert_eq!(sum, stats.total_classified);
        assert_eq!(stats.by_sender_type.student, 2);
        assert_eq!(stats.requires_immediate_action, 2);
    }

    #[test]
    fn avg_confidence_is_bounded_and_rounded() {
        let results = vec![
            result(UrgencyCategory::Medium, 0.7, SenderType::External),
            result(UrgencyCategory::Medium, 0.8, SenderType::External),
            result(UrgencyCategory::Medium, 0.9, SenderType::External),
        ];
        let stats = aggregate(&results);
        assert!((0.7..=0.9).contains(&stats.avg_confidence));
        assert_eq!(stats.avg_confidence, 0.8);
    }

    #[test]
    fn high_confidence_counts_use_the_threshold_inclusively() {
        let results = vec![
            result(UrgencyCategory::Low, 0.8, SenderType::External),
            result(UrgencyCategory::Low, 0.79, SenderType::External),
        ];
        let stats = aggregate(&results);
        assert_eq!(stats.high_confidence_count, 1);
        assert_eq!(stats.high_confidence_percentage, 50.0);
    }

    #[test]
    fn uneven_average_rounds_to_three_decimals() {
        let results = vec![
            result(UrgencyCategory::Low, 0.5, SenderType::External),
            result(UrgencyCategory::Low, 0.6, SenderType::External),
            result(UrgencyCategory::Low, 0.6, SenderType::External),
        ];
        let stats = aggregate(&results);
        assert_eq!(stats.avg_confidence, 0.567);
    }
}
