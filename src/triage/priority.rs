use serde::Serialize;

use crate::domain::{ClassificationResult, SenderType, UrgencyCategory};

/// Human-facing response recommendation derived from a verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponsePriority {
    pub response_window: String,
    pub priority_rank: u8,
    pub suggested_action: String,
}

/// Pure lookup: base SLA by urgency tier, tightened for students on
/// the two slower tiers.
pub fn suggest_priority(result: &ClassificationResult) -> ResponsePriority {
    let (response_window, suggested_action) = match result.urgency_category {
        UrgencyCategory::Urgent => (
            "15 minutos",
            "Responder inmediatamente - posible emergencia estudiantil",
        ),
        UrgencyCategory::High => (
            "2 horas",
            "Responder dentro del día - asunto académico importante",
        ),
        UrgencyCategory::Medium => ("24 horas", "Responder en horario laboral regular"),
        UrgencyCategory::Low => ("48 horas", "Responder cuando sea conveniente"),
    };

    let mut priority = ResponsePriority {
        response_window: response_window.to_string(),
        priority_rank: result.urgency_category.priority_level(),
        suggested_action: suggested_action.to_string(),
    };

    if result.sender_type == SenderType::Student
        && matches!(
            result.urgency_category,
            UrgencyCategory::Medium | UrgencyCategory::Low
        )
    {
        priority.response_window = "12 horas".to_string();
        priority
            .suggested_action
            .push_str(" (estudiante requiere atención prioritaria)");
    }

    priority
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClassificationSource, EmailType};

    fn result(category: UrgencyCategory, sender: SenderType) -> ClassificationResult {
        ClassificationResult {
            urgency_category: category,
            confidence_score: 0.8,
            reasoning: String::new(),
            sender_type: sender,
            email_type: EmailType::Academic,
            requires_immediate_action: category.requires_immediate_action(),
            suggested_deadline: None,
            classification_source: ClassificationSource::Fallback,
        }
    }

    #[test]
    fn base_mapping_matches_the_tiers() {
        let urgent = suggest_priority(&result(UrgencyCategory::Urgent, SenderType::External));
        assert_eq!(urgent.response_window, "15 minutos");
        assert_eq!(urgent.priority_rank, 1);

        let high = suggest_priority(&result(UrgencyCategory::High, SenderType::External));
        assert_eq!(high.response_window, "2 horas");
        assert_eq!(high.priority_rank, 2);

        let medium = suggest_priority(&result(UrgencyCategory::Medium, SenderType::External));
        assert_eq!(medium.response_window, "24 horas");
        assert_eq!(medium.priority_rank, 3);

        let low = suggest_priority(&result(UrgencyCategory::Low, SenderType::External));
        assert_eq!(low.response_window, "48 horas");
        assert_eq!(low.priority_rank, 4);
    }

    #[test]
    fn ranks_increase_with_decreasing_urgency() {
        let ranks: Vec<u8> = [
            UrgencyCategory::Urgent,
            UrgencyCategory::High,
            UrgencyCategory::Medium,
            UrgencyCategory::Low,
        ]
        .iter()
        .map(|&category| suggest_priority(&result(category, SenderType::External)).priority_rank)
        .collect();
        assert!(ranks.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn students_get_a_tighter_window_on_slow_tiers() {
        let medium = suggest_priority(&result(UrgencyCategory::Medium, SenderType::Student));
        assert_eq!(medium.response_window, "12 horas");
        assert!(medium.suggested_action.contains("atención prioritaria"));

        let low = suggest_priority(&result(UrgencyCategory::Low, SenderType::Student));
        assert_eq!(low.response_window, "12 horas");
    }

    #[test]
    fn student_adjustment_leaves_urgent_tiers_alone() {
        let urgent = suggest_priority(&result(UrgencyCategory::Urgent, SenderType::Student));
        assert_eq!(urgent.response_window, "15 minutos");
        assert!(!urgent.suggested_action.contains("atención prioritaria"));
    }
}
