use crate::domain::{
    ClassificationInput, ClassificationResult, ClassificationSource, EmailType, SenderType,
    UrgencyCategory,
};

use super::rules::{contains_any, Lexicon};

/// Text signals extracted once per input; every rule predicate reads
/// from this rather than re-scanning the text.
struct Signals {
    has_disclaimer: bool,
    has_emergency: bool,
    has_high_priority: bool,
    has_inquiry: bool,
    institutional_sender: bool,
    has_academic_context: bool,
}

struct Outcome {
    category: UrgencyCategory,
    confidence: f64,
    reasoning: &'static str,
}

/// The cascade is an ordered list: keyword sets overlap, so the first
/// matching rule wins and reordering would change verdicts. The last
/// rule always matches.
const RULES: &[(fn(&Signals) -> bool, Outcome)] = &[
    (
        |s| s.has_disclaimer && !s.has_emergency,
        Outcome {
            category: UrgencyCategory::Low,
            confidence: 0.8,
            reasoning: "Contenido indica consulta no urgente (a pesar de palabras como 'urgente')",
        },
    ),
    (
        |s| s.has_emergency && !s.has_disclaimer,
        Outcome {
            category: UrgencyCategory::Urgent,
            confidence: 0.9,
            reasoning: "Detectadas palabras clave de urgencia crítica real",
        },
    ),
    (
        |s| s.has_high_priority,
        Outcome {
            category: UrgencyCategory::High,
            confidence: 0.8,
            reasoning: "Detectadas palabras clave de alta prioridad académica",
        },
    ),
    (
        |s| s.has_inquiry,
        Outcome {
            category: UrgencyCategory::Medium,
            confidence: 0.7,
            reasoning: "Consulta académica que requiere respuesta",
        },
    ),
    (
        |s| s.institutional_sender && s.has_academic_context,
        Outcome {
            category: UrgencyCategory::Medium,
            confidence: 0.7,
            reasoning: "Correo institucional con contenido académico",
        },
    ),
    (
        |s| s.institutional_sender,
        Outcome {
            category: UrgencyCategory::Low,
            confidence: 0.6,
            reasoning: "Correo institucional - contenido general",
        },
    ),
    (
        |_| true,
        Outcome {
            category: UrgencyCategory::Low,
            confidence: 0.5,
            reasoning: "Correo externo - prioridad baja",
        },
    ),
];

/// Deterministic, network-free classification. Never fails; used both
/// when no API key is configured and as the recovery path when the
/// model-backed classifier does.
pub fn classify(lexicon: &Lexicon, input: &ClassificationInput) -> ClassificationResult {
    let text = format!("{} {}", input.subject, input.body_preview).to_lowercase();
    let signals = Signals {
        has_disclaimer: contains_any(&text, &lexicon.non_urgent_indicators),
        has_emergency: contains_any(&text, &lexicon.urgent_keywords),
        has_high_priority: contains_any(&text, &lexicon.high_priority_keywords),
        has_inquiry: contains_any(&text, &lexicon.inquiry_keywords),
        institutional_sender: lexicon.is_institutional(&input.sender_email),
        has_academic_context: contains_any(&text, &lexicon.academic_context_keywords),
    };

    let outcome = RULES
        .iter()
        .find(|(predicate, _)| predicate(&signals))
        .map(|(_, outcome)| outcome)
        .unwrap_or(&RULES[RULES.len() - 1].1);

    ClassificationResult {
        urgency_category: outcome.category,
        confidence_score: outcome.confidence,
        reasoning: outcome.reasoning.to_string(),
        sender_type: resolve_sender_type(lexicon, &input.sender_email, &text),
        email_type: EmailType::Academic,
        requires_immediate_action: outcome.category.requires_immediate_action(),
        suggested_deadline: None,
        classification_source: ClassificationSource::Fallback,
    }
}

fn resolve_sender_type(lexicon: &Lexicon, sender_email: &str, text: &str) -> SenderType {
    if lexicon.is_institutional(sender_email) {
        SenderType::Student
    } else if contains_any(text, &lexicon.faculty_roles) {
        SenderType::Faculty
    } else if contains_any(text, &lexicon.administration_roles) {
        SenderType::Administration
    } else {
        SenderType::External
    }
}
