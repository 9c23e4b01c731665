use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The four-tier urgency taxonomy. Normalization in the primary path
/// coerces any out-of-set label to `Medium`, so this enum is closed
/// over everything the engine emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyCategory {
    Urgent,
    High,
    Medium,
    Low,
}

impl UrgencyCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Urgent => "urgent",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Lower-cases and coerces: anything outside the taxonomy maps to
    /// `Medium` rather than failing.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "urgent" => Self::Urgent,
            "high" => Self::High,
            "low" => Self::Low,
            _ => Self::Medium,
        }
    }

    pub fn requires_immediate_action(&self) -> bool {
        matches!(self, Self::Urgent | Self::High)
    }

    /// Numeric sort key: urgent=1, high=2, medium=3, low=4.
    pub fn priority_level(&self) -> u8 {
        match self {
            Self::Urgent => 1,
            Self::High => 2,
            Self::Medium => 3,
            Self::Low => 4,
        }
    }
}

/// Queue position of an email in the triage list. Already-handled
/// emails sort after every live urgency tier (priority level 5).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueState {
    Classified(UrgencyCategory),
    Processed,
}

impl QueueState {
    pub fn priority_level(&self) -> u8 {
        match self {
            Self::Classified(category) => category.priority_level(),
            Self::Processed => 5,
        }
    }

    pub fn from_priority_level(level: u8) -> Self {
        match level {
            1 => Self::Classified(UrgencyCategory::Urgent),
            2 => Self::Classified(UrgencyCategory::High),
            4 => Self::Classified(UrgencyCategory::Low),
            5 => Self::Processed,
            _ => Self::Classified(UrgencyCategory::Medium),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SenderType {
    Student,
    Faculty,
    Administration,
    External,
}

impl SenderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Faculty => "faculty",
            Self::Administration => "administration",
            Self::External => "external",
        }
    }

    /// Accepts the Spanish labels the upstream model sometimes emits
    /// alongside the canonical English ones.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "student" | "estudiante" | "alumno" | "alumna" => Self::Student,
            "faculty" | "profesor" | "profesora" | "docente" | "academico" | "académico" => {
                Self::Faculty
            }
            "administration" | "administracion" | "administración" => Self::Administration,
            _ => Self::External,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailType {
    Academic,
    Administrative,
    Personal,
    Emergency,
}

impl EmailType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Academic => "academic",
            Self::Administrative => "administrative",
            Self::Personal => "personal",
            Self::Emergency => "emergency",
        }
    }

    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "administrative" | "administrativo" => Self::Administrative,
            "personal" => Self::Personal,
            "emergency" | "emergencia" => Self::Emergency,
            _ => Self::Academic,
        }
    }
}

/// Which classifier produced a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassificationSource {
    Primary,
    Fallback,
}

impl ClassificationSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Fallback => "fallback",
        }
    }
}

/// The engine's verdict for one email. Written as a unit; owned by
/// exactly one email record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub urgency_category: UrgencyCategory,
    pub confidence_score: f64,
    pub reasoning: String,
    pub sender_type: SenderType,
    pub email_type: EmailType,
    pub requires_immediate_action: bool,
    pub suggested_deadline: Option<DateTime<Utc>>,
    pub classification_source: ClassificationSource,
}
