/// Keyword tables for the rule-based classifier. Spanish lexicons for
/// a Chilean academic mailbox; the lists are tunable data rather than
/// fixed constants, so all fields are public and institution domains
/// come from configuration.
#[derive(Debug, Clone)]
pub struct Lexicon {
    /// True-emergency terms (accidents, medical crises).
    pub urgent_keywords: Vec<&'static str>,
    /// Phrases signalling the sender is explicitly not in a hurry.
    pub non_urgent_indicators: Vec<&'static str>,
    /// High-priority academic/administrative terms.
    pub high_priority_keywords: Vec<&'static str>,
    /// Generic inquiry terms that merit a same-day reply.
    pub inquiry_keywords: Vec<&'static str>,
    /// Academic-context terms used for institutional senders.
    pub academic_context_keywords: Vec<&'static str>,
    pub faculty_roles: Vec<&'static str>,
    pub administration_roles: Vec<&'static str>,
    /// Domains whose senders are treated as institution members.
    pub institution_domains: Vec<String>,
}

impl Lexicon {
    pub fn with_institution_domains(domains: Vec<String>) -> Self {
        Self {
            institution_domains: domains,
            ..Self::default()
        }
    }

    pub fn is_institutional(&self, sender_email: &str) -> bool {
        let sender = sender_email.to_lowercase();
        self.institution_domains
            .iter()
            .any(|domain| sender.ends_with(&format!("@{domain}")))
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            urgent_keywords: vec![
                "emergencia",
                "accidente",
                "hospital",
                "ambulancia",
                "lesion",
                "lesionado",
                "herido",
                "caída",
                "golpe",
                "sangre",
                "desmayo",
                "crisis",
                "problema grave",
                "socorro",
                "grave",
                "inmediato",
                "hoy mismo",
                "crítico",
            ],
            non_urgent_indicators: vec![
                "solo quería",
                "solo queria",
                "solo una pregunta",
                "solo una consulta",
                "nada urgente",
                "no es urgente",
                "cuando puedas",
                "cuando tengas tiempo",
                "no hay prisa",
                "sin apuro",
            ],
            high_priority_keywords: vec![
                "reunión",
                "junta",
                "consejo",
                "deadline",
                "plazo",
                "entrega",
                "examen",
                "evaluación",
                "presentación",
                "defensa",
                "tesis",
                "calificación",
                "nota",
                "reprobado",
                "aprobado",
                "suspensión",
                "expulsión",
                "disciplinario",
                "problema",
                "conflicto",
                "queja",
            ],
            inquiry_keywords: vec![
                "consulta",
                "pregunta",
                "ayuda",
                "información",
                "horario",
                "clase",
                "materia",
                "asignatura",
            ],
            academic_context_keywords: vec![
                "consulta",
                "pregunta",
                "ayuda",
                "información",
                "horario",
                "clase",
                "materia",
                "asignatura",
                "profesor",
                "docente",
            ],
            faculty_roles: vec!["profesor", "profesora", "docente", "académico"],
            administration_roles: vec!["secretaria", "coordinador", "director", "decanato"],
            institution_domains: vec!["uss.cl".to_string()],
        }
    }
}

pub fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}
