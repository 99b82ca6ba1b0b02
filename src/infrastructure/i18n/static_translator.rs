use crate::domain::ports::translator::Translator;
use crate::domain::value_objects::component_status::ComponentStatus;

/// Languages with a built-in label table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    En,
    Fr,
}

impl Language {
    /// Resolve a config `language` value. Unknown codes fall back to English.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        let normalized = code.trim().to_ascii_lowercase();
        match normalized.split(['-', '_']).next() {
            Some("en") => Self::En,
            Some("fr") => Self::Fr,
            _ => {
                tracing::warn!("Unsupported language '{code}', falling back to English");
                Self::En
            }
        }
    }

    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Fr => "fr",
        }
    }
}

/// Translator backed by compiled-in label tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticTranslator {
    language: Language,
}

impl StaticTranslator {
    #[must_use]
    pub const fn new(language: Language) -> Self {
        Self { language }
    }

    #[must_use]
    pub const fn language(&self) -> Language {
        self.language
    }

    const fn label(&self, status: ComponentStatus) -> &'static str {
        match (self.language, status) {
            (Language::En, ComponentStatus::Operational) => "Operational",
            (Language::En, ComponentStatus::PerformanceIssues) => "Performance Issues",
            (Language::En, ComponentStatus::PartialOutage) => "Partial Outage",
            (Language::En, ComponentStatus::MajorOutage) => "Major Outage",
            (Language::Fr, ComponentStatus::Operational) => "Opérationnel",
            (Language::Fr, ComponentStatus::PerformanceIssues) => "Problèmes de performance",
            (Language::Fr, ComponentStatus::PartialOutage) => "Panne partielle",
            (Language::Fr, ComponentStatus::MajorOutage) => "Panne majeure",
        }
    }
}

impl Translator for StaticTranslator {
    fn translate_status(&self, status: ComponentStatus) -> String {
        self.label(status).to_string()
    }
}
