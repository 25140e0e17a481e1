//! Domain models shared across Ronshin services

pub mod newspaper;
pub mod paper;

pub use newspaper::{
    MainArticle, NewspaperDocument, NewspaperHeader, RelationshipAnalysis, SubArticle,
};
pub use paper::{AiAnalysis, Paper, PaperAnalysisRecord, PaperInfo, PaperMetadata, TechnicalLevel};

use serde::{Deserialize, Serialize};

/// Target natural language for prompts and generated copy.
///
/// Japanese is the product default; English is fully supported. Every prompt
/// template and every fallback string exists in both languages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ja,
    En,
}

impl Language {
    /// BCP 47 style tag used on stored records
    pub fn tag(&self) -> &'static str {
        match self {
            Language::Ja => "ja",
            Language::En => "en",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_serde_tags() {
        assert_eq!(serde_json::to_string(&Language::Ja).unwrap(), "\"ja\"");
        let lang: Language = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(lang, Language::En);
    }

    #[test]
    fn test_language_default_is_japanese() {
        assert_eq!(Language::default(), Language::Ja);
    }
}
