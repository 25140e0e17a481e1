//! Paper record types
//!
//! A `Paper` is created externally on upload and mutated exactly once by the
//! analysis pipeline, which fills in bibliographic fields, extraction
//! metadata, and the AI analysis block. The analysis pipeline always returns
//! a fully shaped record: when the model output cannot be parsed the fields
//! are replaced with fixed fallback values rather than left empty.

use serde::{Deserialize, Serialize};

/// Reader-facing difficulty rating assigned by the analysis model
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TechnicalLevel {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

/// Bibliographic fields extracted from the paper text.
///
/// Every field is optional in the model output; missing values default to
/// empty strings so the stored shape is stable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperInfo {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub authors: Vec<String>,

    #[serde(default)]
    pub journal: String,

    #[serde(default)]
    pub publication_date: String,

    #[serde(default)]
    pub doi: String,
}

/// Extraction metadata stored alongside the analysis
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperMetadata {
    /// Abstract as extracted by the model
    #[serde(default, rename = "abstract")]
    pub abstract_text: String,

    #[serde(default)]
    pub keywords: Vec<String>,

    /// Truncated raw text retained for later reuse/display
    #[serde(default)]
    pub extracted_text: String,

    /// Best-effort detected language tag, `unknown` on detector failure
    #[serde(default)]
    pub language: String,

    #[serde(default)]
    pub page_count: usize,

    /// Figure references named by the model; absent when the analysis fell
    /// back to the fixed record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub figure_references: Option<Vec<String>>,
}

/// AI summary block
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiAnalysis {
    #[serde(default)]
    pub summary: String,

    #[serde(default)]
    pub keypoints: Vec<String>,

    #[serde(default)]
    pub significance: String,

    #[serde(default)]
    pub related_topics: Vec<String>,

    #[serde(default)]
    pub academic_field: String,

    #[serde(default)]
    pub technical_level: TechnicalLevel,

    /// Model self-reported confidence, clamped to [0, 100]
    #[serde(default)]
    pub ai_confidence_score: u8,
}

/// Output of the paper analysis pipeline: always fully shaped
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperAnalysisRecord {
    pub paper_info: PaperInfo,
    pub metadata: PaperMetadata,
    pub ai_analysis: AiAnalysis,
}

/// An analyzed paper as handed to the composition pipeline.
///
/// The `id` is externally assigned; the composition pipeline only ever reads
/// papers and copies their ids into the document it produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paper {
    pub id: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub authors: Vec<String>,

    #[serde(default)]
    pub journal: String,

    #[serde(default)]
    pub publication_date: String,

    #[serde(default)]
    pub doi: String,

    #[serde(default)]
    pub ai_analysis: AiAnalysis,
}
