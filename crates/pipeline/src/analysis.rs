//! Paper analysis pipeline
//!
//! Turns a stored PDF plus a target language into a fully populated analysis
//! record. The only failures that escape are an unresolvable locator and an
//! unreadable document; everything the generation model gets wrong is
//! replaced with the fixed fallback record and the pipeline reports success.

use crate::errors::PipelineError;
use crate::language::detect_language;
use crate::pdf::{extract_document, truncate_chars};
use crate::prompts::{self, AnalysisOutput};
use crate::storage::{BlobStore, ObjectLocation};
use ronshin_common::genai::{generate_structured, TextGenerator};
use ronshin_common::models::{
    AiAnalysis, Language, PaperAnalysisRecord, PaperInfo, PaperMetadata, TechnicalLevel,
};
use ronshin_common::{metrics, ANALYSIS_PROMPT_TEXT_LIMIT, STORED_TEXT_LIMIT};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, instrument};

/// Paper analysis pipeline
pub struct PaperAnalyzer {
    store: Arc<dyn BlobStore>,
    generator: Arc<dyn TextGenerator>,
    default_bucket: String,
}

impl PaperAnalyzer {
    pub fn new(
        store: Arc<dyn BlobStore>,
        generator: Arc<dyn TextGenerator>,
        default_bucket: String,
    ) -> Self {
        Self {
            store,
            generator,
            default_bucket,
        }
    }

    /// Analyze one stored paper.
    ///
    /// `locator` is resolved against the accepted locator forms, with
    /// `uploader_id`/`paper_id` feeding the last-resort upload convention.
    #[instrument(skip(self))]
    pub async fn analyze(
        &self,
        paper_id: &str,
        locator: &str,
        uploader_id: &str,
        language: Language,
    ) -> Result<PaperAnalysisRecord, PipelineError> {
        let started = Instant::now();

        let location =
            ObjectLocation::parse(locator, uploader_id, paper_id, &self.default_bucket)?;
        let bytes = self.store.fetch(&location).await?;

        let extracted = extract_document(&bytes)?;
        let detected = detect_language(&extracted.text);

        info!(
            page_count = extracted.page_count,
            text_len = extracted.text.len(),
            detected_language = %detected,
            "Paper text extracted"
        );

        let excerpt = truncate_chars(&extracted.text, ANALYSIS_PROMPT_TEXT_LIMIT);
        let prompt = prompts::analysis_prompt(language, excerpt);

        metrics::record_generation_request("analysis");
        let output = generate_structured(
            self.generator.as_ref(),
            &prompt,
            fallback_output(language),
        )
        .await;

        let record = assemble_record(output, &extracted.text, &detected, extracted.page_count);

        metrics::record_analysis(started.elapsed().as_secs_f64(), language.tag());
        info!(
            title = %record.paper_info.title,
            confidence = record.ai_analysis.ai_confidence_score,
            "Paper analysis complete"
        );

        Ok(record)
    }
}

/// The fixed record substituted for any unparsable analysis response.
///
/// Figure references stay absent on the fallback path.
fn fallback_output(language: Language) -> AnalysisOutput {
    AnalysisOutput {
        summary: prompts::analysis_fallback_summary(language).to_string(),
        keypoints: vec![prompts::analysis_fallback_keypoint(language).to_string()],
        significance: prompts::unknown_label(language).to_string(),
        related_topics: vec![],
        academic_field: prompts::unknown_label(language).to_string(),
        technical_level: "intermediate".to_string(),
        ai_confidence_score: 0.0,
        figure_references: None,
        ..Default::default()
    }
}

/// Shape the model output (or fallback) into the stored record
fn assemble_record(
    output: AnalysisOutput,
    extracted_text: &str,
    detected_language: &str,
    page_count: usize,
) -> PaperAnalysisRecord {
    PaperAnalysisRecord {
        paper_info: PaperInfo {
            title: output.title,
            authors: output.authors,
            journal: output.journal,
            publication_date: output.publication_date,
            doi: output.doi,
        },
        metadata: PaperMetadata {
            abstract_text: output.abstract_text,
            keywords: output.keywords,
            extracted_text: truncate_chars(extracted_text, STORED_TEXT_LIMIT).to_string(),
            language: detected_language.to_string(),
            page_count,
            figure_references: output.figure_references,
        },
        ai_analysis: AiAnalysis {
            summary: output.summary,
            keypoints: output.keypoints,
            significance: output.significance,
            related_topics: output.related_topics,
            academic_field: output.academic_field,
            technical_level: parse_technical_level(&output.technical_level),
            ai_confidence_score: clamp_confidence(output.ai_confidence_score),
        },
    }
}

/// Lenient parse: models capitalize freely; anything unrecognized is
/// intermediate
fn parse_technical_level(raw: &str) -> TechnicalLevel {
    match raw.trim().to_lowercase().as_str() {
        "beginner" => TechnicalLevel::Beginner,
        "advanced" => TechnicalLevel::Advanced,
        _ => TechnicalLevel::Intermediate,
    }
}

fn clamp_confidence(raw: f64) -> u8 {
    raw.clamp(0.0, 100.0).round() as u8
}
