//! Paper analysis handlers

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::AppState;
use ronshin_common::errors::{AppError, Result};
use ronshin_common::models::{Language, PaperAnalysisRecord};

/// Request to analyze one stored paper
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzePaperRequest {
    #[validate(length(min = 1, max = 128))]
    pub paper_id: String,

    /// Locator of the uploaded PDF (gs://, download URL, or signed URL)
    #[validate(length(min = 1, max = 2048))]
    pub file_url: String,

    #[validate(length(min = 1, max = 128))]
    pub uploader_id: String,

    /// Output language for the generated analysis fields
    #[serde(default)]
    pub language: Language,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzePaperResponse {
    pub paper_id: String,
    #[serde(flatten)]
    pub record: PaperAnalysisRecord,
}

/// Run the analysis pipeline on one paper
pub async fn analyze_paper(
    State(state): State<AppState>,
    Json(request): Json<AnalyzePaperRequest>,
) -> Result<Json<AnalyzePaperResponse>> {
    request.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: None,
    })?;

    let record = state
        .analyzer
        .analyze(
            &request.paper_id,
            &request.file_url,
            &request.uploader_id,
            request.language,
        )
        .await?;

    tracing::info!(
        paper_id = %request.paper_id,
        title = %record.paper_info.title,
        "Paper analyzed"
    );

    Ok(Json(AnalyzePaperResponse {
        paper_id: request.paper_id,
        record,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_parses_camel_case() {
        let raw = r#"{
            "paperId": "p1",
            "fileUrl": "gs://bucket/papers/u1/p1.pdf",
            "uploaderId": "u1",
            "language": "en"
        }"#;
        let request: AnalyzePaperRequest = serde_json::from_str(raw).unwrap();
        assert_eq!(request.paper_id, "p1");
        assert_eq!(request.language, Language::En);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_language_defaults_to_japanese() {
        let raw = r#"{"paperId": "p1", "fileUrl": "gs://b/o.pdf", "uploaderId": "u1"}"#;
        let request: AnalyzePaperRequest = serde_json::from_str(raw).unwrap();
        assert_eq!(request.language, Language::Ja);
    }

    #[test]
    fn test_empty_paper_id_fails_validation() {
        let raw = r#"{"paperId": "", "fileUrl": "gs://b/o.pdf", "uploaderId": "u1"}"#;
        let request: AnalyzePaperRequest = serde_json::from_str(raw).unwrap();
        assert!(request.validate().is_err());
    }
}
