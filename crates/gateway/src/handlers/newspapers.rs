//! Newspaper generation handlers

use axum::{extract::State, Json};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use validator::Validate;

use crate::AppState;
use ronshin_common::errors::{AppError, Result};
use ronshin_common::models::{Language, NewspaperDocument, Paper};
use ronshin_pipeline::ComposeOptions;

/// Request to compose one newspaper from analyzed papers
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateNewspaperRequest {
    #[validate(length(min = 3, max = 5, message = "papers must contain 3 to 5 entries"))]
    pub papers: Vec<Paper>,

    #[serde(default)]
    pub language: Language,

    /// Accepted for client compatibility; layout is applied client side
    #[serde(default)]
    pub template_id: Option<String>,

    /// Custom masthead name; overrides the generated title
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Run the composition pipeline
pub async fn generate_newspaper(
    State(state): State<AppState>,
    Json(request): Json<GenerateNewspaperRequest>,
) -> Result<Json<NewspaperDocument>> {
    request.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: None,
    })?;

    if let Some(ref template_id) = request.template_id {
        tracing::debug!(template_id, "Template selection is handled client side");
    }

    let options = ComposeOptions {
        language: request.language,
        display_name: request.display_name,
    };

    let mut rng = StdRng::from_entropy();
    let document = state
        .composer
        .compose(&request.papers, &options, &mut rng)
        .await?;

    tracing::info!(
        paper_count = request.papers.len(),
        newspaper_name = %document.header.newspaper_name,
        "Newspaper generated"
    );

    Ok(Json(document))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paper_json(id: &str) -> String {
        format!(r#"{{"id":"{}","title":"T"}}"#, id)
    }

    fn request_json(paper_count: usize) -> String {
        let papers: Vec<String> = (1..=paper_count).map(|i| paper_json(&format!("p{}", i))).collect();
        format!(
            r#"{{"papers":[{}],"language":"en","displayName":"Lab Weekly"}}"#,
            papers.join(",")
        )
    }

    #[test]
    fn test_request_parses_and_validates() {
        let request: GenerateNewspaperRequest = serde_json::from_str(&request_json(3)).unwrap();
        assert_eq!(request.papers.len(), 3);
        assert_eq!(request.language, Language::En);
        assert_eq!(request.display_name.as_deref(), Some("Lab Weekly"));
        assert!(request.template_id.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_too_few_papers_fails_validation() {
        let request: GenerateNewspaperRequest = serde_json::from_str(&request_json(2)).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_too_many_papers_fails_validation() {
        let request: GenerateNewspaperRequest = serde_json::from_str(&request_json(6)).unwrap();
        assert!(request.validate().is_err());
    }
}
