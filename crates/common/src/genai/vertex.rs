//! Vertex AI `generateContent` client
//!
//! Single request/response, no streaming. Transient upstream failures
//! (429, 5xx, connect/timeout) are retried with exponential backoff;
//! anything else is surfaced as-is and left to the call site's fallback
//! policy.

use crate::config::GenAiConfig;
use crate::errors::{AppError, Result};
use crate::genai::TextGenerator;
use async_trait::async_trait;
use backoff::{future::retry, Error as BackoffError, ExponentialBackoffBuilder};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    top_k: u32,
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

/// Vertex AI text generation client
pub struct VertexGenerator {
    client: reqwest::Client,
    url: String,
    auth_token: Option<String>,
    temperature: f32,
    max_output_tokens: u32,
    max_elapsed: Duration,
}

impl VertexGenerator {
    /// Create a client for the configured project/location/model.
    ///
    /// `auth_token` is a bearer token for the live endpoint; `None` is
    /// accepted for emulators and proxies that skip auth.
    pub fn new(config: &GenAiConfig, project_id: &str, auth_token: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Internal {
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        let url = match &config.endpoint {
            Some(endpoint) => format!(
                "{}/v1/projects/{}/locations/{}/publishers/google/models/{}:generateContent",
                endpoint.trim_end_matches('/'),
                project_id,
                config.location,
                config.model
            ),
            None => format!(
                "https://{loc}-aiplatform.googleapis.com/v1/projects/{project}/locations/{loc}/publishers/google/models/{model}:generateContent",
                loc = config.location,
                project = project_id,
                model = config.model
            ),
        };

        // Upper bound on the whole retry loop, covering every attempt
        let max_elapsed =
            Duration::from_secs(config.timeout_secs * (config.max_retries as u64 + 1));

        Ok(Self {
            client,
            url,
            auth_token,
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
            max_elapsed,
        })
    }

    async fn attempt(&self, prompt: &str) -> std::result::Result<String, BackoffError<AppError>> {
        let request = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                top_p: 0.8,
                top_k: 40,
                max_output_tokens: self.max_output_tokens,
            },
        };

        let mut builder = self.client.post(&self.url).json(&request);
        if let Some(ref token) = self.auth_token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }

        let response = builder.send().await.map_err(|e| {
            let err = AppError::Upstream {
                message: format!("Generation request failed: {}", e),
            };
            if e.is_timeout() || e.is_connect() {
                BackoffError::transient(err)
            } else {
                BackoffError::permanent(err)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = AppError::Upstream {
                message: format!("Generation service returned {}: {}", status, body),
            };
            // 429 and 5xx are worth retrying; 4xx is not going to change
            return if status.as_u16() == 429 || status.is_server_error() {
                warn!(status = status.as_u16(), "Transient generation failure, will retry");
                Err(BackoffError::transient(err))
            } else {
                Err(BackoffError::permanent(err))
            };
        }

        let parsed: GenerateResponse = response.json().await.map_err(|e| {
            BackoffError::permanent(AppError::Upstream {
                message: format!("Failed to decode generation response: {}", e),
            })
        })?;

        let text = parsed
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.clone())
            .ok_or_else(|| {
                BackoffError::permanent(AppError::Upstream {
                    message: "Empty generation response".to_string(),
                })
            })?;

        debug!(response_len = text.len(), "Generation call succeeded");
        Ok(text)
    }
}

#[async_trait]
impl TextGenerator for VertexGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let policy = ExponentialBackoffBuilder::new()
            .with_initial_interval(Duration::from_millis(500))
            .with_max_elapsed_time(Some(self.max_elapsed))
            .build();

        retry(policy, || self.attempt(prompt)).await
    }
}
