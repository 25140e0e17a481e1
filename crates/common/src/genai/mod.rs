//! Generation capability abstraction
//!
//! Provides:
//! - The `TextGenerator` trait the pipelines program against
//! - A Vertex AI `generateContent` client with retry on transient failures
//! - The shared extract-JSON-span/parse/fallback helper used at every
//!   generation call site

mod json;
mod vertex;

pub use json::extract_json_span;
pub use vertex::VertexGenerator;

use crate::errors::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::warn;

/// Synchronous single request/response text generation.
///
/// Implementations are treated as unreliable: callers must be prepared for
/// unparsable or off-schema output, and for the call itself to fail.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text from a natural-language prompt
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Invoke the generator and parse the first balanced `{...}` span of the
/// response into `T`, substituting `fallback` on any irregularity.
///
/// This function never fails: a transport error, a response without a JSON
/// span, and a span that does not deserialize all degrade to the caller's
/// fallback value. The degradation is logged and counted, not propagated.
pub async fn generate_structured<T: DeserializeOwned>(
    generator: &dyn TextGenerator,
    prompt: &str,
    fallback: T,
) -> T {
    let response = match generator.generate(prompt).await {
        Ok(text) => text,
        Err(e) => {
            warn!(error = %e, "Generation call failed, substituting fallback");
            crate::metrics::record_generation_fallback("call_failed");
            return fallback;
        }
    };

    let Some(span) = extract_json_span(&response) else {
        warn!(
            response_len = response.len(),
            "No JSON object found in generation response, substituting fallback"
        );
        crate::metrics::record_generation_fallback("no_json_span");
        return fallback;
    };

    match serde_json::from_str(span) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "Generation response JSON did not match schema, substituting fallback");
            crate::metrics::record_generation_fallback("parse_failed");
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Headline {
        headline: String,
        #[serde(default)]
        content: String,
    }

    struct FixedGenerator(std::result::Result<String, ()>);

    #[async_trait]
    impl TextGenerator for FixedGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            self.0.clone().map_err(|_| AppError::Upstream {
                message: "model offline".into(),
            })
        }
    }

    fn fallback() -> Headline {
        Headline {
            headline: "fallback".into(),
            content: String::new(),
        }
    }

    #[tokio::test]
    async fn test_parses_json_embedded_in_prose() {
        let generator = FixedGenerator(Ok(
            "Here you go:\n```json\n{\"headline\": \"Big News\", \"content\": \"body\"}\n```".into(),
        ));
        let result = generate_structured(&generator, "prompt", fallback()).await;
        assert_eq!(result.headline, "Big News");
        assert_eq!(result.content, "body");
    }

    #[tokio::test]
    async fn test_falls_back_when_no_span() {
        let generator = FixedGenerator(Ok("no json here at all".into()));
        let result = generate_structured(&generator, "prompt", fallback()).await;
        assert_eq!(result, fallback());
    }

    #[tokio::test]
    async fn test_falls_back_on_schema_mismatch() {
        let generator = FixedGenerator(Ok("{\"headline\": 42}".into()));
        let result = generate_structured(&generator, "prompt", fallback()).await;
        assert_eq!(result, fallback());
    }

    #[tokio::test]
    async fn test_falls_back_on_call_failure() {
        let generator = FixedGenerator(Err(()));
        let result = generate_structured(&generator, "prompt", fallback()).await;
        assert_eq!(result, fallback());
    }
}
