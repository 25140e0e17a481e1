//! Pipeline error types
//!
//! Only these variants cross the pipeline boundary. Generation-model
//! irregularities never appear here; they are absorbed per call site with a
//! fixed fallback value.

use ronshin_common::errors::AppError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Storage locator could not be resolved: {locator}: {message}")]
    StorageResolution { locator: String, message: String },

    #[error("Document extraction failed: {message}")]
    Extraction { message: String },

    #[error("Precondition failed: {message}")]
    Precondition { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<PipelineError> for AppError {
    fn from(e: PipelineError) -> Self {
        match e {
            PipelineError::StorageResolution { locator, .. } => {
                AppError::StorageResolution { locator }
            }
            PipelineError::Extraction { message } => AppError::Extraction { message },
            PipelineError::Precondition { message } => AppError::Precondition { message },
            PipelineError::Io(e) => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maps_to_app_error_taxonomy() {
        let err: AppError = PipelineError::Precondition {
            message: "at least 3 papers are required".into(),
        }
        .into();
        assert!(matches!(err, AppError::Precondition { .. }));

        let err: AppError = PipelineError::StorageResolution {
            locator: "bad://x".into(),
            message: "unrecognized scheme".into(),
        }
        .into();
        assert!(matches!(err, AppError::StorageResolution { .. }));
    }
}
