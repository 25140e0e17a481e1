//! Ronshin Common Library
//!
//! Shared code for the Ronshin services including:
//! - Domain models (papers, newspapers)
//! - Generation client abstraction and structured-output helpers
//! - Error types and handling
//! - Configuration management
//! - Secret provider abstraction
//! - Metrics and observability

pub mod config;
pub mod errors;
pub mod genai;
pub mod metrics;
pub mod models;
pub mod secrets;

// Re-export commonly used types
pub use config::AppConfig;
pub use errors::{AppError, Result};
pub use genai::TextGenerator;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default generation model
pub const DEFAULT_GENERATION_MODEL: &str = "gemini-2.0-flash-001";

/// Characters of extracted text fed to the analysis prompt
pub const ANALYSIS_PROMPT_TEXT_LIMIT: usize = 10_000;

/// Characters of extracted text retained on the paper record
pub const STORED_TEXT_LIMIT: usize = 5_000;
