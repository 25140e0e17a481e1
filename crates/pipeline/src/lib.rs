//! Ronshin pipelines
//!
//! Two strictly sequential pipelines over an unreliable text-generation
//! capability:
//!
//! - **Paper analysis**: storage locator -> PDF bytes -> per-page text ->
//!   language detection -> one generation call -> fully shaped analysis
//!   record (fixed fallback on any model irregularity).
//! - **Newspaper composition**: 3-5 analyzed papers -> relationship call ->
//!   main article call -> up to 4 sub-article calls -> sidebar call ->
//!   deterministic assembly into one `NewspaperDocument`.
//!
//! Only three failures cross the pipeline boundary: an unresolvable storage
//! locator, an unreadable source document, and a composition precondition
//! violation. Everything the generation model gets wrong is absorbed at the
//! call site with a fixed substitute value.

pub mod analysis;
pub mod errors;
pub mod language;
pub mod newspaper;
pub mod pdf;
pub mod prompts;
pub mod storage;

pub use analysis::PaperAnalyzer;
pub use errors::PipelineError;
pub use newspaper::{ComposeOptions, NewspaperComposer};
pub use storage::{BlobStore, HttpBlobStore, MemoryBlobStore, ObjectLocation};

/// Minimum papers a composition run accepts
pub const MIN_PAPERS: usize = 3;

/// Maximum papers a composition run accepts
pub const MAX_PAPERS: usize = 5;

/// Maximum sub-articles in a document
pub const MAX_SUB_ARTICLES: usize = 4;

/// Sidebar copy is truncated to this many characters
pub const SIDEBAR_MAX_CHARS: usize = 300;
