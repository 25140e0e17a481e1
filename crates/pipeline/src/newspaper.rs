//! Newspaper composition pipeline
//!
//! Strictly ordered, single pass: relationship analysis, main article, up to
//! four sub-articles, sidebar, then deterministic assembly. Every generation
//! sub-step degrades to a fixed fallback on irregular model output, so a run
//! either fails its precondition up front or always yields a fully shaped
//! document.

use crate::errors::PipelineError;
use crate::pdf::truncate_chars;
use crate::prompts::{self, ArticleOutput, SubArticleOutput};
use crate::{MAX_PAPERS, MAX_SUB_ARTICLES, MIN_PAPERS, SIDEBAR_MAX_CHARS};
use chrono::Utc;
use rand::Rng;
use ronshin_common::genai::{generate_structured, TextGenerator};
use ronshin_common::models::{
    Language, MainArticle, NewspaperDocument, NewspaperHeader, Paper, RelationshipAnalysis,
    SubArticle,
};
use ronshin_common::metrics;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, instrument, warn};

/// Per-request composition options
#[derive(Debug, Clone, Default)]
pub struct ComposeOptions {
    pub language: Language,

    /// Caller-supplied masthead name; overrides both the generated title and
    /// the placeholder list
    pub display_name: Option<String>,
}

/// Newspaper composition pipeline
pub struct NewspaperComposer {
    generator: Arc<dyn TextGenerator>,
}

impl NewspaperComposer {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Compose one newspaper from 3-5 analyzed papers.
    ///
    /// The RNG drives the issue number and placeholder-title choice only;
    /// tests inject a seeded generator for determinism.
    #[instrument(skip(self, papers, options, rng), fields(paper_count = papers.len(), language = %options.language))]
    pub async fn compose<R: Rng>(
        &self,
        papers: &[Paper],
        options: &ComposeOptions,
        rng: &mut R,
    ) -> Result<NewspaperDocument, PipelineError> {
        let started = Instant::now();
        let language = options.language;

        if papers.len() < MIN_PAPERS {
            return Err(PipelineError::Precondition {
                message: format!(
                    "at least {} papers are required, got {}",
                    MIN_PAPERS,
                    papers.len()
                ),
            });
        }
        if papers.len() > MAX_PAPERS {
            return Err(PipelineError::Precondition {
                message: format!(
                    "at most {} papers are supported, got {}",
                    MAX_PAPERS,
                    papers.len()
                ),
            });
        }

        // Step 1: relationship analysis
        metrics::record_generation_request("relationship");
        let relationship = generate_structured(
            self.generator.as_ref(),
            &prompts::relationship_prompt(language, papers),
            prompts::relationship_fallback(language, papers.len()),
        )
        .await;

        let (main_index, sub_order) = sanitize_relationship(&relationship, papers.len());
        let main_paper = &papers[main_index];
        let theme = relationship.overall_theme.as_str();

        info!(
            main_index,
            sub_order = ?sub_order,
            theme,
            "Relationship analysis settled"
        );

        // Step 2: main article
        metrics::record_generation_request("main_article");
        let main_draft: ArticleOutput = generate_structured(
            self.generator.as_ref(),
            &prompts::main_article_prompt(language, main_paper, theme),
            prompts::main_article_fallback(language),
        )
        .await;

        // Step 3: sub-articles, one independent call per paper, output order
        // exactly as the (sanitized) relationship ordering
        let mut sub_articles = Vec::new();
        for &index in sub_order.iter().take(MAX_SUB_ARTICLES) {
            let paper = &papers[index];
            metrics::record_generation_request("sub_article");
            let draft: SubArticleOutput = generate_structured(
                self.generator.as_ref(),
                &prompts::sub_article_prompt(language, paper),
                prompts::sub_article_fallback(language, sub_articles.len() + 1),
            )
            .await;

            sub_articles.push(SubArticle {
                headline: draft.headline,
                content: draft.content,
                paper_id: paper.id.clone(),
            });
        }

        // Step 4: sidebar, raw text, cannot fail structurally
        metrics::record_generation_request("sidebar");
        let sidebar_content = match self
            .generator
            .generate(&prompts::sidebar_prompt(language, theme))
            .await
        {
            Ok(text) => truncate_chars(&text, SIDEBAR_MAX_CHARS).to_string(),
            Err(e) => {
                warn!(error = %e, "Sidebar generation failed, substituting fallback copy");
                metrics::record_generation_fallback("call_failed");
                prompts::sidebar_fallback(language).to_string()
            }
        };

        // Step 5: deterministic assembly
        let now = Utc::now();
        let document = NewspaperDocument {
            header: NewspaperHeader {
                newspaper_name: masthead_name(
                    options.display_name.as_deref(),
                    &relationship.newspaper_title,
                    language,
                    rng,
                ),
                date: prompts::format_date(language, &now),
                issue_number: prompts::issue_label(language, rng.gen_range(100..=999)),
            },
            main_article: MainArticle {
                headline: main_draft.headline,
                subheadline: main_draft.subheadline,
                content: main_draft.content,
                paper_ids: vec![main_paper.id.clone()],
            },
            sub_articles,
            sidebar_content,
            column_content: prompts::column_content(language, papers.len(), theme),
            footer: prompts::footer(language, &now),
        };

        metrics::record_composition(
            started.elapsed().as_secs_f64(),
            language.tag(),
            papers.len(),
        );
        info!(
            sub_articles = document.sub_articles.len(),
            newspaper_name = %document.header.newspaper_name,
            "Newspaper composed"
        );

        Ok(document)
    }
}

/// Settle the relationship output against the actual paper count.
///
/// An out-of-range main index degrades to 0. The sub-article order keeps the
/// model's sequence but drops out-of-range entries, duplicates, and the main
/// index itself; it is never re-sorted.
fn sanitize_relationship(
    relationship: &RelationshipAnalysis,
    paper_count: usize,
) -> (usize, Vec<usize>) {
    let main_index = if relationship.main_paper_index < paper_count {
        relationship.main_paper_index
    } else {
        warn!(
            main_paper_index = relationship.main_paper_index,
            paper_count, "Main paper index out of range, using 0"
        );
        0
    };

    let mut order = Vec::new();
    for &index in &relationship.sub_article_order {
        if index >= paper_count || index == main_index || order.contains(&index) {
            continue;
        }
        order.push(index);
    }

    (main_index, order)
}

/// Masthead name precedence: caller's display name, then the generated
/// title, then a random pick from the fixed placeholder list
fn masthead_name<R: Rng>(
    display_name: Option<&str>,
    generated_title: &str,
    language: Language,
    rng: &mut R,
) -> String {
    if let Some(name) = display_name {
        if !name.trim().is_empty() {
            return name.trim().to_string();
        }
    }
    if !generated_title.trim().is_empty() {
        return generated_title.trim().to_string();
    }
    let titles = prompts::placeholder_titles(language);
    titles[rng.gen_range(0..titles.len())].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn relationship(main: usize, order: Vec<usize>) -> RelationshipAnalysis {
        RelationshipAnalysis {
            main_paper_index: main,
            overall_theme: "theme".into(),
            newspaper_title: String::new(),
            sub_article_order: order,
        }
    }

    #[test]
    fn test_sanitize_skips_out_of_range_indices() {
        let rel = relationship(0, vec![1, 7, 2, 9]);
        let (main, order) = sanitize_relationship(&rel, 3);
        assert_eq!(main, 0);
        assert_eq!(order, vec![1, 2]);
    }

    #[test]
    fn test_sanitize_drops_duplicates_and_main_index() {
        let rel = relationship(1, vec![0, 1, 2, 0, 2]);
        let (main, order) = sanitize_relationship(&rel, 3);
        assert_eq!(main, 1);
        assert_eq!(order, vec![0, 2]);
    }

    #[test]
    fn test_sanitize_out_of_range_main_degrades_to_zero() {
        let rel = relationship(12, vec![1, 2]);
        let (main, order) = sanitize_relationship(&rel, 3);
        assert_eq!(main, 0);
        assert_eq!(order, vec![1, 2]);
    }

    #[test]
    fn test_sanitize_preserves_model_ordering() {
        let rel = relationship(0, vec![3, 1, 4, 2]);
        let (_, order) = sanitize_relationship(&rel, 5);
        assert_eq!(order, vec![3, 1, 4, 2]);
    }

    #[test]
    fn test_masthead_name_precedence() {
        let mut rng = StdRng::seed_from_u64(7);

        let name = masthead_name(Some("My Lab Gazette"), "Generated", Language::En, &mut rng);
        assert_eq!(name, "My Lab Gazette");

        let name = masthead_name(None, "Generated", Language::En, &mut rng);
        assert_eq!(name, "Generated");

        let name = masthead_name(Some("   "), "", Language::En, &mut rng);
        assert!(prompts::placeholder_titles(Language::En).contains(&name.as_str()));
    }

    #[test]
    fn test_masthead_placeholder_is_deterministic_under_seed() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        let name_a = masthead_name(None, "", Language::Ja, &mut a);
        let name_b = masthead_name(None, "", Language::Ja, &mut b);
        assert_eq!(name_a, name_b);
    }
}
