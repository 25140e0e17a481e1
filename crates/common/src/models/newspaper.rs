//! Newspaper document types
//!
//! The composition pipeline produces exactly one `NewspaperDocument` per run.
//! The structure is always fully populated: every generation sub-step has a
//! fixed fallback value, so model failures degrade the copy, never the shape.

use serde::{Deserialize, Serialize};

/// Masthead block
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewspaperHeader {
    pub newspaper_name: String,
    pub date: String,
    pub issue_number: String,
}

/// The single lead article, backed by exactly one paper
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MainArticle {
    pub headline: String,
    pub subheadline: String,
    pub content: String,
    pub paper_ids: Vec<String>,
}

/// A secondary article backed by one paper
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubArticle {
    pub headline: String,
    pub content: String,
    pub paper_id: String,
}

/// The assembled newspaper; immutable once produced
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewspaperDocument {
    pub header: NewspaperHeader,
    pub main_article: MainArticle,
    /// Ordered per the relationship analysis, 0-4 entries
    pub sub_articles: Vec<SubArticle>,
    /// Bounded-length free text, 300 chars max
    pub sidebar_content: String,
    pub column_content: String,
    pub footer: String,
}

/// Intermediate result of the relationship-analysis step.
///
/// Scoped to one composition run; discarded after assembly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipAnalysis {
    #[serde(default)]
    pub main_paper_index: usize,

    #[serde(default)]
    pub overall_theme: String,

    #[serde(default)]
    pub newspaper_title: String,

    /// Proposed ordering of the non-main papers, as indices into the input
    /// list. Out-of-range entries are skipped downstream, not rejected.
    #[serde(default)]
    pub sub_article_order: Vec<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relationship_tolerates_missing_fields() {
        let rel: RelationshipAnalysis =
            serde_json::from_str(r#"{"mainPaperIndex": 2}"#).unwrap();
        assert_eq!(rel.main_paper_index, 2);
        assert!(rel.overall_theme.is_empty());
        assert!(rel.sub_article_order.is_empty());
    }

    #[test]
    fn test_document_round_trips_camel_case() {
        let doc = NewspaperDocument {
            header: NewspaperHeader {
                newspaper_name: "The Daily Lab".into(),
                date: "2026-01-01".into(),
                issue_number: "Issue No. 120".into(),
            },
            main_article: MainArticle {
                headline: "h".into(),
                subheadline: "s".into(),
                content: "c".into(),
                paper_ids: vec!["p1".into()],
            },
            sub_articles: vec![],
            sidebar_content: String::new(),
            column_content: String::new(),
            footer: String::new(),
        };
        let json = serde_json::to_value(&doc).unwrap();
        assert!(json["mainArticle"]["paperIds"].is_array());
        assert!(json["header"]["newspaperName"].is_string());
    }
}
