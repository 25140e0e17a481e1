//! End-to-end analysis tests against an in-memory store and stub generators.

use async_trait::async_trait;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use ronshin_common::errors::Result;
use ronshin_common::genai::TextGenerator;
use ronshin_common::models::{Language, TechnicalLevel};
use ronshin_pipeline::{MemoryBlobStore, PaperAnalyzer, PipelineError};
use std::sync::Arc;

/// Always answers with the given response
struct FixedGenerator(String);

#[async_trait]
impl TextGenerator for FixedGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// Build a one-page PDF whose content stream draws `text`
fn sample_pdf(text: &str) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });
    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 12.into()]),
            Operation::new("Td", vec![50.into(), 700.into()]),
            Operation::new("Tj", vec![Object::string_literal(text)]),
            Operation::new("ET", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(
        dictionary! {},
        content.encode().expect("encode content stream"),
    ));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("serialize pdf");
    bytes
}

fn analyzer_with(
    pdf: Vec<u8>,
    generator: Arc<dyn TextGenerator>,
) -> PaperAnalyzer {
    let mut store = MemoryBlobStore::new();
    store.insert("test-bucket", "papers/u1/p1.pdf", pdf);
    PaperAnalyzer::new(Arc::new(store), generator, "test-bucket".to_string())
}

const ANALYSIS_RESPONSE: &str = r#"Here is the analysis:
{
  "title": "Distributed Consensus Revisited",
  "authors": ["A. Researcher", "B. Scholar"],
  "journal": "Journal of Examples",
  "publicationDate": "2025-11-01",
  "doi": "10.1000/example",
  "abstract": "We revisit consensus.",
  "keywords": ["consensus", "distributed systems"],
  "summary": "A new consensus protocol with lower latency.",
  "keypoints": ["halves round trips", "tolerates f faults"],
  "significance": "Enables faster replication.",
  "relatedTopics": ["replication"],
  "academicField": "computer science",
  "technicalLevel": "Advanced",
  "aiConfidenceScore": 87.4,
  "figureReferences": ["Figure 1", "Figure 3"]
}"#;

#[tokio::test]
async fn test_analyze_happy_path() {
    let pdf = sample_pdf(
        "This paper presents a novel approach to distributed consensus in \
         asynchronous networks with extensive experimental evaluation.",
    );
    let analyzer = analyzer_with(pdf, Arc::new(FixedGenerator(ANALYSIS_RESPONSE.to_string())));

    let record = analyzer
        .analyze("p1", "gs://test-bucket/papers/u1/p1.pdf", "u1", Language::En)
        .await
        .unwrap();

    assert_eq!(record.paper_info.title, "Distributed Consensus Revisited");
    assert_eq!(record.paper_info.authors.len(), 2);
    assert_eq!(record.paper_info.doi, "10.1000/example");

    assert_eq!(record.metadata.page_count, 1);
    assert_eq!(record.metadata.language, "en");
    assert!(record.metadata.extracted_text.contains("distributed consensus"));
    assert_eq!(
        record.metadata.figure_references.as_deref(),
        Some(["Figure 1".to_string(), "Figure 3".to_string()].as_slice())
    );

    assert_eq!(record.ai_analysis.technical_level, TechnicalLevel::Advanced);
    assert_eq!(record.ai_analysis.ai_confidence_score, 87);
    assert_eq!(record.ai_analysis.keypoints.len(), 2);
}

#[tokio::test]
async fn test_analyze_unparsable_response_degrades_to_fallback_record() {
    let pdf = sample_pdf("Some extractable text for the detector to look at.");
    let analyzer = analyzer_with(
        pdf,
        Arc::new(FixedGenerator("I cannot produce JSON today.".to_string())),
    );

    let record = analyzer
        .analyze("p1", "gs://test-bucket/papers/u1/p1.pdf", "u1", Language::En)
        .await
        .unwrap();

    assert_eq!(
        record.ai_analysis.summary,
        "An error occurred while analyzing this paper"
    );
    assert_eq!(record.ai_analysis.ai_confidence_score, 0);
    assert_eq!(
        record.ai_analysis.technical_level,
        TechnicalLevel::Intermediate
    );
    assert!(record.metadata.figure_references.is_none());

    // Extraction still happened; only the generated fields fell back.
    assert_eq!(record.metadata.page_count, 1);
    assert!(!record.metadata.extracted_text.is_empty());
}

#[tokio::test]
async fn test_analyze_unreadable_document_fails() {
    let analyzer = analyzer_with(
        b"this is not a pdf".to_vec(),
        Arc::new(FixedGenerator(ANALYSIS_RESPONSE.to_string())),
    );

    let err = analyzer
        .analyze("p1", "gs://test-bucket/papers/u1/p1.pdf", "u1", Language::En)
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::Extraction { .. }));
}

#[tokio::test]
async fn test_analyze_missing_object_fails() {
    let analyzer = analyzer_with(
        sample_pdf("text"),
        Arc::new(FixedGenerator(ANALYSIS_RESPONSE.to_string())),
    );

    let err = analyzer
        .analyze("p9", "gs://test-bucket/papers/u1/p9.pdf", "u1", Language::En)
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::StorageResolution { .. }));
}

#[tokio::test]
async fn test_analyze_opaque_url_resolves_via_upload_convention() {
    let pdf = sample_pdf("Convention-resolved document text.");
    let analyzer = analyzer_with(pdf, Arc::new(FixedGenerator(ANALYSIS_RESPONSE.to_string())));

    let record = analyzer
        .analyze("p1", "https://example.com/signed?sig=abc", "u1", Language::En)
        .await
        .unwrap();

    assert_eq!(record.metadata.page_count, 1);
}
