//! Language-keyed prompt templates and fallback copy
//!
//! Every generation call site has a prompt builder and a fixed fallback
//! value here, both keyed by [`Language`]. The structs deserialized from
//! model output live next to the prompts that specify their schema.

use chrono::{DateTime, Datelike, Utc};
use ronshin_common::models::{Language, Paper, RelationshipAnalysis};
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Wire schemas (tolerant: every field defaulted)
// ---------------------------------------------------------------------------

/// Schema requested from the paper-analysis call
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisOutput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub journal: String,
    #[serde(default)]
    pub publication_date: String,
    #[serde(default)]
    pub doi: String,
    #[serde(default, rename = "abstract")]
    pub abstract_text: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub keypoints: Vec<String>,
    #[serde(default)]
    pub significance: String,
    #[serde(default)]
    pub related_topics: Vec<String>,
    #[serde(default)]
    pub academic_field: String,
    #[serde(default)]
    pub technical_level: String,
    #[serde(default)]
    pub ai_confidence_score: f64,
    #[serde(default)]
    pub figure_references: Option<Vec<String>>,
}

/// Schema requested from the main-article call
#[derive(Debug, Clone, Deserialize)]
pub struct ArticleOutput {
    #[serde(default)]
    pub headline: String,
    #[serde(default)]
    pub subheadline: String,
    #[serde(default)]
    pub content: String,
}

/// Schema requested from each sub-article call
#[derive(Debug, Clone, Deserialize)]
pub struct SubArticleOutput {
    #[serde(default)]
    pub headline: String,
    #[serde(default)]
    pub content: String,
}

// ---------------------------------------------------------------------------
// Paper analysis
// ---------------------------------------------------------------------------

/// Prompt for the single analysis call, over a bounded text excerpt
pub fn analysis_prompt(language: Language, excerpt: &str) -> String {
    match language {
        Language::Ja => format!(
            "以下は学術論文のテキストです。この論文を詳細に分析し、以下の形式でJSON形式で回答してください：\n\n\
            {{\n\
            \"title\": \"論文のタイトル\",\n\
            \"authors\": [\"著者1\", \"著者2\"],\n\
            \"journal\": \"掲載ジャーナル名\",\n\
            \"publicationDate\": \"出版日\",\n\
            \"doi\": \"DOI番号\",\n\
            \"abstract\": \"要約（400文字以内）\",\n\
            \"keywords\": [\"キーワード1\", \"キーワード2\"],\n\
            \"summary\": \"内容の要約（200文字以内）\",\n\
            \"keypoints\": [\"重要ポイント1\", \"重要ポイント2\", \"重要ポイント3\"],\n\
            \"significance\": \"研究の意義（100文字以内）\",\n\
            \"relatedTopics\": [\"関連トピック1\", \"関連トピック2\"],\n\
            \"academicField\": \"学術分野\",\n\
            \"technicalLevel\": \"beginner/intermediate/advanced のいずれか\",\n\
            \"aiConfidenceScore\": 0-100の数値,\n\
            \"figureReferences\": [\"本文中で参照される図表1\", \"図表2\"]\n\
            }}\n\n\
            制約条件:\n\
            - 専門用語は可能な限り平易な表現に置き換える\n\
            - 重要な数値データは保持する\n\n\
            論文テキスト（最初の10000文字）:\n{excerpt}"
        ),
        Language::En => format!(
            "The following is the text of an academic paper. Analyze it in detail and \
            respond as JSON in exactly this shape:\n\n\
            {{\n\
            \"title\": \"paper title\",\n\
            \"authors\": [\"author 1\", \"author 2\"],\n\
            \"journal\": \"journal name\",\n\
            \"publicationDate\": \"publication date\",\n\
            \"doi\": \"DOI\",\n\
            \"abstract\": \"abstract (at most 400 characters)\",\n\
            \"keywords\": [\"keyword 1\", \"keyword 2\"],\n\
            \"summary\": \"summary of the content (at most 200 words)\",\n\
            \"keypoints\": [\"key point 1\", \"key point 2\", \"key point 3\"],\n\
            \"significance\": \"significance of the research (at most 100 words)\",\n\
            \"relatedTopics\": [\"related topic 1\", \"related topic 2\"],\n\
            \"academicField\": \"academic field\",\n\
            \"technicalLevel\": \"one of beginner/intermediate/advanced\",\n\
            \"aiConfidenceScore\": number from 0 to 100,\n\
            \"figureReferences\": [\"figure referenced in the text 1\", \"figure 2\"]\n\
            }}\n\n\
            Constraints:\n\
            - Prefer plain wording over jargon\n\
            - Preserve important numeric data\n\n\
            Paper text (first 10000 characters):\n{excerpt}"
        ),
    }
}

/// Apology summary used when the analysis output cannot be parsed
pub fn analysis_fallback_summary(language: Language) -> &'static str {
    match language {
        Language::Ja => "解析中にエラーが発生しました",
        Language::En => "An error occurred while analyzing this paper",
    }
}

/// Single keypoint entry marking the degraded analysis
pub fn analysis_fallback_keypoint(language: Language) -> &'static str {
    match language {
        Language::Ja => "エラーにより解析できませんでした",
        Language::En => "Analysis was not possible due to an error",
    }
}

/// Label for unknown significance/field values
pub fn unknown_label(language: Language) -> &'static str {
    match language {
        Language::Ja => "不明",
        Language::En => "unknown",
    }
}

// ---------------------------------------------------------------------------
// Relationship analysis
// ---------------------------------------------------------------------------

/// One summary block per paper, embedded in the relationship prompt
fn paper_summaries(language: Language, papers: &[Paper]) -> String {
    papers
        .iter()
        .enumerate()
        .map(|(i, paper)| {
            let authors = if paper.authors.is_empty() {
                unknown_label(language).to_string()
            } else {
                paper.authors.join(", ")
            };
            match language {
                Language::Ja => format!(
                    "論文{}:\nタイトル: {}\n著者: {}\n要約: {}\n重要ポイント: {}\n研究分野: {}\n意義: {}\n",
                    i + 1,
                    paper.title,
                    authors,
                    paper.ai_analysis.summary,
                    paper.ai_analysis.keypoints.join("、"),
                    paper.ai_analysis.academic_field,
                    paper.ai_analysis.significance,
                ),
                Language::En => format!(
                    "Paper {}:\nTitle: {}\nAuthors: {}\nSummary: {}\nKey points: {}\nField: {}\nSignificance: {}\n",
                    i + 1,
                    paper.title,
                    authors,
                    paper.ai_analysis.summary,
                    paper.ai_analysis.keypoints.join(", "),
                    paper.ai_analysis.academic_field,
                    paper.ai_analysis.significance,
                ),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prompt for the relationship/ranking call
pub fn relationship_prompt(language: Language, papers: &[Paper]) -> String {
    let count = papers.len();
    let summaries = paper_summaries(language, papers);
    match language {
        Language::Ja => format!(
            "以下は{count}つの学術論文の要約です。これらの論文を分析し、新聞記事として構成するための分析を行ってください。\n\n\
            {summaries}\n\
            以下の形式でJSON形式で回答してください：\n\
            {{\n\
            \"mainPaperIndex\": メイン記事にすべき論文のインデックス（0-{max}）,\n\
            \"overallTheme\": \"全体を通したテーマや研究領域\",\n\
            \"newspaperTitle\": \"この紙面にふさわしい新聞名\",\n\
            \"subArticleOrder\": [サブ記事の論文インデックスの順序配列]\n\
            }}",
            max = count - 1,
        ),
        Language::En => format!(
            "Below are summaries of {count} academic papers. Analyze them and decide how to \
            arrange them as newspaper articles.\n\n\
            {summaries}\n\
            Respond as JSON in exactly this shape:\n\
            {{\n\
            \"mainPaperIndex\": index of the paper for the lead article (0-{max}),\n\
            \"overallTheme\": \"the theme or research area running through all papers\",\n\
            \"newspaperTitle\": \"a fitting name for this newspaper\",\n\
            \"subArticleOrder\": [ordered array of paper indices for the secondary articles]\n\
            }}",
            max = count - 1,
        ),
    }
}

/// Generic theme used when the relationship output cannot be parsed
pub fn fallback_theme(language: Language) -> &'static str {
    match language {
        Language::Ja => "学術研究の最新動向",
        Language::En => "Recent developments in academic research",
    }
}

/// Fallback relationship: lead with paper 0, remaining indices ascending.
///
/// The newspaper title is left empty so assembly draws a placeholder name.
pub fn relationship_fallback(language: Language, paper_count: usize) -> RelationshipAnalysis {
    RelationshipAnalysis {
        main_paper_index: 0,
        overall_theme: fallback_theme(language).to_string(),
        newspaper_title: String::new(),
        sub_article_order: (1..paper_count).collect(),
    }
}

// ---------------------------------------------------------------------------
// Main article
// ---------------------------------------------------------------------------

/// Prompt for the lead-article call
pub fn main_article_prompt(language: Language, paper: &Paper, theme: &str) -> String {
    let authors = if paper.authors.is_empty() {
        unknown_label(language).to_string()
    } else {
        paper.authors.join(", ")
    };
    match language {
        Language::Ja => format!(
            "あなたは優れた科学ジャーナリストです。以下の学術論文を一般読者向けの新聞記事（メイン記事）に変換してください。\n\n\
            論文情報:\n\
            タイトル: {title}\n\
            著者: {authors}\n\
            要約: {summary}\n\
            重要ポイント: {keypoints}\n\
            意義: {significance}\n\n\
            全体テーマ: {theme}\n\n\
            以下の形式でJSON形式で新聞記事を作成してください:\n\
            {{\n\
            \"headline\": \"見出し（20文字以内、インパクトのある表現）\",\n\
            \"subheadline\": \"小見出し（30文字以内）\",\n\
            \"content\": \"本文（500字程度、一般読者にもわかりやすく研究の重要性を伝える内容）\"\n\
            }}\n\n\
            新聞記事として：\n\
            - 最初の段落で研究の重要性を強調\n\
            - 専門用語は避け、必要な場合は簡潔に説明\n\
            - 研究の社会的意義や将来の応用について言及",
            title = paper.title,
            summary = paper.ai_analysis.summary,
            keypoints = paper.ai_analysis.keypoints.join("\n"),
            significance = paper.ai_analysis.significance,
        ),
        Language::En => format!(
            "You are an accomplished science journalist. Turn the following academic paper \
            into a newspaper lead article for a general audience.\n\n\
            Paper:\n\
            Title: {title}\n\
            Authors: {authors}\n\
            Summary: {summary}\n\
            Key points: {keypoints}\n\
            Significance: {significance}\n\n\
            Overall theme: {theme}\n\n\
            Respond as JSON in exactly this shape:\n\
            {{\n\
            \"headline\": \"headline (at most 50 characters, punchy)\",\n\
            \"subheadline\": \"subheadline (at most 80 characters)\",\n\
            \"content\": \"body (200-500 words, conveying why the research matters to lay readers)\"\n\
            }}\n\n\
            As a newspaper article:\n\
            - Lead with why the research matters\n\
            - Avoid jargon; explain briefly where unavoidable\n\
            - Mention societal significance and future applications",
            title = paper.title,
            summary = paper.ai_analysis.summary,
            keypoints = paper.ai_analysis.keypoints.join("\n"),
            significance = paper.ai_analysis.significance,
        ),
    }
}

/// Generic inspirational triple used when the lead article cannot be parsed
pub fn main_article_fallback(language: Language) -> ArticleOutput {
    match language {
        Language::Ja => ArticleOutput {
            headline: "最新研究が明らかにする未来".to_string(),
            subheadline: "革新的発見が示す新たな可能性".to_string(),
            content: "本日発表された研究成果により、私たちの未来に大きな変革がもたらされる可能性が明らかになった。".to_string(),
        },
        Language::En => ArticleOutput {
            headline: "New Research Points the Way Forward".to_string(),
            subheadline: "Innovative findings open unexpected possibilities".to_string(),
            content: "Research published today suggests far-reaching changes ahead, as new findings reshape our understanding of the field.".to_string(),
        },
    }
}

// ---------------------------------------------------------------------------
// Sub-articles
// ---------------------------------------------------------------------------

/// Prompt for one sub-article call
pub fn sub_article_prompt(language: Language, paper: &Paper) -> String {
    let authors = if paper.authors.is_empty() {
        unknown_label(language).to_string()
    } else {
        paper.authors.join(", ")
    };
    match language {
        Language::Ja => format!(
            "以下の学術論文を簡潔な新聞記事（サブ記事）に変換してください。\n\n\
            論文情報:\n\
            タイトル: {title}\n\
            著者: {authors}\n\
            要約: {summary}\n\n\
            以下の形式でJSON形式で記事を作成してください:\n\
            {{\n\
            \"headline\": \"見出し（15文字以内）\",\n\
            \"content\": \"本文（200字程度）\"\n\
            }}",
            title = paper.title,
            summary = paper.ai_analysis.summary,
        ),
        Language::En => format!(
            "Turn the following academic paper into a concise secondary newspaper article.\n\n\
            Paper:\n\
            Title: {title}\n\
            Authors: {authors}\n\
            Summary: {summary}\n\n\
            Respond as JSON in exactly this shape:\n\
            {{\n\
            \"headline\": \"headline (at most 40 characters)\",\n\
            \"content\": \"body (about 200 words)\"\n\
            }}",
            title = paper.title,
            summary = paper.ai_analysis.summary,
        ),
    }
}

/// Numbered placeholder pair used when a sub-article cannot be parsed
pub fn sub_article_fallback(language: Language, number: usize) -> SubArticleOutput {
    match language {
        Language::Ja => SubArticleOutput {
            headline: format!("研究成果{}", number),
            content: "新たな発見により、この分野の理解が深まりました。".to_string(),
        },
        Language::En => SubArticleOutput {
            headline: format!("Research Highlight {}", number),
            content: "A new finding deepens our understanding of this field.".to_string(),
        },
    }
}

// ---------------------------------------------------------------------------
// Sidebar
// ---------------------------------------------------------------------------

/// Prompt for the sidebar call; the response is used as raw text
pub fn sidebar_prompt(language: Language, theme: &str) -> String {
    match language {
        Language::Ja => format!(
            "以下の研究論文群の情報を基に、新聞のサイドバーコンテンツを作成してください。\n\n\
            全体テーマ: {theme}\n\n\
            サイドバーには以下を含めてください（200字程度）：\n\
            - 関連キーワード（5-7個）\n\
            - 研究分野の簡単な解説\n\
            - 今後の研究展望\n\n\
            簡潔で読者の興味を引く内容にしてください。"
        ),
        Language::En => format!(
            "Based on the research papers in this issue, write sidebar copy for the newspaper.\n\n\
            Overall theme: {theme}\n\n\
            Include (about 200 words total):\n\
            - Related keywords (5-7)\n\
            - A short explainer of the research field\n\
            - An outlook on future research\n\n\
            Keep it concise and engaging."
        ),
    }
}

/// Sidebar copy used when the sidebar call itself fails
pub fn sidebar_fallback(language: Language) -> &'static str {
    match language {
        Language::Ja => "本日の紙面では、注目の研究成果を特集しています。各記事をご覧ください。",
        Language::En => "This issue highlights notable research findings. See the articles for details.",
    }
}

// ---------------------------------------------------------------------------
// Assembly boilerplate
// ---------------------------------------------------------------------------

/// Fixed placeholder newspaper names, drawn at random when the relationship
/// step produced no title
pub fn placeholder_titles(language: Language) -> &'static [&'static str; 5] {
    match language {
        Language::Ja => &[
            "研究最前線タイムズ",
            "サイエンス新報",
            "学術トピックス新聞",
            "リサーチニュース",
            "研究者の眼",
        ],
        Language::En => &[
            "Research Frontier Times",
            "The Science Herald",
            "Academic Topics Tribune",
            "Research News Daily",
            "The Scholar's Eye",
        ],
    }
}

/// Masthead date line
pub fn format_date(language: Language, date: &DateTime<Utc>) -> String {
    match language {
        Language::Ja => date.format("%Y年%m月%d日").to_string(),
        Language::En => date.format("%B %d, %Y").to_string(),
    }
}

/// Masthead issue-number line
pub fn issue_label(language: Language, number: u32) -> String {
    match language {
        Language::Ja => format!("第{}号", number),
        Language::En => format!("Issue No. {}", number),
    }
}

/// Column blurb interpolating paper count and theme
pub fn column_content(language: Language, paper_count: usize, theme: &str) -> String {
    match language {
        Language::Ja => format!(
            "本日の特集では、{theme}に関する{paper_count}つの重要な研究をお届けしました。\
            これらの研究は、私たちの未来に大きな影響を与える可能性を秘めています。"
        ),
        Language::En => format!(
            "Today's feature brings you {paper_count} important studies on {theme}. \
            Together they hint at changes that may shape our future."
        ),
    }
}

/// Copyright line
pub fn footer(language: Language, date: &DateTime<Utc>) -> String {
    match language {
        Language::Ja => format!(
            "© {} Research News Network. 本紙は学術論文を基に生成されたものです。",
            date.year()
        ),
        Language::En => format!(
            "© {} Research News Network. This paper was generated from academic publications.",
            date.year()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ronshin_common::models::AiAnalysis;

    fn paper(id: &str, title: &str) -> Paper {
        Paper {
            id: id.to_string(),
            title: title.to_string(),
            authors: vec!["Alice".into(), "Bob".into()],
            journal: String::new(),
            publication_date: String::new(),
            doi: String::new(),
            ai_analysis: AiAnalysis {
                summary: "summary".into(),
                keypoints: vec!["k1".into(), "k2".into()],
                significance: "sig".into(),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_relationship_prompt_numbers_every_paper() {
        let papers = vec![paper("p1", "A"), paper("p2", "B"), paper("p3", "C")];
        let prompt = relationship_prompt(Language::En, &papers);
        assert!(prompt.contains("Paper 1:"));
        assert!(prompt.contains("Paper 3:"));
        assert!(prompt.contains("(0-2)"));
        assert!(prompt.contains("newspaperTitle"));
    }

    #[test]
    fn test_relationship_fallback_orders_remaining_indices() {
        let rel = relationship_fallback(Language::Ja, 5);
        assert_eq!(rel.main_paper_index, 0);
        assert_eq!(rel.sub_article_order, vec![1, 2, 3, 4]);
        assert!(rel.newspaper_title.is_empty());
        assert_eq!(rel.overall_theme, fallback_theme(Language::Ja));
    }

    #[test]
    fn test_analysis_prompt_embeds_excerpt() {
        let prompt = analysis_prompt(Language::Ja, "テキスト断片");
        assert!(prompt.contains("テキスト断片"));
        assert!(prompt.contains("figureReferences"));

        let prompt = analysis_prompt(Language::En, "text excerpt");
        assert!(prompt.contains("text excerpt"));
        assert!(prompt.contains("aiConfidenceScore"));
    }

    #[test]
    fn test_sub_article_fallback_is_numbered() {
        let draft = sub_article_fallback(Language::En, 3);
        assert_eq!(draft.headline, "Research Highlight 3");
        let draft = sub_article_fallback(Language::Ja, 1);
        assert_eq!(draft.headline, "研究成果1");
    }

    #[test]
    fn test_placeholder_titles_have_five_entries() {
        assert_eq!(placeholder_titles(Language::Ja).len(), 5);
        assert_eq!(placeholder_titles(Language::En).len(), 5);
    }

    #[test]
    fn test_issue_label_formats() {
        assert_eq!(issue_label(Language::Ja, 123), "第123号");
        assert_eq!(issue_label(Language::En, 123), "Issue No. 123");
    }

    #[test]
    fn test_analysis_output_tolerates_partial_json() {
        let out: AnalysisOutput =
            serde_json::from_str(r#"{"title": "T", "aiConfidenceScore": 85}"#).unwrap();
        assert_eq!(out.title, "T");
        assert_eq!(out.ai_confidence_score, 85.0);
        assert!(out.figure_references.is_none());
    }
}
