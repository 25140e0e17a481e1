//! Best-effort language detection
//!
//! Detection runs over a bounded prefix of the extracted text and can never
//! fail the pipeline: an undetectable sample yields the tag `unknown`.

use crate::pdf::truncate_chars;
use whatlang::Lang;

/// Characters of text sampled for detection
pub const DETECTION_SAMPLE_CHARS: usize = 1000;

/// Tag used when the detector cannot classify the sample
pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// Detect the dominant language of the text's first
/// [`DETECTION_SAMPLE_CHARS`] characters, returning a short tag.
pub fn detect_language(text: &str) -> String {
    let sample = truncate_chars(text, DETECTION_SAMPLE_CHARS);
    if sample.trim().is_empty() {
        return UNKNOWN_LANGUAGE.to_string();
    }

    match whatlang::detect(sample) {
        Some(info) => short_tag(info.lang()).to_string(),
        None => UNKNOWN_LANGUAGE.to_string(),
    }
}

/// Map to the two-letter tags stored on paper records where one exists;
/// other languages keep their ISO 639-3 code.
fn short_tag(lang: Lang) -> &'static str {
    match lang {
        Lang::Jpn => "ja",
        Lang::Eng => "en",
        Lang::Cmn => "zh",
        Lang::Kor => "ko",
        Lang::Fra => "fr",
        Lang::Deu => "de",
        Lang::Spa => "es",
        other => other.code(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_english() {
        let text = "This paper presents a novel approach to distributed consensus \
                    in asynchronous networks, with extensive experimental evaluation.";
        assert_eq!(detect_language(text), "en");
    }

    #[test]
    fn test_detects_japanese() {
        let text = "本論文では、非同期ネットワークにおける分散合意形成への新しい\
                    アプローチを提案し、広範な実験的評価を行う。";
        assert_eq!(detect_language(text), "ja");
    }

    #[test]
    fn test_empty_text_is_unknown() {
        assert_eq!(detect_language(""), UNKNOWN_LANGUAGE);
        assert_eq!(detect_language("   \n  "), UNKNOWN_LANGUAGE);
    }
}
