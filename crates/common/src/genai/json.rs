//! Balanced JSON-span extraction from free-form model output
//!
//! Models wrap their JSON in prose, code fences, or both. The extractor
//! scans for the first `{`, then walks forward tracking brace depth while
//! honoring string literals and escapes, and returns the first balanced
//! `{...}` span.

/// Extract the first balanced `{...}` span from `text`, or `None` if the
/// text contains no opening brace or the braces never balance.
pub fn extract_json_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_object() {
        assert_eq!(extract_json_span(r#"{"a": 1}"#), Some(r#"{"a": 1}"#));
    }

    #[test]
    fn test_object_inside_code_fence() {
        let text = "Sure! Here is the JSON:\n```json\n{\"headline\": \"x\"}\n```\nHope it helps.";
        assert_eq!(extract_json_span(text), Some(r#"{"headline": "x"}"#));
    }

    #[test]
    fn test_nested_objects() {
        let text = r#"prefix {"outer": {"inner": [1, 2]}} suffix {"second": true}"#;
        assert_eq!(extract_json_span(text), Some(r#"{"outer": {"inner": [1, 2]}}"#));
    }

    #[test]
    fn test_braces_inside_strings_are_ignored() {
        let text = r#"{"note": "closing } inside", "n": 1}"#;
        assert_eq!(extract_json_span(text), Some(text));
    }

    #[test]
    fn test_escaped_quote_inside_string() {
        let text = r#"{"quote": "she said \"}\"", "n": 2}"#;
        assert_eq!(extract_json_span(text), Some(text));
    }

    #[test]
    fn test_no_brace_returns_none() {
        assert_eq!(extract_json_span("plain prose, no json"), None);
    }

    #[test]
    fn test_unbalanced_returns_none() {
        assert_eq!(extract_json_span(r#"{"never": "closed""#), None);
    }

    #[test]
    fn test_multibyte_content() {
        let text = "前置き {\"headline\": \"研究最前線\"} 後書き";
        assert_eq!(extract_json_span(text), Some("{\"headline\": \"研究最前線\"}"));
    }
}
