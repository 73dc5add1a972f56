//! Parse tag-delimited model output

use crate::error::ExtractError;
use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::debug;

/// Name of the synthetic element wrapped around every reply
pub const ROOT_TAG: &str = "root";

/// Outcome of single-boolean extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagExtraction {
    /// A well-formed tag held `true` or `false`
    Strict(bool),
    /// No usable tag; value from the `"true"` substring check
    Heuristic(bool),
}

impl FlagExtraction {
    /// The boolean, however it was obtained
    pub fn value(self) -> bool {
        match self {
            FlagExtraction::Strict(v) | FlagExtraction::Heuristic(v) => v,
        }
    }

    /// Whether the strict tier produced the value
    pub fn is_strict(self) -> bool {
        matches!(self, FlagExtraction::Strict(_))
    }
}

/// Collect the text of every `<tag>` child of the wrapped reply
///
/// Values come back in document order, trimmed, with entities unescaped.
/// Nested markup inside a value contributes its text. Values that are empty
/// after trimming are skipped, so `Ok(vec![])` means "well-formed, but
/// nothing usable".
///
/// # Errors
///
/// [`ExtractError::Malformed`] when the wrapped reply is not well-formed:
/// mismatched or unclosed tags, stray end tags, or bad entity references.
pub fn extract_all(text: &str, tag: &str) -> Result<Vec<String>, ExtractError> {
    let wrapped = format!("<{ROOT_TAG}>{}</{ROOT_TAG}>", text.trim());
    let mut reader = Reader::from_str(&wrapped);

    let mut depth = 0usize;
    let mut current: Option<String> = None;
    let mut values = Vec::new();

    loop {
        let event = reader.read_event().map_err(|e| {
            ExtractError::Malformed(format!("at byte {}: {}", reader.buffer_position(), e))
        })?;

        match event {
            Event::Start(e) => {
                depth += 1;
                if depth == 2 && e.name().as_ref() == tag.as_bytes() {
                    current = Some(String::new());
                }
            }
            Event::End(_) => {
                if depth == 2 {
                    if let Some(value) = current.take() {
                        push_value(&mut values, value);
                    }
                }
                depth = depth.checked_sub(1).ok_or_else(|| {
                    ExtractError::Malformed("end tag without matching start".to_string())
                })?;
            }
            Event::Text(t) => {
                if let Some(buf) = current.as_mut() {
                    let unescaped = t
                        .unescape()
                        .map_err(|e| ExtractError::Malformed(e.to_string()))?;
                    buf.push_str(&unescaped);
                }
            }
            Event::CData(c) => {
                if let Some(buf) = current.as_mut() {
                    buf.push_str(&String::from_utf8_lossy(&c));
                }
            }
            Event::Eof => break,
            // Self-closing tags carry no text
            _ => {}
        }
    }

    if depth != 0 {
        return Err(ExtractError::Malformed(format!(
            "{} unclosed element(s)",
            depth
        )));
    }

    Ok(values)
}

fn push_value(values: &mut Vec<String>, value: String) {
    let trimmed = value.trim();
    if !trimmed.is_empty() {
        values.push(trimmed.to_string());
    }
}

/// Read a single boolean `<tag>` from a reply
///
/// The last `<tag>` holding `true` or `false` (any case) wins. If the reply
/// does not parse, or has no such tag, the heuristic applies.
pub fn extract_flag(text: &str, tag: &str) -> FlagExtraction {
    match extract_all(text, tag) {
        Ok(values) => {
            if let Some(value) = values.iter().rev().find_map(|v| parse_bool(v)) {
                return FlagExtraction::Strict(value);
            }
            debug!("No boolean <{}> tag in reply, using substring fallback", tag);
        }
        Err(e) => {
            debug!("Reply did not parse ({}), using substring fallback", e);
        }
    }

    FlagExtraction::Heuristic(text.to_lowercase().contains("true"))
}

fn parse_bool(value: &str) -> Option<bool> {
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_facts_in_order() {
        let reply = "<fact>First</fact>\n<fact>Second</fact>\n<fact>Third</fact>";
        let facts = extract_all(reply, "fact").unwrap();
        assert_eq!(facts, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_extract_ignores_surrounding_prose() {
        let reply = "Sure! Here you go:\n<fact>Octopuses have three hearts.</fact>\nEnjoy.";
        let facts = extract_all(reply, "fact").unwrap();
        assert_eq!(facts, vec!["Octopuses have three hearts."]);
    }

    #[test]
    fn test_extract_skips_other_tags() {
        let reply = "<note>ignore</note><fact>keep</fact>";
        assert_eq!(extract_all(reply, "fact").unwrap(), vec!["keep"]);
    }

    #[test]
    fn test_extract_only_direct_children() {
        let reply = "<group><fact>nested</fact></group><fact>top</fact>";
        assert_eq!(extract_all(reply, "fact").unwrap(), vec!["top"]);
    }

    #[test]
    fn test_extract_collects_nested_text() {
        let reply = "<fact>Octopuses have <b>three</b> hearts.</fact>";
        assert_eq!(
            extract_all(reply, "fact").unwrap(),
            vec!["Octopuses have three hearts."]
        );
    }

    #[test]
    fn test_extract_unescapes_entities() {
        let reply = "<fact>Salt &amp; pepper &lt;3</fact>";
        assert_eq!(extract_all(reply, "fact").unwrap(), vec!["Salt & pepper <3"]);
    }

    #[test]
    fn test_extract_cdata() {
        let reply = "<fact><![CDATA[a < b]]></fact>";
        assert_eq!(extract_all(reply, "fact").unwrap(), vec!["a < b"]);
    }

    #[test]
    fn test_extract_preserves_non_ascii() {
        let reply = "<fact>Der Kraken hat drei Herzen – 八本足</fact>";
        assert_eq!(
            extract_all(reply, "fact").unwrap(),
            vec!["Der Kraken hat drei Herzen – 八本足"]
        );
    }

    #[test]
    fn test_extract_skips_empty_values() {
        let reply = "<fact>  </fact><fact/><fact>real</fact>";
        assert_eq!(extract_all(reply, "fact").unwrap(), vec!["real"]);
    }

    #[test]
    fn test_extract_no_tags_is_empty() {
        assert!(extract_all("I cannot help with that.", "fact").unwrap().is_empty());
        assert!(extract_all("", "fact").unwrap().is_empty());
    }

    #[test]
    fn test_extract_mismatched_tags() {
        let result = extract_all("<fact>broken</fcat>", "fact");
        assert!(matches!(result, Err(ExtractError::Malformed(_))));
    }

    #[test]
    fn test_extract_unclosed_tag() {
        let result = extract_all("<fact>never closed", "fact");
        assert!(matches!(result, Err(ExtractError::Malformed(_))));
    }

    #[test]
    fn test_extract_stray_end_tag() {
        let result = extract_all("<fact>one</fact></fact>", "fact");
        assert!(matches!(result, Err(ExtractError::Malformed(_))));
    }

    #[test]
    fn test_extract_bare_ampersand() {
        let result = extract_all("<fact>Tom & Jerry</fact>", "fact");
        assert!(matches!(result, Err(ExtractError::Malformed(_))));
    }

    #[test]
    fn test_flag_strict() {
        assert_eq!(extract_flag("<result>true</result>", "result"), FlagExtraction::Strict(true));
        assert_eq!(extract_flag("<result>false</result>", "result"), FlagExtraction::Strict(false));
        assert_eq!(
            extract_flag("  <result> TRUE </result>\n", "result"),
            FlagExtraction::Strict(true)
        );
    }

    #[test]
    fn test_flag_after_reasoning() {
        let reply = "The claim is accurate per [1] and [2].\n<result>true</result>";
        assert_eq!(extract_flag(reply, "result"), FlagExtraction::Strict(true));
    }

    #[test]
    fn test_flag_last_tag_wins() {
        let reply = "<result>true</result> on reflection <result>false</result>";
        assert_eq!(extract_flag(reply, "result"), FlagExtraction::Strict(false));
    }

    #[test]
    fn test_flag_strict_false_despite_true_substring() {
        let reply = "It is not true that octopuses have bones. <result>false</result>";
        assert_eq!(extract_flag(reply, "result"), FlagExtraction::Strict(false));
    }

    #[test]
    fn test_flag_heuristic_on_malformed() {
        assert_eq!(
            extract_flag("<result>True</reslt>", "result"),
            FlagExtraction::Heuristic(true)
        );
        assert_eq!(
            extract_flag("<result>nope", "result"),
            FlagExtraction::Heuristic(false)
        );
    }

    #[test]
    fn test_flag_heuristic_without_tag() {
        assert_eq!(extract_flag("This is TRUE.", "result"), FlagExtraction::Heuristic(true));
        assert_eq!(extract_flag("Incorrect.", "result"), FlagExtraction::Heuristic(false));
    }

    #[test]
    fn test_flag_heuristic_on_non_boolean_tag() {
        let reply = "<result>mostly true</result>";
        assert_eq!(extract_flag(reply, "result"), FlagExtraction::Heuristic(true));
    }

    #[test]
    fn test_flag_accessors() {
        assert!(FlagExtraction::Strict(true).value());
        assert!(FlagExtraction::Strict(true).is_strict());
        assert!(!FlagExtraction::Heuristic(false).value());
        assert!(!FlagExtraction::Heuristic(false).is_strict());
    }
}
