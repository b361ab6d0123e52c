//! Markup helpers for assistant replies.
//!
//! The analysis endpoint returns replies as HTML-ish markup. The transcript
//! stores plain text, so tags are stripped and the few entities the endpoint
//! produces are decoded. `escape_text` goes the other way: it makes free text
//! safe to embed in a markup context.

use once_cell::sync::Lazy;
use regex::Regex;

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));

/// Removes markup tags and decodes basic entities, leaving plain text.
pub fn strip_tags(markup: &str) -> String {
    let text = TAG_RE.replace_all(markup, "");
    decode_entities(&text)
}

/// Escapes text for embedding in a markup context.
pub fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}

// `&amp;` must decode last so that `&amp;lt;` yields the literal `&lt;`.
fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#039;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_tags_removes_markup() {
        assert_eq!(strip_tags("<p>hi</p>"), "hi");
        assert_eq!(strip_tags("<ul><li>one</li><li>two</li></ul>"), "onetwo");
    }

    #[test]
    fn test_strip_tags_plain_text_unchanged() {
        assert_eq!(strip_tags("no tags here"), "no tags here");
    }

    #[test]
    fn test_strip_tags_decodes_entities() {
        assert_eq!(strip_tags("<p>a &amp; b &lt; c</p>"), "a & b < c");
        assert_eq!(strip_tags("it&#039;s &quot;fine&quot;"), "it's \"fine\"");
    }

    #[test]
    fn test_strip_tags_double_escaped_entity() {
        // A literal "&lt;" in the source text must survive as "&lt;"
        assert_eq!(strip_tags("&amp;lt;"), "&lt;");
    }

    #[test]
    fn test_escape_text_escapes_special_characters() {
        assert_eq!(
            escape_text("<b>\"a\" & 'b'</b>"),
            "&lt;b&gt;&quot;a&quot; &amp; &#039;b&#039;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_escape_then_strip_round_trips() {
        let text = "2 < 3 && \"x\"";
        assert_eq!(strip_tags(&escape_text(text)), text);
    }
}
