//! Sanitizers for text copied from documents into generated source
//!
//! Descriptions in real-world documents carry Markdown, smart punctuation and stray
//! whitespace. Printers emit them inside comments and string literals, so they are
//! normalized here first.

use once_cell::sync::Lazy;
use regex::Regex;

static SMART_PUNCTUATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\u{2018}\u{2019}\u{201C}\u{201D}\u{2013}\u{2014}]")
        .expect("static punctuation pattern")
});

static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("static whitespace pattern"));

fn replace_smart_punctuation(line: &str) -> String {
    SMART_PUNCTUATION
        .replace_all(line, |caps: &regex::Captures| match &caps[0] {
            "\u{2018}" | "\u{2019}" => "'",
            "\u{201C}" | "\u{201D}" => "\"",
            _ => "-",
        })
        .into_owned()
}

/// Sanitizes a description for a single-line doc comment.
///
/// Smart punctuation becomes ASCII, whitespace collapses, empty lines are dropped and
/// the remaining lines are joined with a space. Square brackets are escaped so rustdoc
/// does not read them as intra-doc links.
///
/// # Examples
/// ```
/// use swaggen::generation::sanitizers::sanitize_doc;
///
/// let output = sanitize_doc("Returns a \u{201C}pet\u{201D}\u{2014}or [nothing]");
/// assert_eq!(output, "Returns a \"pet\"-or \\[nothing\\]");
/// ```
pub fn sanitize_doc(input: &str) -> String {
    input
        .lines()
        .map(|line| {
            let line = replace_smart_punctuation(line);
            WHITESPACE
                .replace_all(line.trim(), " ")
                .replace('[', "\\[")
                .replace(']', "\\]")
        })
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Escapes `input` for use inside a double-quoted string literal
pub fn escape_string_literal(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            other => escaped.push(other),
        }
    }
    escaped
}
