//! Markdown conversion and metadata-block extraction.
//!
//! The converter boundary for the pipeline: everything upstream hands over a
//! raw markdown source and gets back `(Meta, String)` — a metadata mapping
//! and the rendered HTML body. Nothing past the loader ever sees the generic
//! mapping; it is translated into a fixed-shape [`crate::load::Post`] record
//! immediately.
//!
//! ## Metadata Block
//!
//! Posts open with a plain `Key: value` block, one key per line:
//!
//! ```text
//! Title: A Walk in the Hills
//! Date: 2024/01/03
//! Author: Jane Doe
//! Global_Styles: typography.css
//!     print.css
//! ```
//!
//! Rules:
//! - Keys are case-insensitive (lower-cased on extraction) and may contain
//!   letters, digits, `_` and `-`.
//! - A line indented by four spaces (or a tab) continues the previous key,
//!   appending another value — which is why every key maps to a *list* of
//!   values, even when only one was given.
//! - The block ends at the first blank line or the first line that doesn't
//!   match either form. Everything after it is the body.
//!
//! The body is rendered with [pulldown-cmark](https://docs.rs/pulldown-cmark).

use pulldown_cmark::{Parser, html};
use std::collections::BTreeMap;

/// Metadata mapping: lower-cased key → values in source order.
pub type Meta = BTreeMap<String, Vec<String>>;

/// Convert a markdown source into its metadata mapping and HTML body.
pub fn convert(source: &str) -> (Meta, String) {
    let (meta, body) = split_meta(source);

    let parser = Parser::new(body);
    let mut body_html = String::new();
    html::push_html(&mut body_html, parser);

    (meta, body_html)
}

/// Split the leading metadata block off a markdown source.
///
/// Returns the parsed mapping and the remaining body text.
fn split_meta(source: &str) -> (Meta, &str) {
    let mut meta = Meta::new();
    let mut current_key: Option<String> = None;
    let mut consumed = 0;

    for line in source.split_inclusive('\n') {
        let trimmed_end = line.trim_end_matches(['\n', '\r']);

        if trimmed_end.trim().is_empty() {
            // Blank line terminates the block (and is consumed with it)
            if !meta.is_empty() {
                consumed += line.len();
            }
            break;
        }

        if let Some(value) = continuation_value(trimmed_end) {
            match &current_key {
                Some(key) => {
                    meta.get_mut(key).unwrap().push(value.to_string());
                    consumed += line.len();
                    continue;
                }
                None => break,
            }
        }

        match parse_key_value(trimmed_end) {
            Some((key, value)) => {
                let values = meta.entry(key.clone()).or_default();
                if !value.is_empty() {
                    values.push(value.to_string());
                }
                current_key = Some(key);
                consumed += line.len();
            }
            None => break,
        }
    }

    (meta, &source[consumed..])
}

/// A continuation line: at least four spaces or a tab of indentation.
fn continuation_value(line: &str) -> Option<&str> {
    line.strip_prefix("    ")
        .or_else(|| line.strip_prefix('\t'))
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Parse a `Key: value` line. The key is lower-cased.
fn parse_key_value(line: &str) -> Option<(String, &str)> {
    let (key, value) = line.split_once(':')?;
    let key = key.trim();
    if key.is_empty()
        || !key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return None;
    }
    Some((key.to_ascii_lowercase(), value.trim()))
}
