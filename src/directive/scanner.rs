//! Locates directive tags in template source.
//!
//! The scanner walks the template once and reports the byte span of every
//! statement tag whose first word is a directive keyword. Expressions,
//! comments and `raw` blocks are skipped so that tag-like text inside them
//! is never mistaken for a directive.

use crate::constants::directives::{
    BLOCK_END, BLOCK_START, COMMENT_END, COMMENT_START, DEFAULT, END_RAW, RAW, REQUIRED,
};
use std::ops::Range;

const EXPRESSION_START: &str = "{{";
const EXPRESSION_END: &str = "}}";

/// A directive tag found in the template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveSpan<'a> {
    /// Byte range of the whole tag, delimiters included.
    pub range: Range<usize>,
    /// The tag exactly as written.
    pub source: &'a str,
    /// Tag content without delimiters, whitespace-control markers and surrounding whitespace.
    pub body: &'a str,
}

/// Returns the spans of all `required` and `default` tags in source order.
pub fn scan(template: &str) -> Vec<DirectiveSpan<'_>> {
    let bytes = template.as_bytes();
    let mut spans = Vec::new();
    let mut in_raw = false;
    let mut cursor = 0;

    while let Some(offset) = template[cursor..].find('{') {
        let start = cursor + offset;
        let rest = &bytes[start..];

        if rest.starts_with(COMMENT_START.as_bytes()) && !in_raw {
            match find_plain(bytes, start + COMMENT_START.len(), COMMENT_END) {
                Some(end) => cursor = end + COMMENT_END.len(),
                None => break,
            }
        } else if rest.starts_with(EXPRESSION_START.as_bytes()) && !in_raw {
            match find_unquoted(bytes, start + EXPRESSION_START.len(), EXPRESSION_END) {
                Some(end) => cursor = end + EXPRESSION_END.len(),
                None => break,
            }
        } else if rest.starts_with(BLOCK_START.as_bytes()) {
            let inner = start + BLOCK_START.len();
            // An unbalanced quote, as in a bare `don't`, falls back to the first `%}`.
            let Some(end) = find_unquoted(bytes, inner, BLOCK_END)
                .or_else(|| find_plain(bytes, inner, BLOCK_END))
            else {
                break;
            };
            let stop = end + BLOCK_END.len();
            let body = tag_body(&template[inner..end]);
            let keyword = body.split_whitespace().next().unwrap_or_default();

            if in_raw {
                in_raw = keyword != END_RAW;
            } else if keyword == RAW {
                in_raw = true;
            } else if keyword == REQUIRED || keyword == DEFAULT {
                spans.push(DirectiveSpan { range: start..stop, source: &template[start..stop], body });
            }
            cursor = stop;
        } else {
            cursor = start + 1;
        }
    }

    spans
}

/// Strips whitespace-control markers (`-`, `+`) and surrounding whitespace.
fn tag_body(inner: &str) -> &str {
    let inner = inner.strip_prefix(['-', '+']).unwrap_or(inner);
    let inner = inner.strip_suffix(['-', '+']).unwrap_or(inner);
    inner.trim()
}

fn find_plain(bytes: &[u8], from: usize, needle: &str) -> Option<usize> {
    let needle = needle.as_bytes();
    (from..bytes.len()).find(|&i| bytes[i..].starts_with(needle))
}

/// Finds `needle` outside of quoted strings. Backticks count as quotes so
/// that command defaults may contain `%}`.
fn find_unquoted(bytes: &[u8], from: usize, needle: &str) -> Option<usize> {
    let needle = needle.as_bytes();
    let mut quote: Option<u8> = None;
    let mut i = from;

    while i < bytes.len() {
        let b = bytes[i];
        match quote {
            Some(_) if b == b'\\' => {
                i += 2;
                continue;
            }
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None if matches!(b, b'"' | b'\'' | b'`') => quote = Some(b),
            None if bytes[i..].starts_with(needle) => return Some(i),
            None => {}
        }
        i += 1;
    }

    None
}
