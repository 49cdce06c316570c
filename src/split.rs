//! Depth-aware splitting of object and array bodies.
//!
//! A body is cut at every comma that sits outside any nested `{}` or `[]`. Nested
//! structures stay intact inside their segment, so `1, {b = 2, c = 3}, 4` yields
//! three segments. Delimiters are matched with a stack: a stray closer, a closer of
//! the wrong kind, or an opener left unclosed is a syntax error.
//!
//! ```rust
//! use serde_wson::split_top_level;
//!
//! let segments = split_top_level("1, {b = 2, c = 3}, [4, 5]").unwrap();
//! assert_eq!(segments, vec!["1", "{b = 2, c = 3}", "[4, 5]"]);
//! ```

use crate::lexer::{error_at, span_text, tokenize, Token, TokenKind};
use crate::Result;

/// Splits `span` into its top-level comma-separated segments.
///
/// Empty segments between commas are kept as `""`; a blank trailing segment after
/// the last comma is dropped.
///
/// # Errors
///
/// Returns a syntax error for unbalanced or mismatched delimiters and for
/// unterminated strings.
pub fn split_top_level(span: &str) -> Result<Vec<&str>> {
    let tokens = tokenize(span)?;
    let segments = split_segments(span, &tokens)?;
    Ok(segments
        .into_iter()
        .map(|segment| span_text(span, segment))
        .collect())
}

pub(crate) fn split_segments<'t>(source: &str, tokens: &'t [Token]) -> Result<Vec<&'t [Token]>> {
    let mut segments = Vec::new();
    let mut open: Vec<&Token> = Vec::new();
    let mut start = 0;

    for (i, token) in tokens.iter().enumerate() {
        match token.kind {
            kind if kind.is_open() => open.push(token),
            kind if kind.is_close() => match open.pop() {
                Some(opener) if opener.kind.closer() == Some(kind) => {}
                Some(opener) => {
                    return Err(error_at(
                        source,
                        token,
                        &format!(
                            "mismatched {}: {} opened at line {}, column {} is still open",
                            kind.describe(),
                            opener.kind.describe(),
                            opener.line,
                            opener.column
                        ),
                    ))
                }
                None => {
                    return Err(error_at(
                        source,
                        token,
                        &format!("unexpected {}", kind.describe()),
                    ))
                }
            },
            TokenKind::Comma if open.is_empty() => {
                segments.push(&tokens[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }

    if let Some(opener) = open.last() {
        return Err(error_at(
            source,
            opener,
            &format!("unclosed {}", opener.kind.describe()),
        ));
    }

    if start < tokens.len() {
        segments.push(&tokens[start..]);
    }

    Ok(segments)
}

/// A segment divided at its first unnested `=` or `:`.
pub(crate) struct Entry<'t> {
    pub key: &'t [Token],
    pub separator: Option<&'t Token>,
    pub value: &'t [Token],
}

/// Divides an object segment into key and value. Segments are balanced by the time
/// they get here, so a plain depth counter is enough.
pub(crate) fn split_entry(segment: &[Token]) -> Entry<'_> {
    let mut depth = 0usize;
    for (i, token) in segment.iter().enumerate() {
        match token.kind {
            kind if kind.is_open() => depth += 1,
            kind if kind.is_close() => depth = depth.saturating_sub(1),
            TokenKind::Separator if depth == 0 => {
                return Entry {
                    key: &segment[..i],
                    separator: Some(token),
                    value: &segment[i + 1..],
                }
            }
            _ => {}
        }
    }
    Entry {
        key: segment,
        separator: None,
        value: &[],
    }
}
