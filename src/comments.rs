//! Comment removal.
//!
//! WSON accepts `//` and `#` line comments and `/* ... */` block comments that may
//! span lines. Stripping runs before any parsing and keeps the line count of the
//! input: lines that end up blank are emitted empty instead of being dropped, so
//! error positions still point at source lines.
//!
//! By default the stripper knows nothing about string literals, so a value such as
//! `"http://example.com"` is cut at `//`. Enable
//! [`WsonOptions::string_aware_comments`] to skip markers inside double quotes.
//!
//! ```rust
//! use serde_wson::strip_comments;
//!
//! let text = "code = 200 // the status code\n/* gone\n   too */ next = 1";
//! assert_eq!(strip_comments(text), "code = 200\n\n next = 1");
//! ```

use crate::WsonOptions;
use tracing::debug;

/// Removes comments using the default options.
///
/// Lines left with nothing but whitespace are kept as empty lines rather than
/// dropped, so the output has exactly as many lines as the input.
#[must_use]
pub fn strip_comments(text: &str) -> String {
    strip_comments_with_options(text, &WsonOptions::default())
}

/// Removes comments, honouring [`WsonOptions::string_aware_comments`].
///
/// Like [`strip_comments`], emptied lines stay in the output as empty lines.
#[must_use]
pub fn strip_comments_with_options(text: &str, options: &WsonOptions) -> String {
    let mut in_block_comment = false;
    let mut cleaned = Vec::new();

    for line in text.lines() {
        let without_blocks = strip_block_comments(line, &mut in_block_comment, options);
        let code = match find_line_comment(&without_blocks, options.string_aware_comments) {
            Some(index) => &without_blocks[..index],
            None => without_blocks.as_str(),
        };
        cleaned.push(code.trim_end().to_string());
    }

    if in_block_comment {
        debug!("block comment still open at end of input");
    }

    cleaned.join("\n")
}

/// Resolves `/* ... */` spans on one line, carrying open-comment state across lines.
fn strip_block_comments(line: &str, in_block_comment: &mut bool, options: &WsonOptions) -> String {
    let mut rest = line;

    if *in_block_comment {
        match rest.find("*/") {
            Some(end) => {
                rest = &rest[end + 2..];
                *in_block_comment = false;
            }
            None => return String::new(),
        }
    }

    let mut kept = String::with_capacity(rest.len());
    while let Some(start) = find_unquoted(rest, "/*", options.string_aware_comments, false) {
        kept.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("*/") {
            Some(end) => rest = &after[end + 2..],
            None => {
                *in_block_comment = true;
                return kept;
            }
        }
    }
    kept.push_str(rest);
    kept
}

/// Byte index of the earliest unescaped `//` or `#`.
fn find_line_comment(line: &str, string_aware: bool) -> Option<usize> {
    let slashes = find_unquoted(line, "//", string_aware, true);
    let hash = find_unquoted(line, "#", string_aware, true);
    match (slashes, hash) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

/// Quotes are tracked the way the lexer reads them: nothing inside a string is
/// escaped, and a backslash outside one shields the next byte unless it is a quote.
fn find_unquoted(text: &str, marker: &str, string_aware: bool, honour_escapes: bool) -> Option<usize> {
    let bytes = text.as_bytes();
    let marker = marker.as_bytes();
    let mut in_quotes = false;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'"' if string_aware => in_quotes = !in_quotes,
            b'\\' if honour_escapes && !in_quotes => {
                if bytes.get(i + 1).is_some_and(|&next| next != b'"') {
                    i += 1;
                }
            }
            _ if !in_quotes && bytes[i..].starts_with(marker) => return Some(i),
            _ => {}
        }
        i += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_comments() {
        assert_eq!(strip_comments("code = 200 // the status code"), "code = 200");
        assert_eq!(strip_comments("code = 200 # the status code"), "code = 200");
        assert_eq!(strip_comments("a = 1 # x // y"), "a = 1");
        assert_eq!(strip_comments("a = 1 // x # y"), "a = 1");
    }

    #[test]
    fn test_line_count_preserved() {
        let text = "{\n// only a comment\n\n  a = 1\n}";
        let stripped = strip_comments(text);
        assert_eq!(stripped.lines().count(), text.lines().count());
        assert_eq!(stripped, "{\n\n\n  a = 1\n}");
    }

    #[test]
    fn test_inline_block_comment() {
        assert_eq!(strip_comments("a = /* one */ 1 /* two */"), "a =  1");
    }

    #[test]
    fn test_multi_line_block_comment() {
        let text = "a = 1,\n/* start\n   b = 2,\n end */ c = 3";
        assert_eq!(strip_comments(text), "a = 1,\n\n\n c = 3");
    }

    #[test]
    fn test_unterminated_block_drops_rest() {
        assert_eq!(strip_comments("a = 1 /* never\nb = 2"), "a = 1\n");
    }

    #[test]
    fn test_block_resolved_before_line_markers() {
        assert_eq!(strip_comments("a = /* # */ 1"), "a =  1");
        // An opening block marker after `//` still opens a block.
        assert_eq!(strip_comments("a = 1 // see /* note\nb = 2\n*/ c = 3"), "a = 1\n\n c = 3");
    }

    #[test]
    fn test_escaped_markers_survive() {
        assert_eq!(strip_comments(r"tag = \#1"), r"tag = \#1");
    }

    #[test]
    fn test_markers_inside_strings_not_protected_by_default() {
        assert_eq!(strip_comments("url = \"http://example.com\""), "url = \"http:");
    }

    #[test]
    fn test_string_aware_mode() {
        let options = WsonOptions::new().with_string_aware_comments(true);
        assert_eq!(
            strip_comments_with_options("url = \"http://x.io/#top\" // link", &options),
            "url = \"http://x.io/#top\""
        );
        assert_eq!(
            strip_comments_with_options("s = \"/* kept */\" /* gone */", &options),
            "s = \"/* kept */\""
        );
    }

    #[test]
    fn test_string_aware_backslash_does_not_escape_quote() {
        let options = WsonOptions::new().with_string_aware_comments(true);
        assert_eq!(
            strip_comments_with_options("path = \"C:\\\", // note", &options),
            "path = \"C:\\\","
        );
        assert_eq!(
            strip_comments_with_options("x\"\\\" = \"a//b\" // c", &options),
            "x\"\\\" = \"a//b\""
        );
        assert_eq!(
            strip_comments_with_options(r"tag = \#1 # c", &options),
            r"tag = \#1"
        );
    }
}
