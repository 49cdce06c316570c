//! Structure building: recursive descent over token slices.
//!
//! A document is one `{ ... }` object. Each object or array body is split into
//! top-level segments; object segments are divided into key and value at their
//! first unnested separator. A value segment that opens with `{` or `[` and ends
//! with the matching closer recurses; anything else is classified as a scalar.

use crate::comments::strip_comments_with_options;
use crate::lexer::{error_at, span_text, tokenize, Token, TokenKind};
use crate::scalar::classify_scalar;
use crate::split::{split_entry, split_segments};
use crate::{Error, Result, Value, WsonMap, WsonOptions};
use tracing::{debug, trace};

/// Deepest nesting accepted before parsing gives up.
const MAX_DEPTH: usize = 128;

const BRACES_REQUIRED: &str = "WSON document must start and end with curly braces";

/// Parses a complete document: strips comments, then builds the top-level object.
pub(crate) fn parse_document(text: &str, options: &WsonOptions) -> Result<WsonMap> {
    debug!(bytes = text.len(), "parsing WSON document");
    let stripped = strip_comments_with_options(text, options);
    let parser = Parser::new(&stripped)?;
    let map = parser.document()?;
    debug!(entries = map.len(), "parsed WSON document");
    Ok(map)
}

/// Classifies a single segment, which may itself be an object or array.
///
/// # Examples
///
/// ```rust
/// use serde_wson::{classify, Value};
///
/// assert_eq!(classify("  42 ").unwrap(), Value::Int(42));
/// assert!(classify("[1, {b = 2, c = 3}, 4]").unwrap().is_array());
/// assert!(classify("not a literal").is_err());
/// ```
///
/// # Errors
///
/// Returns an error if no classification rule matches or a nested structure is malformed.
pub fn classify(segment: &str) -> Result<Value> {
    let parser = Parser::new(segment)?;
    parser.value(&parser.tokens, 0)
}

struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Result<Self> {
        Ok(Parser {
            source,
            tokens: tokenize(source)?,
        })
    }

    fn document(&self) -> Result<WsonMap> {
        let tokens = &self.tokens[..];
        match (tokens.first(), tokens.last()) {
            (None, _) | (_, None) => Err(Error::syntax(1, 1, BRACES_REQUIRED)),
            (Some(first), _) if first.kind != TokenKind::OpenBrace => {
                Err(error_at(self.source, first, BRACES_REQUIRED))
            }
            (_, Some(last)) if last.kind != TokenKind::CloseBrace => {
                Err(error_at(self.source, last, BRACES_REQUIRED))
            }
            _ => self.object(tokens, 0),
        }
    }

    /// `tokens` runs from an opening `{` to a closing `}` inclusive.
    fn object(&self, tokens: &[Token], depth: usize) -> Result<WsonMap> {
        self.check_depth(&tokens[0], depth)?;
        let body = &tokens[1..tokens.len() - 1];
        let mut map = WsonMap::new();

        for segment in split_segments(self.source, body)? {
            if segment.is_empty() {
                continue;
            }
            let entry = split_entry(segment);
            let key = self.key(entry.key, entry.separator)?;
            let value = self.value(entry.value, depth + 1)?;
            trace!(key, kind = value.type_name(), "object entry");
            map.insert(key.to_string(), value);
        }

        Ok(map)
    }

    /// `tokens` runs from an opening `[` to a closing `]` inclusive.
    fn array(&self, tokens: &[Token], depth: usize) -> Result<Vec<Value>> {
        self.check_depth(&tokens[0], depth)?;
        let body = &tokens[1..tokens.len() - 1];
        split_segments(self.source, body)?
            .into_iter()
            .map(|segment| self.value(segment, depth + 1))
            .collect()
    }

    fn key(&self, tokens: &[Token], separator: Option<&Token>) -> Result<&'a str> {
        match tokens {
            [token] if token.kind == TokenKind::Literal => Ok(token.text(self.source)),
            [] => match separator {
                Some(token) => Err(error_at(self.source, token, "missing key before separator")),
                None => Err(Error::syntax(1, 1, "missing key")),
            },
            [first, ..] => Err(error_at(
                self.source,
                first,
                &format!("invalid key '{}'", span_text(self.source, tokens)),
            )),
        }
    }

    fn value(&self, tokens: &[Token], depth: usize) -> Result<Value> {
        let (Some(first), Some(last)) = (tokens.first(), tokens.last()) else {
            return Ok(Value::Null);
        };

        if tokens.iter().any(|t| t.kind.is_open() || t.kind.is_close()) {
            return match (first.kind, last.kind) {
                (TokenKind::OpenBrace, TokenKind::CloseBrace) => {
                    self.object(tokens, depth).map(Value::Object)
                }
                (TokenKind::OpenBracket, TokenKind::CloseBracket) => {
                    self.array(tokens, depth).map(Value::Array)
                }
                _ => Err(Error::invalid_value(
                    first.line,
                    first.column,
                    span_text(self.source, tokens),
                )),
            };
        }

        let text = span_text(self.source, tokens);
        let value = classify_scalar(text, first.line, first.column)?
            .ok_or_else(|| Error::invalid_value(first.line, first.column, text))?;
        trace!(segment = text, kind = value.type_name(), "classified segment");
        Ok(value)
    }

    fn check_depth(&self, opener: &Token, depth: usize) -> Result<()> {
        if depth >= MAX_DEPTH {
            Err(error_at(
                self.source,
                opener,
                &format!("nesting deeper than {} levels", MAX_DEPTH),
            ))
        } else {
            Ok(())
        }
    }
}
