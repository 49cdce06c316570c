//! Tokenizer for comment-free WSON text.
//!
//! The lexer turns text into a flat stream of delimiters (`{ } [ ] ,`), key
//! separators (`=` or `:`) and literal spans. A literal is a maximal run of
//! everything else with surrounding whitespace trimmed; double-quoted spans inside a
//! literal are opaque, so `"a, {b}"` is one literal. Tokens keep byte offsets into
//! the source, which lets the parser slice out raw segment text such as
//! `2024-10-09 12:30:00` even though it contains separator characters.

use crate::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TokenKind {
    OpenBrace,
    CloseBrace,
    OpenBracket,
    CloseBracket,
    Comma,
    Separator,
    Literal,
}

impl TokenKind {
    pub(crate) fn is_open(self) -> bool {
        matches!(self, TokenKind::OpenBrace | TokenKind::OpenBracket)
    }

    pub(crate) fn is_close(self) -> bool {
        matches!(self, TokenKind::CloseBrace | TokenKind::CloseBracket)
    }

    /// The closing kind that matches an opening kind.
    pub(crate) fn closer(self) -> Option<TokenKind> {
        match self {
            TokenKind::OpenBrace => Some(TokenKind::CloseBrace),
            TokenKind::OpenBracket => Some(TokenKind::CloseBracket),
            _ => None,
        }
    }

    pub(crate) fn describe(self) -> &'static str {
        match self {
            TokenKind::OpenBrace => "'{'",
            TokenKind::CloseBrace => "'}'",
            TokenKind::OpenBracket => "'['",
            TokenKind::CloseBracket => "']'",
            TokenKind::Comma => "','",
            TokenKind::Separator => "separator",
            TokenKind::Literal => "literal",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub(crate) fn text<'s>(&self, source: &'s str) -> &'s str {
        &source[self.start..self.end]
    }
}

/// Raw text covered by a run of tokens, from the first token's start to the last one's end.
pub(crate) fn span_text<'s>(source: &'s str, tokens: &[Token]) -> &'s str {
    match (tokens.first(), tokens.last()) {
        (Some(first), Some(last)) => &source[first.start..last.end],
        _ => "",
    }
}

/// Builds a syntax error pointing at `token`, quoting its source line.
pub(crate) fn error_at(source: &str, token: &Token, msg: &str) -> Error {
    let line = source.lines().nth(token.line - 1).unwrap_or("");
    Error::syntax_with_context(token.line, token.column, msg, line)
}

pub(crate) fn tokenize(input: &str) -> Result<Vec<Token>> {
    Lexer::new(input).tokenize()
}

struct Lexer<'a> {
    input: &'a str,
    position: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Lexer {
            input,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.position += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek_char() {
            if ch.is_whitespace() {
                self.next_char();
            } else {
                break;
            }
        }
    }

    fn tokenize(mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();
            let (start, line, column) = (self.position, self.line, self.column);
            let Some(ch) = self.peek_char() else {
                break;
            };

            let kind = match ch {
                '{' => TokenKind::OpenBrace,
                '}' => TokenKind::CloseBrace,
                '[' => TokenKind::OpenBracket,
                ']' => TokenKind::CloseBracket,
                ',' => TokenKind::Comma,
                '=' | ':' => TokenKind::Separator,
                _ => {
                    let end = self.scan_literal()?;
                    tokens.push(Token {
                        kind: TokenKind::Literal,
                        start,
                        end,
                        line,
                        column,
                    });
                    continue;
                }
            };

            self.next_char();
            tokens.push(Token {
                kind,
                start,
                end: self.position,
                line,
                column,
            });
        }

        Ok(tokens)
    }

    /// Consumes a literal and returns its end offset with trailing whitespace excluded.
    fn scan_literal(&mut self) -> Result<usize> {
        let mut end = self.position;
        while let Some(ch) = self.peek_char() {
            match ch {
                '{' | '}' | '[' | ']' | ',' | '=' | ':' => break,
                '"' => {
                    self.scan_quoted()?;
                    end = self.position;
                }
                c if c.is_whitespace() => {
                    self.next_char();
                }
                _ => {
                    self.next_char();
                    end = self.position;
                }
            }
        }
        Ok(end)
    }

    fn scan_quoted(&mut self) -> Result<()> {
        let (line, column) = (self.line, self.column);
        self.next_char();
        while let Some(ch) = self.next_char() {
            if ch == '"' {
                return Ok(());
            }
        }
        let source_line = self.input.lines().nth(line - 1).unwrap_or("");
        Err(Error::syntax_with_context(
            line,
            column,
            "unterminated string literal",
            source_line,
        ))
    }
}
