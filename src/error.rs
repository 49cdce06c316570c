//! Error types for WSON parsing and serialization.
//!
//! Parsing is all-or-nothing: the first problem aborts the whole document and is
//! reported as one [`Error`] carrying the line and column where it was detected.
//!
//! ## Error Categories
//!
//! - **Syntax Errors**: missing braces, unbalanced or mismatched delimiters, unterminated strings
//! - **Invalid Values**: a segment that matches none of the literal rules
//! - **Out of Range**: a literal with the right shape but an impossible value (`2024-13-40`)
//! - **Serialize Errors**: values that cannot be written as WSON and read back unchanged
//!
//! Line and column numbers refer to the comment-stripped text. Stripping keeps the
//! line count, so lines match the source; columns are shifted only on lines where an
//! inline `/* ... */` comment was removed.
//!
//! ## Examples
//!
//! ```rust
//! use serde_wson::{parse, Error};
//!
//! let result = parse("{ a = [1, 2 }");
//! assert!(result.is_err());
//!
//! if let Err(err) = result {
//!     assert!(err.is_parse());
//!     assert_eq!(err.line(), Some(1));
//! }
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur during WSON parsing and serialization.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Structural error with the offending source line as context
    #[error("Syntax error at line {line}, column {col}: {msg}{context}")]
    Syntax {
        line: usize,
        col: usize,
        msg: String,
        context: String,
    },

    /// A segment that no literal rule accepts
    #[error("Invalid value at line {line}, column {col}: {segment}")]
    InvalidValue {
        line: usize,
        col: usize,
        segment: String,
    },

    /// A literal whose shape matched but whose value does not fit
    #[error("Value out of range at line {line}, column {col}: {msg}")]
    OutOfRange { line: usize, col: usize, msg: String },

    /// A value that cannot be written as WSON
    #[error("Serialize error: {0}")]
    Serialize(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a syntax error with line and column information.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_wson::Error;
    ///
    /// let err = Error::syntax(10, 5, "unexpected '}'");
    /// assert!(err.to_string().contains("line 10"));
    /// ```
    pub fn syntax(line: usize, col: usize, msg: &str) -> Self {
        Error::Syntax {
            line,
            col,
            msg: msg.to_string(),
            context: String::new(),
        }
    }

    /// Creates a syntax error that quotes the source line it was found on.
    pub fn syntax_with_context(line: usize, col: usize, msg: &str, source_line: &str) -> Self {
        let context = if source_line.trim().is_empty() {
            String::new()
        } else {
            format!("\n  {}\n  {}^", source_line, " ".repeat(col.saturating_sub(1)))
        };
        Error::Syntax {
            line,
            col,
            msg: msg.to_string(),
            context,
        }
    }

    /// Creates an error for a segment that matches no literal rule.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_wson::Error;
    ///
    /// let err = Error::invalid_value(3, 12, "yes please");
    /// assert!(err.to_string().contains("yes please"));
    /// ```
    pub fn invalid_value(line: usize, col: usize, segment: &str) -> Self {
        Error::InvalidValue {
            line,
            col,
            segment: segment.to_string(),
        }
    }

    pub fn out_of_range(line: usize, col: usize, msg: &str) -> Self {
        Error::OutOfRange {
            line,
            col,
            msg: msg.to_string(),
        }
    }

    /// Creates a serialize error for values WSON cannot represent.
    pub fn serialize<T: fmt::Display>(msg: T) -> Self {
        Error::Serialize(msg.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_wson::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reader/writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns the 1-based line of a parse failure, if known.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Syntax { line, .. }
            | Error::InvalidValue { line, .. }
            | Error::OutOfRange { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Returns the 1-based column of a parse failure, if known.
    #[must_use]
    pub fn column(&self) -> Option<usize> {
        match self {
            Error::Syntax { col, .. }
            | Error::InvalidValue { col, .. }
            | Error::OutOfRange { col, .. } => Some(*col),
            _ => None,
        }
    }

    /// Returns `true` if this error came from parsing WSON text.
    #[must_use]
    pub fn is_parse(&self) -> bool {
        self.line().is_some()
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
