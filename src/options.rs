//! Configuration options for WSON parsing and serialization.
//!
//! ## Examples
//!
//! ```rust
//! use serde_wson::{parse_with_options, WsonOptions};
//!
//! // Treat comment markers inside quoted strings as text
//! let options = WsonOptions::new().with_string_aware_comments(true);
//! let map = parse_with_options("{ url = \"http://example.com\" }", &options).unwrap();
//! assert_eq!(map.get("url").and_then(|v| v.as_str()), Some("http://example.com"));
//! ```

/// Configuration options for WSON parsing and serialization.
///
/// # Examples
///
/// ```rust
/// use serde_wson::WsonOptions;
///
/// let options = WsonOptions::new().with_indent(2);
/// assert_eq!(options.indent, 2);
/// assert!(!options.string_aware_comments);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WsonOptions {
    /// Spaces per nesting level in serialized output.
    pub indent: usize,
    /// When set, `//`, `#` and `/*` inside double-quoted spans do not start comments.
    pub string_aware_comments: bool,
}

impl Default for WsonOptions {
    fn default() -> Self {
        WsonOptions {
            indent: 4,
            string_aware_comments: false,
        }
    }
}

impl WsonOptions {
    /// Creates default options (4-space indent, comment markers recognised everywhere).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the indentation width used by the serializer.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Protects comment markers that appear inside quoted strings.
    #[must_use]
    pub fn with_string_aware_comments(mut self, enabled: bool) -> Self {
        self.string_aware_comments = enabled;
        self
    }
}
