//! # serde_wson
//!
//! A parser, serializer and Serde integration for WSON, a JSON-like notation with
//! comments, unquoted keys, two key separators and native date, datetime and
//! version literals.
//!
//! ## What does WSON look like?
//!
//! ```text
//! {
//!     // line comments start with // or #
//!     status = "success",
//!     code: 200,
//!     released = 2024-10-09,
//!     updated = 2024-10-09 12:30:00,
//!     version = 1.4.0,
//!     /* block comments
//!        span lines */
//!     user = { id = 123, name = "John Doe" },
//!     tags = ["admin", "dev"]
//! }
//! ```
//!
//! - A document is a single object wrapped in `{ }`.
//! - Keys are bare text; `=` and `:` both separate a key from its value.
//! - Strings are double-quoted and taken verbatim; there are no escape sequences.
//! - `true`/`false`/`null` are case-insensitive.
//! - `1` is an int, `1.0` a float, `1.0.0` a version.
//! - An empty value (`a = ,`) and a key without a separator are both null.
//! - Repeated keys keep the last value.
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_wson::{parse, serialize, Value};
//!
//! let map = parse("{ name = \"Alice\", since: 2021-03-01, roles = [\"admin\"] }").unwrap();
//! assert_eq!(map.get("name"), Some(&Value::from("Alice")));
//! assert!(map.get("since").unwrap().is_date());
//!
//! let text = serialize(&map).unwrap();
//! assert_eq!(parse(&text).unwrap(), map);
//! ```
//!
//! ### With Serde
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_wson::{from_str, to_string, Version};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Package {
//!     name: String,
//!     version: Version,
//!     features: Vec<String>,
//! }
//!
//! let package = Package {
//!     name: "demo".to_string(),
//!     version: "0.3.1".parse().unwrap(),
//!     features: vec!["fast".to_string()],
//! };
//!
//! let text = to_string(&package).unwrap();
//! assert!(text.contains("version = 0.3.1"));
//! assert_eq!(from_str::<Package>(&text).unwrap(), package);
//! ```
//!
//! ## Pipeline
//!
//! Parsing runs in stages: [`strip_comments`] removes comments while keeping the
//! line count, a tokenizer turns the text into delimiters and literal spans,
//! [`split_top_level`] cuts bodies at unnested commas, and [`classify`] decides
//! what each value segment is. Each stage is public so it can be used on its own.
//!
//! ## Logging
//!
//! The crate emits `tracing` events (`debug` per document, `trace` per entry) and
//! installs no subscriber.

pub mod comments;
pub mod de;
pub mod error;
mod lexer;
pub mod macros;
pub mod map;
pub mod options;
pub mod parser;
mod scalar;
pub mod ser;
pub mod split;
pub mod value;

pub use comments::{strip_comments, strip_comments_with_options};
pub use de::Deserializer;
pub use error::{Error, Result};
pub use map::WsonMap;
pub use options::WsonOptions;
pub use parser::classify;
pub use ser::{Serializer, ValueSerializer};
pub use split::split_top_level;
pub use value::{Value, Version};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;

/// Parses a WSON document into an ordered map.
///
/// # Examples
///
/// ```rust
/// use serde_wson::{parse, Value};
///
/// let map = parse("{ a = 1, b: [true, null] }").unwrap();
/// assert_eq!(map.get("a"), Some(&Value::Int(1)));
/// ```
///
/// # Errors
///
/// Returns a parse error with line and column for missing outer braces, unbalanced
/// delimiters, unterminated strings, missing keys and unclassifiable values.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse(text: &str) -> Result<WsonMap> {
    parse_with_options(text, &WsonOptions::default())
}

/// Parses a WSON document with custom options.
///
/// # Examples
///
/// ```rust
/// use serde_wson::{parse_with_options, Value, WsonOptions};
///
/// let options = WsonOptions::new().with_string_aware_comments(true);
/// let map = parse_with_options("{ url = \"http://example.com\" }", &options).unwrap();
/// assert_eq!(map.get("url"), Some(&Value::from("http://example.com")));
/// ```
///
/// # Errors
///
/// See [`parse`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_with_options(text: &str, options: &WsonOptions) -> Result<WsonMap> {
    parser::parse_document(text, options)
}

/// Returns `true` if `text` parses as a WSON document.
///
/// ```rust
/// assert!(serde_wson::validate("{ a = 1 }"));
/// assert!(!serde_wson::validate("{ a = 1"));
/// ```
#[must_use]
pub fn validate(text: &str) -> bool {
    parse(text).is_ok()
}

/// Writes a map as a canonical WSON document.
///
/// # Examples
///
/// ```rust
/// use serde_wson::{serialize, Value, WsonMap};
///
/// let mut map = WsonMap::new();
/// map.insert("a".to_string(), Value::from(1));
/// map.insert("b".to_string(), Value::from("x"));
/// assert_eq!(serialize(&map).unwrap(), "{\n    a = 1,\n\n    b = \"x\"\n}");
/// ```
///
/// # Errors
///
/// Returns [`Error::Serialize`] if any entry cannot be written so that it reads back
/// unchanged.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn serialize(map: &WsonMap) -> Result<String> {
    serialize_with_options(map, WsonOptions::default())
}

/// Writes a map as a WSON document with custom options.
///
/// # Errors
///
/// See [`serialize`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn serialize_with_options(map: &WsonMap, options: WsonOptions) -> Result<String> {
    let mut serializer = Serializer::new(options);
    serializer.serialize_object(map)?;
    Ok(serializer.into_inner())
}

/// Writes an object or array value as WSON text.
///
/// # Errors
///
/// Returns [`Error::Serialize`] for scalars and for anything [`serialize`] refuses.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn serialize_value(value: &Value) -> Result<String> {
    let mut serializer = Serializer::new(WsonOptions::default());
    serializer.serialize_document(value)?;
    Ok(serializer.into_inner())
}

/// Serialize any `T: Serialize` to a WSON string.
///
/// # Examples
///
/// ```rust
/// use serde_wson::to_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let point = Point { x: 1, y: 2 };
/// assert_eq!(to_string(&point).unwrap(), "{\n    x = 1,\n\n    y = 2\n}");
/// ```
///
/// # Errors
///
/// Returns an error if `T` does not serialize to an object or array, or contains
/// values WSON cannot represent.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, WsonOptions::default())
}

/// Serialize any `T: Serialize` to a WSON string with custom options.
///
/// # Examples
///
/// ```rust
/// use serde_wson::{to_string_with_options, WsonOptions};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let text = to_string_with_options(&Point { x: 1, y: 2 }, WsonOptions::new().with_indent(2)).unwrap();
/// assert_eq!(text, "{\n  x = 1,\n\n  y = 2\n}");
/// ```
///
/// # Errors
///
/// See [`to_string`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: WsonOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let mut serializer = Serializer::new(options);
    serializer.serialize_document(&to_value(value)?)?;
    Ok(serializer.into_inner())
}

/// Convert any `T: Serialize` to a [`Value`].
///
/// # Examples
///
/// ```rust
/// use serde_wson::{to_value, Value};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(value.get("x"), Some(&Value::Int(1)));
/// ```
///
/// # Errors
///
/// Returns an error for integers beyond `i64` and map keys that are not strings.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

/// Serialize any `T: Serialize` to a writer in WSON format.
///
/// # Examples
///
/// ```rust
/// use serde_wson::to_writer;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &Point { x: 1, y: 2 }).unwrap();
/// assert!(buffer.starts_with(b"{\n"));
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, WsonOptions::default())
}

/// Serialize any `T: Serialize` to a writer in WSON format with custom options.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: WsonOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string_with_options(value, options)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Deserialize an instance of type `T` from a WSON document.
///
/// # Examples
///
/// ```rust
/// use serde_wson::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("{ x = 1, y: 2 }").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the input is not a valid WSON document or cannot be
/// deserialized to type `T`. Parse errors include line and column information.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(Deserializer::from_str(s)?)
}

/// Deserialize an instance of type `T` from an I/O stream of WSON.
///
/// # Examples
///
/// ```rust
/// use serde_wson::from_reader;
/// use serde::Deserialize;
/// use std::io::Cursor;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_reader(Cursor::new(b"{ x = 1, y = 2 }")).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if reading from the reader fails, the input is not valid WSON,
/// or the data cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}

/// Deserialize an instance of type `T` from bytes of WSON text.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, not valid WSON, or cannot be
/// deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}

/// Deserialize an instance of type `T` from a [`Value`].
///
/// # Examples
///
/// ```rust
/// use serde_wson::{from_value, wson};
///
/// let pair: (i64, String) = from_value(wson!([1, "one"])).unwrap();
/// assert_eq!(pair, (1, "one".to_string()));
/// ```
///
/// # Errors
///
/// Returns an error if the value's shape does not match `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(Deserializer::new(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wson;
    use chrono::NaiveDate;
    use serde::Deserialize;

    const SAMPLE: &str = r#"{
    // Response header
    status = "success",
    code: 200,
    message = "Data retrieved successfully",

    /* The user record,
       as stored */
    user = {
        id = 123,
        name = "John Doe",
        email = "john@example.com",
        joined = 2023-01-15,
        last_login = 2024-10-09 08:45:00
    },

    # assignments
    tasks = [
        { id = 1, title = "Review", done = false },
        { id = 2, title = "Deploy", done = TRUE }
    ],

    version = 1.2.0
}"#;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct User {
        id: u32,
        name: String,
        active: bool,
        tags: Vec<String>,
    }

    #[test]
    fn test_sample_document() {
        let map = parse(SAMPLE).unwrap();
        let keys: Vec<_> = map.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec!["status", "code", "message", "user", "tasks", "version"]
        );

        let user = map.get("user").unwrap();
        assert_eq!(
            user.get("joined"),
            Some(&Value::Date(NaiveDate::from_ymd_opt(2023, 1, 15).unwrap()))
        );
        assert!(user.get("last_login").unwrap().is_datetime());

        let tasks = map.get("tasks").and_then(Value::as_array).unwrap();
        assert_eq!(tasks[1].get("done"), Some(&Value::Bool(true)));
        assert_eq!(
            map.get("version").and_then(Value::as_version).map(Version::minor),
            Some(2)
        );
    }

    #[test]
    fn test_sample_round_trip() {
        let map = parse(SAMPLE).unwrap();
        let text = serialize(&map).unwrap();
        assert_eq!(parse(&text).unwrap(), map);
        assert_eq!(serialize(&parse(&text).unwrap()).unwrap(), text);
    }

    #[test]
    fn test_validate() {
        assert!(validate(SAMPLE));
        assert!(validate("{}"));
        assert!(!validate(""));
        assert!(!validate("{ a = [1, 2 }"));
        assert!(!validate("{ a = what is this }"));
    }

    #[test]
    fn test_serialize_value_rejects_scalars() {
        assert!(matches!(
            serialize_value(&Value::from("x")),
            Err(Error::Serialize(_))
        ));
        assert_eq!(serialize_value(&wson!([1])).unwrap(), "[\n    1\n]");
    }

    #[test]
    fn test_serde_round_trip() {
        let user = User {
            id: 123,
            name: "Alice".to_string(),
            active: true,
            tags: vec!["admin".to_string(), "user".to_string()],
        };

        let text = to_string(&user).unwrap();
        let user_back: User = from_str(&text).unwrap();
        assert_eq!(user, user_back);

        let from_bytes: User = from_slice(text.as_bytes()).unwrap();
        assert_eq!(from_bytes, user);
    }

    #[test]
    fn test_to_string_rejects_scalars() {
        assert!(to_string(&5).is_err());
        assert!(to_string(&vec![1, 2]).is_ok());
    }

    #[test]
    fn test_to_writer() {
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &wson!({ "a": 1 })).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "{\n    a = 1\n}");
    }

    #[test]
    fn test_from_value() {
        #[derive(Deserialize, Debug, PartialEq)]
        struct Point {
            x: i32,
            y: i32,
        }

        let point: Point = from_value(wson!({ "x": 1, "y": 2 })).unwrap();
        assert_eq!(point, Point { x: 1, y: 2 });
    }

    #[test]
    fn test_from_slice_invalid_utf8() {
        assert!(from_slice::<User>(&[0xff, 0xfe]).is_err());
    }
}
