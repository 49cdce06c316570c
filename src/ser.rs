//! WSON serialization.
//!
//! Two pieces live here:
//!
//! - [`Serializer`] writes a [`Value`] tree as canonical WSON text.
//! - [`ValueSerializer`] is a `serde::Serializer` that turns any `T: Serialize`
//!   into a [`Value`]; [`crate::to_string`] chains the two.
//!
//! ## Canonical Form
//!
//! ```text
//! {
//!     name = "Alice",
//!
//!     tags = [
//!         "admin",
//!         "dev"
//!     ]
//! }
//! ```
//!
//! Object entries are separated by a comma and a blank line, array elements by a
//! comma and a newline, and every nesting level is indented by
//! [`WsonOptions::indent`] spaces. Strings are written verbatim between quotes.
//!
//! The writer refuses anything that would not read back as the same value: NaN and
//! infinite floats, strings or keys that comment stripping would alter or that would
//! not lex as a single literal, sub-second timestamps, and years outside `0..=9999`.
//!
//! ## Direct Serializer Usage
//!
//! ```rust
//! use serde_wson::{Serializer, Value, WsonOptions, wson};
//!
//! let mut serializer = Serializer::new(WsonOptions::new().with_indent(2));
//! serializer.serialize_document(&wson!({ "a": [1, 2] })).unwrap();
//! assert_eq!(serializer.into_inner(), "{\n  a = [\n    1,\n    2\n  ]\n}");
//! ```

use crate::comments::strip_comments_with_options;
use crate::lexer::{tokenize, TokenKind};
use crate::value::{format_float, DATETIME_FORMAT, DATETIME_TOKEN, DATE_FORMAT, DATE_TOKEN, VERSION_TOKEN};
use crate::{Error, Result, Value, WsonMap, WsonOptions};
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use serde::{ser, Serialize};
use tracing::debug;

/// The canonical WSON text writer.
pub struct Serializer {
    output: String,
    options: WsonOptions,
}

impl Serializer {
    pub fn new(options: WsonOptions) -> Self {
        Serializer {
            output: String::with_capacity(256),
            options,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Writes a top-level object or array.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialize`] for a bare scalar or any value that cannot be
    /// written and read back unchanged.
    pub fn serialize_document(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Object(map) => self.serialize_object(map),
            Value::Array(items) => {
                debug!(items = items.len(), "serializing WSON array");
                self.write_array(items, 0)
            }
            other => Err(Error::serialize(format!(
                "a bare {} is not a WSON document",
                other.type_name()
            ))),
        }
    }

    /// Writes `map` as a document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialize`] if any entry cannot be written and read back unchanged.
    pub fn serialize_object(&mut self, map: &WsonMap) -> Result<()> {
        debug!(entries = map.len(), "serializing WSON document");
        self.write_object(map, 0)?;
        debug!(bytes = self.output.len(), "serialized WSON document");
        Ok(())
    }

    fn write_indent(&mut self, depth: usize) {
        for _ in 0..depth * self.options.indent {
            self.output.push(' ');
        }
    }

    fn write_object(&mut self, map: &WsonMap, depth: usize) -> Result<()> {
        self.output.push_str("{\n");
        for (i, (key, value)) in map.iter().enumerate() {
            if i > 0 {
                self.output.push_str(",\n\n");
            }
            self.check_key(key)?;
            self.write_indent(depth + 1);
            self.output.push_str(key);
            self.output.push_str(" = ");
            self.write_value(value, depth + 1)?;
        }
        self.output.push('\n');
        self.write_indent(depth);
        self.output.push('}');
        Ok(())
    }

    fn write_array(&mut self, items: &[Value], depth: usize) -> Result<()> {
        self.output.push_str("[\n");
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.output.push_str(",\n");
            }
            self.write_indent(depth + 1);
            self.write_value(item, depth + 1)?;
        }
        self.output.push('\n');
        self.write_indent(depth);
        self.output.push(']');
        Ok(())
    }

    fn write_value(&mut self, value: &Value, depth: usize) -> Result<()> {
        match value {
            Value::Object(map) => return self.write_object(map, depth),
            Value::Array(items) => return self.write_array(items, depth),
            Value::Null => self.output.push_str("null"),
            Value::Bool(b) => self.output.push_str(if *b { "true" } else { "false" }),
            Value::Int(i) => self.output.push_str(&i.to_string()),
            Value::Float(f) => {
                if !f.is_finite() {
                    return Err(Error::serialize(format!("cannot write non-finite float {}", f)));
                }
                self.output.push_str(&format_float(*f));
            }
            Value::String(s) => {
                let literal = format!("\"{}\"", s);
                self.check_literal(&literal, "string")?;
                self.output.push_str(&literal);
            }
            Value::Date(date) => {
                check_year(date)?;
                self.output.push_str(&date.format(DATE_FORMAT).to_string());
            }
            Value::DateTime(stamp) => {
                check_year(&stamp.date())?;
                if stamp.nanosecond() != 0 {
                    return Err(Error::serialize(format!(
                        "timestamp {} has sub-second precision",
                        stamp
                    )));
                }
                self.output.push_str(&stamp.format(DATETIME_FORMAT).to_string());
            }
            Value::Version(version) => self.output.push_str(&version.to_string()),
        }
        Ok(())
    }

    fn check_key(&self, key: &str) -> Result<()> {
        if key.is_empty() {
            return Err(Error::serialize("object keys cannot be empty"));
        }
        self.check_literal(key, "key")
    }

    /// Text must survive comment stripping and lex as exactly one literal.
    fn check_literal(&self, text: &str, what: &str) -> Result<()> {
        let survives = strip_comments_with_options(text, &self.options) == text;
        let single = matches!(
            tokenize(text).as_deref(),
            Ok([token]) if token.kind == TokenKind::Literal && token.start == 0 && token.end == text.len()
        );
        if survives && single {
            Ok(())
        } else {
            Err(Error::serialize(format!(
                "{} {} cannot be written as WSON text",
                what, text
            )))
        }
    }
}

fn check_year(date: &NaiveDate) -> Result<()> {
    if (0..=9999).contains(&date.year()) {
        Ok(())
    } else {
        Err(Error::serialize(format!(
            "date {} is outside the four-digit year range",
            date
        )))
    }
}

/// A `serde::Serializer` that builds a [`Value`] tree.
pub struct ValueSerializer;

pub struct SerializeVec {
    vec: Vec<Value>,
    variant: Option<&'static str>,
}

pub struct SerializeMap {
    map: WsonMap,
    current_key: Option<String>,
    variant: Option<&'static str>,
}

/// Wraps `value` as `{ variant = value }`, the externally tagged enum layout.
fn tagged(variant: Option<&'static str>, value: Value) -> Value {
    match variant {
        Some(name) => {
            let mut map = WsonMap::with_capacity(1);
            map.insert(name.to_string(), value);
            Value::Object(map)
        }
        None => value,
    }
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeVec;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeMap;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::Int(v as i64))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::Int(v as i64))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::Int(v as i64))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::Int(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::Int(v as i64))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::Int(v as i64))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::Int(v as i64))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        i64::try_from(v)
            .map(Value::Int)
            .map_err(|_| Error::serialize(format!("integer {} does not fit in i64", v)))
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        Ok(Value::Float(v as f64))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::Float(v))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        Ok(Value::Array(v.iter().map(|&b| Value::Int(b as i64)).collect()))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        let text = match value.serialize(self)? {
            Value::String(text) if matches!(name, DATE_TOKEN | DATETIME_TOKEN | VERSION_TOKEN) => {
                text
            }
            other => return Ok(other),
        };
        let restored = match name {
            DATE_TOKEN => NaiveDate::parse_from_str(&text, DATE_FORMAT).map(Value::Date),
            DATETIME_TOKEN => {
                NaiveDateTime::parse_from_str(&text, DATETIME_FORMAT).map(Value::DateTime)
            }
            _ => return text.parse().map(Value::Version),
        };
        restored.map_err(Error::custom)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        Ok(tagged(Some(variant), value.serialize(self)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, None))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(Some(len), None))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(Some(len), None))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeVec> {
        Ok(SerializeVec::new(Some(len), Some(variant)))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap::new(None))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap::new(None))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<SerializeMap> {
        Ok(SerializeMap::new(Some(variant)))
    }
}

impl SerializeVec {
    fn new(len: Option<usize>, variant: Option<&'static str>) -> Self {
        SerializeVec {
            vec: Vec::with_capacity(len.unwrap_or(0)),
            variant,
        }
    }

    fn push<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn finish(self) -> Value {
        tagged(self.variant, Value::Array(self.vec))
    }
}

impl SerializeMap {
    fn new(variant: Option<&'static str>) -> Self {
        SerializeMap {
            map: WsonMap::new(),
            current_key: None,
            variant,
        }
    }

    fn finish(self) -> Value {
        tagged(self.variant, Value::Object(self.map))
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleVariant for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match to_value(key)? {
            Value::String(s) => {
                self.current_key = Some(s);
                Ok(())
            }
            Value::Int(i) => {
                self.current_key = Some(i.to_string());
                Ok(())
            }
            other => Err(Error::serialize(format!(
                "map keys must be strings, found {}",
                other.type_name()
            ))),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.map.insert(key, to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeStructVariant for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    value.serialize(ValueSerializer)
}
