//! # Scalar Values
//!
//! Typed scalars produced by coercing Timestream's textual cells.
//!
//! Timestream returns every scalar cell as text alongside a declared column
//! type. The bridge only understands four of those types; every other tag is
//! rejected when a non-null cell of that type is coerced.
//!
//! ```rust,ignore
//! use timestream_bridge::value::{ScalarType, ScalarValue};
//!
//! let ty: ScalarType = "BIGINT".parse()?;
//! assert_eq!(ty.coerce("42")?, ScalarValue::Integer(42));
//! ```

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Textual layout of Timestream `TIMESTAMP` cells. The fraction is optional
/// and may carry up to nanosecond precision.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Declared column types the bridge can coerce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    BigInt,
    Varchar,
    Double,
    Timestamp,
}

impl ScalarType {
    /// Service tag for this type
    pub fn as_str(self) -> &'static str {
        match self {
            ScalarType::BigInt => "BIGINT",
            ScalarType::Varchar => "VARCHAR",
            ScalarType::Double => "DOUBLE",
            ScalarType::Timestamp => "TIMESTAMP",
        }
    }

    /// Coerce a non-null cell into a typed value.
    ///
    /// Numeric coercion is lenient: the leading numeric part of the text is
    /// used and text without one becomes zero. Only timestamps can fail.
    pub fn coerce(self, value: &str) -> Result<ScalarValue> {
        match self {
            ScalarType::BigInt => Ok(ScalarValue::Integer(parse_integer(value))),
            ScalarType::Varchar => Ok(ScalarValue::Text(value.to_string())),
            ScalarType::Double => Ok(ScalarValue::Float(parse_float(value))),
            ScalarType::Timestamp => parse_timestamp(value)
                .map(ScalarValue::Timestamp)
                .ok_or_else(|| Error::MalformedScalar {
                    scalar_type: self.as_str().to_string(),
                    value: value.to_string(),
                }),
        }
    }
}

impl FromStr for ScalarType {
    type Err = Error;

    fn from_str(tag: &str) -> Result<Self> {
        match tag {
            "BIGINT" => Ok(ScalarType::BigInt),
            "VARCHAR" => Ok(ScalarType::Varchar),
            "DOUBLE" => Ok(ScalarType::Double),
            "TIMESTAMP" => Ok(ScalarType::Timestamp),
            other => Err(Error::UnknownScalarType {
                scalar_type: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a Timestream timestamp cell (`2024-01-02 03:04:05.123000000`) as UTC.
///
/// Fractions shorter than nine digits are zero-padded; longer ones are
/// truncated to nanoseconds.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value.trim(), TIMESTAMP_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Longest leading slice of `text` that reads as a decimal number
/// (`-12`, `4.5`, `1e3`), or `""` when it does not start with one.
fn numeric_prefix(text: &str) -> &str {
    let bytes = text.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut has_digits = int_end > end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        has_digits |= frac_end > end + 1;
        end = frac_end;
    }
    if !has_digits {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }
    &text[..end]
}

/// `BIGINT` cell text as an integer; fractional text is truncated
pub fn parse_integer(value: &str) -> i64 {
    let text = value.trim();
    if let Ok(v) = text.parse::<i64>() {
        return v;
    }
    let prefix = numeric_prefix(text);
    prefix
        .parse::<i64>()
        .unwrap_or_else(|_| prefix.parse::<f64>().map_or(0, |f| f as i64))
}

/// `DOUBLE` cell text as a float, accepting the service's `NaN` and
/// `Infinity` spellings
pub fn parse_float(value: &str) -> f64 {
    let text = value.trim();
    text.parse::<f64>()
        .or_else(|_| numeric_prefix(text).parse::<f64>())
        .unwrap_or(0.0)
}

/// A coerced cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    /// `BIGINT`
    Integer(i64),
    /// `VARCHAR`
    Text(String),
    /// `DOUBLE`
    Float(f64),
    /// `TIMESTAMP`, always UTC
    Timestamp(DateTime<Utc>),
    /// Null cell of any declared type
    Null,
}

impl ScalarValue {
    /// Check if this value is null
    pub fn is_null(&self) -> bool {
        matches!(self, ScalarValue::Null)
    }

    /// Declared type this value was coerced from, `None` for null
    pub fn scalar_type(&self) -> Option<ScalarType> {
        match self {
            ScalarValue::Integer(_) => Some(ScalarType::BigInt),
            ScalarValue::Text(_) => Some(ScalarType::Varchar),
            ScalarValue::Float(_) => Some(ScalarType::Double),
            ScalarValue::Timestamp(_) => Some(ScalarType::Timestamp),
            ScalarValue::Null => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ScalarValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ScalarValue::Float(v) => Some(*v),
            ScalarValue::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ScalarValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            ScalarValue::Timestamp(t) => Some(*t),
            _ => None,
        }
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Integer(v) => write!(f, "{v}"),
            ScalarValue::Text(s) => write!(f, "\"{s}\""),
            ScalarValue::Float(v) => write!(f, "{v}"),
            ScalarValue::Timestamp(t) => write!(f, "{}", t.format("%Y-%m-%d %H:%M:%S%.f")),
            ScalarValue::Null => write!(f, "NULL"),
        }
    }
}

impl Serialize for ScalarValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            ScalarValue::Integer(v) => serializer.serialize_i64(*v),
            ScalarValue::Text(s) => serializer.serialize_str(s),
            ScalarValue::Float(v) => serializer.serialize_f64(*v),
            ScalarValue::Timestamp(t) => t.serialize(serializer),
            ScalarValue::Null => serializer.serialize_unit(),
        }
    }
}

impl From<i64> for ScalarValue {
    fn from(v: i64) -> Self {
        ScalarValue::Integer(v)
    }
}

impl From<f64> for ScalarValue {
    fn from(v: f64) -> Self {
        ScalarValue::Float(v)
    }
}

impl From<&str> for ScalarValue {
    fn from(v: &str) -> Self {
        ScalarValue::Text(v.to_string())
    }
}

impl From<String> for ScalarValue {
    fn from(v: String) -> Self {
        ScalarValue::Text(v)
    }
}

impl From<DateTime<Utc>> for ScalarValue {
    fn from(v: DateTime<Utc>) -> Self {
        ScalarValue::Timestamp(v)
    }
}
