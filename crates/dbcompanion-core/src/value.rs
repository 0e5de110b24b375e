//! Dynamic runtime values for handler arguments.
//!
//! Handler arguments arrive untyped at the service boundary, so they are
//! carried as [`Value`] variants and checked by the validator crate before a
//! handler runs. Decimals are canonical decimal text rather than a binary
//! float, preserving scale exactly as written.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::ser::{Serialize, Serializer};

use crate::error::{Error, Result};

/// Pattern for a decimal literal: optional sign, digits with at most one
/// point, optional exponent.
const DECIMAL_PATTERN: &str = r"^[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?$";

/// Compiled decimal pattern, built lazily on first use.
fn decimal_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(DECIMAL_PATTERN).unwrap())
}

/// Validate decimal text and return its canonical form.
///
/// Canonicalization trims surrounding whitespace and strips a redundant
/// leading `+`; the digits are otherwise kept as written so scale survives
/// (`"12.50"` stays `"12.50"`).
pub fn canonical_decimal(text: &str) -> Result<String> {
    let trimmed = text.trim();
    if !decimal_regex().is_match(trimmed) {
        return Err(Error::Decimal(format!("not a decimal literal: {trimmed:?}")));
    }
    Ok(trimmed.strip_prefix('+').unwrap_or(trimmed).to_string())
}

/// A dynamically-typed argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent / null.
    Null,
    /// Boolean.
    Bool(bool),
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit float.
    Float(f64),
    /// Canonical decimal text.
    Decimal(String),
    /// UTF-8 text.
    Text(String),
    /// Ordered list of values.
    List(Vec<Value>),
    /// String-keyed map, used for forwarded aggregate arguments.
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Name of the variant, for log and error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Decimal(_) => "decimal",
            Self::Text(_) => "text",
            Self::List(_) => "list",
            Self::Map(_) => "map",
        }
    }

    /// Whether this is `Value::Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Whether this is a list.
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// As a bool, if that is the variant.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// As an integer, if that is the variant. No coercion.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// As a float, if that is the variant. No coercion.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// As text. `Decimal` also answers here since it is stored as text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) | Self::Decimal(s) => Some(s),
            _ => None,
        }
    }

    /// As a list slice, if that is the variant.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// As a map, if that is the variant.
    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Convert to a canonical decimal value.
    ///
    /// `Decimal` passes through unchanged. `Text` must parse as a decimal
    /// literal. `Int` and finite `Float` render to their decimal text. Every
    /// other variant (including `Null`, `Bool`, and non-finite floats) is an
    /// error.
    pub fn to_decimal(&self) -> Result<Value> {
        match self {
            Self::Decimal(d) => Ok(Self::Decimal(d.clone())),
            Self::Text(s) => canonical_decimal(s).map(Self::Decimal),
            Self::Int(i) => Ok(Self::Decimal(i.to_string())),
            Self::Float(f) if f.is_finite() => Ok(Self::Decimal(format!("{f}"))),
            other => Err(Error::Decimal(format!(
                "cannot convert {} to decimal",
                other.type_name()
            ))),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::List(items)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(entries: BTreeMap<String, Value>) -> Self {
        Self::Map(entries)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Float(f) => serializer.serialize_f64(*f),
            Self::Decimal(s) | Self::Text(s) => serializer.serialize_str(s),
            Self::List(items) => items.serialize(serializer),
            Self::Map(entries) => entries.serialize(serializer),
        }
    }
}
