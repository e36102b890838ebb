//! The built-in structured value.
//!
//! [`Value`] is a JSON-shaped tagged union that implements both [`InMap`] and
//! [`OutMap`], so typed values can be mapped without pulling in any other
//! backend. Integers and floating point numbers are kept apart, which lets
//! `15` and `32.0` survive a round trip with their kinds intact.
use alloc::{borrow::ToOwned, collections::BTreeMap, string::String, vec::Vec};
use core::fmt::{self, Write as _};

use crate::{InMap, MappingIndex, OutMap, SetError};

/// Keyed entries of a [`Value::Object`], ordered by key.
pub type Map = BTreeMap<String, Value>;
/// Elements of a [`Value::Array`].
pub type Array = Vec<Value>;

/// A JSON-like structured value.
///
/// # Examples
///
/// ```
/// use cartograph::{Map, Value};
///
/// let mut map = Map::new();
/// map.insert("int".to_string(), Value::Integer(15));
/// map.insert("string".to_string(), Value::String("Hello".into()));
/// let v = Value::Object(map);
/// assert_eq!(v.to_string(), r#"{"int":15,"string":"Hello"}"#);
/// ```
// Deserializes from plain JSON in tests; downstream crates opt in with the
// `serde` feature.
#[cfg_attr(
    any(test, feature = "serde"),
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// Absence of a value; reads treat it like a missing key.
    #[default]
    Null,
    /// `true` or `false`.
    Boolean(bool),
    /// Whole numbers. Kept apart from [`Number`](Value::Number).
    Integer(i64),
    /// Floating point numbers.
    Number(f64),
    /// UTF-8 text.
    String(String),
    /// Ordered elements.
    Array(Array),
    /// String-keyed entries. The blank destination is an empty object.
    Object(Map),
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::Array(v)
    }
}

impl From<Map> for Value {
    fn from(v: Map) -> Self {
        Self::Object(v)
    }
}

impl Value {
    /// Returns `true` if the value is [`Null`](Value::Null).
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if the value is [`Boolean`](Value::Boolean).
    #[must_use]
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Boolean(..))
    }

    /// Returns `true` if the value is an [`Integer`](Value::Integer) or a
    /// [`Number`](Value::Number).
    ///
    /// ```
    /// use cartograph::Value;
    ///
    /// assert!(Value::Integer(42).is_number());
    /// assert!(Value::Number(0.5).is_number());
    /// assert!(!Value::Null.is_number());
    /// ```
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Integer(..) | Self::Number(..))
    }

    /// Returns `true` if the value is a [`String`](Value::String).
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(..))
    }

    /// Returns `true` if the value is an [`Array`](Value::Array).
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(..))
    }

    /// Returns `true` if the value is an [`Object`](Value::Object).
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(..))
    }
}

impl InMap for Value {
    fn get(&self, index: &MappingIndex) -> Option<&Self> {
        match self {
            Self::Object(map) => map.get(index.as_str()),
            Self::Array(items) => index.as_array_index().and_then(|i| items.get(i)),
            _ => None,
        }
    }

    fn as_array(&self) -> Option<&[Self]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    fn as_int(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn as_double(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    fn is_null(&self) -> bool {
        Value::is_null(self)
    }
}

impl OutMap for Value {
    fn blank() -> Self {
        Self::Object(Map::new())
    }

    fn set(&mut self, value: Option<Self>, index: &MappingIndex) -> Result<(), SetError> {
        let Some(value) = value else {
            return Ok(());
        };
        match self {
            Self::Object(map) => {
                map.insert(index.as_str().to_owned(), value);
                Ok(())
            }
            _ => Err(SetError::IncompatibleShape {
                index: index.clone(),
            }),
        }
    }

    fn from_array(items: Vec<Self>) -> Option<Self> {
        Some(Self::Array(items))
    }

    fn from_int(value: i64) -> Option<Self> {
        Some(Self::Integer(value))
    }

    fn from_double(value: f64) -> Option<Self> {
        Some(Self::Number(value))
    }

    fn from_bool(value: bool) -> Option<Self> {
        Some(Self::Boolean(value))
    }

    fn from_string(value: String) -> Option<Self> {
        Some(Self::String(value))
    }
}

#[cfg(feature = "json")]
impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Boolean(b),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map(Self::Integer)
                .or_else(|| n.as_f64().map(Self::Number))
                .unwrap_or(Self::Null),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

#[cfg(feature = "json")]
impl From<Value> for serde_json::Value {
    fn from(v: Value) -> Self {
        match v {
            Value::Null => Self::Null,
            Value::Boolean(b) => Self::Bool(b),
            Value::Integer(i) => Self::Number(i.into()),
            // Non-finite numbers have no JSON form.
            Value::Number(n) => serde_json::Number::from_f64(n).map_or(Self::Null, Self::Number),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

/// Writes `src` with the characters JSON requires escaped.
pub(crate) fn write_escaped_string<W: fmt::Write>(src: &str, f: &mut W) -> fmt::Result {
    for c in src.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\u{2028}' | '\u{2029}' => write!(f, "\\u{:04X}", c as u32)?,
            c if c.is_control() && (c as u32) <= 0xFFFF => write!(f, "\\u{:04X}", c as u32)?,
            _ => f.write_char(c)?,
        }
    }
    Ok(())
}

impl fmt::Display for Value {
    #[allow(clippy::float_cmp)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Integer(i) => write!(f, "{i}"),
            // Non-finite numbers have no JSON form; whole numbers keep a
            // fraction so they read back as `Number`.
            Value::Number(n) if !n.is_finite() => f.write_str("null"),
            Value::Number(n) if *n % 1.0 == 0.0 => write!(f, "{n}.0"),
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => {
                f.write_char('"')?;
                write_escaped_string(s, f)?;
                f.write_char('"')
            }
            Value::Array(items) => {
                f.write_char('[')?;
                for (i, v) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    write!(f, "{v}")?;
                }
                f.write_char(']')
            }
            Value::Object(map) => {
                f.write_char('{')?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    f.write_char('"')?;
                    write_escaped_string(k, f)?;
                    write!(f, "\":{v}")?;
                }
                f.write_char('}')
            }
        }
    }
}
