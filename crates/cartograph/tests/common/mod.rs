#![allow(missing_docs, dead_code)]

use std::collections::BTreeMap;

use cartograph::{InMap, MappingIndex, OutMap, SetError};

/// A backend that stores fixed-width numbers natively and has no plain
/// 64-bit integer of its own.
#[derive(Debug, Clone, PartialEq)]
pub enum Neomap {
    Bool(bool),
    Int32(i32),
    UInt(u64),
    UInt8(u8),
    Float(f32),
    String(String),
    Array(Vec<Neomap>),
    Dictionary(BTreeMap<String, Neomap>),
}

impl Neomap {
    pub fn dictionary<const N: usize>(entries: [(&str, Neomap); N]) -> Self {
        Self::Dictionary(entries.into_iter().map(|(k, v)| (k.to_owned(), v)).collect())
    }
}

fn set_in_dictionary<M>(
    dictionary: Option<&mut BTreeMap<String, M>>,
    value: Option<M>,
    index: &MappingIndex,
) -> Result<(), SetError> {
    let Some(value) = value else {
        return Ok(());
    };
    let dictionary = dictionary.ok_or_else(|| SetError::IncompatibleShape {
        index: index.clone(),
    })?;
    dictionary.insert(index.as_str().to_owned(), value);
    Ok(())
}

impl InMap for Neomap {
    fn get(&self, index: &MappingIndex) -> Option<&Self> {
        match self {
            Self::Dictionary(dict) => dict.get(index.as_str()),
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
            Self::Int32(v) => Some(i64::from(*v)),
            Self::UInt(v) => i64::try_from(*v).ok(),
            Self::UInt8(v) => Some(i64::from(*v)),
            _ => None,
        }
    }

    fn as_double(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(f64::from(*v)),
            _ => None,
        }
    }

    fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    fn as_i32(&self) -> Option<i32> {
        match self {
            Self::Int32(v) => Some(*v),
            _ => None,
        }
    }

    fn as_u64(&self) -> Option<u64> {
        match self {
            Self::UInt(v) => Some(*v),
            _ => None,
        }
    }

    fn as_u8(&self) -> Option<u8> {
        match self {
            Self::UInt8(v) => Some(*v),
            _ => None,
        }
    }

    fn as_f32(&self) -> Option<f32> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }
}

impl OutMap for Neomap {
    fn blank() -> Self {
        Self::Dictionary(BTreeMap::new())
    }

    fn set(&mut self, value: Option<Self>, index: &MappingIndex) -> Result<(), SetError> {
        let dictionary = match self {
            Self::Dictionary(dict) => Some(dict),
            _ => None,
        };
        set_in_dictionary(dictionary, value, index)
    }

    fn from_array(items: Vec<Self>) -> Option<Self> {
        Some(Self::Array(items))
    }

    fn from_int(value: i64) -> Option<Self> {
        i32::try_from(value).ok().map(Self::Int32)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn from_double(value: f64) -> Option<Self> {
        Some(Self::Float(value as f32))
    }

    fn from_bool(value: bool) -> Option<Self> {
        Some(Self::Bool(value))
    }

    fn from_string(value: String) -> Option<Self> {
        Some(Self::String(value))
    }

    fn from_i32(value: i32) -> Option<Self> {
        Some(Self::Int32(value))
    }

    fn from_u64(value: u64) -> Option<Self> {
        Some(Self::UInt(value))
    }

    fn from_u8(value: u8) -> Option<Self> {
        Some(Self::UInt8(value))
    }

    fn from_f32(value: f32) -> Option<Self> {
        Some(Self::Float(value))
    }
}

/// A backend of string-keyed scalars with no way to hold arrays.
#[derive(Debug, Clone, PartialEq)]
pub enum FlatMap {
    Int(i64),
    Text(String),
    Record(BTreeMap<String, FlatMap>),
}

impl InMap for FlatMap {
    fn get(&self, index: &MappingIndex) -> Option<&Self> {
        match self {
            Self::Record(fields) => fields.get(index.as_str()),
            _ => None,
        }
    }

    fn as_array(&self) -> Option<&[Self]> {
        None
    }

    fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    fn as_double(&self) -> Option<f64> {
        None
    }

    fn as_bool(&self) -> Option<bool> {
        None
    }

    fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v),
            _ => None,
        }
    }
}

impl OutMap for FlatMap {
    fn blank() -> Self {
        Self::Record(BTreeMap::new())
    }

    fn set(&mut self, value: Option<Self>, index: &MappingIndex) -> Result<(), SetError> {
        let fields = match self {
            Self::Record(fields) => Some(fields),
            _ => None,
        };
        set_in_dictionary(fields, value, index)
    }

    fn from_array(_items: Vec<Self>) -> Option<Self> {
        None
    }

    fn from_int(value: i64) -> Option<Self> {
        Some(Self::Int(value))
    }

    fn from_double(_value: f64) -> Option<Self> {
        None
    }

    fn from_bool(_value: bool) -> Option<Self> {
        None
    }

    fn from_string(value: String) -> Option<Self> {
        Some(Self::Text(value))
    }
}
