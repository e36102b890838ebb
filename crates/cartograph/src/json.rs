//! [`InMap`] and [`OutMap`] for [`serde_json::Value`].
//!
//! `serde_json` stores unsigned integers natively, so `u64` reads and writes
//! are overridden to cover the range above `i64::MAX`. Non-finite doubles
//! have no JSON form and fail to encode.
use alloc::{borrow::ToOwned, string::String, vec::Vec};

use serde_json::{Map, Number, Value};

use crate::{InMap, MappingIndex, OutMap, SetError};

impl InMap for Value {
    fn get(&self, index: &MappingIndex) -> Option<&Self> {
        match self {
            Value::Object(map) => map.get(index.as_str()),
            Value::Array(items) => index.as_array_index().and_then(|i| items.get(i)),
            _ => None,
        }
    }

    fn as_array(&self) -> Option<&[Self]> {
        Value::as_array(self).map(Vec::as_slice)
    }

    fn as_int(&self) -> Option<i64> {
        Value::as_i64(self)
    }

    fn as_double(&self) -> Option<f64> {
        Value::as_f64(self)
    }

    fn as_bool(&self) -> Option<bool> {
        Value::as_bool(self)
    }

    fn as_str(&self) -> Option<&str> {
        Value::as_str(self)
    }

    fn is_null(&self) -> bool {
        Value::is_null(self)
    }

    fn as_u64(&self) -> Option<u64> {
        Value::as_u64(self)
    }
}

impl OutMap for Value {
    fn blank() -> Self {
        Value::Object(Map::new())
    }

    fn set(&mut self, value: Option<Self>, index: &MappingIndex) -> Result<(), SetError> {
        let Some(value) = value else {
            return Ok(());
        };
        if let Value::Object(map) = self {
            map.insert(index.as_str().to_owned(), value);
            Ok(())
        } else {
            Err(SetError::IncompatibleShape {
                index: index.clone(),
            })
        }
    }

    fn from_array(items: Vec<Self>) -> Option<Self> {
        Some(Value::Array(items))
    }

    fn from_int(value: i64) -> Option<Self> {
        Some(Value::Number(value.into()))
    }

    fn from_double(value: f64) -> Option<Self> {
        Number::from_f64(value).map(Value::Number)
    }

    fn from_bool(value: bool) -> Option<Self> {
        Some(Value::Bool(value))
    }

    fn from_string(value: String) -> Option<Self> {
        Some(Value::String(value))
    }

    fn from_u64(value: u64) -> Option<Self> {
        Some(Value::Number(value.into()))
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;
    use crate::{Decode, DecodeError, Encode, EncodeError};

    #[test]
    fn unsigned_range_above_i64() {
        let v = u64::MAX.encode::<Value>().unwrap();
        assert_eq!(v, json!(18_446_744_073_709_551_615u64));
        assert_eq!(u64::decode(&v), Ok(u64::MAX));
        assert_eq!(i64::decode(&v), Err(DecodeError::wrong_type::<i64>()));
    }

    #[test]
    fn f32_overflow_is_wrong_type() {
        assert_eq!(f32::decode(&json!(1e300)), Err(DecodeError::wrong_type::<f32>()));
        assert_eq!(f32::decode(&json!(1.5)), Ok(1.5));
    }

    #[test]
    fn non_finite_doubles_do_not_encode() {
        assert_eq!(
            f64::NAN.encode::<Value>(),
            Err(EncodeError::wrong_type::<f64>())
        );
    }

    #[test]
    fn array_positions_resolve() {
        let v = json!({"ints": [2, 5, 4]});
        let path = [MappingIndex::new("ints"), MappingIndex::from(2usize)];
        assert_eq!(v.get_path(&path), Some(&json!(4)));
        assert_eq!(v.get_path(&[]), Some(&v));
    }
}
