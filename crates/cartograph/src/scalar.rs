//! The closed set of scalar kinds a structured value can hold.
//!
//! Backends convert into and out of [`Scalar`] explicitly through
//! [`InMap::as_scalar`](crate::InMap::as_scalar) and
//! [`OutMap::from_scalar`](crate::OutMap::from_scalar); the engines use it to
//! move values of caller-declared types that are not one of the built-in
//! primitives.
use alloc::{borrow::ToOwned, string::String};
use core::{any::type_name, fmt};

use crate::DecodeError;

/// A primitive value as carried by a structured value.
#[cfg_attr(
    any(test, feature = "serde"),
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// An unsigned integer above `i64::MAX`, or one a backend stores unsigned.
    UInt(u64),
    /// A floating point number.
    Double(f64),
    /// A string.
    String(String),
}

impl Scalar {
    /// Returns the name of the Rust type carried by this scalar.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => type_name::<bool>(),
            Self::Int(_) => type_name::<i64>(),
            Self::UInt(_) => type_name::<u64>(),
            Self::Double(_) => type_name::<f64>(),
            Self::String(_) => type_name::<String>(),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::UInt(u) => write!(f, "{u}"),
            Self::Double(d) => write!(f, "{d}"),
            Self::String(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<f32> for Scalar {
    fn from(v: f32) -> Self {
        Self::Double(f64::from(v))
    }
}

macro_rules! impl_from_signed_for_scalar {
    ($($t:ty),+) => {
        $(
            impl From<$t> for Scalar {
                #[allow(clippy::cast_lossless, clippy::cast_possible_wrap)]
                fn from(v: $t) -> Self {
                    Self::Int(v as i64)
                }
            }
        )+
    };
}
impl_from_signed_for_scalar!(i8, i16, i32, i64, isize, u8, u16, u32);

macro_rules! impl_from_unsigned_for_scalar {
    ($($t:ty),+) => {
        $(
            impl From<$t> for Scalar {
                #[allow(clippy::cast_lossless)]
                fn from(v: $t) -> Self {
                    match i64::try_from(v) {
                        Ok(i) => Self::Int(i),
                        Err(_) => Self::UInt(v as u64),
                    }
                }
            }
        )+
    };
}
impl_from_unsigned_for_scalar!(u64, usize);

fn mismatch<T>() -> DecodeError {
    DecodeError::WrongType {
        expected: type_name::<T>(),
    }
}

// Integer conversions are checked: a scalar that does not fit is a type
// mismatch, never a wrapped value.
macro_rules! impl_integer_try_from_scalar {
    ($($t:ty),+) => {
        $(
            impl TryFrom<Scalar> for $t {
                type Error = DecodeError;

                fn try_from(scalar: Scalar) -> Result<Self, Self::Error> {
                    match scalar {
                        Scalar::Int(i) => <$t>::try_from(i).map_err(|_| mismatch::<$t>()),
                        Scalar::UInt(u) => <$t>::try_from(u).map_err(|_| mismatch::<$t>()),
                        _ => Err(mismatch::<$t>()),
                    }
                }
            }
        )+
    };
}
impl_integer_try_from_scalar!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl TryFrom<Scalar> for f64 {
    type Error = DecodeError;

    #[allow(clippy::cast_precision_loss)]
    fn try_from(scalar: Scalar) -> Result<Self, Self::Error> {
        match scalar {
            Scalar::Double(d) => Ok(d),
            Scalar::Int(i) => Ok(i as f64),
            Scalar::UInt(u) => Ok(u as f64),
            _ => Err(mismatch::<f64>()),
        }
    }
}

/// Narrows `value` to `f32`, or `None` if a finite value overflows it.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn narrow_f32(value: f64) -> Option<f32> {
    let narrowed = value as f32;
    (narrowed.is_finite() || !value.is_finite()).then_some(narrowed)
}

impl TryFrom<Scalar> for f32 {
    type Error = DecodeError;

    fn try_from(scalar: Scalar) -> Result<Self, Self::Error> {
        f64::try_from(scalar)
            .ok()
            .and_then(narrow_f32)
            .ok_or_else(mismatch::<f32>)
    }
}

impl TryFrom<Scalar> for bool {
    type Error = DecodeError;

    fn try_from(scalar: Scalar) -> Result<Self, Self::Error> {
        match scalar {
            Scalar::Bool(b) => Ok(b),
            _ => Err(mismatch::<bool>()),
        }
    }
}

impl TryFrom<Scalar> for String {
    type Error = DecodeError;

    fn try_from(scalar: Scalar) -> Result<Self, Self::Error> {
        match scalar {
            Scalar::String(s) => Ok(s),
            _ => Err(mismatch::<String>()),
        }
    }
}

#[cfg(test)]
mod test {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn unsigned_values_prefer_int() {
        assert_eq!(Scalar::from(7u64), Scalar::Int(7));
        assert_eq!(Scalar::from(u64::MAX), Scalar::UInt(u64::MAX));
    }

    #[test]
    fn narrowing_is_checked() {
        assert_eq!(u8::try_from(Scalar::Int(255)), Ok(255));
        assert!(u8::try_from(Scalar::Int(256)).is_err());
        assert!(u32::try_from(Scalar::Int(-1)).is_err());
        assert!(i64::try_from(Scalar::UInt(u64::MAX)).is_err());
        assert!(i64::try_from(Scalar::Double(1.0)).is_err());
    }

    #[test]
    fn f32_overflow_is_a_mismatch() {
        assert_eq!(f32::try_from(Scalar::Double(0.25)), Ok(0.25));
        assert_eq!(f32::try_from(Scalar::Int(3)), Ok(3.0));
        assert_eq!(
            f32::try_from(Scalar::Double(1e300)),
            Err(DecodeError::wrong_type::<f32>())
        );
        assert_eq!(
            f32::try_from(Scalar::Double(f64::INFINITY)),
            Ok(f32::INFINITY)
        );
    }

    #[test]
    fn display_quotes_strings_only() {
        assert_eq!(Scalar::from("quark").to_string(), "\"quark\"");
        assert_eq!(Scalar::Int(-3).to_string(), "-3");
        assert_eq!(Scalar::Bool(true).to_string(), "true");
    }
}
