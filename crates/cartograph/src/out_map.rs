use alloc::vec::Vec;

use thiserror::Error;

use crate::{MappingIndex, Scalar};

/// Failure to write into a structured value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SetError {
    /// The destination is not a shape that accepts keyed writes (e.g. not an
    /// object).
    #[error("destination cannot hold a value at `{index}`")]
    IncompatibleShape {
        /// Segment that was being written.
        index: MappingIndex,
    },
    /// Writes more than one level deep are not supported.
    #[error("cannot set a value {depth} levels deep; only single-segment paths are writable")]
    DeepSetUnsupported {
        /// Length of the rejected path.
        depth: usize,
    },
}

/// A structured value that typed values can be encoded into.
///
/// Backends implement `blank`, single-level `set`, `from_array` and the four
/// canonical constructors; the rest is derived.
pub trait OutMap: Sized {
    /// The canonical empty instance, usually an empty object.
    fn blank() -> Self;

    /// Stores `value` under `index`.
    ///
    /// Writing `None` is a no-op: it never removes an existing entry.
    ///
    /// # Errors
    ///
    /// [`SetError::IncompatibleShape`] if `self` cannot take a keyed write.
    fn set(&mut self, value: Option<Self>, index: &MappingIndex) -> Result<(), SetError>;

    /// Stores `value` at `path`.
    ///
    /// The empty path replaces `self` (with [`blank`](Self::blank) for
    /// `None`); a single segment delegates to [`set`](Self::set).
    ///
    /// # Errors
    ///
    /// [`SetError::DeepSetUnsupported`] for paths of two or more segments,
    /// plus whatever [`set`](Self::set) reports.
    fn set_path(&mut self, value: Option<Self>, path: &[MappingIndex]) -> Result<(), SetError> {
        match path {
            [] => {
                *self = value.unwrap_or_else(Self::blank);
                Ok(())
            }
            [index] => self.set(value, index),
            _ => Err(SetError::DeepSetUnsupported { depth: path.len() }),
        }
    }

    /// Wraps `items` as an array; `None` if the backend has no arrays.
    fn from_array(items: Vec<Self>) -> Option<Self>;

    /// Builds a value from the canonical integer.
    fn from_int(value: i64) -> Option<Self>;

    /// Builds a value from the canonical floating point number.
    fn from_double(value: f64) -> Option<Self>;

    /// Builds a value from a boolean.
    fn from_bool(value: bool) -> Option<Self>;

    /// Builds a value from a string.
    fn from_string(value: alloc::string::String) -> Option<Self>;

    /// Builds a value from any scalar kind.
    fn from_scalar(value: Scalar) -> Option<Self> {
        match value {
            Scalar::Bool(b) => Self::from_bool(b),
            Scalar::Int(i) => Self::from_int(i),
            Scalar::UInt(u) => Self::from_u64(u),
            Scalar::Double(d) => Self::from_double(d),
            Scalar::String(s) => Self::from_string(s),
        }
    }

    /// Builds a value from an `i8`.
    fn from_i8(value: i8) -> Option<Self> {
        Self::from_int(value.into())
    }

    /// Builds a value from an `i16`.
    fn from_i16(value: i16) -> Option<Self> {
        Self::from_int(value.into())
    }

    /// Builds a value from an `i32`.
    fn from_i32(value: i32) -> Option<Self> {
        Self::from_int(value.into())
    }

    /// Builds a value from an `i64`.
    fn from_i64(value: i64) -> Option<Self> {
        Self::from_int(value)
    }

    /// Builds a value from an `isize`.
    fn from_isize(value: isize) -> Option<Self> {
        i64::try_from(value).ok().and_then(Self::from_int)
    }

    /// Builds a value from a `u8`.
    fn from_u8(value: u8) -> Option<Self> {
        Self::from_int(value.into())
    }

    /// Builds a value from a `u16`.
    fn from_u16(value: u16) -> Option<Self> {
        Self::from_int(value.into())
    }

    /// Builds a value from a `u32`.
    fn from_u32(value: u32) -> Option<Self> {
        Self::from_int(value.into())
    }

    /// Builds a value from a `u64`; values above `i64::MAX` need a backend
    /// override.
    fn from_u64(value: u64) -> Option<Self> {
        i64::try_from(value).ok().and_then(Self::from_int)
    }

    /// Builds a value from a `usize`.
    fn from_usize(value: usize) -> Option<Self> {
        u64::try_from(value).ok().and_then(Self::from_u64)
    }

    /// Builds a value from an `f32`.
    fn from_f32(value: f32) -> Option<Self> {
        Self::from_double(value.into())
    }
}
