use alloc::string::String;
use core::any::type_name;

use thiserror::Error;

use crate::{IndexPath, Scalar, SetError};

/// Failure to build a typed value from a structured value.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DecodeError {
    /// Nothing exists at the requested path.
    #[error("no value at path {0}")]
    NoValueAtPath(IndexPath),
    /// The value exists but the accessor for the target type rejected it.
    #[error("value cannot be represented as `{expected}`")]
    WrongType {
        /// Name of the requested type.
        expected: &'static str,
    },
    /// A raw value was read but no case of the enumeration matches it.
    #[error("cannot initialize from raw value {0}")]
    CannotInitializeFromRawValue(Scalar),
    /// The value at the path is not an array.
    #[error("value cannot be represented as an array")]
    CannotRepresentAsArray,
    /// Raised by mapping code outside this crate.
    #[error("{0}")]
    UserDefined(String),
}

impl DecodeError {
    /// A [`WrongType`](Self::WrongType) naming `T`.
    #[must_use]
    pub fn wrong_type<T: ?Sized>() -> Self {
        Self::WrongType {
            expected: type_name::<T>(),
        }
    }

    /// A failure raised by caller code inside a mapping.
    pub fn user_defined(message: impl Into<String>) -> Self {
        Self::UserDefined(message.into())
    }
}

/// Failure to write a typed value into a structured value.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EncodeError {
    /// The destination has no constructor for this value.
    #[error("value of type `{expected}` cannot be represented by the destination")]
    WrongType {
        /// Name of the type being written.
        expected: &'static str,
    },
    /// The destination has no array form.
    #[error("destination cannot represent arrays")]
    CannotRepresentArray,
    /// The destination refused the write.
    #[error("cannot set value: {0}")]
    CannotSet(#[from] SetError),
    /// Raised by mapping code outside this crate.
    #[error("{0}")]
    UserDefined(String),
}

impl EncodeError {
    /// A [`WrongType`](Self::WrongType) naming `T`.
    #[must_use]
    pub fn wrong_type<T: ?Sized>() -> Self {
        Self::WrongType {
            expected: type_name::<T>(),
        }
    }

    /// A failure raised by caller code inside a mapping.
    pub fn user_defined(message: impl Into<String>) -> Self {
        Self::UserDefined(message.into())
    }
}
