//! The decode engine.
//!
//! A mapper borrows the structured value being decoded and resolves paths of
//! its key type against it. All reading algorithms live on [`InMapping`] as
//! provided methods, so plain and contextual mappers share them.
use alloc::vec::Vec;
use core::{any::type_name, marker::PhantomData};

use tracing::debug;

use crate::{
    DecodableWithContext, Decode, DecodeError, IndexPath, InMap, MappingKey, NoKeys,
    RawRepresentable, Scalar, index::indices,
};

/// Reads the fields of a [`Decodable`](crate::Decodable) out of a borrowed structured value.
#[derive(Debug)]
pub struct InMapper<'a, S, K> {
    source: &'a S,
    keys: PhantomData<fn(&K)>,
}

/// An [`InMapper`] keyed by string literals.
pub type BasicInMapper<'a, S> = InMapper<'a, S, &'static str>;

/// An [`InMapper`] that can only read the whole source.
pub type PlainInMapper<'a, S> = InMapper<'a, S, NoKeys>;

impl<'a, S, K> InMapper<'a, S, K> {
    /// Creates a mapper over `source`.
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            keys: PhantomData,
        }
    }
}

/// An [`InMapper`] that also carries a context borrowed for the whole decode.
#[derive(Debug)]
pub struct ContextualInMapper<'a, S, K, C> {
    source: &'a S,
    context: &'a C,
    keys: PhantomData<fn(&K)>,
}

/// A [`ContextualInMapper`] that can only read the whole source.
pub type PlainContextualInMapper<'a, S, C> = ContextualInMapper<'a, S, NoKeys, C>;

impl<'a, S, K, C> ContextualInMapper<'a, S, K, C> {
    /// Creates a mapper over `source` carrying `context`.
    pub fn new(source: &'a S, context: &'a C) -> Self {
        Self {
            source,
            context,
            keys: PhantomData,
        }
    }
}

/// Reading operations shared by every decode mapper.
///
/// Every path is a slice of [`Keys`](Self::Keys); the empty path addresses the
/// source itself. Reads fail with [`DecodeError::NoValueAtPath`] when the path
/// does not resolve, and otherwise with whatever decoding the value reports.
pub trait InMapping {
    /// Structured value being read.
    type Source: InMap;
    /// Segments accepted in paths.
    type Keys: MappingKey;

    /// The borrowed structured value.
    fn source(&self) -> &Self::Source;

    /// Decodes the value at `path`.
    ///
    /// # Errors
    ///
    /// [`DecodeError::NoValueAtPath`] or the value's own decode error.
    fn read<T: Decode>(&self, path: &[Self::Keys]) -> Result<T, DecodeError> {
        T::decode(dive(self.source(), path)?)
    }

    /// Decodes the value at `path`, or `None` if the path is missing or holds
    /// an explicit null.
    ///
    /// # Errors
    ///
    /// The value's own decode error.
    fn read_optional<T: Decode>(&self, path: &[Self::Keys]) -> Result<Option<T>, DecodeError> {
        present(self.source(), path).map(T::decode).transpose()
    }

    /// Decodes the value at `path` under an explicit `context`.
    ///
    /// # Errors
    ///
    /// [`DecodeError::NoValueAtPath`] or the value's own decode error.
    fn read_with_context<T: DecodableWithContext>(
        &self,
        path: &[Self::Keys],
        context: &T::Context,
    ) -> Result<T, DecodeError> {
        T::from_contextual_mapper(&ContextualInMapper::new(dive(self.source(), path)?, context))
    }

    /// Like [`read_with_context`](Self::read_with_context), but `None` for a
    /// missing or null value.
    ///
    /// # Errors
    ///
    /// The value's own decode error.
    fn read_optional_with_context<T: DecodableWithContext>(
        &self,
        path: &[Self::Keys],
        context: &T::Context,
    ) -> Result<Option<T>, DecodeError> {
        present(self.source(), path)
            .map(|value| T::from_contextual_mapper(&ContextualInMapper::new(value, context)))
            .transpose()
    }

    /// Reads a raw value at `path` and returns the matching case.
    ///
    /// # Errors
    ///
    /// [`DecodeError::CannotInitializeFromRawValue`] if no case matches.
    fn read_raw<T: RawRepresentable>(&self, path: &[Self::Keys]) -> Result<T, DecodeError> {
        raw_represent(self.read::<T::RawValue>(path)?)
    }

    /// Like [`read_raw`](Self::read_raw), but `None` for a missing or null
    /// value.
    ///
    /// # Errors
    ///
    /// [`DecodeError::CannotInitializeFromRawValue`] if no case matches.
    fn read_optional_raw<T: RawRepresentable>(
        &self,
        path: &[Self::Keys],
    ) -> Result<Option<T>, DecodeError> {
        self.read_optional::<T::RawValue>(path)?
            .map(raw_represent)
            .transpose()
    }

    /// Reads the value at `path` as a [`Scalar`] and converts it to `T`.
    ///
    /// # Errors
    ///
    /// [`DecodeError::WrongType`] if the value is not a scalar or does not
    /// convert.
    fn read_scalar<T: TryFrom<Scalar>>(&self, path: &[Self::Keys]) -> Result<T, DecodeError> {
        scalar_of(dive(self.source(), path)?)
    }

    /// Decodes every element of the array at `path`.
    ///
    /// # Errors
    ///
    /// [`DecodeError::CannotRepresentAsArray`] if the value is not an array,
    /// or the first element error, unchanged.
    fn read_array<T: Decode>(&self, path: &[Self::Keys]) -> Result<Vec<T>, DecodeError> {
        elements(dive(self.source(), path)?)?
            .iter()
            .map(T::decode)
            .collect()
    }

    /// Decodes every element of the array at `path` under `context`.
    ///
    /// # Errors
    ///
    /// See [`read_array`](Self::read_array).
    fn read_array_with_context<T: DecodableWithContext>(
        &self,
        path: &[Self::Keys],
        context: &T::Context,
    ) -> Result<Vec<T>, DecodeError> {
        elements(dive(self.source(), path)?)?
            .iter()
            .map(|element| T::from_contextual_mapper(&ContextualInMapper::new(element, context)))
            .collect()
    }

    /// Reads every element of the array at `path` as a raw value case.
    ///
    /// # Errors
    ///
    /// See [`read_array`](Self::read_array) and [`read_raw`](Self::read_raw).
    fn read_raw_array<T: RawRepresentable>(
        &self,
        path: &[Self::Keys],
    ) -> Result<Vec<T>, DecodeError> {
        elements(dive(self.source(), path)?)?
            .iter()
            .map(|element| raw_represent(<T::RawValue as Decode>::decode(element)?))
            .collect()
    }

    /// Reads every element of the array at `path` through [`Scalar`].
    ///
    /// # Errors
    ///
    /// See [`read_array`](Self::read_array) and
    /// [`read_scalar`](Self::read_scalar).
    fn read_scalar_array<T: TryFrom<Scalar>>(
        &self,
        path: &[Self::Keys],
    ) -> Result<Vec<T>, DecodeError> {
        elements(dive(self.source(), path)?)?
            .iter()
            .map(|element| scalar_of::<T, _>(element))
            .collect()
    }
}

/// Reading operations that pick up the mapper's own context.
///
/// Only types whose context type is the mapper's can be read this way, so a
/// mismatch is a compile error rather than a runtime one.
pub trait ContextualInMapping: InMapping {
    /// Value carried through the decode.
    type Context;

    /// The borrowed context.
    fn context(&self) -> &Self::Context;

    /// Decodes the value at `path` under this mapper's context.
    ///
    /// # Errors
    ///
    /// See [`InMapping::read_with_context`].
    fn read_in_context<T>(&self, path: &[Self::Keys]) -> Result<T, DecodeError>
    where
        T: DecodableWithContext<Context = Self::Context>,
    {
        self.read_with_context(path, self.context())
    }

    /// Like [`read_in_context`](Self::read_in_context), but `None` for a
    /// missing or null value.
    ///
    /// # Errors
    ///
    /// See [`InMapping::read_optional_with_context`].
    fn read_optional_in_context<T>(&self, path: &[Self::Keys]) -> Result<Option<T>, DecodeError>
    where
        T: DecodableWithContext<Context = Self::Context>,
    {
        self.read_optional_with_context(path, self.context())
    }

    /// Decodes every element of the array at `path` under this mapper's
    /// context.
    ///
    /// # Errors
    ///
    /// See [`InMapping::read_array_with_context`].
    fn read_array_in_context<T>(&self, path: &[Self::Keys]) -> Result<Vec<T>, DecodeError>
    where
        T: DecodableWithContext<Context = Self::Context>,
    {
        self.read_array_with_context(path, self.context())
    }
}

impl<S: InMap, K: MappingKey> InMapping for InMapper<'_, S, K> {
    type Source = S;
    type Keys = K;

    fn source(&self) -> &S {
        self.source
    }
}

impl<S: InMap, K: MappingKey, C> InMapping for ContextualInMapper<'_, S, K, C> {
    type Source = S;
    type Keys = K;

    fn source(&self) -> &S {
        self.source
    }
}

impl<S: InMap, K: MappingKey, C> ContextualInMapping for ContextualInMapper<'_, S, K, C> {
    type Context = C;

    fn context(&self) -> &C {
        self.context
    }
}

fn dive<'s, S: InMap, K: MappingKey>(source: &'s S, path: &[K]) -> Result<&'s S, DecodeError> {
    let path = indices(path);
    source.get_path(&path).ok_or_else(|| {
        let path = IndexPath::from(path);
        debug!(%path, "no value at path");
        DecodeError::NoValueAtPath(path)
    })
}

fn present<'s, S: InMap, K: MappingKey>(source: &'s S, path: &[K]) -> Option<&'s S> {
    source
        .get_path(&indices(path))
        .filter(|value| !value.is_null())
}

fn elements<S: InMap>(value: &S) -> Result<&[S], DecodeError> {
    value.as_array().ok_or_else(|| {
        debug!("value is not an array");
        DecodeError::CannotRepresentAsArray
    })
}

fn raw_represent<T: RawRepresentable>(raw: T::RawValue) -> Result<T, DecodeError> {
    T::from_raw_value(&raw).ok_or_else(|| {
        let raw: Scalar = raw.into();
        debug!(%raw, case_type = type_name::<T>(), "no case for raw value");
        DecodeError::CannotInitializeFromRawValue(raw)
    })
}

fn scalar_of<T: TryFrom<Scalar>, S: InMap>(value: &S) -> Result<T, DecodeError> {
    value
        .as_scalar()
        .and_then(|scalar| T::try_from(scalar).ok())
        .ok_or_else(|| {
            debug!(expected = type_name::<T>(), "value has the wrong type");
            DecodeError::wrong_type::<T>()
        })
}
