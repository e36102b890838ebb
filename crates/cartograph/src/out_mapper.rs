//! The encode engine.
//!
//! An out-mapper owns the destination it writes into. Every write encodes the
//! value into a fresh [`OutMap::blank`] first and then stores the result at the
//! requested path, so a failed conversion never leaves a half-written field.
use alloc::vec::Vec;
use core::marker::PhantomData;

use tracing::debug;

use crate::{
    Encode, EncodableWithContext, EncodeError, IndexPath, MappingKey, NoKeys, OutMap,
    RawRepresentable, Scalar, index::indices,
};

/// Writes the fields of an [`Encodable`](crate::Encodable) into an owned
/// destination.
#[derive(Debug)]
pub struct OutMapper<D, K> {
    destination: D,
    keys: PhantomData<fn(&K)>,
}

/// An [`OutMapper`] keyed by string literals.
pub type BasicOutMapper<D> = OutMapper<D, &'static str>;

/// An [`OutMapper`] that can only replace the whole destination.
pub type PlainOutMapper<D> = OutMapper<D, NoKeys>;

impl<D: OutMap, K> OutMapper<D, K> {
    /// Creates a mapper over a blank destination.
    #[must_use]
    pub fn new() -> Self {
        Self::of(D::blank())
    }
}

impl<D: OutMap, K> Default for OutMapper<D, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D, K> OutMapper<D, K> {
    /// Creates a mapper that writes into `destination`, keeping whatever it
    /// already holds.
    pub fn of(destination: D) -> Self {
        Self {
            destination,
            keys: PhantomData,
        }
    }

    /// Returns the written destination.
    pub fn into_destination(self) -> D {
        self.destination
    }
}

/// An [`OutMapper`] that also carries a context borrowed for the whole encode.
#[derive(Debug)]
pub struct ContextualOutMapper<'c, D, K, C> {
    destination: D,
    context: &'c C,
    keys: PhantomData<fn(&K)>,
}

/// A [`ContextualOutMapper`] that can only replace the whole destination.
pub type PlainContextualOutMapper<'c, D, C> = ContextualOutMapper<'c, D, NoKeys, C>;

impl<'c, D: OutMap, K, C> ContextualOutMapper<'c, D, K, C> {
    /// Creates a mapper over a blank destination carrying `context`.
    pub fn new(context: &'c C) -> Self {
        Self::of(D::blank(), context)
    }
}

impl<'c, D, K, C> ContextualOutMapper<'c, D, K, C> {
    /// Creates a mapper that writes into `destination` carrying `context`.
    pub fn of(destination: D, context: &'c C) -> Self {
        Self {
            destination,
            context,
            keys: PhantomData,
        }
    }

    /// Returns the written destination.
    pub fn into_destination(self) -> D {
        self.destination
    }
}

/// Writing operations shared by every encode mapper.
///
/// Paths follow [`OutMap::set_path`]: the empty path replaces the whole
/// destination, one segment stores a field and longer paths are rejected
/// with [`SetError::DeepSetUnsupported`](crate::SetError::DeepSetUnsupported).
pub trait OutMapping {
    /// Structured value being written.
    type Destination: OutMap;
    /// Segments accepted in paths.
    type Keys: MappingKey;

    /// The destination written so far.
    fn destination(&self) -> &Self::Destination;

    /// Mutable access to the destination.
    fn destination_mut(&mut self) -> &mut Self::Destination;

    /// Encodes `value` and stores it at `path`.
    ///
    /// # Errors
    ///
    /// The value's own encode error, or [`EncodeError::CannotSet`].
    fn write<T: Encode + ?Sized>(
        &mut self,
        value: &T,
        path: &[Self::Keys],
    ) -> Result<(), EncodeError> {
        let encoded = value.encode::<Self::Destination>()?;
        set_at(self.destination_mut(), Some(encoded), path)
    }

    /// Like [`write`](Self::write); `None` leaves an existing field untouched.
    ///
    /// # Errors
    ///
    /// See [`write`](Self::write).
    fn write_optional<T: Encode + ?Sized>(
        &mut self,
        value: Option<&T>,
        path: &[Self::Keys],
    ) -> Result<(), EncodeError> {
        match value {
            Some(value) => self.write(value, path),
            None => set_at(self.destination_mut(), None, path),
        }
    }

    /// Encodes `value` under an explicit `context` and stores it at `path`.
    ///
    /// # Errors
    ///
    /// See [`write`](Self::write).
    fn write_with_context<T: EncodableWithContext + ?Sized>(
        &mut self,
        value: &T,
        path: &[Self::Keys],
        context: &T::Context,
    ) -> Result<(), EncodeError> {
        let encoded = value.encode_with_context::<Self::Destination>(context)?;
        set_at(self.destination_mut(), Some(encoded), path)
    }

    /// Like [`write_with_context`](Self::write_with_context); `None` leaves
    /// an existing field untouched.
    ///
    /// # Errors
    ///
    /// See [`write`](Self::write).
    fn write_optional_with_context<T: EncodableWithContext + ?Sized>(
        &mut self,
        value: Option<&T>,
        path: &[Self::Keys],
        context: &T::Context,
    ) -> Result<(), EncodeError> {
        match value {
            Some(value) => self.write_with_context(value, path, context),
            None => set_at(self.destination_mut(), None, path),
        }
    }

    /// Stores the raw value of `value` at `path`.
    ///
    /// # Errors
    ///
    /// See [`write`](Self::write).
    fn write_raw<T: RawRepresentable>(
        &mut self,
        value: &T,
        path: &[Self::Keys],
    ) -> Result<(), EncodeError> {
        self.write(&value.raw_value(), path)
    }

    /// Like [`write_raw`](Self::write_raw); `None` leaves an existing field
    /// untouched.
    ///
    /// # Errors
    ///
    /// See [`write`](Self::write).
    fn write_optional_raw<T: RawRepresentable>(
        &mut self,
        value: Option<&T>,
        path: &[Self::Keys],
    ) -> Result<(), EncodeError> {
        self.write_optional(value.map(RawRepresentable::raw_value).as_ref(), path)
    }

    /// Stores `value` at `path` through [`OutMap::from_scalar`].
    ///
    /// # Errors
    ///
    /// [`EncodeError::WrongType`] naming the carried type if the destination
    /// cannot represent it.
    fn write_scalar(
        &mut self,
        value: impl Into<Scalar>,
        path: &[Self::Keys],
    ) -> Result<(), EncodeError> {
        let scalar: Scalar = value.into();
        self.write(&scalar, path)
    }

    /// Encodes every element of `values` and stores them as an array.
    ///
    /// # Errors
    ///
    /// The first element error, or [`EncodeError::CannotRepresentArray`].
    fn write_array<T: Encode>(
        &mut self,
        values: &[T],
        path: &[Self::Keys],
    ) -> Result<(), EncodeError> {
        let items = values
            .iter()
            .map(|value| value.encode::<Self::Destination>())
            .collect::<Result<Vec<_>, _>>()?;
        set_at(self.destination_mut(), Some(array_of(items)?), path)
    }

    /// Encodes every element of `values` under `context` and stores them as
    /// an array.
    ///
    /// # Errors
    ///
    /// See [`write_array`](Self::write_array).
    fn write_array_with_context<T: EncodableWithContext>(
        &mut self,
        values: &[T],
        path: &[Self::Keys],
        context: &T::Context,
    ) -> Result<(), EncodeError> {
        let items = values
            .iter()
            .map(|value| value.encode_with_context::<Self::Destination>(context))
            .collect::<Result<Vec<_>, _>>()?;
        set_at(self.destination_mut(), Some(array_of(items)?), path)
    }

    /// Stores the raw values of `values` as an array.
    ///
    /// # Errors
    ///
    /// See [`write_array`](Self::write_array).
    fn write_raw_array<T: RawRepresentable>(
        &mut self,
        values: &[T],
        path: &[Self::Keys],
    ) -> Result<(), EncodeError> {
        let items = values
            .iter()
            .map(|value| value.raw_value().encode::<Self::Destination>())
            .collect::<Result<Vec<_>, _>>()?;
        set_at(self.destination_mut(), Some(array_of(items)?), path)
    }

    /// Stores `values` as an array of scalars.
    ///
    /// # Errors
    ///
    /// See [`write_array`](Self::write_array).
    fn write_scalar_array<T: Clone + Into<Scalar>>(
        &mut self,
        values: &[T],
        path: &[Self::Keys],
    ) -> Result<(), EncodeError> {
        let items = values
            .iter()
            .map(|value| Into::<Scalar>::into(value.clone()).encode::<Self::Destination>())
            .collect::<Result<Vec<_>, _>>()?;
        set_at(self.destination_mut(), Some(array_of(items)?), path)
    }
}

/// Writing operations that pass the mapper's own context down.
pub trait ContextualOutMapping: OutMapping {
    /// Value carried through the encode.
    type Context;

    /// The borrowed context.
    fn context(&self) -> &Self::Context;

    /// Encodes `value` under this mapper's context and stores it at `path`.
    ///
    /// # Errors
    ///
    /// See [`OutMapping::write`].
    fn write_in_context<T>(&mut self, value: &T, path: &[Self::Keys]) -> Result<(), EncodeError>
    where
        T: EncodableWithContext<Context = Self::Context> + ?Sized,
    {
        let encoded = value.encode_with_context::<Self::Destination>(self.context())?;
        set_at(self.destination_mut(), Some(encoded), path)
    }

    /// Like [`write_in_context`](Self::write_in_context); `None` leaves an
    /// existing field untouched.
    ///
    /// # Errors
    ///
    /// See [`OutMapping::write`].
    fn write_optional_in_context<T>(
        &mut self,
        value: Option<&T>,
        path: &[Self::Keys],
    ) -> Result<(), EncodeError>
    where
        T: EncodableWithContext<Context = Self::Context> + ?Sized,
    {
        match value {
            Some(value) => self.write_in_context(value, path),
            None => set_at(self.destination_mut(), None, path),
        }
    }

    /// Encodes every element of `values` under this mapper's context and
    /// stores them as an array.
    ///
    /// # Errors
    ///
    /// See [`OutMapping::write_array`].
    fn write_array_in_context<T>(
        &mut self,
        values: &[T],
        path: &[Self::Keys],
    ) -> Result<(), EncodeError>
    where
        T: EncodableWithContext<Context = Self::Context>,
    {
        let items = values
            .iter()
            .map(|value| value.encode_with_context::<Self::Destination>(self.context()))
            .collect::<Result<Vec<_>, _>>()?;
        set_at(self.destination_mut(), Some(array_of(items)?), path)
    }
}

impl<D: OutMap, K: MappingKey> OutMapping for OutMapper<D, K> {
    type Destination = D;
    type Keys = K;

    fn destination(&self) -> &D {
        &self.destination
    }

    fn destination_mut(&mut self) -> &mut D {
        &mut self.destination
    }
}

impl<D: OutMap, K: MappingKey, C> OutMapping for ContextualOutMapper<'_, D, K, C> {
    type Destination = D;
    type Keys = K;

    fn destination(&self) -> &D {
        &self.destination
    }

    fn destination_mut(&mut self) -> &mut D {
        &mut self.destination
    }
}

impl<D: OutMap, K: MappingKey, C> ContextualOutMapping for ContextualOutMapper<'_, D, K, C> {
    type Context = C;

    fn context(&self) -> &C {
        self.context
    }
}

fn set_at<D: OutMap, K: MappingKey>(
    destination: &mut D,
    value: Option<D>,
    path: &[K],
) -> Result<(), EncodeError> {
    let path = indices(path);
    destination.set_path(value, &path).map_err(|error| {
        let path = IndexPath::from(path);
        debug!(%path, %error, "destination rejected value");
        EncodeError::CannotSet(error)
    })
}

fn array_of<D: OutMap>(items: Vec<D>) -> Result<D, EncodeError> {
    D::from_array(items).ok_or_else(|| {
        debug!("destination cannot represent arrays");
        EncodeError::CannotRepresentArray
    })
}
