//! Capability traits for the encode direction, mirroring [`crate::decode`].
use alloc::{borrow::ToOwned, string::String};
use core::any::type_name;

use tracing::{debug, trace};

use crate::{
    BasicOutMapper, ContextualOutMapper, EncodeError, MappingKey, OutMap, OutMapper, Scalar,
};

/// A type that can be written as a whole structured value.
pub trait Encode {
    /// Writes `self` into `destination` and hands it back.
    ///
    /// Types with a field mapping add their keys to `destination`, leaving
    /// unrelated entries in place; primitives replace it.
    ///
    /// # Errors
    ///
    /// Returns the first [`EncodeError`] met. The partially written
    /// destination is dropped.
    fn encode_into<D: OutMap>(&self, destination: D) -> Result<D, EncodeError>;

    /// Writes `self` into a fresh [`OutMap::blank`] value.
    ///
    /// # Errors
    ///
    /// See [`encode_into`](Self::encode_into).
    fn encode<D: OutMap>(&self) -> Result<D, EncodeError> {
        self.encode_into(D::blank())
    }
}

/// A type whose fields map to paths of a structured value.
pub trait Encodable {
    /// Path segments this type writes.
    type Keys: MappingKey;

    /// Writes every field through `mapper`.
    ///
    /// # Errors
    ///
    /// Whatever the writes report.
    fn to_mapper<D: OutMap>(
        &self,
        mapper: &mut OutMapper<D, Self::Keys>,
    ) -> Result<(), EncodeError>;
}

/// An [`Encodable`] keyed by plain string literals.
pub trait BasicEncodable {
    /// Writes every field through `mapper`.
    ///
    /// # Errors
    ///
    /// Whatever the writes report.
    fn to_basic_mapper<D: OutMap>(&self, mapper: &mut BasicOutMapper<D>) -> Result<(), EncodeError>;
}

/// A type whose mapping depends on a caller-supplied context.
pub trait EncodableWithContext {
    /// Path segments this type writes.
    type Keys: MappingKey;
    /// Value consulted while writing.
    type Context;

    /// Writes every field through `mapper`, which also carries the context.
    ///
    /// # Errors
    ///
    /// Whatever the writes report.
    fn to_contextual_mapper<D: OutMap>(
        &self,
        mapper: &mut ContextualOutMapper<'_, D, Self::Keys, Self::Context>,
    ) -> Result<(), EncodeError>;

    /// Writes `self` into `destination` under `context`.
    ///
    /// # Errors
    ///
    /// Returns the first [`EncodeError`] met.
    fn encode_into_with_context<D: OutMap>(
        &self,
        destination: D,
        context: &Self::Context,
    ) -> Result<D, EncodeError> {
        trace!(source_type = type_name::<Self>(), "encoding with context");
        let mut mapper = ContextualOutMapper::of(destination, context);
        self.to_contextual_mapper(&mut mapper)?;
        Ok(mapper.into_destination())
    }

    /// Writes `self` into a fresh [`OutMap::blank`] value under `context`.
    ///
    /// # Errors
    ///
    /// Returns the first [`EncodeError`] met.
    fn encode_with_context<D: OutMap>(&self, context: &Self::Context) -> Result<D, EncodeError> {
        self.encode_into_with_context(D::blank(), context)
    }
}

impl<T: Encodable + ?Sized> Encode for T {
    fn encode_into<D: OutMap>(&self, destination: D) -> Result<D, EncodeError> {
        trace!(source_type = type_name::<T>(), "encoding");
        let mut mapper = OutMapper::of(destination);
        self.to_mapper(&mut mapper)?;
        Ok(mapper.into_destination())
    }
}

impl<T: BasicEncodable + ?Sized> Encodable for T {
    type Keys = &'static str;

    fn to_mapper<D: OutMap>(
        &self,
        mapper: &mut OutMapper<D, Self::Keys>,
    ) -> Result<(), EncodeError> {
        self.to_basic_mapper(mapper)
    }
}

// Primitives are the whole value: whatever was in the destination is replaced.
fn replace<T: ?Sized, D: OutMap>(mut destination: D, value: Option<D>) -> Result<D, EncodeError> {
    let value = value.ok_or_else(|| {
        debug!(value_type = type_name::<T>(), "destination cannot represent value");
        EncodeError::wrong_type::<T>()
    })?;
    destination.set_path(Some(value), &[])?;
    Ok(destination)
}

macro_rules! impl_encode_via_constructor {
    ($($t:ty => $constructor:ident),+ $(,)?) => {
        $(
            impl Encode for $t {
                fn encode_into<D: OutMap>(&self, destination: D) -> Result<D, EncodeError> {
                    replace::<$t, D>(destination, D::$constructor(*self))
                }
            }
        )+
    };
}

impl_encode_via_constructor! {
    i8 => from_i8,
    i16 => from_i16,
    i32 => from_i32,
    i64 => from_i64,
    isize => from_isize,
    u8 => from_u8,
    u16 => from_u16,
    u32 => from_u32,
    u64 => from_u64,
    usize => from_usize,
    f32 => from_f32,
    f64 => from_double,
    bool => from_bool,
}

impl Encode for str {
    fn encode_into<D: OutMap>(&self, destination: D) -> Result<D, EncodeError> {
        replace::<String, D>(destination, D::from_string(self.to_owned()))
    }
}

impl Encode for String {
    fn encode_into<D: OutMap>(&self, destination: D) -> Result<D, EncodeError> {
        self.as_str().encode_into(destination)
    }
}

impl Encode for Scalar {
    fn encode_into<D: OutMap>(&self, destination: D) -> Result<D, EncodeError> {
        let value = D::from_scalar(self.clone());
        // Report the carried type, not `Scalar`.
        value.map_or_else(
            || {
                debug!(value_type = self.type_name(), "destination cannot represent value");
                Err(EncodeError::WrongType {
                    expected: self.type_name(),
                })
            },
            |value| replace::<Scalar, D>(destination, Some(value)),
        )
    }
}
