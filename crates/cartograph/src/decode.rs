//! Capability traits for the decode direction.
//!
//! [`Decode`] is what the engine calls: it turns a whole structured value into
//! `Self`. Primitives implement it through the scalar accessors of [`InMap`];
//! types that declare a field mapping implement [`Decodable`] (or
//! [`BasicDecodable`]) and get [`Decode`] for free.
use alloc::{borrow::ToOwned, string::String};
use core::any::type_name;

use tracing::{debug, trace};

use crate::{
    BasicInMapper, ContextualInMapper, DecodeError, Encode, InMap, InMapper, MappingKey, Scalar,
};

/// A type that can be built from a whole structured value.
pub trait Decode: Sized {
    /// Decodes `source` as `Self`.
    ///
    /// # Errors
    ///
    /// Returns the first [`DecodeError`] met anywhere in the value.
    fn decode<S: InMap>(source: &S) -> Result<Self, DecodeError>;
}

/// A type whose fields map to paths of a structured value.
///
/// `Keys` restricts which segments the mapper accepts; use
/// [`mapping_keys!`](crate::mapping_keys) to declare them.
///
/// ```
/// use cartograph::{Decodable, Decode, DecodeError, InMap, InMapper, InMapping, mapping_keys};
///
/// mapping_keys! {
///     pub enum PointKeys { X = "x", Y = "y" }
/// }
///
/// struct Point { x: i32, y: i32 }
///
/// impl Decodable for Point {
///     type Keys = PointKeys;
///
///     fn from_mapper<S: InMap>(m: &InMapper<'_, S, PointKeys>) -> Result<Self, DecodeError> {
///         Ok(Point { x: m.read(&[PointKeys::X])?, y: m.read(&[PointKeys::Y])? })
///     }
/// }
///
/// let p = Point::decode(&serde_json::json!({"x": 1, "y": -2})).unwrap();
/// assert_eq!((p.x, p.y), (1, -2));
/// ```
pub trait Decodable: Sized {
    /// Path segments this type reads.
    type Keys: MappingKey;

    /// Builds `Self` by reading through `mapper`.
    ///
    /// # Errors
    ///
    /// Whatever the reads report, or a [`DecodeError::UserDefined`] of the
    /// implementor's own.
    fn from_mapper<S: InMap>(mapper: &InMapper<'_, S, Self::Keys>) -> Result<Self, DecodeError>;
}

/// A [`Decodable`] keyed by plain string literals.
pub trait BasicDecodable: Sized {
    /// Builds `Self` by reading through `mapper`.
    ///
    /// # Errors
    ///
    /// Whatever the reads report.
    fn from_basic_mapper<S: InMap>(mapper: &BasicInMapper<'_, S>) -> Result<Self, DecodeError>;
}

/// A type whose mapping depends on a caller-supplied context.
pub trait DecodableWithContext: Sized {
    /// Path segments this type reads.
    type Keys: MappingKey;
    /// Value consulted while reading.
    type Context;

    /// Builds `Self` by reading through `mapper`, which also carries the
    /// context.
    ///
    /// # Errors
    ///
    /// Whatever the reads report.
    fn from_contextual_mapper<S: InMap>(
        mapper: &ContextualInMapper<'_, S, Self::Keys, Self::Context>,
    ) -> Result<Self, DecodeError>;

    /// Decodes `source` as `Self` under `context`.
    ///
    /// # Errors
    ///
    /// Returns the first [`DecodeError`] met anywhere in the value.
    fn decode_with_context<S: InMap>(
        source: &S,
        context: &Self::Context,
    ) -> Result<Self, DecodeError> {
        trace!(target_type = type_name::<Self>(), "decoding with context");
        Self::from_contextual_mapper(&ContextualInMapper::new(source, context))
    }
}

/// An enum-like type backed by a primitive raw value.
///
/// Decoding reads the raw value and looks for the matching case; encoding
/// writes [`raw_value`](Self::raw_value).
pub trait RawRepresentable: Sized {
    /// The primitive backing each case.
    type RawValue: Decode + Encode + Into<Scalar> + Clone;

    /// The case whose raw value equals `raw`, if any.
    fn from_raw_value(raw: &Self::RawValue) -> Option<Self>;

    /// The raw value of this case.
    fn raw_value(&self) -> Self::RawValue;
}

impl<T: Decodable> Decode for T {
    fn decode<S: InMap>(source: &S) -> Result<Self, DecodeError> {
        trace!(target_type = type_name::<T>(), "decoding");
        T::from_mapper(&InMapper::new(source))
    }
}

impl<T: BasicDecodable> Decodable for T {
    type Keys = &'static str;

    fn from_mapper<S: InMap>(mapper: &InMapper<'_, S, Self::Keys>) -> Result<Self, DecodeError> {
        T::from_basic_mapper(mapper)
    }
}

fn coerce<T>(value: Option<T>) -> Result<T, DecodeError> {
    value.ok_or_else(|| {
        debug!(expected = type_name::<T>(), "value has the wrong type");
        DecodeError::wrong_type::<T>()
    })
}

macro_rules! impl_decode_via_accessor {
    ($($t:ty => $accessor:ident),+ $(,)?) => {
        $(
            impl Decode for $t {
                fn decode<S: InMap>(source: &S) -> Result<Self, DecodeError> {
                    coerce::<$t>(source.$accessor())
                }
            }
        )+
    };
}

impl_decode_via_accessor! {
    i8 => as_i8,
    i16 => as_i16,
    i32 => as_i32,
    i64 => as_i64,
    isize => as_isize,
    u8 => as_u8,
    u16 => as_u16,
    u32 => as_u32,
    u64 => as_u64,
    usize => as_usize,
    f32 => as_f32,
    f64 => as_double,
    bool => as_bool,
    Scalar => as_scalar,
}

impl Decode for String {
    fn decode<S: InMap>(source: &S) -> Result<Self, DecodeError> {
        coerce::<String>(source.as_str().map(ToOwned::to_owned))
    }
}
