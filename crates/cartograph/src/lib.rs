//! Bidirectional mapping between typed values and structured data trees.
//!
//! A type states once, field by field, which path of a structured value each
//! field lives at. Decoding ([`Decode`]) and encoding ([`Encode`]) are both
//! derived from that statement and work against any backend that implements
//! [`InMap`] and [`OutMap`]. Mappings can also depend on a caller-supplied
//! context ([`DecodableWithContext`], [`EncodableWithContext`]), which is
//! handed down unchanged through nested values.
//!
//! ```
//! use cartograph::{
//!     Decode, DecodeError, Encode, EncodeError, BasicDecodable, BasicEncodable, BasicInMapper,
//!     BasicOutMapper, InMap, InMapping, OutMap, OutMapping,
//! };
//! use serde_json::json;
//!
//! #[derive(Debug, PartialEq)]
//! struct Medal {
//!     city: String,
//!     year: u16,
//! }
//!
//! impl BasicDecodable for Medal {
//!     fn from_basic_mapper<S: InMap>(m: &BasicInMapper<'_, S>) -> Result<Self, DecodeError> {
//!         Ok(Medal { city: m.read(&["city"])?, year: m.read(&["year"])? })
//!     }
//! }
//!
//! impl BasicEncodable for Medal {
//!     fn to_basic_mapper<D: OutMap>(&self, m: &mut BasicOutMapper<D>) -> Result<(), EncodeError> {
//!         m.write(&self.city, &["city"])?;
//!         m.write(&self.year, &["year"])
//!     }
//! }
//!
//! let source = json!({"city": "Rio", "year": 2016});
//! let medal = Medal::decode(&source).unwrap();
//! assert_eq!(medal, Medal { city: "Rio".into(), year: 2016 });
//! assert_eq!(medal.encode::<serde_json::Value>().unwrap(), source);
//! ```
//!
//! # Features
//!
//! - `value` (default): the built-in [`Value`] backend.
//! - `json` (default): backend impls for `serde_json::Value`.
//! - `serde`: `Serialize`/`Deserialize` for [`Value`], [`Scalar`] and
//!   [`MappingIndex`].

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod decode;
mod encode;
mod error;
mod in_map;
mod in_mapper;
mod index;
mod out_map;
mod out_mapper;
mod scalar;

#[cfg(feature = "json")]
mod json;
#[cfg(feature = "value")]
mod value;


pub use decode::{BasicDecodable, Decodable, DecodableWithContext, Decode, RawRepresentable};
pub use encode::{BasicEncodable, Encodable, EncodableWithContext, Encode};
pub use error::{DecodeError, EncodeError};
pub use in_map::InMap;
pub use in_mapper::{
    BasicInMapper, ContextualInMapper, ContextualInMapping, InMapper, InMapping,
    PlainContextualInMapper, PlainInMapper,
};
pub use index::{IndexPath, MappingIndex, MappingKey, NoKeys};
pub use out_map::{OutMap, SetError};
pub use out_mapper::{
    BasicOutMapper, ContextualOutMapper, ContextualOutMapping, OutMapper, OutMapping,
    PlainContextualOutMapper, PlainOutMapper,
};
pub use scalar::Scalar;
#[cfg(feature = "value")]
pub use value::{Array, Map, Value};

#[doc(hidden)]
pub mod __private {
    pub use alloc::string::String;
    pub use core::option::Option;
}

/// Declares an enum of mapping keys, each bound to one path segment.
///
/// The enum implements [`MappingKey`] and, with its segments as raw values,
/// [`RawRepresentable`], so it can also be read and written as a field.
///
/// ```rust
/// use cartograph::{MappingIndex, MappingKey, RawRepresentable, mapping_keys};
///
/// mapping_keys! {
///     /// Keys of a planet record.
///     pub enum PlanetKeys {
///         Name = "name",
///         MoonCount = "moon-count",
///     }
/// }
///
/// assert_eq!(PlanetKeys::MoonCount.index(), MappingIndex::new("moon-count"));
/// assert_eq!(PlanetKeys::from_raw_value(&"name".to_string()), Some(PlanetKeys::Name));
/// assert_eq!(PlanetKeys::from_raw_value(&"rings".to_string()), None);
/// ```
#[macro_export]
macro_rules! mapping_keys {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$variant_meta:meta])* $variant:ident = $segment:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$variant_meta])* $variant ),+
        }

        impl $name {
            /// Returns the path segment this key stands for.
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $segment ),+
                }
            }
        }

        impl $crate::MappingKey for $name {
            fn index(&self) -> $crate::MappingIndex {
                $crate::MappingIndex::new(self.as_str())
            }
        }

        impl $crate::RawRepresentable for $name {
            type RawValue = $crate::__private::String;

            fn from_raw_value(raw: &Self::RawValue) -> $crate::__private::Option<Self> {
                match raw.as_str() {
                    $( $segment => $crate::__private::Option::Some(Self::$variant), )+
                    _ => $crate::__private::Option::None,
                }
            }

            fn raw_value(&self) -> Self::RawValue {
                $crate::__private::String::from(self.as_str())
            }
        }
    };
}
