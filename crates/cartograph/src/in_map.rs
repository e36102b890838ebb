use alloc::borrow::ToOwned;

use crate::{MappingIndex, Scalar};

/// A structured value that typed values can be decoded from.
///
/// Backends implement single-level navigation, array access and the four
/// canonical scalar accessors. Everything else has a default derived from
/// those, and may be overridden when the backend stores a narrower or wider
/// representation natively.
pub trait InMap: Sized {
    /// Returns the child at `index`; `None` on a missing key, an out of range
    /// position or a value that has no children.
    fn get(&self, index: &MappingIndex) -> Option<&Self>;

    /// Follows `path` one segment at a time. The empty path returns `self`.
    fn get_path(&self, path: &[MappingIndex]) -> Option<&Self> {
        path.iter().try_fold(self, |value, index| value.get(index))
    }

    /// The elements of `self` if it is an array.
    fn as_array(&self) -> Option<&[Self]>;

    /// `self` as the canonical integer.
    fn as_int(&self) -> Option<i64>;

    /// `self` as the canonical floating point number.
    fn as_double(&self) -> Option<f64>;

    /// `self` as a boolean.
    fn as_bool(&self) -> Option<bool>;

    /// `self` as a string.
    fn as_str(&self) -> Option<&str>;

    /// Returns `true` for the backend's explicit null, if it has one.
    fn is_null(&self) -> bool {
        false
    }

    /// `self` as one of the closed set of scalar kinds.
    fn as_scalar(&self) -> Option<Scalar> {
        if let Some(b) = self.as_bool() {
            return Some(Scalar::Bool(b));
        }
        if let Some(i) = self.as_int() {
            return Some(Scalar::Int(i));
        }
        if let Some(u) = self.as_u64() {
            return Some(Scalar::UInt(u));
        }
        if let Some(d) = self.as_double() {
            return Some(Scalar::Double(d));
        }
        self.as_str().map(|s| Scalar::String(s.to_owned()))
    }

    // Fixed-width accessors. Narrowing is checked, so a value that does not
    // fit the target width reads as absent.

    /// `self` as an `i8`.
    fn as_i8(&self) -> Option<i8> {
        self.as_int().and_then(|v| v.try_into().ok())
    }

    /// `self` as an `i16`.
    fn as_i16(&self) -> Option<i16> {
        self.as_int().and_then(|v| v.try_into().ok())
    }

    /// `self` as an `i32`.
    fn as_i32(&self) -> Option<i32> {
        self.as_int().and_then(|v| v.try_into().ok())
    }

    /// `self` as an `i64`.
    fn as_i64(&self) -> Option<i64> {
        self.as_int()
    }

    /// `self` as an `isize`.
    fn as_isize(&self) -> Option<isize> {
        self.as_int().and_then(|v| v.try_into().ok())
    }

    /// `self` as a `u8`.
    fn as_u8(&self) -> Option<u8> {
        self.as_int().and_then(|v| v.try_into().ok())
    }

    /// `self` as a `u16`.
    fn as_u16(&self) -> Option<u16> {
        self.as_int().and_then(|v| v.try_into().ok())
    }

    /// `self` as a `u32`.
    fn as_u32(&self) -> Option<u32> {
        self.as_int().and_then(|v| v.try_into().ok())
    }

    /// `self` as a `u64`.
    fn as_u64(&self) -> Option<u64> {
        self.as_int().and_then(|v| v.try_into().ok())
    }

    /// `self` as a `usize`.
    fn as_usize(&self) -> Option<usize> {
        self.as_u64().and_then(|v| v.try_into().ok())
    }

    /// `self` as an `f32`. Finite values beyond the `f32` range read as
    /// absent.
    fn as_f32(&self) -> Option<f32> {
        self.as_double().and_then(crate::scalar::narrow_f32)
    }
}

#[cfg(test)]
mod test {
    use alloc::{string::String, vec, vec::Vec};

    use super::*;

    // Scalars only, plus a keyed node so paths can be followed.
    #[derive(Debug, PartialEq)]
    enum Node {
        Leaf(Scalar),
        List(Vec<Node>),
        Keyed(Vec<(String, Node)>),
    }

    impl InMap for Node {
        fn get(&self, index: &MappingIndex) -> Option<&Self> {
            match self {
                Node::Keyed(entries) => entries
                    .iter()
                    .find(|(k, _)| k == index.as_str())
                    .map(|(_, v)| v),
                _ => None,
            }
        }

        fn as_array(&self) -> Option<&[Self]> {
            match self {
                Node::List(items) => Some(items),
                _ => None,
            }
        }

        fn as_int(&self) -> Option<i64> {
            match self {
                Node::Leaf(Scalar::Int(v)) => Some(*v),
                _ => None,
            }
        }

        fn as_double(&self) -> Option<f64> {
            match self {
                Node::Leaf(Scalar::Double(v)) => Some(*v),
                _ => None,
            }
        }

        fn as_bool(&self) -> Option<bool> {
            match self {
                Node::Leaf(Scalar::Bool(v)) => Some(*v),
                _ => None,
            }
        }

        fn as_str(&self) -> Option<&str> {
            match self {
                Node::Leaf(Scalar::String(v)) => Some(v),
                _ => None,
            }
        }
    }

    fn leaf(value: impl Into<Scalar>) -> Node {
        Node::Leaf(value.into())
    }

    #[test]
    fn get_path_follows_every_segment() {
        let tree = Node::Keyed(vec![(
            "outer".into(),
            Node::Keyed(vec![("inner".into(), leaf(3_i64))]),
        )]);
        let path = [MappingIndex::new("outer"), MappingIndex::new("inner")];
        assert_eq!(tree.get_path(&path), Some(&leaf(3_i64)));
        assert_eq!(tree.get_path(&path[..1]).map(InMap::as_int), Some(None));
        assert_eq!(tree.get_path(&[MappingIndex::new("inner")]), None);
        assert_eq!(leaf(1_i64).get_path(&path), None);
    }

    #[test]
    fn narrowing_accessors_are_checked() {
        let big = leaf(300_i64);
        assert_eq!(big.as_i16(), Some(300));
        assert_eq!(big.as_u8(), None);
        assert_eq!(big.as_i8(), None);

        let negative = leaf(-1_i64);
        assert_eq!(negative.as_i32(), Some(-1));
        assert_eq!(negative.as_u64(), None);
        assert_eq!(negative.as_usize(), None);
    }

    #[test]
    fn scalar_kinds_come_from_the_canonical_accessors() {
        assert_eq!(leaf(true).as_scalar(), Some(Scalar::Bool(true)));
        assert_eq!(leaf(-4_i64).as_scalar(), Some(Scalar::Int(-4)));
        assert_eq!(leaf(0.5).as_scalar(), Some(Scalar::Double(0.5)));
        assert_eq!(leaf("x").as_scalar(), Some(Scalar::String("x".into())));
        assert_eq!(Node::List(vec![]).as_scalar(), None);
        assert!(!leaf(0_i64).is_null());
    }

    #[test]
    fn f32_narrows_from_the_canonical_double() {
        assert_eq!(leaf(0.25).as_f32(), Some(0.25));
        assert_eq!(leaf(1_i64).as_f32(), None);
        assert_eq!(leaf(1e300).as_f32(), None);
        assert_eq!(leaf(-1e300).as_f32(), None);
    }
}
