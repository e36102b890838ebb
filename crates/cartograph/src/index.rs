use alloc::{string::String, sync::Arc, vec::Vec};
use core::fmt;

/// A single segment of a path into a structured value.
///
/// Segments are opaque string keys. Backends that support arrays may also
/// resolve a segment against array elements when it parses as an index (see
/// [`MappingIndex::as_array_index`]).
#[cfg_attr(
    any(test, feature = "serde"),
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MappingIndex(Arc<str>);

impl MappingIndex {
    /// Creates a segment from a key.
    #[must_use]
    pub fn new(key: &str) -> Self {
        Self(key.into())
    }

    /// Returns the key this segment stands for.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the segment interpreted as an array position, if it is one.
    ///
    /// Only canonical decimal forms count: `"0"` and `"7"` are positions,
    /// `"007"` is an ordinary key.
    #[must_use]
    pub fn as_array_index(&self) -> Option<usize> {
        let canonical = self.0.len() == 1 || !self.0.starts_with('0');
        if canonical && self.0.bytes().all(|b| b.is_ascii_digit()) {
            self.0.parse().ok()
        } else {
            None
        }
    }
}

impl From<&str> for MappingIndex {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for MappingIndex {
    fn from(key: String) -> Self {
        Self(key.into())
    }
}

impl From<usize> for MappingIndex {
    fn from(index: usize) -> Self {
        Self(alloc::format!("{index}").into())
    }
}

impl fmt::Display for MappingIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An ordered list of segments locating a value inside a structured value.
///
/// Displays as `$` for the root and `$.nest.int` for nested locations.
#[cfg_attr(
    any(test, feature = "serde"),
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct IndexPath(Vec<MappingIndex>);

impl IndexPath {
    /// The empty path, addressing the root value.
    #[must_use]
    pub const fn root() -> Self {
        Self(Vec::new())
    }

    /// Returns the segments of the path.
    #[must_use]
    pub fn as_slice(&self) -> &[MappingIndex] {
        &self.0
    }

    /// Returns the number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the path addresses the root value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the segments.
    pub fn iter(&self) -> impl Iterator<Item = &MappingIndex> {
        self.0.iter()
    }
}

impl From<Vec<MappingIndex>> for IndexPath {
    fn from(segments: Vec<MappingIndex>) -> Self {
        Self(segments)
    }
}

impl FromIterator<MappingIndex> for IndexPath {
    fn from_iter<I: IntoIterator<Item = MappingIndex>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl AsRef<[MappingIndex]> for IndexPath {
    fn as_ref(&self) -> &[MappingIndex] {
        &self.0
    }
}

impl fmt::Display for IndexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for segment in &self.0 {
            write!(f, ".{segment}")?;
        }
        Ok(())
    }
}

/// A type that renders itself as exactly one path segment.
///
/// Implemented for string keys and for enums declared with
/// [`mapping_keys!`](crate::mapping_keys). Each mappable type picks one key
/// type, which restricts the paths its mapper accepts.
pub trait MappingKey {
    /// Returns the path segment for this key.
    fn index(&self) -> MappingIndex;
}

impl MappingKey for &str {
    fn index(&self) -> MappingIndex {
        MappingIndex::new(self)
    }
}

impl MappingKey for String {
    fn index(&self) -> MappingIndex {
        MappingIndex::new(self)
    }
}

impl MappingKey for MappingIndex {
    fn index(&self) -> MappingIndex {
        self.clone()
    }
}

/// Key type with no keys at all: the only path it can form is the empty one.
///
/// Used by types that map themselves as a whole value rather than as fields
/// of an object (see [`PlainInMapper`](crate::PlainInMapper)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoKeys {}

impl MappingKey for NoKeys {
    fn index(&self) -> MappingIndex {
        match *self {}
    }
}

pub(crate) fn indices<K: MappingKey>(path: &[K]) -> Vec<MappingIndex> {
    path.iter().map(MappingKey::index).collect()
}

#[cfg(test)]
mod test {
    use alloc::{string::ToString, vec};

    use super::*;

    #[test]
    fn index_path_display() {
        assert_eq!(IndexPath::root().to_string(), "$");
        let path: IndexPath = ["nest", "int"].into_iter().map(MappingIndex::from).collect();
        assert_eq!(path.to_string(), "$.nest.int");
    }

    #[test]
    fn array_index_segments() {
        assert_eq!(MappingIndex::from(3usize).as_array_index(), Some(3));
        assert_eq!(MappingIndex::new("12").as_array_index(), Some(12));
        assert_eq!(MappingIndex::new("+1").as_array_index(), None);
        assert_eq!(MappingIndex::new("int").as_array_index(), None);
        assert_eq!(MappingIndex::new("").as_array_index(), None);
        assert_eq!(MappingIndex::new("0").as_array_index(), Some(0));
        assert_eq!(MappingIndex::new("007").as_array_index(), None);
        assert_eq!(MappingIndex::new("00").as_array_index(), None);
    }

    #[test]
    fn string_keys_render_one_segment() {
        assert_eq!(indices(&["a", "b"]), vec![MappingIndex::new("a"), MappingIndex::new("b")]);
        assert_eq!("peach-int".to_string().index(), MappingIndex::new("peach-int"));
        assert!(indices::<NoKeys>(&[]).is_empty());
    }
}
