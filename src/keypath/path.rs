//! The immutable key path value.

use super::ast::{Key, Segment};
use super::error::{CaptureError, NoParentError};
use super::recorder::Recorder;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// An immutable, non-empty path through an object graph.
///
/// A `KeyPath` is captured from an accessor closure with [`KeyPath::of`] and
/// can later be replayed against real data (see [`KeyPath::extract`]) or
/// rendered into textual notations.
///
/// # Equality and hashing
///
/// Two paths are equal when their segment sequences are equal. A path also
/// compares equal to a string holding its dot rendering, and hashes exactly
/// like that string, so a `KeyPath` and its dot form land in the same bucket
/// of any hash-based container.
///
/// # Example
///
/// ```
/// use keyof::KeyPath;
///
/// let path = KeyPath::of(|d| d.item("users").item(0).item("name")).unwrap();
/// assert_eq!(path.depth(), 3);
/// assert_eq!(path.to_bracket(), "['users'][0]['name']");
/// assert_eq!(path, "users.0.name");
/// ```
#[derive(Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<Segment>", into = "Vec<Segment>")]
pub struct KeyPath {
    segments: Arc<[Segment]>,
    dot: Arc<str>,
}

impl KeyPath {
    /// Captures an accessor closure as a key path.
    ///
    /// The closure runs exactly once against a fresh [`Recorder`]. It must
    /// perform at least one access; a panic inside the closure propagates.
    pub fn of<F>(accessor: F) -> Result<Self, CaptureError>
    where
        F: FnOnce(Recorder) -> Recorder,
    {
        match accessor(Recorder::new()).finish() {
            Ok(segments) => {
                let path = Self::from_vec(segments);
                tracing::trace!(path = %path, depth = path.depth(), "captured key path");
                Ok(path)
            }
            Err(err) => {
                tracing::debug!(error = %err, "key path capture failed");
                Err(err)
            }
        }
    }

    /// Builds a path directly from segments.
    pub fn from_segments<I>(segments: I) -> Result<Self, CaptureError>
    where
        I: IntoIterator<Item = Segment>,
    {
        let segments: Vec<Segment> = segments.into_iter().collect();
        if segments.is_empty() {
            return Err(CaptureError::Empty);
        }
        Ok(Self::from_vec(segments))
    }

    fn from_vec(segments: Vec<Segment>) -> Self {
        let dot = join_values(&segments, ".");
        Self {
            segments: segments.into(),
            dot: dot.into(),
        }
    }

    /// The typed segments, in traversal order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The raw segment values, without kind tags.
    pub fn parts(&self) -> Parts<'_> {
        Parts {
            inner: self.segments.iter(),
        }
    }

    /// Alias of [`KeyPath::parts`].
    pub fn iter(&self) -> Parts<'_> {
        self.parts()
    }

    /// Number of segments.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.depth()
    }

    /// First segment value, e.g. `address` for `address.city`.
    pub fn root(&self) -> &Key {
        self.segments[0].value()
    }

    /// Last segment value, e.g. `city` for `address.city`.
    pub fn leaf(&self) -> &Key {
        self.segments[self.segments.len() - 1].value()
    }

    /// Checks whether any segment value equals `part`.
    pub fn contains(&self, part: impl Into<Key>) -> bool {
        let part = part.into();
        self.parts().any(|p| *p == part)
    }

    /// Returns the path one level up.
    ///
    /// # Errors
    ///
    /// Returns [`NoParentError`] when the path has a single segment.
    pub fn parent(&self) -> Result<KeyPath, NoParentError> {
        if self.depth() < 2 {
            return Err(NoParentError {
                path: self.dot.to_string(),
            });
        }
        Ok(Self::from_vec(self.segments[..self.depth() - 1].to_vec()))
    }

    /// Cached dot rendering.
    pub(crate) fn dot(&self) -> &str {
        &self.dot
    }
}

/// Joins segment values with `sep`, without any escaping.
pub(crate) fn join_values(segments: &[Segment], sep: &str) -> String {
    segments
        .iter()
        .map(|s| s.value().to_string())
        .collect::<Vec<_>>()
        .join(sep)
}

/// Iterator over the raw values of a [`KeyPath`].
#[derive(Debug, Clone)]
pub struct Parts<'a> {
    inner: std::slice::Iter<'a, Segment>,
}

impl<'a> Iterator for Parts<'a> {
    type Item = &'a Key;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(Segment::value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Parts<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(Segment::value)
    }
}

impl ExactSizeIterator for Parts<'_> {}

impl<'a> IntoIterator for &'a KeyPath {
    type Item = &'a Key;
    type IntoIter = Parts<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.parts()
    }
}

impl TryFrom<Vec<Segment>> for KeyPath {
    type Error = CaptureError;

    fn try_from(segments: Vec<Segment>) -> Result<Self, Self::Error> {
        Self::from_segments(segments)
    }
}

impl From<KeyPath> for Vec<Segment> {
    fn from(path: KeyPath) -> Self {
        path.segments.to_vec()
    }
}

impl PartialEq for KeyPath {
    fn eq(&self, other: &Self) -> bool {
        self.segments == other.segments
    }
}

impl Eq for KeyPath {}

// Must agree with `str::hash` of the dot rendering.
impl Hash for KeyPath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.dot().hash(state);
    }
}

impl PartialEq<str> for KeyPath {
    fn eq(&self, other: &str) -> bool {
        self.dot() == other
    }
}

impl PartialEq<&str> for KeyPath {
    fn eq(&self, other: &&str) -> bool {
        self.dot() == *other
    }
}

impl PartialEq<String> for KeyPath {
    fn eq(&self, other: &String) -> bool {
        self.dot() == other.as_str()
    }
}

impl PartialEq<KeyPath> for str {
    fn eq(&self, other: &KeyPath) -> bool {
        other == self
    }
}

impl PartialEq<KeyPath> for &str {
    fn eq(&self, other: &KeyPath) -> bool {
        other == *self
    }
}

impl PartialEq<KeyPath> for String {
    fn eq(&self, other: &KeyPath) -> bool {
        other == self
    }
}

impl Ord for KeyPath {
    /// Lexicographic over the raw parts; on a tie, segment kinds decide
    /// (attribute before index) so that ordering agrees with equality.
    fn cmp(&self, other: &Self) -> Ordering {
        self.parts().cmp(other.parts()).then_with(|| {
            let kinds = self.segments.iter().map(Segment::kind);
            kinds.cmp(other.segments.iter().map(Segment::kind))
        })
    }
}

impl PartialOrd for KeyPath {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dot())
    }
}

impl fmt::Debug for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyPath({})", self.dot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::RandomState;
    use std::collections::HashSet;
    use std::hash::BuildHasher;

    fn theme_path() -> KeyPath {
        KeyPath::of(|u| u.attr("metadata").item("prefs").item("theme")).unwrap()
    }

    #[test]
    fn test_introspection() {
        let path = theme_path();
        assert_eq!(path.depth(), 3);
        assert_eq!(path.len(), 3);
        assert_eq!(path.root(), "metadata");
        assert_eq!(path.leaf(), "theme");
        let parts: Vec<String> = path.parts().map(|p| p.to_string()).collect();
        assert_eq!(parts, vec!["metadata", "prefs", "theme"]);
    }

    #[test]
    fn test_iteration_is_restartable() {
        let path = theme_path();
        let first: Vec<&Key> = path.iter().collect();
        let second: Vec<&Key> = (&path).into_iter().collect();
        assert_eq!(first, second);
        assert_eq!(path.iter().len(), 3);
        assert_eq!(path.iter().rev().next(), Some(path.leaf()));
    }

    #[test]
    fn test_contains() {
        let path = theme_path();
        assert!(path.contains("prefs"));
        assert!(path.contains("metadata"));
        assert!(!path.contains("other"));
        assert!(!path.contains(0));
    }

    #[test]
    fn test_parent_chain() {
        let path = theme_path();
        let parent = path.parent().unwrap();
        assert_eq!(parent.to_string(), "metadata.prefs");
        let grandparent = parent.parent().unwrap();
        assert_eq!(grandparent.to_string(), "metadata");
        let err = grandparent.parent().unwrap_err();
        assert_eq!(err.path, "metadata");
    }

    #[test]
    fn test_from_segments_rejects_empty() {
        assert_eq!(
            KeyPath::from_segments(Vec::new()).unwrap_err(),
            CaptureError::Empty
        );
    }

    #[test]
    fn test_hash_matches_dot_string() {
        let path = KeyPath::of(|u| u.attr("address").attr("city")).unwrap();
        let state = RandomState::new();
        assert_eq!(state.hash_one(&path), state.hash_one("address.city"));
    }

    #[test]
    fn test_equal_captures_collapse_in_sets() {
        let a = KeyPath::of(|u| u.attr("name")).unwrap();
        let b = KeyPath::of(|u| u.attr("name")).unwrap();
        let set: HashSet<KeyPath> = [a.clone(), b].into_iter().collect();
        assert_eq!(set.len(), 1);
        assert!(set.contains(&a));
    }

    #[test]
    fn test_string_equality_both_directions() {
        let path = KeyPath::of(|u| u.attr("address").attr("city")).unwrap();
        assert_eq!(path, "address.city");
        assert_eq!("address.city", path);
        assert_eq!(path, "address.city".to_string());
        assert_eq!("address.city".to_string(), path);
        assert_ne!(path, "address");
    }

    #[test]
    fn test_attribute_and_index_differ_but_render_alike() {
        let attr = KeyPath::of(|u| u.attr("users").attr("name")).unwrap();
        let item = KeyPath::of(|u| u.item("users").item("name")).unwrap();
        assert_ne!(attr, item);
        assert_eq!(attr.to_string(), item.to_string());
        assert_ne!(attr.cmp(&item), Ordering::Equal);
    }

    #[test]
    fn test_sorting() {
        let name = KeyPath::of(|u| u.attr("name")).unwrap();
        let id = KeyPath::of(|u| u.attr("id")).unwrap();
        let metadata = KeyPath::of(|u| u.attr("metadata")).unwrap();
        let mut paths = vec![name.clone(), id.clone(), metadata.clone()];
        paths.sort();
        assert_eq!(paths, vec![id, metadata, name]);
    }

    #[test]
    fn test_prefix_sorts_first() {
        let short = KeyPath::of(|u| u.attr("a")).unwrap();
        let long = KeyPath::of(|u| u.attr("a").attr("b")).unwrap();
        assert!(short < long);
    }

    #[test]
    fn test_debug_format() {
        let path = KeyPath::of(|u| u.attr("name")).unwrap();
        assert_eq!(format!("{:?}", path), "KeyPath(name)");
        assert_eq!(format!("{}", path), "name");
    }
}
