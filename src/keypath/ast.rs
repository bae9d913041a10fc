//! Segment types that make up a captured key path.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The raw value of a path step: an attribute name, a mapping key, or a
/// sequence position.
///
/// Keys are totally ordered: every integer sorts before every string,
/// integers compare numerically and strings compare byte-wise.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    /// Integer key or sequence position (`[0]`, `[-1]`)
    Int(i64),
    /// String key or attribute name
    Str(String),
}

impl Key {
    /// Returns the string value, if this is a string key.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::Str(s) => Some(s),
            Key::Int(_) => None,
        }
    }

    /// Returns the integer value, if this is an integer key.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Key::Int(i) => Some(*i),
            Key::Str(_) => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(i) => write!(f, "{}", i),
            Key::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::Str(value.to_string())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::Str(value)
    }
}

impl From<&String> for Key {
    fn from(value: &String) -> Self {
        Key::Str(value.clone())
    }
}

macro_rules! key_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Key {
                fn from(value: $ty) -> Self {
                    Key::Int(value as i64)
                }
            }
        )*
    };
}

key_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl PartialEq<str> for Key {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == Some(other)
    }
}

impl PartialEq<&str> for Key {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

impl PartialEq<i64> for Key {
    fn eq(&self, other: &i64) -> bool {
        self.as_int() == Some(*other)
    }
}

impl PartialEq<i32> for Key {
    fn eq(&self, other: &i32) -> bool {
        self.as_int() == Some(*other as i64)
    }
}

/// Whether `s` looks like an identifier: `[A-Za-z_][A-Za-z0-9_]*`.
pub(crate) fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// How a segment is applied during traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    /// Named attribute access (`.name`)
    Attribute,
    /// Subscript access by key or position (`["key"]`, `[0]`)
    Index,
}

impl SegmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SegmentKind::Attribute => "attribute",
            SegmentKind::Index => "index",
        }
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single navigation step.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawSegment")]
pub struct Segment {
    kind: SegmentKind,
    value: Key,
}

#[derive(Deserialize)]
struct RawSegment {
    kind: SegmentKind,
    value: Key,
}

impl TryFrom<RawSegment> for Segment {
    type Error = String;

    fn try_from(raw: RawSegment) -> Result<Self, Self::Error> {
        match (raw.kind, raw.value) {
            (SegmentKind::Attribute, Key::Int(i)) => {
                Err(format!("attribute segment must be named, found integer {}", i))
            }
            (kind, value) => Ok(Self { kind, value }),
        }
    }
}

impl Segment {
    /// Creates an attribute step. Attribute names are always string keys.
    pub fn attribute(name: impl Into<String>) -> Self {
        Self {
            kind: SegmentKind::Attribute,
            value: Key::Str(name.into()),
        }
    }

    /// Creates a subscript step.
    pub fn index(key: impl Into<Key>) -> Self {
        Self {
            kind: SegmentKind::Index,
            value: key.into(),
        }
    }

    pub fn kind(&self) -> SegmentKind {
        self.kind
    }

    pub fn value(&self) -> &Key {
        &self.value
    }

    /// Whether this step is a named attribute access.
    pub fn is_attribute(&self) -> bool {
        self.kind == SegmentKind::Attribute
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.kind, &self.value) {
            (SegmentKind::Attribute, value) => write!(f, ".{}", value),
            (SegmentKind::Index, Key::Int(i)) => write!(f, "[{}]", i),
            (SegmentKind::Index, Key::Str(s)) => write!(f, "[{:?}]", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_equality_uses_kind_and_value() {
        assert_eq!(Segment::attribute("name"), Segment::attribute("name"));
        assert_ne!(Segment::attribute("name"), Segment::index("name"));
        assert_ne!(Segment::index(0), Segment::index("0"));
    }

    #[test]
    fn test_attribute_value_is_string_key() {
        let seg = Segment::attribute("city");
        assert_eq!(seg.kind(), SegmentKind::Attribute);
        assert!(seg.is_attribute());
        assert!(!Segment::index("city").is_attribute());
        assert_eq!(seg.value(), &Key::Str("city".to_string()));
    }

    #[test]
    fn test_key_ordering_puts_integers_first() {
        let mut keys = vec![Key::from("b"), Key::from(10), Key::from("a"), Key::from(-1)];
        keys.sort();
        assert_eq!(
            keys,
            vec![Key::Int(-1), Key::Int(10), Key::from("a"), Key::from("b")]
        );
    }

    #[test]
    fn test_segment_display() {
        assert_eq!(Segment::attribute("city").to_string(), ".city");
        assert_eq!(Segment::index(3).to_string(), "[3]");
        assert_eq!(Segment::index("role").to_string(), "[\"role\"]");
    }

    #[test]
    fn test_segment_serde_shape() {
        let json = serde_json::to_string(&Segment::index(0)).unwrap();
        assert_eq!(json, r#"{"kind":"index","value":0}"#);
        let back: Segment = serde_json::from_str(r#"{"kind":"attribute","value":"city"}"#).unwrap();
        assert_eq!(back, Segment::attribute("city"));
    }

    #[test]
    fn test_integer_attribute_is_rejected() {
        let result: Result<Segment, _> = serde_json::from_str(r#"{"kind":"attribute","value":3}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_key_compares_with_primitives() {
        assert_eq!(Key::from("prefs"), "prefs");
        assert_eq!(Key::from(7), 7i64);
        assert_ne!(Key::from("7"), 7i64);
    }
}
