//! Recording proxy and the optional-unwrap marker used during capture.
//!
//! A [`Recorder`] stands in for the navigated object while an accessor
//! closure runs. Each `attr`/`item` call consumes the recorder and returns a
//! new one positioned one level deeper, so the recorded order is always the
//! order in which the accesses were invoked.
//!
//! ```
//! use keyof::{KeyPath, NN, nn};
//!
//! let a = KeyPath::of(|u| nn(u.attr("address")).attr("city")).unwrap();
//! let b = KeyPath::of(|u| (u.attr("address") | NN).attr("city")).unwrap();
//! assert_eq!(a, b);
//! assert_eq!(a.to_dot(), "address.city");
//! ```

use super::ast::{is_identifier, Key, Segment};
use super::error::CaptureError;
use std::ops::{BitOr, Range, RangeFrom, RangeFull, RangeInclusive, RangeTo};

/// The transient stand-in passed to accessor closures.
///
/// Only attribute and item access exist on this type. It is deliberately not
/// `Clone`: a capture is a single linear chain.
#[derive(Debug, Default)]
#[must_use = "a recorder must be returned from the accessor for its segments to be captured"]
pub struct Recorder {
    segments: Vec<Segment>,
    error: Option<CaptureError>,
}

impl Recorder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Records a named attribute access.
    ///
    /// The name must look like an identifier (`[A-Za-z_][A-Za-z0-9_]*`) and
    /// must not be a dunder name such as `__class__`.
    pub fn attr(mut self, name: &str) -> Self {
        if self.error.is_some() {
            return self;
        }
        if is_attribute_name(name) {
            self.segments.push(Segment::attribute(name));
        } else {
            self.error = Some(CaptureError::InvalidAttribute {
                position: self.segments.len(),
                name: name.to_string(),
            });
        }
        self
    }

    /// Records a subscript access by key or position.
    pub fn item(mut self, key: impl Into<Subscript>) -> Self {
        if self.error.is_some() {
            return self;
        }
        match key.into() {
            Subscript::Key(key) => self.segments.push(Segment::index(key)),
            Subscript::Unsupported(operation) => {
                self.error = Some(CaptureError::Unsupported {
                    position: self.segments.len(),
                    operation,
                });
            }
        }
        self
    }

    /// Number of segments recorded so far.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub(crate) fn finish(self) -> Result<Vec<Segment>, CaptureError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        if self.segments.is_empty() {
            return Err(CaptureError::Empty);
        }
        Ok(self.segments)
    }
}

fn is_attribute_name(name: &str) -> bool {
    let is_dunder = name.starts_with("__") && name.ends_with("__");
    is_identifier(name) && !is_dunder
}

/// Argument accepted by [`Recorder::item`].
///
/// Strings and integers become keys. Slice-like ranges convert, but are
/// recorded as unsupported operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subscript {
    Key(Key),
    Unsupported(&'static str),
}

impl From<Key> for Subscript {
    fn from(value: Key) -> Self {
        Subscript::Key(value)
    }
}

impl From<&str> for Subscript {
    fn from(value: &str) -> Self {
        Subscript::Key(Key::from(value))
    }
}

impl From<String> for Subscript {
    fn from(value: String) -> Self {
        Subscript::Key(Key::Str(value))
    }
}

impl From<&String> for Subscript {
    fn from(value: &String) -> Self {
        Subscript::Key(Key::from(value))
    }
}

macro_rules! subscript_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Subscript {
                fn from(value: $ty) -> Self {
                    match i64::try_from(value) {
                        Ok(i) => Subscript::Key(Key::Int(i)),
                        Err(_) => Subscript::Unsupported("integer key out of range"),
                    }
                }
            }
        )*
    };
}

subscript_from_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! subscript_from_range {
    ($($ty:ty),*) => {
        $(
            impl<T> From<$ty> for Subscript {
                fn from(_: $ty) -> Self {
                    Subscript::Unsupported("slice")
                }
            }
        )*
    };
}

subscript_from_range!(Range<T>, RangeFrom<T>, RangeTo<T>, RangeInclusive<T>);

impl From<RangeFull> for Subscript {
    fn from(_: RangeFull) -> Self {
        Subscript::Unsupported("slice")
    }
}

/// Marker asserting that the preceding optional value is present.
///
/// It never changes what is recorded: `nn(r)`, `NN.apply(r)` and `r | NN`
/// all return `r` untouched. At extraction time an absent value still fails
/// (or yields the default) exactly like an unguarded path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Unwrap;

/// The unwrap marker constant, for the `recorder | NN` form.
pub const NN: Unwrap = Unwrap;

impl Unwrap {
    pub fn apply(self, recorder: Recorder) -> Recorder {
        recorder
    }
}

impl BitOr<Unwrap> for Recorder {
    type Output = Recorder;

    fn bitor(self, marker: Unwrap) -> Recorder {
        marker.apply(self)
    }
}

/// Function form of the unwrap marker.
pub fn nn(recorder: Recorder) -> Recorder {
    NN.apply(recorder)
}
