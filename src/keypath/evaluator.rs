//! Replays a key path against concrete data.

use super::ast::SegmentKind;
use super::error::{ResolveError, ResolveFailure};
use super::path::KeyPath;
use crate::object::Navigate;
use std::any::Any;

impl KeyPath {
    /// Walks `obj` segment by segment and returns the value reached.
    ///
    /// Traversal stops at the first missing attribute, missing key,
    /// out-of-range index, or absent intermediate value.
    ///
    /// # Errors
    ///
    /// Returns a [`ResolveError`] naming the failing segment and the prefix
    /// traversed before it.
    pub fn resolve<'a>(&self, obj: &'a dyn Navigate) -> Result<&'a dyn Navigate, ResolveError> {
        let mut current = obj;

        for (index, segment) in self.segments().iter().enumerate() {
            if current.is_absent() {
                return Err(self.failure(index, ResolveFailure::Absent));
            }

            let next = match segment.kind() {
                SegmentKind::Attribute => segment
                    .value()
                    .as_str()
                    .and_then(|name| current.attribute(name)),
                SegmentKind::Index => current.item(segment.value()),
            };

            current = match next {
                Some(value) => value,
                None => {
                    let failure = if segment.is_attribute() {
                        ResolveFailure::MissingAttribute
                    } else {
                        ResolveFailure::MissingKey
                    };
                    return Err(self.failure(index, failure));
                }
            };
        }

        Ok(current)
    }

    /// Like [`KeyPath::resolve`], discarding the error.
    pub fn try_resolve<'a>(&self, obj: &'a dyn Navigate) -> Option<&'a dyn Navigate> {
        self.resolve(obj).ok()
    }

    /// Resolves the path and downcasts the reached value to `T`.
    ///
    /// Transparent wrappers at the leaf (`Some`, `Box`, `Rc`, `Arc`) are
    /// peeled when the wrapper itself is not a `T`.
    ///
    /// ```
    /// use keyof::KeyPath;
    /// use serde_json::json;
    ///
    /// let doc = json!({"meta": {"version": "1.0"}});
    /// let path = KeyPath::of(|d| d.item("meta").item("version")).unwrap();
    /// assert_eq!(path.extract::<serde_json::Value>(&doc).unwrap(), "1.0");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns a [`ResolveError`] when resolution fails, or with
    /// [`ResolveFailure::TypeMismatch`] when the value is not a `T`.
    pub fn extract<'a, T: Any>(&self, obj: &'a dyn Navigate) -> Result<&'a T, ResolveError> {
        let value = self.resolve(obj)?;
        let mut candidate = Some(value);
        while let Some(current) = candidate {
            if let Some(found) = current.as_any().downcast_ref::<T>() {
                return Ok(found);
            }
            candidate = current.unwrapped();
        }
        let last = self.depth() - 1;
        Err(ResolveError {
            index: last,
            segment: self.segments()[last].clone(),
            traversed: self.segments().to_vec(),
            failure: ResolveFailure::TypeMismatch {
                expected: std::any::type_name::<T>(),
                found: value.type_name(),
            },
        })
    }

    /// Resolves the path, falling back to `default` on any failure.
    pub fn extract_or<'a, T: Any>(&self, obj: &'a dyn Navigate, default: &'a T) -> &'a T {
        self.extract(obj).unwrap_or(default)
    }

    /// Resolves the path, computing a fallback from the error on failure.
    pub fn extract_or_else<'a, T, F>(&self, obj: &'a dyn Navigate, fallback: F) -> &'a T
    where
        T: Any,
        F: FnOnce(ResolveError) -> &'a T,
    {
        self.extract(obj).unwrap_or_else(fallback)
    }

    fn failure(&self, index: usize, failure: ResolveFailure) -> ResolveError {
        let err = ResolveError {
            index,
            segment: self.segments()[index].clone(),
            traversed: self.segments()[..index].to_vec(),
            failure,
        };
        tracing::debug!(path = %self, error = %err, "key path resolution failed");
        err
    }
}
