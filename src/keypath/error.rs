//! Error types for key path capture, resolution, and navigation.

use super::ast::Segment;
use std::fmt;

/// Errors raised while capturing an accessor closure into a `KeyPath`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CaptureError {
    /// The accessor performed no attribute or item access.
    #[error("accessor performed no attribute or item access; a key path needs at least one segment")]
    Empty,
    /// An attribute name that is empty, not identifier-like, or a dunder name.
    #[error("invalid attribute name '{name}' at segment {position}")]
    InvalidAttribute { position: usize, name: String },
    /// An operation the recorder cannot express as a path segment.
    #[error("unsupported operation at segment {position}: {operation}")]
    Unsupported {
        position: usize,
        operation: &'static str,
    },
}

/// Why a resolution step failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveFailure {
    /// The current value has no attribute with this name.
    MissingAttribute,
    /// The key is missing or the index is out of range.
    MissingKey,
    /// An intermediate value was absent (`None`, `null`) before the path was exhausted.
    Absent,
    /// The reached value is not of the requested type.
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

/// Error raised when a key path cannot be resolved against an object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveError {
    /// Position of the failing segment.
    pub index: usize,
    /// The failing segment.
    pub segment: Segment,
    /// Segments traversed successfully before the failure.
    pub traversed: Vec<Segment>,
    pub failure: ResolveFailure,
}

impl ResolveError {
    /// Dot rendering of the traversed prefix, empty at the root.
    pub fn traversed_dot(&self) -> String {
        self.traversed
            .iter()
            .map(|s| s.value().to_string())
            .collect::<Vec<_>>()
            .join(".")
    }
}

// Written by hand: the message layout differs per failure variant.
impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let via = self.traversed_dot();
        let via = if via.is_empty() { "<root>" } else { via.as_str() };
        match &self.failure {
            ResolveFailure::MissingAttribute => write!(
                f,
                "cannot resolve attribute '{}' at segment {} (path: '{}')",
                self.segment.value(),
                self.index,
                via
            ),
            ResolveFailure::MissingKey => write!(
                f,
                "cannot resolve key {} at segment {} (path: '{}')",
                self.segment, self.index, via
            ),
            ResolveFailure::Absent => write!(
                f,
                "cannot resolve '{}' on an absent value at segment {} (reached via '{}')",
                self.segment.value(),
                self.index,
                via
            ),
            ResolveFailure::TypeMismatch { expected, found } => write!(
                f,
                "value at '{}' is {}, expected {}",
                via, found, expected
            ),
        }
    }
}

impl std::error::Error for ResolveError {}

/// Error raised by `KeyPath::parent` on a single-segment path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("path '{path}' has no parent (depth=1)")]
pub struct NoParentError {
    pub path: String,
}

/// Any error produced by key path operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyPathError {
    #[error(transparent)]
    Capture(#[from] CaptureError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    NoParent(#[from] NoParentError),
}

pub type KeyPathResult<T> = Result<T, KeyPathError>;
