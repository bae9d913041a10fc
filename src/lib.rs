//! keyof - capture accessor closures as immutable, comparable key paths.
//!
//! ```
//! use keyof::KeyPath;
//! use serde_json::json;
//!
//! let doc = json!({"address": {"city": "Wonderland"}});
//! let city = KeyPath::of(|u| u.item("address").item("city")).unwrap();
//!
//! assert_eq!(city, "address.city");
//! assert_eq!(city.to_jsonpath(), "$.address.city");
//! assert_eq!(city.extract::<serde_json::Value>(&doc).unwrap(), "Wonderland");
//! ```

pub mod config;
pub mod keypath;
pub mod object;

pub use config::RenderConfig;
pub use keypath::{
    nn, CaptureError, Format, Key, KeyPath, KeyPathError, KeyPathResult, NoParentError, Parts,
    Recorder, ResolveError, ResolveFailure, Segment, SegmentKind, Subscript, Template,
    UnknownFormat, Unwrap, NN,
};
pub use object::{AsAny, FromKey, Navigate};
