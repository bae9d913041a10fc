//! Capture, inspect, render, and replay key paths.
//!
//! A key path is recorded by running an accessor closure against a
//! [`Recorder`] instead of real data. Every attribute or item access the
//! closure performs becomes one [`Segment`]; the resulting [`KeyPath`] is
//! immutable and can be compared, hashed, sorted, rendered, and finally
//! replayed against any value implementing [`Navigate`](crate::Navigate).
//!
//! # Notations
//!
//! - `dot` - `users.0.name`
//! - `posix` - `users/0/name`
//! - `python` - `users[0].name`
//! - `bracket` - `['users'][0]['name']`
//! - `jsonpath` - `$.users.0.name`
//! - `xpath` - `/users/0/name`
//! - `jmespath` - `users.0.name`
//!
//! # Examples
//!
//! ```
//! use keyof::{KeyPath, Format};
//!
//! let path = KeyPath::of(|u| u.attr("users").item(0).attr("name")).unwrap();
//! assert_eq!(path.render(Format::Python), "users[0].name");
//! assert_eq!(path.format("{leaf} at depth {depth}"), "name at depth 3");
//! ```

pub mod ast;
pub mod error;
pub mod evaluator;
pub mod path;
pub mod recorder;
pub mod render;
pub mod template;

pub use ast::{Key, Segment, SegmentKind};
pub use error::{
    CaptureError, KeyPathError, KeyPathResult, NoParentError, ResolveError, ResolveFailure,
};
pub use path::{KeyPath, Parts};
pub use recorder::{nn, Recorder, Subscript, Unwrap, NN};
pub use render::{Format, UnknownFormat};
pub use template::Template;
