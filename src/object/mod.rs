//! Object model that key paths are replayed against.
//!
//! A [`KeyPath`](crate::KeyPath) never inspects concrete types during
//! capture. At extraction time it only needs two capabilities from the data:
//! reading an attribute by name and reading an item by key. The
//! [`Navigate`] trait carries exactly those, and this module implements it for
//! the usual containers:
//!
//! - scalars and `String` (leaves)
//! - `Option<T>` (`None` is absent, `Some` is transparent)
//! - `Box`, `Rc`, `Arc` (transparent)
//! - `Vec`, `VecDeque`, arrays and tuples (integer positions, negatives from the end)
//! - `HashMap`, `BTreeMap`, `IndexMap` (keys as items and as attributes)
//! - `serde_json::Value`, `serde_yaml::Value`
//!
//! User structs opt in with the [`navigate!`](crate::navigate) macro.

pub mod navigate;
pub mod value;

pub use navigate::{AsAny, FromKey, Navigate};
