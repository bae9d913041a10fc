//! The `Navigate` trait and its implementations for standard types.

use crate::keypath::ast::Key;
use indexmap::IndexMap;
use std::any::Any;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::hash::Hash;
use std::rc::Rc;
use std::sync::Arc;

/// Upcast helper so that any `Navigate` value can be downcast at the leaf.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn type_name(&self) -> &'static str;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// A value that a key path can walk through.
///
/// Implementors expose the two capabilities a path replays: reading a named
/// attribute and reading an item by key. Both default to "not present", so
/// leaf types need an empty impl only.
///
/// Mapping types answer attribute lookups with their string keys, the way a
/// JSON object's members read like fields.
pub trait Navigate: AsAny {
    /// Reads the attribute `name`, or `None` if there is no such attribute.
    fn attribute(&self, name: &str) -> Option<&dyn Navigate> {
        let _ = name;
        None
    }

    /// Reads the item at `key`, or `None` if the key is missing or out of range.
    fn item(&self, key: &Key) -> Option<&dyn Navigate> {
        let _ = key;
        None
    }

    /// Whether this value stands for absence (`None`, `null`).
    fn is_absent(&self) -> bool {
        false
    }

    /// The wrapped value for transparent wrappers (`Some`, `Box`, `Rc`,
    /// `Arc`), used when a leaf is extracted as its inner type.
    fn unwrapped(&self) -> Option<&dyn Navigate> {
        None
    }
}

/// Resolves a possibly negative position against a sequence length.
pub(crate) fn sequence_position(key: &Key, len: usize) -> Option<usize> {
    let idx = key.as_int()?;
    let len = i64::try_from(len).ok()?;
    let normalized = if idx < 0 { len + idx } else { idx };
    if normalized >= 0 && normalized < len {
        usize::try_from(normalized).ok()
    } else {
        None
    }
}

/// Conversion from a path key into a concrete mapping key type.
pub trait FromKey: Sized {
    fn from_key(key: &Key) -> Option<Self>;
}

impl FromKey for String {
    fn from_key(key: &Key) -> Option<Self> {
        key.as_str().map(str::to_string)
    }
}

impl FromKey for Key {
    fn from_key(key: &Key) -> Option<Self> {
        Some(key.clone())
    }
}

macro_rules! from_key_int {
    ($($ty:ty),*) => {
        $(
            impl FromKey for $ty {
                fn from_key(key: &Key) -> Option<Self> {
                    key.as_int().and_then(|i| <$ty>::try_from(i).ok())
                }
            }
        )*
    };
}

from_key_int!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

macro_rules! leaf_navigate {
    ($($ty:ty),*) => {
        $(impl Navigate for $ty {})*
    };
}

leaf_navigate!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
    String, &'static str, ()
);

impl<T: Navigate> Navigate for Option<T> {
    fn attribute(&self, name: &str) -> Option<&dyn Navigate> {
        self.as_ref()?.attribute(name)
    }

    fn item(&self, key: &Key) -> Option<&dyn Navigate> {
        self.as_ref()?.item(key)
    }

    fn is_absent(&self) -> bool {
        match self {
            Some(inner) => inner.is_absent(),
            None => true,
        }
    }

    fn unwrapped(&self) -> Option<&dyn Navigate> {
        self.as_ref().map(|inner| inner as &dyn Navigate)
    }
}

macro_rules! pointer_navigate {
    ($($ptr:ident),*) => {
        $(
            impl<T: Navigate> Navigate for $ptr<T> {
                fn attribute(&self, name: &str) -> Option<&dyn Navigate> {
                    (**self).attribute(name)
                }

                fn item(&self, key: &Key) -> Option<&dyn Navigate> {
                    (**self).item(key)
                }

                fn is_absent(&self) -> bool {
                    (**self).is_absent()
                }

                fn unwrapped(&self) -> Option<&dyn Navigate> {
                    Some(&**self)
                }
            }
        )*
    };
}

pointer_navigate!(Box, Rc, Arc);

impl<T: Navigate> Navigate for Vec<T> {
    fn item(&self, key: &Key) -> Option<&dyn Navigate> {
        let idx = sequence_position(key, self.len())?;
        Some(&self[idx])
    }
}

impl<T: Navigate> Navigate for VecDeque<T> {
    fn item(&self, key: &Key) -> Option<&dyn Navigate> {
        let idx = sequence_position(key, self.len())?;
        self.get(idx).map(|v| v as &dyn Navigate)
    }
}

impl<T: Navigate, const N: usize> Navigate for [T; N] {
    fn item(&self, key: &Key) -> Option<&dyn Navigate> {
        let idx = sequence_position(key, N)?;
        Some(&self[idx])
    }
}

macro_rules! map_navigate {
    ($map:ident, $($bound:path),+) => {
        impl<K, V> Navigate for $map<K, V>
        where
            K: FromKey $(+ $bound)+ + 'static,
            V: Navigate,
        {
            fn attribute(&self, name: &str) -> Option<&dyn Navigate> {
                self.item(&Key::from(name))
            }

            fn item(&self, key: &Key) -> Option<&dyn Navigate> {
                let key = K::from_key(key)?;
                self.get(&key).map(|v| v as &dyn Navigate)
            }
        }
    };
}

map_navigate!(HashMap, Eq, Hash);
map_navigate!(IndexMap, Eq, Hash);
map_navigate!(BTreeMap, Ord);

macro_rules! tuple_navigate {
    ($len:expr => $($idx:tt $name:ident),+) => {
        impl<$($name: Navigate),+> Navigate for ($($name,)+) {
            fn item(&self, key: &Key) -> Option<&dyn Navigate> {
                match sequence_position(key, $len)? {
                    $($idx => Some(&self.$idx),)+
                    _ => None,
                }
            }
        }
    };
}

tuple_navigate!(1 => 0 A);
tuple_navigate!(2 => 0 A, 1 B);
tuple_navigate!(3 => 0 A, 1 B, 2 C);
tuple_navigate!(4 => 0 A, 1 B, 2 C, 3 D);
tuple_navigate!(5 => 0 A, 1 B, 2 C, 3 D, 4 E);
tuple_navigate!(6 => 0 A, 1 B, 2 C, 3 D, 4 E, 5 F);

/// Implements [`Navigate`] for a struct by exposing the listed fields as
/// attributes.
///
/// ```
/// use keyof::{navigate, KeyPath};
///
/// struct Address { city: String }
/// struct User { name: String, address: Option<Address> }
///
/// navigate!(Address { city });
/// navigate!(User { name, address });
///
/// let user = User {
///     name: "Alice".to_string(),
///     address: Some(Address { city: "London".to_string() }),
/// };
/// let path = KeyPath::of(|u| u.attr("address").attr("city")).unwrap();
/// assert_eq!(path.extract::<String>(&user).unwrap(), "London");
/// ```
#[macro_export]
macro_rules! navigate {
    ($ty:ty { $($field:ident),* $(,)? }) => {
        impl $crate::object::Navigate for $ty {
            fn attribute(&self, name: &str) -> Option<&dyn $crate::object::Navigate> {
                match name {
                    $(stringify!($field) => Some(&self.$field),)*
                    _ => None,
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Point {
        x: i32,
        y: i32,
    }

    crate::navigate!(Point { x, y });

    fn downcast<T: 'static>(value: &dyn Navigate) -> &T {
        value.as_any().downcast_ref::<T>().expect("unexpected type")
    }

    #[test]
    fn test_sequence_position() {
        assert_eq!(sequence_position(&Key::Int(0), 3), Some(0));
        assert_eq!(sequence_position(&Key::Int(-1), 3), Some(2));
        assert_eq!(sequence_position(&Key::Int(3), 3), None);
        assert_eq!(sequence_position(&Key::Int(-4), 3), None);
        assert_eq!(sequence_position(&Key::from("0"), 3), None);
    }

    #[test]
    fn test_vec_item() {
        let tags = vec!["admin".to_string(), "user".to_string()];
        let first = tags.item(&Key::Int(0)).unwrap();
        assert_eq!(downcast::<String>(first), "admin");
        assert!(tags.item(&Key::Int(99)).is_none());
        assert!(tags.attribute("len").is_none());
    }

    #[test]
    fn test_map_attribute_and_item() {
        let mut meta: HashMap<String, i64> = HashMap::new();
        meta.insert("login_count".to_string(), 42);
        assert_eq!(*downcast::<i64>(meta.attribute("login_count").unwrap()), 42);
        assert_eq!(*downcast::<i64>(meta.item(&Key::from("login_count")).unwrap()), 42);
        assert!(meta.item(&Key::Int(0)).is_none());
    }

    #[test]
    fn test_integer_keyed_map() {
        let mut by_id: BTreeMap<u32, &'static str> = BTreeMap::new();
        by_id.insert(7, "seven");
        assert_eq!(*downcast::<&str>(by_id.item(&Key::Int(7)).unwrap()), "seven");
        assert!(by_id.item(&Key::Int(-7)).is_none());
    }

    #[test]
    fn test_option_forwards_and_reports_absence() {
        let some = Some(Point { x: 1, y: 2 });
        let none: Option<Point> = None;
        assert_eq!(*downcast::<i32>(some.attribute("y").unwrap()), 2);
        assert!(!some.is_absent());
        assert!(none.is_absent());
        assert!(none.attribute("x").is_none());
    }

    #[test]
    fn test_wrappers_expose_inner_value() {
        let boxed = Box::new(Point { x: 3, y: 4 });
        let inner = boxed.unwrapped().unwrap();
        assert_eq!(*downcast::<i32>(inner.attribute("x").unwrap()), 3);

        let shared = Rc::new("rc".to_string());
        assert_eq!(downcast::<String>(shared.unwrapped().unwrap()), "rc");

        let none: Option<Point> = None;
        assert!(none.unwrapped().is_none());
        assert!(Point { x: 0, y: 0 }.unwrapped().is_none());
    }

    #[test]
    fn test_tuple_item() {
        let t = (1, 2, "three");
        assert_eq!(*downcast::<&str>(t.item(&Key::Int(2)).unwrap()), "three");
        assert_eq!(*downcast::<i32>(t.item(&Key::Int(-3)).unwrap()), 1);
        assert!(t.item(&Key::Int(3)).is_none());
    }

    #[test]
    fn test_struct_macro() {
        let p = Point { x: 10, y: 20 };
        assert_eq!(*downcast::<i32>(p.attribute("x").unwrap()), 10);
        assert!(p.attribute("z").is_none());
        assert!(p.item(&Key::Int(0)).is_none());
    }
}
