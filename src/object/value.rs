//! `Navigate` for dynamically typed documents (`serde_json::Value`,
//! `serde_yaml::Value`).
//!
//! Objects answer both attribute and string-key lookups, arrays answer
//! integer positions (negative positions count from the end), and `null`
//! counts as absent.

use super::navigate::{sequence_position, Navigate};
use crate::keypath::ast::Key;

impl Navigate for serde_json::Value {
    fn attribute(&self, name: &str) -> Option<&dyn Navigate> {
        match self {
            serde_json::Value::Object(map) => map.get(name).map(|v| v as &dyn Navigate),
            _ => None,
        }
    }

    fn item(&self, key: &Key) -> Option<&dyn Navigate> {
        match (self, key) {
            (serde_json::Value::Object(map), Key::Str(name)) => {
                map.get(name).map(|v| v as &dyn Navigate)
            }
            (serde_json::Value::Array(items), Key::Int(_)) => {
                let idx = sequence_position(key, items.len())?;
                Some(&items[idx])
            }
            _ => None,
        }
    }

    fn is_absent(&self) -> bool {
        self.is_null()
    }
}

impl Navigate for serde_yaml::Value {
    fn attribute(&self, name: &str) -> Option<&dyn Navigate> {
        match self {
            serde_yaml::Value::Mapping(map) => map.get(name).map(|v| v as &dyn Navigate),
            serde_yaml::Value::Tagged(tagged) => tagged.value.attribute(name),
            _ => None,
        }
    }

    fn item(&self, key: &Key) -> Option<&dyn Navigate> {
        match (self, key) {
            (serde_yaml::Value::Tagged(tagged), _) => tagged.value.item(key),
            (serde_yaml::Value::Sequence(items), Key::Int(_)) => {
                let idx = sequence_position(key, items.len())?;
                Some(&items[idx])
            }
            // YAML mappings may use integer keys as well as strings.
            (serde_yaml::Value::Mapping(map), Key::Str(name)) => {
                map.get(name.as_str()).map(|v| v as &dyn Navigate)
            }
            (serde_yaml::Value::Mapping(map), Key::Int(i)) => map
                .get(serde_yaml::Value::Number((*i).into()))
                .map(|v| v as &dyn Navigate),
            _ => None,
        }
    }

    fn is_absent(&self) -> bool {
        match self {
            serde_yaml::Value::Tagged(tagged) => tagged.value.is_absent(),
            other => other.is_null(),
        }
    }
}
