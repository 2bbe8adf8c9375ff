//! Open-ended attribute bags.
//!
//! Users carry arbitrary demographic attributes (gender, age, location, ...)
//! whose names are not known at compile time. Lookups are total: a missing
//! key is `None`, never an error.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A mapping from attribute name to a JSON value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(BTreeMap<String, Value>);

impl Attributes {
    /// Creates an empty attribute bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up an attribute. `None` means the attribute is absent.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Sets an attribute, returning the previous value if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Value)> for Attributes {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = (&'a String, &'a Value);
    type IntoIter = std::collections::btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_attribute_is_none() {
        let attrs = Attributes::new();
        assert!(attrs.get("gender").is_none());
    }

    #[test]
    fn test_insert_and_replace() {
        let mut attrs = Attributes::new();
        assert!(attrs.insert("gender", "male").is_none());
        assert_eq!(attrs.insert("gender", "female"), Some(json!("male")));
        assert_eq!(attrs.get("gender"), Some(&json!("female")));
        assert_eq!(attrs.len(), 1);
    }

    #[test]
    fn test_values_keep_json_type() {
        let attrs: Attributes = [("age".to_string(), json!(30))].into_iter().collect();
        assert_eq!(attrs.get("age"), Some(&json!(30)));
        assert_ne!(attrs.get("age"), Some(&json!("30")));
    }

    #[test]
    fn test_deserialize_transparent() {
        let attrs: Attributes =
            serde_json::from_str(r#"{"age": 25, "gender": "female"}"#).unwrap();
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs.get("age"), Some(&json!(25)));
    }
}
