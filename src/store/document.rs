//! Insertion-ordered key-value document
//!
//! Entries keep the order in which keys were first inserted, so the encoded
//! form is stable across load/save cycles. Overwriting a key keeps its slot;
//! removing one keeps the order of the rest.

use super::value::Value;
use alloc::string::String;
use core::hash::BuildHasherDefault;
use indexmap::IndexMap;
use rustc_hash::FxHasher;

/// Ordered map with a fixed, seedless hasher (no RNG on target)
type EntryMap = IndexMap<String, Value, BuildHasherDefault<FxHasher>>;

/// Structured key-value document
///
/// Equality ignores entry order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    entries: EntryMap,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries.get_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Insert or overwrite `key`, returning the previous value
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.entries.insert(key.into(), value)
    }

    /// Remove `key`, returning its value if it was present
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterate over (key, value) pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Document {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut doc = Document::new();
        for (key, value) in iter {
            doc.insert(key, value);
        }
        doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn test_insert_and_get() {
        let mut doc = Document::new();
        assert!(doc.insert("a", Value::Int(1)).is_none());
        assert_eq!(doc.get("a"), Some(&Value::Int(1)));
        assert!(doc.contains_key("a"));
        assert!(!doc.contains_key("b"));
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_overwrite_keeps_position() {
        let mut doc = Document::new();
        doc.insert("a", Value::Int(1));
        doc.insert("b", Value::Int(2));
        doc.insert("c", Value::Int(3));

        let previous = doc.insert("a", Value::Bool(true));
        assert_eq!(previous, Some(Value::Int(1)));

        let keys: Vec<&str> = doc.keys().collect();
        assert_eq!(keys, ["a", "b", "c"]);
        assert_eq!(doc.get("a"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut doc: Document = [("a", Value::Int(1)), ("b", Value::Int(2)), ("c", Value::Int(3))]
            .into_iter()
            .collect();

        assert_eq!(doc.remove("b"), Some(Value::Int(2)));
        assert_eq!(doc.remove("b"), None);

        let keys: Vec<&str> = doc.keys().collect();
        assert_eq!(keys, ["a", "c"]);
    }

    #[test]
    fn test_get_mut_and_clear() {
        let mut doc = Document::new();
        doc.insert("n", Value::Int(1));
        if let Some(v) = doc.get_mut("n") {
            *v = Value::Int(2);
        }
        assert_eq!(doc.get("n"), Some(&Value::Int(2)));

        doc.clear();
        assert!(doc.is_empty());
        assert_eq!(doc.iter().count(), 0);
    }

    #[test]
    fn test_reinsert_after_remove_goes_last() {
        let mut doc: Document = [("a", Value::Int(1)), ("b", Value::Int(2))]
            .into_iter()
            .collect();

        doc.remove("a");
        doc.insert("a", Value::Int(3));

        let keys: Vec<&str> = doc.keys().collect();
        assert_eq!(keys, ["b", "a"]);
    }

    #[test]
    fn test_equality_ignores_order() {
        let ab: Document = [("a", Value::Int(1)), ("b", Value::Int(2))]
            .into_iter()
            .collect();
        let ba: Document = [("b", Value::Int(2)), ("a", Value::Int(1))]
            .into_iter()
            .collect();
        assert_eq!(ab, ba);
    }
}
