//! Shared value store threaded through a scenario run

use std::sync::Arc;

use dashmap::DashMap;
use indexmap::IndexMap;
use serde_json::Value as JsonValue;

/// Mutable key/value store shared across one scenario invocation.
///
/// Cloning yields another handle to the same store, so the caller can keep
/// a handle and observe values accumulated before a failure. Keys are
/// unique and the last write wins. The runner never runs two extension
/// hooks concurrently, so reads and writes within one chain are strictly
/// sequential.
#[derive(Debug, Clone, Default)]
pub struct ValueBag {
    inner: Arc<DashMap<String, JsonValue>>,
}

impl ValueBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value, replacing any previous value under the same key.
    pub fn put(&self, key: impl Into<String>, value: impl Into<JsonValue>) {
        self.inner.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<JsonValue> {
        self.inner.get(key).map(|entry| entry.value().clone())
    }

    pub fn remove(&self, key: &str) -> Option<JsonValue> {
        self.inner.remove(key).map(|(_, value)| value)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    /// Flattened read view, used as the evaluation context for expressions.
    ///
    /// Map iteration order is unspecified, so the view is key-sorted to
    /// keep it deterministic.
    pub fn all(&self) -> IndexMap<String, JsonValue> {
        let mut view: IndexMap<String, JsonValue> = self
            .inner
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();
        view.sort_keys();
        view
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_put_get() {
        let values = ValueBag::new();
        values.put("token", "abc123");
        values.put("count", 3);

        assert_eq!(values.get("token"), Some(json!("abc123")));
        assert_eq!(values.get("count"), Some(json!(3)));
        assert_eq!(values.get("missing"), None);
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn test_last_write_wins() {
        let values = ValueBag::new();
        values.put("key", "first");
        values.put("key", "second");

        assert_eq!(values.get("key"), Some(json!("second")));
        assert_eq!(values.len(), 1);
    }

    #[test]
    fn test_clone_shares_store() {
        let values = ValueBag::new();
        let handle = values.clone();
        handle.put("shared", true);

        assert_eq!(values.get("shared"), Some(json!(true)));
    }

    #[test]
    fn test_flattened_view_is_sorted() {
        let values = ValueBag::new();
        values.put("b", 2);
        values.put("a", 1);
        values.put("c", 3);

        let all = values.all();
        let keys: Vec<&str> = all.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_remove() {
        let values = ValueBag::new();
        values.put("gone", 1);

        assert_eq!(values.remove("gone"), Some(json!(1)));
        assert!(values.is_empty());
    }
}
