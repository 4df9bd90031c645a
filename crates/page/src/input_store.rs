use dom::NodeKey;
use std::collections::HashMap;

/// Current values of the page's text controls.
#[derive(Clone, Debug, Default)]
pub struct InputValueStore {
    values: HashMap<NodeKey, String>,
}

impl InputValueStore {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Returns the stored value for this key, if any.
    pub fn get(&self, key: NodeKey) -> Option<&str> {
        self.values.get(&key).map(|s| s.as_str())
    }

    /// Set/overwrite the value for this input key.
    pub fn set(&mut self, key: NodeKey, value: String) {
        self.values.insert(key, value);
    }

    /// Ensure a key exists; if missing, inserts the provided initial value.
    pub fn ensure_initial(&mut self, key: NodeKey, initial: String) {
        self.values.entry(key).or_insert(initial);
    }

    pub fn remove(&mut self, key: NodeKey) -> Option<String> {
        self.values.remove(&key)
    }
}
