//! Shared build-data store: the host-owned object that ingested results are
//! bound into.

use std::sync::{Arc, Mutex};

use serde_json::{Map, Value};
use tracing::debug;

/// Key under which all ingested content is grouped in the shared store.
pub const STORE_KEY: &str = "contentful";

/// Handle to the host's shared build-data object.
///
/// The host owns the store's lifecycle and reads it during its templating
/// phase; the plugin only writes finished results under [`STORE_KEY`].
/// Clones share the same underlying map.
#[derive(Clone, Debug, Default)]
pub struct SharedStore {
    inner: Arc<Mutex<Map<String, Value>>>,
}

impl SharedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a finished result sequence under `contentful.<name>`,
    /// overwriting any previous value for that name.
    pub fn bind(&self, name: &str, result: Vec<Value>) {
        let count = result.len();
        let mut store = self.inner.lock().expect("shared store lock poisoned");
        match store
            .entry(STORE_KEY.to_string())
            .or_insert_with(|| Value::Object(Map::new()))
        {
            Value::Object(group) => {
                group.insert(name.to_string(), Value::Array(result));
            }
            other => {
                // The host put something non-object under our key; replace it.
                let mut group = Map::new();
                group.insert(name.to_string(), Value::Array(result));
                *other = Value::Object(group);
            }
        }
        debug!(name, entries = count, "Bound content type result into shared store");
    }

    /// Snapshot of the current store contents.
    pub fn snapshot(&self) -> Map<String, Value> {
        self.inner
            .lock()
            .expect("shared store lock poisoned")
            .clone()
    }

    /// The bound result for one content type name, if any.
    pub fn result(&self, name: &str) -> Option<Vec<Value>> {
        let store = self.inner.lock().expect("shared store lock poisoned");
        match store.get(STORE_KEY)?.get(name)? {
            Value::Array(entries) => Some(entries.clone()),
            _ => None,
        }
    }
}
