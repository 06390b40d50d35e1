//! Per-entry transform policies.

use serde_json::{Map, Value};

use crate::config::TransformPolicy;
use crate::contract::RawEntry;
use crate::error::Error;

/// Apply a content type's transform policy to one raw entry.
///
/// The raw entry is never mutated; custom transforms build their own value.
pub fn apply(policy: &TransformPolicy, content_type: &str, entry: &RawEntry) -> Result<Value, Error> {
    match policy {
        TransformPolicy::Flatten => Ok(flatten(entry)),
        TransformPolicy::Raw => Ok(nested(entry)),
        TransformPolicy::Custom(transform) => {
            transform(entry).map_err(|e| Error::Transform {
                content_type: content_type.to_string(),
                reason: e.to_string(),
            })
        }
    }
}

/// Shallow-merge `fields` and `sys` into one mapping. Field values win on
/// key collision, so entry content stays addressable by field name while
/// non-colliding metadata (id, type, timestamps) remains reachable.
fn flatten(entry: &RawEntry) -> Value {
    let mut merged = entry.fields.clone();
    for (key, value) in &entry.sys {
        if !merged.contains_key(key) {
            merged.insert(key.clone(), value.clone());
        }
    }
    Value::Object(merged)
}

fn nested(entry: &RawEntry) -> Value {
    let mut object = Map::new();
    object.insert("sys".to_string(), Value::Object(entry.sys.clone()));
    object.insert("fields".to_string(), Value::Object(entry.fields.clone()));
    Value::Object(object)
}
