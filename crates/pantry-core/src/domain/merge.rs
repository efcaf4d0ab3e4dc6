//! Deep merge for basket partial updates.
//!
//! Rules, applied key by key from the patch onto the existing document:
//! - object + object: merge recursively
//! - array + array: concatenate (existing elements, then patch elements)
//! - anything else: the patch value replaces the existing one
//!
//! Keys missing from the patch are kept as-is.
//!
//! Array concatenation is a known quirk: clients expecting "replace" semantics
//! for arrays have to POST the whole basket instead.

use serde_json::{Map, Value};

/// Merge `patch` into `target` in place.
pub fn deep_merge(target: &mut Value, patch: Value) {
    match (target, patch) {
        (Value::Object(existing), Value::Object(patch)) => merge_objects(existing, patch),
        (Value::Array(existing), Value::Array(patch)) => existing.extend(patch),
        (target, patch) => *target = patch,
    }
}

/// Consume both documents and return the merged one.
pub fn merged(mut target: Value, patch: Value) -> Value {
    deep_merge(&mut target, patch);
    target
}

fn merge_objects(existing: &mut Map<String, Value>, patch: Map<String, Value>) {
    for (key, value) in patch {
        match existing.get_mut(&key) {
            Some(slot) => deep_merge(slot, value),
            None => {
                existing.insert(key, value);
            }
        }
    }
}
