//! Sequence hydration.
//!
//! Null entries are dropped, and so are mappings that hydrate to no item
//! (`{}`). The output keeps input order and can be shorter than the input.
//! The same rule applies to scalar and item sequences.

use serde_json::Value;
use tracing::trace;

use crate::error::{ItemError, Result};
use crate::field::FieldType;
use crate::item::Item;

/// Hydrate a possibly absent list of raw item mappings. Absent means empty.
pub fn hydrate_list<T: Item>(raw: Option<Vec<Value>>) -> Result<Vec<T>> {
    match raw {
        None => Ok(Vec::new()),
        Some(entries) => hydrate_entries(entries),
    }
}

/// Like [`hydrate_list`] but starting from any JSON value: null is an empty
/// list, anything other than an array is a mismatch.
pub fn hydrate_list_value<T: Item>(raw: Value) -> Result<Vec<T>> {
    match raw {
        Value::Null => Ok(Vec::new()),
        Value::Array(entries) => hydrate_entries(entries),
        other => Err(ItemError::mismatch("", "array", &other)),
    }
}

pub(crate) fn hydrate_entries<T: FieldType>(entries: Vec<Value>) -> Result<Vec<T>> {
    let total = entries.len();
    let mut hydrated = Vec::with_capacity(total);

    for (index, entry) in entries.into_iter().enumerate() {
        if entry.is_null() {
            continue;
        }
        let value = T::hydrate_entry(entry).map_err(|e| e.within(&format!("[{index}]")))?;
        if let Some(value) = value {
            hydrated.push(value);
        }
    }

    if hydrated.len() < total {
        trace!(
            dropped = total - hydrated.len(),
            kept = hydrated.len(),
            "dropped empty sequence entries"
        );
    }
    Ok(hydrated)
}
