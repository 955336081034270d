//! Build typed items from raw mappings.
//!
//! Absent and empty mappings produce no item (`Ok(None)`) rather than an
//! all-default one. Declared fields go through their [`FieldType`], which
//! recurses into nested items and sequences; undeclared fields end up in the
//! item's side table untouched.
//!
//! [`FieldType`]: crate::field::FieldType

use serde_json::{Map, Value};
use tracing::debug;

use crate::classify::{classify, Classified};
use crate::error::{ItemError, Result};
use crate::item::Item;

pub fn hydrate<T: Item>(raw: Option<Map<String, Value>>) -> Result<Option<T>> {
    let raw = match raw {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Ok(None),
    };

    let schema = T::schema()?;
    let Classified { known, unknown } = classify(Some(raw), &schema);

    if !unknown.is_empty() {
        debug!(
            item = T::NAME,
            unknown = ?unknown.keys().collect::<Vec<_>>(),
            "preserving undeclared fields"
        );
    }

    let mut item = T::from_fields(known)?;
    *item.unknown_fields_mut() = unknown;
    Ok(Some(item))
}

/// Hydrate from any JSON value: null is no item, objects hydrate, anything
/// else is a mismatch.
pub fn hydrate_value<T: Item>(raw: Value) -> Result<Option<T>> {
    match raw {
        Value::Null => Ok(None),
        Value::Object(map) => hydrate(Some(map)),
        other => Err(ItemError::mismatch("", "object", &other)),
    }
}

pub fn hydrate_str<T: Item>(json: &str) -> Result<Option<T>> {
    hydrate_value(serde_json::from_str(json)?)
}
