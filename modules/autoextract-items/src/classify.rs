//! Split a raw mapping into declared and undeclared fields.

use serde_json::{Map, Value};
use tracing::trace;

use crate::error::Result;
use crate::item::Item;
use crate::registry;
use crate::schema::ItemSchema;

/// A payload partitioned by a schema. Both halves keep payload order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classified {
    pub known: Map<String, Value>,
    pub unknown: Map<String, Value>,
}

/// Partition `raw` by `schema`. An absent mapping classifies as empty.
pub fn classify(raw: Option<Map<String, Value>>, schema: &ItemSchema) -> Classified {
    let mut classified = Classified::default();
    for (key, value) in raw.unwrap_or_default() {
        if schema.declares(&key) {
            classified.known.insert(key, value);
        } else {
            classified.unknown.insert(key, value);
        }
    }

    trace!(
        item = schema.name(),
        known = classified.known.len(),
        unknown = classified.unknown.len(),
        "classified payload"
    );
    classified
}

/// Partition `raw` by the cached schema of `T`.
pub fn classify_as<T: Item>(raw: Option<Map<String, Value>>) -> Result<Classified> {
    let schema = T::schema()?;
    Ok(classify(raw, &schema))
}

/// Partition `raw` by the schema registered under `type_name`. Fails with
/// `InvalidSchema` when no such item type is registered.
pub fn classify_named(raw: Option<Map<String, Value>>, type_name: &str) -> Result<Classified> {
    let entry = registry::global().get(type_name)?;
    Ok(classify(raw, entry.schema()))
}
