//! Process-wide schema cache.
//!
//! One entry per item type, built on first use and never replaced. Lookups
//! take a read lock; a miss builds the schema outside the lock and inserts
//! it under the write lock unless another thread got there first. Two
//! builders of the same type produce identical schemas, so losing the race
//! only costs the duplicate work.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use schemars::schema::RootSchema;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{ItemError, Result};
use crate::hydrate::hydrate;
use crate::item::{Item, ItemFields};
use crate::items;
use crate::schema::ItemSchema;

type DynHydrate = fn(Map<String, Value>) -> Result<Option<Box<dyn ItemFields>>>;

static GLOBAL: LazyLock<SchemaRegistry> = LazyLock::new(|| {
    let registry = SchemaRegistry::new();
    if let Err(err) = items::register_all(&registry) {
        warn!(error = %err, "built-in item schemas failed to register");
    }
    registry
});

/// The registry every item type uses. Built-in item types are registered
/// up front so they can be looked up by name.
pub fn global() -> &'static SchemaRegistry {
    &GLOBAL
}

/// A registered item type: its schema plus type-erased entry points.
#[derive(Clone)]
pub struct RegisteredItem {
    schema: Arc<ItemSchema>,
    hydrate: DynHydrate,
    json_schema: fn() -> RootSchema,
}

impl RegisteredItem {
    pub fn schema(&self) -> &Arc<ItemSchema> {
        &self.schema
    }

    pub fn name(&self) -> &'static str {
        self.schema.name()
    }

    /// Hydrate a raw mapping into a boxed item of this type.
    pub fn hydrate(&self, raw: Map<String, Value>) -> Result<Option<Box<dyn ItemFields>>> {
        (self.hydrate)(raw)
    }

    pub fn json_schema(&self) -> RootSchema {
        (self.json_schema)()
    }
}

#[derive(Default)]
struct Entries {
    by_type: HashMap<TypeId, RegisteredItem>,
    by_name: HashMap<&'static str, TypeId>,
}

#[derive(Default)]
pub struct SchemaRegistry {
    entries: RwLock<Entries>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schema_of<T: Item>(&self) -> Result<Arc<ItemSchema>> {
        self.register::<T>().map(|entry| entry.schema)
    }

    /// Register `T` if needed and return its entry.
    pub fn register<T: Item>(&self) -> Result<RegisteredItem> {
        let type_id = TypeId::of::<T>();
        if let Some(entry) = self.read().by_type.get(&type_id) {
            return Ok(entry.clone());
        }

        let schema = Arc::new(ItemSchema::build(T::NAME, T::describe())?);

        let mut entries = self.write();
        if let Some(entry) = entries.by_type.get(&type_id) {
            return Ok(entry.clone());
        }
        if let Some(other) = entries.by_name.get(T::NAME) {
            if *other != type_id {
                return Err(ItemError::InvalidSchema(format!(
                    "another item type is already registered as `{}`",
                    T::NAME
                )));
            }
        }

        debug!(item = T::NAME, fields = schema.len(), "registered item schema");
        let entry = RegisteredItem {
            schema,
            hydrate: hydrate_boxed::<T>,
            json_schema: root_schema::<T>,
        };
        entries.by_type.insert(type_id, entry.clone());
        entries.by_name.insert(T::NAME, type_id);
        Ok(entry)
    }

    /// Look up a registered type by name. Unknown names are `InvalidSchema`.
    pub fn get(&self, name: &str) -> Result<RegisteredItem> {
        let entries = self.read();
        entries
            .by_name
            .get(name)
            .and_then(|type_id| entries.by_type.get(type_id))
            .cloned()
            .ok_or_else(|| {
                ItemError::InvalidSchema(format!("no item type named `{name}` is registered"))
            })
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.read().by_name.contains_key(name)
    }

    /// Registered type names, sorted.
    pub fn registered_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.read().by_name.keys().copied().collect();
        names.sort_unstable();
        names
    }

    // Entries are only ever inserted whole, so a poisoned lock still guards
    // a consistent map.
    fn read(&self) -> RwLockReadGuard<'_, Entries> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Entries> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Hydrate `raw` as the item type registered under `name`.
pub fn hydrate_named(name: &str, raw: Map<String, Value>) -> Result<Option<Box<dyn ItemFields>>> {
    global().get(name)?.hydrate(raw)
}

fn hydrate_boxed<T: Item>(raw: Map<String, Value>) -> Result<Option<Box<dyn ItemFields>>> {
    Ok(hydrate::<T>(Some(raw))?.map(|item| Box::new(item) as Box<dyn ItemFields>))
}

fn root_schema<T: Item>() -> RootSchema {
    schemars::schema_for!(T)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{Offer, Product};
    use std::thread;

    #[test]
    fn repeated_lookups_share_one_schema() {
        let first = global().schema_of::<Offer>().unwrap();
        let second = global().schema_of::<Offer>().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.name(), "Offer");
    }

    #[test]
    fn builtin_items_are_registered_by_name() {
        let names = global().registered_names();
        for expected in ["Article", "Offer", "Product", "ProductList", "Rating"] {
            assert!(names.contains(&expected), "missing {expected}");
        }
        assert_eq!(global().get("Rating").unwrap().name(), "Rating");
    }

    #[test]
    fn unknown_names_are_invalid_schemas() {
        let err = global().get("Spaceship").err().unwrap();
        assert!(matches!(err, ItemError::InvalidSchema(msg) if msg.contains("Spaceship")));
    }

    #[test]
    fn concurrent_first_access_yields_one_entry() {
        let registry = Arc::new(SchemaRegistry::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || registry.schema_of::<Product>().unwrap())
            })
            .collect();
        let schemas: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        for schema in &schemas {
            assert!(Arc::ptr_eq(schema, &schemas[0]));
        }
        assert_eq!(registry.registered_names(), vec!["Product"]);
    }

    #[test]
    fn hydrate_named_returns_type_erased_items() {
        let raw = serde_json::json!({"ratingValue": 4.0, "bestRating": 5.0})
            .as_object()
            .cloned()
            .unwrap();
        let item = hydrate_named("Rating", raw).unwrap().unwrap();
        assert_eq!(item.item_name(), "Rating");
        assert_eq!(item.declared_value("bestRating"), Some(Value::from(5.0)));

        assert!(hydrate_named("Rating", Map::new()).unwrap().is_none());
    }

    #[test]
    fn json_schema_lists_declared_fields() {
        let root = global().get("Offer").unwrap().json_schema();
        let value = serde_json::to_value(&root).unwrap();
        let properties = value["properties"].as_object().unwrap();
        assert!(properties.contains_key("price"));
        assert!(properties.contains_key("regularPrice"));
    }
}
