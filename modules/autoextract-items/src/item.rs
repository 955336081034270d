//! The item abstraction.
//!
//! [`ItemFields`] is the object-safe surface the adapter works through;
//! [`Item`] adds the static, per-type parts (name, field table, strict
//! construction). Both are implemented by `declare_item!`.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use schemars::JsonSchema;
use serde_json::{Map, Value};

use crate::collection;
use crate::error::Result;
use crate::field::FieldType;
use crate::hydrate;
use crate::registry;
use crate::schema::{FieldSpec, ItemSchema};

/// Payload fields an item type does not declare, in payload order.
pub type UnknownFields = Map<String, Value>;

/// Per-instance bookkeeping owned by every item: the unknown-fields side
/// table, which declared keys are currently set, and which float fields were
/// written as integer literals in the payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemState {
    unknown: UnknownFields,
    present: BTreeSet<&'static str>,
    integral: BTreeSet<&'static str>,
}

impl ItemState {
    pub fn unknown(&self) -> &UnknownFields {
        &self.unknown
    }

    pub fn unknown_mut(&mut self) -> &mut UnknownFields {
        &mut self.unknown
    }

    #[doc(hidden)]
    pub fn mark(&mut self, key: &'static str) {
        self.present.insert(key);
    }

    #[doc(hidden)]
    pub fn unmark(&mut self, key: &str) -> bool {
        self.integral.remove(key);
        self.present.remove(key)
    }

    #[doc(hidden)]
    pub fn is_marked(&self, key: &str) -> bool {
        self.present.contains(key)
    }

    #[doc(hidden)]
    pub fn set_integral(&mut self, key: &'static str, integral: bool) {
        if integral {
            self.integral.insert(key);
        } else {
            self.integral.remove(key);
        }
    }

    /// Write a whole float back as the integer literal it was read from.
    #[doc(hidden)]
    pub fn restore_number_form(&self, key: &str, value: Value) -> Value {
        if !self.integral.contains(key) {
            return value;
        }
        match value.as_f64() {
            Some(number) if number.fract() == 0.0 && number.abs() <= MAX_EXACT_INTEGER => {
                Value::from(number as i64)
            }
            _ => value,
        }
    }
}

// Largest magnitude below which every integer has an exact f64 form.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Uniform, type-erased access to an item's declared fields and side table.
pub trait ItemFields: fmt::Debug + Send + Sync {
    fn item_name(&self) -> &'static str;

    /// Declared JSON keys in declaration order.
    fn declared_keys(&self) -> &'static [&'static str];

    fn is_declared(&self, key: &str) -> bool {
        self.declared_keys().iter().any(|declared| *declared == key)
    }

    /// JSON form of a declared field, `None` if `key` is not declared.
    fn declared_value(&self, key: &str) -> Option<Value>;

    /// A declared key is set when it came from the payload, was assigned, or
    /// holds something other than its default.
    fn is_set(&self, key: &str) -> bool;

    /// Assign a declared field from JSON and mark it set.
    fn assign(&mut self, key: &str, value: Value) -> Result<()>;

    /// Reset a declared field to its default and mark it unset. Fails with
    /// `KeyNotFound` when the field is not declared or not currently set.
    fn unset(&mut self, key: &str) -> Result<()>;

    fn item_schema(&self) -> Result<Arc<ItemSchema>>;

    fn state(&self) -> &ItemState;

    fn state_mut(&mut self) -> &mut ItemState;

    fn unknown_fields(&self) -> &UnknownFields {
        self.state().unknown()
    }

    fn unknown_fields_mut(&mut self) -> &mut UnknownFields {
        self.state_mut().unknown_mut()
    }
}

pub trait Item: ItemFields + FieldType + JsonSchema + Clone + Default + 'static {
    const NAME: &'static str;

    /// Declared JSON keys in declaration order.
    const FIELDS: &'static [&'static str];

    /// The declarative field table the registry builds the schema from.
    fn describe() -> Vec<FieldSpec>;

    /// Strict construction: every key must be declared, otherwise
    /// `UnexpectedField`. Nested values are hydrated; no side table is kept.
    fn from_fields(fields: Map<String, Value>) -> Result<Self>;

    /// Cached schema from the process-wide registry.
    fn schema() -> Result<Arc<ItemSchema>> {
        registry::global().schema_of::<Self>()
    }

    fn from_mapping(raw: Map<String, Value>) -> Result<Option<Self>> {
        hydrate::hydrate(Some(raw))
    }

    fn from_value(raw: Value) -> Result<Option<Self>> {
        hydrate::hydrate_value(raw)
    }

    fn from_list(raw: Option<Vec<Value>>) -> Result<Vec<Self>> {
        collection::hydrate_list(raw)
    }
}
