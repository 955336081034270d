//! One key-based view over an item's declared fields and its side table.
//!
//! Serialization and inspection code goes through [`ItemView`] (shared
//! borrow) or [`ItemAdapter`] (exclusive borrow) and never needs to know the
//! concrete item type.
//!
//! Field order is: declared fields that are set, in declaration order, then
//! side-table keys in side-table order, skipping names already listed.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

use crate::error::{ItemError, Result};
use crate::item::ItemFields;

#[derive(Clone, Copy)]
pub struct ItemView<'a> {
    item: &'a dyn ItemFields,
}

impl<'a> ItemView<'a> {
    pub fn new(item: &'a dyn ItemFields) -> Self {
        Self { item }
    }

    pub fn field_names(&self) -> Vec<&'a str> {
        let item = self.item;
        let mut names: Vec<&'a str> = item
            .declared_keys()
            .iter()
            .copied()
            .filter(|key| item.is_set(key))
            .collect();

        for key in item.unknown_fields().keys() {
            if !names.contains(&key.as_str()) {
                names.push(key.as_str());
            }
        }
        names
    }

    /// A set declared field wins over a side-table entry of the same name.
    /// An unset declared field yields the side-table entry if there is one,
    /// else its default (`null`, `[]`, ...).
    pub fn get(&self, name: &str) -> Result<Value> {
        let unknown = self.item.unknown_fields().get(name);
        if self.item.is_declared(name) {
            if !self.item.is_set(name) {
                if let Some(value) = unknown {
                    return Ok(value.clone());
                }
            }
            if let Some(value) = self.item.declared_value(name) {
                return Ok(value);
            }
        }
        unknown
            .cloned()
            .ok_or_else(|| ItemError::key_not_found(self.item.item_name(), name))
    }

    pub fn contains(&self, name: &str) -> bool {
        (self.item.is_declared(name) && self.item.is_set(name))
            || self.item.unknown_fields().contains_key(name)
    }

    /// Metadata of a declared field; empty for anything else.
    pub fn metadata(&self, name: &str) -> Result<Map<String, Value>> {
        if !self.item.is_declared(name) {
            return Ok(Map::new());
        }
        let schema = self.item.item_schema()?;
        Ok(schema
            .field(name)
            .map(|field| field.metadata().clone())
            .unwrap_or_default())
    }

    pub fn len(&self) -> usize {
        self.field_names().len()
    }

    pub fn is_empty(&self) -> bool {
        !self.item.declared_keys().iter().any(|key| self.item.is_set(key))
            && self.item.unknown_fields().is_empty()
    }

    pub fn iter(&self) -> std::vec::IntoIter<&'a str> {
        self.field_names().into_iter()
    }

    /// Every visible field as one mapping, declared fields first.
    pub fn to_mapping(&self) -> Map<String, Value> {
        self.field_names()
            .into_iter()
            .filter_map(|name| self.get(name).ok().map(|value| (name.to_string(), value)))
            .collect()
    }
}

impl<'a> IntoIterator for &ItemView<'a> {
    type Item = &'a str;
    type IntoIter = std::vec::IntoIter<&'a str>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for ItemView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mapping = self.to_mapping();
        let mut map = serializer.serialize_map(Some(mapping.len()))?;
        for (name, value) in &mapping {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

pub struct ItemAdapter<'a> {
    item: &'a mut dyn ItemFields,
}

impl<'a> ItemAdapter<'a> {
    pub fn new(item: &'a mut dyn ItemFields) -> Self {
        Self { item }
    }

    pub fn view(&self) -> ItemView<'_> {
        ItemView::new(&*self.item)
    }

    pub fn field_names(&self) -> Vec<String> {
        self.view()
            .field_names()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn get(&self, name: &str) -> Result<Value> {
        self.view().get(name)
    }

    /// Declared names are assigned through their field type, so a value of
    /// the wrong shape fails with `TypeMismatch` and leaves the field as it
    /// was. Any other name goes into the side table.
    pub fn set(&mut self, name: &str, value: Value) -> Result<()> {
        if self.item.is_declared(name) {
            self.item.assign(name, value)
        } else {
            self.item
                .unknown_fields_mut()
                .insert(name.to_string(), value);
            Ok(())
        }
    }

    /// Remove a field and return its last value. Declared fields are reset
    /// to their default and unset; deleting one that is not set, or a name
    /// that is neither declared nor in the side table, is `KeyNotFound`.
    pub fn delete(&mut self, name: &str) -> Result<Value> {
        if self.item.is_declared(name) {
            if !self.item.is_set(name) {
                return Err(ItemError::key_not_found(self.item.item_name(), name));
            }
            let previous = self.item.declared_value(name).unwrap_or(Value::Null);
            self.item.unset(name)?;
            return Ok(previous);
        }

        let item_name = self.item.item_name();
        self.item
            .unknown_fields_mut()
            .shift_remove(name)
            .ok_or_else(|| ItemError::key_not_found(item_name, name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.view().contains(name)
    }

    pub fn metadata(&self, name: &str) -> Result<Map<String, Value>> {
        self.view().metadata(name)
    }

    pub fn len(&self) -> usize {
        self.view().len()
    }

    pub fn is_empty(&self) -> bool {
        self.view().is_empty()
    }

    pub fn to_mapping(&self) -> Map<String, Value> {
        self.view().to_mapping()
    }
}
