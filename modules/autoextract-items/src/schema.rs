//! Declarative field tables.
//!
//! Every item type describes its fields once as a list of [`FieldSpec`]s
//! (JSON key, semantic kind, descriptive metadata). The registry turns that
//! list into an [`ItemSchema`] the first time the type is used.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use schemars::schema::{InstanceType, Metadata, ObjectValidation, Schema, SchemaObject};
use serde_json::{Map, Value};

use crate::error::{ItemError, Result};
use crate::item::Item;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Text,
    Float,
    Integer,
    Boolean,
}

impl ScalarKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScalarKind::Text => "text",
            ScalarKind::Float => "float",
            ScalarKind::Integer => "integer",
            ScalarKind::Boolean => "boolean",
        }
    }
}

/// Reference to another item type, used by nested and sequence fields.
#[derive(Clone, Copy)]
pub struct ItemRef {
    name: &'static str,
    schema: fn() -> Result<Arc<ItemSchema>>,
}

impl ItemRef {
    pub fn of<T: Item>() -> Self {
        Self {
            name: T::NAME,
            schema: T::schema,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn schema(&self) -> Result<Arc<ItemSchema>> {
        (self.schema)()
    }
}

impl PartialEq for ItemRef {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for ItemRef {}

impl fmt::Debug for ItemRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ItemRef").field(&self.name).finish()
    }
}

/// Semantic type of a declared field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Must hold a value of the scalar type when present; null is a mismatch.
    Scalar(ScalarKind),
    OptionalScalar(ScalarKind),
    /// Another item. Always optional: absent, null and `{}` all mean no item.
    Nested(ItemRef),
    Sequence {
        element: Box<FieldKind>,
        /// Optional sequences keep null/absent as `None` instead of `[]`.
        optional: bool,
    },
}

impl FieldKind {
    /// The kind of `Option<T>` given the kind of `T`.
    pub fn optional(self) -> Self {
        match self {
            FieldKind::Scalar(scalar) => FieldKind::OptionalScalar(scalar),
            FieldKind::Sequence { element, .. } => FieldKind::Sequence {
                element,
                optional: true,
            },
            other => other,
        }
    }

    /// Item types this field hydrates into, directly or as sequence elements.
    pub fn nested_item(&self) -> Option<ItemRef> {
        match self {
            FieldKind::Nested(item) => Some(*item),
            FieldKind::Sequence { element, .. } => element.nested_item(),
            _ => None,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Scalar(scalar) => write!(f, "{}", scalar.as_str()),
            FieldKind::OptionalScalar(scalar) => write!(f, "{}?", scalar.as_str()),
            FieldKind::Nested(item) => write!(f, "{}?", item.name()),
            FieldKind::Sequence { element, optional } => {
                write!(f, "[{element}]")?;
                if *optional {
                    write!(f, "?")?;
                }
                Ok(())
            }
        }
    }
}

/// One declared field: JSON key, kind and descriptive metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    key: &'static str,
    kind: FieldKind,
    metadata: Map<String, Value>,
}

impl FieldSpec {
    pub fn new(key: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            kind,
            metadata: Map::new(),
        }
    }

    /// Record documentation under the `doc` metadata key. Blank text is ignored.
    pub fn with_doc(mut self, doc: &str) -> Self {
        let doc = doc
            .lines()
            .map(str::trim)
            .collect::<Vec<_>>()
            .join("\n");
        let doc = doc.trim();
        if !doc.is_empty() {
            self.metadata
                .insert("doc".to_string(), Value::String(doc.to_string()));
        }
        self
    }

    pub fn with_metadata(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn metadata(&self) -> &Map<String, Value> {
        &self.metadata
    }
}

/// The validated, immutable field table of one item type.
#[derive(Debug)]
pub struct ItemSchema {
    name: &'static str,
    fields: Vec<FieldSpec>,
    index: HashMap<&'static str, usize>,
}

impl ItemSchema {
    /// Validate a field list. Empty or repeated keys make the schema invalid.
    pub fn build(name: &'static str, fields: Vec<FieldSpec>) -> Result<Self> {
        let mut index = HashMap::with_capacity(fields.len());
        for (position, field) in fields.iter().enumerate() {
            if field.key.is_empty() {
                return Err(ItemError::InvalidSchema(format!(
                    "{name} declares a field with an empty key"
                )));
            }
            if index.insert(field.key, position).is_some() {
                return Err(ItemError::InvalidSchema(format!(
                    "{name} declares `{}` more than once",
                    field.key
                )));
            }
        }
        Ok(Self {
            name,
            fields,
            index,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Declared fields in declaration order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, key: &str) -> Option<&FieldSpec> {
        self.index.get(key).map(|&position| &self.fields[position])
    }

    pub fn declares(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|field| field.key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// JSON Schema object for an item: one property per declared field, doc
/// metadata as descriptions, additional properties left open.
pub fn item_json_schema(
    name: &str,
    mut properties: schemars::Map<String, Schema>,
    fields: &[FieldSpec],
) -> Schema {
    for field in fields {
        if let Some(Value::String(doc)) = field.metadata().get("doc") {
            if let Some(Schema::Object(property)) = properties.get_mut(field.key()) {
                property.metadata().description = Some(doc.clone());
            }
        }
    }

    SchemaObject {
        metadata: Some(Box::new(Metadata {
            title: Some(name.to_string()),
            ..Default::default()
        })),
        instance_type: Some(InstanceType::Object.into()),
        object: Some(Box::new(ObjectValidation {
            properties,
            ..Default::default()
        })),
        ..Default::default()
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_indexes_fields_in_declaration_order() {
        let schema = ItemSchema::build(
            "Sample",
            vec![
                FieldSpec::new("b", FieldKind::Scalar(ScalarKind::Text)),
                FieldSpec::new("a", FieldKind::OptionalScalar(ScalarKind::Float)),
            ],
        )
        .unwrap();

        assert_eq!(schema.field_names().collect::<Vec<_>>(), vec!["b", "a"]);
        assert!(schema.declares("a"));
        assert!(!schema.declares("c"));
        assert_eq!(
            schema.field("a").unwrap().kind(),
            &FieldKind::OptionalScalar(ScalarKind::Float)
        );
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let err = ItemSchema::build(
            "Broken",
            vec![
                FieldSpec::new("name", FieldKind::Scalar(ScalarKind::Text)),
                FieldSpec::new("name", FieldKind::Scalar(ScalarKind::Text)),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, ItemError::InvalidSchema(msg) if msg.contains("`name`")));
    }

    #[test]
    fn empty_keys_are_rejected() {
        let err = ItemSchema::build(
            "Broken",
            vec![FieldSpec::new("", FieldKind::Scalar(ScalarKind::Text))],
        )
        .unwrap_err();
        assert!(matches!(err, ItemError::InvalidSchema(_)));
    }

    #[test]
    fn with_doc_trims_and_skips_blank_text() {
        let spec = FieldSpec::new("price", FieldKind::OptionalScalar(ScalarKind::Text))
            .with_doc(" Offer price.\n As shown on the page.\n");
        assert_eq!(
            spec.metadata().get("doc"),
            Some(&Value::from("Offer price.\nAs shown on the page."))
        );

        let bare = FieldSpec::new("price", FieldKind::OptionalScalar(ScalarKind::Text)).with_doc("");
        assert!(bare.metadata().is_empty());
    }

    #[test]
    fn kind_display_is_compact() {
        let kind = FieldKind::Sequence {
            element: Box::new(FieldKind::Scalar(ScalarKind::Text)),
            optional: true,
        };
        assert_eq!(kind.to_string(), "[text]?");
        assert_eq!(FieldKind::Scalar(ScalarKind::Integer).optional().to_string(), "integer?");
    }
}
