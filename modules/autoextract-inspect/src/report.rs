//! What the subcommands compute, kept apart from printing.

use std::path::Path;

use anyhow::{Context, Result};
use autoextract_items::page_inputs::split_batch;
use autoextract_items::{registry, ItemFields, ItemView, PageType};
use serde::Serialize;
use serde_json::{Map, Value};

/// Read a saved AutoExtract response (a JSON array of result envelopes).
pub fn read_response(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("{} is not valid JSON", path.display()))
}

fn query_id(envelope: &Map<String, Value>) -> Option<String> {
    envelope
        .get("query")
        .and_then(|query| query.get("id"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemReport {
    pub index: usize,
    pub query_id: Option<String>,
    pub error: Option<String>,
    /// `None` when the envelope carried no item for the page type.
    pub item: Option<&'static str>,
    pub known: Vec<String>,
    pub unknown: Vec<String>,
}

pub fn inspect_response(response: Value, page_type: PageType) -> Result<Vec<ItemReport>> {
    split_batch(response)?
        .into_iter()
        .enumerate()
        .map(|(index, envelope)| {
            let item = page_type
                .hydrate(&envelope)
                .with_context(|| format!("result {index}"))?;
            let (known, unknown) = match &item {
                Some(item) => split_names(item.as_ref()),
                None => (Vec::new(), Vec::new()),
            };
            Ok(ItemReport {
                index,
                query_id: query_id(&envelope),
                error: envelope.get("error").and_then(Value::as_str).map(str::to_string),
                item: item.as_ref().map(|item| item.item_name()),
                known,
                unknown,
            })
        })
        .collect()
}

fn split_names(item: &dyn ItemFields) -> (Vec<String>, Vec<String>) {
    let known = item
        .declared_keys()
        .iter()
        .filter(|key| item.is_set(key))
        .map(|key| key.to_string())
        .collect();
    let unknown = item.unknown_fields().keys().cloned().collect();
    (known, unknown)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundTripReport {
    pub index: usize,
    pub query_id: Option<String>,
    /// Top-level keys of the payload missing from the re-serialized item.
    pub missing: Vec<String>,
    /// Top-level keys present on both sides with different values.
    pub changed: Vec<String>,
    /// Top-level keys the item emitted that the payload did not have.
    pub added: Vec<String>,
}

impl RoundTripReport {
    pub fn survived(&self) -> bool {
        self.missing.is_empty() && self.changed.is_empty() && self.added.is_empty()
    }
}

/// Hydrate every envelope's item and serialize it back through the adapter.
/// Envelopes without an item survive trivially.
pub fn roundtrip_response(response: Value, page_type: PageType) -> Result<Vec<RoundTripReport>> {
    split_batch(response)?
        .into_iter()
        .enumerate()
        .map(|(index, envelope)| {
            let original = match envelope.get(page_type.key()) {
                Some(Value::Object(raw)) if !raw.is_empty() => raw.clone(),
                _ => Map::new(),
            };
            let output = page_type
                .hydrate(&envelope)
                .with_context(|| format!("result {index}"))?
                .map(|item| ItemView::new(item.as_ref()).to_mapping())
                .unwrap_or_default();

            Ok(RoundTripReport {
                index,
                query_id: query_id(&envelope),
                missing: keys_not_in(&original, &output),
                changed: original
                    .iter()
                    .filter(|(key, value)| output.get(*key).is_some_and(|out| out != *value))
                    .map(|(key, _)| key.clone())
                    .collect(),
                added: keys_not_in(&output, &original),
            })
        })
        .collect()
}

fn keys_not_in(left: &Map<String, Value>, right: &Map<String, Value>) -> Vec<String> {
    left.keys()
        .filter(|key| !right.contains_key(*key))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldRow {
    pub key: &'static str,
    pub kind: String,
    pub metadata: Map<String, Value>,
}

/// Declared fields of a registered item type, in declaration order.
pub fn describe_fields(item: &str) -> Result<Vec<FieldRow>> {
    autoextract_items::register_builtin_items()?;
    let entry = registry::global().get(item)?;
    Ok(entry
        .schema()
        .fields()
        .iter()
        .map(|field| FieldRow {
            key: field.key(),
            kind: field.kind().to_string(),
            metadata: field.metadata().clone(),
        })
        .collect())
}

pub fn json_schema(page_type: PageType) -> Result<String> {
    let schema = page_type.json_schema()?;
    Ok(serde_json::to_string_pretty(&schema)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn response() -> Value {
        json!([
            {
                "query": {"id": "q-1"},
                "product": {
                    "name": "Widget",
                    "offers": [{"price": "10", "currency": "USD"}],
                    "color": "blue",
                },
            },
            {"query": {"id": "q-2"}, "error": "Downloader error: http404"},
        ])
    }

    #[test]
    fn inspect_splits_known_and_unknown_names() {
        let reports = inspect_response(response(), PageType::Product).unwrap();
        assert_eq!(reports.len(), 2);

        let first = &reports[0];
        assert_eq!(first.query_id.as_deref(), Some("q-1"));
        assert_eq!(first.item, Some("Product"));
        assert_eq!(first.known, vec!["name", "offers"]);
        assert_eq!(first.unknown, vec!["color"]);

        let second = &reports[1];
        assert_eq!(second.item, None);
        assert_eq!(second.error.as_deref(), Some("Downloader error: http404"));
    }

    #[test]
    fn roundtrip_reports_survival() {
        let reports = roundtrip_response(response(), PageType::Product).unwrap();
        assert!(reports.iter().all(RoundTripReport::survived));
    }

    #[test]
    fn roundtrip_flags_lossy_payloads() {
        let lossy = json!([{"product": {"name": "Widget", "aggregateRating": {}, "probability": 1}}]);
        let report = &roundtrip_response(lossy, PageType::Product).unwrap()[0];
        assert!(!report.survived());
        assert_eq!(report.changed, vec!["aggregateRating"]);
        assert!(report.missing.is_empty());
    }

    #[test]
    fn wrong_shapes_fail_with_the_result_index() {
        let bad = json!([{"product": {"name": 7}}]);
        let err = inspect_response(bad, PageType::Product).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("result 0"));
        assert!(message.contains("product.name"));
    }

    #[test]
    fn fields_come_from_the_registry() {
        let rows = describe_fields("Offer").unwrap();
        let keys: Vec<_> = rows.iter().map(|row| row.key).collect();
        assert_eq!(keys, vec!["price", "currency", "availability", "regularPrice"]);
        assert_eq!(rows[0].kind, "text?");
        assert!(describe_fields("Spaceship").is_err());
    }

    #[test]
    fn schema_is_pretty_json() {
        let text = json_schema(PageType::Article).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["title"], json!("Article"));
        assert!(value["properties"]["headline"].is_object());
    }

    #[test]
    fn reads_saved_responses() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", response()).unwrap();
        let value = read_response(file.path()).unwrap();
        assert_eq!(value, response());

        let mut broken = tempfile::NamedTempFile::new().unwrap();
        write!(broken, "[{{").unwrap();
        assert!(read_response(broken.path()).is_err());
    }
}
