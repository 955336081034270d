//! Inputs a page object is built from: AutoExtract result envelopes and
//! browser HTML.
//!
//! The AutoExtract API answers with a JSON array (one entry per query, to
//! allow batching). Each entry carries the original `query`, an optional
//! `error` and the extracted item under a key named after the page type.

use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use schemars::schema::RootSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{ItemError, Result};
use crate::hydrate::hydrate_value;
use crate::item::{Item, ItemFields};
use crate::items::{Article, Product, ProductList};
use crate::registry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageType {
    Article,
    Product,
    ProductList,
}

impl PageType {
    pub const ALL: [PageType; 3] = [PageType::Article, PageType::Product, PageType::ProductList];

    /// Key the item is stored under in a result envelope.
    pub fn key(&self) -> &'static str {
        match self {
            PageType::Article => "article",
            PageType::Product => "product",
            PageType::ProductList => "productList",
        }
    }

    /// Registered name of the item type this page type yields.
    pub fn item_name(&self) -> &'static str {
        match self {
            PageType::Article => Article::NAME,
            PageType::Product => Product::NAME,
            PageType::ProductList => ProductList::NAME,
        }
    }

    /// Hydrate this page type's item out of an envelope without naming the
    /// item type statically.
    pub fn hydrate(&self, envelope: &Map<String, Value>) -> Result<Option<Box<dyn ItemFields>>> {
        match envelope.get(self.key()) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Object(raw)) => registry::hydrate_named(self.item_name(), raw.clone())
                .map_err(|err| err.within(self.key())),
            Some(other) => Err(ItemError::mismatch(self.key(), "object", other)),
        }
    }

    pub fn json_schema(&self) -> Result<RootSchema> {
        Ok(registry::global().get(self.item_name())?.json_schema())
    }
}

impl fmt::Display for PageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for PageType {
    type Err = ItemError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "article" => Ok(PageType::Article),
            "product" => Ok(PageType::Product),
            "productList" | "product-list" | "product_list" => Ok(PageType::ProductList),
            other => Err(ItemError::InvalidSchema(format!("unknown page type `{other}`"))),
        }
    }
}

/// Item types that are the top-level result of a page type.
pub trait PageItem: Item {
    const PAGE_TYPE: PageType;
}

impl PageItem for Article {
    const PAGE_TYPE: PageType = PageType::Article;
}

impl PageItem for Product {
    const PAGE_TYPE: PageType = PageType::Product;
}

impl PageItem for ProductList {
    const PAGE_TYPE: PageType = PageType::ProductList;
}

/// One AutoExtract result envelope, typed by the item it should contain.
#[derive(Debug, Clone)]
pub struct ExtractionData<T: PageItem> {
    data: Map<String, Value>,
    item: PhantomData<fn() -> T>,
}

pub type ArticleData = ExtractionData<Article>;
pub type ProductData = ExtractionData<Product>;
pub type ProductListData = ExtractionData<ProductList>;

impl<T: PageItem> ExtractionData<T> {
    pub fn new(data: Map<String, Value>) -> Self {
        Self {
            data,
            item: PhantomData,
        }
    }

    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(data) => Ok(Self::new(data)),
            other => Err(ItemError::mismatch("", "object", &other)),
        }
    }

    /// Split a whole API response into its envelopes.
    pub fn batch(response: Value) -> Result<Vec<Self>> {
        Ok(split_batch(response)?.into_iter().map(Self::new).collect())
    }

    pub fn page_type(&self) -> PageType {
        T::PAGE_TYPE
    }

    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    pub fn query(&self) -> Option<&Value> {
        self.data.get("query")
    }

    /// Error message reported by the API for this query, if any.
    pub fn error(&self) -> Option<&str> {
        self.data.get("error").and_then(Value::as_str)
    }

    /// The typed item. An envelope without the page-type key has no item.
    pub fn to_item(&self) -> Result<Option<T>> {
        let key = T::PAGE_TYPE.key();
        match self.data.get(key) {
            Some(raw) => hydrate_value(raw.clone()).map_err(|err| err.within(key)),
            None => {
                debug!(key, error = ?self.error(), "result envelope has no item");
                Ok(None)
            }
        }
    }
}

/// Split an API response into result envelopes. A bare object counts as a
/// batch of one.
pub fn split_batch(response: Value) -> Result<Vec<Map<String, Value>>> {
    match response {
        Value::Array(entries) => entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| match entry {
                Value::Object(envelope) => Ok(envelope),
                other => Err(ItemError::mismatch(format!("[{index}]"), "object", &other)),
            })
            .collect(),
        Value::Object(envelope) => Ok(vec![envelope]),
        other => Err(ItemError::mismatch("", "array", &other)),
    }
}

/// Browser HTML of a page as rendered by AutoExtract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedHtml {
    pub url: String,
    pub html: String,
}

impl ExtractedHtml {
    pub fn new(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            html: html.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn page_types_parse_from_their_keys() {
        for page_type in PageType::ALL {
            assert_eq!(page_type.key().parse::<PageType>().unwrap(), page_type);
        }
        assert_eq!("product-list".parse::<PageType>().unwrap(), PageType::ProductList);
        assert!(matches!(
            "recipe".parse::<PageType>(),
            Err(ItemError::InvalidSchema(_))
        ));
    }

    #[test]
    fn missing_page_key_is_no_item() {
        let data = ProductData::from_value(json!({
            "query": {"id": "1", "domain": "example.com"},
            "error": "Downloader error: http404",
        }))
        .unwrap();
        assert!(data.to_item().unwrap().is_none());
        assert_eq!(data.error(), Some("Downloader error: http404"));
        assert_eq!(data.page_type(), PageType::Product);
    }

    #[test]
    fn item_errors_are_prefixed_with_the_page_key() {
        let data = ProductData::from_value(json!({"product": {"name": 3}})).unwrap();
        let err = data.to_item().unwrap_err();
        assert!(matches!(err, ItemError::TypeMismatch { path, .. } if path == "product.name"));
    }

    #[test]
    fn batch_splits_envelopes() {
        let batch = ArticleData::batch(json!([
            {"query": {"id": "a"}, "article": {"headline": "One"}},
            {"query": {"id": "b"}, "article": {"headline": "Two"}},
        ]))
        .unwrap();
        let headlines: Vec<_> = batch
            .iter()
            .map(|data| data.to_item().unwrap().unwrap().headline)
            .collect();
        assert_eq!(headlines, vec![Some("One".to_string()), Some("Two".to_string())]);
        assert_eq!(batch[1].query(), Some(&json!({"id": "b"})));
    }

    #[test]
    fn batch_rejects_non_object_entries() {
        let err = split_batch(json!([{}, 3])).unwrap_err();
        assert!(matches!(err, ItemError::TypeMismatch { path, .. } if path == "[1]"));
    }

    #[test]
    fn dynamic_hydration_by_page_type() {
        let envelope = json!({"productList": {"products": [{"name": "A"}]}});
        let item = PageType::ProductList
            .hydrate(envelope.as_object().unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(item.item_name(), "ProductList");
        assert_eq!(item.declared_value("products"), Some(json!([{"name": "A"}])));

        let empty = json!({"query": {}});
        assert!(PageType::Article.hydrate(empty.as_object().unwrap()).unwrap().is_none());
    }

    #[test]
    fn html_input_holds_url_and_markup() {
        let html = ExtractedHtml::new("https://example.com", "<html><body><p>Hello!</p></body></html>");
        assert_eq!(html.url, "https://example.com");
        assert_eq!(html, html.clone());
    }
}
