//! Typed, drift-tolerant items for Zyte AutoExtract results.
//!
//! Payloads are hydrated into strongly typed items. Fields an item type does
//! not declare are kept in a per-item side table, so new API fields survive
//! a round trip and removed ones simply stay at their defaults.
//!
//! ```
//! use autoextract_items::prelude::*;
//! use serde_json::json;
//!
//! let product = Product::from_value(json!({
//!     "name": "Widget",
//!     "offers": [{"price": "10", "currency": "USD"}],
//!     "color": "blue",
//! }))
//! .unwrap()
//! .unwrap();
//!
//! assert_eq!(product.offers.as_ref().unwrap()[0].price.as_deref(), Some("10"));
//! assert_eq!(ItemView::new(&product).get("color").unwrap(), json!("blue"));
//! ```

#[macro_use]
mod macros;

pub mod adapter;
pub mod classify;
pub mod collection;
pub mod error;
pub mod field;
pub mod hydrate;
pub mod item;
pub mod items;
pub mod page_inputs;
pub mod pages;
pub mod registry;
pub mod schema;

pub use adapter::{ItemAdapter, ItemView};
pub use classify::{classify, classify_as, classify_named, Classified};
pub use collection::{hydrate_list, hydrate_list_value};
pub use error::{ItemError, Result};
pub use field::FieldType;
pub use hydrate::{hydrate, hydrate_str, hydrate_value};
pub use item::{Item, ItemFields, ItemState, UnknownFields};
pub use items::register_builtin_items;
pub use page_inputs::{ExtractedHtml, ExtractionData, PageItem, PageType};
pub use pages::{ExtractionPage, HtmlPage, ItemPage};
pub use registry::{hydrate_named, SchemaRegistry};
pub use schema::{FieldKind, FieldSpec, ItemSchema, ScalarKind};

pub mod prelude {
    pub use crate::adapter::{ItemAdapter, ItemView};
    pub use crate::error::{ItemError, Result};
    pub use crate::item::{Item, ItemFields};
    pub use crate::items::*;
    pub use crate::page_inputs::{
        ArticleData, ExtractedHtml, ExtractionData, PageItem, PageType, ProductData,
        ProductListData,
    };
    pub use crate::pages::{ArticlePage, HtmlPage, ItemPage, ProductListPage, ProductPage};
}

#[doc(hidden)]
pub mod __private {
    pub use schemars;
    pub use serde;
    pub use serde_json;
}
