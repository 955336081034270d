//! Page objects: the thing a crawler asks for when it wants an item out of
//! a page.

use crate::error::Result;
use crate::items::{Article, Product, ProductList};
use crate::page_inputs::{ExtractedHtml, ExtractionData, PageItem};

pub trait ItemPage {
    type Item;

    fn to_item(&self) -> Result<Option<Self::Item>>;
}

/// Page object backed by an AutoExtract result envelope.
#[derive(Debug, Clone)]
pub struct ExtractionPage<T: PageItem> {
    data: ExtractionData<T>,
}

pub type ArticlePage = ExtractionPage<Article>;
pub type ProductPage = ExtractionPage<Product>;
pub type ProductListPage = ExtractionPage<ProductList>;

impl<T: PageItem> ExtractionPage<T> {
    pub fn new(data: ExtractionData<T>) -> Self {
        Self { data }
    }

    pub fn data(&self) -> &ExtractionData<T> {
        &self.data
    }
}

impl<T: PageItem> From<ExtractionData<T>> for ExtractionPage<T> {
    fn from(data: ExtractionData<T>) -> Self {
        Self::new(data)
    }
}

impl<T: PageItem> ItemPage for ExtractionPage<T> {
    type Item = T;

    fn to_item(&self) -> Result<Option<T>> {
        self.data.to_item()
    }
}

/// Page object over the browser HTML AutoExtract returned. Custom page
/// objects wrap this and implement [`ItemPage`] themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlPage {
    response: ExtractedHtml,
}

impl HtmlPage {
    pub fn new(response: ExtractedHtml) -> Self {
        Self { response }
    }

    pub fn response(&self) -> &ExtractedHtml {
        &self.response
    }

    pub fn url(&self) -> &str {
        &self.response.url
    }

    pub fn html(&self) -> &str {
        &self.response.html
    }
}
