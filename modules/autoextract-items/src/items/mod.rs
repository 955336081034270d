//! AutoExtract item types.

mod article;
mod common;
mod product;
mod product_list;

pub use article::Article;
pub use common::{AdditionalProperty, Breadcrumb, Gtin, Offer, PaginationLink, Rating};
pub use product::Product;
pub use product_list::{ProductFromList, ProductList};

use crate::error::Result;
use crate::registry::{self, SchemaRegistry};

/// Register every built-in item type with `registry`.
pub fn register_all(registry: &SchemaRegistry) -> Result<()> {
    registry.register::<Offer>()?;
    registry.register::<Breadcrumb>()?;
    registry.register::<Rating>()?;
    registry.register::<AdditionalProperty>()?;
    registry.register::<Gtin>()?;
    registry.register::<PaginationLink>()?;
    registry.register::<Article>()?;
    registry.register::<Product>()?;
    registry.register::<ProductFromList>()?;
    registry.register::<ProductList>()?;
    Ok(())
}

/// Make sure every built-in item type is in the process-wide registry and
/// return the registered names.
pub fn register_builtin_items() -> Result<Vec<&'static str>> {
    let registry = registry::global();
    register_all(registry)?;
    Ok(registry.registered_names())
}
