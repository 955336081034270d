use super::common::{Breadcrumb, Offer, PaginationLink, Rating};

declare_item! {
    /// One product as listed on a category or search results page.
    pub struct ProductFromList {
        name: Option<String> => "name",
        offers: Option<Vec<Offer>> => "offers",
        sku: Option<String> => "sku",
        brand: Option<String> => "brand",
        main_image: Option<String> => "mainImage",
        images: Option<Vec<String>> => "images",
        description: Option<String> => "description",
        aggregate_rating: Option<Rating> => "aggregateRating",
        /// Confidence that this entry is a product, from 0 to 1.
        probability: Option<f64> => "probability",
        /// Link to the product detail page.
        url: Option<String> => "url",
    }
}

declare_item! {
    /// A page listing several products.
    pub struct ProductList {
        url: Option<String> => "url",
        products: Option<Vec<ProductFromList>> => "products",
        breadcrumbs: Option<Vec<Breadcrumb>> => "breadcrumbs",
        pagination_next: Option<PaginationLink> => "paginationNext",
        pagination_previous: Option<PaginationLink> => "paginationPrevious",
    }
}
