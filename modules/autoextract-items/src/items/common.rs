//! Small item types shared by the page-level items.

declare_item! {
    /// A price offer for a product.
    pub struct Offer {
        /// Price as shown on the page, without currency symbol.
        price: Option<String> => "price",
        /// ISO 4217 currency code.
        currency: Option<String> => "currency",
        /// Availability status, usually `InStock` or `OutOfStock`.
        availability: Option<String> => "availability",
        /// Price before any discount.
        regular_price: Option<String> => "regularPrice",
    }
}

declare_item! {
    /// One step of a breadcrumb trail.
    pub struct Breadcrumb {
        name: Option<String> => "name",
        link: Option<String> => "link",
    }
}

declare_item! {
    pub struct Rating {
        /// Average rating.
        rating_value: Option<f64> => "ratingValue",
        /// Highest value the rating scale allows.
        best_rating: Option<f64> => "bestRating",
        review_count: Option<i64> => "reviewCount",
    }
}

declare_item! {
    /// A name/value product attribute, such as a row of a specifications table.
    pub struct AdditionalProperty {
        name: Option<String> => "name",
        value: Option<String> => "value",
    }
}

declare_item! {
    /// Global Trade Item Number.
    pub struct Gtin {
        /// Identifier scheme: `isbn10`, `isbn13`, `issn`, `ean13`, `upc`,
        /// `ismn`, `gtin8` or `gtin14`.
        kind: Option<String> => "type",
        value: Option<String> => "value",
    }
}

declare_item! {
    /// Link to another page of a paginated listing.
    pub struct PaginationLink {
        url: Option<String> => "url",
        /// Anchor text of the link.
        text: Option<String> => "text",
    }
}
