use super::common::{AdditionalProperty, Breadcrumb, Gtin, Offer, Rating};

declare_item! {
    /// A product detail page.
    pub struct Product {
        name: Option<String> => "name",
        offers: Option<Vec<Offer>> => "offers",
        /// Stock keeping unit.
        sku: Option<String> => "sku",
        gtin: Option<Vec<Gtin>> => "gtin",
        /// Manufacturer part number.
        mpn: Option<String> => "mpn",
        brand: Option<String> => "brand",
        breadcrumbs: Option<Vec<Breadcrumb>> => "breadcrumbs",
        main_image: Option<String> => "mainImage",
        images: Option<Vec<String>> => "images",
        description: Option<String> => "description",
        /// Confidence that the page is a product page, from 0 to 1.
        probability: Option<f64> => "probability",
        url: Option<String> => "url",
        /// Specification rows found on the page.
        additional_property: Option<Vec<AdditionalProperty>> => "additionalProperty",
        aggregate_rating: Option<Rating> => "aggregateRating",
    }
}
