//! Item types declared outside the crate, and how the registry treats them.

use autoextract_items::prelude::*;
use autoextract_items::{classify_named, declare_item, hydrate_named, register_builtin_items};
use serde_json::json;

declare_item! {
    /// Store opening hours.
    pub struct OpeningHours {
        /// Day of week, `Mo` to `Su`.
        day: Option<String> => "dayOfWeek" { "example": "Mo" },
        opens: Option<String> => "opens",
        closes: Option<String> => "closes",
        /// Extra breadcrumbs are fine here too.
        trail: Option<Vec<Breadcrumb>> => "trail",
    }
}

declare_item! {
    pub struct Twice {
        first: Option<String> => "same",
        second: Option<String> => "same",
    }
}

mod shadow {
    autoextract_items::declare_item! {
        pub struct Offer {
            price: Option<String> => "price",
        }
    }
}

#[test]
fn external_items_hydrate_and_describe_themselves() {
    let hours = OpeningHours::from_value(json!({
        "dayOfWeek": "Tu",
        "opens": "09:00",
        "trail": [{"name": "Stores"}, null],
        "holiday": false,
    }))
    .unwrap()
    .unwrap();

    assert_eq!(hours.day.as_deref(), Some("Tu"));
    assert_eq!(hours.trail.as_ref().unwrap().len(), 1);
    assert_eq!(hours.unknown_fields().get("holiday"), Some(&json!(false)));

    let view = ItemView::new(&hours);
    assert_eq!(view.field_names(), vec!["dayOfWeek", "opens", "trail", "holiday"]);
    let meta = view.metadata("dayOfWeek").unwrap();
    assert_eq!(meta.get("example"), Some(&json!("Mo")));
    assert_eq!(meta.get("doc"), Some(&json!("Day of week, `Mo` to `Su`.")));
}

#[test]
fn repeated_keys_make_an_invalid_schema() {
    assert!(matches!(Twice::schema(), Err(ItemError::InvalidSchema(_))));
    assert!(matches!(
        Twice::from_value(json!({"same": "x"})),
        Err(ItemError::InvalidSchema(_))
    ));
}

#[test]
fn names_cannot_be_claimed_twice() {
    register_builtin_items().unwrap();
    let err = shadow::Offer::schema().unwrap_err();
    assert!(matches!(err, ItemError::InvalidSchema(msg) if msg.contains("Offer")));

    // The built-in type keeps the name.
    assert!(Offer::schema().is_ok());
}

#[test]
fn lookups_by_name() {
    let names = register_builtin_items().unwrap();
    for expected in [
        "AdditionalProperty",
        "Article",
        "Breadcrumb",
        "Gtin",
        "Offer",
        "PaginationLink",
        "Product",
        "ProductFromList",
        "ProductList",
        "Rating",
    ] {
        assert!(names.contains(&expected), "missing {expected}");
    }

    OpeningHours::schema().unwrap();
    let raw = json!({"opens": "08:00", "note": "ring bell"});
    let item = hydrate_named("OpeningHours", raw.as_object().cloned().unwrap())
        .unwrap()
        .unwrap();
    assert_eq!(item.item_name(), "OpeningHours");

    let classified = classify_named(raw.as_object().cloned(), "OpeningHours").unwrap();
    assert_eq!(classified.known, json!({"opens": "08:00"}).as_object().cloned().unwrap());
    assert_eq!(classified.unknown, json!({"note": "ring bell"}).as_object().cloned().unwrap());

    assert!(matches!(
        hydrate_named("Nope", serde_json::Map::new()),
        Err(ItemError::InvalidSchema(_))
    ));
}

#[test]
fn adapter_works_through_trait_objects() {
    let mut product = Product::from_value(json!({"name": "Widget", "colour": "red"}))
        .unwrap()
        .unwrap();
    let mut adapter = ItemAdapter::new(&mut product);

    adapter.set("brand", json!("Northpeak")).unwrap();
    adapter.set("aggregateRating", json!({"ratingValue": 4.5})).unwrap();
    assert_eq!(
        adapter.field_names(),
        vec!["name", "brand", "aggregateRating", "colour"]
    );
    assert!(matches!(
        adapter.set("offers", json!({"price": "1"})),
        Err(ItemError::TypeMismatch { .. })
    ));

    assert_eq!(adapter.delete("colour").unwrap(), json!("red"));
    assert!(matches!(adapter.delete("colour"), Err(ItemError::KeyNotFound { .. })));
    assert!(matches!(adapter.delete("sku"), Err(ItemError::KeyNotFound { .. })));

    assert_eq!(product.brand.as_deref(), Some("Northpeak"));
    assert_eq!(product.aggregate_rating.as_ref().unwrap().rating_value, Some(4.5));
}
