/// Declare an item type from its field table.
///
/// Each field names the Rust field, its storage type and the JSON key it is
/// read from, optionally followed by a metadata block. Doc comments on a
/// field are recorded as its `doc` metadata.
///
/// ```
/// autoextract_items::declare_item! {
///     /// A shelf label.
///     pub struct Label {
///         /// Printed text.
///         text: Option<String> => "text" { "source": "ocr" },
///         size: Option<f64> => "fontSize",
///     }
/// }
///
/// use autoextract_items::Item;
///
/// let label = Label::from_value(serde_json::json!({"text": "SALE", "color": "red"}))
///     .unwrap()
///     .unwrap();
/// assert_eq!(label.text.as_deref(), Some("SALE"));
/// assert_eq!(serde_json::to_string(&label).unwrap(), r#"{"text":"SALE","color":"red"}"#);
/// ```
///
/// The generated struct derives `Debug`, `Clone`, `Default` and `PartialEq`,
/// and implements `ItemFields`, `Item`, `FieldType`, serde's `Serialize` and
/// `Deserialize`, and `JsonSchema`.
#[macro_export]
macro_rules! declare_item {
    (
        $(#[$attr:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[doc = $doc:literal])*
                $field:ident : $ty:ty => $key:literal
                $( { $($meta_key:literal : $meta_value:expr),* $(,)? } )?
            ),* $(,)?
        }
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Default, PartialEq)]
        $vis struct $name {
            $(
                $(#[doc = $doc])*
                pub $field: $ty,
            )*
            state: $crate::item::ItemState,
        }

        impl $crate::item::ItemFields for $name {
            fn item_name(&self) -> &'static str {
                ::core::stringify!($name)
            }

            fn declared_keys(&self) -> &'static [&'static str] {
                <Self as $crate::item::Item>::FIELDS
            }

            fn declared_value(
                &self,
                key: &str,
            ) -> ::core::option::Option<$crate::__private::serde_json::Value> {
                match key {
                    $(
                        $key => ::core::option::Option::Some(self.state.restore_number_form(
                            $key,
                            $crate::field::FieldType::to_json(&self.$field),
                        )),
                    )*
                    _ => ::core::option::Option::None,
                }
            }

            fn is_set(&self, key: &str) -> bool {
                match key {
                    $(
                        $key => {
                            self.state.is_marked($key)
                                || !$crate::field::FieldType::is_absent(&self.$field)
                        }
                    )*
                    _ => false,
                }
            }

            fn assign(
                &mut self,
                key: &str,
                value: $crate::__private::serde_json::Value,
            ) -> $crate::error::Result<()> {
                match key {
                    $(
                        $key => {
                            let integral = $crate::field::is_integer_in_float(
                                &<$ty as $crate::field::FieldType>::kind(),
                                &value,
                            );
                            self.$field = <$ty as $crate::field::FieldType>::hydrate(value)
                                .map_err(|err| err.within($key))?;
                            self.state.mark($key);
                            self.state.set_integral($key, integral);
                            ::core::result::Result::Ok(())
                        }
                    )*
                    _ => ::core::result::Result::Err($crate::error::ItemError::KeyNotFound {
                        item: ::core::stringify!($name),
                        key: ::std::string::ToString::to_string(key),
                    }),
                }
            }

            fn unset(&mut self, key: &str) -> $crate::error::Result<()> {
                if !$crate::item::ItemFields::is_set(self, key) {
                    return ::core::result::Result::Err($crate::error::ItemError::KeyNotFound {
                        item: ::core::stringify!($name),
                        key: ::std::string::ToString::to_string(key),
                    });
                }
                match key {
                    $(
                        $key => {
                            self.$field = <$ty as $crate::field::FieldType>::absent();
                        }
                    )*
                    _ => {}
                }
                self.state.unmark(key);
                ::core::result::Result::Ok(())
            }

            fn item_schema(
                &self,
            ) -> $crate::error::Result<::std::sync::Arc<$crate::schema::ItemSchema>> {
                <Self as $crate::item::Item>::schema()
            }

            fn state(&self) -> &$crate::item::ItemState {
                &self.state
            }

            fn state_mut(&mut self) -> &mut $crate::item::ItemState {
                &mut self.state
            }
        }

        impl $crate::item::Item for $name {
            const NAME: &'static str = ::core::stringify!($name);
            const FIELDS: &'static [&'static str] = &[$($key),*];

            fn describe() -> ::std::vec::Vec<$crate::schema::FieldSpec> {
                ::std::vec![
                    $(
                        $crate::schema::FieldSpec::new(
                            $key,
                            <$ty as $crate::field::FieldType>::kind(),
                        )
                        .with_doc(::core::concat!($($doc, "\n"),*))
                        $( $( .with_metadata($meta_key, $meta_value) )* )?
                    ),*
                ]
            }

            fn from_fields(
                fields: $crate::__private::serde_json::Map<
                    ::std::string::String,
                    $crate::__private::serde_json::Value,
                >,
            ) -> $crate::error::Result<Self> {
                let mut item = <Self as ::core::default::Default>::default();
                for (key, value) in fields {
                    if !$crate::item::ItemFields::is_declared(&item, &key) {
                        return ::core::result::Result::Err(
                            $crate::error::ItemError::UnexpectedField {
                                item: ::core::stringify!($name),
                                key,
                            },
                        );
                    }
                    $crate::item::ItemFields::assign(&mut item, &key, value)?;
                }
                ::core::result::Result::Ok(item)
            }
        }

        impl $crate::field::FieldType for $name {
            fn kind() -> $crate::schema::FieldKind {
                $crate::schema::FieldKind::Nested($crate::schema::ItemRef::of::<Self>())
            }

            fn absent() -> Self {
                <Self as ::core::default::Default>::default()
            }

            fn is_absent(&self) -> bool {
                $crate::adapter::ItemView::new(self).is_empty()
            }

            fn hydrate(raw: $crate::__private::serde_json::Value) -> $crate::error::Result<Self> {
                <Self as $crate::field::FieldType>::hydrate_entry(raw)
                    .map(::core::option::Option::unwrap_or_default)
            }

            fn hydrate_entry(
                raw: $crate::__private::serde_json::Value,
            ) -> $crate::error::Result<::core::option::Option<Self>> {
                $crate::hydrate::hydrate_value(raw)
            }

            fn to_json(&self) -> $crate::__private::serde_json::Value {
                $crate::__private::serde_json::Value::Object(
                    $crate::adapter::ItemView::new(self).to_mapping(),
                )
            }
        }

        impl $crate::__private::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::core::result::Result<S::Ok, S::Error>
            where
                S: $crate::__private::serde::Serializer,
            {
                $crate::__private::serde::Serialize::serialize(
                    &$crate::adapter::ItemView::new(self),
                    serializer,
                )
            }
        }

        impl<'de> $crate::__private::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::core::result::Result<Self, D::Error>
            where
                D: $crate::__private::serde::Deserializer<'de>,
            {
                let raw = <$crate::__private::serde_json::Value as $crate::__private::serde::Deserialize>::deserialize(deserializer)?;
                <Self as $crate::field::FieldType>::hydrate(raw)
                    .map_err(<D::Error as $crate::__private::serde::de::Error>::custom)
            }
        }

        impl $crate::__private::schemars::JsonSchema for $name {
            fn schema_name() -> ::std::string::String {
                ::std::string::ToString::to_string(::core::stringify!($name))
            }

            fn json_schema(
                generator: &mut $crate::__private::schemars::gen::SchemaGenerator,
            ) -> $crate::__private::schemars::schema::Schema {
                #[allow(unused_mut)]
                let mut properties = $crate::__private::schemars::Map::new();
                $(
                    properties.insert(
                        ::std::string::ToString::to_string($key),
                        generator.subschema_for::<$ty>(),
                    );
                )*
                $crate::schema::item_json_schema(
                    ::core::stringify!($name),
                    properties,
                    &<Self as $crate::item::Item>::describe(),
                )
            }
        }
    };
}
