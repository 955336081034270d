//! Typed storage for declared fields.
//!
//! [`FieldType`] is how a declared field's JSON value becomes its Rust value
//! and back. Scalars never coerce: a string in a float field is a mismatch.

use serde_json::Value;

use crate::collection;
use crate::error::{ItemError, Result};
use crate::schema::{FieldKind, ScalarKind};

pub trait FieldType: Sized {
    fn kind() -> FieldKind;

    /// Value a field takes when its key is missing from the payload.
    fn absent() -> Self;

    /// Whether the value is indistinguishable from [`FieldType::absent`].
    fn is_absent(&self) -> bool;

    /// Read a JSON value as this type. Mismatch paths are relative to the field.
    fn hydrate(raw: Value) -> Result<Self>;

    /// Read a non-null JSON value that may still stand for "nothing".
    /// Items use this to turn `{}` into `None`; everything else is always `Some`.
    fn hydrate_entry(raw: Value) -> Result<Option<Self>> {
        Self::hydrate(raw).map(Some)
    }

    fn to_json(&self) -> Value;
}

impl FieldType for String {
    fn kind() -> FieldKind {
        FieldKind::Scalar(ScalarKind::Text)
    }

    fn absent() -> Self {
        String::new()
    }

    fn is_absent(&self) -> bool {
        self.is_empty()
    }

    fn hydrate(raw: Value) -> Result<Self> {
        match raw {
            Value::String(text) => Ok(text),
            other => Err(ItemError::mismatch("", "string", &other)),
        }
    }

    fn to_json(&self) -> Value {
        Value::String(self.clone())
    }
}

impl FieldType for f64 {
    fn kind() -> FieldKind {
        FieldKind::Scalar(ScalarKind::Float)
    }

    fn absent() -> Self {
        0.0
    }

    fn is_absent(&self) -> bool {
        *self == 0.0
    }

    fn hydrate(raw: Value) -> Result<Self> {
        match raw.as_f64() {
            Some(number) => Ok(number),
            None => Err(ItemError::mismatch("", "number", &raw)),
        }
    }

    fn to_json(&self) -> Value {
        // Non-finite floats have no JSON form and come out as null.
        Value::from(*self)
    }
}

impl FieldType for i64 {
    fn kind() -> FieldKind {
        FieldKind::Scalar(ScalarKind::Integer)
    }

    fn absent() -> Self {
        0
    }

    fn is_absent(&self) -> bool {
        *self == 0
    }

    fn hydrate(raw: Value) -> Result<Self> {
        match raw.as_i64() {
            Some(number) => Ok(number),
            None => Err(ItemError::mismatch("", "integer", &raw)),
        }
    }

    fn to_json(&self) -> Value {
        Value::from(*self)
    }
}

impl FieldType for bool {
    fn kind() -> FieldKind {
        FieldKind::Scalar(ScalarKind::Boolean)
    }

    fn absent() -> Self {
        false
    }

    fn is_absent(&self) -> bool {
        !*self
    }

    fn hydrate(raw: Value) -> Result<Self> {
        match raw {
            Value::Bool(flag) => Ok(flag),
            other => Err(ItemError::mismatch("", "boolean", &other)),
        }
    }

    fn to_json(&self) -> Value {
        Value::Bool(*self)
    }
}

impl<T: FieldType> FieldType for Option<T> {
    fn kind() -> FieldKind {
        T::kind().optional()
    }

    fn absent() -> Self {
        None
    }

    fn is_absent(&self) -> bool {
        self.is_none()
    }

    fn hydrate(raw: Value) -> Result<Self> {
        match raw {
            Value::Null => Ok(None),
            raw => T::hydrate_entry(raw),
        }
    }

    fn to_json(&self) -> Value {
        self.as_ref().map_or(Value::Null, T::to_json)
    }
}

impl<T: FieldType> FieldType for Vec<T> {
    fn kind() -> FieldKind {
        FieldKind::Sequence {
            element: Box::new(T::kind()),
            optional: false,
        }
    }

    fn absent() -> Self {
        Vec::new()
    }

    fn is_absent(&self) -> bool {
        self.is_empty()
    }

    fn hydrate(raw: Value) -> Result<Self> {
        match raw {
            Value::Null => Ok(Vec::new()),
            Value::Array(entries) => collection::hydrate_entries(entries),
            other => Err(ItemError::mismatch("", "array", &other)),
        }
    }

    fn to_json(&self) -> Value {
        Value::Array(self.iter().map(T::to_json).collect())
    }
}

/// Whether `raw` is an integer literal headed for a float field.
pub fn is_integer_in_float(kind: &FieldKind, raw: &Value) -> bool {
    matches!(
        kind,
        FieldKind::Scalar(ScalarKind::Float) | FieldKind::OptionalScalar(ScalarKind::Float)
    ) && (raw.is_i64() || raw.is_u64())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalars_round_trip() {
        assert_eq!(String::hydrate(json!("10")).unwrap(), "10");
        assert_eq!(f64::hydrate(json!(4.5)).unwrap(), 4.5);
        assert_eq!(i64::hydrate(json!(2)).unwrap(), 2);
        assert!(bool::hydrate(json!(true)).unwrap());
        assert_eq!("x".to_string().to_json(), json!("x"));
        assert_eq!(4.5f64.to_json(), json!(4.5));
    }

    #[test]
    fn scalars_do_not_coerce() {
        assert!(matches!(
            String::hydrate(json!(10)),
            Err(ItemError::TypeMismatch { expected: "string", found: "number", .. })
        ));
        assert!(matches!(
            f64::hydrate(json!("4.0")),
            Err(ItemError::TypeMismatch { expected: "number", found: "string", .. })
        ));
        assert!(matches!(
            i64::hydrate(json!(2.5)),
            Err(ItemError::TypeMismatch { expected: "integer", .. })
        ));
        assert!(String::hydrate(Value::Null).is_err());
    }

    #[test]
    fn integer_literals_fill_float_fields() {
        assert_eq!(f64::hydrate(json!(5)).unwrap(), 5.0);
    }

    #[test]
    fn integer_literals_are_recognized_only_for_float_fields() {
        let float = Option::<f64>::kind();
        assert!(is_integer_in_float(&float, &json!(5)));
        assert!(!is_integer_in_float(&float, &json!(5.0)));
        assert!(!is_integer_in_float(&float, &Value::Null));
        assert!(!is_integer_in_float(&i64::kind(), &json!(5)));
    }

    #[test]
    fn option_maps_null_to_none() {
        assert_eq!(Option::<String>::hydrate(Value::Null).unwrap(), None);
        assert_eq!(
            Option::<String>::hydrate(json!("a")).unwrap(),
            Some("a".to_string())
        );
        assert_eq!(Option::<String>::None.to_json(), Value::Null);
    }

    #[test]
    fn sequences_drop_null_entries() {
        let images = Vec::<String>::hydrate(json!(["a", null, "b"])).unwrap();
        assert_eq!(images, vec!["a", "b"]);
        assert_eq!(Vec::<String>::hydrate(Value::Null).unwrap(), Vec::<String>::new());
    }

    #[test]
    fn sequence_mismatch_reports_index() {
        let err = Vec::<String>::hydrate(json!(["a", 3])).unwrap_err();
        assert!(matches!(err, ItemError::TypeMismatch { path, .. } if path == "[1]"));
    }

    #[test]
    fn kinds_compose() {
        assert_eq!(
            Option::<Vec<String>>::kind(),
            FieldKind::Sequence {
                element: Box::new(FieldKind::Scalar(ScalarKind::Text)),
                optional: true,
            }
        );
        assert_eq!(
            Option::<f64>::kind(),
            FieldKind::OptionalScalar(ScalarKind::Float)
        );
    }
}
