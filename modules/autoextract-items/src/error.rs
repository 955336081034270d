use serde_json::Value;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ItemError>;

#[derive(Debug, Error)]
pub enum ItemError {
    /// A declared field held a JSON value of the wrong shape.
    #[error("Type mismatch at {}: expected {expected}, found {found}", display_path(.path))]
    TypeMismatch {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Invalid item schema: {0}")]
    InvalidSchema(String),

    #[error("{item} has no field `{key}`")]
    KeyNotFound { item: &'static str, key: String },

    /// Strict construction was handed a key the item does not declare.
    #[error("{item} does not declare a field named `{key}`")]
    UnexpectedField { item: &'static str, key: String },

    #[error("Parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ItemError {
    pub(crate) fn mismatch(path: impl Into<String>, expected: &'static str, found: &Value) -> Self {
        ItemError::TypeMismatch {
            path: path.into(),
            expected,
            found: json_type(found),
        }
    }

    pub(crate) fn key_not_found(item: &'static str, key: &str) -> Self {
        ItemError::KeyNotFound {
            item,
            key: key.to_string(),
        }
    }

    /// Prefix a mismatch path with the enclosing field (`offers` + `[0].price`).
    /// Other variants pass through untouched.
    pub fn within(self, parent: &str) -> Self {
        match self {
            ItemError::TypeMismatch {
                path,
                expected,
                found,
            } => ItemError::TypeMismatch {
                path: join_path(parent, &path),
                expected,
                found,
            },
            other => other,
        }
    }
}

fn join_path(parent: &str, child: &str) -> String {
    if parent.is_empty() {
        child.to_string()
    } else if child.is_empty() {
        parent.to_string()
    } else if child.starts_with('[') {
        format!("{parent}{child}")
    } else {
        format!("{parent}.{child}")
    }
}

fn display_path(path: &str) -> &str {
    if path.is_empty() {
        "<root>"
    } else {
        path
    }
}

pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn within_builds_dotted_and_indexed_paths() {
        let err = ItemError::mismatch("", "string", &Value::Bool(true))
            .within("price")
            .within("[1]")
            .within("offers");
        match err {
            ItemError::TypeMismatch { path, found, .. } => {
                assert_eq!(path, "offers[1].price");
                assert_eq!(found, "boolean");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn root_mismatch_displays_placeholder() {
        let err = ItemError::mismatch("", "object", &Value::from(3));
        assert_eq!(
            err.to_string(),
            "Type mismatch at <root>: expected object, found number"
        );
    }

    #[test]
    fn within_leaves_other_errors_alone() {
        let err = ItemError::key_not_found("Offer", "foo").within("offers");
        assert!(matches!(err, ItemError::KeyNotFound { key, .. } if key == "foo"));
    }
}
