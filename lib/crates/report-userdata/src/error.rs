//! Report (de)serialization errors.

use thiserror::Error;

/// Errors raised while converting a [`crate::Report`] to or from JSON.
#[derive(Debug, Error)]
pub enum ReportError {
    /// `userdata` was present but was not a JSON object.
    #[error("malformed userdata: expected an object, found {found}")]
    MalformedUserdata { found: &'static str },

    /// The serialized report itself was not a JSON object.
    #[error("malformed report: expected an object, found {found}")]
    NotAnObject { found: &'static str },

    /// An extra host field tried to reuse a key backed by a typed field.
    #[error("'{key}' is a reserved report field and cannot be set as an extra field")]
    ReservedField { key: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Human-readable name of a JSON value's type, for error messages.
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn malformed_userdata_message_names_found_type() {
        let err = ReportError::MalformedUserdata { found: "string" };
        assert_eq!(
            err.to_string(),
            "malformed userdata: expected an object, found string"
        );
    }

    #[test]
    fn json_type_names() {
        assert_eq!(json_type_name(&json!(null)), "null");
        assert_eq!(json_type_name(&json!(true)), "boolean");
        assert_eq!(json_type_name(&json!(1.5)), "number");
        assert_eq!(json_type_name(&json!("x")), "string");
        assert_eq!(json_type_name(&json!([])), "array");
        assert_eq!(json_type_name(&json!({})), "object");
    }
}
