//! Generic object-or-string union codec.
//!
//! Several style fields accept either an inline object or a plain string
//! (typically a URL). The decision is made once, here, by JSON token kind;
//! call sites never inspect the token themselves and no coercion between
//! the two alternatives is ever performed.

use serde_json::Value;

use crate::error::SchemaError;

/// A field value that is either a typed object or a bare string.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectOrString<T> {
    Object(T),
    String(String),
}

impl<T> ObjectOrString<T> {
    /// Dispatches on the token kind of `v`: an object token is handed to
    /// `decode_object`, a string token becomes the string alternative, and
    /// every other kind fails naming the field and the actual token.
    pub fn decode<F>(field: &'static str, v: &Value, decode_object: F) -> Result<Self, SchemaError>
    where
        F: FnOnce(&Value) -> Result<T, SchemaError>,
    {
        match v {
            Value::String(s) => Ok(ObjectOrString::String(s.clone())),
            Value::Object(_) => Ok(ObjectOrString::Object(decode_object(v)?)),
            other => Err(SchemaError::unexpected(field, "object or string", other)),
        }
    }

    /// Mirror-image dispatch on the held alternative.
    pub fn encode<F>(&self, encode_object: F) -> Value
    where
        F: FnOnce(&T) -> Value,
    {
        match self {
            ObjectOrString::Object(obj) => encode_object(obj),
            ObjectOrString::String(s) => Value::String(s.clone()),
        }
    }
}

impl<T> From<&str> for ObjectOrString<T> {
    fn from(s: &str) -> Self {
        ObjectOrString::String(s.to_string())
    }
}

impl<T> From<String> for ObjectOrString<T> {
    fn from(s: String) -> Self {
        ObjectOrString::String(s)
    }
}

/// Identifier coercion: accepts a JSON string or number, always yielding a
/// string. The asymmetry is deliberate wire compatibility: numeric input
/// is tolerated on decode, numeric output is never produced on encode.
pub fn decode_string_or_number(field: &'static str, v: &Value) -> Result<String, SchemaError> {
    match v {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(SchemaError::unexpected(field, "string or number", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TokenKind;
    use serde_json::json;

    fn decode_marker(v: &Value) -> Result<u64, SchemaError> {
        v.get("n")
            .and_then(Value::as_u64)
            .ok_or(SchemaError::MissingField("n"))
    }

    #[test]
    fn string_token_yields_string_alternative() {
        let got = ObjectOrString::decode("data", &json!("https://example.com/x"), decode_marker);
        assert_eq!(got, Ok(ObjectOrString::String("https://example.com/x".to_string())));
    }

    #[test]
    fn object_token_runs_the_object_decoder() {
        let got = ObjectOrString::decode("data", &json!({"n": 7}), decode_marker);
        assert_eq!(got, Ok(ObjectOrString::Object(7)));
    }

    #[test]
    fn other_tokens_fail_naming_field_and_kind() {
        let err = ObjectOrString::decode("data", &json!(42), decode_marker).unwrap_err();
        assert_eq!(
            err,
            SchemaError::UnexpectedToken {
                field: "data",
                expected: "object or string",
                actual: TokenKind::Number,
            }
        );
        let msg = err.to_string();
        assert!(msg.contains("data"));
        assert!(msg.contains("number"));
    }

    #[test]
    fn encode_mirrors_the_held_alternative() {
        let s: ObjectOrString<u64> = "u".into();
        assert_eq!(s.encode(|_| unreachable!()), json!("u"));
        let o = ObjectOrString::Object(3u64);
        assert_eq!(o.encode(|n| json!({ "n": n })), json!({"n": 3}));
    }

    #[test]
    fn number_id_normalizes_to_string() {
        assert_eq!(decode_string_or_number("id", &json!(12345)), Ok("12345".to_string()));
        assert_eq!(decode_string_or_number("id", &json!("x")), Ok("x".to_string()));
        assert!(decode_string_or_number("id", &json!([1])).is_err());
    }
}
