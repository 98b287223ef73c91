use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Classification of a JSON token, used to report shape mismatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl TokenKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => TokenKind::Null,
            Value::Bool(_) => TokenKind::Bool,
            Value::Number(_) => TokenKind::Number,
            Value::String(_) => TokenKind::String,
            Value::Array(_) => TokenKind::Array,
            Value::Object(_) => TokenKind::Object,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Null => "null",
            TokenKind::Bool => "boolean",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::Array => "array",
            TokenKind::Object => "object",
        };
        f.write_str(name)
    }
}

/// A JSON payload does not match the wire schema. Decode rejects the input
/// wholesale; there is no partial parse and no recovery path.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("unknown {0} type: {1}")]
    UnknownDiscriminator(&'static str, String),

    #[error("field `{field}` expected {expected}, got {actual}")]
    UnexpectedToken {
        field: &'static str,
        expected: &'static str,
        actual: TokenKind,
    },

    #[error("`coordinates` do not match {0} nesting")]
    CoordinateShape(&'static str),
}

impl SchemaError {
    /// Shorthand for the token-kind mismatch variant.
    pub fn unexpected(field: &'static str, expected: &'static str, actual: &Value) -> Self {
        SchemaError::UnexpectedToken {
            field,
            expected,
            actual: TokenKind::of(actual),
        }
    }
}
