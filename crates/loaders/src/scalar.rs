//! YAML scalars used as identifiers

use serde::Deserialize;

/// An identifier written as any YAML scalar
///
/// Annotators are often numbered (`user: 2`) and documents sometimes carry
/// numeric ids, so every scalar kind is accepted and rendered as text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub(crate) enum Scalar {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    pub(crate) fn into_string(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Integer(n) => n.to_string(),
            Self::Float(n) => n.to_string(),
            Self::Bool(b) => b.to_string(),
        }
    }
}

/// Converts an optional scalar into an identifier
pub(crate) fn identifier(value: Option<Scalar>) -> Option<String> {
    value.map(Scalar::into_string)
}
