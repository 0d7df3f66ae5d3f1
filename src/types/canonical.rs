//! Canonical Type Tags
//!
//! The closed set of type tags every reconciled parameter resolves to,
//! independent of how any docstring dialect or signature spelled the type.
//! `Object` carries the qualified name of a referenced type; everything
//! that cannot be resolved collapses to `String` at normalization time.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Normalized type tag used by every emitted parameter record.
///
/// Serialized as its display form: `"Boolean"`, `"Integer"`, `"Float"`,
/// `"String"`, `"Json"`, `"Select"`, or `"Object.<name>"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CanonicalType {
    Boolean,
    Integer,
    Float,
    String,
    Json,
    /// Cross-reference to a named type, e.g. a class in the signature tree.
    Object(std::string::String),
    /// Constrained choice between a fixed option set.
    Select,
}

impl CanonicalType {
    /// The spellings that already name a canonical tag. Used by the merger
    /// to decide whether a declared type token needs `Object.` wrapping.
    pub fn is_canonical_name(token: &str) -> bool {
        matches!(
            token,
            "Boolean" | "Integer" | "Float" | "String" | "Json" | "Select"
        ) || token.starts_with("Object.")
    }

    /// Resolve a bare token into a tag. Canonical spellings map to
    /// themselves, `Object.<name>` keeps its reference, everything else
    /// (including the empty token) collapses to `String`.
    pub fn from_token(token: &str) -> Self {
        match token {
            "Boolean" => Self::Boolean,
            "Integer" => Self::Integer,
            "Float" => Self::Float,
            "String" | "" => Self::String,
            "Json" => Self::Json,
            "Select" => Self::Select,
            other => match other.strip_prefix("Object.") {
                Some(name) if !name.is_empty() => Self::Object(name.to_string()),
                _ => Self::String,
            },
        }
    }

    /// Reference to a named type in the signature tree.
    pub fn object(name: impl Into<std::string::String>) -> Self {
        Self::Object(name.into())
    }
}

impl fmt::Display for CanonicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean => write!(f, "Boolean"),
            Self::Integer => write!(f, "Integer"),
            Self::Float => write!(f, "Float"),
            Self::String => write!(f, "String"),
            Self::Json => write!(f, "Json"),
            Self::Object(name) => write!(f, "Object.{}", name),
            Self::Select => write!(f, "Select"),
        }
    }
}

impl Serialize for CanonicalType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CanonicalType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = std::string::String::deserialize(deserializer)?;
        Ok(Self::from_token(&s))
    }
}
