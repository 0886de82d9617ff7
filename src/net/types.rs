//! Wire types for the catalog backend.
//!
//! The backend owns products; the console only ever holds the copy from the
//! most recent fetch. Ids arrive as JSON numbers from some backends and as
//! strings from others, so they are normalized to an opaque string.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

// =============================================================================
// PRODUCT
// =============================================================================

/// Opaque product identifier as issued by the backend.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ProductId(String);

impl ProductId {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Loose comparison against user input: surrounding whitespace is ignored,
    /// and numeric ids match regardless of formatting (`7` == `07`).
    #[must_use]
    pub fn matches(&self, raw: &str) -> bool {
        let raw = raw.trim();
        if self.0 == raw {
            return true;
        }
        match (self.0.parse::<f64>(), raw.parse::<f64>()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for ProductId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(Self(s)),
            Value::Number(n) => Ok(Self(n.to_string())),
            other => Err(serde::de::Error::custom(format!("invalid product id: {other}"))),
        }
    }
}

/// A catalog entry as returned by `GET {public}/products`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
}

/// Product fields minus the id; the body of create and update calls.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub price: f64,
    pub image: String,
    pub description: String,
}

// =============================================================================
// ENVELOPES
// =============================================================================

/// Read the `error` field from a JSON envelope, if present.
#[must_use]
pub fn error_field(data: Option<&Value>) -> Option<String> {
    string_field(data, "error")
}

/// Read the `message` field from a JSON envelope, if present.
#[must_use]
pub fn message_field(data: Option<&Value>) -> Option<String> {
    string_field(data, "message")
}

fn string_field(data: Option<&Value>, key: &str) -> Option<String> {
    data?
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
}
