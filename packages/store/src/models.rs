//! # Recipe records and identifiers
//!
//! The store treats a recipe as an opaque JSON object. The only field it ever
//! reads is `id`, which the remote API emits as an integer and locally authored
//! recipes carry as a string.
//!
//! ## Types
//!
//! | Type | Represents |
//! |------|-----------|
//! | [`RecipeId`] | A recipe identifier. Integers and strings are both accepted on input and compared by their string form, so `42` and `"42"` are the same recipe. Always serialised as a string. |
//! | [`Recipe`] | A full recipe payload. Immutable once stored except by full replacement under the same id. |

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Stable identifier of a recipe record.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RecipeId(String);

impl RecipeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Read an id out of a JSON value, accepting strings and integers.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) if !s.is_empty() => Some(Self(s.clone())),
            Value::Number(n) => Some(Self(n.to_string())),
            _ => None,
        }
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecipeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for RecipeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<u64> for RecipeId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

impl<'de> Deserialize<'de> for RecipeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IdVisitor;

        impl Visitor<'_> for IdVisitor {
            type Value = RecipeId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a recipe id as string or integer")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<RecipeId, E> {
                Ok(RecipeId(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<RecipeId, E> {
                Ok(RecipeId(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<RecipeId, E> {
                Ok(RecipeId(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<RecipeId, E> {
                Ok(RecipeId(v.to_string()))
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}

/// A recipe payload, opaque beyond its `id`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Recipe(Value);

impl Recipe {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// The record's id, if it carries a usable one.
    pub fn id(&self) -> Option<RecipeId> {
        self.0.get("id").and_then(RecipeId::from_value)
    }

    pub fn title(&self) -> Option<&str> {
        self.0.get("title").and_then(Value::as_str)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for Recipe {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
