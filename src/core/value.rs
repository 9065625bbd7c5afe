// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Self-describing JSON value model.
//!
//! Provides [`Json`], the tagged-union representation that decoded
//! documents normalize into. All variants convert to and from the host
//! container tree (`serde_json::Value`).
//!
//! # Design Principles
//!
//! - **Owned types**: Uses owned `String` and `Vec`/`HashMap` for clarity
//! - **Order-independent objects**: Object equality ignores key order
//! - **Explicit null**: Encoding emits `null` at every position; the
//!   lossy host conversion ([`Json::to_host`]) is the one operation that
//!   maps null to absence

use std::collections::HashMap;
use std::fmt;

use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::{DecodeError, Result};
use super::number::JsonNumber;

/// Type alias for a decoded JSON object as key -> value mapping.
pub type JsonObject = HashMap<String, Json>;

/// Tagged union over the six JSON value shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum Json {
    /// Explicit null
    Null,
    /// Boolean
    Bool(bool),
    /// Number (exact integer or double, see [`JsonNumber`])
    Number(JsonNumber),
    /// String (UTF-8)
    String(String),
    /// Ordered sequence of values
    Array(Vec<Json>),
    /// Mapping from unique string keys to values
    Object(JsonObject),
}

impl Json {
    // ========================================================================
    // Type Checking Predicates
    // ========================================================================

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Json::Null)
    }

    /// Check if this value is a boolean.
    pub fn is_bool(&self) -> bool {
        matches!(self, Json::Bool(_))
    }

    /// Check if this value is a number.
    pub fn is_number(&self) -> bool {
        matches!(self, Json::Number(_))
    }

    /// Check if this value is a string.
    pub fn is_string(&self) -> bool {
        matches!(self, Json::String(_))
    }

    /// Check if this value is a container type (array or object).
    pub fn is_container(&self) -> bool {
        matches!(self, Json::Array(_) | Json::Object(_))
    }

    /// Whether this value is one of the canonical empty forms.
    ///
    /// Null is empty; booleans and numbers never are; strings, arrays
    /// and objects are empty iff they have zero length.
    pub fn is_empty(&self) -> bool {
        match self {
            Json::Null => true,
            Json::Bool(_) | Json::Number(_) => false,
            Json::String(value) => value.is_empty(),
            Json::Array(value) => value.is_empty(),
            Json::Object(value) => value.is_empty(),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Try to get the inner boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Json::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Try to get the inner number.
    pub fn as_number(&self) -> Option<JsonNumber> {
        match self {
            Json::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Try to get the inner string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Json::String(value) => Some(value),
            _ => None,
        }
    }

    /// Try to get the inner array.
    pub fn as_array(&self) -> Option<&[Json]> {
        match self {
            Json::Array(value) => Some(value),
            _ => None,
        }
    }

    /// Try to get a mutable reference to the inner array.
    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Json>> {
        match self {
            Json::Array(value) => Some(value),
            _ => None,
        }
    }

    /// Try to get the inner object.
    pub fn as_object(&self) -> Option<&JsonObject> {
        match self {
            Json::Object(value) => Some(value),
            _ => None,
        }
    }

    /// Try to get a mutable reference to the inner object.
    pub fn as_object_mut(&mut self) -> Option<&mut JsonObject> {
        match self {
            Json::Object(value) => Some(value),
            _ => None,
        }
    }

    /// Get the type name of this value as a string.
    pub fn type_name(&self) -> &'static str {
        match self {
            Json::Null => "null",
            Json::Bool(_) => "bool",
            Json::Number(_) => "number",
            Json::String(_) => "string",
            Json::Array(_) => "array",
            Json::Object(_) => "object",
        }
    }

    // ========================================================================
    // Host Conversions
    // ========================================================================

    /// Build a [`Json`] from a host container tree.
    ///
    /// Numbers keep their exact representation: integers that fit `i64`
    /// become [`JsonNumber::Int`], real doubles become
    /// [`JsonNumber::Double`], and anything else (u64 overflow) fails
    /// with `IrrepresentableNumber`.
    pub fn from_host(value: &serde_json::Value) -> Result<Json> {
        match value {
            serde_json::Value::Null => Ok(Json::Null),
            serde_json::Value::Bool(b) => Ok(Json::Bool(*b)),
            serde_json::Value::Number(n) => number_from_host(n, "$").map(Json::Number),
            serde_json::Value::String(s) => Ok(Json::String(s.clone())),
            serde_json::Value::Array(items) => {
                let mut array = Vec::with_capacity(items.len());
                for item in items {
                    array.push(Json::from_host(item)?);
                }
                Ok(Json::Array(array))
            }
            serde_json::Value::Object(entries) => {
                let mut object = JsonObject::with_capacity(entries.len());
                for (key, entry) in entries {
                    object.insert(key.clone(), Json::from_host(entry)?);
                }
                Ok(Json::Object(object))
            }
        }
    }

    /// Convert to a host value, mapping null to absence.
    ///
    /// Array elements and object entries whose conversion is absent are
    /// dropped. This is the lossy host-facing view; use [`Json::to_tree`]
    /// for the faithful encoding.
    pub fn to_host(&self) -> Option<serde_json::Value> {
        match self {
            Json::Null => None,
            Json::Bool(value) => Some(serde_json::Value::Bool(*value)),
            Json::Number(value) => number_to_host(*value),
            Json::String(value) => Some(serde_json::Value::String(value.clone())),
            Json::Array(items) => Some(serde_json::Value::Array(
                items.iter().filter_map(Json::to_host).collect(),
            )),
            Json::Object(entries) => Some(serde_json::Value::Object(
                entries
                    .iter()
                    .filter_map(|(key, entry)| entry.to_host().map(|v| (key.clone(), v)))
                    .collect(),
            )),
        }
    }

    /// Convert to a host container tree for encoding.
    ///
    /// Null encodes as an explicit `null` at every position; keys are
    /// never dropped. Non-finite doubles fail with
    /// `IrrepresentableNumber`.
    pub fn to_tree(&self) -> Result<serde_json::Value> {
        match self {
            Json::Null => Ok(serde_json::Value::Null),
            Json::Bool(value) => Ok(serde_json::Value::Bool(*value)),
            Json::Number(value) => number_to_host(*value).ok_or_else(|| {
                DecodeError::irrepresentable(value.to_string(), "$")
            }),
            Json::String(value) => Ok(serde_json::Value::String(value.clone())),
            Json::Array(items) => {
                let mut array = Vec::with_capacity(items.len());
                for item in items {
                    array.push(item.to_tree()?);
                }
                Ok(serde_json::Value::Array(array))
            }
            Json::Object(entries) => {
                let mut object = serde_json::Map::with_capacity(entries.len());
                for (key, entry) in entries {
                    object.insert(key.clone(), entry.to_tree()?);
                }
                Ok(serde_json::Value::Object(object))
            }
        }
    }

    /// Render this value as a JSON document string.
    pub fn to_json_string(&self, pretty: bool) -> Result<String> {
        let tree = self.to_tree()?;
        if pretty {
            serde_json::to_string_pretty(&tree).map_err(DecodeError::from)
        } else {
            serde_json::to_string(&tree).map_err(DecodeError::from)
        }
    }
}

/// Convert a host number, preserving the exact representation.
pub(crate) fn number_from_host(n: &serde_json::Number, path: &str) -> Result<JsonNumber> {
    if let Some(i) = n.as_i64() {
        Ok(JsonNumber::Int(i))
    } else if n.is_f64() {
        // as_f64 cannot fail for a number serde_json classifies as f64.
        Ok(JsonNumber::Double(n.as_f64().unwrap_or(0.0)))
    } else {
        Err(DecodeError::irrepresentable(n.to_string(), path))
    }
}

fn number_to_host(value: JsonNumber) -> Option<serde_json::Value> {
    match value {
        JsonNumber::Int(i) => Some(serde_json::Value::Number(serde_json::Number::from(i))),
        JsonNumber::Double(d) => serde_json::Number::from_f64(d).map(serde_json::Value::Number),
    }
}

impl fmt::Display for Json {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_json_string(false) {
            Ok(rendered) => f.write_str(&rendered),
            Err(_) => f.write_str("<<error describing JSON>>"),
        }
    }
}

impl Default for Json {
    fn default() -> Self {
        Json::Null
    }
}

impl From<JsonNumber> for Json {
    fn from(value: JsonNumber) -> Self {
        Json::Number(value)
    }
}

impl From<bool> for Json {
    fn from(value: bool) -> Self {
        Json::Bool(value)
    }
}

impl From<&str> for Json {
    fn from(value: &str) -> Self {
        Json::String(value.to_string())
    }
}

impl From<String> for Json {
    fn from(value: String) -> Self {
        Json::String(value)
    }
}

// ============================================================================
// Serde Integration
// ============================================================================

impl Serialize for Json {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Json::Null => serializer.serialize_unit(),
            Json::Bool(value) => serializer.serialize_bool(*value),
            Json::Number(value) => value.serialize(serializer),
            Json::String(value) => serializer.serialize_str(value),
            Json::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Json::Object(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, entry) in entries {
                    map.serialize_entry(key, entry)?;
                }
                map.end()
            }
        }
    }
}

struct JsonVisitor;

impl<'de> Visitor<'de> for JsonVisitor {
    type Value = Json;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Json, E> {
        Ok(Json::Null)
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<Json, E> {
        Ok(Json::Null)
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> std::result::Result<Json, E> {
        Ok(Json::Bool(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> std::result::Result<Json, E> {
        Ok(Json::Number(JsonNumber::Int(value)))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> std::result::Result<Json, E> {
        JsonNumber::try_from(value)
            .map(Json::Number)
            .map_err(|value| E::custom(format!("integer {value} overflows i64")))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> std::result::Result<Json, E> {
        Ok(Json::Number(JsonNumber::Double(value)))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> std::result::Result<Json, E> {
        Ok(Json::String(value.to_string()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> std::result::Result<Json, E> {
        Ok(Json::String(value))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Json, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Json::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Json, A::Error> {
        let mut entries = JsonObject::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, entry)) = map.next_entry::<String, Json>()? {
            entries.insert(key, entry);
        }
        Ok(Json::Object(entries))
    }
}

impl<'de> Deserialize<'de> for Json {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(JsonVisitor)
    }
}
