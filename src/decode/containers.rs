// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Container adapters over a decoding position.
//!
//! A position views itself as one of three container shapes:
//! - [`KeyedContainer`] over an object
//! - [`UnkeyedContainer`] over an array, with a cursor
//! - [`SingleValueContainer`] over any value
//!
//! Primitive decodes live directly on the containers; everything else
//! goes through the generic `decode`, which derives a child position and
//! re-enters the interception hook ([`Decoder::decode`]). The
//! `decode_optional` methods carry the recovery pipeline.

use crate::core::{DecodeError, Result};

use super::context::{DecodeContext, Decoder, JsonPath};
use super::recovery;
use super::traits::FromJson;

// ============================================================================
// Single Value Container
// ============================================================================

/// Adapter over a single value at a position.
pub struct SingleValueContainer<'a> {
    value: &'a serde_json::Value,
    path: JsonPath,
    ctx: &'a DecodeContext,
}

impl<'a> SingleValueContainer<'a> {
    pub(crate) fn open(decoder: &Decoder<'a>) -> Self {
        Self {
            value: decoder.value(),
            path: decoder.path().clone(),
            ctx: decoder.context(),
        }
    }

    /// Whether the value is null.
    pub fn decode_null(&self) -> bool {
        self.value.is_null()
    }

    /// Decode a boolean.
    pub fn decode_bool(&self) -> Result<bool> {
        match self.value {
            serde_json::Value::Bool(value) => Ok(*value),
            serde_json::Value::Null => Err(self.value_not_found("bool")),
            other => Err(self.type_mismatch("bool", other)),
        }
    }

    /// Decode an exact integer.
    pub fn decode_i64(&self) -> Result<i64> {
        match self.value {
            serde_json::Value::Number(n) => n.as_i64().ok_or_else(|| {
                DecodeError::irrepresentable(n.to_string(), self.path.to_string())
            }),
            serde_json::Value::Null => Err(self.value_not_found("integer")),
            other => Err(self.type_mismatch("integer", other)),
        }
    }

    /// Decode an unsigned integer.
    pub fn decode_u64(&self) -> Result<u64> {
        match self.value {
            serde_json::Value::Number(n) => n.as_u64().ok_or_else(|| {
                DecodeError::irrepresentable(n.to_string(), self.path.to_string())
            }),
            serde_json::Value::Null => Err(self.value_not_found("unsigned integer")),
            other => Err(self.type_mismatch("unsigned integer", other)),
        }
    }

    /// Decode a double.
    pub fn decode_f64(&self) -> Result<f64> {
        match self.value {
            serde_json::Value::Number(n) => n.as_f64().ok_or_else(|| {
                DecodeError::irrepresentable(n.to_string(), self.path.to_string())
            }),
            serde_json::Value::Null => Err(self.value_not_found("number")),
            other => Err(self.type_mismatch("number", other)),
        }
    }

    /// Decode a string.
    pub fn decode_string(&self) -> Result<String> {
        match self.value {
            serde_json::Value::String(value) => Ok(value.clone()),
            serde_json::Value::Null => Err(self.value_not_found("string")),
            other => Err(self.type_mismatch("string", other)),
        }
    }

    /// Decode any value through the interception hook.
    pub fn decode<T: FromJson>(&self) -> Result<T> {
        Decoder::at(self.value, self.path.clone(), self.ctx).decode()
    }

    /// Decode an optional value, applying recovery on failure.
    pub fn decode_optional<T: FromJson>(&self) -> Result<Option<T>> {
        let decoder = Decoder::at(self.value, self.path.clone(), self.ctx);
        recovery::decode_optional_with_recovery(&decoder)
    }

    fn value_not_found(&self, expected: &'static str) -> DecodeError {
        DecodeError::value_not_found(expected, self.path.to_string())
    }

    fn type_mismatch(&self, expected: &'static str, found: &serde_json::Value) -> DecodeError {
        DecodeError::type_mismatch(
            expected,
            super::context::host_type_name(found),
            self.path.to_string(),
        )
    }
}

// ============================================================================
// Keyed Container
// ============================================================================

/// Adapter over an object at a position.
pub struct KeyedContainer<'a> {
    entries: &'a serde_json::Map<String, serde_json::Value>,
    path: JsonPath,
    ctx: &'a DecodeContext,
}

impl<'a> KeyedContainer<'a> {
    pub(crate) fn open(decoder: &Decoder<'a>) -> Result<Self> {
        match decoder.value() {
            serde_json::Value::Object(entries) => Ok(Self {
                entries,
                path: decoder.path().clone(),
                ctx: decoder.context(),
            }),
            other => Err(DecodeError::no_container(
                "keyed",
                super::context::host_type_name(other),
                decoder.path().to_string(),
            )),
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the object has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All keys present in the object.
    pub fn keys(&self) -> impl Iterator<Item = &'a str> {
        self.entries.keys().map(String::as_str)
    }

    /// Whether a key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Whether the value at a key is null. Fails if the key is absent.
    pub fn decode_null(&self, key: &str) -> Result<bool> {
        self.entry(key).map(serde_json::Value::is_null)
    }

    /// Child position for a key. Fails with `KeyNotFound` if absent.
    pub fn at(&self, key: &str) -> Result<Decoder<'a>> {
        self.entry(key)
            .map(|value| Decoder::at(value, self.path.child_key(key), self.ctx))
    }

    /// Decode the value at a key.
    pub fn decode<T: FromJson>(&self, key: &str) -> Result<T> {
        self.at(key)?.decode()
    }

    /// Decode an optional value at a key.
    ///
    /// An absent key and an explicit null both decode to `None`; other
    /// failures are offered to the recovery policies first.
    pub fn decode_optional<T: FromJson>(&self, key: &str) -> Result<Option<T>> {
        match self.entries.get(key) {
            None => Ok(None),
            Some(value) => {
                let decoder = Decoder::at(value, self.path.child_key(key), self.ctx);
                recovery::decode_optional_with_recovery(&decoder)
            }
        }
    }

    /// Nested keyed container at a key.
    pub fn nested_keyed(&self, key: &str) -> Result<KeyedContainer<'a>> {
        self.at(key)?.keyed()
    }

    /// Nested unkeyed container at a key.
    pub fn nested_unkeyed(&self, key: &str) -> Result<UnkeyedContainer<'a>> {
        self.at(key)?.unkeyed()
    }

    fn entry(&self, key: &str) -> Result<&'a serde_json::Value> {
        self.entries
            .get(key)
            .ok_or_else(|| DecodeError::key_not_found(key, self.path.to_string()))
    }
}

// ============================================================================
// Unkeyed Container
// ============================================================================

/// Adapter over an array at a position, with a forward-only cursor.
pub struct UnkeyedContainer<'a> {
    items: &'a [serde_json::Value],
    path: JsonPath,
    ctx: &'a DecodeContext,
    index: usize,
}

impl<'a> UnkeyedContainer<'a> {
    pub(crate) fn open(decoder: &Decoder<'a>) -> Result<Self> {
        match decoder.value() {
            serde_json::Value::Array(items) => Ok(Self {
                items,
                path: decoder.path().clone(),
                ctx: decoder.context(),
                index: 0,
            }),
            other => Err(DecodeError::no_container(
                "unkeyed",
                super::context::host_type_name(other),
                decoder.path().to_string(),
            )),
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the array has no elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Current cursor index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Whether the cursor has consumed every element.
    pub fn is_at_end(&self) -> bool {
        self.index >= self.items.len()
    }

    /// If the current element is null, consume it and return true;
    /// otherwise leave the cursor in place and return false.
    pub fn decode_null(&mut self) -> Result<bool> {
        let value = self.current_value()?;
        if value.is_null() {
            self.index += 1;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Decode the current element and advance the cursor.
    pub fn decode<T: FromJson>(&mut self) -> Result<T> {
        let decoder = self.current()?;
        let value = decoder.decode()?;
        self.index += 1;
        Ok(value)
    }

    /// Decode an optional current element and advance the cursor.
    ///
    /// An exhausted container and an explicit null both decode to
    /// `None`; other failures are offered to the recovery policies.
    pub fn decode_optional<T: FromJson>(&mut self) -> Result<Option<T>> {
        if self.is_at_end() {
            return Ok(None);
        }
        let decoder = self.current()?;
        let value = recovery::decode_optional_with_recovery(&decoder)?;
        self.index += 1;
        Ok(value)
    }

    /// Nested keyed container at the current element; advances on success.
    pub fn nested_keyed(&mut self) -> Result<KeyedContainer<'a>> {
        let container = self.current()?.keyed()?;
        self.index += 1;
        Ok(container)
    }

    /// Nested unkeyed container at the current element; advances on success.
    pub fn nested_unkeyed(&mut self) -> Result<UnkeyedContainer<'a>> {
        let container = self.current()?.unkeyed()?;
        self.index += 1;
        Ok(container)
    }

    /// Child position for the current element, without advancing.
    pub fn current(&self) -> Result<Decoder<'a>> {
        self.current_value()
            .map(|value| Decoder::at(value, self.path.child_index(self.index), self.ctx))
    }

    fn current_value(&self) -> Result<&'a serde_json::Value> {
        self.items.get(self.index).ok_or_else(|| {
            DecodeError::value_not_found("element", self.path.child_index(self.index).to_string())
        })
    }
}
