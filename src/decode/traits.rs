// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! The [`FromJson`] trait and its implementations for primitives,
//! collections, and the generic [`Json`] tree.
//!
//! Every decode, including recursive ones inside composite
//! implementations, passes through [`Decoder::decode`], so a type has a
//! single place to observe and reshape the values handed to it.

use std::collections::HashMap;

use crate::core::value::number_from_host;
use crate::core::{DecodeError, ErrorAccumulator, Json, JsonNumber, JsonObject, Result};

use super::context::Decoder;

/// A type decodable from a JSON position.
pub trait FromJson: Sized {
    /// Decode a value at the given position.
    fn from_json(decoder: &Decoder<'_>) -> Result<Self>;

    /// Keys whose absence makes this value meaningless rather than
    /// invalid. When such a key is missing, an optional decode of this
    /// type collapses to `None` instead of failing its parent.
    fn mandatory_keys() -> &'static [&'static str] {
        &[]
    }
}

// ============================================================================
// Primitives
// ============================================================================

impl FromJson for bool {
    fn from_json(decoder: &Decoder<'_>) -> Result<Self> {
        decoder.single().decode_bool()
    }
}

macro_rules! from_json_signed {
    ($($ty:ty),+) => {
        $(
            impl FromJson for $ty {
                fn from_json(decoder: &Decoder<'_>) -> Result<Self> {
                    let wide = decoder.single().decode_i64()?;
                    <$ty>::try_from(wide).map_err(|_| {
                        DecodeError::irrepresentable(
                            wide.to_string(),
                            decoder.path().to_string(),
                        )
                    })
                }
            }
        )+
    };
}

macro_rules! from_json_unsigned {
    ($($ty:ty),+) => {
        $(
            impl FromJson for $ty {
                fn from_json(decoder: &Decoder<'_>) -> Result<Self> {
                    let wide = decoder.single().decode_u64()?;
                    <$ty>::try_from(wide).map_err(|_| {
                        DecodeError::irrepresentable(
                            wide.to_string(),
                            decoder.path().to_string(),
                        )
                    })
                }
            }
        )+
    };
}

from_json_signed!(i8, i16, i32, i64);
from_json_unsigned!(u8, u16, u32, u64);

impl FromJson for f64 {
    fn from_json(decoder: &Decoder<'_>) -> Result<Self> {
        decoder.single().decode_f64()
    }
}

impl FromJson for f32 {
    fn from_json(decoder: &Decoder<'_>) -> Result<Self> {
        decoder.single().decode_f64().map(|wide| wide as f32)
    }
}

impl FromJson for String {
    fn from_json(decoder: &Decoder<'_>) -> Result<Self> {
        decoder.single().decode_string()
    }
}

impl FromJson for JsonNumber {
    fn from_json(decoder: &Decoder<'_>) -> Result<Self> {
        match decoder.value() {
            serde_json::Value::Number(n) => number_from_host(n, &decoder.path().to_string()),
            serde_json::Value::Null => Err(DecodeError::value_not_found(
                "number",
                decoder.path().to_string(),
            )),
            _ => Err(DecodeError::type_mismatch(
                "number",
                decoder.found(),
                decoder.path().to_string(),
            )),
        }
    }
}

// ============================================================================
// Composites
// ============================================================================

impl<T: FromJson> FromJson for Option<T> {
    fn from_json(decoder: &Decoder<'_>) -> Result<Self> {
        decoder.decode_optional()
    }
}

impl<T: FromJson> FromJson for Vec<T> {
    fn from_json(decoder: &Decoder<'_>) -> Result<Self> {
        let mut unkeyed = decoder.unkeyed()?;
        let mut items = Vec::with_capacity(unkeyed.len());
        while !unkeyed.is_at_end() {
            items.push(unkeyed.decode()?);
        }
        Ok(items)
    }
}

impl<V, S> FromJson for HashMap<String, V, S>
where
    V: FromJson,
    S: std::hash::BuildHasher + Default,
{
    fn from_json(decoder: &Decoder<'_>) -> Result<Self> {
        let keyed = decoder.keyed()?;
        let mut entries = HashMap::with_capacity_and_hasher(keyed.len(), S::default());
        for key in keyed.keys() {
            entries.insert(key.to_owned(), keyed.decode(key)?);
        }
        Ok(entries)
    }
}

impl<T: FromJson> FromJson for Box<T> {
    fn from_json(decoder: &Decoder<'_>) -> Result<Self> {
        decoder.decode().map(Box::new)
    }

    fn mandatory_keys() -> &'static [&'static str] {
        T::mandatory_keys()
    }
}

// ============================================================================
// Generic tree
// ============================================================================

/// Ordered disambiguation: a raw value is tried as null, then boolean,
/// number, string, array, and finally object. Every failed attempt is
/// accumulated, so an overall failure carries one trace entry per shape
/// tried.
impl FromJson for Json {
    fn from_json(decoder: &Decoder<'_>) -> Result<Self> {
        if decoder.is_null() {
            return Ok(Json::Null);
        }

        let mut attempts = ErrorAccumulator::new();
        let location = decoder.path().to_string();

        if let Some(b) = attempts.silence(&location, || decoder.decode::<bool>()) {
            return Ok(Json::Bool(b));
        }
        if let Some(n) = attempts.silence(&location, || decoder.decode::<JsonNumber>()) {
            return Ok(Json::Number(n));
        }
        if let Some(s) = attempts.silence(&location, || decoder.decode::<String>()) {
            return Ok(Json::String(s));
        }
        if let Some(items) = attempts.silence(&location, || decoder.decode::<Vec<Json>>()) {
            return Ok(Json::Array(items));
        }
        if let Some(entries) = attempts.silence(&location, || decoder.decode::<JsonObject>()) {
            return Ok(Json::Object(entries));
        }

        Err(DecodeError::Aggregated(attempts.accumulated()))
    }
}
