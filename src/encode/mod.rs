// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! The [`ToJson`] trait: conversion into the [`Json`] tree.
//!
//! Absent optionals encode as explicit nulls, so an encoded tree
//! round-trips through decode without losing which keys were present.

use std::collections::HashMap;

use crate::core::{DecodeError, Json, JsonNumber, JsonObject, Result};

/// A type convertible into a [`Json`] tree.
pub trait ToJson {
    fn to_json(&self) -> Result<Json>;
}

impl ToJson for Json {
    fn to_json(&self) -> Result<Json> {
        Ok(self.clone())
    }
}

impl ToJson for JsonNumber {
    fn to_json(&self) -> Result<Json> {
        Ok(Json::Number(*self))
    }
}

impl ToJson for bool {
    fn to_json(&self) -> Result<Json> {
        Ok(Json::Bool(*self))
    }
}

macro_rules! to_json_int {
    ($($ty:ty),+) => {
        $(
            impl ToJson for $ty {
                fn to_json(&self) -> Result<Json> {
                    Ok(Json::Number(JsonNumber::from(*self)))
                }
            }
        )+
    };
}

to_json_int!(i8, i16, i32, i64, u8, u16, u32);

impl ToJson for u64 {
    fn to_json(&self) -> Result<Json> {
        JsonNumber::try_from(*self)
            .map(Json::Number)
            .map_err(|value| DecodeError::irrepresentable(value.to_string(), "$"))
    }
}

impl ToJson for f32 {
    fn to_json(&self) -> Result<Json> {
        Ok(Json::Number(JsonNumber::from(*self)))
    }
}

impl ToJson for f64 {
    fn to_json(&self) -> Result<Json> {
        Ok(Json::Number(JsonNumber::from(*self)))
    }
}

impl ToJson for String {
    fn to_json(&self) -> Result<Json> {
        Ok(Json::String(self.clone()))
    }
}

impl ToJson for str {
    fn to_json(&self) -> Result<Json> {
        Ok(Json::String(self.to_owned()))
    }
}

impl<T: ToJson> ToJson for Option<T> {
    fn to_json(&self) -> Result<Json> {
        match self {
            Some(value) => value.to_json(),
            None => Ok(Json::Null),
        }
    }
}

impl<T: ToJson> ToJson for Vec<T> {
    fn to_json(&self) -> Result<Json> {
        let mut items = Vec::with_capacity(self.len());
        for item in self {
            items.push(item.to_json()?);
        }
        Ok(Json::Array(items))
    }
}

impl<T: ToJson> ToJson for [T] {
    fn to_json(&self) -> Result<Json> {
        let mut items = Vec::with_capacity(self.len());
        for item in self {
            items.push(item.to_json()?);
        }
        Ok(Json::Array(items))
    }
}

impl<V: ToJson, S> ToJson for HashMap<String, V, S> {
    fn to_json(&self) -> Result<Json> {
        let mut entries = JsonObject::with_capacity(self.len());
        for (key, value) in self {
            entries.insert(key.clone(), value.to_json()?);
        }
        Ok(Json::Object(entries))
    }
}

impl<T: ToJson + ?Sized> ToJson for Box<T> {
    fn to_json(&self) -> Result<Json> {
        (**self).to_json()
    }
}

impl<T: ToJson + ?Sized> ToJson for &T {
    fn to_json(&self) -> Result<Json> {
        (**self).to_json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_encodes_as_explicit_null() {
        let value: Option<i64> = None;
        assert_eq!(value.to_json().unwrap(), Json::Null);
    }

    #[test]
    fn test_nested_collections() {
        let value = vec![Some(1_i64), None, Some(3)];
        let tree = value.to_json().unwrap();
        assert_eq!(
            tree,
            Json::Array(vec![
                Json::Number(JsonNumber::Int(1)),
                Json::Null,
                Json::Number(JsonNumber::Int(3)),
            ])
        );
    }

    #[test]
    fn test_u64_beyond_i64_is_rejected() {
        let err = u64::MAX.to_json().unwrap_err();
        assert!(matches!(err, DecodeError::IrrepresentableNumber { .. }));
    }
}
