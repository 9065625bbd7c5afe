// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Dual-representation JSON number.
//!
//! JSON does not distinguish integers from doubles, but payloads often
//! carry values that are semantically one or the other. [`JsonNumber`]
//! keeps the exact representation it was decoded with and performs
//! arithmetic and comparison in the integer domain when both operands
//! carry one, promoting to `f64` otherwise. An integer operation that
//! would overflow also promotes to the double domain instead of
//! wrapping or panicking.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Mul, MulAssign, Sub, SubAssign};

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A JSON number holding either an exact integer or a double.
#[derive(Debug, Clone, Copy)]
pub enum JsonNumber {
    /// Exact integer representation
    Int(i64),
    /// Double representation
    Double(f64),
}

impl JsonNumber {
    /// Check if this number carries an integer representation.
    pub fn is_integer(&self) -> bool {
        matches!(self, JsonNumber::Int(_))
    }

    /// Check if this number carries a double representation.
    pub fn is_double(&self) -> bool {
        matches!(self, JsonNumber::Double(_))
    }

    /// The exact integer value, if this number carries one.
    pub fn integer_value(&self) -> Option<i64> {
        match self {
            JsonNumber::Int(value) => Some(*value),
            JsonNumber::Double(_) => None,
        }
    }

    /// The value as a double, promoting an integer representation.
    pub fn double_value(&self) -> f64 {
        match self {
            JsonNumber::Int(value) => *value as f64,
            JsonNumber::Double(value) => *value,
        }
    }

    /// Combine two numbers, staying in the integer domain when both
    /// operands carry one and promoting to doubles otherwise.
    fn map_with<T>(
        self,
        other: JsonNumber,
        int_op: impl FnOnce(i64, i64) -> T,
        double_op: impl FnOnce(f64, f64) -> T,
    ) -> T {
        match (self.integer_value(), other.integer_value()) {
            (Some(lhs), Some(rhs)) => int_op(lhs, rhs),
            _ => double_op(self.double_value(), other.double_value()),
        }
    }

    /// Combine two numbers into a new one under the same domain rule.
    /// Integer overflow promotes the result to the double domain.
    fn combine(
        self,
        other: JsonNumber,
        int_op: impl FnOnce(i64, i64) -> Option<i64>,
        double_op: impl Fn(f64, f64) -> f64,
    ) -> JsonNumber {
        self.map_with(
            other,
            |lhs, rhs| match int_op(lhs, rhs) {
                Some(exact) => JsonNumber::Int(exact),
                None => JsonNumber::Double(double_op(lhs as f64, rhs as f64)),
            },
            |lhs, rhs| JsonNumber::Double(double_op(lhs, rhs)),
        )
    }
}

// ============================================================================
// Conversions
// ============================================================================

macro_rules! from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for JsonNumber {
                fn from(value: $ty) -> Self {
                    JsonNumber::Int(i64::from(value))
                }
            }
        )*
    };
}

from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for JsonNumber {
    fn from(value: f32) -> Self {
        JsonNumber::Double(f64::from(value))
    }
}

impl From<f64> for JsonNumber {
    fn from(value: f64) -> Self {
        JsonNumber::Double(value)
    }
}

impl TryFrom<u64> for JsonNumber {
    type Error = u64;

    /// Fails with the original value when it exceeds `i64::MAX`.
    fn try_from(value: u64) -> std::result::Result<Self, u64> {
        i64::try_from(value).map(JsonNumber::Int).map_err(|_| value)
    }
}

// ============================================================================
// Protocol Implementations
// ============================================================================

impl PartialEq for JsonNumber {
    fn eq(&self, other: &Self) -> bool {
        self.map_with(*other, |lhs, rhs| lhs == rhs, |lhs, rhs| lhs == rhs)
    }
}

impl PartialOrd for JsonNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.map_with(
            *other,
            |lhs, rhs| lhs.partial_cmp(&rhs),
            |lhs, rhs| lhs.partial_cmp(&rhs),
        )
    }
}

impl Add for JsonNumber {
    type Output = JsonNumber;

    fn add(self, rhs: JsonNumber) -> JsonNumber {
        self.combine(rhs, i64::checked_add, |lhs, rhs| lhs + rhs)
    }
}

impl Sub for JsonNumber {
    type Output = JsonNumber;

    fn sub(self, rhs: JsonNumber) -> JsonNumber {
        self.combine(rhs, i64::checked_sub, |lhs, rhs| lhs - rhs)
    }
}

impl Mul for JsonNumber {
    type Output = JsonNumber;

    fn mul(self, rhs: JsonNumber) -> JsonNumber {
        self.combine(rhs, i64::checked_mul, |lhs, rhs| lhs * rhs)
    }
}

impl AddAssign for JsonNumber {
    fn add_assign(&mut self, rhs: JsonNumber) {
        *self = *self + rhs;
    }
}

impl SubAssign for JsonNumber {
    fn sub_assign(&mut self, rhs: JsonNumber) {
        *self = *self - rhs;
    }
}

impl MulAssign for JsonNumber {
    fn mul_assign(&mut self, rhs: JsonNumber) {
        *self = *self * rhs;
    }
}

impl fmt::Display for JsonNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonNumber::Int(value) => write!(f, "{value}"),
            JsonNumber::Double(value) => write!(f, "{value}"),
        }
    }
}

impl Serialize for JsonNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            JsonNumber::Int(value) => serializer.serialize_i64(*value),
            JsonNumber::Double(value) => serializer.serialize_f64(*value),
        }
    }
}

struct JsonNumberVisitor;

impl Visitor<'_> for JsonNumberVisitor {
    type Value = JsonNumber;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON number")
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> std::result::Result<JsonNumber, E> {
        Ok(JsonNumber::Int(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> std::result::Result<JsonNumber, E> {
        JsonNumber::try_from(value)
            .map_err(|value| E::custom(format!("integer {value} overflows i64")))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> std::result::Result<JsonNumber, E> {
        Ok(JsonNumber::Double(value))
    }
}

impl<'de> Deserialize<'de> for JsonNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(JsonNumberVisitor)
    }
}
