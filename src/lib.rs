// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Flexjson
//!
//! Resilient JSON decoding for sparse or loosely-typed payloads.
//!
//! This library decodes JSON into Rust types with two behaviors plain
//! deserializers lack:
//! - **Open polymorphism**: a [`Supertype`](resolve::Supertype) decodes
//!   a discriminant from the payload and dispatches to covariant
//!   decoders registered at runtime, with per-discriminant caching and
//!   an optional fallback for unknown discriminants.
//! - **Best-effort recovery**: optional fields tolerate structurally
//!   empty payloads (`null`, `""`, `[]`, `{}`) and missing mandatory
//!   keys by decoding to `None` instead of failing the parent value.
//!
//! The layer is organized by concern:
//! - `core/` - the [`Json`] value tree, [`JsonNumber`], error types and
//!   the error accumulator
//! - `decode/` - decoding positions, container adapters, [`FromJson`],
//!   and the recovery policies
//! - `resolve/` - the supertype trait, covariant directory, and
//!   resolver registry
//! - `encode/` - the [`ToJson`] conversion trait
//!
//! ## Example: Decoding with recovery
//!
//! ```rust
//! # fn main() -> Result<(), flexjson::DecodeError> {
//! use flexjson::{Decoder, FromJson, JsonCodec, Result};
//!
//! struct Sensor {
//!     name: String,
//!     reading: Option<f64>,
//! }
//!
//! impl FromJson for Sensor {
//!     fn from_json(d: &Decoder<'_>) -> Result<Self> {
//!         let keyed = d.keyed()?;
//!         Ok(Sensor {
//!             name: keyed.decode("name")?,
//!             reading: keyed.decode_optional("reading")?,
//!         })
//!     }
//! }
//!
//! let codec = JsonCodec::new();
//! // An empty string where a number belongs decodes as absent.
//! let sensor: Sensor = codec.decode(r#"{"name": "imu", "reading": ""}"#)?;
//! assert_eq!(sensor.name, "imu");
//! assert_eq!(sensor.reading, None);
//! # Ok(())
//! # }
//! ```

// Value model, numbers, errors
pub mod core;

pub use core::{
    AccumulatedErrors, DecodeError, ErrorAccumulator, Json, JsonNumber, JsonObject, Result,
    TraceEntry,
};

// Decoding positions, containers, recovery
pub mod decode;

pub use decode::{
    DecodeContext, Decoder, FromJson, JsonPath, KeyedContainer, PathSegment, SingleValueContainer,
    UnkeyedContainer,
};

// Supertype resolution
pub mod resolve;

pub use resolve::{DecodeVariantFn, ResolverRegistry, SubtypeDirectory, Supertype, Variant};

// Encoding
pub mod encode;

pub use encode::ToJson;

// Facade
pub mod codec;

pub use codec::{from_json_str, to_json_string, JsonCodec};
