// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout flexjson.
//!
//! This module provides the foundational types for the library:
//! - [`DecodeError`] - Decode/encode error taxonomy
//! - [`Json`] - Self-describing JSON value model
//! - [`JsonNumber`] - Dual int/double numeric cell
//! - [`ErrorAccumulator`] - Multi-attempt failure collection

pub mod accumulator;
pub mod error;
pub mod number;
pub mod value;

pub use accumulator::{AccumulatedErrors, ErrorAccumulator, TraceEntry};
pub use error::{DecodeError, Result};
pub use number::JsonNumber;
pub use value::{Json, JsonObject};
