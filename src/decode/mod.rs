// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Tree-walking decode layer: positions, container adapters, the
//! [`FromJson`] trait, and best-effort recovery for optional paths.

pub mod containers;
pub mod context;
pub(crate) mod recovery;
pub mod traits;

pub use containers::{KeyedContainer, SingleValueContainer, UnkeyedContainer};
pub use context::{DecodeContext, Decoder, JsonPath, PathSegment};
pub use traits::FromJson;
