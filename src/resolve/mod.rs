// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Supertype resolution: the [`Supertype`] trait, the covariant
//! directory, and the resolver registry with its discriminant caches.

pub mod directory;
pub mod supertype;

pub use directory::{ResolverRegistry, SubtypeDirectory};
pub use supertype::{DecodeVariantFn, Supertype, Variant};

pub(crate) use supertype::resolve_supertype;
