// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Open polymorphic supertype resolution.
//!
//! A [`Supertype`] decodes a discriminant from the payload, then picks
//! the covariant decoder registered for that discriminant. Resolution
//! results are cached per supertype in the [`ResolverRegistry`], so the
//! candidate set is consulted at most twice per discriminant: once, and
//! once more if the set was empty the first time (late registration).

use std::any::type_name;
use std::fmt;
use std::hash::Hash;

use crate::core::{DecodeError, Result};
use crate::decode::{Decoder, FromJson};

use super::directory::SubtypeDirectory;

/// Signature of a covariant decoder for supertype `S`.
pub type DecodeVariantFn<S> = fn(&Decoder<'_>) -> Result<S>;

/// A registered covariant of a supertype: a discriminant value paired
/// with the function that decodes the full payload into the supertype.
pub struct Variant<S: Supertype> {
    id: S::Discriminant,
    decode: DecodeVariantFn<S>,
}

impl<S: Supertype> Variant<S> {
    pub fn new(id: S::Discriminant, decode: DecodeVariantFn<S>) -> Self {
        Self { id, decode }
    }

    /// Discriminant this covariant answers to.
    pub fn id(&self) -> &S::Discriminant {
        &self.id
    }

    pub(crate) fn decode_fn(&self) -> DecodeVariantFn<S> {
        self.decode
    }
}

// Derived Clone would require S: Clone.
impl<S: Supertype> Clone for Variant<S> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            decode: self.decode,
        }
    }
}

impl<S: Supertype> fmt::Debug for Variant<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Variant").field("id", &self.id).finish()
    }
}

/// A type decoded by discriminant dispatch over registered covariants.
///
/// Implementors supply how the discriminant is read from the payload;
/// candidates default to whatever the context's [`SubtypeDirectory`]
/// holds for this supertype, and may be overridden with a static set.
pub trait Supertype: Sized + 'static {
    /// Discriminant value decoded from the payload.
    type Discriminant: FromJson + Eq + Hash + Clone + fmt::Debug + Send + Sync + 'static;

    /// Name used in diagnostics.
    fn name() -> &'static str {
        type_name::<Self>()
    }

    /// Read the discriminant from the payload.
    fn decode_discriminant(decoder: &Decoder<'_>) -> Result<Self::Discriminant>;

    /// Candidate covariants for this supertype.
    fn candidates(directory: &SubtypeDirectory) -> Vec<Variant<Self>> {
        directory.variants::<Self>()
    }

    /// Last-resort covariant for a discriminant no candidate matched.
    fn fallback(_id: &Self::Discriminant) -> Option<Variant<Self>> {
        None
    }
}

/// Resolve and decode a supertype at a position.
pub(crate) fn resolve_supertype<S: Supertype>(decoder: &Decoder<'_>) -> Result<S> {
    let id = S::decode_discriminant(decoder)?;
    let registry = decoder.registry();

    if let Some(decode) = registry.cached::<S>(&id)? {
        return decode(decoder);
    }

    let directory = registry.directory();
    let mut candidates = S::candidates(directory);
    if candidates.is_empty() {
        // The set may have been registered after the first query.
        tracing::trace!(supertype = S::name(), "empty candidate set, re-querying once");
        candidates = S::candidates(directory);
    }

    let chosen = candidates
        .into_iter()
        .find(|variant| variant.id() == &id)
        .or_else(|| S::fallback(&id));

    match chosen {
        Some(variant) => {
            let decode = variant.decode_fn();
            registry.insert::<S>(id, decode)?;
            decode(decoder)
        }
        None => Err(DecodeError::no_fallback_covariant(
            S::name(),
            format!("{id:?}"),
        )),
    }
}
