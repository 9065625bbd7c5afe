// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Registration state for supertype resolution.
//!
//! [`SubtypeDirectory`] holds explicitly registered covariants,
//! [`ResolverRegistry`] pairs the directory with per-supertype caches
//! of resolved discriminants. Both are type-erased maps keyed by the
//! supertype's `TypeId`; entries only downcast back to the type that
//! inserted them.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::RwLock;

use crate::core::{DecodeError, Result};

use super::supertype::{DecodeVariantFn, Supertype, Variant};

// ============================================================================
// Subtype Directory
// ============================================================================

/// Registered covariants, grouped per supertype.
#[derive(Default)]
pub struct SubtypeDirectory {
    entries: RwLock<HashMap<TypeId, Box<dyn Any + Send + Sync>>>,
}

impl SubtypeDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a covariant for supertype `S`.
    ///
    /// Fails if a covariant with the same discriminant is already
    /// registered for `S`.
    pub fn register<S: Supertype>(&self, variant: Variant<S>) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| DecodeError::registry("subtype directory lock poisoned"))?;

        let slot = entries
            .entry(TypeId::of::<S>())
            .or_insert_with(|| Box::new(Vec::<Variant<S>>::new()));
        let variants = slot
            .downcast_mut::<Vec<Variant<S>>>()
            .ok_or_else(|| DecodeError::invalid_cast("directory entry", S::name()))?;

        if variants.iter().any(|known| known.id() == variant.id()) {
            return Err(DecodeError::registry(format!(
                "duplicate covariant {:?} for supertype {}",
                variant.id(),
                S::name()
            )));
        }
        variants.push(variant);
        Ok(())
    }

    /// Snapshot of the covariants registered for `S`.
    ///
    /// A poisoned lock yields an empty set rather than an error, so a
    /// panicked registration elsewhere degrades to the no-covariant
    /// diagnostic instead of aborting unrelated decodes.
    pub fn variants<S: Supertype>(&self) -> Vec<Variant<S>> {
        let entries = match self.entries.read() {
            Ok(entries) => entries,
            Err(_) => {
                tracing::warn!(
                    supertype = S::name(),
                    "subtype directory lock poisoned, treating as empty"
                );
                return Vec::new();
            }
        };
        entries
            .get(&TypeId::of::<S>())
            .and_then(|slot| slot.downcast_ref::<Vec<Variant<S>>>())
            .map(|variants| variants.to_vec())
            .unwrap_or_default()
    }
}

// ============================================================================
// Resolver Registry
// ============================================================================

/// Directory plus per-supertype caches of resolved discriminants.
///
/// The cache is last-writer-wins: concurrent resolutions of the same
/// discriminant may each scan the candidates, but they pick the same
/// covariant, so the race is benign.
#[derive(Default)]
pub struct ResolverRegistry {
    directory: SubtypeDirectory,
    caches: RwLock<HashMap<TypeId, Box<dyn Any + Send + Sync>>>,
}

impl ResolverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The covariant directory, for registration.
    pub fn directory(&self) -> &SubtypeDirectory {
        &self.directory
    }

    /// Cached decoder for a discriminant of `S`, if resolved before.
    pub(crate) fn cached<S: Supertype>(
        &self,
        id: &S::Discriminant,
    ) -> Result<Option<DecodeVariantFn<S>>> {
        let caches = self
            .caches
            .read()
            .map_err(|_| DecodeError::registry("resolver cache lock poisoned"))?;
        Ok(caches
            .get(&TypeId::of::<S>())
            .and_then(|slot| slot.downcast_ref::<HashMap<S::Discriminant, DecodeVariantFn<S>>>())
            .and_then(|cache| cache.get(id).copied()))
    }

    /// Record the decoder resolved for a discriminant of `S`.
    pub(crate) fn insert<S: Supertype>(
        &self,
        id: S::Discriminant,
        decode: DecodeVariantFn<S>,
    ) -> Result<()> {
        let mut caches = self
            .caches
            .write()
            .map_err(|_| DecodeError::registry("resolver cache lock poisoned"))?;
        let slot = caches
            .entry(TypeId::of::<S>())
            .or_insert_with(|| Box::new(HashMap::<S::Discriminant, DecodeVariantFn<S>>::new()));
        let cache = slot
            .downcast_mut::<HashMap<S::Discriminant, DecodeVariantFn<S>>>()
            .ok_or_else(|| DecodeError::invalid_cast("resolver cache entry", S::name()))?;
        cache.insert(id, decode);
        Ok(())
    }

    /// Pre-resolve every registered covariant of `S` into the cache.
    /// Returns the number of discriminants now cached for `S`.
    pub fn prewarm<S: Supertype>(&self) -> Result<usize> {
        let variants = self.directory.variants::<S>();
        let count = variants.len();
        for variant in variants {
            self.insert::<S>(variant.id().clone(), variant.decode_fn())?;
        }
        Ok(count)
    }
}
