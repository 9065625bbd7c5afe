// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Decoding position and context.
//!
//! [`Decoder`] is a position inside a parsed container tree. Every
//! nested decode of any value goes through [`Decoder::decode`], which is
//! the single interception point of the pipeline: supertype members
//! redirect to the resolver from their own [`FromJson`] impls, and the
//! optional paths apply the recovery policies. Container adapters derive
//! child positions from their parent, so interception is structural
//! rather than top-level-only.

use std::fmt;
use std::sync::Arc;

use crate::core::Result;
use crate::resolve::{ResolverRegistry, Supertype};

use super::containers::{KeyedContainer, SingleValueContainer, UnkeyedContainer};
use super::recovery;
use super::traits::FromJson;

/// One step of a document path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Object key
    Key(String),
    /// Array index
    Index(usize),
}

/// Path from the document root to a decoding position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonPath {
    segments: Vec<PathSegment>,
}

impl JsonPath {
    /// The document root path, rendered as `$`.
    pub fn root() -> Self {
        Self::default()
    }

    /// Whether this is the document root.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Depth below the document root.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// The path segments, outermost first.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Derive the path of an object entry.
    pub fn child_key(&self, key: &str) -> JsonPath {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Key(key.to_string()));
        JsonPath { segments }
    }

    /// Derive the path of an array element.
    pub fn child_index(&self, index: usize) -> JsonPath {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        JsonPath { segments }
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for segment in &self.segments {
            match segment {
                PathSegment::Key(key) => write!(f, ".{key}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

/// Shared state for one document decode.
///
/// Carries the resolver registry explicitly instead of relying on global
/// state, so tests stay isolated and concurrency discipline stays
/// visible at the call site.
pub struct DecodeContext {
    registry: Arc<ResolverRegistry>,
}

impl DecodeContext {
    /// Create a context backed by the given resolver registry.
    pub fn new(registry: Arc<ResolverRegistry>) -> Self {
        Self { registry }
    }

    /// The resolver registry for this decode.
    pub fn registry(&self) -> &ResolverRegistry {
        &self.registry
    }
}

/// A decoding position: one value inside the container tree, plus the
/// path that led to it.
pub struct Decoder<'a> {
    value: &'a serde_json::Value,
    path: JsonPath,
    ctx: &'a DecodeContext,
}

impl<'a> Decoder<'a> {
    /// Position at the root of a container tree.
    pub fn root(value: &'a serde_json::Value, ctx: &'a DecodeContext) -> Self {
        Self {
            value,
            path: JsonPath::root(),
            ctx,
        }
    }

    /// Position at an arbitrary path (used by container adapters).
    pub(crate) fn at(
        value: &'a serde_json::Value,
        path: JsonPath,
        ctx: &'a DecodeContext,
    ) -> Self {
        Self { value, path, ctx }
    }

    /// The path of this position.
    pub fn path(&self) -> &JsonPath {
        &self.path
    }

    /// The raw host value at this position.
    pub(crate) fn value(&self) -> &'a serde_json::Value {
        self.value
    }

    /// The decode context shared by every position of this document.
    pub(crate) fn context(&self) -> &'a DecodeContext {
        self.ctx
    }

    /// The resolver registry in scope for this decode.
    pub fn registry(&self) -> &'a ResolverRegistry {
        self.ctx.registry()
    }

    /// Whether the value at this position is null.
    pub fn is_null(&self) -> bool {
        self.value.is_null()
    }

    /// Type name of the host value at this position.
    pub(crate) fn found(&self) -> &'static str {
        host_type_name(self.value)
    }

    /// View this position as a keyed (object) container.
    pub fn keyed(&self) -> Result<KeyedContainer<'a>> {
        KeyedContainer::open(self)
    }

    /// View this position as an unkeyed (array) container.
    pub fn unkeyed(&self) -> Result<UnkeyedContainer<'a>> {
        UnkeyedContainer::open(self)
    }

    /// View this position as a single-value container.
    pub fn single(&self) -> SingleValueContainer<'a> {
        SingleValueContainer::open(self)
    }

    /// Decode the value at this position.
    ///
    /// This is the single interception hook of the pipeline: every
    /// nested decode, whatever container it came through, funnels here.
    pub fn decode<T: FromJson>(&self) -> Result<T> {
        T::from_json(self)
    }

    /// Decode an optional value at this position, applying the recovery
    /// policies on failure.
    pub fn decode_optional<T: FromJson>(&self) -> Result<Option<T>> {
        recovery::decode_optional_with_recovery(self)
    }

    /// Resolve and decode a polymorphic supertype at this position.
    pub fn resolve<S: Supertype>(&self) -> Result<S> {
        crate::resolve::resolve_supertype(self)
    }

    /// Pretty rendering of the value at this position, for diagnostics.
    pub fn render(&self) -> String {
        serde_json::to_string_pretty(self.value)
            .unwrap_or_else(|_| "<<error rendering JSON>>".to_string())
    }
}

/// Type name of a host container-tree value.
pub(crate) fn host_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_rendering() {
        let root = JsonPath::root();
        assert_eq!(root.to_string(), "$");
        assert!(root.is_root());

        let nested = root.child_key("animals").child_index(2).child_key("kind");
        assert_eq!(nested.to_string(), "$.animals[2].kind");
        assert_eq!(nested.depth(), 3);
        assert!(!nested.is_root());
    }

    #[test]
    fn test_host_type_name() {
        assert_eq!(host_type_name(&serde_json::Value::Null), "null");
        assert_eq!(host_type_name(&serde_json::json!(true)), "bool");
        assert_eq!(host_type_name(&serde_json::json!(1)), "number");
        assert_eq!(host_type_name(&serde_json::json!("s")), "string");
        assert_eq!(host_type_name(&serde_json::json!([])), "array");
        assert_eq!(host_type_name(&serde_json::json!({})), "object");
    }
}
