// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! The [`JsonCodec`] facade: parse, decode, and encode entry points
//! bound to one resolver registry.

use std::sync::Arc;

use crate::core::Result;
use crate::decode::{DecodeContext, Decoder, FromJson};
use crate::encode::ToJson;
use crate::resolve::ResolverRegistry;

/// Decoding and encoding entry point.
///
/// A codec owns (a share of) a [`ResolverRegistry`]; every decode it
/// starts resolves supertypes against that registry. Codecs are cheap
/// to clone and share the registry.
#[derive(Clone, Default)]
pub struct JsonCodec {
    registry: Arc<ResolverRegistry>,
}

impl JsonCodec {
    /// Codec with a fresh, empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Codec bound to an existing registry.
    pub fn with_registry(registry: Arc<ResolverRegistry>) -> Self {
        Self { registry }
    }

    /// The registry this codec resolves supertypes against.
    pub fn registry(&self) -> &ResolverRegistry {
        &self.registry
    }

    /// Parse a JSON document and decode it.
    pub fn decode<T: FromJson>(&self, input: &str) -> Result<T> {
        let tree: serde_json::Value = serde_json::from_str(input)?;
        self.decode_tree(&tree)
    }

    /// Parse a JSON byte payload and decode it.
    pub fn decode_slice<T: FromJson>(&self, input: &[u8]) -> Result<T> {
        let tree: serde_json::Value = serde_json::from_slice(input)?;
        self.decode_tree(&tree)
    }

    /// Decode an already-parsed JSON tree.
    pub fn decode_tree<T: FromJson>(&self, tree: &serde_json::Value) -> Result<T> {
        let ctx = DecodeContext::new(Arc::clone(&self.registry));
        Decoder::root(tree, &ctx).decode()
    }

    /// Encode a value as a compact JSON document.
    pub fn encode<T: ToJson + ?Sized>(&self, value: &T) -> Result<String> {
        value.to_json()?.to_json_string(false)
    }

    /// Encode a value as a pretty-printed JSON document.
    pub fn encode_pretty<T: ToJson + ?Sized>(&self, value: &T) -> Result<String> {
        value.to_json()?.to_json_string(true)
    }

    /// Encode a value as JSON bytes.
    pub fn encode_vec<T: ToJson + ?Sized>(&self, value: &T) -> Result<Vec<u8>> {
        self.encode(value).map(String::into_bytes)
    }
}

/// Decode a value from a JSON document with a throwaway registry.
/// Convenient when no supertypes are involved.
pub fn from_json_str<T: FromJson>(input: &str) -> Result<T> {
    JsonCodec::new().decode(input)
}

/// Encode a value as a JSON document.
pub fn to_json_string<T: ToJson + ?Sized>(value: &T, pretty: bool) -> Result<String> {
    let codec = JsonCodec::new();
    if pretty {
        codec.encode_pretty(value)
    } else {
        codec.encode(value)
    }
}
