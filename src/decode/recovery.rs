// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Best-effort recovery for optional decode paths.
//!
//! Recovery is only ever applied where absence is representable, i.e.
//! behind `decode_optional`. Mandatory paths always surface the raw
//! error. Two policies run in order after an ordinary decode fails:
//!
//! 1. A missing key that the target type declares mandatory for its own
//!    construction collapses the whole value to `None` instead of
//!    failing the parent.
//! 2. A failure over a structurally empty payload (`null`, `""`, `[]`,
//!    `{}`) also collapses to `None`.
//!
//! Anything else is re-raised, with type mismatches enriched by a
//! rendering of the offending payload.

use crate::core::{DecodeError, Json, Result};

use super::context::Decoder;
use super::traits::FromJson;

/// Decode an optional value, applying the recovery policies on failure.
pub(crate) fn decode_optional_with_recovery<T: FromJson>(
    decoder: &Decoder<'_>,
) -> Result<Option<T>> {
    if decoder.is_null() {
        return Ok(None);
    }
    match decoder.decode::<T>() {
        Ok(value) => Ok(Some(value)),
        Err(error) => recover::<T>(decoder, error),
    }
}

fn recover<T: FromJson>(decoder: &Decoder<'_>, error: DecodeError) -> Result<Option<T>> {
    if !error.is_recoverable() {
        return Err(error);
    }

    if let DecodeError::KeyNotFound { key, .. } = &error {
        if T::mandatory_keys().contains(&key.as_str()) {
            tracing::debug!(
                key = key.as_str(),
                path = %decoder.path(),
                "mandatory key absent, decoding value as absent"
            );
            return Ok(None);
        }
    }

    // Any recoverable failure over a structurally empty payload
    // collapses to absence. This covers a missing key inside an empty
    // object just as well as an empty string in place of a number.
    if probe_empty(decoder).is_ok() {
        tracing::debug!(
            path = %decoder.path(),
            "empty payload in place of expected value, decoding as absent"
        );
        return Ok(None);
    }

    tracing::debug!(
        path = %decoder.path(),
        payload = %decoder.render(),
        "unrecoverable decode failure"
    );
    Err(error.with_rendered_value(decoder.render()))
}

/// Probe whether the payload at a position is structurally empty.
pub(crate) fn probe_empty(decoder: &Decoder<'_>) -> Result<()> {
    let probe: Json = decoder.decode()?;
    if probe.is_empty() {
        Ok(())
    } else {
        Err(DecodeError::not_empty(
            probe.type_name(),
            decoder.path().to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::decode::context::DecodeContext;
    use crate::resolve::ResolverRegistry;

    fn context() -> DecodeContext {
        DecodeContext::new(Arc::new(ResolverRegistry::new()))
    }

    #[test]
    fn test_null_decodes_as_absent() {
        let ctx = context();
        let value = serde_json::Value::Null;
        let decoder = Decoder::root(&value, &ctx);
        assert_eq!(decode_optional_with_recovery::<i64>(&decoder).unwrap(), None);
    }

    #[test]
    fn test_empty_string_recovers_to_absent() {
        let ctx = context();
        let value = serde_json::json!("");
        let decoder = Decoder::root(&value, &ctx);
        assert_eq!(decode_optional_with_recovery::<i64>(&decoder).unwrap(), None);
    }

    #[test]
    fn test_empty_object_recovers_to_absent() {
        let ctx = context();
        let value = serde_json::json!({});
        let decoder = Decoder::root(&value, &ctx);
        assert_eq!(
            decode_optional_with_recovery::<Vec<i64>>(&decoder).unwrap(),
            None
        );
    }

    #[test]
    fn test_nonempty_mismatch_is_enriched_and_raised() {
        let ctx = context();
        let value = serde_json::json!("not a number");
        let decoder = Decoder::root(&value, &ctx);
        let err = decode_optional_with_recovery::<i64>(&decoder).unwrap_err();
        match err {
            DecodeError::TypeMismatch { found, .. } => {
                assert!(found.contains("not a number"), "found: {found}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_probe_empty_rejects_populated_values() {
        let ctx = context();
        let value = serde_json::json!([1]);
        let decoder = Decoder::root(&value, &ctx);
        assert!(matches!(
            probe_empty(&decoder).unwrap_err(),
            DecodeError::NotEmpty { .. }
        ));
    }
}
