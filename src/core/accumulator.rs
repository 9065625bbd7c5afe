// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Failure accumulation for multi-attempt decodes.
//!
//! Sequential disambiguation (try bool, then number, then string, ...)
//! needs every attempt's failure preserved so that when all attempts
//! fail, the caller sees one aggregated error instead of only the last
//! one. [`ErrorAccumulator`] collects those failures; [`AccumulatedErrors`]
//! is the immutable snapshot it produces.

use std::fmt;

use super::error::{DecodeError, Result};

/// One recorded failure: where it was raised, what it was, and how many
/// aggregate levels it was flattened through.
#[derive(Debug, Clone)]
pub struct TraceEntry {
    location: String,
    error: DecodeError,
    depth: usize,
}

impl TraceEntry {
    /// Call-site location the failure was recorded at.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// The underlying failure.
    pub fn error(&self) -> &DecodeError {
        &self.error
    }

    /// Nesting depth: zero for directly-added failures, one more per
    /// aggregate the entry was flattened out of.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

/// Collects decode failures from silenced attempts.
#[derive(Debug, Default)]
pub struct ErrorAccumulator {
    entries: Vec<TraceEntry>,
}

impl ErrorAccumulator {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record an error at a call-site location.
    ///
    /// An aggregated error is flattened into the receiver: its children
    /// are appended individually, keep their original locations, and
    /// gain one nesting level.
    pub fn add(&mut self, location: impl fmt::Display, error: DecodeError) {
        match error {
            DecodeError::Aggregated(inner) => {
                self.entries
                    .extend(inner.into_entries().into_iter().map(|mut entry| {
                        entry.depth += 1;
                        entry
                    }));
            }
            leaf => self.entries.push(TraceEntry {
                location: location.to_string(),
                error: leaf,
                depth: 0,
            }),
        }
    }

    /// Evaluate a fallible operation; on failure, record the error and
    /// return `None` instead of propagating.
    pub fn silence<T>(
        &mut self,
        location: impl fmt::Display,
        op: impl FnOnce() -> Result<T>,
    ) -> Option<T> {
        match op() {
            Ok(value) => Some(value),
            Err(error) => {
                self.add(location, error);
                None
            }
        }
    }

    /// Number of recorded failures.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Produce an immutable snapshot of everything recorded so far.
    pub fn accumulated(&self) -> AccumulatedErrors {
        AccumulatedErrors {
            entries: self.entries.clone(),
        }
    }
}

/// Immutable snapshot of accumulated decode failures, oldest first.
#[derive(Debug, Clone, Default)]
pub struct AccumulatedErrors {
    entries: Vec<TraceEntry>,
}

impl AccumulatedErrors {
    /// The ordered entry list, oldest first.
    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    pub(crate) fn into_entries(self) -> Vec<TraceEntry> {
        self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Summary name, derived from the first (oldest) entry.
    pub fn name(&self) -> &'static str {
        self.entries
            .first()
            .map_or("AggregatedErrors", |entry| entry.error.kind())
    }

    /// Render entries newest-first, indented by each entry's nesting
    /// depth: sibling attempts share an indent level, flattened children
    /// sit one deeper.
    pub fn trace_description(&self) -> String {
        let mut out = String::new();
        for entry in self.entries.iter().rev() {
            for _ in 0..entry.depth {
                out.push_str("  ");
            }
            out.push_str(&entry.location);
            out.push_str(": ");
            out.push_str(&entry.error.to_string());
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for AccumulatedErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} attempts failed)", self.name(), self.len())
    }
}

impl std::error::Error for AccumulatedErrors {}
