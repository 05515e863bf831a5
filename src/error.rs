// In: src/error.rs

//! This module defines the single, unified error type for the entire spanframe library.
//! It uses the `thiserror` crate to provide ergonomic, context-aware error handling.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpanframeError {
    // =========================================================================
    // === High-Level, Semantic Errors (Specific to our library's logic)
    // =========================================================================
    /// The Arrow-backed frame layer was compiled out of this build.
    #[error("{dependency} is required for this operation. {hint}")]
    MissingDependency {
        dependency: &'static str,
        hint: &'static str,
    },

    /// A type code, type tag or frame dtype with no registered conversion rule.
    #[error("Unknown type: {0}")]
    UnknownType(String),

    /// A single value could not be cast to its target representation.
    #[error("Could not convert {value} to datatype {tag}: {reason}")]
    Conversion {
        value: String,
        tag: String,
        reason: String,
    },

    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("Row {row} has {found} values but {expected} columns were named")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Column '{column}' has {found} rows, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },

    // =========================================================================
    // === External Error Wrappers (Using #[from] for automatic conversion)
    // =========================================================================
    /// An error reported by the external store client.
    #[error("Store operation failed: {0}")]
    Store(#[from] StoreError),

    /// An error originating from the Arrow library.
    #[error("Arrow operation failed: {0}")]
    Arrow(String), // Manual `From` impl below, the variant exists in every feature set.

    /// An error from the Serde JSON library, typically while reading a `FrameConfig`.
    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),
}

impl SpanframeError {
    pub(crate) fn conversion(
        value: impl std::fmt::Display,
        tag: impl std::fmt::Display,
        reason: impl Into<String>,
    ) -> Self {
        SpanframeError::Conversion {
            value: value.to_string(),
            tag: tag.to_string(),
            reason: reason.into(),
        }
    }

    #[cfg_attr(feature = "frame", allow(dead_code))]
    pub(crate) fn missing_frame_support() -> Self {
        SpanframeError::MissingDependency {
            dependency: "The Arrow frame layer",
            hint: "Rebuild spanframe-core with `--features frame`.",
        }
    }
}

// =============================================================================
// === Manual `From` Implementations ===
// =============================================================================

#[cfg(feature = "frame")]
impl From<arrow::error::ArrowError> for SpanframeError {
    fn from(err: arrow::error::ArrowError) -> Self {
        SpanframeError::Arrow(err.to_string())
    }
}

/// Faults surfaced by an external `Store` implementation.
///
/// `NotFound` is the structural-mismatch signal (unknown table or column); the
/// batch orchestrator inspects its message to enrich column mismatches.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Transaction aborted: {0}")]
    Aborted(String),

    #[error("{0}")]
    Other(String),
}
