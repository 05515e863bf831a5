// In: src/config.rs

//! The single source of truth for all spanframe conversion settings.
//!
//! `FrameConfig` is created once at the application boundary (e.g., from a JSON
//! document or in code) and then handed down read-only to the converters and the
//! batch orchestrator, either by reference or as a shared `Arc<FrameConfig>`.

use serde::{Deserialize, Serialize};

use crate::error::SpanframeError;

//==================================================================================
// I. Core Configuration Enums
//==================================================================================

/// Which mutation the batch-write primitive applies to each submitted row.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WriteMode {
    /// Fails if a row with the same key already exists.
    Insert,
    /// Fails if a row with the same key does not exist.
    Update,
    /// **Default:** inserts new rows and overwrites the named columns of existing ones.
    #[default]
    InsertOrUpdate,
    /// Like `InsertOrUpdate`, but columns not named are reset to null.
    Replace,
}

/// How a null element inside an array cell is handled on the write path.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ArrayNullPolicy {
    /// **Default:** every null form inside an array becomes a store null element,
    /// the same normalization applied to whole cells.
    #[default]
    Propagate,
    /// A null element is a conversion error.
    Reject,
}

//==================================================================================
// II. The Unified FrameConfig
//==================================================================================

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct FrameConfig {
    /// The mutation used by the batch upsert.
    #[serde(default)]
    pub write_mode: WriteMode,

    /// If true, JSON/JSONB text cells must parse as JSON before they are written.
    #[serde(default = "default_true")]
    pub validate_json_text: bool,

    /// If true, a NaN read from a FLOAT64 column becomes a null slot in the frame.
    #[serde(default = "default_true")]
    pub float_nan_as_missing: bool,

    #[serde(default)]
    pub array_null_policy: ArrayNullPolicy,
}

impl FrameConfig {
    /// Reads a config from JSON; absent keys take their defaults.
    pub fn from_json(text: &str) -> Result<Self, SpanframeError> {
        Ok(serde_json::from_str(text)?)
    }
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            write_mode: WriteMode::default(),
            validate_json_text: true,
            float_nan_as_missing: true,
            array_null_policy: ArrayNullPolicy::default(),
        }
    }
}

/// Helper for `serde` to default a boolean field to true.
fn default_true() -> bool {
    true
}
