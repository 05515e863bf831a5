//! This module defines the canonical, type-safe representation of a column's
//! conversion tag.
//!
//! Every column is resolved to exactly one `TypeTag`. Arrays carry their element
//! tag structurally, so the element type is never recovered by string splitting
//! and an array of arrays cannot be expressed.

use std::fmt;

/// A non-array column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScalarTag {
    Bool,
    Int64,
    Float64,
    Timestamp,
    Date,
    String,
    Bytes,
    Numeric,
    Json,
    Jsonb,
    Struct,
}

impl ScalarTag {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bool => "BOOL",
            Self::Int64 => "INT64",
            Self::Float64 => "FLOAT64",
            Self::Timestamp => "TIMESTAMP",
            Self::Date => "DATE",
            Self::String => "STRING",
            Self::Bytes => "BYTES",
            Self::Numeric => "NUMERIC",
            Self::Json => "JSON",
            Self::Jsonb => "JSONB",
            Self::Struct => "STRUCT",
        }
    }

    /// Returns `true` for the two semi-structured tags.
    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json | Self::Jsonb)
    }
}

/// The canonical conversion tag of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TypeTag {
    Scalar(ScalarTag),
    /// `ARRAY_<ELEMENT>`; one level of nesting only.
    Array(ScalarTag),
}

impl TypeTag {
    pub const BOOL: TypeTag = TypeTag::Scalar(ScalarTag::Bool);
    pub const INT64: TypeTag = TypeTag::Scalar(ScalarTag::Int64);
    pub const FLOAT64: TypeTag = TypeTag::Scalar(ScalarTag::Float64);
    pub const TIMESTAMP: TypeTag = TypeTag::Scalar(ScalarTag::Timestamp);
    pub const DATE: TypeTag = TypeTag::Scalar(ScalarTag::Date);
    pub const STRING: TypeTag = TypeTag::Scalar(ScalarTag::String);
    pub const BYTES: TypeTag = TypeTag::Scalar(ScalarTag::Bytes);
    pub const NUMERIC: TypeTag = TypeTag::Scalar(ScalarTag::Numeric);
    pub const JSON: TypeTag = TypeTag::Scalar(ScalarTag::Json);
    pub const JSONB: TypeTag = TypeTag::Scalar(ScalarTag::Jsonb);
    pub const STRUCT: TypeTag = TypeTag::Scalar(ScalarTag::Struct);

    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }
}

impl From<ScalarTag> for TypeTag {
    fn from(tag: ScalarTag) -> Self {
        TypeTag::Scalar(tag)
    }
}

/// Provides the canonical string representation for a tag.
impl fmt::Display for ScalarTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// These string representations are part of the public contract: `INT64`,
/// `ARRAY_STRING`, and so on.
impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(tag) => write!(f, "{tag}"),
            Self::Array(element) => write!(f, "ARRAY_{element}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compound_tag_display() {
        assert_eq!(TypeTag::Array(ScalarTag::Int64).to_string(), "ARRAY_INT64");
        assert_eq!(TypeTag::Array(ScalarTag::Jsonb).to_string(), "ARRAY_JSONB");
        assert_eq!(TypeTag::NUMERIC.to_string(), "NUMERIC");
    }

    #[test]
    fn test_json_tags() {
        assert!(ScalarTag::Json.is_json());
        assert!(ScalarTag::Jsonb.is_json());
        assert!(!ScalarTag::String.is_json());
        assert!(TypeTag::Array(ScalarTag::Bool).is_array());
    }
}
