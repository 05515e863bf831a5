//! Wire-level schema metadata as the store reports it.
//!
//! Codes are kept as the raw integers found on the wire so that a schema
//! carrying a code this crate has never heard of still deserializes; the
//! resolver is the one place that decides whether a code is usable.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The store's enumeration of column type codes.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(i32)]
pub enum TypeCode {
    TypeCodeUnspecified = 0,
    Bool = 1,
    Int64 = 2,
    Float64 = 3,
    Timestamp = 4,
    Date = 5,
    String = 6,
    Bytes = 7,
    Array = 8,
    Struct = 9,
    Numeric = 10,
    Json = 11,
    Proto = 13,
    Enum = 14,
    Float32 = 15,
    Interval = 16,
    Uuid = 17,
}

impl TypeCode {
    /// Maps a raw wire integer to a known code.
    pub fn from_wire(code: i32) -> Option<Self> {
        let code = match code {
            0 => Self::TypeCodeUnspecified,
            1 => Self::Bool,
            2 => Self::Int64,
            3 => Self::Float64,
            4 => Self::Timestamp,
            5 => Self::Date,
            6 => Self::String,
            7 => Self::Bytes,
            8 => Self::Array,
            9 => Self::Struct,
            10 => Self::Numeric,
            11 => Self::Json,
            13 => Self::Proto,
            14 => Self::Enum,
            15 => Self::Float32,
            16 => Self::Interval,
            17 => Self::Uuid,
            _ => return None,
        };
        Some(code)
    }

    pub fn wire(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TypeCodeUnspecified => "TYPE_CODE_UNSPECIFIED",
            Self::Bool => "BOOL",
            Self::Int64 => "INT64",
            Self::Float64 => "FLOAT64",
            Self::Timestamp => "TIMESTAMP",
            Self::Date => "DATE",
            Self::String => "STRING",
            Self::Bytes => "BYTES",
            Self::Array => "ARRAY",
            Self::Struct => "STRUCT",
            Self::Numeric => "NUMERIC",
            Self::Json => "JSON",
            Self::Proto => "PROTO",
            Self::Enum => "ENUM",
            Self::Float32 => "FLOAT32",
            Self::Interval => "INTERVAL",
            Self::Uuid => "UUID",
        };
        f.write_str(name)
    }
}

/// Dialect hints attached to a type code. PostgreSQL-dialect databases report
/// `jsonb` columns as `JSON` with the `PgJsonb` annotation.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(i32)]
pub enum TypeAnnotationCode {
    #[default]
    TypeAnnotationCodeUnspecified = 0,
    PgNumeric = 2,
    PgJsonb = 3,
    PgOid = 4,
}

/// The type of a single column (or of an array's elements).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StoreType {
    /// Raw wire value of the [`TypeCode`].
    pub code: i32,
    /// Present only when `code` is `ARRAY`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub array_element_type: Option<Box<StoreType>>,
    #[serde(default)]
    pub type_annotation: TypeAnnotationCode,
}

impl StoreType {
    pub fn new(code: TypeCode) -> Self {
        Self {
            code: code.wire(),
            array_element_type: None,
            type_annotation: TypeAnnotationCode::default(),
        }
    }

    pub fn array(element: StoreType) -> Self {
        Self {
            code: TypeCode::Array.wire(),
            array_element_type: Some(Box::new(element)),
            type_annotation: TypeAnnotationCode::default(),
        }
    }

    pub fn with_annotation(mut self, annotation: TypeAnnotationCode) -> Self {
        self.type_annotation = annotation;
        self
    }

    pub fn type_code(&self) -> Option<TypeCode> {
        TypeCode::from_wire(self.code)
    }
}

/// A named column in a table schema or a query result's field list.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub type_: StoreType,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, type_: StoreType) -> Self {
        Self {
            name: name.into(),
            type_,
        }
    }
}
