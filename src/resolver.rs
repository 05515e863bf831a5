// In: src/resolver.rs

//! The Type Tag Resolver.
//!
//! Derives the canonical [`TypeTag`] of every column from the store's schema
//! metadata, exactly once per schema. Everything downstream (both converters and
//! the batch orchestrator) works off the resulting [`ColumnMetadata`].

use hashbrown::HashMap;

use crate::error::SpanframeError;
use crate::types::{ColumnDescriptor, ScalarTag, StoreType, TypeAnnotationCode, TypeCode, TypeTag};

/// Ordered, name-unique mapping from column name to tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMetadata {
    columns: Vec<(String, TypeTag)>,
    index: HashMap<String, usize>,
}

impl ColumnMetadata {
    /// The tag for `name`, if the schema has such a column.
    pub fn tag(&self, name: &str) -> Option<TypeTag> {
        self.index.get(name).map(|&idx| self.columns[idx].1)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, TypeTag)> {
        self.columns.iter().map(|(name, tag)| (name.as_str(), *tag))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Resolves an ordered schema into its [`ColumnMetadata`].
///
/// # Errors
/// * `UnknownType` for a code with no conversion rule, an `ARRAY` without an
///   element type, or an array whose elements are themselves arrays.
/// * `SchemaMismatch` if two columns share a name.
pub fn resolve_column_metadata(
    schema: &[ColumnDescriptor],
) -> Result<ColumnMetadata, SpanframeError> {
    let mut columns = Vec::with_capacity(schema.len());
    let mut index = HashMap::with_capacity(schema.len());

    for column in schema {
        let tag = resolve_type_tag(&column.type_).map_err(|err| match err {
            SpanframeError::UnknownType(msg) => {
                SpanframeError::UnknownType(format!("column '{}': {msg}", column.name))
            }
            other => other,
        })?;
        log::debug!("resolved column '{}' -> {}", column.name, tag);

        if index.insert(column.name.clone(), columns.len()).is_some() {
            return Err(SpanframeError::SchemaMismatch(format!(
                "duplicate column name '{}'",
                column.name
            )));
        }
        columns.push((column.name.clone(), tag));
    }

    Ok(ColumnMetadata { columns, index })
}

/// Resolves a single column type.
pub fn resolve_type_tag(store_type: &StoreType) -> Result<TypeTag, SpanframeError> {
    match code_of(store_type)? {
        TypeCode::Array => {
            let element = store_type.array_element_type.as_deref().ok_or_else(|| {
                SpanframeError::UnknownType("ARRAY type without an element type".to_string())
            })?;
            if code_of(element)? == TypeCode::Array {
                return Err(SpanframeError::UnknownType(
                    "arrays of arrays have no conversion rule".to_string(),
                ));
            }
            Ok(TypeTag::Array(resolve_scalar_tag(element)?))
        }
        _ => Ok(TypeTag::Scalar(resolve_scalar_tag(store_type)?)),
    }
}

fn resolve_scalar_tag(store_type: &StoreType) -> Result<ScalarTag, SpanframeError> {
    let code = code_of(store_type)?;
    let tag = match code {
        TypeCode::Bool => ScalarTag::Bool,
        TypeCode::Int64 => ScalarTag::Int64,
        TypeCode::Float64 => ScalarTag::Float64,
        TypeCode::Timestamp => ScalarTag::Timestamp,
        TypeCode::Date => ScalarTag::Date,
        TypeCode::String => ScalarTag::String,
        TypeCode::Bytes => ScalarTag::Bytes,
        TypeCode::Numeric => ScalarTag::Numeric,
        TypeCode::Json => match store_type.type_annotation {
            TypeAnnotationCode::PgJsonb => ScalarTag::Jsonb,
            _ => ScalarTag::Json,
        },
        TypeCode::Struct => ScalarTag::Struct,
        TypeCode::TypeCodeUnspecified
        | TypeCode::Array
        | TypeCode::Proto
        | TypeCode::Enum
        | TypeCode::Float32
        | TypeCode::Interval
        | TypeCode::Uuid => {
            return Err(SpanframeError::UnknownType(format!(
                "type code {code} has no conversion rule"
            )))
        }
    };
    Ok(tag)
}

fn code_of(store_type: &StoreType) -> Result<TypeCode, SpanframeError> {
    store_type.type_code().ok_or_else(|| {
        SpanframeError::UnknownType(format!("unrecognized type code {}", store_type.code))
    })
}
