// In: src/convert/outbound.rs

//! The Outbound Converter (store -> table).
//!
//! Vectorized: a whole column of store values is turned into one frame column.
//! Tags with a native Arrow dtype are built through the matching Arrow builder;
//! everything else (BYTES, NUMERIC, STRUCT and every `ARRAY_<E>`) lands in an
//! object column untouched, with store nulls kept as `Cell::Absent`.

#[cfg(feature = "frame")]
use arrow::array::{
    ArrayRef, BooleanBuilder, Float64Builder, Int64Builder, StringBuilder,
    TimestampNanosecondBuilder,
};
#[cfg(feature = "frame")]
use std::sync::Arc;

use crate::config::FrameConfig;
use crate::error::SpanframeError;
use crate::frame::Column;
use crate::types::{ScalarTag, TypeTag};
use crate::value::{Cell, StoreValue};

/// The timezone every outbound timestamp column is zoned at.
pub const UTC_ZONE: &str = "UTC";

//==================================================================================
// 1. Public API
//==================================================================================

/// Converts one column of store values into a frame column, using the default
/// [`FrameConfig`].
pub fn convert_outbound(values: Vec<StoreValue>, tag: &TypeTag) -> Result<Column, SpanframeError> {
    convert_outbound_with(values, tag, &FrameConfig::default())
}

/// Converts one column of store values into a frame column.
///
/// The output always has exactly `values.len()` rows, in input order.
///
/// # Errors
/// * `Conversion` if a value does not fit the tag, or a timestamp cannot be
///   expressed in nanoseconds since the epoch.
/// * `MissingDependency` if the tag needs an Arrow dtype and the crate was
///   built without the `frame` feature.
pub fn convert_outbound_with(
    values: Vec<StoreValue>,
    tag: &TypeTag,
    config: &FrameConfig,
) -> Result<Column, SpanframeError> {
    match tag {
        TypeTag::Array(_)
        | TypeTag::Scalar(ScalarTag::Bytes)
        | TypeTag::Scalar(ScalarTag::Numeric)
        | TypeTag::Scalar(ScalarTag::Struct) => Ok(object_column(values)),
        TypeTag::Scalar(scalar) => vectorized_column(values, *scalar, config),
    }
}

/// Tags whose outbound column is backed by an Arrow array rather than cells.
pub fn is_vectorized(tag: &TypeTag) -> bool {
    !matches!(
        tag,
        TypeTag::Array(_)
            | TypeTag::Scalar(ScalarTag::Bytes)
            | TypeTag::Scalar(ScalarTag::Numeric)
            | TypeTag::Scalar(ScalarTag::Struct)
    )
}

fn object_column(values: Vec<StoreValue>) -> Column {
    Column::Object(values.into_iter().map(Cell::from).collect())
}

//==================================================================================
// 2. Vectorized Builders
//==================================================================================

#[cfg(not(feature = "frame"))]
fn vectorized_column(
    _values: Vec<StoreValue>,
    _tag: ScalarTag,
    _config: &FrameConfig,
) -> Result<Column, SpanframeError> {
    Err(SpanframeError::missing_frame_support())
}

#[cfg(feature = "frame")]
fn vectorized_column(
    values: Vec<StoreValue>,
    tag: ScalarTag,
    config: &FrameConfig,
) -> Result<Column, SpanframeError> {
    let array: ArrayRef = match tag {
        ScalarTag::Bool => {
            let mut builder = BooleanBuilder::with_capacity(values.len());
            for value in &values {
                match value {
                    StoreValue::Null => builder.append_null(),
                    StoreValue::Bool(b) => builder.append_value(*b),
                    other => return Err(mismatch(other, tag)),
                }
            }
            Arc::new(builder.finish())
        }
        ScalarTag::Int64 => {
            let mut builder = Int64Builder::with_capacity(values.len());
            for value in &values {
                match value {
                    StoreValue::Null => builder.append_null(),
                    StoreValue::Int64(i) => builder.append_value(*i),
                    other => return Err(mismatch(other, tag)),
                }
            }
            Arc::new(builder.finish())
        }
        ScalarTag::Float64 => {
            let mut builder = Float64Builder::with_capacity(values.len());
            for value in &values {
                match value {
                    StoreValue::Null => builder.append_null(),
                    StoreValue::Float64(v) if v.is_nan() && config.float_nan_as_missing => {
                        builder.append_null()
                    }
                    StoreValue::Float64(v) => builder.append_value(*v),
                    other => return Err(mismatch(other, tag)),
                }
            }
            Arc::new(builder.finish())
        }
        ScalarTag::Timestamp | ScalarTag::Date => {
            let mut builder = TimestampNanosecondBuilder::with_capacity(values.len());
            for value in &values {
                match value {
                    StoreValue::Null => builder.append_null(),
                    other => builder.append_value(epoch_nanos(other, tag)?),
                }
            }
            Arc::new(builder.finish().with_timezone(UTC_ZONE))
        }
        ScalarTag::String => {
            let mut builder = StringBuilder::with_capacity(values.len(), values.len() * 8);
            for value in &values {
                match value {
                    StoreValue::Null => builder.append_null(),
                    StoreValue::String(s) => builder.append_value(s),
                    other => return Err(mismatch(other, tag)),
                }
            }
            Arc::new(builder.finish())
        }
        ScalarTag::Json | ScalarTag::Jsonb => {
            let mut builder = StringBuilder::with_capacity(values.len(), values.len() * 16);
            for value in &values {
                match value {
                    StoreValue::Null => builder.append_null(),
                    StoreValue::Json(obj) => builder.append_value(obj.serialize()),
                    StoreValue::String(s) => builder.append_value(s),
                    other => return Err(mismatch(other, tag)),
                }
            }
            Arc::new(builder.finish())
        }
        ScalarTag::Bytes | ScalarTag::Numeric | ScalarTag::Struct => {
            return Ok(object_column(values))
        }
    };
    Ok(Column::Arrow(array))
}

/// Nanoseconds since the Unix epoch; dates are taken at midnight UTC.
#[cfg(feature = "frame")]
fn epoch_nanos(value: &StoreValue, tag: ScalarTag) -> Result<i64, SpanframeError> {
    let instant = match (tag, value) {
        (ScalarTag::Timestamp, StoreValue::Timestamp(ts)) => *ts,
        (ScalarTag::Date, StoreValue::Date(d)) => d.and_time(chrono::NaiveTime::default()).and_utc(),
        (_, other) => return Err(mismatch(other, tag)),
    };
    instant.timestamp_nanos_opt().ok_or_else(|| {
        SpanframeError::conversion(
            format!("{value:?}"),
            tag,
            "outside the range of nanosecond timestamps",
        )
    })
}

#[cfg(feature = "frame")]
fn mismatch(value: &StoreValue, tag: ScalarTag) -> SpanframeError {
    SpanframeError::conversion(
        format!("{value:?}"),
        tag,
        "store value does not match the column type",
    )
}
