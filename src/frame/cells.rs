// In: src/frame/cells.rs

//! Reading single cells out of Arrow arrays.
//!
//! Null slots become the sentinel the dtype naturally carries: temporal columns
//! yield `MissingTime`, binary, decimal and list columns (which behave like
//! object columns) yield `Absent`, everything else yields `Missing`.

use arrow::array::{AnyDictionaryArray, Array, AsArray};
use arrow::datatypes::*;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::error::SpanframeError;
use crate::value::Cell;

/// Days between 0001-01-01 (CE day 1) and the Unix epoch.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

pub(crate) fn array_cell(array: &dyn Array, row: usize) -> Result<Cell, SpanframeError> {
    if row >= array.len() {
        return Err(SpanframeError::LengthMismatch {
            column: format!("<{}>", array.data_type()),
            expected: row + 1,
            found: array.len(),
        });
    }
    if array.is_null(row) {
        return Ok(null_sentinel(array.data_type()));
    }

    macro_rules! int_cell {
        ($T:ty) => {
            Cell::Int(i64::from(array.as_primitive::<$T>().value(row)))
        };
    }
    macro_rules! uint_cell {
        ($T:ty) => {
            Cell::UInt(u64::from(array.as_primitive::<$T>().value(row)))
        };
    }

    let cell = match array.data_type() {
        // Every slot of a Null array is null, but it carries no validity buffer.
        DataType::Null => Cell::Missing,
        DataType::Boolean => Cell::Bool(array.as_boolean().value(row)),
        DataType::Int8 => int_cell!(Int8Type),
        DataType::Int16 => int_cell!(Int16Type),
        DataType::Int32 => int_cell!(Int32Type),
        DataType::Int64 => int_cell!(Int64Type),
        DataType::UInt8 => uint_cell!(UInt8Type),
        DataType::UInt16 => uint_cell!(UInt16Type),
        DataType::UInt32 => uint_cell!(UInt32Type),
        DataType::UInt64 => uint_cell!(UInt64Type),
        DataType::Float16 => Cell::Float(array.as_primitive::<Float16Type>().value(row).to_f64()),
        DataType::Float32 => Cell::Float(f64::from(array.as_primitive::<Float32Type>().value(row))),
        DataType::Float64 => Cell::Float(array.as_primitive::<Float64Type>().value(row)),
        DataType::Utf8 => Cell::Str(array.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Cell::Str(array.as_string::<i64>().value(row).to_string()),
        DataType::Binary => Cell::Bytes(array.as_binary::<i32>().value(row).to_vec()),
        DataType::LargeBinary => Cell::Bytes(array.as_binary::<i64>().value(row).to_vec()),
        DataType::Date32 => {
            let days = array.as_primitive::<Date32Type>().value(row);
            Cell::Date(date_from_epoch_days(days)?)
        }
        DataType::Date64 => {
            let millis = array.as_primitive::<Date64Type>().value(row);
            Cell::Date(timestamp_from_parts(millis, TimeUnit::Millisecond)?.date_naive())
        }
        DataType::Timestamp(unit, _) => {
            let raw = match unit {
                TimeUnit::Second => array.as_primitive::<TimestampSecondType>().value(row),
                TimeUnit::Millisecond => array.as_primitive::<TimestampMillisecondType>().value(row),
                TimeUnit::Microsecond => array.as_primitive::<TimestampMicrosecondType>().value(row),
                TimeUnit::Nanosecond => array.as_primitive::<TimestampNanosecondType>().value(row),
            };
            Cell::Timestamp(timestamp_from_parts(raw, *unit)?)
        }
        DataType::Decimal128(_, scale) => {
            let raw = array.as_primitive::<Decimal128Type>().value(row);
            Cell::Decimal(decimal_from_i128(raw, *scale)?)
        }
        DataType::List(_) => {
            let values = array.as_list::<i32>().value(row);
            Cell::List(list_cells(values.as_ref())?)
        }
        DataType::LargeList(_) => {
            let values = array.as_list::<i64>().value(row);
            Cell::List(list_cells(values.as_ref())?)
        }
        DataType::Dictionary(_, _) => {
            let dictionary = array.as_any_dictionary();
            let key = match array_cell(dictionary.keys(), row)? {
                Cell::Int(k) => usize::try_from(k).ok(),
                Cell::UInt(k) => usize::try_from(k).ok(),
                _ => None,
            };
            let key = key.ok_or_else(|| {
                SpanframeError::conversion(row, array.data_type(), "invalid dictionary key")
            })?;
            array_cell(dictionary.values().as_ref(), key)?
        }
        other => {
            return Err(SpanframeError::UnknownType(format!(
                "frame dtype {other} has no cell mapping"
            )))
        }
    };
    Ok(cell)
}

fn null_sentinel(data_type: &DataType) -> Cell {
    match data_type {
        DataType::Timestamp(_, _) | DataType::Date32 | DataType::Date64 => Cell::MissingTime,
        DataType::Binary
        | DataType::LargeBinary
        | DataType::Decimal128(_, _)
        | DataType::List(_)
        | DataType::LargeList(_) => Cell::Absent,
        DataType::Dictionary(_, values) => null_sentinel(values),
        _ => Cell::Missing,
    }
}

fn list_cells(values: &dyn Array) -> Result<Vec<Cell>, SpanframeError> {
    (0..values.len()).map(|idx| array_cell(values, idx)).collect()
}

fn date_from_epoch_days(days: i32) -> Result<NaiveDate, SpanframeError> {
    days.checked_add(UNIX_EPOCH_DAYS_FROM_CE)
        .and_then(NaiveDate::from_num_days_from_ce_opt)
        .ok_or_else(|| {
            SpanframeError::conversion(days, "DATE", "days since epoch out of calendar range")
        })
}

fn timestamp_from_parts(raw: i64, unit: TimeUnit) -> Result<DateTime<Utc>, SpanframeError> {
    let ts = match unit {
        TimeUnit::Second => DateTime::from_timestamp(raw, 0),
        TimeUnit::Millisecond => DateTime::from_timestamp_millis(raw),
        TimeUnit::Microsecond => DateTime::from_timestamp_micros(raw),
        TimeUnit::Nanosecond => Some(DateTime::from_timestamp_nanos(raw)),
    };
    ts.ok_or_else(|| SpanframeError::conversion(raw, "TIMESTAMP", format!("out of range for {unit:?}")))
}

fn decimal_from_i128(raw: i128, scale: i8) -> Result<Decimal, SpanframeError> {
    if scale < 0 {
        return Err(SpanframeError::conversion(
            raw,
            "NUMERIC",
            format!("negative decimal scale {scale} is not supported"),
        ));
    }
    Decimal::try_from_i128_with_scale(raw, scale as u32)
        .map_err(|e| SpanframeError::conversion(raw, "NUMERIC", e.to_string()))
}
