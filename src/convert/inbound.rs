// In: src/convert/inbound.rs

//! The Inbound Converter (table -> store).
//!
//! Works one cell at a time because the store's write primitive consumes
//! individual field values of a row. Every cast failure is surfaced as a
//! `Conversion` error carrying the offending value and the target tag; nothing
//! is replaced by a null or a default behind the caller's back.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use num_traits::ToPrimitive;
use rust_decimal::Decimal;

use crate::config::{ArrayNullPolicy, FrameConfig};
use crate::error::SpanframeError;
use crate::null_handling::is_table_null;
use crate::types::{ScalarTag, TypeTag};
use crate::value::{Cell, StoreValue};

//==================================================================================
// 1. Public API
//==================================================================================

/// Converts one table cell into the store-native value for `tag`, using the
/// default [`FrameConfig`].
pub fn convert_inbound(cell: Cell, tag: &TypeTag) -> Result<StoreValue, SpanframeError> {
    convert_inbound_with(cell, tag, &FrameConfig::default())
}

/// Converts one table cell into the store-native value for `tag`.
///
/// 1. Any table null form short-circuits to `StoreValue::Null`.
/// 2. `ARRAY_<E>` cells must be lists; each element is cast to `<E>`.
/// 3. Everything else goes through the scalar cast for the tag.
pub fn convert_inbound_with(
    cell: Cell,
    tag: &TypeTag,
    config: &FrameConfig,
) -> Result<StoreValue, SpanframeError> {
    if is_table_null(&cell) {
        return Ok(StoreValue::Null);
    }
    match tag {
        TypeTag::Array(element) => convert_array(cell, *element, config),
        TypeTag::Scalar(scalar) => cast_scalar(cell, *scalar, config),
    }
}

//==================================================================================
// 2. Array Handling
//==================================================================================

fn convert_array(
    cell: Cell,
    element: ScalarTag,
    config: &FrameConfig,
) -> Result<StoreValue, SpanframeError> {
    let items = match cell {
        Cell::List(items) => items,
        other => {
            return Err(SpanframeError::conversion(
                &other,
                TypeTag::Array(element),
                "expected a list",
            ))
        }
    };

    let mut converted = Vec::with_capacity(items.len());
    for (idx, item) in items.into_iter().enumerate() {
        if is_table_null(&item) {
            match config.array_null_policy {
                ArrayNullPolicy::Propagate => converted.push(StoreValue::Null),
                ArrayNullPolicy::Reject => {
                    return Err(SpanframeError::conversion(
                        &item,
                        element,
                        format!("null element at index {idx} is not allowed"),
                    ))
                }
            }
            continue;
        }
        let value = cast_scalar(item, element, config).map_err(|err| match err {
            SpanframeError::Conversion { value, tag, reason } => SpanframeError::Conversion {
                value,
                tag,
                reason: format!("array element {idx}: {reason}"),
            },
            other => other,
        })?;
        converted.push(value);
    }
    Ok(StoreValue::Array(converted))
}

//==================================================================================
// 3. Scalar Casts
//==================================================================================

fn cast_scalar(
    cell: Cell,
    tag: ScalarTag,
    config: &FrameConfig,
) -> Result<StoreValue, SpanframeError> {
    match tag {
        ScalarTag::Bool => cast_bool(cell),
        ScalarTag::Int64 => cast_int64(cell),
        ScalarTag::Float64 => cast_float64(cell),
        ScalarTag::String => cast_string(cell),
        ScalarTag::Bytes => match cell {
            Cell::Bytes(bytes) => Ok(StoreValue::Bytes(bytes)),
            other => Err(rejected(&other, tag)),
        },
        ScalarTag::Numeric => cast_numeric(cell),
        ScalarTag::Timestamp => cast_timestamp(cell),
        ScalarTag::Date => cast_date(cell),
        ScalarTag::Json | ScalarTag::Jsonb => cast_json(cell, tag, config),
        ScalarTag::Struct => Err(SpanframeError::UnknownType(
            "STRUCT values have no inbound conversion rule".to_string(),
        )),
    }
}

fn cast_bool(cell: Cell) -> Result<StoreValue, SpanframeError> {
    let value = match cell {
        Cell::Bool(b) => b,
        Cell::Int(i) => i != 0,
        Cell::UInt(u) => u != 0,
        Cell::Float(v) => v != 0.0,
        Cell::Decimal(d) => !d.is_zero(),
        other => return Err(rejected(&other, ScalarTag::Bool)),
    };
    Ok(StoreValue::Bool(value))
}

fn cast_int64(cell: Cell) -> Result<StoreValue, SpanframeError> {
    const TAG: ScalarTag = ScalarTag::Int64;
    let value = match cell {
        Cell::Int(i) => i,
        Cell::Bool(b) => i64::from(b),
        Cell::UInt(u) => i64::try_from(u)
            .map_err(|_| SpanframeError::conversion(u, TAG, "out of range for INT64"))?,
        Cell::Float(v) => {
            if !v.is_finite() || v.fract() != 0.0 {
                return Err(SpanframeError::conversion(v, TAG, "not an integral value"));
            }
            v.to_i64()
                .ok_or_else(|| SpanframeError::conversion(v, TAG, "out of range for INT64"))?
        }
        Cell::Decimal(d) => {
            if !d.fract().is_zero() {
                return Err(SpanframeError::conversion(d, TAG, "not an integral value"));
            }
            d.to_i64()
                .ok_or_else(|| SpanframeError::conversion(d, TAG, "out of range for INT64"))?
        }
        Cell::Str(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|e| SpanframeError::conversion(format!("{s:?}"), TAG, e.to_string()))?,
        other => return Err(rejected(&other, TAG)),
    };
    Ok(StoreValue::Int64(value))
}

fn cast_float64(cell: Cell) -> Result<StoreValue, SpanframeError> {
    const TAG: ScalarTag = ScalarTag::Float64;
    let value = match cell {
        Cell::Float(v) => v,
        Cell::Int(i) => i as f64,
        Cell::UInt(u) => u as f64,
        Cell::Bool(b) => f64::from(u8::from(b)),
        Cell::Decimal(d) => d
            .to_f64()
            .ok_or_else(|| SpanframeError::conversion(d, TAG, "not representable as FLOAT64"))?,
        Cell::Str(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| SpanframeError::conversion(format!("{s:?}"), TAG, e.to_string()))?,
        other => return Err(rejected(&other, TAG)),
    };
    Ok(StoreValue::Float64(value))
}

fn cast_string(cell: Cell) -> Result<StoreValue, SpanframeError> {
    let value = match cell {
        Cell::Str(s) => s,
        Cell::Bool(b) => b.to_string(),
        Cell::Int(i) => i.to_string(),
        Cell::UInt(u) => u.to_string(),
        Cell::Float(v) => v.to_string(),
        Cell::Decimal(d) => d.to_string(),
        Cell::Date(d) => d.to_string(),
        Cell::Timestamp(ts) => ts.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        Cell::Json(obj) => obj.serialize(),
        other => return Err(rejected(&other, ScalarTag::String)),
    };
    Ok(StoreValue::String(value))
}

fn cast_numeric(cell: Cell) -> Result<StoreValue, SpanframeError> {
    const TAG: ScalarTag = ScalarTag::Numeric;
    let value = match cell {
        Cell::Decimal(d) => d,
        Cell::Int(i) => Decimal::from(i),
        Cell::UInt(u) => Decimal::from(u),
        Cell::Float(v) => {
            Decimal::try_from(v).map_err(|e| SpanframeError::conversion(v, TAG, e.to_string()))?
        }
        Cell::Str(s) => Decimal::from_str_exact(s.trim())
            .map_err(|e| SpanframeError::conversion(format!("{s:?}"), TAG, e.to_string()))?,
        other => return Err(rejected(&other, TAG)),
    };
    Ok(StoreValue::Numeric(value))
}

fn cast_timestamp(cell: Cell) -> Result<StoreValue, SpanframeError> {
    match cell {
        Cell::Timestamp(ts) => Ok(StoreValue::Timestamp(ts)),
        Cell::Str(s) => DateTime::parse_from_rfc3339(s.trim())
            .map(|ts| StoreValue::Timestamp(ts.with_timezone(&Utc)))
            .map_err(|e| {
                SpanframeError::conversion(format!("{s:?}"), ScalarTag::Timestamp, e.to_string())
            }),
        other => Err(rejected(&other, ScalarTag::Timestamp)),
    }
}

fn cast_date(cell: Cell) -> Result<StoreValue, SpanframeError> {
    match cell {
        // A table timestamp is truncated to its UTC calendar date.
        Cell::Timestamp(ts) => Ok(StoreValue::Date(ts.date_naive())),
        Cell::Date(d) => Ok(StoreValue::Date(d)),
        Cell::Str(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(StoreValue::Date)
            .map_err(|e| SpanframeError::conversion(format!("{s:?}"), ScalarTag::Date, e.to_string())),
        other => Err(rejected(&other, ScalarTag::Date)),
    }
}

fn cast_json(cell: Cell, tag: ScalarTag, config: &FrameConfig) -> Result<StoreValue, SpanframeError> {
    match cell {
        Cell::Json(obj) => Ok(StoreValue::String(obj.serialize())),
        Cell::Str(s) => {
            if config.validate_json_text {
                serde_json::from_str::<serde_json::Value>(&s).map_err(|e| {
                    SpanframeError::conversion(format!("{s:?}"), tag, format!("malformed JSON: {e}"))
                })?;
            }
            Ok(StoreValue::String(s))
        }
        other => Err(rejected(&other, tag)),
    }
}

fn rejected(cell: &Cell, tag: ScalarTag) -> SpanframeError {
    SpanframeError::conversion(cell, tag, format!("{:?} cells cannot be cast", cell.kind()))
}

//==================================================================================
// 4. Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::JsonObject;
    use chrono::TimeZone;
    use serde_json::json;
    use std::str::FromStr;

    const ALL_TAGS: [TypeTag; 13] = [
        TypeTag::BOOL,
        TypeTag::INT64,
        TypeTag::FLOAT64,
        TypeTag::TIMESTAMP,
        TypeTag::DATE,
        TypeTag::STRING,
        TypeTag::BYTES,
        TypeTag::NUMERIC,
        TypeTag::JSON,
        TypeTag::JSONB,
        TypeTag::STRUCT,
        TypeTag::Array(ScalarTag::Int64),
        TypeTag::Array(ScalarTag::Json),
    ];

    #[test]
    fn test_every_null_sentinel_for_every_tag() {
        for tag in ALL_TAGS {
            for cell in [Cell::Missing, Cell::MissingTime, Cell::Float(f64::NAN), Cell::Absent] {
                assert_eq!(
                    convert_inbound(cell.clone(), &tag).unwrap(),
                    StoreValue::Null,
                    "{cell} as {tag}"
                );
            }
        }
    }

    #[test]
    fn test_scalar_casts() {
        assert_eq!(convert_inbound(Cell::Int(1), &TypeTag::BOOL).unwrap(), StoreValue::Bool(true));
        assert_eq!(convert_inbound(Cell::UInt(127), &TypeTag::INT64).unwrap(), StoreValue::Int64(127));
        assert_eq!(convert_inbound(Cell::Float(42.0), &TypeTag::INT64).unwrap(), StoreValue::Int64(42));
        assert_eq!(convert_inbound(Cell::Int(3), &TypeTag::FLOAT64).unwrap(), StoreValue::Float64(3.0));
        assert_eq!(
            convert_inbound(Cell::Int(5), &TypeTag::STRING).unwrap(),
            StoreValue::String("5".to_string())
        );
        assert_eq!(
            convert_inbound(Cell::Bytes(b"Ymlu".to_vec()), &TypeTag::BYTES).unwrap(),
            StoreValue::Bytes(b"Ymlu".to_vec())
        );
        assert_eq!(
            convert_inbound(Cell::from("0.123456789"), &TypeTag::NUMERIC).unwrap(),
            StoreValue::Numeric(Decimal::from_str("0.123456789").unwrap())
        );
    }

    #[test]
    fn test_date_truncates_timestamps() {
        let ts = Utc.with_ymd_and_hms(2011, 1, 17, 23, 59, 59).unwrap();
        assert_eq!(
            convert_inbound(Cell::Timestamp(ts), &TypeTag::DATE).unwrap(),
            StoreValue::Date(NaiveDate::from_ymd_opt(2011, 1, 17).unwrap())
        );
        let date = NaiveDate::from_ymd_opt(1989, 1, 17).unwrap();
        assert_eq!(convert_inbound(Cell::Date(date), &TypeTag::DATE).unwrap(), StoreValue::Date(date));
    }

    #[test]
    fn test_timestamp_text_is_parsed_to_utc() {
        let expected = Utc.with_ymd_and_hms(1995, 8, 31, 10, 0, 0).unwrap();
        assert_eq!(
            convert_inbound(Cell::from("1995-08-31T12:00:00+02:00"), &TypeTag::TIMESTAMP).unwrap(),
            StoreValue::Timestamp(expected)
        );
    }

    #[test]
    fn test_json_container_and_text() {
        let obj = JsonObject::new(json!({"sample_object": {"name": "Anamika", "id": 2635}}));
        assert_eq!(
            convert_inbound(Cell::Json(obj), &TypeTag::JSON).unwrap(),
            StoreValue::String(r#"{"sample_object":{"id":2635,"name":"Anamika"}}"#.to_string())
        );
        assert_eq!(
            convert_inbound(Cell::from("[1,2]"), &TypeTag::JSONB).unwrap(),
            StoreValue::String("[1,2]".to_string())
        );
    }

    #[test]
    fn test_malformed_json_text_is_rejected_unless_validation_is_off() {
        let err = convert_inbound(Cell::from("{oops"), &TypeTag::JSON).unwrap_err();
        assert!(matches!(err, SpanframeError::Conversion { ref tag, .. } if tag == "JSON"));

        let config = FrameConfig { validate_json_text: false, ..FrameConfig::default() };
        assert_eq!(
            convert_inbound_with(Cell::from("{oops"), &TypeTag::JSON, &config).unwrap(),
            StoreValue::String("{oops".to_string())
        );
    }

    #[test]
    fn test_json_rejects_other_kinds() {
        assert!(matches!(
            convert_inbound(Cell::Int(1), &TypeTag::JSON),
            Err(SpanframeError::Conversion { .. })
        ));
    }

    #[test]
    fn test_cast_failure_names_value_and_tag() {
        let err = convert_inbound(Cell::from("abc"), &TypeTag::INT64).unwrap_err();
        match err {
            SpanframeError::Conversion { value, tag, .. } => {
                assert_eq!(value, r#""abc""#);
                assert_eq!(tag, "INT64");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(convert_inbound(Cell::Float(2.5), &TypeTag::INT64).is_err());
        assert!(convert_inbound(Cell::UInt(u64::MAX), &TypeTag::INT64).is_err());
        assert!(convert_inbound(Cell::from("x"), &TypeTag::BYTES).is_err());
    }

    #[test]
    fn test_struct_has_no_inbound_rule() {
        let cell = Cell::Struct(vec![("a".to_string(), Cell::Int(1))]);
        assert!(matches!(
            convert_inbound(cell, &TypeTag::STRUCT),
            Err(SpanframeError::UnknownType(_))
        ));
    }

    #[test]
    fn test_array_preserves_order_and_nulls() {
        let cell = Cell::List(vec![Cell::Int(3), Cell::Missing, Cell::UInt(4), Cell::Absent]);
        assert_eq!(
            convert_inbound(cell, &TypeTag::Array(ScalarTag::Int64)).unwrap(),
            StoreValue::Array(vec![
                StoreValue::Int64(3),
                StoreValue::Null,
                StoreValue::Int64(4),
                StoreValue::Null,
            ])
        );
    }

    #[test]
    fn test_array_element_failure_is_surfaced() {
        let cell = Cell::List(vec![Cell::from("Student"), Cell::Bytes(vec![1])]);
        let err = convert_inbound(cell, &TypeTag::Array(ScalarTag::String)).unwrap_err();
        match err {
            SpanframeError::Conversion { tag, reason, .. } => {
                assert_eq!(tag, "STRING");
                assert!(reason.starts_with("array element 1"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_array_requires_a_list() {
        assert!(matches!(
            convert_inbound(Cell::Int(1), &TypeTag::Array(ScalarTag::Int64)),
            Err(SpanframeError::Conversion { ref tag, .. }) if tag == "ARRAY_INT64"
        ));
    }

    #[test]
    fn test_array_null_reject_policy() {
        let config =
            FrameConfig { array_null_policy: ArrayNullPolicy::Reject, ..FrameConfig::default() };
        let cell = Cell::List(vec![Cell::Bool(true), Cell::Absent]);
        assert!(convert_inbound_with(cell, &TypeTag::Array(ScalarTag::Bool), &config).is_err());
    }
}
