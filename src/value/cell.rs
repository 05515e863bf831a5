//! Table-side cell values.
//!
//! A `Cell` is what one slot of a frame holds once it has been read out of its
//! column. Three of its variants are null sentinels with different origins:
//! `Missing` comes from the null slot of a non-temporal Arrow column,
//! `MissingTime` from the null slot of a temporal one, and `Absent` from an
//! object column. A NaN float is the fourth null form.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rust_decimal::Decimal;
use std::fmt;

use super::json::JsonObject;
use super::store_value::StoreValue;

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Generic missing-value sentinel.
    Missing,
    /// Date/time-specific missing-value sentinel.
    MissingTime,
    /// Language-level absence.
    Absent,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    Decimal(Decimal),
    Timestamp(DateTime<Utc>),
    Date(NaiveDate),
    Json(JsonObject),
    List(Vec<Cell>),
    Struct(Vec<(String, Cell)>),
}

/// The runtime kind of a [`Cell`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    Missing,
    MissingTime,
    Absent,
    Bool,
    Int,
    UInt,
    Float,
    Str,
    Bytes,
    Decimal,
    Timestamp,
    Date,
    Json,
    List,
    Struct,
}

impl Cell {
    pub fn kind(&self) -> CellKind {
        match self {
            Cell::Missing => CellKind::Missing,
            Cell::MissingTime => CellKind::MissingTime,
            Cell::Absent => CellKind::Absent,
            Cell::Bool(_) => CellKind::Bool,
            Cell::Int(_) => CellKind::Int,
            Cell::UInt(_) => CellKind::UInt,
            Cell::Float(_) => CellKind::Float,
            Cell::Str(_) => CellKind::Str,
            Cell::Bytes(_) => CellKind::Bytes,
            Cell::Decimal(_) => CellKind::Decimal,
            Cell::Timestamp(_) => CellKind::Timestamp,
            Cell::Date(_) => CellKind::Date,
            Cell::Json(_) => CellKind::Json,
            Cell::List(_) => CellKind::List,
            Cell::Struct(_) => CellKind::Struct,
        }
    }
}

/// Passthrough mapping used for object columns on the read path. Store nulls
/// stay explicit as `Absent`.
impl From<StoreValue> for Cell {
    fn from(value: StoreValue) -> Self {
        match value {
            StoreValue::Null => Cell::Absent,
            StoreValue::Bool(b) => Cell::Bool(b),
            StoreValue::Int64(i) => Cell::Int(i),
            StoreValue::Float64(f) => Cell::Float(f),
            StoreValue::String(s) => Cell::Str(s),
            StoreValue::Bytes(b) => Cell::Bytes(b),
            StoreValue::Numeric(d) => Cell::Decimal(d),
            StoreValue::Timestamp(ts) => Cell::Timestamp(ts),
            StoreValue::Date(d) => Cell::Date(d),
            StoreValue::Json(obj) => Cell::Json(obj),
            StoreValue::Array(items) => Cell::List(items.into_iter().map(Cell::from).collect()),
            StoreValue::Struct(fields) => Cell::Struct(
                fields
                    .into_iter()
                    .map(|(name, value)| (name, Cell::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Cell::Bool(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Int(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Float(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Str(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Str(value)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map_or(Cell::Absent, Into::into)
    }
}

/// Renders a cell for error messages.
impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Missing => f.write_str("<missing>"),
            Cell::MissingTime => f.write_str("<missing time>"),
            Cell::Absent => f.write_str("<absent>"),
            Cell::Bool(b) => write!(f, "{b}"),
            Cell::Int(i) => write!(f, "{i}"),
            Cell::UInt(u) => write!(f, "{u}"),
            Cell::Float(v) => write!(f, "{v}"),
            Cell::Str(s) => write!(f, "{s:?}"),
            Cell::Bytes(b) => write!(f, "bytes[{}]", b.len()),
            Cell::Decimal(d) => write!(f, "{d}"),
            Cell::Timestamp(ts) => f.write_str(&ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Cell::Date(d) => write!(f, "{d}"),
            Cell::Json(obj) => write!(f, "{obj}"),
            Cell::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Cell::Struct(fields) => {
                f.write_str("{")?;
                for (i, (name, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{name}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_null_becomes_absent_in_nested_values() {
        let value = StoreValue::Array(vec![StoreValue::Int64(3), StoreValue::Null]);
        assert_eq!(Cell::from(value), Cell::List(vec![Cell::Int(3), Cell::Absent]));
    }

    #[test]
    fn test_display_renders_lists() {
        let cell = Cell::List(vec![Cell::from("a"), Cell::Missing, Cell::Int(7)]);
        assert_eq!(cell.to_string(), r#"["a", <missing>, 7]"#);
    }

    #[test]
    fn test_option_into_cell() {
        assert_eq!(Cell::from(None::<i64>), Cell::Absent);
        assert_eq!(Cell::from(Some(2.5)), Cell::Float(2.5));
    }
}
