//! Store-native values: what query results contain and what the batch-write
//! primitive accepts.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use super::json::JsonObject;

/// A single value on the store side of the boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreValue {
    Null,
    Bool(bool),
    Int64(i64),
    Float64(f64),
    String(String),
    Bytes(Vec<u8>),
    /// Arbitrary-precision decimal.
    Numeric(Decimal),
    /// Nanosecond-precision instant.
    Timestamp(DateTime<Utc>),
    Date(NaiveDate),
    Json(JsonObject),
    Array(Vec<StoreValue>),
    Struct(Vec<(String, StoreValue)>),
}

impl StoreValue {
    pub fn is_null(&self) -> bool {
        matches!(self, StoreValue::Null)
    }
}
