//! The semi-structured value container.

use serde_json::Value;
use std::fmt;

/// A typed wrapper around nested JSON data.
///
/// Converters never look inside the container; they only call [`JsonObject::serialize`].
#[derive(Debug, Clone, PartialEq)]
pub struct JsonObject(Value);

impl JsonObject {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Parses text into a container.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text).map(Self)
    }

    pub fn value(&self) -> &Value {
        &self.0
    }

    pub fn into_inner(self) -> Value {
        self.0
    }

    /// The canonical text form: object keys sorted, no insignificant whitespace.
    ///
    /// `serde_json` keeps objects in a `BTreeMap` unless `preserve_order` is
    /// enabled, which this crate never does, so compact output is already sorted.
    pub fn serialize(&self) -> String {
        self.0.to_string()
    }
}

impl From<Value> for JsonObject {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl fmt::Display for JsonObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JsonObject({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialize_is_sorted_and_compact() {
        let obj = JsonObject::new(json!({"b": [1, 2], "a": {"z": null, "y": true}}));
        assert_eq!(obj.serialize(), r#"{"a":{"y":true,"z":null},"b":[1,2]}"#);
    }

    #[test]
    fn test_parse_then_serialize() {
        let obj = JsonObject::parse(r#"{ "sample_int" : 872163 }"#).unwrap();
        assert_eq!(obj.serialize(), r#"{"sample_int":872163}"#);
        assert!(JsonObject::parse("{not json").is_err());
    }
}
