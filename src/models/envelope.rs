//! The uniform result wrapper returned by every tool.

use serde::Serialize;
use serde_json::{Map, Value};

/// Success envelope: `{"status": "ok", "data": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    /// Always `"ok"`; failures are reported as errors, not envelopes.
    pub status: &'static str,

    /// The API response body, or `{}` when there is nothing to return.
    pub data: Value,
}

impl Envelope {
    /// Wraps response data. Empty or false-like data (`null`, `false`,
    /// `0`, `""`, `[]`) becomes `{}`.
    pub fn ok(data: Value) -> Self {
        let data = if is_blank(&data) {
            Value::Object(Map::new())
        } else {
            data
        };
        Self { status: "ok", data }
    }

    /// An envelope with empty data, for calls whose response body is discarded.
    pub fn empty() -> Self {
        Self::ok(Value::Null)
    }

    /// Renders the envelope as pretty-printed JSON.
    pub fn to_json_string(&self) -> String {
        // A `Value` always serializes.
        serde_json::to_string_pretty(self)
            .unwrap_or_else(|_| String::from(r#"{"status": "ok", "data": {}}"#))
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ok_keeps_data() {
        let envelope = Envelope::ok(json!({"id": 10010}));
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({"status": "ok", "data": {"id": 10010}})
        );
    }

    #[test]
    fn test_null_data_becomes_empty_object() {
        assert_eq!(Envelope::ok(Value::Null).data, json!({}));
        assert_eq!(Envelope::empty(), Envelope::ok(json!({})));
    }

    #[test]
    fn test_false_like_data_becomes_empty_object() {
        for data in [json!(false), json!(0), json!(0.0), json!(""), json!([])] {
            assert_eq!(Envelope::ok(data).data, json!({}));
        }
        assert_eq!(Envelope::ok(json!([1])).data, json!([1]));
        assert_eq!(Envelope::ok(json!(true)).data, json!(true));
    }

    #[test]
    fn test_to_json_string_round_trips() {
        let text = Envelope::ok(json!({"departments": []})).to_json_string();
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, json!({"status": "ok", "data": {"departments": []}}));
    }
}
