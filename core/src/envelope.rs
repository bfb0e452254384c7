//! The status envelope every NGB endpoint wraps its answer in.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ApiError;

/// Status value the server uses for a successful call.
pub const STATUS_OK: &str = "OK";

/// One JSON object out of a payload list.
pub type Record = Map<String, Value>;

/// A validated response: `status` is always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

impl Envelope {
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }

    pub fn into_payload(self) -> Option<Value> {
        self.payload
    }

    /// The payload as a list of records. An absent or `null` payload is an
    /// empty list; anything that is not an array of objects is rejected.
    pub fn records(&self) -> Result<Vec<&Record>, ApiError> {
        let items = match &self.payload {
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(ApiError::Protocol(format!(
                    "expected a list of records in payload, got {}",
                    kind_of(other)
                )))
            }
        };
        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                item.as_object().ok_or_else(|| {
                    ApiError::Protocol(format!(
                        "payload item {i} is {}, not a record",
                        kind_of(item)
                    ))
                })
            })
            .collect()
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(payload: Option<Value>) -> Envelope {
        Envelope {
            status: STATUS_OK.to_string(),
            message: None,
            payload,
        }
    }

    #[test]
    fn deserializes_without_optional_fields() {
        let env: Envelope = serde_json::from_str(r#"{"status":"OK"}"#).unwrap();
        assert!(env.is_ok());
        assert!(env.message.is_none());
        assert!(env.payload.is_none());
    }

    #[test]
    fn non_ok_status_is_not_ok() {
        let env: Envelope =
            serde_json::from_str(r#"{"status":"ERROR","message":"boom"}"#).unwrap();
        assert!(!env.is_ok());
        assert_eq!(env.message.as_deref(), Some("boom"));
    }

    #[test]
    fn records_of_missing_payload_is_empty() {
        assert!(envelope(None).records().unwrap().is_empty());
        assert!(envelope(Some(Value::Null)).records().unwrap().is_empty());
    }

    #[test]
    fn records_returns_objects_in_order() {
        let env = envelope(Some(json!([{"id": 1}, {"id": 2}])));
        let records = env.records().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["id"], 2);
    }

    #[test]
    fn records_rejects_scalar_payload() {
        let err = envelope(Some(json!(42))).records().unwrap_err();
        assert!(matches!(err, ApiError::Protocol(ref m) if m.contains("a number")));
    }

    #[test]
    fn records_rejects_non_object_items() {
        let err = envelope(Some(json!([{"id": 1}, "chr2"]))).records().unwrap_err();
        assert!(matches!(err, ApiError::Protocol(ref m) if m.contains("item 1")));
    }

    #[test]
    fn serialization_skips_absent_fields() {
        let json = serde_json::to_value(envelope(Some(json!([])))).unwrap();
        assert_eq!(json, json!({"status": "OK", "payload": []}));
    }
}
