//! Serde helpers for JSON-server payloads
//!
//! json-server hands out numeric ids for records created without one and
//! keeps string ids as given, so ids are accepted in both forms.

use serde::{Deserialize, Deserializer};
use serde_json::Value as JsonValue;

/// Deserialize an id that can be a number or a string
pub fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let value: JsonValue = Deserialize::deserialize(deserializer)?;
    match value {
        JsonValue::Number(n) => Ok(n.to_string()),
        JsonValue::String(s) => Ok(s),
        _ => Err(D::Error::custom("expected number or string for id")),
    }
}

/// Deserialize an optional id that can be a number or a string
pub fn deserialize_optional_id<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let value: Option<JsonValue> = Option::deserialize(deserializer)?;
    match value {
        Some(JsonValue::Number(n)) => Ok(Some(n.to_string())),
        Some(JsonValue::String(s)) => Ok(Some(s)),
        Some(JsonValue::Null) | None => Ok(None),
        _ => Err(D::Error::custom("expected number or string for id")),
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Record {
        #[serde(deserialize_with = "super::deserialize_id")]
        id: String,
        #[serde(default, deserialize_with = "super::deserialize_optional_id")]
        owner: Option<String>,
    }

    #[test]
    fn test_numeric_and_string_ids() {
        let a: Record = serde_json::from_str(r#"{"id": 7}"#).unwrap();
        assert_eq!(a.id, "7");
        assert_eq!(a.owner, None);

        let b: Record = serde_json::from_str(r#"{"id": "abc", "owner": 3}"#).unwrap();
        assert_eq!(b.id, "abc");
        assert_eq!(b.owner.as_deref(), Some("3"));
    }

    #[test]
    fn test_rejects_object_id() {
        let result: Result<Record, _> = serde_json::from_str(r#"{"id": {}}"#);
        assert!(result.is_err());
    }
}
