// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! JSON form of the configuration messages.
//!
//! The JSON form is the human-authored representation: field names are
//! snake_case, reserved compiler-populated fields are omitted when empty,
//! and unrecognized keys are ignored on decode (open-world schema
//! evolution).

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::core::Result;

/// Encode a message to compact JSON.
pub fn to_json<T: Serialize>(message: &T) -> Result<String> {
    Ok(serde_json::to_string(message)?)
}

/// Encode a message to pretty-printed JSON.
pub fn to_json_pretty<T: Serialize>(message: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(message)?)
}

/// Decode a message from a JSON string. Unknown keys are ignored.
pub fn from_json<T: DeserializeOwned>(json: &str) -> Result<T> {
    Ok(serde_json::from_str(json)?)
}

/// Decode a message from JSON bytes. Unknown keys are ignored.
pub fn from_json_slice<T: DeserializeOwned>(data: &[u8]) -> Result<T> {
    Ok(serde_json::from_slice(data)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Connection;

    #[test]
    fn test_to_json_and_back() {
        let conn = Connection {
            address: "10.0.0.1:9091".to_string(),
            ..Default::default()
        };
        let json = to_json(&conn).unwrap();
        assert_eq!(json, r#"{"address":"10.0.0.1:9091"}"#);

        let decoded: Connection = from_json(&json).unwrap();
        assert_eq!(decoded, conn);
    }

    #[test]
    fn test_from_json_ignores_unknown_keys() {
        let decoded: Connection =
            from_json(r#"{"address":"a:1","foo":"bar"}"#).unwrap();
        assert_eq!(decoded.address, "a:1");
    }

    #[test]
    fn test_from_json_malformed_input() {
        let err = from_json::<Connection>("{oops").unwrap_err();
        assert!(matches!(err, crate::core::SchemaError::Json { .. }));
    }

    #[test]
    fn test_to_json_pretty_is_multiline() {
        let conn = Connection {
            address: "a:1".to_string(),
            ..Default::default()
        };
        let json = to_json_pretty(&conn).unwrap();
        assert!(json.contains('\n'));
    }
}
