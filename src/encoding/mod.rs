// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Encoding/decoding entry points.
//!
//! Two forms are supported:
//! - **Binary** - the length-prefixed tag/varint wire format, in [`binary`]
//! - **JSON** - the human-authored form, in [`json`]
//!
//! The free functions here dispatch on [`MessageKind`] and return the
//! [`ConfigMessage`] sum type; typed entry points live on the records
//! themselves via the [`Message`] trait.

use std::str::FromStr;

use crate::core::{Result, SchemaError};
use crate::model::ConfigMessage;
use crate::schema::MessageKind;

pub mod binary;
pub mod codec;
pub mod json;

pub use codec::{DecodeOptions, Message};

/// Encoding format identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// Binary wire format
    Binary,
    /// JSON text format
    Json,
}

impl Encoding {
    /// Check if this is the binary wire format.
    pub fn is_binary(&self) -> bool {
        matches!(self, Encoding::Binary)
    }

    /// Check if this is the JSON form.
    pub fn is_json(&self) -> bool {
        matches!(self, Encoding::Json)
    }
}

impl FromStr for Encoding {
    type Err = SchemaError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "binary" | "wire" | "pb" | "proto" => Ok(Encoding::Binary),
            "json" => Ok(Encoding::Json),
            other => Err(SchemaError::unsupported(format!("encoding: {other}"))),
        }
    }
}

impl std::fmt::Display for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Encoding::Binary => write!(f, "binary"),
            Encoding::Json => write!(f, "json"),
        }
    }
}

/// Decode a configuration message of the given kind from wire bytes.
pub fn decode(kind: MessageKind, data: &[u8]) -> Result<ConfigMessage> {
    decode_with(kind, data, &DecodeOptions::default())
}

/// Decode a configuration message of the given kind from wire bytes.
pub fn decode_with(
    kind: MessageKind,
    data: &[u8],
    opts: &DecodeOptions,
) -> Result<ConfigMessage> {
    tracing::debug!(kind = %kind, len = data.len(), "decoding configuration message");
    ConfigMessage::decode_with(kind, data, opts)
}

/// Encode a configuration message to wire bytes.
pub fn encode(message: &ConfigMessage) -> Vec<u8> {
    message.encode_to_vec()
}

/// Decode a configuration message of the given kind from its JSON form.
pub fn decode_json(kind: MessageKind, data: &str) -> Result<ConfigMessage> {
    tracing::debug!(kind = %kind, len = data.len(), "decoding configuration message from JSON");
    ConfigMessage::from_json(kind, data)
}

/// Encode a configuration message to its JSON form.
pub fn encode_json(message: &ConfigMessage) -> Result<String> {
    json::to_json(message)
}

/// Decode from either supported encoding.
pub fn decode_as(kind: MessageKind, encoding: Encoding, data: &[u8]) -> Result<ConfigMessage> {
    match encoding {
        Encoding::Binary => decode(kind, data),
        Encoding::Json => {
            let text = std::str::from_utf8(data)
                .map_err(|e| SchemaError::json(format!("input is not UTF-8: {e}")))?;
            decode_json(kind, text)
        }
    }
}

/// Encode to either supported encoding.
pub fn encode_as(message: &ConfigMessage, encoding: Encoding) -> Result<Vec<u8>> {
    match encoding {
        Encoding::Binary => Ok(encode(message)),
        Encoding::Json => Ok(encode_json(message)?.into_bytes()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_from_str() {
        assert_eq!("binary".parse::<Encoding>().unwrap(), Encoding::Binary);
        assert_eq!("PB".parse::<Encoding>().unwrap(), Encoding::Binary);
        assert_eq!("json".parse::<Encoding>().unwrap(), Encoding::Json);
        assert!("yaml".parse::<Encoding>().is_err());
    }

    #[test]
    fn test_encoding_display() {
        assert_eq!(Encoding::Binary.to_string(), "binary");
        assert_eq!(Encoding::Json.to_string(), "json");
    }

    #[test]
    fn test_encoding_predicates() {
        assert!(Encoding::Binary.is_binary());
        assert!(!Encoding::Binary.is_json());
        assert!(Encoding::Json.is_json());
    }

    #[test]
    fn test_decode_as_round_trip_both_encodings() {
        let message = decode_json(
            MessageKind::Connection,
            r#"{"address":"10.0.0.1:9091"}"#,
        )
        .unwrap();

        for encoding in [Encoding::Binary, Encoding::Json] {
            let bytes = encode_as(&message, encoding).unwrap();
            let decoded = decode_as(MessageKind::Connection, encoding, &bytes).unwrap();
            assert_eq!(decoded, message);
        }
    }

    #[test]
    fn test_decode_as_json_rejects_non_utf8() {
        let err = decode_as(MessageKind::Connection, Encoding::Json, &[0xFF, 0xFE]).unwrap_err();
        assert!(matches!(err, SchemaError::Json { .. }));
    }
}
