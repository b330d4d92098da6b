// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error type for policycodec.
//!
//! All decode and encode failures surface as [`SchemaError`]:
//! - Malformed wire data (truncation, varint overflow)
//! - Type mismatches on known fields
//! - Strict-mode map violations
//! - JSON form errors

use std::fmt;

/// Errors that can occur while encoding or decoding configuration messages.
#[derive(Debug, Clone)]
pub enum SchemaError {
    /// Buffer too short for requested read
    BufferTooShort {
        /// Requested bytes
        requested: usize,
        /// Available bytes
        available: usize,
        /// Cursor position when error occurred
        position: usize,
    },

    /// Varint ran past 64 bits
    VarintOverflow {
        /// Cursor position when error occurred
        position: usize,
    },

    /// A known field number arrived with the wrong wire type
    WireTypeMismatch {
        /// Message full name
        message: String,
        /// Field name
        field: String,
        /// Expected wire type
        expected: String,
        /// Actual wire type
        actual: String,
    },

    /// Field payload could not be decoded (e.g. invalid UTF-8)
    FieldDecode {
        /// Message full name
        message: String,
        /// Field name
        field: String,
        /// Underlying cause
        cause: String,
    },

    /// Duplicate map key rejected in strict mode
    DuplicateMapKey {
        /// Message full name
        message: String,
        /// Map field name
        field: String,
        /// The duplicated key
        key: String,
    },

    /// Unsupported wire construct
    Unsupported {
        /// What is not supported
        feature: String,
    },

    /// Message kind not present in the schema registry
    KindNotFound {
        /// Kind name that was not found
        name: String,
    },

    /// JSON form error (parse or serialize)
    Json {
        /// Error message from the JSON layer
        message: String,
    },
}

impl SchemaError {
    /// Create a buffer too short error.
    pub fn buffer_too_short(requested: usize, available: usize, position: usize) -> Self {
        SchemaError::BufferTooShort {
            requested,
            available,
            position,
        }
    }

    /// Create a varint overflow error.
    pub fn varint_overflow(position: usize) -> Self {
        SchemaError::VarintOverflow { position }
    }

    /// Create a wire type mismatch error.
    pub fn wire_type_mismatch(
        message: impl Into<String>,
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        SchemaError::WireTypeMismatch {
            message: message.into(),
            field: field.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a field decode error.
    pub fn field_decode(
        message: impl Into<String>,
        field: impl Into<String>,
        cause: impl Into<String>,
    ) -> Self {
        SchemaError::FieldDecode {
            message: message.into(),
            field: field.into(),
            cause: cause.into(),
        }
    }

    /// Create a duplicate map key error.
    pub fn duplicate_map_key(
        message: impl Into<String>,
        field: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        SchemaError::DuplicateMapKey {
            message: message.into(),
            field: field.into(),
            key: key.into(),
        }
    }

    /// Create an unsupported feature error.
    pub fn unsupported(feature: impl Into<String>) -> Self {
        SchemaError::Unsupported {
            feature: feature.into(),
        }
    }

    /// Create a "kind not found" error.
    pub fn kind_not_found(name: impl Into<String>) -> Self {
        SchemaError::KindNotFound { name: name.into() }
    }

    /// Create a JSON form error.
    pub fn json(message: impl Into<String>) -> Self {
        SchemaError::Json {
            message: message.into(),
        }
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            SchemaError::BufferTooShort {
                requested,
                available,
                position,
            } => vec![
                ("requested", requested.to_string()),
                ("available", available.to_string()),
                ("position", position.to_string()),
            ],
            SchemaError::VarintOverflow { position } => {
                vec![("position", position.to_string())]
            }
            SchemaError::WireTypeMismatch {
                message,
                field,
                expected,
                actual,
            } => vec![
                ("message", message.clone()),
                ("field", field.clone()),
                ("expected", expected.clone()),
                ("actual", actual.clone()),
            ],
            SchemaError::FieldDecode {
                message,
                field,
                cause,
            } => vec![
                ("message", message.clone()),
                ("field", field.clone()),
                ("cause", cause.clone()),
            ],
            SchemaError::DuplicateMapKey {
                message,
                field,
                key,
            } => vec![
                ("message", message.clone()),
                ("field", field.clone()),
                ("key", key.clone()),
            ],
            SchemaError::Unsupported { feature } => vec![("feature", feature.clone())],
            SchemaError::KindNotFound { name } => vec![("kind", name.clone())],
            SchemaError::Json { message } => vec![("message", message.clone())],
        }
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::BufferTooShort {
                requested,
                available,
                position,
            } => write!(
                f,
                "Buffer too short: requested {requested} bytes at position {position}, but only {available} bytes available"
            ),
            SchemaError::VarintOverflow { position } => {
                write!(f, "Varint overflow at position {position}")
            }
            SchemaError::WireTypeMismatch {
                message,
                field,
                expected,
                actual,
            } => write!(
                f,
                "Wire type mismatch for {message}.{field}: expected {expected}, got {actual}"
            ),
            SchemaError::FieldDecode {
                message,
                field,
                cause,
            } => write!(f, "Failed to decode {message}.{field}: {cause}"),
            SchemaError::DuplicateMapKey {
                message,
                field,
                key,
            } => write!(f, "Duplicate map key '{key}' in {message}.{field}"),
            SchemaError::Unsupported { feature } => {
                write!(f, "Unsupported feature: '{feature}'")
            }
            SchemaError::KindNotFound { name } => {
                write!(f, "Message kind not found: '{name}'")
            }
            SchemaError::Json { message } => write!(f, "JSON error: {message}"),
        }
    }
}

impl std::error::Error for SchemaError {}

impl From<serde_json::Error> for SchemaError {
    fn from(err: serde_json::Error) -> Self {
        SchemaError::Json {
            message: err.to_string(),
        }
    }
}

/// Result type for policycodec operations.
pub type Result<T> = std::result::Result<T, SchemaError>;
