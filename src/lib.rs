// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Policycodec
//!
//! Schema-driven codec library for policy configuration messages.
//!
//! The library implements the `istio.policy.v1beta1` configuration shapes
//! as strongly-typed records with hand-written codec pairs, organized by
//! concern:
//! - `core/` - error type and the structured parameter value tree
//! - `schema/` - static message descriptors and the process-wide registry
//! - `encoding/` - binary wire format and JSON form
//! - `model/` - the typed records (manifests, rules, instances, handlers)
//!
//! Decoding is strict about the fields it knows (truncation, bad varints,
//! and wrong wire types on known field numbers are errors) and open about
//! the fields it does not: unknown field numbers are preserved opaquely
//! and survive a decode/encode round trip, and unknown JSON keys are
//! ignored.
//!
//! ## Example: binary round trip
//!
//! ```rust
//! use policycodec::{Connection, Message};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let conn = Connection {
//!     address: "10.0.0.1:9091".to_string(),
//!     ..Default::default()
//! };
//! let bytes = conn.encode_to_vec();
//! assert_eq!(Connection::decode(&bytes)?, conn);
//! # Ok(())
//! # }
//! ```
//!
//! ## Example: kind-dispatched decoding
//!
//! ```rust
//! use policycodec::{decode_json, MessageKind};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let message = decode_json(
//!     MessageKind::Instance,
//!     r#"{"name":"i1","template":"listentry","params":{"value":"ok"}}"#,
//! )?;
//! let bytes = message.encode_to_vec();
//! assert_eq!(policycodec::decode(MessageKind::Instance, &bytes)?, message);
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

// Re-export core types for convenience
pub use crate::core::{ParamMap, ParamValue, Result, SchemaError};

// Schema metadata
pub mod schema;

pub use schema::{MessageKind, SchemaRegistry};

// Encoding/decoding
pub mod encoding;

pub use encoding::{
    decode, decode_as, decode_json, decode_with, encode, encode_as, encode_json, DecodeOptions,
    Encoding, Message,
};

// Typed records
pub mod model;

pub use model::{
    Action, AttributeInfo, AttributeManifest, ConfigMessage, Connection, Handler, Instance, Rule,
    ValueType,
};
