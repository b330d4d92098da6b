// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Typed configuration records.
//!
//! One module per configuration area:
//! - [`manifest`] - attribute manifests and attribute metadata
//! - [`rule`] - rules and actions
//! - [`instance`] - template instances
//! - [`handler`] - handlers and backend connections
//!
//! [`ConfigMessage`] is the kind-indexed sum over the six records, used by
//! the free-function entry points in [`crate::encoding`].

pub mod handler;
pub mod instance;
pub mod manifest;
pub mod rule;

pub use handler::{Connection, Handler};
pub use instance::Instance;
pub use manifest::{AttributeInfo, AttributeManifest, ValueType};
pub use rule::{Action, Rule};

use serde::{Serialize, Serializer};

use crate::core::Result;
use crate::encoding::codec::{DecodeOptions, Message};
use crate::encoding::json;
use crate::schema::MessageKind;

/// A decoded configuration message of any kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigMessage {
    /// Attribute manifest
    AttributeManifest(AttributeManifest),
    /// Rule
    Rule(Rule),
    /// Action
    Action(Action),
    /// Instance
    Instance(Instance),
    /// Handler
    Handler(Handler),
    /// Connection
    Connection(Connection),
}

impl ConfigMessage {
    /// The kind of this message.
    pub fn kind(&self) -> MessageKind {
        match self {
            ConfigMessage::AttributeManifest(_) => MessageKind::AttributeManifest,
            ConfigMessage::Rule(_) => MessageKind::Rule,
            ConfigMessage::Action(_) => MessageKind::Action,
            ConfigMessage::Instance(_) => MessageKind::Instance,
            ConfigMessage::Handler(_) => MessageKind::Handler,
            ConfigMessage::Connection(_) => MessageKind::Connection,
        }
    }

    /// Decode a message of the given kind from wire bytes.
    pub fn decode(kind: MessageKind, data: &[u8]) -> Result<ConfigMessage> {
        Self::decode_with(kind, data, &DecodeOptions::default())
    }

    /// Decode a message of the given kind from wire bytes.
    pub fn decode_with(
        kind: MessageKind,
        data: &[u8],
        opts: &DecodeOptions,
    ) -> Result<ConfigMessage> {
        Ok(match kind {
            MessageKind::AttributeManifest => {
                ConfigMessage::AttributeManifest(AttributeManifest::decode_with(data, opts)?)
            }
            MessageKind::Rule => ConfigMessage::Rule(Rule::decode_with(data, opts)?),
            MessageKind::Action => ConfigMessage::Action(Action::decode_with(data, opts)?),
            MessageKind::Instance => ConfigMessage::Instance(Instance::decode_with(data, opts)?),
            MessageKind::Handler => ConfigMessage::Handler(Handler::decode_with(data, opts)?),
            MessageKind::Connection => {
                ConfigMessage::Connection(Connection::decode_with(data, opts)?)
            }
        })
    }

    /// Encode this message to wire bytes.
    pub fn encode_to_vec(&self) -> Vec<u8> {
        match self {
            ConfigMessage::AttributeManifest(m) => m.encode_to_vec(),
            ConfigMessage::Rule(m) => m.encode_to_vec(),
            ConfigMessage::Action(m) => m.encode_to_vec(),
            ConfigMessage::Instance(m) => m.encode_to_vec(),
            ConfigMessage::Handler(m) => m.encode_to_vec(),
            ConfigMessage::Connection(m) => m.encode_to_vec(),
        }
    }

    /// Decode a message of the given kind from its JSON form.
    pub fn from_json(kind: MessageKind, data: &str) -> Result<ConfigMessage> {
        Ok(match kind {
            MessageKind::AttributeManifest => {
                ConfigMessage::AttributeManifest(json::from_json(data)?)
            }
            MessageKind::Rule => ConfigMessage::Rule(json::from_json(data)?),
            MessageKind::Action => ConfigMessage::Action(json::from_json(data)?),
            MessageKind::Instance => ConfigMessage::Instance(json::from_json(data)?),
            MessageKind::Handler => ConfigMessage::Handler(json::from_json(data)?),
            MessageKind::Connection => ConfigMessage::Connection(json::from_json(data)?),
        })
    }

    /// Encode this message to its JSON form.
    pub fn to_json(&self) -> Result<String> {
        json::to_json(self)
    }

    /// Encode this message to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        json::to_json_pretty(self)
    }
}

// Serialization delegates to the inner record; the kind is carried out of
// band, so deserialization goes through `from_json(kind, ...)`.
impl Serialize for ConfigMessage {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            ConfigMessage::AttributeManifest(m) => m.serialize(serializer),
            ConfigMessage::Rule(m) => m.serialize(serializer),
            ConfigMessage::Action(m) => m.serialize(serializer),
            ConfigMessage::Instance(m) => m.serialize(serializer),
            ConfigMessage::Handler(m) => m.serialize(serializer),
            ConfigMessage::Connection(m) => m.serialize(serializer),
        }
    }
}
