// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Handlers and connections.
//!
//! A [`Handler`] binds an adapter to typed parameters under a unique name,
//! optionally carrying a [`Connection`] to an out-of-process backend. The
//! `compiled_adapter` field mirrors `compiled_template` on instances: an
//! external compilation step fills it in, never the configuration author.

use serde::{Deserialize, Serialize};

use crate::core::{ParamMap, Result};
use crate::encoding::binary::params::{decode_struct, encode_struct};
use crate::encoding::binary::{UnknownFieldSet, WireCursor, WireType, WireWriter};
use crate::encoding::codec::{
    expect_wire, read_message_field, read_string_field, DecodeOptions, Message,
};
use crate::schema::{MessageDescriptor, COMPILED_FIELD_NUMBER, CONNECTION, HANDLER};

/// Address of an out-of-process backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Connection {
    /// Backend address, typically host:port
    #[serde(skip_serializing_if = "String::is_empty")]
    pub address: String,

    /// Fields from newer schema revisions, preserved opaquely
    #[serde(skip)]
    pub unknown_fields: UnknownFieldSet,
}

impl Message for Connection {
    fn descriptor() -> &'static MessageDescriptor {
        &CONNECTION
    }

    fn encode_fields(&self, w: &mut WireWriter) {
        // Address is field 2; field 1 is reserved in the schema
        w.write_string(2, &self.address);
        self.unknown_fields.encode(w);
    }

    fn merge_field(
        &mut self,
        number: u32,
        wire: WireType,
        cursor: &mut WireCursor<'_>,
        _opts: &DecodeOptions,
    ) -> Result<bool> {
        match number {
            2 => {
                self.address = read_string_field(cursor, wire, Self::descriptor(), "address")?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn unknown_fields(&self) -> &UnknownFieldSet {
        &self.unknown_fields
    }

    fn unknown_fields_mut(&mut self) -> &mut UnknownFieldSet {
        &mut self.unknown_fields
    }
}

/// Adapter binding with typed parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Handler {
    /// Unique name of this handler
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Name of the adapter this handler is created from
    #[serde(skip_serializing_if = "String::is_empty")]
    pub adapter: String,

    /// Adapter-specific parameter tree
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<ParamMap>,

    /// Connection to the adapter backend, for out-of-process adapters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection: Option<Connection>,

    /// Reserved: populated by an external compilation step
    #[serde(skip_serializing_if = "String::is_empty")]
    pub compiled_adapter: String,

    /// Fields from newer schema revisions, preserved opaquely
    #[serde(skip)]
    pub unknown_fields: UnknownFieldSet,
}

impl Message for Handler {
    fn descriptor() -> &'static MessageDescriptor {
        &HANDLER
    }

    fn encode_fields(&self, w: &mut WireWriter) {
        w.write_string(1, &self.name);
        w.write_string(2, &self.adapter);
        if let Some(params) = &self.params {
            w.write_message(3, |pw| encode_struct(params, pw));
        }
        if let Some(connection) = &self.connection {
            w.write_message(4, |cw| connection.encode_fields(cw));
        }
        w.write_string(COMPILED_FIELD_NUMBER, &self.compiled_adapter);
        self.unknown_fields.encode(w);
    }

    fn merge_field(
        &mut self,
        number: u32,
        wire: WireType,
        cursor: &mut WireCursor<'_>,
        opts: &DecodeOptions,
    ) -> Result<bool> {
        match number {
            1 => {
                self.name = read_string_field(cursor, wire, Self::descriptor(), "name")?;
                Ok(true)
            }
            2 => {
                self.adapter = read_string_field(cursor, wire, Self::descriptor(), "adapter")?;
                Ok(true)
            }
            3 => {
                expect_wire(
                    Self::descriptor(),
                    "params",
                    WireType::LengthDelimited,
                    wire,
                )?;
                let bytes = cursor.read_bytes()?;
                self.params = Some(decode_struct(
                    bytes,
                    opts,
                    (Self::descriptor().full_name, "params"),
                )?);
                Ok(true)
            }
            4 => {
                let connection: Connection =
                    read_message_field(cursor, wire, Self::descriptor(), "connection", opts)?;
                self.connection = Some(connection);
                Ok(true)
            }
            COMPILED_FIELD_NUMBER => {
                self.compiled_adapter =
                    read_string_field(cursor, wire, Self::descriptor(), "compiled_adapter")?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn unknown_fields(&self) -> &UnknownFieldSet {
        &self.unknown_fields
    }

    fn unknown_fields_mut(&mut self) -> &mut UnknownFieldSet {
        &mut self.unknown_fields
    }
}
