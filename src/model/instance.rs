// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Template instances.
//!
//! An [`Instance`] binds a template to typed parameters under a unique
//! name. The `compiled_template` field carries the output of an external
//! compilation step; its out-of-range field number marks it as reserved,
//! and the author-facing JSON form never requires it.

use serde::{Deserialize, Serialize};

use crate::core::{ParamMap, Result};
use crate::encoding::binary::params::{decode_struct, encode_struct};
use crate::encoding::binary::{UnknownFieldSet, WireCursor, WireType, WireWriter};
use crate::encoding::codec::{expect_wire, read_string_field, DecodeOptions, Message};
use crate::schema::{MessageDescriptor, COMPILED_FIELD_NUMBER, INSTANCE};

/// Template binding with typed parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Instance {
    /// Unique name of this instance
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Name of the template this instance is created from
    #[serde(skip_serializing_if = "String::is_empty")]
    pub template: String,

    /// Template-specific parameter tree
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<ParamMap>,

    /// Reserved: populated by an external compilation step
    #[serde(skip_serializing_if = "String::is_empty")]
    pub compiled_template: String,

    /// Fields from newer schema revisions, preserved opaquely
    #[serde(skip)]
    pub unknown_fields: UnknownFieldSet,
}

impl Message for Instance {
    fn descriptor() -> &'static MessageDescriptor {
        &INSTANCE
    }

    fn encode_fields(&self, w: &mut WireWriter) {
        w.write_string(1, &self.name);
        w.write_string(2, &self.template);
        if let Some(params) = &self.params {
            w.write_message(3, |pw| encode_struct(params, pw));
        }
        w.write_string(COMPILED_FIELD_NUMBER, &self.compiled_template);
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
                self.template = read_string_field(cursor, wire, Self::descriptor(), "template")?;
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
            COMPILED_FIELD_NUMBER => {
                self.compiled_template =
                    read_string_field(cursor, wire, Self::descriptor(), "compiled_template")?;
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
