// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Rules and actions.
//!
//! A [`Rule`] pairs a match expression with the ordered [`Action`]s to take
//! when it holds. Actions reference handlers and instances by name; those
//! references are resolved by the consuming policy engine, not validated
//! here.

use serde::{Deserialize, Serialize};

use crate::core::Result;
use crate::encoding::binary::{UnknownFieldSet, WireCursor, WireType, WireWriter};
use crate::encoding::codec::{read_message_field, read_string_field, DecodeOptions, Message};
use crate::schema::{MessageDescriptor, ACTION, RULE};

/// A handler invocation with the instances to hand it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Action {
    /// Name of the handler to invoke
    #[serde(skip_serializing_if = "String::is_empty")]
    pub handler: String,

    /// Names of the instances to pass to the handler, in order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub instances: Vec<String>,

    /// Fields from newer schema revisions, preserved opaquely
    #[serde(skip)]
    pub unknown_fields: UnknownFieldSet,
}

impl Message for Action {
    fn descriptor() -> &'static MessageDescriptor {
        &ACTION
    }

    fn encode_fields(&self, w: &mut WireWriter) {
        w.write_string(2, &self.handler);
        for instance in &self.instances {
            // Repeated elements keep their place even at the default value
            w.write_length_delimited(3, instance.as_bytes());
        }
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
                self.handler = read_string_field(cursor, wire, Self::descriptor(), "handler")?;
                Ok(true)
            }
            3 => {
                self.instances.push(read_string_field(
                    cursor,
                    wire,
                    Self::descriptor(),
                    "instances",
                )?);
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

/// Match expression plus the actions to take when it holds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rule {
    /// Match expression over attributes; an empty expression matches
    /// everything
    #[serde(skip_serializing_if = "String::is_empty")]
    pub r#match: String,

    /// Actions to take, in order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<Action>,

    /// Fields from newer schema revisions, preserved opaquely
    #[serde(skip)]
    pub unknown_fields: UnknownFieldSet,
}

impl Message for Rule {
    fn descriptor() -> &'static MessageDescriptor {
        &RULE
    }

    fn encode_fields(&self, w: &mut WireWriter) {
        w.write_string(1, &self.r#match);
        for action in &self.actions {
            w.write_message(2, |aw| action.encode_fields(aw));
        }
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
                self.r#match = read_string_field(cursor, wire, Self::descriptor(), "match")?;
                Ok(true)
            }
            2 => {
                let action: Action =
                    read_message_field(cursor, wire, Self::descriptor(), "actions", opts)?;
                self.actions.push(action);
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
