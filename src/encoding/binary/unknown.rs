// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Opaque preservation of unrecognized fields.
//!
//! Field numbers not present in a message's schema are kept verbatim
//! through a decode, and re-emitted after the known fields on encode, so
//! configuration written by a newer schema revision survives a round trip
//! through this codec unchanged.

use super::cursor::{WireCursor, WireType};
use super::writer::WireWriter;
use crate::core::Result;

/// Payload of an unrecognized field, typed by its wire type.
#[derive(Debug, Clone, PartialEq)]
pub enum UnknownValue {
    /// Varint payload
    Varint(u64),
    /// 8-byte payload
    Fixed64(u64),
    /// Length-prefixed payload
    LengthDelimited(Vec<u8>),
    /// 4-byte payload
    Fixed32(u32),
}

impl UnknownValue {
    /// Read the payload for a field of the given wire type.
    ///
    /// Group wire types are rejected before this is called; they have no
    /// self-contained payload to capture.
    pub fn read_from(cursor: &mut WireCursor<'_>, wire: WireType) -> Result<UnknownValue> {
        match wire {
            WireType::Varint => Ok(UnknownValue::Varint(cursor.read_varint()?)),
            WireType::Fixed64 => Ok(UnknownValue::Fixed64(cursor.read_fixed64()?)),
            WireType::LengthDelimited => {
                Ok(UnknownValue::LengthDelimited(cursor.read_bytes()?.to_vec()))
            }
            WireType::Fixed32 => Ok(UnknownValue::Fixed32(cursor.read_fixed32()?)),
            WireType::StartGroup | WireType::EndGroup => Err(
                crate::core::SchemaError::unsupported("group wire type (deprecated)"),
            ),
        }
    }

    /// Wire type this payload re-emits as.
    pub fn wire_type(&self) -> WireType {
        match self {
            UnknownValue::Varint(_) => WireType::Varint,
            UnknownValue::Fixed64(_) => WireType::Fixed64,
            UnknownValue::LengthDelimited(_) => WireType::LengthDelimited,
            UnknownValue::Fixed32(_) => WireType::Fixed32,
        }
    }
}

/// A single preserved field.
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownField {
    /// Field number
    pub number: u32,
    /// Raw payload
    pub value: UnknownValue,
}

/// Ordered set of preserved fields, in arrival order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnknownFieldSet {
    fields: Vec<UnknownField>,
}

impl UnknownFieldSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if no fields have been preserved.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of preserved fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Preserve a field.
    pub fn push(&mut self, number: u32, value: UnknownValue) {
        self.fields.push(UnknownField { number, value });
    }

    /// Iterate over preserved fields in arrival order.
    pub fn iter(&self) -> impl Iterator<Item = &UnknownField> {
        self.fields.iter()
    }

    /// Re-emit all preserved fields.
    pub fn encode(&self, w: &mut WireWriter) {
        for field in &self.fields {
            match &field.value {
                UnknownValue::Varint(v) => {
                    w.write_tag(field.number, WireType::Varint);
                    w.write_varint(*v);
                }
                UnknownValue::Fixed64(v) => {
                    w.write_tag(field.number, WireType::Fixed64);
                    w.write_fixed64(*v);
                }
                UnknownValue::LengthDelimited(bytes) => {
                    w.write_length_delimited(field.number, bytes);
                }
                UnknownValue::Fixed32(v) => {
                    w.write_tag(field.number, WireType::Fixed32);
                    w.write_fixed32(*v);
                }
            }
        }
    }
}
