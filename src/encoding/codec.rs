// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Codec trait and the generic decode loop.
//!
//! Each typed record in [`crate::model`] implements [`Message`] by listing
//! its field emissions (`encode_fields`) and its tag dispatch
//! (`merge_field`). The shared machinery here walks the wire stream,
//! routes known field numbers to the record, preserves unknown field
//! numbers opaquely, and rejects deprecated group markers.

use super::binary::cursor::{WireCursor, WireType};
use super::binary::unknown::{UnknownFieldSet, UnknownValue};
use super::binary::writer::WireWriter;
use crate::core::{Result, SchemaError};
use crate::schema::MessageDescriptor;

/// Options controlling decode behavior.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecodeOptions {
    /// Reject wire-level duplicate map keys instead of keeping the last
    /// value seen.
    pub strict_maps: bool,
}

impl DecodeOptions {
    /// Options with strict map-key checking enabled.
    pub fn strict() -> Self {
        Self { strict_maps: true }
    }
}

/// A wire-codable configuration message.
///
/// Implementations provide per-field encode and merge logic; the provided
/// methods supply the buffer-level entry points. `decode(encode(m)) == m`
/// holds for every well-formed value, including preserved unknown fields.
pub trait Message: Default {
    /// Static descriptor for this message shape.
    fn descriptor() -> &'static MessageDescriptor
    where
        Self: Sized;

    /// Emit all known fields, then preserved unknown fields.
    fn encode_fields(&self, w: &mut WireWriter);

    /// Merge one field into `self`. Returns `Ok(false)` when the field
    /// number is not part of the schema, leaving the cursor untouched so
    /// the caller can preserve the payload.
    fn merge_field(
        &mut self,
        number: u32,
        wire: WireType,
        cursor: &mut WireCursor<'_>,
        opts: &DecodeOptions,
    ) -> Result<bool>;

    /// Preserved unknown fields.
    fn unknown_fields(&self) -> &UnknownFieldSet;

    /// Mutable access to preserved unknown fields.
    fn unknown_fields_mut(&mut self) -> &mut UnknownFieldSet;

    /// Encode to a byte vector.
    fn encode_to_vec(&self) -> Vec<u8> {
        let mut w = WireWriter::new();
        self.encode_fields(&mut w);
        w.into_bytes()
    }

    /// Decode from bytes with default options.
    fn decode(data: &[u8]) -> Result<Self>
    where
        Self: Sized,
    {
        Self::decode_with(data, &DecodeOptions::default())
    }

    /// Decode from bytes.
    fn decode_with(data: &[u8], opts: &DecodeOptions) -> Result<Self>
    where
        Self: Sized,
    {
        let mut cursor = WireCursor::new(data);
        let mut message = Self::default();
        message.merge(&mut cursor, opts)?;
        Ok(message)
    }

    /// Merge all remaining fields from the cursor into `self`.
    fn merge(&mut self, cursor: &mut WireCursor<'_>, opts: &DecodeOptions) -> Result<()>
    where
        Self: Sized,
    {
        while !cursor.is_at_end() {
            let (number, wire) = cursor.read_tag()?;
            if matches!(wire, WireType::StartGroup | WireType::EndGroup) {
                return Err(SchemaError::unsupported("group wire type (deprecated)"));
            }
            if !self.merge_field(number, wire, cursor, opts)? {
                let value = UnknownValue::read_from(cursor, wire)?;
                self.unknown_fields_mut().push(number, value);
            }
        }
        Ok(())
    }
}

/// Check the wire type of a known field, erroring on mismatch.
pub fn expect_wire(
    desc: &MessageDescriptor,
    field: &'static str,
    expected: WireType,
    actual: WireType,
) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(SchemaError::wire_type_mismatch(
            desc.full_name,
            field,
            expected.name(),
            actual.name(),
        ))
    }
}

/// Read a string field payload, validating the wire type and UTF-8.
pub fn read_string_field(
    cursor: &mut WireCursor<'_>,
    wire: WireType,
    desc: &MessageDescriptor,
    field: &'static str,
) -> Result<String> {
    expect_wire(desc, field, WireType::LengthDelimited, wire)?;
    let bytes = cursor.read_bytes()?;
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|e| SchemaError::field_decode(desc.full_name, field, format!("invalid UTF-8: {e}")))
}

/// Read an enum field payload as its raw number.
pub fn read_enum_field(
    cursor: &mut WireCursor<'_>,
    wire: WireType,
    desc: &MessageDescriptor,
    field: &'static str,
) -> Result<i32> {
    expect_wire(desc, field, WireType::Varint, wire)?;
    Ok(cursor.read_varint()? as i32)
}

/// Read an embedded message field payload.
pub fn read_message_field<M: Message>(
    cursor: &mut WireCursor<'_>,
    wire: WireType,
    desc: &MessageDescriptor,
    field: &'static str,
    opts: &DecodeOptions,
) -> Result<M> {
    expect_wire(desc, field, WireType::LengthDelimited, wire)?;
    let bytes = cursor.read_bytes()?;
    M::decode_with(bytes, opts)
}
