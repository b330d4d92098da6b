// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Wire writer for emitting tag/varint binary data.
//!
//! Field helpers follow the schema's default-elision rule: scalar fields at
//! their default value (empty string, zero enum) are not emitted. Nested
//! messages and map entries are emitted by the caller through
//! [`WireWriter::write_message`], which length-prefixes a sub-writer.

use super::cursor::WireType;

/// Append-only writer producing wire-encoded bytes.
#[derive(Default)]
pub struct WireWriter {
    buf: Vec<u8>,
}

impl WireWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Consume the writer and return the encoded bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Check if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Write a raw varint.
    pub fn write_varint(&mut self, mut value: u64) {
        while value >= 0x80 {
            self.buf.push((value & 0x7F) as u8 | 0x80);
            value >>= 7;
        }
        self.buf.push(value as u8);
    }

    /// Write a field tag.
    pub fn write_tag(&mut self, number: u32, wire: WireType) {
        self.write_varint(((number as u64) << 3) | wire.bits());
    }

    /// Write a raw 8-byte little-endian value.
    pub fn write_fixed64(&mut self, value: u64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Write a raw 4-byte little-endian value.
    pub fn write_fixed32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Write a length-prefixed payload field. Always emits, even when the
    /// payload is empty (repeated elements and map entry keys must survive
    /// round trips at their default values).
    pub fn write_length_delimited(&mut self, number: u32, payload: &[u8]) {
        self.write_tag(number, WireType::LengthDelimited);
        self.write_varint(payload.len() as u64);
        self.buf.extend_from_slice(payload);
    }

    /// Write a singular string field, eliding the default (empty) value.
    pub fn write_string(&mut self, number: u32, value: &str) {
        if !value.is_empty() {
            self.write_length_delimited(number, value.as_bytes());
        }
    }

    /// Write a singular enum field, eliding the default (zero) value.
    /// Negative numbers use the full 10-byte varint form.
    pub fn write_enum(&mut self, number: u32, value: i32) {
        if value != 0 {
            self.write_tag(number, WireType::Varint);
            self.write_varint(value as i64 as u64);
        }
    }

    /// Write a nested message field: the closure fills a sub-writer whose
    /// output is length-prefixed into this one.
    pub fn write_message<F: FnOnce(&mut WireWriter)>(&mut self, number: u32, body: F) {
        let mut nested = WireWriter::new();
        body(&mut nested);
        self.write_length_delimited(number, &nested.buf);
    }
}
