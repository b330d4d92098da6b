// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Wire codec pair for the structured parameter tree.
//!
//! Follows the generic structured-value field layout: an object is a
//! message whose `fields` entries (field 1) carry key/value pairs; a value
//! is a one-of over null (1), number (2), string (3), bool (4), nested
//! object (5), and list (6); a list is a message with repeated `values`
//! (field 1). Unknown field numbers inside these external shapes are
//! skipped: the tree has no slot to carry them.

use super::cursor::{WireCursor, WireType};
use super::unknown::UnknownValue;
use super::writer::WireWriter;
use crate::core::{ParamMap, ParamValue, Result, SchemaError};
use crate::encoding::codec::DecodeOptions;

const STRUCT_FIELDS: u32 = 1;

const ENTRY_KEY: u32 = 1;
const ENTRY_VALUE: u32 = 2;

const VALUE_NULL: u32 = 1;
const VALUE_NUMBER: u32 = 2;
const VALUE_STRING: u32 = 3;
const VALUE_BOOL: u32 = 4;
const VALUE_STRUCT: u32 = 5;
const VALUE_LIST: u32 = 6;

const LIST_VALUES: u32 = 1;

/// Emit an object's entries into `w`. The caller length-prefixes the whole
/// object as a message field.
pub fn encode_struct(map: &ParamMap, w: &mut WireWriter) {
    for (key, value) in map {
        w.write_message(STRUCT_FIELDS, |entry| {
            entry.write_length_delimited(ENTRY_KEY, key.as_bytes());
            entry.write_message(ENTRY_VALUE, |vw| encode_value(value, vw));
        });
    }
}

/// Decode an object from its message payload.
///
/// `context` names the owning message and field for diagnostics, e.g.
/// `("istio.policy.v1beta1.Handler", "params")`.
pub fn decode_struct(
    data: &[u8],
    opts: &DecodeOptions,
    context: (&str, &str),
) -> Result<ParamMap> {
    let mut cursor = WireCursor::new(data);
    let mut map = ParamMap::new();

    while !cursor.is_at_end() {
        let (number, wire) = cursor.read_tag()?;
        if number == STRUCT_FIELDS {
            if wire != WireType::LengthDelimited {
                return Err(SchemaError::wire_type_mismatch(
                    context.0,
                    context.1,
                    WireType::LengthDelimited.name(),
                    wire.name(),
                ));
            }
            let entry = cursor.read_bytes()?;
            let (key, value) = decode_entry(entry, opts, context)?;
            if map.contains_key(&key) {
                if opts.strict_maps {
                    return Err(SchemaError::duplicate_map_key(context.0, context.1, key));
                }
                tracing::warn!(
                    message = context.0,
                    field = context.1,
                    key = %key,
                    "duplicate object key, keeping last value"
                );
            }
            map.insert(key, value);
        } else {
            UnknownValue::read_from(&mut cursor, wire)?;
        }
    }

    Ok(map)
}

fn decode_entry(
    data: &[u8],
    opts: &DecodeOptions,
    context: (&str, &str),
) -> Result<(String, ParamValue)> {
    let mut cursor = WireCursor::new(data);
    let mut key = String::new();
    let mut value = ParamValue::Null;

    while !cursor.is_at_end() {
        let (number, wire) = cursor.read_tag()?;
        match number {
            ENTRY_KEY => {
                expect_value_wire(wire, WireType::LengthDelimited, context)?;
                let bytes = cursor.read_bytes()?;
                key = std::str::from_utf8(bytes)
                    .map(str::to_string)
                    .map_err(|e| {
                        SchemaError::field_decode(
                            context.0,
                            context.1,
                            format!("invalid UTF-8 in object key: {e}"),
                        )
                    })?;
            }
            ENTRY_VALUE => {
                expect_value_wire(wire, WireType::LengthDelimited, context)?;
                value = decode_value(cursor.read_bytes()?, opts, context)?;
            }
            _ => {
                UnknownValue::read_from(&mut cursor, wire)?;
            }
        }
    }

    Ok((key, value))
}

fn encode_value(value: &ParamValue, w: &mut WireWriter) {
    match value {
        // One-of members always emit their tag, even at the default value;
        // the tag itself selects the kind.
        ParamValue::Null => {
            w.write_tag(VALUE_NULL, WireType::Varint);
            w.write_varint(0);
        }
        ParamValue::Number(n) => {
            w.write_tag(VALUE_NUMBER, WireType::Fixed64);
            w.write_fixed64(n.to_bits());
        }
        ParamValue::String(s) => {
            w.write_length_delimited(VALUE_STRING, s.as_bytes());
        }
        ParamValue::Bool(b) => {
            w.write_tag(VALUE_BOOL, WireType::Varint);
            w.write_varint(*b as u64);
        }
        ParamValue::Object(map) => {
            w.write_message(VALUE_STRUCT, |nested| encode_struct(map, nested));
        }
        ParamValue::List(items) => {
            w.write_message(VALUE_LIST, |list| {
                for item in items {
                    list.write_message(LIST_VALUES, |vw| encode_value(item, vw));
                }
            });
        }
    }
}

fn decode_value(data: &[u8], opts: &DecodeOptions, context: (&str, &str)) -> Result<ParamValue> {
    let mut cursor = WireCursor::new(data);
    // An empty value message decodes as null; when several one-of members
    // appear, the last one wins.
    let mut value = ParamValue::Null;

    while !cursor.is_at_end() {
        let (number, wire) = cursor.read_tag()?;
        match number {
            VALUE_NULL => {
                expect_value_wire(wire, WireType::Varint, context)?;
                cursor.read_varint()?;
                value = ParamValue::Null;
            }
            VALUE_NUMBER => {
                expect_value_wire(wire, WireType::Fixed64, context)?;
                value = ParamValue::Number(cursor.read_double()?);
            }
            VALUE_STRING => {
                expect_value_wire(wire, WireType::LengthDelimited, context)?;
                let bytes = cursor.read_bytes()?;
                let s = std::str::from_utf8(bytes)
                    .map(str::to_string)
                    .map_err(|e| {
                        SchemaError::field_decode(
                            context.0,
                            context.1,
                            format!("invalid UTF-8 in string value: {e}"),
                        )
                    })?;
                value = ParamValue::String(s);
            }
            VALUE_BOOL => {
                expect_value_wire(wire, WireType::Varint, context)?;
                value = ParamValue::Bool(cursor.read_varint()? != 0);
            }
            VALUE_STRUCT => {
                expect_value_wire(wire, WireType::LengthDelimited, context)?;
                value = ParamValue::Object(decode_struct(cursor.read_bytes()?, opts, context)?);
            }
            VALUE_LIST => {
                expect_value_wire(wire, WireType::LengthDelimited, context)?;
                value = ParamValue::List(decode_list(cursor.read_bytes()?, opts, context)?);
            }
            _ => {
                UnknownValue::read_from(&mut cursor, wire)?;
            }
        }
    }

    Ok(value)
}

fn decode_list(
    data: &[u8],
    opts: &DecodeOptions,
    context: (&str, &str),
) -> Result<Vec<ParamValue>> {
    let mut cursor = WireCursor::new(data);
    let mut items = Vec::new();

    while !cursor.is_at_end() {
        let (number, wire) = cursor.read_tag()?;
        if number == LIST_VALUES {
            expect_value_wire(wire, WireType::LengthDelimited, context)?;
            items.push(decode_value(cursor.read_bytes()?, opts, context)?);
        } else {
            UnknownValue::read_from(&mut cursor, wire)?;
        }
    }

    Ok(items)
}

fn expect_value_wire(actual: WireType, expected: WireType, context: (&str, &str)) -> Result<()> {
    if actual == expected {
        Ok(())
    } else {
        Err(SchemaError::wire_type_mismatch(
            context.0,
            context.1,
            expected.name(),
            actual.name(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CTX: (&str, &str) = ("test.Owner", "params");

    fn round_trip(map: &ParamMap) -> ParamMap {
        let mut w = WireWriter::new();
        encode_struct(map, &mut w);
        let bytes = w.into_bytes();
        decode_struct(&bytes, &DecodeOptions::default(), CTX).unwrap()
    }

    #[test]
    fn test_empty_struct_round_trip() {
        let map = ParamMap::new();
        assert_eq!(round_trip(&map), map);
    }

    #[test]
    fn test_scalar_values_round_trip() {
        let mut map = ParamMap::new();
        map.insert("null".to_string(), ParamValue::Null);
        map.insert("flag".to_string(), ParamValue::Bool(true));
        map.insert("count".to_string(), ParamValue::Number(7.0));
        map.insert("label".to_string(), ParamValue::from("ok"));
        assert_eq!(round_trip(&map), map);
    }

    #[test]
    fn test_nested_object_round_trip() {
        let mut status = ParamMap::new();
        status.insert("code".to_string(), ParamValue::Number(7.0));
        let mut map = ParamMap::new();
        map.insert("status".to_string(), ParamValue::Object(status));
        assert_eq!(round_trip(&map), map);
    }

    #[test]
    fn test_list_round_trip() {
        let mut map = ParamMap::new();
        map.insert(
            "values".to_string(),
            ParamValue::List(vec![
                ParamValue::Number(1.0),
                ParamValue::from("two"),
                ParamValue::Null,
                ParamValue::List(vec![ParamValue::Bool(false)]),
            ]),
        );
        assert_eq!(round_trip(&map), map);
    }

    #[test]
    fn test_duplicate_key_keeps_last_value() {
        // Two entries with the same key: "a" -> 1.0 then "a" -> 2.0
        let mut w = WireWriter::new();
        for n in [1.0f64, 2.0] {
            w.write_message(STRUCT_FIELDS, |entry| {
                entry.write_length_delimited(ENTRY_KEY, b"a");
                entry.write_message(ENTRY_VALUE, |vw| {
                    vw.write_tag(VALUE_NUMBER, WireType::Fixed64);
                    vw.write_fixed64(n.to_bits());
                });
            });
        }
        let bytes = w.into_bytes();

        let map = decode_struct(&bytes, &DecodeOptions::default(), CTX).unwrap();
        assert_eq!(map.get("a"), Some(&ParamValue::Number(2.0)));

        let err = decode_struct(&bytes, &DecodeOptions::strict(), CTX).unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateMapKey { .. }));
    }

    #[test]
    fn test_empty_value_message_is_null() {
        let mut w = WireWriter::new();
        w.write_message(STRUCT_FIELDS, |entry| {
            entry.write_length_delimited(ENTRY_KEY, b"k");
            entry.write_length_delimited(ENTRY_VALUE, b"");
        });
        let bytes = w.into_bytes();
        let map = decode_struct(&bytes, &DecodeOptions::default(), CTX).unwrap();
        assert_eq!(map.get("k"), Some(&ParamValue::Null));
    }

    #[test]
    fn test_unknown_fields_inside_value_are_skipped() {
        let mut w = WireWriter::new();
        w.write_message(STRUCT_FIELDS, |entry| {
            entry.write_length_delimited(ENTRY_KEY, b"k");
            entry.write_message(ENTRY_VALUE, |vw| {
                // Field 9 is not part of the value shape
                vw.write_tag(9, WireType::Varint);
                vw.write_varint(5);
                vw.write_length_delimited(VALUE_STRING, b"kept");
            });
        });
        let bytes = w.into_bytes();
        let map = decode_struct(&bytes, &DecodeOptions::default(), CTX).unwrap();
        assert_eq!(map.get("k"), Some(&ParamValue::from("kept")));
    }

    #[test]
    fn test_truncated_struct_fails() {
        // Entry claims 10 bytes but only 2 follow
        let bytes = vec![0x0A, 0x0A, 0x00, 0x00];
        let err = decode_struct(&bytes, &DecodeOptions::default(), CTX).unwrap_err();
        assert!(matches!(err, SchemaError::BufferTooShort { .. }));
    }
}
