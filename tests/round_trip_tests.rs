// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Round-trip integration tests.
//!
//! Tests cover:
//! - decode(encode(m)) == m for every message kind
//! - Truncated buffers failing for every message kind
//! - Unknown fields surviving decode -> encode unchanged
//! - Kind-dispatched decoding through the ConfigMessage sum type

use std::collections::BTreeMap;

use policycodec::{
    decode, encode, Action, AttributeInfo, AttributeManifest, ConfigMessage, Connection,
    Handler, Instance, Message, MessageKind, ParamMap, ParamValue, Rule, SchemaError, ValueType,
};

// ============================================================================
// Test Fixtures
// ============================================================================

fn sample_manifest() -> AttributeManifest {
    let mut attributes = BTreeMap::new();
    attributes.insert(
        "source.ip".to_string(),
        AttributeInfo {
            description: "client address".to_string(),
            value_type: ValueType::IpAddress.number(),
            ..Default::default()
        },
    );
    attributes.insert(
        "request.duration".to_string(),
        AttributeInfo {
            value_type: ValueType::Duration.number(),
            ..Default::default()
        },
    );

    AttributeManifest {
        revision: "1".to_string(),
        name: "kubernetes".to_string(),
        attributes,
        ..Default::default()
    }
}

fn sample_rule() -> Rule {
    Rule {
        r#match: r#"destination.service == "ratings""#.to_string(),
        actions: vec![Action {
            handler: "denier.h1".to_string(),
            instances: vec!["checknothing.i1".to_string()],
            ..Default::default()
        }],
        ..Default::default()
    }
}

fn sample_instance() -> Instance {
    let mut params = ParamMap::new();
    params.insert("value".to_string(), ParamValue::from("ok"));
    Instance {
        name: "i1".to_string(),
        template: "listentry".to_string(),
        params: Some(params),
        ..Default::default()
    }
}

fn sample_handler() -> Handler {
    let mut status = ParamMap::new();
    status.insert("code".to_string(), ParamValue::from(7));
    let mut params = ParamMap::new();
    params.insert("status".to_string(), ParamValue::Object(status));

    Handler {
        name: "h1".to_string(),
        adapter: "denier".to_string(),
        params: Some(params),
        connection: Some(Connection {
            address: "10.0.0.1:9091".to_string(),
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn sample_messages() -> Vec<ConfigMessage> {
    vec![
        ConfigMessage::AttributeManifest(sample_manifest()),
        ConfigMessage::Rule(sample_rule()),
        ConfigMessage::Action(Action {
            handler: "h1".to_string(),
            instances: vec!["i1".to_string(), "i2".to_string()],
            ..Default::default()
        }),
        ConfigMessage::Instance(sample_instance()),
        ConfigMessage::Handler(sample_handler()),
        ConfigMessage::Connection(Connection {
            address: "10.0.0.1:9091".to_string(),
            ..Default::default()
        }),
    ]
}

// ============================================================================
// Binary Round-Trip Tests
// ============================================================================

#[test]
fn test_round_trip_every_kind() {
    for message in sample_messages() {
        let bytes = encode(&message);
        let decoded = decode(message.kind(), &bytes).unwrap();
        assert_eq!(decoded, message, "round trip failed for {}", message.kind());
    }
}

#[test]
fn test_round_trip_default_messages_are_empty() {
    for kind in MessageKind::ALL {
        let message = decode(kind, &[]).unwrap();
        assert!(
            encode(&message).is_empty(),
            "default {kind} should encode to zero bytes"
        );
    }
}

#[test]
fn test_connection_example_from_storage() {
    let conn = Connection {
        address: "10.0.0.1:9091".to_string(),
        ..Default::default()
    };
    let bytes = conn.encode_to_vec();
    let decoded = Connection::decode(&bytes).unwrap();
    assert_eq!(decoded, conn);
    assert_eq!(decoded.address, "10.0.0.1:9091");
}

#[test]
fn test_multiple_decode_encode_cycles() {
    let original = encode(&ConfigMessage::Handler(sample_handler()));

    let mut current = original.clone();
    for _ in 0..5 {
        let decoded = decode(MessageKind::Handler, &current).unwrap();
        current = encode(&decoded);
    }
    assert_eq!(current, original);
}

// ============================================================================
// Truncation Tests
// ============================================================================

#[test]
fn test_truncated_buffer_fails_for_every_kind() {
    for message in sample_messages() {
        let bytes = encode(&message);
        // Cut inside the final payload
        let err = decode(message.kind(), &bytes[..bytes.len() - 1]).unwrap_err();
        assert!(
            matches!(err, SchemaError::BufferTooShort { .. }),
            "expected truncation error for {}, got {err}",
            message.kind()
        );
    }
}

#[test]
fn test_no_cut_point_panics() {
    for message in sample_messages() {
        let bytes = encode(&message);
        for cut in 0..bytes.len() {
            let _ = decode(message.kind(), &bytes[..cut]);
        }
    }
}

#[test]
fn test_invalid_varint_fails() {
    // Unknown field 100 claims a varint payload that never terminates
    let mut data = vec![0xA0, 0x06];
    data.extend_from_slice(&[0xFF; 11]);
    let err = Instance::decode(&data).unwrap_err();
    assert!(matches!(err, SchemaError::VarintOverflow { .. }));
}

#[test]
fn test_known_string_field_with_varint_wire_type_fails() {
    // Instance.name (field 1) is length-delimited; a varint tag is a
    // schema violation, not an unknown field
    let err = Instance::decode(&[0x08, 0x01]).unwrap_err();
    assert!(matches!(err, SchemaError::WireTypeMismatch { .. }));
}

// ============================================================================
// Unknown Field Preservation Tests
// ============================================================================

#[test]
fn test_unknown_fields_survive_round_trip() {
    for message in sample_messages() {
        let mut bytes = encode(&message);
        // Append a field this schema does not know: number 1000, varint 99
        // Tag = (1000 << 3) | 0 = 8000 -> varint [0xC0, 0x3E]
        bytes.extend_from_slice(&[0xC0, 0x3E, 0x63]);

        let decoded = decode(message.kind(), &bytes).unwrap();
        let re_encoded = encode(&decoded);

        assert_eq!(
            re_encoded, bytes,
            "unknown field lost for {}",
            message.kind()
        );
    }
}

#[test]
fn test_unknown_length_delimited_field_preserved_verbatim() {
    // Field 200 with an opaque payload, ahead of a known field
    let mut data = Vec::new();
    // Tag = (200 << 3) | 2 = 1602 -> varint [0xC2, 0x0C]
    data.extend_from_slice(&[0xC2, 0x0C, 0x03, 0xAA, 0xBB, 0xCC]);
    // address = "x": tag 0x12
    data.extend_from_slice(&[0x12, 0x01, b'x']);

    let conn = Connection::decode(&data).unwrap();
    assert_eq!(conn.address, "x");
    assert_eq!(conn.unknown_fields().len(), 1);

    // Known fields re-emit first, then preserved fields in arrival order
    let re_encoded = conn.encode_to_vec();
    assert_eq!(
        re_encoded,
        vec![0x12, 0x01, b'x', 0xC2, 0x0C, 0x03, 0xAA, 0xBB, 0xCC]
    );

    // A second round trip is stable
    let again = Connection::decode(&re_encoded).unwrap();
    assert_eq!(again.encode_to_vec(), re_encoded);
}

#[test]
fn test_equality_includes_unknown_fields() {
    let plain = Connection::decode(&[0x12, 0x01, b'x']).unwrap();
    let with_unknown = Connection::decode(&[0x12, 0x01, b'x', 0x48, 0x05]).unwrap();
    assert_ne!(plain, with_unknown);
}
