// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! JSON form integration tests.
//!
//! Tests cover:
//! - The human-authored JSON form of every message kind
//! - Open-world decoding: unrecognized keys are ignored
//! - Binary <-> JSON equivalence for the same message
//! - Value-type names accepted by name or number

use policycodec::{
    decode_json, encode, encode_json, AttributeManifest, Handler, Instance, Message, MessageKind,
    ParamValue, Rule, SchemaError, ValueType,
};

// ============================================================================
// Author-Facing Form
// ============================================================================

#[test]
fn test_instance_json_with_unknown_key_is_ignored() {
    let json = r#"{"name":"i1","template":"listentry","params":{"value":"ok"},"foo":"bar"}"#;
    let instance: Instance = policycodec::encoding::json::from_json(json).unwrap();

    assert_eq!(instance.name, "i1");
    assert_eq!(instance.template, "listentry");
    assert_eq!(
        instance.params.as_ref().and_then(|p| p.get("value")),
        Some(&ParamValue::from("ok"))
    );
    assert!(instance.compiled_template.is_empty());
}

#[test]
fn test_author_form_never_requires_reserved_fields() {
    let handler = Handler {
        name: "h1".to_string(),
        adapter: "denier".to_string(),
        compiled_adapter: "generated elsewhere".to_string(),
        ..Default::default()
    };
    let json = policycodec::encoding::json::to_json(&handler).unwrap();
    // Reserved fields do appear when set...
    assert!(json.contains("compiled_adapter"));

    // ...but an author-written document without them parses to the same
    // message modulo the reserved field.
    let authored: Handler =
        policycodec::encoding::json::from_json(r#"{"name":"h1","adapter":"denier"}"#).unwrap();
    assert!(authored.compiled_adapter.is_empty());
    assert_eq!(authored.name, handler.name);
}

#[test]
fn test_rule_json_uses_match_key() {
    let json = r#"{"match":"true","actions":[{"handler":"h1","instances":["i1"]}]}"#;
    let rule: Rule = policycodec::encoding::json::from_json(json).unwrap();
    assert_eq!(rule.r#match, "true");
    assert_eq!(rule.actions[0].instances, vec!["i1"]);

    let round = policycodec::encoding::json::to_json(&rule).unwrap();
    assert_eq!(round, json);
}

#[test]
fn test_manifest_json_value_types_by_name_and_number() {
    let json = r#"{
        "revision": "1",
        "name": "kubernetes",
        "attributes": {
            "source.ip": {"value_type": "IP_ADDRESS"},
            "request.size": {"value_type": 2}
        }
    }"#;
    let manifest: AttributeManifest = policycodec::encoding::json::from_json(json).unwrap();
    assert_eq!(
        manifest.attributes["source.ip"].value_type(),
        ValueType::IpAddress
    );
    assert_eq!(
        manifest.attributes["request.size"].value_type(),
        ValueType::Int64
    );
}

#[test]
fn test_empty_document_decodes_to_default_for_every_kind() {
    for kind in MessageKind::ALL {
        let message = decode_json(kind, "{}").unwrap();
        assert!(encode(&message).is_empty(), "default {kind} not empty");
    }
}

#[test]
fn test_malformed_json_fails() {
    let err = decode_json(MessageKind::Handler, "{not json").unwrap_err();
    assert!(matches!(err, SchemaError::Json { .. }));
}

// ============================================================================
// Binary <-> JSON Equivalence
// ============================================================================

#[test]
fn test_handler_round_trips_through_both_forms() {
    let json = r#"{"name":"h1","adapter":"denier","params":{"status":{"code":7.0}}}"#;

    // JSON -> message -> binary -> message -> JSON
    let message = decode_json(MessageKind::Handler, json).unwrap();
    let bytes = encode(&message);
    let from_wire = policycodec::decode(MessageKind::Handler, &bytes).unwrap();
    assert_eq!(from_wire, message);

    let back = encode_json(&from_wire).unwrap();
    assert_eq!(back, json);
}

#[test]
fn test_json_form_drops_wire_unknown_fields() {
    // Unknown wire fields have no JSON representation; the JSON form is
    // the author-facing view.
    let mut bytes = Handler {
        name: "h1".to_string(),
        ..Default::default()
    }
    .encode_to_vec();
    bytes.extend_from_slice(&[0xC0, 0x3E, 0x63]); // field 1000, varint 99

    let handler = Handler::decode(&bytes).unwrap();
    assert!(!handler.unknown_fields().is_empty());

    let json = policycodec::encoding::json::to_json(&handler).unwrap();
    assert_eq!(json, r#"{"name":"h1"}"#);
}

#[test]
fn test_params_scalar_kinds_survive_json() {
    let json = r#"{"name":"i1","template":"t","params":{"b":true,"n":1.5,"s":"x","z":null,"list":[1.0,"two"]}}"#;
    let message = decode_json(MessageKind::Instance, json).unwrap();

    let bytes = encode(&message);
    let decoded = policycodec::decode(MessageKind::Instance, &bytes).unwrap();
    assert_eq!(decoded, message);

    let back = encode_json(&decoded).unwrap();
    let reparsed = decode_json(MessageKind::Instance, &back).unwrap();
    assert_eq!(reparsed, message);
}
