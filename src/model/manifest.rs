// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Attribute manifests.
//!
//! An [`AttributeManifest`] declares the set of attributes a component
//! produces: a revision, a component name, and a map from attribute name
//! to [`AttributeInfo`]. The value type of each attribute references the
//! externally defined [`ValueType`] enumeration, carried here as an open
//! enum (the raw number survives even when it names a value this build
//! does not know).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::{Result, SchemaError};
use crate::encoding::binary::{UnknownFieldSet, UnknownValue, WireCursor, WireType, WireWriter};
use crate::encoding::codec::{
    expect_wire, read_enum_field, read_message_field, read_string_field, DecodeOptions, Message,
};
use crate::schema::{MessageDescriptor, ATTRIBUTE_INFO, ATTRIBUTE_MANIFEST};

/// Known values of the external attribute value-type enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValueType {
    /// Value type is not known or not set
    #[default]
    Unspecified,
    /// UTF-8 string
    String,
    /// 64-bit signed integer
    Int64,
    /// Double precision float
    Double,
    /// Boolean
    Bool,
    /// Point in time
    Timestamp,
    /// IPv4 or IPv6 address
    IpAddress,
    /// Email address
    EmailAddress,
    /// URI
    Uri,
    /// DNS name
    DnsName,
    /// Span of time
    Duration,
    /// Map of string to string
    StringMap,
}

impl ValueType {
    /// Resolve a known value type from its number.
    pub fn from_i32(value: i32) -> Option<ValueType> {
        match value {
            0 => Some(ValueType::Unspecified),
            1 => Some(ValueType::String),
            2 => Some(ValueType::Int64),
            3 => Some(ValueType::Double),
            4 => Some(ValueType::Bool),
            5 => Some(ValueType::Timestamp),
            6 => Some(ValueType::IpAddress),
            7 => Some(ValueType::EmailAddress),
            8 => Some(ValueType::Uri),
            9 => Some(ValueType::DnsName),
            10 => Some(ValueType::Duration),
            11 => Some(ValueType::StringMap),
            _ => None,
        }
    }

    /// The stable number of this value type.
    pub fn number(self) -> i32 {
        match self {
            ValueType::Unspecified => 0,
            ValueType::String => 1,
            ValueType::Int64 => 2,
            ValueType::Double => 3,
            ValueType::Bool => 4,
            ValueType::Timestamp => 5,
            ValueType::IpAddress => 6,
            ValueType::EmailAddress => 7,
            ValueType::Uri => 8,
            ValueType::DnsName => 9,
            ValueType::Duration => 10,
            ValueType::StringMap => 11,
        }
    }

    /// The schema name of this value type.
    pub fn as_str_name(self) -> &'static str {
        match self {
            ValueType::Unspecified => "VALUE_TYPE_UNSPECIFIED",
            ValueType::String => "STRING",
            ValueType::Int64 => "INT64",
            ValueType::Double => "DOUBLE",
            ValueType::Bool => "BOOL",
            ValueType::Timestamp => "TIMESTAMP",
            ValueType::IpAddress => "IP_ADDRESS",
            ValueType::EmailAddress => "EMAIL_ADDRESS",
            ValueType::Uri => "URI",
            ValueType::DnsName => "DNS_NAME",
            ValueType::Duration => "DURATION",
            ValueType::StringMap => "STRING_MAP",
        }
    }

    /// Resolve a known value type from its schema name.
    pub fn from_str_name(name: &str) -> Option<ValueType> {
        match name {
            "VALUE_TYPE_UNSPECIFIED" => Some(ValueType::Unspecified),
            "STRING" => Some(ValueType::String),
            "INT64" => Some(ValueType::Int64),
            "DOUBLE" => Some(ValueType::Double),
            "BOOL" => Some(ValueType::Bool),
            "TIMESTAMP" => Some(ValueType::Timestamp),
            "IP_ADDRESS" => Some(ValueType::IpAddress),
            "EMAIL_ADDRESS" => Some(ValueType::EmailAddress),
            "URI" => Some(ValueType::Uri),
            "DNS_NAME" => Some(ValueType::DnsName),
            "DURATION" => Some(ValueType::Duration),
            "STRING_MAP" => Some(ValueType::StringMap),
            _ => None,
        }
    }
}

/// Metadata about one attribute.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeInfo {
    /// Human-readable description of the attribute
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Raw number of the attribute's value type. Unknown numbers are
    /// preserved; use [`AttributeInfo::value_type`] for the known mapping.
    #[serde(
        with = "value_type_field",
        skip_serializing_if = "is_unspecified"
    )]
    pub value_type: i32,

    /// Fields from newer schema revisions, preserved opaquely
    #[serde(skip)]
    pub unknown_fields: UnknownFieldSet,
}

impl AttributeInfo {
    /// The attribute's value type, defaulting to `Unspecified` when the
    /// raw number is not a known value.
    pub fn value_type(&self) -> ValueType {
        ValueType::from_i32(self.value_type).unwrap_or(ValueType::Unspecified)
    }

    /// Set the value type from the known enumeration.
    pub fn set_value_type(&mut self, value_type: ValueType) {
        self.value_type = value_type.number();
    }
}

fn is_unspecified(value: &i32) -> bool {
    *value == 0
}

/// JSON form of the value-type field: the schema name for known values,
/// the raw number otherwise; both accepted on input.
mod value_type_field {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::ValueType;

    pub fn serialize<S: Serializer>(value: &i32, serializer: S) -> Result<S::Ok, S::Error> {
        match ValueType::from_i32(*value) {
            Some(known) => serializer.serialize_str(known.as_str_name()),
            None => serializer.serialize_i32(*value),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum NameOrNumber {
            Number(i32),
            Name(String),
        }

        match NameOrNumber::deserialize(deserializer)? {
            NameOrNumber::Number(number) => Ok(number),
            NameOrNumber::Name(name) => ValueType::from_str_name(&name)
                .map(ValueType::number)
                .ok_or_else(|| {
                    serde::de::Error::custom(format!("unknown value type name '{name}'"))
                }),
        }
    }
}

impl Message for AttributeInfo {
    fn descriptor() -> &'static MessageDescriptor {
        &ATTRIBUTE_INFO
    }

    fn encode_fields(&self, w: &mut WireWriter) {
        w.write_string(1, &self.description);
        w.write_enum(2, self.value_type);
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
            1 => {
                self.description =
                    read_string_field(cursor, wire, Self::descriptor(), "description")?;
                Ok(true)
            }
            2 => {
                self.value_type = read_enum_field(cursor, wire, Self::descriptor(), "value_type")?;
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

/// Set of attributes produced by a component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeManifest {
    /// Revision of this manifest
    #[serde(skip_serializing_if = "String::is_empty")]
    pub revision: String,

    /// Name of the component producing these attributes
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Attribute name to metadata. Keys are unique; a wire-level duplicate
    /// keeps the last value seen unless strict decoding is enabled.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, AttributeInfo>,

    /// Fields from newer schema revisions, preserved opaquely
    #[serde(skip)]
    pub unknown_fields: UnknownFieldSet,
}

impl AttributeManifest {
    fn decode_attributes_entry(
        data: &[u8],
        opts: &DecodeOptions,
    ) -> Result<(String, AttributeInfo)> {
        let mut cursor = WireCursor::new(data);
        let mut key = String::new();
        let mut info = AttributeInfo::default();

        while !cursor.is_at_end() {
            let (number, wire) = cursor.read_tag()?;
            match number {
                1 => {
                    key = read_string_field(&mut cursor, wire, Self::descriptor(), "attributes")?;
                }
                2 => {
                    info = read_message_field(
                        &mut cursor,
                        wire,
                        Self::descriptor(),
                        "attributes",
                        opts,
                    )?;
                }
                _ => {
                    UnknownValue::read_from(&mut cursor, wire)?;
                }
            }
        }

        Ok((key, info))
    }
}

impl Message for AttributeManifest {
    fn descriptor() -> &'static MessageDescriptor {
        &ATTRIBUTE_MANIFEST
    }

    fn encode_fields(&self, w: &mut WireWriter) {
        w.write_string(1, &self.revision);
        w.write_string(2, &self.name);
        for (name, info) in &self.attributes {
            w.write_message(3, |entry| {
                entry.write_length_delimited(1, name.as_bytes());
                entry.write_message(2, |vw| info.encode_fields(vw));
            });
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
                self.revision = read_string_field(cursor, wire, Self::descriptor(), "revision")?;
                Ok(true)
            }
            2 => {
                self.name = read_string_field(cursor, wire, Self::descriptor(), "name")?;
                Ok(true)
            }
            3 => {
                expect_wire(
                    Self::descriptor(),
                    "attributes",
                    WireType::LengthDelimited,
                    wire,
                )?;
                let entry = cursor.read_bytes()?;
                let (key, info) = Self::decode_attributes_entry(entry, opts)?;
                if self.attributes.contains_key(&key) {
                    if opts.strict_maps {
                        return Err(SchemaError::duplicate_map_key(
                            Self::descriptor().full_name,
                            "attributes",
                            key,
                        ));
                    }
                    tracing::warn!(key = %key, "duplicate attributes map key, keeping last value");
                }
                self.attributes.insert(key, info);
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
