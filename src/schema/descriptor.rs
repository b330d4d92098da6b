// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Static message descriptors for the policy configuration schema.
//!
//! Replaces runtime reflection with compile-time metadata: each message
//! kind has a [`MessageDescriptor`] listing its fields, their stable wire
//! numbers, and their kinds. The codec consults these tables only for
//! diagnostics and registry lookup; field dispatch itself is generated into
//! the typed records in [`crate::model`].

use std::fmt;
use std::str::FromStr;

use crate::core::SchemaError;

/// Schema package namespace.
pub const PACKAGE: &str = "istio.policy.v1beta1";

/// Generated-output namespace declared by the schema file.
pub const TARGET_NAMESPACE: &str = "istio.io/api/policy/v1beta1";

/// Field number shared by the reserved `compiled_template` and
/// `compiled_adapter` fields. Deliberately far outside the normal range:
/// these fields are populated by an external compilation step, never by the
/// configuration author.
pub const COMPILED_FIELD_NUMBER: u32 = 67_794_676;

/// The six top-level message kinds of the policy configuration schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    /// Set of attributes produced by a component
    AttributeManifest,
    /// Match expression plus the actions to take when it holds
    Rule,
    /// A handler invocation with its instance references
    Action,
    /// Template binding with typed parameters
    Instance,
    /// Adapter binding with typed parameters and an optional connection
    Handler,
    /// Out-of-process backend address
    Connection,
}

impl MessageKind {
    /// All kinds, in declaration order.
    pub const ALL: [MessageKind; 6] = [
        MessageKind::AttributeManifest,
        MessageKind::Rule,
        MessageKind::Action,
        MessageKind::Instance,
        MessageKind::Handler,
        MessageKind::Connection,
    ];

    /// Short message name within the package.
    pub fn name(&self) -> &'static str {
        match self {
            MessageKind::AttributeManifest => "AttributeManifest",
            MessageKind::Rule => "Rule",
            MessageKind::Action => "Action",
            MessageKind::Instance => "Instance",
            MessageKind::Handler => "Handler",
            MessageKind::Connection => "Connection",
        }
    }

    /// Fully qualified message name.
    pub fn full_name(&self) -> &'static str {
        match self {
            MessageKind::AttributeManifest => "istio.policy.v1beta1.AttributeManifest",
            MessageKind::Rule => "istio.policy.v1beta1.Rule",
            MessageKind::Action => "istio.policy.v1beta1.Action",
            MessageKind::Instance => "istio.policy.v1beta1.Instance",
            MessageKind::Handler => "istio.policy.v1beta1.Handler",
            MessageKind::Connection => "istio.policy.v1beta1.Connection",
        }
    }

    /// Descriptor for this kind.
    pub fn descriptor(&self) -> &'static MessageDescriptor {
        match self {
            MessageKind::AttributeManifest => &ATTRIBUTE_MANIFEST,
            MessageKind::Rule => &RULE,
            MessageKind::Action => &ACTION,
            MessageKind::Instance => &INSTANCE,
            MessageKind::Handler => &HANDLER,
            MessageKind::Connection => &CONNECTION,
        }
    }

    /// Resolve a kind from a short or fully qualified name.
    pub fn from_name(name: &str) -> Option<MessageKind> {
        MessageKind::ALL
            .into_iter()
            .find(|kind| kind.name() == name || kind.full_name() == name)
    }
}

impl FromStr for MessageKind {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MessageKind::from_name(s).ok_or_else(|| SchemaError::kind_not_found(s))
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.full_name())
    }
}

/// Kind of data a field carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// UTF-8 string scalar
    String,
    /// Open enumeration carried as a varint
    Enum,
    /// Dynamically-typed parameter tree (structured-value shape)
    Struct,
    /// Embedded message, identified by full name
    Message(&'static str),
    /// String-keyed map whose values are the named message
    Map(&'static str),
}

/// Description of a single field.
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    /// Field name as it appears in the schema and in JSON
    pub name: &'static str,
    /// Stable wire tag number
    pub number: u32,
    /// Data kind
    pub kind: FieldKind,
    /// Whether the field is repeated
    pub repeated: bool,
}

/// Description of a message shape.
#[derive(Debug, Clone, Copy)]
pub struct MessageDescriptor {
    /// Short message name
    pub name: &'static str,
    /// Fully qualified message name
    pub full_name: &'static str,
    /// Fields in ascending wire-number order, reserved fields last
    pub fields: &'static [FieldDescriptor],
}

impl MessageDescriptor {
    /// Look up a field by wire number.
    pub fn field(&self, number: u32) -> Option<&'static FieldDescriptor> {
        self.fields.iter().find(|f| f.number == number)
    }

    /// Look up a field by name.
    pub fn field_by_name(&self, name: &str) -> Option<&'static FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Number of declared fields.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}

pub static ATTRIBUTE_MANIFEST: MessageDescriptor = MessageDescriptor {
    name: "AttributeManifest",
    full_name: "istio.policy.v1beta1.AttributeManifest",
    fields: &[
        FieldDescriptor {
            name: "revision",
            number: 1,
            kind: FieldKind::String,
            repeated: false,
        },
        FieldDescriptor {
            name: "name",
            number: 2,
            kind: FieldKind::String,
            repeated: false,
        },
        FieldDescriptor {
            name: "attributes",
            number: 3,
            kind: FieldKind::Map("istio.policy.v1beta1.AttributeManifest.AttributeInfo"),
            repeated: true,
        },
    ],
};

/// Nested within AttributeManifest; not a top-level kind.
pub static ATTRIBUTE_INFO: MessageDescriptor = MessageDescriptor {
    name: "AttributeInfo",
    full_name: "istio.policy.v1beta1.AttributeManifest.AttributeInfo",
    fields: &[
        FieldDescriptor {
            name: "description",
            number: 1,
            kind: FieldKind::String,
            repeated: false,
        },
        FieldDescriptor {
            name: "value_type",
            number: 2,
            kind: FieldKind::Enum,
            repeated: false,
        },
    ],
};

pub static RULE: MessageDescriptor = MessageDescriptor {
    name: "Rule",
    full_name: "istio.policy.v1beta1.Rule",
    fields: &[
        FieldDescriptor {
            name: "match",
            number: 1,
            kind: FieldKind::String,
            repeated: false,
        },
        FieldDescriptor {
            name: "actions",
            number: 2,
            kind: FieldKind::Message("istio.policy.v1beta1.Action"),
            repeated: true,
        },
    ],
};

// Action has no field 1 in the original schema.
pub static ACTION: MessageDescriptor = MessageDescriptor {
    name: "Action",
    full_name: "istio.policy.v1beta1.Action",
    fields: &[
        FieldDescriptor {
            name: "handler",
            number: 2,
            kind: FieldKind::String,
            repeated: false,
        },
        FieldDescriptor {
            name: "instances",
            number: 3,
            kind: FieldKind::String,
            repeated: true,
        },
    ],
};

pub static INSTANCE: MessageDescriptor = MessageDescriptor {
    name: "Instance",
    full_name: "istio.policy.v1beta1.Instance",
    fields: &[
        FieldDescriptor {
            name: "name",
            number: 1,
            kind: FieldKind::String,
            repeated: false,
        },
        FieldDescriptor {
            name: "template",
            number: 2,
            kind: FieldKind::String,
            repeated: false,
        },
        FieldDescriptor {
            name: "params",
            number: 3,
            kind: FieldKind::Struct,
            repeated: false,
        },
        FieldDescriptor {
            name: "compiled_template",
            number: COMPILED_FIELD_NUMBER,
            kind: FieldKind::String,
            repeated: false,
        },
    ],
};

pub static HANDLER: MessageDescriptor = MessageDescriptor {
    name: "Handler",
    full_name: "istio.policy.v1beta1.Handler",
    fields: &[
        FieldDescriptor {
            name: "name",
            number: 1,
            kind: FieldKind::String,
            repeated: false,
        },
        FieldDescriptor {
            name: "adapter",
            number: 2,
            kind: FieldKind::String,
            repeated: false,
        },
        FieldDescriptor {
            name: "params",
            number: 3,
            kind: FieldKind::Struct,
            repeated: false,
        },
        FieldDescriptor {
            name: "connection",
            number: 4,
            kind: FieldKind::Message("istio.policy.v1beta1.Connection"),
            repeated: false,
        },
        FieldDescriptor {
            name: "compiled_adapter",
            number: COMPILED_FIELD_NUMBER,
            kind: FieldKind::String,
            repeated: false,
        },
    ],
};

// Connection's only field is number 2; field 1 is reserved in the original
// schema.
pub static CONNECTION: MessageDescriptor = MessageDescriptor {
    name: "Connection",
    full_name: "istio.policy.v1beta1.Connection",
    fields: &[FieldDescriptor {
        name: "address",
        number: 2,
        kind: FieldKind::String,
        repeated: false,
    }],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        assert_eq!(MessageKind::Rule.name(), "Rule");
        assert_eq!(
            MessageKind::Handler.full_name(),
            "istio.policy.v1beta1.Handler"
        );
        assert!(MessageKind::ALL
            .iter()
            .all(|k| k.full_name().starts_with(PACKAGE)));
    }

    #[test]
    fn test_kind_from_name() {
        assert_eq!(
            MessageKind::from_name("Instance"),
            Some(MessageKind::Instance)
        );
        assert_eq!(
            MessageKind::from_name("istio.policy.v1beta1.Connection"),
            Some(MessageKind::Connection)
        );
        assert_eq!(MessageKind::from_name("Gadget"), None);
    }

    #[test]
    fn test_kind_from_str() {
        let kind: MessageKind = "Rule".parse().unwrap();
        assert_eq!(kind, MessageKind::Rule);
        assert!("Gadget".parse::<MessageKind>().is_err());
    }

    #[test]
    fn test_kind_display_is_full_name() {
        assert_eq!(
            MessageKind::AttributeManifest.to_string(),
            "istio.policy.v1beta1.AttributeManifest"
        );
    }

    #[test]
    fn test_field_lookup_by_number() {
        let desc = MessageKind::Action.descriptor();
        assert!(desc.field(1).is_none());
        assert_eq!(desc.field(2).unwrap().name, "handler");
        assert_eq!(desc.field(3).unwrap().name, "instances");
        assert!(desc.field(3).unwrap().repeated);
    }

    #[test]
    fn test_field_lookup_by_name() {
        let desc = MessageKind::AttributeManifest.descriptor();
        let attrs = desc.field_by_name("attributes").unwrap();
        assert_eq!(attrs.number, 3);
        assert!(matches!(attrs.kind, FieldKind::Map(_)));
        assert!(desc.field_by_name("nope").is_none());
    }

    #[test]
    fn test_reserved_field_numbers() {
        assert_eq!(
            INSTANCE.field_by_name("compiled_template").unwrap().number,
            COMPILED_FIELD_NUMBER
        );
        assert_eq!(
            HANDLER.field_by_name("compiled_adapter").unwrap().number,
            COMPILED_FIELD_NUMBER
        );
    }

    #[test]
    fn test_connection_address_number() {
        assert_eq!(CONNECTION.field_by_name("address").unwrap().number, 2);
        assert!(CONNECTION.field(1).is_none());
    }

    #[test]
    fn test_nested_attribute_info() {
        assert_eq!(ATTRIBUTE_INFO.field(2).unwrap().name, "value_type");
        assert_eq!(ATTRIBUTE_INFO.field(2).unwrap().kind, FieldKind::Enum);
        assert_eq!(ATTRIBUTE_INFO.field_count(), 2);
    }
}
