// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema metadata: message descriptors and the process-wide registry.

pub mod descriptor;
pub mod registry;

pub use descriptor::{
    FieldDescriptor, FieldKind, MessageDescriptor, MessageKind, ACTION, ATTRIBUTE_INFO,
    ATTRIBUTE_MANIFEST, COMPILED_FIELD_NUMBER, CONNECTION, HANDLER, INSTANCE, PACKAGE, RULE,
    TARGET_NAMESPACE,
};
pub use registry::SchemaRegistry;
