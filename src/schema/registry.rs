// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Process-wide schema table.
//!
//! The schema set is closed (the six configuration kinds plus the nested
//! AttributeInfo), so the registry is built once on first use and is
//! read-only afterwards. It can be consulted concurrently from any thread
//! without synchronization.

use std::collections::HashMap;
use std::sync::OnceLock;

use super::descriptor::{
    MessageDescriptor, ACTION, ATTRIBUTE_INFO, ATTRIBUTE_MANIFEST, CONNECTION, HANDLER, INSTANCE,
    RULE,
};

/// Read-only registry of message descriptors, indexed by short and full name.
pub struct SchemaRegistry {
    by_name: HashMap<&'static str, &'static MessageDescriptor>,
}

impl SchemaRegistry {
    /// Get the process-wide registry, building it on first use.
    pub fn global() -> &'static SchemaRegistry {
        static REGISTRY: OnceLock<SchemaRegistry> = OnceLock::new();
        REGISTRY.get_or_init(SchemaRegistry::build)
    }

    fn build() -> Self {
        let descriptors: [&'static MessageDescriptor; 7] = [
            &ATTRIBUTE_MANIFEST,
            &ATTRIBUTE_INFO,
            &RULE,
            &ACTION,
            &INSTANCE,
            &HANDLER,
            &CONNECTION,
        ];

        let mut by_name = HashMap::new();
        for desc in descriptors {
            by_name.insert(desc.full_name, desc);
            by_name.insert(desc.name, desc);
        }

        Self { by_name }
    }

    /// Look up a descriptor by short or fully qualified name.
    pub fn get(&self, name: &str) -> Option<&'static MessageDescriptor> {
        self.by_name.get(name).copied()
    }

    /// Check if a message name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// All registered full names, sorted.
    pub fn full_names(&self) -> Vec<&'static str> {
        self.by_name
            .values()
            .map(|desc| desc.full_name)
            .collect::<std::collections::BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Number of distinct registered message shapes.
    pub fn len(&self) -> usize {
        self.full_names().len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
