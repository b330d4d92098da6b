// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Structured parameter value system.
//!
//! Provides the dynamically-typed value tree carried by the `params` fields
//! of [`Handler`](crate::model::Handler) and [`Instance`](crate::model::Instance).
//! The shape mirrors the generic structured-value well-known type: an open
//! tree of objects, lists, and scalars. All variants are serde-serializable
//! and map onto natural JSON.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Type alias for an object node: field name -> value mapping.
///
/// `BTreeMap` keeps keys sorted, which makes the binary encoding of a
/// parameter tree deterministic.
pub type ParamMap = BTreeMap<String, ParamValue>;

/// Dynamically-typed parameter value.
///
/// Adapter and template parameters are authored as open key/value trees;
/// this enum is their in-memory representation. Numbers are carried as
/// `f64`, matching the structured-value wire form (a single double-width
/// number kind).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Explicit null
    Null,
    /// Boolean
    Bool(bool),
    /// Number (double precision)
    Number(f64),
    /// UTF-8 string
    String(String),
    /// Ordered list of values
    List(Vec<ParamValue>),
    /// Nested object
    Object(ParamMap),
}

impl ParamValue {
    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, ParamValue::Null)
    }

    /// Check if this value is a scalar (null, bool, number, or string).
    pub fn is_scalar(&self) -> bool {
        !matches!(self, ParamValue::List(_) | ParamValue::Object(_))
    }

    /// Check if this value is a container (list or object).
    pub fn is_container(&self) -> bool {
        matches!(self, ParamValue::List(_) | ParamValue::Object(_))
    }

    /// Try to get the inner boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get the inner number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get the inner string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the inner list.
    pub fn as_list(&self) -> Option<&[ParamValue]> {
        match self {
            ParamValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Try to get the inner object.
    pub fn as_object(&self) -> Option<&ParamMap> {
        match self {
            ParamValue::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Try to get a mutable reference to the inner object.
    pub fn as_object_mut(&mut self) -> Option<&mut ParamMap> {
        match self {
            ParamValue::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Look up a value by key, if this value is an object.
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Get the type name of this value as a string.
    pub fn type_name(&self) -> &'static str {
        match self {
            ParamValue::Null => "null",
            ParamValue::Bool(_) => "bool",
            ParamValue::Number(_) => "number",
            ParamValue::String(_) => "string",
            ParamValue::List(_) => "list",
            ParamValue::Object(_) => "object",
        }
    }
}

impl Default for ParamValue {
    fn default() -> Self {
        ParamValue::Null
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Null => write!(f, "null"),
            ParamValue::Bool(v) => write!(f, "{v}"),
            ParamValue::Number(v) => write!(f, "{v}"),
            ParamValue::String(v) => write!(f, "\"{v}\""),
            ParamValue::List(v) => write!(f, "[{} values]", v.len()),
            ParamValue::Object(v) => write!(f, "{{{} fields}}", v.len()),
        }
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Number(v)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Number(v as f64)
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        ParamValue::Number(v as f64)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::String(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::String(v)
    }
}

impl From<Vec<ParamValue>> for ParamValue {
    fn from(v: Vec<ParamValue>) -> Self {
        ParamValue::List(v)
    }
}

impl From<ParamMap> for ParamValue {
    fn from(v: ParamMap) -> Self {
        ParamValue::Object(v)
    }
}
