// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types for policycodec.
//!
//! This module contains the foundational types shared by every layer:
//! - [`SchemaError`] and [`Result`] for error handling
//! - [`ParamValue`] and [`ParamMap`] for dynamically-typed parameters

pub mod error;
pub mod value;

pub use error::{Result, SchemaError};
pub use value::{ParamMap, ParamValue};
