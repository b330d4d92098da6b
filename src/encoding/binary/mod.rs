// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Binary wire encoding.
//!
//! Length-prefixed tag/varint wire format:
//! - [`cursor`] - bounds-checked reading
//! - [`writer`] - field emission
//! - [`unknown`] - opaque preservation of unrecognized fields
//! - [`params`] - codec pair for the structured parameter tree

pub mod cursor;
pub mod params;
pub mod unknown;
pub mod writer;

pub use cursor::{WireCursor, WireType};
pub use unknown::{UnknownField, UnknownFieldSet, UnknownValue};
pub use writer::WireWriter;
