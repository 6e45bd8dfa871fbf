// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Protoscan
//!
//! Schema-less, zero-copy scanner for the protobuf wire format.
//!
//! Instead of decoding a whole message into a struct, the caller pulls one
//! field at a time from a [`Scanner`] and decides what to do with it: read it
//! as a scalar, recurse into it as a sub-message, walk it as a packed array
//! with a [`PackedIterator`], or skip it. Strings, byte slices and
//! sub-messages borrow the input buffer and are never copied.
//!
//! ## Architecture
//!
//! - `wire/` - Wire types, scalar decoding functions, the borrowed cursor
//! - `scan/` - Scanner, packed iterator, repeated-field readers
//! - `core/` - Error types
//!
//! ## Example: Counting without decoding
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use protoscan::{Scanner, WireType};
//!
//! // field 1: packed varints [1, 2, 3], field 2: "skip me"
//! let mut data = vec![0x0A, 0x03, 0x01, 0x02, 0x03, 0x12, 0x07];
//! data.extend_from_slice(b"skip me");
//!
//! let mut scanner = Scanner::new(&data);
//! let mut count = 0;
//! while scanner.advance() {
//!     match scanner.field_number() {
//!         1 => count += scanner.iterator()?.count(WireType::Varint)?,
//!         _ => scanner.skip(),
//!     }
//! }
//! assert!(scanner.error().is_none());
//! assert_eq!(count, 3);
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

pub use core::{ErrorKind, Result, ScanError};

// Wire format primitives
pub mod wire;

pub use wire::{Cursor, Field, ScalarRead, WireType};

// Scanning
pub mod scan;

pub use scan::{PackedIterator, Scanner};
