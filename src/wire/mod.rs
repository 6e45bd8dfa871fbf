// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Protobuf wire format primitives.
//!
//! - [`scalar`] - Pure decoding functions over `(buffer, offset)`
//! - [`cursor`] - Borrowed cursor and the [`ScalarRead`] trait shared by
//!   the scanner and the packed iterator

pub mod cursor;
pub mod scalar;

pub use cursor::{Cursor, ScalarRead};

/// Maximum number of bytes in an encoded 64-bit varint.
pub const MAX_VARINT_LEN: usize = 10;

/// Maximum number of bytes in an encoded 32-bit varint.
pub const MAX_VARINT32_LEN: usize = 5;

/// Largest field number allowed by the protobuf language.
///
/// The scanner does not enforce this bound; it only rejects field numbers
/// that do not fit in a `u32`.
pub const MAX_FIELD_NUMBER: u32 = (1 << 29) - 1;

/// The physical encoding of a field's value, taken from the low 3 bits of its tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum WireType {
    /// `int32`, `int64`, `uint32`, `uint64`, `sint32`, `sint64`, `bool`, `enum`
    Varint = 0,
    /// `fixed64`, `sfixed64`, `double`
    Fixed64 = 1,
    /// `string`, `bytes`, embedded messages, packed repeated fields
    LengthDelimited = 2,
    /// Start of a group (deprecated)
    StartGroup = 3,
    /// End of a group (deprecated)
    EndGroup = 4,
    /// `fixed32`, `sfixed32`, `float`
    Fixed32 = 5,
}

impl WireType {
    /// Map the low 3 bits of a tag to a wire type.
    ///
    /// Returns `None` for the reserved values 6 and 7.
    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(WireType::Varint),
            1 => Some(WireType::Fixed64),
            2 => Some(WireType::LengthDelimited),
            3 => Some(WireType::StartGroup),
            4 => Some(WireType::EndGroup),
            5 => Some(WireType::Fixed32),
            _ => None,
        }
    }

    /// The 3-bit value of this wire type.
    #[inline]
    pub fn bits(self) -> u8 {
        self as u8
    }

    /// Size in bytes of one value, for the fixed-width wire types.
    pub fn fixed_size(self) -> Option<usize> {
        match self {
            WireType::Fixed32 => Some(4),
            WireType::Fixed64 => Some(8),
            _ => None,
        }
    }

    /// Whether values of this wire type may appear inside a packed repeated field.
    pub fn is_packable(self) -> bool {
        matches!(
            self,
            WireType::Varint | WireType::Fixed32 | WireType::Fixed64
        )
    }

    /// Lowercase name used in CLI output.
    pub fn as_str(self) -> &'static str {
        match self {
            WireType::Varint => "varint",
            WireType::Fixed64 => "fixed64",
            WireType::LengthDelimited => "length-delimited",
            WireType::StartGroup => "start-group",
            WireType::EndGroup => "end-group",
            WireType::Fixed32 => "fixed32",
        }
    }
}

impl std::fmt::Display for WireType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The metadata of one field as read from its tag.
///
/// A `Field` owns no data: it describes what lies at the scanner's cursor and
/// must be consumed (read, recursed into or skipped) before advancing again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Field {
    /// Field number (`tag >> 3`)
    pub number: u32,
    /// Wire type (`tag & 7`)
    pub wire_type: WireType,
}

impl Field {
    /// Create a field event.
    pub fn new(number: u32, wire_type: WireType) -> Self {
        Self { number, wire_type }
    }
}
