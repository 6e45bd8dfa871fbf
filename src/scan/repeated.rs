// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Readers for repeated numeric fields.
//!
//! A repeated numeric field may be encoded packed (one length-delimited block)
//! or unpacked (one tag per value), and may be split into several sections
//! anywhere in the message. Each reader looks at the current wire type,
//! decodes either the whole block or the single value, and appends to the
//! caller's vector. Calling the same reader for every occurrence of the
//! field with the same vector concatenates the sections in order.
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use protoscan::Scanner;
//!
//! // field 1 packed [1, 2], then field 1 unpacked 3
//! let data = [0x0A, 0x02, 0x01, 0x02, 0x08, 0x03];
//! let mut scanner = Scanner::new(&data);
//! let mut values = Vec::new();
//! while scanner.advance() {
//!     scanner.repeated_int64(&mut values)?;
//! }
//! assert_eq!(values, vec![1, 2, 3]);
//! # Ok(())
//! # }
//! ```

use crate::core::Result;
use crate::wire::{Cursor, ScalarRead, WireType};

use super::packed::count_values;
use super::Scanner;

macro_rules! repeated_reader {
    ($(#[$doc:meta])* $name:ident, $ty:ty, $packed:expr, $read:ident) => {
        $(#[$doc])*
        pub fn $name(&mut self, out: &mut Vec<$ty>) -> Result<()> {
            self.read_repeated(out, $packed, |cursor| cursor.$read())
        }
    };
}

impl<'a> Scanner<'a> {
    /// Decode the current field into `out`, packed or not.
    ///
    /// For a packed block the scanner first moves past the whole payload,
    /// so a malformed block leaves the scanner positioned at the next field
    /// and `out` holding the values decoded before the failure.
    fn read_repeated<T>(
        &mut self,
        out: &mut Vec<T>,
        packed: WireType,
        read: impl Fn(&mut Cursor<'a>) -> Result<T>,
    ) -> Result<()> {
        if self.wire_type() != Some(WireType::LengthDelimited) {
            out.push(read(&mut self.cursor)?);
            return Ok(());
        }

        let payload = self.cursor.length_delimited()?;
        out.reserve(count_values(payload, packed)?);

        let mut values = Cursor::new(payload);
        while !values.is_at_end() {
            out.push(read(&mut values)?);
        }
        Ok(())
    }

    repeated_reader!(
        /// Append `int32` values.
        repeated_int32, i32, WireType::Varint, int32
    );
    repeated_reader!(
        /// Append `int64` values.
        repeated_int64, i64, WireType::Varint, int64
    );
    repeated_reader!(
        /// Append `uint32` values.
        repeated_uint32, u32, WireType::Varint, uint32
    );
    repeated_reader!(
        /// Append `uint64` values.
        repeated_uint64, u64, WireType::Varint, uint64
    );
    repeated_reader!(
        /// Append zig-zag encoded `sint32` values.
        repeated_sint32, i32, WireType::Varint, sint32
    );
    repeated_reader!(
        /// Append zig-zag encoded `sint64` values.
        repeated_sint64, i64, WireType::Varint, sint64
    );
    repeated_reader!(
        /// Append `fixed32` values.
        repeated_fixed32, u32, WireType::Fixed32, fixed32
    );
    repeated_reader!(
        /// Append `fixed64` values.
        repeated_fixed64, u64, WireType::Fixed64, fixed64
    );
    repeated_reader!(
        /// Append `sfixed32` values.
        repeated_sfixed32, i32, WireType::Fixed32, sfixed32
    );
    repeated_reader!(
        /// Append `sfixed64` values.
        repeated_sfixed64, i64, WireType::Fixed64, sfixed64
    );
    repeated_reader!(
        /// Append `float` values.
        repeated_float, f32, WireType::Fixed32, float
    );
    repeated_reader!(
        /// Append `double` values.
        repeated_double, f64, WireType::Fixed64, double
    );
    repeated_reader!(
        /// Append `bool` values.
        repeated_bool, bool, WireType::Varint, bool
    );
}
