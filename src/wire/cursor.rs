// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Borrowed read cursor over protobuf wire data.
//!
//! [`Cursor`] pairs a borrowed buffer with an offset. The [`ScalarRead`]
//! trait layers the typed numeric reads on top of any type that exposes a
//! cursor, so the [`Scanner`](crate::Scanner) and the
//! [`PackedIterator`](crate::PackedIterator) share one implementation.
//!
//! # Example
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use protoscan::wire::{Cursor, ScalarRead};
//!
//! let data = [0x96, 0x01, 0x03];
//! let mut cursor = Cursor::new(&data);
//! assert_eq!(cursor.uint64()?, 150);
//! assert_eq!(cursor.sint32()?, -2);
//! assert!(cursor.is_at_end());
//! # Ok(())
//! # }
//! ```

use crate::core::{Result, ScanError};

use super::scalar;

/// A position within a borrowed byte buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor<'a> {
    /// The data buffer
    data: &'a [u8],
    /// Current read position
    offset: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// The whole underlying buffer.
    #[inline]
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Get the current read position.
    #[inline]
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Get the remaining bytes available to read.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    /// Check if at end of buffer.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.offset >= self.data.len()
    }

    /// Move to the start of `data`.
    #[inline]
    pub fn reset(&mut self, data: &'a [u8]) {
        self.data = data;
        self.offset = 0;
    }

    /// Rewind to the start of the current buffer.
    #[inline]
    pub fn rewind(&mut self) {
        self.offset = 0;
    }

    /// Move the position, clamped to the end of the buffer.
    #[inline]
    pub(crate) fn set_position(&mut self, offset: usize) {
        self.offset = offset.min(self.data.len());
    }

    /// Read a varint of up to 64 bits.
    #[inline]
    pub fn varint(&mut self) -> Result<u64> {
        let (value, next) = scalar::decode_varint(self.data, self.offset)?;
        self.offset = next;
        Ok(value)
    }

    /// Read a varint of up to 32 bits.
    #[inline]
    pub fn varint32(&mut self) -> Result<u32> {
        let (value, next) = scalar::decode_varint32(self.data, self.offset)?;
        self.offset = next;
        Ok(value)
    }

    /// Read 4 little-endian bytes.
    #[inline]
    pub fn fixed32(&mut self) -> Result<u32> {
        let (value, next) = scalar::decode_fixed32(self.data, self.offset)?;
        self.offset = next;
        Ok(value)
    }

    /// Read 8 little-endian bytes.
    #[inline]
    pub fn fixed64(&mut self) -> Result<u64> {
        let (value, next) = scalar::decode_fixed64(self.data, self.offset)?;
        self.offset = next;
        Ok(value)
    }

    /// Read a length-delimited payload.
    #[inline]
    pub fn length_delimited(&mut self) -> Result<&'a [u8]> {
        let (payload, next) = scalar::decode_length_delimited(self.data, self.offset)?;
        self.offset = next;
        Ok(payload)
    }

    /// Skip `len` bytes.
    ///
    /// Fails without moving if fewer than `len` bytes remain.
    pub fn skip_bytes(&mut self, len: usize) -> Result<()> {
        if len > self.remaining() {
            return Err(ScanError::unexpected_eof(self.offset, len));
        }
        self.offset += len;
        Ok(())
    }
}

/// Typed reads of numeric protobuf scalars.
///
/// Implementors only provide access to their [`Cursor`]; every read consumes
/// exactly the bytes of one value and advances it. A failed read returns the
/// error and leaves the cursor where it was.
pub trait ScalarRead<'a> {
    /// The cursor reads are performed on.
    fn cursor_mut(&mut self) -> &mut Cursor<'a>;

    /// Read a raw 64-bit varint.
    fn varint64(&mut self) -> Result<u64> {
        self.cursor_mut().varint()
    }

    /// Read a raw 32-bit varint.
    fn varint32(&mut self) -> Result<u32> {
        self.cursor_mut().varint32()
    }

    /// Read an `int32`.
    ///
    /// Negative values are sign-extended to ten bytes on the wire, so this
    /// decodes a full 64-bit varint and truncates.
    fn int32(&mut self) -> Result<i32> {
        Ok(self.cursor_mut().varint()? as i32)
    }

    /// Read an `int64`.
    fn int64(&mut self) -> Result<i64> {
        Ok(self.cursor_mut().varint()? as i64)
    }

    /// Read a `uint32`.
    fn uint32(&mut self) -> Result<u32> {
        self.cursor_mut().varint32()
    }

    /// Read a `uint64`.
    fn uint64(&mut self) -> Result<u64> {
        self.cursor_mut().varint()
    }

    /// Read a zig-zag encoded `sint32`.
    fn sint32(&mut self) -> Result<i32> {
        Ok(scalar::zigzag_decode32(self.cursor_mut().varint32()?))
    }

    /// Read a zig-zag encoded `sint64`.
    fn sint64(&mut self) -> Result<i64> {
        Ok(scalar::zigzag_decode(self.cursor_mut().varint()?))
    }

    /// Read a `fixed32`.
    fn fixed32(&mut self) -> Result<u32> {
        self.cursor_mut().fixed32()
    }

    /// Read a `fixed64`.
    fn fixed64(&mut self) -> Result<u64> {
        self.cursor_mut().fixed64()
    }

    /// Read an `sfixed32`.
    fn sfixed32(&mut self) -> Result<i32> {
        Ok(self.cursor_mut().fixed32()? as i32)
    }

    /// Read an `sfixed64`.
    fn sfixed64(&mut self) -> Result<i64> {
        Ok(self.cursor_mut().fixed64()? as i64)
    }

    /// Read a `float`.
    fn float(&mut self) -> Result<f32> {
        Ok(f32::from_bits(self.cursor_mut().fixed32()?))
    }

    /// Read a `double`.
    fn double(&mut self) -> Result<f64> {
        Ok(f64::from_bits(self.cursor_mut().fixed64()?))
    }

    /// Read a `bool`.
    fn bool(&mut self) -> Result<bool> {
        Ok(self.cursor_mut().varint()? != 0)
    }
}

impl<'a> ScalarRead<'a> for Cursor<'a> {
    #[inline]
    fn cursor_mut(&mut self) -> &mut Cursor<'a> {
        self
    }
}
