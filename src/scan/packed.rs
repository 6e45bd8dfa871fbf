// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Controlled traversal of a packed repeated field.
//!
//! A [`PackedIterator`] is scoped to exactly the payload of one packed field.
//! Creating it moves the parent [`Scanner`] past the whole payload; from then
//! on the two cursors are independent.

use crate::core::{Result, ScanError};
use crate::wire::{Cursor, ScalarRead, WireType};

use super::Scanner;

/// Number of values in a packed payload of the given wire type.
///
/// Varints are counted by their terminating bytes (high bit clear), so a
/// truncated trailing value is not counted.
pub(crate) fn count_values(payload: &[u8], wire_type: WireType) -> Result<usize> {
    match wire_type {
        WireType::Varint => Ok(payload.iter().filter(|&&b| b < 0x80).count()),
        WireType::Fixed32 => Ok(payload.len() / 4),
        WireType::Fixed64 => Ok(payload.len() / 8),
        other => Err(ScanError::not_packable(other)),
    }
}

/// Cursor over the values of one packed repeated field.
#[derive(Debug, Clone, Copy, Default)]
pub struct PackedIterator<'a> {
    /// Cursor over the packed payload only
    cursor: Cursor<'a>,
    /// Field number of the packed field
    field_number: u32,
}

impl<'a> PackedIterator<'a> {
    /// Create an iterator over an already extracted packed payload.
    pub fn new(payload: &'a [u8], field_number: u32) -> Self {
        Self {
            cursor: Cursor::new(payload),
            field_number,
        }
    }

    /// Field number of the packed field this iterator was created from.
    #[inline]
    pub fn field_number(&self) -> u32 {
        self.field_number
    }

    /// Whether any bytes are left to read.
    #[inline]
    pub fn has_next(&self) -> bool {
        !self.cursor.is_at_end()
    }

    /// Current offset within the payload.
    #[inline]
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    /// Length of the payload in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.cursor.data().len()
    }

    /// Whether the payload is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cursor.data().is_empty()
    }

    /// The packed payload.
    #[inline]
    pub fn data(&self) -> &'a [u8] {
        self.cursor.data()
    }

    /// Number of values in the whole payload, regardless of the position.
    ///
    /// O(n) for varints, O(1) for fixed-width values. Fails with
    /// [`ScanError::NotPackable`] for wire types that cannot be packed.
    pub fn count(&self, wire_type: WireType) -> Result<usize> {
        count_values(self.cursor.data(), wire_type)
    }

    /// Move past `n` values without decoding them.
    ///
    /// Skipping beyond the end leaves the iterator at the end; the next read
    /// then fails with [`ScanError::UnexpectedEof`].
    pub fn skip(&mut self, wire_type: WireType, n: usize) -> Result<()> {
        let position = self.cursor.position();
        match wire_type {
            WireType::Varint => {
                let data = self.cursor.data();
                let mut index = position;
                let mut left = n;
                while left > 0 && index < data.len() {
                    if data[index] < 0x80 {
                        left -= 1;
                    }
                    index += 1;
                }
                self.cursor.set_position(index);
            }
            WireType::Fixed32 | WireType::Fixed64 => {
                let width = wire_type.fixed_size().unwrap_or(0);
                self.cursor
                    .set_position(position.saturating_add(width.saturating_mul(n)));
            }
            other => return Err(ScanError::not_packable(other)),
        }
        Ok(())
    }

    /// Rewind to the first value.
    pub fn rewind(&mut self) {
        self.cursor.rewind();
    }

    fn reset_with(&mut self, payload: &'a [u8], field_number: u32) {
        self.cursor.reset(payload);
        self.field_number = field_number;
    }
}

impl<'a> ScalarRead<'a> for PackedIterator<'a> {
    #[inline]
    fn cursor_mut(&mut self) -> &mut Cursor<'a> {
        &mut self.cursor
    }
}

impl<'a> Scanner<'a> {
    /// Iterate over the current field as a packed repeated field.
    ///
    /// The payload range is computed like [`message_data`](Self::message_data)
    /// and the scanner moves past it.
    pub fn iterator(&mut self) -> Result<PackedIterator<'a>> {
        let payload = self.cursor.length_delimited()?;
        Ok(PackedIterator::new(payload, self.field_number()))
    }

    /// Like [`iterator`](Self::iterator), but rebinds an existing iterator.
    pub fn iterator_into(&mut self, iter: &mut PackedIterator<'a>) -> Result<()> {
        let payload = self.cursor.length_delimited()?;
        iter.reset_with(payload, self.field_number());
        Ok(())
    }
}
