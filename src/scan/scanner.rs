// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Pull-based, field-by-field scanner over an encoded protobuf message.
//!
//! The scanner never owns a schema. The caller calls [`Scanner::advance`],
//! looks at the field number and wire type, and consumes the field with
//! exactly one operation: a typed read, [`Scanner::message`],
//! [`Scanner::message_data`], [`Scanner::iterator`], a repeated reader, or
//! [`Scanner::skip`].
//!
//! Two error channels are kept apart:
//! - failures while reading a tag (in `advance`) or while skipping are
//!   latched on the scanner and reported by [`Scanner::error`];
//! - failures of typed reads and sub-views are returned to the caller and
//!   leave the latched state untouched.
//!
//! # Example
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use protoscan::{ScalarRead, Scanner};
//!
//! // field 1: varint 150, field 2: string "hi"
//! let data = [0x08, 0x96, 0x01, 0x12, 0x02, b'h', b'i'];
//! let mut scanner = Scanner::new(&data);
//! let mut name = "";
//! while scanner.advance() {
//!     match scanner.field_number() {
//!         2 => name = scanner.string()?,
//!         _ => scanner.skip(),
//!     }
//! }
//! if let Some(err) = scanner.error() {
//!     return Err(err.clone().into());
//! }
//! assert_eq!(name, "hi");
//! # Ok(())
//! # }
//! ```

use crate::core::{Result, ScanError};
use crate::wire::{scalar, Cursor, Field, ScalarRead, WireType};

/// Scanner over one encoded message.
///
/// The scanner borrows its buffer for `'a`; every string, byte slice and
/// sub-scanner it hands out borrows the same buffer and cannot outlive it.
#[derive(Debug, Clone, Default)]
pub struct Scanner<'a> {
    /// Cursor over the message bytes
    pub(crate) cursor: Cursor<'a>,
    /// Last tag read by `advance`
    field: Option<Field>,
    /// Sticky error latched by `advance` or `skip`
    error: Option<ScanError>,
}

impl<'a> Scanner<'a> {
    /// Create a scanner at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(data),
            field: None,
            error: None,
        }
    }

    /// Move to the next field.
    ///
    /// Returns `false` when the buffer is exhausted or a sticky error is set.
    /// A tag that cannot be decoded (truncated, overlong, a field number that
    /// does not fit in `u32`, or a reserved wire type) latches the error and
    /// returns `false`.
    pub fn advance(&mut self) -> bool {
        if self.error.is_some() || self.cursor.is_at_end() {
            return false;
        }

        let position = self.cursor.position();
        let tag = match self.cursor.varint() {
            Ok(tag) => tag,
            Err(e) => {
                self.latch(e);
                return false;
            }
        };

        let (number, bits) = scalar::split_tag(tag);
        let Ok(number) = u32::try_from(number) else {
            self.latch(ScanError::integer_overflow(position));
            return false;
        };
        let Some(wire_type) = WireType::from_bits(bits) else {
            self.latch(ScanError::invalid_wire_type(bits, position));
            return false;
        };

        self.field = Some(Field::new(number, wire_type));
        true
    }

    /// The field read by the last successful [`advance`](Self::advance).
    #[inline]
    pub fn field(&self) -> Option<Field> {
        self.field
    }

    /// Field number of the current field, or 0 before the first advance.
    #[inline]
    pub fn field_number(&self) -> u32 {
        self.field.map_or(0, |f| f.number)
    }

    /// Wire type of the current field, or `None` before the first advance.
    #[inline]
    pub fn wire_type(&self) -> Option<WireType> {
        self.field.map(|f| f.wire_type)
    }

    /// The sticky error, if scanning was aborted.
    ///
    /// Check this after the `advance` loop ends to tell a clean end of
    /// input from malformed data.
    #[inline]
    pub fn error(&self) -> Option<&ScanError> {
        self.error.as_ref()
    }

    /// Current byte offset within [`data`](Self::data).
    #[inline]
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    /// The whole buffer being scanned.
    #[inline]
    pub fn data(&self) -> &'a [u8] {
        self.cursor.data()
    }

    /// Bytes left after the cursor.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.cursor.remaining()
    }

    /// Whether the cursor has reached the end of the buffer.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.cursor.is_at_end()
    }

    /// Rewind to the start of the current buffer and clear all state.
    pub fn reset(&mut self) {
        self.cursor.rewind();
        self.field = None;
        self.error = None;
    }

    /// Rebind the scanner to `data` and clear all state.
    pub fn reset_with(&mut self, data: &'a [u8]) {
        self.cursor.reset(data);
        self.field = None;
        self.error = None;
    }

    /// Read the current field as a UTF-8 string.
    ///
    /// On invalid UTF-8 the field has still been consumed.
    pub fn string(&mut self) -> Result<&'a str> {
        let payload = self.cursor.length_delimited()?;
        std::str::from_utf8(payload).map_err(|_| ScanError::InvalidUtf8 {
            position: self.cursor.position() - payload.len(),
        })
    }

    /// Read the current field as raw bytes.
    pub fn bytes(&mut self) -> Result<&'a [u8]> {
        self.cursor.length_delimited()
    }

    /// Scan the current length-delimited field as an embedded message.
    ///
    /// The parent moves past the embedded message; the returned scanner
    /// sees exactly its bytes.
    pub fn message(&mut self) -> Result<Scanner<'a>> {
        let payload = self.cursor.length_delimited()?;
        Ok(Scanner::new(payload))
    }

    /// Like [`message`](Self::message), but rebinds an existing scanner
    /// instead of creating one.
    pub fn message_into(&mut self, sub: &mut Scanner<'a>) -> Result<()> {
        let payload = self.cursor.length_delimited()?;
        sub.reset_with(payload);
        Ok(())
    }

    /// Raw bytes of the current length-delimited field, for handing to
    /// another decoder.
    pub fn message_data(&mut self) -> Result<&'a [u8]> {
        self.cursor.length_delimited()
    }

    /// Consume the current field without interpreting it.
    ///
    /// StartGroup and EndGroup fields are left in place: nothing is consumed
    /// for them. Use [`group_data`](Self::group_data) or match the group
    /// markers yourself. A failure latches the sticky error.
    pub fn skip(&mut self) {
        let Some(field) = self.field else {
            return;
        };
        let result = match field.wire_type {
            WireType::Varint => self.cursor.varint().map(drop),
            WireType::Fixed64 => self.cursor.skip_bytes(8),
            WireType::LengthDelimited => self.cursor.length_delimited().map(drop),
            WireType::Fixed32 => self.cursor.skip_bytes(4),
            WireType::StartGroup | WireType::EndGroup => Ok(()),
        };
        if let Err(e) = result {
            self.latch(e);
        }
    }

    /// Consume a whole group and return the bytes between its start and end
    /// tags.
    ///
    /// Must be called right after `advance` reported a StartGroup field.
    /// Nested groups are matched by field number. On return the current
    /// field is the matching EndGroup and the cursor is past it.
    ///
    /// Tag and skip failures inside the group are latched as usual and also
    /// returned.
    pub fn group_data(&mut self) -> Result<&'a [u8]> {
        let open = match self.field {
            Some(field) if field.wire_type == WireType::StartGroup => field,
            other => {
                return Err(ScanError::unexpected_wire_type(
                    WireType::StartGroup,
                    other.map(|f| f.wire_type),
                ))
            }
        };

        let start = self.cursor.position();
        let mut nested: Vec<u32> = Vec::new();
        loop {
            let end = self.cursor.position();
            if !self.advance() {
                return Err(self
                    .error
                    .clone()
                    .unwrap_or_else(|| ScanError::unexpected_eof(end, 1)));
            }

            let Some(field) = self.field else {
                continue;
            };
            match field.wire_type {
                WireType::StartGroup => nested.push(field.number),
                WireType::EndGroup => match nested.pop() {
                    Some(number) if number == field.number => {}
                    None if field.number == open.number => {
                        tracing::trace!(
                            field_number = open.number,
                            start,
                            end,
                            "group consumed"
                        );
                        return Ok(&self.cursor.data()[start..end]);
                    }
                    _ => {
                        return Err(ScanError::UnmatchedGroup {
                            field_number: field.number,
                            position: end,
                        })
                    }
                },
                _ => {
                    self.skip();
                    if let Some(e) = &self.error {
                        return Err(e.clone());
                    }
                }
            }
        }
    }

    /// Consume a whole group, discarding its contents.
    pub fn skip_group(&mut self) -> Result<()> {
        self.group_data().map(drop)
    }

    fn latch(&mut self, error: ScanError) {
        tracing::debug!(
            position = self.cursor.position(),
            error = %error,
            "scan aborted"
        );
        self.error = Some(error);
    }
}

impl<'a> ScalarRead<'a> for Scanner<'a> {
    #[inline]
    fn cursor_mut(&mut self) -> &mut Cursor<'a> {
        &mut self.cursor
    }
}
