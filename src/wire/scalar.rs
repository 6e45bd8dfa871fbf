// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Scalar value decoding for the protobuf wire format.
//!
//! Every function takes a buffer and an offset and returns the decoded value
//! together with the offset just past it. Nothing here keeps state; the
//! [`Cursor`](super::Cursor) builds the stateful reads on top.

use byteorder::{ByteOrder, LittleEndian};

use crate::core::{Result, ScanError};

/// Decode a LEB128 varint of up to 64 bits.
///
/// Fails with [`ScanError::IntegerOverflow`] after 10 continuation bytes and
/// with [`ScanError::UnexpectedEof`] if the buffer ends before a byte with the
/// high bit clear.
#[inline]
pub fn decode_varint(buf: &[u8], offset: usize) -> Result<(u64, usize)> {
    let mut value: u64 = 0;
    let mut index = offset;
    let mut shift = 0u32;
    loop {
        if shift >= 64 {
            return Err(ScanError::integer_overflow(offset));
        }
        let Some(&byte) = buf.get(index) else {
            return Err(ScanError::unexpected_eof(offset, index - offset + 1));
        };
        index += 1;
        value |= u64::from(byte & 0x7F) << shift;
        if byte < 0x80 {
            return Ok((value, index));
        }
        shift += 7;
    }
}

/// Decode a LEB128 varint into 32 bits.
///
/// Same as [`decode_varint`] but overflows after 5 continuation bytes.
/// Payload bits above bit 31 in the fifth byte are dropped.
#[inline]
pub fn decode_varint32(buf: &[u8], offset: usize) -> Result<(u32, usize)> {
    let mut value: u32 = 0;
    let mut index = offset;
    let mut shift = 0u32;
    loop {
        if shift >= 32 {
            return Err(ScanError::integer_overflow(offset));
        }
        let Some(&byte) = buf.get(index) else {
            return Err(ScanError::unexpected_eof(offset, index - offset + 1));
        };
        index += 1;
        value |= u32::from(byte & 0x7F) << shift;
        if byte < 0x80 {
            return Ok((value, index));
        }
        shift += 7;
    }
}

/// Move past one varint without decoding it.
#[inline]
pub fn skip_varint(buf: &[u8], offset: usize) -> Result<usize> {
    decode_varint(buf, offset).map(|(_, next)| next)
}

/// Zig-zag decode a 64-bit value (`sint64`).
#[inline]
pub fn zigzag_decode(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

/// Zig-zag decode a 32-bit value (`sint32`).
#[inline]
pub fn zigzag_decode32(value: u32) -> i32 {
    ((value >> 1) as i32) ^ -((value & 1) as i32)
}

/// Zig-zag encode a 64-bit value.
#[inline]
pub fn zigzag_encode(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

/// Zig-zag encode a 32-bit value.
#[inline]
pub fn zigzag_encode32(value: i32) -> u32 {
    ((value << 1) ^ (value >> 31)) as u32
}

/// Borrow exactly `len` bytes starting at `offset`.
#[inline]
fn take(buf: &[u8], offset: usize, len: usize) -> Result<&[u8]> {
    offset
        .checked_add(len)
        .and_then(|end| buf.get(offset..end))
        .ok_or_else(|| ScanError::unexpected_eof(offset, len))
}

/// Decode a little-endian 32-bit value.
#[inline]
pub fn decode_fixed32(buf: &[u8], offset: usize) -> Result<(u32, usize)> {
    let bytes = take(buf, offset, 4)?;
    Ok((LittleEndian::read_u32(bytes), offset + 4))
}

/// Decode a little-endian 64-bit value.
#[inline]
pub fn decode_fixed64(buf: &[u8], offset: usize) -> Result<(u64, usize)> {
    let bytes = take(buf, offset, 8)?;
    Ok((LittleEndian::read_u64(bytes), offset + 8))
}

/// Decode an IEEE-754 single-precision value.
#[inline]
pub fn decode_float(buf: &[u8], offset: usize) -> Result<(f32, usize)> {
    decode_fixed32(buf, offset).map(|(bits, next)| (f32::from_bits(bits), next))
}

/// Decode an IEEE-754 double-precision value.
#[inline]
pub fn decode_double(buf: &[u8], offset: usize) -> Result<(f64, usize)> {
    decode_fixed64(buf, offset).map(|(bits, next)| (f64::from_bits(bits), next))
}

/// Decode a varint as a boolean (any non-zero value is `true`).
#[inline]
pub fn decode_bool(buf: &[u8], offset: usize) -> Result<(bool, usize)> {
    decode_varint(buf, offset).map(|(v, next)| (v != 0, next))
}

/// Decode the length prefix of a length-delimited value and check that the
/// payload fits in the buffer.
///
/// Returns the payload range as `(start, end)`.
#[inline]
pub fn length_delimited_range(buf: &[u8], offset: usize) -> Result<(usize, usize)> {
    let (length, start) = decode_varint(buf, offset)?;
    if (length as i64) < 0 {
        return Err(ScanError::invalid_length(length, offset));
    }
    let end = usize::try_from(length)
        .ok()
        .and_then(|len| start.checked_add(len))
        .ok_or_else(|| ScanError::invalid_length(length, offset))?;
    if end > buf.len() {
        return Err(ScanError::unexpected_eof(start, end - start));
    }
    Ok((start, end))
}

/// Decode a length-delimited value and borrow its payload.
#[inline]
pub fn decode_length_delimited(buf: &[u8], offset: usize) -> Result<(&[u8], usize)> {
    let (start, end) = length_delimited_range(buf, offset)?;
    Ok((&buf[start..end], end))
}

/// Split a tag into its field number and raw 3-bit wire type.
#[inline]
pub fn split_tag(tag: u64) -> (u64, u8) {
    (tag >> 3, (tag & 0x7) as u8)
}
