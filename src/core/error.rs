// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Error types for wire-format scanning.
//!
//! Every failure the scanner can report is a deterministic function of the
//! input bytes and the cursor position, so each variant carries the byte
//! offset (relative to the buffer being scanned) where decoding stopped.

use thiserror::Error;

use crate::wire::WireType;

/// Errors that can occur while scanning protobuf wire data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// A varint did not terminate within the target width (32 or 64 bits).
    #[error("Integer overflow: varint at position {position} does not terminate within the target width")]
    IntegerOverflow {
        /// Offset of the first byte of the varint
        position: usize,
    },

    /// Fewer bytes remain than required to finish the current decode.
    #[error("Unexpected end of input: needed {needed} bytes at position {position}")]
    UnexpectedEof {
        /// Offset where the read started
        position: usize,
        /// Number of bytes the read required
        needed: usize,
    },

    /// A length prefix is negative when read as signed or overflows the offset.
    #[error("Invalid length {length} at position {position}")]
    InvalidLength {
        /// Raw length prefix value
        length: u64,
        /// Offset of the length prefix
        position: usize,
    },

    /// A tag carries one of the reserved wire types (6 or 7).
    #[error("Invalid wire type {wire_type} at position {position}")]
    InvalidWireType {
        /// Raw 3-bit wire type
        wire_type: u8,
        /// Offset of the tag
        position: usize,
    },

    /// A string payload is not valid UTF-8.
    #[error("Invalid UTF-8 in string at position {position}")]
    InvalidUtf8 {
        /// Offset of the string payload
        position: usize,
    },

    /// A packed-array operation was given a wire type that cannot be packed.
    #[error("Wire type {wire_type:?} cannot be used in a packed repeated field")]
    NotPackable {
        /// The rejected wire type
        wire_type: WireType,
    },

    /// The current field does not have the wire type an operation requires.
    #[error("Expected wire type {expected:?}, found {found:?}")]
    UnexpectedWireType {
        /// Wire type the operation requires
        expected: WireType,
        /// Wire type of the current field, if any
        found: Option<WireType>,
    },

    /// An EndGroup marker does not close the innermost open group.
    #[error("Unmatched end of group {field_number} at position {position}")]
    UnmatchedGroup {
        /// Field number carried by the EndGroup tag
        field_number: u32,
        /// Offset of the EndGroup tag
        position: usize,
    },
}

/// Coarse classification of a [`ScanError`], without positional details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`ScanError::IntegerOverflow`]
    IntegerOverflow,
    /// See [`ScanError::UnexpectedEof`]
    UnexpectedEof,
    /// See [`ScanError::InvalidLength`]
    InvalidLength,
    /// See [`ScanError::InvalidWireType`]
    InvalidWireType,
    /// See [`ScanError::InvalidUtf8`]
    InvalidUtf8,
    /// See [`ScanError::NotPackable`]
    NotPackable,
    /// See [`ScanError::UnexpectedWireType`]
    UnexpectedWireType,
    /// See [`ScanError::UnmatchedGroup`]
    UnmatchedGroup,
}

impl ScanError {
    /// Create an integer overflow error.
    pub fn integer_overflow(position: usize) -> Self {
        ScanError::IntegerOverflow { position }
    }

    /// Create an unexpected end of input error.
    pub fn unexpected_eof(position: usize, needed: usize) -> Self {
        ScanError::UnexpectedEof { position, needed }
    }

    /// Create an invalid length error.
    pub fn invalid_length(length: u64, position: usize) -> Self {
        ScanError::InvalidLength { length, position }
    }

    /// Create an invalid wire type error.
    pub fn invalid_wire_type(wire_type: u8, position: usize) -> Self {
        ScanError::InvalidWireType {
            wire_type,
            position,
        }
    }

    /// Create a "not packable" error.
    pub fn not_packable(wire_type: WireType) -> Self {
        ScanError::NotPackable { wire_type }
    }

    /// Create an unexpected wire type error.
    pub fn unexpected_wire_type(expected: WireType, found: Option<WireType>) -> Self {
        ScanError::UnexpectedWireType { expected, found }
    }

    /// The kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ScanError::IntegerOverflow { .. } => ErrorKind::IntegerOverflow,
            ScanError::UnexpectedEof { .. } => ErrorKind::UnexpectedEof,
            ScanError::InvalidLength { .. } => ErrorKind::InvalidLength,
            ScanError::InvalidWireType { .. } => ErrorKind::InvalidWireType,
            ScanError::InvalidUtf8 { .. } => ErrorKind::InvalidUtf8,
            ScanError::NotPackable { .. } => ErrorKind::NotPackable,
            ScanError::UnexpectedWireType { .. } => ErrorKind::UnexpectedWireType,
            ScanError::UnmatchedGroup { .. } => ErrorKind::UnmatchedGroup,
        }
    }

    /// Byte offset where the error occurred, if it has one.
    pub fn position(&self) -> Option<usize> {
        match self {
            ScanError::IntegerOverflow { position }
            | ScanError::UnexpectedEof { position, .. }
            | ScanError::InvalidLength { position, .. }
            | ScanError::InvalidWireType { position, .. }
            | ScanError::InvalidUtf8 { position }
            | ScanError::UnmatchedGroup { position, .. } => Some(*position),
            ScanError::NotPackable { .. } | ScanError::UnexpectedWireType { .. } => None,
        }
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            ScanError::IntegerOverflow { position } => vec![("position", position.to_string())],
            ScanError::UnexpectedEof { position, needed } => vec![
                ("position", position.to_string()),
                ("needed", needed.to_string()),
            ],
            ScanError::InvalidLength { length, position } => vec![
                ("length", length.to_string()),
                ("position", position.to_string()),
            ],
            ScanError::InvalidWireType {
                wire_type,
                position,
            } => vec![
                ("wire_type", wire_type.to_string()),
                ("position", position.to_string()),
            ],
            ScanError::InvalidUtf8 { position } => vec![("position", position.to_string())],
            ScanError::NotPackable { wire_type } => {
                vec![("wire_type", format!("{wire_type:?}"))]
            }
            ScanError::UnexpectedWireType { expected, found } => vec![
                ("expected", format!("{expected:?}")),
                ("found", format!("{found:?}")),
            ],
            ScanError::UnmatchedGroup {
                field_number,
                position,
            } => vec![
                ("field_number", field_number.to_string()),
                ("position", position.to_string()),
            ],
        }
    }
}

/// Result type for protoscan operations.
pub type Result<T> = std::result::Result<T, ScanError>;
