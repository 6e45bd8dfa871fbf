// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout protoscan.
//!
//! - [`ScanError`] - Error reported by every decoding operation
//! - [`ErrorKind`] - Position-free classification of a [`ScanError`]

pub mod error;

pub use error::{ErrorKind, Result, ScanError};
