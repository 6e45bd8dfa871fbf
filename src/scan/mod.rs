// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Field-by-field scanning of encoded messages.
//!
//! - [`Scanner`] - Tag scanner with typed reads, skip, sub-messages and groups
//! - [`PackedIterator`] - Bounded cursor over one packed repeated field
//! - Repeated readers (`Scanner::repeated_*`) for packed and unpacked fields

pub mod packed;
pub mod repeated;
pub mod scanner;

pub use packed::PackedIterator;
pub use scanner::Scanner;
