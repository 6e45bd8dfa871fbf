// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CLI subcommands.

mod count;
mod extract;
mod stats;

pub use count::CountCmd;
pub use extract::ExtractCmd;
pub use stats::StatsCmd;
