// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Protoscan CLI
//!
//! Look inside protobuf-encoded messages without their schema.
//!
//! ## Usage
//!
//! ```sh
//! # Field histogram of a message
//! protoscan stats message.bin
//!
//! # Count occurrences of field 2 inside every field 3 sub-message
//! protoscan count message.bin 3.2
//!
//! # Count elements of a packed repeated varint field
//! protoscan count message.bin 4 --packed varint
//!
//! # Dump the second field 3 sub-message as hex
//! protoscan extract message.bin 3 --index 1
//! ```

mod cmd;
mod common;

use std::process;

use clap::{Parser, Subcommand};
use cmd::{CountCmd, ExtractCmd, StatsCmd};
use common::Result;

/// Protoscan - schema-less protobuf wire inspector
///
/// Walks the raw wire format of a single encoded message. Field paths are
/// dotted field numbers; intermediate segments must be embedded messages or
/// groups.
#[derive(Parser, Clone)]
#[command(name = "protoscan")]
#[command(about = "Inspect protobuf wire data without a schema", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "ArcheBase")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Clone)]
enum Commands {
    /// Per-field histogram (occurrences, wire types, bytes)
    Stats(StatsCmd),

    /// Count occurrences of a field path, or packed elements
    Count(CountCmd),

    /// Extract the payload of a length-delimited field or group
    Extract(ExtractCmd),
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Stats(cmd) => cmd.run(),
        Commands::Count(cmd) => cmd.run(),
        Commands::Extract(cmd) => cmd.run(),
    }
}

fn main() {
    let result = run();

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
