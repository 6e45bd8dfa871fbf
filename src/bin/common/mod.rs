// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for CLI commands.

use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{anyhow, Context as _};
use clap::{Args, ValueEnum};
use memmap2::Mmap;
use serde::Serialize;

use protoscan::{Scanner, WireType};

pub type Result<T = ()> = anyhow::Result<T>;

/// Input file options shared by all commands.
#[derive(Args, Clone, Debug)]
pub struct InputArgs {
    /// Input file containing one encoded message
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Treat the input file as hex text instead of raw bytes
    #[arg(long)]
    pub hex: bool,
}

impl InputArgs {
    /// Load the input bytes.
    pub fn load(&self) -> Result<Input> {
        if self.hex {
            Input::from_hex_file(&self.input)
        } else {
            Input::map(&self.input)
        }
    }
}

/// Encoded message bytes, memory-mapped or decoded from hex.
pub enum Input {
    Mapped(Mmap),
    Owned(Vec<u8>),
}

impl Input {
    /// Memory-map a file.
    pub fn map(path: &Path) -> Result<Self> {
        let file =
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        let len = file
            .metadata()
            .with_context(|| format!("Failed to stat {}", path.display()))?
            .len();
        // Mapping an empty file fails on some platforms.
        if len == 0 {
            return Ok(Input::Owned(Vec::new()));
        }
        let mmap = unsafe { Mmap::map(&file) }
            .with_context(|| format!("Failed to map {}", path.display()))?;
        Ok(Input::Mapped(mmap))
    }

    /// Read a file of hex text; whitespace is ignored.
    pub fn from_hex_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(Input::Owned(parse_hex(&text)?))
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Input::Mapped(mmap) => &mmap[..],
            Input::Owned(bytes) => bytes.as_slice(),
        }
    }
}

/// Decode hex text, ignoring whitespace.
pub fn parse_hex(text: &str) -> Result<Vec<u8>> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    hex::decode(&compact).map_err(|e| anyhow!("Invalid hex input: {e}"))
}

/// A dotted list of field numbers, e.g. `3.2.1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath(Vec<u32>);

impl FieldPath {
    pub fn segments(&self) -> &[u32] {
        &self.0
    }
}

impl FromStr for FieldPath {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let segments = s
            .split('.')
            .map(|part| {
                let number: u32 = part
                    .trim()
                    .parse()
                    .map_err(|_| anyhow!("Invalid field number '{part}' in path '{s}'"))?;
                if number == 0 {
                    return Err(anyhow!("Field numbers start at 1 (path '{s}')"));
                }
                Ok(number)
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(FieldPath(segments))
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(u32::to_string).collect();
        f.write_str(&parts.join("."))
    }
}

/// Element encoding of a packed repeated field.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PackedKind {
    Varint,
    Fixed32,
    Fixed64,
}

impl From<PackedKind> for WireType {
    fn from(kind: PackedKind) -> Self {
        match kind {
            PackedKind::Varint => WireType::Varint,
            PackedKind::Fixed32 => WireType::Fixed32,
            PackedKind::Fixed64 => WireType::Fixed64,
        }
    }
}

/// Print `value` as pretty JSON, or run the human-readable printer.
pub fn output_json_or<T>(json: bool, value: &T, human_fn: impl FnOnce() -> Result<()>) -> Result<()>
where
    T: Serialize,
{
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        human_fn()?;
    }
    Ok(())
}

/// Consume the current field, including whole groups.
pub fn consume(scanner: &mut Scanner<'_>) -> Result<()> {
    if scanner.wire_type() == Some(WireType::StartGroup) {
        scanner.skip_group()?;
    } else {
        scanner.skip();
    }
    Ok(())
}

/// Call `visit` on every occurrence of the field at `path`.
///
/// Intermediate segments descend into embedded messages and groups; fields
/// off the path are skipped. `visit` must consume the field it is given.
pub fn visit_path<'a, F>(scanner: &mut Scanner<'a>, path: &[u32], visit: &mut F) -> Result<()>
where
    F: FnMut(&mut Scanner<'a>) -> Result<()>,
{
    let Some((&head, rest)) = path.split_first() else {
        return Ok(());
    };

    while scanner.advance() {
        if scanner.field_number() != head {
            consume(scanner)?;
            continue;
        }
        if rest.is_empty() {
            visit(scanner)?;
            continue;
        }
        match scanner.wire_type() {
            Some(WireType::LengthDelimited) => {
                let mut sub = scanner.message()?;
                visit_path(&mut sub, rest, visit)?;
            }
            Some(WireType::StartGroup) => {
                let mut sub = Scanner::new(scanner.group_data()?);
                visit_path(&mut sub, rest, visit)?;
            }
            _ => consume(scanner)?,
        }
    }

    if let Some(err) = scanner.error() {
        return Err(err.clone().into());
    }
    Ok(())
}
