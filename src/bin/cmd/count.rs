// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Count command - count occurrences or packed elements of a field path.

use clap::Args;
use serde::Serialize;

use crate::common::{consume, output_json_or, visit_path, FieldPath, InputArgs, PackedKind, Result};
use protoscan::{Scanner, WireType};

/// Count how often a field occurs.
#[derive(Args, Clone, Debug)]
pub struct CountCmd {
    #[command(flatten)]
    pub input: InputArgs,

    /// Dotted path of field numbers, e.g. `3.2`
    #[arg(value_name = "PATH")]
    pub path: FieldPath,

    /// Count the elements of a packed repeated field with this encoding
    #[arg(long, value_enum)]
    pub packed: Option<PackedKind>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl CountCmd {
    pub fn run(self) -> Result<()> {
        let input = self.input.load()?;
        let mut scanner = Scanner::new(input.as_bytes());

        let counts = count_path(&mut scanner, self.path.segments(), self.packed)?;

        let report = CountReport {
            path: self.path.to_string(),
            packed: self.packed.map(|kind| WireType::from(kind).as_str()),
            occurrences: counts.occurrences,
            values: counts.values,
        };

        output_json_or(self.json, &report, || {
            if report.packed.is_some() {
                println!("{}", report.values);
            } else {
                println!("{}", report.occurrences);
            }
            Ok(())
        })
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Counts {
    occurrences: usize,
    values: usize,
}

/// Count the occurrences of `path`, and the values they hold when `packed`
/// is set.
///
/// A packed field may also appear unpacked, one value per tag, so with
/// `packed` set every non-length-delimited occurrence adds a single value.
fn count_path(scanner: &mut Scanner<'_>, path: &[u32], packed: Option<PackedKind>) -> Result<Counts> {
    let mut counts = Counts::default();
    visit_path(scanner, path, &mut |s| {
        counts.occurrences += 1;
        match packed {
            Some(kind) if s.wire_type() == Some(WireType::LengthDelimited) => {
                counts.values += s.iterator()?.count(kind.into())?;
            }
            _ => {
                counts.values += 1;
                consume(s)?;
            }
        }
        Ok(())
    })?;
    Ok(counts)
}

// Output types

#[derive(Serialize)]
struct CountReport {
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    packed: Option<&'static str>,
    occurrences: usize,
    values: usize,
}
